use super::item::{DrawStatistics, PrizeItem, WeightedPrizeItem};

/// 区间划分: 可抽奖品按过滤顺序排列, range_start 升序
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RangePartition {
    pub total_remaining_quantity: u64,
    pub total_weighted_value: f64,
    pub ranges: Vec<WeightedPrizeItem>,
}

impl RangePartition {
    pub fn build(items: &[PrizeItem]) -> Self {
        let available: Vec<&PrizeItem> = items.iter().filter(|p| p.is_available()).collect();

        let total_remaining_quantity = available
            .iter()
            .map(|p| p.remaining_quantity as u64)
            .sum();
        let total_weighted_value: f64 = available.iter().map(|p| p.weighted_value()).sum();

        let mut cumulative = 0.0;
        let ranges = available
            .into_iter()
            .map(|item| {
                let weighted_value = item.weighted_value();
                let probability = if total_weighted_value > 0.0 {
                    weighted_value / total_weighted_value * 100.0
                } else {
                    0.0
                };

                let range_start = cumulative;
                cumulative += weighted_value;

                WeightedPrizeItem {
                    item: item.clone(),
                    weighted_value,
                    calculated_probability: round_to(probability, 4),
                    range_start,
                    range_end: cumulative,
                }
            })
            .collect();

        Self {
            total_remaining_quantity,
            total_weighted_value,
            ranges,
        }
    }

    pub fn can_draw(&self) -> bool {
        self.total_remaining_quantity > 0 && !self.ranges.is_empty()
    }
}

/// 计算奖池统计 (按剩余库存加权)
///
/// 剩余库存为0的奖品不参与; 奖池为空时 `can_draw = false`, 不报错。
pub fn compute_statistics(items: &[PrizeItem]) -> DrawStatistics {
    let partition = RangePartition::build(items);
    let can_draw = partition.can_draw();

    let mut display = partition.ranges;
    display.sort_by(|a, b| b.calculated_probability.total_cmp(&a.calculated_probability));

    DrawStatistics {
        total_remaining_quantity: partition.total_remaining_quantity,
        total_weighted_value: partition.total_weighted_value,
        can_draw,
        items: display,
    }
}

/// 四舍五入到指定小数位 (远离零)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
