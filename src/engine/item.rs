use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type PrizeId = i64;

/// 奖品权重缺省值
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// 抽奖引擎的输入: 一种奖品及其库存与权重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeItem {
    /// 奖品ID (同一奖池内唯一)
    pub id: i64,
    /// 展示名称 (引擎不解析)
    pub name: String,
    /// 初始库存
    pub total_quantity: u32,
    /// 剩余库存
    pub remaining_quantity: u32,
    /// 权重 (> 0)
    pub weight: f64,
}

impl PrizeItem {
    pub fn new(id: PrizeId, name: impl Into<String>, total_quantity: u32, weight: f64) -> Self {
        Self {
            id,
            name: name.into(),
            total_quantity,
            remaining_quantity: total_quantity,
            weight,
        }
    }

    pub fn with_remaining(mut self, remaining_quantity: u32) -> Self {
        self.remaining_quantity = remaining_quantity;
        self
    }

    pub fn is_available(&self) -> bool {
        self.remaining_quantity > 0
    }

    /// 加权值 = 剩余库存 * 权重
    pub fn weighted_value(&self) -> f64 {
        self.remaining_quantity as f64 * self.weight
    }
}

/// 带概率与区间的奖品 (每次统计时重新计算)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeightedPrizeItem {
    #[serde(flatten)]
    pub item: PrizeItem,
    pub weighted_value: f64,
    /// 百分比概率, 保留4位小数
    pub calculated_probability: f64,
    /// 半开区间 [range_start, range_end)
    pub range_start: f64,
    pub range_end: f64,
}

impl WeightedPrizeItem {
    pub fn contains(&self, point: f64) -> bool {
        point >= self.range_start && point < self.range_end
    }
}

/// 单次抽奖结果
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DrawOutcome {
    pub is_win: bool,
    /// 中奖时奖品快照
    pub product: Option<PrizeItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// [0, 1) 之间的归一化随机数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_value: Option<f64>,
    /// 随机熵 (16位十六进制), 可用于复现 random_value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl DrawOutcome {
    pub fn no_win() -> Self {
        Self {
            is_win: false,
            product: None,
            probability: None,
            random_value: None,
            seed: None,
        }
    }

    pub fn product_id(&self) -> Option<PrizeId> {
        self.product.as_ref().map(|p| p.id)
    }
}

/// 奖池统计
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DrawStatistics {
    pub total_remaining_quantity: u64,
    pub total_weighted_value: f64,
    pub can_draw: bool,
    /// 按概率降序 (仅用于展示)
    pub items: Vec<WeightedPrizeItem>,
}
