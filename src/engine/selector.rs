use super::item::{DrawOutcome, PrizeItem, WeightedPrizeItem};
use super::pool::PrizePool;
use super::random::RandomSource;
use super::statistics::RangePartition;

/// 单次抽奖
///
/// 不修改库存, 扣减由调用方负责。
pub fn draw_once<R: RandomSource + ?Sized>(pool: &PrizePool, rng: &mut R) -> DrawOutcome {
    select(pool.items(), rng)
}

pub(crate) fn select<R: RandomSource + ?Sized>(items: &[PrizeItem], rng: &mut R) -> DrawOutcome {
    let partition = RangePartition::build(items);
    if !partition.can_draw() {
        return DrawOutcome::no_win();
    }

    let entropy = rng.next_uniform();
    let point = entropy.value * partition.total_weighted_value;
    let Some(winner) = resolve(&partition.ranges, point) else {
        return DrawOutcome::no_win();
    };

    DrawOutcome {
        is_win: true,
        product: Some(winner.item.clone()),
        probability: Some(winner.calculated_probability),
        random_value: Some(entropy.value),
        seed: Some(entropy.seed_hex()),
    }
}

/// 二分查找包含 point 的区间 (ranges 须按 range_start 升序)
pub(crate) fn locate(ranges: &[WeightedPrizeItem], point: f64) -> Option<&WeightedPrizeItem> {
    let idx = ranges.partition_point(|r| r.range_end <= point);
    ranges.get(idx).filter(|r| r.contains(point))
}

/// 浮点误差导致落在所有区间之外时, 取最后一个区间
pub(crate) fn resolve(ranges: &[WeightedPrizeItem], point: f64) -> Option<&WeightedPrizeItem> {
    locate(ranges, point).or_else(|| {
        log::debug!("Draw point {point} fell outside all ranges, using last range");
        ranges.last()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::{SecureRandom, SequenceRandom};

    fn pool(items: Vec<PrizeItem>) -> PrizePool {
        PrizePool::new(items).unwrap()
    }

    #[test]
    fn test_empty_pool_no_win() {
        let outcome = draw_once(&PrizePool::empty(), &mut SecureRandom);
        assert_eq!(outcome, DrawOutcome::no_win());
    }

    #[test]
    fn test_exhausted_pool_no_win_without_consuming_entropy() {
        let p = pool(vec![PrizeItem::new(1, "A", 3, 1.0).with_remaining(0)]);
        let mut rng = SequenceRandom::new(vec![0.5]);
        let outcome = draw_once(&p, &mut rng);
        assert!(!outcome.is_win);
        assert!(outcome.product.is_none());
        assert!(outcome.seed.is_none());
    }

    #[test]
    fn test_point_resolves_to_containing_range() {
        // 加权值 30 / 10, 总计 40
        let p = pool(vec![
            PrizeItem::new(1, "A", 10, 3.0),
            PrizeItem::new(2, "B", 10, 1.0),
        ]);
        let mut rng = SequenceRandom::new(vec![0.0, 0.74, 0.75, 0.999]);
        let ids: Vec<_> = (0..4)
            .map(|_| draw_once(&p, &mut rng).product_id().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_outcome_carries_diagnostics() {
        let p = pool(vec![
            PrizeItem::new(1, "A", 10, 3.0),
            PrizeItem::new(2, "B", 10, 1.0),
        ]);
        let outcome = draw_once(&p, &mut SequenceRandom::new(vec![0.8]));
        assert!(outcome.is_win);
        assert_eq!(outcome.probability, Some(25.0));
        assert_eq!(outcome.random_value, Some(0.8));
        assert_eq!(outcome.seed.as_deref().map(str::len), Some(16));
    }

    #[test]
    fn test_draw_does_not_mutate_pool() {
        let p = pool(vec![PrizeItem::new(1, "A", 1, 1.0)]);
        let before = p.clone();
        let outcome = draw_once(&p, &mut SecureRandom);
        assert!(outcome.is_win);
        assert_eq!(p, before);
    }

    #[test]
    fn test_exhausted_item_never_wins() {
        let p = pool(vec![
            PrizeItem::new(1, "A", 10, 100.0).with_remaining(0),
            PrizeItem::new(2, "B", 10, 1.0),
        ]);
        let mut rng = SecureRandom;
        for _ in 0..500 {
            assert_eq!(draw_once(&p, &mut rng).product_id(), Some(2));
        }
    }

    #[test]
    fn test_locate_binary_search() {
        let partition = RangePartition::build(&[
            PrizeItem::new(1, "A", 1, 1.0),
            PrizeItem::new(2, "B", 2, 1.0),
            PrizeItem::new(3, "C", 3, 1.0),
            PrizeItem::new(4, "D", 4, 1.0),
        ]);
        let id_at = |point: f64| locate(&partition.ranges, point).map(|w| w.item.id);
        assert_eq!(id_at(0.0), Some(1));
        assert_eq!(id_at(0.999), Some(1));
        assert_eq!(id_at(1.0), Some(2));
        assert_eq!(id_at(2.5), Some(2));
        assert_eq!(id_at(3.0), Some(3));
        assert_eq!(id_at(5.999), Some(3));
        assert_eq!(id_at(6.0), Some(4));
        assert_eq!(id_at(9.999), Some(4));
        assert_eq!(id_at(10.0), None);
    }

    #[test]
    fn test_point_at_top_falls_back_to_last_range() {
        let partition = RangePartition::build(&[
            PrizeItem::new(1, "A", 3, 0.1),
            PrizeItem::new(2, "B", 3, 0.2),
        ]);
        let top = partition.total_weighted_value;
        assert!(locate(&partition.ranges, top).is_none());
        assert_eq!(resolve(&partition.ranges, top).map(|w| w.item.id), Some(2));
        assert_eq!(resolve(&partition.ranges, top + 1e-9).map(|w| w.item.id), Some(2));
    }
}
