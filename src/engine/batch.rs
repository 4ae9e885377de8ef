use super::item::{DrawOutcome, PrizeId, PrizeItem};
use super::pool::PrizePool;
use super::random::RandomSource;
use super::selector::select;

/// 批量抽奖期间独占的库存副本
struct DrawArena {
    items: Vec<PrizeItem>,
}

impl DrawArena {
    fn from_pool(pool: &PrizePool) -> Self {
        Self {
            items: pool.items().to_vec(),
        }
    }

    fn decrement(&mut self, id: PrizeId) {
        if let Some(item) = self.items.iter_mut().find(|p| p.id == id) {
            item.remaining_quantity = item.remaining_quantity.saturating_sub(1);
        }
    }
}

/// 连续抽奖 `count` 次
///
/// 每次中奖后在副本上扣减该奖品库存, 后续抽奖使用更新后的概率;
/// 库存耗尽后剩余次数均返回未中奖。调用方的奖池不会被修改。
pub fn draw_many<R: RandomSource + ?Sized>(
    pool: &PrizePool,
    count: usize,
    rng: &mut R,
) -> Vec<DrawOutcome> {
    let mut arena = DrawArena::from_pool(pool);
    let mut outcomes = Vec::with_capacity(count);

    for _ in 0..count {
        let outcome = select(&arena.items, rng);
        if let Some(id) = outcome.product_id() {
            arena.decrement(id);
        }
        outcomes.push(outcome);
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::{SecureRandom, SequenceRandom};
    use std::collections::HashMap;

    fn pool(items: Vec<PrizeItem>) -> PrizePool {
        PrizePool::new(items).unwrap()
    }

    #[test]
    fn test_zero_count_returns_empty() {
        let p = pool(vec![PrizeItem::new(1, "A", 5, 1.0)]);
        assert!(draw_many(&p, 0, &mut SecureRandom).is_empty());
    }

    #[test]
    fn test_single_unit_then_exhausted() {
        let p = pool(vec![PrizeItem::new(1, "A", 1, 1.0)]);
        let outcomes = draw_many(&p, 3, &mut SecureRandom);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_win);
        assert_eq!(outcomes[0].product_id(), Some(1));
        assert_eq!(outcomes[1], DrawOutcome::no_win());
        assert_eq!(outcomes[2], DrawOutcome::no_win());
    }

    #[test]
    fn test_input_pool_not_mutated() {
        let p = pool(vec![
            PrizeItem::new(1, "A", 4, 1.0),
            PrizeItem::new(2, "B", 6, 2.0),
        ]);
        let before = p.clone();
        let outcomes = draw_many(&p, 10, &mut SecureRandom);
        assert_eq!(outcomes.iter().filter(|o| o.is_win).count(), 10);
        assert_eq!(p, before);
    }

    #[test]
    fn test_wins_never_exceed_stock() {
        let p = pool(vec![
            PrizeItem::new(1, "A", 3, 50.0),
            PrizeItem::new(2, "B", 5, 1.0),
            PrizeItem::new(3, "C", 2, 0.5).with_remaining(1),
            PrizeItem::new(4, "D", 9, 1.0).with_remaining(0),
        ]);
        let outcomes = draw_many(&p, 20, &mut SecureRandom);

        let mut wins: HashMap<PrizeId, u32> = HashMap::new();
        for id in outcomes.iter().filter_map(DrawOutcome::product_id) {
            *wins.entry(id).or_default() += 1;
        }
        for item in p.iter() {
            assert!(wins.get(&item.id).copied().unwrap_or(0) <= item.remaining_quantity);
        }
        assert_eq!(wins.get(&4), None);

        // 总库存 3 + 5 + 1 = 9, 之后全部未中奖
        assert!(outcomes[..9].iter().all(|o| o.is_win));
        assert!(outcomes[9..].iter().all(|o| *o == DrawOutcome::no_win()));
    }

    #[test]
    fn test_later_draws_see_depleted_stock() {
        // 第一次抽中 A 后 A 库存为 0, 同样的随机数第二次只能落到 B
        let p = pool(vec![
            PrizeItem::new(1, "A", 1, 1.0),
            PrizeItem::new(2, "B", 1, 1.0),
        ]);
        let mut rng = SequenceRandom::new(vec![0.1, 0.1]);
        let outcomes = draw_many(&p, 2, &mut rng);
        assert_eq!(outcomes[0].product_id(), Some(1));
        assert_eq!(outcomes[0].probability, Some(50.0));
        assert_eq!(outcomes[1].product_id(), Some(2));
        assert_eq!(outcomes[1].probability, Some(100.0));
    }

    #[test]
    fn test_item_can_win_repeatedly_up_to_stock() {
        let p = pool(vec![PrizeItem::new(1, "A", 3, 1.0)]);
        let outcomes = draw_many(&p, 4, &mut SecureRandom);
        let ids: Vec<_> = outcomes.iter().map(DrawOutcome::product_id).collect();
        assert_eq!(ids, vec![Some(1), Some(1), Some(1), None]);
    }

    #[test]
    fn test_outcome_snapshot_reflects_stock_at_draw_time() {
        let p = pool(vec![PrizeItem::new(1, "A", 2, 1.0)]);
        let outcomes = draw_many(&p, 2, &mut SecureRandom);
        let remaining: Vec<_> = outcomes
            .iter()
            .map(|o| o.product.as_ref().unwrap().remaining_quantity)
            .collect();
        assert_eq!(remaining, vec![2, 1]);
    }
}
