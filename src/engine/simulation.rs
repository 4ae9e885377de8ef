use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::item::PrizeId;
use super::pool::PrizePool;
use super::random::RandomSource;
use super::selector::draw_once;
use super::statistics::{compute_statistics, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SimulationEntry {
    /// 理论概率 (%)
    pub expected: f64,
    /// 实际命中率 (%)
    pub actual: f64,
    pub deviation: f64,
}

/// 抽奖分布模拟 (诊断用)
///
/// 每次抽奖都在库存重置为初始库存的奖池上进行, 只衡量概率本身,
/// 不考虑库存消耗。
pub fn simulate_distribution<R: RandomSource + ?Sized>(
    pool: &PrizePool,
    iterations: u32,
    rng: &mut R,
) -> BTreeMap<PrizeId, SimulationEntry> {
    let restocked = pool.restocked();
    let stats = compute_statistics(&restocked);

    let mut counts: BTreeMap<PrizeId, u64> = BTreeMap::new();
    for _ in 0..iterations {
        if let Some(id) = draw_once(&restocked, rng).product_id() {
            *counts.entry(id).or_default() += 1;
        }
    }

    stats
        .items
        .iter()
        .map(|weighted| {
            let id = weighted.item.id;
            let expected = weighted.calculated_probability;
            let actual = if iterations > 0 {
                counts.get(&id).copied().unwrap_or(0) as f64 / iterations as f64 * 100.0
            } else {
                0.0
            };
            let entry = SimulationEntry {
                expected: round_to(expected, 2),
                actual: round_to(actual, 2),
                deviation: round_to((expected - actual).abs(), 2),
            };
            (id, entry)
        })
        .collect()
}
