//! 加权库存抽奖引擎
//!
//! 纯内存计算: 输入奖池快照, 输出抽奖结果。不涉及数据库、HTTP 或并发控制,
//! 快照一致性与库存扣减的原子性由调用方保证。

pub mod batch;
pub mod item;
pub mod pool;
pub mod random;
pub mod selector;
pub mod simulation;
pub mod statistics;
pub mod validation;
pub mod weight;

pub use batch::draw_many;
pub use item::{DEFAULT_WEIGHT, DrawOutcome, DrawStatistics, PrizeId, PrizeItem, WeightedPrizeItem};
pub use pool::{PoolError, PrizePool, checked_quantity};
pub use random::{Entropy, RandomSource, ReplayRandom, SecureRandom, SequenceRandom};
pub use selector::draw_once;
pub use simulation::{SimulationEntry, simulate_distribution};
pub use statistics::compute_statistics;
pub use validation::{PoolValidation, validate_pool};
pub use weight::{WeightInput, parse_weight};
