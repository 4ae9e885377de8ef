use std::collections::HashSet;
use std::ops::Deref;

use thiserror::Error;

use super::item::{PrizeId, PrizeItem};

/// 调用方违反奖池约定
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    #[error("Duplicate prize id {0} in pool")]
    DuplicateId(PrizeId),

    #[error("Prize {id}: remaining quantity {remaining} exceeds total quantity {total}")]
    RemainingExceedsTotal {
        id: PrizeId,
        remaining: u32,
        total: u32,
    },

    #[error("Prize {id}: weight must be a finite number greater than 0, got {weight}")]
    InvalidWeight { id: PrizeId, weight: f64 },

    #[error("Prize {id}: quantity {quantity} * weight {weight} is not a finite number")]
    WeightedValueOverflow {
        id: PrizeId,
        quantity: u32,
        weight: f64,
    },

    #[error("Total weighted value of the pool is not a finite number")]
    WeightedTotalOverflow,

    #[error("Prize {id}: {field} must not be negative, got {value}")]
    NegativeQuantity {
        id: PrizeId,
        field: &'static str,
        value: i64,
    },
}

/// 通过约定校验的奖池快照
///
/// 引擎只接受 `PrizePool`, 因此抽奖路径上不会出现重复ID、
/// 剩余库存大于总库存或非正权重。加权值按初始库存校验,
/// 补满库存 ([`PrizePool::restocked`]) 后总和仍为有限值。
#[derive(Debug, Clone, PartialEq)]
pub struct PrizePool {
    items: Vec<PrizeItem>,
}

impl PrizePool {
    pub fn new(items: Vec<PrizeItem>) -> Result<Self, PoolError> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut capacity = 0.0_f64;
        for item in &items {
            if !seen.insert(item.id) {
                return Err(PoolError::DuplicateId(item.id));
            }
            if item.remaining_quantity > item.total_quantity {
                return Err(PoolError::RemainingExceedsTotal {
                    id: item.id,
                    remaining: item.remaining_quantity,
                    total: item.total_quantity,
                });
            }
            if !item.weight.is_finite() || item.weight <= 0.0 {
                return Err(PoolError::InvalidWeight {
                    id: item.id,
                    weight: item.weight,
                });
            }
            let full = item.total_quantity as f64 * item.weight;
            if !full.is_finite() {
                return Err(PoolError::WeightedValueOverflow {
                    id: item.id,
                    quantity: item.total_quantity,
                    weight: item.weight,
                });
            }
            capacity += full;
        }
        if !capacity.is_finite() {
            return Err(PoolError::WeightedTotalOverflow);
        }
        Ok(Self { items })
    }

    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[PrizeItem] {
        &self.items
    }

    /// 所有奖品剩余库存重置为初始库存 (模拟用)
    pub fn restocked(&self) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|item| item.clone().with_remaining(item.total_quantity))
                .collect(),
        }
    }
}

impl Deref for PrizePool {
    type Target = [PrizeItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// 有符号库存转为 u32, 负数视为约定违反
pub fn checked_quantity(id: PrizeId, field: &'static str, value: i64) -> Result<u32, PoolError> {
    if value < 0 {
        return Err(PoolError::NegativeQuantity { id, field, value });
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pool() {
        let pool = PrizePool::new(vec![
            PrizeItem::new(1, "A", 10, 1.0),
            PrizeItem::new(2, "B", 5, 2.5).with_remaining(0),
        ])
        .unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[1].remaining_quantity, 0);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = PrizePool::new(vec![
            PrizeItem::new(7, "A", 1, 1.0),
            PrizeItem::new(7, "B", 1, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, PoolError::DuplicateId(7));
    }

    #[test]
    fn test_remaining_exceeds_total_rejected() {
        let err = PrizePool::new(vec![PrizeItem::new(1, "A", 3, 1.0).with_remaining(4)]).unwrap_err();
        assert!(matches!(
            err,
            PoolError::RemainingExceedsTotal {
                id: 1,
                remaining: 4,
                total: 3
            }
        ));
    }

    #[test]
    fn test_invalid_weight_rejected() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = PrizePool::new(vec![PrizeItem::new(1, "A", 3, weight)]);
            assert!(matches!(result, Err(PoolError::InvalidWeight { id: 1, .. })));
        }
    }

    #[test]
    fn test_weighted_overflow_rejected() {
        let err = PrizePool::new(vec![PrizeItem::new(1, "A", 10, f64::MAX)]).unwrap_err();
        assert!(matches!(
            err,
            PoolError::WeightedValueOverflow {
                id: 1,
                quantity: 10,
                ..
            }
        ));

        // 单项有限, 合计溢出
        let err = PrizePool::new(vec![
            PrizeItem::new(1, "A", 1, 1e308),
            PrizeItem::new(2, "B", 1, 1e308),
        ])
        .unwrap_err();
        assert_eq!(err, PoolError::WeightedTotalOverflow);

        let err = PrizePool::new(vec![
            PrizeItem::new(1, "A", 10, 1e308),
            PrizeItem::new(2, "B", 10, 1e308),
        ])
        .unwrap_err();
        assert!(matches!(err, PoolError::WeightedValueOverflow { id: 1, .. }));

        // 剩余为 0 时仍按初始库存校验
        let err = PrizePool::new(vec![PrizeItem::new(1, "A", 10, 1e308).with_remaining(0)]).unwrap_err();
        assert!(matches!(err, PoolError::WeightedValueOverflow { id: 1, .. }));

        assert!(PrizePool::new(vec![PrizeItem::new(1, "A", 10, 1e300)]).is_ok());
    }

    #[test]
    fn test_restocked() {
        let pool = PrizePool::new(vec![PrizeItem::new(1, "A", 8, 1.0).with_remaining(2)]).unwrap();
        let restocked = pool.restocked();
        assert_eq!(restocked[0].remaining_quantity, 8);
        // 原奖池不变
        assert_eq!(pool[0].remaining_quantity, 2);
    }

    #[test]
    fn test_checked_quantity() {
        assert_eq!(checked_quantity(1, "total_quantity", 5).unwrap(), 5);
        assert!(matches!(
            checked_quantity(1, "remaining_quantity", -1),
            Err(PoolError::NegativeQuantity { value: -1, .. })
        ));
    }
}
