use serde::Serialize;
use utoipa::ToSchema;

use super::item::PrizeItem;

/// 抽奖前的奖池检查结果
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PoolValidation {
    pub valid: bool,
    pub total_quantity: u64,
    pub remaining_quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 校验奖池是否可以抽奖
///
/// 抽奖本身不依赖此检查, 已耗尽的奖池只会返回未中奖。
pub fn validate_pool(items: &[PrizeItem]) -> PoolValidation {
    let total_quantity: u64 = items.iter().map(|p| p.total_quantity as u64).sum();
    let remaining_quantity: u64 = items.iter().map(|p| p.remaining_quantity as u64).sum();

    let message = if items.is_empty() {
        Some("No prizes configured")
    } else if total_quantity == 0 {
        Some("Total prize quantity is 0")
    } else if remaining_quantity == 0 {
        Some("No remaining stock")
    } else {
        None
    };

    PoolValidation {
        valid: message.is_none(),
        total_quantity,
        remaining_quantity,
        message: message.map(str::to_string),
    }
}
