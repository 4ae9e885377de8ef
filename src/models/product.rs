use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::{PrizeItem, WeightInput};

/// 活动下的奖品 (库存与权重)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// 权重 (默认 1.0, 越高越容易中)
    pub weight: f64,
    pub total_quantity: u32,
    pub remaining_quantity: u32,
    /// 展示顺序
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn to_prize_item(&self) -> PrizeItem {
        PrizeItem {
            id: self.id,
            name: self.name.clone(),
            total_quantity: self.total_quantity,
            remaining_quantity: self.remaining_quantity,
            weight: self.weight,
        }
    }
}

/// 新增奖品请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// 数字或数字字符串, 缺省 1.0
    #[schema(value_type = Option<f64>)]
    pub weight: Option<WeightInput>,
    pub total_quantity: i64,
    pub display_order: Option<i32>,
}

/// 库存调整请求: remaining_quantity 为绝对值, adjustment 为增减量 (二选一)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StockAdjustRequest {
    pub remaining_quantity: Option<i64>,
    pub adjustment: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockAdjustResponse {
    pub product_id: i64,
    pub remaining_quantity: u32,
}
