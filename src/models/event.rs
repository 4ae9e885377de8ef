use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 抽奖活动
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// 未启用的活动不能抽奖
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
