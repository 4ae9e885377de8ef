use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::engine::SimulationEntry;

use super::Product;

fn default_quantity() -> i64 {
    1
}

/// 抽奖请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DrawRequest {
    pub event_id: i64,
    /// 抽奖次数 (默认 1)
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// 中奖奖品 (隐藏库存等字段)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WonProduct {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Product> for WonProduct {
    fn from(p: &Product) -> Self {
        WonProduct {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            image_url: p.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResultItem {
    pub is_win: bool,
    pub product: Option<WonProduct>,
}

/// 同一奖品的中奖次数汇总
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawSummaryItem {
    pub count: u32,
    pub product: WonProduct,
}

/// 抽奖响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    /// 本次请求所有记录共享的批次ID
    pub batch_id: Uuid,
    pub quantity: u32,
    pub results: Vec<DrawResultItem>,
    pub summary: Vec<DrawSummaryItem>,
    pub updated_products: Vec<Product>,
}

/// 抽奖记录 (审计日志)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawRecord {
    pub id: i64,
    pub event_id: i64,
    pub batch_id: Uuid,
    pub product_id: Option<i64>,
    /// 奖品名称快照
    pub product_name: Option<String>,
    pub is_win: bool,
    /// 随机熵, 可复现当次随机数
    pub seed: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DrawResultsQuery {
    /// 返回条数 (默认 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DrawResultsStats {
    pub total_draws: u32,
    pub wins: u32,
    pub losses: u32,
    /// 例如 "66.67%"
    pub win_rate: String,
}

impl DrawResultsStats {
    pub fn from_records(records: &[DrawRecord]) -> Self {
        let total_draws = records.len() as u32;
        let wins = records.iter().filter(|r| r.is_win).count() as u32;
        let win_rate = if total_draws > 0 {
            format!("{:.2}%", wins as f64 / total_draws as f64 * 100.0)
        } else {
            "0%".to_string()
        };
        Self {
            total_draws,
            wins,
            losses: total_draws - wins,
            win_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResultsResponse {
    pub results: Vec<DrawRecord>,
    pub stats: DrawResultsStats,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SimulationQuery {
    pub iterations: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SimulationResponse {
    pub iterations: u32,
    /// 奖品ID -> 理论/实际概率
    pub distribution: BTreeMap<i64, SimulationEntry>,
}
