use serde::{Deserialize, Serialize};

use super::item::DEFAULT_WEIGHT;

/// 外部传入的权重, 可能是数字或数字字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(f64),
    Text(String),
}

impl WeightInput {
    pub fn resolve(&self) -> f64 {
        match self {
            WeightInput::Number(n) => *n,
            WeightInput::Text(s) => parse_weight(s),
        }
    }
}

impl Default for WeightInput {
    fn default() -> Self {
        WeightInput::Number(DEFAULT_WEIGHT)
    }
}

impl From<f64> for WeightInput {
    fn from(value: f64) -> Self {
        WeightInput::Number(value)
    }
}

/// 解析字符串权重, 无法解析时回退为 1.0
///
/// 去掉首尾空白后整个字符串必须是一个有限数字。不做前缀解析:
/// `"1.5kg"` 不会被读作 1.5, 而是同样回退为 1.0 并记录警告,
/// 带单位的录入错误因此会出现在日志里。
pub fn parse_weight(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(w) if w.is_finite() => w,
        _ => {
            log::warn!("Unparsable prize weight {raw:?}, falling back to {DEFAULT_WEIGHT}");
            DEFAULT_WEIGHT
        }
    }
}
