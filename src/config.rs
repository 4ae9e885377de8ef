use serde::{Deserialize, Serialize};
use std::env;

use crate::engine::WeightInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    /// 启动时载入内存的活动与奖品
    #[serde(default)]
    pub events: Vec<EventSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 单次请求最多抽奖次数
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: u32,
    /// 模拟接口默认迭代次数
    #[serde(default = "default_simulation_iterations")]
    pub simulation_iterations: u32,
}

fn default_max_batch_size() -> u32 {
    100
}

fn default_simulation_iterations() -> u32 {
    10_000
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            simulation_iterations: default_simulation_iterations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub weight: WeightInput,
    pub total_quantity: i64,
    /// 缺省等于 total_quantity
    #[serde(default)]
    pub remaining_quantity: Option<i64>,
    #[serde(default)]
    pub display_order: i32,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件不存在时完全依赖环境变量
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("Config file {config_path} not found, using environment variables");
                Config {
                    server: ServerConfig::default(),
                    draw: DrawConfig::default(),
                    events: Vec::new(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    /// 环境变量覆盖 (即便文件存在时也覆盖)
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DRAW_MAX_BATCH_SIZE")
            && let Ok(n) = v.parse()
        {
            self.draw.max_batch_size = n;
        }
        if let Ok(v) = env::var("DRAW_SIMULATION_ITERATIONS")
            && let Ok(n) = v.parse()
        {
            self.draw.simulation_iterations = n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_seed_events() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [draw]
            max_batch_size = 50

            [[events]]
            name = "Spring Raffle"

            [[events.products]]
            name = "Tumbler"
            weight = "2.50"
            total_quantity = 10

            [[events.products]]
            name = "Sticker"
            weight = 1
            total_quantity = 100
            remaining_quantity = 40
            display_order = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.draw.max_batch_size, 50);
        assert_eq!(config.draw.simulation_iterations, 10_000);
        assert_eq!(config.events.len(), 1);

        let event = &config.events[0];
        assert!(event.is_active);
        assert_eq!(event.products[0].weight.resolve(), 2.5);
        assert_eq!(event.products[0].remaining_quantity, None);
        assert_eq!(event.products[1].weight.resolve(), 1.0);
        assert_eq!(event.products[1].remaining_quantity, Some(40));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("[server]\nhost = \"0.0.0.0\"\nport = 8080\n").unwrap();
        assert_eq!(config.draw.max_batch_size, 100);
        assert!(config.events.is_empty());
    }
}
