use std::io::Write;

use chrono::{DateTime, Local};
use env_logger::{Env, Target};
use serde_json::{Value, json};

/// 初始化日志: 每条记录输出一行 JSON 到 stdout
///
/// 级别由 `RUST_LOG` 控制, 默认 info。
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", log_line(record, Local::now())))
        .target(Target::Stdout)
        .init();
}

fn log_line(record: &log::Record<'_>, at: DateTime<Local>) -> Value {
    let mut line = json!({
        "timestamp": at.to_rfc3339_opts(chrono::SecondsFormat::Millis, false),
        "level": record.level().as_str().to_ascii_lowercase(),
        "target": record.target(),
        "message": record.args().to_string(),
    });
    if let Some(n) = record.line() {
        line["line"] = json!(n);
    }
    line
}
