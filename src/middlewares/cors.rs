use actix_cors::Cors;

/// 抽奖页面与管理后台可能部署在不同域名
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
