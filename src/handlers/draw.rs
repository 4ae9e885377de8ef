use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::DrawService;

#[utoipa::path(
    post,
    path = "/draw",
    tag = "draw",
    request_body = DrawRequest,
    responses(
        (status = 200, description = "抽奖成功", body = DrawResponse),
        (status = 400, description = "次数超出范围或活动未启用"),
        (status = 404, description = "活动不存在"),
        (status = 422, description = "奖品配置不合法")
    )
)]
/// 对活动进行 1 ~ N 次抽奖, 库存耗尽后的次数返回未中奖
pub async fn draw(
    service: web::Data<DrawService>,
    payload: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service.draw(&payload).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/draw", web::post().to(draw));
}
