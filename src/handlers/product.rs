use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::EventService;

#[utoipa::path(
    patch,
    path = "/products/{id}/stock",
    tag = "product",
    params(
        ("id" = i64, Path, description = "奖品ID")
    ),
    request_body = StockAdjustRequest,
    responses(
        (status = 200, description = "库存已更新", body = StockAdjustResponse),
        (status = 400, description = "缺少 remaining_quantity 或 adjustment"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 调整剩余库存 (绝对值或增减量), 结果限制在 0 ~ 总库存
pub async fn adjust_stock(
    service: web::Data<EventService>,
    path: web::Path<i64>,
    payload: web::Json<StockAdjustRequest>,
) -> Result<HttpResponse> {
    match service.adjust_stock(path.into_inner(), &payload).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": data,
            "message": "Stock updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/products").route("/{id}/stock", web::patch().to(adjust_stock)));
}
