use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::engine::{DrawStatistics, PoolValidation};
use crate::models::*;
use crate::services::EventService;

#[utoipa::path(
    get,
    path = "/events",
    tag = "event",
    responses(
        (status = 200, description = "获取活动列表成功", body = [Event])
    )
)]
pub async fn list_events(service: web::Data<EventService>) -> Result<HttpResponse> {
    match service.list_events().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "event",
    params(("id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "获取活动成功", body = Event),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn get_event(
    service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_event(path.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": event }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}/products",
    tag = "event",
    params(("id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "获取奖品列表成功", body = [Product]),
        (status = 404, description = "活动不存在")
    )
)]
/// 活动奖品 (按展示顺序)
pub async fn list_products(
    service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_products(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events/{id}/products",
    tag = "event",
    params(("id" = i64, Path, description = "活动ID")),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "奖品已添加", body = Product),
        (status = 400, description = "参数错误"),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn create_product(
    service: web::Data<EventService>,
    path: web::Path<i64>,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    match service.create_product(path.into_inner(), &payload).await {
        Ok(product) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": product }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}/results",
    tag = "event",
    params(
        ("id" = i64, Path, description = "活动ID"),
        ("limit" = Option<u32>, Query, description = "返回条数 (默认100)")
    ),
    responses(
        (status = 200, description = "获取抽奖记录成功", body = DrawResultsResponse),
        (status = 404, description = "活动不存在")
    )
)]
/// 抽奖记录 (倒序) 与中奖率
pub async fn list_results(
    service: web::Data<EventService>,
    path: web::Path<i64>,
    query: web::Query<DrawResultsQuery>,
) -> Result<HttpResponse> {
    match service.list_results(path.into_inner(), query.limit).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}/statistics",
    tag = "event",
    params(("id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "当前库存下的概率分布", body = DrawStatistics),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn get_statistics(
    service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.statistics(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}/validation",
    tag = "event",
    params(("id" = i64, Path, description = "活动ID")),
    responses(
        (status = 200, description = "奖池检查结果", body = PoolValidation),
        (status = 404, description = "活动不存在")
    )
)]
pub async fn get_validation(
    service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.validate(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}/simulation",
    tag = "event",
    params(
        ("id" = i64, Path, description = "活动ID"),
        ("iterations" = Option<u32>, Query, description = "模拟次数")
    ),
    responses(
        (status = 200, description = "模拟结果", body = SimulationResponse),
        (status = 404, description = "活动不存在")
    )
)]
/// 按初始库存模拟抽奖分布, 比较理论与实际概率
pub async fn get_simulation(
    service: web::Data<EventService>,
    path: web::Path<i64>,
    query: web::Query<SimulationQuery>,
) -> Result<HttpResponse> {
    match service.simulate(path.into_inner(), query.iterations).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn event_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::get().to(list_events))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}/products", web::get().to(list_products))
            .route("/{id}/products", web::post().to(create_product))
            .route("/{id}/results", web::get().to(list_results))
            .route("/{id}/statistics", web::get().to(get_statistics))
            .route("/{id}/validation", web::get().to(get_validation))
            .route("/{id}/simulation", web::get().to(get_simulation)),
    );
}
