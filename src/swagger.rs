use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::engine::{
    DrawOutcome, DrawStatistics, PoolValidation, PrizeItem, SimulationEntry, WeightedPrizeItem,
};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::draw::draw,
        handlers::event::list_events,
        handlers::event::get_event,
        handlers::event::list_products,
        handlers::event::create_product,
        handlers::event::list_results,
        handlers::event::get_statistics,
        handlers::event::get_validation,
        handlers::event::get_simulation,
        handlers::product::adjust_stock,
    ),
    components(
        schemas(
            Event,
            Product,
            CreateProductRequest,
            StockAdjustRequest,
            StockAdjustResponse,
            DrawRequest,
            DrawResponse,
            DrawResultItem,
            DrawSummaryItem,
            WonProduct,
            DrawRecord,
            DrawResultsQuery,
            DrawResultsStats,
            DrawResultsResponse,
            SimulationQuery,
            SimulationResponse,
            PrizeItem,
            WeightedPrizeItem,
            DrawOutcome,
            DrawStatistics,
            PoolValidation,
            SimulationEntry,
        )
    ),
    tags(
        (name = "draw", description = "Lucky draw API"),
        (name = "event", description = "Event and prize pool API"),
        (name = "product", description = "Product stock API"),
    ),
    info(
        title = "Lucky Draw API",
        version = "1.0.0",
        description = "Weighted, stock-constrained lucky draw REST API"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
