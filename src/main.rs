use actix_web::{App, HttpServer, middleware::Logger, web};

use lucky_draw::{
    config::Config,
    handlers, logging,
    middlewares::create_cors,
    services::{DrawService, EventService},
    store::create_store,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    logging::init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 载入活动与奖品
    let store = create_store(&config.events).expect("Invalid prize configuration");

    let draw_service = DrawService::new(store.clone(), config.draw.max_batch_size);
    let event_service = EventService::new(store, config.draw.simulation_iterations);

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(event_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api")
                    .configure(handlers::draw_config)
                    .configure(handlers::event_config)
                    .configure(handlers::product_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
