use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use clap::Parser;
use tracing::info;

use asset_inventory::config::AppConfig;
use asset_inventory::{database, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::parse();
    let db = database::init(&config);
    let bind_address = config.bind_address.clone();

    info!("Server running at http://{}", bind_address);
    info!("Alert window: {} days", config.alert_window_days);

    let db = web::Data::new(db);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        let cors = config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::HeaderName::from_static("x-user-id"),
            ])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(db.clone())
            .app_data(config.clone())
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
