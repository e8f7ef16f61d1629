use actix_web::{middleware::Logger, web, App, HttpServer};
use account_app::admin::AdminSite;
use account_app::auth::password_validation::PasswordPolicy;
use account_app::config::{EnvConfig, CONFIG};
use account_app::db::postgres_service::PostgresService;
use account_app::routes::configure_routes;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = CONFIG.get_or_init(EnvConfig::from_env);
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .map_err(std::io::Error::other)?
    );
    let policy = web::Data::new(PasswordPolicy::from_config(&config.password)?);
    let site = web::Data::new(AdminSite::default());

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(policy.clone())
            .app_data(site.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
