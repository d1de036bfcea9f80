use actix_web::HttpServer;
use anyhow::Context;
use log::info;

use carpool_api::app::{build_token_service, create_app};
use carpool_core::InMemoryStore;
use carpool_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env)
    let config = AppConfig::load().context("Failed to load configuration")?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!("Starting Carpool API Server ({})", config.environment);

    let token_service = build_token_service(&config, InMemoryStore::new())
        .context("Failed to initialise token service")?;

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(token_service.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")?;

    Ok(())
}
