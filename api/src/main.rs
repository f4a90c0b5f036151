use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;
use tracing::{info, warn};

use jm_api::{config, create_app, SessionGuard};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load().context("Failed to load configuration")?;

    config::init_tracing(&app_config.logging);

    info!(environment = %app_config.environment, "Starting JwtManager API");
    if app_config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }

    let services = jm_infra::initialize(&app_config)
        .await
        .context("Failed to initialize infrastructure")?;
    let sessions: Arc<dyn SessionGuard> = Arc::new(
        services
            .token_manager(&app_config.jwt)
            .context("Invalid token configuration")?,
    );

    let bind_address = app_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(sessions.clone()))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    services.pool.close().await;
    Ok(())
}
