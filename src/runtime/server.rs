//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::middleware::ActorAuth;
use crate::runtime::startup;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let services = startup::prepare_server_startup().await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    // 在任何 worker 启动前初始化签名密钥
    crate::api::jwt::get_jwt_service();

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(ActorAuth::new(services.store.clone()))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .configure(|cfg| services.configure(cfg))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    server.bind(bind_address)?.run().await?;
    Ok(())
}
