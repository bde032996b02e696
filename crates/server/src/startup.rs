use std::{env, net::SocketAddr, sync::Arc};

use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::product::repo::seaorm::SeaOrmProductRepository;
use service::product::{ProductRepository, ProductService};

use crate::routes;

/// Reads `.env` first; `LOG_FORMAT=json` switches to structured output.
pub fn init_logging() {
    dotenv().ok();
    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load and validate the config at `CONFIG_PATH` (default `config.toml`).
pub fn load_config() -> anyhow::Result<AppConfig> {
    let mut cfg = read_config(&configs::config_path())?;
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// A missing file falls back to `SERVER_HOST`/`SERVER_PORT`; a malformed one is an error.
fn read_config(path: &str) -> anyhow::Result<AppConfig> {
    if let Some(cfg) = configs::load_optional(path)? {
        return Ok(cfg);
    }
    warn!(path, "config file not found; using environment");
    let mut cfg = AppConfig::default();
    if let Ok(host) = env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    Ok(cfg)
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Build the app from a loaded config and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;

    let repo: Arc<dyn ProductRepository> = Arc::new(SeaOrmProductRepository::new(db));
    let product_service = Arc::new(ProductService::new(repo));
    let app = routes::build_router(product_service, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting product api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
