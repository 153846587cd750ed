//! Compass CRM - Small-business CRM backend

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use compass_api::{AppState, create_router};
use compass_db::Database;
use config::Config;

/// Compass CRM - REST backend with role-based authentication
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "COMPASS_CRM_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "COMPASS_CRM_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting Compass CRM v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.jwt_secret == "change-me-in-production" {
        warn!("Using the default JWT signing secret; set [auth].jwt_secret");
    }
    if !config.auth.cookie_secure {
        warn!("Secure cookie attribute disabled; acceptable for local development only");
    }

    // Create data directory
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Initialize database
    let db_url = format!("sqlite:{}?mode=rwc", config.database.path);
    let db = Database::new(&db_url).await?;

    // Create default admin user if the admins collection is empty
    if !db.has_admins().await? {
        info!("Creating default admin user");
        let password_hash = compass_auth::hash_password("admin")?;
        db.insert_admin(compass_db::NewAdmin {
            full_name: "Administrator".to_string(),
            email: "admin@compass.local".to_string(),
            password_hash,
        })
        .await?;
        info!("Default admin created (email: admin@compass.local, password: admin)");
    }

    // Create application state
    let state = AppState::with_secret(db, &config.auth.jwt_secret, config.auth.cookie_secure);

    // Create router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
