use std::net::{IpAddr, SocketAddr};

use agenda_backend::{AppState, build_router, config::Config, database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration (is DATABASE_URL set?): {}", e);
            std::process::exit(1);
        }
    };

    // 连接数据库，失败直接退出
    let pool = match database::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to Postgres: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Connected to Postgres (max {} connections)",
        config.db_max_connections
    );

    if let Err(e) = database::ensure_schema(&pool).await {
        tracing::error!("Failed to prepare database schema: {}", e);
        std::process::exit(1);
    }

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );

    let app = build_router(AppState { pool, config });

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server stopped with error: {}", e);
        std::process::exit(1);
    }
}
