use config::Config;
use sqlx::PgPool;

pub mod config;
pub mod database;
pub mod error;
pub mod router;
pub mod routes;
pub mod utils;

pub use router::build_router;

/// 请求间共享的状态；连接池在 main 中创建后显式传入
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}
