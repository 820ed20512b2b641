use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub static_dir: String,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: parse_or("SERVER_PORT", 3000),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            db_acquire_timeout_secs: env::var("DB_ACQUIRE_TIMEOUT")
                .ok()
                .map(|v| v.trim_end_matches('s').to_string())
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()),
            bcrypt_cost: parse_or("BCRYPT_COST", 10),
        })
    }

    /// 仅用于测试和本地调试的配置
    pub fn for_database(database_url: &str) -> Self {
        Config {
            database_url: database_url.to_string(),
            server_host: "127.0.0.1".into(),
            server_port: 3000,
            db_max_connections: 10,
            db_acquire_timeout_secs: 30,
            static_dir: "public".into(),
            // bcrypt 允许的最小成本，测试里足够
            bcrypt_cost: 4,
        }
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_database_defaults() {
        let config = Config::for_database("postgres://localhost/agenda");
        assert_eq!(config.database_url, "postgres://localhost/agenda");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.db_acquire_timeout(), Duration::from_secs(30));
        assert_eq!(config.static_dir, "public");
    }

    #[test]
    fn test_parse_or_falls_back_on_missing_key() {
        let port: u16 = parse_or("AGENDA_TEST_SURELY_UNSET_PORT", 4242);
        assert_eq!(port, 4242);
    }
}
