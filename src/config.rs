use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` runs the service on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub host: String,
    pub port: u16,
    /// Overrides the embedded food reference table.
    pub foods_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = std::env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
        });
        let port = std::env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse::<u16>()?;
        Ok(Self {
            database,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            foods_path: std::env::var("FOODS_PATH").ok().map(PathBuf::from),
        })
    }
}
