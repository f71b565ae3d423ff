use std::{env, net::SocketAddr, path::PathBuf};

use crate::{auth::token_service::AuthConfig, error::Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Surreal,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "surreal" | "surrealdb" => Ok(Self::Surreal),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(Error::EnvVarError(format!(
                "CATALOG_STORE must be 'surreal' or 'memory', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DB_URL")?,
            namespace: env::var("DB_NS")?,
            database: env::var("DB_NAME")?,
            username: env::var("DB_USER").ok(),
            password: env::var("DB_PASSWORD").ok(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory the uploaded assets are written to and served from.
    pub dir: PathBuf,
    /// Public URL prefix under which `dir` is reachable.
    pub public_url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub database: Option<DatabaseConfig>,
    pub media: MediaConfig,
    pub auth: AuthConfig,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let store = match env::var("CATALOG_STORE") {
            Ok(value) => StoreBackend::parse(&value)?,
            Err(_) => StoreBackend::Surreal,
        };

        let database = match store {
            StoreBackend::Surreal => Some(DatabaseConfig::from_env()?),
            StoreBackend::Memory => None,
        };

        let host = env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        let bind_addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| Error::EnvVarError(format!("invalid bind address {host}:{port}")))?;

        let media = MediaConfig {
            dir: env::var("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./media")),
            public_url: env::var("MEDIA_PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}/media")),
        };

        Ok(Self {
            store,
            database,
            media,
            auth: AuthConfig::from_env()?,
            bind_addr,
        })
    }
}
