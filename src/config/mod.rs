use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Single origin allowed to call the API (exact match).
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory served at `/static`.
    pub static_dir: String,
    /// Directory avatar uploads are written to.
    pub images_dir: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite://roster.db")?
            .set_default("database.max_connections", 10)?
            .set_default("cors.allowed_origin", "http://localhost:3000")?
            .set_default("storage.static_dir", "static")?
            .set_default("storage.images_dir", "static/images")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with ROSTER__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("ROSTER").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite://roster.db".to_string(),
                max_connections: 10,
            },
            cors: CorsConfig {
                allowed_origin: "http://localhost:3000".to_string(),
            },
            storage: StorageConfig {
                static_dir: "static".to_string(),
                images_dir: "static/images".to_string(),
            },
        }
    }
}
