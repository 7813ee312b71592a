use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub url: Option<String>,
    pub name: Option<String>,
    pub max_pool_size: u32,
    pub app_name: String,
}

impl DatabaseConfig {
    /// Both the connection string and the database name, when set and non-empty.
    pub fn target(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|s| !s.is_empty())?;
        let name = self.name.as_deref().filter(|s| !s.is_empty())?;
        Some((url, name))
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.max_pool_size", 10)?
            .set_default("database.app_name", "pacific-api")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with PACIFIC__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("PACIFIC").separator("__"))

            // The conventional deployment variables win over everything else
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("database.name", std::env::var("DATABASE_NAME").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL").ok(),
                name: std::env::var("DATABASE_NAME").ok(),
                max_pool_size: 10,
                app_name: "pacific-api".to_string(),
            },
        }
    }
}
