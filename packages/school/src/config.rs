use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Active profile names, reported by `/info/port`.
    #[serde(default)]
    pub profiles: Vec<String>,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AvatarConfig {
    /// Directory holding full-size avatar files.
    pub dir: String,
    pub preview_width: u32,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub avatar: AvatarConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("SCHOOL_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://school.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("avatar.dir", "avatars")?
            .set_default(
                "avatar.preview_width",
                i64::from(common::preview::DEFAULT_PREVIEW_WIDTH),
            )?
            .set_default("avatar.max_upload_bytes", 10 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., SCHOOL__SERVER__PORT)
            .add_source(
                Environment::with_prefix("SCHOOL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.profiles")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
