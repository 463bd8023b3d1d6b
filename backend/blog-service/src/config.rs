/// Configuration management
///
/// Everything the service needs from the environment is deserialized into
/// one value at startup and passed into the components that use it; no
/// module reads environment variables after boot.
use serde::Deserialize;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_ttl_secs() -> i64 {
    3600
}

fn default_min_password_len() -> usize {
    8
}

fn default_cors_allowed_origins() -> String {
    "*".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    /// Token signing secret; must be present at startup.
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    /// Minimum accepted password length at registration.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Upload endpoint of the external image host.
    pub image_host_url: String,
    #[serde(default)]
    pub image_host_key: Option<String>,
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}
