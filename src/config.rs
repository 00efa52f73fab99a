use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// RAWG API key, sent as the `key` query parameter on every catalog call
    pub api_key: String,

    /// RAWG API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Public site hosting the canonical game pages
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Where favorites and recent searches are persisted:
    /// a `redis://` URL, `memory`, or a directory path
    #[serde(default = "default_storage_url")]
    pub storage_url: String,

    /// Key prefix used by the Redis storage backend
    #[serde(default = "default_storage_namespace")]
    pub storage_namespace: String,

    /// Timeout applied to every catalog request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_url() -> String {
    "https://api.rawg.io/api".to_string()
}

fn default_site_url() -> String {
    "https://rawg.io".to_string()
}

fn default_storage_url() -> String {
    "./data".to_string()
}

fn default_storage_namespace() -> String {
    "game-finder".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
