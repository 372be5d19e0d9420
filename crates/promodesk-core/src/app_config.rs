use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which adapter backs the platform settings document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsStoreKind {
    Postgres,
    Memory,
    /// Every read and write fails with an explicit "unavailable" error.
    Unavailable,
}

impl std::fmt::Display for SettingsStoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsStoreKind::Postgres => write!(f, "postgres"),
            SettingsStoreKind::Memory => write!(f, "memory"),
            SettingsStoreKind::Unavailable => write!(f, "unavailable"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `None` runs every collection against in-memory repositories.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// `None` uses the fixtures embedded at build time.
    pub fixtures_path: Option<PathBuf>,
    pub settings_store: SettingsStoreKind,
    pub genai_api_key: Option<String>,
    pub genai_base_url: String,
    pub genai_model: String,
    pub genai_timeout_secs: u64,
    pub page_size: usize,
    pub list_loading_delay_ms: u64,
    pub theme_path: PathBuf,
    pub api_keys: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("fixtures_path", &self.fixtures_path)
            .field("settings_store", &self.settings_store)
            .field(
                "genai_api_key",
                &self.genai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("genai_base_url", &self.genai_base_url)
            .field("genai_model", &self.genai_model)
            .field("genai_timeout_secs", &self.genai_timeout_secs)
            .field("page_size", &self.page_size)
            .field("list_loading_delay_ms", &self.list_loading_delay_ms)
            .field("theme_path", &self.theme_path)
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .finish()
    }
}
