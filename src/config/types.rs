use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    /// Signed-in user. Without it every mutation is refused.
    #[serde(default)]
    pub session: Option<SessionConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the row store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store API (e.g., "https://abc.supabase.co").
    #[serde(default = "default_store_url")]
    pub url: String,
    /// Public API key sent as `apikey` on every request.
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Connection timeout in seconds. Unset leaves the client default.
    #[serde(default)]
    pub connect_timeout_seconds: Option<u64>,
    /// Total request timeout in seconds. Unset leaves the client default.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_species_table")]
    pub species_table: String,
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
}

/// Identity of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub user_id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    /// Bearer token for row-level security. Falls back to the anon key.
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_store_url() -> String {
    "http://127.0.0.1:54321".to_string()
}

fn default_species_table() -> String {
    "species".to_string()
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            anon_key: None,
            connect_timeout_seconds: None,
            timeout_seconds: None,
            species_table: default_species_table(),
            profiles_table: default_profiles_table(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
