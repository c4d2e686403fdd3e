//! Configuration loaded from `config.toml`.

mod credentials;
mod loader;
mod types;

pub use credentials::SecureString;
pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, SessionConfig, StoreConfig};
