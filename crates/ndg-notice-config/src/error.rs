use thiserror::Error;

/// Error type for ndg-notice-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
