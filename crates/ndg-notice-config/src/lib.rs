pub mod config;
pub mod error;

pub use config::{Config, InterruptConfig, NoticeConfig};
pub use error::ConfigError;
