use std::{fs, path::Path};

use log::{debug, info};
use ndg_notice::NoticeOptions;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for notice rendering.
///
/// Loaded from a TOML or JSON file with a single `[notice]` table:
///
/// ```toml
/// [notice]
/// class-prefix  = "callout"
/// heading-level = 4
///
/// [notice.interrupt]
/// list = false
/// ```
///
/// Every key is optional and falls back to the defaults of
/// [`NoticeOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  pub notice: NoticeConfig,
}

/// The `[notice]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NoticeConfig {
  /// Class on every notice container and prefix of its other classes.
  pub class_prefix: String,

  /// Heading level of notice titles, 1 through 6.
  pub heading_level: u8,

  /// Which containers a notice may interrupt.
  pub interrupt: InterruptConfig,
}

impl Default for NoticeConfig {
  fn default() -> Self {
    let options = NoticeOptions::default();
    Self {
      class_prefix:  options.class_prefix,
      heading_level: options.heading_level,
      interrupt:     InterruptConfig::default(),
    }
  }
}

/// The `[notice.interrupt]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterruptConfig {
  pub paragraph:  bool,
  pub list:       bool,
  pub blockquote: bool,
}

impl Default for InterruptConfig {
  fn default() -> Self {
    let options = NoticeOptions::default();
    Self {
      paragraph:  options.interrupt_paragraph,
      list:       options.interrupt_list,
      blockquote: options.interrupt_blockquote,
    }
  }
}

impl Config {
  /// Load configuration from a file. The format is picked by extension:
  /// `.json` is read as JSON, anything else as TOML.
  ///
  /// The loaded configuration is validated before it is returned.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, cannot be parsed, or does
  /// not validate.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let config: Self = match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })?
      },
      _ => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })?
      },
    };

    config.validate()?;
    info!("Loaded notice configuration from {}", path.display());
    Ok(config)
  }

  /// Parse and validate configuration from a TOML string.
  ///
  /// # Errors
  ///
  /// Returns an error if the string is not valid TOML for this schema, or
  /// does not validate.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Load the file at `path` if given, otherwise use the defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be loaded.
  pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
    path.map_or_else(
      || {
        debug!("No notice configuration given, using defaults");
        Ok(Self::default())
      },
      Self::from_file,
    )
  }

  /// Check that the values can be rendered.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Config`] listing every invalid value.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    let notice = &self.notice;

    if !(1..=6).contains(&notice.heading_level) {
      errors.push(format!(
        "heading-level must be between 1 and 6, got {}",
        notice.heading_level
      ));
    }

    if notice.class_prefix.is_empty() {
      errors.push("class-prefix must not be empty".to_string());
    } else if notice.class_prefix.chars().any(char::is_whitespace) {
      errors.push(format!(
        "class-prefix must not contain whitespace, got '{}'",
        notice.class_prefix
      ));
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Config(errors.join("\n")))
    }
  }

  /// Processor options for this configuration.
  #[must_use]
  pub fn to_options(&self) -> NoticeOptions {
    let notice = &self.notice;
    NoticeOptions {
      class_prefix:         notice.class_prefix.clone(),
      heading_level:        notice.heading_level,
      interrupt_paragraph:  notice.interrupt.paragraph,
      interrupt_list:       notice.interrupt.list,
      interrupt_blockquote: notice.interrupt.blockquote,
    }
  }
}
