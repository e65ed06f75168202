//! Type definitions for the notice processor.
//!
//! # Examples
//!
//! ```
//! use ndg_notice::{NoticeOptions, NoticeProcessor};
//!
//! let options = NoticeOptions {
//!   class_prefix: "callout".to_string(),
//!   heading_level: 4,
//!   ..Default::default()
//! };
//!
//! let processor = NoticeProcessor::new(options);
//! ```
use crate::host::Parser;

/// Options for configuring notice parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeOptions {
  /// Class on every notice container, and prefix of the keyword, heading and
  /// content classes.
  pub class_prefix: String,

  /// Level of the heading element holding the title. Clamped to 1..=6.
  pub heading_level: u8,

  /// Whether a notice may start in the middle of a paragraph.
  pub interrupt_paragraph: bool,

  /// Whether a notice may end a list item's lazy continuation.
  pub interrupt_list: bool,

  /// Whether a notice may end a blockquote's lazy continuation.
  pub interrupt_blockquote: bool,
}

impl Default for NoticeOptions {
  fn default() -> Self {
    Self {
      class_prefix:         "notice".to_string(),
      heading_level:        5,
      interrupt_paragraph:  true,
      interrupt_list:       true,
      interrupt_blockquote: true,
    }
  }
}

/// Main notice processor.
#[derive(Debug, Clone)]
pub struct NoticeProcessor {
  pub(crate) options: NoticeOptions,
  pub(crate) parser:  Parser,
}

/// Builder for constructing [`NoticeOptions`] with method chaining.
#[derive(Debug, Clone)]
pub struct NoticeOptionsBuilder {
  options: NoticeOptions,
}

impl NoticeOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: NoticeOptions::default(),
    }
  }

  /// Set the class prefix.
  #[must_use]
  pub fn class_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
    self.options.class_prefix = prefix.into();
    self
  }

  /// Set the heading level of notice titles.
  #[must_use]
  pub const fn heading_level(mut self, level: u8) -> Self {
    self.options.heading_level = level;
    self
  }

  /// Enable or disable interrupting paragraphs.
  #[must_use]
  pub const fn interrupt_paragraph(mut self, enabled: bool) -> Self {
    self.options.interrupt_paragraph = enabled;
    self
  }

  /// Enable or disable interrupting lists.
  #[must_use]
  pub const fn interrupt_list(mut self, enabled: bool) -> Self {
    self.options.interrupt_list = enabled;
    self
  }

  /// Enable or disable interrupting blockquotes.
  #[must_use]
  pub const fn interrupt_blockquote(mut self, enabled: bool) -> Self {
    self.options.interrupt_blockquote = enabled;
    self
  }

  /// Build the final `NoticeOptions`.
  #[must_use]
  pub fn build(self) -> NoticeOptions {
    self.options
  }
}

impl Default for NoticeOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}
