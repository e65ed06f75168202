//! Types for the ndg-notice public API.
use serde::{Deserialize, Serialize};

/// A notice found in a rendered document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeSummary {
  /// Keyword from the opening line, e.g. `warning`.
  pub keyword: String,
  /// Plain text of the rendered title.
  pub title:   String,
}

/// Result of notice processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeResult {
  /// Rendered HTML output.
  pub html: String,

  /// Every notice in the document, outermost first, in document order.
  pub notices: Vec<NoticeSummary>,
}
