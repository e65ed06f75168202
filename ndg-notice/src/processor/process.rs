//! Main processing functions for notice-bearing Markdown.
use std::{fs, path::Path};

use log::error;

use super::types::{NoticeOptions, NoticeProcessor};
use crate::types::NoticeResult;

/// Process markdown content with error recovery.
///
/// Renders `content` and falls back to an error placeholder if rendering
/// panics.
#[must_use]
pub fn process_with_recovery(
  processor: &NoticeProcessor,
  content: &str,
) -> NoticeResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render(content)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      error!("Panic during notice processing: {panic_err:?}");
      NoticeResult {
        html:    "<div class=\"error\">Critical error processing markdown \
                  content</div>"
          .to_string(),
        notices: Vec::new(),
      }
    },
  }
}

/// Process a Markdown string with default options.
#[must_use]
pub fn process_markdown_string(content: &str) -> NoticeResult {
  let processor = NoticeProcessor::new(NoticeOptions::default());
  process_with_recovery(&processor, content)
}

/// Read and process a Markdown file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn process_markdown_file(
  file_path: &Path,
  options: NoticeOptions,
) -> Result<NoticeResult, String> {
  let content = fs::read_to_string(file_path).map_err(|e| {
    format!("Failed to read file {}: {}", file_path.display(), e)
  })?;

  let processor = NoticeProcessor::new(options);
  Ok(process_with_recovery(&processor, &content))
}
