//! Opening-line parsing for notice blocks.
//!
//! A notice opens with `:::keyword` optionally followed by a space and a
//! title. This module only looks at that first line; finding the end of the
//! block is the tokenizer's job.
use crate::utils::capitalize_first;

/// Opening and closing tag of a notice block.
pub const TAG: &str = ":::";

/// Keyword and title read from a notice's opening line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeMeta {
  /// Text between the tag and the first space (or end of line).
  pub keyword: String,

  /// Everything from the first space onward, leading space included, or the
  /// capitalized keyword when the line has no space.
  pub title: String,
}

impl NoticeMeta {
  /// Only a non-empty keyword makes a notice. `:::` followed directly by a
  /// newline or a space parses, but is not eligible.
  #[must_use]
  pub const fn is_valid(&self) -> bool {
    !self.keyword.is_empty()
  }
}

/// Read the keyword and title from the first line of `value`.
///
/// Returns `None` if `value` does not start with [`TAG`], or if it contains
/// no newline at all: a notice needs at least an opening line and a closing
/// line.
#[must_use]
pub fn parse_meta(value: &str) -> Option<NoticeMeta> {
  let rest = value.strip_prefix(TAG)?;
  let line = rest.get(..rest.find('\n')?)?;
  let opening = line.strip_suffix('\r').unwrap_or(line);

  let meta = match opening.find(' ') {
    Some(space) => {
      NoticeMeta {
        keyword: opening.get(..space)?.to_string(),
        title:   opening.get(space..)?.to_string(),
      }
    },
    None => {
      NoticeMeta {
        keyword: opening.to_string(),
        title:   capitalize_first(opening),
      }
    },
  };
  Some(meta)
}

/// Whether `value` starts with an opening line that [`parse_meta`] would
/// accept as a valid notice. Does not allocate.
#[must_use]
pub fn opens_notice(value: &str) -> bool {
  let Some(rest) = value.strip_prefix(TAG) else {
    return false;
  };
  let Some(line) = rest.find('\n').and_then(|end| rest.get(..end)) else {
    return false;
  };
  let opening = line.strip_suffix('\r').unwrap_or(line);
  !opening.is_empty() && !opening.starts_with(' ')
}
