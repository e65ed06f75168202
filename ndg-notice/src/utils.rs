//! Small string helpers shared by the tokenizers.

/// Capitalize the first letter of a string.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  chars.next().map_or_else(String::new, |c| {
    c.to_uppercase().collect::<String>() + chars.as_str()
  })
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a pattern fails to compile, so that the feature
/// it powers degrades to "no match" instead of panicking.
#[must_use]
#[allow(
  clippy::expect_used,
  reason = "This pattern is guaranteed to be valid"
)]
pub fn never_matching_regex() -> regex::Regex {
  // Asserts something impossible
  regex::Regex::new(r"[^\s\S]")
    .expect("regex pattern [^\\s\\S] should always compile")
}

/// Split `value` into its first line (without the line ending) and the byte
/// length of that line including its `\n`, if any.
#[must_use]
pub fn first_line(value: &str) -> (&str, usize) {
  value.find('\n').map_or((value, value.len()), |end| {
    (value.get(..end).unwrap_or_default(), end + 1)
  })
}

/// Strip up to three spaces of indentation. `None` if the line is indented
/// further than that.
#[must_use]
pub fn strip_indent(line: &str) -> Option<&str> {
  let rest = line.trim_start_matches(' ');
  (line.len() - rest.len() <= 3).then_some(rest)
}

/// Whether a line contains nothing but whitespace.
#[must_use]
pub fn is_blank(line: &str) -> bool {
  line.trim().is_empty()
}

/// An open code fence (```` ``` ```` or `~~~`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
  marker: char,
  width:  usize,
}

impl Fence {
  /// Parse an opening fence line, returning the fence and its info string.
  #[must_use]
  pub fn open(line: &str) -> Option<(Self, &str)> {
    let trimmed = strip_indent(line)?;
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let width = trimmed.chars().take_while(|&c| c == marker).count();
    if width < 3 {
      return None;
    }

    // Fence markers are ASCII, so `width` is also a byte offset
    let info = trimmed.get(width..).unwrap_or_default().trim();
    if marker == '`' && info.contains('`') {
      return None;
    }
    Some((Self { marker, width }, info))
  }

  /// Whether `line` closes this fence.
  #[must_use]
  pub fn closes(&self, line: &str) -> bool {
    let Some(trimmed) = strip_indent(line) else {
      return false;
    };
    let width = trimmed.chars().take_while(|&c| c == self.marker).count();
    width >= self.width && is_blank(trimmed.get(width..).unwrap_or_default())
  }
}
