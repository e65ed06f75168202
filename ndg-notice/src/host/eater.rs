//! Cursor over a block of input, handed to tokenizers as their [`Eat`].
use crate::{
  error::EatError,
  node::Position,
  tokenizer::{Add, Eat},
};

/// Tracks how much of `source` has been consumed and where that puts us.
#[derive(Debug, Clone)]
pub struct Eater<'a> {
  source: &'a str,
  offset: usize,
  now:    Position,
}

impl<'a> Eater<'a> {
  /// Start consuming `source`, which begins at `start` in the document.
  #[must_use]
  pub const fn new(source: &'a str, start: Position) -> Self {
    Self {
      source,
      offset: 0,
      now: start,
    }
  }

  /// Input not consumed yet.
  #[must_use]
  pub fn remaining(&self) -> &'a str {
    self.source.get(self.offset..).unwrap_or_default()
  }

  /// Bytes consumed so far.
  #[must_use]
  pub const fn offset(&self) -> usize {
    self.offset
  }

  #[must_use]
  pub const fn is_done(&self) -> bool {
    self.offset >= self.source.len()
  }
}

impl Eat for Eater<'_> {
  fn now(&self) -> Position {
    self.now
  }

  fn eat(&mut self, subvalue: &str) -> Result<Add, EatError> {
    if !self.remaining().starts_with(subvalue) {
      return Err(EatError::NotAPrefix {
        len: subvalue.len(),
      });
    }

    let start = self.now;
    self.offset += subvalue.len();
    self.now = start.advance(subvalue);
    Ok(Add::new(start, self.now))
  }
}
