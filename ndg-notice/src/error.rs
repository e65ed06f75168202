//! Error types for tokenizer registration and input consumption.
//!
//! Neither of these is raised for input that simply is not a notice: a
//! non-matching block is reported through
//! [`MatchResult::NotMatched`](crate::tokenizer::MatchResult::NotMatched).

/// Errors raised while installing tokenizers into a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
  #[error("Tokenizer '{0}' is already registered")]
  Duplicate(&'static str),
}

/// Errors raised by the host's consumption primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EatError {
  #[error(
    "Incorrectly eaten value: {len} bytes are not a prefix of the remaining \
     input"
  )]
  NotAPrefix { len: usize },
}
