//! Capability interfaces between block tokenizers and the host parser.
//!
//! A block tokenizer is offered the remaining input at the host's cursor,
//! either in probe mode (`silent`, used for interruption checks) or in commit
//! mode. In commit mode a matching tokenizer consumes its span through [`Eat`]
//! and may call back into the host through [`InlineTokenize`] and
//! [`BlockTokenize`] to tokenize nested content.
use crate::{
  error::EatError,
  node::{Node, Position, Span},
  registry::Interrupt,
};

/// Host entry point for inline (phrasing) content.
pub trait InlineTokenize {
  fn tokenize_inline(&self, value: &str, now: Position) -> Vec<Node>;
}

/// Host entry point for block (flow) content.
pub trait BlockTokenize {
  fn tokenize_block(&self, value: &str, now: Position) -> Vec<Node>;
}

/// Everything a block tokenizer may ask of its host.
pub trait Host: InlineTokenize + BlockTokenize {
  /// Whether any tokenizer registered to interrupt `context` accepts `value`
  /// in probe mode.
  fn interrupts(&self, context: Interrupt, value: &str) -> bool {
    let _ = (context, value);
    false
  }
}

/// The host's consumption primitive.
pub trait Eat {
  /// Current cursor position.
  fn now(&self) -> Position;

  /// Commit `subvalue`, which must be a prefix of the remaining input.
  ///
  /// # Errors
  ///
  /// Returns [`EatError::NotAPrefix`] if `subvalue` does not start the
  /// remaining input. Nothing is consumed in that case.
  fn eat(&mut self, subvalue: &str) -> Result<Add, EatError>;
}

/// Finalizer returned by [`Eat::eat`]; stamps the consumed span onto a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Add {
  span: Span,
}

impl Add {
  pub const fn new(start: Position, end: Position) -> Self {
    Self {
      span: Span { start, end },
    }
  }

  #[must_use]
  pub const fn span(&self) -> Span {
    self.span
  }

  /// Associate the consumed span with `node` and hand it back.
  #[must_use]
  pub fn apply(self, mut node: Node) -> Node {
    node.position = Some(self.span);
    node
  }
}

/// Outcome of offering input to a block tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
  /// The input is not for this tokenizer. Nothing was consumed.
  NotMatched,
  /// Probe mode only: the input would match. Nothing was consumed.
  Probed,
  /// The input was consumed and produced this node.
  Matched(Node),
}

impl MatchResult {
  #[must_use]
  pub const fn is_match(&self) -> bool {
    !matches!(self, Self::NotMatched)
  }

  #[must_use]
  pub fn into_node(self) -> Option<Node> {
    match self {
      Self::Matched(node) => Some(node),
      Self::NotMatched | Self::Probed => None,
    }
  }
}

/// A block-level tokenizer pluggable into a host parser.
pub trait BlockTokenizer: Send + Sync {
  /// Unique name used for registration and ordering.
  fn name(&self) -> &'static str;

  /// Try to tokenize the start of `value`.
  ///
  /// When `silent` is set the tokenizer must not consume input or call back
  /// into the host for nested content; it only reports eligibility.
  fn tokenize(
    &self,
    host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult;
}
