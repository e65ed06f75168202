//! Ordered registration of block tokenizers.
//!
//! Tokenizers are kept in rank order instead of being spliced into lists by
//! index. Lower ranks get first refusal; equal ranks keep registration order.
//! Besides the main dispatch order there is one interruption list per
//! container context, consulted in probe mode when the host decides whether a
//! line may end an open paragraph, list or blockquote.
use std::{collections::HashMap, fmt, sync::Arc};

use log::trace;

use crate::{error::RegistryError, tokenizer::BlockTokenizer};

/// Ordering key for a registered tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u32);

impl Rank {
  #[must_use]
  pub const fn new(value: u32) -> Self {
    Self(value)
  }

  /// The slot immediately following `other`, ahead of the next builtin.
  #[must_use]
  pub const fn after(other: Self) -> Self {
    Self(other.0.saturating_add(1))
  }

  #[must_use]
  pub const fn value(self) -> u32 {
    self.0
  }
}

/// Ranks of the builtin host tokenizers. Spaced apart so extensions can slot
/// in between.
pub mod rank {
  use super::Rank;

  pub const FENCED_CODE: Rank = Rank::new(200);
  pub const BLOCKQUOTE: Rank = Rank::new(300);
  pub const ATX_HEADING: Rank = Rank::new(400);
  pub const THEMATIC_BREAK: Rank = Rank::new(500);
  pub const LIST: Rank = Rank::new(600);
  pub const PARAGRAPH: Rank = Rank::new(1000);
}

/// Container contexts that can be interrupted by a new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
  Paragraph,
  List,
  Blockquote,
}

/// Which interruption lists a tokenizer joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interrupts {
  pub paragraph:  bool,
  pub list:       bool,
  pub blockquote: bool,
}

impl Interrupts {
  pub const ALL: Self = Self {
    paragraph:  true,
    list:       true,
    blockquote: true,
  };
  pub const NONE: Self = Self {
    paragraph:  false,
    list:       false,
    blockquote: false,
  };

  #[must_use]
  pub const fn contains(self, context: Interrupt) -> bool {
    match context {
      Interrupt::Paragraph => self.paragraph,
      Interrupt::List => self.list,
      Interrupt::Blockquote => self.blockquote,
    }
  }
}

/// Placement of a tokenizer within the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
  pub rank:       Rank,
  pub interrupts: Interrupts,
}

impl Registration {
  /// Dispatch at `rank`, interrupting nothing.
  #[must_use]
  pub const fn new(rank: Rank) -> Self {
    Self {
      rank,
      interrupts: Interrupts::NONE,
    }
  }

  #[must_use]
  pub const fn interrupting(mut self, interrupts: Interrupts) -> Self {
    self.interrupts = interrupts;
    self
  }
}

#[derive(Debug, Clone, Default)]
struct RankedList(Vec<(Rank, &'static str)>);

impl RankedList {
  fn insert(&mut self, rank: Rank, name: &'static str) {
    let at = self.0.partition_point(|(existing, _)| *existing <= rank);
    self.0.insert(at, (rank, name));
  }

  fn names(&self) -> impl Iterator<Item = &'static str> {
    self.0.iter().map(|(_, name)| *name)
  }
}

/// Named block tokenizers plus their dispatch and interruption orders.
#[derive(Clone, Default)]
pub struct TokenizerRegistry {
  tokenizers:           HashMap<&'static str, Arc<dyn BlockTokenizer>>,
  block_methods:        RankedList,
  interrupt_paragraph:  RankedList,
  interrupt_list:       RankedList,
  interrupt_blockquote: RankedList,
}

impl TokenizerRegistry {
  /// Create an empty registry.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Install `tokenizer` according to `registration`.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::Duplicate`] if a tokenizer with the same name is
  /// already registered. The registry is left unchanged in that case.
  pub fn register(
    &mut self,
    tokenizer: Arc<dyn BlockTokenizer>,
    registration: Registration,
  ) -> Result<(), RegistryError> {
    let name = tokenizer.name();
    if self.tokenizers.contains_key(name) {
      return Err(RegistryError::Duplicate(name));
    }

    trace!(
      "Registering tokenizer '{name}' at rank {}",
      registration.rank.value()
    );

    self.tokenizers.insert(name, tokenizer);
    self.block_methods.insert(registration.rank, name);
    for context in [Interrupt::Paragraph, Interrupt::List, Interrupt::Blockquote]
    {
      if registration.interrupts.contains(context) {
        self.list_mut(context).insert(registration.rank, name);
      }
    }
    Ok(())
  }

  /// Look up a tokenizer by name.
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Arc<dyn BlockTokenizer>> {
    self.tokenizers.get(name)
  }

  /// Whether a tokenizer with this name is registered.
  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.tokenizers.contains_key(name)
  }

  /// Tokenizers in dispatch order.
  pub fn block_methods(&self) -> impl Iterator<Item = &dyn BlockTokenizer> {
    self.resolve(&self.block_methods)
  }

  /// Tokenizers allowed to interrupt `context`, in rank order.
  pub fn interrupters(
    &self,
    context: Interrupt,
  ) -> impl Iterator<Item = &dyn BlockTokenizer> {
    self.resolve(self.list(context))
  }

  /// Tokenizer names in dispatch order.
  #[must_use]
  pub fn names(&self) -> Vec<&'static str> {
    self.block_methods.names().collect()
  }

  /// Names of the tokenizers that may interrupt `context`, in rank order.
  #[must_use]
  pub fn interrupt_names(&self, context: Interrupt) -> Vec<&'static str> {
    self.list(context).names().collect()
  }

  fn resolve<'a>(
    &'a self,
    list: &'a RankedList,
  ) -> impl Iterator<Item = &'a dyn BlockTokenizer> {
    list
      .names()
      .filter_map(|name| self.tokenizers.get(name))
      .map(|tokenizer| &**tokenizer)
  }

  const fn list(&self, context: Interrupt) -> &RankedList {
    match context {
      Interrupt::Paragraph => &self.interrupt_paragraph,
      Interrupt::List => &self.interrupt_list,
      Interrupt::Blockquote => &self.interrupt_blockquote,
    }
  }

  const fn list_mut(&mut self, context: Interrupt) -> &mut RankedList {
    match context {
      Interrupt::Paragraph => &mut self.interrupt_paragraph,
      Interrupt::List => &mut self.interrupt_list,
      Interrupt::Blockquote => &mut self.interrupt_blockquote,
    }
  }
}

impl fmt::Debug for TokenizerRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenizerRegistry")
      .field("block_methods", &self.names())
      .field(
        "interrupt_paragraph",
        &self.interrupt_names(Interrupt::Paragraph),
      )
      .field("interrupt_list", &self.interrupt_names(Interrupt::List))
      .field(
        "interrupt_blockquote",
        &self.interrupt_names(Interrupt::Blockquote),
      )
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    node::Node,
    tokenizer::{Eat, Host, MatchResult},
  };

  struct Named(&'static str);

  impl BlockTokenizer for Named {
    fn name(&self) -> &'static str {
      self.0
    }

    fn tokenize(
      &self,
      _host: &dyn Host,
      _eat: &mut dyn Eat,
      _value: &str,
      _silent: bool,
    ) -> MatchResult {
      MatchResult::Matched(Node::text(self.0))
    }
  }

  fn register(
    registry: &mut TokenizerRegistry,
    name: &'static str,
    rank: Rank,
    interrupts: Interrupts,
  ) {
    let registration = Registration::new(rank).interrupting(interrupts);
    assert!(registry.register(Arc::new(Named(name)), registration).is_ok());
  }

  #[test]
  fn test_block_methods_follow_rank() {
    let mut registry = TokenizerRegistry::new();
    register(&mut registry, "paragraph", rank::PARAGRAPH, Interrupts::NONE);
    register(&mut registry, "fencedCode", rank::FENCED_CODE, Interrupts::ALL);
    register(&mut registry, "list", rank::LIST, Interrupts::NONE);

    assert_eq!(registry.names(), vec!["fencedCode", "list", "paragraph"]);
  }

  #[test]
  fn test_after_slots_between_neighbours() {
    let mut registry = TokenizerRegistry::new();
    register(&mut registry, "fencedCode", rank::FENCED_CODE, Interrupts::ALL);
    register(&mut registry, "blockquote", rank::BLOCKQUOTE, Interrupts::ALL);
    register(
      &mut registry,
      "notice",
      Rank::after(rank::FENCED_CODE),
      Interrupts::ALL,
    );

    assert_eq!(registry.names(), vec!["fencedCode", "notice", "blockquote"]);
    assert_eq!(registry.interrupt_names(Interrupt::List), vec![
      "fencedCode",
      "notice",
      "blockquote"
    ]);
  }

  #[test]
  fn test_equal_ranks_keep_registration_order() {
    let mut registry = TokenizerRegistry::new();
    register(&mut registry, "first", Rank::new(10), Interrupts::NONE);
    register(&mut registry, "second", Rank::new(10), Interrupts::NONE);

    assert_eq!(registry.names(), vec!["first", "second"]);
  }

  #[test]
  fn test_interrupt_lists_are_opt_in() {
    let mut registry = TokenizerRegistry::new();
    register(&mut registry, "heading", rank::ATX_HEADING, Interrupts {
      paragraph:  true,
      list:       false,
      blockquote: true,
    });

    assert_eq!(registry.interrupt_names(Interrupt::Paragraph), vec![
      "heading"
    ]);
    assert!(registry.interrupt_names(Interrupt::List).is_empty());
    assert_eq!(registry.interrupters(Interrupt::Blockquote).count(), 1);
  }

  #[test]
  fn test_duplicate_registration_is_rejected() {
    let mut registry = TokenizerRegistry::new();
    register(&mut registry, "notice", Rank::new(1), Interrupts::NONE);

    let result = registry.register(
      Arc::new(Named("notice")),
      Registration::new(Rank::new(2)),
    );
    assert_eq!(result, Err(RegistryError::Duplicate("notice")));
    assert_eq!(registry.names(), vec!["notice"]);
  }

  #[test]
  fn test_lookup_by_name() {
    let mut registry = TokenizerRegistry::new();
    register(&mut registry, "notice", Rank::new(1), Interrupts::NONE);

    assert!(registry.contains("notice"));
    assert!(registry.get("notice").is_some());
    assert!(registry.get("missing").is_none());
  }
}
