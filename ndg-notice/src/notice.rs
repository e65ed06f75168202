//! The notice block tokenizer and its registration.
//!
//! ```text
//! :::warning Optional title
//! Body, tokenized as block content.
//! :::
//! ```
//!
//! A match produces three nested elements: the notice container
//! (`div.notice.notice-<keyword>`), its heading (`div.notice-heading > h5`)
//! holding the inline-tokenized title, and its content (`div.notice-content`)
//! holding the block-tokenized body.
use std::{ops::Range, sync::Arc};

use log::{debug, trace, warn};

use crate::{
  error::RegistryError,
  meta::{NoticeMeta, TAG, opens_notice, parse_meta},
  node::Node,
  processor::types::NoticeOptions,
  registry::{Interrupts, Rank, Registration, TokenizerRegistry, rank},
  tokenizer::{BlockTokenizer, Eat, Host, MatchResult},
  utils::Fence,
};

/// Tokenizer for `:::keyword` notice blocks.
#[derive(Debug, Clone)]
pub struct NoticeTokenizer {
  class_prefix: String,
  heading_tag:  String,
}

impl NoticeTokenizer {
  /// Registration name, also the default class prefix.
  pub const NAME: &'static str = "notice";

  #[must_use]
  pub fn new(options: &NoticeOptions) -> Self {
    Self {
      class_prefix: options.class_prefix.clone(),
      heading_tag:  format!("h{}", options.heading_level.clamp(1, 6)),
    }
  }

  fn notice_node(
    &self,
    meta: &NoticeMeta,
    title: Vec<Node>,
    body: Vec<Node>,
  ) -> Node {
    let prefix = &self.class_prefix;
    let heading = Node::element("div", vec![format!("{prefix}-heading")], vec![
      Node::element(&self.heading_tag, Vec::new(), title),
    ]);
    let content =
      Node::element("div", vec![format!("{prefix}-content")], body);

    Node::element(
      "div",
      vec![prefix.clone(), format!("{prefix}-{}", meta.keyword)],
      vec![heading, content],
    )
  }
}

impl Default for NoticeTokenizer {
  fn default() -> Self {
    Self::new(&NoticeOptions::default())
  }
}

impl BlockTokenizer for NoticeTokenizer {
  fn name(&self) -> &'static str {
    Self::NAME
  }

  fn tokenize(
    &self,
    host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult {
    if !opens_notice(value) {
      return MatchResult::NotMatched;
    }
    if silent {
      return MatchResult::Probed;
    }

    let now = eat.now();
    let Some(bounds) = Bounds::find(value) else {
      debug!(
        "Unterminated notice at {}:{}, leaving it as text",
        now.line, now.column
      );
      return MatchResult::NotMatched;
    };

    let Some(meta) = parse_meta(value).filter(NoticeMeta::is_valid) else {
      return MatchResult::NotMatched;
    };

    let (Some(content), Some(consumed)) =
      (value.get(bounds.content), value.get(..bounds.consumed))
    else {
      return MatchResult::NotMatched;
    };

    trace!(
      "Tokenizing notice '{}' at {}:{} ({} bytes of content)",
      meta.keyword,
      now.line,
      now.column,
      content.len()
    );

    let title = host.tokenize_inline(&meta.title, now);
    let body = host.tokenize_block(content, now);
    let notice = self.notice_node(&meta, title, body);

    match eat.eat(consumed) {
      Ok(add) => MatchResult::Matched(add.apply(notice)),
      Err(e) => {
        warn!("Could not consume notice '{}': {e}", meta.keyword);
        MatchResult::NotMatched
      },
    }
  }
}

/// Byte ranges of a terminated notice within the tokenizer's input.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bounds {
  /// The body, between the opening line and the newline that precedes the
  /// closing tag.
  content:  Range<usize>,
  /// Everything up to the end of the closing tag's line, newline excluded.
  consumed: usize,
}

impl Bounds {
  /// Locate the closing tag that belongs to the notice opening `value`.
  ///
  /// A closing tag is a line that is exactly `:::` (trailing whitespace
  /// allowed). Nested notices opened inside the body must be closed first,
  /// and tags inside fenced code are ignored.
  fn find(value: &str) -> Option<Self> {
    let content_start = value.find('\n')? + 1;
    let body = value.get(content_start..)?;

    let mut depth = 0usize;
    let mut fence: Option<Fence> = None;
    let mut offset = content_start;

    for line in body.split_inclusive('\n') {
      let text = line.trim_end_matches(['\n', '\r']);

      if let Some(open) = fence {
        if open.closes(text) {
          fence = None;
        }
      } else if let Some((open, _)) = Fence::open(text) {
        fence = Some(open);
      } else if text.trim_end() == TAG {
        if depth == 0 {
          let content_end = offset.saturating_sub(1).max(content_start);
          return Some(Self {
            content:  content_start..content_end,
            consumed: offset + line.trim_end_matches('\n').len(),
          });
        }
        depth -= 1;
      } else if opens_notice(line) {
        depth += 1;
      }

      offset += line.len();
    }

    None
  }
}

/// Installs [`NoticeTokenizer`] into a host registry.
pub struct NoticePlugin;

impl NoticePlugin {
  /// Rank directly after fenced code: fenced code keeps precedence, notices
  /// still outrank every other builtin.
  pub const RANK: Rank = Rank::after(rank::FENCED_CODE);

  /// Register the notice tokenizer for dispatch and for every interruption
  /// list enabled in `options`.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::Duplicate`] if a tokenizer named `notice` is
  /// already registered.
  pub fn attach(
    registry: &mut TokenizerRegistry,
    options: &NoticeOptions,
  ) -> Result<(), RegistryError> {
    let interrupts = Interrupts {
      paragraph:  options.interrupt_paragraph,
      list:       options.interrupt_list,
      blockquote: options.interrupt_blockquote,
    };

    registry.register(
      Arc::new(NoticeTokenizer::new(options)),
      Registration::new(Self::RANK).interrupting(interrupts),
    )
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;
  use crate::{
    error::EatError,
    node::{NodeKind, Position},
    tokenizer::{Add, BlockTokenize, InlineTokenize},
  };

  /// Host that records every delegated call and echoes the text back.
  #[derive(Default)]
  struct RecordingHost {
    inline: RefCell<Vec<(String, Position)>>,
    block:  RefCell<Vec<(String, Position)>>,
  }

  impl InlineTokenize for RecordingHost {
    fn tokenize_inline(&self, value: &str, now: Position) -> Vec<Node> {
      self.inline.borrow_mut().push((value.to_string(), now));
      vec![Node::text(value)]
    }
  }

  impl BlockTokenize for RecordingHost {
    fn tokenize_block(&self, value: &str, now: Position) -> Vec<Node> {
      self.block.borrow_mut().push((value.to_string(), now));
      vec![Node::text(value)]
    }
  }

  impl Host for RecordingHost {}

  /// Consumption primitive that only records what was eaten.
  struct RecordingEat {
    now:   Position,
    eaten: Vec<String>,
  }

  impl RecordingEat {
    fn at(now: Position) -> Self {
      Self {
        now,
        eaten: Vec::new(),
      }
    }
  }

  impl Eat for RecordingEat {
    fn now(&self) -> Position {
      self.now
    }

    fn eat(&mut self, subvalue: &str) -> Result<Add, EatError> {
      self.eaten.push(subvalue.to_string());
      Ok(Add::new(self.now, self.now.advance(subvalue)))
    }
  }

  /// Consumption primitive that refuses everything.
  struct RefusingEat;

  impl Eat for RefusingEat {
    fn now(&self) -> Position {
      Position::start()
    }

    fn eat(&mut self, subvalue: &str) -> Result<Add, EatError> {
      Err(EatError::NotAPrefix {
        len: subvalue.len(),
      })
    }
  }

  fn run(value: &str, silent: bool) -> (MatchResult, RecordingHost, Vec<String>) {
    let host = RecordingHost::default();
    let mut eat = RecordingEat::at(Position::start());
    let result = NoticeTokenizer::default().tokenize(&host, &mut eat, value, silent);
    (result, host, eat.eaten)
  }

  #[test]
  fn test_keyword_only_notice() {
    let (result, host, eaten) = run(":::kw\nbody\n:::\n", false);

    let node = result.into_node();
    assert!(node.is_some());
    let Some(node) = node else { return };

    assert_eq!(node.class_names(), ["notice", "notice-kw"]);
    assert_eq!(host.inline.borrow()[0].0, "Kw");
    assert_eq!(host.block.borrow()[0].0, "body");
    assert_eq!(eaten, vec![":::kw\nbody\n:::"]);
  }

  #[test]
  fn test_node_shape() {
    let (result, ..) = run(":::warning\nbody\n:::", false);
    let node = result.into_node();
    assert!(node.is_some());
    let Some(node) = node else { return };

    assert_eq!(node.kind, NodeKind::NoticeHtml);
    assert_eq!(node.tag_name(), Some("div"));
    assert_eq!(node.children.len(), 2);

    let heading = &node.children[0];
    assert_eq!(heading.tag_name(), Some("div"));
    assert_eq!(heading.class_names(), ["notice-heading"]);
    assert_eq!(heading.children.len(), 1);
    assert_eq!(heading.children[0].tag_name(), Some("h5"));
    assert!(heading.children[0].class_names().is_empty());
    assert_eq!(heading.children[0].text_content(), "Warning");

    let content = &node.children[1];
    assert_eq!(content.tag_name(), Some("div"));
    assert_eq!(content.class_names(), ["notice-content"]);
    assert_eq!(content.text_content(), "body");
  }

  #[test]
  fn test_explicit_title_is_inline_tokenized_verbatim() {
    let (result, host, _) = run(":::kw My Title\nbody\n:::\n", false);
    assert!(result.is_match());
    assert_eq!(host.inline.borrow()[0].0, " My Title");
  }

  #[test]
  fn test_non_notice_input_is_not_matched() {
    for input in ["", "text\n", "::kw\nbody\n:::\n", " :::kw\nbody\n:::\n"] {
      let (result, host, eaten) = run(input, false);
      assert_eq!(result, MatchResult::NotMatched, "input: {input:?}");
      assert!(eaten.is_empty());
      assert!(host.inline.borrow().is_empty());
      assert!(host.block.borrow().is_empty());
    }
  }

  #[test]
  fn test_empty_keyword_is_not_matched() {
    for input in [":::  \nbody\n:::\n", ":::\nbody\n:::\n", "::: title\nb\n:::\n"]
    {
      let (result, _, eaten) = run(input, false);
      assert_eq!(result, MatchResult::NotMatched, "input: {input:?}");
      assert!(eaten.is_empty());
    }
  }

  #[test]
  fn test_not_matched_is_repeatable() {
    let input = "plain paragraph\n:::kw\n";
    let (first, ..) = run(input, false);
    let (second, ..) = run(input, false);
    assert_eq!(first, MatchResult::NotMatched);
    assert_eq!(first, second);
  }

  #[test]
  fn test_probe_never_consumes_or_delegates() {
    for input in [
      ":::kw\nbody\n:::\n",
      ":::kw\nunterminated",
      "nothing here",
      ":::  \nbody\n:::\n",
    ] {
      let (result, host, eaten) = run(input, true);
      assert!(!matches!(result, MatchResult::Matched(_)));
      assert!(eaten.is_empty(), "input: {input:?}");
      assert!(host.inline.borrow().is_empty());
      assert!(host.block.borrow().is_empty());
    }

    let (result, ..) = run(":::kw\nbody\n:::\n", true);
    assert_eq!(result, MatchResult::Probed);
  }

  #[test]
  fn test_unterminated_notice_is_not_matched() {
    let (result, host, eaten) = run(":::kw\nbody", false);
    assert_eq!(result, MatchResult::NotMatched);
    assert!(eaten.is_empty());
    assert!(host.block.borrow().is_empty());
  }

  #[test]
  fn test_keyword_without_newline_is_not_matched() {
    let (result, _, eaten) = run(":::kw", false);
    assert_eq!(result, MatchResult::NotMatched);
    assert!(eaten.is_empty());
  }

  #[test]
  fn test_delegation_uses_block_start_position() {
    let host = RecordingHost::default();
    let start = Position {
      line:   7,
      column: 1,
      offset: 120,
    };
    let mut eat = RecordingEat::at(start);
    let result = NoticeTokenizer::default().tokenize(
      &host,
      &mut eat,
      ":::tip\none\ntwo\n:::\n",
      false,
    );

    assert!(result.is_match());
    assert_eq!(host.inline.borrow()[0].1, start);
    assert_eq!(host.block.borrow()[0].1, start);
  }

  #[test]
  fn test_consumed_span_is_stamped() {
    let (result, ..) = run(":::kw\nbody\n:::\nafter", false);
    let position = result.into_node().and_then(|node| node.position);
    assert!(position.is_some_and(|span| {
      span.start == Position::start()
        && span.end.line == 3
        && span.end.column == 4
        && span.end.offset == 14
    }));
  }

  #[test]
  fn test_eat_failure_degrades_to_not_matched() {
    let host = RecordingHost::default();
    let result = NoticeTokenizer::default().tokenize(
      &host,
      &mut RefusingEat,
      ":::kw\nbody\n:::\n",
      false,
    );
    assert_eq!(result, MatchResult::NotMatched);
  }

  #[test]
  fn test_options_change_prefix_and_heading() {
    let options = NoticeOptions {
      class_prefix: "callout".to_string(),
      heading_level: 3,
      ..Default::default()
    };
    let host = RecordingHost::default();
    let mut eat = RecordingEat::at(Position::start());
    let node = NoticeTokenizer::new(&options)
      .tokenize(&host, &mut eat, ":::tip\nx\n:::", false)
      .into_node();

    assert!(node.is_some_and(|node| {
      node.class_names() == ["callout", "callout-tip"]
        && node.children[0].children[0].tag_name() == Some("h3")
        && node.children[1].has_class("callout-content")
    }));
  }

  #[test]
  fn test_bounds_simple() {
    assert_eq!(
      Bounds::find(":::kw\nbody\n:::\nrest"),
      Some(Bounds {
        content:  6..10,
        consumed: 14,
      })
    );
  }

  #[test]
  fn test_bounds_closing_tag_at_end_of_input() {
    assert_eq!(
      Bounds::find(":::kw\nbody\n:::"),
      Some(Bounds {
        content:  6..10,
        consumed: 14,
      })
    );
  }

  #[test]
  fn test_bounds_empty_body() {
    assert_eq!(
      Bounds::find(":::kw\n:::\n"),
      Some(Bounds {
        content:  6..6,
        consumed: 9,
      })
    );
  }

  #[test]
  fn test_bounds_closing_tag_must_be_alone() {
    let value = ":::kw\n::: x\ntext :::\nbody\n:::  \n";
    let bounds = Bounds::find(value);
    assert!(bounds.is_some());
    if let Some(bounds) = bounds {
      assert_eq!(&value[bounds.content], "::: x\ntext :::\nbody");
      assert_eq!(&value[..bounds.consumed], value.trim_end_matches('\n'));
    }
  }

  #[test]
  fn test_bounds_skip_nested_notice() {
    let value = ":::info\nouter\n:::warning\ninner\n:::\nafter\n:::\ntail";
    let bounds = Bounds::find(value);
    assert!(bounds.is_some());
    if let Some(bounds) = bounds {
      assert_eq!(
        &value[bounds.content],
        "outer\n:::warning\ninner\n:::\nafter"
      );
      assert_eq!(&value[..bounds.consumed], value.trim_end_matches("\ntail"));
    }
  }

  #[test]
  fn test_bounds_unterminated_run_is_absent() {
    let value = ":::a\n".repeat(2000);
    assert_eq!(Bounds::find(&value), None);
  }

  #[test]
  fn test_bounds_ignore_tags_in_fenced_code() {
    let value = ":::kw\n```\n:::\n```\n:::\n";
    let bounds = Bounds::find(value);
    assert!(bounds.is_some());
    if let Some(bounds) = bounds {
      assert_eq!(&value[bounds.content], "```\n:::\n```");
    }
  }

  #[test]
  fn test_attach_places_notice_after_fenced_code() {
    let mut registry = TokenizerRegistry::new();
    assert!(NoticePlugin::attach(&mut registry, &NoticeOptions::default()).is_ok());
    assert!(registry.contains(NoticeTokenizer::NAME));
    assert_eq!(NoticePlugin::RANK, Rank::after(rank::FENCED_CODE));

    let again = NoticePlugin::attach(&mut registry, &NoticeOptions::default());
    assert_eq!(again, Err(RegistryError::Duplicate("notice")));
  }
}
