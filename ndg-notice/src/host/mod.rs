//! Reference host parser.
//!
//! A small block parser driven entirely by a [`TokenizerRegistry`]: at each
//! cursor position the registered tokenizers are offered the remaining input
//! in rank order, and the first match wins. Inline content is handed to
//! comrak.
pub mod blocks;
pub mod eater;
pub mod inline;

pub use eater::Eater;
use log::{error, trace, warn};

use crate::{
  node::{Node, NodeKind, Position, Span},
  notice::NoticePlugin,
  processor::types::NoticeOptions,
  registry::{Interrupt, TokenizerRegistry},
  tokenizer::{BlockTokenize, Eat, Host, InlineTokenize, MatchResult},
  utils::{first_line, is_blank},
};

/// Registry holding only the builtin block tokenizers.
#[must_use]
pub fn builtin_registry() -> TokenizerRegistry {
  let mut registry = TokenizerRegistry::new();
  for (tokenizer, registration) in blocks::builtins() {
    if let Err(e) = registry.register(tokenizer, registration) {
      error!("Failed to register builtin tokenizer: {e}");
    }
  }
  registry
}

/// Block parser over a tokenizer registry.
#[derive(Debug, Clone)]
pub struct Parser {
  registry: TokenizerRegistry,
}

impl Parser {
  /// Builtin tokenizers plus notices configured by `options`.
  #[must_use]
  pub fn new(options: &NoticeOptions) -> Self {
    let mut registry = builtin_registry();
    if let Err(e) = NoticePlugin::attach(&mut registry, options) {
      error!("Failed to attach notice tokenizer: {e}");
    }
    Self { registry }
  }

  /// Parser over an already populated registry.
  #[must_use]
  pub const fn from_registry(registry: TokenizerRegistry) -> Self {
    Self { registry }
  }

  #[must_use]
  pub const fn registry(&self) -> &TokenizerRegistry {
    &self.registry
  }

  /// Parse a whole document into a root node.
  #[must_use]
  pub fn parse(&self, source: &str) -> Node {
    let start = Position::start();
    let mut root =
      Node::with_children(NodeKind::Root, self.tokenize_block(source, start));
    root.position = Some(Span {
      start,
      end: start.advance(source),
    });
    root
  }

  /// Consume one line as a plain paragraph. Used when no tokenizer accepts
  /// the input at the cursor.
  fn fallback_line(&self, eater: &mut Eater<'_>) -> Option<Node> {
    let (line, _) = first_line(eater.remaining());
    let now = eater.now();
    let children = self.tokenize_inline(line, now);
    eater
      .eat(line)
      .ok()
      .map(|add| add.apply(Node::with_children(NodeKind::Paragraph, children)))
  }
}

/// Byte length of the blank lines at the start of `value`, plus the newline
/// that ended the previous block.
fn blank_prefix(value: &str) -> usize {
  value
    .split_inclusive('\n')
    .take_while(|line| is_blank(line))
    .map(str::len)
    .sum()
}

impl InlineTokenize for Parser {
  fn tokenize_inline(&self, value: &str, _now: Position) -> Vec<Node> {
    inline::tokenize(value)
  }
}

impl BlockTokenize for Parser {
  fn tokenize_block(&self, value: &str, now: Position) -> Vec<Node> {
    let mut eater = Eater::new(value, now);
    let mut nodes = Vec::new();

    while !eater.is_done() {
      let rest = eater.remaining();
      let blank = blank_prefix(rest);
      if blank > 0 {
        if eater.eat(rest.get(..blank).unwrap_or_default()).is_err() {
          break;
        }
        continue;
      }

      let before = eater.offset();
      for tokenizer in self.registry.block_methods() {
        if let MatchResult::Matched(node) =
          tokenizer.tokenize(self, &mut eater, rest, false)
        {
          trace!("'{}' matched at offset {before}", tokenizer.name());
          nodes.push(node);
          break;
        }
      }

      if eater.offset() == before {
        warn!("No tokenizer consumed input at offset {before}, using a paragraph");
        match self.fallback_line(&mut eater) {
          Some(node) => nodes.push(node),
          None => break,
        }
      }
    }

    nodes
  }
}

impl Host for Parser {
  fn interrupts(&self, context: Interrupt, value: &str) -> bool {
    self.registry.interrupters(context).any(|tokenizer| {
      let mut probe = Eater::new(value, Position::start());
      tokenizer.tokenize(self, &mut probe, value, true).is_match()
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(source: &str) -> Node {
    Parser::new(&NoticeOptions::default()).parse(source)
  }

  fn kinds(node: &Node) -> Vec<&NodeKind> {
    node.children.iter().map(|child| &child.kind).collect()
  }

  #[test]
  fn test_builtin_order_places_notice_after_fenced_code() {
    let parser = Parser::new(&NoticeOptions::default());
    assert_eq!(parser.registry().names(), vec![
      "fencedCode",
      "notice",
      "blockquote",
      "atxHeading",
      "thematicBreak",
      "list",
      "paragraph",
    ]);
  }

  #[test]
  fn test_notice_interrupts_every_context_by_default() {
    let parser = Parser::new(&NoticeOptions::default());
    for context in [Interrupt::Paragraph, Interrupt::List, Interrupt::Blockquote]
    {
      assert!(
        parser
          .registry()
          .interrupt_names(context)
          .contains(&"notice")
      );
    }
  }

  #[test]
  fn test_blank_prefix() {
    assert_eq!(blank_prefix("\n\n  \nx"), 5);
    assert_eq!(blank_prefix("x\n"), 0);
    assert_eq!(blank_prefix(""), 0);
  }

  #[test]
  fn test_paragraphs_split_on_blank_lines() {
    let root = parse("one\ntwo\n\nthree\n");
    assert_eq!(kinds(&root), vec![&NodeKind::Paragraph, &NodeKind::Paragraph]);
    assert_eq!(root.children[0].text_content(), "one\ntwo");
    assert_eq!(root.children[1].text_content(), "three");
  }

  #[test]
  fn test_heading_and_thematic_break() {
    let root = parse("## Title\n***\ntext");
    assert_eq!(kinds(&root), vec![
      &NodeKind::Heading { depth: 2 },
      &NodeKind::ThematicBreak,
      &NodeKind::Paragraph,
    ]);
  }

  #[test]
  fn test_fenced_code_keeps_content_verbatim() {
    let root = parse("```rust\nfn main() {}\n:::\n```\n");
    assert_eq!(kinds(&root), vec![&NodeKind::Code {
      lang:  Some("rust".to_string()),
      value: "fn main() {}\n:::".to_string(),
    }]);
  }

  #[test]
  fn test_list_items() {
    let root = parse("- one\n- two\n  more\n\n1. first\n");
    assert_eq!(kinds(&root), vec![
      &NodeKind::List {
        ordered: false,
        start:   None,
      },
      &NodeKind::List {
        ordered: true,
        start:   Some(1),
      },
    ]);
    assert_eq!(root.children[0].children.len(), 2);
    assert_eq!(root.children[0].children[1].text_content(), "two\nmore");
  }

  #[test]
  fn test_blockquote_recurses() {
    let root = parse("> # Quoted\n> text\nlazy\n");
    assert_eq!(kinds(&root), vec![&NodeKind::Blockquote]);
    assert_eq!(kinds(&root.children[0]), vec![
      &NodeKind::Heading { depth: 1 },
      &NodeKind::Paragraph,
    ]);
    assert_eq!(root.children[0].children[1].text_content(), "text\nlazy");
  }

  #[test]
  fn test_root_span_covers_source() {
    let root = parse("a\nbc");
    assert!(root.position.is_some_and(|span| {
      span.start == Position::start()
        && span.end.line == 2
        && span.end.column == 3
    }));
  }

  #[test]
  fn test_block_spans_are_stamped() {
    let root = parse("first\n\n# second");
    let heading = &root.children[1];
    assert!(
      heading
        .position
        .is_some_and(|span| span.start.line == 3 && span.start.offset == 7)
    );
  }

  #[test]
  fn test_registry_without_notices_leaves_tags_as_text() {
    let parser = Parser::from_registry(builtin_registry());
    let root = parser.parse(":::note\nbody\n:::\n");
    assert_eq!(kinds(&root), vec![&NodeKind::Paragraph]);
    assert_eq!(root.children[0].text_content(), ":::note\nbody\n:::");
  }
}
