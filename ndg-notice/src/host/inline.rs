//! Inline tokenization backed by comrak.
//!
//! The text is parsed as a standalone document and the inline children of
//! its single paragraph are converted into [`Node`]s. Anything that does not
//! come back as exactly one paragraph is kept as literal text.
use comrak::{
  Arena,
  nodes::{AstNode, NodeValue},
  options::Options,
  parse_document,
};

use crate::node::{Node, NodeKind};

fn comrak_options() -> Options<'static> {
  let mut options = Options::default();
  options.extension.autolink = true;
  options
}

/// Tokenize phrasing content.
#[must_use]
pub fn tokenize(value: &str) -> Vec<Node> {
  if value.trim().is_empty() {
    return Vec::new();
  }

  let arena = Arena::new();
  let options = comrak_options();
  let root = parse_document(&arena, value, &options);

  let Some(paragraph) = root.first_child() else {
    return vec![Node::text(value.trim())];
  };
  let is_single_paragraph =
    matches!(paragraph.data.borrow().value, NodeValue::Paragraph)
      && paragraph.next_sibling().is_none();
  if !is_single_paragraph {
    return vec![Node::text(value.trim())];
  }

  paragraph.children().map(convert).collect()
}

fn convert<'a>(node: &'a AstNode<'a>) -> Node {
  let children = || node.children().map(convert).collect::<Vec<_>>();

  match &node.data.borrow().value {
    NodeValue::Text(t) => Node::text(t.to_string()),
    NodeValue::Code(code) => {
      Node::new(NodeKind::InlineCode {
        value: code.literal.clone(),
      })
    },
    NodeValue::Emph => Node::with_children(NodeKind::Emphasis, children()),
    NodeValue::Strong => Node::with_children(NodeKind::Strong, children()),
    NodeValue::Link(link) => {
      Node::with_children(
        NodeKind::Link {
          url:   link.url.clone(),
          title: non_empty(&link.title),
        },
        children(),
      )
    },
    NodeValue::Image(link) => {
      Node::new(NodeKind::Image {
        url:   link.url.clone(),
        title: non_empty(&link.title),
        alt:   plain_text(node),
      })
    },
    NodeValue::SoftBreak => Node::text("\n"),
    NodeValue::LineBreak => Node::new(NodeKind::Break),
    NodeValue::HtmlInline(html) => {
      Node::new(NodeKind::Html {
        value: html.to_string(),
      })
    },
    _ => Node::text(plain_text(node)),
  }
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_string())
}

/// Literal text of every descendant of `node`.
fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.descendants().skip(1) {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(code) => text.push_str(&code.literal),
      NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
      _ => {},
    }
  }
  text
}
