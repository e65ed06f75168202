//! Core implementation of the notice processor.
//!
//! Parsing, rendering, and collection of the notices found along the way.
use log::trace;

use super::types::{NoticeOptions, NoticeProcessor};
use crate::{
  host::Parser,
  node::Node,
  render::to_html,
  types::{NoticeResult, NoticeSummary},
};

impl NoticeProcessor {
  /// Create a new `NoticeProcessor` with the given options.
  #[must_use]
  pub fn new(options: NoticeOptions) -> Self {
    let parser = Parser::new(&options);
    Self { options, parser }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &NoticeOptions {
    &self.options
  }

  /// Access the underlying parser.
  #[must_use]
  pub const fn parser(&self) -> &Parser {
    &self.parser
  }

  /// Parse `content` into a node tree.
  #[must_use]
  pub fn parse(&self, content: &str) -> Node {
    self.parser.parse(content)
  }

  /// Render Markdown to HTML, collecting every notice in the document.
  #[must_use]
  pub fn render(&self, content: &str) -> NoticeResult {
    let root = self.parse(content);
    let notices = self.collect_notices(&root);
    trace!("Rendered document with {} notice(s)", notices.len());

    NoticeResult {
      html: to_html(&root),
      notices,
    }
  }

  /// Summaries of every notice container in `root`, in document order.
  #[must_use]
  pub fn collect_notices(&self, root: &Node) -> Vec<NoticeSummary> {
    let prefix = self.options.class_prefix.as_str();
    let mut notices = Vec::new();

    root.walk(&mut |node| {
      let Some(keyword) = notice_keyword(node, prefix) else {
        return;
      };
      let title = node
        .children
        .first()
        .and_then(|heading| heading.children.first())
        .map(Node::text_content)
        .unwrap_or_default();

      notices.push(NoticeSummary {
        keyword: keyword.to_string(),
        title,
      });
    });

    notices
  }
}

/// Keyword of a notice container, read back from its `<prefix>-<keyword>`
/// class.
fn notice_keyword<'a>(node: &'a Node, prefix: &str) -> Option<&'a str> {
  match node.class_names() {
    [first, second] if first == prefix => {
      second.strip_prefix(prefix)?.strip_prefix('-')
    },
    _ => None,
  }
}
