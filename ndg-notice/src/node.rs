//! Document tree produced by the block and inline tokenizers.
//!
//! The tree is deliberately close to the shape the HTML layer needs: every
//! node has a kind, an optional rendering hint ([`HtmlData`]) and an ordered
//! list of children. Child order is document order.
use serde::{Deserialize, Serialize};

/// A location in the source document.
///
/// Lines and columns are 1-based, the offset is a 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
  pub line:   usize,
  pub column: usize,
  pub offset: usize,
}

impl Position {
  /// The very beginning of a document.
  #[must_use]
  pub const fn start() -> Self {
    Self {
      line:   1,
      column: 1,
      offset: 0,
    }
  }

  /// Position reached after walking over `text` from `self`.
  #[must_use]
  pub fn advance(self, text: &str) -> Self {
    let mut next = self;
    for ch in text.chars() {
      if ch == '\n' {
        next.line += 1;
        next.column = 1;
      } else {
        next.column += 1;
      }
    }
    next.offset += text.len();
    next
  }
}

impl Default for Position {
  fn default() -> Self {
    Self::start()
  }
}

/// Start and end of the source text a node was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
  pub start: Position,
  pub end:   Position,
}

/// Class list attached to a rendering hint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlProperties {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub class_name: Vec<String>,
}

/// Rendering hint: which element to emit and with which classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlData {
  pub h_name:       String,
  pub h_properties: HtmlProperties,
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
  Root,
  Paragraph,
  Heading {
    depth: u8,
  },
  ThematicBreak,
  Blockquote,
  List {
    ordered: bool,
    start:   Option<u64>,
  },
  ListItem,
  Code {
    lang:  Option<String>,
    value: String,
  },
  Text {
    value: String,
  },
  Emphasis,
  Strong,
  InlineCode {
    value: String,
  },
  Link {
    url:   String,
    title: Option<String>,
  },
  Image {
    url:   String,
    title: Option<String>,
    alt:   String,
  },
  Break,
  Html {
    value: String,
  },
  /// Generic element built by the notice tokenizer. Always carries
  /// [`HtmlData`].
  NoticeHtml,
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
  pub kind: NodeKind,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<HtmlData>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<Self>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub position: Option<Span>,
}

impl Node {
  /// Create a childless node.
  #[must_use]
  pub const fn new(kind: NodeKind) -> Self {
    Self {
      kind,
      data: None,
      children: Vec::new(),
      position: None,
    }
  }

  /// Create a node with the given children.
  #[must_use]
  pub const fn with_children(kind: NodeKind, children: Vec<Self>) -> Self {
    Self {
      kind,
      data: None,
      children,
      position: None,
    }
  }

  /// Create a text node.
  #[must_use]
  pub fn text<S: Into<String>>(value: S) -> Self {
    Self::new(NodeKind::Text {
      value: value.into(),
    })
  }

  /// Create a generic element that renders as `<name class="...">`.
  ///
  /// An empty class list renders without a `class` attribute.
  #[must_use]
  pub fn element(name: &str, classes: Vec<String>, children: Vec<Self>) -> Self {
    Self {
      kind: NodeKind::NoticeHtml,
      data: Some(HtmlData {
        h_name:       name.to_string(),
        h_properties: HtmlProperties {
          class_name: classes,
        },
      }),
      children,
      position: None,
    }
  }

  /// Element name from the rendering hint, if any.
  #[must_use]
  pub fn tag_name(&self) -> Option<&str> {
    self.data.as_ref().map(|data| data.h_name.as_str())
  }

  /// Classes from the rendering hint. Empty when there is no hint.
  #[must_use]
  pub fn class_names(&self) -> &[String] {
    match &self.data {
      Some(data) => &data.h_properties.class_name,
      None => &[],
    }
  }

  /// Whether the rendering hint lists `class`.
  #[must_use]
  pub fn has_class(&self, class: &str) -> bool {
    self.class_names().iter().any(|c| c == class)
  }

  /// Concatenated literal text of this node and all of its descendants.
  #[must_use]
  pub fn text_content(&self) -> String {
    let mut text = String::new();
    self.walk(&mut |node| {
      match &node.kind {
        NodeKind::Text { value }
        | NodeKind::InlineCode { value }
        | NodeKind::Code { value, .. } => text.push_str(value),
        _ => {},
      }
    });
    text
  }

  /// Visit this node and its descendants depth-first, in document order.
  pub fn walk<F>(&self, visit: &mut F)
  where
    F: FnMut(&Self),
  {
    visit(self);
    for child in &self.children {
      child.walk(visit);
    }
  }

  /// Serialize the tree as pretty-printed JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }
}
