//! Builtin block tokenizers of the reference host.
//!
//! These cover the everyday CommonMark blocks well enough to host notices:
//! fenced code, ATX headings, thematic breaks, blockquotes, lists and
//! paragraphs. Every tokenizer consumes up to, but not including, the newline
//! that ends its last line.
use std::sync::{Arc, LazyLock};

use log::{error, warn};
use regex::Regex;

use crate::{
  node::{Node, NodeKind},
  registry::{Interrupt, Interrupts, Registration, rank},
  tokenizer::{BlockTokenizer, Eat, Host, MatchResult},
  utils::{self, Fence, first_line, is_blank, strip_indent},
};

static ATX_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))??(?:[ \t]+#+)?[ \t]*$")
    .unwrap_or_else(|e| {
      error!(
        "Failed to compile ATX_HEADING_RE regex: {e}\n Falling back to never \
         matching regex."
      );
      utils::never_matching_regex()
    })
});

static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^( {0,3})(?:([-*+])|(\d{1,9})([.)]))( +|$)").unwrap_or_else(
    |e| {
      error!(
        "Failed to compile LIST_MARKER_RE regex: {e}\n Falling back to never \
         matching regex."
      );
      utils::never_matching_regex()
    },
  )
});

/// The builtin tokenizers with their default placement.
#[must_use]
pub fn builtins() -> Vec<(Arc<dyn BlockTokenizer>, Registration)> {
  let paragraph_and_blockquote = Interrupts {
    paragraph:  true,
    list:       false,
    blockquote: true,
  };
  let paragraph_only = Interrupts {
    paragraph:  true,
    list:       false,
    blockquote: false,
  };

  vec![
    entry(
      FencedCode,
      Registration::new(rank::FENCED_CODE).interrupting(Interrupts::ALL),
    ),
    entry(
      Blockquote,
      Registration::new(rank::BLOCKQUOTE).interrupting(paragraph_only),
    ),
    entry(
      AtxHeading,
      Registration::new(rank::ATX_HEADING).interrupting(Interrupts::ALL),
    ),
    entry(
      ThematicBreak,
      Registration::new(rank::THEMATIC_BREAK).interrupting(Interrupts::ALL),
    ),
    entry(
      List,
      Registration::new(rank::LIST).interrupting(paragraph_and_blockquote),
    ),
    entry(Paragraph, Registration::new(rank::PARAGRAPH)),
  ]
}

fn entry<T: BlockTokenizer + 'static>(
  tokenizer: T,
  registration: Registration,
) -> (Arc<dyn BlockTokenizer>, Registration) {
  (Arc::new(tokenizer), registration)
}

/// Length of `line` without its trailing `\n`.
fn without_newline(line: &str) -> usize {
  line.trim_end_matches('\n').len()
}

/// Commit `value[..end]` and stamp the span onto `node`.
fn commit(eat: &mut dyn Eat, value: &str, end: usize, node: Node) -> MatchResult {
  match eat.eat(value.get(..end).unwrap_or_default()) {
    Ok(add) => MatchResult::Matched(add.apply(node)),
    Err(e) => {
      warn!("Could not consume {:?} block: {e}", node.kind);
      MatchResult::NotMatched
    },
  }
}

/// Fenced code blocks. An unclosed fence runs to the end of the input.
pub struct FencedCode;

impl BlockTokenizer for FencedCode {
  fn name(&self) -> &'static str {
    "fencedCode"
  }

  fn tokenize(
    &self,
    _host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult {
    let (first, first_len) = first_line(value);
    let Some((fence, info)) = Fence::open(first) else {
      return MatchResult::NotMatched;
    };
    if silent {
      return MatchResult::Probed;
    }

    let indent = first.len() - first.trim_start_matches(' ').len();
    let mut lines = Vec::new();
    let mut end = first.len();
    let mut offset = first_len;

    for line in value.get(first_len..).unwrap_or_default().split_inclusive('\n')
    {
      let text = line.trim_end_matches(['\n', '\r']);
      end = offset + without_newline(line);
      offset += line.len();

      if fence.closes(text) {
        break;
      }
      let stripped = text.trim_start_matches(' ');
      let removed = (text.len() - stripped.len()).min(indent);
      lines.push(text.get(removed..).unwrap_or_default());
    }

    let node = Node::new(NodeKind::Code {
      lang:  info.split_whitespace().next().map(str::to_string),
      value: lines.join("\n"),
    });
    commit(eat, value, end, node)
  }
}

/// `#` to `######` headings on a single line.
pub struct AtxHeading;

impl BlockTokenizer for AtxHeading {
  fn name(&self) -> &'static str {
    "atxHeading"
  }

  fn tokenize(
    &self,
    host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult {
    let (first, _) = first_line(value);
    let Some(caps) = ATX_HEADING_RE.captures(first.trim_end_matches('\r'))
    else {
      return MatchResult::NotMatched;
    };
    if silent {
      return MatchResult::Probed;
    }

    let depth = caps.get(1).map_or(1, |m| m.as_str().len());
    let text = caps.get(2).map_or("", |m| m.as_str());
    let children = host.tokenize_inline(text, eat.now());

    let node = Node::with_children(
      NodeKind::Heading {
        depth: u8::try_from(depth).unwrap_or(6),
      },
      children,
    );
    commit(eat, value, first.len(), node)
  }
}

fn is_thematic_break(line: &str) -> bool {
  let Some(rest) = strip_indent(line.trim_end_matches('\r')) else {
    return false;
  };
  let Some(marker) = rest.chars().find(|c| !c.is_whitespace()) else {
    return false;
  };

  matches!(marker, '*' | '-' | '_')
    && rest.chars().all(|c| c == marker || c == ' ' || c == '\t')
    && rest.chars().filter(|&c| c == marker).count() >= 3
}

/// `***`, `---` and `___` rules.
pub struct ThematicBreak;

impl BlockTokenizer for ThematicBreak {
  fn name(&self) -> &'static str {
    "thematicBreak"
  }

  fn tokenize(
    &self,
    _host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult {
    let (first, _) = first_line(value);
    if !is_thematic_break(first) {
      return MatchResult::NotMatched;
    }
    if silent {
      return MatchResult::Probed;
    }
    commit(eat, value, first.len(), Node::new(NodeKind::ThematicBreak))
  }
}

fn strip_quote_marker(line: &str) -> Option<&str> {
  let rest = strip_indent(line)?.strip_prefix('>')?;
  Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// `>` blockquotes, with lazy continuation lines.
pub struct Blockquote;

impl BlockTokenizer for Blockquote {
  fn name(&self) -> &'static str {
    "blockquote"
  }

  fn tokenize(
    &self,
    host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult {
    let (first, _) = first_line(value);
    if strip_quote_marker(first).is_none() {
      return MatchResult::NotMatched;
    }
    if silent {
      return MatchResult::Probed;
    }

    let now = eat.now();
    let mut content = Vec::new();
    let mut end = 0;
    let mut offset = 0;

    for line in value.split_inclusive('\n') {
      let text = line.trim_end_matches(['\n', '\r']);
      if let Some(inner) = strip_quote_marker(text) {
        content.push(inner);
      } else if is_blank(text)
        || host.interrupts(
          Interrupt::Blockquote,
          value.get(offset..).unwrap_or_default(),
        )
      {
        break;
      } else {
        content.push(text.trim_start());
      }
      end = offset + without_newline(line);
      offset += line.len();
    }

    let children = host.tokenize_block(&content.join("\n"), now);
    commit(
      eat,
      value,
      end,
      Node::with_children(NodeKind::Blockquote, children),
    )
  }
}

/// A list item marker at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker {
  /// Bullet character or ordered delimiter (`.` or `)`).
  symbol:         char,
  ordered:        bool,
  start:          Option<u64>,
  /// Column where the item's content starts.
  content_offset: usize,
  has_content:    bool,
}

impl Marker {
  fn parse(line: &str) -> Option<Self> {
    let caps = LIST_MARKER_RE.captures(line)?;
    let whole = caps.get(0)?;
    let spacing = caps.get(5).map_or(0, |m| m.as_str().len());
    let has_content = !is_blank(line.get(whole.end()..).unwrap_or_default());

    let (symbol, ordered, start) = if let Some(bullet) = caps.get(2) {
      (bullet.as_str().chars().next()?, false, None)
    } else {
      let delimiter = caps.get(4)?.as_str().chars().next()?;
      let start = caps.get(3)?.as_str().parse().ok();
      (delimiter, true, start)
    };

    // Five or more spaces after the marker means indented content; the item
    // content then starts one space after the marker.
    let content_offset = if spacing == 0 || spacing > 4 || !has_content {
      whole.end() - spacing + 1
    } else {
      whole.end()
    };

    Some(Self {
      symbol,
      ordered,
      start,
      content_offset,
      has_content,
    })
  }

  const fn continues(&self, other: &Self) -> bool {
    self.ordered == other.ordered && self.symbol == other.symbol
  }
}

fn indent_width(line: &str) -> usize {
  line.len() - line.trim_start_matches(' ').len()
}

/// Bullet (`-`, `*`, `+`) and ordered (`1.`, `1)`) lists.
pub struct List;

impl BlockTokenizer for List {
  fn name(&self) -> &'static str {
    "list"
  }

  fn tokenize(
    &self,
    host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult {
    let (first, _) = first_line(value);
    let Some(first_marker) = Marker::parse(first.trim_end_matches('\r')) else {
      return MatchResult::NotMatched;
    };
    if silent {
      // An empty item cannot interrupt anything
      return if first_marker.has_content {
        MatchResult::Probed
      } else {
        MatchResult::NotMatched
      };
    }

    let now = eat.now();
    let mut items: Vec<Vec<&str>> = Vec::new();
    let mut marker = first_marker;
    let mut pending_blank = false;
    let mut end = 0;
    let mut offset = 0;

    for line in value.split_inclusive('\n') {
      let text = line.trim_end_matches(['\n', '\r']);

      if offset == 0 {
        items.push(vec![text.get(marker.content_offset..).unwrap_or_default()]);
      } else if is_blank(text) {
        pending_blank = true;
        offset += line.len();
        continue;
      } else if indent_width(text) >= marker.content_offset {
        let Some(item) = items.last_mut() else { break };
        if pending_blank {
          item.push("");
        }
        item.push(text.get(marker.content_offset..).unwrap_or_default());
      } else if is_thematic_break(text) {
        break;
      } else if let Some(next) =
        Marker::parse(text).filter(|next| next.continues(&first_marker))
      {
        marker = next;
        items.push(vec![text.get(marker.content_offset..).unwrap_or_default()]);
      } else if pending_blank
        || host.interrupts(Interrupt::List, value.get(offset..).unwrap_or_default())
      {
        break;
      } else {
        let Some(item) = items.last_mut() else { break };
        item.push(text.trim_start());
      }

      pending_blank = false;
      end = offset + without_newline(line);
      offset += line.len();
    }

    let children = items
      .iter()
      .map(|lines| {
        Node::with_children(
          NodeKind::ListItem,
          host.tokenize_block(&lines.join("\n"), now),
        )
      })
      .collect();

    let node = Node::with_children(
      NodeKind::List {
        ordered: first_marker.ordered,
        start:   first_marker.start,
      },
      children,
    );
    commit(eat, value, end, node)
  }
}

/// Paragraphs: everything else, up to a blank line or an interrupting block.
pub struct Paragraph;

impl BlockTokenizer for Paragraph {
  fn name(&self) -> &'static str {
    "paragraph"
  }

  fn tokenize(
    &self,
    host: &dyn Host,
    eat: &mut dyn Eat,
    value: &str,
    silent: bool,
  ) -> MatchResult {
    let (first, _) = first_line(value);
    if is_blank(first) {
      return MatchResult::NotMatched;
    }
    if silent {
      return MatchResult::Probed;
    }

    let now = eat.now();
    let mut lines = Vec::new();
    let mut end = 0;
    let mut offset = 0;

    for line in value.split_inclusive('\n') {
      let text = line.trim_end_matches(['\n', '\r']);
      if offset > 0
        && (is_blank(text)
          || host.interrupts(
            Interrupt::Paragraph,
            value.get(offset..).unwrap_or_default(),
          ))
      {
        break;
      }
      lines.push(text.trim_start());
      end = offset + without_newline(line);
      offset += line.len();
    }

    let content = lines.join("\n");
    let children = host.tokenize_inline(content.trim_end(), now);
    commit(
      eat,
      value,
      end,
      Node::with_children(NodeKind::Paragraph, children),
    )
  }
}
