//! HTML serialization of a node tree.
//!
//! Nodes carrying a rendering hint ([`HtmlData`](crate::node::HtmlData)) are
//! rendered as that element. Everything else maps to its usual CommonMark
//! element. Top-level blocks are separated by newlines; nested output is
//! compact.
use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::node::{Node, NodeKind};

/// Render `node` and its descendants as HTML.
#[must_use]
pub fn to_html(node: &Node) -> String {
  let mut out = String::new();
  if node.kind == NodeKind::Root && node.data.is_none() {
    for (i, child) in node.children.iter().enumerate() {
      if i > 0 {
        out.push('\n');
      }
      render(child, &mut out);
    }
  } else {
    render(node, &mut out);
  }
  out
}

fn render_children(node: &Node, out: &mut String) {
  for child in &node.children {
    render(child, out);
  }
}

fn element(name: &str, node: &Node, out: &mut String) {
  let _ = write!(out, "<{name}>");
  render_children(node, out);
  let _ = write!(out, "</{name}>");
}

fn render(node: &Node, out: &mut String) {
  if let Some(data) = &node.data {
    let name = data.h_name.as_str();
    out.push('<');
    out.push_str(name);
    let classes = &data.h_properties.class_name;
    if !classes.is_empty() {
      let _ = write!(
        out,
        " class=\"{}\"",
        encode_double_quoted_attribute(&classes.join(" "))
      );
    }
    out.push('>');
    render_children(node, out);
    let _ = write!(out, "</{name}>");
    return;
  }

  match &node.kind {
    NodeKind::Root => render_children(node, out),
    NodeKind::Paragraph => element("p", node, out),
    NodeKind::Heading { depth } => {
      element(&format!("h{}", (*depth).clamp(1, 6)), node, out);
    },
    NodeKind::ThematicBreak => out.push_str("<hr />"),
    NodeKind::Blockquote => element("blockquote", node, out),
    NodeKind::List { ordered, start } => {
      if *ordered {
        match start {
          Some(start) if *start != 1 => {
            let _ = write!(out, "<ol start=\"{start}\">");
          },
          _ => out.push_str("<ol>"),
        }
        render_children(node, out);
        out.push_str("</ol>");
      } else {
        element("ul", node, out);
      }
    },
    NodeKind::ListItem => {
      out.push_str("<li>");
      // Tight items hold a single paragraph, rendered without <p>
      match node.children.as_slice() {
        [only] if only.kind == NodeKind::Paragraph && only.data.is_none() => {
          render_children(only, out);
        },
        _ => render_children(node, out),
      }
      out.push_str("</li>");
    },
    NodeKind::Code { lang, value } => {
      match lang {
        Some(lang) => {
          let _ = write!(
            out,
            "<pre><code class=\"language-{}\">",
            encode_double_quoted_attribute(lang)
          );
        },
        None => out.push_str("<pre><code>"),
      }
      out.push_str(&encode_text(value));
      if !value.is_empty() {
        out.push('\n');
      }
      out.push_str("</code></pre>");
    },
    NodeKind::Text { value } => out.push_str(&encode_text(value)),
    NodeKind::Emphasis => element("em", node, out),
    NodeKind::Strong => element("strong", node, out),
    NodeKind::InlineCode { value } => {
      let _ = write!(out, "<code>{}</code>", encode_text(value));
    },
    NodeKind::Link { url, title } => {
      let _ = write!(out, "<a href=\"{}\"", encode_double_quoted_attribute(url));
      if let Some(title) = title {
        let _ =
          write!(out, " title=\"{}\"", encode_double_quoted_attribute(title));
      }
      out.push('>');
      render_children(node, out);
      out.push_str("</a>");
    },
    NodeKind::Image { url, title, alt } => {
      let _ = write!(
        out,
        "<img src=\"{}\" alt=\"{}\"",
        encode_double_quoted_attribute(url),
        encode_double_quoted_attribute(alt)
      );
      if let Some(title) = title {
        let _ =
          write!(out, " title=\"{}\"", encode_double_quoted_attribute(title));
      }
      out.push_str(" />");
    },
    NodeKind::Break => out.push_str("<br />"),
    NodeKind::Html { value } => out.push_str(value),
    // Always carries a rendering hint; without one only the content remains
    NodeKind::NoticeHtml => render_children(node, out),
  }
}
