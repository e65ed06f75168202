//! # ndg-notice - notice blocks for Markdown
//!
//! A block tokenizer for callouts written as
//!
//! ```text
//! :::warning Mind the gap
//! The body is regular **Markdown**.
//! :::
//! ```
//!
//! and a small registry-driven host parser to run it in. The tokenizer plugs
//! into the host's block dispatch directly after fenced code, may interrupt
//! paragraphs, lists and blockquotes, and hands its title and body back to the
//! host for inline and block tokenization.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndg_notice::{NoticeOptions, NoticeProcessor};
//!
//! let processor = NoticeProcessor::new(NoticeOptions::default());
//! let result = processor.render(":::tip\nUse `cargo doc`.\n:::\n");
//!
//! assert!(result.html.starts_with("<div class=\"notice notice-tip\">"));
//! assert_eq!(result.notices[0].title, "Tip");
//! ```
//!
//! ## Custom hosts
//!
//! Anything implementing [`Host`] can drive [`NoticeTokenizer`]; see
//! [`NoticePlugin::attach`] for installing it into a [`TokenizerRegistry`].
pub mod error;
pub mod host;
pub mod meta;
pub mod node;
pub mod notice;
pub mod processor;
pub mod registry;
pub mod render;
pub mod tokenizer;
mod types;
pub mod utils;

pub use crate::{
  error::{EatError, RegistryError},
  host::Parser,
  meta::{NoticeMeta, parse_meta},
  node::{Node, NodeKind, Position, Span},
  notice::{NoticePlugin, NoticeTokenizer},
  processor::{
    NoticeOptions,
    NoticeOptionsBuilder,
    NoticeProcessor,
    process_markdown_file,
    process_markdown_string,
    process_with_recovery,
  },
  registry::{Interrupt, Interrupts, Rank, Registration, TokenizerRegistry},
  render::to_html,
  tokenizer::{
    Add,
    BlockTokenize,
    BlockTokenizer,
    Eat,
    Host,
    InlineTokenize,
    MatchResult,
  },
  types::{NoticeResult, NoticeSummary},
};
