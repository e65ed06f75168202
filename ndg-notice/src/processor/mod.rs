//! Notice processing pipeline.
//!
//! - [`core`]: the processor itself, parsing and rendering
//! - [`process`]: high-level entry points with error recovery
//! - [`types`]: options and the processor struct
pub mod core;
pub mod process;
pub mod types;

pub use process::{
  process_markdown_file,
  process_markdown_string,
  process_with_recovery,
};
pub use types::{NoticeOptions, NoticeOptionsBuilder, NoticeProcessor};
