//! Render a Markdown file (or a built-in sample) and print the HTML and the
//! notices found in it.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example render -- docs/page.md
//! ```
#![allow(clippy::print_stdout, clippy::print_stderr, reason = "Example output")]
use std::{env, path::Path, process::ExitCode};

use ndg_notice::{
  NoticeOptions,
  NoticeProcessor,
  process_markdown_file,
  process_with_recovery,
};

const SAMPLE: &str = "\
# Notices

Some introduction.
:::warning Mind the gap
Text inside a **warning**.

:::tip
Nested notices close from the inside out.
:::
:::

- a list item
:::note
A note right after a list.
:::
";

fn main() -> ExitCode {
  env_logger::init();

  let result = match env::args().nth(1) {
    Some(path) => {
      match process_markdown_file(Path::new(&path), NoticeOptions::default()) {
        Ok(result) => result,
        Err(e) => {
          eprintln!("{e}");
          return ExitCode::FAILURE;
        },
      }
    },
    None => {
      let processor = NoticeProcessor::new(NoticeOptions::default());
      process_with_recovery(&processor, SAMPLE)
    },
  };

  println!("{}", result.html);
  println!();
  for notice in &result.notices {
    println!("{}: {}", notice.keyword, notice.title);
  }

  ExitCode::SUCCESS
}
