//! `marley-fmt` — Rewrites a MARLEY run configuration in canonical form.
//!
//! The file is loaded and validated first; nothing is written for an
//! invalid configuration. Output goes to stdout unless `--out` is given.
//!
//! **Formats:**
//! - `marley` — the native relaxed dialect, bare keys, defaults filled in
//! - `json` — strict pretty-printed JSON
//!
//! **Usage:**
//! ```text
//! marley-fmt <PATH> [--format marley|json] [--out <file>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::Result;
use clap::Parser;
use marley_clients::cli::{format_file, FmtArgs};
use marley_clients::init_logging;

fn main() -> Result<()> {
    init_logging("marley_fmt");
    format_file(&FmtArgs::parse())
}
