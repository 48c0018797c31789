//! `marley-check` — Validates MARLEY run configuration files.
//!
//! Runs the complete conformance suite over each file: structure, seed,
//! target composition, reaction files, neutrino source, and beam direction.
//! Directories are scanned recursively for `.js` and `.json` files.
//!
//! **Usage:**
//! ```text
//! marley-check <PATH>... [--marley-home <dir>] [--strict]
//! ```
//!
//! Exits non-zero if any check fails, or with `--strict` if any check warns.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::process;

use anyhow::Result;
use clap::Parser;
use marley_clients::cli::CheckArgs;
use marley_clients::{check_file, collect_configs, init_logging, render_report, Tally};
use tracing::{info, warn};

fn main() -> Result<()> {
    init_logging("marley_check");
    let args = CheckArgs::parse();

    let configs = collect_configs(&args.paths)?;
    if configs.is_empty() {
        warn!("no configuration files found");
    }
    if args.marley_home.is_none() {
        info!("MARLEY home not set; reaction files will not be checked on disk");
    }

    let mut tally = Tally::default();
    for config in configs {
        let report = check_file(&config, args.marley_home.as_deref());

        println!("{}", config.display());
        println!("{}", "=".repeat(config.display().to_string().chars().count()));
        print!("{}", render_report(&report));
        println!();
        tally.add(&report);
    }

    println!(
        "Summary: {} passed, {} warnings, {} failed",
        tally.passed, tally.warned, tally.failed
    );

    let blocking = tally.blocking(args.strict);
    if blocking > 0 {
        eprintln!("Configuration check FAILED: {blocking} check(s) did not pass.");
        process::exit(1);
    }

    println!("Configuration check PASSED.");
    Ok(())
}
