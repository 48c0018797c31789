//! Command-line arguments of `marley-check` and `marley-fmt`, and the
//! formatter's render and write steps.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use marley_config::serializer::{json, marley};
use marley_config::RunConfig;
use tracing::info;

/// Validate MARLEY run configuration files.
#[derive(Debug, Parser)]
#[command(
    name = "marley-check",
    about = "Validate MARLEY run configurations against the configuration schema"
)]
pub struct CheckArgs {
    /// Configuration files or directories to check.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// MARLEY installation directory; enables on-disk reaction file checks.
    #[arg(long, env = "MARLEY")]
    pub marley_home: Option<PathBuf>,

    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
}

/// Output dialect of `marley-fmt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Native MARLEY dialect.
    Marley,
    /// Strict JSON.
    Json,
}

/// Rewrite a MARLEY run configuration in canonical form.
#[derive(Debug, Parser)]
#[command(
    name = "marley-fmt",
    about = "Validate a MARLEY run configuration and write it in canonical form"
)]
pub struct FmtArgs {
    /// Configuration file to format.
    pub path: PathBuf,

    /// Output dialect.
    #[arg(long, value_enum, default_value_t = Format::Marley)]
    pub format: Format,

    /// Output file (default: stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Renders a configuration in the requested dialect, newline-terminated.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_config(config: &RunConfig, format: Format) -> Result<String> {
    Ok(match format {
        Format::Marley => marley::to_marley(config),
        Format::Json => {
            let mut s = serde_json::to_string_pretty(&json::to_json(config))
                .context("Failed to serialize configuration to JSON")?;
            s.push('\n');
            s
        }
    })
}

/// Writes `text` to `out`, or to stdout when no file is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_output(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(out) => {
            fs::write(out, text).with_context(|| format!("Failed to write {}", out.display()))?;
            info!(path = %out.display(), "written");
        }
        None => std::io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

/// Loads, validates, renders and writes one configuration.
///
/// Nothing is written when the configuration is invalid.
///
/// # Errors
///
/// Returns an error if the configuration does not load or validate, or the
/// output cannot be written.
pub fn format_file(args: &FmtArgs) -> Result<()> {
    let config = marley_config::load(&args.path)
        .with_context(|| format!("Invalid configuration {}", args.path.display()))?;
    let text = render_config(&config, args.format)?;
    write_output(&text, args.out.as_deref())
}
