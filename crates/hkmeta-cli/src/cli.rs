//! CLI argument definitions for hkmeta.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `validate` | Decode a metadata document and summarize its entry types |
//! | `normalize` | Re-encode a metadata document canonically |
//! | `classify` | Build metadata from a plain JSON object of scalars |
//! | `original` | Widen a metadata document back into plain JSON values |
//!
//! Every command reads `FILE`, or stdin when `FILE` is omitted or `-`.
//!
//! # Examples
//!
//! ```bash
//! hkmeta validate sample-metadata.json
//! echo '{"HKSampleCount": 3}' | hkmeta classify --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect and convert health-sample metadata documents.
#[derive(Debug, Parser)]
#[command(name = "hkmeta", author, version, about = "Health-sample metadata codec CLI")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a metadata document and report the type of every entry.
    Validate(InputArgs),
    /// Decode a metadata document and print its canonical encoding.
    Normalize(InputArgs),
    /// Classify a plain JSON object into typed metadata.
    Classify(InputArgs),
    /// Print the untyped form of a metadata document.
    Original(InputArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input file; `-` or omitted reads stdin.
    pub file: Option<PathBuf>,
}
