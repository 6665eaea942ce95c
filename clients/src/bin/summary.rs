//! `correction-summary`: prints the inputs, output and tree shape of each
//! correction in a document.
//!
//! **Usage:**
//! ```text
//! correction-summary <FILE> [-v]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use correctionlib_audit::document;
use correctionlib_clients::{init_logging, render_summary};

/// Summarize a correction document.
#[derive(Parser)]
#[command(name = "correction-summary", about = "Summarize a correction document")]
struct Args {
    /// Document to summarize.
    file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let set = document::load(&args.file)?;
    print!("{}", render_summary(&set));
    Ok(())
}
