//! `correction-merge`: combines corrections and sets into one set.
//!
//! Inputs may be whole sets or single corrections; their corrections are
//! concatenated in command-line order. The result is audited before it is
//! written: warnings are logged, failures abort the merge.
//!
//! **Usage:**
//! ```text
//! correction-merge <FILE>... --out <path> [-v]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use correctionlib_audit::{document, run_all};
use correctionlib_clients::{init_logging, write_json};
use correctionlib_schema::serializer::json;

/// Merge correction documents into one set.
#[derive(Parser)]
#[command(name = "correction-merge", about = "Merge correction documents into one set")]
struct Args {
    /// Documents to merge, in order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path of the merged set.
    #[arg(long)]
    out: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let sets = args
        .files
        .iter()
        .map(|path| document::load(path))
        .collect::<Result<Vec<_>>>()?;
    let merged = document::merge(sets);

    let report = run_all(&merged);
    for result in report.results.iter().filter(|r| r.is_warning()) {
        tracing::warn!(check = %result.validator, details = ?result.details, "{}", result.message);
    }
    if !report.all_passed() {
        for result in report.results.iter().filter(|r| r.is_failure()) {
            tracing::error!(check = %result.validator, details = ?result.details, "{}", result.message);
        }
        bail!("merged set fails {} audit check(s)", report.failure_count());
    }

    write_json(&args.out, &json::to_json(&merged))?;
    println!(
        "Merged {} correction(s) from {} file(s) into {}",
        merged.corrections().len(),
        args.files.len(),
        args.out.display()
    );
    Ok(())
}
