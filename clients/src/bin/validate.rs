//! `correction-validate`: checks correction documents and audits them.
//!
//! Each file is parsed as a `CorrectionSet`, or as a single `Correction` when
//! it has no `schema_version`. Structural errors fail the file outright;
//! valid documents are audited and the results printed per file.
//!
//! **Usage:**
//! ```text
//! correction-validate <FILE>... [--strict] [-v]
//! ```
//!
//! Exits non-zero if any file fails to parse or any check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use correctionlib_audit::{document, run_all};
use correctionlib_clients::{init_logging, render_report, Tally};

/// Validate and audit correction documents.
#[derive(Parser)]
#[command(
    name = "correction-validate",
    about = "Validate and audit correction documents"
)]
struct Args {
    /// Documents to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Treat audit warnings as failures.
    #[arg(long)]
    strict: bool,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("Correction Document Report");
    println!("==========================");

    let mut total = Tally::default();
    for path in &args.files {
        println!();
        println!("{}", path.display());
        let set = match document::load(path) {
            Ok(set) => set,
            Err(err) => {
                println!("[FAIL] schema: {err:#}");
                total.failed += 1;
                continue;
            }
        };
        let mut report = run_all(&set);
        if args.strict {
            report = report.strict();
        }
        let mut out = String::new();
        total.add(render_report(&report, &mut out));
        print!("{out}");
    }

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        total.passed, total.warned, total.failed
    );

    if total.failed > 0 {
        eprintln!("Validation FAILED: {} check(s) did not pass.", total.failed);
        process::exit(1);
    }

    println!("Validation PASSED.");
    Ok(())
}
