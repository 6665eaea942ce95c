//! `correction-schema`: exports the JSON Schema of the current document version.
//!
//! **Outputs:**
//! - `<out>/schemav1.json`: draft-07 JSON Schema for `CorrectionSet`
//!
//! **Usage:**
//! ```text
//! correction-schema [--out <path>] [-v]
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
use correctionlib_clients::{init_logging, write_json};
use correctionlib_schema::serializer::json_schema;

/// Export the correction document JSON Schema.
#[derive(Parser)]
#[command(
    name = "correction-schema",
    about = "Export the correction document JSON Schema"
)]
struct Args {
    /// Output directory for the schema file.
    #[arg(long, default_value = "data")]
    out: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let path = args.out.join(json_schema::file_name());
    write_json(&path, &json_schema::to_json_schema())?;
    println!("  Written: {}", path.display());
    Ok(())
}
