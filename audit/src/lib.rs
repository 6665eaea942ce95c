//! correctionlib document audit.
//!
//! A document that parses is structurally valid, but some mistakes are not
//! structural: two corrections sharing a name, a node dispatching on an input
//! the correction never declares, a formula binding an input index past the
//! end, or a category whose keys can never match its input type. This crate
//! finds those and reports them as pass/warn/fail results.
//!
//! | Check | Severity |
//! |-------|----------|
//! | `names/corrections` | warn on duplicates |
//! | `names/inputs` | fail on duplicates |
//! | `references/inputs` | warn on undeclared dispatch inputs |
//! | `references/parameters` | warn on out-of-range formula parameters |
//! | `types/*` | warn on type mismatches |
//! | `inventory` | warn on an empty set |
//!
//! # Entry Point
//!
//! ```
//! use correctionlib_audit::{document, run_all};
//!
//! let set = document::parse_document(r#"{
//!     "name": "flat",
//!     "version": 1,
//!     "inputs": [],
//!     "output": {"name": "weight", "type": "real"},
//!     "data": 1.0
//! }"#).expect("valid document");
//! let report = run_all(&set);
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

pub mod document;
pub mod report;
pub mod validators;

use correctionlib_schema::CorrectionSet;

pub use report::{AuditReport, Severity, TestResult};

/// Runs every audit check and returns the aggregated report.
///
/// Checks run in this order:
/// 1. Name uniqueness (corrections, inputs)
/// 2. Reference resolution (dispatch inputs, formula parameters)
/// 3. Type consistency (dispatch, keys, parameters, output)
/// 4. Inventory
pub fn run_all(set: &CorrectionSet) -> AuditReport {
    let mut report = AuditReport::new();
    let checks: [(&str, fn(&CorrectionSet) -> AuditReport); 4] = [
        ("names", validators::names::validate),
        ("references", validators::references::validate),
        ("types", validators::types::validate),
        ("inventory", validators::inventory::validate),
    ];
    for (name, check) in checks {
        let _span = tracing::debug_span!("audit", check = name).entered();
        let results = check(set);
        tracing::debug!(
            warnings = results.warning_count(),
            failures = results.failure_count(),
            "check finished"
        );
        report.extend(results);
    }
    report
}
