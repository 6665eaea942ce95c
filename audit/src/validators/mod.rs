//! Audit checks, grouped by concern.
//!
//! Each module exposes `validate(&CorrectionSet) -> AuditReport`. None of them
//! repeat the structural checks the schema constructors already enforce.

pub mod inventory;
pub mod names;
pub mod references;
pub mod types;

use correctionlib_schema::{Content, Correction, Formula, Value};

/// Every formula leaf of `correction`, defaults included.
pub(crate) fn formulas(correction: &Correction) -> Vec<&Formula> {
    let mut found = Vec::new();
    correction.data().for_each_node(&mut |node| {
        if let Content::Value(Value::Formula(formula)) = node {
            found.push(formula);
        }
    });
    found
}
