//! Reference resolution checks.
//!
//! Nodes dispatch on inputs by name and formulas bind inputs by position.
//! Neither reference is resolved when a document is built, so both are
//! checked here against each correction's declared inputs.

use correctionlib_schema::CorrectionSet;

use super::formulas;
use crate::report::{AuditReport, TestResult};

const INPUTS: &str = "references/inputs";
const PARAMETERS: &str = "references/parameters";

/// Runs the reference resolution checks.
pub fn validate(set: &CorrectionSet) -> AuditReport {
    let mut report = AuditReport::new();
    report.push(check_dispatch_inputs(set));
    report.push(check_formula_parameters(set));
    report
}

fn check_dispatch_inputs(set: &CorrectionSet) -> TestResult {
    let mut details = Vec::new();
    for correction in set.corrections() {
        for name in correction.data().inputs_used() {
            if correction.input_index(name).is_none() {
                details.push(format!(
                    "`{}`: dispatches on undeclared input `{name}`",
                    correction.name()
                ));
            }
        }
    }
    if details.is_empty() {
        return TestResult::pass(INPUTS, "every dispatched input is declared");
    }
    TestResult::warn_with_details(
        INPUTS,
        format!("{} dispatch reference(s) do not resolve", details.len()),
        details,
    )
}

fn check_formula_parameters(set: &CorrectionSet) -> TestResult {
    let mut details = Vec::new();
    for correction in set.corrections() {
        for formula in formulas(correction) {
            if let Err(err) = formula.bind(correction.inputs()) {
                details.push(format!(
                    "`{}`: formula `{}` {err}",
                    correction.name(),
                    formula.expression
                ));
            }
        }
    }
    if details.is_empty() {
        return TestResult::pass(PARAMETERS, "every formula parameter is in range");
    }
    TestResult::warn_with_details(
        PARAMETERS,
        format!("{} formula(s) bind a missing input", details.len()),
        details,
    )
}
