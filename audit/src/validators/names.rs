//! Name uniqueness checks.
//!
//! - Correction names within a set (lookups by name return the first match,
//!   so later duplicates are unreachable).
//! - Input names within a correction (nodes refer to inputs by name, so a
//!   repeated name is ambiguous).

use std::collections::HashMap;

use correctionlib_schema::CorrectionSet;

use crate::report::{AuditReport, TestResult};

const CORRECTIONS: &str = "names/corrections";
const INPUTS: &str = "names/inputs";

/// Runs the name uniqueness checks.
pub fn validate(set: &CorrectionSet) -> AuditReport {
    let mut report = AuditReport::new();
    report.push(check_correction_names(set));
    report.push(check_input_names(set));
    report
}

/// Names occurring more than once, in first-occurrence order, with their counts.
fn duplicates<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut order = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|name| {
            let count = counts.get(name).copied().unwrap_or(0);
            (count > 1).then_some((name, count))
        })
        .collect()
}

fn check_correction_names(set: &CorrectionSet) -> TestResult {
    let repeated = duplicates(set.corrections().iter().map(|c| c.name()));
    if repeated.is_empty() {
        return TestResult::pass(
            CORRECTIONS,
            format!("{} correction name(s) are unique", set.corrections().len()),
        );
    }
    TestResult::warn_with_details(
        CORRECTIONS,
        format!("{} correction name(s) are used more than once", repeated.len()),
        repeated
            .into_iter()
            .map(|(name, count)| format!("`{name}` appears {count} times"))
            .collect(),
    )
}

fn check_input_names(set: &CorrectionSet) -> TestResult {
    let details: Vec<String> = set
        .corrections()
        .iter()
        .flat_map(|correction| {
            duplicates(correction.inputs().iter().map(|v| v.name.as_str()))
                .into_iter()
                .map(move |(name, count)| {
                    format!(
                        "`{}`: input `{name}` declared {count} times",
                        correction.name()
                    )
                })
        })
        .collect();
    if details.is_empty() {
        return TestResult::pass(INPUTS, "input names are unique within each correction");
    }
    TestResult::fail_with_details(
        INPUTS,
        "some corrections declare the same input name twice",
        details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use correctionlib_schema::{Correction, Variable, VariableType};
    use correctionlib_test_helpers::{build_test_1d, build_test_set, formula_correction};

    #[test]
    fn unique_names_pass() {
        let report = validate(&build_test_set());
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn duplicate_correction_names_warn() {
        let set = CorrectionSet::new(vec![
            build_test_1d(),
            formula_correction("pt_weight", 0),
            build_test_1d(),
        ]);
        let report = validate(&set);
        let result = report.by_validator(CORRECTIONS).next().unwrap();
        assert!(result.is_warning());
        assert_eq!(result.details, vec!["`test_1D` appears 2 times"]);
    }

    #[test]
    fn duplicate_input_names_fail() {
        let correction = Correction::new(
            "twice",
            0,
            vec![
                Variable::new("pt", VariableType::Real),
                Variable::new("pt", VariableType::Real),
            ],
            Variable::new("weight", VariableType::Real),
            1.0.into(),
        )
        .unwrap();
        let report = validate(&CorrectionSet::new(vec![correction]));
        assert_eq!(report.failure_count(), 1);
        let result = report.by_validator(INPUTS).next().unwrap();
        assert_eq!(result.details, vec!["`twice`: input `pt` declared 2 times"]);
    }
}
