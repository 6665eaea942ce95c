//! Type consistency between declared variables and the nodes using them.
//!
//! Binnings compare numbers, categories match exact keys, formulas compute
//! on numbers and corrections produce a real. Each rule is checked against
//! the declared `VariableType`; inputs that are not declared at all are left
//! to the reference checks.

use correctionlib_schema::{CategoryKey, Content, Correction, CorrectionSet, VariableType};

use super::formulas;
use crate::report::{AuditReport, TestResult};

const DISPATCH: &str = "types/dispatch";
const KEYS: &str = "types/keys";
const PARAMETERS: &str = "types/parameters";
const OUTPUT: &str = "types/output";

/// Runs the type consistency checks.
pub fn validate(set: &CorrectionSet) -> AuditReport {
    let mut dispatch = Vec::new();
    let mut keys = Vec::new();
    let mut parameters = Vec::new();
    let mut output = Vec::new();
    for correction in set.corrections() {
        check_nodes(correction, &mut dispatch, &mut keys);
        check_parameters(correction, &mut parameters);
        if correction.output().type_ != VariableType::Real {
            output.push(format!(
                "`{}`: output `{}` is {}",
                correction.name(),
                correction.output().name,
                correction.output().type_.as_str()
            ));
        }
    }

    let mut report = AuditReport::new();
    report.push(summarize(
        DISPATCH,
        dispatch,
        "dispatch inputs have a usable type",
        "node(s) dispatch on an input of the wrong type",
    ));
    report.push(summarize(
        KEYS,
        keys,
        "category keys match their input types",
        "category key(s) cannot match their input type",
    ));
    report.push(summarize(
        PARAMETERS,
        parameters,
        "formula parameters bind numeric inputs",
        "formula parameter(s) bind a string input",
    ));
    report.push(summarize(
        OUTPUT,
        output,
        "every output is real",
        "output(s) are not real",
    ));
    report
}

fn summarize(validator: &str, details: Vec<String>, pass: &str, warn: &str) -> TestResult {
    if details.is_empty() {
        TestResult::pass(validator, pass)
    } else {
        TestResult::warn_with_details(validator, format!("{} {warn}", details.len()), details)
    }
}

fn declared_type(correction: &Correction, name: &str) -> Option<VariableType> {
    correction
        .input_index(name)
        .map(|i| correction.inputs()[i].type_)
}

fn check_nodes(correction: &Correction, dispatch: &mut Vec<String>, keys: &mut Vec<String>) {
    let name = correction.name();
    correction.data().for_each_node(&mut |node| match node {
        Content::Binning(binning) => {
            if declared_type(correction, binning.input()) == Some(VariableType::String) {
                dispatch.push(format!(
                    "`{name}`: binning on string input `{}`",
                    binning.input()
                ));
            }
        }
        Content::MultiBinning(binning) => {
            for input in binning.inputs() {
                if declared_type(correction, input) == Some(VariableType::String) {
                    dispatch.push(format!("`{name}`: multibinning on string input `{input}`"));
                }
            }
        }
        Content::Category(category) => {
            let Some(type_) = declared_type(correction, category.input()) else {
                return;
            };
            if type_ == VariableType::Real {
                dispatch.push(format!(
                    "`{name}`: category on real input `{}`",
                    category.input()
                ));
                return;
            }
            for key in category.keys() {
                let matches = matches!(
                    (key, type_),
                    (CategoryKey::Str(_), VariableType::String)
                        | (CategoryKey::Int(_), VariableType::Int)
                );
                if !matches {
                    keys.push(format!(
                        "`{name}`: key {key} on {} input `{}`",
                        type_.as_str(),
                        category.input()
                    ));
                }
            }
        }
        Content::Value(_) => {}
    });
}

fn check_parameters(correction: &Correction, details: &mut Vec<String>) {
    for formula in formulas(correction) {
        for &index in &formula.parameters {
            let Some(variable) = correction.inputs().get(index) else {
                continue;
            };
            if !variable.type_.is_numeric() {
                details.push(format!(
                    "`{}`: formula `{}` binds string input `{}`",
                    correction.name(),
                    formula.expression,
                    variable.name
                ));
            }
        }
    }
}
