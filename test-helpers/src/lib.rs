//! Test-only helpers for correctionlib.
//!
//! Provides fixture documents ([`fixtures`]), programmatic builders for the
//! same documents, and JSON tree utilities used to exercise the closed-world
//! policy. Functions here panic on unexpected input; they are meant for tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod fixtures;

use correctionlib_schema::{
    Binning, Category, CategoryKey, Content, Correction, CorrectionSet, Formula, FormulaParser,
    MultiBinning, Variable, VariableType,
};
use serde_json::Value;

/// Parses a fixture correction, panicking with the located error.
pub fn correction(text: &str) -> Correction {
    Correction::from_json_str(text).unwrap_or_else(|e| panic!("fixture does not parse: {e}"))
}

/// Parses a fixture set, panicking with the located error.
pub fn correction_set(text: &str) -> CorrectionSet {
    CorrectionSet::from_json_str(text).unwrap_or_else(|e| panic!("fixture does not parse: {e}"))
}

/// `fixtures::TEST_1D`, built through the constructors.
pub fn build_test_1d() -> Correction {
    Correction::new(
        "test_1D",
        0,
        vec![Variable::new("eta", VariableType::Real).with_description("tau eta")],
        Variable::new("weight", VariableType::Real),
        Binning::new("eta", vec![0.0, 1.1, 2.5], vec![0.0.into(), 1.0.into()])
            .unwrap()
            .into(),
    )
    .unwrap()
}

/// `fixtures::TEST_2D`, built through the constructors.
pub fn build_test_2d() -> Correction {
    Correction::new(
        "test_2D",
        0,
        vec![
            Variable::new("eta", VariableType::Real).with_description("tau eta"),
            Variable::new("pt", VariableType::Real).with_description("tau pt"),
        ],
        Variable::new("weight", VariableType::Real),
        MultiBinning::new(
            vec!["eta".to_owned(), "pt".to_owned()],
            vec![vec![0.0, 1.1, 2.5], vec![20.0, 50.0, 100.0]],
            [0.0, 1.0, 2.0, 3.0].into_iter().map(Content::from).collect(),
        )
        .unwrap()
        .into(),
    )
    .unwrap()
}

/// `fixtures::TEST_CATEGORY`, built through the constructors.
pub fn build_test_category() -> Correction {
    Correction::new(
        "test_category",
        0,
        vec![Variable::new("dm", VariableType::Int).with_description("decay mode")],
        Variable::new("weight", VariableType::Real),
        Category::new(
            "dm",
            (0..3).map(CategoryKey::Int).collect(),
            vec![0.0.into(), 1.0.into(), 2.0.into()],
            Some(1.0.into()),
        )
        .unwrap()
        .into(),
    )
    .unwrap()
}

/// `fixtures::TEST_SET`, built through the constructors.
pub fn build_test_set() -> CorrectionSet {
    CorrectionSet::new(vec![
        build_test_1d(),
        build_test_2d(),
        build_test_category(),
    ])
}

/// A pt-dependent formula correction whose parameter points at `index`.
pub fn formula_correction(name: &str, index: usize) -> Correction {
    Correction::new(
        name,
        1,
        vec![
            Variable::new("pt", VariableType::Real),
            Variable::new("syst", VariableType::String),
        ],
        Variable::new("weight", VariableType::Real),
        Formula::new("1.04+0.0004*x", FormulaParser::TFormula, vec![index]).into(),
    )
    .unwrap()
}

/// JSON pointers of every object in `value`, the root included.
pub fn object_pointers(value: &Value) -> Vec<String> {
    fn walk(value: &Value, pointer: String, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    walk(child, format!("{pointer}/{key}"), out);
                }
                out.push(pointer);
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    walk(child, format!("{pointer}/{i}"), out);
                }
            }
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(value, String::new(), &mut out);
    out
}

/// Copy of `value` with `field: true` added to the object at `pointer`.
pub fn with_extra_field(value: &Value, pointer: &str, field: &str) -> Value {
    let mut copy = value.clone();
    let target = copy
        .pointer_mut(pointer)
        .and_then(Value::as_object_mut)
        .unwrap_or_else(|| panic!("no object at {pointer:?}"));
    target.insert(field.to_owned(), Value::Bool(true));
    copy
}
