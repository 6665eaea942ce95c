//! Parser from an untyped JSON tree into validated documents.
//!
//! Every object is closed-world: fields outside the declared set are
//! rejected. For each object the checks run in this order:
//!
//! 1. the `nodetype` discriminator (content objects only),
//! 2. unrecognized fields,
//! 3. declared fields in declaration order, children parsed recursively,
//!    with each node's local invariants checked as soon as the fields they
//!    involve are known.
//!
//! The first violation found is returned, located by its path from the root.

use std::io::Read;

use serde_json::{Map, Value as Json};

use crate::error::{ErrorKind, SchemaError};
use crate::v1::content::{check_axes, check_axis, check_unique_keys};
use crate::v1::document::check_schema_version;
use crate::v1::{
    Binning, Category, CategoryKey, Content, Correction, CorrectionSet, Formula, FormulaParser,
    MultiBinning, Variable, VariableType,
};

type Object = Map<String, Json>;

const CORRECTION_SET_FIELDS: &[&str] = &["schema_version", "corrections"];
const CORRECTION_FIELDS: &[&str] = &["name", "description", "version", "inputs", "output", "data"];
const VARIABLE_FIELDS: &[&str] = &["name", "type", "description"];
const FORMULA_FIELDS: &[&str] = &["expression", "parser", "parameters"];
const BINNING_FIELDS: &[&str] = &["nodetype", "input", "edges", "content"];
const MULTIBINNING_FIELDS: &[&str] = &["nodetype", "inputs", "edges", "content"];
const CATEGORY_FIELDS: &[&str] = &["nodetype", "input", "keys", "content", "default"];

/// Parses a correction set.
///
/// The schema version is checked before any correction is looked at.
///
/// # Errors
///
/// Returns the first structural violation in the document.
pub fn correction_set(value: &Json) -> Result<CorrectionSet, SchemaError> {
    let object = object(value, "correction set object")?;
    closed(object, CORRECTION_SET_FIELDS)?;
    let schema_version = field(object, "schema_version", integer)?;
    check_schema_version(schema_version)?;
    let corrections = field(object, "corrections", |v| list(v, correction))?;
    Ok(CorrectionSet::new(corrections))
}

/// Parses a single correction.
///
/// # Errors
///
/// Returns the first structural violation in the correction.
pub fn correction(value: &Json) -> Result<Correction, SchemaError> {
    let object = object(value, "correction object")?;
    closed(object, CORRECTION_FIELDS)?;
    let name = field(object, "name", string)?;
    let description = optional_field(object, "description", string)?;
    let version = field(object, "version", integer)?;
    let inputs = field(object, "inputs", |v| list(v, variable))?;
    let output = field(object, "output", variable)?;
    let data = field(object, "data", content)?;
    let correction = Correction::new(name, version, inputs, output, data)?;
    Ok(match description {
        Some(description) => correction.with_description(description),
        None => correction,
    })
}

/// Parses a variable declaration.
///
/// # Errors
///
/// Returns the first structural violation in the declaration.
pub fn variable(value: &Json) -> Result<Variable, SchemaError> {
    let object = object(value, "variable object")?;
    closed(object, VARIABLE_FIELDS)?;
    let name = field(object, "name", string)?;
    let type_ = field(object, "type", |v| VariableType::from_literal(&string(v)?))?;
    let description = optional_field(object, "description", string)?;
    Ok(Variable {
        name,
        type_,
        description,
    })
}

/// Parses a content node: a composite node, a formula, or a bare number.
///
/// # Errors
///
/// Returns the first structural violation in the subtree.
pub fn content(value: &Json) -> Result<Content, SchemaError> {
    match value {
        Json::Number(_) => real(value).map(Content::from),
        Json::Object(object) => match object.get("nodetype") {
            Some(Json::String(nodetype)) => match nodetype.as_str() {
                "binning" => binning(object).map(Content::from),
                "multibinning" => multibinning(object).map(Content::from),
                "category" => category(object).map(Content::from),
                other => Err(SchemaError::new(ErrorKind::UnknownDiscriminator {
                    found: Some(other.to_owned()),
                })
                .in_field("nodetype")),
            },
            Some(other) => Err(invalid_type("string", other).in_field("nodetype")),
            None if FORMULA_FIELDS.iter().any(|f| object.contains_key(*f)) => {
                formula(object).map(Content::from)
            }
            None => Err(SchemaError::new(ErrorKind::UnknownDiscriminator {
                found: None,
            })),
        },
        other => Err(invalid_type("content node (object or number)", other)),
    }
}

fn binning(object: &Object) -> Result<Binning, SchemaError> {
    closed(object, BINNING_FIELDS)?;
    let input = field(object, "input", string)?;
    let edges = field(object, "edges", |v| {
        let edges = list(v, real)?;
        check_axis(&edges)?;
        Ok(edges)
    })?;
    let content = field(object, "content", |v| list(v, content))?;
    Binning::new(input, edges, content)
}

fn multibinning(object: &Object) -> Result<MultiBinning, SchemaError> {
    closed(object, MULTIBINNING_FIELDS)?;
    let inputs = field(object, "inputs", |v| list(v, string))?;
    let edges = field(object, "edges", |v| {
        let edges = list(v, |axis| list(axis, real))?;
        check_axes(inputs.len(), &edges)?;
        Ok(edges)
    })?;
    let content = field(object, "content", |v| list(v, content))?;
    MultiBinning::new(inputs, edges, content)
}

fn category(object: &Object) -> Result<Category, SchemaError> {
    closed(object, CATEGORY_FIELDS)?;
    let input = field(object, "input", string)?;
    let keys = field(object, "keys", |v| {
        let keys = list(v, category_key)?;
        check_unique_keys(&keys)?;
        Ok(keys)
    })?;
    let content = field(object, "content", |v| list(v, content))?;
    let default = optional_field(object, "default", self::content)?;
    Category::new(input, keys, content, default)
}

fn formula(object: &Object) -> Result<Formula, SchemaError> {
    closed(object, FORMULA_FIELDS)?;
    let expression = field(object, "expression", string)?;
    let parser = field(object, "parser", |v| FormulaParser::from_literal(&string(v)?))?;
    let parameters = field(object, "parameters", |v| list(v, index))?;
    Ok(Formula {
        expression,
        parser,
        parameters,
    })
}

fn category_key(value: &Json) -> Result<CategoryKey, SchemaError> {
    match value {
        Json::String(s) => Ok(CategoryKey::Str(s.clone())),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(CategoryKey::Int(i)),
            None if n.is_u64() => Err(out_of_range(n, I64_RANGE)),
            None => Err(invalid_type("string or integer", value)),
        },
        other => Err(invalid_type("string or integer", other)),
    }
}

fn object<'a>(value: &'a Json, expected: &'static str) -> Result<&'a Object, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| invalid_type(expected, value))
}

fn closed(object: &Object, allowed: &[&str]) -> Result<(), SchemaError> {
    match object.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(extra) => Err(SchemaError::new(ErrorKind::UnrecognizedField {
            field: extra.clone(),
        })),
        None => Ok(()),
    }
}

/// Parses a required field, locating any error inside it.
fn field<T>(
    object: &Object,
    name: &'static str,
    parse: impl FnOnce(&Json) -> Result<T, SchemaError>,
) -> Result<T, SchemaError> {
    let value = object
        .get(name)
        .ok_or_else(|| SchemaError::new(ErrorKind::MissingField { field: name }))?;
    parse(value).map_err(|e| e.in_field(name))
}

/// Parses an optional field; absent and `null` are both `None`.
fn optional_field<T>(
    object: &Object,
    name: &'static str,
    parse: impl FnOnce(&Json) -> Result<T, SchemaError>,
) -> Result<Option<T>, SchemaError> {
    match object.get(name) {
        None | Some(Json::Null) => Ok(None),
        Some(value) => parse(value).map(Some).map_err(|e| e.in_field(name)),
    }
}

fn list<T>(
    value: &Json,
    parse: impl Fn(&Json) -> Result<T, SchemaError>,
) -> Result<Vec<T>, SchemaError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid_type("array", value))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse(item).map_err(|e| e.in_index(i)))
        .collect()
}

fn string(value: &Json) -> Result<String, SchemaError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| invalid_type("string", value))
}

const I64_RANGE: &str = "a 64-bit signed integer";

fn integer(value: &Json) -> Result<i64, SchemaError> {
    match value {
        Json::Number(n) if n.is_u64() && n.as_i64().is_none() => Err(out_of_range(n, I64_RANGE)),
        _ => value.as_i64().ok_or_else(|| invalid_type("integer", value)),
    }
}

fn index(value: &Json) -> Result<usize, SchemaError> {
    match value.as_u64() {
        Some(i) => usize::try_from(i).map_err(|_| out_of_range_u64(i)),
        None => Err(invalid_type("non-negative integer", value)),
    }
}

fn out_of_range(n: &serde_json::Number, range: &'static str) -> SchemaError {
    SchemaError::new(ErrorKind::IntegerOutOfRange {
        found: n.to_string(),
        range,
    })
}

fn out_of_range_u64(i: u64) -> SchemaError {
    SchemaError::new(ErrorKind::IntegerOutOfRange {
        found: i.to_string(),
        range: "an index on this platform",
    })
}

fn real(value: &Json) -> Result<f64, SchemaError> {
    let number = value.as_f64().ok_or_else(|| invalid_type("number", value))?;
    if !number.is_finite() {
        return Err(SchemaError::new(ErrorKind::NonFiniteNumber { value: number }));
    }
    Ok(number)
}

fn invalid_type(expected: &'static str, found: &Json) -> SchemaError {
    SchemaError::new(ErrorKind::InvalidType {
        expected,
        found: json_type(found),
    })
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn syntax(err: &serde_json::Error) -> SchemaError {
    SchemaError::new(ErrorKind::Syntax {
        message: err.to_string(),
    })
}

impl CorrectionSet {
    /// Parses a correction set from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Syntax`] for malformed JSON, otherwise the first
    /// structural violation.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: Json = serde_json::from_str(text).map_err(|e| syntax(&e))?;
        correction_set(&value)
    }

    /// Parses a correction set from a JSON byte stream.
    ///
    /// # Errors
    ///
    /// As [`CorrectionSet::from_json_str`]; read failures are reported as
    /// [`ErrorKind::Syntax`].
    pub fn from_reader(reader: impl Read) -> Result<Self, SchemaError> {
        let value: Json = serde_json::from_reader(reader).map_err(|e| syntax(&e))?;
        correction_set(&value)
    }
}

impl Correction {
    /// Parses a single correction from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Syntax`] for malformed JSON, otherwise the first
    /// structural violation.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: Json = serde_json::from_str(text).map_err(|e| syntax(&e))?;
        correction(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_content(value: Json) -> Result<Content, SchemaError> {
        content(&value)
    }

    #[test]
    fn bare_number_is_a_constant() {
        assert_eq!(parse_content(json!(1.5)).unwrap(), Content::from(1.5));
        assert_eq!(parse_content(json!(2)).unwrap(), Content::from(2.0));
    }

    #[test]
    fn formula_is_recognized_by_shape() {
        let node = parse_content(json!({
            "expression": "x*[0]",
            "parser": "TFormula",
            "parameters": [1, 0]
        }))
        .unwrap();
        assert_eq!(
            node,
            Content::from(Formula::new("x*[0]", FormulaParser::TFormula, vec![1, 0]))
        );
    }

    #[test]
    fn formula_missing_parser() {
        let err = parse_content(json!({ "expression": "x", "parameters": [0] })).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MissingField { field: "parser" });
    }

    #[test]
    fn formula_rejects_negative_parameter() {
        let err = parse_content(json!({
            "expression": "x",
            "parser": "numexpr",
            "parameters": [-1]
        }))
        .unwrap_err();
        assert_eq!(err.path_string(), "parameters[0]");
        assert!(matches!(err.kind(), ErrorKind::InvalidType { .. }));
    }

    #[test]
    fn unknown_nodetype() {
        let err = parse_content(json!({ "nodetype": "transform", "input": "x" })).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::UnknownDiscriminator {
                found: Some("transform".to_owned())
            }
        );
        assert_eq!(err.path_string(), "nodetype");
    }

    #[test]
    fn missing_nodetype() {
        let err = parse_content(json!({
            "input": "eta",
            "edges": [0.0, 1.0],
            "content": [1.0]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownDiscriminator { found: None });
    }

    #[test]
    fn non_string_nodetype() {
        let err = parse_content(json!({ "nodetype": 1 })).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidType {
                expected: "string",
                found: "integer"
            }
        );
    }

    #[test]
    fn extra_field_is_rejected() {
        let err = parse_content(json!({
            "nodetype": "binning",
            "input": "eta",
            "edges": [0.0, 1.0],
            "content": [1.0],
            "flow": "clamp"
        }))
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::UnrecognizedField {
                field: "flow".to_owned()
            }
        );
    }

    #[test]
    fn strings_and_booleans_are_not_content() {
        assert!(matches!(
            parse_content(json!("1.0")).unwrap_err().kind(),
            ErrorKind::InvalidType { .. }
        ));
        assert!(parse_content(json!(true)).is_err());
        assert!(parse_content(json!(null)).is_err());
    }

    #[test]
    fn parent_edge_order_precedes_child_errors() {
        let err = parse_content(json!({
            "nodetype": "binning",
            "input": "eta",
            "edges": [1.0, 0.5],
            "content": [{ "nodetype": "bogus" }]
        }))
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EdgeOrder { .. }));
        assert_eq!(err.path_string(), "edges");
    }

    #[test]
    fn child_errors_precede_parent_count() {
        let err = parse_content(json!({
            "nodetype": "binning",
            "input": "eta",
            "edges": [0.0, 1.0, 2.0],
            "content": [{ "nodetype": "category", "input": "dm", "keys": [0], "content": [] }]
        }))
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::ContentCountMismatch {
                expected: 1,
                found: 0
            }
        );
        assert_eq!(err.path_string(), "content[0].content");
    }

    #[test]
    fn multibinning_axis_count_precedes_content() {
        let err = parse_content(json!({
            "nodetype": "multibinning",
            "inputs": ["eta"],
            "edges": [[0.0, 1.0], [0.0, 1.0]],
            "content": "oops"
        }))
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::AxisCountMismatch {
                edges: 2,
                inputs: 1
            }
        );
    }

    #[test]
    fn category_keys_string_or_integer() {
        let node = parse_content(json!({
            "nodetype": "category",
            "input": "wp",
            "keys": ["Medium", 3],
            "content": [1.0, 2.0]
        }))
        .unwrap();
        let Content::Category(category) = node else {
            panic!("expected a category");
        };
        assert_eq!(
            category.keys(),
            &[CategoryKey::from("Medium"), CategoryKey::Int(3)]
        );
        assert_eq!(category.default(), None);

        let err = parse_content(json!({
            "nodetype": "category",
            "input": "wp",
            "keys": [1.5],
            "content": [1.0]
        }))
        .unwrap_err();
        assert_eq!(err.path_string(), "keys[0]");
    }

    #[test]
    fn integer_key_beyond_i64_is_out_of_range() {
        let err = parse_content(json!({
            "nodetype": "category",
            "input": "dm",
            "keys": [0, 9_223_372_036_854_775_808u64],
            "content": [1.0, 2.0]
        }))
        .unwrap_err();
        assert_eq!(err.path_string(), "keys[1]");
        assert_eq!(
            err.kind(),
            &ErrorKind::IntegerOutOfRange {
                found: "9223372036854775808".to_owned(),
                range: "a 64-bit signed integer"
            }
        );
        assert_eq!(
            err.to_string(),
            "keys[1]: integer 9223372036854775808 is out of range for a 64-bit signed integer"
        );
    }

    #[test]
    fn version_beyond_i64_is_out_of_range() {
        let err = correction_set(&json!({
            "schema_version": u64::MAX,
            "corrections": []
        }))
        .unwrap_err();
        assert_eq!(err.path_string(), "schema_version");
        assert!(matches!(err.kind(), ErrorKind::IntegerOutOfRange { .. }));
    }

    #[test]
    fn category_null_default_is_absent() {
        let node = parse_content(json!({
            "nodetype": "category",
            "input": "dm",
            "keys": [0],
            "content": [1.0],
            "default": null
        }))
        .unwrap();
        let Content::Category(category) = node else {
            panic!("expected a category");
        };
        assert!(category.default().is_none());
    }

    #[test]
    fn correction_set_version_checked_first() {
        let err = correction_set(&json!({
            "schema_version": 2,
            "corrections": "not even a list"
        }))
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::SchemaVersion {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn float_schema_version_is_a_type_error() {
        let err = correction_set(&json!({ "schema_version": 1.0, "corrections": [] })).unwrap_err();
        assert_eq!(err.path_string(), "schema_version");
        assert!(matches!(err.kind(), ErrorKind::InvalidType { .. }));
    }

    #[test]
    fn correction_missing_output() {
        let err = correction(&json!({
            "name": "c",
            "version": 1,
            "inputs": [],
            "data": 1.0
        }))
        .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MissingField { field: "output" });
    }

    #[test]
    fn variable_type_literal() {
        let err = variable(&json!({ "name": "pt", "type": "float" })).unwrap_err();
        assert_eq!(err.path_string(), "type");
        assert!(matches!(err.kind(), ErrorKind::InvalidLiteral { .. }));
    }

    #[test]
    fn malformed_text_is_a_syntax_error() {
        let err = CorrectionSet::from_json_str("{\"schema_version\": 1,").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Syntax { .. }));
    }

    #[test]
    fn deep_error_path() {
        let err = CorrectionSet::from_json_str(
            r#"{
                "schema_version": 1,
                "corrections": [{
                    "name": "c",
                    "version": 0,
                    "inputs": [{"name": "eta", "type": "real"}],
                    "output": {"name": "weight", "type": "real"},
                    "data": {
                        "nodetype": "category",
                        "input": "eta",
                        "keys": ["a"],
                        "content": [{
                            "nodetype": "binning",
                            "input": "eta",
                            "edges": [0.0, 1.0],
                            "content": [1.0, 2.0]
                        }]
                    }
                }]
            }"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "corrections[0].data.content[0].content: number of content elements (2) \
             must match number of bins or keys (1)"
        );
    }
}
