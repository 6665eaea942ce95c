//! Canonical JSON serializer for schema version 1 documents.
//!
//! Field names and `nodetype` literals are the wire contract. Object keys are
//! emitted in declaration order, optional fields are omitted when absent, and
//! every sequence keeps its order (edges, keys, content, inputs, parameters).
//! Parsing the output with [`crate::v1::parse`] yields an equal document.

use serde_json::{json, Map, Value as Json};

use crate::v1::{
    Binning, Category, CategoryKey, Content, Correction, CorrectionSet, Formula, MultiBinning,
    Value, Variable,
};

/// Serializes a correction set.
///
/// Constructors reject non-finite numbers, so every number is representable.
#[must_use]
pub fn to_json(set: &CorrectionSet) -> Json {
    json!({
        "schema_version": set.schema_version(),
        "corrections": set.corrections().iter().map(correction_to_json).collect::<Vec<_>>()
    })
}

/// Serializes a correction set as indented JSON text.
///
/// # Errors
///
/// Returns an error only if the underlying writer fails, which cannot happen
/// for an in-memory string.
pub fn to_string_pretty(set: &CorrectionSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_json(set))
}

/// Serializes a single correction.
#[must_use]
pub fn correction_to_json(correction: &Correction) -> Json {
    let mut object = Map::new();
    object.insert("name".to_owned(), json!(correction.name()));
    if let Some(description) = correction.description() {
        object.insert("description".to_owned(), json!(description));
    }
    object.insert("version".to_owned(), json!(correction.version()));
    object.insert(
        "inputs".to_owned(),
        Json::Array(correction.inputs().iter().map(variable_to_json).collect()),
    );
    object.insert("output".to_owned(), variable_to_json(correction.output()));
    object.insert("data".to_owned(), content_to_json(correction.data()));
    Json::Object(object)
}

/// Serializes a variable declaration.
#[must_use]
pub fn variable_to_json(variable: &Variable) -> Json {
    let mut node = json!({
        "name": variable.name,
        "type": variable.type_.as_str()
    });
    if let Some(description) = &variable.description {
        node["description"] = json!(description);
    }
    node
}

/// Serializes a content subtree.
#[must_use]
pub fn content_to_json(content: &Content) -> Json {
    match content {
        Content::Binning(b) => binning_to_json(b),
        Content::MultiBinning(m) => multibinning_to_json(m),
        Content::Category(c) => category_to_json(c),
        Content::Value(Value::Formula(f)) => formula_to_json(f),
        Content::Value(Value::Number(x)) => json!(x),
    }
}

fn binning_to_json(binning: &Binning) -> Json {
    json!({
        "nodetype": "binning",
        "input": binning.input(),
        "edges": binning.edges(),
        "content": children(binning.content())
    })
}

fn multibinning_to_json(binning: &MultiBinning) -> Json {
    json!({
        "nodetype": "multibinning",
        "inputs": binning.inputs(),
        "edges": binning.edges(),
        "content": children(binning.content())
    })
}

fn category_to_json(category: &Category) -> Json {
    let keys: Vec<Json> = category
        .keys()
        .iter()
        .map(|key| match key {
            CategoryKey::Str(s) => json!(s),
            CategoryKey::Int(i) => json!(i),
        })
        .collect();
    let mut node = json!({
        "nodetype": "category",
        "input": category.input(),
        "keys": keys,
        "content": children(category.content())
    });
    if let Some(default) = category.default() {
        node["default"] = content_to_json(default);
    }
    node
}

fn formula_to_json(formula: &Formula) -> Json {
    json!({
        "expression": formula.expression,
        "parser": formula.parser.as_str(),
        "parameters": formula.parameters
    })
}

fn children(content: &[Content]) -> Json {
    Json::Array(content.iter().map(content_to_json).collect())
}
