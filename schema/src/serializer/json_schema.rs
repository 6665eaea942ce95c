//! JSON Schema projection of the version 1 type definitions.
//!
//! The output is a draft-07 JSON Schema describing `CorrectionSet` and every
//! type it contains, for third-party structural validators. It mirrors the
//! field names, literals and closed-world policy of the parser. Cross-field
//! invariants (edge order, content counts, key uniqueness) are not
//! expressible in JSON Schema and are enforced only by the constructors.

use serde_json::{json, Value as Json};

use crate::v1::{FormulaParser, VariableType, VERSION};

/// File name the schema is exported under, keyed by the version constant.
#[must_use]
pub fn file_name() -> String {
    format!("schemav{VERSION}.json")
}

/// Builds the JSON Schema document for [`crate::v1::CorrectionSet`].
#[must_use]
pub fn to_json_schema() -> Json {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "CorrectionSet",
        "type": "object",
        "properties": {
            "schema_version": {
                "title": "Schema Version",
                "description": "Schema version",
                "const": VERSION,
                "enum": [VERSION],
                "type": "integer"
            },
            "corrections": {
                "title": "Corrections",
                "type": "array",
                "items": { "$ref": "#/definitions/Correction" }
            }
        },
        "required": ["schema_version", "corrections"],
        "additionalProperties": false,
        "definitions": {
            "Variable": variable(),
            "Formula": formula(),
            "Binning": binning(),
            "MultiBinning": multibinning(),
            "Category": category(),
            "Correction": correction()
        }
    })
}

fn content_ref() -> Json {
    json!({
        "anyOf": [
            { "$ref": "#/definitions/Binning" },
            { "$ref": "#/definitions/MultiBinning" },
            { "$ref": "#/definitions/Category" },
            { "$ref": "#/definitions/Formula" },
            { "type": "number" }
        ]
    })
}

fn nullable_content() -> Json {
    let mut options = content_ref()["anyOf"].clone();
    if let Some(options) = options.as_array_mut() {
        options.push(json!({ "type": "null" }));
    }
    options
}

fn variable() -> Json {
    json!({
        "title": "Variable",
        "type": "object",
        "properties": {
            "name": { "title": "Name", "type": "string" },
            "type": { "title": "Type", "enum": VariableType::LITERALS, "type": "string" },
            "description": nullable_string("Description")
        },
        "required": ["name", "type"],
        "additionalProperties": false
    })
}

fn formula() -> Json {
    json!({
        "title": "Formula",
        "type": "object",
        "properties": {
            "expression": { "title": "Expression", "type": "string" },
            "parser": { "title": "Parser", "enum": FormulaParser::LITERALS, "type": "string" },
            "parameters": {
                "title": "Parameters",
                "description": "Index to Correction.inputs[]",
                "type": "array",
                "items": { "type": "integer", "minimum": 0 }
            }
        },
        "required": ["expression", "parser", "parameters"],
        "additionalProperties": false
    })
}

fn nodetype(literal: &str) -> Json {
    json!({ "title": "Nodetype", "enum": [literal], "type": "string" })
}

/// One axis: at least two numbers.
fn edges() -> Json {
    json!({ "type": "array", "items": { "type": "number" }, "minItems": 2 })
}

fn titled(mut schema: Json, title: &str, description: &str) -> Json {
    schema["title"] = json!(title);
    schema["description"] = json!(description);
    schema
}

/// Optional fields accept `null` as "not set".
fn nullable_string(title: &str) -> Json {
    json!({ "title": title, "type": ["string", "null"] })
}

fn binning() -> Json {
    json!({
        "title": "Binning",
        "type": "object",
        "properties": {
            "nodetype": nodetype("binning"),
            "input": { "title": "Input", "type": "string" },
            "edges": titled(
                edges(),
                "Edges",
                "Edges of the binning, where edges[i] <= x < edges[i+1] => f(x, ...) = content[i](...)"
            ),
            "content": { "title": "Content", "type": "array", "items": content_ref() }
        },
        "required": ["nodetype", "input", "edges", "content"],
        "additionalProperties": false
    })
}

fn multibinning() -> Json {
    json!({
        "title": "MultiBinning",
        "description": "N-dimensional rectangular binning",
        "type": "object",
        "properties": {
            "nodetype": nodetype("multibinning"),
            "inputs": { "title": "Inputs", "type": "array", "items": { "type": "string" } },
            "edges": {
                "title": "Edges",
                "description": "Bin edges for each input",
                "type": "array",
                "items": edges()
            },
            "content": {
                "title": "Content",
                "description": "Flattened grid, first input varying slowest",
                "type": "array",
                "items": content_ref()
            }
        },
        "required": ["nodetype", "inputs", "edges", "content"],
        "additionalProperties": false
    })
}

fn category() -> Json {
    json!({
        "title": "Category",
        "type": "object",
        "properties": {
            "nodetype": nodetype("category"),
            "input": { "title": "Input", "type": "string" },
            "keys": {
                "title": "Keys",
                "type": "array",
                "items": { "anyOf": [{ "type": "string" }, { "type": "integer" }] },
                "uniqueItems": true
            },
            "content": { "title": "Content", "type": "array", "items": content_ref() },
            "default": {
                "title": "Default",
                "anyOf": nullable_content()
            }
        },
        "required": ["nodetype", "input", "keys", "content"],
        "additionalProperties": false
    })
}

fn correction() -> Json {
    json!({
        "title": "Correction",
        "type": "object",
        "properties": {
            "name": { "title": "Name", "description": "A useful name", "type": "string" },
            "description": titled(
                nullable_string("Description"),
                "Description",
                "Detailed description of the correction"
            ),
            "version": { "title": "Version", "description": "Version", "type": "integer" },
            "inputs": {
                "title": "Inputs",
                "type": "array",
                "items": { "$ref": "#/definitions/Variable" }
            },
            "output": { "$ref": "#/definitions/Variable" },
            "data": {
                "title": "Data",
                "anyOf": content_ref()["anyOf"].clone()
            }
        },
        "required": ["name", "version", "inputs", "output", "data"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definitions(schema: &Json) -> &serde_json::Map<String, Json> {
        schema["definitions"].as_object().unwrap()
    }

    #[test]
    fn file_name_keyed_by_version() {
        assert_eq!(file_name(), "schemav1.json");
    }

    #[test]
    fn every_type_is_defined() {
        let schema = to_json_schema();
        let defs = definitions(&schema);
        for name in [
            "Variable",
            "Formula",
            "Binning",
            "MultiBinning",
            "Category",
            "Correction",
        ] {
            assert!(defs.contains_key(name), "missing definition {name}");
        }
    }

    #[test]
    fn every_object_is_closed() {
        let schema = to_json_schema();
        assert_eq!(schema["additionalProperties"], json!(false));
        for (name, def) in definitions(&schema) {
            assert_eq!(
                def["additionalProperties"],
                json!(false),
                "{name} allows extra fields"
            );
        }
    }

    #[test]
    fn literals_mirror_model() {
        let schema = to_json_schema();
        let defs = definitions(&schema);
        assert_eq!(
            defs["Variable"]["properties"]["type"]["enum"],
            json!(["string", "int", "real"])
        );
        assert_eq!(
            defs["Formula"]["properties"]["parser"]["enum"],
            json!(["TFormula", "numexpr"])
        );
        assert_eq!(
            defs["Binning"]["properties"]["nodetype"]["enum"],
            json!(["binning"])
        );
        assert_eq!(schema["properties"]["schema_version"]["const"], json!(1));
    }

    #[test]
    fn optional_fields_accept_null() {
        let schema = to_json_schema();
        let defs = definitions(&schema);
        assert_eq!(
            defs["Variable"]["properties"]["description"]["type"],
            json!(["string", "null"])
        );
        assert_eq!(
            defs["Correction"]["properties"]["description"]["type"],
            json!(["string", "null"])
        );
        let default = defs["Category"]["properties"]["default"]["anyOf"]
            .as_array()
            .unwrap();
        assert_eq!(default.last(), Some(&json!({ "type": "null" })));
        assert!(!defs["Correction"]["properties"]["data"]["anyOf"]
            .as_array()
            .unwrap()
            .contains(&json!({ "type": "null" })));
    }

    #[test]
    fn binning_and_multibinning_share_axis_rule() {
        let schema = to_json_schema();
        let defs = definitions(&schema);
        assert_eq!(defs["Binning"]["properties"]["edges"]["minItems"], json!(2));
        assert_eq!(
            defs["MultiBinning"]["properties"]["edges"]["items"]["minItems"],
            json!(2)
        );
        assert_eq!(defs["Binning"]["properties"]["edges"]["title"], json!("Edges"));
    }

    #[test]
    fn required_fields_exclude_optionals() {
        let schema = to_json_schema();
        let defs = definitions(&schema);
        assert_eq!(
            defs["Category"]["required"],
            json!(["nodetype", "input", "keys", "content"])
        );
        assert_eq!(
            defs["Correction"]["required"],
            json!(["name", "version", "inputs", "output", "data"])
        );
    }
}
