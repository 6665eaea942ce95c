//! Corrections and sets that each break one structural rule.

/// Binning whose edges decrease.
pub const INVALID_EDGE_ORDER: &str = r#"{
  "name": "bad_edges",
  "version": 0,
  "inputs": [{"name": "x", "type": "real"}],
  "output": {"name": "weight", "type": "real"},
  "data": {"nodetype": "binning", "input": "x", "edges": [1.0, 0.5], "content": [0.0]}
}"#;

/// 2×2 multi-binning with three content entries.
pub const INVALID_MULTIBINNING_COUNT: &str = r#"{
  "name": "bad_grid",
  "version": 0,
  "inputs": [{"name": "eta", "type": "real"}, {"name": "pt", "type": "real"}],
  "output": {"name": "weight", "type": "real"},
  "data": {
    "nodetype": "multibinning",
    "inputs": ["eta", "pt"],
    "edges": [[0.0, 1.1, 2.5], [20.0, 50.0, 100.0]],
    "content": [0.0, 1.0, 2.0]
  }
}"#;

/// Category with a default but one content entry too few.
pub const INVALID_CATEGORY_COUNT: &str = r#"{
  "name": "bad_category",
  "version": 0,
  "inputs": [{"name": "dm", "type": "int"}],
  "output": {"name": "weight", "type": "real"},
  "data": {"nodetype": "category", "input": "dm", "keys": [0, 1, 2], "content": [0.0, 1.0], "default": 1.0}
}"#;

/// Category listing a working point twice.
pub const INVALID_DUPLICATE_KEY: &str = r#"{
  "name": "bad_keys",
  "version": 0,
  "inputs": [{"name": "wp", "type": "string"}],
  "output": {"name": "weight", "type": "real"},
  "data": {"nodetype": "category", "input": "wp", "keys": ["Medium", "Medium"], "content": [1.0, 1.0]}
}"#;

/// Binning carrying a field outside its declared set.
pub const INVALID_EXTRA_FIELD: &str = r#"{
  "name": "bad_field",
  "version": 0,
  "inputs": [{"name": "x", "type": "real"}],
  "output": {"name": "weight", "type": "real"},
  "data": {"nodetype": "binning", "input": "x", "edges": [0.0, 1.0], "content": [1.0], "flow": "clamp"}
}"#;

/// Formula written with a `nodetype` and named variables instead of
/// positional parameters.
pub const INVALID_FORMULA_NODETYPE: &str = r#"{
  "name": "bad_formula",
  "version": 0,
  "inputs": [{"name": "pt", "type": "real"}],
  "output": {"name": "weight", "type": "real"},
  "data": {"nodetype": "formula", "expression": "1.04+0.0004*x", "parser": "TFormula", "variables": ["pt"]}
}"#;

/// Otherwise valid set declaring schema version 2.
pub const INVALID_SCHEMA_VERSION: &str = r#"{
  "schema_version": 2,
  "corrections": [
    {
      "name": "test_1D",
      "version": 0,
      "inputs": [{"name": "eta", "type": "real"}],
      "output": {"name": "weight", "type": "real"},
      "data": {"nodetype": "binning", "input": "eta", "edges": [0.0, 1.1, 2.5], "content": [0.0, 1.0]}
    }
  ]
}"#;
