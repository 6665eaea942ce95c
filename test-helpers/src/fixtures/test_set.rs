//! The three minimal corrections and the set combining them.
//!
//! Covers one binning, one 2×2 multi-binning and one integer category with a
//! default, each at correction version 0.

/// 1-D binning in `eta` with edges `[0.0, 1.1, 2.5]`.
pub const TEST_1D: &str = r#"{
  "name": "test_1D",
  "version": 0,
  "inputs": [
    {"name": "eta", "type": "real", "description": "tau eta"}
  ],
  "output": {"name": "weight", "type": "real"},
  "data": {
    "nodetype": "binning",
    "input": "eta",
    "edges": [0.0, 1.1, 2.5],
    "content": [0.0, 1.0]
  }
}"#;

/// 2-D multi-binning in `eta` × `pt`, flattened with `eta` varying slowest.
pub const TEST_2D: &str = r#"{
  "name": "test_2D",
  "version": 0,
  "inputs": [
    {"name": "eta", "type": "real", "description": "tau eta"},
    {"name": "pt", "type": "real", "description": "tau pt"}
  ],
  "output": {"name": "weight", "type": "real"},
  "data": {
    "nodetype": "multibinning",
    "inputs": ["eta", "pt"],
    "edges": [[0.0, 1.1, 2.5], [20.0, 50.0, 100.0]],
    "content": [0.0, 1.0, 2.0, 3.0]
  }
}"#;

/// Integer category on the decay mode with a default.
pub const TEST_CATEGORY: &str = r#"{
  "name": "test_category",
  "version": 0,
  "inputs": [
    {"name": "dm", "type": "int", "description": "decay mode"}
  ],
  "output": {"name": "weight", "type": "real"},
  "data": {
    "nodetype": "category",
    "input": "dm",
    "keys": [0, 1, 2],
    "content": [0.0, 1.0, 2.0],
    "default": 1.0
  }
}"#;

/// Schema version 1 set holding the three corrections above.
pub const TEST_SET: &str = r#"{
  "schema_version": 1,
  "corrections": [
    {
      "name": "test_1D",
      "version": 0,
      "inputs": [{"name": "eta", "type": "real", "description": "tau eta"}],
      "output": {"name": "weight", "type": "real"},
      "data": {"nodetype": "binning", "input": "eta", "edges": [0.0, 1.1, 2.5], "content": [0.0, 1.0]}
    },
    {
      "name": "test_2D",
      "version": 0,
      "inputs": [
        {"name": "eta", "type": "real", "description": "tau eta"},
        {"name": "pt", "type": "real", "description": "tau pt"}
      ],
      "output": {"name": "weight", "type": "real"},
      "data": {
        "nodetype": "multibinning",
        "inputs": ["eta", "pt"],
        "edges": [[0.0, 1.1, 2.5], [20.0, 50.0, 100.0]],
        "content": [0.0, 1.0, 2.0, 3.0]
      }
    },
    {
      "name": "test_category",
      "version": 0,
      "inputs": [{"name": "dm", "type": "int", "description": "decay mode"}],
      "output": {"name": "weight", "type": "real"},
      "data": {"nodetype": "category", "input": "dm", "keys": [0, 1, 2], "content": [0.0, 1.0, 2.0], "default": 1.0}
    }
  ]
}"#;
