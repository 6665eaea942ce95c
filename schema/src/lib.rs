//! Versioned document schema for piecewise correction functions.
//!
//! A [`CorrectionSet`] holds named [`Correction`]s, each mapping typed inputs
//! to one output through a tree of [`Content`] nodes: 1-D and N-D binnings,
//! categories, and terminal formulas or constants. Every node checks its
//! structural invariants when it is constructed, so a document that exists
//! is well-formed and can be shared read-only between threads.
//!
//! # Parsing
//!
//! ```
//! use correctionlib_schema::CorrectionSet;
//!
//! let set = CorrectionSet::from_json_str(r#"{
//!     "schema_version": 1,
//!     "corrections": [{
//!         "name": "test_1D",
//!         "version": 0,
//!         "inputs": [{"name": "eta", "type": "real"}],
//!         "output": {"name": "weight", "type": "real"},
//!         "data": {"nodetype": "binning", "input": "eta",
//!                  "edges": [0.0, 1.1, 2.5], "content": [0.0, 1.0]}
//!     }]
//! }"#).expect("valid document");
//! assert_eq!(set.corrections()[0].name(), "test_1D");
//! ```
//!
//! # Serialization
//!
//! ```
//! # let set = correctionlib_schema::CorrectionSet::new(Vec::new());
//! let json = correctionlib_schema::serializer::json::to_json(&set);
//! let schema = correctionlib_schema::serializer::json_schema::to_json_schema();
//! assert_eq!(json["schema_version"], 1);
//! assert_eq!(schema["title"], "CorrectionSet");
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

pub mod error;
pub mod serializer;
pub mod v1;

pub use error::{ErrorKind, PathSegment, SchemaError};
pub use v1::{
    Binning, Category, CategoryKey, Content, Correction, CorrectionSet, ExpressionEngine,
    Formula, FormulaParser, MultiBinning, Value, Variable, VariableType, VERSION,
};
