//! Schema version 1 document shape.
//!
//! This module is frozen: a new document shape gets a sibling module with its
//! own [`VERSION`], never an in-place change here. Documents declaring any
//! other `schema_version` are rejected, with no cross-version coercion.

mod content;
mod document;
pub mod parse;
#[cfg(feature = "serde")]
mod serde_impls;
mod variable;

pub use content::{Binning, Category, CategoryKey, Content, MultiBinning, Value};
pub use document::{Correction, CorrectionSet, CorrectionSummary};
pub use variable::{ExpressionEngine, Formula, FormulaParser, Variable, VariableType};

/// The schema version this document shape implements.
pub const VERSION: i64 = 1;
