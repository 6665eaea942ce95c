//! Loading documents from disk and combining them.
//!
//! A file holds either a whole `CorrectionSet` or a single `Correction`; the
//! presence of `schema_version` at the top level tells them apart.

use std::path::Path;

use anyhow::{Context, Result};
use correctionlib_schema::v1::parse;
use correctionlib_schema::{CorrectionSet, ErrorKind, SchemaError};
use serde_json::Value;

/// Parses JSON text holding a set or a single correction.
///
/// A single correction is wrapped in a one-element set.
///
/// # Errors
///
/// Returns the located [`SchemaError`] of the first violation.
pub fn parse_document(text: &str) -> Result<CorrectionSet, SchemaError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        SchemaError::new(ErrorKind::Syntax {
            message: e.to_string(),
        })
    })?;
    if value.get("schema_version").is_some() {
        parse::correction_set(&value)
    } else {
        parse::correction(&value).map(|correction| CorrectionSet::new(vec![correction]))
    }
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn load(path: &Path) -> Result<CorrectionSet> {
    tracing::debug!(path = %path.display(), "loading document");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let set = parse_document(&text)
        .with_context(|| format!("{} is not a valid correction document", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        corrections = set.corrections().len(),
        "loaded document"
    );
    Ok(set)
}

/// Concatenates the corrections of `sets`, keeping their order.
///
/// Names are not deduplicated; the name audit reports any collision.
pub fn merge(sets: impl IntoIterator<Item = CorrectionSet>) -> CorrectionSet {
    CorrectionSet::new(
        sets.into_iter()
            .flat_map(CorrectionSet::into_corrections)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use correctionlib_test_helpers::{self as helpers, fixtures};

    #[test]
    fn single_correction_is_wrapped() {
        let set = parse_document(fixtures::TEST_1D).unwrap();
        assert_eq!(set.corrections().len(), 1);
        assert_eq!(set.corrections()[0], helpers::build_test_1d());
    }

    #[test]
    fn set_with_bad_version_is_not_treated_as_correction() {
        let err = parse_document(fixtures::INVALID_SCHEMA_VERSION).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SchemaVersion { .. }));
    }

    #[test]
    fn malformed_text_is_a_syntax_error() {
        let err = parse_document("{\"schema_version\": 1,").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Syntax { .. }));
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("set.json");
        std::fs::write(&good, fixtures::TEST_SET).unwrap();
        assert_eq!(load(&good).unwrap(), helpers::build_test_set());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, fixtures::INVALID_EDGE_ORDER).unwrap();
        let message = format!("{:#}", load(&bad).unwrap_err());
        assert!(message.contains("bad.json is not a valid correction document"));
        assert!(message.contains("data.edges: bin edges not in increasing order"));

        assert!(load(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn merge_keeps_order() {
        let merged = merge(vec![
            helpers::build_test_set(),
            parse_document(fixtures::TAU_TES).unwrap(),
        ]);
        let names: Vec<&str> = merged.corrections().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["test_1D", "test_2D", "test_category", "tau_tes"]);
    }
}
