//! Serializers for schema version 1 documents.
//!
//! Two outputs are supported:
//! - **JSON** ([`json`]): the canonical document representation, read back by [`crate::v1::parse`]
//! - **JSON Schema** ([`json_schema`]): the type definitions, for third-party validators, output to `schemav1.json`

pub mod json;
pub mod json_schema;
