//! `serde` integration, delegating to the canonical serializer and parser.
//!
//! Deserializing goes through an untyped `serde_json::Value`, so every
//! structural check applies; violations surface as the format's custom error
//! carrying the located [`crate::SchemaError`] message.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as Json;

use crate::serializer::json::{content_to_json, correction_to_json, to_json};
use crate::v1::{parse, Content, Correction, CorrectionSet};

impl Serialize for CorrectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CorrectionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Json::deserialize(deserializer)?;
        parse::correction_set(&value).map_err(D::Error::custom)
    }
}

impl Serialize for Correction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        correction_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Correction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Json::deserialize(deserializer)?;
        parse::correction(&value).map_err(D::Error::custom)
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        content_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Json::deserialize(deserializer)?;
        parse::content(&value).map_err(D::Error::custom)
    }
}
