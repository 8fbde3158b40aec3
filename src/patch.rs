//! Partial updates
//!
//! Update operations send a merge-patch document: keys present replace the
//! resource attribute (collections and nested objects are replaced whole),
//! keys absent leave it untouched. Patch models declare every attribute as a
//! [`PatchField`], which keeps "not set" apart from "set to null" and from
//! "set to an empty value".
//!
//! ```
//! use vpcbeta::{AsPatch, PatchField, VpcPatch};
//!
//! let patch = VpcPatch {
//!     name: "my-vpc-modified".into(),
//!     ..Default::default()
//! }
//! .as_patch()
//! .unwrap();
//! assert_eq!(patch.to_string(), r#"{"name":"my-vpc-modified"}"#);
//! ```

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// One attribute of a patch model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatchField<T> {
    /// Leave the attribute alone; the key is omitted from the payload
    #[default]
    Unset,
    /// Clear the attribute; the key is sent with a `null` value
    Null,
    /// Replace the attribute with this value
    Set(T),
}

impl<T> PatchField<T> {
    /// Used by `skip_serializing_if` on every patch model field
    pub fn is_unset(&self) -> bool {
        matches!(self, PatchField::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PatchField::Null)
    }

    pub fn as_ref(&self) -> PatchField<&T> {
        match self {
            PatchField::Unset => PatchField::Unset,
            PatchField::Null => PatchField::Null,
            PatchField::Set(v) => PatchField::Set(v),
        }
    }

    /// `None` means "clear", not "leave alone"
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => PatchField::Set(v),
            None => PatchField::Null,
        }
    }

    /// The value when one is set
    pub fn value(&self) -> Option<&T> {
        match self {
            PatchField::Set(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for PatchField<T> {
    fn from(value: T) -> Self {
        PatchField::Set(value)
    }
}

impl From<&str> for PatchField<String> {
    fn from(value: &str) -> Self {
        PatchField::Set(value.to_string())
    }
}

impl<T: Serialize> Serialize for PatchField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PatchField::Set(v) => v.serialize(serializer),
            PatchField::Unset | PatchField::Null => serializer.serialize_none(),
        }
    }
}

/// A serialized merge-patch document
///
/// Keys are kept sorted, so equal patch models always encode to identical
/// bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// Build a patch from an already sparse JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

/// Conversion of a patch model into its wire payload
///
/// Implemented by every `*Patch` model. The default method serializes the
/// model and requires the result to be a JSON object.
pub trait AsPatch: Serialize {
    fn as_patch(&self) -> Result<Patch> {
        match serde_json::to_value(self).map_err(Error::Encoding)? {
            Value::Object(map) => Ok(Patch(map)),
            other => Err(Error::Encoding(serde::ser::Error::custom(format!(
                "patch model must encode to a JSON object, got {}",
                json_kind(&other)
            )))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize)]
    struct SamplePatch {
        #[serde(skip_serializing_if = "PatchField::is_unset")]
        name: PatchField<String>,
        #[serde(skip_serializing_if = "PatchField::is_unset")]
        user_tags: PatchField<Vec<String>>,
        #[serde(skip_serializing_if = "PatchField::is_unset")]
        capacity: PatchField<i64>,
        #[serde(skip_serializing_if = "PatchField::is_unset")]
        nested: PatchField<Nested>,
    }

    #[derive(Debug, Serialize)]
    struct Nested {
        port: i64,
        listener: Option<String>,
    }

    impl AsPatch for SamplePatch {}

    #[test]
    fn unset_fields_are_omitted() {
        let patch = SamplePatch {
            name: "my-vpc-modified".into(),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"name": "my-vpc-modified"}));
        assert_eq!(patch.len(), 1);
    }

    #[test]
    fn empty_model_yields_empty_patch() {
        let patch = SamplePatch::default().as_patch().unwrap();
        assert!(patch.is_empty());
        assert_eq!(patch.to_string(), "{}");
    }

    #[test]
    fn null_is_sent_explicitly() {
        let patch = SamplePatch {
            capacity: PatchField::Null,
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert!(patch.contains_key("capacity"));
        assert_eq!(patch.get("capacity"), Some(&Value::Null));
    }

    #[test]
    fn empty_collection_is_present() {
        let patch = SamplePatch {
            user_tags: PatchField::Set(vec![]),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"user_tags": []}));
    }

    #[test]
    fn zero_values_are_present() {
        let patch = SamplePatch {
            name: "".into(),
            capacity: PatchField::Set(0),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"name": "", "capacity": 0}));
    }

    #[test]
    fn nested_objects_are_replaced_whole() {
        let patch = SamplePatch {
            nested: PatchField::Set(Nested {
                port: 443,
                listener: None,
            }),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(
            patch.to_value(),
            json!({"nested": {"port": 443, "listener": null}})
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let build = || SamplePatch {
            user_tags: vec!["tag-a".to_string()].into(),
            name: "vol-renamed".into(),
            capacity: PatchField::Set(100),
            ..Default::default()
        };
        let first = build().as_patch().unwrap().to_string();
        let second = build().as_patch().unwrap().to_string();
        assert_eq!(first, second);
        assert_eq!(
            first,
            r#"{"capacity":100,"name":"vol-renamed","user_tags":["tag-a"]}"#
        );
    }

    #[test]
    fn option_none_means_clear() {
        let field: PatchField<String> = PatchField::from_option(None);
        assert!(field.is_null());
        let field = PatchField::from_option(Some("x".to_string()));
        assert_eq!(field.value().map(String::as_str), Some("x"));
    }

    #[test]
    fn non_object_models_fail_to_encode() {
        #[derive(Serialize)]
        struct NotAnObject(i64);
        impl AsPatch for NotAnObject {}

        let err = NotAnObject(3).as_patch().unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
        assert!(err.to_string().contains("a number"));
    }
}
