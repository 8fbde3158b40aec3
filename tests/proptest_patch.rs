//! Property-based tests using proptest
//!
//! These tests verify that patch documents keep "not set", "null" and
//! "set" apart for arbitrary field combinations, and that the `start`
//! cursor survives the trip through a `next` link.

use proptest::prelude::*;
use serde_json::{json, Value};
use vpcbeta::{AsPatch, PageLink, PatchField, VolumePatch};

/// Generate one patch field in any of its three states
fn arb_field<T: std::fmt::Debug + Clone>(
    value: impl Strategy<Value = T>,
) -> impl Strategy<Value = PatchField<T>> {
    prop_oneof![
        Just(PatchField::Unset),
        Just(PatchField::Null),
        value.prop_map(PatchField::Set),
    ]
}

/// Expected wire value of a field, `None` when the key must be absent
fn expected<T: serde::Serialize>(field: &PatchField<T>) -> Option<Value> {
    match field {
        PatchField::Unset => None,
        PatchField::Null => Some(Value::Null),
        PatchField::Set(v) => Some(serde_json::to_value(v).unwrap()),
    }
}

fn arb_volume_patch() -> impl Strategy<Value = VolumePatch> {
    (
        arb_field(10i64..16000),
        arb_field(100i64..48000),
        arb_field("[a-z][a-z0-9-]{0,62}"),
        arb_field(prop::collection::vec("[a-z]{1,8}:[a-z0-9]{1,8}", 0..5)),
    )
        .prop_map(|(capacity, iops, name, user_tags)| VolumePatch {
            capacity,
            iops,
            name,
            user_tags,
            ..Default::default()
        })
}

proptest! {
    /// Each field is absent, null or its value, exactly as set
    #[test]
    fn patch_keeps_field_states_apart(model in arb_volume_patch()) {
        let patch = model.as_patch().unwrap();

        for (key, want) in [
            ("capacity", expected(&model.capacity)),
            ("iops", expected(&model.iops)),
            ("name", expected(&model.name)),
            ("user_tags", expected(&model.user_tags)),
        ] {
            prop_assert_eq!(patch.get(key).cloned(), want);
        }
        prop_assert!(!patch.contains_key("profile"));
    }

    /// An empty list is a value, not a clear
    #[test]
    fn empty_collection_is_not_null(name in "[a-z]{1,10}") {
        let patch = VolumePatch {
            name: PatchField::Set(name.clone()),
            user_tags: PatchField::Set(Vec::new()),
            ..Default::default()
        }
        .as_patch()
        .unwrap();

        prop_assert_eq!(patch.to_value(), json!({"name": name, "user_tags": []}));
    }

    /// The textual payload is valid JSON equal to the document
    #[test]
    fn display_parses_back(model in arb_volume_patch()) {
        let patch = model.as_patch().unwrap();
        let parsed: Value = serde_json::from_str(&patch.to_string()).unwrap();
        prop_assert_eq!(parsed, patch.to_value());
    }

    /// Equal models encode to identical bytes
    #[test]
    fn encoding_is_deterministic(model in arb_volume_patch()) {
        let first = model.as_patch().unwrap().to_string();
        let second = model.clone().as_patch().unwrap().to_string();
        prop_assert_eq!(first, second);
    }

    /// from_option maps None to an explicit clear
    #[test]
    fn from_option_never_unsets(value in prop::option::of(0i64..1000)) {
        let field = PatchField::from_option(value);
        prop_assert!(!field.is_unset());
        prop_assert_eq!(field.is_null(), value.is_none());
        prop_assert_eq!(field.value().copied(), value);
    }

    /// The start cursor is recovered from any next link
    #[test]
    fn next_link_yields_start(
        token in "[A-Za-z0-9_-]{1,40}",
        limit in 1i64..100,
    ) {
        let link = PageLink {
            href: format!(
                "https://us-south.iaas.cloud.ibm.com/v1/vpcs?limit={}&start={}",
                limit, token
            ),
        };
        prop_assert_eq!(link.start(), Some(token));
    }

    /// A link without a start parameter ends the listing
    #[test]
    fn link_without_start_has_no_cursor(limit in 1i64..100) {
        let link = PageLink {
            href: format!("https://us-south.iaas.cloud.ibm.com/v1/vpcs?limit={}", limit),
        };
        prop_assert_eq!(link.start(), None);
    }
}
