//! Shapes shared by every resource family: references, identities,
//! collection links and lifecycle states.

use serde::{Deserialize, Serialize};

/// Link to a page of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub href: String,
}

impl PageLink {
    /// The `start` query parameter of the link, i.e. the continuation cursor
    pub fn start(&self) -> Option<String> {
        let url = url::Url::parse(&self.href)
            .or_else(|_| url::Url::parse("http://localhost/").and_then(|base| base.join(&self.href)))
            .ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "start")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }
}

/// Present on a reference when the referenced resource has been deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub more_info: String,
}

/// Reference to another resource, as embedded in responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub crn: Option<String>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub deleted: Option<Deleted>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Reference to a resource identified by name only (zones, regions, profiles)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameReference {
    pub href: String,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Reference to a reserved IP bound to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedIpReference {
    pub address: String,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub deleted: Option<Deleted>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// An IP address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ip {
    pub address: String,
}

impl Ip {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Reference carrying only a CRN, such as a key protect root key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrnReference {
    pub crn: String,
}

/// Certificate held in a certificate manager instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInstance {
    pub crn: String,
}

impl CertificateInstance {
    pub fn new(crn: impl Into<String>) -> Self {
        Self { crn: crn.into() }
    }
}

/// Identifies a resource in a request by one of its interchangeable keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    ById { id: String },
    ByCrn { crn: String },
    ByHref { href: String },
    ByName { name: String },
}

impl Identity {
    pub fn id(id: impl Into<String>) -> Self {
        Identity::ById { id: id.into() }
    }

    pub fn crn(crn: impl Into<String>) -> Self {
        Identity::ByCrn { crn: crn.into() }
    }

    pub fn href(href: impl Into<String>) -> Self {
        Identity::ByHref { href: href.into() }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Identity::ByName { name: name.into() }
    }
}

impl From<&Reference> for Identity {
    fn from(reference: &Reference) -> Self {
        Identity::id(reference.id.clone())
    }
}

impl From<&NameReference> for Identity {
    fn from(reference: &NameReference) -> Self {
        Identity::name(reference.name.clone())
    }
}

/// One capability of a profile (memory, bandwidth, IOPS, ...)
///
/// `type` is `fixed` (see `value`), `range` (`min`/`max`/`step`/`default`),
/// `enum` (`values`/`default`) or `dependent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileValue {
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

/// Why a resource is in its current status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReason {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub more_info: Option<String>,
}

/// Lifecycle state reported on most resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Deleting,
    Failed,
    Pending,
    Stable,
    Suspended,
    Updating,
    Waiting,
    /// A state this client does not know about yet
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_link_extracts_start() {
        let link = PageLink {
            href: "https://us-south.iaas.cloud.ibm.com/v1/subnets?start=9d5a91a3e2cbd233b5a5b33436855ed&limit=20".into(),
        };
        assert_eq!(link.start().as_deref(), Some("9d5a91a3e2cbd233b5a5b33436855ed"));
    }

    #[test]
    fn page_link_without_start() {
        let link = PageLink {
            href: "https://us-south.iaas.cloud.ibm.com/v1/subnets?limit=20".into(),
        };
        assert_eq!(link.start(), None);
    }

    #[test]
    fn page_link_relative_href() {
        let link = PageLink {
            href: "/v1/vpcs?start=abc%3D%3D&limit=1".into(),
        };
        assert_eq!(link.start().as_deref(), Some("abc=="));
    }

    #[test]
    fn identity_serializes_single_key() {
        assert_eq!(serde_json::to_value(Identity::id("r006-1")).unwrap(), json!({"id": "r006-1"}));
        assert_eq!(serde_json::to_value(Identity::name("us-south-1")).unwrap(), json!({"name": "us-south-1"}));
        assert_eq!(serde_json::to_value(Identity::crn("crn:v1:x")).unwrap(), json!({"crn": "crn:v1:x"}));
    }

    #[test]
    fn unknown_lifecycle_state_decodes() {
        let state: LifecycleState = serde_json::from_value(json!("migrating")).unwrap();
        assert_eq!(state, LifecycleState::Unknown);
        let state: LifecycleState = serde_json::from_value(json!("stable")).unwrap();
        assert_eq!(state, LifecycleState::Stable);
    }

    #[test]
    fn reference_tolerates_missing_optional_fields() {
        let reference: Reference = serde_json::from_value(json!({
            "href": "https://x/v1/vpcs/r006-1",
            "id": "r006-1"
        }))
        .unwrap();
        assert_eq!(reference.id, "r006-1");
        assert!(reference.crn.is_none());
        assert_eq!(Identity::from(&reference), Identity::id("r006-1"));
    }
}
