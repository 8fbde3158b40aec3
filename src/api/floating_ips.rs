//! Floating IPs

use super::common::{Deleted, Identity, NameReference, PageLink, Reference};
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIp {
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    /// `available`, `deleting`, `failed` or `pending`
    pub status: String,
    /// Network interface or public gateway the IP is bound to
    #[serde(default)]
    pub target: Option<Reference>,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingIpReference {
    pub address: String,
    pub crn: String,
    #[serde(default)]
    pub deleted: Option<Deleted>,
    pub href: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpCollection {
    pub first: PageLink,
    pub floating_ips: Vec<FloatingIp>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Where a new floating IP is placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FloatingIpPlacement {
    /// Unbound, in a zone
    Zone { zone: Identity },
    /// Bound to a network interface at creation
    Target { target: Identity },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloatingIpPrototype {
    #[serde(flatten)]
    pub placement: FloatingIpPlacement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl FloatingIpPrototype {
    pub fn new(placement: FloatingIpPlacement) -> Self {
        Self {
            placement,
            name: None,
            resource_group: None,
        }
    }
}

/// Setting `target` to [`PatchField::Null`] unbinds the IP
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FloatingIpPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub target: PatchField<Identity>,
}

impl AsPatch for FloatingIpPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListFloatingIpsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateFloatingIpOptions {
    pub floating_ip_prototype: FloatingIpPrototype,
}

impl CreateFloatingIpOptions {
    pub fn new(floating_ip_prototype: FloatingIpPrototype) -> Self {
        Self { floating_ip_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FloatingIpOptions {
    pub id: String,
}

impl FloatingIpOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteFloatingIpOptions = FloatingIpOptions;
pub type GetFloatingIpOptions = FloatingIpOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateFloatingIpOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateFloatingIpOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl VpcService {
    pub async fn list_floating_ips(
        &self,
        options: &ListFloatingIpsOptions,
    ) -> Result<DetailedResponse<FloatingIpCollection>> {
        let request = ApiRequest::get("/floating_ips")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    /// Reserve a floating IP in a zone or bound to a network interface
    pub async fn create_floating_ip(&self, options: &CreateFloatingIpOptions) -> Result<DetailedResponse<FloatingIp>> {
        let request = ApiRequest::post("/floating_ips").json(&options.floating_ip_prototype)?;
        self.execute(request).await
    }

    pub async fn delete_floating_ip(&self, options: &DeleteFloatingIpOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/floating_ips/{id}"))).await
    }

    pub async fn get_floating_ip(&self, options: &GetFloatingIpOptions) -> Result<DetailedResponse<FloatingIp>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/floating_ips/{id}"))).await
    }

    pub async fn update_floating_ip(&self, options: &UpdateFloatingIpOptions) -> Result<DetailedResponse<FloatingIp>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/floating_ips/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListFloatingIpsOptions,
    FloatingIpCollection,
    floating_ips: FloatingIp,
    list_floating_ips
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prototype_in_zone() {
        let prototype = FloatingIpPrototype {
            name: Some("my-floating-ip".into()),
            ..FloatingIpPrototype::new(FloatingIpPlacement::Zone {
                zone: Identity::name("us-south-1"),
            })
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({"zone": {"name": "us-south-1"}, "name": "my-floating-ip"})
        );
    }

    #[test]
    fn patch_null_target_unbinds() {
        let patch = FloatingIpPatch {
            target: PatchField::Null,
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"target": null}));
    }
}
