//! Virtual network interfaces

use super::common::{LifecycleState, NameReference, PageLink, Reference, ReservedIpReference};
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualNetworkInterface {
    pub allow_ip_spoofing: bool,
    pub auto_delete: bool,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub enable_infrastructure_nat: bool,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub ips: Vec<ReservedIpReference>,
    pub lifecycle_state: LifecycleState,
    #[serde(default)]
    pub mac_address: Option<String>,
    pub name: String,
    pub primary_ip: ReservedIpReference,
    /// `auto`, `disabled` or `enabled`
    #[serde(default)]
    pub protocol_state_filtering_mode: Option<String>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<Reference>,
    pub subnet: Reference,
    /// The share mount target, bare metal network attachment or instance
    /// network attachment using this interface
    #[serde(default)]
    pub target: Option<Reference>,
    pub vpc: Reference,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualNetworkInterfaceCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
    pub virtual_network_interfaces: Vec<VirtualNetworkInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VirtualNetworkInterfacePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub allow_ip_spoofing: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub auto_delete: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub enable_infrastructure_nat: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub protocol_state_filtering_mode: PatchField<String>,
}

impl AsPatch for VirtualNetworkInterfacePatch {}

#[derive(Debug, Clone, Default)]
pub struct ListVirtualNetworkInterfacesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetVirtualNetworkInterfaceOptions {
    pub id: String,
}

impl GetVirtualNetworkInterfaceOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVirtualNetworkInterfaceOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateVirtualNetworkInterfaceOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl VpcService {
    pub async fn list_virtual_network_interfaces(
        &self,
        options: &ListVirtualNetworkInterfacesOptions,
    ) -> Result<DetailedResponse<VirtualNetworkInterfaceCollection>> {
        let request = ApiRequest::get("/virtual_network_interfaces")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref());
        self.execute(request).await
    }

    pub async fn get_virtual_network_interface(
        &self,
        options: &GetVirtualNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<VirtualNetworkInterface>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/virtual_network_interfaces/{id}"))).await
    }

    pub async fn update_virtual_network_interface(
        &self,
        options: &UpdateVirtualNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<VirtualNetworkInterface>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/virtual_network_interfaces/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListVirtualNetworkInterfacesOptions,
    VirtualNetworkInterfaceCollection,
    virtual_network_interfaces: VirtualNetworkInterface,
    list_virtual_network_interfaces
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_unattached_interface() {
        let vni: VirtualNetworkInterface = serde_json::from_value(json!({
            "allow_ip_spoofing": false,
            "auto_delete": false,
            "created_at": "2024-05-01T10:00:00Z",
            "crn": "crn:v1:bluemix:public:is:us-south-1:a/123::virtual-network-interface:vni-1",
            "enable_infrastructure_nat": true,
            "href": "https://us-south.iaas.cloud.ibm.com/v1/virtual_network_interfaces/vni-1",
            "id": "vni-1",
            "ips": [],
            "lifecycle_state": "stable",
            "name": "my-vni",
            "primary_ip": {
                "address": "10.240.0.6",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/subnets/s-1/reserved_ips/r-1",
                "id": "r-1",
                "name": "my-reserved-ip"
            },
            "resource_type": "virtual_network_interface",
            "security_groups": [],
            "subnet": {"href": "https://us-south.iaas.cloud.ibm.com/v1/subnets/s-1", "id": "s-1"},
            "vpc": {"href": "https://us-south.iaas.cloud.ibm.com/v1/vpcs/vpc-1", "id": "vpc-1"},
            "zone": {"href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south/zones/us-south-1", "name": "us-south-1"}
        }))
        .unwrap();
        assert!(vni.target.is_none());
        assert_eq!(vni.lifecycle_state, LifecycleState::Stable);
    }

    #[test]
    fn patch_toggles_spoofing() {
        let patch = VirtualNetworkInterfacePatch {
            allow_ip_spoofing: PatchField::Set(true),
            name: "my-vni-updated".into(),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"allow_ip_spoofing": true, "name": "my-vni-updated"}));
    }
}
