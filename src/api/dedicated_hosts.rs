//! Dedicated hosts, dedicated host groups, profiles and disks

use super::common::{Identity, LifecycleState, NameReference, PageLink, ProfileValue, Reference};
use super::instances::InstanceVcpu;
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Groups
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostGroup {
    pub class: String,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    #[serde(default)]
    pub dedicated_hosts: Vec<Reference>,
    /// `balanced`, `compute` or `memory`
    pub family: String,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub supported_instance_profiles: Vec<NameReference>,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostGroupCollection {
    pub first: PageLink,
    pub groups: Vec<DedicatedHostGroup>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DedicatedHostGroupPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for DedicatedHostGroupPatch {}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostProfileDisk {
    pub interface_type: ProfileValue,
    pub quantity: ProfileValue,
    pub size: ProfileValue,
    pub supported_instance_interface_types: ProfileValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostProfile {
    pub class: String,
    #[serde(default)]
    pub disks: Vec<DedicatedHostProfileDisk>,
    pub family: String,
    pub href: String,
    pub memory: ProfileValue,
    pub name: String,
    pub socket_count: ProfileValue,
    #[serde(default)]
    pub supported_instance_profiles: Vec<NameReference>,
    pub vcpu_architecture: ProfileValue,
    pub vcpu_count: ProfileValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostProfileCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub profiles: Vec<DedicatedHostProfile>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

// ============================================================================
// Hosts and disks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostDisk {
    /// Remaining space in gigabytes
    pub available: i64,
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub instance_disks: Vec<Reference>,
    pub interface_type: String,
    #[serde(default)]
    pub lifecycle_state: Option<LifecycleState>,
    pub name: String,
    pub provisionable: bool,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub size: i64,
    #[serde(default)]
    pub supported_instance_interface_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostDiskCollection {
    pub disks: Vec<DedicatedHostDisk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DedicatedHostDiskPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for DedicatedHostDiskPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHost {
    /// Memory in gibibytes not yet used by instances
    pub available_memory: i64,
    pub available_vcpu: InstanceVcpu,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    #[serde(default)]
    pub disks: Vec<DedicatedHostDisk>,
    pub group: Reference,
    pub href: String,
    pub id: String,
    pub instance_placement_enabled: bool,
    #[serde(default)]
    pub instances: Vec<Reference>,
    pub lifecycle_state: LifecycleState,
    pub memory: i64,
    pub name: String,
    pub profile: NameReference,
    pub provisionable: bool,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub socket_count: i64,
    /// `available`, `degraded`, `migrating`, `unavailable` or `unknown`
    pub state: String,
    #[serde(default)]
    pub supported_instance_profiles: Vec<NameReference>,
    pub vcpu: InstanceVcpu,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedicatedHostCollection {
    pub dedicated_hosts: Vec<DedicatedHost>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// A group created together with the host
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DedicatedHostGroupPrototypeHostContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

/// Where a new host goes: into an existing group, or into a zone (with a
/// new group)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DedicatedHostPlacement {
    Group {
        group: Identity,
    },
    Zone {
        zone: Identity,
        #[serde(skip_serializing_if = "Option::is_none")]
        group: Option<DedicatedHostGroupPrototypeHostContext>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedicatedHostPrototype {
    pub profile: Identity,
    #[serde(flatten)]
    pub placement: DedicatedHostPlacement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_placement_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl DedicatedHostPrototype {
    pub fn new(profile: Identity, placement: DedicatedHostPlacement) -> Self {
        Self {
            profile,
            placement,
            instance_placement_enabled: None,
            name: None,
            resource_group: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DedicatedHostPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub instance_placement_enabled: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for DedicatedHostPatch {}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListDedicatedHostGroupsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub zone_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDedicatedHostGroupOptions {
    pub class: String,
    pub family: String,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreateDedicatedHostGroupOptions {
    pub fn new(class: impl Into<String>, family: impl Into<String>, zone: Identity) -> Self {
        Self {
            class: class.into(),
            family: family.into(),
            zone,
            name: None,
            resource_group: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DedicatedHostOptions {
    pub id: String,
}

impl DedicatedHostOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteDedicatedHostGroupOptions = DedicatedHostOptions;
pub type GetDedicatedHostGroupOptions = DedicatedHostOptions;
pub type DeleteDedicatedHostOptions = DedicatedHostOptions;
pub type GetDedicatedHostOptions = DedicatedHostOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateDedicatedHostOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateDedicatedHostOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

pub type UpdateDedicatedHostGroupOptions = UpdateDedicatedHostOptions;

#[derive(Debug, Clone, Default)]
pub struct ListDedicatedHostProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct GetDedicatedHostProfileOptions {
    pub name: String,
}

impl GetDedicatedHostProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListDedicatedHostsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub dedicated_host_group_id: Option<String>,
    pub resource_group_id: Option<String>,
    pub zone_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateDedicatedHostOptions {
    pub dedicated_host_prototype: DedicatedHostPrototype,
}

impl CreateDedicatedHostOptions {
    pub fn new(dedicated_host_prototype: DedicatedHostPrototype) -> Self {
        Self {
            dedicated_host_prototype,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListDedicatedHostDisksOptions {
    pub dedicated_host_id: String,
}

impl ListDedicatedHostDisksOptions {
    pub fn new(dedicated_host_id: impl Into<String>) -> Self {
        Self {
            dedicated_host_id: dedicated_host_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetDedicatedHostDiskOptions {
    pub dedicated_host_id: String,
    pub id: String,
}

impl GetDedicatedHostDiskOptions {
    pub fn new(dedicated_host_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            dedicated_host_id: dedicated_host_id.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDedicatedHostDiskOptions {
    pub dedicated_host_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateDedicatedHostDiskOptions {
    pub fn new(dedicated_host_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            dedicated_host_id: dedicated_host_id.into(),
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_dedicated_host_groups(
        &self,
        options: &ListDedicatedHostGroupsOptions,
    ) -> Result<DetailedResponse<DedicatedHostGroupCollection>> {
        let request = ApiRequest::get("/dedicated_host/groups")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("zone.name", options.zone_name.as_deref())
            .query("name", options.name.as_deref());
        self.execute(request).await
    }

    pub async fn create_dedicated_host_group(
        &self,
        options: &CreateDedicatedHostGroupOptions,
    ) -> Result<DetailedResponse<DedicatedHostGroup>> {
        required("class", &options.class)?;
        required("family", &options.family)?;
        let request = ApiRequest::post("/dedicated_host/groups").json(options)?;
        self.execute(request).await
    }

    /// Delete a dedicated host group. It must not contain any hosts.
    pub async fn delete_dedicated_host_group(
        &self,
        options: &DeleteDedicatedHostGroupOptions,
    ) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/dedicated_host/groups/{id}"))).await
    }

    pub async fn get_dedicated_host_group(
        &self,
        options: &GetDedicatedHostGroupOptions,
    ) -> Result<DetailedResponse<DedicatedHostGroup>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/dedicated_host/groups/{id}"))).await
    }

    pub async fn update_dedicated_host_group(
        &self,
        options: &UpdateDedicatedHostGroupOptions,
    ) -> Result<DetailedResponse<DedicatedHostGroup>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/dedicated_host/groups/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_dedicated_host_profiles(
        &self,
        options: &ListDedicatedHostProfilesOptions,
    ) -> Result<DetailedResponse<DedicatedHostProfileCollection>> {
        let request = ApiRequest::get("/dedicated_host/profiles").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn get_dedicated_host_profile(
        &self,
        options: &GetDedicatedHostProfileOptions,
    ) -> Result<DetailedResponse<DedicatedHostProfile>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/dedicated_host/profiles/{name}"))).await
    }

    pub async fn list_dedicated_hosts(
        &self,
        options: &ListDedicatedHostsOptions,
    ) -> Result<DetailedResponse<DedicatedHostCollection>> {
        let request = ApiRequest::get("/dedicated_hosts")
            .query("dedicated_host_group.id", options.dedicated_host_group_id.as_deref())
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("zone.name", options.zone_name.as_deref())
            .query("name", options.name.as_deref());
        self.execute(request).await
    }

    pub async fn create_dedicated_host(
        &self,
        options: &CreateDedicatedHostOptions,
    ) -> Result<DetailedResponse<DedicatedHost>> {
        let request = ApiRequest::post("/dedicated_hosts").json(&options.dedicated_host_prototype)?;
        self.execute(request).await
    }

    /// Delete a dedicated host. Instance placement must be disabled and no
    /// instances may remain on it.
    pub async fn delete_dedicated_host(&self, options: &DeleteDedicatedHostOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/dedicated_hosts/{id}"))).await
    }

    pub async fn get_dedicated_host(&self, options: &GetDedicatedHostOptions) -> Result<DetailedResponse<DedicatedHost>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/dedicated_hosts/{id}"))).await
    }

    pub async fn update_dedicated_host(
        &self,
        options: &UpdateDedicatedHostOptions,
    ) -> Result<DetailedResponse<DedicatedHost>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/dedicated_hosts/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_dedicated_host_disks(
        &self,
        options: &ListDedicatedHostDisksOptions,
    ) -> Result<DetailedResponse<DedicatedHostDiskCollection>> {
        let host_id = path_param("dedicated_host_id", &options.dedicated_host_id)?;
        self.execute(ApiRequest::get(format!("/dedicated_hosts/{host_id}/disks"))).await
    }

    pub async fn get_dedicated_host_disk(
        &self,
        options: &GetDedicatedHostDiskOptions,
    ) -> Result<DetailedResponse<DedicatedHostDisk>> {
        let host_id = path_param("dedicated_host_id", &options.dedicated_host_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/dedicated_hosts/{host_id}/disks/{id}")))
            .await
    }

    pub async fn update_dedicated_host_disk(
        &self,
        options: &UpdateDedicatedHostDiskOptions,
    ) -> Result<DetailedResponse<DedicatedHostDisk>> {
        let host_id = path_param("dedicated_host_id", &options.dedicated_host_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/dedicated_hosts/{host_id}/disks/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListDedicatedHostGroupsOptions,
    DedicatedHostGroupCollection,
    groups: DedicatedHostGroup,
    list_dedicated_host_groups
);
paged_list!(
    ListDedicatedHostProfilesOptions,
    DedicatedHostProfileCollection,
    profiles: DedicatedHostProfile,
    list_dedicated_host_profiles
);
paged_list!(
    ListDedicatedHostsOptions,
    DedicatedHostCollection,
    dedicated_hosts: DedicatedHost,
    list_dedicated_hosts
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn host_in_existing_group() {
        let prototype = DedicatedHostPrototype {
            name: Some("my-host".to_string()),
            ..DedicatedHostPrototype::new(
                Identity::name("mx2-host-152x1216"),
                DedicatedHostPlacement::Group {
                    group: Identity::id("dhg-1"),
                },
            )
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "profile": {"name": "mx2-host-152x1216"},
                "group": {"id": "dhg-1"},
                "name": "my-host"
            })
        );
    }

    #[test]
    fn host_in_zone_with_new_group() {
        let prototype = DedicatedHostPrototype::new(
            Identity::name("mx2-host-152x1216"),
            DedicatedHostPlacement::Zone {
                zone: Identity::name("us-south-1"),
                group: Some(DedicatedHostGroupPrototypeHostContext {
                    name: Some("new-group".to_string()),
                    resource_group: None,
                }),
            },
        );
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "profile": {"name": "mx2-host-152x1216"},
                "zone": {"name": "us-south-1"},
                "group": {"name": "new-group"}
            })
        );
    }

    #[test]
    fn disk_decodes_without_lifecycle_state() {
        let disk: DedicatedHostDisk = serde_json::from_value(json!({
            "available": 800,
            "created_at": "2024-05-01T10:00:00Z",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/dedicated_hosts/dh-1/disks/d-1",
            "id": "d-1",
            "instance_disks": [],
            "interface_type": "nvme",
            "name": "disk-1",
            "provisionable": true,
            "resource_type": "dedicated_host_disk",
            "size": 4000,
            "supported_instance_interface_types": ["nvme", "virtio_blk"]
        }))
        .unwrap();
        assert!(disk.lifecycle_state.is_none());
        assert_eq!(disk.supported_instance_interface_types.len(), 2);
    }
}
