//! Virtual server instances and their profiles, disks, network interfaces
//! and volume attachments

use super::common::{
    Identity, LifecycleState, NameReference, PageLink, ProfileValue, Reference, ReservedIpReference,
    StatusReason,
};
use super::floating_ips::{FloatingIp, FloatingIpReference};
use super::volumes::VolumePrototypeInstanceContext;
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Profiles
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceProfile {
    #[serde(default)]
    pub bandwidth: Option<ProfileValue>,
    #[serde(default)]
    pub family: Option<String>,
    pub href: String,
    #[serde(default)]
    pub memory: Option<ProfileValue>,
    pub name: String,
    #[serde(default)]
    pub os_architecture: Option<ProfileValue>,
    #[serde(default)]
    pub port_speed: Option<ProfileValue>,
    #[serde(default)]
    pub vcpu_architecture: Option<ProfileValue>,
    #[serde(default)]
    pub vcpu_count: Option<ProfileValue>,
}

/// Instance profiles are never paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceProfileCollection {
    pub profiles: Vec<InstanceProfile>,
}

// =============================================================================
// Instances
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceVcpu {
    pub architecture: String,
    pub count: i64,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfaceReference {
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub primary_ip: Option<ReservedIpReference>,
    #[serde(default)]
    pub subnet: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAttachmentReference {
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub volume: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub bandwidth: i64,
    #[serde(default)]
    pub boot_volume_attachment: Option<VolumeAttachmentReference>,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    #[serde(default)]
    pub dedicated_host: Option<Reference>,
    #[serde(default)]
    pub disks: Vec<InstanceDisk>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub image: Option<Reference>,
    #[serde(default)]
    pub lifecycle_state: Option<LifecycleState>,
    pub memory: i64,
    pub name: String,
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterfaceReference>,
    #[serde(default)]
    pub placement_target: Option<Reference>,
    #[serde(default)]
    pub primary_network_interface: Option<NetworkInterfaceReference>,
    pub profile: NameReference,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub startable: bool,
    /// `deleting`, `failed`, `pending`, `restarting`, `running`, `starting`, `stopped`, `stopping`
    pub status: String,
    #[serde(default)]
    pub status_reasons: Vec<StatusReason>,
    #[serde(default)]
    pub total_network_bandwidth: Option<i64>,
    #[serde(default)]
    pub total_volume_bandwidth: Option<i64>,
    pub vcpu: InstanceVcpu,
    #[serde(default)]
    pub volume_attachments: Vec<VolumeAttachmentReference>,
    pub vpc: Reference,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceCollection {
    pub first: PageLink,
    pub instances: Vec<Instance>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Volume of a volume attachment in a request: a volume to create along
/// with the instance, or an existing one
///
/// A new volume always names its `profile`, which is how the two are told
/// apart when a template echoes the attachment back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolumeAttachmentVolume {
    New(VolumePrototypeInstanceContext),
    Existing(Identity),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttachmentPrototype {
    pub volume: VolumeAttachmentVolume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_volume_on_instance_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VolumeAttachmentPrototype {
    pub fn new(volume: VolumeAttachmentVolume) -> Self {
        Self {
            volume,
            delete_volume_on_instance_delete: None,
            name: None,
        }
    }
}

/// Primary IP of a new network interface: an existing reserved IP, or the
/// address to reserve
///
/// Decoding tries `Existing` first, so an echoed prototype that carries only
/// a `name` reads back as a reference by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkInterfaceIpPrototype {
    Existing(Identity),
    New {
        #[serde(skip_serializing_if = "Option::is_none")]
        address: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        auto_delete: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterfacePrototype {
    pub subnet: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_ip_spoofing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<NetworkInterfaceIpPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl NetworkInterfacePrototype {
    pub fn new(subnet: Identity) -> Self {
        Self {
            subnet,
            allow_ip_spoofing: None,
            name: None,
            primary_ip: None,
            security_groups: None,
        }
    }
}

/// Instance creation request
///
/// An instance is created from an `image`, an existing boot volume
/// (`boot_volume_attachment` with an existing volume) or a `source_template`.
/// `vpc` and `zone` are required unless they come from the template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstancePrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_volume_attachment: Option<VolumeAttachmentPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedicated_host: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_interfaces: Option<Vec<NetworkInterfacePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_target: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_network_interface: Option<NetworkInterfacePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_template: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_volume_bandwidth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_attachments: Option<Vec<VolumeAttachmentPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Identity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstancePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub placement_target: PatchField<Identity>,
    /// The instance must be stopped to change its profile
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub profile: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub total_volume_bandwidth: PatchField<i64>,
}

impl AsPatch for InstancePatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInitializationPassword {
    /// Base64 encoded, encrypted with the public key in `encryption_key`
    pub encrypted_password: String,
    pub encryption_key: Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInitialization {
    #[serde(default)]
    pub keys: Vec<Reference>,
    #[serde(default)]
    pub password: Option<InstanceInitializationPassword>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceAction {
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub force: bool,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    pub status: String,
    #[serde(rename = "type")]
    pub action_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConsoleAccessToken {
    pub access_token: String,
    /// `serial` or `vnc`
    pub console_type: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub force: bool,
    pub href: String,
}

// =============================================================================
// Disks, network interfaces, volume attachments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDisk {
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    /// `nvme` or `virtio_blk`
    pub interface_type: String,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Size in GB
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDiskCollection {
    pub disks: Vec<InstanceDisk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceDiskPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for InstanceDiskPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub allow_ip_spoofing: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub floating_ips: Vec<FloatingIpReference>,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub port_speed: Option<i64>,
    pub primary_ip: ReservedIpReference,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<Reference>,
    pub status: String,
    pub subnet: Reference,
    /// `primary` or `secondary`
    #[serde(rename = "type")]
    pub interface_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterfaceUnpaginatedCollection {
    pub network_interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkInterfacePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub allow_ip_spoofing: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for NetworkInterfacePatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpUnpaginatedCollection {
    pub floating_ips: Vec<FloatingIp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAttachmentDevice {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttachment {
    #[serde(default)]
    pub bandwidth: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub delete_volume_on_instance_delete: bool,
    #[serde(default)]
    pub device: Option<VolumeAttachmentDevice>,
    pub href: String,
    pub id: String,
    pub name: String,
    /// `attached`, `attaching`, `deleting` or `detaching`
    pub status: String,
    /// `boot` or `data`
    #[serde(rename = "type")]
    pub attachment_type: String,
    #[serde(default)]
    pub volume: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttachmentCollection {
    pub volume_attachments: Vec<VolumeAttachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumeAttachmentPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub delete_volume_on_instance_delete: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for VolumeAttachmentPatch {}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListInstanceProfilesOptions {}

#[derive(Debug, Clone, Default)]
pub struct GetInstanceProfileOptions {
    pub name: String,
}

impl GetInstanceProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListInstancesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_crn: Option<String>,
    pub vpc_name: Option<String>,
    pub dedicated_host_id: Option<String>,
    pub placement_group_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateInstanceOptions {
    pub instance_prototype: InstancePrototype,
}

impl CreateInstanceOptions {
    pub fn new(instance_prototype: InstancePrototype) -> Self {
        Self { instance_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstanceOptions {
    pub id: String,
}

impl InstanceOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteInstanceOptions = InstanceOptions;
pub type GetInstanceOptions = InstanceOptions;
pub type GetInstanceInitializationOptions = InstanceOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateInstanceOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateInstanceOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateInstanceActionOptions {
    #[serde(skip)]
    pub instance_id: String,
    /// `reboot`, `start` or `stop`
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl CreateInstanceActionOptions {
    pub fn new(instance_id: impl Into<String>, action_type: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            action_type: action_type.into(),
            force: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateInstanceConsoleAccessTokenOptions {
    #[serde(skip)]
    pub instance_id: String,
    pub console_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl CreateInstanceConsoleAccessTokenOptions {
    pub fn new(instance_id: impl Into<String>, console_type: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            console_type: console_type.into(),
            force: None,
        }
    }
}

/// Options addressing the sub-collections of one instance
#[derive(Debug, Clone, Default)]
pub struct InstanceChildListOptions {
    pub instance_id: String,
}

impl InstanceChildListOptions {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
        }
    }
}

pub type ListInstanceDisksOptions = InstanceChildListOptions;
pub type ListInstanceNetworkInterfacesOptions = InstanceChildListOptions;
pub type ListInstanceVolumeAttachmentsOptions = InstanceChildListOptions;

/// Options addressing one disk, network interface or volume attachment
#[derive(Debug, Clone, Default)]
pub struct InstanceChildOptions {
    pub instance_id: String,
    pub id: String,
}

impl InstanceChildOptions {
    pub fn new(instance_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            id: id.into(),
        }
    }
}

pub type GetInstanceDiskOptions = InstanceChildOptions;
pub type DeleteInstanceNetworkInterfaceOptions = InstanceChildOptions;
pub type GetInstanceNetworkInterfaceOptions = InstanceChildOptions;
pub type DeleteInstanceVolumeAttachmentOptions = InstanceChildOptions;
pub type GetInstanceVolumeAttachmentOptions = InstanceChildOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateInstanceChildOptions {
    pub instance_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateInstanceChildOptions {
    pub fn new(instance_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            instance_id: instance_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateInstanceDiskOptions = UpdateInstanceChildOptions;
pub type UpdateInstanceNetworkInterfaceOptions = UpdateInstanceChildOptions;
pub type UpdateInstanceVolumeAttachmentOptions = UpdateInstanceChildOptions;

#[derive(Debug, Clone)]
pub struct CreateInstanceNetworkInterfaceOptions {
    pub instance_id: String,
    pub network_interface: NetworkInterfacePrototype,
}

impl CreateInstanceNetworkInterfaceOptions {
    pub fn new(instance_id: impl Into<String>, network_interface: NetworkInterfacePrototype) -> Self {
        Self {
            instance_id: instance_id.into(),
            network_interface,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListInstanceNetworkInterfaceFloatingIpsOptions {
    pub instance_id: String,
    pub network_interface_id: String,
}

impl ListInstanceNetworkInterfaceFloatingIpsOptions {
    pub fn new(instance_id: impl Into<String>, network_interface_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            network_interface_id: network_interface_id.into(),
        }
    }
}

/// Options addressing one floating IP of an instance network interface
#[derive(Debug, Clone, Default)]
pub struct InstanceNetworkInterfaceFloatingIpOptions {
    pub instance_id: String,
    pub network_interface_id: String,
    pub id: String,
}

impl InstanceNetworkInterfaceFloatingIpOptions {
    pub fn new(
        instance_id: impl Into<String>,
        network_interface_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            network_interface_id: network_interface_id.into(),
            id: id.into(),
        }
    }
}

pub type AddInstanceNetworkInterfaceFloatingIpOptions = InstanceNetworkInterfaceFloatingIpOptions;
pub type RemoveInstanceNetworkInterfaceFloatingIpOptions = InstanceNetworkInterfaceFloatingIpOptions;
pub type GetInstanceNetworkInterfaceFloatingIpOptions = InstanceNetworkInterfaceFloatingIpOptions;

#[derive(Debug, Clone)]
pub struct CreateInstanceVolumeAttachmentOptions {
    pub instance_id: String,
    /// The volume must be an existing one
    pub volume: Identity,
    pub delete_volume_on_instance_delete: Option<bool>,
    pub name: Option<String>,
}

impl CreateInstanceVolumeAttachmentOptions {
    pub fn new(instance_id: impl Into<String>, volume: Identity) -> Self {
        Self {
            instance_id: instance_id.into(),
            volume,
            delete_volume_on_instance_delete: None,
            name: None,
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

impl VpcService {
    pub async fn list_instance_profiles(
        &self,
        _options: &ListInstanceProfilesOptions,
    ) -> Result<DetailedResponse<InstanceProfileCollection>> {
        self.execute(ApiRequest::get("/instance/profiles")).await
    }

    pub async fn get_instance_profile(
        &self,
        options: &GetInstanceProfileOptions,
    ) -> Result<DetailedResponse<InstanceProfile>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/instance/profiles/{name}"))).await
    }

    pub async fn list_instances(&self, options: &ListInstancesOptions) -> Result<DetailedResponse<InstanceCollection>> {
        let request = ApiRequest::get("/instances")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("name", options.name.as_deref())
            .query("vpc.id", options.vpc_id.as_deref())
            .query("vpc.crn", options.vpc_crn.as_deref())
            .query("vpc.name", options.vpc_name.as_deref())
            .query("dedicated_host.id", options.dedicated_host_id.as_deref())
            .query("placement_group.id", options.placement_group_id.as_deref());
        self.execute(request).await
    }

    /// Provision an instance
    pub async fn create_instance(&self, options: &CreateInstanceOptions) -> Result<DetailedResponse<Instance>> {
        let request = ApiRequest::post("/instances").json(&options.instance_prototype)?;
        self.execute(request).await
    }

    pub async fn delete_instance(&self, options: &DeleteInstanceOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/instances/{id}"))).await
    }

    pub async fn get_instance(&self, options: &GetInstanceOptions) -> Result<DetailedResponse<Instance>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instances/{id}"))).await
    }

    pub async fn update_instance(&self, options: &UpdateInstanceOptions) -> Result<DetailedResponse<Instance>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/instances/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    /// Retrieve the keys and (encrypted) password the instance was initialized with
    pub async fn get_instance_initialization(
        &self,
        options: &GetInstanceInitializationOptions,
    ) -> Result<DetailedResponse<InstanceInitialization>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instances/{id}/initialization"))).await
    }

    /// Request a start, stop or reboot
    pub async fn create_instance_action(
        &self,
        options: &CreateInstanceActionOptions,
    ) -> Result<DetailedResponse<InstanceAction>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        required("type", &options.action_type)?;
        let request = ApiRequest::post(format!("/instances/{instance_id}/actions")).json(options)?;
        self.execute(request).await
    }

    pub async fn create_instance_console_access_token(
        &self,
        options: &CreateInstanceConsoleAccessTokenOptions,
    ) -> Result<DetailedResponse<InstanceConsoleAccessToken>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        required("console_type", &options.console_type)?;
        let request =
            ApiRequest::post(format!("/instances/{instance_id}/console_access_token")).json(options)?;
        self.execute(request).await
    }

    pub async fn list_instance_disks(
        &self,
        options: &ListInstanceDisksOptions,
    ) -> Result<DetailedResponse<InstanceDiskCollection>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        self.execute(ApiRequest::get(format!("/instances/{instance_id}/disks"))).await
    }

    pub async fn get_instance_disk(&self, options: &GetInstanceDiskOptions) -> Result<DetailedResponse<InstanceDisk>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instances/{instance_id}/disks/{id}"))).await
    }

    pub async fn update_instance_disk(
        &self,
        options: &UpdateInstanceDiskOptions,
    ) -> Result<DetailedResponse<InstanceDisk>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/instances/{instance_id}/disks/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Network interfaces
    // -------------------------------------------------------------------------

    pub async fn list_instance_network_interfaces(
        &self,
        options: &ListInstanceNetworkInterfacesOptions,
    ) -> Result<DetailedResponse<NetworkInterfaceUnpaginatedCollection>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        self.execute(ApiRequest::get(format!("/instances/{instance_id}/network_interfaces")))
            .await
    }

    /// Add a secondary network interface. The instance must be stopped.
    pub async fn create_instance_network_interface(
        &self,
        options: &CreateInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<NetworkInterface>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let request = ApiRequest::post(format!("/instances/{instance_id}/network_interfaces"))
            .json(&options.network_interface)?;
        self.execute(request).await
    }

    pub async fn delete_instance_network_interface(
        &self,
        options: &DeleteInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<()>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/instances/{instance_id}/network_interfaces/{id}"));
        self.execute_empty(request).await
    }

    pub async fn get_instance_network_interface(
        &self,
        options: &GetInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<NetworkInterface>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instances/{instance_id}/network_interfaces/{id}")))
            .await
    }

    pub async fn update_instance_network_interface(
        &self,
        options: &UpdateInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<NetworkInterface>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/instances/{instance_id}/network_interfaces/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_instance_network_interface_floating_ips(
        &self,
        options: &ListInstanceNetworkInterfaceFloatingIpsOptions,
    ) -> Result<DetailedResponse<FloatingIpUnpaginatedCollection>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let request = ApiRequest::get(format!(
            "/instances/{instance_id}/network_interfaces/{nic_id}/floating_ips"
        ));
        self.execute(request).await
    }

    /// Disassociate a floating IP from the network interface
    pub async fn remove_instance_network_interface_floating_ip(
        &self,
        options: &RemoveInstanceNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!(
            "/instances/{instance_id}/network_interfaces/{nic_id}/floating_ips/{id}"
        ));
        self.execute_empty(request).await
    }

    pub async fn get_instance_network_interface_floating_ip(
        &self,
        options: &GetInstanceNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!(
            "/instances/{instance_id}/network_interfaces/{nic_id}/floating_ips/{id}"
        ));
        self.execute(request).await
    }

    /// Associate a floating IP with the network interface
    pub async fn add_instance_network_interface_floating_ip(
        &self,
        options: &AddInstanceNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::put(format!(
            "/instances/{instance_id}/network_interfaces/{nic_id}/floating_ips/{id}"
        ));
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Volume attachments
    // -------------------------------------------------------------------------

    pub async fn list_instance_volume_attachments(
        &self,
        options: &ListInstanceVolumeAttachmentsOptions,
    ) -> Result<DetailedResponse<VolumeAttachmentCollection>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        self.execute(ApiRequest::get(format!("/instances/{instance_id}/volume_attachments")))
            .await
    }

    /// Attach an existing volume to the instance
    pub async fn create_instance_volume_attachment(
        &self,
        options: &CreateInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<VolumeAttachment>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let body = VolumeAttachmentPrototype {
            volume: VolumeAttachmentVolume::Existing(options.volume.clone()),
            delete_volume_on_instance_delete: options.delete_volume_on_instance_delete,
            name: options.name.clone(),
        };
        let request = ApiRequest::post(format!("/instances/{instance_id}/volume_attachments")).json(&body)?;
        self.execute(request).await
    }

    /// Detach a volume; the volume itself is not deleted
    pub async fn delete_instance_volume_attachment(
        &self,
        options: &DeleteInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<()>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/instances/{instance_id}/volume_attachments/{id}"));
        self.execute_empty(request).await
    }

    pub async fn get_instance_volume_attachment(
        &self,
        options: &GetInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<VolumeAttachment>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instances/{instance_id}/volume_attachments/{id}")))
            .await
    }

    pub async fn update_instance_volume_attachment(
        &self,
        options: &UpdateInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<VolumeAttachment>> {
        let instance_id = path_param("instance_id", &options.instance_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/instances/{instance_id}/volume_attachments/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(ListInstancesOptions, InstanceCollection, instances: Instance, list_instances);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instance_prototype_by_image() {
        let prototype = InstancePrototype {
            name: Some("my-instance".into()),
            image: Some(Identity::id("r006-image")),
            keys: Some(vec![Identity::id("r006-key")]),
            profile: Some(Identity::name("bx2-2x8")),
            primary_network_interface: Some(NetworkInterfacePrototype::new(Identity::id("r006-subnet"))),
            vpc: Some(Identity::id("r006-vpc")),
            zone: Some(Identity::name("us-south-1")),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "image": {"id": "r006-image"},
                "keys": [{"id": "r006-key"}],
                "name": "my-instance",
                "primary_network_interface": {"subnet": {"id": "r006-subnet"}},
                "profile": {"name": "bx2-2x8"},
                "vpc": {"id": "r006-vpc"},
                "zone": {"name": "us-south-1"}
            })
        );
    }

    #[test]
    fn action_body_carries_type_only() {
        let options = CreateInstanceActionOptions::new("r006-instance", "stop");
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({"type": "stop"}));
    }

    #[test]
    fn primary_ip_prototype_forms() {
        let existing = NetworkInterfaceIpPrototype::Existing(Identity::id("r006-ip"));
        assert_eq!(serde_json::to_value(&existing).unwrap(), json!({"id": "r006-ip"}));

        let new = NetworkInterfaceIpPrototype::New {
            address: Some("10.0.0.5".into()),
            auto_delete: Some(false),
            name: None,
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            json!({"address": "10.0.0.5", "auto_delete": false})
        );
    }

    #[test]
    fn instance_patch_profile_change() {
        let patch = InstancePatch {
            profile: PatchField::Set(Identity::name("bx2-4x16")),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"profile": {"name": "bx2-4x16"}}));
    }
}
