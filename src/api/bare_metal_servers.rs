//! Bare metal servers: profiles, servers, their disks, network interfaces
//! and the floating IPs bound to those interfaces

use super::common::{Identity, NameReference, PageLink, ProfileValue, Reference, ReservedIpReference, StatusReason};
use super::floating_ips::{FloatingIp, FloatingIpReference};
use super::instances::{FloatingIpUnpaginatedCollection, InstanceConsoleAccessToken, NetworkInterfaceIpPrototype};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::{Error, Result};
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Profiles
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerProfileDiskInterfaces {
    pub default: String,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerProfileDisk {
    pub quantity: ProfileValue,
    pub size: ProfileValue,
    pub supported_interface_types: BareMetalServerProfileDiskInterfaces,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerProfile {
    pub bandwidth: ProfileValue,
    pub cpu_architecture: ProfileValue,
    pub cpu_core_count: ProfileValue,
    pub cpu_socket_count: ProfileValue,
    #[serde(default)]
    pub disks: Vec<BareMetalServerProfileDisk>,
    pub family: String,
    pub href: String,
    pub memory: ProfileValue,
    pub name: String,
    pub os_architecture: ProfileValue,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerProfileCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub profiles: Vec<BareMetalServerProfile>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

// =============================================================================
// Servers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerCpu {
    pub architecture: String,
    pub core_count: i64,
    pub socket_count: i64,
    pub threads_per_core: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerTrustedPlatformModule {
    pub enabled: bool,
    /// `disabled` or `tpm_2`
    pub mode: String,
    #[serde(default)]
    pub supported_modes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerTrustedPlatformModulePrototype {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerNetworkInterfaceReference {
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub primary_ip: Option<ReservedIpReference>,
    #[serde(default)]
    pub subnet: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServer {
    /// Total bandwidth in megabits per second
    pub bandwidth: i64,
    pub boot_target: Reference,
    pub cpu: BareMetalServerCpu,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    #[serde(default)]
    pub disks: Vec<BareMetalServerDisk>,
    #[serde(default)]
    pub enable_secure_boot: bool,
    pub href: String,
    pub id: String,
    /// Memory in GiB
    pub memory: i64,
    pub name: String,
    #[serde(default)]
    pub network_interfaces: Vec<BareMetalServerNetworkInterfaceReference>,
    pub primary_network_interface: BareMetalServerNetworkInterfaceReference,
    pub profile: NameReference,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// `deleting`, `failed`, `maintenance`, `pending`, `restarting`,
    /// `running`, `starting`, `stopped` or `stopping`
    pub status: String,
    #[serde(default)]
    pub status_reasons: Vec<StatusReason>,
    #[serde(default)]
    pub trusted_platform_module: Option<BareMetalServerTrustedPlatformModule>,
    pub vpc: Reference,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerCollection {
    pub bare_metal_servers: Vec<BareMetalServer>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BareMetalServerInitializationPrototype {
    pub image: Identity,
    pub keys: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

impl BareMetalServerInitializationPrototype {
    pub fn new(image: Identity, keys: Vec<Identity>) -> Self {
        Self {
            image,
            keys,
            user_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBareMetalServerOptions {
    pub initialization: BareMetalServerInitializationPrototype,
    pub primary_network_interface: BareMetalServerNetworkInterfacePrototype,
    pub profile: Identity,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_secure_boot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub network_interfaces: Vec<BareMetalServerNetworkInterfacePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_platform_module: Option<BareMetalServerTrustedPlatformModulePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<Identity>,
}

impl CreateBareMetalServerOptions {
    pub fn new(
        initialization: BareMetalServerInitializationPrototype,
        primary_network_interface: BareMetalServerNetworkInterfacePrototype,
        profile: Identity,
        zone: Identity,
    ) -> Self {
        Self {
            initialization,
            primary_network_interface,
            profile,
            zone,
            enable_secure_boot: None,
            name: None,
            network_interfaces: Vec::new(),
            resource_group: None,
            trusted_platform_module: None,
            vpc: None,
        }
    }
}

/// Secure boot and TPM changes only apply after the server is restarted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BareMetalServerPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub enable_secure_boot: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub trusted_platform_module: PatchField<BareMetalServerTrustedPlatformModulePrototype>,
}

impl AsPatch for BareMetalServerPatch {}

pub type BareMetalServerConsoleAccessToken = InstanceConsoleAccessToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerInitializationUserAccount {
    /// Base64 encoded, encrypted with the public key in `encryption_key`
    pub encrypted_password: String,
    pub encryption_key: Reference,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerInitialization {
    pub image: Reference,
    #[serde(default)]
    pub keys: Vec<Reference>,
    #[serde(default)]
    pub user_accounts: Vec<BareMetalServerInitializationUserAccount>,
}

// =============================================================================
// Disks
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerDisk {
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    /// `fcp`, `nvme` or `sata`
    pub interface_type: String,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Size in GB
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerDiskCollection {
    pub disks: Vec<BareMetalServerDisk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BareMetalServerDiskPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for BareMetalServerDiskPatch {}

// =============================================================================
// Network interfaces
// =============================================================================

/// Type-specific part of a bare metal network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "interface_type", rename_all = "lowercase")]
pub enum BareMetalServerNetworkInterfaceType {
    /// Physical interface; VLAN interfaces may only use the listed VLAN IDs
    Pci {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        allowed_vlans: Vec<i64>,
    },
    /// Virtual interface on a PCI interface allowing this `vlan`
    Vlan {
        vlan: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allow_interface_to_float: Option<bool>,
    },
    Hipersocket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerNetworkInterface {
    pub allow_ip_spoofing: bool,
    pub created_at: DateTime<Utc>,
    pub enable_infrastructure_nat: bool,
    #[serde(default)]
    pub floating_ips: Vec<FloatingIpReference>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub mac_address: Option<String>,
    pub name: String,
    #[serde(default)]
    pub port_speed: Option<i64>,
    pub primary_ip: ReservedIpReference,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<Reference>,
    /// `available`, `deleting`, `failed` or `pending`
    pub status: String,
    pub subnet: Reference,
    /// `primary` or `secondary`
    #[serde(rename = "type")]
    pub role: String,
    #[serde(flatten)]
    pub interface_type: BareMetalServerNetworkInterfaceType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerNetworkInterfaceCollection {
    pub first: PageLink,
    pub limit: i64,
    pub network_interfaces: Vec<BareMetalServerNetworkInterface>,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BareMetalServerNetworkInterfacePrototype {
    pub subnet: Identity,
    #[serde(flatten)]
    pub interface_type: BareMetalServerNetworkInterfaceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_ip_spoofing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_infrastructure_nat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<NetworkInterfaceIpPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl BareMetalServerNetworkInterfacePrototype {
    pub fn new(subnet: Identity, interface_type: BareMetalServerNetworkInterfaceType) -> Self {
        Self {
            subnet,
            interface_type,
            allow_ip_spoofing: None,
            enable_infrastructure_nat: None,
            name: None,
            primary_ip: None,
            security_groups: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BareMetalServerNetworkInterfacePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub allow_interface_to_float: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub allow_ip_spoofing: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub allowed_vlans: PatchField<Vec<i64>>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub enable_infrastructure_nat: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for BareMetalServerNetworkInterfacePatch {}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListBareMetalServerProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct GetBareMetalServerProfileOptions {
    pub name: String,
}

impl GetBareMetalServerProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBareMetalServersOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_crn: Option<String>,
    pub vpc_name: Option<String>,
    pub network_interfaces_subnet_id: Option<String>,
    pub network_interfaces_subnet_crn: Option<String>,
    pub network_interfaces_subnet_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BareMetalServerOptions {
    pub id: String,
}

impl BareMetalServerOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteBareMetalServerOptions = BareMetalServerOptions;
pub type GetBareMetalServerOptions = BareMetalServerOptions;
pub type GetBareMetalServerInitializationOptions = BareMetalServerOptions;
pub type StartBareMetalServerOptions = BareMetalServerOptions;
pub type RestartBareMetalServerOptions = BareMetalServerOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateBareMetalServerOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateBareMetalServerOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StopBareMetalServerOptions {
    #[serde(skip)]
    pub id: String,
    /// `hard` or `soft`
    #[serde(rename = "type")]
    pub stop_type: String,
}

impl StopBareMetalServerOptions {
    pub fn new(id: impl Into<String>, stop_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stop_type: stop_type.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBareMetalServerConsoleAccessTokenOptions {
    #[serde(skip)]
    pub bare_metal_server_id: String,
    /// `serial` or `vnc`
    pub console_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl CreateBareMetalServerConsoleAccessTokenOptions {
    pub fn new(bare_metal_server_id: impl Into<String>, console_type: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            console_type: console_type.into(),
            force: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBareMetalServerDisksOptions {
    pub bare_metal_server_id: String,
}

impl ListBareMetalServerDisksOptions {
    pub fn new(bare_metal_server_id: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBareMetalServerNetworkInterfacesOptions {
    pub bare_metal_server_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListBareMetalServerNetworkInterfacesOptions {
    pub fn new(bare_metal_server_id: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            ..Default::default()
        }
    }
}

/// Options addressing one disk or network interface of a server
#[derive(Debug, Clone, Default)]
pub struct BareMetalServerChildOptions {
    pub bare_metal_server_id: String,
    pub id: String,
}

impl BareMetalServerChildOptions {
    pub fn new(bare_metal_server_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            id: id.into(),
        }
    }
}

pub type GetBareMetalServerDiskOptions = BareMetalServerChildOptions;
pub type DeleteBareMetalServerNetworkInterfaceOptions = BareMetalServerChildOptions;
pub type GetBareMetalServerNetworkInterfaceOptions = BareMetalServerChildOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateBareMetalServerChildOptions {
    pub bare_metal_server_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateBareMetalServerChildOptions {
    pub fn new(bare_metal_server_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateBareMetalServerDiskOptions = UpdateBareMetalServerChildOptions;
pub type UpdateBareMetalServerNetworkInterfaceOptions = UpdateBareMetalServerChildOptions;

#[derive(Debug, Clone)]
pub struct CreateBareMetalServerNetworkInterfaceOptions {
    pub bare_metal_server_id: String,
    pub network_interface: BareMetalServerNetworkInterfacePrototype,
}

impl CreateBareMetalServerNetworkInterfaceOptions {
    pub fn new(
        bare_metal_server_id: impl Into<String>,
        network_interface: BareMetalServerNetworkInterfacePrototype,
    ) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            network_interface,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBareMetalServerNetworkInterfaceFloatingIpsOptions {
    pub bare_metal_server_id: String,
    pub network_interface_id: String,
}

impl ListBareMetalServerNetworkInterfaceFloatingIpsOptions {
    pub fn new(bare_metal_server_id: impl Into<String>, network_interface_id: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            network_interface_id: network_interface_id.into(),
        }
    }
}

/// Options addressing one floating IP of a server network interface
#[derive(Debug, Clone, Default)]
pub struct BareMetalServerNetworkInterfaceFloatingIpOptions {
    pub bare_metal_server_id: String,
    pub network_interface_id: String,
    pub id: String,
}

impl BareMetalServerNetworkInterfaceFloatingIpOptions {
    pub fn new(
        bare_metal_server_id: impl Into<String>,
        network_interface_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            network_interface_id: network_interface_id.into(),
            id: id.into(),
        }
    }
}

pub type AddBareMetalServerNetworkInterfaceFloatingIpOptions = BareMetalServerNetworkInterfaceFloatingIpOptions;
pub type RemoveBareMetalServerNetworkInterfaceFloatingIpOptions = BareMetalServerNetworkInterfaceFloatingIpOptions;
pub type GetBareMetalServerNetworkInterfaceFloatingIpOptions = BareMetalServerNetworkInterfaceFloatingIpOptions;

// =============================================================================
// Operations
// =============================================================================

impl VpcService {
    pub async fn list_bare_metal_server_profiles(
        &self,
        options: &ListBareMetalServerProfilesOptions,
    ) -> Result<DetailedResponse<BareMetalServerProfileCollection>> {
        let request = ApiRequest::get("/bare_metal_server/profiles").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn get_bare_metal_server_profile(
        &self,
        options: &GetBareMetalServerProfileOptions,
    ) -> Result<DetailedResponse<BareMetalServerProfile>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/bare_metal_server/profiles/{name}"))).await
    }

    pub async fn list_bare_metal_servers(
        &self,
        options: &ListBareMetalServersOptions,
    ) -> Result<DetailedResponse<BareMetalServerCollection>> {
        let request = ApiRequest::get("/bare_metal_servers")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("name", options.name.as_deref())
            .query("vpc.id", options.vpc_id.as_deref())
            .query("vpc.crn", options.vpc_crn.as_deref())
            .query("vpc.name", options.vpc_name.as_deref())
            .query("network_interfaces.subnet.id", options.network_interfaces_subnet_id.as_deref())
            .query("network_interfaces.subnet.crn", options.network_interfaces_subnet_crn.as_deref())
            .query("network_interfaces.subnet.name", options.network_interfaces_subnet_name.as_deref());
        self.execute(request).await
    }

    /// Provision a bare metal server
    pub async fn create_bare_metal_server(
        &self,
        options: &CreateBareMetalServerOptions,
    ) -> Result<DetailedResponse<BareMetalServer>> {
        if options.initialization.keys.is_empty() {
            return Err(Error::Validation("initialization.keys".to_string()));
        }
        let request = ApiRequest::post("/bare_metal_servers").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_bare_metal_server(&self, options: &DeleteBareMetalServerOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/bare_metal_servers/{id}"))).await
    }

    pub async fn get_bare_metal_server(
        &self,
        options: &GetBareMetalServerOptions,
    ) -> Result<DetailedResponse<BareMetalServer>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/bare_metal_servers/{id}"))).await
    }

    pub async fn update_bare_metal_server(
        &self,
        options: &UpdateBareMetalServerOptions,
    ) -> Result<DetailedResponse<BareMetalServer>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/bare_metal_servers/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn get_bare_metal_server_initialization(
        &self,
        options: &GetBareMetalServerInitializationOptions,
    ) -> Result<DetailedResponse<BareMetalServerInitialization>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/bare_metal_servers/{id}/initialization")))
            .await
    }

    pub async fn start_bare_metal_server(&self, options: &StartBareMetalServerOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::post(format!("/bare_metal_servers/{id}/start")))
            .await
    }

    pub async fn restart_bare_metal_server(
        &self,
        options: &RestartBareMetalServerOptions,
    ) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::post(format!("/bare_metal_servers/{id}/restart")))
            .await
    }

    /// Stop the server, either gracefully (`soft`) or immediately (`hard`)
    pub async fn stop_bare_metal_server(&self, options: &StopBareMetalServerOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        required("type", &options.stop_type)?;
        let request = ApiRequest::post(format!("/bare_metal_servers/{id}/stop")).json(options)?;
        self.execute_empty(request).await
    }

    pub async fn create_bare_metal_server_console_access_token(
        &self,
        options: &CreateBareMetalServerConsoleAccessTokenOptions,
    ) -> Result<DetailedResponse<BareMetalServerConsoleAccessToken>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        required("console_type", &options.console_type)?;
        let request =
            ApiRequest::post(format!("/bare_metal_servers/{server_id}/console_access_token")).json(options)?;
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Disks
    // -------------------------------------------------------------------------

    pub async fn list_bare_metal_server_disks(
        &self,
        options: &ListBareMetalServerDisksOptions,
    ) -> Result<DetailedResponse<BareMetalServerDiskCollection>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        self.execute(ApiRequest::get(format!("/bare_metal_servers/{server_id}/disks")))
            .await
    }

    pub async fn get_bare_metal_server_disk(
        &self,
        options: &GetBareMetalServerDiskOptions,
    ) -> Result<DetailedResponse<BareMetalServerDisk>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/bare_metal_servers/{server_id}/disks/{id}")))
            .await
    }

    pub async fn update_bare_metal_server_disk(
        &self,
        options: &UpdateBareMetalServerDiskOptions,
    ) -> Result<DetailedResponse<BareMetalServerDisk>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/bare_metal_servers/{server_id}/disks/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Network interfaces
    // -------------------------------------------------------------------------

    pub async fn list_bare_metal_server_network_interfaces(
        &self,
        options: &ListBareMetalServerNetworkInterfacesOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterfaceCollection>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let request = ApiRequest::get(format!("/bare_metal_servers/{server_id}/network_interfaces"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    /// Add a network interface. A `pci` interface can only be added while
    /// the server is stopped.
    pub async fn create_bare_metal_server_network_interface(
        &self,
        options: &CreateBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterface>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let request = ApiRequest::post(format!("/bare_metal_servers/{server_id}/network_interfaces"))
            .json(&options.network_interface)?;
        self.execute(request).await
    }

    pub async fn delete_bare_metal_server_network_interface(
        &self,
        options: &DeleteBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<()>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/bare_metal_servers/{server_id}/network_interfaces/{id}"));
        self.execute_empty(request).await
    }

    pub async fn get_bare_metal_server_network_interface(
        &self,
        options: &GetBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterface>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!("/bare_metal_servers/{server_id}/network_interfaces/{id}"));
        self.execute(request).await
    }

    pub async fn update_bare_metal_server_network_interface(
        &self,
        options: &UpdateBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterface>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/bare_metal_servers/{server_id}/network_interfaces/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_bare_metal_server_network_interface_floating_ips(
        &self,
        options: &ListBareMetalServerNetworkInterfaceFloatingIpsOptions,
    ) -> Result<DetailedResponse<FloatingIpUnpaginatedCollection>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let request = ApiRequest::get(format!(
            "/bare_metal_servers/{server_id}/network_interfaces/{nic_id}/floating_ips"
        ));
        self.execute(request).await
    }

    pub async fn remove_bare_metal_server_network_interface_floating_ip(
        &self,
        options: &RemoveBareMetalServerNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!(
            "/bare_metal_servers/{server_id}/network_interfaces/{nic_id}/floating_ips/{id}"
        ));
        self.execute_empty(request).await
    }

    pub async fn get_bare_metal_server_network_interface_floating_ip(
        &self,
        options: &GetBareMetalServerNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!(
            "/bare_metal_servers/{server_id}/network_interfaces/{nic_id}/floating_ips/{id}"
        ));
        self.execute(request).await
    }

    /// Bind a floating IP to the interface. The IP must be in the interface's zone.
    pub async fn add_bare_metal_server_network_interface_floating_ip(
        &self,
        options: &AddBareMetalServerNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let server_id = path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        let nic_id = path_param("network_interface_id", &options.network_interface_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::put(format!(
            "/bare_metal_servers/{server_id}/network_interfaces/{nic_id}/floating_ips/{id}"
        ));
        self.execute(request).await
    }
}

paged_list!(
    ListBareMetalServerProfilesOptions,
    BareMetalServerProfileCollection,
    profiles: BareMetalServerProfile,
    list_bare_metal_server_profiles
);
paged_list!(
    ListBareMetalServersOptions,
    BareMetalServerCollection,
    bare_metal_servers: BareMetalServer,
    list_bare_metal_servers
);
paged_list!(
    ListBareMetalServerNetworkInterfacesOptions,
    BareMetalServerNetworkInterfaceCollection,
    network_interfaces: BareMetalServerNetworkInterface,
    list_bare_metal_server_network_interfaces
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nic_json(extra: serde_json::Value) -> serde_json::Value {
        let mut nic = json!({
            "allow_ip_spoofing": false,
            "created_at": "2024-04-30T12:00:00Z",
            "enable_infrastructure_nat": true,
            "href": "https://us-south.iaas.cloud.ibm.com/v1/bare_metal_servers/bms-1/network_interfaces/nic-1",
            "id": "nic-1",
            "mac_address": "02:00:04:00:C4:6A",
            "name": "my-nic",
            "port_speed": 100000,
            "primary_ip": {
                "address": "10.0.0.32",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/subnets/sn-1/reserved_ips/ip-1",
                "id": "ip-1",
                "name": "my-ip"
            },
            "status": "available",
            "subnet": {
                "href": "https://us-south.iaas.cloud.ibm.com/v1/subnets/sn-1",
                "id": "sn-1",
                "name": "my-subnet"
            },
            "type": "primary"
        });
        if let (Some(nic), Some(extra)) = (nic.as_object_mut(), extra.as_object()) {
            nic.extend(extra.clone());
        }
        nic
    }

    #[test]
    fn pci_interface_decodes_allowed_vlans() {
        let nic: BareMetalServerNetworkInterface =
            serde_json::from_value(nic_json(json!({"interface_type": "pci", "allowed_vlans": [4, 100]}))).unwrap();
        assert_eq!(nic.role, "primary");
        assert_eq!(
            nic.interface_type,
            BareMetalServerNetworkInterfaceType::Pci {
                allowed_vlans: vec![4, 100]
            }
        );
    }

    #[test]
    fn vlan_interface_decodes_vlan() {
        let nic: BareMetalServerNetworkInterface = serde_json::from_value(nic_json(json!({
            "interface_type": "vlan",
            "vlan": 4,
            "allow_interface_to_float": true
        })))
        .unwrap();
        assert!(matches!(
            nic.interface_type,
            BareMetalServerNetworkInterfaceType::Vlan {
                vlan: 4,
                allow_interface_to_float: Some(true)
            }
        ));
    }

    #[test]
    fn create_body_with_pci_primary_interface() {
        let mut options = CreateBareMetalServerOptions::new(
            BareMetalServerInitializationPrototype::new(Identity::id("r006-image"), vec![Identity::id("r006-key")]),
            BareMetalServerNetworkInterfacePrototype::new(
                Identity::id("r006-subnet"),
                BareMetalServerNetworkInterfaceType::Pci { allowed_vlans: Vec::new() },
            ),
            Identity::name("bx2-metal-192x768"),
            Identity::name("us-south-3"),
        );
        options.name = Some("my-bare-metal".into());

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "initialization": {"image": {"id": "r006-image"}, "keys": [{"id": "r006-key"}]},
                "name": "my-bare-metal",
                "primary_network_interface": {
                    "interface_type": "pci",
                    "subnet": {"id": "r006-subnet"}
                },
                "profile": {"name": "bx2-metal-192x768"},
                "zone": {"name": "us-south-3"}
            })
        );
    }

    #[test]
    fn stop_body_carries_type_only() {
        let options = StopBareMetalServerOptions::new("bms-1", "soft");
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({"type": "soft"}));
    }

    #[test]
    fn server_patch_sets_tpm_mode() {
        let patch = BareMetalServerPatch {
            enable_secure_boot: PatchField::Set(true),
            trusted_platform_module: PatchField::Set(BareMetalServerTrustedPlatformModulePrototype {
                mode: Some("tpm_2".into()),
            }),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(
            patch.to_value(),
            json!({"enable_secure_boot": true, "trusted_platform_module": {"mode": "tpm_2"}})
        );
    }

    #[test]
    fn nic_patch_clears_allowed_vlans() {
        let patch = BareMetalServerNetworkInterfacePatch {
            allowed_vlans: PatchField::Null,
            name: "my-nic-renamed".into(),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"allowed_vlans": null, "name": "my-nic-renamed"}));
    }
}
