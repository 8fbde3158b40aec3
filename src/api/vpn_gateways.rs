//! Site-to-site VPN gateways and connections
//!
//! Gateways run in `route` or `policy` mode. A connection's shape depends on
//! the mode: policy-mode connections carry local and peer CIDRs, route-mode
//! connections carry tunnels.

use super::common::{Identity, Ip, LifecycleState, PageLink, Reference, ReservedIpReference, StatusReason};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VpnGatewayMode {
    Policy,
    Route,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnGatewayMember {
    #[serde(default)]
    pub private_ip: Option<ReservedIpReference>,
    pub public_ip: Ip,
    /// `active` or `standby`
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGateway {
    #[serde(default)]
    pub connections: Vec<Reference>,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    #[serde(default)]
    pub health_state: Option<String>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub lifecycle_state: Option<LifecycleState>,
    #[serde(default)]
    pub members: Vec<VpnGatewayMember>,
    pub mode: VpnGatewayMode,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub subnet: Reference,
    #[serde(default)]
    pub vpc: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
    pub vpn_gateways: Vec<VpnGateway>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpnGatewayPrototype {
    pub subnet: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<VpnGatewayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl VpnGatewayPrototype {
    pub fn new(subnet: Identity) -> Self {
        Self {
            subnet,
            mode: None,
            name: None,
            resource_group: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VpnGatewayPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for VpnGatewayPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadPeerDetection {
    /// `clear`, `hold`, `none` or `restart`
    pub action: String,
    pub interval: i64,
    pub timeout: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionTunnel {
    pub public_ip: Ip,
    /// `down` or `up`
    pub status: String,
}

/// Mode-specific part of a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum VpnGatewayConnectionMode {
    Policy {
        #[serde(default)]
        local_cidrs: Vec<String>,
        #[serde(default)]
        peer_cidrs: Vec<String>,
    },
    Route {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        routing_protocol: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tunnels: Vec<VpnGatewayConnectionTunnel>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayConnection {
    pub admin_state_up: bool,
    /// Always `psk`
    pub authentication_mode: String,
    pub created_at: DateTime<Utc>,
    pub dead_peer_detection: DeadPeerDetection,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub ike_policy: Option<Reference>,
    #[serde(default)]
    pub ipsec_policy: Option<Reference>,
    pub name: String,
    pub peer_address: String,
    pub psk: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// `down` or `up`
    pub status: String,
    #[serde(default)]
    pub status_reasons: Vec<StatusReason>,
    #[serde(flatten)]
    pub mode: VpnGatewayConnectionMode,
}

/// Connections of one gateway; never paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionCollection {
    pub connections: Vec<VpnGatewayConnection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpnGatewayConnectionPrototype {
    pub peer_address: String,
    pub psk: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_peer_detection: Option<DeadPeerDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ike_policy: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipsec_policy: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Must match the gateway's mode; policy mode needs the CIDRs
    #[serde(flatten)]
    pub mode: Option<VpnGatewayConnectionMode>,
}

impl VpnGatewayConnectionPrototype {
    pub fn new(peer_address: impl Into<String>, psk: impl Into<String>) -> Self {
        Self {
            peer_address: peer_address.into(),
            psk: psk.into(),
            admin_state_up: None,
            dead_peer_detection: None,
            ike_policy: None,
            ipsec_policy: None,
            name: None,
            mode: None,
        }
    }
}

/// Setting `ike_policy` or `ipsec_policy` to [`PatchField::Null`] reverts to
/// auto-negotiation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VpnGatewayConnectionPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub admin_state_up: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub dead_peer_detection: PatchField<DeadPeerDetection>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub ike_policy: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub ipsec_policy: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub peer_address: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub psk: PatchField<String>,
}

impl AsPatch for VpnGatewayConnectionPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionLocalCidrs {
    #[serde(default)]
    pub local_cidrs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionPeerCidrs {
    #[serde(default)]
    pub peer_cidrs: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListVpnGatewaysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub sort: Option<String>,
    pub mode: Option<VpnGatewayMode>,
}

#[derive(Debug, Clone)]
pub struct CreateVpnGatewayOptions {
    pub vpn_gateway_prototype: VpnGatewayPrototype,
}

impl CreateVpnGatewayOptions {
    pub fn new(vpn_gateway_prototype: VpnGatewayPrototype) -> Self {
        Self { vpn_gateway_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VpnGatewayOptions {
    pub id: String,
}

impl VpnGatewayOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteVpnGatewayOptions = VpnGatewayOptions;
pub type GetVpnGatewayOptions = VpnGatewayOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateVpnGatewayOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateVpnGatewayOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListVpnGatewayConnectionsOptions {
    pub vpn_gateway_id: String,
    /// `down` or `up`
    pub status: Option<String>,
}

impl ListVpnGatewayConnectionsOptions {
    pub fn new(vpn_gateway_id: impl Into<String>) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            status: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateVpnGatewayConnectionOptions {
    pub vpn_gateway_id: String,
    pub connection: VpnGatewayConnectionPrototype,
}

impl CreateVpnGatewayConnectionOptions {
    pub fn new(vpn_gateway_id: impl Into<String>, connection: VpnGatewayConnectionPrototype) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            connection,
        }
    }
}

/// Options addressing one connection of a gateway
#[derive(Debug, Clone, Default)]
pub struct VpnGatewayConnectionOptions {
    pub vpn_gateway_id: String,
    pub id: String,
}

impl VpnGatewayConnectionOptions {
    pub fn new(vpn_gateway_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteVpnGatewayConnectionOptions = VpnGatewayConnectionOptions;
pub type GetVpnGatewayConnectionOptions = VpnGatewayConnectionOptions;
pub type ListVpnGatewayConnectionLocalCidrsOptions = VpnGatewayConnectionOptions;
pub type ListVpnGatewayConnectionPeerCidrsOptions = VpnGatewayConnectionOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateVpnGatewayConnectionOptions {
    pub vpn_gateway_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateVpnGatewayConnectionOptions {
    pub fn new(vpn_gateway_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            id: id.into(),
            patch,
        }
    }
}

/// Options addressing one CIDR (`cidr_prefix`/`prefix_length`) of a
/// policy-mode connection
#[derive(Debug, Clone, Default)]
pub struct VpnGatewayConnectionCidrOptions {
    pub vpn_gateway_id: String,
    pub id: String,
    pub cidr_prefix: String,
    pub prefix_length: String,
}

impl VpnGatewayConnectionCidrOptions {
    pub fn new(
        vpn_gateway_id: impl Into<String>,
        id: impl Into<String>,
        cidr_prefix: impl Into<String>,
        prefix_length: impl Into<String>,
    ) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            id: id.into(),
            cidr_prefix: cidr_prefix.into(),
            prefix_length: prefix_length.into(),
        }
    }

    fn path(&self, side: &str) -> Result<String> {
        let gateway_id = path_param("vpn_gateway_id", &self.vpn_gateway_id)?;
        let id = path_param("id", &self.id)?;
        let prefix = path_param("cidr_prefix", &self.cidr_prefix)?;
        let length = path_param("prefix_length", &self.prefix_length)?;
        Ok(format!(
            "/vpn_gateways/{gateway_id}/connections/{id}/{side}/{prefix}/{length}"
        ))
    }
}

pub type RemoveVpnGatewayConnectionLocalCidrOptions = VpnGatewayConnectionCidrOptions;
pub type CheckVpnGatewayConnectionLocalCidrOptions = VpnGatewayConnectionCidrOptions;
pub type AddVpnGatewayConnectionLocalCidrOptions = VpnGatewayConnectionCidrOptions;
pub type RemoveVpnGatewayConnectionPeerCidrOptions = VpnGatewayConnectionCidrOptions;
pub type CheckVpnGatewayConnectionPeerCidrOptions = VpnGatewayConnectionCidrOptions;
pub type AddVpnGatewayConnectionPeerCidrOptions = VpnGatewayConnectionCidrOptions;

impl VpnGatewayMode {
    fn as_str(self) -> &'static str {
        match self {
            VpnGatewayMode::Policy => "policy",
            VpnGatewayMode::Route => "route",
        }
    }
}

impl VpcService {
    pub async fn list_vpn_gateways(
        &self,
        options: &ListVpnGatewaysOptions,
    ) -> Result<DetailedResponse<VpnGatewayCollection>> {
        let request = ApiRequest::get("/vpn_gateways")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("sort", options.sort.as_deref())
            .query("mode", options.mode.map(VpnGatewayMode::as_str));
        self.execute(request).await
    }

    pub async fn create_vpn_gateway(&self, options: &CreateVpnGatewayOptions) -> Result<DetailedResponse<VpnGateway>> {
        let request = ApiRequest::post("/vpn_gateways").json(&options.vpn_gateway_prototype)?;
        self.execute(request).await
    }

    /// Delete a VPN gateway and all of its connections (202 Accepted)
    pub async fn delete_vpn_gateway(&self, options: &DeleteVpnGatewayOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/vpn_gateways/{id}"))).await
    }

    pub async fn get_vpn_gateway(&self, options: &GetVpnGatewayOptions) -> Result<DetailedResponse<VpnGateway>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpn_gateways/{id}"))).await
    }

    pub async fn update_vpn_gateway(&self, options: &UpdateVpnGatewayOptions) -> Result<DetailedResponse<VpnGateway>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/vpn_gateways/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_vpn_gateway_connections(
        &self,
        options: &ListVpnGatewayConnectionsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionCollection>> {
        let gateway_id = path_param("vpn_gateway_id", &options.vpn_gateway_id)?;
        let request = ApiRequest::get(format!("/vpn_gateways/{gateway_id}/connections"))
            .query("status", options.status.as_deref());
        self.execute(request).await
    }

    pub async fn create_vpn_gateway_connection(
        &self,
        options: &CreateVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnection>> {
        let gateway_id = path_param("vpn_gateway_id", &options.vpn_gateway_id)?;
        required("peer_address", &options.connection.peer_address)?;
        required("psk", &options.connection.psk)?;
        let request =
            ApiRequest::post(format!("/vpn_gateways/{gateway_id}/connections")).json(&options.connection)?;
        self.execute(request).await
    }

    pub async fn delete_vpn_gateway_connection(
        &self,
        options: &DeleteVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<()>> {
        let gateway_id = path_param("vpn_gateway_id", &options.vpn_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/vpn_gateways/{gateway_id}/connections/{id}")))
            .await
    }

    pub async fn get_vpn_gateway_connection(
        &self,
        options: &GetVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnection>> {
        let gateway_id = path_param("vpn_gateway_id", &options.vpn_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpn_gateways/{gateway_id}/connections/{id}")))
            .await
    }

    pub async fn update_vpn_gateway_connection(
        &self,
        options: &UpdateVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnection>> {
        let gateway_id = path_param("vpn_gateway_id", &options.vpn_gateway_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/vpn_gateways/{gateway_id}/connections/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Local / peer CIDRs (policy mode)
    // -------------------------------------------------------------------------

    pub async fn list_vpn_gateway_connection_local_cidrs(
        &self,
        options: &ListVpnGatewayConnectionLocalCidrsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionLocalCidrs>> {
        let gateway_id = path_param("vpn_gateway_id", &options.vpn_gateway_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!("/vpn_gateways/{gateway_id}/connections/{id}/local_cidrs"));
        self.execute(request).await
    }

    pub async fn remove_vpn_gateway_connection_local_cidr(
        &self,
        options: &RemoveVpnGatewayConnectionLocalCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        self.execute_empty(ApiRequest::delete(options.path("local_cidrs")?)).await
    }

    /// Succeeds (204) when the CIDR is on the connection, fails with 404 otherwise
    pub async fn check_vpn_gateway_connection_local_cidr(
        &self,
        options: &CheckVpnGatewayConnectionLocalCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        self.execute_empty(ApiRequest::get(options.path("local_cidrs")?)).await
    }

    pub async fn add_vpn_gateway_connection_local_cidr(
        &self,
        options: &AddVpnGatewayConnectionLocalCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        self.execute_empty(ApiRequest::put(options.path("local_cidrs")?)).await
    }

    pub async fn list_vpn_gateway_connection_peer_cidrs(
        &self,
        options: &ListVpnGatewayConnectionPeerCidrsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionPeerCidrs>> {
        let gateway_id = path_param("vpn_gateway_id", &options.vpn_gateway_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!("/vpn_gateways/{gateway_id}/connections/{id}/peer_cidrs"));
        self.execute(request).await
    }

    pub async fn remove_vpn_gateway_connection_peer_cidr(
        &self,
        options: &RemoveVpnGatewayConnectionPeerCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        self.execute_empty(ApiRequest::delete(options.path("peer_cidrs")?)).await
    }

    pub async fn check_vpn_gateway_connection_peer_cidr(
        &self,
        options: &CheckVpnGatewayConnectionPeerCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        self.execute_empty(ApiRequest::get(options.path("peer_cidrs")?)).await
    }

    pub async fn add_vpn_gateway_connection_peer_cidr(
        &self,
        options: &AddVpnGatewayConnectionPeerCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        self.execute_empty(ApiRequest::put(options.path("peer_cidrs")?)).await
    }
}

paged_list!(
    ListVpnGatewaysOptions,
    VpnGatewayCollection,
    vpn_gateways: VpnGateway,
    list_vpn_gateways
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn connection_json(mode: serde_json::Value) -> serde_json::Value {
        let mut connection = json!({
            "admin_state_up": true,
            "authentication_mode": "psk",
            "created_at": "2024-04-30T12:00:00Z",
            "dead_peer_detection": {"action": "restart", "interval": 30, "timeout": 120},
            "href": "https://x/v1/vpn_gateways/g/connections/c",
            "id": "c",
            "name": "my-connection",
            "peer_address": "169.21.50.5",
            "psk": "lkj14b1oi0alcniejkso",
            "status": "down"
        });
        if let (Some(connection), Some(extra)) = (connection.as_object_mut(), mode.as_object()) {
            connection.extend(extra.clone());
        }
        connection
    }

    #[test]
    fn connection_decodes_policy_mode() {
        let connection: VpnGatewayConnection = serde_json::from_value(connection_json(json!({
            "mode": "policy",
            "local_cidrs": ["192.168.1.0/24"],
            "peer_cidrs": ["10.45.1.0/24"]
        })))
        .unwrap();
        assert_eq!(
            connection.mode,
            VpnGatewayConnectionMode::Policy {
                local_cidrs: vec!["192.168.1.0/24".into()],
                peer_cidrs: vec!["10.45.1.0/24".into()],
            }
        );
    }

    #[test]
    fn connection_decodes_route_mode() {
        let connection: VpnGatewayConnection = serde_json::from_value(connection_json(json!({
            "mode": "route",
            "routing_protocol": "none",
            "tunnels": [{"public_ip": {"address": "192.168.3.4"}, "status": "up"}]
        })))
        .unwrap();
        match connection.mode {
            VpnGatewayConnectionMode::Route { tunnels, .. } => assert_eq!(tunnels.len(), 1),
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn connection_prototype_without_mode() {
        let prototype = VpnGatewayConnectionPrototype::new("169.21.50.5", "secret");
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({"peer_address": "169.21.50.5", "psk": "secret"})
        );
    }

    #[test]
    fn cidr_path_encodes_segments() {
        let options = VpnGatewayConnectionCidrOptions::new("g", "c", "192.168.1.0", "24");
        assert_eq!(
            options.path("local_cidrs").unwrap(),
            "/vpn_gateways/g/connections/c/local_cidrs/192.168.1.0/24"
        );
        let missing = VpnGatewayConnectionCidrOptions::new("g", "c", "", "24");
        assert!(missing.path("peer_cidrs").is_err());
    }
}
