//! Client-to-site VPN servers, their connected clients and routes

use super::common::{CertificateInstance, Identity, Ip, LifecycleState, PageLink, Reference, ReservedIpReference};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnServerIdentityProvider {
    /// Only `iam` is defined
    pub provider_type: String,
}

/// How clients authenticate, discriminated on `method`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum VpnServerAuthentication {
    Certificate {
        client_ca: CertificateInstance,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crl: Option<String>,
    },
    Username {
        identity_provider: VpnServerIdentityProvider,
    },
}

impl VpnServerAuthentication {
    pub fn certificate(client_ca_crn: impl Into<String>) -> Self {
        VpnServerAuthentication::Certificate {
            client_ca: CertificateInstance::new(client_ca_crn),
            crl: None,
        }
    }

    pub fn iam_username() -> Self {
        VpnServerAuthentication::Username {
            identity_provider: VpnServerIdentityProvider {
                provider_type: "iam".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServer {
    pub certificate: CertificateInstance,
    pub client_authentication: Vec<VpnServerAuthentication>,
    pub client_auto_delete: bool,
    pub client_auto_delete_timeout: i64,
    #[serde(default)]
    pub client_dns_server_ips: Vec<Ip>,
    pub client_idle_timeout: i64,
    pub client_ip_pool: String,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub enable_split_tunneling: bool,
    /// `ok`, `degraded`, `faulted` or `inapplicable`
    pub health_state: String,
    pub hostname: String,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    pub port: i64,
    #[serde(default)]
    pub private_ips: Vec<ReservedIpReference>,
    /// `tcp` or `udp`
    pub protocol: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<Reference>,
    #[serde(default)]
    pub subnets: Vec<Reference>,
    pub vpc: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServerCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
    pub vpn_servers: Vec<VpnServer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VpnServerPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub certificate: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub client_authentication: PatchField<Vec<VpnServerAuthentication>>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub client_dns_server_ips: PatchField<Vec<Ip>>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub client_idle_timeout: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub client_ip_pool: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub enable_split_tunneling: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub port: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub protocol: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub subnets: PatchField<Vec<Identity>>,
}

impl AsPatch for VpnServerPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnServerClientUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServerClient {
    pub client_ip: Ip,
    #[serde(default)]
    pub common_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub disconnected_at: Option<DateTime<Utc>>,
    pub href: String,
    pub id: String,
    pub remote_ip: Ip,
    pub remote_port: i64,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// `connected` or `disconnected`
    pub status: String,
    #[serde(default)]
    pub user: Option<VpnServerClientUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServerClientCollection {
    pub clients: Vec<VpnServerClient>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServerRoute {
    /// `deliver`, `drop` or `translate`
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub destination: String,
    #[serde(default)]
    pub health_state: Option<String>,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServerRouteCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub routes: Vec<VpnServerRoute>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VpnServerRoutePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for VpnServerRoutePatch {}

#[derive(Debug, Clone, Default)]
pub struct ListVpnServersOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    /// `name`, `created_at`, prefixed with `-` for descending order
    pub sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateVpnServerOptions {
    pub certificate: Identity,
    pub client_authentication: Vec<VpnServerAuthentication>,
    pub client_ip_pool: String,
    pub subnets: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_dns_server_ips: Option<Vec<Ip>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_idle_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_split_tunneling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl CreateVpnServerOptions {
    pub fn new(
        certificate: Identity,
        client_authentication: Vec<VpnServerAuthentication>,
        client_ip_pool: impl Into<String>,
        subnets: Vec<Identity>,
    ) -> Self {
        Self {
            certificate,
            client_authentication,
            client_ip_pool: client_ip_pool.into(),
            subnets,
            client_dns_server_ips: None,
            client_idle_timeout: None,
            enable_split_tunneling: None,
            name: None,
            port: None,
            protocol: None,
            resource_group: None,
            security_groups: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VpnServerOptions {
    pub id: String,
}

impl VpnServerOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetVpnServerOptions = VpnServerOptions;
pub type GetVpnServerClientConfigurationOptions = VpnServerOptions;

#[derive(Debug, Clone, Default)]
pub struct DeleteVpnServerOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteVpnServerOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVpnServerOptions {
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateVpnServerOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListVpnServerClientsOptions {
    pub vpn_server_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl ListVpnServerClientsOptions {
    pub fn new(vpn_server_id: impl Into<String>) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListVpnServerRoutesOptions {
    pub vpn_server_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl ListVpnServerRoutesOptions {
    pub fn new(vpn_server_id: impl Into<String>) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            ..Default::default()
        }
    }
}

/// Options addressing one client or route of a VPN server
#[derive(Debug, Clone, Default)]
pub struct VpnServerChildOptions {
    pub vpn_server_id: String,
    pub id: String,
}

impl VpnServerChildOptions {
    pub fn new(vpn_server_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            id: id.into(),
        }
    }
}

pub type GetVpnServerClientOptions = VpnServerChildOptions;
pub type DeleteVpnServerClientOptions = VpnServerChildOptions;
pub type DisconnectVpnClientOptions = VpnServerChildOptions;
pub type GetVpnServerRouteOptions = VpnServerChildOptions;
pub type DeleteVpnServerRouteOptions = VpnServerChildOptions;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVpnServerRouteOptions {
    #[serde(skip)]
    pub vpn_server_id: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CreateVpnServerRouteOptions {
    pub fn new(vpn_server_id: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVpnServerRouteOptions {
    pub vpn_server_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateVpnServerRouteOptions {
    pub fn new(vpn_server_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_vpn_servers(&self, options: &ListVpnServersOptions) -> Result<DetailedResponse<VpnServerCollection>> {
        let request = ApiRequest::get("/vpn_servers")
            .page(options.start.as_deref(), options.limit)
            .query("name", options.name.as_deref())
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    pub async fn create_vpn_server(&self, options: &CreateVpnServerOptions) -> Result<DetailedResponse<VpnServer>> {
        required("client_ip_pool", &options.client_ip_pool)?;
        let request = ApiRequest::post("/vpn_servers").json(options)?;
        self.execute(request).await
    }

    /// Delete a VPN server. The service accepts the request and deletes asynchronously.
    pub async fn delete_vpn_server(&self, options: &DeleteVpnServerOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/vpn_servers/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute_empty(request).await
    }

    pub async fn get_vpn_server(&self, options: &GetVpnServerOptions) -> Result<DetailedResponse<VpnServer>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpn_servers/{id}"))).await
    }

    pub async fn update_vpn_server(&self, options: &UpdateVpnServerOptions) -> Result<DetailedResponse<VpnServer>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/vpn_servers/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    /// Fetch the OpenVPN client configuration for a VPN server, as text
    pub async fn get_vpn_server_client_configuration(
        &self,
        options: &GetVpnServerClientConfigurationOptions,
    ) -> Result<DetailedResponse<String>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!("/vpn_servers/{id}/client_configuration"))
            .header(ACCEPT, Some("text/plain"))?;
        self.execute_text(request).await
    }

    pub async fn list_vpn_server_clients(
        &self,
        options: &ListVpnServerClientsOptions,
    ) -> Result<DetailedResponse<VpnServerClientCollection>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let request = ApiRequest::get(format!("/vpn_servers/{vpn_server_id}/clients"))
            .page(options.start.as_deref(), options.limit)
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    pub async fn delete_vpn_server_client(&self, options: &DeleteVpnServerClientOptions) -> Result<DetailedResponse<()>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/vpn_servers/{vpn_server_id}/clients/{id}")))
            .await
    }

    pub async fn get_vpn_server_client(
        &self,
        options: &GetVpnServerClientOptions,
    ) -> Result<DetailedResponse<VpnServerClient>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpn_servers/{vpn_server_id}/clients/{id}")))
            .await
    }

    /// Disconnect a client. The client record stays until it is deleted or auto-deleted.
    pub async fn disconnect_vpn_client(&self, options: &DisconnectVpnClientOptions) -> Result<DetailedResponse<()>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::post(format!("/vpn_servers/{vpn_server_id}/clients/{id}/disconnect"));
        self.execute_empty(request).await
    }

    pub async fn list_vpn_server_routes(
        &self,
        options: &ListVpnServerRoutesOptions,
    ) -> Result<DetailedResponse<VpnServerRouteCollection>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let request = ApiRequest::get(format!("/vpn_servers/{vpn_server_id}/routes"))
            .page(options.start.as_deref(), options.limit)
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    pub async fn create_vpn_server_route(
        &self,
        options: &CreateVpnServerRouteOptions,
    ) -> Result<DetailedResponse<VpnServerRoute>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        required("destination", &options.destination)?;
        let request = ApiRequest::post(format!("/vpn_servers/{vpn_server_id}/routes")).json(options)?;
        self.execute(request).await
    }

    pub async fn delete_vpn_server_route(&self, options: &DeleteVpnServerRouteOptions) -> Result<DetailedResponse<()>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/vpn_servers/{vpn_server_id}/routes/{id}")))
            .await
    }

    pub async fn get_vpn_server_route(&self, options: &GetVpnServerRouteOptions) -> Result<DetailedResponse<VpnServerRoute>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpn_servers/{vpn_server_id}/routes/{id}")))
            .await
    }

    pub async fn update_vpn_server_route(
        &self,
        options: &UpdateVpnServerRouteOptions,
    ) -> Result<DetailedResponse<VpnServerRoute>> {
        let vpn_server_id = path_param("vpn_server_id", &options.vpn_server_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/vpn_servers/{vpn_server_id}/routes/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListVpnServersOptions,
    VpnServerCollection,
    vpn_servers: VpnServer,
    list_vpn_servers
);
paged_list!(
    ListVpnServerClientsOptions,
    VpnServerClientCollection,
    clients: VpnServerClient,
    list_vpn_server_clients
);
paged_list!(
    ListVpnServerRoutesOptions,
    VpnServerRouteCollection,
    routes: VpnServerRoute,
    list_vpn_server_routes
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_options_serialize_authentication_methods() {
        let options = CreateVpnServerOptions {
            name: Some("my-vpn-server".to_string()),
            ..CreateVpnServerOptions::new(
                Identity::crn("crn:v1:bluemix:public:secrets-manager:us-south:a/123:cert"),
                vec![
                    VpnServerAuthentication::certificate("crn:v1:bluemix:public:secrets-manager:us-south:a/123:ca"),
                    VpnServerAuthentication::iam_username(),
                ],
                "172.16.0.0/16",
                vec![Identity::id("subnet-1")],
            )
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "certificate": {"crn": "crn:v1:bluemix:public:secrets-manager:us-south:a/123:cert"},
                "client_authentication": [
                    {"method": "certificate", "client_ca": {"crn": "crn:v1:bluemix:public:secrets-manager:us-south:a/123:ca"}},
                    {"method": "username", "identity_provider": {"provider_type": "iam"}}
                ],
                "client_ip_pool": "172.16.0.0/16",
                "subnets": [{"id": "subnet-1"}],
                "name": "my-vpn-server"
            })
        );
    }

    #[test]
    fn route_options_skip_path_parameter() {
        let options = CreateVpnServerRouteOptions::new("vpn-1", "172.16.0.0/16");
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"destination": "172.16.0.0/16"})
        );
    }

    #[test]
    fn patch_can_clear_dns_servers() {
        let patch = VpnServerPatch {
            client_dns_server_ips: PatchField::Set(vec![]),
            client_idle_timeout: PatchField::Set(900),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(
            patch.to_value(),
            json!({"client_dns_server_ips": [], "client_idle_timeout": 900})
        );
    }

    #[test]
    fn client_decodes_username_and_disconnect_time() {
        let client: VpnServerClient = serde_json::from_value(json!({
            "client_ip": {"address": "172.16.0.5"},
            "created_at": "2024-05-01T10:00:00Z",
            "disconnected_at": "2024-05-01T11:00:00Z",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/vpn_servers/vpn-1/clients/c-1",
            "id": "c-1",
            "remote_ip": {"address": "203.0.113.9"},
            "remote_port": 22225,
            "resource_type": "vpn_server_client",
            "status": "disconnected",
            "user": {"username": "alice"}
        }))
        .unwrap();
        assert_eq!(client.user.unwrap().username, "alice");
        assert!(client.disconnected_at.is_some());
    }
}
