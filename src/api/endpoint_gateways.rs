//! Endpoint gateways and their reserved IPs

use super::common::{Identity, LifecycleState, PageLink, Reference, ReservedIpReference};
use super::subnets::ReservedIp;
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The service an endpoint gateway reaches
///
/// Provider services carry `crn` or `name`; private path service gateways
/// are full references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointGatewayTarget {
    #[serde(default)]
    pub crn: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// `private_path_service_gateway`, `provider_cloud_service` or
    /// `provider_infrastructure_service`
    pub resource_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resource_type", rename_all = "snake_case")]
pub enum EndpointGatewayTargetPrototype {
    ProviderCloudService { crn: String },
    ProviderInfrastructureService { name: String },
    PrivatePathServiceGateway { crn: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointGateway {
    #[serde(default)]
    pub allow_dns_resolution_binding: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    /// `ok`, `degraded`, `faulted` or `inapplicable`
    pub health_state: String,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub ips: Vec<ReservedIpReference>,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<Reference>,
    #[serde(default)]
    pub service_endpoints: Vec<String>,
    pub target: EndpointGatewayTarget,
    pub vpc: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointGatewayCollection {
    pub endpoint_gateways: Vec<EndpointGateway>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointGatewayReservedIpCollection {
    pub first: PageLink,
    pub ips: Vec<ReservedIp>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndpointGatewayPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub allow_dns_resolution_binding: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for EndpointGatewayPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListEndpointGatewaysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateEndpointGatewayOptions {
    pub target: EndpointGatewayTargetPrototype,
    pub vpc: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_dns_resolution_binding: Option<bool>,
    /// Existing reserved IPs to bind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ips: Option<Vec<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl CreateEndpointGatewayOptions {
    pub fn new(target: EndpointGatewayTargetPrototype, vpc: Identity) -> Self {
        Self {
            target,
            vpc,
            allow_dns_resolution_binding: None,
            ips: None,
            name: None,
            resource_group: None,
            security_groups: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EndpointGatewayOptions {
    pub id: String,
}

impl EndpointGatewayOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteEndpointGatewayOptions = EndpointGatewayOptions;
pub type GetEndpointGatewayOptions = EndpointGatewayOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateEndpointGatewayOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateEndpointGatewayOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListEndpointGatewayIpsOptions {
    pub endpoint_gateway_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl ListEndpointGatewayIpsOptions {
    pub fn new(endpoint_gateway_id: impl Into<String>) -> Self {
        Self {
            endpoint_gateway_id: endpoint_gateway_id.into(),
            ..Default::default()
        }
    }
}

/// Options addressing one reserved IP bound to an endpoint gateway
#[derive(Debug, Clone, Default)]
pub struct EndpointGatewayIpOptions {
    pub endpoint_gateway_id: String,
    pub id: String,
}

impl EndpointGatewayIpOptions {
    pub fn new(endpoint_gateway_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            endpoint_gateway_id: endpoint_gateway_id.into(),
            id: id.into(),
        }
    }
}

pub type AddEndpointGatewayIpOptions = EndpointGatewayIpOptions;
pub type GetEndpointGatewayIpOptions = EndpointGatewayIpOptions;
pub type RemoveEndpointGatewayIpOptions = EndpointGatewayIpOptions;

impl VpcService {
    pub async fn list_endpoint_gateways(
        &self,
        options: &ListEndpointGatewaysOptions,
    ) -> Result<DetailedResponse<EndpointGatewayCollection>> {
        let request = ApiRequest::get("/endpoint_gateways")
            .query("name", options.name.as_deref())
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("vpc.id", options.vpc_id.as_deref());
        self.execute(request).await
    }

    pub async fn create_endpoint_gateway(
        &self,
        options: &CreateEndpointGatewayOptions,
    ) -> Result<DetailedResponse<EndpointGateway>> {
        let request = ApiRequest::post("/endpoint_gateways").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_endpoint_gateway(
        &self,
        options: &DeleteEndpointGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/endpoint_gateways/{id}"))).await
    }

    pub async fn get_endpoint_gateway(
        &self,
        options: &GetEndpointGatewayOptions,
    ) -> Result<DetailedResponse<EndpointGateway>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/endpoint_gateways/{id}"))).await
    }

    pub async fn update_endpoint_gateway(
        &self,
        options: &UpdateEndpointGatewayOptions,
    ) -> Result<DetailedResponse<EndpointGateway>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/endpoint_gateways/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_endpoint_gateway_ips(
        &self,
        options: &ListEndpointGatewayIpsOptions,
    ) -> Result<DetailedResponse<EndpointGatewayReservedIpCollection>> {
        let gateway_id = path_param("endpoint_gateway_id", &options.endpoint_gateway_id)?;
        let request = ApiRequest::get(format!("/endpoint_gateways/{gateway_id}/ips"))
            .page(options.start.as_deref(), options.limit)
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    /// Unbind a reserved IP from an endpoint gateway
    pub async fn remove_endpoint_gateway_ip(
        &self,
        options: &RemoveEndpointGatewayIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let gateway_id = path_param("endpoint_gateway_id", &options.endpoint_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/endpoint_gateways/{gateway_id}/ips/{id}")))
            .await
    }

    pub async fn get_endpoint_gateway_ip(
        &self,
        options: &GetEndpointGatewayIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let gateway_id = path_param("endpoint_gateway_id", &options.endpoint_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/endpoint_gateways/{gateway_id}/ips/{id}")))
            .await
    }

    /// Bind an existing reserved IP to an endpoint gateway
    pub async fn add_endpoint_gateway_ip(
        &self,
        options: &AddEndpointGatewayIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let gateway_id = path_param("endpoint_gateway_id", &options.endpoint_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::put(format!("/endpoint_gateways/{gateway_id}/ips/{id}")))
            .await
    }
}

paged_list!(
    ListEndpointGatewaysOptions,
    EndpointGatewayCollection,
    endpoint_gateways: EndpointGateway,
    list_endpoint_gateways
);
paged_list!(
    ListEndpointGatewayIpsOptions,
    EndpointGatewayReservedIpCollection,
    ips: ReservedIp,
    list_endpoint_gateway_ips
);
