//! VPCs, address prefixes, routing tables and routes

use super::common::{Identity, Ip, LifecycleState, NameReference, PageLink, Reference};
use super::network_acls::NetworkAcl;
use super::security_groups::SecurityGroup;
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vpc {
    #[serde(default)]
    pub classic_access: bool,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    #[serde(default)]
    pub default_network_acl: Option<Reference>,
    #[serde(default)]
    pub default_routing_table: Option<Reference>,
    #[serde(default)]
    pub default_security_group: Option<Reference>,
    #[serde(default)]
    pub health_state: Option<String>,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpcCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
    pub vpcs: Vec<Vpc>,
}

/// Sparse update of a [`Vpc`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VpcPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for VpcPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPrefix {
    pub cidr: String,
    pub created_at: DateTime<Utc>,
    pub has_subnets: bool,
    pub href: String,
    pub id: String,
    pub is_default: bool,
    pub name: String,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPrefixCollection {
    pub address_prefixes: Vec<AddressPrefix>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddressPrefixPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub is_default: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for AddressPrefixPatch {}

/// A route source a routing table accepts routes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFilter {
    pub resource_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingTable {
    #[serde(default)]
    pub accept_routes_from: Vec<ResourceFilter>,
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    pub is_default: bool,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub route_direct_link_ingress: bool,
    #[serde(default)]
    pub route_internet_ingress: bool,
    #[serde(default)]
    pub route_transit_gateway_ingress: bool,
    #[serde(default)]
    pub route_vpc_zone_ingress: bool,
    #[serde(default)]
    pub routes: Vec<Reference>,
    #[serde(default)]
    pub subnets: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingTableCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub routing_tables: Vec<RoutingTable>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoutingTablePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub accept_routes_from: PatchField<Vec<ResourceFilter>>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub route_direct_link_ingress: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub route_internet_ingress: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub route_transit_gateway_ingress: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub route_vpc_zone_ingress: PatchField<bool>,
}

impl AsPatch for RoutingTablePatch {}

/// Where a route sends matching traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteNextHop {
    Ip(Ip),
    /// A VPN gateway connection
    Connection(Reference),
}

/// Next hop in a route request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteNextHopPrototype {
    Ip(Ip),
    Connection(Identity),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub destination: String,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    #[serde(default)]
    pub next_hop: Option<RouteNextHop>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub routes: Vec<Route>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoutePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub next_hop: PatchField<RouteNextHopPrototype>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub priority: PatchField<i64>,
}

impl AsPatch for RoutePatch {}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListVpcsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    /// Filter by `resource_group.id`
    pub resource_group_id: Option<String>,
    pub classic_access: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVpcOptions {
    /// `auto` (default) or `manual`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_prefix_management: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classic_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteVpcOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteVpcOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetVpcOptions {
    pub id: String,
}

impl GetVpcOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVpcOptions {
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateVpcOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

/// Options shared by the `get_vpc_default_*` operations
#[derive(Debug, Clone, Default)]
pub struct GetVpcDefaultOptions {
    pub id: String,
}

impl GetVpcDefaultOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListVpcAddressPrefixesOptions {
    pub vpc_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListVpcAddressPrefixesOptions {
    pub fn new(vpc_id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVpcAddressPrefixOptions {
    #[serde(skip)]
    pub vpc_id: String,
    pub cidr: String,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CreateVpcAddressPrefixOptions {
    pub fn new(vpc_id: impl Into<String>, cidr: impl Into<String>, zone: Identity) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            cidr: cidr.into(),
            zone,
            is_default: None,
            name: None,
        }
    }
}

/// Options addressing one child resource of a VPC (address prefix, routing table)
#[derive(Debug, Clone, Default)]
pub struct VpcChildOptions {
    pub vpc_id: String,
    pub id: String,
}

impl VpcChildOptions {
    pub fn new(vpc_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteVpcAddressPrefixOptions = VpcChildOptions;
pub type GetVpcAddressPrefixOptions = VpcChildOptions;
pub type DeleteVpcRoutingTableOptions = VpcChildOptions;
pub type GetVpcRoutingTableOptions = VpcChildOptions;

/// Options updating one child resource of a VPC
#[derive(Debug, Clone, Default)]
pub struct UpdateVpcChildOptions {
    pub vpc_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateVpcChildOptions {
    pub fn new(vpc_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateVpcAddressPrefixOptions = UpdateVpcChildOptions;
pub type UpdateVpcRoutingTableOptions = UpdateVpcChildOptions;

#[derive(Debug, Clone, Default)]
pub struct ListVpcRoutingTablesOptions {
    pub vpc_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub is_default: Option<bool>,
}

impl ListVpcRoutingTablesOptions {
    pub fn new(vpc_id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVpcRoutingTableOptions {
    #[serde(skip)]
    pub vpc_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_routes_from: Option<Vec<ResourceFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_direct_link_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_internet_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_transit_gateway_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_vpc_zone_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RoutePrototype>>,
}

impl CreateVpcRoutingTableOptions {
    pub fn new(vpc_id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            ..Default::default()
        }
    }
}

/// A route, as created inline with a routing table or on its own
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePrototype {
    pub destination: String,
    pub zone: Identity,
    /// `delegate`, `delegate_vpc`, `deliver` (default) or `drop`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop: Option<RouteNextHopPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl RoutePrototype {
    pub fn new(destination: impl Into<String>, zone: Identity) -> Self {
        Self {
            destination: destination.into(),
            zone,
            action: None,
            name: None,
            next_hop: None,
            priority: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListVpcRoutingTableRoutesOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListVpcRoutingTableRoutesOptions {
    pub fn new(vpc_id: impl Into<String>, routing_table_id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateVpcRoutingTableRouteOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub route: RoutePrototype,
}

impl CreateVpcRoutingTableRouteOptions {
    pub fn new(
        vpc_id: impl Into<String>,
        routing_table_id: impl Into<String>,
        route: RoutePrototype,
    ) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
            route,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub id: String,
}

impl RouteOptions {
    pub fn new(
        vpc_id: impl Into<String>,
        routing_table_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteVpcRoutingTableRouteOptions = RouteOptions;
pub type GetVpcRoutingTableRouteOptions = RouteOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateVpcRoutingTableRouteOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateVpcRoutingTableRouteOptions {
    pub fn new(
        vpc_id: impl Into<String>,
        routing_table_id: impl Into<String>,
        id: impl Into<String>,
        patch: Patch,
    ) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
            id: id.into(),
            patch,
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

impl VpcService {
    /// List all VPCs
    pub async fn list_vpcs(&self, options: &ListVpcsOptions) -> Result<DetailedResponse<VpcCollection>> {
        let request = ApiRequest::get("/vpcs")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("classic_access", options.classic_access);
        self.execute(request).await
    }

    /// Create a VPC
    pub async fn create_vpc(&self, options: &CreateVpcOptions) -> Result<DetailedResponse<Vpc>> {
        let request = ApiRequest::post("/vpcs").json(options)?;
        self.execute(request).await
    }

    /// Delete a VPC. It must not contain any subnets, gateways or
    /// non-default routing tables.
    pub async fn delete_vpc(&self, options: &DeleteVpcOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/vpcs/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute_empty(request).await
    }

    pub async fn get_vpc(&self, options: &GetVpcOptions) -> Result<DetailedResponse<Vpc>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpcs/{id}"))).await
    }

    pub async fn update_vpc(&self, options: &UpdateVpcOptions) -> Result<DetailedResponse<Vpc>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/vpcs/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    /// Retrieve the network ACL new subnets of the VPC get by default
    pub async fn get_vpc_default_network_acl(
        &self,
        options: &GetVpcDefaultOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpcs/{id}/default_network_acl"))).await
    }

    pub async fn get_vpc_default_routing_table(
        &self,
        options: &GetVpcDefaultOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpcs/{id}/default_routing_table"))).await
    }

    pub async fn get_vpc_default_security_group(
        &self,
        options: &GetVpcDefaultOptions,
    ) -> Result<DetailedResponse<SecurityGroup>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpcs/{id}/default_security_group"))).await
    }

    // -------------------------------------------------------------------------
    // Address prefixes
    // -------------------------------------------------------------------------

    pub async fn list_vpc_address_prefixes(
        &self,
        options: &ListVpcAddressPrefixesOptions,
    ) -> Result<DetailedResponse<AddressPrefixCollection>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let request = ApiRequest::get(format!("/vpcs/{vpc_id}/address_prefixes"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_vpc_address_prefix(
        &self,
        options: &CreateVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<AddressPrefix>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        required("cidr", &options.cidr)?;
        let request = ApiRequest::post(format!("/vpcs/{vpc_id}/address_prefixes")).json(options)?;
        self.execute(request).await
    }

    /// Delete an address prefix. It must not have any subnets.
    pub async fn delete_vpc_address_prefix(
        &self,
        options: &DeleteVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<()>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/vpcs/{vpc_id}/address_prefixes/{id}")))
            .await
    }

    pub async fn get_vpc_address_prefix(
        &self,
        options: &GetVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<AddressPrefix>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpcs/{vpc_id}/address_prefixes/{id}"))).await
    }

    pub async fn update_vpc_address_prefix(
        &self,
        options: &UpdateVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<AddressPrefix>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/vpcs/{vpc_id}/address_prefixes/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Routing tables
    // -------------------------------------------------------------------------

    pub async fn list_vpc_routing_tables(
        &self,
        options: &ListVpcRoutingTablesOptions,
    ) -> Result<DetailedResponse<RoutingTableCollection>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let request = ApiRequest::get(format!("/vpcs/{vpc_id}/routing_tables"))
            .page(options.start.as_deref(), options.limit)
            .query("is_default", options.is_default);
        self.execute(request).await
    }

    pub async fn create_vpc_routing_table(
        &self,
        options: &CreateVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let request = ApiRequest::post(format!("/vpcs/{vpc_id}/routing_tables")).json(options)?;
        self.execute(request).await
    }

    /// Delete a routing table. The default routing table cannot be deleted.
    pub async fn delete_vpc_routing_table(
        &self,
        options: &DeleteVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<()>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/vpcs/{vpc_id}/routing_tables/{id}")))
            .await
    }

    pub async fn get_vpc_routing_table(
        &self,
        options: &GetVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/vpcs/{vpc_id}/routing_tables/{id}"))).await
    }

    pub async fn update_vpc_routing_table(
        &self,
        options: &UpdateVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/vpcs/{vpc_id}/routing_tables/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Routes
    // -------------------------------------------------------------------------

    pub async fn list_vpc_routing_table_routes(
        &self,
        options: &ListVpcRoutingTableRoutesOptions,
    ) -> Result<DetailedResponse<RouteCollection>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let table_id = path_param("routing_table_id", &options.routing_table_id)?;
        let request = ApiRequest::get(format!("/vpcs/{vpc_id}/routing_tables/{table_id}/routes"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_vpc_routing_table_route(
        &self,
        options: &CreateVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<Route>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let table_id = path_param("routing_table_id", &options.routing_table_id)?;
        required("destination", &options.route.destination)?;
        let request = ApiRequest::post(format!("/vpcs/{vpc_id}/routing_tables/{table_id}/routes"))
            .json(&options.route)?;
        self.execute(request).await
    }

    pub async fn delete_vpc_routing_table_route(
        &self,
        options: &DeleteVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<()>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let table_id = path_param("routing_table_id", &options.routing_table_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::delete(format!("/vpcs/{vpc_id}/routing_tables/{table_id}/routes/{id}"));
        self.execute_empty(request).await
    }

    pub async fn get_vpc_routing_table_route(
        &self,
        options: &GetVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<Route>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let table_id = path_param("routing_table_id", &options.routing_table_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::get(format!("/vpcs/{vpc_id}/routing_tables/{table_id}/routes/{id}"));
        self.execute(request).await
    }

    pub async fn update_vpc_routing_table_route(
        &self,
        options: &UpdateVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<Route>> {
        let vpc_id = path_param("vpc_id", &options.vpc_id)?;
        let table_id = path_param("routing_table_id", &options.routing_table_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/vpcs/{vpc_id}/routing_tables/{table_id}/routes/{id}"))
                .merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(ListVpcsOptions, VpcCollection, vpcs: Vpc, list_vpcs);
paged_list!(
    ListVpcAddressPrefixesOptions,
    AddressPrefixCollection,
    address_prefixes: AddressPrefix,
    list_vpc_address_prefixes
);
paged_list!(
    ListVpcRoutingTablesOptions,
    RoutingTableCollection,
    routing_tables: RoutingTable,
    list_vpc_routing_tables
);
paged_list!(
    ListVpcRoutingTableRoutesOptions,
    RouteCollection,
    routes: Route,
    list_vpc_routing_table_routes
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vpc_patch_only_carries_name() {
        let patch = VpcPatch {
            name: "my-vpc-modified".into(),
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"name": "my-vpc-modified"}));
    }

    #[test]
    fn create_vpc_body_omits_unset_fields() {
        let options = CreateVpcOptions {
            name: Some("my-vpc".into()),
            resource_group: Some(Identity::id("fee82deba12e4c0fb69c3b09d1f12345")),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "name": "my-vpc",
                "resource_group": {"id": "fee82deba12e4c0fb69c3b09d1f12345"}
            })
        );
    }

    #[test]
    fn address_prefix_body_skips_path_parameter() {
        let options =
            CreateVpcAddressPrefixOptions::new("r006-vpc", "10.0.0.0/24", Identity::name("us-south-1"));
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"cidr": "10.0.0.0/24", "zone": {"name": "us-south-1"}})
        );
    }

    #[test]
    fn route_next_hop_decodes_ip_or_connection() {
        let hop: RouteNextHop = serde_json::from_value(json!({"address": "192.168.3.4"})).unwrap();
        assert_eq!(hop, RouteNextHop::Ip(Ip::new("192.168.3.4")));

        let hop: RouteNextHop = serde_json::from_value(json!({
            "href": "https://x/v1/vpn_gateways/g/connections/c",
            "id": "c",
            "name": "my-connection"
        }))
        .unwrap();
        assert!(matches!(hop, RouteNextHop::Connection(ref r) if r.id == "c"));
    }

    #[test]
    fn routing_table_patch_clears_accept_routes_from() {
        let patch = RoutingTablePatch {
            accept_routes_from: PatchField::Set(vec![]),
            route_internet_ingress: PatchField::Set(false),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(
            patch.to_value(),
            json!({"accept_routes_from": [], "route_internet_ingress": false})
        );
    }
}
