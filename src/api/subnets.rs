//! Subnets and their reserved IPs

use super::common::{Identity, LifecycleState, NameReference, PageLink, Reference};
use super::network_acls::NetworkAcl;
use super::public_gateways::PublicGateway;
use super::vpcs::RoutingTable;
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subnet {
    pub available_ipv4_address_count: i64,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub ip_version: Option<String>,
    pub ipv4_cidr_block: String,
    pub name: String,
    pub network_acl: Reference,
    #[serde(default)]
    pub public_gateway: Option<Reference>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub routing_table: Option<Reference>,
    pub status: String,
    pub total_ipv4_address_count: i64,
    pub vpc: Reference,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubnetCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub subnets: Vec<Subnet>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// How the address range of a new subnet is chosen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubnetAddressing {
    /// Let the service pick a free block of the given size in the zone
    TotalCount {
        total_ipv4_address_count: i64,
        zone: Identity,
    },
    CidrBlock {
        ipv4_cidr_block: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        zone: Option<Identity>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubnetPrototype {
    pub vpc: Identity,
    #[serde(flatten)]
    pub addressing: SubnetAddressing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_acl: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gateway: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_table: Option<Identity>,
}

impl SubnetPrototype {
    pub fn new(vpc: Identity, addressing: SubnetAddressing) -> Self {
        Self {
            vpc,
            addressing,
            ip_version: None,
            name: None,
            network_acl: None,
            public_gateway: None,
            resource_group: None,
            routing_table: None,
        }
    }
}

/// Sparse update of a [`Subnet`]. Setting `public_gateway` to
/// [`PatchField::Null`] detaches the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubnetPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub network_acl: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub public_gateway: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub routing_table: PatchField<Identity>,
}

impl AsPatch for SubnetPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedIp {
    pub address: String,
    pub auto_delete: bool,
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub lifecycle_state: Option<LifecycleState>,
    pub name: String,
    /// `provider` or `user`
    pub owner: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub target: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedIpCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub reserved_ips: Vec<ReservedIp>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReservedIpPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub auto_delete: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for ReservedIpPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListSubnetsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub routing_table_id: Option<String>,
    pub routing_table_name: Option<String>,
    pub vpc_id: Option<String>,
    pub zone_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateSubnetOptions {
    pub subnet_prototype: SubnetPrototype,
}

impl CreateSubnetOptions {
    pub fn new(subnet_prototype: SubnetPrototype) -> Self {
        Self { subnet_prototype }
    }
}

/// Options addressing a single subnet
#[derive(Debug, Clone, Default)]
pub struct SubnetOptions {
    pub id: String,
}

impl SubnetOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteSubnetOptions = SubnetOptions;
pub type GetSubnetOptions = SubnetOptions;
pub type GetSubnetNetworkAclOptions = SubnetOptions;
pub type GetSubnetPublicGatewayOptions = SubnetOptions;
pub type UnsetSubnetPublicGatewayOptions = SubnetOptions;
pub type GetSubnetRoutingTableOptions = SubnetOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateSubnetOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateSubnetOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

/// Options attaching a resource (network ACL, public gateway, routing table)
/// to a subnet
#[derive(Debug, Clone)]
pub struct AttachToSubnetOptions {
    pub id: String,
    pub identity: Identity,
}

impl AttachToSubnetOptions {
    pub fn new(id: impl Into<String>, identity: Identity) -> Self {
        Self { id: id.into(), identity }
    }
}

pub type ReplaceSubnetNetworkAclOptions = AttachToSubnetOptions;
pub type SetSubnetPublicGatewayOptions = AttachToSubnetOptions;
pub type ReplaceSubnetRoutingTableOptions = AttachToSubnetOptions;

#[derive(Debug, Clone, Default)]
pub struct ListSubnetReservedIpsOptions {
    pub subnet_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    /// `name`, `-created_at`, `address`, ...
    pub sort: Option<String>,
}

impl ListSubnetReservedIpsOptions {
    pub fn new(subnet_id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSubnetReservedIpOptions {
    #[serde(skip)]
    pub subnet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Identity>,
}

impl CreateSubnetReservedIpOptions {
    pub fn new(subnet_id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubnetReservedIpOptions {
    pub subnet_id: String,
    pub id: String,
}

impl SubnetReservedIpOptions {
    pub fn new(subnet_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteSubnetReservedIpOptions = SubnetReservedIpOptions;
pub type GetSubnetReservedIpOptions = SubnetReservedIpOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateSubnetReservedIpOptions {
    pub subnet_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateSubnetReservedIpOptions {
    pub fn new(subnet_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_subnets(&self, options: &ListSubnetsOptions) -> Result<DetailedResponse<SubnetCollection>> {
        let request = ApiRequest::get("/subnets")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("routing_table.id", options.routing_table_id.as_deref())
            .query("routing_table.name", options.routing_table_name.as_deref())
            .query("vpc.id", options.vpc_id.as_deref())
            .query("zone.name", options.zone_name.as_deref());
        self.execute(request).await
    }

    /// Create a subnet, either in a given CIDR block or sized by address count
    pub async fn create_subnet(&self, options: &CreateSubnetOptions) -> Result<DetailedResponse<Subnet>> {
        let request = ApiRequest::post("/subnets").json(&options.subnet_prototype)?;
        self.execute(request).await
    }

    pub async fn delete_subnet(&self, options: &DeleteSubnetOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/subnets/{id}"))).await
    }

    pub async fn get_subnet(&self, options: &GetSubnetOptions) -> Result<DetailedResponse<Subnet>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/subnets/{id}"))).await
    }

    pub async fn update_subnet(&self, options: &UpdateSubnetOptions) -> Result<DetailedResponse<Subnet>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/subnets/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn get_subnet_network_acl(
        &self,
        options: &GetSubnetNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/subnets/{id}/network_acl"))).await
    }

    /// Attach a different network ACL to the subnet
    pub async fn replace_subnet_network_acl(
        &self,
        options: &ReplaceSubnetNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::put(format!("/subnets/{id}/network_acl")).json(&options.identity)?;
        self.execute(request).await
    }

    pub async fn get_subnet_public_gateway(
        &self,
        options: &GetSubnetPublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/subnets/{id}/public_gateway"))).await
    }

    pub async fn set_subnet_public_gateway(
        &self,
        options: &SetSubnetPublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::put(format!("/subnets/{id}/public_gateway")).json(&options.identity)?;
        self.execute(request).await
    }

    /// Detach the public gateway from the subnet
    pub async fn unset_subnet_public_gateway(
        &self,
        options: &UnsetSubnetPublicGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/subnets/{id}/public_gateway"))).await
    }

    pub async fn get_subnet_routing_table(
        &self,
        options: &GetSubnetRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/subnets/{id}/routing_table"))).await
    }

    pub async fn replace_subnet_routing_table(
        &self,
        options: &ReplaceSubnetRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::put(format!("/subnets/{id}/routing_table")).json(&options.identity)?;
        self.execute(request).await
    }

    pub async fn list_subnet_reserved_ips(
        &self,
        options: &ListSubnetReservedIpsOptions,
    ) -> Result<DetailedResponse<ReservedIpCollection>> {
        let subnet_id = path_param("subnet_id", &options.subnet_id)?;
        let request = ApiRequest::get(format!("/subnets/{subnet_id}/reserved_ips"))
            .page(options.start.as_deref(), options.limit)
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    /// Reserve an IP in the subnet; the service picks the address when none is given
    pub async fn create_subnet_reserved_ip(
        &self,
        options: &CreateSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let subnet_id = path_param("subnet_id", &options.subnet_id)?;
        let request = ApiRequest::post(format!("/subnets/{subnet_id}/reserved_ips")).json(options)?;
        self.execute(request).await
    }

    pub async fn delete_subnet_reserved_ip(
        &self,
        options: &DeleteSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let subnet_id = path_param("subnet_id", &options.subnet_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/subnets/{subnet_id}/reserved_ips/{id}")))
            .await
    }

    pub async fn get_subnet_reserved_ip(
        &self,
        options: &GetSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let subnet_id = path_param("subnet_id", &options.subnet_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/subnets/{subnet_id}/reserved_ips/{id}"))).await
    }

    pub async fn update_subnet_reserved_ip(
        &self,
        options: &UpdateSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let subnet_id = path_param("subnet_id", &options.subnet_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/subnets/{subnet_id}/reserved_ips/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(ListSubnetsOptions, SubnetCollection, subnets: Subnet, list_subnets);
paged_list!(
    ListSubnetReservedIpsOptions,
    ReservedIpCollection,
    reserved_ips: ReservedIp,
    list_subnet_reserved_ips
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subnet_prototype_by_total_count() {
        let prototype = SubnetPrototype {
            name: Some("my-subnet".into()),
            ..SubnetPrototype::new(
                Identity::id("r006-vpc"),
                SubnetAddressing::TotalCount {
                    total_ipv4_address_count: 256,
                    zone: Identity::name("us-south-1"),
                },
            )
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "vpc": {"id": "r006-vpc"},
                "total_ipv4_address_count": 256,
                "zone": {"name": "us-south-1"},
                "name": "my-subnet"
            })
        );
    }

    #[test]
    fn subnet_prototype_by_cidr_block_without_zone() {
        let prototype = SubnetPrototype::new(
            Identity::id("r006-vpc"),
            SubnetAddressing::CidrBlock {
                ipv4_cidr_block: "10.0.0.0/24".into(),
                zone: None,
            },
        );
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({"vpc": {"id": "r006-vpc"}, "ipv4_cidr_block": "10.0.0.0/24"})
        );
    }

    #[test]
    fn subnet_patch_null_detaches_public_gateway() {
        let patch = SubnetPatch {
            public_gateway: PatchField::Null,
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"public_gateway": null}));
    }

    #[test]
    fn reserved_ip_body_is_empty_when_nothing_chosen() {
        let options = CreateSubnetReservedIpOptions::new("r006-subnet");
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({}));
    }
}
