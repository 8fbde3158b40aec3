//! Public gateways

use super::common::{Identity, NameReference, PageLink, Reference};
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicGatewayFloatingIp {
    pub address: String,
    #[serde(default)]
    pub crn: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicGateway {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub floating_ip: PublicGatewayFloatingIp,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// `available`, `deleting`, `failed` or `pending`
    pub status: String,
    pub vpc: Reference,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicGatewayCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub public_gateways: Vec<PublicGateway>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Floating IP of a new public gateway: an existing one, or an address to reserve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PublicGatewayFloatingIpPrototype {
    Existing(Identity),
    New {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        resource_group: Option<Identity>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePublicGatewayOptions {
    pub vpc: Identity,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_ip: Option<PublicGatewayFloatingIpPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreatePublicGatewayOptions {
    pub fn new(vpc: Identity, zone: Identity) -> Self {
        Self {
            vpc,
            zone,
            floating_ip: None,
            name: None,
            resource_group: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublicGatewayPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for PublicGatewayPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListPublicGatewaysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PublicGatewayOptions {
    pub id: String,
}

impl PublicGatewayOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeletePublicGatewayOptions = PublicGatewayOptions;
pub type GetPublicGatewayOptions = PublicGatewayOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdatePublicGatewayOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdatePublicGatewayOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl VpcService {
    pub async fn list_public_gateways(
        &self,
        options: &ListPublicGatewaysOptions,
    ) -> Result<DetailedResponse<PublicGatewayCollection>> {
        let request = ApiRequest::get("/public_gateways")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref());
        self.execute(request).await
    }

    pub async fn create_public_gateway(
        &self,
        options: &CreatePublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let request = ApiRequest::post("/public_gateways").json(options)?;
        self.execute(request).await
    }

    /// Delete a public gateway. It must not be attached to any subnet.
    pub async fn delete_public_gateway(&self, options: &DeletePublicGatewayOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/public_gateways/{id}"))).await
    }

    pub async fn get_public_gateway(&self, options: &GetPublicGatewayOptions) -> Result<DetailedResponse<PublicGateway>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/public_gateways/{id}"))).await
    }

    pub async fn update_public_gateway(
        &self,
        options: &UpdatePublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/public_gateways/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListPublicGatewaysOptions,
    PublicGatewayCollection,
    public_gateways: PublicGateway,
    list_public_gateways
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_reserves_named_floating_ip() {
        let options = CreatePublicGatewayOptions {
            floating_ip: Some(PublicGatewayFloatingIpPrototype::New {
                name: Some("my-gateway-ip".to_string()),
                resource_group: None,
            }),
            ..CreatePublicGatewayOptions::new(Identity::id("vpc-1"), Identity::name("us-south-1"))
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "vpc": {"id": "vpc-1"},
                "zone": {"name": "us-south-1"},
                "floating_ip": {"name": "my-gateway-ip"}
            })
        );
    }

    #[test]
    fn create_binds_existing_floating_ip() {
        let options = CreatePublicGatewayOptions {
            floating_ip: Some(PublicGatewayFloatingIpPrototype::Existing(Identity::id("fip-1"))),
            ..CreatePublicGatewayOptions::new(Identity::id("vpc-1"), Identity::name("us-south-1"))
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap()["floating_ip"],
            json!({"id": "fip-1"})
        );
    }
}
