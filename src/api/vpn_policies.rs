//! IKE and IPsec policies for VPN gateway connections

use super::common::{Identity, PageLink, Reference};
use super::vpn_gateways::VpnGatewayConnectionCollection;
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IkePolicy {
    /// `md5`, `sha1`, `sha256`, `sha384` or `sha512`
    pub authentication_algorithm: String,
    #[serde(default)]
    pub connections: Vec<Reference>,
    pub created_at: DateTime<Utc>,
    pub dh_group: i64,
    /// `aes128`, `aes192`, `aes256` or `triple_des`
    pub encryption_algorithm: String,
    pub href: String,
    pub id: String,
    pub ike_version: i64,
    pub key_lifetime: i64,
    pub name: String,
    #[serde(default)]
    pub negotiation_mode: Option<String>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IkePolicyCollection {
    pub first: PageLink,
    pub ike_policies: Vec<IkePolicy>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IkePolicyPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub authentication_algorithm: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub dh_group: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub encryption_algorithm: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub ike_version: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub key_lifetime: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for IkePolicyPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpsecPolicy {
    /// `disabled`, `md5`, `sha1`, `sha256`, `sha384` or `sha512`
    pub authentication_algorithm: String,
    #[serde(default)]
    pub connections: Vec<Reference>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub encapsulation_mode: Option<String>,
    pub encryption_algorithm: String,
    pub href: String,
    pub id: String,
    pub key_lifetime: i64,
    pub name: String,
    /// Perfect forward secrecy: `disabled` or `group_<n>`
    pub pfs: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub transform_protocol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpsecPolicyCollection {
    pub first: PageLink,
    pub ipsec_policies: Vec<IpsecPolicy>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IpsecPolicyPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub authentication_algorithm: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub encryption_algorithm: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub key_lifetime: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub pfs: PatchField<String>,
}

impl AsPatch for IpsecPolicyPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListIkePoliciesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateIkePolicyOptions {
    pub authentication_algorithm: String,
    pub dh_group: i64,
    pub encryption_algorithm: String,
    pub ike_version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreateIkePolicyOptions {
    pub fn new(
        authentication_algorithm: impl Into<String>,
        dh_group: i64,
        encryption_algorithm: impl Into<String>,
        ike_version: i64,
    ) -> Self {
        Self {
            authentication_algorithm: authentication_algorithm.into(),
            dh_group,
            encryption_algorithm: encryption_algorithm.into(),
            ike_version,
            ..Default::default()
        }
    }
}

/// Options addressing one IKE or IPsec policy
#[derive(Debug, Clone, Default)]
pub struct VpnPolicyOptions {
    pub id: String,
}

impl VpnPolicyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteIkePolicyOptions = VpnPolicyOptions;
pub type GetIkePolicyOptions = VpnPolicyOptions;
pub type ListIkePolicyConnectionsOptions = VpnPolicyOptions;
pub type DeleteIpsecPolicyOptions = VpnPolicyOptions;
pub type GetIpsecPolicyOptions = VpnPolicyOptions;
pub type ListIpsecPolicyConnectionsOptions = VpnPolicyOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateVpnPolicyOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateVpnPolicyOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

pub type UpdateIkePolicyOptions = UpdateVpnPolicyOptions;
pub type UpdateIpsecPolicyOptions = UpdateVpnPolicyOptions;

#[derive(Debug, Clone, Default)]
pub struct ListIpsecPoliciesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateIpsecPolicyOptions {
    pub authentication_algorithm: String,
    pub encryption_algorithm: String,
    pub pfs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreateIpsecPolicyOptions {
    pub fn new(
        authentication_algorithm: impl Into<String>,
        encryption_algorithm: impl Into<String>,
        pfs: impl Into<String>,
    ) -> Self {
        Self {
            authentication_algorithm: authentication_algorithm.into(),
            encryption_algorithm: encryption_algorithm.into(),
            pfs: pfs.into(),
            ..Default::default()
        }
    }
}

impl VpcService {
    pub async fn list_ike_policies(&self, options: &ListIkePoliciesOptions) -> Result<DetailedResponse<IkePolicyCollection>> {
        let request = ApiRequest::get("/ike_policies").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_ike_policy(&self, options: &CreateIkePolicyOptions) -> Result<DetailedResponse<IkePolicy>> {
        required("authentication_algorithm", &options.authentication_algorithm)?;
        required("encryption_algorithm", &options.encryption_algorithm)?;
        let request = ApiRequest::post("/ike_policies").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_ike_policy(&self, options: &DeleteIkePolicyOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/ike_policies/{id}"))).await
    }

    pub async fn get_ike_policy(&self, options: &GetIkePolicyOptions) -> Result<DetailedResponse<IkePolicy>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/ike_policies/{id}"))).await
    }

    pub async fn update_ike_policy(&self, options: &UpdateIkePolicyOptions) -> Result<DetailedResponse<IkePolicy>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/ike_policies/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    /// List the VPN connections that use an IKE policy
    pub async fn list_ike_policy_connections(
        &self,
        options: &ListIkePolicyConnectionsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionCollection>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/ike_policies/{id}/connections"))).await
    }

    pub async fn list_ipsec_policies(
        &self,
        options: &ListIpsecPoliciesOptions,
    ) -> Result<DetailedResponse<IpsecPolicyCollection>> {
        let request = ApiRequest::get("/ipsec_policies").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_ipsec_policy(&self, options: &CreateIpsecPolicyOptions) -> Result<DetailedResponse<IpsecPolicy>> {
        required("authentication_algorithm", &options.authentication_algorithm)?;
        required("encryption_algorithm", &options.encryption_algorithm)?;
        required("pfs", &options.pfs)?;
        let request = ApiRequest::post("/ipsec_policies").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_ipsec_policy(&self, options: &DeleteIpsecPolicyOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/ipsec_policies/{id}"))).await
    }

    pub async fn get_ipsec_policy(&self, options: &GetIpsecPolicyOptions) -> Result<DetailedResponse<IpsecPolicy>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/ipsec_policies/{id}"))).await
    }

    pub async fn update_ipsec_policy(&self, options: &UpdateIpsecPolicyOptions) -> Result<DetailedResponse<IpsecPolicy>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/ipsec_policies/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_ipsec_policy_connections(
        &self,
        options: &ListIpsecPolicyConnectionsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionCollection>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/ipsec_policies/{id}/connections"))).await
    }
}

paged_list!(
    ListIkePoliciesOptions,
    IkePolicyCollection,
    ike_policies: IkePolicy,
    list_ike_policies
);
paged_list!(
    ListIpsecPoliciesOptions,
    IpsecPolicyCollection,
    ipsec_policies: IpsecPolicy,
    list_ipsec_policies
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ike_policy_create_body() {
        let options = CreateIkePolicyOptions {
            key_lifetime: Some(28800),
            name: Some("my-ike-policy".to_string()),
            ..CreateIkePolicyOptions::new("sha256", 14, "aes128", 1)
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "authentication_algorithm": "sha256",
                "dh_group": 14,
                "encryption_algorithm": "aes128",
                "ike_version": 1,
                "key_lifetime": 28800,
                "name": "my-ike-policy"
            })
        );
    }

    #[test]
    fn ipsec_policy_decodes_connections() {
        let policy: IpsecPolicy = serde_json::from_value(json!({
            "authentication_algorithm": "disabled",
            "connections": [{
                "href": "https://us-south.iaas.cloud.ibm.com/v1/vpn_gateways/gw-1/connections/c-1",
                "id": "c-1",
                "name": "my-connection"
            }],
            "created_at": "2024-04-30T12:00:00Z",
            "encapsulation_mode": "tunnel",
            "encryption_algorithm": "aes256gcm16",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/ipsec_policies/ipsec-1",
            "id": "ipsec-1",
            "key_lifetime": 3600,
            "name": "my-ipsec-policy",
            "pfs": "group_14",
            "transform_protocol": "esp"
        }))
        .unwrap();
        assert_eq!(policy.connections.len(), 1);
        assert_eq!(policy.connections[0].id, "c-1");
        assert_eq!(policy.pfs, "group_14");
    }

    #[test]
    fn ipsec_patch_keeps_unset_fields_out() {
        let patch = IpsecPolicyPatch {
            pfs: "disabled".into(),
            key_lifetime: PatchField::Set(1800),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"key_lifetime": 1800, "pfs": "disabled"}));
        assert!(!patch.contains_key("name"));
    }
}
