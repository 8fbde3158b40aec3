//! Private path service gateways, their account policies and endpoint
//! gateway bindings

use super::common::{Identity, LifecycleState, PageLink, Reference};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountReference {
    pub id: String,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub id: String,
}

impl AccountIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivatePathServiceGateway {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    /// `deny`, `permit` or `review`
    pub default_access_policy: String,
    #[serde(default)]
    pub endpoint_gateway_binding_auto_delete: Option<bool>,
    #[serde(default)]
    pub endpoint_gateway_binding_auto_delete_timeout: Option<i64>,
    pub endpoint_gateway_count: i64,
    pub health_state: String,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub load_balancer: Reference,
    pub name: String,
    pub published: bool,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub service_endpoints: Vec<String>,
    pub vpc: Reference,
    pub zonal_affinity: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivatePathServiceGatewayCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub private_path_service_gateways: Vec<PrivatePathServiceGateway>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrivatePathServiceGatewayPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub default_access_policy: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub load_balancer: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub zonal_affinity: PatchField<bool>,
}

impl AsPatch for PrivatePathServiceGatewayPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivatePathServiceGatewayAccountPolicy {
    pub access_policy: String,
    pub account: AccountReference,
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivatePathServiceGatewayAccountPolicyCollection {
    pub account_policies: Vec<PrivatePathServiceGatewayAccountPolicy>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrivatePathServiceGatewayAccountPolicyPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub access_policy: PatchField<String>,
}

impl AsPatch for PrivatePathServiceGatewayAccountPolicyPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivatePathServiceGatewayEndpointGatewayBinding {
    pub account: AccountReference,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expiration_at: Option<DateTime<Utc>>,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// `abandoned`, `denied`, `expired`, `pending` or `permitted`
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivatePathServiceGatewayEndpointGatewayBindingCollection {
    pub endpoint_gateway_bindings: Vec<PrivatePathServiceGatewayEndpointGatewayBinding>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ListPrivatePathServiceGatewaysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePrivatePathServiceGatewayOptions {
    pub load_balancer: Identity,
    pub service_endpoints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_access_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zonal_affinity: Option<bool>,
}

impl CreatePrivatePathServiceGatewayOptions {
    pub fn new(load_balancer: Identity, service_endpoints: Vec<String>) -> Self {
        Self {
            load_balancer,
            service_endpoints,
            default_access_policy: None,
            name: None,
            resource_group: None,
            zonal_affinity: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrivatePathServiceGatewayOptions {
    pub id: String,
}

impl PrivatePathServiceGatewayOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeletePrivatePathServiceGatewayOptions = PrivatePathServiceGatewayOptions;
pub type GetPrivatePathServiceGatewayOptions = PrivatePathServiceGatewayOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdatePrivatePathServiceGatewayOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdatePrivatePathServiceGatewayOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPrivatePathServiceGatewayAccountPoliciesOptions {
    pub private_path_service_gateway_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub account_id: Option<String>,
}

impl ListPrivatePathServiceGatewayAccountPoliciesOptions {
    pub fn new(private_path_service_gateway_id: impl Into<String>) -> Self {
        Self {
            private_path_service_gateway_id: private_path_service_gateway_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePrivatePathServiceGatewayAccountPolicyOptions {
    #[serde(skip)]
    pub private_path_service_gateway_id: String,
    /// `deny`, `permit` or `review`
    pub access_policy: String,
    pub account: AccountIdentity,
}

impl CreatePrivatePathServiceGatewayAccountPolicyOptions {
    pub fn new(
        private_path_service_gateway_id: impl Into<String>,
        access_policy: impl Into<String>,
        account: AccountIdentity,
    ) -> Self {
        Self {
            private_path_service_gateway_id: private_path_service_gateway_id.into(),
            access_policy: access_policy.into(),
            account,
        }
    }
}

/// Options addressing one account policy or endpoint gateway binding
#[derive(Debug, Clone, Default)]
pub struct PrivatePathServiceGatewayChildOptions {
    pub private_path_service_gateway_id: String,
    pub id: String,
}

impl PrivatePathServiceGatewayChildOptions {
    pub fn new(private_path_service_gateway_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            private_path_service_gateway_id: private_path_service_gateway_id.into(),
            id: id.into(),
        }
    }
}

pub type DeletePrivatePathServiceGatewayAccountPolicyOptions = PrivatePathServiceGatewayChildOptions;
pub type GetPrivatePathServiceGatewayAccountPolicyOptions = PrivatePathServiceGatewayChildOptions;
pub type GetPrivatePathServiceGatewayEndpointGatewayBindingOptions = PrivatePathServiceGatewayChildOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdatePrivatePathServiceGatewayAccountPolicyOptions {
    pub private_path_service_gateway_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdatePrivatePathServiceGatewayAccountPolicyOptions {
    pub fn new(private_path_service_gateway_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            private_path_service_gateway_id: private_path_service_gateway_id.into(),
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPrivatePathServiceGatewayEndpointGatewayBindingsOptions {
    pub private_path_service_gateway_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub account_id: Option<String>,
}

impl ListPrivatePathServiceGatewayEndpointGatewayBindingsOptions {
    pub fn new(private_path_service_gateway_id: impl Into<String>) -> Self {
        Self {
            private_path_service_gateway_id: private_path_service_gateway_id.into(),
            ..Default::default()
        }
    }
}

/// Permit or deny a pending endpoint gateway binding
#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointGatewayBindingDecisionOptions {
    #[serde(skip)]
    pub private_path_service_gateway_id: String,
    #[serde(skip)]
    pub id: String,
    /// Also record the decision as the account policy of the binding's account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_account_policy: Option<bool>,
}

impl EndpointGatewayBindingDecisionOptions {
    pub fn new(private_path_service_gateway_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            private_path_service_gateway_id: private_path_service_gateway_id.into(),
            id: id.into(),
            set_account_policy: None,
        }
    }
}

pub type PermitPrivatePathServiceGatewayEndpointGatewayBindingOptions = EndpointGatewayBindingDecisionOptions;
pub type DenyPrivatePathServiceGatewayEndpointGatewayBindingOptions = EndpointGatewayBindingDecisionOptions;

#[derive(Debug, Clone, Serialize)]
pub struct RevokeAccountForPrivatePathServiceGatewayOptions {
    #[serde(skip)]
    pub private_path_service_gateway_id: String,
    pub account: AccountIdentity,
}

impl RevokeAccountForPrivatePathServiceGatewayOptions {
    pub fn new(private_path_service_gateway_id: impl Into<String>, account: AccountIdentity) -> Self {
        Self {
            private_path_service_gateway_id: private_path_service_gateway_id.into(),
            account,
        }
    }
}

impl VpcService {
    pub async fn list_private_path_service_gateways(
        &self,
        options: &ListPrivatePathServiceGatewaysOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGatewayCollection>> {
        let request = ApiRequest::get("/private_path_service_gateways")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref());
        self.execute(request).await
    }

    pub async fn create_private_path_service_gateway(
        &self,
        options: &CreatePrivatePathServiceGatewayOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGateway>> {
        let request = ApiRequest::post("/private_path_service_gateways").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_private_path_service_gateway(
        &self,
        options: &DeletePrivatePathServiceGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/private_path_service_gateways/{id}")))
            .await
    }

    pub async fn get_private_path_service_gateway(
        &self,
        options: &GetPrivatePathServiceGatewayOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGateway>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/private_path_service_gateways/{id}")))
            .await
    }

    pub async fn update_private_path_service_gateway(
        &self,
        options: &UpdatePrivatePathServiceGatewayOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGateway>> {
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/private_path_service_gateways/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_private_path_service_gateway_account_policies(
        &self,
        options: &ListPrivatePathServiceGatewayAccountPoliciesOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGatewayAccountPolicyCollection>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        let request = ApiRequest::get(format!("/private_path_service_gateways/{gateway_id}/account_policies"))
            .page(options.start.as_deref(), options.limit)
            .query("account.id", options.account_id.as_deref());
        self.execute(request).await
    }

    pub async fn create_private_path_service_gateway_account_policy(
        &self,
        options: &CreatePrivatePathServiceGatewayAccountPolicyOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGatewayAccountPolicy>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        required("access_policy", &options.access_policy)?;
        required("account.id", &options.account.id)?;
        let request =
            ApiRequest::post(format!("/private_path_service_gateways/{gateway_id}/account_policies")).json(options)?;
        self.execute(request).await
    }

    pub async fn delete_private_path_service_gateway_account_policy(
        &self,
        options: &DeletePrivatePathServiceGatewayAccountPolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!(
            "/private_path_service_gateways/{gateway_id}/account_policies/{id}"
        )))
        .await
    }

    pub async fn get_private_path_service_gateway_account_policy(
        &self,
        options: &GetPrivatePathServiceGatewayAccountPolicyOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGatewayAccountPolicy>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!(
            "/private_path_service_gateways/{gateway_id}/account_policies/{id}"
        )))
        .await
    }

    pub async fn update_private_path_service_gateway_account_policy(
        &self,
        options: &UpdatePrivatePathServiceGatewayAccountPolicyOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGatewayAccountPolicy>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!(
            "/private_path_service_gateways/{gateway_id}/account_policies/{id}"
        ))
        .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_private_path_service_gateway_endpoint_gateway_bindings(
        &self,
        options: &ListPrivatePathServiceGatewayEndpointGatewayBindingsOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGatewayEndpointGatewayBindingCollection>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        let request = ApiRequest::get(format!(
            "/private_path_service_gateways/{gateway_id}/endpoint_gateway_bindings"
        ))
        .page(options.start.as_deref(), options.limit)
        .query("status", options.status.as_deref())
        .query("account.id", options.account_id.as_deref());
        self.execute(request).await
    }

    pub async fn get_private_path_service_gateway_endpoint_gateway_binding(
        &self,
        options: &GetPrivatePathServiceGatewayEndpointGatewayBindingOptions,
    ) -> Result<DetailedResponse<PrivatePathServiceGatewayEndpointGatewayBinding>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!(
            "/private_path_service_gateways/{gateway_id}/endpoint_gateway_bindings/{id}"
        )))
        .await
    }

    pub async fn permit_private_path_service_gateway_endpoint_gateway_binding(
        &self,
        options: &PermitPrivatePathServiceGatewayEndpointGatewayBindingOptions,
    ) -> Result<DetailedResponse<()>> {
        self.decide_endpoint_gateway_binding(options, "permit").await
    }

    pub async fn deny_private_path_service_gateway_endpoint_gateway_binding(
        &self,
        options: &DenyPrivatePathServiceGatewayEndpointGatewayBindingOptions,
    ) -> Result<DetailedResponse<()>> {
        self.decide_endpoint_gateway_binding(options, "deny").await
    }

    async fn decide_endpoint_gateway_binding(
        &self,
        options: &EndpointGatewayBindingDecisionOptions,
        decision: &str,
    ) -> Result<DetailedResponse<()>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::post(format!(
            "/private_path_service_gateways/{gateway_id}/endpoint_gateway_bindings/{id}/{decision}"
        ))
        .json(options)?;
        self.execute_empty(request).await
    }

    /// Deny every current and future binding from an account
    pub async fn revoke_account_for_private_path_service_gateway(
        &self,
        options: &RevokeAccountForPrivatePathServiceGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let gateway_id = path_param("private_path_service_gateway_id", &options.private_path_service_gateway_id)?;
        required("account.id", &options.account.id)?;
        let request =
            ApiRequest::post(format!("/private_path_service_gateways/{gateway_id}/revoke_account")).json(options)?;
        self.execute_empty(request).await
    }
}

paged_list!(
    ListPrivatePathServiceGatewaysOptions,
    PrivatePathServiceGatewayCollection,
    private_path_service_gateways: PrivatePathServiceGateway,
    list_private_path_service_gateways
);
paged_list!(
    ListPrivatePathServiceGatewayAccountPoliciesOptions,
    PrivatePathServiceGatewayAccountPolicyCollection,
    account_policies: PrivatePathServiceGatewayAccountPolicy,
    list_private_path_service_gateway_account_policies
);
paged_list!(
    ListPrivatePathServiceGatewayEndpointGatewayBindingsOptions,
    PrivatePathServiceGatewayEndpointGatewayBindingCollection,
    endpoint_gateway_bindings: PrivatePathServiceGatewayEndpointGatewayBinding,
    list_private_path_service_gateway_endpoint_gateway_bindings
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_gateway_body() {
        let options = CreatePrivatePathServiceGatewayOptions {
            default_access_policy: Some("review".to_string()),
            ..CreatePrivatePathServiceGatewayOptions::new(
                Identity::id("lb-1"),
                vec!["my-service.example.com".to_string()],
            )
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "load_balancer": {"id": "lb-1"},
                "service_endpoints": ["my-service.example.com"],
                "default_access_policy": "review"
            })
        );
    }

    #[test]
    fn binding_decision_body_omits_path_parameters() {
        let options = EndpointGatewayBindingDecisionOptions {
            set_account_policy: Some(true),
            ..EndpointGatewayBindingDecisionOptions::new("ppsg-1", "binding-1")
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"set_account_policy": true})
        );
    }

    #[test]
    fn revoke_body_carries_account() {
        let options = RevokeAccountForPrivatePathServiceGatewayOptions::new(
            "ppsg-1",
            AccountIdentity::new("aa2432b1fa4d4ace891e9b80fc104e34"),
        );
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"account": {"id": "aa2432b1fa4d4ace891e9b80fc104e34"}})
        );
    }
}
