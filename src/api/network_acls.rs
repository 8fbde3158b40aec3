//! Network ACLs and their rules
//!
//! Rules are polymorphic on `protocol`: `all`, `icmp` (optional `code` and
//! `type`) or `tcp` / `udp` (port ranges). [`NetworkAclRuleProtocol`] carries
//! the per-protocol fields and is flattened into both the rule model and the
//! rule prototype.

use super::common::{Identity, PageLink, Reference};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port ranges of a TCP or UDP rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAclRulePorts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_port_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_port_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port_min: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "lowercase")]
pub enum NetworkAclRuleProtocol {
    All,
    Icmp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<i64>,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        icmp_type: Option<i64>,
    },
    Tcp(NetworkAclRulePorts),
    Udp(NetworkAclRulePorts),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclRule {
    /// `allow` or `deny`
    pub action: String,
    /// The rule this one is evaluated before; absent for the last rule
    #[serde(default)]
    pub before: Option<Reference>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub destination: String,
    /// `inbound` or `outbound`
    pub direction: String,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub ip_version: Option<String>,
    pub name: String,
    pub source: String,
    #[serde(flatten)]
    pub protocol: NetworkAclRuleProtocol,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclRuleCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub rules: Vec<NetworkAclRule>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkAclRulePrototype {
    pub action: String,
    pub destination: String,
    pub direction: String,
    pub source: String,
    #[serde(flatten)]
    pub protocol: NetworkAclRuleProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NetworkAclRulePrototype {
    pub fn new(
        action: impl Into<String>,
        direction: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        protocol: NetworkAclRuleProtocol,
    ) -> Self {
        Self {
            action: action.into(),
            destination: destination.into(),
            direction: direction.into(),
            source: source.into(),
            protocol,
            before: None,
            ip_version: None,
            name: None,
        }
    }
}

/// Sparse update of a [`NetworkAclRule`]. Protocol-specific fields only apply
/// to rules of that protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkAclRulePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub action: PatchField<String>,
    /// `Null` moves the rule to the end
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub before: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub code: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub destination: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub destination_port_max: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub destination_port_min: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub direction: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub source: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub source_port_max: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub source_port_min: PatchField<i64>,
    #[serde(rename = "type", skip_serializing_if = "PatchField::is_unset")]
    pub icmp_type: PatchField<i64>,
}

impl AsPatch for NetworkAclRulePatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAcl {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub rules: Vec<NetworkAclRule>,
    #[serde(default)]
    pub subnets: Vec<Reference>,
    pub vpc: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclCollection {
    pub first: PageLink,
    pub limit: i64,
    pub network_acls: Vec<NetworkAcl>,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// A new network ACL either lists its rules or copies them from
/// `source_network_acl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkAclPrototype {
    pub vpc: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<NetworkAclRulePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_network_acl: Option<Identity>,
}

impl NetworkAclPrototype {
    pub fn new(vpc: Identity) -> Self {
        Self {
            vpc,
            name: None,
            resource_group: None,
            rules: None,
            source_network_acl: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkAclPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for NetworkAclPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListNetworkAclsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateNetworkAclOptions {
    pub network_acl_prototype: NetworkAclPrototype,
}

impl CreateNetworkAclOptions {
    pub fn new(network_acl_prototype: NetworkAclPrototype) -> Self {
        Self { network_acl_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NetworkAclOptions {
    pub id: String,
}

impl NetworkAclOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteNetworkAclOptions = NetworkAclOptions;
pub type GetNetworkAclOptions = NetworkAclOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateNetworkAclOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateNetworkAclOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListNetworkAclRulesOptions {
    pub network_acl_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    /// `inbound` or `outbound`
    pub direction: Option<String>,
}

impl ListNetworkAclRulesOptions {
    pub fn new(network_acl_id: impl Into<String>) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNetworkAclRuleOptions {
    pub network_acl_id: String,
    pub rule: NetworkAclRulePrototype,
}

impl CreateNetworkAclRuleOptions {
    pub fn new(network_acl_id: impl Into<String>, rule: NetworkAclRulePrototype) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            rule,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NetworkAclRuleOptions {
    pub network_acl_id: String,
    pub id: String,
}

impl NetworkAclRuleOptions {
    pub fn new(network_acl_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteNetworkAclRuleOptions = NetworkAclRuleOptions;
pub type GetNetworkAclRuleOptions = NetworkAclRuleOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateNetworkAclRuleOptions {
    pub network_acl_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateNetworkAclRuleOptions {
    pub fn new(network_acl_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_network_acls(
        &self,
        options: &ListNetworkAclsOptions,
    ) -> Result<DetailedResponse<NetworkAclCollection>> {
        let request = ApiRequest::get("/network_acls")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref());
        self.execute(request).await
    }

    pub async fn create_network_acl(&self, options: &CreateNetworkAclOptions) -> Result<DetailedResponse<NetworkAcl>> {
        let request = ApiRequest::post("/network_acls").json(&options.network_acl_prototype)?;
        self.execute(request).await
    }

    /// Delete a network ACL. It must not be the VPC default or attached to a subnet.
    pub async fn delete_network_acl(&self, options: &DeleteNetworkAclOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/network_acls/{id}"))).await
    }

    pub async fn get_network_acl(&self, options: &GetNetworkAclOptions) -> Result<DetailedResponse<NetworkAcl>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/network_acls/{id}"))).await
    }

    pub async fn update_network_acl(&self, options: &UpdateNetworkAclOptions) -> Result<DetailedResponse<NetworkAcl>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/network_acls/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_network_acl_rules(
        &self,
        options: &ListNetworkAclRulesOptions,
    ) -> Result<DetailedResponse<NetworkAclRuleCollection>> {
        let acl_id = path_param("network_acl_id", &options.network_acl_id)?;
        let request = ApiRequest::get(format!("/network_acls/{acl_id}/rules"))
            .page(options.start.as_deref(), options.limit)
            .query("direction", options.direction.as_deref());
        self.execute(request).await
    }

    pub async fn create_network_acl_rule(
        &self,
        options: &CreateNetworkAclRuleOptions,
    ) -> Result<DetailedResponse<NetworkAclRule>> {
        let acl_id = path_param("network_acl_id", &options.network_acl_id)?;
        required("action", &options.rule.action)?;
        required("direction", &options.rule.direction)?;
        let request = ApiRequest::post(format!("/network_acls/{acl_id}/rules")).json(&options.rule)?;
        self.execute(request).await
    }

    pub async fn delete_network_acl_rule(&self, options: &DeleteNetworkAclRuleOptions) -> Result<DetailedResponse<()>> {
        let acl_id = path_param("network_acl_id", &options.network_acl_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/network_acls/{acl_id}/rules/{id}"))).await
    }

    pub async fn get_network_acl_rule(
        &self,
        options: &GetNetworkAclRuleOptions,
    ) -> Result<DetailedResponse<NetworkAclRule>> {
        let acl_id = path_param("network_acl_id", &options.network_acl_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/network_acls/{acl_id}/rules/{id}"))).await
    }

    pub async fn update_network_acl_rule(
        &self,
        options: &UpdateNetworkAclRuleOptions,
    ) -> Result<DetailedResponse<NetworkAclRule>> {
        let acl_id = path_param("network_acl_id", &options.network_acl_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/network_acls/{acl_id}/rules/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListNetworkAclsOptions,
    NetworkAclCollection,
    network_acls: NetworkAcl,
    list_network_acls
);
paged_list!(
    ListNetworkAclRulesOptions,
    NetworkAclRuleCollection,
    rules: NetworkAclRule,
    list_network_acl_rules
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule_json(protocol: serde_json::Value) -> serde_json::Value {
        let mut rule = json!({
            "action": "allow",
            "destination": "192.168.3.0/24",
            "direction": "inbound",
            "href": "https://x/v1/network_acls/a/rules/r",
            "id": "r",
            "ip_version": "ipv4",
            "name": "my-rule",
            "source": "0.0.0.0/0"
        });
        if let (Some(rule), Some(extra)) = (rule.as_object_mut(), protocol.as_object()) {
            rule.extend(extra.clone());
        }
        rule
    }

    #[test]
    fn rule_decodes_on_protocol() {
        let rule: NetworkAclRule = serde_json::from_value(rule_json(json!({
            "protocol": "tcp",
            "destination_port_min": 22,
            "destination_port_max": 22,
            "source_port_min": 1,
            "source_port_max": 65535
        })))
        .unwrap();
        assert_eq!(
            rule.protocol,
            NetworkAclRuleProtocol::Tcp(NetworkAclRulePorts {
                destination_port_max: Some(22),
                destination_port_min: Some(22),
                source_port_max: Some(65535),
                source_port_min: Some(1),
            })
        );

        let rule: NetworkAclRule =
            serde_json::from_value(rule_json(json!({"protocol": "icmp", "code": 0, "type": 8}))).unwrap();
        assert_eq!(
            rule.protocol,
            NetworkAclRuleProtocol::Icmp {
                code: Some(0),
                icmp_type: Some(8)
            }
        );

        let rule: NetworkAclRule = serde_json::from_value(rule_json(json!({"protocol": "all"}))).unwrap();
        assert_eq!(rule.protocol, NetworkAclRuleProtocol::All);
        assert_eq!(rule.name, "my-rule");
    }

    #[test]
    fn rule_prototype_flattens_protocol() {
        let rule = NetworkAclRulePrototype::new(
            "deny",
            "outbound",
            "0.0.0.0/0",
            "0.0.0.0/0",
            NetworkAclRuleProtocol::Udp(NetworkAclRulePorts {
                destination_port_min: Some(53),
                destination_port_max: Some(53),
                ..Default::default()
            }),
        );
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({
                "action": "deny",
                "destination": "0.0.0.0/0",
                "direction": "outbound",
                "source": "0.0.0.0/0",
                "protocol": "udp",
                "destination_port_max": 53,
                "destination_port_min": 53
            })
        );
    }

    #[test]
    fn rule_patch_null_before_moves_to_end() {
        let patch = NetworkAclRulePatch {
            before: PatchField::Null,
            icmp_type: PatchField::Set(0),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"before": null, "type": 0}));
    }
}
