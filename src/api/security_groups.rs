//! Security groups, their rules and their targets

use super::common::{Identity, PageLink, Reference};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupRulePorts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
}

/// Per-protocol fields of a security group rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "lowercase")]
pub enum SecurityGroupRuleProtocol {
    All,
    Icmp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<i64>,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        icmp_type: Option<i64>,
    },
    Tcp(SecurityGroupRulePorts),
    Udp(SecurityGroupRulePorts),
}

/// Traffic source (inbound) or destination (outbound) of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecurityGroupRuleRemote {
    CidrBlock { cidr_block: String },
    Ip { address: String },
    SecurityGroup(Reference),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecurityGroupRuleRemotePrototype {
    CidrBlock { cidr_block: String },
    Ip { address: String },
    SecurityGroup(Identity),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupRule {
    /// `inbound` or `outbound`
    pub direction: String,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub ip_version: Option<String>,
    #[serde(default)]
    pub remote: Option<SecurityGroupRuleRemote>,
    #[serde(flatten)]
    pub protocol: SecurityGroupRuleProtocol,
}

/// Rules of one security group; never paged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupRuleCollection {
    pub rules: Vec<SecurityGroupRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityGroupRulePrototype {
    pub direction: String,
    #[serde(flatten)]
    pub protocol: SecurityGroupRuleProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<SecurityGroupRuleRemotePrototype>,
}

impl SecurityGroupRulePrototype {
    pub fn new(direction: impl Into<String>, protocol: SecurityGroupRuleProtocol) -> Self {
        Self {
            direction: direction.into(),
            protocol,
            ip_version: None,
            remote: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecurityGroupRulePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub code: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub direction: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub ip_version: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub port_max: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub port_min: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub remote: PatchField<SecurityGroupRuleRemotePrototype>,
    #[serde(rename = "type", skip_serializing_if = "PatchField::is_unset")]
    pub icmp_type: PatchField<i64>,
}

impl AsPatch for SecurityGroupRulePatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub rules: Vec<SecurityGroupRule>,
    /// Network interfaces, load balancers, endpoint gateways and virtual
    /// network interfaces the group applies to
    #[serde(default)]
    pub targets: Vec<Reference>,
    pub vpc: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub security_groups: Vec<SecurityGroup>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupTargetCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub targets: Vec<Reference>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecurityGroupPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for SecurityGroupPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListSecurityGroupsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_crn: Option<String>,
    pub vpc_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSecurityGroupOptions {
    pub vpc: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<SecurityGroupRulePrototype>>,
}

impl CreateSecurityGroupOptions {
    pub fn new(vpc: Identity) -> Self {
        Self {
            vpc,
            name: None,
            resource_group: None,
            rules: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SecurityGroupOptions {
    pub id: String,
}

impl SecurityGroupOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteSecurityGroupOptions = SecurityGroupOptions;
pub type GetSecurityGroupOptions = SecurityGroupOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateSecurityGroupOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateSecurityGroupOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListSecurityGroupRulesOptions {
    pub security_group_id: String,
}

impl ListSecurityGroupRulesOptions {
    pub fn new(security_group_id: impl Into<String>) -> Self {
        Self {
            security_group_id: security_group_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSecurityGroupRuleOptions {
    pub security_group_id: String,
    pub rule: SecurityGroupRulePrototype,
}

impl CreateSecurityGroupRuleOptions {
    pub fn new(security_group_id: impl Into<String>, rule: SecurityGroupRulePrototype) -> Self {
        Self {
            security_group_id: security_group_id.into(),
            rule,
        }
    }
}

/// Options addressing one rule or target of a security group
#[derive(Debug, Clone, Default)]
pub struct SecurityGroupChildOptions {
    pub security_group_id: String,
    pub id: String,
}

impl SecurityGroupChildOptions {
    pub fn new(security_group_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            security_group_id: security_group_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteSecurityGroupRuleOptions = SecurityGroupChildOptions;
pub type GetSecurityGroupRuleOptions = SecurityGroupChildOptions;
pub type CreateSecurityGroupTargetBindingOptions = SecurityGroupChildOptions;
pub type DeleteSecurityGroupTargetBindingOptions = SecurityGroupChildOptions;
pub type GetSecurityGroupTargetOptions = SecurityGroupChildOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateSecurityGroupRuleOptions {
    pub security_group_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateSecurityGroupRuleOptions {
    pub fn new(security_group_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            security_group_id: security_group_id.into(),
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListSecurityGroupTargetsOptions {
    pub security_group_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListSecurityGroupTargetsOptions {
    pub fn new(security_group_id: impl Into<String>) -> Self {
        Self {
            security_group_id: security_group_id.into(),
            ..Default::default()
        }
    }
}

impl VpcService {
    pub async fn list_security_groups(
        &self,
        options: &ListSecurityGroupsOptions,
    ) -> Result<DetailedResponse<SecurityGroupCollection>> {
        let request = ApiRequest::get("/security_groups")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("vpc.id", options.vpc_id.as_deref())
            .query("vpc.crn", options.vpc_crn.as_deref())
            .query("vpc.name", options.vpc_name.as_deref());
        self.execute(request).await
    }

    pub async fn create_security_group(
        &self,
        options: &CreateSecurityGroupOptions,
    ) -> Result<DetailedResponse<SecurityGroup>> {
        let request = ApiRequest::post("/security_groups").json(options)?;
        self.execute(request).await
    }

    /// Delete a security group. It must not be the VPC default or have any targets.
    pub async fn delete_security_group(&self, options: &DeleteSecurityGroupOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/security_groups/{id}"))).await
    }

    pub async fn get_security_group(&self, options: &GetSecurityGroupOptions) -> Result<DetailedResponse<SecurityGroup>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/security_groups/{id}"))).await
    }

    pub async fn update_security_group(
        &self,
        options: &UpdateSecurityGroupOptions,
    ) -> Result<DetailedResponse<SecurityGroup>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/security_groups/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_security_group_rules(
        &self,
        options: &ListSecurityGroupRulesOptions,
    ) -> Result<DetailedResponse<SecurityGroupRuleCollection>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        self.execute(ApiRequest::get(format!("/security_groups/{sg_id}/rules"))).await
    }

    pub async fn create_security_group_rule(
        &self,
        options: &CreateSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<SecurityGroupRule>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        required("direction", &options.rule.direction)?;
        let request = ApiRequest::post(format!("/security_groups/{sg_id}/rules")).json(&options.rule)?;
        self.execute(request).await
    }

    pub async fn delete_security_group_rule(
        &self,
        options: &DeleteSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<()>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/security_groups/{sg_id}/rules/{id}")))
            .await
    }

    pub async fn get_security_group_rule(
        &self,
        options: &GetSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<SecurityGroupRule>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/security_groups/{sg_id}/rules/{id}"))).await
    }

    pub async fn update_security_group_rule(
        &self,
        options: &UpdateSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<SecurityGroupRule>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/security_groups/{sg_id}/rules/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_security_group_targets(
        &self,
        options: &ListSecurityGroupTargetsOptions,
    ) -> Result<DetailedResponse<SecurityGroupTargetCollection>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        let request = ApiRequest::get(format!("/security_groups/{sg_id}/targets"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    /// Apply the security group to a target (network interface, load balancer, ...)
    pub async fn create_security_group_target_binding(
        &self,
        options: &CreateSecurityGroupTargetBindingOptions,
    ) -> Result<DetailedResponse<Reference>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::put(format!("/security_groups/{sg_id}/targets/{id}"))).await
    }

    /// Remove a target from the security group
    pub async fn delete_security_group_target_binding(
        &self,
        options: &DeleteSecurityGroupTargetBindingOptions,
    ) -> Result<DetailedResponse<()>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/security_groups/{sg_id}/targets/{id}")))
            .await
    }

    pub async fn get_security_group_target(
        &self,
        options: &GetSecurityGroupTargetOptions,
    ) -> Result<DetailedResponse<Reference>> {
        let sg_id = path_param("security_group_id", &options.security_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/security_groups/{sg_id}/targets/{id}"))).await
    }
}

paged_list!(
    ListSecurityGroupsOptions,
    SecurityGroupCollection,
    security_groups: SecurityGroup,
    list_security_groups
);
paged_list!(
    ListSecurityGroupTargetsOptions,
    SecurityGroupTargetCollection,
    targets: Reference,
    list_security_group_targets
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_decodes_remote_and_protocol() {
        let rule: SecurityGroupRule = serde_json::from_value(json!({
            "direction": "inbound",
            "href": "https://x/v1/security_groups/sg/rules/r",
            "id": "r",
            "ip_version": "ipv4",
            "protocol": "tcp",
            "port_min": 22,
            "port_max": 22,
            "remote": {"cidr_block": "10.0.0.0/8"}
        }))
        .unwrap();
        assert_eq!(
            rule.protocol,
            SecurityGroupRuleProtocol::Tcp(SecurityGroupRulePorts {
                port_max: Some(22),
                port_min: Some(22)
            })
        );
        assert_eq!(
            rule.remote,
            Some(SecurityGroupRuleRemote::CidrBlock {
                cidr_block: "10.0.0.0/8".into()
            })
        );
    }

    #[test]
    fn rule_remote_security_group_reference() {
        let remote: SecurityGroupRuleRemote = serde_json::from_value(json!({
            "crn": "crn:v1:sg",
            "href": "https://x/v1/security_groups/sg2",
            "id": "sg2",
            "name": "other-group"
        }))
        .unwrap();
        assert!(matches!(remote, SecurityGroupRuleRemote::SecurityGroup(ref r) if r.id == "sg2"));
    }

    #[test]
    fn rule_prototype_icmp() {
        let rule = SecurityGroupRulePrototype {
            remote: Some(SecurityGroupRuleRemotePrototype::Ip {
                address: "192.168.3.4".into(),
            }),
            ..SecurityGroupRulePrototype::new(
                "inbound",
                SecurityGroupRuleProtocol::Icmp {
                    code: None,
                    icmp_type: Some(8),
                },
            )
        };
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({
                "direction": "inbound",
                "protocol": "icmp",
                "type": 8,
                "remote": {"address": "192.168.3.4"}
            })
        );
    }
}
