//! Load balancers: profiles, listeners, listener policies and rules,
//! pools and pool members

use super::common::{
    CertificateInstance, Identity, Ip, PageLink, ProfileValue, Reference, ReservedIpReference,
};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerProfile {
    /// `application` or `network`
    pub family: String,
    pub href: String,
    #[serde(default)]
    pub instance_groups_supported: Option<ProfileValue>,
    #[serde(default)]
    pub logging_supported: Option<ProfileValue>,
    pub name: String,
    #[serde(default)]
    pub route_mode_supported: Option<ProfileValue>,
    #[serde(default)]
    pub security_groups_supported: Option<ProfileValue>,
    #[serde(default)]
    pub udp_supported: Option<ProfileValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerProfileCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub profiles: Vec<LoadBalancerProfile>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerProfileReference {
    pub family: String,
    pub href: String,
    pub name: String,
}

// ============================================================================
// Load balancers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadBalancerLoggingDatapath {
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadBalancerLogging {
    pub datapath: LoadBalancerLoggingDatapath,
}

impl LoadBalancerLogging {
    pub fn datapath(active: bool) -> Self {
        Self {
            datapath: LoadBalancerLoggingDatapath { active },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub hostname: String,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub instance_groups_supported: Option<bool>,
    pub is_public: bool,
    #[serde(default)]
    pub listeners: Vec<Reference>,
    #[serde(default)]
    pub logging: Option<LoadBalancerLogging>,
    pub name: String,
    /// `offline` or `online`
    pub operating_status: String,
    #[serde(default)]
    pub pools: Vec<Reference>,
    #[serde(default)]
    pub private_ips: Vec<ReservedIpReference>,
    pub profile: LoadBalancerProfileReference,
    /// `active`, `create_pending`, `delete_pending`, `failed`, `maintenance_pending`
    /// or `update_pending`
    pub provisioning_status: String,
    #[serde(default)]
    pub public_ips: Vec<Ip>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub route_mode: Option<bool>,
    #[serde(default)]
    pub security_groups: Vec<Reference>,
    #[serde(default)]
    pub security_groups_supported: Option<bool>,
    #[serde(default)]
    pub subnets: Vec<Reference>,
    #[serde(default)]
    pub udp_supported: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerCollection {
    pub first: PageLink,
    pub limit: i64,
    pub load_balancers: Vec<LoadBalancer>,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerStatistics {
    pub active_connections: i64,
    pub connection_rate: f64,
    pub data_processed_this_month: i64,
    pub throughput: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateLoadBalancerOptions {
    pub is_public: bool,
    pub subnets: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listeners: Option<Vec<LoadBalancerListenerPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoadBalancerLogging>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pools: Option<Vec<LoadBalancerPoolPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl CreateLoadBalancerOptions {
    pub fn new(is_public: bool, subnets: Vec<Identity>) -> Self {
        Self {
            is_public,
            subnets,
            listeners: None,
            logging: None,
            name: None,
            pools: None,
            profile: None,
            resource_group: None,
            route_mode: None,
            security_groups: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadBalancerPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub logging: PatchField<LoadBalancerLogging>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub subnets: PatchField<Vec<Identity>>,
}

impl AsPatch for LoadBalancerPatch {}

// ============================================================================
// Listeners
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerHttpsRedirect {
    pub http_status_code: i64,
    pub listener: Reference,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancerListenerHttpsRedirectPrototype {
    pub http_status_code: i64,
    pub listener: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListener {
    pub accept_proxy_protocol: bool,
    #[serde(default)]
    pub certificate_instance: Option<CertificateInstance>,
    #[serde(default)]
    pub connection_limit: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub default_pool: Option<Reference>,
    pub href: String,
    #[serde(default)]
    pub https_redirect: Option<LoadBalancerListenerHttpsRedirect>,
    pub id: String,
    #[serde(default)]
    pub idle_connection_timeout: Option<i64>,
    #[serde(default)]
    pub policies: Vec<Reference>,
    #[serde(default)]
    pub port: Option<i64>,
    #[serde(default)]
    pub port_max: Option<i64>,
    #[serde(default)]
    pub port_min: Option<i64>,
    /// `http`, `https`, `tcp` or `udp`
    pub protocol: String,
    pub provisioning_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerCollection {
    pub listeners: Vec<LoadBalancerListener>,
}

/// Listener defined inline when creating a load balancer
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoadBalancerListenerPrototype {
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_instance: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<i64>,
    /// Pool of the same load balancer, by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pool: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_connection_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
}

impl LoadBalancerListenerPrototype {
    pub fn new(protocol: impl Into<String>, port: i64) -> Self {
        Self {
            protocol: protocol.into(),
            port: Some(port),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateLoadBalancerListenerOptions {
    #[serde(skip)]
    pub load_balancer_id: String,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_instance: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pool: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_redirect: Option<LoadBalancerListenerHttpsRedirectPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_connection_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<LoadBalancerListenerPolicyPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
}

impl CreateLoadBalancerListenerOptions {
    pub fn new(load_balancer_id: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            protocol: protocol.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadBalancerListenerPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub accept_proxy_protocol: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub certificate_instance: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub connection_limit: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub default_pool: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub https_redirect: PatchField<LoadBalancerListenerHttpsRedirectPrototype>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub idle_connection_timeout: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub port: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub port_max: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub port_min: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub protocol: PatchField<String>,
}

impl AsPatch for LoadBalancerListenerPatch {}

// ============================================================================
// Listener policies and rules
// ============================================================================

/// Where a matching policy sends traffic
///
/// Pool references carry `id` and `href`; redirects carry a status code and
/// either a URL or a target listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadBalancerListenerPolicyTarget {
    Pool(Reference),
    HttpsRedirect(LoadBalancerListenerHttpsRedirect),
    Redirect { http_status_code: i64, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoadBalancerListenerPolicyTargetPrototype {
    Pool(Identity),
    HttpsRedirect(LoadBalancerListenerHttpsRedirectPrototype),
    Redirect { http_status_code: i64, url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicy {
    /// `forward`, `https_redirect`, `redirect` or `reject`
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    pub name: String,
    pub priority: i64,
    pub provisioning_status: String,
    #[serde(default)]
    pub rules: Vec<Reference>,
    #[serde(default)]
    pub target: Option<LoadBalancerListenerPolicyTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicyCollection {
    pub policies: Vec<LoadBalancerListenerPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadBalancerListenerPolicyPrototype {
    pub action: String,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<LoadBalancerListenerPolicyRulePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LoadBalancerListenerPolicyTargetPrototype>,
}

impl LoadBalancerListenerPolicyPrototype {
    pub fn new(action: impl Into<String>, priority: i64) -> Self {
        Self {
            action: action.into(),
            priority,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadBalancerListenerPolicyPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub priority: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub target: PatchField<LoadBalancerListenerPolicyTargetPrototype>,
}

impl AsPatch for LoadBalancerListenerPolicyPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicyRule {
    /// `contains`, `equals` or `matches_regex`
    pub condition: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub field: Option<String>,
    pub href: String,
    pub id: String,
    pub provisioning_status: String,
    /// `body`, `header`, `hostname`, `path` or `query`
    #[serde(rename = "type")]
    pub rule_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicyRuleCollection {
    pub rules: Vec<LoadBalancerListenerPolicyRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadBalancerListenerPolicyRulePrototype {
    pub condition: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl LoadBalancerListenerPolicyRulePrototype {
    pub fn new(condition: impl Into<String>, rule_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            rule_type: rule_type.into(),
            value: value.into(),
            field: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadBalancerListenerPolicyRulePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub condition: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub field: PatchField<String>,
    #[serde(rename = "type", skip_serializing_if = "PatchField::is_unset")]
    pub rule_type: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub value: PatchField<String>,
}

impl AsPatch for LoadBalancerListenerPolicyRulePatch {}

// ============================================================================
// Pools and members
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerPoolHealthMonitor {
    pub delay: i64,
    pub max_retries: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    pub timeout: i64,
    /// `http`, `https` or `tcp`
    #[serde(rename = "type")]
    pub monitor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerPoolSessionPersistence {
    /// `app_cookie`, `http_cookie` or `source_ip`
    #[serde(rename = "type")]
    pub persistence_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerPool {
    /// `least_connections`, `round_robin` or `weighted_round_robin`
    pub algorithm: String,
    pub created_at: DateTime<Utc>,
    pub health_monitor: LoadBalancerPoolHealthMonitor,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub instance_group: Option<Reference>,
    #[serde(default)]
    pub members: Vec<Reference>,
    pub name: String,
    pub protocol: String,
    pub provisioning_status: String,
    /// `disabled`, `v1` or `v2`
    pub proxy_protocol: String,
    #[serde(default)]
    pub session_persistence: Option<LoadBalancerPoolSessionPersistence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerPoolCollection {
    pub pools: Vec<LoadBalancerPool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancerPoolPrototype {
    pub algorithm: String,
    pub health_monitor: LoadBalancerPoolHealthMonitor,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<LoadBalancerPoolMemberPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<LoadBalancerPoolSessionPersistence>,
}

impl LoadBalancerPoolPrototype {
    pub fn new(
        algorithm: impl Into<String>,
        protocol: impl Into<String>,
        health_monitor: LoadBalancerPoolHealthMonitor,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            health_monitor,
            protocol: protocol.into(),
            members: None,
            name: None,
            proxy_protocol: None,
            session_persistence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLoadBalancerPoolOptions {
    pub load_balancer_id: String,
    pub pool: LoadBalancerPoolPrototype,
}

impl CreateLoadBalancerPoolOptions {
    pub fn new(load_balancer_id: impl Into<String>, pool: LoadBalancerPoolPrototype) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadBalancerPoolPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub algorithm: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub health_monitor: PatchField<LoadBalancerPoolHealthMonitor>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub protocol: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub proxy_protocol: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub session_persistence: PatchField<LoadBalancerPoolSessionPersistence>,
}

impl AsPatch for LoadBalancerPoolPatch {}

/// Pool member target: an instance, or a bare IP address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadBalancerPoolMemberTarget {
    Instance(Reference),
    Ip(Ip),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoadBalancerPoolMemberTargetPrototype {
    Ip(Ip),
    Instance(Identity),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerPoolMember {
    pub created_at: DateTime<Utc>,
    /// `faulted`, `ok` or `unknown`
    pub health: String,
    pub href: String,
    pub id: String,
    pub port: i64,
    pub provisioning_status: String,
    pub target: LoadBalancerPoolMemberTarget,
    #[serde(default)]
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerPoolMemberCollection {
    pub members: Vec<LoadBalancerPoolMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancerPoolMemberPrototype {
    pub port: i64,
    pub target: LoadBalancerPoolMemberTargetPrototype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl LoadBalancerPoolMemberPrototype {
    pub fn new(port: i64, target: LoadBalancerPoolMemberTargetPrototype) -> Self {
        Self {
            port,
            target,
            weight: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadBalancerPoolMemberPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub port: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub target: PatchField<LoadBalancerPoolMemberTargetPrototype>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub weight: PatchField<i64>,
}

impl AsPatch for LoadBalancerPoolMemberPatch {}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListLoadBalancerProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct GetLoadBalancerProfileOptions {
    pub name: String,
}

impl GetLoadBalancerProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListLoadBalancersOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadBalancerOptions {
    pub id: String,
}

impl LoadBalancerOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetLoadBalancerOptions = LoadBalancerOptions;
pub type GetLoadBalancerStatisticsOptions = LoadBalancerOptions;

#[derive(Debug, Clone, Default)]
pub struct DeleteLoadBalancerOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteLoadBalancerOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateLoadBalancerOptions {
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateLoadBalancerOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

/// Options addressing the listeners or pools of one load balancer
#[derive(Debug, Clone, Default)]
pub struct LoadBalancerChildListOptions {
    pub load_balancer_id: String,
}

impl LoadBalancerChildListOptions {
    pub fn new(load_balancer_id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
        }
    }
}

pub type ListLoadBalancerListenersOptions = LoadBalancerChildListOptions;
pub type ListLoadBalancerPoolsOptions = LoadBalancerChildListOptions;

/// Options addressing one listener or pool
#[derive(Debug, Clone, Default)]
pub struct LoadBalancerChildOptions {
    pub load_balancer_id: String,
    pub id: String,
}

impl LoadBalancerChildOptions {
    pub fn new(load_balancer_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteLoadBalancerListenerOptions = LoadBalancerChildOptions;
pub type GetLoadBalancerListenerOptions = LoadBalancerChildOptions;
pub type DeleteLoadBalancerPoolOptions = LoadBalancerChildOptions;
pub type GetLoadBalancerPoolOptions = LoadBalancerChildOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateLoadBalancerChildOptions {
    pub load_balancer_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateLoadBalancerChildOptions {
    pub fn new(load_balancer_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateLoadBalancerListenerOptions = UpdateLoadBalancerChildOptions;
pub type UpdateLoadBalancerPoolOptions = UpdateLoadBalancerChildOptions;

#[derive(Debug, Clone, Default)]
pub struct ListLoadBalancerListenerPoliciesOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
}

impl ListLoadBalancerListenerPoliciesOptions {
    pub fn new(load_balancer_id: impl Into<String>, listener_id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerListenerPolicyOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub policy: LoadBalancerListenerPolicyPrototype,
}

impl CreateLoadBalancerListenerPolicyOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        policy: LoadBalancerListenerPolicyPrototype,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            policy,
        }
    }
}

/// Options addressing one listener policy, or the rules of one policy
#[derive(Debug, Clone, Default)]
pub struct LoadBalancerListenerPolicyOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub id: String,
}

impl LoadBalancerListenerPolicyOptions {
    pub fn new(load_balancer_id: impl Into<String>, listener_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteLoadBalancerListenerPolicyOptions = LoadBalancerListenerPolicyOptions;
pub type GetLoadBalancerListenerPolicyOptions = LoadBalancerListenerPolicyOptions;
pub type ListLoadBalancerListenerPolicyRulesOptions = LoadBalancerListenerPolicyOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateLoadBalancerListenerPolicyOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateLoadBalancerListenerPolicyOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        id: impl Into<String>,
        patch: Patch,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerListenerPolicyRuleOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub policy_id: String,
    pub rule: LoadBalancerListenerPolicyRulePrototype,
}

impl CreateLoadBalancerListenerPolicyRuleOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        policy_id: impl Into<String>,
        rule: LoadBalancerListenerPolicyRulePrototype,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            policy_id: policy_id.into(),
            rule,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadBalancerListenerPolicyRuleOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub policy_id: String,
    pub id: String,
}

impl LoadBalancerListenerPolicyRuleOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        policy_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            policy_id: policy_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteLoadBalancerListenerPolicyRuleOptions = LoadBalancerListenerPolicyRuleOptions;
pub type GetLoadBalancerListenerPolicyRuleOptions = LoadBalancerListenerPolicyRuleOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateLoadBalancerListenerPolicyRuleOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub policy_id: String,
    pub id: String,
    pub patch: Patch,
}

#[derive(Debug, Clone, Default)]
pub struct ListLoadBalancerPoolMembersOptions {
    pub load_balancer_id: String,
    pub pool_id: String,
}

impl ListLoadBalancerPoolMembersOptions {
    pub fn new(load_balancer_id: impl Into<String>, pool_id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerPoolMemberOptions {
    pub load_balancer_id: String,
    pub pool_id: String,
    pub member: LoadBalancerPoolMemberPrototype,
}

impl CreateLoadBalancerPoolMemberOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        pool_id: impl Into<String>,
        member: LoadBalancerPoolMemberPrototype,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
            member,
        }
    }
}

/// Replace every member of a pool in one call
#[derive(Debug, Clone, Serialize)]
pub struct ReplaceLoadBalancerPoolMembersOptions {
    #[serde(skip)]
    pub load_balancer_id: String,
    #[serde(skip)]
    pub pool_id: String,
    pub members: Vec<LoadBalancerPoolMemberPrototype>,
}

impl ReplaceLoadBalancerPoolMembersOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        pool_id: impl Into<String>,
        members: Vec<LoadBalancerPoolMemberPrototype>,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
            members,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadBalancerPoolMemberOptions {
    pub load_balancer_id: String,
    pub pool_id: String,
    pub id: String,
}

impl LoadBalancerPoolMemberOptions {
    pub fn new(load_balancer_id: impl Into<String>, pool_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteLoadBalancerPoolMemberOptions = LoadBalancerPoolMemberOptions;
pub type GetLoadBalancerPoolMemberOptions = LoadBalancerPoolMemberOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateLoadBalancerPoolMemberOptions {
    pub load_balancer_id: String,
    pub pool_id: String,
    pub id: String,
    pub patch: Patch,
}

// ============================================================================
// Operations
// ============================================================================

impl VpcService {
    pub async fn list_load_balancer_profiles(
        &self,
        options: &ListLoadBalancerProfilesOptions,
    ) -> Result<DetailedResponse<LoadBalancerProfileCollection>> {
        let request = ApiRequest::get("/load_balancer/profiles").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn get_load_balancer_profile(
        &self,
        options: &GetLoadBalancerProfileOptions,
    ) -> Result<DetailedResponse<LoadBalancerProfile>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/load_balancer/profiles/{name}"))).await
    }

    pub async fn list_load_balancers(
        &self,
        options: &ListLoadBalancersOptions,
    ) -> Result<DetailedResponse<LoadBalancerCollection>> {
        let request = ApiRequest::get("/load_balancers").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_load_balancer(
        &self,
        options: &CreateLoadBalancerOptions,
    ) -> Result<DetailedResponse<LoadBalancer>> {
        let request = ApiRequest::post("/load_balancers").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_load_balancer(&self, options: &DeleteLoadBalancerOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/load_balancers/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute_empty(request).await
    }

    pub async fn get_load_balancer(&self, options: &GetLoadBalancerOptions) -> Result<DetailedResponse<LoadBalancer>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/load_balancers/{id}"))).await
    }

    pub async fn update_load_balancer(
        &self,
        options: &UpdateLoadBalancerOptions,
    ) -> Result<DetailedResponse<LoadBalancer>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/load_balancers/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn get_load_balancer_statistics(
        &self,
        options: &GetLoadBalancerStatisticsOptions,
    ) -> Result<DetailedResponse<LoadBalancerStatistics>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/load_balancers/{id}/statistics"))).await
    }

    // ------------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------------

    pub async fn list_load_balancer_listeners(
        &self,
        options: &ListLoadBalancerListenersOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerCollection>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        self.execute(ApiRequest::get(format!("/load_balancers/{lb_id}/listeners"))).await
    }

    pub async fn create_load_balancer_listener(
        &self,
        options: &CreateLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<LoadBalancerListener>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        required("protocol", &options.protocol)?;
        let request = ApiRequest::post(format!("/load_balancers/{lb_id}/listeners")).json(options)?;
        self.execute(request).await
    }

    pub async fn delete_load_balancer_listener(
        &self,
        options: &DeleteLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<()>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/load_balancers/{lb_id}/listeners/{id}")))
            .await
    }

    pub async fn get_load_balancer_listener(
        &self,
        options: &GetLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<LoadBalancerListener>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/load_balancers/{lb_id}/listeners/{id}")))
            .await
    }

    pub async fn update_load_balancer_listener(
        &self,
        options: &UpdateLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<LoadBalancerListener>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/load_balancers/{lb_id}/listeners/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    // ------------------------------------------------------------------------
    // Listener policies
    // ------------------------------------------------------------------------

    pub async fn list_load_balancer_listener_policies(
        &self,
        options: &ListLoadBalancerListenerPoliciesOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyCollection>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        self.execute(ApiRequest::get(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies"
        )))
        .await
    }

    pub async fn create_load_balancer_listener_policy(
        &self,
        options: &CreateLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicy>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        required("action", &options.policy.action)?;
        let request = ApiRequest::post(format!("/load_balancers/{lb_id}/listeners/{listener_id}/policies"))
            .json(&options.policy)?;
        self.execute(request).await
    }

    pub async fn delete_load_balancer_listener_policy(
        &self,
        options: &DeleteLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies/{id}"
        )))
        .await
    }

    pub async fn get_load_balancer_listener_policy(
        &self,
        options: &GetLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicy>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies/{id}"
        )))
        .await
    }

    pub async fn update_load_balancer_listener_policy(
        &self,
        options: &UpdateLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicy>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/load_balancers/{lb_id}/listeners/{listener_id}/policies/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    // ------------------------------------------------------------------------
    // Listener policy rules
    // ------------------------------------------------------------------------

    pub async fn list_load_balancer_listener_policy_rules(
        &self,
        options: &ListLoadBalancerListenerPolicyRulesOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRuleCollection>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let policy_id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies/{policy_id}/rules"
        )))
        .await
    }

    pub async fn create_load_balancer_listener_policy_rule(
        &self,
        options: &CreateLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRule>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let policy_id = path_param("policy_id", &options.policy_id)?;
        required("condition", &options.rule.condition)?;
        required("type", &options.rule.rule_type)?;
        let request = ApiRequest::post(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies/{policy_id}/rules"
        ))
        .json(&options.rule)?;
        self.execute(request).await
    }

    pub async fn delete_load_balancer_listener_policy_rule(
        &self,
        options: &DeleteLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<()>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let policy_id = path_param("policy_id", &options.policy_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies/{policy_id}/rules/{id}"
        )))
        .await
    }

    pub async fn get_load_balancer_listener_policy_rule(
        &self,
        options: &GetLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRule>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let policy_id = path_param("policy_id", &options.policy_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies/{policy_id}/rules/{id}"
        )))
        .await
    }

    pub async fn update_load_balancer_listener_policy_rule(
        &self,
        options: &UpdateLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRule>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let listener_id = path_param("listener_id", &options.listener_id)?;
        let policy_id = path_param("policy_id", &options.policy_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!(
            "/load_balancers/{lb_id}/listeners/{listener_id}/policies/{policy_id}/rules/{id}"
        ))
        .merge_patch(&options.patch);
        self.execute(request).await
    }

    // ------------------------------------------------------------------------
    // Pools
    // ------------------------------------------------------------------------

    pub async fn list_load_balancer_pools(
        &self,
        options: &ListLoadBalancerPoolsOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolCollection>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        self.execute(ApiRequest::get(format!("/load_balancers/{lb_id}/pools"))).await
    }

    pub async fn create_load_balancer_pool(
        &self,
        options: &CreateLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<LoadBalancerPool>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        required("algorithm", &options.pool.algorithm)?;
        required("protocol", &options.pool.protocol)?;
        let request = ApiRequest::post(format!("/load_balancers/{lb_id}/pools")).json(&options.pool)?;
        self.execute(request).await
    }

    pub async fn delete_load_balancer_pool(
        &self,
        options: &DeleteLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<()>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/load_balancers/{lb_id}/pools/{id}")))
            .await
    }

    pub async fn get_load_balancer_pool(
        &self,
        options: &GetLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<LoadBalancerPool>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/load_balancers/{lb_id}/pools/{id}")))
            .await
    }

    pub async fn update_load_balancer_pool(
        &self,
        options: &UpdateLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<LoadBalancerPool>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/load_balancers/{lb_id}/pools/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    // ------------------------------------------------------------------------
    // Pool members
    // ------------------------------------------------------------------------

    pub async fn list_load_balancer_pool_members(
        &self,
        options: &ListLoadBalancerPoolMembersOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMemberCollection>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let pool_id = path_param("pool_id", &options.pool_id)?;
        self.execute(ApiRequest::get(format!("/load_balancers/{lb_id}/pools/{pool_id}/members")))
            .await
    }

    pub async fn create_load_balancer_pool_member(
        &self,
        options: &CreateLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMember>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let pool_id = path_param("pool_id", &options.pool_id)?;
        let request =
            ApiRequest::post(format!("/load_balancers/{lb_id}/pools/{pool_id}/members")).json(&options.member)?;
        self.execute(request).await
    }

    /// Replace the full member set of a pool
    pub async fn replace_load_balancer_pool_members(
        &self,
        options: &ReplaceLoadBalancerPoolMembersOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMemberCollection>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let pool_id = path_param("pool_id", &options.pool_id)?;
        let request = ApiRequest::put(format!("/load_balancers/{lb_id}/pools/{pool_id}/members")).json(options)?;
        self.execute(request).await
    }

    pub async fn delete_load_balancer_pool_member(
        &self,
        options: &DeleteLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<()>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let pool_id = path_param("pool_id", &options.pool_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!(
            "/load_balancers/{lb_id}/pools/{pool_id}/members/{id}"
        )))
        .await
    }

    pub async fn get_load_balancer_pool_member(
        &self,
        options: &GetLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMember>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let pool_id = path_param("pool_id", &options.pool_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!(
            "/load_balancers/{lb_id}/pools/{pool_id}/members/{id}"
        )))
        .await
    }

    pub async fn update_load_balancer_pool_member(
        &self,
        options: &UpdateLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMember>> {
        let lb_id = path_param("load_balancer_id", &options.load_balancer_id)?;
        let pool_id = path_param("pool_id", &options.pool_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/load_balancers/{lb_id}/pools/{pool_id}/members/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListLoadBalancerProfilesOptions,
    LoadBalancerProfileCollection,
    profiles: LoadBalancerProfile,
    list_load_balancer_profiles
);
paged_list!(
    ListLoadBalancersOptions,
    LoadBalancerCollection,
    load_balancers: LoadBalancer,
    list_load_balancers
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member_json(target: serde_json::Value) -> serde_json::Value {
        json!({
            "created_at": "2024-05-01T10:00:00Z",
            "health": "ok",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/load_balancers/lb-1/pools/p-1/members/m-1",
            "id": "m-1",
            "port": 80,
            "provisioning_status": "active",
            "target": target,
            "weight": 50
        })
    }

    #[test]
    fn member_target_decodes_instance_reference() {
        let member: LoadBalancerPoolMember = serde_json::from_value(member_json(json!({
            "crn": "crn:v1:bluemix:public:is:us-south-1:a/123::instance:i-1",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/instances/i-1",
            "id": "i-1",
            "name": "web-1"
        })))
        .unwrap();
        match member.target {
            LoadBalancerPoolMemberTarget::Instance(r) => assert_eq!(r.id, "i-1"),
            other => panic!("expected instance target, got {other:?}"),
        }
    }

    #[test]
    fn member_target_decodes_ip_address() {
        let member: LoadBalancerPoolMember =
            serde_json::from_value(member_json(json!({"address": "192.168.3.4"}))).unwrap();
        assert_eq!(member.target, LoadBalancerPoolMemberTarget::Ip(Ip::new("192.168.3.4")));
    }

    #[test]
    fn replace_members_body_lists_prototypes() {
        let options = ReplaceLoadBalancerPoolMembersOptions::new(
            "lb-1",
            "p-1",
            vec![
                LoadBalancerPoolMemberPrototype::new(80, LoadBalancerPoolMemberTargetPrototype::Ip(Ip::new("192.168.3.4"))),
                LoadBalancerPoolMemberPrototype::new(
                    8080,
                    LoadBalancerPoolMemberTargetPrototype::Instance(Identity::id("i-1")),
                ),
            ],
        );
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"members": [
                {"port": 80, "target": {"address": "192.168.3.4"}},
                {"port": 8080, "target": {"id": "i-1"}}
            ]})
        );
    }

    #[test]
    fn policy_target_decodes_each_shape() {
        let pool: LoadBalancerListenerPolicyTarget = serde_json::from_value(json!({
            "href": "https://us-south.iaas.cloud.ibm.com/v1/load_balancers/lb-1/pools/p-1",
            "id": "p-1",
            "name": "web-pool"
        }))
        .unwrap();
        assert!(matches!(pool, LoadBalancerListenerPolicyTarget::Pool(_)));

        let redirect: LoadBalancerListenerPolicyTarget =
            serde_json::from_value(json!({"http_status_code": 301, "url": "https://example.com"})).unwrap();
        assert!(matches!(redirect, LoadBalancerListenerPolicyTarget::Redirect { http_status_code: 301, .. }));

        let https: LoadBalancerListenerPolicyTarget = serde_json::from_value(json!({
            "http_status_code": 302,
            "listener": {"href": "https://us-south.iaas.cloud.ibm.com/v1/load_balancers/lb-1/listeners/l-2", "id": "l-2"},
            "uri": "/secure"
        }))
        .unwrap();
        assert!(matches!(https, LoadBalancerListenerPolicyTarget::HttpsRedirect(_)));
    }

    #[test]
    fn listener_options_skip_path_parameter() {
        let options = CreateLoadBalancerListenerOptions {
            port: Some(443),
            default_pool: Some(Identity::id("p-1")),
            ..CreateLoadBalancerListenerOptions::new("lb-1", "https")
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"protocol": "https", "port": 443, "default_pool": {"id": "p-1"}})
        );
    }

    #[test]
    fn rule_patch_renames_type() {
        let patch = LoadBalancerListenerPolicyRulePatch {
            rule_type: "header".into(),
            field: PatchField::Null,
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"type": "header", "field": null}));
    }

    #[test]
    fn pool_prototype_serializes_health_monitor() {
        let pool = LoadBalancerPoolPrototype::new(
            "round_robin",
            "http",
            LoadBalancerPoolHealthMonitor {
                delay: 5,
                max_retries: 2,
                port: None,
                timeout: 2,
                monitor_type: "http".to_string(),
                url_path: Some("/".to_string()),
            },
        );
        assert_eq!(
            serde_json::to_value(&pool).unwrap(),
            json!({
                "algorithm": "round_robin",
                "health_monitor": {"delay": 5, "max_retries": 2, "timeout": 2, "type": "http", "url_path": "/"},
                "protocol": "http"
            })
        );
    }
}
