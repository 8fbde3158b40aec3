//! Instance groups, their managers, scheduled actions, autoscale policies
//! and memberships

use super::common::{Identity, PageLink, Reference};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::{Error, Result};
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Instance groups
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroup {
    #[serde(default)]
    pub application_port: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    pub instance_template: Reference,
    #[serde(default)]
    pub load_balancer_pool: Option<Reference>,
    #[serde(default)]
    pub managers: Vec<Reference>,
    pub membership_count: i64,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    /// `deleting`, `healthy`, `scaling` or `unhealthy`
    pub status: String,
    #[serde(default)]
    pub subnets: Vec<Reference>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub vpc: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupCollection {
    pub first: PageLink,
    pub instance_groups: Vec<InstanceGroup>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// `load_balancer`, `load_balancer_pool` and `application_port` go together
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateInstanceGroupOptions {
    pub instance_template: Option<Identity>,
    pub subnets: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_pool: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreateInstanceGroupOptions {
    pub fn new(instance_template: Identity, subnets: Vec<Identity>) -> Self {
        Self {
            instance_template: Some(instance_template),
            subnets,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceGroupPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub application_port: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub instance_template: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub load_balancer: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub load_balancer_pool: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub membership_count: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub subnets: PatchField<Vec<Identity>>,
}

impl AsPatch for InstanceGroupPatch {}

// =============================================================================
// Managers
// =============================================================================

/// Type-specific part of a manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "manager_type", rename_all = "lowercase")]
pub enum InstanceGroupManagerType {
    /// Scales the group between the membership bounds using its policies
    Autoscale {
        /// Seconds over which metrics are averaged
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aggregation_window: Option<i64>,
        /// Seconds to wait between scaling actions
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cooldown: Option<i64>,
        max_membership_count: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_membership_count: Option<i64>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        policies: Vec<Reference>,
    },
    /// Resizes the group, or another manager's bounds, on a schedule
    Scheduled {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        actions: Vec<Reference>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManager {
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    pub management_enabled: bool,
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub manager_type: InstanceGroupManagerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerCollection {
    pub first: PageLink,
    pub limit: i64,
    pub managers: Vec<InstanceGroupManager>,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceGroupManagerPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Policies and actions are attached afterwards, leave those lists empty
    #[serde(flatten)]
    pub manager_type: InstanceGroupManagerType,
}

impl InstanceGroupManagerPrototype {
    pub fn autoscale(max_membership_count: i64) -> Self {
        Self::new(InstanceGroupManagerType::Autoscale {
            aggregation_window: None,
            cooldown: None,
            max_membership_count,
            min_membership_count: None,
            policies: Vec::new(),
        })
    }

    pub fn scheduled() -> Self {
        Self::new(InstanceGroupManagerType::Scheduled { actions: Vec::new() })
    }

    fn new(manager_type: InstanceGroupManagerType) -> Self {
        Self {
            management_enabled: None,
            name: None,
            manager_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceGroupManagerPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub aggregation_window: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub cooldown: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub management_enabled: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub max_membership_count: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub min_membership_count: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for InstanceGroupManagerPatch {}

// =============================================================================
// Scheduled actions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledActionGroup {
    pub membership_count: i64,
}

/// Membership bounds an action applies to an autoscale manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledActionManager {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_membership_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_membership_count: Option<i64>,
}

/// What a scheduled action changes: the group size, or a manager's bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledActionTarget {
    Group(ScheduledActionGroup),
    Manager(ScheduledActionManager),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerAction {
    pub auto_delete: bool,
    /// Hours after completion before an auto-deleted action is removed
    pub auto_delete_timeout: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cron_spec: Option<String>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub last_applied_at: Option<DateTime<Utc>>,
    pub name: String,
    #[serde(default)]
    pub next_run_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// `active`, `completed`, `failed`, `incompatible` or `omitted`
    pub status: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub target: ScheduledActionTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerActionsCollection {
    pub actions: Vec<InstanceGroupManagerAction>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// A recurring action has a `cron_spec`, a one-off action a `run_at` time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceGroupManagerActionPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_spec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub target: ScheduledActionTarget,
}

impl InstanceGroupManagerActionPrototype {
    pub fn new(target: ScheduledActionTarget) -> Self {
        Self {
            cron_spec: None,
            name: None,
            run_at: None,
            target,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceGroupManagerActionPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub cron_spec: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub group: PatchField<ScheduledActionGroup>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub manager: PatchField<ScheduledActionManager>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub run_at: PatchField<DateTime<Utc>>,
}

impl AsPatch for InstanceGroupManagerActionPatch {}

// =============================================================================
// Policies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerPolicy {
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    /// `cpu`, `memory`, `network_in` or `network_out`
    pub metric_type: String,
    pub metric_value: i64,
    pub name: String,
    /// Always `target`
    pub policy_type: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerPolicyCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub policies: Vec<InstanceGroupManagerPolicy>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceGroupManagerPolicyPrototype {
    pub metric_type: String,
    pub metric_value: i64,
    pub policy_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl InstanceGroupManagerPolicyPrototype {
    /// A `target` policy holding `metric_type` around `metric_value`
    pub fn target(metric_type: impl Into<String>, metric_value: i64) -> Self {
        Self {
            metric_type: metric_type.into(),
            metric_value,
            policy_type: "target".to_string(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceGroupManagerPolicyPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub metric_type: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub metric_value: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for InstanceGroupManagerPolicyPatch {}

// =============================================================================
// Memberships
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupMembership {
    pub created_at: DateTime<Utc>,
    pub delete_instance_on_membership_delete: bool,
    pub href: String,
    pub id: String,
    pub instance: Reference,
    pub instance_template: Reference,
    pub name: String,
    #[serde(default)]
    pub pool_member: Option<Reference>,
    /// `deleting`, `failed`, `healthy`, `pending` or `unhealthy`
    pub status: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupMembershipCollection {
    pub first: PageLink,
    pub limit: i64,
    pub memberships: Vec<InstanceGroupMembership>,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceGroupMembershipPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for InstanceGroupMembershipPatch {}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ListInstanceGroupsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct InstanceGroupOptions {
    pub id: String,
}

impl InstanceGroupOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteInstanceGroupOptions = InstanceGroupOptions;
pub type GetInstanceGroupOptions = InstanceGroupOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateInstanceGroupOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateInstanceGroupOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

/// Options addressing a sub-collection of one instance group
#[derive(Debug, Clone, Default)]
pub struct InstanceGroupChildListOptions {
    pub instance_group_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl InstanceGroupChildListOptions {
    pub fn new(instance_group_id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            ..Default::default()
        }
    }
}

pub type ListInstanceGroupManagersOptions = InstanceGroupChildListOptions;

#[derive(Debug, Clone, Default)]
pub struct ListInstanceGroupMembershipsOptions {
    pub instance_group_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListInstanceGroupMembershipsOptions {
    pub fn new(instance_group_id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            ..Default::default()
        }
    }
}

/// Options addressing the whole membership or load balancer of one group
#[derive(Debug, Clone, Default)]
pub struct InstanceGroupScopeOptions {
    pub instance_group_id: String,
}

impl InstanceGroupScopeOptions {
    pub fn new(instance_group_id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
        }
    }
}

pub type DeleteInstanceGroupLoadBalancerOptions = InstanceGroupScopeOptions;
pub type DeleteInstanceGroupMembershipsOptions = InstanceGroupScopeOptions;

/// Options addressing one manager or membership of a group
#[derive(Debug, Clone, Default)]
pub struct InstanceGroupChildOptions {
    pub instance_group_id: String,
    pub id: String,
}

impl InstanceGroupChildOptions {
    pub fn new(instance_group_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteInstanceGroupManagerOptions = InstanceGroupChildOptions;
pub type GetInstanceGroupManagerOptions = InstanceGroupChildOptions;
pub type DeleteInstanceGroupMembershipOptions = InstanceGroupChildOptions;
pub type GetInstanceGroupMembershipOptions = InstanceGroupChildOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateInstanceGroupChildOptions {
    pub instance_group_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateInstanceGroupChildOptions {
    pub fn new(instance_group_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateInstanceGroupManagerOptions = UpdateInstanceGroupChildOptions;
pub type UpdateInstanceGroupMembershipOptions = UpdateInstanceGroupChildOptions;

#[derive(Debug, Clone)]
pub struct CreateInstanceGroupManagerOptions {
    pub instance_group_id: String,
    pub instance_group_manager_prototype: InstanceGroupManagerPrototype,
}

impl CreateInstanceGroupManagerOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_prototype: InstanceGroupManagerPrototype,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_prototype,
        }
    }
}

/// Options addressing the actions or policies of one manager
#[derive(Debug, Clone, Default)]
pub struct InstanceGroupManagerChildListOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl InstanceGroupManagerChildListOptions {
    pub fn new(instance_group_id: impl Into<String>, instance_group_manager_id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            ..Default::default()
        }
    }
}

pub type ListInstanceGroupManagerActionsOptions = InstanceGroupManagerChildListOptions;
pub type ListInstanceGroupManagerPoliciesOptions = InstanceGroupManagerChildListOptions;

/// Options addressing one action or policy of a manager
#[derive(Debug, Clone, Default)]
pub struct InstanceGroupManagerChildOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub id: String,
}

impl InstanceGroupManagerChildOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteInstanceGroupManagerActionOptions = InstanceGroupManagerChildOptions;
pub type GetInstanceGroupManagerActionOptions = InstanceGroupManagerChildOptions;
pub type DeleteInstanceGroupManagerPolicyOptions = InstanceGroupManagerChildOptions;
pub type GetInstanceGroupManagerPolicyOptions = InstanceGroupManagerChildOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateInstanceGroupManagerChildOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateInstanceGroupManagerChildOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
        id: impl Into<String>,
        patch: Patch,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateInstanceGroupManagerActionOptions = UpdateInstanceGroupManagerChildOptions;
pub type UpdateInstanceGroupManagerPolicyOptions = UpdateInstanceGroupManagerChildOptions;

#[derive(Debug, Clone)]
pub struct CreateInstanceGroupManagerActionOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub instance_group_manager_action_prototype: InstanceGroupManagerActionPrototype,
}

impl CreateInstanceGroupManagerActionOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
        instance_group_manager_action_prototype: InstanceGroupManagerActionPrototype,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            instance_group_manager_action_prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInstanceGroupManagerPolicyOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub instance_group_manager_policy_prototype: InstanceGroupManagerPolicyPrototype,
}

impl CreateInstanceGroupManagerPolicyOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
        instance_group_manager_policy_prototype: InstanceGroupManagerPolicyPrototype,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            instance_group_manager_policy_prototype,
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

impl VpcService {
    pub async fn list_instance_groups(
        &self,
        options: &ListInstanceGroupsOptions,
    ) -> Result<DetailedResponse<InstanceGroupCollection>> {
        let request = ApiRequest::get("/instance_groups").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    /// Create a group that provisions its members from an instance template
    pub async fn create_instance_group(
        &self,
        options: &CreateInstanceGroupOptions,
    ) -> Result<DetailedResponse<InstanceGroup>> {
        if options.instance_template.is_none() {
            return Err(Error::Validation("instance_template".to_string()));
        }
        if options.subnets.is_empty() {
            return Err(Error::Validation("subnets".to_string()));
        }
        let request = ApiRequest::post("/instance_groups").json(options)?;
        self.execute(request).await
    }

    /// Delete a group. Its memberships must be deleted first.
    pub async fn delete_instance_group(&self, options: &DeleteInstanceGroupOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/instance_groups/{id}"))).await
    }

    pub async fn get_instance_group(&self, options: &GetInstanceGroupOptions) -> Result<DetailedResponse<InstanceGroup>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instance_groups/{id}"))).await
    }

    pub async fn update_instance_group(
        &self,
        options: &UpdateInstanceGroupOptions,
    ) -> Result<DetailedResponse<InstanceGroup>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/instance_groups/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    /// Detach the group from its load balancer pool
    pub async fn delete_instance_group_load_balancer(
        &self,
        options: &DeleteInstanceGroupLoadBalancerOptions,
    ) -> Result<DetailedResponse<()>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        self.execute_empty(ApiRequest::delete(format!("/instance_groups/{group_id}/load_balancer")))
            .await
    }

    // -------------------------------------------------------------------------
    // Managers
    // -------------------------------------------------------------------------

    pub async fn list_instance_group_managers(
        &self,
        options: &ListInstanceGroupManagersOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerCollection>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let request = ApiRequest::get(format!("/instance_groups/{group_id}/managers"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_instance_group_manager(
        &self,
        options: &CreateInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<InstanceGroupManager>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let request = ApiRequest::post(format!("/instance_groups/{group_id}/managers"))
            .json(&options.instance_group_manager_prototype)?;
        self.execute(request).await
    }

    pub async fn delete_instance_group_manager(
        &self,
        options: &DeleteInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<()>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/instance_groups/{group_id}/managers/{id}")))
            .await
    }

    pub async fn get_instance_group_manager(
        &self,
        options: &GetInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<InstanceGroupManager>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instance_groups/{group_id}/managers/{id}")))
            .await
    }

    pub async fn update_instance_group_manager(
        &self,
        options: &UpdateInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<InstanceGroupManager>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/instance_groups/{group_id}/managers/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Manager actions
    // -------------------------------------------------------------------------

    pub async fn list_instance_group_manager_actions(
        &self,
        options: &ListInstanceGroupManagerActionsOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerActionsCollection>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let request = ApiRequest::get(format!("/instance_groups/{group_id}/managers/{manager_id}/actions"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    /// Schedule an action on a `scheduled` manager
    pub async fn create_instance_group_manager_action(
        &self,
        options: &CreateInstanceGroupManagerActionOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerAction>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let request = ApiRequest::post(format!("/instance_groups/{group_id}/managers/{manager_id}/actions"))
            .json(&options.instance_group_manager_action_prototype)?;
        self.execute(request).await
    }

    pub async fn delete_instance_group_manager_action(
        &self,
        options: &DeleteInstanceGroupManagerActionOptions,
    ) -> Result<DetailedResponse<()>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!(
            "/instance_groups/{group_id}/managers/{manager_id}/actions/{id}"
        ));
        self.execute_empty(request).await
    }

    pub async fn get_instance_group_manager_action(
        &self,
        options: &GetInstanceGroupManagerActionOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerAction>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!(
            "/instance_groups/{group_id}/managers/{manager_id}/actions/{id}"
        ));
        self.execute(request).await
    }

    pub async fn update_instance_group_manager_action(
        &self,
        options: &UpdateInstanceGroupManagerActionOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerAction>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!(
            "/instance_groups/{group_id}/managers/{manager_id}/actions/{id}"
        ))
        .merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Manager policies
    // -------------------------------------------------------------------------

    pub async fn list_instance_group_manager_policies(
        &self,
        options: &ListInstanceGroupManagerPoliciesOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicyCollection>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let request = ApiRequest::get(format!("/instance_groups/{group_id}/managers/{manager_id}/policies"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    /// Add a scaling policy to an `autoscale` manager
    pub async fn create_instance_group_manager_policy(
        &self,
        options: &CreateInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicy>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let prototype = &options.instance_group_manager_policy_prototype;
        required("metric_type", &prototype.metric_type)?;
        required("policy_type", &prototype.policy_type)?;
        let request = ApiRequest::post(format!("/instance_groups/{group_id}/managers/{manager_id}/policies"))
            .json(prototype)?;
        self.execute(request).await
    }

    pub async fn delete_instance_group_manager_policy(
        &self,
        options: &DeleteInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!(
            "/instance_groups/{group_id}/managers/{manager_id}/policies/{id}"
        ));
        self.execute_empty(request).await
    }

    pub async fn get_instance_group_manager_policy(
        &self,
        options: &GetInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicy>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::get(format!(
            "/instance_groups/{group_id}/managers/{manager_id}/policies/{id}"
        ));
        self.execute(request).await
    }

    pub async fn update_instance_group_manager_policy(
        &self,
        options: &UpdateInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicy>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let manager_id = path_param("instance_group_manager_id", &options.instance_group_manager_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!(
            "/instance_groups/{group_id}/managers/{manager_id}/policies/{id}"
        ))
        .merge_patch(&options.patch);
        self.execute(request).await
    }

    // -------------------------------------------------------------------------
    // Memberships
    // -------------------------------------------------------------------------

    /// Delete every membership of the group, and the instances with them
    /// where `delete_instance_on_membership_delete` is set
    pub async fn delete_instance_group_memberships(
        &self,
        options: &DeleteInstanceGroupMembershipsOptions,
    ) -> Result<DetailedResponse<()>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        self.execute_empty(ApiRequest::delete(format!("/instance_groups/{group_id}/memberships")))
            .await
    }

    pub async fn list_instance_group_memberships(
        &self,
        options: &ListInstanceGroupMembershipsOptions,
    ) -> Result<DetailedResponse<InstanceGroupMembershipCollection>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let request = ApiRequest::get(format!("/instance_groups/{group_id}/memberships"))
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn delete_instance_group_membership(
        &self,
        options: &DeleteInstanceGroupMembershipOptions,
    ) -> Result<DetailedResponse<()>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/instance_groups/{group_id}/memberships/{id}")))
            .await
    }

    pub async fn get_instance_group_membership(
        &self,
        options: &GetInstanceGroupMembershipOptions,
    ) -> Result<DetailedResponse<InstanceGroupMembership>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instance_groups/{group_id}/memberships/{id}")))
            .await
    }

    pub async fn update_instance_group_membership(
        &self,
        options: &UpdateInstanceGroupMembershipOptions,
    ) -> Result<DetailedResponse<InstanceGroupMembership>> {
        let group_id = path_param("instance_group_id", &options.instance_group_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/instance_groups/{group_id}/memberships/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListInstanceGroupsOptions,
    InstanceGroupCollection,
    instance_groups: InstanceGroup,
    list_instance_groups
);
paged_list!(
    InstanceGroupChildListOptions,
    InstanceGroupManagerCollection,
    managers: InstanceGroupManager,
    list_instance_group_managers
);
paged_list!(
    InstanceGroupManagerChildListOptions,
    InstanceGroupManagerActionsCollection,
    actions: InstanceGroupManagerAction,
    list_instance_group_manager_actions
);
paged_list!(
    ListInstanceGroupMembershipsOptions,
    InstanceGroupMembershipCollection,
    memberships: InstanceGroupMembership,
    list_instance_group_memberships
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn autoscale_manager_decodes_by_type() {
        let manager: InstanceGroupManager = serde_json::from_value(json!({
            "aggregation_window": 120,
            "cooldown": 300,
            "created_at": "2024-04-30T12:00:00Z",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/managers/m-1",
            "id": "m-1",
            "management_enabled": true,
            "manager_type": "autoscale",
            "max_membership_count": 5,
            "min_membership_count": 1,
            "name": "my-manager",
            "policies": [{
                "href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/managers/m-1/policies/p-1",
                "id": "p-1",
                "name": "my-policy"
            }]
        }))
        .unwrap();

        match manager.manager_type {
            InstanceGroupManagerType::Autoscale {
                max_membership_count,
                policies,
                ..
            } => {
                assert_eq!(max_membership_count, 5);
                assert_eq!(policies[0].id, "p-1");
            }
            other => panic!("expected autoscale, got {other:?}"),
        }
    }

    #[test]
    fn manager_prototype_carries_type_tag() {
        let prototype = InstanceGroupManagerPrototype {
            name: Some("my-manager".into()),
            ..InstanceGroupManagerPrototype::autoscale(5)
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({"manager_type": "autoscale", "max_membership_count": 5, "name": "my-manager"})
        );

        let scheduled = InstanceGroupManagerPrototype::scheduled();
        assert_eq!(serde_json::to_value(&scheduled).unwrap(), json!({"manager_type": "scheduled"}));
    }

    #[test]
    fn action_prototype_targets_group() {
        let prototype = InstanceGroupManagerActionPrototype {
            cron_spec: Some("*/5 1,2,3 * * *".into()),
            name: Some("my-action".into()),
            ..InstanceGroupManagerActionPrototype::new(ScheduledActionTarget::Group(ScheduledActionGroup {
                membership_count: 5,
            }))
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "cron_spec": "*/5 1,2,3 * * *",
                "group": {"membership_count": 5},
                "name": "my-action"
            })
        );
    }

    #[test]
    fn action_decodes_manager_target() {
        let action: InstanceGroupManagerAction = serde_json::from_value(json!({
            "auto_delete": true,
            "auto_delete_timeout": 24,
            "created_at": "2024-04-30T12:00:00Z",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/managers/m-2/actions/a-1",
            "id": "a-1",
            "manager": {
                "href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/managers/m-1",
                "id": "m-1",
                "max_membership_count": 10,
                "min_membership_count": 2
            },
            "name": "my-action",
            "run_at": "2024-05-01T00:00:00Z",
            "status": "active"
        }))
        .unwrap();

        assert!(matches!(
            action.target,
            ScheduledActionTarget::Manager(ref m) if m.max_membership_count == Some(10)
        ));
    }

    #[test]
    fn group_patch_clears_load_balancer() {
        let patch = InstanceGroupPatch {
            membership_count: PatchField::Set(5),
            load_balancer: PatchField::Null,
            load_balancer_pool: PatchField::Null,
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(
            patch.to_value(),
            json!({"load_balancer": null, "load_balancer_pool": null, "membership_count": 5})
        );
    }

    #[test]
    fn policy_prototype_is_target_policy() {
        let prototype = InstanceGroupManagerPolicyPrototype::target("cpu", 50);
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({"metric_type": "cpu", "metric_value": 50, "policy_type": "target"})
        );
    }
}
