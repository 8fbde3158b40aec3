//! Backup policies, their plans and the jobs they run

use super::common::{Identity, LifecycleState, PageLink, Reference, StatusReason};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicy {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    /// `ok`, `degraded`, `faulted` or `inapplicable`
    pub health_state: String,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub last_job_completed_at: Option<DateTime<Utc>>,
    pub lifecycle_state: LifecycleState,
    /// `instance` or `volume`
    #[serde(default)]
    pub match_resource_type: Option<String>,
    #[serde(default)]
    pub match_user_tags: Vec<String>,
    pub name: String,
    #[serde(default)]
    pub plans: Vec<Reference>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyCollection {
    pub backup_policies: Vec<BackupPolicy>,
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackupPolicyPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub match_user_tags: PatchField<Vec<String>>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for BackupPolicyPatch {}

/// When backups made by a plan are deleted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackupPolicyPlanDeletionTrigger {
    /// Days after creation
    pub delete_after: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_over_count: Option<i64>,
}

/// Changes to a plan's deletion trigger; `delete_over_count` can be cleared
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BackupPolicyPlanDeletionTriggerPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub delete_after: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub delete_over_count: PatchField<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyPlan {
    pub active: bool,
    #[serde(default)]
    pub attach_user_tags: Vec<String>,
    pub copy_user_tags: bool,
    pub created_at: DateTime<Utc>,
    pub cron_spec: String,
    #[serde(default)]
    pub deletion_trigger: Option<BackupPolicyPlanDeletionTrigger>,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Plans of one backup policy; never paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyPlanCollection {
    pub plans: Vec<BackupPolicyPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BackupPolicyPlanPrototype {
    pub cron_spec: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_user_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_user_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_trigger: Option<BackupPolicyPlanDeletionTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BackupPolicyPlanPrototype {
    pub fn new(cron_spec: impl Into<String>) -> Self {
        Self {
            cron_spec: cron_spec.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackupPolicyPlanPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub active: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub attach_user_tags: PatchField<Vec<String>>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub copy_user_tags: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub cron_spec: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub deletion_trigger: PatchField<BackupPolicyPlanDeletionTriggerPatch>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for BackupPolicyPlanPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyJob {
    pub auto_delete: bool,
    pub auto_delete_after: i64,
    pub backup_policy_plan: Reference,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    /// `creation` or `deletion`
    pub job_type: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub source: Reference,
    /// `failed`, `running` or `succeeded`
    pub status: String,
    #[serde(default)]
    pub status_reasons: Vec<StatusReason>,
    #[serde(default)]
    pub target_snapshots: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyJobCollection {
    pub first: PageLink,
    pub jobs: Vec<BackupPolicyJob>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ListBackupPoliciesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CreateBackupPolicyOptions {
    pub match_user_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<BackupPolicyPlanPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreateBackupPolicyOptions {
    pub fn new(match_user_tags: Vec<String>) -> Self {
        Self {
            match_user_tags,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetBackupPolicyOptions {
    pub id: String,
}

impl GetBackupPolicyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteBackupPolicyOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteBackupPolicyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBackupPolicyOptions {
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateBackupPolicyOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBackupPolicyPlansOptions {
    pub backup_policy_id: String,
    pub name: Option<String>,
}

impl ListBackupPolicyPlansOptions {
    pub fn new(backup_policy_id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            name: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub plan: BackupPolicyPlanPrototype,
}

impl CreateBackupPolicyPlanOptions {
    pub fn new(backup_policy_id: impl Into<String>, plan: BackupPolicyPlanPrototype) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            plan,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub id: String,
}

impl GetBackupPolicyPlanOptions {
    pub fn new(backup_policy_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            id: id.into(),
        }
    }
}

pub type GetBackupPolicyJobOptions = GetBackupPolicyPlanOptions;

#[derive(Debug, Clone, Default)]
pub struct DeleteBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteBackupPolicyPlanOptions {
    pub fn new(backup_policy_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            id: id.into(),
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateBackupPolicyPlanOptions {
    pub fn new(backup_policy_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBackupPolicyJobsOptions {
    pub backup_policy_id: String,
    pub status: Option<String>,
    pub backup_policy_plan_id: Option<String>,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub source_id: Option<String>,
    pub target_snapshots_id: Option<String>,
    pub target_snapshots_crn: Option<String>,
}

impl ListBackupPolicyJobsOptions {
    pub fn new(backup_policy_id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            ..Default::default()
        }
    }
}

impl VpcService {
    pub async fn list_backup_policies(
        &self,
        options: &ListBackupPoliciesOptions,
    ) -> Result<DetailedResponse<BackupPolicyCollection>> {
        let request = ApiRequest::get("/backup_policies")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("name", options.name.as_deref())
            .query("tag", options.tag.as_deref());
        self.execute(request).await
    }

    pub async fn create_backup_policy(&self, options: &CreateBackupPolicyOptions) -> Result<DetailedResponse<BackupPolicy>> {
        let request = ApiRequest::post("/backup_policies").json(options)?;
        self.execute(request).await
    }

    /// Delete a backup policy and all of its plans
    pub async fn delete_backup_policy(&self, options: &DeleteBackupPolicyOptions) -> Result<DetailedResponse<BackupPolicy>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/backup_policies/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute(request).await
    }

    pub async fn get_backup_policy(&self, options: &GetBackupPolicyOptions) -> Result<DetailedResponse<BackupPolicy>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/backup_policies/{id}"))).await
    }

    pub async fn update_backup_policy(&self, options: &UpdateBackupPolicyOptions) -> Result<DetailedResponse<BackupPolicy>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/backup_policies/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_backup_policy_plans(
        &self,
        options: &ListBackupPolicyPlansOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlanCollection>> {
        let policy_id = path_param("backup_policy_id", &options.backup_policy_id)?;
        let request =
            ApiRequest::get(format!("/backup_policies/{policy_id}/plans")).query("name", options.name.as_deref());
        self.execute(request).await
    }

    pub async fn create_backup_policy_plan(
        &self,
        options: &CreateBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let policy_id = path_param("backup_policy_id", &options.backup_policy_id)?;
        required("cron_spec", &options.plan.cron_spec)?;
        let request = ApiRequest::post(format!("/backup_policies/{policy_id}/plans")).json(&options.plan)?;
        self.execute(request).await
    }

    pub async fn delete_backup_policy_plan(
        &self,
        options: &DeleteBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let policy_id = path_param("backup_policy_id", &options.backup_policy_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/backup_policies/{policy_id}/plans/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute(request).await
    }

    pub async fn get_backup_policy_plan(
        &self,
        options: &GetBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let policy_id = path_param("backup_policy_id", &options.backup_policy_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/backup_policies/{policy_id}/plans/{id}")))
            .await
    }

    pub async fn update_backup_policy_plan(
        &self,
        options: &UpdateBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let policy_id = path_param("backup_policy_id", &options.backup_policy_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/backup_policies/{policy_id}/plans/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_backup_policy_jobs(
        &self,
        options: &ListBackupPolicyJobsOptions,
    ) -> Result<DetailedResponse<BackupPolicyJobCollection>> {
        let policy_id = path_param("backup_policy_id", &options.backup_policy_id)?;
        let request = ApiRequest::get(format!("/backup_policies/{policy_id}/jobs"))
            .query("status", options.status.as_deref())
            .query("backup_policy_plan.id", options.backup_policy_plan_id.as_deref())
            .page(options.start.as_deref(), options.limit)
            .query("sort", options.sort.as_deref())
            .query("source.id", options.source_id.as_deref())
            .query("target_snapshots[].id", options.target_snapshots_id.as_deref())
            .query("target_snapshots[].crn", options.target_snapshots_crn.as_deref());
        self.execute(request).await
    }

    pub async fn get_backup_policy_job(
        &self,
        options: &GetBackupPolicyJobOptions,
    ) -> Result<DetailedResponse<BackupPolicyJob>> {
        let policy_id = path_param("backup_policy_id", &options.backup_policy_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/backup_policies/{policy_id}/jobs/{id}")))
            .await
    }
}

paged_list!(
    ListBackupPoliciesOptions,
    BackupPolicyCollection,
    backup_policies: BackupPolicy,
    list_backup_policies
);
paged_list!(
    ListBackupPolicyJobsOptions,
    BackupPolicyJobCollection,
    jobs: BackupPolicyJob,
    list_backup_policy_jobs
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_policy_with_plan() {
        let options = CreateBackupPolicyOptions {
            match_resource_type: Some("volume".to_string()),
            name: Some("my-backup-policy".to_string()),
            plans: Some(vec![BackupPolicyPlanPrototype {
                deletion_trigger: Some(BackupPolicyPlanDeletionTrigger {
                    delete_after: 20,
                    delete_over_count: None,
                }),
                ..BackupPolicyPlanPrototype::new("*/5 1,2,3 * * *")
            }]),
            ..CreateBackupPolicyOptions::new(vec!["my-daily-backup-policy".to_string()])
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "match_user_tags": ["my-daily-backup-policy"],
                "match_resource_type": "volume",
                "name": "my-backup-policy",
                "plans": [{"cron_spec": "*/5 1,2,3 * * *", "deletion_trigger": {"delete_after": 20}}]
            })
        );
    }

    #[test]
    fn plan_patch_nests_deletion_trigger_clear() {
        let patch = BackupPolicyPlanPatch {
            deletion_trigger: PatchField::Set(BackupPolicyPlanDeletionTriggerPatch {
                delete_after: PatchField::Set(30),
                delete_over_count: PatchField::Null,
            }),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(
            patch.to_value(),
            json!({"deletion_trigger": {"delete_after": 30, "delete_over_count": null}})
        );
    }

    #[test]
    fn job_decodes_status_reasons() {
        let job: BackupPolicyJob = serde_json::from_value(json!({
            "auto_delete": true,
            "auto_delete_after": 90,
            "backup_policy_plan": {"href": "https://us-south.iaas.cloud.ibm.com/v1/backup_policies/bp-1/plans/p-1", "id": "p-1", "name": "my-plan"},
            "created_at": "2024-05-01T10:00:00Z",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/backup_policies/bp-1/jobs/j-1",
            "id": "j-1",
            "job_type": "creation",
            "resource_type": "backup_policy_job",
            "source": {"href": "https://us-south.iaas.cloud.ibm.com/v1/volumes/v-1", "id": "v-1"},
            "status": "failed",
            "status_reasons": [{"code": "source_volume_busy", "message": "The source volume is busy"}],
            "target_snapshots": []
        }))
        .unwrap();
        assert_eq!(job.status_reasons[0].code, "source_volume_busy");
        assert!(job.completed_at.is_none());
    }
}
