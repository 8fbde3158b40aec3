//! Flow log collectors

use super::common::{Identity, LifecycleState, PageLink, Reference};
use super::images::BucketReference;
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collects flow logs of a VPC, subnet, instance or network interface into
/// a cloud object storage bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLogCollector {
    pub active: bool,
    pub auto_delete: bool,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    pub storage_bucket: BucketReference,
    /// Check `resource_type` to tell the kind of target apart
    pub target: Reference,
    pub vpc: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLogCollectorCollection {
    pub first: PageLink,
    pub flow_log_collectors: Vec<FlowLogCollector>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowLogCollectorPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub active: PatchField<bool>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for FlowLogCollectorPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListFlowLogCollectorsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_crn: Option<String>,
    pub vpc_name: Option<String>,
    pub target_id: Option<String>,
    pub target_resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageBucketIdentity {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateFlowLogCollectorOptions {
    pub storage_bucket: StorageBucketIdentity,
    pub target: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreateFlowLogCollectorOptions {
    pub fn new(storage_bucket: impl Into<String>, target: Identity) -> Self {
        Self {
            storage_bucket: StorageBucketIdentity {
                name: storage_bucket.into(),
            },
            target,
            active: None,
            name: None,
            resource_group: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlowLogCollectorOptions {
    pub id: String,
}

impl FlowLogCollectorOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteFlowLogCollectorOptions = FlowLogCollectorOptions;
pub type GetFlowLogCollectorOptions = FlowLogCollectorOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateFlowLogCollectorOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateFlowLogCollectorOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl VpcService {
    pub async fn list_flow_log_collectors(
        &self,
        options: &ListFlowLogCollectorsOptions,
    ) -> Result<DetailedResponse<FlowLogCollectorCollection>> {
        let request = ApiRequest::get("/flow_log_collectors")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("name", options.name.as_deref())
            .query("vpc.id", options.vpc_id.as_deref())
            .query("vpc.crn", options.vpc_crn.as_deref())
            .query("vpc.name", options.vpc_name.as_deref())
            .query("target.id", options.target_id.as_deref())
            .query("target.resource_type", options.target_resource_type.as_deref());
        self.execute(request).await
    }

    pub async fn create_flow_log_collector(
        &self,
        options: &CreateFlowLogCollectorOptions,
    ) -> Result<DetailedResponse<FlowLogCollector>> {
        required("storage_bucket.name", &options.storage_bucket.name)?;
        let request = ApiRequest::post("/flow_log_collectors").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_flow_log_collector(
        &self,
        options: &DeleteFlowLogCollectorOptions,
    ) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/flow_log_collectors/{id}"))).await
    }

    pub async fn get_flow_log_collector(
        &self,
        options: &GetFlowLogCollectorOptions,
    ) -> Result<DetailedResponse<FlowLogCollector>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/flow_log_collectors/{id}"))).await
    }

    pub async fn update_flow_log_collector(
        &self,
        options: &UpdateFlowLogCollectorOptions,
    ) -> Result<DetailedResponse<FlowLogCollector>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/flow_log_collectors/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListFlowLogCollectorsOptions,
    FlowLogCollectorCollection,
    flow_log_collectors: FlowLogCollector,
    list_flow_log_collectors
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_options_name_bucket_and_target() {
        let options = CreateFlowLogCollectorOptions {
            name: Some("my-flow-log-collector".to_string()),
            ..CreateFlowLogCollectorOptions::new("bucket-27200-lwx4cfvcue", Identity::id("vpc-1"))
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "storage_bucket": {"name": "bucket-27200-lwx4cfvcue"},
                "target": {"id": "vpc-1"},
                "name": "my-flow-log-collector"
            })
        );
    }

    #[test]
    fn patch_can_pause_collection() {
        let patch = FlowLogCollectorPatch {
            active: PatchField::Set(false),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_string(), r#"{"active":false}"#);
    }
}
