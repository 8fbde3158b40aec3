//! Volume snapshots

use super::common::{CrnReference, Identity, LifecycleState, NameReference, PageLink, Reference};
use super::images::OperatingSystem;
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotClone {
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub backup_policy_plan: Option<Reference>,
    pub bootable: bool,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clones: Vec<SnapshotClone>,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub deletable: bool,
    pub encryption: String,
    #[serde(default)]
    pub encryption_key: Option<CrnReference>,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub minimum_capacity: i64,
    pub name: String,
    #[serde(default)]
    pub operating_system: Option<OperatingSystem>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub size: i64,
    #[serde(default)]
    pub source_image: Option<Reference>,
    pub source_volume: Reference,
    #[serde(default)]
    pub user_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub snapshots: Vec<Snapshot>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotClonePrototype {
    pub zone: Identity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotPrototype {
    pub source_volume: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clones: Option<Vec<SnapshotClonePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl SnapshotPrototype {
    pub fn new(source_volume: Identity) -> Self {
        Self {
            source_volume,
            clones: None,
            name: None,
            resource_group: None,
            user_tags: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnapshotPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub user_tags: PatchField<Vec<String>>,
}

impl AsPatch for SnapshotPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListSnapshotsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub tag: Option<String>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub source_volume_id: Option<String>,
    pub source_volume_crn: Option<String>,
    pub source_image_id: Option<String>,
    pub source_image_crn: Option<String>,
    pub backup_policy_plan_id: Option<String>,
    /// `created_at`, `-created_at`, `name`, `-name`
    pub sort: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateSnapshotOptions {
    pub snapshot_prototype: SnapshotPrototype,
}

impl CreateSnapshotOptions {
    pub fn new(snapshot_prototype: SnapshotPrototype) -> Self {
        Self { snapshot_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteSnapshotsOptions {
    pub source_volume_id: String,
}

impl DeleteSnapshotsOptions {
    pub fn new(source_volume_id: impl Into<String>) -> Self {
        Self {
            source_volume_id: source_volume_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteSnapshotOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteSnapshotOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSnapshotOptions {
    pub id: String,
}

impl GetSnapshotOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSnapshotOptions {
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateSnapshotOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

impl VpcService {
    pub async fn list_snapshots(&self, options: &ListSnapshotsOptions) -> Result<DetailedResponse<SnapshotCollection>> {
        let request = ApiRequest::get("/snapshots")
            .page(options.start.as_deref(), options.limit)
            .query("tag", options.tag.as_deref())
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("name", options.name.as_deref())
            .query("source_volume.id", options.source_volume_id.as_deref())
            .query("source_volume.crn", options.source_volume_crn.as_deref())
            .query("source_image.id", options.source_image_id.as_deref())
            .query("source_image.crn", options.source_image_crn.as_deref())
            .query("backup_policy_plan.id", options.backup_policy_plan_id.as_deref())
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    pub async fn create_snapshot(&self, options: &CreateSnapshotOptions) -> Result<DetailedResponse<Snapshot>> {
        let request = ApiRequest::post("/snapshots").json(&options.snapshot_prototype)?;
        self.execute(request).await
    }

    /// Delete every snapshot taken of one volume
    pub async fn delete_snapshots(&self, options: &DeleteSnapshotsOptions) -> Result<DetailedResponse<()>> {
        let volume_id = required("source_volume.id", &options.source_volume_id)?;
        let request = ApiRequest::delete("/snapshots").query("source_volume.id", Some(volume_id));
        self.execute_empty(request).await
    }

    pub async fn delete_snapshot(&self, options: &DeleteSnapshotOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/snapshots/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute_empty(request).await
    }

    pub async fn get_snapshot(&self, options: &GetSnapshotOptions) -> Result<DetailedResponse<Snapshot>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/snapshots/{id}"))).await
    }

    pub async fn update_snapshot(&self, options: &UpdateSnapshotOptions) -> Result<DetailedResponse<Snapshot>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/snapshots/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(ListSnapshotsOptions, SnapshotCollection, snapshots: Snapshot, list_snapshots);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_decodes_clones_and_source() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "bootable": true,
            "clones": [{
                "available": true,
                "created_at": "2024-04-30T12:00:00Z",
                "zone": {"href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south/zones/us-south-1", "name": "us-south-1"}
            }],
            "created_at": "2024-04-30T12:00:00Z",
            "crn": "crn:v1:bluemix:public:is:us-south:a/123::snapshot:snap-1",
            "deletable": true,
            "encryption": "provider_managed",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/snapshots/snap-1",
            "id": "snap-1",
            "lifecycle_state": "stable",
            "minimum_capacity": 100,
            "name": "my-snapshot",
            "size": 10,
            "source_volume": {"href": "https://us-south.iaas.cloud.ibm.com/v1/volumes/vol-1", "id": "vol-1"}
        }))
        .unwrap();

        assert_eq!(snapshot.source_volume.id, "vol-1");
        assert_eq!(snapshot.clones[0].zone.name, "us-south-1");
        assert_eq!(snapshot.lifecycle_state, LifecycleState::Stable);
        assert!(snapshot.user_tags.is_empty());
        assert!(snapshot.backup_policy_plan.is_none());
    }

    #[test]
    fn snapshot_prototype_leaves_out_unset_fields() {
        let prototype = SnapshotPrototype {
            clones: Some(vec![SnapshotClonePrototype {
                zone: Identity::name("us-south-1"),
            }]),
            name: Some("my-snapshot".to_string()),
            ..SnapshotPrototype::new(Identity::id("vol-1"))
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "source_volume": {"id": "vol-1"},
                "clones": [{"zone": {"name": "us-south-1"}}],
                "name": "my-snapshot"
            })
        );
    }

    #[test]
    fn snapshot_patch_clears_tags_with_null() {
        let patch = SnapshotPatch {
            user_tags: PatchField::Null,
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"user_tags": null}));
    }
}
