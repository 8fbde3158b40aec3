//! File shares, share profiles and mount targets

use super::common::{
    CrnReference, Identity, LifecycleState, NameReference, PageLink, ProfileValue, Reference,
    ReservedIpReference, StatusReason,
};
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareProfile {
    #[serde(default)]
    pub capacity: Option<ProfileValue>,
    /// `defined_performance` or `tiered`
    pub family: String,
    pub href: String,
    #[serde(default)]
    pub iops: Option<ProfileValue>,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareProfileCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub profiles: Vec<ShareProfile>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    /// `security_group` or `vpc`
    #[serde(default)]
    pub access_control_mode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    /// `provider_managed` or `user_managed`
    pub encryption: String,
    #[serde(default)]
    pub encryption_key: Option<CrnReference>,
    pub href: String,
    pub id: String,
    pub iops: i64,
    pub lifecycle_state: LifecycleState,
    #[serde(default)]
    pub mount_targets: Vec<Reference>,
    pub name: String,
    pub profile: NameReference,
    #[serde(default)]
    pub replica_share: Option<Reference>,
    #[serde(default)]
    pub replication_cron_spec: Option<String>,
    /// `none`, `replica` or `source`
    pub replication_role: String,
    /// `active`, `failover_pending`, `initializing`, `none`, `split_pending`
    /// or `unhealthy`
    pub replication_status: String,
    #[serde(default)]
    pub replication_status_reasons: Vec<StatusReason>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Size in gigabytes
    pub size: i64,
    #[serde(default)]
    pub source_share: Option<Reference>,
    #[serde(default)]
    pub user_tags: Vec<String>,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub shares: Vec<Share>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ShareMountTargetVirtualNetworkInterfacePrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<Identity>,
}

/// Where a mount target is reachable from: a whole VPC, or a dedicated
/// virtual network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ShareMountTargetAttachment {
    Vpc {
        vpc: Identity,
    },
    VirtualNetworkInterface {
        virtual_network_interface: ShareMountTargetVirtualNetworkInterfacePrototype,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareMountTargetPrototype {
    #[serde(flatten)]
    pub attachment: ShareMountTargetAttachment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `none` or `user_managed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_encryption: Option<String>,
}

impl ShareMountTargetPrototype {
    pub fn new(attachment: ShareMountTargetAttachment) -> Self {
        Self {
            attachment,
            name: None,
            transit_encryption: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePrototype {
    pub profile: Identity,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_control_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_targets: Option<Vec<ShareMountTargetPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replica created together with this share
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_share: Option<Box<SharePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_cron_spec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    /// Source share when this share is created as a replica
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_share: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl SharePrototype {
    pub fn new(profile: Identity, zone: Identity) -> Self {
        Self {
            profile,
            zone,
            size: None,
            access_control_mode: None,
            encryption_key: None,
            iops: None,
            mount_targets: None,
            name: None,
            replica_share: None,
            replication_cron_spec: None,
            resource_group: None,
            source_share: None,
            user_tags: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SharePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub access_control_mode: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub iops: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub profile: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub replication_cron_spec: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub size: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub user_tags: PatchField<Vec<String>>,
}

impl AsPatch for SharePatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareMountTarget {
    #[serde(default)]
    pub access_control_mode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    #[serde(default)]
    pub mount_path: Option<String>,
    pub name: String,
    #[serde(default)]
    pub primary_ip: Option<ReservedIpReference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub subnet: Option<Reference>,
    pub transit_encryption: String,
    #[serde(default)]
    pub virtual_network_interface: Option<Reference>,
    #[serde(default)]
    pub vpc: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareMountTargetCollection {
    pub first: PageLink,
    pub limit: i64,
    pub mount_targets: Vec<ShareMountTarget>,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShareMountTargetPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for ShareMountTargetPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListShareProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetShareProfileOptions {
    pub name: String,
}

impl GetShareProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListSharesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub sort: Option<String>,
    pub replication_role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateShareOptions {
    pub share_prototype: SharePrototype,
}

impl CreateShareOptions {
    pub fn new(share_prototype: SharePrototype) -> Self {
        Self { share_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShareOptions {
    pub id: String,
}

impl ShareOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetShareOptions = ShareOptions;
pub type GetShareSourceOptions = ShareOptions;
pub type DeleteShareSourceOptions = ShareOptions;

#[derive(Debug, Clone, Default)]
pub struct DeleteShareOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteShareOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateShareOptions {
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateShareOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

/// Fail over a replica share to become the source
#[derive(Debug, Clone, Default, Serialize)]
pub struct FailoverShareOptions {
    #[serde(skip)]
    pub share_id: String,
    /// `fail` or `split`, applied when the source cannot be reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_policy: Option<String>,
    /// Seconds to wait for a graceful failover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
}

impl FailoverShareOptions {
    pub fn new(share_id: impl Into<String>) -> Self {
        Self {
            share_id: share_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListShareMountTargetsOptions {
    pub share_id: String,
    pub name: Option<String>,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListShareMountTargetsOptions {
    pub fn new(share_id: impl Into<String>) -> Self {
        Self {
            share_id: share_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateShareMountTargetOptions {
    pub share_id: String,
    pub share_mount_target_prototype: ShareMountTargetPrototype,
}

impl CreateShareMountTargetOptions {
    pub fn new(share_id: impl Into<String>, share_mount_target_prototype: ShareMountTargetPrototype) -> Self {
        Self {
            share_id: share_id.into(),
            share_mount_target_prototype,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShareMountTargetOptions {
    pub share_id: String,
    pub id: String,
}

impl ShareMountTargetOptions {
    pub fn new(share_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            share_id: share_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteShareMountTargetOptions = ShareMountTargetOptions;
pub type GetShareMountTargetOptions = ShareMountTargetOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateShareMountTargetOptions {
    pub share_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateShareMountTargetOptions {
    pub fn new(share_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            share_id: share_id.into(),
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_share_profiles(
        &self,
        options: &ListShareProfilesOptions,
    ) -> Result<DetailedResponse<ShareProfileCollection>> {
        let request = ApiRequest::get("/share/profiles")
            .page(options.start.as_deref(), options.limit)
            .query("sort", options.sort.as_deref());
        self.execute(request).await
    }

    pub async fn get_share_profile(&self, options: &GetShareProfileOptions) -> Result<DetailedResponse<ShareProfile>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/share/profiles/{name}"))).await
    }

    pub async fn list_shares(&self, options: &ListSharesOptions) -> Result<DetailedResponse<ShareCollection>> {
        let request = ApiRequest::get("/shares")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("name", options.name.as_deref())
            .query("sort", options.sort.as_deref())
            .query("replication_role", options.replication_role.as_deref());
        self.execute(request).await
    }

    pub async fn create_share(&self, options: &CreateShareOptions) -> Result<DetailedResponse<Share>> {
        let request = ApiRequest::post("/shares").json(&options.share_prototype)?;
        self.execute(request).await
    }

    /// Delete a share. Its mount targets must be deleted first.
    ///
    /// The deletion is accepted asynchronously; the returned share is in the
    /// `deleting` lifecycle state.
    pub async fn delete_share(&self, options: &DeleteShareOptions) -> Result<DetailedResponse<Share>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/shares/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute(request).await
    }

    pub async fn get_share(&self, options: &GetShareOptions) -> Result<DetailedResponse<Share>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/shares/{id}"))).await
    }

    pub async fn update_share(&self, options: &UpdateShareOptions) -> Result<DetailedResponse<Share>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/shares/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn failover_share(&self, options: &FailoverShareOptions) -> Result<DetailedResponse<()>> {
        let share_id = path_param("share_id", &options.share_id)?;
        let request = ApiRequest::post(format!("/shares/{share_id}/failover")).json(options)?;
        self.execute_empty(request).await
    }

    /// Fetch the source share of a replica
    pub async fn get_share_source(&self, options: &GetShareSourceOptions) -> Result<DetailedResponse<Share>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/shares/{id}/source"))).await
    }

    /// Split a replica from its source, making it an independent share
    pub async fn delete_share_source(&self, options: &DeleteShareSourceOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/shares/{id}/source"))).await
    }

    pub async fn list_share_mount_targets(
        &self,
        options: &ListShareMountTargetsOptions,
    ) -> Result<DetailedResponse<ShareMountTargetCollection>> {
        let share_id = path_param("share_id", &options.share_id)?;
        let request = ApiRequest::get(format!("/shares/{share_id}/mount_targets"))
            .query("name", options.name.as_deref())
            .page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_share_mount_target(
        &self,
        options: &CreateShareMountTargetOptions,
    ) -> Result<DetailedResponse<ShareMountTarget>> {
        let share_id = path_param("share_id", &options.share_id)?;
        let request = ApiRequest::post(format!("/shares/{share_id}/mount_targets"))
            .json(&options.share_mount_target_prototype)?;
        self.execute(request).await
    }

    pub async fn delete_share_mount_target(
        &self,
        options: &DeleteShareMountTargetOptions,
    ) -> Result<DetailedResponse<ShareMountTarget>> {
        let share_id = path_param("share_id", &options.share_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::delete(format!("/shares/{share_id}/mount_targets/{id}")))
            .await
    }

    pub async fn get_share_mount_target(
        &self,
        options: &GetShareMountTargetOptions,
    ) -> Result<DetailedResponse<ShareMountTarget>> {
        let share_id = path_param("share_id", &options.share_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/shares/{share_id}/mount_targets/{id}")))
            .await
    }

    pub async fn update_share_mount_target(
        &self,
        options: &UpdateShareMountTargetOptions,
    ) -> Result<DetailedResponse<ShareMountTarget>> {
        let share_id = path_param("share_id", &options.share_id)?;
        let id = path_param("id", &options.id)?;
        let request =
            ApiRequest::patch(format!("/shares/{share_id}/mount_targets/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListShareProfilesOptions,
    ShareProfileCollection,
    profiles: ShareProfile,
    list_share_profiles
);
paged_list!(ListSharesOptions, ShareCollection, shares: Share, list_shares);
paged_list!(
    ListShareMountTargetsOptions,
    ShareMountTargetCollection,
    mount_targets: ShareMountTarget,
    list_share_mount_targets
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prototype_with_replica_and_vpc_mount_target() {
        let replica = SharePrototype {
            name: Some("my-share-replica".to_string()),
            replication_cron_spec: Some("0 */5 * * *".to_string()),
            ..SharePrototype::new(Identity::name("dp2"), Identity::name("us-south-2"))
        };
        let prototype = SharePrototype {
            size: Some(200),
            name: Some("my-share".to_string()),
            mount_targets: Some(vec![ShareMountTargetPrototype::new(ShareMountTargetAttachment::Vpc {
                vpc: Identity::id("vpc-1"),
            })]),
            replica_share: Some(Box::new(replica)),
            ..SharePrototype::new(Identity::name("dp2"), Identity::name("us-south-1"))
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "profile": {"name": "dp2"},
                "zone": {"name": "us-south-1"},
                "size": 200,
                "mount_targets": [{"vpc": {"id": "vpc-1"}}],
                "name": "my-share",
                "replica_share": {
                    "profile": {"name": "dp2"},
                    "zone": {"name": "us-south-2"},
                    "name": "my-share-replica",
                    "replication_cron_spec": "0 */5 * * *"
                }
            })
        );
    }

    #[test]
    fn vni_mount_target_flattens_attachment() {
        let prototype = ShareMountTargetPrototype {
            name: Some("mt-1".to_string()),
            transit_encryption: Some("none".to_string()),
            ..ShareMountTargetPrototype::new(ShareMountTargetAttachment::VirtualNetworkInterface {
                virtual_network_interface: ShareMountTargetVirtualNetworkInterfacePrototype {
                    subnet: Some(Identity::id("subnet-1")),
                    ..Default::default()
                },
            })
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "virtual_network_interface": {"subnet": {"id": "subnet-1"}},
                "name": "mt-1",
                "transit_encryption": "none"
            })
        );
    }

    #[test]
    fn failover_body_omits_share_id() {
        let options = FailoverShareOptions {
            fallback_policy: Some("split".to_string()),
            timeout: Some(500),
            ..FailoverShareOptions::new("share-1")
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"fallback_policy": "split", "timeout": 500})
        );
    }

    #[test]
    fn patch_clears_replication_schedule() {
        let patch = SharePatch {
            replication_cron_spec: PatchField::Null,
            size: PatchField::Set(300),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"replication_cron_spec": null, "size": 300}));
    }
}
