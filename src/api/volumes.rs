//! Block storage volumes and volume profiles

use super::common::{CrnReference, Identity, NameReference, PageLink, Reference, StatusReason};
use super::images::OperatingSystem;
use super::instances::VolumeAttachmentDevice;
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeProfile {
    /// `custom`, `tiered` or `gpfs`
    pub family: String,
    pub href: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeProfileCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub profiles: Vec<VolumeProfile>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// An attachment of the volume, as seen from the volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAttachmentReferenceVolumeContext {
    pub delete_volume_on_instance_delete: bool,
    #[serde(default)]
    pub device: Option<VolumeAttachmentDevice>,
    pub href: String,
    pub id: String,
    pub instance: Reference,
    pub name: String,
    #[serde(rename = "type")]
    pub attachment_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(default)]
    pub active: bool,
    /// `attached`, `unattached` or `unusable`
    #[serde(default)]
    pub attachment_state: Option<String>,
    #[serde(default)]
    pub bandwidth: Option<i64>,
    #[serde(default)]
    pub busy: bool,
    pub capacity: i64,
    pub created_at: DateTime<Utc>,
    pub crn: String,
    /// `provider_managed` or `user_managed`
    pub encryption: String,
    #[serde(default)]
    pub encryption_key: Option<CrnReference>,
    #[serde(default)]
    pub health_state: Option<String>,
    pub href: String,
    pub id: String,
    pub iops: i64,
    pub name: String,
    #[serde(default)]
    pub operating_system: Option<OperatingSystem>,
    pub profile: NameReference,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub source_image: Option<Reference>,
    #[serde(default)]
    pub source_snapshot: Option<Reference>,
    /// `available`, `failed`, `pending`, `pending_deletion`, `unusable`, `updating`
    pub status: String,
    #[serde(default)]
    pub status_reasons: Vec<StatusReason>,
    #[serde(default)]
    pub user_tags: Vec<String>,
    #[serde(default)]
    pub volume_attachments: Vec<VolumeAttachmentReferenceVolumeContext>,
    pub zone: NameReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
    pub volumes: Vec<Volume>,
}

/// Standalone volume creation request. Either `capacity` or
/// `source_snapshot` determines the size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePrototype {
    pub profile: Identity,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_snapshot: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl VolumePrototype {
    pub fn new(profile: Identity, zone: Identity) -> Self {
        Self {
            profile,
            zone,
            capacity: None,
            encryption_key: None,
            iops: None,
            name: None,
            resource_group: None,
            source_snapshot: None,
            user_tags: None,
        }
    }
}

/// A volume created as part of an instance; its zone is the instance's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePrototypeInstanceContext {
    pub profile: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_snapshot: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl VolumePrototypeInstanceContext {
    pub fn new(profile: Identity) -> Self {
        Self {
            profile,
            capacity: None,
            encryption_key: None,
            iops: None,
            name: None,
            source_snapshot: None,
            user_tags: None,
        }
    }
}

/// Sparse update of a [`Volume`]
///
/// `user_tags` replaces the whole tag list; `Set(vec![])` removes every tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub capacity: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub iops: PatchField<i64>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub profile: PatchField<Identity>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub user_tags: PatchField<Vec<String>>,
}

impl AsPatch for VolumePatch {}

#[derive(Debug, Clone, Default)]
pub struct ListVolumeProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct GetVolumeProfileOptions {
    pub name: String,
}

impl GetVolumeProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListVolumesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub attachment_state: Option<String>,
    pub encryption: Option<String>,
    pub name: Option<String>,
    pub operating_system_family: Option<String>,
    pub operating_system_architecture: Option<String>,
    pub tag: Option<String>,
    pub zone_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateVolumeOptions {
    pub volume_prototype: VolumePrototype,
}

impl CreateVolumeOptions {
    pub fn new(volume_prototype: VolumePrototype) -> Self {
        Self { volume_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteVolumeOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteVolumeOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            if_match: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetVolumeOptions {
    pub id: String,
}

impl GetVolumeOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVolumeOptions {
    pub id: String,
    pub patch: Patch,
    pub if_match: Option<String>,
}

impl UpdateVolumeOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }
}

impl VpcService {
    pub async fn list_volume_profiles(
        &self,
        options: &ListVolumeProfilesOptions,
    ) -> Result<DetailedResponse<VolumeProfileCollection>> {
        let request = ApiRequest::get("/volume/profiles").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn get_volume_profile(&self, options: &GetVolumeProfileOptions) -> Result<DetailedResponse<VolumeProfile>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/volume/profiles/{name}"))).await
    }

    pub async fn list_volumes(&self, options: &ListVolumesOptions) -> Result<DetailedResponse<VolumeCollection>> {
        let request = ApiRequest::get("/volumes")
            .page(options.start.as_deref(), options.limit)
            .query("attachment_state", options.attachment_state.as_deref())
            .query("encryption", options.encryption.as_deref())
            .query("name", options.name.as_deref())
            .query("operating_system.family", options.operating_system_family.as_deref())
            .query(
                "operating_system.architecture",
                options.operating_system_architecture.as_deref(),
            )
            .query("tag", options.tag.as_deref())
            .query("zone.name", options.zone_name.as_deref());
        self.execute(request).await
    }

    pub async fn create_volume(&self, options: &CreateVolumeOptions) -> Result<DetailedResponse<Volume>> {
        let request = ApiRequest::post("/volumes").json(&options.volume_prototype)?;
        self.execute(request).await
    }

    /// Delete a volume. With `if_match`, the call fails with 412 when the
    /// volume changed since the ETag was read.
    pub async fn delete_volume(&self, options: &DeleteVolumeOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::delete(format!("/volumes/{id}"))
            .if_match(options.if_match.as_deref())?;
        self.execute_empty(request).await
    }

    pub async fn get_volume(&self, options: &GetVolumeOptions) -> Result<DetailedResponse<Volume>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/volumes/{id}"))).await
    }

    pub async fn update_volume(&self, options: &UpdateVolumeOptions) -> Result<DetailedResponse<Volume>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/volumes/{id}"))
            .if_match(options.if_match.as_deref())?
            .merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListVolumeProfilesOptions,
    VolumeProfileCollection,
    profiles: VolumeProfile,
    list_volume_profiles
);
paged_list!(ListVolumesOptions, VolumeCollection, volumes: Volume, list_volumes);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn volume_patch_renames_and_retags() {
        let patch = VolumePatch {
            name: "vol-renamed".into(),
            user_tags: PatchField::Set(vec!["tag-a".to_string()]),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_string(), r#"{"name":"vol-renamed","user_tags":["tag-a"]}"#);
    }

    #[test]
    fn volume_patch_empty_tags_are_sent() {
        let patch = VolumePatch {
            user_tags: PatchField::Set(vec![]),
            ..Default::default()
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"user_tags": []}));
    }

    #[test]
    fn volume_prototype_requires_profile_and_zone() {
        let prototype = VolumePrototype {
            capacity: Some(100),
            ..VolumePrototype::new(Identity::name("general-purpose"), Identity::name("us-south-1"))
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "profile": {"name": "general-purpose"},
                "zone": {"name": "us-south-1"},
                "capacity": 100
            })
        );
    }
}
