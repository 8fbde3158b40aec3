//! Images, image export jobs and operating systems

use super::common::{CrnReference, Identity, PageLink, Reference, StatusReason};
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    #[serde(default)]
    pub checksums: Option<ImageFileChecksums>,
    #[serde(default)]
    pub size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFileChecksums {
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    #[serde(default)]
    pub deprecation_at: Option<DateTime<Utc>>,
    /// `none` or `user_managed`
    pub encryption: String,
    #[serde(default)]
    pub encryption_key: Option<CrnReference>,
    #[serde(default)]
    pub file: Option<ImageFile>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub minimum_provisioned_size: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub obsolescence_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub operating_system: Option<OperatingSystem>,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub source_volume: Option<Reference>,
    /// `available`, `deleting`, `deprecated`, `failed`, `obsolete`, `pending`, ...
    pub status: String,
    #[serde(default)]
    pub status_reasons: Vec<StatusReason>,
    /// `private` or `public`
    pub visibility: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCollection {
    pub first: PageLink,
    pub images: Vec<Image>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFilePrototype {
    /// `cos://<region>/<bucket>/<object>`
    pub href: String,
}

/// An image is created either from a file in object storage or from a
/// volume; set `file` or `source_volume` accordingly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImagePrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_data_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ImageFilePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obsolescence_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_volume: Option<Identity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImagePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub deprecation_at: PatchField<DateTime<Utc>>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub obsolescence_at: PatchField<DateTime<Utc>>,
}

impl AsPatch for ImagePatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReference {
    #[serde(default)]
    pub crn: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageObject {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageExportJob {
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub encrypted_data_key: Option<String>,
    /// `qcow2` or `vhd`
    pub format: String,
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    pub status: String,
    #[serde(default)]
    pub status_reasons: Vec<StatusReason>,
    #[serde(default)]
    pub storage_bucket: Option<BucketReference>,
    #[serde(default)]
    pub storage_href: Option<String>,
    #[serde(default)]
    pub storage_object: Option<StorageObject>,
}

/// Export jobs of one image; never paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageExportJobUnpaginatedCollection {
    pub export_jobs: Vec<ImageExportJob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageExportJobPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for ImageExportJobPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingSystem {
    pub architecture: String,
    #[serde(default)]
    pub dedicated_host_only: bool,
    pub display_name: String,
    pub family: String,
    pub href: String,
    pub name: String,
    pub vendor: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingSystemCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub operating_systems: Vec<OperatingSystem>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ListImagesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    /// Comma-separated statuses
    pub status: Option<String>,
    pub visibility: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateImageOptions {
    pub image_prototype: ImagePrototype,
}

impl CreateImageOptions {
    pub fn new(image_prototype: ImagePrototype) -> Self {
        Self { image_prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    pub id: String,
}

impl ImageOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteImageOptions = ImageOptions;
pub type GetImageOptions = ImageOptions;
pub type DeprecateImageOptions = ImageOptions;
pub type ObsoleteImageOptions = ImageOptions;
pub type ListImageExportJobsOptions = ImageOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateImageOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateImageOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateImageExportJobOptions {
    #[serde(skip)]
    pub image_id: String,
    pub storage_bucket: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CreateImageExportJobOptions {
    pub fn new(image_id: impl Into<String>, storage_bucket: Identity) -> Self {
        Self {
            image_id: image_id.into(),
            storage_bucket,
            format: None,
            name: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageExportJobOptions {
    pub image_id: String,
    pub id: String,
}

impl ImageExportJobOptions {
    pub fn new(image_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            id: id.into(),
        }
    }
}

pub type DeleteImageExportJobOptions = ImageExportJobOptions;
pub type GetImageExportJobOptions = ImageExportJobOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateImageExportJobOptions {
    pub image_id: String,
    pub id: String,
    pub patch: Patch,
}

impl UpdateImageExportJobOptions {
    pub fn new(image_id: impl Into<String>, id: impl Into<String>, patch: Patch) -> Self {
        Self {
            image_id: image_id.into(),
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListOperatingSystemsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct GetOperatingSystemOptions {
    pub name: String,
}

impl GetOperatingSystemOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl VpcService {
    pub async fn list_images(&self, options: &ListImagesOptions) -> Result<DetailedResponse<ImageCollection>> {
        let request = ApiRequest::get("/images")
            .page(options.start.as_deref(), options.limit)
            .query("resource_group.id", options.resource_group_id.as_deref())
            .query("name", options.name.as_deref())
            .query("status", options.status.as_deref())
            .query("visibility", options.visibility.as_deref());
        self.execute(request).await
    }

    /// Create an image from an object-storage file or an existing volume
    pub async fn create_image(&self, options: &CreateImageOptions) -> Result<DetailedResponse<Image>> {
        let request = ApiRequest::post("/images").json(&options.image_prototype)?;
        self.execute(request).await
    }

    pub async fn delete_image(&self, options: &DeleteImageOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/images/{id}"))).await
    }

    pub async fn get_image(&self, options: &GetImageOptions) -> Result<DetailedResponse<Image>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/images/{id}"))).await
    }

    pub async fn update_image(&self, options: &UpdateImageOptions) -> Result<DetailedResponse<Image>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/images/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }

    /// Move the image to the `deprecated` status
    pub async fn deprecate_image(&self, options: &DeprecateImageOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::post(format!("/images/{id}/deprecate"))).await
    }

    /// Move the image to the `obsolete` status
    pub async fn obsolete_image(&self, options: &ObsoleteImageOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::post(format!("/images/{id}/obsolete"))).await
    }

    pub async fn list_image_export_jobs(
        &self,
        options: &ListImageExportJobsOptions,
    ) -> Result<DetailedResponse<ImageExportJobUnpaginatedCollection>> {
        let image_id = path_param("image_id", &options.id)?;
        self.execute(ApiRequest::get(format!("/images/{image_id}/export_jobs"))).await
    }

    /// Start exporting the image to an object-storage bucket
    pub async fn create_image_export_job(
        &self,
        options: &CreateImageExportJobOptions,
    ) -> Result<DetailedResponse<ImageExportJob>> {
        let image_id = path_param("image_id", &options.image_id)?;
        let request = ApiRequest::post(format!("/images/{image_id}/export_jobs")).json(options)?;
        self.execute(request).await
    }

    /// Cancel a running export job, or delete a finished one
    pub async fn delete_image_export_job(
        &self,
        options: &DeleteImageExportJobOptions,
    ) -> Result<DetailedResponse<()>> {
        let image_id = path_param("image_id", &options.image_id)?;
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/images/{image_id}/export_jobs/{id}"))).await
    }

    pub async fn get_image_export_job(
        &self,
        options: &GetImageExportJobOptions,
    ) -> Result<DetailedResponse<ImageExportJob>> {
        let image_id = path_param("image_id", &options.image_id)?;
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/images/{image_id}/export_jobs/{id}"))).await
    }

    pub async fn update_image_export_job(
        &self,
        options: &UpdateImageExportJobOptions,
    ) -> Result<DetailedResponse<ImageExportJob>> {
        let image_id = path_param("image_id", &options.image_id)?;
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/images/{image_id}/export_jobs/{id}"))
            .merge_patch(&options.patch);
        self.execute(request).await
    }

    pub async fn list_operating_systems(
        &self,
        options: &ListOperatingSystemsOptions,
    ) -> Result<DetailedResponse<OperatingSystemCollection>> {
        let request = ApiRequest::get("/operating_systems").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn get_operating_system(
        &self,
        options: &GetOperatingSystemOptions,
    ) -> Result<DetailedResponse<OperatingSystem>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/operating_systems/{name}"))).await
    }
}

paged_list!(ListImagesOptions, ImageCollection, images: Image, list_images);
paged_list!(
    ListOperatingSystemsOptions,
    OperatingSystemCollection,
    operating_systems: OperatingSystem,
    list_operating_systems
);
