//! Placement groups

use super::common::{Identity, LifecycleState, PageLink, Reference};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroup {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    pub lifecycle_state: LifecycleState,
    pub name: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    #[serde(default)]
    pub resource_type: Option<String>,
    /// `host_spread` or `power_spread`
    pub strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroupCollection {
    pub first: PageLink,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    pub placement_groups: Vec<PlacementGroup>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlacementGroupPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for PlacementGroupPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListPlacementGroupsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePlacementGroupOptions {
    pub strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl CreatePlacementGroupOptions {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlacementGroupOptions {
    pub id: String,
}

impl PlacementGroupOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeletePlacementGroupOptions = PlacementGroupOptions;
pub type GetPlacementGroupOptions = PlacementGroupOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdatePlacementGroupOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdatePlacementGroupOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl VpcService {
    pub async fn list_placement_groups(
        &self,
        options: &ListPlacementGroupsOptions,
    ) -> Result<DetailedResponse<PlacementGroupCollection>> {
        let request = ApiRequest::get("/placement_groups").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    pub async fn create_placement_group(
        &self,
        options: &CreatePlacementGroupOptions,
    ) -> Result<DetailedResponse<PlacementGroup>> {
        required("strategy", &options.strategy)?;
        let request = ApiRequest::post("/placement_groups").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_placement_group(&self, options: &DeletePlacementGroupOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/placement_groups/{id}"))).await
    }

    pub async fn get_placement_group(&self, options: &GetPlacementGroupOptions) -> Result<DetailedResponse<PlacementGroup>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/placement_groups/{id}"))).await
    }

    pub async fn update_placement_group(
        &self,
        options: &UpdatePlacementGroupOptions,
    ) -> Result<DetailedResponse<PlacementGroup>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/placement_groups/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(
    ListPlacementGroupsOptions,
    PlacementGroupCollection,
    placement_groups: PlacementGroup,
    list_placement_groups
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_options_send_strategy() {
        let options = CreatePlacementGroupOptions {
            name: Some("my-placement-group".to_string()),
            ..CreatePlacementGroupOptions::new("host_spread")
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"strategy": "host_spread", "name": "my-placement-group"})
        );
    }
}
