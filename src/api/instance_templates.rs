//! Instance templates
//!
//! A template stores an instance prototype so instances (and instance
//! groups) can be provisioned from it later. The service echoes the
//! prototype back, so [`InstanceTemplate`] carries it as an
//! [`InstancePrototype`].

use super::instances::InstancePrototype;
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Template creation body; the fields are those of an instance prototype
pub type InstanceTemplatePrototype = InstancePrototype;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplate {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub href: String,
    pub id: String,
    /// The stored prototype, including the template's `name` and
    /// `resource_group`
    #[serde(flatten)]
    pub prototype: InstancePrototype,
}

impl InstanceTemplate {
    pub fn name(&self) -> Option<&str> {
        self.prototype.name.as_deref()
    }
}

/// Instance templates are never paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateCollection {
    pub templates: Vec<InstanceTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstanceTemplatePatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for InstanceTemplatePatch {}

#[derive(Debug, Clone, Default)]
pub struct ListInstanceTemplatesOptions {}

#[derive(Debug, Clone)]
pub struct CreateInstanceTemplateOptions {
    pub instance_template_prototype: InstanceTemplatePrototype,
}

impl CreateInstanceTemplateOptions {
    pub fn new(instance_template_prototype: InstanceTemplatePrototype) -> Self {
        Self {
            instance_template_prototype,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstanceTemplateOptions {
    pub id: String,
}

impl InstanceTemplateOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteInstanceTemplateOptions = InstanceTemplateOptions;
pub type GetInstanceTemplateOptions = InstanceTemplateOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateInstanceTemplateOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateInstanceTemplateOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl VpcService {
    pub async fn list_instance_templates(
        &self,
        _options: &ListInstanceTemplatesOptions,
    ) -> Result<DetailedResponse<InstanceTemplateCollection>> {
        self.execute(ApiRequest::get("/instance/templates")).await
    }

    /// Store an instance prototype as a template
    pub async fn create_instance_template(
        &self,
        options: &CreateInstanceTemplateOptions,
    ) -> Result<DetailedResponse<InstanceTemplate>> {
        let request = ApiRequest::post("/instance/templates").json(&options.instance_template_prototype)?;
        self.execute(request).await
    }

    /// Delete a template. Templates still used by an instance group cannot
    /// be deleted.
    pub async fn delete_instance_template(
        &self,
        options: &DeleteInstanceTemplateOptions,
    ) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/instance/templates/{id}"))).await
    }

    pub async fn get_instance_template(
        &self,
        options: &GetInstanceTemplateOptions,
    ) -> Result<DetailedResponse<InstanceTemplate>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/instance/templates/{id}"))).await
    }

    pub async fn update_instance_template(
        &self,
        options: &UpdateInstanceTemplateOptions,
    ) -> Result<DetailedResponse<InstanceTemplate>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/instance/templates/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::Identity;
    use crate::api::instances::{NetworkInterfacePrototype, VolumeAttachmentVolume};
    use serde_json::json;

    fn template_json() -> serde_json::Value {
        json!({
            "created_at": "2024-04-30T12:00:00Z",
            "crn": "crn:v1:bluemix:public:is:us-south:a/123::instance-template:tpl-1",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/instance/templates/tpl-1",
            "id": "tpl-1",
            "image": {"id": "r006-image"},
            "keys": [{"id": "r006-key"}],
            "name": "my-template",
            "primary_network_interface": {
                "name": "eth0",
                "subnet": {"id": "r006-subnet"}
            },
            "profile": {"name": "bx2d-2x8"},
            "resource_group": {"id": "rg-1"},
            "boot_volume_attachment": {
                "delete_volume_on_instance_delete": true,
                "volume": {"capacity": 100, "profile": {"name": "general-purpose"}}
            },
            "vpc": {"id": "r006-vpc"},
            "zone": {"name": "us-south-1"}
        })
    }

    #[test]
    fn template_decodes_echoed_prototype() {
        let template: InstanceTemplate = serde_json::from_value(template_json()).unwrap();

        assert_eq!(template.id, "tpl-1");
        assert_eq!(template.name(), Some("my-template"));
        assert_eq!(template.prototype.image, Some(Identity::id("r006-image")));
        assert_eq!(template.prototype.zone, Some(Identity::name("us-south-1")));
        assert_eq!(
            template.prototype.primary_network_interface.as_ref().unwrap().subnet,
            Identity::id("r006-subnet")
        );
        let boot = template.prototype.boot_volume_attachment.unwrap();
        assert!(matches!(boot.volume, VolumeAttachmentVolume::New(ref v) if v.capacity == Some(100)));
    }

    #[test]
    fn template_prototype_body() {
        let prototype = InstanceTemplatePrototype {
            name: Some("my-template".into()),
            image: Some(Identity::id("r006-image")),
            profile: Some(Identity::name("bx2d-2x8")),
            primary_network_interface: Some(NetworkInterfacePrototype::new(Identity::id("r006-subnet"))),
            vpc: Some(Identity::id("r006-vpc")),
            zone: Some(Identity::name("us-south-1")),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&prototype).unwrap(),
            json!({
                "image": {"id": "r006-image"},
                "name": "my-template",
                "primary_network_interface": {"subnet": {"id": "r006-subnet"}},
                "profile": {"name": "bx2d-2x8"},
                "vpc": {"id": "r006-vpc"},
                "zone": {"name": "us-south-1"}
            })
        );
    }

    #[test]
    fn template_patch_renames() {
        let patch = InstanceTemplatePatch {
            name: "my-template-renamed".into(),
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_value(), json!({"name": "my-template-renamed"}));
    }
}
