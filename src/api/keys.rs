//! SSH keys

use super::common::{Identity, PageLink, Reference};
use crate::core::request::{path_param, required, ApiRequest};
use crate::error::Result;
use crate::pager::paged_list;
use crate::patch::{AsPatch, Patch, PatchField};
use crate::service::{DetailedResponse, VpcService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub created_at: DateTime<Utc>,
    pub crn: String,
    pub fingerprint: String,
    pub href: String,
    pub id: String,
    pub length: i64,
    pub name: String,
    pub public_key: String,
    #[serde(default)]
    pub resource_group: Option<Reference>,
    /// `ed25519` or `rsa`
    #[serde(rename = "type")]
    pub key_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCollection {
    pub first: PageLink,
    pub keys: Vec<Key>,
    pub limit: i64,
    #[serde(default)]
    pub next: Option<PageLink>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyPatch {
    #[serde(skip_serializing_if = "PatchField::is_unset")]
    pub name: PatchField<String>,
}

impl AsPatch for KeyPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListKeysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateKeyOptions {
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
}

impl CreateKeyOptions {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyOptions {
    pub id: String,
}

impl KeyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type DeleteKeyOptions = KeyOptions;
pub type GetKeyOptions = KeyOptions;

#[derive(Debug, Clone, Default)]
pub struct UpdateKeyOptions {
    pub id: String,
    pub patch: Patch,
}

impl UpdateKeyOptions {
    pub fn new(id: impl Into<String>, patch: Patch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl VpcService {
    pub async fn list_keys(&self, options: &ListKeysOptions) -> Result<DetailedResponse<KeyCollection>> {
        let request = ApiRequest::get("/keys").page(options.start.as_deref(), options.limit);
        self.execute(request).await
    }

    /// Register a public key
    pub async fn create_key(&self, options: &CreateKeyOptions) -> Result<DetailedResponse<Key>> {
        required("public_key", &options.public_key)?;
        let request = ApiRequest::post("/keys").json(options)?;
        self.execute(request).await
    }

    pub async fn delete_key(&self, options: &DeleteKeyOptions) -> Result<DetailedResponse<()>> {
        let id = path_param("id", &options.id)?;
        self.execute_empty(ApiRequest::delete(format!("/keys/{id}"))).await
    }

    pub async fn get_key(&self, options: &GetKeyOptions) -> Result<DetailedResponse<Key>> {
        let id = path_param("id", &options.id)?;
        self.execute(ApiRequest::get(format!("/keys/{id}"))).await
    }

    pub async fn update_key(&self, options: &UpdateKeyOptions) -> Result<DetailedResponse<Key>> {
        let id = path_param("id", &options.id)?;
        let request = ApiRequest::patch(format!("/keys/{id}")).merge_patch(&options.patch);
        self.execute(request).await
    }
}

paged_list!(ListKeysOptions, KeyCollection, keys: Key, list_keys);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_type_travels_as_type() {
        let options = CreateKeyOptions {
            name: Some("my-key".to_string()),
            key_type: Some("ed25519".to_string()),
            ..CreateKeyOptions::new("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIFk")
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "public_key": "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIFk",
                "name": "my-key",
                "type": "ed25519"
            })
        );
    }

    #[test]
    fn key_decodes_type_field() {
        let key: Key = serde_json::from_value(json!({
            "created_at": "2024-04-30T12:00:00Z",
            "crn": "crn:v1:bluemix:public:is:us-south:a/123::key:key-1",
            "fingerprint": "SHA256:yxavE4CIOL2NlsqcurRO3xGjkP6m/0mp8ugojH5yxlY",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/keys/key-1",
            "id": "key-1",
            "length": 2048,
            "name": "my-key",
            "public_key": "ssh-rsa AAAAB3NzaC1yc2E",
            "type": "rsa"
        }))
        .unwrap();
        assert_eq!(key.key_type, "rsa");
        assert!(key.resource_group.is_none());
    }

    #[test]
    fn key_patch_only_renames() {
        let patch = KeyPatch {
            name: "my-key-renamed".into(),
        }
        .as_patch()
        .unwrap();
        assert_eq!(patch.to_string(), r#"{"name":"my-key-renamed"}"#);
        assert!(KeyPatch::default().as_patch().unwrap().is_empty());
    }
}
