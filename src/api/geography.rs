//! Regions and zones

use super::common::{NameReference, PageLink};
use crate::core::request::{path_param, ApiRequest};
use crate::error::Result;
use crate::service::{DetailedResponse, VpcService};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub endpoint: String,
    pub href: String,
    pub name: String,
    /// `available` or `unavailable`
    pub status: String,
}

/// Regions are never paged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCollection {
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub href: String,
    pub name: String,
    pub region: NameReference,
    pub status: String,
    #[serde(default)]
    pub data_center: Option<String>,
    #[serde(default)]
    pub universal_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCollection {
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub first: Option<PageLink>,
}

#[derive(Debug, Clone, Default)]
pub struct ListRegionsOptions {}

#[derive(Debug, Clone, Default)]
pub struct GetRegionOptions {
    pub name: String,
}

impl GetRegionOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListRegionZonesOptions {
    pub region_name: String,
}

impl ListRegionZonesOptions {
    pub fn new(region_name: impl Into<String>) -> Self {
        Self {
            region_name: region_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetRegionZoneOptions {
    pub region_name: String,
    pub name: String,
}

impl GetRegionZoneOptions {
    pub fn new(region_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            region_name: region_name.into(),
            name: name.into(),
        }
    }
}

impl VpcService {
    /// List all regions
    pub async fn list_regions(&self, _options: &ListRegionsOptions) -> Result<DetailedResponse<RegionCollection>> {
        self.execute(ApiRequest::get("/regions")).await
    }

    pub async fn get_region(&self, options: &GetRegionOptions) -> Result<DetailedResponse<Region>> {
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/regions/{name}"))).await
    }

    /// List all zones in a region
    pub async fn list_region_zones(
        &self,
        options: &ListRegionZonesOptions,
    ) -> Result<DetailedResponse<ZoneCollection>> {
        let region = path_param("region_name", &options.region_name)?;
        self.execute(ApiRequest::get(format!("/regions/{region}/zones"))).await
    }

    pub async fn get_region_zone(&self, options: &GetRegionZoneOptions) -> Result<DetailedResponse<Zone>> {
        let region = path_param("region_name", &options.region_name)?;
        let name = path_param("name", &options.name)?;
        self.execute(ApiRequest::get(format!("/regions/{region}/zones/{name}"))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zone_decodes_without_optional_fields() {
        let zones: ZoneCollection = serde_json::from_value(json!({
            "zones": [{
                "href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south/zones/us-south-1",
                "name": "us-south-1",
                "region": {
                    "href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south",
                    "name": "us-south"
                },
                "status": "available"
            }]
        }))
        .unwrap();
        assert_eq!(zones.zones[0].region.name, "us-south");
        assert!(zones.zones[0].data_center.is_none());
        assert!(zones.first.is_none());
    }
}
