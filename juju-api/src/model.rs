//! Request bodies for the resource endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JujuCloud {
    pub name: String,
    #[serde(default, rename = "type")]
    pub cloud_type: Option<String>,
    #[serde(default)]
    pub regions: Vec<JujuRegion>,
    #[serde(default)]
    pub credential: Option<JujuCredential>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JujuRegion {
    pub name: String,
    #[serde(rename = "endPoint", alias = "endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JujuCredential {
    pub name: String,
    pub auth_type: String,
    pub password: String,
    pub tenant_name: String,
    pub username: String,
}

/// Image metadata parameters, also used to bootstrap a controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JujuMetadata {
    #[serde(default)]
    pub name: String,
    pub path: String,
    pub image_id: String,
    pub os_series: String,
    pub region_name: String,
    pub os_auth_url: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub network_id: String,
}

impl JujuMetadata {
    /// Bootstrap parameters for the workspace engine; the controller name is
    /// carried in `name`.
    pub fn to_controller_spec(&self) -> juju_workspace::workspace::ControllerSpec {
        juju_workspace::workspace::ControllerSpec {
            controller: self.name.clone(),
            region: self.region_name.clone(),
            image_id: self.image_id.clone(),
            os_series: self.os_series.clone(),
            constraints: self.constraints.clone(),
            network_id: self.network_id.clone(),
            metadata_path: self.path.clone(),
        }
    }
}
