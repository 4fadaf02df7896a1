//! YAML manifest text for add-cloud and add-credential.
//!
//! The templates are fixed-shape text the external tool consumes; indentation
//! matters, so they are built by hand rather than serialized.

use crate::model::{JujuCloud, JujuCredential};

/// Manifest filename consumed by add-cloud.
pub const CLOUD_MANIFEST: &str = "openstack-play.yaml";

/// Manifest filename consumed by add-credential and update-credential.
pub const CREDENTIAL_MANIFEST: &str = "mycreds.yaml";

pub fn gen_cloud_yaml(cloud: &JujuCloud) -> String {
    let mut out = String::from("clouds:\n");
    out.push_str(&format!("    {}:\n", cloud.name));
    out.push_str("      type: openstack\n");
    out.push_str("      auth-types: [userpass]\n");
    out.push_str("      regions:\n");
    for region in &cloud.regions {
        out.push_str(&format!("        {}:\n", region.name));
        out.push_str(&format!("          endpoint: {}\n", region.endpoint));
    }
    out
}

pub fn gen_credential_yaml(cloud_name: &str, credential: &JujuCredential) -> String {
    let mut out = String::from("credentials:\n");
    out.push_str(&format!("  {}:\n", cloud_name));
    out.push_str(&format!("    {}:\n", credential.name));
    out.push_str(&format!("      auth-type: {}\n", credential.auth_type));
    out.push_str(&format!("      password: {}\n", credential.password));
    out.push_str(&format!("      tenant-name: {}\n", credential.tenant_name));
    out.push_str(&format!("      username: {}\n", credential.username));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JujuRegion;

    #[test]
    fn test_cloud_yaml_shape() {
        let cloud = JujuCloud {
            name: "test".to_string(),
            cloud_type: None,
            regions: vec![JujuRegion {
                name: "RegionOne".to_string(),
                endpoint: "http://10.31.1.240:5000/v3".to_string(),
            }],
            credential: None,
        };

        assert_eq!(
            gen_cloud_yaml(&cloud),
            "clouds:\n\
             \x20   test:\n\
             \x20     type: openstack\n\
             \x20     auth-types: [userpass]\n\
             \x20     regions:\n\
             \x20       RegionOne:\n\
             \x20         endpoint: http://10.31.1.240:5000/v3\n"
        );
    }

    #[test]
    fn test_cloud_yaml_without_regions() {
        let cloud = JujuCloud {
            name: "test".to_string(),
            cloud_type: None,
            regions: vec![],
            credential: None,
        };

        let yaml = gen_cloud_yaml(&cloud);
        assert!(yaml.ends_with("regions:\n"));
    }

    #[test]
    fn test_credential_yaml_shape() {
        let credential = JujuCredential {
            name: "admin".to_string(),
            auth_type: "userpass".to_string(),
            password: "13f83cb78a4f4213".to_string(),
            tenant_name: "admin".to_string(),
            username: "admin".to_string(),
        };

        assert_eq!(
            gen_credential_yaml("openstack-cloud-240", &credential),
            "credentials:\n\
             \x20 openstack-cloud-240:\n\
             \x20   admin:\n\
             \x20     auth-type: userpass\n\
             \x20     password: 13f83cb78a4f4213\n\
             \x20     tenant-name: admin\n\
             \x20     username: admin\n"
        );
    }
}
