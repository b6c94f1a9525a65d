//! Resource type definitions of the Foreman provider

use foreman_core::provider::ResourceType;
use foreman_core::schema::ResourceSchema;

use crate::schemas::hostgroup::{HOSTGROUP_TYPE, hostgroup_schema};

/// Hostgroup resource type
pub struct HostgroupType;

impl ResourceType for HostgroupType {
    fn name(&self) -> &'static str {
        HOSTGROUP_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        hostgroup_schema()
    }
}

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(HostgroupType)]
}

/// Get a resource type by name
pub fn get_resource_type(name: &str) -> Option<Box<dyn ResourceType>> {
    resource_types().into_iter().find(|t| t.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_resource_type() {
        assert!(get_resource_type("foreman_hostgroup").is_some());
        assert!(get_resource_type("foreman_host").is_none());
    }

    #[test]
    fn test_resource_type_schema() {
        let hostgroup = get_resource_type("foreman_hostgroup").unwrap();
        assert_eq!(hostgroup.schema().resource_type, "foreman_hostgroup");
    }
}
