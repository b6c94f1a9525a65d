//! Foreman resource schema definitions

pub mod hostgroup;

use foreman_core::schema::ResourceSchema;

/// Returns all Foreman schemas
pub fn all_schemas() -> Vec<ResourceSchema> {
    vec![hostgroup::hostgroup_schema()]
}
