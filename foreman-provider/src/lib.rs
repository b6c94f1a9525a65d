//! Foreman Provider
//!
//! Binds the foreman_hostgroup resource to the Foreman API.
//!
//! ## Module Structure
//!
//! - `hostgroup` - Hostgroup record and its attribute binding
//! - `schemas` - Attribute schemas of the resource types
//! - `resources` - Resource type definitions
//! - `client` - Remote API seam implemented by the Foreman client
//! - `provider` - Entry points for the resource lifecycle

pub mod client;
pub mod hostgroup;
pub mod provider;
pub mod resources;
pub mod schemas;

// Re-export main types
pub use client::ForemanApi;
pub use hostgroup::{Hostgroup, HostgroupBinding, HostgroupParameter};
pub use provider::{
    create_hostgroup, delete_hostgroup, import_hostgroup, read_hostgroup, update_hostgroup,
};
pub use resources::{get_resource_type, resource_types};
