//! Client seam for the Foreman REST API
//!
//! Transport, authentication and retries belong to the implementation
//! behind `ForemanApi`; this crate only calls it.

use foreman_core::binding::RemoteObjects;
use foreman_core::provider::{BoxFuture, ProviderResult};

use crate::hostgroup::Hostgroup;

/// Hostgroup operations of a Foreman server
pub trait ForemanApi: Send + Sync {
    /// Create a hostgroup and return the server's copy
    fn create_hostgroup(&self, hostgroup: &Hostgroup) -> BoxFuture<'_, ProviderResult<Hostgroup>>;

    fn read_hostgroup(&self, id: u64) -> BoxFuture<'_, ProviderResult<Hostgroup>>;

    /// Update the hostgroup identified by `hostgroup.id`
    fn update_hostgroup(&self, hostgroup: &Hostgroup) -> BoxFuture<'_, ProviderResult<Hostgroup>>;

    fn delete_hostgroup(&self, id: u64) -> BoxFuture<'_, ProviderResult<()>>;
}

impl<'a> RemoteObjects<Hostgroup> for dyn ForemanApi + 'a {
    fn create(&self, record: &Hostgroup) -> BoxFuture<'_, ProviderResult<Hostgroup>> {
        self.create_hostgroup(record)
    }

    fn read(&self, id: u64) -> BoxFuture<'_, ProviderResult<Hostgroup>> {
        self.read_hostgroup(id)
    }

    fn update(&self, record: &Hostgroup) -> BoxFuture<'_, ProviderResult<Hostgroup>> {
        self.update_hostgroup(record)
    }

    fn delete(&self, id: u64) -> BoxFuture<'_, ProviderResult<()>> {
        self.delete_hostgroup(id)
    }
}
