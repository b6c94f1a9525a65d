//! Hostgroup resource operations
//!
//! Entry points called by the host for each foreman_hostgroup instance.
//! Each takes the instance's attribute bag and the Foreman client handle.

use foreman_core::binding;
use foreman_core::provider::{Diagnostics, ProviderResult};
use foreman_core::resource::AttributeStore;

use crate::client::ForemanApi;
use crate::hostgroup::HostgroupBinding;

pub async fn create_hostgroup(
    data: &mut dyn AttributeStore,
    client: &dyn ForemanApi,
) -> ProviderResult<Diagnostics> {
    binding::create(&HostgroupBinding, client, data).await
}

pub async fn read_hostgroup(
    data: &mut dyn AttributeStore,
    client: &dyn ForemanApi,
) -> ProviderResult<Diagnostics> {
    binding::read(&HostgroupBinding, client, data).await
}

pub async fn update_hostgroup(
    data: &mut dyn AttributeStore,
    client: &dyn ForemanApi,
) -> ProviderResult<Diagnostics> {
    binding::update(&HostgroupBinding, client, data).await
}

/// Delete the hostgroup. The host clears the identifier on success.
pub async fn delete_hostgroup(
    data: &mut dyn AttributeStore,
    client: &dyn ForemanApi,
) -> ProviderResult<Diagnostics> {
    binding::delete(&HostgroupBinding, client, data).await
}

/// Import an existing hostgroup by its Foreman id
pub async fn import_hostgroup(
    data: &mut dyn AttributeStore,
    client: &dyn ForemanApi,
    identifier: &str,
) -> ProviderResult<Diagnostics> {
    binding::import(&HostgroupBinding, client, data, identifier).await
}
