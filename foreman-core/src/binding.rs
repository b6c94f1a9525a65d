//! Binding - Map typed records to the attribute bag and drive CRUD
//!
//! A `ResourceBinding` converts between the attribute bag of a managed
//! resource and the record type a remote client understands. The CRUD
//! functions in this module run the same protocol for every binding:
//!
//! 1. decode the record from the bag
//! 2. make exactly one remote call; any error is returned unchanged
//! 3. encode the server's answer back into the bag (not for delete)
//!
//! Nothing is cached between calls, so concurrent operations on different
//! bags may share one client.

use std::fmt;

use crate::provider::{BoxFuture, Diagnostics, ProviderError, ProviderResult};
use crate::resource::{AttributeStore, ResourceId, Value};
use crate::schema::ResourceSchema;

/// Two-way mapping between an attribute bag and a typed record
pub trait ResourceBinding: Send + Sync {
    type Record: fmt::Debug + Send + Sync;

    /// Resource type name (e.g., "foreman_hostgroup")
    fn resource_type(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    /// Build a record from the bag. Unset attributes keep their zero value.
    fn decode(&self, data: &dyn AttributeStore) -> ProviderResult<Self::Record>;

    /// Write every field of the record into the bag.
    ///
    /// A rejected write does not stop the remaining writes; it is reported
    /// in the returned diagnostics instead.
    fn encode(&self, record: &Self::Record, data: &mut dyn AttributeStore) -> Diagnostics;

    /// Server identifier of the record (0 before creation)
    fn identifier(&self, record: &Self::Record) -> u64;
}

/// Remote CRUD operations for one record type
pub trait RemoteObjects<R>: Send + Sync {
    fn create(&self, record: &R) -> BoxFuture<'_, ProviderResult<R>>;

    fn read(&self, id: u64) -> BoxFuture<'_, ProviderResult<R>>;

    fn update(&self, record: &R) -> BoxFuture<'_, ProviderResult<R>>;

    fn delete(&self, id: u64) -> BoxFuture<'_, ProviderResult<()>>;
}

/// Parse the bag identifier into a server id. An empty identifier is 0.
pub fn parse_identifier(resource_type: &str, identifier: &str) -> ProviderResult<u64> {
    if identifier.is_empty() {
        return Ok(0);
    }
    identifier.parse::<u64>().map_err(|e| {
        ProviderError::new(format!("Invalid identifier '{}'", identifier))
            .for_resource(ResourceId::new(resource_type, identifier))
            .with_cause(e)
    })
}

/// Best-effort writer used by `ResourceBinding::encode`
pub struct AttributeWriter<'a> {
    resource_type: &'a str,
    data: &'a mut dyn AttributeStore,
    diagnostics: Diagnostics,
}

impl<'a> AttributeWriter<'a> {
    pub fn new(resource_type: &'a str, data: &'a mut dyn AttributeStore) -> Self {
        Self {
            resource_type,
            data,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn set_identifier(&mut self, id: u64) {
        self.data.set_identifier(id.to_string());
    }

    /// Write one attribute. A value that does not convert or that the
    /// store rejects becomes a diagnostic.
    pub fn set<V>(&mut self, key: &str, value: V)
    where
        V: TryInto<Value>,
        V::Error: fmt::Display,
    {
        let result = match value.try_into() {
            Ok(value) => self.data.set(key, value).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(message) = result {
            self.reject(key, message);
        }
    }

    /// Record a value that could not be written
    pub fn reject(&mut self, key: &str, error: impl fmt::Display) {
        log::error!("error setting {} {}: {}", self.resource_type, key, error);
        self.diagnostics.push(key, error.to_string());
    }

    pub fn finish(self) -> Diagnostics {
        self.diagnostics
    }
}

pub async fn create<B, C>(
    binding: &B,
    client: &C,
    data: &mut dyn AttributeStore,
) -> ProviderResult<Diagnostics>
where
    B: ResourceBinding,
    C: RemoteObjects<B::Record> + ?Sized,
{
    let record = binding.decode(data)?;
    log::debug!("{}: creating {:?}", binding.resource_type(), record);

    let created = client.create(&record).await?;
    log::debug!("{}: created {:?}", binding.resource_type(), created);

    Ok(binding.encode(&created, data))
}

pub async fn read<B, C>(
    binding: &B,
    client: &C,
    data: &mut dyn AttributeStore,
) -> ProviderResult<Diagnostics>
where
    B: ResourceBinding,
    C: RemoteObjects<B::Record> + ?Sized,
{
    let record = binding.decode(data)?;
    log::debug!("{}: reading {:?}", binding.resource_type(), record);

    let current = client.read(binding.identifier(&record)).await?;
    log::debug!("{}: read {:?}", binding.resource_type(), current);

    Ok(binding.encode(&current, data))
}

pub async fn update<B, C>(
    binding: &B,
    client: &C,
    data: &mut dyn AttributeStore,
) -> ProviderResult<Diagnostics>
where
    B: ResourceBinding,
    C: RemoteObjects<B::Record> + ?Sized,
{
    let record = binding.decode(data)?;
    log::debug!("{}: updating {:?}", binding.resource_type(), record);

    let updated = client.update(&record).await?;
    log::debug!("{}: updated {:?}", binding.resource_type(), updated);

    Ok(binding.encode(&updated, data))
}

/// Delete the remote object. The bag is left as is; clearing its
/// identifier afterwards is up to the host.
pub async fn delete<B, C>(
    binding: &B,
    client: &C,
    data: &mut dyn AttributeStore,
) -> ProviderResult<Diagnostics>
where
    B: ResourceBinding,
    C: RemoteObjects<B::Record> + ?Sized,
{
    let record = binding.decode(data)?;
    log::debug!("{}: deleting {:?}", binding.resource_type(), record);

    client.delete(binding.identifier(&record)).await?;
    Ok(Diagnostics::new())
}

/// Import an existing remote object by its bare identifier. The bag is
/// only written once the remote read succeeds.
pub async fn import<B, C>(
    binding: &B,
    client: &C,
    data: &mut dyn AttributeStore,
    identifier: &str,
) -> ProviderResult<Diagnostics>
where
    B: ResourceBinding,
    C: RemoteObjects<B::Record> + ?Sized,
{
    let id = parse_identifier(binding.resource_type(), identifier)?;
    log::debug!("{}: importing {}", binding.resource_type(), id);

    let current = client.read(id).await?;
    log::debug!("{}: read {:?}", binding.resource_type(), current);

    Ok(binding.encode(&current, data))
}
