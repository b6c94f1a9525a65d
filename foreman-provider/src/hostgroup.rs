//! Hostgroup record and its attribute bag binding

use std::collections::HashMap;

use foreman_core::binding::{AttributeWriter, ResourceBinding, parse_identifier};
use foreman_core::provider::{Diagnostics, ProviderError, ProviderResult};
use foreman_core::resource::{AttributeStore, ResourceId, Value};
use foreman_core::schema::{ResourceSchema, TypeError};
use serde::{Deserialize, Serialize};

use crate::schemas::hostgroup::{HOSTGROUP_TYPE, hostgroup_schema};

/// A Foreman hostgroup
///
/// References to other Foreman objects are `None` when unset and are left
/// out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hostgroup {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: u64,
    pub name: String,
    /// Computed by the server: "<parent 1>/<parent 2>/.../<name>"
    #[serde(default, skip_serializing)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_profile_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operatingsystem_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ptable_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppet_ca_proxy_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppet_proxy_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<u64>,
    #[serde(default)]
    pub parameters: Vec<HostgroupParameter>,
}

/// A host parameter defined on a hostgroup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostgroupParameter {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: u64,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing)]
    pub priority: i64,
    #[serde(default, skip_serializing)]
    pub created_at: String,
    #[serde(default, skip_serializing)]
    pub updated_at: String,
}

fn is_unassigned(id: &u64) -> bool {
    *id == 0
}

/// Generates the reference accessors from the one list of reference fields
macro_rules! hostgroup_references {
    ($($field:ident),* $(,)?) => {
        impl Hostgroup {
            /// Reference attributes in schema order, paired with their values
            pub fn references(&self) -> Vec<(&'static str, Option<u64>)> {
                vec![$((stringify!($field), self.$field)),*]
            }

            fn references_mut(&mut self) -> Vec<(&'static str, &mut Option<u64>)> {
                vec![$((stringify!($field), &mut self.$field)),*]
            }
        }
    };
}

hostgroup_references!(
    architecture_id,
    compute_profile_id,
    domain_id,
    environment_id,
    medium_id,
    operatingsystem_id,
    parent_id,
    ptable_id,
    puppet_ca_proxy_id,
    puppet_proxy_id,
    realm_id,
    subnet_id,
);

impl Hostgroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl HostgroupParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    fn to_value(&self) -> Result<Value, TypeError> {
        let id = Value::try_from(self.id).map_err(|e| TypeError::attribute("id", e))?;
        Ok(Value::Map(HashMap::from([
            ("id".to_string(), id),
            ("name".to_string(), Value::from(self.name.as_str())),
            ("value".to_string(), Value::from(self.value.as_str())),
            ("priority".to_string(), Value::from(self.priority)),
            ("created_at".to_string(), Value::from(self.created_at.as_str())),
            ("updated_at".to_string(), Value::from(self.updated_at.as_str())),
        ])))
    }
}

/// Binding between `Hostgroup` and the foreman_hostgroup attribute bag
#[derive(Debug, Clone, Copy, Default)]
pub struct HostgroupBinding;

impl ResourceBinding for HostgroupBinding {
    type Record = Hostgroup;

    fn resource_type(&self) -> &'static str {
        HOSTGROUP_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        hostgroup_schema()
    }

    fn decode(&self, data: &dyn AttributeStore) -> ProviderResult<Hostgroup> {
        let id = parse_identifier(HOSTGROUP_TYPE, data.identifier())?;
        decode_fields(data, id).map_err(|e| {
            ProviderError::new(format!("Failed to decode hostgroup: {}", e))
                .for_resource(ResourceId::new(HOSTGROUP_TYPE, data.identifier()))
                .with_cause(e)
        })
    }

    fn encode(&self, hostgroup: &Hostgroup, data: &mut dyn AttributeStore) -> Diagnostics {
        let mut writer = AttributeWriter::new(HOSTGROUP_TYPE, data);
        writer.set_identifier(hostgroup.id);

        writer.set("title", hostgroup.title.as_str());
        writer.set("name", hostgroup.name.as_str());
        for (name, reference) in hostgroup.references() {
            writer.set(name, reference.unwrap_or(0));
        }

        let parameters: Result<Vec<Value>, TypeError> = hostgroup
            .parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                parameter.to_value().map_err(|e| TypeError::ListItemError {
                    index,
                    inner: Box::new(e),
                })
            })
            .collect();
        match parameters {
            Ok(items) => writer.set("parameters", Value::List(items)),
            Err(e) => writer.reject("parameters", e),
        }

        writer.finish()
    }

    fn identifier(&self, hostgroup: &Hostgroup) -> u64 {
        hostgroup.id
    }
}

fn decode_fields(data: &dyn AttributeStore, id: u64) -> Result<Hostgroup, TypeError> {
    let mut hostgroup = Hostgroup {
        id,
        name: data.get_string("name")?.unwrap_or_default(),
        title: data.get_string("title")?.unwrap_or_default(),
        parameters: decode_parameters(data)?,
        ..Default::default()
    };

    for (name, slot) in hostgroup.references_mut() {
        *slot = get_reference(data, name)?;
    }

    Ok(hostgroup)
}

/// Parameters are addressed as `parameters.#` and `parameters.<i>.<field>`
fn decode_parameters(data: &dyn AttributeStore) -> Result<Vec<HostgroupParameter>, TypeError> {
    let count = match data.get_ok("parameters") {
        None => 0,
        Some(Value::List(items)) => {
            if let Some((index, item)) = items
                .iter()
                .enumerate()
                .find(|(_, item)| !matches!(item, Value::Map(_)))
            {
                return Err(TypeError::attribute(
                    "parameters",
                    TypeError::ListItemError {
                        index,
                        inner: Box::new(TypeError::TypeMismatch {
                            expected: "Map".to_string(),
                            got: item.type_name(),
                        }),
                    },
                ));
            }
            items.len()
        }
        Some(other) => {
            return Err(TypeError::attribute(
                "parameters",
                TypeError::TypeMismatch {
                    expected: "List".to_string(),
                    got: other.type_name(),
                },
            ));
        }
    };

    (0..count)
        .map(|i| -> Result<HostgroupParameter, TypeError> {
            let key = |field: &str| format!("parameters.{}.{}", i, field);
            Ok(HostgroupParameter {
                id: get_reference(data, &key("id"))?.unwrap_or(0),
                name: data.get_string(&key("name"))?.unwrap_or_default(),
                value: data.get_string(&key("value"))?.unwrap_or_default(),
                priority: data.get_int(&key("priority"))?.unwrap_or(0),
                created_at: data.get_string(&key("created_at"))?.unwrap_or_default(),
                updated_at: data.get_string(&key("updated_at"))?.unwrap_or_default(),
            })
        })
        .collect()
}

/// Read an optional id; zero and unset both decode to `None`
fn get_reference(data: &dyn AttributeStore, key: &str) -> Result<Option<u64>, TypeError> {
    data.get_int(key)?
        .map(|n| {
            u64::try_from(n).map_err(|_| {
                TypeError::attribute(
                    key,
                    TypeError::ValidationFailed {
                        message: format!("Value must be at least 0, got {}", n),
                    },
                )
            })
        })
        .transpose()
}
