//! Resource - Attribute values and the attribute bag of a managed resource

use std::collections::HashMap;
use std::fmt;

use crate::schema::{ResourceSchema, TypeError};

/// Unique identifier for a managed resource instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource type (e.g., "foreman_hostgroup")
    pub resource_type: String,
    /// Instance name, or the server identifier when no name is known
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// Attribute value of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    /// Returns true if this is the zero value of its type.
    ///
    /// The attribute bag cannot tell a zero value apart from an unset one.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::String(s) => s.is_empty(),
            Value::Int(n) => *n == 0,
            Value::Bool(b) => !*b,
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl TryFrom<u64> for Value {
    type Error = TypeError;

    fn try_from(n: u64) -> Result<Self, TypeError> {
        i64::try_from(n)
            .map(Value::Int)
            .map_err(|_| TypeError::ValidationFailed {
                message: format!("Value {} is out of range for Int", n),
            })
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Host-side attribute store of one managed resource instance
///
/// Keys passed to `get_ok` may address into nested collections:
/// `parameters.#` is the length of the `parameters` list and
/// `parameters.0.name` is the `name` field of its first element.
pub trait AttributeStore: Send + Sync {
    /// Get a value only if it is set to something other than its zero value
    fn get_ok(&self, key: &str) -> Option<Value>;

    /// Write a top-level attribute
    fn set(&mut self, key: &str, value: Value) -> Result<(), TypeError>;

    /// Primary identifier of the instance ("" until created)
    fn identifier(&self) -> &str;

    fn set_identifier(&mut self, identifier: String);

    /// Typed read of a string attribute
    fn get_string(&self, key: &str) -> Result<Option<String>, TypeError> {
        match self.get_ok(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(TypeError::attribute(
                key,
                TypeError::TypeMismatch {
                    expected: "String".to_string(),
                    got: other.type_name(),
                },
            )),
        }
    }

    /// Typed read of an integer attribute
    fn get_int(&self, key: &str) -> Result<Option<i64>, TypeError> {
        match self.get_ok(key) {
            None => Ok(None),
            Some(Value::Int(n)) => Ok(Some(n)),
            Some(other) => Err(TypeError::attribute(
                key,
                TypeError::TypeMismatch {
                    expected: "Int".to_string(),
                    got: other.type_name(),
                },
            )),
        }
    }
}

/// Schema-checked attribute bag
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: ResourceSchema,
    identifier: String,
    attributes: HashMap<String, Value>,
}

impl ResourceData {
    /// Create an empty bag for the given schema
    pub fn new(schema: ResourceSchema) -> Self {
        Self {
            schema,
            identifier: String::new(),
            attributes: HashMap::new(),
        }
    }

    /// Create a bag from configured attributes
    ///
    /// The attributes are not checked; call `validate` for that.
    pub fn from_attributes(schema: ResourceSchema, attributes: HashMap<String, Value>) -> Self {
        Self {
            schema,
            identifier: String::new(),
            attributes,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Validate the bag as user configuration against its schema
    pub fn validate(&self) -> Result<(), Vec<TypeError>> {
        self.schema.validate(&self.attributes)
    }

    /// Look up a value by path, including zero values
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut segments = key.split('.').peekable();
        let mut current = self.attributes.get(segments.next()?)?;

        while let Some(segment) = segments.next() {
            current = match current {
                Value::List(items) if segment == "#" => {
                    if segments.peek().is_some() {
                        return None;
                    }
                    return Some(Value::Int(items.len() as i64));
                }
                Value::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                Value::Map(map) => map.get(segment)?,
                _ => return None,
            };
        }

        Some(current.clone())
    }
}

impl AttributeStore for ResourceData {
    fn get_ok(&self, key: &str) -> Option<Value> {
        self.get(key).filter(|v| !v.is_zero())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), TypeError> {
        let schema = self
            .schema
            .attributes
            .get(key)
            .ok_or_else(|| TypeError::UnknownAttribute {
                name: key.to_string(),
            })?;
        schema
            .attr_type
            .validate(&value)
            .map_err(|e| TypeError::attribute(key, e))?;
        self.attributes.insert(key.to_string(), value);
        Ok(())
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn set_identifier(&mut self, identifier: String) {
        self.identifier = identifier;
    }
}
