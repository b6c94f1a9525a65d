//! Schema - Define type schemas for resources
//!
//! Providers define a schema for each resource type. The schema drives
//! configuration validation, type checks on attribute writes and the
//! generated resource documentation.

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Nested block with its own attributes
    Object(Vec<AttributeSchema>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Custom { validate, .. }, v) => {
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Object(fields), Value::Map(map)) => {
                for field in fields {
                    if field.required && !map.contains_key(&field.name) {
                        return Err(TypeError::MissingRequired {
                            name: field.name.clone(),
                        });
                    }
                }
                for (key, v) in map {
                    let field = fields.iter().find(|f| &f.name == key).ok_or_else(|| {
                        TypeError::UnknownAttribute { name: key.clone() }
                    })?;
                    field
                        .attr_type
                        .validate(v)
                        .map_err(|e| TypeError::attribute(key.as_str(), e))?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    /// Nested attributes, if this is a block or a list of blocks
    pub fn nested_attributes(&self) -> Option<&[AttributeSchema]> {
        match self {
            AttributeType::Object(fields) => Some(fields),
            AttributeType::List(inner) => inner.nested_attributes(),
            _ => None,
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Object(_) => "Object".to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' is computed by the server and cannot be configured")]
    ComputedAttribute { name: String },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Attribute '{name}': {inner}")]
    AttributeError { name: String, inner: Box<TypeError> },
}

impl TypeError {
    /// Attach the attribute name to an error
    pub fn attribute(name: impl Into<String>, inner: TypeError) -> Self {
        TypeError::AttributeError {
            name: name.into(),
            inner: Box::new(inner),
        }
    }
}

impl Value {
    /// Name of the value's type as used in error messages
    pub fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Set by the server; read-only for users
    pub computed: bool,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate configured resource attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        // Check required attributes
        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        for (name, value) in attributes {
            let Some(schema) = self.attributes.get(name) else {
                errors.push(TypeError::UnknownAttribute { name: name.clone() });
                continue;
            };
            if schema.computed {
                errors.push(TypeError::ComputedAttribute { name: name.clone() });
                continue;
            }
            match schema.attr_type.validate(value) {
                Ok(()) => check_computed(name, &schema.attr_type, value, &mut errors),
                Err(e) => errors.push(TypeError::attribute(name.as_str(), e)),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Report configured values for computed fields inside nested blocks
fn check_computed(
    name: &str,
    attr_type: &AttributeType,
    value: &Value,
    errors: &mut Vec<TypeError>,
) {
    match (attr_type, value) {
        (AttributeType::List(inner), Value::List(items)) => {
            for (index, item) in items.iter().enumerate() {
                let mut nested = Vec::new();
                check_computed(name, inner, item, &mut nested);
                errors.extend(nested.into_iter().map(|e| TypeError::ListItemError {
                    index,
                    inner: Box::new(e),
                }));
            }
        }
        (AttributeType::Object(fields), Value::Map(map)) => {
            for field in fields {
                let Some(v) = map.get(&field.name) else {
                    continue;
                };
                if field.computed {
                    errors.push(TypeError::attribute(
                        name,
                        TypeError::ComputedAttribute {
                            name: field.name.clone(),
                        },
                    ));
                } else {
                    check_computed(&field.name, &field.attr_type, v, errors);
                }
            }
        }
        _ => {}
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Non-negative integer type, used for references to other server objects
    pub fn non_negative_int() -> AttributeType {
        AttributeType::Custom {
            name: "NonNegativeInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| {
                if let Value::Int(n) = value {
                    if *n >= 0 {
                        Ok(())
                    } else {
                        Err(format!("Value must be at least 0, got {}", n))
                    }
                } else {
                    Err("Expected integer".to_string())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_block() -> AttributeType {
        AttributeType::Object(vec![
            AttributeSchema::new("key", AttributeType::String).required(),
            AttributeSchema::new("value", AttributeType::String).required(),
            AttributeSchema::new("id", AttributeType::Int).computed(),
        ])
    }

    fn tag(key: &str, value: &str) -> Value {
        Value::Map(HashMap::from([
            ("key".to_string(), Value::String(key.to_string())),
            ("value".to_string(), Value::String(value.to_string())),
        ]))
    }

    fn widget_schema() -> ResourceSchema {
        ResourceSchema::new("widget")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(AttributeSchema::new("path", AttributeType::String).computed())
            .attribute(AttributeSchema::new("owner_id", types::non_negative_int()))
            .attribute(AttributeSchema::new(
                "tags",
                AttributeType::List(Box::new(tag_block())),
            ))
    }

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn validate_non_negative_int() {
        let t = types::non_negative_int();
        assert!(t.validate(&Value::Int(0)).is_ok());
        assert!(t.validate(&Value::Int(17)).is_ok());
        assert!(t.validate(&Value::Int(-1)).is_err());
        assert!(t.validate(&Value::String("1".to_string())).is_err());
    }

    #[test]
    fn validate_object_type() {
        let t = tag_block();
        assert!(t.validate(&tag("env", "prod")).is_ok());

        let missing = Value::Map(HashMap::from([(
            "key".to_string(),
            Value::String("env".to_string()),
        )]));
        assert!(matches!(
            t.validate(&missing),
            Err(TypeError::MissingRequired { .. })
        ));

        let mut unknown = tag("env", "prod");
        if let Value::Map(map) = &mut unknown {
            map.insert("color".to_string(), Value::Bool(true));
        }
        assert!(matches!(
            t.validate(&unknown),
            Err(TypeError::UnknownAttribute { .. })
        ));
    }

    #[test]
    fn validate_list_reports_index() {
        let t = AttributeType::List(Box::new(tag_block()));
        let err = t
            .validate(&Value::List(vec![tag("a", "1"), Value::Int(3)]))
            .unwrap_err();
        assert!(matches!(err, TypeError::ListItemError { index: 1, .. }));
    }

    #[test]
    fn validate_resource_schema() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("w".to_string()));
        attrs.insert("owner_id".to_string(), Value::Int(5));
        attrs.insert("tags".to_string(), Value::List(vec![tag("env", "prod")]));

        assert!(widget_schema().validate(&attrs).is_ok());
    }

    #[test]
    fn missing_required_attribute() {
        let result = widget_schema().validate(&HashMap::new());
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], TypeError::MissingRequired { name } if name == "name"));
    }

    #[test]
    fn negative_reference_rejected() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("w".to_string()));
        attrs.insert("owner_id".to_string(), Value::Int(-3));

        let errors = widget_schema().validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("owner_id"));
    }

    #[test]
    fn computed_attribute_rejected() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("w".to_string()));
        attrs.insert("path".to_string(), Value::String("a/w".to_string()));

        let errors = widget_schema().validate(&attrs).unwrap_err();
        assert!(matches!(&errors[0], TypeError::ComputedAttribute { name } if name == "path"));
    }

    #[test]
    fn nested_computed_attribute_rejected() {
        let mut with_id = tag("env", "prod");
        if let Value::Map(map) = &mut with_id {
            map.insert("id".to_string(), Value::Int(9));
        }
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("w".to_string()));
        attrs.insert("tags".to_string(), Value::List(vec![tag("a", "1"), with_id]));

        let errors = widget_schema().validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], TypeError::ListItemError { index: 1, .. }));
    }

    #[test]
    fn unknown_attribute_rejected() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("w".to_string()));
        attrs.insert("colour".to_string(), Value::String("red".to_string()));

        let errors = widget_schema().validate(&attrs).unwrap_err();
        assert!(matches!(&errors[0], TypeError::UnknownAttribute { name } if name == "colour"));
    }

    #[test]
    fn nested_attributes_of_list() {
        let t = AttributeType::List(Box::new(tag_block()));
        let fields = t.nested_attributes().unwrap();
        assert_eq!(fields.len(), 3);
        assert!(AttributeType::Int.nested_attributes().is_none());
    }
}
