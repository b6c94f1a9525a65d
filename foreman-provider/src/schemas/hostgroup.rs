//! hostgroup schema definition for Foreman

use foreman_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Resource type name of hostgroups
pub const HOSTGROUP_TYPE: &str = "foreman_hostgroup";

/// Optional references to other Foreman objects: (attribute, description)
pub const HOSTGROUP_REFERENCES: &[(&str, &str)] = &[
    (
        "architecture_id",
        "ID of the architecture associated with this hostgroup.",
    ),
    (
        "compute_profile_id",
        "ID of the compute profile associated with this hostgroup.",
    ),
    ("domain_id", "ID of the domain associated with this hostgroup."),
    (
        "environment_id",
        "ID of the environment associated with this hostgroup.",
    ),
    ("medium_id", "ID of the media associated with this hostgroup."),
    (
        "operatingsystem_id",
        "ID of the operating system associated with this hostgroup.",
    ),
    ("parent_id", "ID of the parent hostgroup."),
    (
        "ptable_id",
        "ID of the partition table associated with this hostgroup.",
    ),
    (
        "puppet_ca_proxy_id",
        "ID of the smart proxy acting as the puppet certificate authority server for this hostgroup.",
    ),
    (
        "puppet_proxy_id",
        "ID of the smart proxy acting as the puppet proxy server for this hostgroup.",
    ),
    ("realm_id", "ID of the realm associated with this hostgroup."),
    ("subnet_id", "ID of the subnet associated with the hostgroup."),
];

/// Nested block of a hostgroup parameter
pub fn parameter_block() -> AttributeType {
    AttributeType::Object(vec![
        AttributeSchema::new("name", AttributeType::String)
            .required()
            .with_description("Parameter name."),
        AttributeSchema::new("value", AttributeType::String)
            .required()
            .with_description("Parameter value."),
        AttributeSchema::new("id", types::non_negative_int())
            .computed()
            .with_description("ID of the parameter."),
        AttributeSchema::new("priority", AttributeType::Int)
            .computed()
            .with_description("Lookup priority of the parameter."),
        AttributeSchema::new("created_at", AttributeType::String)
            .computed()
            .with_description("Creation timestamp."),
        AttributeSchema::new("updated_at", AttributeType::String)
            .computed()
            .with_description("Last update timestamp."),
    ])
}

/// Returns the schema for foreman_hostgroup
pub fn hostgroup_schema() -> ResourceSchema {
    let schema = ResourceSchema::new(HOSTGROUP_TYPE)
        .with_description(
            "Hostgroups are organized in a tree-like structure and inherit values from \
             their parent hostgroup(s). When hosts get associated with a hostgroup, it will \
             inherit attributes from the hostgroup. This allows for easy, shared configuration \
             of various hosts based on common attributes.",
        )
        .attribute(
            AttributeSchema::new("title", AttributeType::String)
                .computed()
                .with_description(
                    "The title is the fullname of the hostgroup. A hostgroup's title is a \
                     path-like string from the head of the hostgroup tree down to this \
                     hostgroup. The title will be in the form of: \
                     \"<parent 1>/<parent 2>/.../<name>\".",
                ),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Hostgroup name. Example: \"compute\""),
        )
        .attribute(
            AttributeSchema::new("parameters", AttributeType::List(Box::new(parameter_block())))
                .with_description(
                    "Host parameters set on this hostgroup and inherited by its hosts.",
                ),
        );

    HOSTGROUP_REFERENCES
        .iter()
        .fold(schema, |schema, (name, description)| {
            schema.attribute(
                AttributeSchema::new(*name, types::non_negative_int())
                    .with_description(*description),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use foreman_core::resource::Value;
    use std::collections::HashMap;

    fn parameter(name: &str, value: &str) -> Value {
        Value::Map(HashMap::from([
            ("name".to_string(), Value::String(name.to_string())),
            ("value".to_string(), Value::String(value.to_string())),
        ]))
    }

    #[test]
    fn declares_all_attributes() {
        let schema = hostgroup_schema();
        assert_eq!(schema.attributes.len(), 15);
        assert!(schema.attributes["name"].required);
        assert!(schema.attributes["title"].computed);
        for (name, _) in HOSTGROUP_REFERENCES {
            let attr = &schema.attributes[*name];
            assert!(!attr.required && !attr.computed, "{}", name);
        }
    }

    #[test]
    fn valid_hostgroup() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("compute".to_string()));
        attrs.insert("parent_id".to_string(), Value::Int(3));
        attrs.insert("domain_id".to_string(), Value::Int(0));
        attrs.insert(
            "parameters".to_string(),
            Value::List(vec![parameter("ntp", "pool.ntp.org")]),
        );

        assert!(hostgroup_schema().validate(&attrs).is_ok());
    }

    #[test]
    fn hostgroup_missing_name() {
        let mut attrs = HashMap::new();
        attrs.insert("subnet_id".to_string(), Value::Int(2));

        let errors = hostgroup_schema().validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("'name'"));
    }

    #[test]
    fn negative_reference_rejected() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("compute".to_string()));
        attrs.insert("realm_id".to_string(), Value::Int(-1));

        let errors = hostgroup_schema().validate(&attrs).unwrap_err();
        assert!(errors[0].to_string().contains("realm_id"));
    }

    #[test]
    fn title_cannot_be_configured() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("compute".to_string()));
        attrs.insert("title".to_string(), Value::String("base/compute".to_string()));

        assert!(hostgroup_schema().validate(&attrs).is_err());
    }

    #[test]
    fn parameter_requires_value() {
        let mut attrs = HashMap::new();
        attrs.insert("name".to_string(), Value::String("compute".to_string()));
        attrs.insert(
            "parameters".to_string(),
            Value::List(vec![Value::Map(HashMap::from([(
                "name".to_string(),
                Value::String("ntp".to_string()),
            )]))]),
        );

        let errors = hostgroup_schema().validate(&attrs).unwrap_err();
        assert!(errors[0].to_string().contains("'value'"));
    }
}
