//! Attribute files
//!
//! An attribute file is a JSON object holding the configured attributes of
//! one resource instance. `null` entries are treated as unset.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use foreman_core::resource::Value;

pub fn load_attributes(path: &Path) -> Result<HashMap<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_attributes(&content)
        .with_context(|| format!("Invalid attribute file: {}", path.display()))
}

pub fn parse_attributes(content: &str) -> Result<HashMap<String, Value>> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    let serde_json::Value::Object(object) = json else {
        bail!("Expected a JSON object at the top level");
    };
    convert_object(object)
}

fn convert_object(
    object: serde_json::Map<String, serde_json::Value>,
) -> Result<HashMap<String, Value>> {
    let mut attributes = HashMap::new();
    for (key, value) in object {
        if let Some(value) = convert(value).with_context(|| format!("In '{}'", key))? {
            attributes.insert(key, value);
        }
    }
    Ok(attributes)
}

fn convert(json: serde_json::Value) -> Result<Option<Value>> {
    let value = match json {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => bail!("Expected an integer, got {}", n),
        },
        serde_json::Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                match convert(item).with_context(|| format!("At index {}", i))? {
                    Some(value) => list.push(value),
                    None => bail!("Null list item at index {}", i),
                }
            }
            Value::List(list)
        }
        serde_json::Value::Object(object) => Value::Map(convert_object(object)?),
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_nested_attributes() {
        let attributes = parse_attributes(
            r#"{
                "name": "compute",
                "parent_id": 1,
                "realm_id": null,
                "parameters": [{"name": "ntp", "value": "pool.ntp.org"}]
            }"#,
        )
        .unwrap();

        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes["name"], Value::from("compute"));
        assert_eq!(attributes["parent_id"], Value::Int(1));
        assert!(!attributes.contains_key("realm_id"));
        assert_eq!(
            attributes["parameters"],
            Value::List(vec![Value::Map(HashMap::from([
                ("name".to_string(), Value::from("ntp")),
                ("value".to_string(), Value::from("pool.ntp.org")),
            ]))])
        );
    }

    #[test]
    fn parse_rejects_non_object() {
        let err = parse_attributes("[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "Expected a JSON object at the top level");
    }

    #[test]
    fn parse_rejects_floats() {
        let err = parse_attributes(r#"{"domain_id": 1.5}"#).unwrap_err();
        assert_eq!(err.to_string(), "In 'domain_id'");
        assert_eq!(err.root_cause().to_string(), "Expected an integer, got 1.5");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"name": "base"}}"#).unwrap();

        let attributes = load_attributes(file.path()).unwrap();
        assert_eq!(attributes["name"], Value::from("base"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_attributes(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file: "));
    }
}
