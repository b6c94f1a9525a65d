//! Markdown documentation for resource schemas

use std::fmt::Write;

use crate::schema::{AttributeSchema, ResourceSchema};

/// Render the reference page of a resource type
pub fn render_markdown(schema: &ResourceSchema) -> String {
    let mut attributes: Vec<&AttributeSchema> = schema.attributes.values().collect();
    sort_attributes(&mut attributes);

    let mut out = format!("# {}\n\n", schema.resource_type);
    if let Some(desc) = &schema.description {
        out.push_str(desc);
        out.push_str("\n\n");
    }

    out.push_str("## Argument Reference\n\n");
    for attr in attributes.iter().filter(|a| !a.computed) {
        push_attribute(&mut out, attr);
    }

    let computed: Vec<_> = attributes.iter().filter(|a| a.computed).collect();
    if !computed.is_empty() {
        out.push_str("\n## Attributes Reference\n\n");
        for attr in computed {
            push_attribute(&mut out, attr);
        }
    }

    for attr in &attributes {
        if let Some(fields) = attr.attr_type.nested_attributes() {
            let mut fields: Vec<&AttributeSchema> = fields.iter().collect();
            sort_attributes(&mut fields);
            let _ = write!(out, "\n### {}\n\n", attr.name);
            for field in fields {
                push_attribute(&mut out, field);
            }
        }
    }

    out
}

/// Required first, then optional, then computed; alphabetical within each group
fn sort_attributes(attributes: &mut [&AttributeSchema]) {
    attributes.sort_by(|a, b| {
        (a.computed, !a.required, &a.name).cmp(&(b.computed, !b.required, &b.name))
    });
}

fn push_attribute(out: &mut String, attr: &AttributeSchema) {
    let flag = if attr.computed {
        "Computed"
    } else if attr.required {
        "Required"
    } else {
        "Optional"
    };
    let _ = write!(out, "- `{}` - ({}, {})", attr.name, flag, attr.attr_type);
    if let Some(desc) = &attr.description {
        let _ = write!(out, " {}", desc);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeType, types};

    fn schema() -> ResourceSchema {
        ResourceSchema::new("widget")
            .with_description("A widget.")
            .attribute(
                AttributeSchema::new("path", AttributeType::String)
                    .computed()
                    .with_description("Full path."),
            )
            .attribute(AttributeSchema::new("size", types::non_negative_int()))
            .attribute(
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .with_description("Widget name."),
            )
            .attribute(AttributeSchema::new(
                "tags",
                AttributeType::List(Box::new(AttributeType::Object(vec![
                    AttributeSchema::new("value", AttributeType::String).required(),
                    AttributeSchema::new("id", AttributeType::Int).computed(),
                ]))),
            ))
    }

    #[test]
    fn renders_sections_in_order() {
        let doc = render_markdown(&schema());

        assert!(doc.starts_with("# widget\n\nA widget.\n\n## Argument Reference\n\n"));
        let name = doc.find("- `name` - (Required, String) Widget name.").unwrap();
        let size = doc.find("- `size` - (Optional, NonNegativeInt)").unwrap();
        let attrs = doc.find("## Attributes Reference").unwrap();
        let path = doc.find("- `path` - (Computed, String) Full path.").unwrap();
        assert!(name < size && size < attrs && attrs < path);
    }

    #[test]
    fn renders_nested_blocks() {
        let doc = render_markdown(&schema());

        let block = doc.find("### tags").unwrap();
        let value = doc.find("- `value` - (Required, String)").unwrap();
        let id = doc.find("- `id` - (Computed, Int)").unwrap();
        assert!(block < value && value < id);
    }
}
