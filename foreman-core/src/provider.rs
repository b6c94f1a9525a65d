//! Provider - Errors, diagnostics and resource type definitions
//!
//! Remote clients report failures as `ProviderError`. Operations that can
//! partially succeed report the non-fatal part as `Diagnostics`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::resource::ResourceId;
use crate::schema::ResourceSchema;

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}] {}", id, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            resource_id: None,
            cause: None,
        }
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A non-fatal problem found while writing back to the attribute store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Attribute the problem belongs to
    pub attribute: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.message)
    }
}

/// Diagnostics collected during one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.0.push(Diagnostic {
            attribute: attribute.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Returns the diagnostic for an attribute, if any
    pub fn for_attribute(&self, attribute: &str) -> Option<&Diagnostic> {
        self.0.iter().find(|d| d.attribute == attribute)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Definition of resource types that a provider can handle
pub trait ResourceType: Send + Sync {
    /// Resource type name (e.g., "foreman_hostgroup")
    fn name(&self) -> &'static str;

    /// Attribute schema for this resource type
    fn schema(&self) -> ResourceSchema;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeError;
    use std::error::Error;

    #[test]
    fn display_includes_resource_id() {
        let err = ProviderError::new("Not found")
            .for_resource(ResourceId::new("foreman_hostgroup", "compute"));
        assert_eq!(err.to_string(), "[foreman_hostgroup.compute] Not found");
        assert_eq!(ProviderError::new("boom").to_string(), "boom");
    }

    #[test]
    fn source_is_cause() {
        let err = ProviderError::new("Failed to decode").with_cause(TypeError::UnknownAttribute {
            name: "x".to_string(),
        });
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Unknown attribute 'x'");
    }

    #[test]
    fn diagnostics_lookup() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.push("title", "rejected");
        diagnostics.push("name", "rejected too");

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.for_attribute("name").unwrap().message, "rejected too");
        assert!(diagnostics.for_attribute("domain_id").is_none());
        assert_eq!(
            diagnostics.iter().next().unwrap().to_string(),
            "title: rejected"
        );
    }
}
