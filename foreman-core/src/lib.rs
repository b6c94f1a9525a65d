//! Foreman Core
//!
//! Core library for binding typed provider records to the attribute bag of
//! a managed resource.
//!
//! ## Module Structure
//!
//! - `resource` - Attribute values and the attribute bag
//! - `schema` - Resource schemas and validation
//! - `provider` - Provider errors, diagnostics and resource types
//! - `binding` - Record/bag mapping and the CRUD operations built on it
//! - `docs` - Markdown reference pages rendered from schemas

pub mod binding;
pub mod docs;
pub mod provider;
pub mod resource;
pub mod schema;
