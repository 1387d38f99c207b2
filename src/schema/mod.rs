//! Attribute types and the schema registry
//!
//! Every flattened attribute carries one of a small closed set of semantic types
//! ([`AttrType`]). The [`SchemaRegistry`] collects the names and types of all attributes
//! seen across runs, keeping the first type observed for each name.

mod attr_type;
mod registry;

pub use attr_type::AttrType;
pub use registry::{AttributeMetadata, Schema, SchemaRegistry};
