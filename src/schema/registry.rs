use super::AttrType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the registry knows about one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMetadata {
    #[serde(rename = "type")]
    pub attr_type: AttrType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl AttributeMetadata {
    #[must_use]
    pub const fn new(attr_type: AttrType) -> Self {
        Self {
            attr_type,
            unit: None,
            alias: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Attribute name to metadata mapping as returned by schema queries.
pub type Schema = BTreeMap<String, AttributeMetadata>;

/// Accumulates attribute names and types across every run seen.
///
/// The first registration of a name is authoritative. Later registrations of the same name are
/// ignored, whatever type they carry, so a run whose attribute disagrees with an earlier run is
/// never rejected.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    entries: Schema,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with a bare type. Returns `true` if the name was not known before.
    pub fn register(&mut self, name: &str, attr_type: AttrType) -> bool {
        self.register_with(name, AttributeMetadata::new(attr_type))
    }

    /// Register `name` with full metadata. Returns `true` if the name was not known before.
    pub fn register_with(&mut self, name: &str, metadata: AttributeMetadata) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }

        let _ = self.entries.insert(name.to_string(), metadata);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeMetadata> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the full current mapping.
    #[must_use]
    pub fn snapshot(&self) -> Schema {
        self.entries.clone()
    }
}
