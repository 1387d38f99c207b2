//! Flattening of run documents into attribute maps
//!
//! Raw run documents are nested and only loosely standardized. This module turns them into
//! flat `name -> value` maps suitable for tabular storage:
//!
//! - [`MetadataNormalizer`] flattens the metadata document into global attributes. Fields that
//!   need special treatment are listed in a table of [`FieldRule`]s keyed by field name; every
//!   other field is kept as is, with nested values serialized to JSON text.
//! - [`ResultsAggregator`] flattens the results document into metric attributes, picking one
//!   representative value per measurement.
//!
//! Both register the name and type of every attribute they keep in a
//! [`SchemaRegistry`](crate::schema::SchemaRegistry).

mod field_rule;
mod metadata;
mod results;

use serde_json::Value;
use std::collections::BTreeMap;

pub use field_rule::{FIELD_RULES, FieldRule, rule_for};
pub use metadata::{LAUNCHDATE, MEM_BLOCKS, MetadataNormalizer};
pub use results::ResultsAggregator;

/// Flat attribute name to value mapping for one run.
pub type AttributeMap = BTreeMap<String, Value>;
