use super::AttributeMap;
use super::field_rule::{FIELD_RULES, FieldRule, rule_for};
use crate::runs::Run;
use crate::schema::{AttrType, SchemaRegistry};
use serde_json::{Map, Value};

const LOG_TARGET: &str = "  metadata";

/// Name under which the serialized memory block table is stored.
pub const MEM_BLOCKS: &str = "mem_blocks";

/// Name of the epoch-seconds launch attribute.
pub const LAUNCHDATE: &str = "launchdate";

/// Flattens a run's metadata document into global attributes.
#[derive(Debug, Clone, Copy)]
pub struct MetadataNormalizer {
    rules: &'static [(&'static str, FieldRule)],
}

impl Default for MetadataNormalizer {
    fn default() -> Self {
        Self { rules: FIELD_RULES }
    }
}

impl MetadataNormalizer {
    #[must_use]
    pub const fn with_rules(rules: &'static [(&'static str, FieldRule)]) -> Self {
        Self { rules }
    }

    /// Flatten the metadata of `run`, registering every kept attribute in `registry`.
    #[must_use]
    pub fn normalize(&self, run: &Run, registry: &mut SchemaRegistry) -> AttributeMap {
        let mut sink = Sink {
            attrs: AttributeMap::new(),
            registry,
        };

        for (category, items) in run.metadata() {
            let Value::Object(items) = items else {
                log::debug!(target: LOG_TARGET, "Ignoring non-object metadata category '{category}' in run '{}'", run.id());
                continue;
            };

            for (name, item) in items {
                if item.is_null() || item.is_boolean() {
                    continue;
                }

                match (rule_for(self.rules, name), item) {
                    (Some(FieldRule::Drop), _) => {}
                    (Some(FieldRule::HoistCpuInfo), Value::Object(fields)) => hoist_cpu_info(fields, &mut sink),
                    (Some(FieldRule::HoistMemory), Value::Object(fields)) => hoist_memory(fields, &mut sink),
                    (Some(FieldRule::Rename(to)), _) => sink.put(to, item.clone(), AttrType::String),
                    (Some(FieldRule::LaunchTime), _) => {
                        sink.put(LAUNCHDATE, Value::from(run.launch_epoch()), AttrType::Date);
                        sink.put(name, item.clone(), AttrType::String);
                    }
                    _ => put_plain(name, item, &mut sink),
                }
            }
        }

        log::debug!(target: LOG_TARGET, "Normalized {} global attribute(s) for run '{}'", sink.attrs.len(), run.id());
        sink.attrs
    }
}

struct Sink<'a> {
    attrs: AttributeMap,
    registry: &'a mut SchemaRegistry,
}

impl Sink<'_> {
    fn put(&mut self, name: &str, value: Value, attr_type: AttrType) {
        if self.registry.register(name, attr_type) {
            log::trace!(target: LOG_TARGET, "New global attribute '{name}' ({attr_type})");
        }

        let _ = self.attrs.insert(name.to_string(), value);
    }
}

fn hoist_cpu_info(fields: &Map<String, Value>, sink: &mut Sink<'_>) {
    for (name, value) in fields.iter().filter(|(_, value)| !value.is_boolean()) {
        sink.put(name, value.clone(), AttrType::String);
    }
}

fn hoist_memory(fields: &Map<String, Value>, sink: &mut Sink<'_>) {
    for (name, value) in fields {
        if name == "BLOCKS" {
            sink.put(MEM_BLOCKS, Value::String(value.to_string()), AttrType::String);
        } else {
            sink.put(name, value.clone(), AttrType::String);
        }
    }
}

fn put_plain(name: &str, item: &Value, sink: &mut Sink<'_>) {
    match item {
        Value::Object(_) | Value::Array(_) => sink.put(name, Value::String(item.to_string()), AttrType::String),
        Value::String(_) => sink.put(name, item.clone(), AttrType::String),
        _ => sink.put(name, item.clone(), AttrType::infer(item)),
    }
}
