use super::AttributeMap;
use crate::config::Config;
use crate::runs::Run;
use crate::schema::{AttrType, AttributeMetadata, SchemaRegistry};
use serde_json::{Map, Value};

const LOG_TARGET: &str = "   results";

/// Key holding the single value of a measurement without statistics.
const VALUE_KEY: &str = "value";

/// Flattens a run's results document into metric attributes.
///
/// Each measurement contributes one value: the configured summary statistic when the
/// measurement carries a statistic set, otherwise its single `value`. Measurements with
/// neither are skipped.
#[derive(Debug, Clone)]
pub struct ResultsAggregator {
    statistic: String,
    excluded_categories: Vec<String>,
}

impl Default for ResultsAggregator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ResultsAggregator {
    #[must_use]
    pub fn new(statistic: impl Into<String>, excluded_categories: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            statistic: statistic.into(),
            excluded_categories: excluded_categories.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.statistic.clone(), config.excluded_categories.iter().cloned())
    }

    #[must_use]
    pub fn statistic(&self) -> &str {
        &self.statistic
    }

    /// Flatten the results of `run`, registering every metric in `registry`.
    #[must_use]
    pub fn aggregate(&self, run: &Run, registry: &mut SchemaRegistry) -> AttributeMap {
        let mut metrics = AttributeMap::new();

        for (category, measures) in run.results() {
            if self.excluded_categories.iter().any(|excluded| excluded == category) {
                continue;
            }

            let Value::Object(measures) = measures else {
                log::debug!(target: LOG_TARGET, "Ignoring non-object results category '{category}' in run '{}'", run.id());
                continue;
            };

            for (name, measure) in measures {
                let Value::Object(measure) = measure else {
                    continue;
                };

                let Some(value) = measure.get(&self.statistic).or_else(|| measure.get(VALUE_KEY)) else {
                    log::trace!(target: LOG_TARGET, "Measurement '{name}' in run '{}' has no usable value", run.id());
                    continue;
                };

                let name = name.trim();
                if registry.register_with(name, measurement_metadata(value, measure)) {
                    log::trace!(target: LOG_TARGET, "New metric attribute '{name}'");
                }

                let _ = metrics.insert(name.to_string(), value.clone());
            }
        }

        log::debug!(target: LOG_TARGET, "Aggregated {} metric(s) for run '{}'", metrics.len(), run.id());
        metrics
    }
}

fn measurement_metadata(value: &Value, measure: &Map<String, Value>) -> AttributeMetadata {
    let mut metadata = AttributeMetadata::new(AttrType::infer(value));
    if let Some(unit) = measure.get("unit").and_then(Value::as_str) {
        metadata = metadata.with_unit(unit);
    }
    if let Some(alias) = measure.get("alias").and_then(Value::as_str) {
        metadata = metadata.with_alias(alias);
    }
    metadata
}
