use super::{ChannelData, GlobalData, RegionProfile, RegionProfiles, SpotDb};
use crate::Result;
use crate::config::Config;
use crate::normalize::{AttributeMap, MetadataNormalizer, ResultsAggregator};
use crate::runs::{Discard, Discovery, Run, RunId, RunLocator};
use crate::schema::{Schema, SchemaRegistry};
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, app_err, bail};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const LOG_TARGET: &str = "    survey";

/// Name of the single region the file-tree backend reports metrics under.
pub const RUNTIME_REGION: &str = "runtime";

/// Counters of the flattening work done by a [`SurveyDb`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub metadata_normalized: u64,
    pub results_aggregated: u64,
}

/// File-tree Spot database backend.
///
/// Runs are discovered by scanning a root directory for artifact pairs. Their documents are
/// flattened on first request and the results kept in memory, so repeated lookups of the same
/// run return the cached maps. All state belongs to this instance.
#[derive(Debug)]
pub struct SurveyDb {
    locator: RunLocator,
    normalizer: MetadataNormalizer,
    aggregator: ResultsAggregator,
    runs: BTreeMap<RunId, Run>,
    global_schema: SchemaRegistry,
    metric_schema: SchemaRegistry,
    global_data: HashMap<RunId, AttributeMap>,
    metric_data: HashMap<RunId, AttributeMap>,
    skipped: Vec<Discard>,
    stats: Stats,
}

impl SurveyDb {
    /// Open the database rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory
    pub fn open(root: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            bail!("'{}' is not a valid directory", root.display());
        }

        let root = std::path::absolute(root).into_app_err_with(|| format!("unable to resolve '{}'", root.display()))?;
        log::debug!(target: LOG_TARGET, "Opening survey database at '{}'", root.display());

        Ok(Self {
            locator: RunLocator::new(root, config.follow_links),
            normalizer: MetadataNormalizer::default(),
            aggregator: ResultsAggregator::from_config(config),
            runs: BTreeMap::new(),
            global_schema: SchemaRegistry::new(),
            metric_schema: SchemaRegistry::new(),
            global_data: HashMap::new(),
            metric_data: HashMap::new(),
            skipped: Vec::new(),
            stats: Stats::default(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.locator.root()
    }

    #[must_use]
    pub fn run(&self, id: &RunId) -> Option<&Run> {
        self.runs.get(id)
    }

    /// Candidates skipped by the most recent scan.
    #[must_use]
    pub fn skipped(&self) -> &[Discard] {
        &self.skipped
    }

    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    fn scan(&mut self, since: Option<DateTime<Utc>>) -> Vec<RunId> {
        let Discovery { runs, skipped } = self.locator.discover(since);
        self.skipped = skipped;

        runs.into_iter()
            .map(|run| {
                let id = run.id().clone();
                let _ = self.runs.entry(id.clone()).or_insert(run);
                id
            })
            .collect()
    }

    /// Make sure every id in `run_ids` is known, rescanning the root once if needed.
    fn ensure_known(&mut self, run_ids: &[RunId]) -> Result<()> {
        if run_ids.iter().all(|id| self.runs.contains_key(id)) {
            return Ok(());
        }

        log::debug!(target: LOG_TARGET, "Rescanning '{}' for unknown run ids", self.root().display());
        let _ = self.scan(None);

        match run_ids.iter().find(|id| !self.runs.contains_key(*id)) {
            Some(id) => Err(app_err!("unknown run id '{id}' in '{}'", self.root().display())),
            None => Ok(()),
        }
    }

    fn global_attrs(&mut self, id: &RunId) -> Result<&AttributeMap> {
        if !self.global_data.contains_key(id) {
            let run = self.runs.get(id).ok_or_else(|| app_err!("unknown run id '{id}'"))?;
            let attrs = self.normalizer.normalize(run, &mut self.global_schema);
            self.stats.metadata_normalized += 1;
            let _ = self.global_data.insert(id.clone(), attrs);
        }

        self.global_data.get(id).ok_or_else(|| app_err!("unknown run id '{id}'"))
    }

    fn metric_attrs(&mut self, id: &RunId) -> Result<&AttributeMap> {
        if !self.metric_data.contains_key(id) {
            let run = self.runs.get(id).ok_or_else(|| app_err!("unknown run id '{id}'"))?;
            let metrics = self.aggregator.aggregate(run, &mut self.metric_schema);
            self.stats.results_aggregated += 1;
            let _ = self.metric_data.insert(id.clone(), metrics);
        }

        self.metric_data.get(id).ok_or_else(|| app_err!("unknown run id '{id}'"))
    }

    fn known_ids(&self) -> Vec<RunId> {
        self.runs.keys().cloned().collect()
    }
}

impl SpotDb for SurveyDb {
    fn get_global_attribute_metadata(&mut self) -> Result<Schema> {
        for id in self.known_ids() {
            let _ = self.global_attrs(&id)?;
        }

        Ok(self.global_schema.snapshot())
    }

    fn get_metric_attribute_metadata(&mut self) -> Result<Schema> {
        for id in self.known_ids() {
            let _ = self.metric_attrs(&id)?;
        }

        Ok(self.metric_schema.snapshot())
    }

    fn get_all_run_ids(&mut self) -> Result<Vec<RunId>> {
        Ok(self.scan(None))
    }

    fn get_new_runs(&mut self, since: DateTime<Utc>) -> Result<Vec<RunId>> {
        Ok(self.scan(Some(since)))
    }

    fn get_global_data(&mut self, run_ids: &[RunId]) -> Result<GlobalData> {
        self.ensure_known(run_ids)?;

        let mut data = GlobalData::new();
        for id in run_ids {
            let attrs = self.global_attrs(id)?.clone();
            let _ = data.insert(id.clone(), attrs);
        }

        Ok(data)
    }

    fn get_regionprofiles(&mut self, run_ids: &[RunId]) -> Result<RegionProfiles> {
        self.ensure_known(run_ids)?;

        let mut profiles = RegionProfiles::new();
        for id in run_ids {
            let metrics = self.metric_attrs(id)?.clone();
            let _ = profiles.insert(id.clone(), RegionProfile::from([(RUNTIME_REGION.to_string(), metrics)]));
        }

        Ok(profiles)
    }

    fn get_channel_data(&mut self, channel_name: &str, run_ids: &[RunId]) -> Result<ChannelData> {
        log::debug!(target: LOG_TARGET,
            "Channel '{channel_name}' requested for {} run(s); survey databases hold no channel data",
            run_ids.len()
        );

        Ok(ChannelData::new())
    }
}
