//! The backend contract and its file-tree implementation
//!
//! Downstream query and reporting tools talk to a Spot database through the [`SpotDb`] trait.
//! Every backend answers the same questions: which runs exist, which global and metric
//! attributes exist across them, and what the attribute values of a given set of runs are.
//!
//! [`connect`] picks the backend for a location string. Directories are served by
//! [`SurveyDb`], which reads run artifact pairs straight from disk. SQL locations are
//! recognized but have no backend in this crate.

mod location;
mod survey;

pub use location::Location;
pub use survey::{RUNTIME_REGION, Stats, SurveyDb};

use crate::Result;
use crate::config::Config;
use crate::normalize::AttributeMap;
use crate::runs::RunId;
use crate::schema::Schema;
use chrono::{DateTime, Utc};
use core::fmt::Debug;
use std::collections::BTreeMap;

/// Global attributes per run.
pub type GlobalData = BTreeMap<RunId, AttributeMap>;

/// Metric attributes per region path, e.g. `main/loop/body`.
pub type RegionProfile = BTreeMap<String, AttributeMap>;

/// Region profiles per run.
pub type RegionProfiles = BTreeMap<RunId, RegionProfile>;

/// Ordered channel records (e.g. time series samples) per run.
pub type ChannelData = BTreeMap<RunId, Vec<AttributeMap>>;

/// Read access to a Spot database.
///
/// Lookups accept any run id the backend can find. Runs that were discovered but not yet
/// flattened are flattened on first request and cached for the lifetime of the backend.
pub trait SpotDb: Debug {
    /// Names and metadata of all global attributes across all known runs.
    fn get_global_attribute_metadata(&mut self) -> Result<Schema>;

    /// Names and metadata of all metric attributes across all known runs.
    fn get_metric_attribute_metadata(&mut self) -> Result<Schema>;

    /// Ids of every run in the database.
    fn get_all_run_ids(&mut self) -> Result<Vec<RunId>>;

    /// Ids of runs added or changed after `since`.
    fn get_new_runs(&mut self, since: DateTime<Utc>) -> Result<Vec<RunId>>;

    /// Global attributes of the given runs.
    fn get_global_data(&mut self, run_ids: &[RunId]) -> Result<GlobalData>;

    /// Region profiles of the given runs.
    fn get_regionprofiles(&mut self, run_ids: &[RunId]) -> Result<RegionProfiles>;

    /// Records of channel `channel_name` for the given runs.
    fn get_channel_data(&mut self, channel_name: &str, run_ids: &[RunId]) -> Result<ChannelData>;
}

/// Open the Spot database at `location`.
///
/// # Errors
///
/// Returns an error if the location is not a known database format, or names a database kind
/// no backend is available for.
pub fn connect(location: &str, config: &Config) -> Result<Box<dyn SpotDb>> {
    let root = Location::parse(location)?.into_directory()?;
    Ok(Box::new(SurveyDb::open(root, config)?))
}
