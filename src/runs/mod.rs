//! Run artifacts and their discovery
//!
//! A run is recorded by the instrumentation tool as two JSON documents sharing a file name
//! prefix: `<prefix>-metadata.json` and `<prefix>-report.json`. The [`RunLocator`] walks a
//! directory tree for such pairs and builds a [`Run`] for each one that parses. Pairs that are
//! incomplete or malformed are skipped and reported as [`Discard`] records rather than errors,
//! since a results directory routinely contains partial or unrelated files.

pub mod document;
mod locator;
mod run;
mod run_id;

pub use locator::{Discard, DiscardKind, Discovery, RunLocator};
pub use run::{LAUNCH_TIME_FORMAT, METADATA_SUFFIX, RESULTS_SUFFIX, Run};
pub use run_id::RunId;
