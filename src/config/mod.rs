//! Configuration for run discovery and metric aggregation.

#[expect(clippy::module_inception, reason = "config module holds the Config type")]
mod config;

pub use config::Config;
