//! spotdb crate
//!
//! Normalizes per-run performance profiling dumps into a uniform attribute schema. Each run
//! contributes a metadata document and a results document; this crate locates those pairs,
//! flattens them into flat attribute maps and accumulates the names and types of every
//! attribute seen so far.
//!
//! # Module Organization
//!
//! - [`schema`]: type inference and the first-write-wins schema registry
//! - [`runs`]: run artifacts and their discovery on disk
//! - [`normalize`]: flattening of metadata and results documents
//! - [`db`]: the backend contract and the file-tree backend
//! - [`config`]: configuration loading

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod config;
pub mod db;
pub mod normalize;
pub mod runs;
pub mod schema;

pub use db::{Location, SpotDb, SurveyDb, connect};
