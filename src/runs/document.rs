//! Loading of the raw JSON documents a run is made of.

use crate::Result;
use ohno::{IntoAppError, bail};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const LOG_TARGET: &str = "  document";

/// A run document: a JSON object keyed by category.
pub type Document = Map<String, Value>;

/// Load a JSON document whose top level must be an object.
pub fn load(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();

    let file = File::open(path).into_app_err_with(|| format!("unable to open file '{}'", path.display()))?;
    let reader = BufReader::new(file);
    let value: Value = serde_json::from_reader(reader).into_app_err_with(|| format!("unable to parse file '{}'", path.display()))?;

    let Value::Object(doc) = value else {
        bail!("top level of '{}' is not a JSON object", path.display());
    };

    log::trace!(target: LOG_TARGET, "Loaded '{}' ({} categories)", path.display(), doc.len());
    Ok(doc)
}
