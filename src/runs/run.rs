use super::RunId;
use super::document::{self, Document};
use crate::Result;
use chrono::NaiveDateTime;
use ohno::{IntoAppError, app_err, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name suffix of a run's results document.
pub const RESULTS_SUFFIX: &str = "-report.json";

/// File name suffix of a run's metadata document.
pub const METADATA_SUFFIX: &str = "-metadata.json";

/// Format of the `launch_time` field written by the instrumentation tool.
pub const LAUNCH_TIME_FORMAT: &str = "%Y/%m/%d, %H:%M:%S";

/// One recorded execution of an instrumented program.
///
/// A `Run` only exists if both of its documents parsed and its launch time could be read.
#[derive(Debug, Clone)]
pub struct Run {
    id: RunId,
    prefix: PathBuf,
    executable_name: String,
    launch_time: NaiveDateTime,
    ranks: Option<i64>,
    threads: Option<i64>,
    metadata: Document,
    results: Document,
}

impl Run {
    /// Load the run whose artifacts share `prefix` inside `dir`.
    pub fn load(dir: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let metadata_file = dir.join(format!("{prefix}{METADATA_SUFFIX}"));
        let results_file = dir.join(format!("{prefix}{RESULTS_SUFFIX}"));

        if !(metadata_file.is_file() && results_file.is_file()) {
            bail!(
                "could not locate either '{}' or '{}'",
                metadata_file.display(),
                results_file.display()
            );
        }

        let metadata = document::load(&metadata_file)?;
        let results = document::load(&results_file)?;

        Self::from_documents(dir.join(prefix), metadata, results)
    }

    /// Build a run from already parsed documents.
    pub fn from_documents(prefix: impl Into<PathBuf>, metadata: Document, results: Document) -> Result<Self> {
        let executable = metadata
            .get("executable")
            .and_then(Value::as_object)
            .ok_or_else(|| app_err!("metadata has no 'executable' category"))?;

        let launch_time_text = executable
            .get("launch_time")
            .and_then(Value::as_str)
            .ok_or_else(|| app_err!("metadata has no 'launch_time'"))?;

        let launch_time = NaiveDateTime::parse_from_str(launch_time_text, LAUNCH_TIME_FORMAT)
            .into_app_err_with(|| format!("unable to parse launch time '{launch_time_text}'"))?;

        let executable_path = executable
            .get("executable_path")
            .and_then(Value::as_str)
            .ok_or_else(|| app_err!("metadata has no 'executable_path'"))?;

        let executable_name = Path::new(executable_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| app_err!("executable path '{executable_path}' has no file name"))?;

        let ranks = executable.get("num_ranks").and_then(Value::as_i64);
        let threads = executable.get("num_threads").and_then(Value::as_i64);

        Ok(Self {
            id: RunId::derive(&executable_name, launch_time),
            prefix: prefix.into(),
            executable_name,
            launch_time,
            ranks,
            threads,
            metadata,
            results,
        })
    }

    #[must_use]
    pub const fn id(&self) -> &RunId {
        &self.id
    }

    /// Path of the run's artifacts without the document suffixes.
    #[must_use]
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    #[must_use]
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    #[must_use]
    pub const fn launch_time(&self) -> NaiveDateTime {
        self.launch_time
    }

    /// Launch time as whole epoch seconds.
    #[must_use]
    pub fn launch_epoch(&self) -> i64 {
        self.launch_time.and_utc().timestamp()
    }

    #[must_use]
    pub const fn ranks(&self) -> Option<i64> {
        self.ranks
    }

    #[must_use]
    pub const fn threads(&self) -> Option<i64> {
        self.threads
    }

    #[must_use]
    pub const fn metadata(&self) -> &Document {
        &self.metadata
    }

    #[must_use]
    pub const fn results(&self) -> &Document {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn metadata() -> Document {
        doc(json!({
            "executable": {
                "executable_path": "/usr/workspace/bin/lulesh2.0",
                "launch_time": "2021/03/04, 10:00:00",
                "num_ranks": 8,
                "num_threads": 4,
            }
        }))
    }

    #[test]
    fn test_from_documents() {
        let run = Run::from_documents("/data/run1", metadata(), Document::new()).unwrap();

        assert_eq!(run.id().as_str(), "lulesh2.0_1614852000.0");
        assert_eq!(run.executable_name(), "lulesh2.0");
        assert_eq!(run.ranks(), Some(8));
        assert_eq!(run.threads(), Some(4));
        assert_eq!(run.launch_epoch(), 1_614_852_000);
        assert_eq!(run.prefix(), Path::new("/data/run1"));
    }

    #[test]
    fn test_missing_counts_are_none() {
        let mut metadata = metadata();
        let exe = metadata.get_mut("executable").unwrap().as_object_mut().unwrap();
        let _ = exe.remove("num_ranks");
        let _ = exe.remove("num_threads");

        let run = Run::from_documents("/data/run1", metadata, Document::new()).unwrap();
        assert_eq!(run.ranks(), None);
        assert_eq!(run.threads(), None);
    }

    #[test]
    fn test_missing_launch_time_fails() {
        let mut metadata = metadata();
        let _ = metadata.get_mut("executable").unwrap().as_object_mut().unwrap().remove("launch_time");

        let result = Run::from_documents("/data/run1", metadata, Document::new());
        assert!(result.unwrap_err().to_string().contains("launch_time"));
    }

    #[test]
    fn test_malformed_launch_time_fails() {
        let mut metadata = metadata();
        let _ = metadata
            .get_mut("executable")
            .unwrap()
            .as_object_mut()
            .unwrap()
            .insert("launch_time".to_string(), json!("yesterday"));

        let result = Run::from_documents("/data/run1", metadata, Document::new());
        assert!(result.unwrap_err().to_string().contains("unable to parse launch time"));
    }

    #[test]
    fn test_missing_executable_category_fails() {
        let result = Run::from_documents("/data/run1", Document::new(), Document::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_requires_both_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("lone-report.json"), "{}").unwrap();

        let result = Run::load(temp_dir.path(), "lone");
        assert!(result.unwrap_err().to_string().contains("could not locate"));
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("survey-1-metadata.json"),
            serde_json::to_string(&metadata()).unwrap(),
        )
        .unwrap();
        fs::write(temp_dir.path().join("survey-1-report.json"), r#"{"time": {}}"#).unwrap();

        let run = Run::load(temp_dir.path(), "survey-1").unwrap();
        assert_eq!(run.id().as_str(), "lulesh2.0_1614852000.0");
        assert!(run.results().contains_key("time"));
        assert_eq!(run.prefix(), temp_dir.path().join("survey-1"));
    }
}
