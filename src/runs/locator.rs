use super::Run;
use super::run::RESULTS_SUFFIX;
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const LOG_TARGET: &str = "   locator";

/// Why a path was left out of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardKind {
    /// The walk could not read the entry, e.g. a symbolic link loop or a permission error.
    Unreadable,

    /// A results document whose pair could not be loaded as a run.
    Rejected,
}

/// A path that was found on disk but did not yield a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discard {
    pub path: PathBuf,
    pub kind: DiscardKind,
    pub reason: String,
}

/// Outcome of one scan of a root directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Runs built in this scan, in walk order.
    pub runs: Vec<Run>,

    /// Entries the walk could not read and candidates that could not be turned into a run.
    pub skipped: Vec<Discard>,
}

/// Finds run artifact pairs below a root directory.
#[derive(Debug, Clone)]
pub struct RunLocator {
    root: PathBuf,
    follow_links: bool,
}

impl RunLocator {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, follow_links: bool) -> Self {
        Self {
            root: root.into(),
            follow_links,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the root for results documents and build a run for each complete pair.
    ///
    /// With `since`, candidates whose results document was not modified after `since` are
    /// ignored. Candidates that cannot be loaded are reported in [`Discovery::skipped`] and never
    /// fail the scan.
    #[must_use]
    pub fn discover(&self, since: Option<DateTime<Utc>>) -> Discovery {
        let mut discovery = Discovery::default();

        let walker = WalkDir::new(&self.root).follow_links(self.follow_links).sort_by_file_name();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(&self.root).to_path_buf();
                    log::debug!(target: LOG_TARGET, "Skipping unreadable entry '{}': {e}", path.display());
                    discovery.skipped.push(Discard {
                        path,
                        kind: DiscardKind::Unreadable,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let Some(prefix) = results_prefix(&entry) else {
                continue;
            };

            match Self::candidate(&entry, prefix, since) {
                Ok(Some(run)) => {
                    log::debug!(target: LOG_TARGET, "Found run '{}' at '{}'", run.id(), entry.path().display());
                    discovery.runs.push(run);
                }
                Ok(None) => {
                    log::trace!(target: LOG_TARGET, "Ignoring '{}': not modified since last scan", entry.path().display());
                }
                Err(e) => {
                    log::debug!(target: LOG_TARGET, "Skipping '{}': {e:#}", entry.path().display());
                    discovery.skipped.push(Discard {
                        path: entry.path().to_path_buf(),
                        kind: DiscardKind::Rejected,
                        reason: format!("{e:#}"),
                    });
                }
            }
        }

        log::info!(target: LOG_TARGET,
            "Scanned '{}': {} run(s) found, {} candidate(s) skipped",
            self.root.display(),
            discovery.runs.len(),
            discovery.skipped.len()
        );

        discovery
    }

    fn candidate(entry: &DirEntry, prefix: &str, since: Option<DateTime<Utc>>) -> Result<Option<Run>> {
        if let Some(since) = since {
            let modified = entry
                .metadata()
                .into_app_err("unable to read file metadata")?
                .modified()
                .into_app_err("unable to read modification time")?;

            if DateTime::<Utc>::from(modified) <= since {
                return Ok(None);
            }
        }

        let dir = entry.path().parent().unwrap_or_else(|| Path::new(""));
        Run::load(dir, prefix).map(Some)
    }
}

/// The artifact prefix of a results document, or `None` if the entry is not one.
fn results_prefix(entry: &DirEntry) -> Option<&str> {
    if entry.file_type().is_dir() {
        return None;
    }

    entry
        .file_name()
        .to_str()?
        .strip_suffix(RESULTS_SUFFIX)
        .filter(|prefix| !prefix.is_empty())
}
