use chrono::NaiveDateTime;
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};

/// Stable identity of a run: executable name plus launch time as fractional epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Box<str>);

impl RunId {
    /// Derive the id of a run from its executable name and launch time.
    ///
    /// The launch time is rendered as `<seconds>.<fraction>` with at least one fractional digit,
    /// so a launch at a whole second renders as e.g. `lulesh_1614852000.0`.
    #[must_use]
    pub fn derive(executable_name: &str, launch_time: NaiveDateTime) -> Self {
        let launch = launch_time.and_utc();
        let micros = format!("{:06}", launch.timestamp_subsec_micros());
        let fraction = micros.trim_end_matches('0');
        let fraction = if fraction.is_empty() { "0" } else { fraction };

        Self(format!("{executable_name}_{}.{fraction}", launch.timestamp()).into_boxed_str())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        Self(Box::from(s))
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        Self(s.into_boxed_str())
    }
}

impl AsRef<str> for RunId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
