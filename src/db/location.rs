use crate::Result;
use core::fmt::{Display, Formatter, Result as FmtResult};
use ohno::bail;
use std::path::{Path, PathBuf};

/// Where a Spot database lives, classified from its location string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A directory tree of run artifact pairs.
    Directory(PathBuf),

    /// An SQLite database file.
    Sqlite(PathBuf),

    /// A MySQL connection URI.
    MySql(String),

    /// A MySQL option file holding connection parameters.
    MySqlConfig(PathBuf),
}

impl Location {
    /// Classify `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` matches none of the known database formats
    pub fn parse(key: &str) -> Result<Self> {
        let path = Path::new(key);

        if path.is_dir() {
            Ok(Self::Directory(path.to_path_buf()))
        } else if key.ends_with(".sqlite") {
            Ok(Self::Sqlite(path.to_path_buf()))
        } else if key.starts_with("mysql") {
            Ok(Self::MySql(key.to_string()))
        } else if key.ends_with(".cnf") {
            Ok(Self::MySqlConfig(path.to_path_buf()))
        } else {
            bail!("unknown Spot database format: {key}")
        }
    }

    /// The root of a directory database.
    ///
    /// # Errors
    ///
    /// Returns an error for every other kind of location
    pub fn into_directory(self) -> Result<PathBuf> {
        match self {
            Self::Directory(root) => Ok(root),
            other => bail!("no backend available for {other}"),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Directory(path) => write!(f, "directory '{}'", path.display()),
            Self::Sqlite(path) => write!(f, "SQLite database '{}'", path.display()),
            Self::MySql(uri) => write!(f, "MySQL database '{uri}'"),
            Self::MySqlConfig(path) => write!(f, "MySQL option file '{}'", path.display()),
        }
    }
}
