//! Setup shared by the commands that query a database.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::{IntoAppError, app_err};
use serde::Serialize;
use spotdb::config::Config;
use spotdb::runs::{DiscardKind, RunId};
use spotdb::{Location, Result, SpotDb, SurveyDb};

const LOG_TARGET: &str = "       cli";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Arguments shared by every query command
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Spot database location, a directory of run artifacts
    #[arg(value_name = "LOCATION")]
    pub location: String,

    /// Path to configuration file [default: one of spotdb.[toml|yml|yaml|json] in LOCATION]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

#[derive(Debug)]
pub struct Common {
    pub db: SurveyDb,
}

impl Common {
    /// Initialize logging, load the configuration and open the database
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the location cannot be opened
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let root = Location::parse(&args.location)?.into_directory()?;

        let base_dir = Utf8PathBuf::from_path_buf(root.clone())
            .map_err(|path| app_err!("database location '{}' is not valid UTF-8", path.display()))?;

        let (config, warnings) = Config::load(&base_dir, args.config.as_deref())?;
        print_warnings(&warnings);

        Ok(Self {
            db: SurveyDb::open(root, &config)?,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .init();
    }

    /// The given ids, or every run in the database when none are given
    pub fn resolve_ids(&mut self, run_ids: &[String]) -> Result<Vec<RunId>> {
        if run_ids.is_empty() {
            self.db.get_all_run_ids()
        } else {
            Ok(run_ids.iter().map(|id| RunId::from(id.as_str())).collect())
        }
    }

    /// Print `value` as JSON on stdout, followed by a note on skipped candidates
    pub fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value).into_app_err("serializing query output")?;
        println!("{text}");

        let skipped = self.db.skipped();
        let unreadable = skipped.iter().filter(|discard| discard.kind == DiscardKind::Unreadable).count();
        let rejected = skipped.len() - unreadable;
        let root = self.db.root().display();

        if rejected > 0 {
            eprintln!("{rejected} candidate(s) in '{root}' were skipped");
        }
        if unreadable > 0 {
            eprintln!("{unreadable} entr(ies) in '{root}' could not be read");
        }
        for discard in skipped {
            log::info!(target: LOG_TARGET, "Skipped '{}': {}", discard.path.display(), discard.reason);
        }

        Ok(())
    }
}

pub fn print_warnings(warnings: &[String]) {
    if !warnings.is_empty() {
        eprintln!("\n⚠️  Configuration validation warnings:");
        for warning in warnings {
            eprintln!("   {warning}");
        }
        eprintln!();
    }
}

/// Directory a configuration path is resolved against
pub fn base_dir_of(path: &Utf8Path) -> &Utf8Path {
    path.parent().filter(|parent| !parent.as_str().is_empty()).unwrap_or_else(|| Utf8Path::new("."))
}
