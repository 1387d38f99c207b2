use super::common::{Common, CommonArgs};
use chrono::{DateTime, Utc};
use clap::Parser;
use spotdb::{Result, SpotDb};

#[derive(Parser, Debug)]
pub struct RunsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only list runs whose results changed after this RFC 3339 timestamp
    #[arg(long, value_name = "TIME")]
    pub since: Option<DateTime<Utc>>,
}

pub fn list_runs(args: &RunsArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;

    let ids = match args.since {
        Some(since) => common.db.get_new_runs(since)?,
        None => common.db.get_all_run_ids()?,
    };

    common.emit(&ids)
}
