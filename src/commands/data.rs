use super::common::{Common, CommonArgs};
use clap::Parser;
use spotdb::{Result, SpotDb};

#[derive(Parser, Debug)]
pub struct DataArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Runs to query [default: all runs]
    #[arg(value_name = "RUN_ID")]
    pub run_ids: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ChannelArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Channel to read, e.g. `timeseries`
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Runs to query [default: all runs]
    #[arg(value_name = "RUN_ID")]
    pub run_ids: Vec<String>,
}

pub fn show_globals(args: &DataArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;
    let ids = common.resolve_ids(&args.run_ids)?;
    let data = common.db.get_global_data(&ids)?;
    common.emit(&data)
}

pub fn show_profiles(args: &DataArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;
    let ids = common.resolve_ids(&args.run_ids)?;
    let profiles = common.db.get_regionprofiles(&ids)?;
    common.emit(&profiles)
}

pub fn show_channel(args: &ChannelArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;
    let ids = common.resolve_ids(&args.run_ids)?;
    let channel = common.db.get_channel_data(&args.name, &ids)?;
    common.emit(&channel)
}
