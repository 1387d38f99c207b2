use super::common::{Common, CommonArgs};
use clap::Parser;
use spotdb::{Result, SpotDb};

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show metric attributes instead of global attributes
    #[arg(long)]
    pub metrics: bool,
}

pub fn show_schema(args: &SchemaArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;
    let _ = common.db.get_all_run_ids()?;

    let schema = if args.metrics {
        common.db.get_metric_attribute_metadata()?
    } else {
        common.db.get_global_attribute_metadata()?
    };

    common.emit(&schema)
}
