use camino::Utf8PathBuf;
use clap::Parser;
use spotdb::Result;
use spotdb::config::Config;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "spotdb.toml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    Config::default().save(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
