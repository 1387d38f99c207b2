use super::common::{base_dir_of, print_warnings};
use camino::Utf8PathBuf;
use clap::Parser;
use spotdb::Result;
use spotdb::config::Config;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Configuration file to check
    #[arg(value_name = "PATH")]
    pub config: Utf8PathBuf,
}

pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    let (_, warnings) = Config::load(base_dir_of(&args.config), Some(args.config.as_path()))?;

    println!("Configuration validation successful");
    println!("Config file: {}", args.config);
    print_warnings(&warnings);
    Ok(())
}
