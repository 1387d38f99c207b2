mod common;
mod data;
mod init;
mod runs;
mod schema;
mod validate;

pub use data::{ChannelArgs, DataArgs, show_channel, show_globals, show_profiles};
pub use init::{InitArgs, init_config};
pub use runs::{RunsArgs, list_runs};
pub use schema::{SchemaArgs, show_schema};
pub use validate::{ValidateArgs, validate_config};
