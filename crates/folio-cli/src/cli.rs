use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use folio_store::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    about = "Folio: a file-per-record JSON document store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store root directory
    #[arg(long, global = true, env = "FOLIO_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// fatal, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the store root if needed
    Init,
    /// Write a JSON record
    Put(PutArgs),
    /// Print one record
    Get(GetArgs),
    /// Print every record in a collection
    List(ListArgs),
    /// Delete a record, or a whole collection when no name is given
    Rm(RmArgs),
    /// Write the sample user records and list them
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
pub struct PutArgs {
    pub collection: String,
    pub name: String,
    /// Record body as JSON text
    pub json: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub collection: String,
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    pub collection: String,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    pub collection: String,
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct SeedArgs {
    #[arg(long, default_value = "users")]
    pub collection: String,
}
