use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "filedger",
    about = "File ledger: file metadata records with a content-hash index",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// World state file (overrides the configuration)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Pretty-print JSON payloads
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty world state file
    Init,
    /// Invoke a ledger function, e.g. `invoke initFile a.pdf <hash> <url>`
    Invoke(InvokeArgs),
    /// List every key in the world state
    Dump,
}

#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Function name: initFile, deletefile, queryfile, readfile, findbyhash
    pub function: String,
    /// Function arguments, passed through unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
