use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracelink::config::Role;

#[derive(Parser, Debug)]
#[command(name = "tracelink", version, about = "Chained request tracing demo services")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start one of the services
    Start {
        /// Which service role to run
        #[arg(short, long, value_enum)]
        role: Role,

        /// Override the listen port for this role
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Check configuration file validity
    Validate,
}
