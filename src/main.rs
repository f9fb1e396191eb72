use anyhow::Result;
use clap::Parser;

mod cli;

use tracelink::{config, init_tracing, server};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.command {
        cli::Commands::Start { role, port } => {
            let cfg = config::load_config(&args.config)?;
            let port = port.or(cfg.server.port).unwrap_or_else(|| role.default_port());
            server::start_server(cfg, role, port, args.config).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => {
                let cfg = config::load_config(&args.config)?;
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
            cli::ConfigCommands::Validate => {
                config::load_config(&args.config)?;
                println!("Configuration is valid");
            }
        },
        cli::Commands::Version => {
            println!("tracelink v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
