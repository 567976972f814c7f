use clap::{Parser, Subcommand};
use tagpulse_core::load_config;

mod logging;
mod run;
mod setup;

#[derive(Debug, Parser)]
#[command(name = "tagpulse")]
#[command(about = "Hashtag post collection and sentiment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// One-time supervised login to capture the authentication state.
    Setup,
    /// Run the full pipeline: collect, process, analyze.
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = load_config().map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;
    logging::init(&cfg.log_path)?;

    match cli.command {
        Commands::Setup => setup::run_setup(&cfg).await,
        Commands::Run => run::run_pipeline(&cfg).await,
    }
}
