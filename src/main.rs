//! LoopBreaker CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use loopbreaker::cli::{Cli, Commands};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => loopbreaker::cli::commands::run::execute(args, cli.json),
        Commands::Demo(args) => loopbreaker::cli::commands::demo::execute(args, cli.json),
    };

    if let Err(err) = result {
        loopbreaker::cli::handle_error(err, cli.json);
    }
}
