use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedterm::app::AppContext;
use feedterm::cli::{commands, Cli, Commands};
use feedterm::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    // The console session owns the screen, so it logs nothing unless asked
    let default_filter = match command {
        Commands::Console => "off",
        Commands::Serve | Commands::List => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    let ctx = AppContext::from_config(&config).await?;

    match command {
        Commands::Serve => {
            commands::serve(Arc::new(ctx), &config.server).await?;
        }
        Commands::Console => {
            commands::console(&ctx).await?;
        }
        Commands::List => {
            commands::list_feeds(&ctx);
        }
    }

    Ok(())
}
