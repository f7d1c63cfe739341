use clap::Parser;
use pokedex::cli::Cli;
use pokedex::{Pokedex, PokedexResult};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "pokedex=debug" } else { "pokedex=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> PokedexResult<()> {
    // Everything that can be wrong with the invocation is checked before any lookup
    let config = cli.config()?;
    let mut request = cli.request()?;

    let pokedex = Pokedex::from_config(&config)?;
    pokedex.execute(&mut request).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
