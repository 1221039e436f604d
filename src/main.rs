use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;

use uci_lookup::apis::{create_backend, BackendKind};
use uci_lookup::app::LookupUseCase;
use uci_lookup::config::Config;
use uci_lookup::logging;
use uci_lookup::menu::Shell;

#[derive(Parser)]
#[command(name = "uci_lookup")]
#[command(about = "Look up UCI directory records by UCInetID or name")]
#[command(version)]
struct Cli {
    /// Directory backend to query
    #[arg(long, value_enum, default_value_t = BackendKind::Ldap)]
    backend: BackendKind,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let backend = create_backend(cli.backend, &config)?;
    let lookup = LookupUseCase::new(backend, config.lookup.max_concurrency);
    info!(backend = lookup.backend_name(), "Starting lookup session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&lookup, stdin.lock(), stdout.lock());
    shell.run().await?;

    info!("Lookup session ended");
    Ok(())
}
