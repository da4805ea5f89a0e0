//! villages-events CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use villages_client::cli::{Cli, Command, ConfigAction};
use villages_client::config::{FileConfig, Settings};
use villages_client::error::ClientResult;
use villages_client::{commands, http_provider, run};
use villages_core::{TracingConfig, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Bad flags exit with status 2 from inside clap.
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> ClientResult<()> {
    let path = FileConfig::resolve_path(cli.config.as_deref());
    let file = FileConfig::load(&path);

    match &cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&path, &file),
            ConfigAction::Path => commands::config::path(&path),
        },
        None => {
            let settings = Settings::resolve(&cli, file);
            debug!(?settings, "resolved settings");
            let provider = http_provider(&settings);

            let output = run(&settings, &provider).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
