use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use flitzy::catalog::HttpCatalog;
use flitzy::cli::{self, Command};
use flitzy::config::{FlowConfig, device_position_from_env};
use flitzy::geo::FixedPosition;
use flitzy::screens::ScreenFlow;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional daily log file alongside stderr
    let (file_layer, _log_guard) = match std::env::var("FLITZY_LOG_DIR") {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "flitzy.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    let config = FlowConfig::from_env()?;

    let device = device_position_from_env()?;

    eprintln!("Flitzy flow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Device: {device}");
    eprintln!("   Catalog: {}", config.catalog_base_url);
    eprintln!("   Type `help` for commands.\n");

    let geo = Arc::new(FixedPosition::new(device));
    let catalog = Arc::new(HttpCatalog::new(config.catalog_base_url.clone()));
    let mut flow = ScreenFlow::new(config, geo, catalog);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            eprint!("> ");
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => eprintln!("{}", cli::HELP),
            Ok(command) => match cli::execute(&mut flow, command).await {
                Ok(out) => println!("{}", serde_json::to_string_pretty(&out)?),
                Err(e) => eprintln!("error: {e}"),
            },
            Err(e) => eprintln!("error: {e}"),
        }
        eprint!("> ");
    }

    Ok(())
}
