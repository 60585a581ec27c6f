//! Depot Server Binary
//!
//! Bootstraps the depot from a directory, then serves newline-delimited
//! JSON requests on stdin, one JSON response per line on stdout. A
//! process-local driver, not a network transport.

use anyhow::Context;
use clap::Parser;
use depot::config::{ConfigLoader, ServerConfig};
use depot::controller::Controller;
use depot::logging::init_logging;
use depot::protocol::{Request, Response, WireRequest};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "depotd", about = "In-memory version-control depot server")]
struct Cli {
    /// Depot root directory (overrides the config file)
    #[arg(long)]
    depot_root: Option<PathBuf>,

    /// Path to a config file (default: ./depot.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli)?;
    if let Some(root) = cli.depot_root {
        config.depot_root = root;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(Some(&config.logging))?;
    info!(depot_root = %config.depot_root.display(), "depotd starting");

    let mut controller = Controller::bootstrap(&config.depot_root)
        .with_context(|| format!("Failed to bootstrap depot from {:?}", config.depot_root))?;

    serve(&mut controller)
}

fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

/// Read one JSON request per line, write one JSON response per line.
fn serve(controller: &mut Controller) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read request line")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = dispatch(controller, &line);
        serde_json::to_writer(&mut out, &response).context("Failed to write response")?;
        writeln!(out)?;
        out.flush()?;
    }

    info!("depotd shutting down");
    Ok(())
}

fn dispatch(controller: &mut Controller, line: &str) -> Response {
    let wire: WireRequest = match serde_json::from_str(line) {
        Ok(wire) => wire,
        Err(e) => return Response::failure(format!("Malformed request: {}", e)),
    };
    match Request::try_from(wire) {
        Ok(request) => controller.handle(request),
        Err(e) => Response::failure(e.to_string()),
    }
}
