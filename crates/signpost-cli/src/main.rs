//! Signpost command line front-end
//!
//! Runs one initial-load recompute for the viewport and points given as arguments
//! and prints the eight sector indicators.

mod settings;

use clap::Parser;
use settings::Settings;
use signpost_lib::{Indicator, Sector, SignpostEngine, SignpostError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Signpost(#[from] SignpostError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One printed line per sector
#[derive(Debug, serde::Serialize)]
struct Row {
    sector: Sector,
    label: &'static str,
    rotation: f64,
    count: usize,
    visible: bool,
}

impl Row {
    fn new(sector: Sector, indicator: Indicator) -> Self {
        Self {
            sector,
            label: sector.label(),
            rotation: sector.rotation_degrees(),
            count: indicator.count,
            visible: indicator.visible,
        }
    }
}

fn main() -> ExitCode {
    setup_logging();
    let settings = Settings::parse();

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, honoring RUST_LOG and falling back to a sensible default
fn setup_logging() {
    let default = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(settings: &Settings) -> Result<(), CliError> {
    let viewport = settings.viewport()?;
    let mut engine = SignpostEngine::new(settings.points.clone(), settings.config())?;

    let mut rows = Vec::with_capacity(Sector::ALL.len());
    engine.initial_load(viewport, &mut |sector: Sector, indicator: Indicator| {
        rows.push(Row::new(sector, indicator))
    })?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{:<8}{:>10}{:>8}  VISIBLE", "SECTOR", "ROTATION", "COUNT");
        for row in &rows {
            println!(
                "{:<8}{:>10.1}{:>8}  {}",
                row.label,
                row.rotation,
                row.count,
                if row.visible { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
