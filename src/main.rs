// In src/main.rs

// Declare modules
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod expr;
pub mod keys;
pub mod orchestrator;
pub mod raster;
pub mod widgets;

use std::fs::File;

use crate::{
    config::CONFIG,
    display::{ConsoleDisplay, Display},
    orchestrator::{AppOrchestrator, OrchestratorStatus},
};

// Logging
use anyhow::Context;
use log::{error, info};

/// Main entry point for the `console-graph` application.
fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("Starting console-graph...");

    let config = &*CONFIG;
    info!("Configuration: {:?}", config);

    let mut display = ConsoleDisplay::new(config.performance.input_poll_ds)
        .context("Failed to initialize the console")?;
    let mut orchestrator = AppOrchestrator::new(config);

    let result = run(&mut orchestrator, &mut display);
    // Restore the terminal before reporting anything on it.
    let cleanup = display.cleanup();
    if let Err(e) = &result {
        error!("console-graph stopped with an error: {:#}", e);
    }
    result?;
    cleanup.context("Failed to restore the terminal")?;
    info!("console-graph exited successfully.");
    Ok(())
}

/// Logs go to a file: stdout belongs to the graph.
fn init_logging() -> anyhow::Result<()> {
    let path = CONFIG.logging.resolved_file();
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Redraws, then waits for keys, until a key or the end of input asks to stop.
fn run(orchestrator: &mut AppOrchestrator, display: &mut ConsoleDisplay) -> anyhow::Result<()> {
    orchestrator
        .draw_frame(display)
        .context("Failed to draw the first frame")?;
    loop {
        let keys = match display.poll_keys()? {
            Some(keys) => keys,
            None => {
                info!("Input closed. Shutting down.");
                return Ok(());
            }
        };
        let resized = display.refresh_size();
        if keys.is_empty() && !resized {
            continue;
        }
        for key in keys {
            if orchestrator.handle_key(key) == OrchestratorStatus::Shutdown {
                return Ok(());
            }
        }
        orchestrator
            .draw_frame(display)
            .with_context(|| format!("Failed to draw a {:?} frame", display.size()))?;
    }
}
