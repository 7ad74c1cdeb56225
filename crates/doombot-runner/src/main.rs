//! Command-line entry point for the Doombot simulation.
//!
//! Loads a scenario (a YAML file, or the built-in demo), plays it until
//! every room is cleared or the bot gets stuck, and prints the game report
//! as JSON on stdout. Logs go to stderr, filtered by `RUST_LOG`.
//!
//! The process exits with status 0 when every room was cleared and 2 when
//! the bot got stuck.

mod config;
mod error;

use std::process::ExitCode;

use anyhow::Context;
use doombot_core::{GameBot, PassCallback, PassSummary, ScenarioConfig, log_game_end, run_game};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ReportFormat, RunnerConfig};
use crate::error::RunnerError;

/// Logs per-room danger after every pass.
struct DangerTrace;

impl PassCallback for DangerTrace {
    fn on_pass(&mut self, summary: &PassSummary, bot: &GameBot) {
        for room in bot.all_rooms() {
            debug!(
                pass = summary.pass,
                room = %room.id(),
                name = room.name(),
                danger = room.danger_level(),
                live = room.live_ids().len(),
                "Room state"
            );
        }
    }
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration or scenario is invalid, or the
/// report cannot be serialized.
fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("doombot-runner starting");

    let config = RunnerConfig::from_env()?;
    let scenario = match &config.scenario {
        Some(path) => ScenarioConfig::from_file(path)
            .map_err(RunnerError::from)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    info!(
        scenario = %scenario.name,
        rooms = scenario.rooms.len(),
        players = scenario.players.len(),
        "scenario loaded"
    );

    let mut bot = scenario
        .build()
        .map_err(RunnerError::from)
        .context("building scenario")?;
    let report = run_game(&mut bot, &mut DangerTrace);
    log_game_end(&report);

    let rendered = match config.report {
        ReportFormat::Pretty => Some(serde_json::to_string_pretty(&report).map_err(RunnerError::from)?),
        ReportFormat::Compact => Some(serde_json::to_string(&report).map_err(RunnerError::from)?),
        ReportFormat::Quiet => None,
    };
    if let Some(json) = rendered {
        println!("{json}");
    }

    Ok(if report.is_cleared() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
