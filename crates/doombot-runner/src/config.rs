//! Runner configuration from the command line and environment.
//!
//! The scenario path comes from the first argument, falling back to
//! `DOOMBOT_SCENARIO`. With neither, the built-in demo scenario is played.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::RunnerError;

/// How the final report is printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Indented JSON.
    Pretty,
    /// Single-line JSON.
    Compact,
    /// No report; logs only.
    Quiet,
}

impl FromStr for ReportFormat {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" | "json" => Ok(Self::Compact),
            "quiet" | "none" => Ok(Self::Quiet),
            other => Err(RunnerError::Config(format!(
                "invalid DOOMBOT_REPORT {other:?}: expected pretty, compact, or quiet"
            ))),
        }
    }
}

/// Complete runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Scenario file to play, or `None` for the built-in demo.
    pub scenario: Option<PathBuf>,
    /// Report output format.
    pub report: ReportFormat,
}

impl RunnerConfig {
    /// Load configuration from the process arguments and environment.
    ///
    /// - first argument -- scenario YAML path
    /// - `DOOMBOT_SCENARIO` -- scenario YAML path if no argument is given
    /// - `DOOMBOT_REPORT` -- `pretty` (default), `compact`, or `quiet`
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_sources(
            std::env::args().nth(1),
            std::env::var("DOOMBOT_SCENARIO").ok(),
            std::env::var("DOOMBOT_REPORT").ok(),
        )
    }

    fn from_sources(
        arg: Option<String>,
        scenario_var: Option<String>,
        report_var: Option<String>,
    ) -> Result<Self, RunnerError> {
        let scenario = arg
            .or(scenario_var)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let report = report_var
            .as_deref()
            .map_or(Ok(ReportFormat::Pretty), ReportFormat::from_str)?;
        Ok(Self { scenario, report })
    }
}
