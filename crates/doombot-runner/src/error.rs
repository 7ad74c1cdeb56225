//! Error types for the runner binary.

/// Errors that can occur while setting up or reporting a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The scenario could not be loaded or built.
    #[error("scenario error: {0}")]
    Scenario(#[from] doombot_core::ConfigError),

    /// The report could not be serialized.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
