use thiserror::Error;

/// Errors raised while building a timeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimelineError {
    #[error("timeline entry bounds must be finite (start={start}, end={end})")]
    NonFiniteBounds { start: f32, end: f32 },
    #[error("timeline entry has an empty range [{start}, {end})")]
    EmptyRange { start: f32, end: f32 },
}

/// Errors produced while loading configuration or fixture JSON.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}
