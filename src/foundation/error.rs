/// Convenience result type used across gridpulse.
pub type GridpulseResult<T> = Result<T, GridpulseError>;

/// Top-level error taxonomy for configuration loading and surface backends.
///
/// The simulation itself never fails: degenerate spawns and zero-size surfaces are silent
/// no-ops. Errors only surface where data crosses a boundary (config files, pixel buffers).
#[derive(thiserror::Error, Debug)]
pub enum GridpulseError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised by a drawing surface while executing a frame plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridpulseError {
    /// Build a [`GridpulseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridpulseError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GridpulseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
