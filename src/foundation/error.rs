/// Convenience result type used across nubes.
pub type NubesResult<T> = Result<T, NubesError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum NubesError {
    /// Invalid caller-provided input (empty clusters, zero image counts, inverted ranges).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration values that cannot be used for generation or resolution.
    #[error("config error: {0}")]
    Config(String),

    /// Errors while serializing or rasterizing generated artwork.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NubesError {
    /// Build a [`NubesError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NubesError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`NubesError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`NubesError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
