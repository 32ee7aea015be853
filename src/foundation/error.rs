/// Convenience result type used across anaview.
pub type AnaviewResult<T> = Result<T, AnaviewError>;

/// Top-level error taxonomy used by view, animation and output APIs.
#[derive(thiserror::Error, Debug)]
pub enum AnaviewError {
    /// Malformed view parameters: bad permutation, non-divisible block size, unknown view.
    #[error("construction error: {0}")]
    Construction(String),

    /// An image side that is not one of the canonical stage resolutions.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Errors while rendering or encoding animation frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing run records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnaviewError {
    /// Build a [`AnaviewError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build a [`AnaviewError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`AnaviewError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`AnaviewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AnaviewError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
