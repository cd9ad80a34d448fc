/// Convenience result type used across keywarp.
pub type KeywarpResult<T> = Result<T, KeywarpError>;

/// Top-level error taxonomy used by the public APIs.
///
/// The compositing core itself has no fatal conditions: malformed geometry
/// tokens resolve to inherited defaults, out-of-order keyframes are skipped
/// with a diagnostic, and unsupported pixel format pairings degrade to a
/// pass-through. Errors are reserved for construction-time misuse.
#[derive(thiserror::Error, Debug)]
pub enum KeywarpError {
    /// Invalid caller-provided data (buffer sizes, dimensions, ranges).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid use of the geometry track or keyframe APIs.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeywarpError {
    /// Build a [`KeywarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeywarpError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}
