use thiserror::Error;
use waypath_geom::GeometryError;

/// Errors raised while setting up an engine.
///
/// Path queries themselves never fail: exhaustion and missing regions come back as
/// (possibly degraded) paths.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    #[error("sample resolution must be at least 1")]
    ZeroResolution,

    #[error("probe extent must be finite and non-negative, got {0}")]
    InvalidProbeExtent(f32),

    #[error("region geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

pub type Result<T> = std::result::Result<T, NavError>;
