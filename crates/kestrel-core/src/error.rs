//! Error types for the targeting pipeline.
//!
//! Every variant is a local, recoverable outcome. Nothing here is
//! fatal: a failed designation or engage attempt leaves the rest of
//! the tick untouched.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TargetingError {
    /// Malformed input (NaN angles or positions) rejected at the
    /// pipeline boundary.
    #[error("non-finite input: {0}")]
    InvalidInput(&'static str),

    /// Point lock requested without a previously resolved target.
    #[error("no resolved target point available")]
    NoTargetAvailable,

    /// The surface search exhausted its budget without a valid hit.
    #[error("no surface found within the search budget")]
    SurfaceNotFound,
}
