//! Enumeration types used throughout the pipeline.

use serde::{Deserialize, Serialize};

/// Surface classification of a resolved target point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    #[default]
    Land,
    Water,
}

/// Which surfaces a designation search will accept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceFilter {
    /// Any terrain or water surface.
    #[default]
    Any,
    /// Water surfaces only (maritime patrol profile).
    WaterOnly,
}

/// Search strategy used by the surface intersection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMethod {
    /// Binary search over the ray's range parameter. Always correct;
    /// preferred for long range or sub-meter precision.
    Bisection,
    /// Fixed-step marching. Cheaper, adequate at short range.
    Linear,
}

/// Sensor lock mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    /// Sensor follows manual input.
    #[default]
    Unlocked,
    /// Pan/tilt frozen at the angles recorded at lock time,
    /// independent of vehicle motion.
    DirectionLocked,
    /// A world point is fixed and sensor angles are recomputed every
    /// tick to keep pointing at it as the vehicle moves.
    PointLocked,
}

/// Terminal outcome for a guided body. These are expected results of
/// the control loop, not errors; each is reported exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyOutcome {
    /// Closed within the hit threshold of the target point.
    Hit,
    /// Exceeded maximum range from the launching vehicle.
    Lost,
    /// Exceeded the flight-time budget.
    TimedOut,
}
