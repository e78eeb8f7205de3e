//! Session snapshot: the observable pipeline state after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{BodyOutcome, LockState};
use crate::types::{Position, SensorAim, TargetPoint, Velocity};

/// Complete observable state of a targeting session after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Tick counter (increments by one per pipeline tick).
    pub tick: u64,
    /// Elapsed session time in seconds.
    pub elapsed_secs: f64,
    pub lock: LockState,
    pub aim: SensorAim,
    /// The active resolved target, if any.
    pub target: Option<TargetPoint>,
    pub guidance_active: bool,
    /// One entry per body currently reported by the weapon collaborator.
    pub bodies: Vec<BodyView>,
}

/// Per-body guidance status for display and telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyView {
    pub slot: usize,
    pub position: Position,
    pub velocity: Velocity,
    /// Slant distance to the active target (meters), if one exists.
    pub distance_to_target: Option<f64>,
    /// Accumulated flight time under guidance (seconds).
    pub flight_time_secs: f64,
    /// Terminal outcome, once reached.
    pub outcome: Option<BodyOutcome>,
}
