//! Operator commands sent to the targeting pipeline.
//!
//! Commands are queued and processed at the next tick boundary, before
//! the lock refresh and guidance steps of that tick.

use serde::{Deserialize, Serialize};

use crate::config::SearchParams;

/// All possible operator actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    // --- Sensor control ---
    /// Manual gimbal slew. Ignored while a lock mode is driving the
    /// sensor.
    SetSensorAim { pan_deg: f64, tilt_deg: f64 },

    // --- Designation ---
    /// Resolve a target point along the current sensor ray.
    Designate { params: SearchParams },

    // --- Lock management ---
    /// Freeze the gimbal at its current pan/tilt.
    LockDirection,
    /// Lock onto the most recently resolved target point. Fails with
    /// `NoTargetAvailable` if nothing has been designated.
    LockPoint,
    /// Return the sensor to manual control. The last resolved target
    /// point is retained for any guidance still in flight.
    Unlock,

    // --- Guidance ---
    /// Begin steering reported bodies toward the active target point.
    /// Resets per-body control state.
    StartGuidance,
    /// Stop issuing velocity commands.
    StopGuidance,
}
