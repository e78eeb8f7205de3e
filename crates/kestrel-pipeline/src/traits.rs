//! Collaborator interfaces owned by the surrounding host code.
//!
//! The pipeline only ever reads vehicle pose and body kinematics
//! through these traits and writes velocity commands back through
//! them; it holds no other handle to the host.

use kestrel_core::types::{BodyState, VehiclePose, Velocity};

/// Source of the carrying vehicle's pose, queried once per tick.
pub trait FlightStateProvider {
    fn vehicle_pose(&self) -> VehiclePose;
}

/// Weapon bay access: per-slot kinematics plus velocity command sink.
///
/// Slots report an all-zero position when empty; that is the host's
/// long-standing convention. Use [`body_if_present`] to translate it
/// into an `Option` immediately; nothing inside the pipeline re-derives
/// presence from coordinates.
pub trait WeaponStateProvider {
    /// Number of slots currently reported by the host.
    fn active_body_count(&self) -> usize;
    /// Raw kinematics for a slot (all-zero position = absent).
    fn body_state(&self, slot: usize) -> BodyState;
    /// Apply a velocity command to a slot. Ignored for absent bodies.
    fn set_body_velocity(&mut self, slot: usize, velocity: Velocity);
}

/// Translate the host's all-zero-position sentinel into an explicit
/// presence value at the boundary.
pub fn body_if_present(state: BodyState) -> Option<BodyState> {
    let p = state.position;
    if p.x == 0.0 && p.y == 0.0 && p.z == 0.0 {
        None
    } else {
        Some(state)
    }
}
