//! Scripted stand-ins for the host flight and weapon collaborators.

use kestrel_core::types::{BodyState, Position, VehiclePose, Velocity};
use kestrel_pipeline::traits::{FlightStateProvider, WeaponStateProvider};
use tracing::debug;

/// Vehicle flying a fixed velocity with a fixed attitude.
#[derive(Debug, Clone)]
pub struct SimFlightState {
    pose: VehiclePose,
    velocity: Velocity,
}

impl SimFlightState {
    pub fn new(pose: VehiclePose, velocity: Velocity) -> Self {
        Self { pose, velocity }
    }

    /// Hovering vehicle at a fixed position and heading.
    pub fn hovering(position: Position, heading_deg: f64) -> Self {
        Self::new(
            VehiclePose::new(position, heading_deg, 0.0, 0.0),
            Velocity::default(),
        )
    }

    pub fn pose(&self) -> VehiclePose {
        self.pose
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    /// Advance the scripted flight path by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.pose.position = Position::from_dvec3(
            self.pose.position.to_dvec3() + self.velocity.to_dvec3() * dt,
        );
    }
}

impl FlightStateProvider for SimFlightState {
    fn vehicle_pose(&self) -> VehiclePose {
        self.pose
    }
}

/// Fixed-slot weapon bay with straight-line body kinematics.
///
/// Reports the host convention at the trait boundary: empty slots read
/// back as an all-zero [`BodyState`]. A live body parked at the exact
/// origin would be indistinguishable from an empty slot, so launches
/// near the origin are nudged off it.
#[derive(Debug, Clone, Default)]
pub struct SimWeaponBay {
    slots: Vec<Option<BodyState>>,
}

impl SimWeaponBay {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    /// Place a body in the first free slot. Returns the slot index, or
    /// `None` when the bay is full.
    pub fn launch(&mut self, mut position: Position, velocity: Velocity) -> Option<usize> {
        if position.x == 0.0 && position.y == 0.0 && position.z == 0.0 {
            position.y = 0.001;
        }
        let slot = self.slots.iter().position(|s| s.is_none())?;
        self.slots[slot] = Some(BodyState::new(position, velocity));
        debug!(slot, ?position, "body launched");
        Some(slot)
    }

    pub fn clear_slot(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = None;
        }
    }

    /// Straight-line integration of every live body.
    pub fn integrate(&mut self, dt: f64) {
        for body in self.slots.iter_mut().flatten() {
            body.position = Position::from_dvec3(
                body.position.to_dvec3() + body.velocity.to_dvec3() * dt,
            );
        }
    }
}

impl WeaponStateProvider for SimWeaponBay {
    fn active_body_count(&self) -> usize {
        self.slots.len()
    }

    fn body_state(&self, slot: usize) -> BodyState {
        self.slots
            .get(slot)
            .copied()
            .flatten()
            .unwrap_or_default()
    }

    fn set_body_velocity(&mut self, slot: usize, velocity: Velocity) {
        if let Some(Some(body)) = self.slots.get_mut(slot) {
            body.velocity = velocity;
        }
    }
}
