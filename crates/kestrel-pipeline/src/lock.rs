//! Sensor lock state machine.
//!
//! Holds at most one frozen pointing direction or one designated world
//! point. Point lock recomputes the gimbal angles every tick from the
//! vehicle pose so the sensor stays on the point as the vehicle moves.

use tracing::debug;

use kestrel_core::constants::{MOUNT_DOWN_M, MOUNT_FORWARD_M};
use kestrel_core::enums::LockState;
use kestrel_core::error::TargetingError;
use kestrel_core::geometry::{angles_to_point, clamp_tilt_deg, wrap_pan_deg};
use kestrel_core::types::{Position, TargetPoint, VehiclePose};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Unlocked,
    Direction { pan_deg: f64, tilt_deg: f64 },
    Point { point: Position },
}

/// Lock controller for one sensor.
#[derive(Debug)]
pub struct LockController {
    mode: Mode,
    /// Angles returned on the previous tick, reused when the point
    /// solution is degenerate (target at the mount position).
    last_pan_deg: f64,
    last_tilt_deg: f64,
}

impl Default for LockController {
    fn default() -> Self {
        Self::new()
    }
}

impl LockController {
    pub fn new() -> Self {
        Self {
            mode: Mode::Unlocked,
            last_pan_deg: 0.0,
            last_tilt_deg: 0.0,
        }
    }

    pub fn state(&self) -> LockState {
        match self.mode {
            Mode::Unlocked => LockState::Unlocked,
            Mode::Direction { .. } => LockState::DirectionLocked,
            Mode::Point { .. } => LockState::PointLocked,
        }
    }

    /// World position of the sensor mount: the vehicle reference point
    /// offset forward along the heading and down by the mast drop.
    pub fn mount_position(pose: &VehiclePose) -> Position {
        let az = pose.heading_deg.to_radians();
        Position::new(
            pose.position.x + az.sin() * MOUNT_FORWARD_M,
            pose.position.y - MOUNT_DOWN_M,
            pose.position.z + az.cos() * MOUNT_FORWARD_M,
        )
    }

    /// Freeze the gimbal at the given angles, independent of vehicle
    /// motion.
    pub fn engage_direction(&mut self, pan_deg: f64, tilt_deg: f64) {
        let pan_deg = wrap_pan_deg(pan_deg);
        let tilt_deg = clamp_tilt_deg(tilt_deg);
        self.mode = Mode::Direction { pan_deg, tilt_deg };
        self.last_pan_deg = pan_deg;
        self.last_tilt_deg = tilt_deg;
        debug!(pan_deg, tilt_deg, "direction lock engaged");
    }

    /// Lock onto a resolved target point. Fails without changing state
    /// when no target has been designated.
    pub fn engage_point(&mut self, target: Option<&TargetPoint>) -> Result<(), TargetingError> {
        let target = target.ok_or(TargetingError::NoTargetAvailable)?;
        self.mode = Mode::Point {
            point: target.position,
        };
        debug!(position = ?target.position, "point lock engaged");
        Ok(())
    }

    /// Return to manual control. The designated target point is owned
    /// by the session and deliberately not discarded here; guidance
    /// may still be steering on it.
    pub fn disengage(&mut self) {
        self.mode = Mode::Unlocked;
        debug!("lock disengaged");
    }

    /// Per-tick update. Returns the gimbal angles the lock wants, or
    /// `None` when unlocked (manual input passes through untouched).
    pub fn tick(&mut self, pose: &VehiclePose) -> Option<(f64, f64)> {
        match self.mode {
            Mode::Unlocked => None,
            Mode::Direction { pan_deg, tilt_deg } => Some((pan_deg, tilt_deg)),
            Mode::Point { point } => {
                let mount = Self::mount_position(pose);
                match angles_to_point(&mount, &point, pose.heading_deg) {
                    Some((pan, tilt)) => {
                        self.last_pan_deg = pan;
                        self.last_tilt_deg = tilt;
                        Some((pan, tilt))
                    }
                    // Overflying the point: hold the previous solution.
                    None => Some((self.last_pan_deg, self.last_tilt_deg)),
                }
            }
        }
    }
}
