//! Fundamental geometric and platform types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{TILT_MAX_DEG, TILT_MIN_DEG};
use crate::enums::{SearchMethod, SurfaceKind};
use crate::geometry::{clamp_tilt_deg, wrap_pan_deg};

/// 3D position in the platform's local Cartesian frame (meters).
/// x = East, y = Up (altitude). Azimuth 0° points along +z and grows
/// toward +x, matching the host simulator's local coordinate convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in the local frame (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Slant range to another position in meters (3D distance).
    /// This is the distance convention used everywhere in the pipeline.
    pub fn range_to(&self, other: &Position) -> f64 {
        (self.to_dvec3() - other.to_dvec3()).length()
    }

    /// Horizontal range in the x/z ground plane (ignoring altitude).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        self.to_dvec3().length()
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Vehicle pose snapshot, copied by value from the flight state
/// collaborator once per tick. The core never mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehiclePose {
    pub position: Position,
    /// True heading in degrees (0 = azimuth reference, clockwise).
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
}

impl VehiclePose {
    pub fn new(position: Position, heading_deg: f64, pitch_deg: f64, roll_deg: f64) -> Self {
        Self {
            position,
            heading_deg,
            pitch_deg,
            roll_deg,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.heading_deg.is_finite()
            && self.pitch_deg.is_finite()
            && self.roll_deg.is_finite()
    }
}

/// Sensor gimbal angles relative to the carrying vehicle.
///
/// Pan is wrapped to [-180, 180] relative to vehicle heading; tilt is
/// clamped to the gimbal's physical limits (negative = downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorAim {
    pan_deg: f64,
    tilt_deg: f64,
}

impl SensorAim {
    /// Construct with wrapping and clamping applied.
    pub fn new(pan_deg: f64, tilt_deg: f64) -> Self {
        Self {
            pan_deg: wrap_pan_deg(pan_deg),
            tilt_deg: clamp_tilt_deg(tilt_deg),
        }
    }

    pub fn pan_deg(&self) -> f64 {
        self.pan_deg
    }

    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    pub fn set(&mut self, pan_deg: f64, tilt_deg: f64) {
        self.pan_deg = wrap_pan_deg(pan_deg);
        self.tilt_deg = clamp_tilt_deg(tilt_deg);
    }

    pub fn is_finite(&self) -> bool {
        self.pan_deg.is_finite() && self.tilt_deg.is_finite()
    }

    /// Gimbal tilt limits in degrees: (min, max).
    pub fn tilt_limits() -> (f64, f64) {
        (TILT_MIN_DEG, TILT_MAX_DEG)
    }
}

/// A resolved world-space target point.
///
/// Created only by the surface intersection solver; represented as
/// `Option<TargetPoint>` everywhere so a target is either absent or
/// fully valid, never partially populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub position: Position,
    /// Distance from the resolving ray's origin (meters).
    pub range: f64,
    pub kind: SurfaceKind,
    /// Which search strategy produced this point.
    pub method: SearchMethod,
    /// Height probes consumed by the search.
    pub iterations: u32,
}

/// Raw per-slot body kinematics as reported by the weapon state
/// collaborator. An all-zero position means "no body in this slot"
/// (the collaborator's existing convention, translated to
/// `Option<BodyState>` at the trait boundary and nowhere else).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Position,
    pub velocity: Velocity,
}

impl BodyState {
    pub fn new(position: Position, velocity: Velocity) -> Self {
        Self { position, velocity }
    }
}
