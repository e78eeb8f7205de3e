//! Pipeline constants and tuning parameters.

// --- Sensor gimbal ---

/// Minimum tilt in degrees (straight down).
pub const TILT_MIN_DEG: f64 = -90.0;

/// Maximum tilt in degrees (gimbal hard stop above the horizon).
pub const TILT_MAX_DEG: f64 = 45.0;

// --- Geometry ---

/// Magnitude guard before normalizing an aiming direction. Near-vertical
/// rays can degenerate under single-precision host data; below this the
/// vector is returned unnormalized rather than divided by ~zero.
pub const DIRECTION_EPSILON: f64 = 1e-3;

/// Below this separation (meters) the pan/tilt solution to a point is
/// indeterminate and the previous angles are kept.
pub const MIN_TARGET_SEPARATION_M: f64 = 1.0;

// --- Camera mount ---

/// Sensor mount offset forward of the vehicle reference point (meters),
/// applied along the vehicle's heading.
pub const MOUNT_FORWARD_M: f64 = 2.5;

/// Sensor mount offset below the vehicle reference point (meters).
pub const MOUNT_DOWN_M: f64 = 1.2;

// --- Surface classification ---

/// Surface heights within this band of zero elevation are candidate
/// water surfaces (meters).
pub const WATER_LEVEL_BAND_M: f64 = 10.0;

/// A probe point must be within this vertical distance of the surface
/// to classify the contact as water (meters).
pub const WATER_CONTACT_TOLERANCE_M: f64 = 5.0;

/// Below-surface tolerance for the linear marching search (meters).
pub const LINEAR_BELOW_TOLERANCE_M: f64 = 1.0;

// --- Search strategy selection ---

/// At or beyond this search range (meters) bisection is used instead of
/// linear marching.
pub const BISECTION_RANGE_CUTOFF_M: f64 = 5000.0;

/// Below this precision (meters) bisection is always used.
pub const BISECTION_PRECISION_CUTOFF_M: f64 = 1.0;

// --- Scheduling ---

/// Guidance control interval in seconds (20 Hz for smooth steering).
pub const GUIDANCE_INTERVAL_SECS: f64 = 0.05;

/// Lock refresh interval in seconds when not actively steering.
pub const LOCK_REFRESH_INTERVAL_SECS: f64 = 0.1;

/// Ticks shorter than this (seconds) skip control computation entirely
/// rather than dividing by a near-zero dt.
pub const MIN_DT_SECS: f64 = 1e-6;

// --- Speed keeping ---

/// Fractional deviation from cruise speed beyond which a guided body's
/// velocity is renormalized back to cruise (when not decelerating near
/// the target).
pub const CRUISE_DEVIATION_FRACTION: f64 = 0.25;
