//! Configuration records for the solver and the guidance loop.
//!
//! The guidance presets carry the tuning variants that were flight
//! tested on the host platform; they differ only in gains and
//! envelope, never in structure.

use serde::{Deserialize, Serialize};

use crate::enums::SurfaceFilter;
use crate::error::TargetingError;

/// Parameters for one surface intersection search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Closest range considered along the ray (meters).
    pub min_range: f64,
    /// Farthest range considered along the ray (meters).
    pub max_range: f64,
    /// Stop when the bracketing interval is narrower than this (meters).
    pub precision: f64,
    /// Hard cap on height probes per search.
    pub max_iterations: u32,
    pub filter: SurfaceFilter,
}

impl Default for SearchParams {
    /// General terrain designation: 100 m – 10 km at 2 m precision.
    fn default() -> Self {
        Self {
            min_range: 100.0,
            max_range: 10_000.0,
            precision: 2.0,
            max_iterations: 40,
            filter: SurfaceFilter::Any,
        }
    }
}

impl SearchParams {
    /// Maritime patrol profile: longer reach, coarser precision,
    /// water surfaces only.
    pub fn maritime() -> Self {
        Self {
            min_range: 500.0,
            max_range: 30_000.0,
            precision: 5.0,
            max_iterations: 50,
            filter: SurfaceFilter::WaterOnly,
        }
    }

    /// Reject parameter sets that would make a search meaningless
    /// before any probes are spent on them.
    pub fn validate(&self) -> Result<(), TargetingError> {
        if !(self.min_range.is_finite() && self.max_range.is_finite() && self.precision.is_finite())
        {
            return Err(TargetingError::InvalidInput("non-finite search range"));
        }
        if self.min_range < 0.0 || self.max_range <= self.min_range {
            return Err(TargetingError::InvalidInput("empty search interval"));
        }
        if self.precision <= 0.0 {
            return Err(TargetingError::InvalidInput("non-positive precision"));
        }
        if self.max_iterations == 0 {
            return Err(TargetingError::InvalidInput("zero iteration budget"));
        }
        Ok(())
    }
}

/// Gains and envelope for the guidance control loop.
///
/// One parameterized controller replaces the platform's historical
/// per-weapon variants; those survive as the presets below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidanceConfig {
    /// Proportional gain on the velocity error.
    pub kp: f64,
    /// Integral gain on the accumulated velocity error.
    pub ki: f64,
    /// Derivative gain on the velocity error rate.
    pub kd: f64,
    /// Distance-to-speed shaping gain (m/s per meter of separation).
    pub speed_gain: f64,
    /// Floor on the shaped approach speed (m/s).
    pub min_speed: f64,
    /// Ceiling on the shaped approach speed (m/s).
    pub max_speed: f64,
    /// Nominal cruise speed the body is renormalized toward when far
    /// from the target (m/s).
    pub cruise_speed: f64,
    /// Cap on the correction magnitude applied per tick (m/s).
    pub max_correction: f64,
    /// Velocity damping applied after correction, in (0, 1]. Bleeds off
    /// overshoot tick over tick.
    pub damping: f64,
    /// Distance below which the body is scored a hit (meters).
    pub hit_threshold: f64,
    /// Maximum distance from the launching vehicle before the body is
    /// declared lost (meters).
    pub max_range: f64,
    /// Flight-time budget per body (seconds).
    pub max_flight_time: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self::integrated()
    }
}

impl GuidanceConfig {
    /// Balanced response, extended envelope. The reference tuning.
    pub fn integrated() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            speed_gain: 0.08,
            min_speed: 15.0,
            max_speed: 120.0,
            cruise_speed: 120.0,
            max_correction: 15.0,
            damping: 0.85,
            hit_threshold: 50.0,
            max_range: 8_000.0,
            max_flight_time: 120.0,
        }
    }

    /// Gentle steering with integral/derivative smoothing for terminal
    /// precision work.
    pub fn precision() -> Self {
        Self {
            kp: 0.5,
            ki: 0.02,
            kd: 0.1,
            max_correction: 20.0,
            damping: 0.8,
            max_range: 5_000.0,
            ..Self::integrated()
        }
    }

    /// Aggressive proportional-only tuning for short-range snapshots.
    pub fn snap() -> Self {
        Self {
            kp: 1.2,
            max_correction: 20.0,
            damping: 0.8,
            max_range: 5_000.0,
            ..Self::integrated()
        }
    }
}
