//! Per-body guidance control loop.
//!
//! Each guided body carries a [`BodyControl`] with its PID scratch state
//! and flight clock; the [`GuidanceController`] is stateless apart from
//! its configuration and produces one [`SteerResult`] per body per
//! control tick.

use glam::DVec3;
use tracing::{debug, warn};

use kestrel_core::config::GuidanceConfig;
use kestrel_core::constants::{CRUISE_DEVIATION_FRACTION, MIN_DT_SECS};
use kestrel_core::enums::BodyOutcome;
use kestrel_core::types::{BodyState, Position, TargetPoint, Velocity};

/// Mutable per-body controller state. Reset when a new target is
/// designated or guidance is restarted.
#[derive(Debug, Clone, Default)]
pub struct BodyControl {
    integral: DVec3,
    prev_error: Option<DVec3>,
    flight_time_secs: f64,
    outcome: Option<BodyOutcome>,
}

impl BodyControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flight_time_secs(&self) -> f64 {
        self.flight_time_secs
    }

    pub fn outcome(&self) -> Option<BodyOutcome> {
        self.outcome
    }

    /// Drop accumulated PID scratch without touching the flight clock
    /// or outcome. Used after a non-finite kinematics read.
    fn reset_scratch(&mut self) {
        self.integral = DVec3::ZERO;
        self.prev_error = None;
    }
}

/// Outcome of one steering evaluation for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteerResult {
    /// Apply this velocity to the body.
    Command(Velocity),
    /// Nothing to do this tick (terminal body, degenerate dt, or bad
    /// kinematics).
    NoCommand,
    /// The body just reached a terminal state; no further commands.
    Terminal(BodyOutcome),
}

/// Velocity-space PID steering toward a fixed target point.
#[derive(Debug, Clone)]
pub struct GuidanceController {
    config: GuidanceConfig,
}

impl Default for GuidanceController {
    fn default() -> Self {
        Self::new(GuidanceConfig::default())
    }
}

impl GuidanceController {
    pub fn new(config: GuidanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Evaluate one control step for one body.
    ///
    /// `launch` is the position of the launching vehicle, used for the
    /// lost-beyond-envelope check. Terminal outcomes latch: once set,
    /// every later call returns `NoCommand`.
    pub fn steer(
        &self,
        ctl: &mut BodyControl,
        body: &BodyState,
        target: &TargetPoint,
        launch: &Position,
        dt: f64,
    ) -> SteerResult {
        if ctl.outcome.is_some() {
            return SteerResult::NoCommand;
        }
        if dt <= MIN_DT_SECS {
            return SteerResult::NoCommand;
        }
        if !body.position.is_finite() || !body.velocity.is_finite() {
            warn!(position = ?body.position, "non-finite body kinematics, skipping step");
            ctl.reset_scratch();
            return SteerResult::NoCommand;
        }

        ctl.flight_time_secs += dt;

        let dist = body.position.range_to(&target.position);
        if dist < self.config.hit_threshold {
            debug!(dist, "body within hit threshold");
            ctl.outcome = Some(BodyOutcome::Hit);
            return SteerResult::Terminal(BodyOutcome::Hit);
        }
        if body.position.range_to(launch) > self.config.max_range {
            ctl.outcome = Some(BodyOutcome::Lost);
            return SteerResult::Terminal(BodyOutcome::Lost);
        }
        if ctl.flight_time_secs > self.config.max_flight_time {
            ctl.outcome = Some(BodyOutcome::TimedOut);
            return SteerResult::Terminal(BodyOutcome::TimedOut);
        }

        // Shaped approach speed: proportional to separation, clamped to
        // the envelope so the body decelerates into the target.
        let shaped = dist * self.config.speed_gain;
        let desired_speed = shaped.clamp(self.config.min_speed, self.config.max_speed);
        let to_target = (target.position.to_dvec3() - body.position.to_dvec3()) / dist;
        let desired_vel = to_target * desired_speed;

        let v = body.velocity.to_dvec3();
        let error = desired_vel - v;

        ctl.integral += error * dt;
        let derivative = match ctl.prev_error {
            Some(prev) => (error - prev) / dt,
            None => DVec3::ZERO,
        };
        ctl.prev_error = Some(error);

        let mut correction = error * self.config.kp
            + ctl.integral * self.config.ki
            + derivative * self.config.kd;
        let mag = correction.length();
        if mag > self.config.max_correction {
            correction *= self.config.max_correction / mag;
        }

        let mut next = (v + correction) * self.config.damping;

        // Far from the target the shaped speed saturates; hold the body
        // near cruise instead of letting damping bleed it down.
        if shaped >= self.config.max_speed {
            let speed = next.length();
            let cruise = self.config.cruise_speed;
            if speed > 0.0 && (speed - cruise).abs() > CRUISE_DEVIATION_FRACTION * cruise {
                next *= cruise / speed;
            }
        }

        if !next.is_finite() {
            warn!("guidance produced non-finite velocity, dropping step");
            ctl.reset_scratch();
            return SteerResult::NoCommand;
        }

        SteerResult::Command(Velocity::from_dvec3(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::enums::{SearchMethod, SurfaceKind};

    fn target_at(x: f64, y: f64, z: f64) -> TargetPoint {
        TargetPoint {
            position: Position::new(x, y, z),
            range: 1000.0,
            kind: SurfaceKind::Land,
            method: SearchMethod::Bisection,
            iterations: 10,
        }
    }

    fn controller() -> GuidanceController {
        GuidanceController::new(GuidanceConfig::integrated())
    }

    #[test]
    fn test_hit_when_within_threshold() {
        let guidance = controller();
        let mut ctl = BodyControl::new();
        let target = target_at(0.0, 0.0, 1000.0);
        let body = BodyState::new(
            Position::new(0.0, 10.0, 970.0),
            Velocity::new(0.0, 0.0, 50.0),
        );
        let launch = Position::new(0.0, 500.0, 0.0);

        let result = guidance.steer(&mut ctl, &body, &target, &launch, 0.05);
        assert_eq!(result, SteerResult::Terminal(BodyOutcome::Hit));
        assert_eq!(ctl.outcome(), Some(BodyOutcome::Hit));

        // Terminal latches: later steps are inert.
        let again = guidance.steer(&mut ctl, &body, &target, &launch, 0.05);
        assert_eq!(again, SteerResult::NoCommand);
    }

    #[test]
    fn test_lost_beyond_max_range() {
        let guidance = controller();
        let mut ctl = BodyControl::new();
        let target = target_at(0.0, 0.0, 20_000.0);
        let body = BodyState::new(
            Position::new(0.0, 300.0, 9_000.0),
            Velocity::new(0.0, 0.0, 100.0),
        );
        let launch = Position::new(0.0, 500.0, 0.0);

        let result = guidance.steer(&mut ctl, &body, &target, &launch, 0.05);
        assert_eq!(result, SteerResult::Terminal(BodyOutcome::Lost));

        // Reported exactly once, then silence.
        let again = guidance.steer(&mut ctl, &body, &target, &launch, 0.05);
        assert_eq!(again, SteerResult::NoCommand);
    }

    #[test]
    fn test_timeout_after_flight_budget() {
        let guidance = controller();
        let mut ctl = BodyControl::new();
        let target = target_at(0.0, 0.0, 5_000.0);
        let launch = Position::new(0.0, 500.0, 0.0);
        let body = BodyState::new(
            Position::new(0.0, 400.0, 1_000.0),
            Velocity::new(0.0, 0.0, 0.1),
        );

        let mut last = SteerResult::NoCommand;
        // 120s budget at 20 Hz plus slack.
        for _ in 0..2_500 {
            last = guidance.steer(&mut ctl, &body, &target, &launch, 0.05);
            if matches!(last, SteerResult::Terminal(_)) {
                break;
            }
        }
        assert_eq!(last, SteerResult::Terminal(BodyOutcome::TimedOut));
    }

    #[test]
    fn test_degenerate_dt_is_skipped() {
        let guidance = controller();
        let mut ctl = BodyControl::new();
        let target = target_at(0.0, 0.0, 2_000.0);
        let launch = Position::default();
        let body = BodyState::new(
            Position::new(0.0, 300.0, 100.0),
            Velocity::new(0.0, 0.0, 80.0),
        );

        assert_eq!(
            guidance.steer(&mut ctl, &body, &target, &launch, 0.0),
            SteerResult::NoCommand
        );
        assert_eq!(ctl.flight_time_secs(), 0.0);
    }

    #[test]
    fn test_correction_magnitude_is_capped() {
        let guidance = controller();
        let mut ctl = BodyControl::new();
        // Near-target geometry so the shaped speed stays inside the
        // envelope and no cruise renormalization applies.
        let target = target_at(0.0, 0.0, 1_500.0);
        let launch = Position::default();
        // Velocity wildly off: straight away from the target.
        let body = BodyState::new(
            Position::new(0.0, 300.0, 1_000.0),
            Velocity::new(0.0, 0.0, -120.0),
        );

        let SteerResult::Command(next) =
            guidance.steer(&mut ctl, &body, &target, &launch, 0.05)
        else {
            panic!("expected a velocity command");
        };
        let dv = (next.to_dvec3() - body.velocity.to_dvec3() * guidance.config().damping)
            .length();
        // Correction capped at max_correction before damping.
        let cap = guidance.config().max_correction * guidance.config().damping;
        assert!(dv <= cap + 1e-9, "delta {dv} exceeds cap {cap}");
    }

    #[test]
    fn test_converges_toward_target_point() {
        let guidance = controller();
        let mut ctl = BodyControl::new();
        let target = target_at(200.0, 0.0, 3_000.0);
        let launch = Position::new(0.0, 500.0, 0.0);
        let dt = 0.05;

        let mut position = Position::new(0.0, 480.0, 50.0);
        let mut velocity = Velocity::new(0.0, 0.0, 60.0);
        let mut hit = false;

        for _ in 0..4_000 {
            let body = BodyState::new(position, velocity);
            match guidance.steer(&mut ctl, &body, &target, &launch, dt) {
                SteerResult::Command(v) => velocity = v,
                SteerResult::Terminal(BodyOutcome::Hit) => {
                    hit = true;
                    break;
                }
                SteerResult::Terminal(other) => panic!("unexpected outcome {other:?}"),
                SteerResult::NoCommand => {}
            }
            position = Position::from_dvec3(
                position.to_dvec3() + velocity.to_dvec3() * dt,
            );
        }
        assert!(hit, "body never reached the target");
    }

    #[test]
    fn test_approach_speed_decays_near_target() {
        let guidance = controller();
        let cfg = *guidance.config();
        let mut ctl = BodyControl::new();
        let target = target_at(0.0, 0.0, 0.0);
        let launch = Position::default();
        let dt = 0.05;

        // Start just outside the hit threshold band; the shaped speed
        // there is well under max_speed.
        let dist = 400.0;
        let body = BodyState::new(
            Position::new(0.0, 0.0, dist),
            Velocity::new(0.0, 0.0, -cfg.max_speed),
        );
        let SteerResult::Command(v) = guidance.steer(&mut ctl, &body, &target, &launch, dt)
        else {
            panic!("expected a command");
        };
        // Shaped speed at 400m is 32 m/s; the correction must be
        // braking, not accelerating.
        assert!(v.speed() < cfg.max_speed, "no deceleration near target");
    }

    #[test]
    fn test_cruise_renormalization_far_out() {
        let guidance = controller();
        let cfg = *guidance.config();
        let mut ctl = BodyControl::new();
        // Far target: shaped speed saturates at max_speed.
        let target = target_at(0.0, 0.0, 6_000.0);
        let launch = Position::default();

        // Body moving toward the target but well under cruise.
        let body = BodyState::new(
            Position::new(0.0, 300.0, 500.0),
            Velocity::new(0.0, 0.0, 40.0),
        );
        let SteerResult::Command(v) = guidance.steer(&mut ctl, &body, &target, &launch, 0.05)
        else {
            panic!("expected a command");
        };
        let deviation = (v.speed() - cfg.cruise_speed).abs() / cfg.cruise_speed;
        assert!(
            deviation <= CRUISE_DEVIATION_FRACTION + 1e-9,
            "speed {} too far from cruise {}",
            v.speed(),
            cfg.cruise_speed
        );
    }

    #[test]
    fn test_non_finite_kinematics_resets_scratch() {
        let guidance = GuidanceController::new(GuidanceConfig::precision());
        let mut ctl = BodyControl::new();
        let target = target_at(0.0, 0.0, 2_000.0);
        let launch = Position::default();

        // Prime the integral with a normal step.
        let good = BodyState::new(
            Position::new(0.0, 300.0, 100.0),
            Velocity::new(0.0, 0.0, 50.0),
        );
        guidance.steer(&mut ctl, &good, &target, &launch, 0.05);
        assert!(ctl.prev_error.is_some());

        let bad = BodyState::new(
            Position::new(f64::NAN, 300.0, 100.0),
            Velocity::new(0.0, 0.0, 50.0),
        );
        assert_eq!(
            guidance.steer(&mut ctl, &bad, &target, &launch, 0.05),
            SteerResult::NoCommand
        );
        assert!(ctl.prev_error.is_none());
        assert_eq!(ctl.integral, DVec3::ZERO);
    }
}
