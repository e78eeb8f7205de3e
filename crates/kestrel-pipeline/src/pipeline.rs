//! Pipeline orchestrator: commands in, snapshot out, once per host tick.
//!
//! Tick order is fixed: read pose, drain queued commands, refresh the
//! lock-driven aim, steer bodies, publish a snapshot. The lock refresh
//! and the guidance loop run on their own cadences inside the host
//! tick, driven by the cooperative scheduler.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use kestrel_core::commands::OperatorCommand;
use kestrel_core::config::GuidanceConfig;
use kestrel_core::constants::{GUIDANCE_INTERVAL_SECS, LOCK_REFRESH_INTERVAL_SECS};
use kestrel_core::enums::LockState;
use kestrel_core::error::TargetingError;
use kestrel_core::geometry::direction_from_angles;
use kestrel_core::state::{BodyView, SessionSnapshot};
use kestrel_core::types::VehiclePose;
use kestrel_terrain::{HeightProvider, SurfaceSolver};

use crate::lock::LockController;
use crate::scheduler::{Cadence, Scheduler};
use crate::session::TargetingSession;
use crate::steer::{GuidanceController, SteerResult};
use crate::traits::{body_if_present, FlightStateProvider, WeaponStateProvider};

/// Work phases a tick can owe, produced by the scheduler with the time
/// actually elapsed since each phase last ran.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    RefreshLock(f64),
    Guidance(f64),
}

/// The targeting pipeline, generic over its three collaborators.
pub struct TargetingPipeline<F, W, H> {
    flight: F,
    weapons: W,
    terrain: H,
    solver: SurfaceSolver,
    guidance: GuidanceController,
    session: TargetingSession,
    commands: VecDeque<OperatorCommand>,
    scheduler: Scheduler<Vec<Phase>>,
    tick: u64,
    elapsed_secs: f64,
}

impl<F, W, H> TargetingPipeline<F, W, H>
where
    F: FlightStateProvider,
    W: WeaponStateProvider,
    H: HeightProvider,
{
    pub fn new(flight: F, weapons: W, terrain: H, guidance_config: GuidanceConfig) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.register(LOCK_REFRESH_INTERVAL_SECS, |due: &mut Vec<Phase>, elapsed| {
            due.push(Phase::RefreshLock(elapsed));
            Cadence::After(LOCK_REFRESH_INTERVAL_SECS)
        });
        scheduler.register(GUIDANCE_INTERVAL_SECS, |due: &mut Vec<Phase>, elapsed| {
            due.push(Phase::Guidance(elapsed));
            Cadence::After(GUIDANCE_INTERVAL_SECS)
        });

        Self {
            flight,
            weapons,
            terrain,
            solver: SurfaceSolver::new(),
            guidance: GuidanceController::new(guidance_config),
            session: TargetingSession::new(),
            commands: VecDeque::new(),
            scheduler,
            tick: 0,
            elapsed_secs: 0.0,
        }
    }

    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.commands.push_back(command);
    }

    pub fn session(&self) -> &TargetingSession {
        &self.session
    }

    pub fn solver(&self) -> &SurfaceSolver {
        &self.solver
    }

    pub fn flight_mut(&mut self) -> &mut F {
        &mut self.flight
    }

    pub fn weapons_mut(&mut self) -> &mut W {
        &mut self.weapons
    }

    /// Advance the pipeline by one host tick of `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> SessionSnapshot {
        self.tick += 1;
        self.elapsed_secs += dt;

        let pose = self.flight.vehicle_pose();
        if !pose.is_finite() {
            warn!(tick = self.tick, "non-finite vehicle pose, skipping tick");
            return self.snapshot();
        }

        while let Some(command) = self.commands.pop_front() {
            self.apply_command(command, &pose);
        }

        let mut due = Vec::new();
        self.scheduler.advance(&mut due, dt);
        for phase in due {
            match phase {
                Phase::RefreshLock(_) => self.refresh_aim(&pose),
                Phase::Guidance(elapsed) => self.run_guidance(&pose, elapsed),
            }
        }

        self.snapshot()
    }

    fn apply_command(&mut self, command: OperatorCommand, pose: &VehiclePose) {
        match command {
            OperatorCommand::SetSensorAim { pan_deg, tilt_deg } => {
                // Manual slew only while the sensor is free.
                if self.session.lock.state() == LockState::Unlocked {
                    self.session.aim.set(pan_deg, tilt_deg);
                } else {
                    debug!("manual slew ignored while locked");
                }
            }
            OperatorCommand::Designate { params } => {
                if let Err(err) = params.validate() {
                    warn!(%err, "designation refused");
                    return;
                }
                let origin = LockController::mount_position(pose);
                let dir = direction_from_angles(
                    pose.heading_deg,
                    self.session.aim.pan_deg(),
                    self.session.aim.tilt_deg(),
                );
                match self.solver.resolve(&self.terrain, origin, dir, &params) {
                    Some(target) => {
                        info!(
                            position = ?target.position,
                            range = target.range,
                            kind = ?target.kind,
                            "target designated"
                        );
                        self.session.target = Some(target);
                        self.session.reset_body_controls();
                    }
                    // Previous target (if any) stays valid.
                    None => warn!(
                        error = %TargetingError::SurfaceNotFound,
                        "designation found no surface along the sensor ray"
                    ),
                }
            }
            OperatorCommand::LockDirection => {
                self.session
                    .lock
                    .engage_direction(self.session.aim.pan_deg(), self.session.aim.tilt_deg());
            }
            OperatorCommand::LockPoint => {
                match self.session.lock.engage_point(self.session.target.as_ref()) {
                    Ok(()) => self.refresh_aim(pose),
                    Err(err) => warn!(%err, "point lock refused"),
                }
            }
            OperatorCommand::Unlock => {
                self.session.lock.disengage();
            }
            OperatorCommand::StartGuidance => {
                if self.session.target.is_some() {
                    self.session.reset_body_controls();
                    self.session.guidance_active = true;
                    info!("guidance started");
                } else {
                    warn!("guidance refused: no target designated");
                }
            }
            OperatorCommand::StopGuidance => {
                self.session.guidance_active = false;
                info!("guidance stopped");
            }
        }
    }

    /// Let the active lock drive the sensor angles.
    fn refresh_aim(&mut self, pose: &VehiclePose) {
        if let Some((pan, tilt)) = self.session.lock.tick(pose) {
            self.session.aim.set(pan, tilt);
        }
    }

    fn run_guidance(&mut self, pose: &VehiclePose, dt: f64) {
        if !self.session.guidance_active {
            return;
        }
        let Some(target) = self.session.target else {
            return;
        };

        let launch = pose.position;
        for slot in 0..self.weapons.active_body_count() {
            let Some(body) = body_if_present(self.weapons.body_state(slot)) else {
                continue;
            };
            let ctl = self.session.body_control(slot);
            match self.guidance.steer(ctl, &body, &target, &launch, dt) {
                SteerResult::Command(velocity) => {
                    self.weapons.set_body_velocity(slot, velocity);
                }
                SteerResult::Terminal(outcome) => {
                    info!(slot, ?outcome, "body reached terminal state");
                }
                SteerResult::NoCommand => {}
            }
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        let target = self.session.target;
        let mut bodies = Vec::with_capacity(self.weapons.active_body_count());
        for slot in 0..self.weapons.active_body_count() {
            let Some(body) = body_if_present(self.weapons.body_state(slot)) else {
                continue;
            };
            let ctl = self.session.bodies.get(&slot);
            bodies.push(BodyView {
                slot,
                position: body.position,
                velocity: body.velocity,
                distance_to_target: target
                    .map(|t| body.position.range_to(&t.position)),
                flight_time_secs: ctl.map(|c| c.flight_time_secs()).unwrap_or(0.0),
                outcome: ctl.and_then(|c| c.outcome()),
            });
        }

        SessionSnapshot {
            tick: self.tick,
            elapsed_secs: self.elapsed_secs,
            lock: self.session.lock.state(),
            aim: self.session.aim,
            target,
            guidance_active: self.session.guidance_active,
            bodies,
        }
    }
}
