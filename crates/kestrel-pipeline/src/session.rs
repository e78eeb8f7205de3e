//! Targeting session state: everything the pipeline mutates tick over
//! tick, separate from the collaborators that feed it.

use std::collections::HashMap;

use kestrel_core::types::{SensorAim, TargetPoint};

use crate::lock::LockController;
use crate::steer::BodyControl;

/// Mutable state of one targeting session.
#[derive(Debug, Default)]
pub struct TargetingSession {
    pub aim: SensorAim,
    pub lock: LockController,
    /// Most recently resolved target point. Survives unlock so guidance
    /// already in flight keeps its reference.
    pub target: Option<TargetPoint>,
    /// Per-slot guidance scratch, keyed by weapon slot index.
    pub bodies: HashMap<usize, BodyControl>,
    pub guidance_active: bool,
}

impl TargetingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all per-body control state. Called when a new target is
    /// designated and when guidance starts, so stale integrals and
    /// flight clocks never leak across engagements.
    pub fn reset_body_controls(&mut self) {
        self.bodies.clear();
    }

    /// Per-slot control state, created on first use.
    pub fn body_control(&mut self, slot: usize) -> &mut BodyControl {
        self.bodies.entry(slot).or_default()
    }
}
