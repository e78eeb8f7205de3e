//! Targeting-and-guidance pipeline for KESTREL.
//!
//! Owns the lock state machine, the per-body guidance loop, the
//! cooperative scheduler, and the `TargetingPipeline` orchestrator
//! that wires sensor, terrain, and weapon collaborators together each
//! tick. Completely headless and deterministic.

pub mod lock;
pub mod pipeline;
pub mod scheduler;
pub mod session;
pub mod steer;
pub mod traits;

pub use pipeline::TargetingPipeline;
