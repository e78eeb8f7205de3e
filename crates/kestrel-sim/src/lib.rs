//! Headless simulation harness for the KESTREL targeting pipeline.
//!
//! Provides scripted flight and weapon collaborators plus procedurally
//! generated terrain so whole engagements can run deterministically in
//! tests and offline analysis, with no host simulator attached.

pub mod platform;
pub mod scenario;

pub use platform::{SimFlightState, SimWeaponBay};
pub use scenario::{archipelago_terrain, rolling_terrain};
