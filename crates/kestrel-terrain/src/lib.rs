//! Surface intersection for the KESTREL targeting pipeline.
//!
//! Provides the `HeightProvider` probe abstraction, the bisection and
//! linear-marching ray solvers that turn a sensor ray into a world
//! target point, and a synthetic `HeightField` grid for tests and the
//! simulation harness.

pub mod heightfield;
pub mod provider;
pub mod solver;

pub use heightfield::HeightField;
pub use provider::{HeightProvider, HeightSample};
pub use solver::{SolverStats, SurfaceSolver};
