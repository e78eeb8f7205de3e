//! Height probe abstraction over the host's terrain.

/// Result of probing the surface below/above a world point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightSample {
    /// Surface elevation at the probed x/z column (meters).
    pub surface_height: f64,
    /// Whether the host reports this surface as water.
    pub is_water: bool,
}

/// Single-point height probe, queried repeatedly by the surface
/// intersection solver.
///
/// Implementations must be pure with respect to the query: the solver
/// may probe the same provider many times per tick, from multiple
/// guidance contexts, without coordination. Returns `None` where the
/// host has no surface data (off the loaded area).
pub trait HeightProvider {
    fn query_height(&self, x: f64, y: f64, z: f64) -> Option<HeightSample>;
}

impl<T: HeightProvider + ?Sized> HeightProvider for &T {
    fn query_height(&self, x: f64, y: f64, z: f64) -> Option<HeightSample> {
        (**self).query_height(x, y, z)
    }
}
