//! Ray-versus-surface intersection search.
//!
//! Two strategies over the scalar range parameter of an aiming ray:
//! bounded bisection (always correct, preferred for long range or
//! sub-meter precision) and fixed-step linear marching (cheaper at
//! short range). `resolve` picks adaptively; both are bounded by the
//! caller's iteration budget and never loop past it.

use glam::DVec3;
use tracing::debug;

use kestrel_core::config::SearchParams;
use kestrel_core::constants::{
    BISECTION_PRECISION_CUTOFF_M, BISECTION_RANGE_CUTOFF_M, LINEAR_BELOW_TOLERANCE_M,
    WATER_CONTACT_TOLERANCE_M, WATER_LEVEL_BAND_M,
};
use kestrel_core::enums::{SearchMethod, SurfaceFilter, SurfaceKind};
use kestrel_core::types::{Position, TargetPoint};

use crate::provider::{HeightProvider, HeightSample};

/// Running counters for solver usage, kept per solver instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub searches: u32,
    pub finds: u32,
    pub bisection_uses: u32,
    pub linear_uses: u32,
}

/// Surface intersection solver. Stateless apart from usage counters,
/// so a single instance may serve every designation in a session.
#[derive(Debug, Default)]
pub struct SurfaceSolver {
    stats: SolverStats,
}

/// Water heuristic: the surface sits within a small band of zero
/// elevation and the probe point is close to it vertically. Combined
/// with the provider's own water flag before classifying.
fn near_water_surface(surface_height: f64, probe_y: f64) -> bool {
    surface_height.abs() <= WATER_LEVEL_BAND_M
        && (probe_y - surface_height).abs() <= WATER_CONTACT_TOLERANCE_M
}

fn classify(sample: &HeightSample, probe_y: f64) -> SurfaceKind {
    if sample.is_water && near_water_surface(sample.surface_height, probe_y) {
        SurfaceKind::Water
    } else {
        SurfaceKind::Land
    }
}

/// Filter check folded into the search predicate. Uses the provider's
/// own water flag so probes far beneath a water surface still bracket;
/// the contact-tolerance heuristic only applies to the final
/// classification.
fn filter_accepts(filter: SurfaceFilter, sample: &HeightSample) -> bool {
    match filter {
        SurfaceFilter::Any => true,
        SurfaceFilter::WaterOnly => sample.is_water,
    }
}

impl SurfaceSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Resolve the first surface intersection along `origin + t * dir`,
    /// picking the search strategy adaptively: bisection for long or
    /// high-precision searches, linear marching otherwise.
    pub fn resolve<P: HeightProvider>(
        &mut self,
        provider: &P,
        origin: Position,
        dir: DVec3,
        params: &SearchParams,
    ) -> Option<TargetPoint> {
        let precise = params.max_range >= BISECTION_RANGE_CUTOFF_M
            || params.precision < BISECTION_PRECISION_CUTOFF_M;
        if precise {
            self.resolve_bisection(provider, origin, dir, params)
        } else {
            self.resolve_linear(provider, origin, dir, params)
        }
    }

    /// Binary search over the range parameter. The invariant is that
    /// the ray is above the (filter-matching) surface at `low`;
    /// anything else (below surface, filter mismatch, no surface
    /// data) drives the bracket outward or inward accordingly.
    pub fn resolve_bisection<P: HeightProvider>(
        &mut self,
        provider: &P,
        origin: Position,
        dir: DVec3,
        params: &SearchParams,
    ) -> Option<TargetPoint> {
        self.stats.searches += 1;
        self.stats.bisection_uses += 1;

        let o = origin.to_dvec3();
        let mut low = params.min_range;
        let mut high = params.max_range;
        let mut iterations = 0u32;
        let mut bracketed = false;

        while high - low > params.precision && iterations < params.max_iterations {
            let mid = 0.5 * (low + high);
            let probe = o + dir * mid;
            iterations += 1;

            match provider.query_height(probe.x, probe.y, probe.z) {
                Some(sample) => {
                    if filter_accepts(params.filter, &sample) && probe.y < sample.surface_height {
                        // Under a matching surface: pull the far bracket in.
                        high = mid;
                        bracketed = true;
                    } else {
                        // Above the surface, or the wrong surface kind
                        // for this search: keep going outward.
                        low = mid;
                    }
                }
                None => {
                    // No surface data: go further out.
                    low = mid;
                }
            }
        }

        if !bracketed {
            debug!(iterations, "bisection search found no surface crossing");
            return None;
        }

        let range = 0.5 * (low + high);
        let hit = o + dir * range;
        let position = Position::from_dvec3(hit);
        let sample = provider.query_height(hit.x, hit.y, hit.z)?;
        let kind = classify(&sample, hit.y);

        self.stats.finds += 1;
        debug!(range, iterations, ?kind, "surface resolved by bisection");

        Some(TargetPoint {
            position,
            range,
            kind,
            method: SearchMethod::Bisection,
            iterations,
        })
    }

    /// Fixed-step marching from `min_range` outward. Steps are twice
    /// the requested precision; a contact is any probe at or below the
    /// surface within a 1 m tolerance. The returned position is snapped
    /// to the sampled surface height.
    pub fn resolve_linear<P: HeightProvider>(
        &mut self,
        provider: &P,
        origin: Position,
        dir: DVec3,
        params: &SearchParams,
    ) -> Option<TargetPoint> {
        self.stats.searches += 1;
        self.stats.linear_uses += 1;

        let o = origin.to_dvec3();
        let step = params.precision * 2.0;
        let mut range = params.min_range;
        let mut iterations = 0u32;

        while range <= params.max_range && iterations < params.max_iterations {
            let probe = o + dir * range;
            iterations += 1;

            if let Some(sample) = provider.query_height(probe.x, probe.y, probe.z) {
                let below = probe.y <= sample.surface_height + LINEAR_BELOW_TOLERANCE_M;
                if below && filter_accepts(params.filter, &sample) {
                    let kind = classify(&sample, probe.y);
                    let position = Position::new(probe.x, sample.surface_height, probe.z);
                    self.stats.finds += 1;
                    debug!(range, iterations, ?kind, "surface resolved by marching");
                    return Some(TargetPoint {
                        position,
                        range,
                        kind,
                        method: SearchMethod::Linear,
                        iterations,
                    });
                }
            }

            range += step;
        }

        debug!(iterations, "linear search found no surface contact");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use kestrel_core::geometry::direction_from_angles;

    /// Infinite flat surface at a fixed height.
    struct FlatProvider {
        height: f64,
        water: bool,
    }

    impl HeightProvider for FlatProvider {
        fn query_height(&self, _x: f64, _y: f64, _z: f64) -> Option<HeightSample> {
            Some(HeightSample {
                surface_height: self.height,
                is_water: self.water,
            })
        }
    }

    /// Provider that never reports a surface, counting probes.
    struct NoHitProvider {
        probes: Cell<u32>,
    }

    impl HeightProvider for NoHitProvider {
        fn query_height(&self, _x: f64, _y: f64, _z: f64) -> Option<HeightSample> {
            self.probes.set(self.probes.get() + 1);
            None
        }
    }

    fn straight_down() -> DVec3 {
        DVec3::new(0.0, -1.0, 0.0)
    }

    #[test]
    fn test_straight_down_resolves_flat_surface() {
        let provider = FlatProvider {
            height: 250.0,
            water: false,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 1250.0, 0.0);
        let params = SearchParams::default();

        let hit = solver
            .resolve_bisection(&provider, origin, straight_down(), &params)
            .expect("flat surface must resolve");

        assert!(
            (hit.range - 1000.0).abs() <= params.precision,
            "range should be ~1000m, got {}",
            hit.range
        );
        assert!((hit.position.y - 250.0).abs() <= params.precision);
        assert_eq!(hit.kind, SurfaceKind::Land);
        assert!(hit.iterations <= params.max_iterations);
    }

    #[test]
    fn test_no_hit_terminates_within_budget() {
        let provider = NoHitProvider {
            probes: Cell::new(0),
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 1000.0, 0.0);
        let params = SearchParams::default();

        let hit = solver.resolve_bisection(&provider, origin, straight_down(), &params);
        assert!(hit.is_none());
        assert!(
            provider.probes.get() <= params.max_iterations,
            "must not probe past the iteration budget"
        );
    }

    #[test]
    fn test_upward_ray_never_crosses() {
        let provider = FlatProvider {
            height: 0.0,
            water: false,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 500.0, 0.0);
        let up = DVec3::new(0.0, 1.0, 0.0);

        assert!(solver
            .resolve_bisection(&provider, origin, up, &SearchParams::default())
            .is_none());
    }

    #[test]
    fn test_water_only_rejects_land() {
        // Elevated land everywhere: outside the sea-level band, so the
        // maritime filter should never accept a contact.
        let provider = FlatProvider {
            height: 200.0,
            water: false,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 1200.0, 0.0);

        let hit = solver.resolve_bisection(
            &provider,
            origin,
            straight_down(),
            &SearchParams::maritime(),
        );
        assert!(hit.is_none(), "land must not satisfy a water-only search");
    }

    #[test]
    fn test_water_only_accepts_sea_surface() {
        let provider = FlatProvider {
            height: 0.0,
            water: true,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 800.0, 0.0);

        let hit = solver
            .resolve_bisection(
                &provider,
                origin,
                straight_down(),
                &SearchParams::maritime(),
            )
            .expect("sea surface must resolve");
        assert_eq!(hit.kind, SurfaceKind::Water);
        assert!((hit.range - 800.0).abs() <= SearchParams::maritime().precision);
    }

    #[test]
    fn test_land_at_sea_level_is_not_water() {
        // Terrain at exactly zero elevation but not flagged water by
        // the host stays classified as land.
        let provider = FlatProvider {
            height: 0.0,
            water: false,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 1000.0, 0.0);

        let hit = solver
            .resolve_bisection(&provider, origin, straight_down(), &SearchParams::default())
            .unwrap();
        assert_eq!(hit.kind, SurfaceKind::Land);
    }

    #[test]
    fn test_linear_march_finds_surface() {
        let provider = FlatProvider {
            height: 0.0,
            water: false,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 100.0, 0.0);
        // Short, coarse search: adaptive choice should go linear.
        let params = SearchParams {
            min_range: 10.0,
            max_range: 2_000.0,
            precision: 2.0,
            max_iterations: 600,
            filter: SurfaceFilter::Any,
        };

        // 30° down-angle ray: crosses y=0 at range 200.
        let dir = direction_from_angles(0.0, 0.0, -30.0);
        let hit = solver.resolve(&provider, origin, dir, &params).unwrap();
        assert_eq!(hit.method, SearchMethod::Linear);
        assert!(
            (hit.range - 200.0).abs() <= params.precision * 2.0,
            "expected ~200m, got {}",
            hit.range
        );
        assert_eq!(hit.position.y, 0.0, "linear hit snaps to surface height");
    }

    #[test]
    fn test_adaptive_picks_bisection_for_long_range() {
        let provider = FlatProvider {
            height: 0.0,
            water: false,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 1000.0, 0.0);

        let hit = solver
            .resolve(&provider, origin, straight_down(), &SearchParams::default())
            .unwrap();
        assert_eq!(hit.method, SearchMethod::Bisection);
        assert_eq!(solver.stats().bisection_uses, 1);
        assert_eq!(solver.stats().linear_uses, 0);
        assert_eq!(solver.stats().finds, 1);
    }

    #[test]
    fn test_designation_scenario_depressed_sensor() {
        // Vehicle at 1000m altitude, heading 0, pan 0, tilt -15° over
        // flat terrain at elevation 0: the ray grounds at
        // z = 1000/tan(15°) ≈ 3732m ahead, range ≈ 3864m.
        let provider = FlatProvider {
            height: 0.0,
            water: false,
        };
        let mut solver = SurfaceSolver::new();
        let origin = Position::new(0.0, 1000.0, 0.0);
        let dir = direction_from_angles(0.0, 0.0, -15.0);

        let hit = solver
            .resolve(&provider, origin, dir, &SearchParams::default())
            .expect("depressed ray must ground on flat terrain");

        assert!(
            (hit.position.z - 3732.0).abs() < 5.0,
            "ground point should be ~3732m ahead, got {}",
            hit.position.z
        );
        assert!((hit.position.x).abs() < 1e-6);
        assert_eq!(hit.kind, SurfaceKind::Land);
    }
}
