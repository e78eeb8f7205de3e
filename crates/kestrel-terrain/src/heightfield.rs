//! HeightField: in-memory heightmap implementing `HeightProvider`.
//!
//! Used by the simulation harness and tests in place of a live host
//! terrain probe. Sim-space grid in the local frame: rows advance
//! along +z, columns along +x, bilinear interpolation between posts.

use crate::provider::{HeightProvider, HeightSample};

/// Rectangular elevation grid centered on a configurable origin.
#[derive(Debug, Clone)]
pub struct HeightField {
    /// Number of columns (posts along +x).
    width: usize,
    /// Number of rows (posts along +z).
    depth: usize,
    /// Meters between adjacent posts.
    cell_size_m: f64,
    /// World x of column 0.
    origin_x: f64,
    /// World z of row 0.
    origin_z: f64,
    /// Elevations in meters, row-major.
    elevations: Vec<f64>,
    /// Per-post water flags. Posts at or below zero elevation default
    /// to water when no explicit mask is given.
    water: Vec<bool>,
}

impl HeightField {
    /// Build from raw elevations; water defaults to `elevation <= 0`.
    pub fn new(
        width: usize,
        depth: usize,
        cell_size_m: f64,
        origin_x: f64,
        origin_z: f64,
        elevations: Vec<f64>,
    ) -> Self {
        assert_eq!(elevations.len(), width * depth);
        let water = elevations.iter().map(|&e| e <= 0.0).collect();
        Self {
            width,
            depth,
            cell_size_m,
            origin_x,
            origin_z,
            elevations,
            water,
        }
    }

    /// Uniform flat field centered on the origin. `water` marks the
    /// whole field as sea surface.
    pub fn flat(extent_m: f64, cell_size_m: f64, elevation: f64, water: bool) -> Self {
        let posts = ((extent_m / cell_size_m).ceil() as usize).max(2);
        let mut field = Self::new(
            posts,
            posts,
            cell_size_m,
            -extent_m / 2.0,
            -extent_m / 2.0,
            vec![elevation; posts * posts],
        );
        field.water = vec![water; posts * posts];
        field
    }

    /// Override the water mask (row-major, same layout as elevations).
    pub fn set_water_mask(&mut self, water: Vec<bool>) {
        assert_eq!(water.len(), self.width * self.depth);
        self.water = water;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Fractional grid coordinates for a world x/z, or None outside.
    fn to_grid(&self, x: f64, z: f64) -> Option<(f64, f64)> {
        let col = (x - self.origin_x) / self.cell_size_m;
        let row = (z - self.origin_z) / self.cell_size_m;
        if col < 0.0 || row < 0.0 || col > (self.width - 1) as f64 || row > (self.depth - 1) as f64
        {
            return None;
        }
        Some((row, col))
    }

    fn post(&self, row: usize, col: usize) -> f64 {
        let row = row.min(self.depth - 1);
        let col = col.min(self.width - 1);
        self.elevations[row * self.width + col]
    }

    /// Bilinear elevation at world x/z, or None outside the grid.
    pub fn elevation_at(&self, x: f64, z: f64) -> Option<f64> {
        let (row, col) = self.to_grid(x, z)?;

        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.depth - 1);
        let c1 = (c0 + 1).min(self.width - 1);
        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let top = self.post(r0, c0) * (1.0 - fc) + self.post(r0, c1) * fc;
        let bot = self.post(r1, c0) * (1.0 - fc) + self.post(r1, c1) * fc;
        Some(top * (1.0 - fr) + bot * fr)
    }

    /// Water flag at the nearest post.
    fn is_water_at(&self, x: f64, z: f64) -> bool {
        match self.to_grid(x, z) {
            Some((row, col)) => {
                let r = (row.round() as usize).min(self.depth - 1);
                let c = (col.round() as usize).min(self.width - 1);
                self.water[r * self.width + c]
            }
            None => false,
        }
    }
}

impl HeightProvider for HeightField {
    fn query_height(&self, x: f64, _y: f64, z: f64) -> Option<HeightSample> {
        let surface_height = self.elevation_at(x, z)?;
        Some(HeightSample {
            surface_height,
            is_water: self.is_water_at(x, z),
        })
    }
}
