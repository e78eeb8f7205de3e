//! Procedural terrain scenarios.
//!
//! Elevation fields are sums of seeded sinusoids, so the same seed
//! always yields bit-identical terrain. Good enough to exercise the
//! solver's bracketing and classification paths without shipping real
//! elevation data.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use kestrel_terrain::HeightField;

/// Number of sinusoid octaves summed per field.
const OCTAVES: usize = 4;

/// Rolling inland hills: elevations roughly 40–460 m, never water.
/// The worst-case octave sum is just over 200 m, so a 250 m bias keeps
/// every post above sea level.
pub fn rolling_terrain(seed: u64, extent_m: f64, cell_size_m: f64) -> HeightField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let posts = ((extent_m / cell_size_m).ceil() as usize).max(2);

    let waves = sample_waves(&mut rng, extent_m, 100.0);
    let mut elevations = Vec::with_capacity(posts * posts);
    for row in 0..posts {
        for col in 0..posts {
            let x = -extent_m / 2.0 + col as f64 * cell_size_m;
            let z = -extent_m / 2.0 + row as f64 * cell_size_m;
            elevations.push(250.0 + eval_waves(&waves, x, z));
        }
    }

    HeightField::new(posts, posts, cell_size_m, -extent_m / 2.0, -extent_m / 2.0, elevations)
}

/// Island chain: sea at zero elevation with scattered peaks breaking
/// the surface. Posts at or below zero are water.
pub fn archipelago_terrain(seed: u64, extent_m: f64, cell_size_m: f64) -> HeightField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let posts = ((extent_m / cell_size_m).ceil() as usize).max(2);

    let waves = sample_waves(&mut rng, extent_m, 120.0);
    let mut elevations = Vec::with_capacity(posts * posts);
    for row in 0..posts {
        for col in 0..posts {
            let x = -extent_m / 2.0 + col as f64 * cell_size_m;
            let z = -extent_m / 2.0 + row as f64 * cell_size_m;
            // Sea clamps to the surface at zero elevation (a height
            // probe reports the water surface, not the floor); islands
            // rise where the octaves align upward.
            elevations.push((eval_waves(&waves, x, z) - 60.0).max(0.0));
        }
    }

    HeightField::new(posts, posts, cell_size_m, -extent_m / 2.0, -extent_m / 2.0, elevations)
}

struct Wave {
    freq_x: f64,
    freq_z: f64,
    phase: f64,
    amplitude: f64,
}

fn sample_waves(rng: &mut ChaCha8Rng, extent_m: f64, amplitude_m: f64) -> Vec<Wave> {
    (0..OCTAVES)
        .map(|octave| {
            let base = std::f64::consts::TAU / extent_m * (octave + 1) as f64;
            Wave {
                freq_x: base * rng.gen_range(0.5..2.0),
                freq_z: base * rng.gen_range(0.5..2.0),
                phase: rng.gen_range(0.0..std::f64::consts::TAU),
                amplitude: amplitude_m / (octave + 1) as f64,
            }
        })
        .collect()
}

fn eval_waves(waves: &[Wave], x: f64, z: f64) -> f64 {
    waves
        .iter()
        .map(|w| w.amplitude * (w.freq_x * x + w.freq_z * z + w.phase).sin())
        .sum()
}
