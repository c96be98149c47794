use rand::prelude::*;
use rayon::prelude::*;
use rayon::ThreadPool;

use super::approx_eq;
use crate::error::Result;
use crate::harness::Workload;
use crate::r#const::DEFAULT_SEED;

const EPSILON: f64 = 1.0;
const SIGMA: f64 = 1.0;
const CUTOFF: f64 = 2.5 * SIGMA;
const BOX_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub position: [f64; 3],
    pub force: [f64; 3],
}

/// Pairwise Lennard-Jones forces and potential energy with a hard cutoff
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LennardJones {
    pub particles: usize,
    pub seed: u64,
}

impl Default for LennardJones {
    fn default() -> Self {
        LennardJones {
            particles: 1000,
            seed: DEFAULT_SEED,
        }
    }
}

/// Force exerted on `a` by `b` and the pair's potential energy, zero beyond the cutoff.
///
/// The force pushes `a` away from `b` below `2^(1/6) sigma` and pulls it towards `b` above.
#[inline]
fn pair_interaction(a: &Particle, b: &Particle) -> ([f64; 3], f64) {
    let d = [
        b.position[0] - a.position[0],
        b.position[1] - a.position[1],
        b.position[2] - a.position[2],
    ];
    let r2 = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
    let r = r2.sqrt();
    if r > CUTOFF || r == 0.0 {
        return ([0.0; 3], 0.0);
    }

    let sr6 = (SIGMA / r).powi(6);
    let sr12 = sr6 * sr6;
    let energy = 4.0 * EPSILON * (sr12 - sr6);
    let magnitude = 24.0 * EPSILON * (2.0 * sr12 - sr6) / r;

    (
        [
            -magnitude * d[0] / r,
            -magnitude * d[1] / r,
            -magnitude * d[2] / r,
        ],
        energy,
    )
}

impl Workload for LennardJones {
    type Input = Vec<Particle>;
    /// Total potential energy, each pair counted once
    type Output = f64;

    fn name(&self) -> &str {
        "Molecular Dynamics - Lennard-Jones Force Calculation"
    }

    fn problem_size(&self) -> usize {
        self.particles
    }

    fn prepare(&self) -> Result<Vec<Particle>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok((0..self.particles)
            .map(|_| Particle {
                position: [
                    rng.random_range(0.0..BOX_SIZE),
                    rng.random_range(0.0..BOX_SIZE),
                    rng.random_range(0.0..BOX_SIZE),
                ],
                force: [0.0; 3],
            })
            .collect())
    }

    fn run(&self, particles: &mut Vec<Particle>, pool: &ThreadPool) -> Result<f64> {
        let snapshot = particles.clone();

        let energy = pool.install(|| {
            particles
                .par_iter_mut()
                .enumerate()
                .map(|(i, particle)| {
                    let mut force = [0.0; 3];
                    let mut energy = 0.0;
                    for (j, other) in snapshot.iter().enumerate() {
                        if i == j {
                            continue;
                        }
                        let (f, e) = pair_interaction(&snapshot[i], other);
                        force[0] += f[0];
                        force[1] += f[1];
                        force[2] += f[2];
                        if i < j {
                            energy += e;
                        }
                    }
                    particle.force = force;
                    energy
                })
                .sum()
        });
        Ok(energy)
    }

    fn consistent(&self, baseline: &f64, output: &f64) -> bool {
        approx_eq(*baseline, *output)
    }
}
