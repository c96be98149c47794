use std::fmt::Display;

use rayon::prelude::*;
use rayon::ThreadPool;

use super::approx_eq;
use crate::error::Result;
use crate::harness::Workload;

const HOT: f64 = 100.0;
const AMBIENT: f64 = 20.0;

/// Rows handed to a worker at a time under [`Schedule::Dynamic`]
pub const DYNAMIC_CHUNK_ROWS: usize = 10;

/// How the interior rows of one step are split across the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Schedule {
    /// One contiguous block of rows per worker, fixed up front
    #[default]
    Static,
    /// Blocks of [`DYNAMIC_CHUNK_ROWS`] rows taken by whichever worker is free
    Dynamic,
    /// rayon's adaptive splitting, blocks shrink as work runs out
    Guided,
}

impl Schedule {
    pub const ALL: [Schedule; 3] = [Schedule::Static, Schedule::Dynamic, Schedule::Guided];

    /// Rows per block for a fixed split of `rows` over `threads` workers
    fn static_chunk(rows: usize, threads: usize) -> usize {
        rows.div_ceil(threads.max(1)).max(1)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Schedule::Static => "static",
            Schedule::Dynamic => "dynamic",
            Schedule::Guided => "guided",
        })
    }
}

/// Explicit 5-point stencil for 2D heat diffusion on an `n x n` grid with a fixed boundary.
///
/// Starts from a hot disc of radius `n / 10` in the middle of an ambient grid.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatDiffusion {
    pub n: usize,
    pub alpha: f64,
    pub dx: f64,
    pub dt: f64,
    pub steps: usize,
    pub schedule: Schedule,
}

impl Default for HeatDiffusion {
    fn default() -> Self {
        HeatDiffusion {
            n: 500,
            alpha: 0.01,
            dx: 0.1,
            dt: 0.001,
            steps: 1000,
            schedule: Schedule::Static,
        }
    }
}

pub struct HeatGrid {
    current: Vec<f64>,
    next: Vec<f64>,
}

impl HeatDiffusion {
    /// Diffusion number `alpha * dt / dx^2`, the explicit scheme is stable up to 0.25
    pub fn diffusion_number(&self) -> f64 {
        self.alpha * self.dt / (self.dx * self.dx)
    }

    fn initial_grid(&self) -> Vec<f64> {
        let n = self.n;
        let center = (n / 2) as f64;
        let radius = (n / 10) as f64;

        let mut grid = vec![AMBIENT; n * n];
        for i in 1..n.saturating_sub(1) {
            for j in 1..n - 1 {
                let dist = ((i as f64 - center).powi(2) + (j as f64 - center).powi(2)).sqrt();
                if dist < radius {
                    grid[i * n + j] = HOT;
                }
            }
        }
        grid
    }
}

impl Workload for HeatDiffusion {
    type Input = HeatGrid;
    /// Mean temperature after the last step
    type Output = f64;

    fn name(&self) -> &str {
        match self.schedule {
            Schedule::Static => "Heat Diffusion Simulation (2D), static schedule",
            Schedule::Dynamic => "Heat Diffusion Simulation (2D), dynamic schedule",
            Schedule::Guided => "Heat Diffusion Simulation (2D), guided schedule",
        }
    }

    fn problem_size(&self) -> usize {
        self.n
    }

    fn prepare(&self) -> Result<HeatGrid> {
        let current = self.initial_grid();
        Ok(HeatGrid {
            next: current.clone(),
            current,
        })
    }

    fn run(&self, grid: &mut HeatGrid, pool: &ThreadPool) -> Result<f64> {
        let n = self.n;
        if n == 0 {
            return Ok(0.0);
        }
        let r = self.diffusion_number();
        let interior = n.saturating_sub(2);
        let static_chunk = Schedule::static_chunk(interior, pool.current_num_threads());

        pool.install(|| {
            for _ in 0..self.steps {
                let current = grid.current.as_slice();
                let stencil = |(i, row): (usize, &mut [f64])| {
                    for j in 1..n - 1 {
                        let c = current[i * n + j];
                        row[j] = c + r
                            * (current[(i + 1) * n + j]
                                + current[(i - 1) * n + j]
                                + current[i * n + j + 1]
                                + current[i * n + j - 1]
                                - 4.0 * c);
                    }
                };

                let rows = grid.next.par_chunks_mut(n).enumerate().skip(1).take(interior);
                match self.schedule {
                    Schedule::Static => rows
                        .with_min_len(static_chunk)
                        .with_max_len(static_chunk)
                        .for_each(stencil),
                    Schedule::Dynamic => rows.with_max_len(DYNAMIC_CHUNK_ROWS).for_each(stencil),
                    Schedule::Guided => rows.for_each(stencil),
                }
                std::mem::swap(&mut grid.current, &mut grid.next);
            }
        });

        Ok(grid.current.iter().sum::<f64>() / (n * n) as f64)
    }

    fn consistent(&self, baseline: &f64, output: &f64) -> bool {
        approx_eq(*baseline, *output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::build_pool;

    fn small() -> HeatDiffusion {
        HeatDiffusion {
            n: 40,
            steps: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_grid() {
        let heat = small();
        let grid = heat.initial_grid();
        assert_eq!(grid[20 * 40 + 20], HOT);
        assert_eq!(grid[0], AMBIENT);
        assert_eq!(grid[39 * 40 + 39], AMBIENT);
        assert_eq!(heat.diffusion_number(), 0.01 * 0.001 / (0.1 * 0.1));
    }

    #[test]
    fn test_heat_spreads_and_boundary_stays_fixed() {
        let heat = small();
        let pool = build_pool(2).unwrap();
        let mut grid = heat.prepare().unwrap();
        heat.run(&mut grid, &pool).unwrap();

        let n = heat.n;
        assert!(grid.current[20 * n + 17] < HOT);
        assert!(grid.current[20 * n + 16] > AMBIENT);
        assert!((0..n).all(|k| grid.current[k] == AMBIENT && grid.current[k * n] == AMBIENT));
    }

    #[test]
    fn test_grid_identical_across_threads_and_schedules() {
        let baseline = {
            let heat = small();
            let pool = build_pool(1).unwrap();
            let mut grid = heat.prepare().unwrap();
            heat.run(&mut grid, &pool).unwrap();
            grid.current
        };

        for schedule in Schedule::ALL {
            let heat = HeatDiffusion {
                schedule,
                ..small()
            };
            for threads in [2, 3, 4] {
                let pool = build_pool(threads).unwrap();
                let mut grid = heat.prepare().unwrap();
                heat.run(&mut grid, &pool).unwrap();
                assert_eq!(grid.current, baseline, "{schedule} with {threads} threads");
            }
        }
    }

    #[test]
    fn test_static_chunk() {
        assert_eq!(Schedule::static_chunk(498, 4), 125);
        assert_eq!(Schedule::static_chunk(498, 1), 498);
        assert_eq!(Schedule::static_chunk(3, 8), 1);
        assert_eq!(Schedule::static_chunk(0, 4), 1);
    }

    #[test]
    fn test_schedule_names() {
        let names: Vec<String> = Schedule::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["static", "dynamic", "guided"]);

        let guided = HeatDiffusion {
            schedule: Schedule::Guided,
            ..Default::default()
        };
        assert_eq!(guided.name(), "Heat Diffusion Simulation (2D), guided schedule");
        assert_eq!(guided.problem_size(), 500);
    }
}
