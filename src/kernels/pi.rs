use rayon::prelude::*;
use rayon::ThreadPool;

use super::approx_eq;
use crate::error::Result;
use crate::harness::Workload;

/// Midpoint-rule integration of `4 / (1 + x^2)` over `[0, 1]`
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pi {
    pub num_steps: u64,
}

impl Default for Pi {
    fn default() -> Self {
        Pi {
            num_steps: 100_000_000,
        }
    }
}

impl Workload for Pi {
    type Input = ();
    type Output = f64;

    fn name(&self) -> &str {
        "Pi Integration"
    }

    fn problem_size(&self) -> usize {
        usize::try_from(self.num_steps).unwrap_or(usize::MAX)
    }

    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn run(&self, _: &mut (), pool: &ThreadPool) -> Result<f64> {
        let step = 1.0 / self.num_steps as f64;
        let sum: f64 = pool.install(|| {
            (0..self.num_steps)
                .into_par_iter()
                .map(|i| {
                    let x = (i as f64 + 0.5) * step;
                    4.0 / (1.0 + x * x)
                })
                .sum()
        });
        Ok(step * sum)
    }

    fn consistent(&self, baseline: &f64, output: &f64) -> bool {
        approx_eq(*baseline, *output)
    }
}
