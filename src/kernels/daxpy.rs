use rayon::prelude::*;
use rayon::ThreadPool;

use super::approx_eq;
use crate::error::Result;
use crate::harness::Workload;

/// `x = a * x + y` over two vectors
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Daxpy {
    pub len: usize,
    pub a: f64,
}

impl Default for Daxpy {
    fn default() -> Self {
        Daxpy { len: 1 << 20, a: 2.5 }
    }
}

impl Workload for Daxpy {
    type Input = (Vec<f64>, Vec<f64>);
    /// Sum of `x` after the update
    type Output = f64;

    fn name(&self) -> &str {
        "DAXPY"
    }

    fn problem_size(&self) -> usize {
        self.len
    }

    fn prepare(&self) -> Result<Self::Input> {
        Ok((vec![1.0; self.len], vec![2.0; self.len]))
    }

    fn run(&self, (x, y): &mut Self::Input, pool: &ThreadPool) -> Result<f64> {
        let a = self.a;
        Ok(pool.install(|| {
            x.par_iter_mut()
                .zip(y.par_iter())
                .for_each(|(x, y)| *x = *x * a + *y);
            x.par_iter().sum()
        }))
    }

    fn consistent(&self, baseline: &f64, output: &f64) -> bool {
        approx_eq(*baseline, *output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::build_pool;

    #[test]
    fn test_daxpy_values() {
        let daxpy = Daxpy { len: 1000, a: 2.5 };
        for threads in [1, 3] {
            let pool = build_pool(threads).unwrap();
            let mut input = daxpy.prepare().unwrap();
            let sum = daxpy.run(&mut input, &pool).unwrap();

            assert!(input.0.iter().all(|&x| x == 4.5));
            assert_eq!(sum, 4500.0);
        }
    }
}
