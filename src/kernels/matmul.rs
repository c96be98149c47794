use rayon::prelude::*;
use rayon::ThreadPool;

use super::approx_eq;
use crate::error::Result;
use crate::harness::Workload;

/// Dense `C = A * B` of two `n x n` row-major matrices, `A = 1` and `B = 2`.
///
/// With `transposed` set, `B` is transposed while preparing the input so the inner loop walks
/// both operands contiguously.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatMul {
    pub n: usize,
    pub transposed: bool,
}

impl Default for MatMul {
    fn default() -> Self {
        MatMul {
            n: 1000,
            transposed: false,
        }
    }
}

pub struct MatMulInput {
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
}

fn transpose(m: &[f64], n: usize) -> Vec<f64> {
    let mut t = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            t[j * n + i] = m[i * n + j];
        }
    }
    t
}

impl Workload for MatMul {
    type Input = MatMulInput;
    /// Sum of every entry of `C`
    type Output = f64;

    fn name(&self) -> &str {
        if self.transposed {
            "Matrix Multiply (transposed B)"
        } else {
            "Matrix Multiply"
        }
    }

    fn problem_size(&self) -> usize {
        self.n
    }

    fn prepare(&self) -> Result<MatMulInput> {
        let n = self.n;
        let a = vec![1.0; n * n];
        let b = vec![2.0; n * n];
        let b = if self.transposed { transpose(&b, n) } else { b };
        Ok(MatMulInput {
            a,
            b,
            c: vec![0.0; n * n],
        })
    }

    fn run(&self, input: &mut MatMulInput, pool: &ThreadPool) -> Result<f64> {
        let n = self.n;
        if n == 0 {
            return Ok(0.0);
        }

        let MatMulInput { a, b, c } = input;
        let (a, b) = (a.as_slice(), b.as_slice());
        let transposed = self.transposed;

        Ok(pool.install(|| {
            c.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                let a_row = &a[i * n..(i + 1) * n];
                for (j, out) in row.iter_mut().enumerate() {
                    *out = if transposed {
                        let b_row = &b[j * n..(j + 1) * n];
                        a_row.iter().zip(b_row).map(|(x, y)| x * y).sum()
                    } else {
                        (0..n).map(|k| a_row[k] * b[k * n + j]).sum()
                    };
                }
            });
            c.par_iter().sum()
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
    fn test_constant_matrices() {
        for transposed in [false, true] {
            let matmul = MatMul { n: 24, transposed };
            let pool = build_pool(3).unwrap();
            let mut input = matmul.prepare().unwrap();
            let sum = matmul.run(&mut input, &pool).unwrap();

            assert!(input.c.iter().all(|&v| v == 48.0));
            assert_eq!(sum, 24.0 * 24.0 * 48.0);
        }
    }

    #[test]
    fn test_transpose() {
        let m = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(
            transpose(&m, 3),
            vec![1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]
        );
    }
}
