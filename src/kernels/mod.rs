//! Benchmark workloads run by the [`Harness`](crate::harness::Harness).
//!
//! Apart from [`SmithWaterman`], each kernel is an embarrassingly parallel loop nest that only
//! needs its outer loop split across the pool.

mod daxpy;
mod heat;
mod matmul;
mod nbody;
mod pi;
mod smith_waterman;

pub use daxpy::Daxpy;
pub use heat::{HeatDiffusion, Schedule, DYNAMIC_CHUNK_ROWS};
pub use matmul::MatMul;
pub use nbody::LennardJones;
pub use pi::Pi;
pub use smith_waterman::SmithWaterman;

const RELATIVE_TOLERANCE: f64 = 1e-6;

/// Floating point reductions reorder additions with the thread count
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
