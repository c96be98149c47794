//! Wavefront-parallel Smith-Waterman local alignment, plus a small harness for measuring
//! parallel-loop speedup and efficiency across thread counts.
//!
//! ```
//! use wavefront::{align, Scoring};
//!
//! let score = align("GATTACA", "GCATGCU", Scoring::default(), 4).unwrap();
//! assert_eq!(score, 5);
//! ```

pub mod r#const;
mod error;
pub mod generate;
pub mod harness;
pub mod kernels;
mod pool;
mod score_matrix;
mod scoring;
mod traceback;
pub mod wavefront;

pub use error::{AlignError, Result};
pub use pool::{available_threads, build_pool};
pub use score_matrix::ScoreMatrix;
pub use scoring::Scoring;
pub use traceback::LocalAlignment;
pub use wavefront::{align, align_in_pool, Alignment, CancelToken, WavefrontAligner};
