use std::time::Instant;

use log::debug;
use rayon::ThreadPool;

use crate::error::{AlignError, Result};
use crate::pool::build_pool;
use crate::score_matrix::ScoreMatrix;
use crate::scoring::Scoring;

mod cancel;
mod diagonal;
mod sequential;
mod thread_slice;

pub use cancel::CancelToken;

/// Score of a local alignment together with the fully populated score matrix
#[derive(Debug, Clone)]
pub struct Alignment {
    pub score: i32,
    pub matrix: ScoreMatrix,
}

/// Smith-Waterman local aligner with linear gaps.
///
/// With a parallelism degree of 1 the matrix is filled row by row on the calling thread.
/// Above 1, it is filled one anti-diagonal at a time on a dedicated pool of that many
/// workers. The score does not depend on the degree.
#[derive(Debug)]
pub struct WavefrontAligner {
    scoring: Scoring,
    parallelism: usize,
    pool: Option<ThreadPool>,
}

impl WavefrontAligner {
    pub fn new(scoring: Scoring, parallelism: usize) -> Result<Self> {
        if parallelism == 0 {
            return Err(AlignError::invalid("parallelism degree must be at least 1"));
        }

        let pool = if parallelism > 1 {
            Some(build_pool(parallelism)?)
        } else {
            None
        };

        Ok(WavefrontAligner {
            scoring,
            parallelism,
            pool,
        })
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Returns the best local alignment score of the two sequences
    pub fn align(&self, seq1: impl AsRef<[u8]>, seq2: impl AsRef<[u8]>) -> Result<i32> {
        self.align_with_matrix(seq1, seq2).map(|alignment| alignment.score)
    }

    /// Same as [`align`](Self::align) but keeps the score matrix for inspection or traceback
    pub fn align_with_matrix(
        &self,
        seq1: impl AsRef<[u8]>,
        seq2: impl AsRef<[u8]>,
    ) -> Result<Alignment> {
        run(
            seq1.as_ref(),
            seq2.as_ref(),
            self.scoring,
            self.pool.as_ref(),
            None,
        )
    }

    /// Aligns while checking `cancel` before every diagonal (or row, when sequential).
    /// A cancelled run returns [`AlignError::Cancelled`] and drops the partial matrix.
    pub fn align_cancellable(
        &self,
        seq1: impl AsRef<[u8]>,
        seq2: impl AsRef<[u8]>,
        cancel: &CancelToken,
    ) -> Result<i32> {
        run(
            seq1.as_ref(),
            seq2.as_ref(),
            self.scoring,
            self.pool.as_ref(),
            Some(cancel),
        )
        .map(|alignment| alignment.score)
    }
}

/// One-shot alignment: builds a pool of `parallelism` workers, aligns, and tears the pool down
pub fn align(
    seq1: impl AsRef<[u8]>,
    seq2: impl AsRef<[u8]>,
    scoring: Scoring,
    parallelism: usize,
) -> Result<i32> {
    let (seq1, seq2) = (seq1.as_ref(), seq2.as_ref());
    validate_sequences(seq1, seq2)?;
    WavefrontAligner::new(scoring, parallelism)?.align(seq1, seq2)
}

/// Aligns on an existing pool, using its thread count as the parallelism degree
pub fn align_in_pool(
    seq1: impl AsRef<[u8]>,
    seq2: impl AsRef<[u8]>,
    scoring: Scoring,
    pool: &ThreadPool,
) -> Result<i32> {
    let pool = (pool.current_num_threads() > 1).then_some(pool);
    run(seq1.as_ref(), seq2.as_ref(), scoring, pool, None).map(|alignment| alignment.score)
}

fn validate_sequences(seq1: &[u8], seq2: &[u8]) -> Result<()> {
    if seq1.is_empty() {
        return Err(AlignError::invalid("first sequence is empty"));
    }
    if seq2.is_empty() {
        return Err(AlignError::invalid("second sequence is empty"));
    }
    Ok(())
}

fn run(
    seq1: &[u8],
    seq2: &[u8],
    scoring: Scoring,
    pool: Option<&ThreadPool>,
    cancel: Option<&CancelToken>,
) -> Result<Alignment> {
    validate_sequences(seq1, seq2)?;

    let mut matrix = ScoreMatrix::try_new(seq1.len() + 1, seq2.len() + 1)?;
    let workers = pool.map_or(1, ThreadPool::current_num_threads);
    debug!(
        "aligning {}x{} with {} worker(s)",
        seq1.len(),
        seq2.len(),
        workers
    );

    let start = Instant::now();
    let score = match pool {
        Some(pool) => diagonal::smith_waterman(&mut matrix, seq1, seq2, scoring, pool, cancel)?,
        None => sequential::smith_waterman(&mut matrix, seq1, seq2, scoring, cancel)?,
    };
    debug!("alignment score {score} in {:?}", start.elapsed());

    Ok(Alignment { score, matrix })
}
