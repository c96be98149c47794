use std::ops::Range;

use log::trace;
use rayon::prelude::*;
use rayon::ThreadPool;

use super::thread_slice::ThreadSlice;
use super::CancelToken;
use crate::error::{AlignError, Result};
use crate::r#const::MIN_CELLS_PER_TASK;
use crate::score_matrix::ScoreMatrix;
use crate::scoring::Scoring;

/// Rows `i` whose cell `(i, diag - i)` lies inside `[1, m] x [1, n]`.
///
/// `diag` must be in `2..=m + n`, which always yields a non-empty range.
#[inline]
pub(crate) fn diagonal_rows(diag: usize, m: usize, n: usize) -> Range<usize> {
    debug_assert!((2..=m + n).contains(&diag));
    let start = diag.saturating_sub(n).max(1);
    let end = m.min(diag - 1);
    start..end + 1
}

/// Fills the matrix one anti-diagonal at a time on the given pool and returns the maximum score.
///
/// Cells on a diagonal only depend on the two previous diagonals, so each diagonal is computed
/// in parallel and joined before the next one starts.
pub(crate) fn smith_waterman(
    matrix: &mut ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    scoring: Scoring,
    pool: &ThreadPool,
    cancel: Option<&CancelToken>,
) -> Result<i32> {
    let (m, n) = (seq1.len(), seq2.len());
    let cols = matrix.cols();
    let scores = ThreadSlice::new(matrix.as_mut_slice(), cols);

    pool.install(|| {
        let mut max_score = 0;

        for diag in 2..=m + n {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(AlignError::Cancelled { step: diag });
            }

            // The parallel iterator returns once every cell of the diagonal is written,
            // which is the barrier before `diag + 1`
            let diagonal_max = diagonal_rows(diag, m, n)
                .into_par_iter()
                .with_min_len(MIN_CELLS_PER_TASK)
                .map(|i| {
                    let j = diag - i;
                    // SAFETY: (i, j) is the only cell of this diagonal in row i, and the
                    // predecessors lie on diagonals that were joined before this one started
                    unsafe {
                        let score = scoring.cell(
                            scores.get(i - 1, j - 1),
                            scores.get(i - 1, j),
                            scores.get(i, j - 1),
                            seq1[i - 1],
                            seq2[j - 1],
                        );
                        scores.set(i, j, score);
                        score
                    }
                })
                .max()
                .unwrap_or(0);

            max_score = max_score.max(diagonal_max);
        }

        trace!("wavefront fill finished {} diagonals with max score {max_score}", m + n - 1);
        Ok(max_score)
    })
}
