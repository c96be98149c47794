use log::trace;

use super::CancelToken;
use crate::error::{AlignError, Result};
use crate::score_matrix::ScoreMatrix;
use crate::scoring::Scoring;

/// Fills the matrix in row-major order and returns the maximum score.
///
/// Row-major order visits the up, left and diagonal predecessors before each cell.
pub(crate) fn smith_waterman(
    matrix: &mut ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    scoring: Scoring,
    cancel: Option<&CancelToken>,
) -> Result<i32> {
    let mut max_score = 0;

    for i in 1..=seq1.len() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(AlignError::Cancelled { step: i });
        }

        let cols = matrix.cols();
        let (done, curr_row) = matrix.split_row_mut(i);
        let prev_row = &done[(i - 1) * cols..];
        let needle_char = seq1[i - 1];

        for j in 1..=seq2.len() {
            let score = scoring.cell(
                prev_row[j - 1],
                prev_row[j],
                curr_row[j - 1],
                needle_char,
                seq2[j - 1],
            );
            curr_row[j] = score;

            if score > max_score {
                max_score = score;
            }
        }
    }

    trace!("row-major fill finished with max score {max_score}");
    Ok(max_score)
}
