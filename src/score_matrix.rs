use crate::error::{AlignError, Result};

/// Dense `(m + 1) x (n + 1)` grid of local-alignment scores stored row-major in a single buffer.
///
/// Row 0 and column 0 are the boundary and always hold zero. Cell `(i, j)` holds the score of
/// the best local alignment ending at symbol `i` of the first sequence and symbol `j` of the
/// second (both 1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    scores: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    /// Allocates a zeroed matrix, failing instead of aborting when the size cannot be reserved
    pub(crate) fn try_new(rows: usize, cols: usize) -> Result<Self> {
        let allocation_failure = || AlignError::AllocationFailure { rows, cols };

        let len = rows.checked_mul(cols).ok_or_else(allocation_failure)?;
        let mut scores = Vec::new();
        scores
            .try_reserve_exact(len)
            .map_err(|_| allocation_failure())?;
        scores.resize(len, 0);

        Ok(ScoreMatrix { scores, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        self.scores[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[i32] {
        &self.scores[i * self.cols..(i + 1) * self.cols]
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.scores.iter().copied()
    }

    pub fn max_score(&self) -> i32 {
        self.iter().max().unwrap_or(0)
    }

    /// Position of the first maximum in row-major order, or `None` when every cell is zero
    pub fn max_position(&self) -> Option<(usize, usize)> {
        let mut best = 0;
        let mut position = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            if score > best {
                best = score;
                position = Some((idx / self.cols, idx % self.cols));
            }
        }
        position
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.scores
    }

    /// Splits the buffer into the finished rows `0..i` and row `i`
    #[inline]
    pub(crate) fn split_row_mut(&mut self, i: usize) -> (&[i32], &mut [i32]) {
        let (done, rest) = self.scores.split_at_mut(i * self.cols);
        (done, &mut rest[..self.cols])
    }
}
