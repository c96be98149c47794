use std::fmt::Display;

use crate::error::{AlignError, Result};
use crate::r#const::GAP_SYMBOL;
use crate::score_matrix::ScoreMatrix;
use crate::scoring::Scoring;

/// A local alignment recovered from a score matrix.
///
/// `start` and `end` are 1-based inclusive positions `(in seq1, in seq2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalAlignment {
    pub score: i32,
    pub start: (usize, usize),
    pub end: (usize, usize),
    pub aligned1: Vec<u8>,
    pub aligned2: Vec<u8>,
}

impl Display for LocalAlignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let markers: String = self
            .aligned1
            .iter()
            .zip(&self.aligned2)
            .map(|(a, b)| if a == b { '|' } else { ' ' })
            .collect();

        writeln!(f, "{:>6} {} {}", self.start.0, String::from_utf8_lossy(&self.aligned1), self.end.0)?;
        writeln!(f, "{:>6} {}", "", markers)?;
        write!(f, "{:>6} {} {}", self.start.1, String::from_utf8_lossy(&self.aligned2), self.end.1)
    }
}

impl ScoreMatrix {
    /// Walks back from the first maximum cell to the first zero cell, preferring diagonal moves,
    /// then gaps in `seq2`, then gaps in `seq1`.
    ///
    /// Returns `None` when no cell scores above zero.
    pub fn traceback(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        scoring: Scoring,
    ) -> Result<Option<LocalAlignment>> {
        if self.rows() != seq1.len() + 1 || self.cols() != seq2.len() + 1 {
            return Err(AlignError::invalid(format!(
                "{}x{} matrix does not belong to sequences of length {} and {}",
                self.rows(),
                self.cols(),
                seq1.len(),
                seq2.len()
            )));
        }

        let Some(end) = self.max_position() else {
            return Ok(None);
        };

        let mut aligned1 = Vec::new();
        let mut aligned2 = Vec::new();
        let (mut i, mut j) = end;
        let mut score = self.get(i, j);

        // NOTE: row 0 and column 0 always score 0, so the walk stops before leaving the matrix
        while score > 0 {
            let diag = self.get(i - 1, j - 1);
            let up = self.get(i - 1, j);
            let left = self.get(i, j - 1);

            if score == diag.saturating_add(scoring.substitution(seq1[i - 1], seq2[j - 1])) {
                aligned1.push(seq1[i - 1]);
                aligned2.push(seq2[j - 1]);
                i -= 1;
                j -= 1;
            } else if score == up.saturating_add(scoring.gap_penalty) {
                aligned1.push(seq1[i - 1]);
                aligned2.push(GAP_SYMBOL);
                i -= 1;
            } else if score == left.saturating_add(scoring.gap_penalty) {
                aligned1.push(GAP_SYMBOL);
                aligned2.push(seq2[j - 1]);
                j -= 1;
            } else {
                return Err(AlignError::invalid(format!(
                    "cell ({i}, {j}) was not produced by the given scoring"
                )));
            }
            score = self.get(i, j);
        }

        aligned1.reverse();
        aligned2.reverse();

        Ok(Some(LocalAlignment {
            score: self.get(end.0, end.1),
            start: (i + 1, j + 1),
            end,
            aligned1,
            aligned2,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavefront::WavefrontAligner;

    fn traceback(seq1: &str, seq2: &str, parallelism: usize) -> Option<LocalAlignment> {
        let scoring = Scoring::default();
        let alignment = WavefrontAligner::new(scoring, parallelism)
            .unwrap()
            .align_with_matrix(seq1, seq2)
            .unwrap();
        alignment
            .matrix
            .traceback(seq1.as_bytes(), seq2.as_bytes(), scoring)
            .unwrap()
    }

    #[test]
    fn test_textbook_traceback() {
        for degree in [1, 4] {
            let alignment = traceback("GATTACA", "GCATGCU", degree).unwrap();
            assert_eq!(alignment.score, 5);
            assert_eq!(alignment.start, (1, 1));
            assert_eq!(alignment.end, (3, 4));
            assert_eq!(alignment.aligned1, b"G-AT");
            assert_eq!(alignment.aligned2, b"GCAT");
        }
    }

    #[test]
    fn test_exact_substring() {
        let alignment = traceback("TTACGTTT", "GGGACGTGGG", 2).unwrap();
        assert_eq!(alignment.score, 8);
        assert_eq!(alignment.aligned1, b"ACGT");
        assert_eq!(alignment.aligned2, b"ACGT");
        assert_eq!(alignment.start, (3, 4));
        assert_eq!(alignment.end, (6, 7));
    }

    #[test]
    fn test_zero_score_has_no_alignment() {
        assert_eq!(traceback("AAAA", "CCCC", 1), None);
    }

    #[test]
    fn test_mismatched_sequences_rejected() {
        let scoring = Scoring::default();
        let alignment = WavefrontAligner::new(scoring, 1)
            .unwrap()
            .align_with_matrix("ACGT", "ACGT")
            .unwrap();
        let err = alignment
            .matrix
            .traceback(b"ACG", b"ACGT", scoring)
            .unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(_)));
    }

    #[test]
    fn test_display() {
        let alignment = traceback("GATTACA", "GCATGCU", 1).unwrap();
        assert_eq!(
            alignment.to_string(),
            "     1 G-AT 3\n       | ||\n     1 GCAT 4"
        );
    }
}
