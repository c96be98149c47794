use crate::r#const::*;

/// Linear-gap scoring parameters for local alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoring {
    /// Added when both symbols are equal
    pub match_score: i32,
    /// Added when the symbols differ, normally negative
    pub mismatch_penalty: i32,
    /// Added for every inserted or deleted symbol, normally negative
    pub gap_penalty: i32,
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring {
            match_score: MATCH_SCORE,
            mismatch_penalty: MISMATCH_PENALTY,
            gap_penalty: GAP_PENALTY,
        }
    }
}

impl Scoring {
    pub fn new(match_score: i32, mismatch_penalty: i32, gap_penalty: i32) -> Self {
        Scoring {
            match_score,
            mismatch_penalty,
            gap_penalty,
        }
    }

    #[inline(always)]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }

    /// Score of a cell given its three finalized predecessors. Never negative.
    #[inline(always)]
    pub fn cell(&self, diag: i32, up: i32, left: i32, a: u8, b: u8) -> i32 {
        let diag_score = diag.saturating_add(self.substitution(a, b));
        let up_score = up.saturating_add(self.gap_penalty);
        let left_score = left.saturating_add(self.gap_penalty);

        0.max(diag_score).max(up_score).max(left_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring() {
        let scoring = Scoring::default();
        assert_eq!(scoring, Scoring::new(2, -1, -1));
    }

    #[test]
    fn test_substitution() {
        let scoring = Scoring::default();
        assert_eq!(scoring.substitution(b'A', b'A'), 2);
        assert_eq!(scoring.substitution(b'A', b'C'), -1);
    }

    #[test]
    fn test_cell_floors_at_zero() {
        let scoring = Scoring::default();
        assert_eq!(scoring.cell(0, 0, 0, b'A', b'C'), 0);
        assert_eq!(scoring.cell(0, 0, 0, b'A', b'A'), 2);
    }

    #[test]
    fn test_cell_prefers_best_predecessor() {
        let scoring = Scoring::default();
        assert_eq!(scoring.cell(3, 7, 1, b'A', b'C'), 6);
        assert_eq!(scoring.cell(3, 1, 9, b'A', b'C'), 8);
        assert_eq!(scoring.cell(3, 1, 1, b'G', b'G'), 5);
    }

    #[test]
    fn test_cell_does_not_overflow() {
        let scoring = Scoring::new(i32::MAX, -1, -1);
        assert_eq!(scoring.cell(i32::MAX, 0, 0, b'A', b'A'), i32::MAX);
    }
}
