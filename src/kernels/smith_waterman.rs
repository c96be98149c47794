use rayon::ThreadPool;

use crate::error::Result;
use crate::generate::{generate_sequence_pair, SequencePairOptions};
use crate::harness::Workload;
use crate::scoring::Scoring;
use crate::wavefront::align_in_pool;

/// Local alignment of a generated DNA pair, wavefront-parallel above one thread
pub struct SmithWaterman {
    seq1: Vec<u8>,
    seq2: Vec<u8>,
    scoring: Scoring,
}

impl SmithWaterman {
    pub fn new(seq1: Vec<u8>, seq2: Vec<u8>, scoring: Scoring) -> Self {
        SmithWaterman {
            seq1,
            seq2,
            scoring,
        }
    }

    pub fn generated(options: &SequencePairOptions, scoring: Scoring) -> Self {
        let (seq1, seq2) = generate_sequence_pair(options);
        Self::new(seq1, seq2, scoring)
    }
}

impl Workload for SmithWaterman {
    type Input = ();
    type Output = i32;

    fn name(&self) -> &str {
        "Smith-Waterman DNA Sequence Alignment"
    }

    fn problem_size(&self) -> usize {
        self.seq1.len()
    }

    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn run(&self, _: &mut (), pool: &ThreadPool) -> Result<i32> {
        align_in_pool(&self.seq1, &self.seq2, self.scoring, pool)
    }

    fn consistent(&self, baseline: &i32, output: &i32) -> bool {
        baseline == output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{Harness, HarnessConfig};

    #[test]
    fn test_scores_agree_across_threads() {
        let options = SequencePairOptions {
            length: 300,
            ..Default::default()
        };
        let workload = SmithWaterman::generated(&options, Scoring::default());
        let harness = Harness::new(HarnessConfig {
            thread_counts: vec![1, 2, 4],
            repetitions: 1,
        })
        .unwrap();

        let report = harness.run(&workload).unwrap();
        assert!(report.consistent);
        assert_eq!(report.trials.len(), 3);
        assert!(report.trials[0].output >= 100);
        assert_eq!(report.problem_size, 300);
    }
}
