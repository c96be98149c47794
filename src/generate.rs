use std::fmt::Display;
use std::ops::Range;

use rand::prelude::*;

use crate::r#const::{DEFAULT_SEED, DNA_BASES};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencePairOptions {
    /// Seed for the random number generator to ensure consistent data
    pub seed: u64,
    /// Length of both sequences
    pub length: usize,
    /// Positions of the second sequence copied from the first, clipped to the length
    pub shared_region: Option<Range<usize>>,
}

impl Default for SequencePairOptions {
    fn default() -> Self {
        SequencePairOptions {
            seed: DEFAULT_SEED,
            length: 500,
            shared_region: Some(50..100),
        }
    }
}

impl Display for SequencePairOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "length_{}/seed_{}", self.length, self.seed)?;
        if let Some(region) = &self.shared_region {
            write!(f, "/shared_{}..{}", region.start, region.end)?;
        }
        Ok(())
    }
}

/// Generates a uniformly random DNA sequence
pub fn generate_sequence(rng: &mut impl Rng, length: usize) -> Vec<u8> {
    (0..length)
        .map(|_| DNA_BASES[rng.random_range(0..DNA_BASES.len())])
        .collect()
}

/// Generates two random DNA sequences of the same length. Symbols are drawn alternately for the
/// two sequences, then the shared region of the second is overwritten with the first, planting
/// a known common fragment.
pub fn generate_sequence_pair(options: &SequencePairOptions) -> (Vec<u8>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(options.seed);

    let mut seq1 = Vec::with_capacity(options.length);
    let mut seq2 = Vec::with_capacity(options.length);
    for _ in 0..options.length {
        seq1.push(DNA_BASES[rng.random_range(0..DNA_BASES.len())]);
        seq2.push(DNA_BASES[rng.random_range(0..DNA_BASES.len())]);
    }

    if let Some(region) = &options.shared_region {
        let end = region.end.min(options.length);
        let start = region.start.min(end);
        seq2[start..end].copy_from_slice(&seq1[start..end]);
    }

    (seq1, seq2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_pair() {
        let options = SequencePairOptions::default();
        assert_eq!(
            generate_sequence_pair(&options),
            generate_sequence_pair(&options)
        );
    }

    #[test]
    fn test_pair_is_dna_with_shared_region() {
        let (seq1, seq2) = generate_sequence_pair(&SequencePairOptions::default());
        assert_eq!(seq1.len(), 500);
        assert_eq!(seq2.len(), 500);
        assert!(seq1.iter().chain(&seq2).all(|c| DNA_BASES.contains(c)));
        assert_eq!(seq1[50..100], seq2[50..100]);
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shared_region_is_clipped() {
        let (seq1, seq2) = generate_sequence_pair(&SequencePairOptions {
            length: 70,
            ..Default::default()
        });
        assert_eq!(seq1[50..70], seq2[50..70]);

        let (seq1, seq2) = generate_sequence_pair(&SequencePairOptions {
            length: 10,
            ..Default::default()
        });
        assert_eq!(seq1.len(), 10);
        assert_eq!(seq2.len(), 10);
    }

    #[test]
    fn test_generate_sequence_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let seq = generate_sequence(&mut rng, 33);
        assert_eq!(seq.len(), 33);
        assert!(seq.iter().all(|c| DNA_BASES.contains(c)));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SequencePairOptions::default().to_string(),
            "length_500/seed_42/shared_50..100"
        );
    }
}
