pub const MATCH_SCORE: i32 = 2; // Score for two equal symbols
pub const MISMATCH_PENALTY: i32 = -1; // Score for a substitution
pub const GAP_PENALTY: i32 = -1; // Score for each inserted or deleted symbol (linear gaps)

pub const DNA_BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
pub const GAP_SYMBOL: u8 = b'-'; // Placeholder for a gap in a traceback

pub const DEFAULT_SEED: u64 = 42;
pub const MAX_LADDER_STEPS: usize = 10; // Maximum number of entries in a thread-count ladder

// Diagonals shorter than this are handed to a single worker, splitting them further costs more
// than computing the cells
pub const MIN_CELLS_PER_TASK: usize = 64;
