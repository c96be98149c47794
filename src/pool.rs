use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{AlignError, Result};

/// Builds a dedicated worker pool with exactly `threads` workers.
///
/// Every run gets its own pool so the degree of parallelism is explicit and never taken from
/// the global rayon pool.
pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    if threads == 0 {
        return Err(AlignError::invalid("thread count must be at least 1"));
    }

    debug!("building worker pool with {threads} thread(s)");
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("wavefront-worker-{idx}"))
        .build()?;
    Ok(pool)
}

/// Number of threads the machine can run in parallel, falling back to 1
pub fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
