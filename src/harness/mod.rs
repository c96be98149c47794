//! Speedup/efficiency harness shared by every benchmark workload.
//!
//! A [`Workload`] prepares its input outside the timed region and runs on whatever pool the
//! harness hands it. The harness sweeps the configured thread counts, keeps the fastest of the
//! repetitions for each, and turns the timings into a [`Report`].

use std::fmt::Display;
use std::time::{Duration, Instant};

use log::{info, warn};
use rayon::ThreadPool;

use crate::error::{AlignError, Result};
use crate::pool::{available_threads, build_pool};
use crate::r#const::MAX_LADDER_STEPS;

mod report;

pub use report::{Report, Trial};

pub trait Workload {
    /// Data reset before every timed run
    type Input;
    type Output: Display;

    fn name(&self) -> &str;

    /// Size shown in the report header, in the workload's own unit
    fn problem_size(&self) -> usize;

    /// Builds fresh input. Not timed.
    fn prepare(&self) -> Result<Self::Input>;

    /// The timed region
    fn run(&self, input: &mut Self::Input, pool: &ThreadPool) -> Result<Self::Output>;

    /// Whether `output` agrees with the single-thread `baseline`
    fn consistent(&self, baseline: &Self::Output, output: &Self::Output) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HarnessConfig {
    /// Thread counts to measure. 1 is always measured as the baseline.
    pub thread_counts: Vec<usize>,
    /// Timed runs per thread count, the fastest one is kept
    pub repetitions: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            thread_counts: thread_ladder(available_threads()),
            repetitions: 1,
        }
    }
}

/// `1, 2, 4, 8, ...` up to `max_threads`, at most [`MAX_LADDER_STEPS`] entries
pub fn thread_ladder(max_threads: usize) -> Vec<usize> {
    std::iter::successors(Some(1usize), |&t| t.checked_mul(2))
        .take_while(|&t| t <= max_threads.max(1))
        .take(MAX_LADDER_STEPS)
        .collect()
}

pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Result<Self> {
        if config.repetitions == 0 {
            return Err(AlignError::invalid("repetitions must be at least 1"));
        }
        if config.thread_counts.contains(&0) {
            return Err(AlignError::invalid("thread counts must be at least 1"));
        }
        Ok(Harness { config })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Thread counts in measurement order: ascending, deduplicated, starting at 1
    fn degrees(&self) -> Vec<usize> {
        let mut degrees = self.config.thread_counts.clone();
        degrees.push(1);
        degrees.sort_unstable();
        degrees.dedup();
        degrees
    }

    pub fn run<W: Workload>(&self, workload: &W) -> Result<Report<W::Output>> {
        let mut timings = Vec::new();

        for threads in self.degrees() {
            let pool = build_pool(threads)?;
            let mut best: Option<(Duration, W::Output)> = None;

            for _ in 0..self.config.repetitions {
                let mut input = workload.prepare()?;

                let start = Instant::now();
                let output = workload.run(&mut input, &pool)?;
                let elapsed = start.elapsed();

                if best.as_ref().is_none_or(|(fastest, _)| elapsed < *fastest) {
                    best = Some((elapsed, output));
                }
            }

            // repetitions >= 1 is checked in `new`
            if let Some((elapsed, output)) = best {
                info!(
                    "{}: {} thread(s) took {:.6}s -> {}",
                    workload.name(),
                    threads,
                    elapsed.as_secs_f64(),
                    output
                );
                timings.push((threads, elapsed, output));
            }
        }

        let report = Report::new(workload, timings);
        if !report.consistent {
            warn!("{}: results differ between thread counts", workload.name());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        prepared: AtomicUsize,
    }

    impl Workload for Counting {
        type Input = Vec<u64>;
        type Output = u64;

        fn name(&self) -> &str {
            "counting"
        }

        fn problem_size(&self) -> usize {
            1000
        }

        fn prepare(&self) -> Result<Self::Input> {
            self.prepared.fetch_add(1, Ordering::Relaxed);
            Ok((0..1000).collect())
        }

        fn run(&self, input: &mut Self::Input, pool: &ThreadPool) -> Result<Self::Output> {
            use rayon::prelude::*;
            Ok(pool.install(|| input.par_iter().sum()))
        }

        fn consistent(&self, baseline: &u64, output: &u64) -> bool {
            baseline == output
        }
    }

    #[test]
    fn test_thread_ladder() {
        assert_eq!(thread_ladder(1), vec![1]);
        assert_eq!(thread_ladder(6), vec![1, 2, 4]);
        assert_eq!(thread_ladder(8), vec![1, 2, 4, 8]);
        assert_eq!(thread_ladder(0), vec![1]);
        assert_eq!(thread_ladder(usize::MAX).len(), MAX_LADDER_STEPS);
    }

    #[test]
    fn test_baseline_always_measured() {
        let harness = Harness::new(HarnessConfig {
            thread_counts: vec![4, 2, 2],
            repetitions: 3,
        })
        .unwrap();
        let workload = Counting {
            prepared: AtomicUsize::new(0),
        };

        let report = harness.run(&workload).unwrap();
        let threads: Vec<usize> = report.trials.iter().map(|t| t.threads).collect();
        assert_eq!(threads, vec![1, 2, 4]);
        assert_eq!(workload.prepared.load(Ordering::Relaxed), 9);
        assert!(report.consistent);
        assert!(report.trials.iter().all(|t| t.output == 499_500));
        assert_eq!(report.trials[0].speedup, 1.0);
        assert_eq!(report.problem_size, 1000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let zero_reps = HarnessConfig {
            repetitions: 0,
            ..Default::default()
        };
        assert!(Harness::new(zero_reps).is_err());

        let zero_threads = HarnessConfig {
            thread_counts: vec![0, 2],
            ..Default::default()
        };
        assert!(Harness::new(zero_threads).is_err());
    }
}
