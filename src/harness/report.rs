use std::fmt::Display;
use std::time::Duration;

use super::Workload;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trial<O> {
    pub threads: usize,
    /// Fastest of the repetitions
    pub elapsed: Duration,
    /// Baseline time over this time
    pub speedup: f64,
    /// Speedup over thread count
    pub efficiency: f64,
    pub output: O,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report<O> {
    pub workload: String,
    pub problem_size: usize,
    /// Ascending by thread count, the first one is the single-thread baseline
    pub trials: Vec<Trial<O>>,
    /// Every output agreed with the baseline output
    pub consistent: bool,
}

impl<O: Display> Report<O> {
    pub(crate) fn new<W: Workload<Output = O>>(
        workload: &W,
        timings: Vec<(usize, Duration, O)>,
    ) -> Self {
        let baseline = timings
            .first()
            .map_or(0.0, |(_, elapsed, _)| elapsed.as_secs_f64());

        let trials: Vec<Trial<O>> = timings
            .into_iter()
            .map(|(threads, elapsed, output)| {
                let secs = elapsed.as_secs_f64();
                let speedup = if secs > 0.0 { baseline / secs } else { 1.0 };
                Trial {
                    threads,
                    elapsed,
                    speedup,
                    efficiency: speedup / threads as f64,
                    output,
                }
            })
            .collect();

        let consistent = match trials.split_first() {
            Some((first, rest)) => rest
                .iter()
                .all(|trial| workload.consistent(&first.output, &trial.output)),
            None => true,
        };

        Report {
            workload: workload.name().to_string(),
            problem_size: workload.problem_size(),
            trials,
            consistent,
        }
    }

    pub fn baseline(&self) -> Option<&Trial<O>> {
        self.trials.first()
    }

    /// Trial with the highest speedup. Ties go to the fewest threads.
    pub fn best_speedup(&self) -> Option<&Trial<O>> {
        first_max_by(&self.trials, |trial| trial.speedup)
    }

    /// Trial with the highest efficiency. Ties go to the fewest threads.
    pub fn best_efficiency(&self) -> Option<&Trial<O>> {
        first_max_by(&self.trials, |trial| trial.efficiency)
    }
}

// `Iterator::max_by` keeps the last of equal elements, trials are ascending by thread count
fn first_max_by<O>(trials: &[Trial<O>], key: impl Fn(&Trial<O>) -> f64) -> Option<&Trial<O>> {
    trials.iter().reduce(|best, trial| {
        if key(trial).total_cmp(&key(best)).is_gt() {
            trial
        } else {
            best
        }
    })
}

impl<O: Display> Display for Report<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.workload)?;
        writeln!(f, "Problem size: {}", self.problem_size)?;
        writeln!(f, "{}", "=".repeat(70))?;
        writeln!(
            f,
            "{:<10}{:<15}{:<12}{:<15}{:<15}",
            "Threads", "Time (s)", "Speedup", "Efficiency %", "Result"
        )?;
        writeln!(f, "{}", "-".repeat(70))?;

        for trial in &self.trials {
            writeln!(
                f,
                "{:<10}{:<15.6}{:<12.2}{:<15.2}{:<15}",
                trial.threads,
                trial.elapsed.as_secs_f64(),
                trial.speedup,
                trial.efficiency * 100.0,
                trial.output.to_string()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Performance Summary:")?;
        if let Some(baseline) = self.baseline() {
            writeln!(
                f,
                "Serial time: {:.6} seconds",
                baseline.elapsed.as_secs_f64()
            )?;
        }
        if let Some(best) = self.best_speedup() {
            writeln!(
                f,
                "Best speedup: {:.2}x with {} threads",
                best.speedup, best.threads
            )?;
        }
        if let Some(best) = self.best_efficiency() {
            writeln!(f, "Best efficiency: {:.2}%", best.efficiency * 100.0)?;
        }
        match (self.baseline(), self.consistent) {
            (Some(baseline), true) => write!(f, "Result: {} (consistent)", baseline.output),
            (Some(baseline), false) => write!(f, "Result: {} (INCONSISTENT)", baseline.output),
            (None, _) => write!(f, "Result: none"),
        }
    }
}
