use std::time::{Duration, Instant};

/// Collects wall-clock timings of repeated runs over the same input.
pub struct TimingRuns {
    timings: Vec<Duration>,
    time: Instant,
    n_items: usize,
}

impl TimingRuns {
    pub fn new(n_runs: usize, n_items: usize) -> Self {
        Self {
            timings: Vec::with_capacity(n_runs),
            time: Instant::now(),
            n_items: n_items.max(1),
        }
    }

    #[inline(always)]
    pub fn start(&mut self) {
        self.time = Instant::now();
    }

    #[inline(always)]
    pub fn stop(&mut self) {
        self.timings.push(self.time.elapsed());
    }

    /// Returns minimum, maximum, average time per item in nanosecs, or
    /// `None` if no run was recorded.
    pub fn per_item(&self) -> Option<(f64, f64, f64)> {
        let n = self.n_items as f64;
        let min = self.timings.iter().min()?.as_nanos() as f64 / n;
        let max = self.timings.iter().max()?.as_nanos() as f64 / n;
        let total: Duration = self.timings.iter().sum();
        let avg = total.as_nanos() as f64 / (self.timings.len() as f64 * n);
        Some((min, max, avg))
    }

    /// Returns the fastest run.
    pub fn best(&self) -> Option<Duration> {
        self.timings.iter().min().copied()
    }
}

/// Returns the type name of its argument.
pub fn type_of<T>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}
