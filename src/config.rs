/// Configuration for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of steps a task walks before it forks its branches into child tasks at the next branch point.
    /// `0` never forks, which makes the search a plain depth-first search on one task.
    pub fork_after: usize,
    /// Number of worker threads in the pool running the search. [`None`] uses the available hardware parallelism.
    pub threads: Option<usize>,
}

impl SolverConfig {
    /// Set the fork threshold.
    pub fn with_fork_after(mut self, fork_after: usize) -> Self {
        self.fork_after = fork_after;
        self
    }

    /// Set the number of worker threads; at least one is always used.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    /// Set the number of worker threads from an Option.
    pub fn with_threads_option(mut self, threads: Option<usize>) -> Self {
        self.threads = threads.map(|threads| threads.max(1));
        self
    }

    /// Whether tasks ever fork under this configuration.
    pub fn forks(&self) -> bool {
        self.fork_after > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_never_forks() {
        let config = SolverConfig::default();
        assert!(!config.forks());
        assert_eq!(config.threads, None);
    }

    #[test]
    fn threads_are_clamped() {
        assert_eq!(SolverConfig::default().with_threads(0).threads, Some(1));
        assert_eq!(SolverConfig::default().with_threads_option(Some(0)).threads, Some(1));
        assert_eq!(SolverConfig::default().with_threads_option(None).threads, None);
        assert!(SolverConfig::default().with_fork_after(3).forks());
    }
}
