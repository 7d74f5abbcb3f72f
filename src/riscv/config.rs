/// Default memory size: 10 KiB.
pub const DEFAULT_MEMORY_SIZE: usize = 10 * 1024;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Bytes of flat memory; also the initial stack pointer.
    pub memory_size: usize,
    /// Upper bound on instructions executed by one `run_to_completion`.
    /// `None` runs until the program leaves its bounds.
    pub step_budget: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            step_budget: None,
        }
    }
}

impl Config {
    pub fn with_memory_size(mut self, bytes: usize) -> Self {
        self.memory_size = bytes;
        self
    }

    pub fn with_step_budget(mut self, budget: Option<usize>) -> Self {
        self.step_budget = budget;
        self
    }
}
