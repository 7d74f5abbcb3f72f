use thiserror::Error;

/// Conditions that abort a step. Anything else degrades to a no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpError {
    /// Operand names a register that does not exist.
    #[error("invalid register: {0}")]
    InvalidRegister(String),

    /// Immediate is not a base-10 signed 32-bit integer.
    #[error("immediate parse error: {0}")]
    InvalidImmediate(String),

    /// Branch or jump names a label the program never defines.
    #[error("unresolved label: {0}")]
    UnresolvedLabel(String),

    /// `div` or `rem` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `run_to_completion` hit the configured step budget.
    #[error("step budget of {0} instructions exhausted")]
    StepBudgetExhausted(usize),
}

/// A fatal error together with where in the program it happened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line} (pc {pc}): {source}")]
pub struct StepError {
    /// 1-based line number in the loaded program.
    pub line: usize,
    pub pc: u32,
    #[source]
    pub source: InterpError,
}
