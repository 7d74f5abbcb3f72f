// riscv/cpu.rs
use std::collections::HashMap;

use super::config::Config;
use super::decoder::decode;
use super::errors::{InterpError, StepError};
use super::exec::execute;
use super::instruction::Instruction;
use super::memory::Memory;
use super::program::{BASE_ADDRESS, Program};
use super::registers::{REGISTER_COUNT, RegisterFile, SP};

/// Processor state plus the program it is running.
///
/// The engine is either *ready* (the PC points at a loaded line) or *done*.
/// Each step decodes the current line from scratch, so edits to the program
/// text between steps take effect immediately after the next `load`.
#[derive(Debug, Clone)]
pub struct Cpu {
    pub(super) pc: u32,
    pub(super) regs: RegisterFile,
    pub(super) mem: Memory,
    pub(super) program: Program,
    pub(super) done: bool,
    config: Config,
}

impl Cpu {
    pub fn new(config: Config) -> Self {
        let mut regs = RegisterFile::default();
        regs.write(SP, stack_top(&config));
        Self {
            pc: BASE_ADDRESS,
            regs,
            mem: Memory::new(config.memory_size),
            program: Program::default(),
            done: true,
            config,
        }
    }

    /// Zero-filled processor with `memory_size` bytes and `sp` preset to it.
    pub fn configure(memory_size: usize) -> Self {
        Self::new(Config::default().with_memory_size(memory_size))
    }

    /// Replaces the program text and rebuilds the label table.
    ///
    /// Registers, memory and the PC are left alone; if the PC no longer
    /// points into the new program the engine becomes done.
    pub fn load<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.program = Program::new(lines);
        self.refresh_done();
    }

    /// Clears registers, memory and history and rewinds the PC. The loaded
    /// program is kept.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::default();
        self.regs.write(SP, stack_top(&self.config));
        self.mem.clear();
        self.pc = BASE_ADDRESS;
        self.refresh_done();
    }

    fn refresh_done(&mut self) {
        self.done = self.program.slot(self.pc).is_none();
    }

    /// Executes the line at the PC. Does nothing once the engine is done.
    pub fn single_step(&mut self) -> Result<(), StepError> {
        if self.done {
            return Ok(());
        }
        let Some(idx) = self.program.slot(self.pc) else {
            self.done = true;
            return Ok(());
        };

        let pc = self.pc;
        let fail = |source: InterpError| StepError { line: idx + 1, pc, source };

        let instr = decode(&self.program.lines()[idx]).map_err(fail)?;
        match &instr {
            Instruction::NoOp { reason } => log::debug!("pc {pc}: skipping line {}: {reason}", idx + 1),
            other => log::trace!("pc {pc}: {other}"),
        }
        execute(self, &instr).map_err(fail)?;

        self.refresh_done();
        Ok(())
    }

    /// Runs from the first line until the PC leaves the program, then rewinds
    /// to the first line so the program can be run again.
    ///
    /// Registers and memory are *not* reset between runs. Returns the number
    /// of instructions executed.
    pub fn run_to_completion(&mut self) -> Result<usize, StepError> {
        self.pc = BASE_ADDRESS;
        self.refresh_done();

        let mut steps = 0usize;
        while !self.done {
            if let Some(budget) = self.config.step_budget {
                if steps >= budget {
                    return Err(StepError {
                        line: self.program.slot(self.pc).map_or(0, |i| i + 1),
                        pc: self.pc,
                        source: InterpError::StepBudgetExhausted(budget),
                    });
                }
            }
            self.single_step()?;
            steps += 1;
        }
        log::debug!("run finished after {steps} steps at pc {}", self.pc);

        self.pc = BASE_ADDRESS;
        self.done = false;
        Ok(steps)
    }

    /// Caps the number of instructions one `run_to_completion` may execute.
    pub fn set_step_budget(&mut self, budget: Option<usize>) {
        self.config.step_budget = budget;
    }

    // ---------- state queries ----------

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Line the PC points at, for display.
    pub fn current_line(&self) -> Option<&str> {
        self.program.line_at(self.pc)
    }

    pub fn registers(&self) -> [i32; REGISTER_COUNT] {
        self.regs.as_array()
    }

    pub fn register(&self, r: u8) -> i32 {
        self.regs.read(r)
    }

    pub fn memory(&self) -> &[u8] {
        self.mem.as_bytes()
    }

    /// Memory access log, most recent first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.mem.history()
    }

    pub fn labels(&self) -> &HashMap<String, u32> {
        self.program.labels()
    }

    pub fn lines(&self) -> &[String] {
        self.program.lines()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Initial `sp`: the memory size, saturated to `i32::MAX`.
fn stack_top(config: &Config) -> i32 {
    i32::try_from(config.memory_size).unwrap_or(i32::MAX)
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
