// riscv/registers.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::errors::InterpError;

pub const REGISTER_COUNT: usize = 32;

pub const ZERO: u8 = 0; // x0: always zero
pub const RA: u8 = 1; // x1: return address
pub const SP: u8 = 2; // x2: stack pointer

/// ABI name of each register, indexed by register number.
pub const ABI_NAMES: [&str; REGISTER_COUNT] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", //
    "fp", "s1", "a0", "a1", "a2", "a3", "a4", "a5", //
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", //
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

// name -> index, covering ABI names, the `s0` alias and raw `xN` names
static NAME_TO_INDEX: Lazy<HashMap<String, u8>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(REGISTER_COUNT * 2 + 1);
    for (i, name) in ABI_NAMES.iter().enumerate() {
        map.insert((*name).to_string(), i as u8);
        map.insert(format!("x{i}"), i as u8);
    }
    map.insert("s0".to_string(), 8);
    map
});

/// ABI name for a register index, e.g. `reg_name(2) == "sp"`.
pub fn reg_name(idx: u8) -> &'static str {
    ABI_NAMES.get(idx as usize).copied().unwrap_or("?")
}

/// Resolves `x0`..`x31` or an ABI name (case-insensitive) to its index.
pub fn parse_reg(name: &str) -> Result<u8, InterpError> {
    let key = name.trim().to_ascii_lowercase();
    NAME_TO_INDEX
        .get(&key)
        .copied()
        .ok_or_else(|| InterpError::InvalidRegister(name.trim().to_string()))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    x: [i32; REGISTER_COUNT], // x[0] never written
}

impl RegisterFile {
    #[inline]
    pub fn read(&self, r: u8) -> i32 {
        if r == ZERO { 0 } else { self.x[r as usize] }
    }

    #[inline]
    pub fn write(&mut self, r: u8, v: i32) {
        if r != ZERO {
            self.x[r as usize] = v;
        }
    }

    /// Snapshot of all 32 registers, x0 included.
    pub fn as_array(&self) -> [i32; REGISTER_COUNT] {
        self.x
    }
}
