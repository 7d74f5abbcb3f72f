//! Line-by-line interpreter for RV32I assembly text.
//!
//! ```
//! use riscv_interp::riscv::Cpu;
//!
//! let mut cpu = Cpu::configure(64);
//! cpu.load(["li x1, 16", "sw x1, 4(x0)", "lw x3, 4(x0)"]);
//! cpu.run_to_completion().unwrap();
//! assert_eq!(cpu.register(3), 16);
//! ```
pub mod riscv;
