pub mod config;
pub mod cpu;
pub mod decoder;
pub mod errors;
pub mod exec;
pub mod instruction;
pub mod memory;
pub mod program;
pub mod registers;

pub use config::Config;
pub use cpu::Cpu;
pub use decoder::decode;
pub use errors::{InterpError, StepError};
pub use instruction::Instruction;
pub use program::BASE_ADDRESS;
