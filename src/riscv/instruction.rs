// riscv/instruction.rs
//
// Instructions are grouped by how they are written in assembly, not by their
// machine encoding format.
use std::fmt;

use super::errors::InterpError;
use super::registers::reg_name;

/// Arithmetic/logical operators shared by the register-register and
/// register-immediate families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add, Sub, Mul, Div, Rem,
    And, Or, Xor,
    Sll, Srl, Sra,
}

impl AluOp {
    /// Wrapping two's-complement semantics; shift amounts use the low 5 bits.
    pub fn apply(self, a: i32, b: i32) -> Result<i32, InterpError> {
        let shamt = (b as u32) & 0x1F;
        Ok(match self {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mul => a.wrapping_mul(b),
            AluOp::Div => {
                if b == 0 {
                    return Err(InterpError::DivisionByZero);
                }
                a.wrapping_div(b)
            }
            AluOp::Rem => {
                if b == 0 {
                    return Err(InterpError::DivisionByZero);
                }
                a.wrapping_rem(b)
            }
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Xor => a ^ b,
            AluOp::Sll => ((a as u32) << shamt) as i32,
            AluOp::Srl => ((a as u32) >> shamt) as i32,
            AluOp::Sra => a >> shamt,
        })
    }

    fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "add", AluOp::Sub => "sub", AluOp::Mul => "mul",
            AluOp::Div => "div", AluOp::Rem => "rem", AluOp::And => "and",
            AluOp::Or => "or", AluOp::Xor => "xor", AluOp::Sll => "sll",
            AluOp::Srl => "srl", AluOp::Sra => "sra",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadImmOp { Li, Lui, Auipc }

impl LoadImmOp {
    pub fn apply(self, pc: u32, imm: i32) -> i32 {
        match self {
            LoadImmOp::Li => imm,
            LoadImmOp::Lui => imm.wrapping_shl(12),
            LoadImmOp::Auipc => (pc as i32).wrapping_add(imm.wrapping_shl(12)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOp { Lw, Lh, Lhu, Lb, Lbu }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp { Sw, Sh, Sb }

/// Two-register branch conditions. The `u` variants compare as unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOp { Eq, Ne, Lt, Ltu, Gt, Gtu, Le, Leu, Ge, Geu }

impl BranchOp {
    pub fn taken(self, a: i32, b: i32) -> bool {
        let (ua, ub) = (a as u32, b as u32);
        match self {
            BranchOp::Eq => a == b,
            BranchOp::Ne => a != b,
            BranchOp::Lt => a < b,
            BranchOp::Ltu => ua < ub,
            BranchOp::Gt => a > b,
            BranchOp::Gtu => ua > ub,
            BranchOp::Le => a <= b,
            BranchOp::Leu => ua <= ub,
            BranchOp::Ge => a >= b,
            BranchOp::Geu => ua >= ub,
        }
    }
}

/// Register-versus-zero branch conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroBranchOp { Eqz, Nez, Ltz, Gtz, Lez, Gez }

impl ZeroBranchOp {
    pub fn taken(self, a: i32) -> bool {
        match self {
            ZeroBranchOp::Eqz => a == 0,
            ZeroBranchOp::Nez => a != 0,
            ZeroBranchOp::Ltz => a < 0,
            ZeroBranchOp::Gtz => a > 0,
            ZeroBranchOp::Lez => a <= 0,
            ZeroBranchOp::Gez => a >= 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp { Lt, Ltu }

impl SetOp {
    pub fn apply(self, a: i32, b: i32) -> i32 {
        let v = match self {
            SetOp::Lt => a < b,
            SetOp::Ltu => (a as u32) < (b as u32),
        };
        v as i32
    }
}

/// Branch/jump destination: a byte displacement from the current PC or a
/// label looked up when the instruction executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Offset(i32),
    Label(String),
}

impl Target {
    pub fn parse(tok: &str) -> Self {
        match tok.parse::<i32>() {
            Ok(v) => Target::Offset(v),
            Err(_) => Target::Label(tok.to_string()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Offset(v) => write!(f, "{v}"),
            Target::Label(l) => f.write_str(l),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `rd = op(rs1, rs2)`
    Reg { op: AluOp, rd: u8, rs1: u8, rs2: u8 },
    /// `rd = op(rs1, imm)`
    Imm { op: AluOp, rd: u8, rs1: u8, imm: i32 },
    /// `li` / `lui` / `auipc`
    LoadImm { op: LoadImmOp, rd: u8, imm: i32 },
    Load { op: LoadOp, rd: u8, rs1: u8, imm: i32 },
    Store { op: StoreOp, rs2: u8, rs1: u8, imm: i32 },
    Branch { op: BranchOp, rs1: u8, rs2: u8, target: Target },
    BranchZero { op: ZeroBranchOp, rs1: u8, target: Target },
    Jump { target: Target },
    JumpLink { rd: u8, target: Target },
    JumpLinkReg { rd: u8, rs1: u8, imm: i32 },
    Set { op: SetOp, rd: u8, rs1: u8, rs2: u8 },
    SetImm { op: SetOp, rd: u8, rs1: u8, imm: i32 },
    /// Anything the decoder could not match; advances one slot.
    NoOp { reason: String },
}

impl Instruction {
    pub fn noop(reason: impl Into<String>) -> Self {
        Instruction::NoOp { reason: reason.into() }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        let r = reg_name;
        match self {
            Reg { op, rd, rs1, rs2 } => {
                write!(f, "{} {}, {}, {}", op.mnemonic(), r(*rd), r(*rs1), r(*rs2))
            }
            Imm { op, rd, rs1, imm } => {
                write!(f, "{}i {}, {}, {imm}", op.mnemonic(), r(*rd), r(*rs1))
            }
            LoadImm { op, rd, imm } => {
                let m = match op {
                    LoadImmOp::Li => "li",
                    LoadImmOp::Lui => "lui",
                    LoadImmOp::Auipc => "auipc",
                };
                write!(f, "{m} {}, {imm}", r(*rd))
            }
            Load { op, rd, rs1, imm } => {
                let m = format!("{op:?}").to_lowercase();
                write!(f, "{m} {}, {imm}({})", r(*rd), r(*rs1))
            }
            Store { op, rs2, rs1, imm } => {
                let m = format!("{op:?}").to_lowercase();
                write!(f, "{m} {}, {imm}({})", r(*rs2), r(*rs1))
            }
            Branch { op, rs1, rs2, target } => {
                let m = format!("b{op:?}").to_lowercase();
                write!(f, "{m} {}, {}, {target}", r(*rs1), r(*rs2))
            }
            BranchZero { op, rs1, target } => {
                let m = format!("b{op:?}").to_lowercase();
                write!(f, "{m} {}, {target}", r(*rs1))
            }
            Jump { target } => write!(f, "j {target}"),
            JumpLink { rd, target } => write!(f, "jal {}, {target}", r(*rd)),
            JumpLinkReg { rd, rs1, imm } => write!(f, "jalr {}, {}, {imm}", r(*rd), r(*rs1)),
            Set { op, rd, rs1, rs2 } => {
                let m = format!("s{op:?}").to_lowercase();
                write!(f, "{m} {}, {}, {}", r(*rd), r(*rs1), r(*rs2))
            }
            SetImm { op, rd, rs1, imm } => {
                let m = match op {
                    SetOp::Lt => "slti",
                    SetOp::Ltu => "sltiu",
                };
                write!(f, "{m} {}, {}, {imm}", r(*rd), r(*rs1))
            }
            NoOp { reason } => write!(f, "nop ({reason})"),
        }
    }
}
