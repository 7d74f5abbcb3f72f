use super::operands::{parse_imm, split_memop};
use super::{Tok, match_shape, mismatch};
use crate::riscv::errors::InterpError;
use crate::riscv::instruction::{Instruction, LoadImmOp, LoadOp, StoreOp};
use crate::riscv::registers::parse_reg;

// li/lui/auipc rd, imm
pub(super) fn decode_load_imm(m: &str, op: LoadImmOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    let Some([rd, imm]) = match_shape(ops, [Tok::Reg, Tok::Value]) else {
        return Ok(mismatch(m, "rd, imm"));
    };
    Ok(Instruction::LoadImm {
        op,
        rd: parse_reg(rd)?,
        imm: parse_imm(imm)?,
    })
}

/// `reg, imm(base)` -> (reg, imm, base)
fn memop(ops: &[&str]) -> Result<Option<(u8, i32, u8)>, InterpError> {
    let Some([reg, addr]) = match_shape(ops, [Tok::Reg, Tok::Mem]) else {
        return Ok(None);
    };
    let Some((imm, base)) = split_memop(addr) else {
        return Ok(None);
    };
    Ok(Some((parse_reg(reg)?, parse_imm(imm)?, parse_reg(base)?)))
}

// lw rd, imm(rs1)
pub(super) fn decode_load(m: &str, op: LoadOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    Ok(match memop(ops)? {
        Some((rd, imm, rs1)) => Instruction::Load { op, rd, rs1, imm },
        None => mismatch(m, "rd, imm(rs1)"),
    })
}

// sw rs2, imm(rs1)
pub(super) fn decode_store(m: &str, op: StoreOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    Ok(match memop(ops)? {
        Some((rs2, imm, rs1)) => Instruction::Store { op, rs2, rs1, imm },
        None => mismatch(m, "rs2, imm(rs1)"),
    })
}
