use super::operands::parse_imm;
use super::{Tok, match_shape, mismatch};
use crate::riscv::errors::InterpError;
use crate::riscv::instruction::{AluOp, Instruction, SetOp};
use crate::riscv::registers::parse_reg;

pub(super) fn decode_reg(m: &str, op: AluOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    let Some([rd, rs1, rs2]) = match_shape(ops, [Tok::Reg, Tok::Reg, Tok::Reg]) else {
        return Ok(mismatch(m, "rd, rs1, rs2"));
    };
    Ok(Instruction::Reg {
        op,
        rd: parse_reg(rd)?,
        rs1: parse_reg(rs1)?,
        rs2: parse_reg(rs2)?,
    })
}

pub(super) fn decode_imm(m: &str, op: AluOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    let Some([rd, rs1, imm]) = match_shape(ops, [Tok::Reg, Tok::Reg, Tok::Value]) else {
        return Ok(mismatch(m, "rd, rs1, imm"));
    };
    Ok(Instruction::Imm {
        op,
        rd: parse_reg(rd)?,
        rs1: parse_reg(rs1)?,
        imm: parse_imm(imm)?,
    })
}

pub(super) fn decode_set(m: &str, op: SetOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    let Some([rd, rs1, rs2]) = match_shape(ops, [Tok::Reg, Tok::Reg, Tok::Reg]) else {
        return Ok(mismatch(m, "rd, rs1, rs2"));
    };
    Ok(Instruction::Set {
        op,
        rd: parse_reg(rd)?,
        rs1: parse_reg(rs1)?,
        rs2: parse_reg(rs2)?,
    })
}

pub(super) fn decode_set_imm(m: &str, op: SetOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    let Some([rd, rs1, imm]) = match_shape(ops, [Tok::Reg, Tok::Reg, Tok::Value]) else {
        return Ok(mismatch(m, "rd, rs1, imm"));
    };
    Ok(Instruction::SetImm {
        op,
        rd: parse_reg(rd)?,
        rs1: parse_reg(rs1)?,
        imm: parse_imm(imm)?,
    })
}

// mv rd, rs  =>  addi rd, rs, 0
pub(super) fn decode_mv(ops: &[&str]) -> Result<Instruction, InterpError> {
    let Some([rd, rs]) = match_shape(ops, [Tok::Reg, Tok::Reg]) else {
        return Ok(mismatch("mv", "rd, rs"));
    };
    Ok(Instruction::Imm {
        op: AluOp::Add,
        rd: parse_reg(rd)?,
        rs1: parse_reg(rs)?,
        imm: 0,
    })
}
