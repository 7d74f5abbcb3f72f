// Branches and jumps. Targets stay symbolic until execution.
use super::operands::{parse_imm, split_memop};
use super::{Tok, match_shape, mismatch};
use crate::riscv::errors::InterpError;
use crate::riscv::instruction::{BranchOp, Instruction, Target, ZeroBranchOp};
use crate::riscv::registers::{RA, ZERO, parse_reg};

// beq rs1, rs2, target
pub(super) fn decode_branch(m: &str, op: BranchOp, ops: &[&str]) -> Result<Instruction, InterpError> {
    let Some([rs1, rs2, target]) = match_shape(ops, [Tok::Reg, Tok::Reg, Tok::Value]) else {
        return Ok(mismatch(m, "rs1, rs2, target"));
    };
    Ok(Instruction::Branch {
        op,
        rs1: parse_reg(rs1)?,
        rs2: parse_reg(rs2)?,
        target: Target::parse(target),
    })
}

// beqz rs1, target
pub(super) fn decode_branch_zero(
    m: &str,
    op: ZeroBranchOp,
    ops: &[&str],
) -> Result<Instruction, InterpError> {
    let Some([rs1, target]) = match_shape(ops, [Tok::Reg, Tok::Value]) else {
        return Ok(mismatch(m, "rs1, target"));
    };
    Ok(Instruction::BranchZero {
        op,
        rs1: parse_reg(rs1)?,
        target: Target::parse(target),
    })
}

pub(super) fn decode_j(ops: &[&str]) -> Result<Instruction, InterpError> {
    Ok(match match_shape(ops, [Tok::Value]) {
        Some([target]) => Instruction::Jump { target: Target::parse(target) },
        None => mismatch("j", "target"),
    })
}

// call target  =>  jal ra, target
pub(super) fn decode_call(ops: &[&str]) -> Result<Instruction, InterpError> {
    Ok(match match_shape(ops, [Tok::Value]) {
        Some([target]) => Instruction::JumpLink { rd: RA, target: Target::parse(target) },
        None => mismatch("call", "target"),
    })
}

// jal rd, target | jal target
pub(super) fn decode_jal(ops: &[&str]) -> Result<Instruction, InterpError> {
    if let Some([rd, target]) = match_shape(ops, [Tok::Reg, Tok::Value]) {
        return Ok(Instruction::JumpLink {
            rd: parse_reg(rd)?,
            target: Target::parse(target),
        });
    }
    Ok(match match_shape(ops, [Tok::Value]) {
        Some([target]) => Instruction::JumpLink { rd: RA, target: Target::parse(target) },
        None => mismatch("jal", "rd, target"),
    })
}

// jalr rd, rs1, imm | jalr rd, imm(rs1) | jalr rs1
pub(super) fn decode_jalr(ops: &[&str]) -> Result<Instruction, InterpError> {
    if let Some([rd, rs1, imm]) = match_shape(ops, [Tok::Reg, Tok::Reg, Tok::Value]) {
        return Ok(Instruction::JumpLinkReg {
            rd: parse_reg(rd)?,
            rs1: parse_reg(rs1)?,
            imm: parse_imm(imm)?,
        });
    }
    if let Some([rd, addr]) = match_shape(ops, [Tok::Reg, Tok::Mem]) {
        if let Some((imm, rs1)) = split_memop(addr) {
            return Ok(Instruction::JumpLinkReg {
                rd: parse_reg(rd)?,
                rs1: parse_reg(rs1)?,
                imm: parse_imm(imm)?,
            });
        }
    }
    Ok(match match_shape(ops, [Tok::Reg]) {
        Some([rs1]) => Instruction::JumpLinkReg { rd: RA, rs1: parse_reg(rs1)?, imm: 0 },
        None => mismatch("jalr", "rd, rs1, imm"),
    })
}

// jr rs1  =>  jalr zero, rs1, 0
pub(super) fn decode_jr(ops: &[&str]) -> Result<Instruction, InterpError> {
    Ok(match match_shape(ops, [Tok::Reg]) {
        Some([rs1]) => Instruction::JumpLinkReg { rd: ZERO, rs1: parse_reg(rs1)?, imm: 0 },
        None => mismatch("jr", "rs1"),
    })
}

// ret  =>  jalr zero, ra, 0
pub(super) fn decode_ret(ops: &[&str]) -> Result<Instruction, InterpError> {
    Ok(if ops.is_empty() {
        Instruction::JumpLinkReg { rd: ZERO, rs1: RA, imm: 0 }
    } else {
        mismatch("ret", "")
    })
}
