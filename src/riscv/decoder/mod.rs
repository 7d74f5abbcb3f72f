//! Text decoder: one assembly line in, one [`Instruction`] out.
//!
//! Decoding is stateless and works a single line at a time, so the engine
//! can re-decode whatever line the PC points at on every step. Lines whose
//! mnemonic or operand shape is not recognised become
//! [`Instruction::NoOp`]; only bad register names and bad immediates are
//! errors.

mod alu;
mod flow;
mod mem;
pub(crate) mod operands;

#[cfg(test)]
mod tests;

use crate::riscv::errors::InterpError;
use crate::riscv::instruction::*;
use operands::{is_value, is_word, split_label, split_memop, split_operands, strip_comment};

// ---------- mnemonic tables ----------

const REG_OPS: &[(&str, AluOp)] = &[
    ("add", AluOp::Add), ("sub", AluOp::Sub), ("mul", AluOp::Mul),
    ("div", AluOp::Div), ("rem", AluOp::Rem), ("and", AluOp::And),
    ("or", AluOp::Or), ("xor", AluOp::Xor), ("sll", AluOp::Sll),
    ("srl", AluOp::Srl), ("sra", AluOp::Sra),
];

const IMM_OPS: &[(&str, AluOp)] = &[
    ("addi", AluOp::Add), ("andi", AluOp::And), ("ori", AluOp::Or),
    ("xori", AluOp::Xor), ("slli", AluOp::Sll), ("srli", AluOp::Srl),
    ("srai", AluOp::Sra),
];

const LOAD_IMM_OPS: &[(&str, LoadImmOp)] = &[
    ("li", LoadImmOp::Li), ("lui", LoadImmOp::Lui), ("auipc", LoadImmOp::Auipc),
];

const LOAD_OPS: &[(&str, LoadOp)] = &[
    ("lw", LoadOp::Lw), ("lh", LoadOp::Lh), ("lhu", LoadOp::Lhu),
    ("lb", LoadOp::Lb), ("lbu", LoadOp::Lbu),
];

const STORE_OPS: &[(&str, StoreOp)] = &[
    ("sw", StoreOp::Sw), ("sh", StoreOp::Sh), ("sb", StoreOp::Sb),
];

const BRANCH_OPS: &[(&str, BranchOp)] = &[
    ("beq", BranchOp::Eq), ("bne", BranchOp::Ne),
    ("blt", BranchOp::Lt), ("bltu", BranchOp::Ltu),
    ("bgt", BranchOp::Gt), ("bgtu", BranchOp::Gtu),
    ("ble", BranchOp::Le), ("bleu", BranchOp::Leu),
    ("bge", BranchOp::Ge), ("bgeu", BranchOp::Geu),
];

const ZERO_BRANCH_OPS: &[(&str, ZeroBranchOp)] = &[
    ("beqz", ZeroBranchOp::Eqz), ("bnez", ZeroBranchOp::Nez),
    ("bltz", ZeroBranchOp::Ltz), ("bgtz", ZeroBranchOp::Gtz),
    ("blez", ZeroBranchOp::Lez), ("bgez", ZeroBranchOp::Gez),
];

const SET_OPS: &[(&str, SetOp)] = &[("slt", SetOp::Lt), ("sltu", SetOp::Ltu)];

const SET_IMM_OPS: &[(&str, SetOp)] = &[("slti", SetOp::Lt), ("sltiu", SetOp::Ltu)];

fn lookup<T: Copy>(table: &[(&str, T)], mnemonic: &str) -> Option<T> {
    table.iter().find(|(m, _)| *m == mnemonic).map(|(_, op)| *op)
}

// ---------- operand shapes ----------

/// What a single operand slot has to look like.
#[derive(Debug, Clone, Copy)]
enum Tok {
    /// register name
    Reg,
    /// immediate or branch target
    Value,
    /// `offset(base)`
    Mem,
}

/// Returns the operands as a fixed-size array when their count and form
/// match `shape`.
fn match_shape<'a, const N: usize>(
    ops: &[&'a str],
    shape: [Tok; N],
) -> Option<[&'a str; N]> {
    let ops = <[&'a str; N]>::try_from(ops).ok()?;
    let fits = shape.iter().zip(ops.iter()).all(|(kind, tok)| match kind {
        Tok::Reg => is_word(tok),
        Tok::Value => is_value(tok),
        Tok::Mem => split_memop(tok).is_some(),
    });
    fits.then_some(ops)
}

fn mismatch(mnemonic: &str, expected: &str) -> Instruction {
    Instruction::noop(format!("`{mnemonic}` expects `{mnemonic} {expected}`"))
}

// ---------- API ----------

/// Decodes one line of assembly.
pub fn decode(line: &str) -> Result<Instruction, InterpError> {
    let mut text = strip_comment(line);
    if text.is_empty() {
        return Ok(Instruction::noop("empty line"));
    }
    if let Some((name, rest)) = split_label(text) {
        if rest.is_empty() {
            return Ok(Instruction::noop(format!("label `{name}`")));
        }
        text = rest;
    }

    let (mnemonic, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let mnemonic = mnemonic.to_ascii_lowercase();
    let m = mnemonic.as_str();
    let ops = split_operands(rest);

    if let Some(op) = lookup(REG_OPS, m) {
        return alu::decode_reg(m, op, &ops);
    }
    if let Some(op) = lookup(IMM_OPS, m) {
        return alu::decode_imm(m, op, &ops);
    }
    if let Some(op) = lookup(LOAD_IMM_OPS, m) {
        return mem::decode_load_imm(m, op, &ops);
    }
    if let Some(op) = lookup(LOAD_OPS, m) {
        return mem::decode_load(m, op, &ops);
    }
    if let Some(op) = lookup(STORE_OPS, m) {
        return mem::decode_store(m, op, &ops);
    }
    if let Some(op) = lookup(BRANCH_OPS, m) {
        return flow::decode_branch(m, op, &ops);
    }
    if let Some(op) = lookup(ZERO_BRANCH_OPS, m) {
        return flow::decode_branch_zero(m, op, &ops);
    }
    if let Some(op) = lookup(SET_OPS, m) {
        return alu::decode_set(m, op, &ops);
    }
    if let Some(op) = lookup(SET_IMM_OPS, m) {
        return alu::decode_set_imm(m, op, &ops);
    }

    match m {
        "j" => flow::decode_j(&ops),
        "call" => flow::decode_call(&ops),
        "jal" => flow::decode_jal(&ops),
        "jalr" => flow::decode_jalr(&ops),
        "jr" => flow::decode_jr(&ops),
        "ret" => flow::decode_ret(&ops),
        "mv" => alu::decode_mv(&ops),
        "nop" if ops.is_empty() => Ok(Instruction::noop("nop")),
        _ => Ok(Instruction::noop(format!("unknown instruction `{m}`"))),
    }
}
