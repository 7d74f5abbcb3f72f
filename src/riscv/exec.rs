// riscv/exec.rs
use super::cpu::Cpu;
use super::errors::InterpError;
use super::instruction::{Instruction, LoadOp, StoreOp};
use super::program::SLOT_SIZE;

/// Applies `instr` to `cpu` and moves the PC: by one slot, or to the
/// branch/jump destination. Writes to `x0` are discarded.
pub fn execute(cpu: &mut Cpu, instr: &Instruction) -> Result<(), InterpError> {
    let pc = cpu.pc;
    let next = pc.wrapping_add(SLOT_SIZE);
    let jump = |d: i32| pc.wrapping_add(d as u32);

    match instr {
        Instruction::Reg { op, rd, rs1, rs2 } => {
            let v = op.apply(cpu.regs.read(*rs1), cpu.regs.read(*rs2))?;
            cpu.regs.write(*rd, v);
            cpu.pc = next;
        }
        Instruction::Imm { op, rd, rs1, imm } => {
            let v = op.apply(cpu.regs.read(*rs1), *imm)?;
            cpu.regs.write(*rd, v);
            cpu.pc = next;
        }
        Instruction::LoadImm { op, rd, imm } => {
            cpu.regs.write(*rd, op.apply(pc, *imm));
            cpu.pc = next;
        }

        Instruction::Load { op, rd, rs1, imm } => {
            let a = cpu.regs.read(*rs1).wrapping_add(*imm) as u32;
            let v = match op {
                LoadOp::Lw => cpu.mem.load_word(a),
                LoadOp::Lh => cpu.mem.load_half(a) as i16 as i32,
                LoadOp::Lhu => cpu.mem.load_half(a) as i32,
                LoadOp::Lb => cpu.mem.load_byte(a) as i8 as i32,
                LoadOp::Lbu => cpu.mem.load_byte(a) as i32,
            };
            cpu.regs.write(*rd, v);
            cpu.pc = next;
        }
        Instruction::Store { op, rs2, rs1, imm } => {
            let a = cpu.regs.read(*rs1).wrapping_add(*imm) as u32;
            let v = cpu.regs.read(*rs2);
            match op {
                StoreOp::Sw => cpu.mem.store_word(a, v),
                StoreOp::Sh => cpu.mem.store_half(a, v),
                StoreOp::Sb => cpu.mem.store_byte(a, v),
            }
            cpu.pc = next;
        }

        // Branches (displacement relative to the PC of this instruction)
        Instruction::Branch { op, rs1, rs2, target } => {
            let d = cpu.program.displacement(target, pc)?;
            let taken = op.taken(cpu.regs.read(*rs1), cpu.regs.read(*rs2));
            cpu.pc = if taken { jump(d) } else { next };
        }
        Instruction::BranchZero { op, rs1, target } => {
            let d = cpu.program.displacement(target, pc)?;
            cpu.pc = if op.taken(cpu.regs.read(*rs1)) { jump(d) } else { next };
        }

        Instruction::Jump { target } => {
            cpu.pc = jump(cpu.program.displacement(target, pc)?);
        }
        Instruction::JumpLink { rd, target } => {
            let d = cpu.program.displacement(target, pc)?;
            cpu.regs.write(*rd, next as i32);
            cpu.pc = jump(d);
        }
        Instruction::JumpLinkReg { rd, rs1, imm } => {
            let target = cpu.regs.read(*rs1).wrapping_add(*imm) as u32;
            cpu.regs.write(*rd, next as i32);
            cpu.pc = target;
        }

        Instruction::Set { op, rd, rs1, rs2 } => {
            cpu.regs.write(*rd, op.apply(cpu.regs.read(*rs1), cpu.regs.read(*rs2)));
            cpu.pc = next;
        }
        Instruction::SetImm { op, rd, rs1, imm } => {
            cpu.regs.write(*rd, op.apply(cpu.regs.read(*rs1), *imm));
            cpu.pc = next;
        }

        Instruction::NoOp { .. } => cpu.pc = next,
    }
    Ok(())
}
