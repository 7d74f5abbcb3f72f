use super::*;
use crate::riscv::registers::RA;

fn is_noop(i: &Instruction) -> bool {
    matches!(i, Instruction::NoOp { .. })
}

#[test]
fn register_register_family() {
    let i = decode("add x3, x1, x2").expect("decode");
    assert_eq!(i, Instruction::Reg { op: AluOp::Add, rd: 3, rs1: 1, rs2: 2 });

    let i = decode("  sra  t0,a0 ,  sp ").expect("decode");
    assert_eq!(i, Instruction::Reg { op: AluOp::Sra, rd: 5, rs1: 10, rs2: 2 });
}

#[test]
fn register_immediate_family() {
    let i = decode("addi sp, sp, -16").expect("decode");
    assert_eq!(i, Instruction::Imm { op: AluOp::Add, rd: 2, rs1: 2, imm: -16 });

    let i = decode("SLLI x1, x1, 3").expect("decode");
    assert_eq!(i, Instruction::Imm { op: AluOp::Sll, rd: 1, rs1: 1, imm: 3 });
}

#[test]
fn load_immediate_family() {
    assert_eq!(
        decode("li x1, 100").expect("decode"),
        Instruction::LoadImm { op: LoadImmOp::Li, rd: 1, imm: 100 }
    );
    assert_eq!(
        decode("lui a0, 1").expect("decode"),
        Instruction::LoadImm { op: LoadImmOp::Lui, rd: 10, imm: 1 }
    );
    assert_eq!(
        decode("auipc t1, -2").expect("decode"),
        Instruction::LoadImm { op: LoadImmOp::Auipc, rd: 6, imm: -2 }
    );
}

#[test]
fn loads_and_stores() {
    assert_eq!(
        decode("lw x3, 4(x0)").expect("decode"),
        Instruction::Load { op: LoadOp::Lw, rd: 3, rs1: 0, imm: 4 }
    );
    assert_eq!(
        decode("lbu a0, -1(sp)").expect("decode"),
        Instruction::Load { op: LoadOp::Lbu, rd: 10, rs1: 2, imm: -1 }
    );
    assert_eq!(
        decode("sb x1, 0(x0)").expect("decode"),
        Instruction::Store { op: StoreOp::Sb, rs2: 1, rs1: 0, imm: 0 }
    );
}

#[test]
fn branches_keep_symbolic_targets() {
    assert_eq!(
        decode("beq x1, x2, loop").expect("decode"),
        Instruction::Branch {
            op: BranchOp::Eq,
            rs1: 1,
            rs2: 2,
            target: Target::Label("loop".into()),
        }
    );
    assert_eq!(
        decode("bgeu x1, x2, -8").expect("decode"),
        Instruction::Branch { op: BranchOp::Geu, rs1: 1, rs2: 2, target: Target::Offset(-8) }
    );
    assert_eq!(
        decode("bnez t0, done").expect("decode"),
        Instruction::BranchZero {
            op: ZeroBranchOp::Nez,
            rs1: 5,
            target: Target::Label("done".into()),
        }
    );
}

#[test]
fn jumps_and_aliases() {
    assert_eq!(
        decode("j end").expect("decode"),
        Instruction::Jump { target: Target::Label("end".into()) }
    );
    assert_eq!(
        decode("call func").expect("decode"),
        Instruction::JumpLink { rd: RA, target: Target::Label("func".into()) }
    );
    assert_eq!(
        decode("jal t0, 12").expect("decode"),
        Instruction::JumpLink { rd: 5, target: Target::Offset(12) }
    );
    assert_eq!(
        decode("jal func").expect("decode"),
        Instruction::JumpLink { rd: RA, target: Target::Label("func".into()) }
    );
    assert_eq!(
        decode("jalr x1, x5, 8").expect("decode"),
        Instruction::JumpLinkReg { rd: 1, rs1: 5, imm: 8 }
    );
    assert_eq!(
        decode("jalr x0, 4(ra)").expect("decode"),
        Instruction::JumpLinkReg { rd: 0, rs1: 1, imm: 4 }
    );
    assert_eq!(
        decode("jr ra").expect("decode"),
        Instruction::JumpLinkReg { rd: 0, rs1: 1, imm: 0 }
    );
    assert_eq!(decode("ret").expect("decode"), decode("jr ra").expect("decode"));
}

#[test]
fn set_less_than() {
    assert_eq!(
        decode("sltu a0, a1, a2").expect("decode"),
        Instruction::Set { op: SetOp::Ltu, rd: 10, rs1: 11, rs2: 12 }
    );
    assert_eq!(
        decode("slti a0, a1, -1").expect("decode"),
        Instruction::SetImm { op: SetOp::Lt, rd: 10, rs1: 11, imm: -1 }
    );
}

#[test]
fn mv_is_addi_zero() {
    assert_eq!(
        decode("mv a0, a1").expect("decode"),
        Instruction::Imm { op: AluOp::Add, rd: 10, rs1: 11, imm: 0 }
    );
}

#[test]
fn comments_labels_and_blanks_are_noops() {
    assert!(is_noop(&decode("").expect("decode")));
    assert!(is_noop(&decode("   # just a comment").expect("decode")));
    assert!(is_noop(&decode("main:").expect("decode")));
    assert!(is_noop(&decode("nop").expect("decode")));
    assert_eq!(
        decode("li x1, 4 # four").expect("decode"),
        Instruction::LoadImm { op: LoadImmOp::Li, rd: 1, imm: 4 }
    );
}

#[test]
fn dot_labels_and_inline_labels() {
    assert!(is_noop(&decode(".Lend:").expect("decode")));
    assert_eq!(
        decode("beq x1, x1, .Lend").expect("decode"),
        Instruction::Branch { op: BranchOp::Eq, rs1: 1, rs2: 1, target: Target::Label(".Lend".into()) }
    );
    assert_eq!(
        decode("loop: addi x1, x1, 1 # bump").expect("decode"),
        Instruction::Imm { op: AluOp::Add, rd: 1, rs1: 1, imm: 1 }
    );
}

#[test]
fn unknown_mnemonic_is_noop() {
    let i = decode("fadd.s f0, f1, f2").expect("decode");
    assert!(is_noop(&i));
    let i = decode(".global main").expect("decode");
    assert!(is_noop(&i));
}

#[test]
fn shape_mismatch_is_noop() {
    for line in [
        "add x1, x2",
        "add x1, x2, x3, x4",
        "addi x1, x2",
        "li x1",
        "lw x1, x2",
        "lw x1, (x2)",
        "sw x1, a(x2)",
        "beq x1, loop",
        "beqz x1",
        "j",
        "jr",
        "mv a0",
        "ret a0",
    ] {
        let i = decode(line).expect(line);
        assert!(is_noop(&i), "{line} decoded to {i:?}");
    }
}

#[test]
fn noop_reason_names_expected_shape() {
    match decode("add x1, x2").expect("decode") {
        Instruction::NoOp { reason } => assert!(reason.contains("rd, rs1, rs2"), "{reason}"),
        other => panic!("expected noop, got {other:?}"),
    }
}

#[test]
fn bad_register_is_fatal() {
    assert_eq!(
        decode("add x1, x2, x99"),
        Err(InterpError::InvalidRegister("x99".into()))
    );
    assert_eq!(
        decode("lw foo, 0(sp)"),
        Err(InterpError::InvalidRegister("foo".into()))
    );
    assert!(decode("beqz q1, done").is_err());
}

#[test]
fn bad_immediate_is_fatal() {
    assert_eq!(
        decode("addi x1, x2, abc"),
        Err(InterpError::InvalidImmediate("abc".into()))
    );
    assert_eq!(
        decode("li x1, 0x10"),
        Err(InterpError::InvalidImmediate("0x10".into()))
    );
    assert_eq!(
        decode("li x1, 99999999999"),
        Err(InterpError::InvalidImmediate("99999999999".into()))
    );
}

#[test]
fn decoding_is_idempotent() {
    for line in ["addi x1, x1, 1", "beq a0, zero, end", "sw t0, 8(sp)", "bogus"] {
        assert_eq!(decode(line), decode(line));
    }
}
