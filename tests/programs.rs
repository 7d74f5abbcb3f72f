use riscv_interp::riscv::{BASE_ADDRESS, Cpu, InterpError};

fn run(lines: &[&str], mem: usize) -> Cpu {
    let mut cpu = Cpu::configure(mem);
    cpu.load(lines.iter().copied());
    cpu.run_to_completion().expect("run");
    cpu
}

#[test]
fn store_byte() {
    let cpu = run(&["li x1, 4", "sb x1, 0(x0)"], 16);
    assert_eq!(cpu.register(1), 4);
    assert_eq!(cpu.memory()[0], 4);
}

#[test]
fn store_half() {
    let cpu = run(&["li x1, 16", "sh x1, 0(x0)"], 16);
    assert_eq!(u16::from_le_bytes([cpu.memory()[0], cpu.memory()[1]]), 16);
}

#[test]
fn store_then_load_word() {
    let cpu = run(&["li x1, 16", "sw x1, 4(x0)", "lw x3, 4(x0)"], 16);
    assert_eq!(cpu.register(1), 16);
    assert_eq!(&cpu.memory()[4..8], &16i32.to_le_bytes());
    assert_eq!(cpu.register(3), 16);
    let history: Vec<&str> = cpu.history().collect();
    assert_eq!(
        history,
        vec!["Loaded word (16) from address 4", "Stored word (16) to address 4"]
    );
}

#[test]
fn label_resolves_to_next_line() {
    let cpu = run(&["main:", "li x0, 100"], 16);
    assert_eq!(cpu.labels().len(), 1);
    assert_eq!(cpu.labels()["main"], BASE_ADDRESS + 4);
    assert_eq!(cpu.register(0), 0);
}

#[test]
fn counting_loop() {
    let src = [
        "    li t0, 0          # i",
        "    li t1, 5          # limit",
        "    li a0, 0          # sum",
        "loop:",
        "    bge t0, t1, end",
        "    add a0, a0, t0",
        "    addi t0, t0, 1",
        "    j loop",
        "end:",
    ];
    let cpu = run(&src, 64);
    assert_eq!(cpu.register(10), 10);
    assert_eq!(cpu.pc(), BASE_ADDRESS);
    assert!(!cpu.is_done());
}

#[test]
fn branch_to_dot_label() {
    let cpu = run(&["li x1, 1", "beq x1, x1, .Lend", "li x2, 5", ".Lend:", "nop"], 16);
    assert_eq!(cpu.labels()[".Lend"], BASE_ADDRESS + 4 * 4);
    assert_eq!(cpu.register(2), 0);
}

#[test]
fn label_on_instruction_line() {
    let src = ["li t0, 3", "loop: addi t0, t0, -1", "addi a0, a0, 1", "bnez t0, loop"];
    let cpu = run(&src, 16);
    assert_eq!(cpu.labels()["loop"], BASE_ADDRESS + 4);
    assert_eq!((cpu.register(5), cpu.register(10)), (0, 3));
}

#[test]
fn call_and_return() {
    let src = [
        "main:",
        "    li a0, 6",
        "    call double",
        "    mv s1, a0",
        "    j exit",
        "double:",
        "    add a0, a0, a0",
        "    ret",
        "exit:",
    ];
    let cpu = run(&src, 64);
    assert_eq!(cpu.register(9), 12);
}

#[test]
fn stack_push_pop() {
    let src = [
        "addi sp, sp, -8",
        "li t0, -300",
        "sw t0, 4(sp)",
        "sh t0, 0(sp)",
        "lh t1, 0(sp)",
        "lhu t2, 0(sp)",
        "lw t3, 4(sp)",
        "addi sp, sp, 8",
    ];
    let cpu = run(&src, 128);
    assert_eq!(cpu.register(2), 128);
    assert_eq!(cpu.register(6), -300);
    assert_eq!(cpu.register(7), (-300i32 as u16) as i32);
    assert_eq!(cpu.register(28), -300);
}

#[test]
fn malformed_lines_are_skipped() {
    let cpu = run(&["li x1, 1", "this is not assembly", "add x1, x1", "addi x1, x1, 1"], 16);
    assert_eq!(cpu.register(1), 2);
}

#[test]
fn out_of_bounds_store_is_dropped() {
    // anything past address 12 overruns a 16-byte memory, bytes included
    let cpu = run(&["li x1, -1", "sw x1, 14(x0)", "lw x2, 14(x0)", "sb x1, 15(x0)"], 16);
    assert_eq!(cpu.register(2), 0);
    assert!(cpu.memory().iter().all(|&b| b == 0));
    assert_eq!(cpu.history().len(), 0);

    let cpu = run(&["li x1, 7", "sb x1, 14(x0)", "lbu x2, 14(x0)", "sb x1, 12(x0)"], 16);
    assert_eq!(cpu.register(2), 0);
    assert_eq!(cpu.memory()[14], 0);
    assert_eq!(cpu.memory()[12], 7);
    assert_eq!(cpu.history().collect::<Vec<_>>(), vec!["Stored byte (7) to address 12"]);
}

#[test]
fn unresolved_label_aborts_run() {
    let mut cpu = Cpu::configure(16);
    cpu.load(["li x1, 1", "beqz x0, missing", "li x1, 2"]);
    let err = cpu.run_to_completion().unwrap_err();
    assert_eq!(err.source, InterpError::UnresolvedLabel("missing".into()));
    assert_eq!(err.line, 2);
    assert_eq!(cpu.register(1), 1);
}

#[test]
fn divide_by_zero_aborts_run() {
    let mut cpu = Cpu::configure(16);
    cpu.load(["li a0, 10", "rem a1, a0, zero"]);
    let err = cpu.run_to_completion().unwrap_err();
    assert_eq!(err.source, InterpError::DivisionByZero);
}

#[test]
fn rerun_accumulates_state() {
    let mut cpu = Cpu::configure(16);
    cpu.load(["lw t0, 0(x0)", "addi t0, t0, 1", "sw t0, 0(x0)"]);
    for _ in 0..3 {
        cpu.run_to_completion().expect("run");
    }
    assert_eq!(cpu.memory()[0], 3);
}

#[test]
fn stepping_matches_running() {
    let src = ["li a0, 3", "loop:", "addi a0, a0, -1", "bnez a0, loop", "li a1, 7"];

    let mut stepped = Cpu::configure(32);
    stepped.load(src);
    while !stepped.is_done() {
        stepped.single_step().expect("step");
    }

    let ran = run(&src, 32);
    assert_eq!(stepped.registers(), ran.registers());
}
