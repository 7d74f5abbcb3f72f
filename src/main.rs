use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use riscv_interp::riscv::config::DEFAULT_MEMORY_SIZE;
use riscv_interp::riscv::registers::reg_name;
use riscv_interp::riscv::{Config, Cpu};

#[derive(Parser, Debug)]
#[command(name = "riscv-interp")]
#[command(about = "Interpret RV32I assembly text one line at a time", long_about = None)]
struct Args {
    /// Assembly source file, or `-` for stdin
    program: PathBuf,

    /// Bytes of simulated memory (also the initial stack pointer)
    #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: usize,

    /// Abort a run after this many instructions
    #[arg(long)]
    max_steps: Option<usize>,

    /// Execute this many single steps instead of running to completion
    #[arg(long)]
    step: Option<usize>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading program from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn print_state(cpu: &Cpu) {
    for (i, v) in cpu.registers().iter().enumerate() {
        println!("x{i} ({}): {v}", reg_name(i as u8));
    }
    println!("\nPC: {}", cpu.pc());
    println!("Current: {}", cpu.current_line().unwrap_or(""));

    if cpu.history().next().is_some() {
        println!("\nMemory history:");
        for entry in cpu.history() {
            println!("  {entry}");
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()?;

    let source = read_source(&args.program)?;
    let config = Config::default()
        .with_memory_size(args.memory_size)
        .with_step_budget(args.max_steps);

    let mut cpu = Cpu::new(config);
    cpu.load(source.lines());

    match args.step {
        Some(n) => {
            for _ in 0..n {
                if cpu.is_done() {
                    break;
                }
                cpu.single_step().context("step failed")?;
            }
        }
        None => {
            let steps = cpu.run_to_completion().context("run failed")?;
            log::info!("executed {steps} instructions");
        }
    }

    print_state(&cpu);
    Ok(())
}
