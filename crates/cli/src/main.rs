//! Custom RISC-V instruction interpreter CLI.
//!
//! This binary is the command-line harness for the extension registry. It performs:
//! 1. **Inspection:** List registered instructions and export a C encoding header.
//! 2. **Execution:** Run a program listing, or execute one instruction by name.
//! 3. **Codec:** Encode an instruction from operands and disassemble raw words.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use serde_json::json;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use rvext_core::common::constants::{RegIdx, Word};
use rvext_core::config::Config;
use rvext_core::ext::InstructionDescriptor;
use rvext_core::isa::abi::parse_register;
use rvext_core::isa::disasm::disassemble;
use rvext_core::isa::encode::encode;
use rvext_core::isa::format::OperandSlot;
use rvext_core::sim::Session;
use rvext_core::sim::loader::{load_program, parse_register_assignment, parse_value};
use rvext_core::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "rvext",
    author,
    version,
    about = "Custom RISC-V instruction registry and interpreter",
    long_about = "Register custom instructions in the RISC-V custom opcode space and interpret them against a 32-entry register file.\n\nThe built-in extensions are mac, mod and binom. A JSON config adds more.\n\nExamples:\n  rvext list\n  rvext exec mac a0 a1 a2 --reg a0=1 --reg a1=2 --reg a2=3\n  rvext encode binom a0 a1 -3\n  rvext run program.txt --reg x11=5 --stats\n  rvext --config extensions.json header"
)]
struct Cli {
    /// JSON configuration file (defaults to the built-in extensions).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered instructions.
    List {
        /// Print the table as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run a program listing (one instruction word per line).
    Run {
        /// Program file.
        program: PathBuf,

        /// Initial register value, e.g. `a1=7` (repeatable).
        #[arg(short, long = "reg")]
        regs: Vec<String>,

        /// Print execution statistics.
        #[arg(long)]
        stats: bool,
    },

    /// Execute one instruction by mnemonic.
    #[command(allow_negative_numbers = true)]
    Exec {
        /// Instruction mnemonic.
        name: String,

        /// Operands in format order (registers by name or number, immediates).
        operands: Vec<String>,

        /// Initial register value, e.g. `a1=7` (repeatable).
        #[arg(short, long = "reg")]
        regs: Vec<String>,
    },

    /// Encode an instruction into a 32-bit word.
    #[command(allow_negative_numbers = true)]
    Encode {
        /// Instruction mnemonic.
        name: String,

        /// Operands in format order.
        operands: Vec<String>,
    },

    /// Disassemble instruction words.
    Disasm {
        /// Words in hex (`0x...`) or decimal.
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Print `MATCH_`/`MASK_` definitions for every registered instruction.
    Header,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!(%e, "command failed");
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    debug!(?config, "configuration loaded");
    let mut session = Session::new(config)?;

    match cli.command {
        Commands::List { json } => cmd_list(&session, json),
        Commands::Run {
            program,
            regs,
            stats,
        } => cmd_run(&mut session, &program, &regs, stats),
        Commands::Exec {
            name,
            operands,
            regs,
        } => cmd_exec(&mut session, &name, &operands, &regs),
        Commands::Encode { name, operands } => cmd_encode(&session, &name, &operands),
        Commands::Disasm { words } => cmd_disasm(&session, &words),
        Commands::Header => {
            print!("{}", session.registry().encoding_header());
            Ok(0)
        }
    }
}

fn cmd_list(session: &Session, as_json: bool) -> Result<i32> {
    let descriptors = session.registry().sorted();
    if as_json {
        let rows: Vec<_> = descriptors
            .iter()
            .map(|d| {
                json!({
                    "name": d.name(),
                    "format": d.format(),
                    "encoding": d.encoding(),
                    "cycles": d.cycles(),
                    "match": format!("{:#010x}", d.match_bits()),
                    "mask": format!("{:#010x}", d.mask()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(0);
    }

    println!(
        "{:<12} {:<3} {:<28} {:>6}  {:<10} {:<10}",
        "name", "fmt", "encoding", "cycles", "match", "mask"
    );
    for d in &descriptors {
        println!(
            "{:<12} {:<3} {:<28} {:>6}  {:#010x} {:#010x}",
            d.name(),
            d.format().to_string(),
            d.encoding().to_string(),
            d.cycles(),
            d.match_bits(),
            d.mask()
        );
    }
    Ok(0)
}

/// Runs a program listing; on fault, dumps the registers and exits with code 1.
fn cmd_run(session: &mut Session, program: &Path, regs: &[String], stats: bool) -> Result<i32> {
    session.preset(parse_assignments(regs)?);
    let words = load_program(program)?;
    println!("[*] Running {} ({} words)", program.display(), words.len());

    let report = session.run(&words);
    if let Some(fault) = &report.fault {
        eprintln!("\n[!] FAULT: {fault}");
    } else {
        println!("[*] Completed in {} cycles", report.cycles);
    }
    session.regs.dump();
    if stats {
        report.stats.print();
    }
    Ok(i32::from(!report.succeeded()))
}

fn cmd_exec(
    session: &mut Session,
    name: &str,
    operands: &[String],
    regs: &[String],
) -> Result<i32> {
    session.preset(parse_assignments(regs)?);
    let descriptor = find(session, name)?;
    let raw = parse_operands(&descriptor, operands)?;
    let cycles = session.execute(&descriptor.encoding(), &raw)?;

    let rd = raw
        .first()
        .filter(|_| descriptor.format().has_rd())
        .map(|&idx| idx as RegIdx);
    match rd {
        Some(idx) => {
            let value = session.regs.read(idx);
            println!(
                "{name}: x{idx} = {value:#010x} ({}) in {cycles} cycle(s)",
                value as i32
            );
        }
        None => println!("{name}: no destination, {cycles} cycle(s)"),
    }
    Ok(0)
}

fn cmd_encode(session: &Session, name: &str, operands: &[String]) -> Result<i32> {
    let descriptor = find(session, name)?;
    let raw = parse_operands(&descriptor, operands)?;
    println!("{:#010x}", encode(&descriptor, &raw)?);
    Ok(0)
}

fn cmd_disasm(session: &Session, words: &[String]) -> Result<i32> {
    for text in words {
        let word = parse_value(text).ok_or_else(|| Error::Parse {
            line: 0,
            message: format!("`{text}` is not a 32-bit instruction word"),
        })?;
        println!("{word:#010x}  {}", disassemble(word, session.registry()));
    }
    Ok(0)
}

fn find(session: &Session, name: &str) -> Result<std::sync::Arc<InstructionDescriptor>> {
    session
        .registry()
        .find_by_name(name)
        .ok_or_else(|| Error::Config(format!("no instruction named `{name}` is registered")))
}

/// Parses operands in slot order; register slots also accept ABI names.
fn parse_operands(descriptor: &InstructionDescriptor, operands: &[String]) -> Result<Vec<u32>> {
    let slots = descriptor.format().slots();
    operands
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let is_reg = slots.get(i).is_some_and(|&slot| slot != OperandSlot::Imm);
            let register = if is_reg {
                parse_register(text).map(|idx| idx as u32)
            } else {
                None
            };
            register.or_else(|| parse_value(text)).ok_or_else(|| Error::Parse {
                line: 0,
                message: format!("operand {} `{text}` is neither a register nor a value", i + 1),
            })
        })
        .collect()
}

fn parse_assignments(regs: &[String]) -> Result<Vec<(RegIdx, Word)>> {
    regs.iter().map(|r| parse_register_assignment(r)).collect()
}
