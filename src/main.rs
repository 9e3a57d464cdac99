use std::env;
use std::process;

use nes_cpu::bus::FlatBus;
use nes_cpu::cartridge::Cartridge;
use nes_cpu::config::{self, CpuConfig, ExecutionMode};
use nes_cpu::cpu::{Cpu, LogTracer, IRQ_VECTOR};
use nes_cpu::cpu_bus::CpuBus;
use nes_cpu::save_state::CpuSnapshot;

const DEFAULT_CYCLE_LIMIT: u64 = 10_000_000;
const TRACE_HISTORY: usize = 64;

struct Options {
    strict: bool,
    undocumented: bool,
    automation: bool,
    trace: bool,
    cycles: u64,
    save_state: Option<String>,
    load_state: Option<String>,
    rom: String,
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [--strict] [--no-undocumented] [--automation] [--trace] [--cycles N] \
         [--save-state FILE] [--load-state FILE] <rom>",
        program
    );
    eprintln!("Supported formats: iNES (.nes), raw program images up to 32KB");
    process::exit(2);
}

fn parse_args(args: &[String]) -> Options {
    let program = args.first().map(String::as_str).unwrap_or("nes-cpu");
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        usage(program);
    }

    let mut opts = Options {
        strict: false,
        undocumented: true,
        automation: false,
        trace: config::trace(),
        cycles: DEFAULT_CYCLE_LIMIT,
        save_state: None,
        load_state: None,
        rom: String::new(),
    };
    let mut rom = None;
    let mut i = 1;

    let value = |i: usize, flag: &str| -> String {
        match args.get(i + 1) {
            Some(v) => v.clone(),
            None => {
                eprintln!("{} requires a value", flag);
                process::exit(2);
            }
        }
    };

    while i < args.len() {
        match args[i].as_str() {
            "--strict" => {
                opts.strict = true;
                i += 1;
            }
            "--no-undocumented" => {
                opts.undocumented = false;
                i += 1;
            }
            "--automation" => {
                opts.automation = true;
                i += 1;
            }
            "--trace" => {
                opts.trace = true;
                i += 1;
            }
            "--cycles" => {
                let raw = value(i, "--cycles");
                opts.cycles = match config::parse_u32_hex_or_dec(&raw) {
                    Some(n) => n as u64,
                    None => {
                        eprintln!("--cycles: invalid number '{}'", raw);
                        process::exit(2);
                    }
                };
                i += 2;
            }
            "--save-state" => {
                opts.save_state = Some(value(i, "--save-state"));
                i += 2;
            }
            "--load-state" => {
                opts.load_state = Some(value(i, "--load-state"));
                i += 2;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                process::exit(2);
            }
            s => {
                if rom.is_some() {
                    eprintln!("Unexpected argument: {}", s);
                    process::exit(2);
                }
                rom = Some(s.to_string());
                i += 1;
            }
        }
    }

    match rom {
        Some(r) => opts.rom = r,
        None => {
            eprintln!("ROM argument missing");
            process::exit(2);
        }
    }
    opts
}

fn init_logging(trace: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if trace {
        builder.filter_module("nes_cpu::cpu::trace", log::LevelFilter::Trace);
    }
    builder.format_timestamp(None).init();
}

/// BRK (or a stray jump) into an image that never set its IRQ vector.
fn halted(cpu: &Cpu, bus: &FlatBus) -> bool {
    cpu.regs.pc == 0x0000 && bus.peek(IRQ_VECTOR) == Some(0) && bus.peek(IRQ_VECTOR + 1) == Some(0)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);
    init_logging(opts.trace);

    let quiet = config::quiet();

    let cartridge = match Cartridge::load(&opts.rom) {
        Ok(cart) => cart,
        Err(e) => {
            eprintln!("Failed to load ROM: {}", e);
            process::exit(1);
        }
    };

    let mut cpu_config = CpuConfig::from_env().with_undocumented_opcodes(opts.undocumented);
    if opts.strict {
        cpu_config = cpu_config.with_mode(ExecutionMode::Strict);
    }
    if opts.automation {
        cpu_config = cpu_config.with_automation_checksum(cartridge.checksum());
    }

    let mut bus = FlatBus::new();
    bus.load_cartridge(&cartridge);

    let mut cpu = Cpu::new(cpu_config);
    if opts.trace {
        cpu.set_tracer(Some(Box::new(LogTracer::with_history(TRACE_HISTORY))));
    }
    cpu.set_program_checksum(cartridge.checksum());
    cpu.reset(&mut bus);

    if let Some(path) = &opts.load_state {
        match CpuSnapshot::load_from_file(path) {
            Ok(snapshot) => cpu.restore(&snapshot),
            Err(e) => {
                eprintln!("Failed to load state: {}", e);
                process::exit(1);
            }
        }
    }

    if !quiet {
        println!(
            "Running {} from ${:04X} ({:?}, limit {} cycles)",
            opts.rom,
            cpu.regs.pc,
            cpu.config().mode,
            opts.cycles
        );
    }

    let mut failure = None;
    let mut ticks = 0u64;
    while ticks < opts.cycles {
        if let Err(e) = cpu.tick(&mut bus) {
            failure = Some(e);
            break;
        }
        ticks += 1;
        if cpu.at_boundary() && halted(&cpu, &bus) {
            log::info!("Halted at ${:04X} after {} cycles", cpu.regs.pc, ticks);
            break;
        }
    }

    if let Some(path) = &opts.save_state {
        if let Err(e) = cpu.snapshot().save_to_file(path) {
            eprintln!("Failed to save state: {}", e);
        }
    }

    if !quiet {
        let result = (bus.peek(0x0002).unwrap_or(0), bus.peek(0x0003).unwrap_or(0));
        let r = cpu.regs;
        println!(
            "Result: $02=${:02X} $03=${:02X} ({})",
            result.0,
            result.1,
            if result == (0, 0) { "PASS" } else { "FAIL" }
        );
        println!(
            "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            r.pc,
            r.a,
            r.x,
            r.y,
            r.status.to_byte(),
            r.sp,
            cpu.total_cycles()
        );
    }

    if let Some(e) = failure {
        if let Some(tracer) = cpu.tracer() {
            let lines = tracer.recent_lines();
            if !lines.is_empty() {
                eprintln!("Last {} instructions:", lines.len());
                for line in lines {
                    eprintln!("  {}", line);
                }
            }
        }
        eprintln!("Execution stopped: {}", e);
        process::exit(1);
    }
}
