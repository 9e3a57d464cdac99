//! Ricoh 2A03 CPU core: registers, tick-driven execution engine and the
//! boundary-level step used by tests and the runner.

mod addressing;
mod diagnostics;
mod execute;
mod interrupt;
mod opcodes;
mod status;
mod trace;


pub use addressing::{AddressingMode, Operand};
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use interrupt::{Interrupt, INTERRUPT_CYCLES, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use opcodes::{lookup, Mnemonic, Operation, OPCODES};
pub use status::{StatusFlags, UNUSED_BIT};
pub use trace::{disassemble, LogTracer, RegisterSnapshot, TraceEntry, TraceHook};

use crate::config::{CpuConfig, ExecutionMode};
use crate::cpu_bus::CpuBus;
use crate::error::CpuError;
use crate::save_state::CpuSnapshot;

/// Entry point used instead of the reset vector for conformance images.
pub const AUTOMATION_ENTRY: u16 = 0xC000;
/// Cost of an opcode with no enabled table entry in permissive mode.
pub const UNHANDLED_OPCODE_CYCLES: u32 = 2;
const RESET_CYCLES: u32 = 7;
const STACK_PAGE: u16 = 0x0100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub pc: u16,
    pub sp: u8, // high byte is always 0x01
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub status: StatusFlags,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            pc: 0,
            sp: 0xFD,
            a: 0,
            x: 0,
            y: 0,
            status: StatusFlags::RESET,
        }
    }

    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            p: self.status.to_byte(),
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything an opcode handler may touch, borrowed for one unit of work.
pub struct ExecContext<'a> {
    pub regs: &'a mut Registers,
    pub bus: &'a mut dyn CpuBus,
}

impl<'a> ExecContext<'a> {
    pub fn new(regs: &'a mut Registers, bus: &'a mut dyn CpuBus) -> Self {
        ExecContext { regs, bus }
    }

    pub fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        byte
    }

    pub fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    pub fn push(&mut self, value: u8) {
        self.bus.write(STACK_PAGE | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    pub fn pull(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.bus.read(STACK_PAGE | self.regs.sp as u16)
    }

    /// High byte first, as JSR and interrupts do.
    pub fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub fn pull_word(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }
}

pub struct Cpu {
    pub regs: Registers,
    work_cycles_left: u32,
    total_cycles: u64,
    config: CpuConfig,
    program_checksum: Option<u32>,
    diagnostics: Box<dyn Diagnostics>,
    tracer: Option<Box<dyn TraceHook>>,
}

impl Cpu {
    pub fn new(config: CpuConfig) -> Self {
        Cpu {
            regs: Registers::new(),
            work_cycles_left: 0,
            total_cycles: 0,
            config,
            program_checksum: None,
            diagnostics: Box::new(LogDiagnostics::new()),
            tracer: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn set_tracer(&mut self, tracer: Option<Box<dyn TraceHook>>) {
        self.tracer = tracer;
    }

    pub fn tracer(&self) -> Option<&dyn TraceHook> {
        self.tracer.as_deref()
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Record the checksum of the loaded program image; consulted by `reset`.
    pub fn set_program_checksum(&mut self, checksum: u32) {
        self.program_checksum = Some(checksum);
    }

    pub fn work_cycles_left(&self) -> u32 {
        self.work_cycles_left
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn at_boundary(&self) -> bool {
        self.work_cycles_left == 0
    }

    pub fn reset(&mut self, bus: &mut dyn CpuBus) {
        self.regs = Registers::new();

        let vector = bus.read_u16(RESET_VECTOR, RESET_VECTOR + 1);
        let automation = self
            .program_checksum
            .is_some_and(|sum| self.config.is_automation_checksum(sum))
            || self
                .config
                .automation_signatures
                .iter()
                .any(|sig| sig.matches(bus, vector, AUTOMATION_ENTRY));
        self.regs.pc = if automation { AUTOMATION_ENTRY } else { vector };

        self.work_cycles_left = RESET_CYCLES;
        self.total_cycles = RESET_CYCLES as u64;
        log::debug!(
            "CPU reset: PC=${:04X}{}",
            self.regs.pc,
            if automation { " (automation entry)" } else { "" }
        );
    }

    /// Advance one cycle. A new unit of work starts only when the previous
    /// one has fully elapsed; the starting tick counts as its first cycle.
    pub fn tick(&mut self, bus: &mut dyn CpuBus) -> Result<(), CpuError> {
        if self.work_cycles_left == 0 {
            self.work_cycles_left = self.begin_unit(bus)?;
        }
        self.work_cycles_left -= 1;
        Ok(())
    }

    /// Let the in-flight unit elapse without further ticks. Returns the
    /// number of cycles skipped.
    pub fn run_until_boundary(&mut self) -> u32 {
        std::mem::take(&mut self.work_cycles_left)
    }

    /// Run one whole unit (interrupt service or instruction) at the next
    /// boundary and return its cycle cost. Leaves the CPU at a boundary.
    pub fn step(&mut self, bus: &mut dyn CpuBus) -> Result<u32, CpuError> {
        self.run_until_boundary();
        self.begin_unit(bus)
    }

    fn begin_unit(&mut self, bus: &mut dyn CpuBus) -> Result<u32, CpuError> {
        if let Some(kind) = interrupt::poll(&self.regs, bus) {
            let cycles = interrupt::service(&mut ExecContext::new(&mut self.regs, bus), kind);
            self.total_cycles += cycles as u64;
            return Ok(cycles);
        }
        let cycles = self.dispatch(bus)?;
        self.total_cycles += cycles as u64;
        Ok(cycles)
    }

    fn dispatch(&mut self, bus: &mut dyn CpuBus) -> Result<u32, CpuError> {
        let pc = self.regs.pc;
        let opcode = bus.read(pc);

        if let Some(tracer) = self.tracer.as_mut() {
            let entry = TraceEntry::capture(pc, opcode, &self.regs, self.total_cycles, &*bus);
            tracer.trace(&entry);
        }

        self.regs.pc = pc.wrapping_add(1);

        let enabled = lookup(opcode).filter(|op| !op.undocumented || self.config.undocumented_opcodes);
        let Some(operation) = enabled else {
            return match self.config.mode {
                ExecutionMode::Strict => Err(CpuError::UnhandledOpcode { opcode, pc }),
                ExecutionMode::Permissive => {
                    self.diagnostics.unhandled_opcode(opcode, pc);
                    Ok(UNHANDLED_OPCODE_CYCLES)
                }
            };
        };

        let mut ctx = ExecContext::new(&mut self.regs, bus);
        let operand = addressing::resolve(&mut ctx, operation.mode);
        Ok(execute::execute(&mut ctx, operation, operand))
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            version: CpuSnapshot::CURRENT_VERSION,
            pc: self.regs.pc,
            sp: self.regs.sp,
            a: self.regs.a,
            x: self.regs.x,
            y: self.regs.y,
            p: self.regs.status.to_byte(),
            work_cycles_left: self.work_cycles_left,
            total_cycles: self.total_cycles,
        }
    }

    pub fn restore(&mut self, snapshot: &CpuSnapshot) {
        self.regs = Registers {
            pc: snapshot.pc,
            sp: snapshot.sp,
            a: snapshot.a,
            x: snapshot.x,
            y: snapshot.y,
            status: StatusFlags::from_byte(snapshot.p),
        };
        self.work_cycles_left = snapshot.work_cycles_left;
        self.total_cycles = snapshot.total_cycles;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(CpuConfig::default())
    }
}
