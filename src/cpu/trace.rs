//! Instruction tracing and disassembly (nestest log layout).

use std::collections::VecDeque;
use std::fmt::Write as _;

use super::addressing::AddressingMode;
use super::opcodes::lookup;
use super::Registers;
use crate::cpu_bus::CpuBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub p: u8,
}

#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub pc: u16,
    pub opcode: u8,
    /// Operand bytes the bus allowed us to peek; may be short.
    pub operands: Vec<u8>,
    pub registers: RegisterSnapshot,
    pub cycle_count: u64,
}

impl TraceEntry {
    /// Capture the state about to be dispatched without touching the bus.
    pub fn capture(
        pc: u16,
        opcode: u8,
        regs: &Registers,
        cycle_count: u64,
        bus: &dyn CpuBus,
    ) -> Self {
        let len = lookup(opcode).map_or(0, |op| op.mode.operand_len());
        let operands = (1..=len)
            .map_while(|i| bus.peek(pc.wrapping_add(i)))
            .collect();
        TraceEntry {
            pc,
            opcode,
            operands,
            registers: regs.snapshot(),
            cycle_count,
        }
    }

    pub fn format_line(&self) -> String {
        let mut bytes = format!("{:02X}", self.opcode);
        for b in &self.operands {
            let _ = write!(bytes, " {:02X}", b);
        }
        let r = &self.registers;
        format!(
            "{:04X}  {:<9} {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc,
            bytes,
            disassemble(self.opcode, &self.operands, self.pc),
            r.a,
            r.x,
            r.y,
            r.p,
            r.sp,
            self.cycle_count
        )
    }
}

/// Called before every opcode dispatch. Must not alter engine state.
pub trait TraceHook {
    fn trace(&mut self, entry: &TraceEntry);

    /// Lines kept for post-mortem dumps, oldest first.
    fn recent_lines(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Emits trace lines through `log::trace!`, optionally keeping the most
/// recent ones for post-mortem dumps.
#[derive(Debug, Default)]
pub struct LogTracer {
    history: VecDeque<String>,
    capacity: usize,
}

impl LogTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(capacity: usize) -> Self {
        LogTracer {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }
}

impl TraceHook for LogTracer {
    fn trace(&mut self, entry: &TraceEntry) {
        let line = entry.format_line();
        log::trace!("{}", line);
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(line);
    }

    fn recent_lines(&self) -> Vec<String> {
        self.history.iter().cloned().collect()
    }
}

/// Render one instruction in standard assembler syntax. Undocumented
/// opcodes are prefixed with `*`; missing operand bytes print as `??`.
pub fn disassemble(opcode: u8, operands: &[u8], pc: u16) -> String {
    let Some(op) = lookup(opcode) else {
        return format!(".DB ${:02X}", opcode);
    };

    let byte = |i: usize| operands.get(i).map(|b| format!("{:02X}", b));
    let lo = byte(0).unwrap_or_else(|| "??".to_string());
    let hi = byte(1).unwrap_or_else(|| "??".to_string());

    let operand = match op.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${}", lo),
        AddressingMode::ZeroPage => format!("${}", lo),
        AddressingMode::ZeroPageX => format!("${},X", lo),
        AddressingMode::ZeroPageY => format!("${},Y", lo),
        AddressingMode::Absolute => format!("${}{}", hi, lo),
        AddressingMode::AbsoluteX => format!("${}{},X", hi, lo),
        AddressingMode::AbsoluteY => format!("${}{},Y", hi, lo),
        AddressingMode::Indirect => format!("(${}{})", hi, lo),
        AddressingMode::IndexedIndirect => format!("(${},X)", lo),
        AddressingMode::IndirectIndexed => format!("(${}),Y", lo),
        AddressingMode::Relative => match operands.first() {
            Some(&offset) => {
                let target = pc.wrapping_add(2).wrapping_add(offset as i8 as i16 as u16);
                format!("${:04X}", target)
            }
            None => "$????".to_string(),
        },
    };

    let prefix = if op.undocumented { "*" } else { "" };
    if operand.is_empty() {
        format!("{}{}", prefix, op.mnemonic.name())
    } else {
        format!("{}{} {}", prefix, op.mnemonic.name(), operand)
    }
}
