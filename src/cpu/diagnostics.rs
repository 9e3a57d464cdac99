use std::collections::HashSet;

/// Receives conditions the engine recovers from in permissive mode.
pub trait Diagnostics {
    fn unhandled_opcode(&mut self, opcode: u8, pc: u16);
}

/// Logs each distinct unhandled opcode once.
#[derive(Debug, Default)]
pub struct LogDiagnostics {
    seen: HashSet<u8>,
}

impl LogDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> &HashSet<u8> {
        &self.seen
    }
}

impl Diagnostics for LogDiagnostics {
    fn unhandled_opcode(&mut self, opcode: u8, pc: u16) {
        if self.seen.insert(opcode) {
            log::warn!(
                "Unhandled opcode 0x{:02X} at PC: 0x{:04X}, executing as NOP",
                opcode,
                pc
            );
        }
    }
}
