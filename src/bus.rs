//! Flat CPU address space: internal RAM, open RAM for the register ranges,
//! and a mapper-less PRG ROM. Interrupt lines are owned here on behalf of
//! the display and audio collaborators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bitflags::bitflags;

use crate::cartridge::Cartridge;
use crate::cpu_bus::CpuBus;

const RAM_SIZE: usize = 0x0800;
const RAM_MIRROR_END: u16 = 0x1FFF;
const PRG_START: u16 = 0x8000;

/// Edge-triggered latch shared between one raiser and the CPU.
#[derive(Debug, Clone, Default)]
pub struct InterruptLine(Arc<AtomicBool>);

impl InterruptLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the latch, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

bitflags! {
    /// Maskable interrupt sources; the IRQ line is their logical OR.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct IrqSources: u8 {
        const APU_FRAME = 0b0000_0001;
        const DMC = 0b0000_0010;
    }
}

pub struct FlatBus {
    ram: [u8; RAM_SIZE],
    /// Everything between the RAM mirrors and PRG ROM ($2000-$7FFF).
    open: Vec<u8>,
    prg_rom: Vec<u8>,
    nmi: InterruptLine,
    irq: IrqSources,
}

impl FlatBus {
    pub fn new() -> Self {
        FlatBus {
            ram: [0; RAM_SIZE],
            open: vec![0; (PRG_START - RAM_MIRROR_END - 1) as usize],
            prg_rom: Vec::new(),
            nmi: InterruptLine::new(),
            irq: IrqSources::empty(),
        }
    }

    pub fn load_cartridge(&mut self, cartridge: &Cartridge) {
        self.prg_rom = cartridge.prg_rom().to_vec();
    }

    /// Handle for the PPU side to raise NMI, possibly from another thread.
    pub fn nmi_line(&self) -> InterruptLine {
        self.nmi.clone()
    }

    pub fn set_irq(&mut self, source: IrqSources, asserted: bool) {
        self.irq.set(source, asserted);
    }

    pub fn irq_sources(&self) -> IrqSources {
        self.irq
    }

    fn prg_index(&self, addr: u16) -> Option<usize> {
        if self.prg_rom.is_empty() {
            return None;
        }
        // 16KB images appear twice.
        Some((addr - PRG_START) as usize % self.prg_rom.len())
    }

    fn load(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=RAM_MIRROR_END => self.ram[addr as usize % RAM_SIZE],
            PRG_START..=0xFFFF => self
                .prg_index(addr)
                .map_or(0, |i| self.prg_rom[i]),
            _ => self.open[(addr - RAM_MIRROR_END - 1) as usize],
        }
    }
}

impl Default for FlatBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBus for FlatBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.load(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=RAM_MIRROR_END => self.ram[addr as usize % RAM_SIZE] = value,
            PRG_START..=0xFFFF => {
                log::debug!("Ignored write ${:02X} to ROM at ${:04X}", value, addr);
            }
            _ => self.open[(addr - RAM_MIRROR_END - 1) as usize] = value,
        }
    }

    fn poll_nmi(&mut self) -> bool {
        self.nmi.is_raised()
    }

    fn acknowledge_nmi(&mut self) {
        self.nmi.take();
    }

    fn poll_irq(&mut self) -> bool {
        !self.irq.is_empty()
    }

    fn peek(&self, addr: u16) -> Option<u8> {
        Some(self.load(addr))
    }
}
