//! NMI/IRQ detection and service, sampled only at instruction boundaries.

use super::status::StatusFlags;
use super::{ExecContext, Registers};
use crate::cpu_bus::CpuBus;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;
pub const INTERRUPT_CYCLES: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Nmi,
    Irq,
}

impl Interrupt {
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// NMI wins over IRQ; IRQ is ignored while interrupts are disabled.
pub fn poll(regs: &Registers, bus: &mut dyn CpuBus) -> Option<Interrupt> {
    if bus.poll_nmi() {
        Some(Interrupt::Nmi)
    } else if !regs.status.contains(StatusFlags::INTERRUPT_DISABLE) && bus.poll_irq() {
        Some(Interrupt::Irq)
    } else {
        None
    }
}

pub fn service(ctx: &mut ExecContext<'_>, kind: Interrupt) -> u32 {
    if kind == Interrupt::Nmi {
        ctx.bus.acknowledge_nmi();
    }

    let pc = ctx.regs.pc;
    ctx.push_word(pc);
    let p = ctx.regs.status.to_stack_byte(false);
    ctx.push(p);
    ctx.regs.status.insert(StatusFlags::INTERRUPT_DISABLE);

    let vector = kind.vector();
    ctx.regs.pc = ctx.bus.read_u16(vector, vector + 1);
    log::debug!("{:?} serviced: ${:04X} -> ${:04X}", kind, pc, ctx.regs.pc);
    INTERRUPT_CYCLES
}
