//! Operand and effective-address resolution for every 6502 addressing mode.
//!
//! Resolvers consume the operand bytes that follow the opcode (PC already
//! points past the opcode when they run) and never apply cycle penalties
//! themselves; they only report whether an indexed access crossed a page.

use super::ExecContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// JMP only; reproduces the page-wrap bug on the high byte fetch.
    Indirect,
    /// `(zp,X)`
    IndexedIndirect,
    /// `(zp),Y`
    IndirectIndexed,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Accumulator,
    Immediate(u8),
    Address { addr: u16, page_crossed: bool },
    /// Branch displacement; PC already points at the next instruction.
    Relative(i8),
}

impl Operand {
    fn at(addr: u16) -> Self {
        Operand::Address {
            addr,
            page_crossed: false,
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(index as u16);
        Operand::Address {
            addr,
            page_crossed: crosses_page(base, addr),
        }
    }

    pub fn page_crossed(&self) -> bool {
        matches!(
            self,
            Operand::Address {
                page_crossed: true,
                ..
            }
        )
    }
}

pub fn crosses_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Word stored at a zero-page pointer; the high byte wraps within page 0.
fn zero_page_word(ctx: &mut ExecContext<'_>, pointer: u8) -> u16 {
    ctx.bus
        .read_u16(pointer as u16, pointer.wrapping_add(1) as u16)
}

pub fn resolve(ctx: &mut ExecContext<'_>, mode: AddressingMode) -> Operand {
    match mode {
        AddressingMode::Implied => Operand::None,
        AddressingMode::Accumulator => Operand::Accumulator,
        AddressingMode::Immediate => Operand::Immediate(ctx.fetch_byte()),
        AddressingMode::ZeroPage => Operand::at(ctx.fetch_byte() as u16),
        AddressingMode::ZeroPageX => {
            let base = ctx.fetch_byte();
            Operand::at(base.wrapping_add(ctx.regs.x) as u16)
        }
        AddressingMode::ZeroPageY => {
            let base = ctx.fetch_byte();
            Operand::at(base.wrapping_add(ctx.regs.y) as u16)
        }
        AddressingMode::Absolute => Operand::at(ctx.fetch_word()),
        AddressingMode::AbsoluteX => {
            let base = ctx.fetch_word();
            Operand::indexed(base, ctx.regs.x)
        }
        AddressingMode::AbsoluteY => {
            let base = ctx.fetch_word();
            Operand::indexed(base, ctx.regs.y)
        }
        AddressingMode::Indirect => {
            let pointer = ctx.fetch_word();
            let hi = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
            Operand::at(ctx.bus.read_u16(pointer, hi))
        }
        AddressingMode::IndexedIndirect => {
            let pointer = ctx.fetch_byte().wrapping_add(ctx.regs.x);
            Operand::at(zero_page_word(ctx, pointer))
        }
        AddressingMode::IndirectIndexed => {
            let pointer = ctx.fetch_byte();
            let base = zero_page_word(ctx, pointer);
            Operand::indexed(base, ctx.regs.y)
        }
        AddressingMode::Relative => Operand::Relative(ctx.fetch_byte() as i8),
    }
}
