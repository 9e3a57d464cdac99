//! Instruction semantics. One switch over the mnemonic; operands arrive
//! already resolved, so handlers only read, write and set flags.

use super::addressing::{crosses_page, Operand};
use super::interrupt::IRQ_VECTOR;
use super::opcodes::{Mnemonic, Operation};
use super::status::StatusFlags;
use super::ExecContext;

/// Execute `op` and return its total cycle cost including penalties.
pub fn execute(ctx: &mut ExecContext<'_>, op: &Operation, operand: Operand) -> u32 {
    let mut cycles = op.cycles as u32;
    if op.page_penalty && operand.page_crossed() {
        cycles += 1;
    }

    match op.mnemonic {
        // Loads / stores
        Mnemonic::Lda => {
            ctx.regs.a = read_operand(ctx, operand);
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Ldx => {
            ctx.regs.x = read_operand(ctx, operand);
            ctx.regs.status.set_zero_negative(ctx.regs.x);
        }
        Mnemonic::Ldy => {
            ctx.regs.y = read_operand(ctx, operand);
            ctx.regs.status.set_zero_negative(ctx.regs.y);
        }
        Mnemonic::Sta => {
            let a = ctx.regs.a;
            write_operand(ctx, operand, a);
        }
        Mnemonic::Stx => {
            let x = ctx.regs.x;
            write_operand(ctx, operand, x);
        }
        Mnemonic::Sty => {
            let y = ctx.regs.y;
            write_operand(ctx, operand, y);
        }

        // Arithmetic
        Mnemonic::Adc => {
            let value = read_operand(ctx, operand);
            adc(ctx, value);
        }
        Mnemonic::Sbc => {
            let value = read_operand(ctx, operand);
            sbc(ctx, value);
        }

        // Logical
        Mnemonic::And => {
            let value = read_operand(ctx, operand);
            ctx.regs.a &= value;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Ora => {
            let value = read_operand(ctx, operand);
            ctx.regs.a |= value;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Eor => {
            let value = read_operand(ctx, operand);
            ctx.regs.a ^= value;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Bit => {
            let value = read_operand(ctx, operand);
            let status = &mut ctx.regs.status;
            status.set(StatusFlags::ZERO, value & ctx.regs.a == 0);
            status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
            status.set(StatusFlags::OVERFLOW, value & 0x40 != 0);
        }

        // Shifts / rotates
        Mnemonic::Asl => {
            modify(ctx, operand, asl);
        }
        Mnemonic::Lsr => {
            modify(ctx, operand, lsr);
        }
        Mnemonic::Rol => {
            modify(ctx, operand, rol);
        }
        Mnemonic::Ror => {
            modify(ctx, operand, ror);
        }

        // Increments / decrements
        Mnemonic::Inc => {
            modify(ctx, operand, |status, v| {
                let r = v.wrapping_add(1);
                status.set_zero_negative(r);
                r
            });
        }
        Mnemonic::Dec => {
            modify(ctx, operand, |status, v| {
                let r = v.wrapping_sub(1);
                status.set_zero_negative(r);
                r
            });
        }
        Mnemonic::Inx => {
            ctx.regs.x = ctx.regs.x.wrapping_add(1);
            ctx.regs.status.set_zero_negative(ctx.regs.x);
        }
        Mnemonic::Iny => {
            ctx.regs.y = ctx.regs.y.wrapping_add(1);
            ctx.regs.status.set_zero_negative(ctx.regs.y);
        }
        Mnemonic::Dex => {
            ctx.regs.x = ctx.regs.x.wrapping_sub(1);
            ctx.regs.status.set_zero_negative(ctx.regs.x);
        }
        Mnemonic::Dey => {
            ctx.regs.y = ctx.regs.y.wrapping_sub(1);
            ctx.regs.status.set_zero_negative(ctx.regs.y);
        }

        // Compare
        Mnemonic::Cmp => {
            let value = read_operand(ctx, operand);
            compare(&mut ctx.regs.status, ctx.regs.a, value);
        }
        Mnemonic::Cpx => {
            let value = read_operand(ctx, operand);
            compare(&mut ctx.regs.status, ctx.regs.x, value);
        }
        Mnemonic::Cpy => {
            let value = read_operand(ctx, operand);
            compare(&mut ctx.regs.status, ctx.regs.y, value);
        }

        // Branches
        Mnemonic::Bcc
        | Mnemonic::Bcs
        | Mnemonic::Bne
        | Mnemonic::Beq
        | Mnemonic::Bpl
        | Mnemonic::Bmi
        | Mnemonic::Bvc
        | Mnemonic::Bvs => {
            let taken = branch_taken(op.mnemonic, ctx.regs.status);
            cycles += branch(ctx, operand, taken);
        }

        // Jumps
        Mnemonic::Jmp => {
            if let Operand::Address { addr, .. } = operand {
                ctx.regs.pc = addr;
            }
        }
        Mnemonic::Jsr => {
            if let Operand::Address { addr, .. } = operand {
                // PC sits on the next instruction; the 6502 pushes one less.
                let return_addr = ctx.regs.pc.wrapping_sub(1);
                ctx.push_word(return_addr);
                ctx.regs.pc = addr;
            }
        }
        Mnemonic::Rts => {
            ctx.regs.pc = ctx.pull_word().wrapping_add(1);
        }
        Mnemonic::Brk => {
            // Skip the padding byte.
            let return_addr = ctx.regs.pc.wrapping_add(1);
            ctx.push_word(return_addr);
            let p = ctx.regs.status.to_stack_byte(true);
            ctx.push(p);
            ctx.regs.status.insert(StatusFlags::INTERRUPT_DISABLE);
            ctx.regs.pc = ctx.bus.read_u16(IRQ_VECTOR, IRQ_VECTOR + 1);
        }
        Mnemonic::Rti => {
            let p = ctx.pull();
            ctx.regs.status.restore_from_stack(p);
            ctx.regs.pc = ctx.pull_word();
        }

        // Stack
        Mnemonic::Pha => {
            let a = ctx.regs.a;
            ctx.push(a);
        }
        Mnemonic::Php => {
            let p = ctx.regs.status.to_stack_byte(true);
            ctx.push(p);
        }
        Mnemonic::Pla => {
            ctx.regs.a = ctx.pull();
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Plp => {
            let p = ctx.pull();
            ctx.regs.status.restore_from_stack(p);
        }

        // Transfers
        Mnemonic::Tax => {
            ctx.regs.x = ctx.regs.a;
            ctx.regs.status.set_zero_negative(ctx.regs.x);
        }
        Mnemonic::Tay => {
            ctx.regs.y = ctx.regs.a;
            ctx.regs.status.set_zero_negative(ctx.regs.y);
        }
        Mnemonic::Txa => {
            ctx.regs.a = ctx.regs.x;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Tya => {
            ctx.regs.a = ctx.regs.y;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Tsx => {
            ctx.regs.x = ctx.regs.sp;
            ctx.regs.status.set_zero_negative(ctx.regs.x);
        }
        Mnemonic::Txs => ctx.regs.sp = ctx.regs.x,

        // Flags
        Mnemonic::Clc => ctx.regs.status.remove(StatusFlags::CARRY),
        Mnemonic::Sec => ctx.regs.status.insert(StatusFlags::CARRY),
        Mnemonic::Cli => ctx.regs.status.remove(StatusFlags::INTERRUPT_DISABLE),
        Mnemonic::Sei => ctx.regs.status.insert(StatusFlags::INTERRUPT_DISABLE),
        Mnemonic::Cld => ctx.regs.status.remove(StatusFlags::DECIMAL),
        Mnemonic::Sed => ctx.regs.status.insert(StatusFlags::DECIMAL),
        Mnemonic::Clv => ctx.regs.status.remove(StatusFlags::OVERFLOW),

        Mnemonic::Nop => {
            // Multi-byte NOPs still perform their read.
            if let Operand::Address { addr, .. } = operand {
                ctx.bus.read(addr);
            }
        }

        // Undocumented
        Mnemonic::Lax => {
            let value = read_operand(ctx, operand);
            ctx.regs.a = value;
            ctx.regs.x = value;
            ctx.regs.status.set_zero_negative(value);
        }
        Mnemonic::Sax => {
            let value = ctx.regs.a & ctx.regs.x;
            write_operand(ctx, operand, value);
        }
        Mnemonic::Dcp => {
            let value = modify(ctx, operand, |_, v| v.wrapping_sub(1));
            compare(&mut ctx.regs.status, ctx.regs.a, value);
        }
        Mnemonic::Isc => {
            let value = modify(ctx, operand, |_, v| v.wrapping_add(1));
            sbc(ctx, value);
        }
        Mnemonic::Slo => {
            let value = modify(ctx, operand, asl);
            ctx.regs.a |= value;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Rla => {
            let value = modify(ctx, operand, rol);
            ctx.regs.a &= value;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Sre => {
            let value = modify(ctx, operand, lsr);
            ctx.regs.a ^= value;
            ctx.regs.status.set_zero_negative(ctx.regs.a);
        }
        Mnemonic::Rra => {
            let value = modify(ctx, operand, ror);
            adc(ctx, value);
        }
        Mnemonic::Anc => {
            let value = read_operand(ctx, operand);
            ctx.regs.a &= value;
            let a = ctx.regs.a;
            let status = &mut ctx.regs.status;
            status.set_zero_negative(a);
            status.set(StatusFlags::CARRY, a & 0x80 != 0);
        }
        Mnemonic::Alr => {
            let value = read_operand(ctx, operand);
            ctx.regs.a &= value;
            ctx.regs.a = lsr(&mut ctx.regs.status, ctx.regs.a);
        }
        Mnemonic::Arr => {
            let value = read_operand(ctx, operand) & ctx.regs.a;
            let result = (value >> 1) | (ctx.regs.status.carry_bit() << 7);
            ctx.regs.a = result;
            let status = &mut ctx.regs.status;
            status.set_zero_negative(result);
            status.set(StatusFlags::CARRY, result & 0x40 != 0);
            status.set(
                StatusFlags::OVERFLOW,
                ((result >> 6) ^ (result >> 5)) & 0x01 != 0,
            );
        }
        Mnemonic::Axs => {
            let value = read_operand(ctx, operand);
            let masked = ctx.regs.a & ctx.regs.x;
            ctx.regs.x = masked.wrapping_sub(value);
            ctx.regs.status.set(StatusFlags::CARRY, masked >= value);
            ctx.regs.status.set_zero_negative(ctx.regs.x);
        }
    }

    cycles
}

fn branch_taken(mnemonic: Mnemonic, status: StatusFlags) -> bool {
    match mnemonic {
        Mnemonic::Bcc => !status.contains(StatusFlags::CARRY),
        Mnemonic::Bcs => status.contains(StatusFlags::CARRY),
        Mnemonic::Bne => !status.contains(StatusFlags::ZERO),
        Mnemonic::Beq => status.contains(StatusFlags::ZERO),
        Mnemonic::Bpl => !status.contains(StatusFlags::NEGATIVE),
        Mnemonic::Bmi => status.contains(StatusFlags::NEGATIVE),
        Mnemonic::Bvc => !status.contains(StatusFlags::OVERFLOW),
        Mnemonic::Bvs => status.contains(StatusFlags::OVERFLOW),
        _ => false,
    }
}

fn read_operand(ctx: &mut ExecContext<'_>, operand: Operand) -> u8 {
    match operand {
        Operand::Immediate(value) => value,
        Operand::Accumulator => ctx.regs.a,
        Operand::Address { addr, .. } => ctx.bus.read(addr),
        Operand::None | Operand::Relative(_) => 0,
    }
}

fn write_operand(ctx: &mut ExecContext<'_>, operand: Operand, value: u8) {
    match operand {
        Operand::Address { addr, .. } => ctx.bus.write(addr, value),
        Operand::Accumulator => ctx.regs.a = value,
        Operand::None | Operand::Immediate(_) | Operand::Relative(_) => {}
    }
}

/// Read-modify-write on the accumulator or memory. Returns the new value.
fn modify(
    ctx: &mut ExecContext<'_>,
    operand: Operand,
    f: impl FnOnce(&mut StatusFlags, u8) -> u8,
) -> u8 {
    let value = read_operand(ctx, operand);
    let result = f(&mut ctx.regs.status, value);
    write_operand(ctx, operand, result);
    result
}

fn asl(status: &mut StatusFlags, value: u8) -> u8 {
    let result = value << 1;
    status.set(StatusFlags::CARRY, value & 0x80 != 0);
    status.set_zero_negative(result);
    result
}

fn lsr(status: &mut StatusFlags, value: u8) -> u8 {
    let result = value >> 1;
    status.set(StatusFlags::CARRY, value & 0x01 != 0);
    status.set_zero_negative(result);
    result
}

fn rol(status: &mut StatusFlags, value: u8) -> u8 {
    let result = (value << 1) | status.carry_bit();
    status.set(StatusFlags::CARRY, value & 0x80 != 0);
    status.set_zero_negative(result);
    result
}

fn ror(status: &mut StatusFlags, value: u8) -> u8 {
    let result = (value >> 1) | (status.carry_bit() << 7);
    status.set(StatusFlags::CARRY, value & 0x01 != 0);
    status.set_zero_negative(result);
    result
}

/// Binary add with carry. DECIMAL is deliberately ignored.
fn adc(ctx: &mut ExecContext<'_>, value: u8) {
    let a = ctx.regs.a;
    let sum = a as u16 + value as u16 + ctx.regs.status.carry_bit() as u16;
    let result = sum as u8;

    let status = &mut ctx.regs.status;
    status.set(StatusFlags::CARRY, sum > 0xFF);
    status.set(
        StatusFlags::OVERFLOW,
        (a ^ result) & (value ^ result) & 0x80 != 0,
    );
    status.set_zero_negative(result);
    ctx.regs.a = result;
}

/// A - M - !C, carry set when no borrow occurred.
fn sbc(ctx: &mut ExecContext<'_>, value: u8) {
    adc(ctx, !value);
}

/// Unsigned compare: C = reg >= value, Z = equal, N = bit 7 of reg - value.
fn compare(status: &mut StatusFlags, reg: u8, value: u8) {
    let diff = reg.wrapping_sub(value);
    status.set(StatusFlags::CARRY, reg >= value);
    status.set(StatusFlags::ZERO, reg == value);
    status.set(StatusFlags::NEGATIVE, diff & 0x80 != 0);
}

/// Extra cycles: +1 when taken, +1 more when the target leaves the page of
/// the instruction following the branch.
fn branch(ctx: &mut ExecContext<'_>, operand: Operand, condition: bool) -> u32 {
    let Operand::Relative(offset) = operand else {
        return 0;
    };
    if !condition {
        return 0;
    }
    let next = ctx.regs.pc;
    let target = next.wrapping_add(offset as i16 as u16);
    ctx.regs.pc = target;
    if crosses_page(next, target) {
        2
    } else {
        1
    }
}
