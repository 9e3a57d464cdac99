use bitflags::bitflags;

bitflags! {
    /// Processor status register (P). Bit 5 has no storage; it is only
    /// ever materialised by [`StatusFlags::to_stack_byte`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000; // stored, never consulted by ADC/SBC
        const BREAK = 0b0001_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

/// Bit 5 of a packed status byte, always set on push.
pub const UNUSED_BIT: u8 = 0b0010_0000;

impl StatusFlags {
    /// State after power-on/reset: only interrupts masked (packs to `0x24`).
    pub const RESET: StatusFlags = StatusFlags::INTERRUPT_DISABLE;

    /// Packed byte as it lands on the stack. `brk` selects the B bit:
    /// set for BRK/PHP, clear for NMI/IRQ.
    pub fn to_stack_byte(self, brk: bool) -> u8 {
        let bits = (self.bits() & !StatusFlags::BREAK.bits()) | UNUSED_BIT;
        if brk {
            bits | StatusFlags::BREAK.bits()
        } else {
            bits
        }
    }

    /// Packed byte with the in-register B bit, used for traces and snapshots.
    pub fn to_byte(self) -> u8 {
        self.bits() | UNUSED_BIT
    }

    /// Restore flags from a byte pulled by PLP/RTI. B and bit 5 of the
    /// pulled byte are discarded; the current B bit is kept.
    pub fn restore_from_stack(&mut self, value: u8) {
        let keep = *self & StatusFlags::BREAK;
        *self = StatusFlags::from_bits_truncate(value) - StatusFlags::BREAK | keep;
    }

    /// Unpack a byte verbatim (snapshots), dropping only bit 5.
    pub fn from_byte(value: u8) -> Self {
        StatusFlags::from_bits_truncate(value)
    }

    pub fn set_zero_negative(&mut self, value: u8) {
        self.set(StatusFlags::ZERO, value == 0);
        self.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    pub fn carry_bit(self) -> u8 {
        self.contains(StatusFlags::CARRY) as u8
    }
}
