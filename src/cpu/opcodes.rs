//! Opcode table: one plain data record per opcode byte.

use super::addressing::AddressingMode;
use super::addressing::AddressingMode::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented, stable on the 2A03.
    Alr,
    Anc,
    Arr,
    Axs,
    Dcp,
    Isc,
    Lax,
    Rla,
    Rra,
    Sax,
    Slo,
    Sre,
}

impl Mnemonic {
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
            Mnemonic::Alr => "ALR",
            Mnemonic::Anc => "ANC",
            Mnemonic::Arr => "ARR",
            Mnemonic::Axs => "AXS",
            Mnemonic::Dcp => "DCP",
            Mnemonic::Isc => "ISC",
            Mnemonic::Lax => "LAX",
            Mnemonic::Rla => "RLA",
            Mnemonic::Rra => "RRA",
            Mnemonic::Sax => "SAX",
            Mnemonic::Slo => "SLO",
            Mnemonic::Sre => "SRE",
        }
    }

    /// Instructions that only read their operand pay the page-cross cycle.
    const fn reads_only(self) -> bool {
        matches!(
            self,
            Mnemonic::Adc
                | Mnemonic::And
                | Mnemonic::Bit
                | Mnemonic::Cmp
                | Mnemonic::Cpx
                | Mnemonic::Cpy
                | Mnemonic::Eor
                | Mnemonic::Lda
                | Mnemonic::Ldx
                | Mnemonic::Ldy
                | Mnemonic::Nop
                | Mnemonic::Ora
                | Mnemonic::Sbc
                | Mnemonic::Lax
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub cycles: u8,
    /// +1 cycle when an indexed read crosses a page.
    pub page_penalty: bool,
    pub undocumented: bool,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<Operation> {
    Some(Operation {
        mnemonic,
        mode,
        cycles,
        page_penalty: mnemonic.reads_only(),
        undocumented: false,
    })
}

const fn undoc(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<Operation> {
    Some(Operation {
        mnemonic,
        mode,
        cycles,
        page_penalty: mnemonic.reads_only(),
        undocumented: true,
    })
}

pub fn lookup(opcode: u8) -> Option<&'static Operation> {
    OPCODES[opcode as usize].as_ref()
}

pub static OPCODES: [Option<Operation>; 256] = build_table();

const fn build_table() -> [Option<Operation>; 256] {
    use Mnemonic::*;
    let mut t: [Option<Operation>; 256] = [None; 256];

    t[0x69] = op(Adc, Immediate, 2);
    t[0x65] = op(Adc, ZeroPage, 3);
    t[0x75] = op(Adc, ZeroPageX, 4);
    t[0x6D] = op(Adc, Absolute, 4);
    t[0x7D] = op(Adc, AbsoluteX, 4);
    t[0x79] = op(Adc, AbsoluteY, 4);
    t[0x61] = op(Adc, IndexedIndirect, 6);
    t[0x71] = op(Adc, IndirectIndexed, 5);

    t[0x29] = op(And, Immediate, 2);
    t[0x25] = op(And, ZeroPage, 3);
    t[0x35] = op(And, ZeroPageX, 4);
    t[0x2D] = op(And, Absolute, 4);
    t[0x3D] = op(And, AbsoluteX, 4);
    t[0x39] = op(And, AbsoluteY, 4);
    t[0x21] = op(And, IndexedIndirect, 6);
    t[0x31] = op(And, IndirectIndexed, 5);

    t[0x0A] = op(Asl, Accumulator, 2);
    t[0x06] = op(Asl, ZeroPage, 5);
    t[0x16] = op(Asl, ZeroPageX, 6);
    t[0x0E] = op(Asl, Absolute, 6);
    t[0x1E] = op(Asl, AbsoluteX, 7);

    t[0x90] = op(Bcc, Relative, 2);
    t[0xB0] = op(Bcs, Relative, 2);
    t[0xF0] = op(Beq, Relative, 2);
    t[0x30] = op(Bmi, Relative, 2);
    t[0xD0] = op(Bne, Relative, 2);
    t[0x10] = op(Bpl, Relative, 2);
    t[0x50] = op(Bvc, Relative, 2);
    t[0x70] = op(Bvs, Relative, 2);

    t[0x24] = op(Bit, ZeroPage, 3);
    t[0x2C] = op(Bit, Absolute, 4);

    t[0x00] = op(Brk, Implied, 7);

    t[0x18] = op(Clc, Implied, 2);
    t[0xD8] = op(Cld, Implied, 2);
    t[0x58] = op(Cli, Implied, 2);
    t[0xB8] = op(Clv, Implied, 2);

    t[0xC9] = op(Cmp, Immediate, 2);
    t[0xC5] = op(Cmp, ZeroPage, 3);
    t[0xD5] = op(Cmp, ZeroPageX, 4);
    t[0xCD] = op(Cmp, Absolute, 4);
    t[0xDD] = op(Cmp, AbsoluteX, 4);
    t[0xD9] = op(Cmp, AbsoluteY, 4);
    t[0xC1] = op(Cmp, IndexedIndirect, 6);
    t[0xD1] = op(Cmp, IndirectIndexed, 5);

    t[0xE0] = op(Cpx, Immediate, 2);
    t[0xE4] = op(Cpx, ZeroPage, 3);
    t[0xEC] = op(Cpx, Absolute, 4);

    t[0xC0] = op(Cpy, Immediate, 2);
    t[0xC4] = op(Cpy, ZeroPage, 3);
    t[0xCC] = op(Cpy, Absolute, 4);

    t[0xC6] = op(Dec, ZeroPage, 5);
    t[0xD6] = op(Dec, ZeroPageX, 6);
    t[0xCE] = op(Dec, Absolute, 6);
    t[0xDE] = op(Dec, AbsoluteX, 7);

    t[0xCA] = op(Dex, Implied, 2);
    t[0x88] = op(Dey, Implied, 2);

    t[0x49] = op(Eor, Immediate, 2);
    t[0x45] = op(Eor, ZeroPage, 3);
    t[0x55] = op(Eor, ZeroPageX, 4);
    t[0x4D] = op(Eor, Absolute, 4);
    t[0x5D] = op(Eor, AbsoluteX, 4);
    t[0x59] = op(Eor, AbsoluteY, 4);
    t[0x41] = op(Eor, IndexedIndirect, 6);
    t[0x51] = op(Eor, IndirectIndexed, 5);

    t[0xE6] = op(Inc, ZeroPage, 5);
    t[0xF6] = op(Inc, ZeroPageX, 6);
    t[0xEE] = op(Inc, Absolute, 6);
    t[0xFE] = op(Inc, AbsoluteX, 7);

    t[0xE8] = op(Inx, Implied, 2);
    t[0xC8] = op(Iny, Implied, 2);

    t[0x4C] = op(Jmp, Absolute, 3);
    t[0x6C] = op(Jmp, Indirect, 5);
    t[0x20] = op(Jsr, Absolute, 6);

    t[0xA9] = op(Lda, Immediate, 2);
    t[0xA5] = op(Lda, ZeroPage, 3);
    t[0xB5] = op(Lda, ZeroPageX, 4);
    t[0xAD] = op(Lda, Absolute, 4);
    t[0xBD] = op(Lda, AbsoluteX, 4);
    t[0xB9] = op(Lda, AbsoluteY, 4);
    t[0xA1] = op(Lda, IndexedIndirect, 6);
    t[0xB1] = op(Lda, IndirectIndexed, 5);

    t[0xA2] = op(Ldx, Immediate, 2);
    t[0xA6] = op(Ldx, ZeroPage, 3);
    t[0xB6] = op(Ldx, ZeroPageY, 4);
    t[0xAE] = op(Ldx, Absolute, 4);
    t[0xBE] = op(Ldx, AbsoluteY, 4);

    t[0xA0] = op(Ldy, Immediate, 2);
    t[0xA4] = op(Ldy, ZeroPage, 3);
    t[0xB4] = op(Ldy, ZeroPageX, 4);
    t[0xAC] = op(Ldy, Absolute, 4);
    t[0xBC] = op(Ldy, AbsoluteX, 4);

    t[0x4A] = op(Lsr, Accumulator, 2);
    t[0x46] = op(Lsr, ZeroPage, 5);
    t[0x56] = op(Lsr, ZeroPageX, 6);
    t[0x4E] = op(Lsr, Absolute, 6);
    t[0x5E] = op(Lsr, AbsoluteX, 7);

    t[0xEA] = op(Nop, Implied, 2);

    t[0x09] = op(Ora, Immediate, 2);
    t[0x05] = op(Ora, ZeroPage, 3);
    t[0x15] = op(Ora, ZeroPageX, 4);
    t[0x0D] = op(Ora, Absolute, 4);
    t[0x1D] = op(Ora, AbsoluteX, 4);
    t[0x19] = op(Ora, AbsoluteY, 4);
    t[0x01] = op(Ora, IndexedIndirect, 6);
    t[0x11] = op(Ora, IndirectIndexed, 5);

    t[0x48] = op(Pha, Implied, 3);
    t[0x08] = op(Php, Implied, 3);
    t[0x68] = op(Pla, Implied, 4);
    t[0x28] = op(Plp, Implied, 4);

    t[0x2A] = op(Rol, Accumulator, 2);
    t[0x26] = op(Rol, ZeroPage, 5);
    t[0x36] = op(Rol, ZeroPageX, 6);
    t[0x2E] = op(Rol, Absolute, 6);
    t[0x3E] = op(Rol, AbsoluteX, 7);

    t[0x6A] = op(Ror, Accumulator, 2);
    t[0x66] = op(Ror, ZeroPage, 5);
    t[0x76] = op(Ror, ZeroPageX, 6);
    t[0x6E] = op(Ror, Absolute, 6);
    t[0x7E] = op(Ror, AbsoluteX, 7);

    t[0x40] = op(Rti, Implied, 6);
    t[0x60] = op(Rts, Implied, 6);

    t[0xE9] = op(Sbc, Immediate, 2);
    t[0xE5] = op(Sbc, ZeroPage, 3);
    t[0xF5] = op(Sbc, ZeroPageX, 4);
    t[0xED] = op(Sbc, Absolute, 4);
    t[0xFD] = op(Sbc, AbsoluteX, 4);
    t[0xF9] = op(Sbc, AbsoluteY, 4);
    t[0xE1] = op(Sbc, IndexedIndirect, 6);
    t[0xF1] = op(Sbc, IndirectIndexed, 5);

    t[0x38] = op(Sec, Implied, 2);
    t[0xF8] = op(Sed, Implied, 2);
    t[0x78] = op(Sei, Implied, 2);

    t[0x85] = op(Sta, ZeroPage, 3);
    t[0x95] = op(Sta, ZeroPageX, 4);
    t[0x8D] = op(Sta, Absolute, 4);
    t[0x9D] = op(Sta, AbsoluteX, 5);
    t[0x99] = op(Sta, AbsoluteY, 5);
    t[0x81] = op(Sta, IndexedIndirect, 6);
    t[0x91] = op(Sta, IndirectIndexed, 6);

    t[0x86] = op(Stx, ZeroPage, 3);
    t[0x96] = op(Stx, ZeroPageY, 4);
    t[0x8E] = op(Stx, Absolute, 4);

    t[0x84] = op(Sty, ZeroPage, 3);
    t[0x94] = op(Sty, ZeroPageX, 4);
    t[0x8C] = op(Sty, Absolute, 4);

    t[0xAA] = op(Tax, Implied, 2);
    t[0xA8] = op(Tay, Implied, 2);
    t[0xBA] = op(Tsx, Implied, 2);
    t[0x8A] = op(Txa, Implied, 2);
    t[0x9A] = op(Txs, Implied, 2);
    t[0x98] = op(Tya, Implied, 2);

    // Undocumented NOPs
    t[0x1A] = undoc(Nop, Implied, 2);
    t[0x3A] = undoc(Nop, Implied, 2);
    t[0x5A] = undoc(Nop, Implied, 2);
    t[0x7A] = undoc(Nop, Implied, 2);
    t[0xDA] = undoc(Nop, Implied, 2);
    t[0xFA] = undoc(Nop, Implied, 2);
    t[0x80] = undoc(Nop, Immediate, 2);
    t[0x82] = undoc(Nop, Immediate, 2);
    t[0x89] = undoc(Nop, Immediate, 2);
    t[0xC2] = undoc(Nop, Immediate, 2);
    t[0xE2] = undoc(Nop, Immediate, 2);
    t[0x04] = undoc(Nop, ZeroPage, 3);
    t[0x44] = undoc(Nop, ZeroPage, 3);
    t[0x64] = undoc(Nop, ZeroPage, 3);
    t[0x14] = undoc(Nop, ZeroPageX, 4);
    t[0x34] = undoc(Nop, ZeroPageX, 4);
    t[0x54] = undoc(Nop, ZeroPageX, 4);
    t[0x74] = undoc(Nop, ZeroPageX, 4);
    t[0xD4] = undoc(Nop, ZeroPageX, 4);
    t[0xF4] = undoc(Nop, ZeroPageX, 4);
    t[0x0C] = undoc(Nop, Absolute, 4);
    t[0x1C] = undoc(Nop, AbsoluteX, 4);
    t[0x3C] = undoc(Nop, AbsoluteX, 4);
    t[0x5C] = undoc(Nop, AbsoluteX, 4);
    t[0x7C] = undoc(Nop, AbsoluteX, 4);
    t[0xDC] = undoc(Nop, AbsoluteX, 4);
    t[0xFC] = undoc(Nop, AbsoluteX, 4);

    t[0xA7] = undoc(Lax, ZeroPage, 3);
    t[0xB7] = undoc(Lax, ZeroPageY, 4);
    t[0xAF] = undoc(Lax, Absolute, 4);
    t[0xBF] = undoc(Lax, AbsoluteY, 4);
    t[0xA3] = undoc(Lax, IndexedIndirect, 6);
    t[0xB3] = undoc(Lax, IndirectIndexed, 5);

    t[0x87] = undoc(Sax, ZeroPage, 3);
    t[0x97] = undoc(Sax, ZeroPageY, 4);
    t[0x8F] = undoc(Sax, Absolute, 4);
    t[0x83] = undoc(Sax, IndexedIndirect, 6);

    t[0xEB] = undoc(Sbc, Immediate, 2);

    t[0xC7] = undoc(Dcp, ZeroPage, 5);
    t[0xD7] = undoc(Dcp, ZeroPageX, 6);
    t[0xCF] = undoc(Dcp, Absolute, 6);
    t[0xDF] = undoc(Dcp, AbsoluteX, 7);
    t[0xDB] = undoc(Dcp, AbsoluteY, 7);
    t[0xC3] = undoc(Dcp, IndexedIndirect, 8);
    t[0xD3] = undoc(Dcp, IndirectIndexed, 8);

    t[0xE7] = undoc(Isc, ZeroPage, 5);
    t[0xF7] = undoc(Isc, ZeroPageX, 6);
    t[0xEF] = undoc(Isc, Absolute, 6);
    t[0xFF] = undoc(Isc, AbsoluteX, 7);
    t[0xFB] = undoc(Isc, AbsoluteY, 7);
    t[0xE3] = undoc(Isc, IndexedIndirect, 8);
    t[0xF3] = undoc(Isc, IndirectIndexed, 8);

    t[0x07] = undoc(Slo, ZeroPage, 5);
    t[0x17] = undoc(Slo, ZeroPageX, 6);
    t[0x0F] = undoc(Slo, Absolute, 6);
    t[0x1F] = undoc(Slo, AbsoluteX, 7);
    t[0x1B] = undoc(Slo, AbsoluteY, 7);
    t[0x03] = undoc(Slo, IndexedIndirect, 8);
    t[0x13] = undoc(Slo, IndirectIndexed, 8);

    t[0x27] = undoc(Rla, ZeroPage, 5);
    t[0x37] = undoc(Rla, ZeroPageX, 6);
    t[0x2F] = undoc(Rla, Absolute, 6);
    t[0x3F] = undoc(Rla, AbsoluteX, 7);
    t[0x3B] = undoc(Rla, AbsoluteY, 7);
    t[0x23] = undoc(Rla, IndexedIndirect, 8);
    t[0x33] = undoc(Rla, IndirectIndexed, 8);

    t[0x47] = undoc(Sre, ZeroPage, 5);
    t[0x57] = undoc(Sre, ZeroPageX, 6);
    t[0x4F] = undoc(Sre, Absolute, 6);
    t[0x5F] = undoc(Sre, AbsoluteX, 7);
    t[0x5B] = undoc(Sre, AbsoluteY, 7);
    t[0x43] = undoc(Sre, IndexedIndirect, 8);
    t[0x53] = undoc(Sre, IndirectIndexed, 8);

    t[0x67] = undoc(Rra, ZeroPage, 5);
    t[0x77] = undoc(Rra, ZeroPageX, 6);
    t[0x6F] = undoc(Rra, Absolute, 6);
    t[0x7F] = undoc(Rra, AbsoluteX, 7);
    t[0x7B] = undoc(Rra, AbsoluteY, 7);
    t[0x63] = undoc(Rra, IndexedIndirect, 8);
    t[0x73] = undoc(Rra, IndirectIndexed, 8);

    t[0x0B] = undoc(Anc, Immediate, 2);
    t[0x2B] = undoc(Anc, Immediate, 2);
    t[0x4B] = undoc(Alr, Immediate, 2);
    t[0x6B] = undoc(Arr, Immediate, 2);
    t[0xCB] = undoc(Axs, Immediate, 2);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_official_opcode_count() {
        let official = OPCODES
            .iter()
            .flatten()
            .filter(|op| !op.undocumented)
            .count();
        assert_eq!(official, 151);
    }

    #[test]
    fn test_jam_opcodes_are_unhandled() {
        for opcode in [0x02u8, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2] {
            assert!(lookup(opcode).is_none(), "opcode {:02X}", opcode);
        }
    }

    #[test]
    fn test_stores_never_pay_page_penalty() {
        for opcode in [0x9Du8, 0x99, 0x91, 0x1E, 0xFE] {
            let op = lookup(opcode).unwrap();
            assert!(!op.page_penalty, "opcode {:02X}", opcode);
        }
        assert!(lookup(0xBD).unwrap().page_penalty);
        assert!(lookup(0xB1).unwrap().page_penalty);
    }

    #[test]
    fn test_cycle_costs_in_range() {
        for op in OPCODES.iter().flatten() {
            assert!((2..=8).contains(&op.cycles), "{:?}", op);
            if !op.undocumented {
                assert!(op.cycles <= 7, "{:?}", op);
            }
        }
    }
}
