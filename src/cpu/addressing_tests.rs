use super::*;

#[cfg(test)]
mod addressing_mode_tests {
    use super::*;
    use crate::cpu::addressing::{resolve, AddressingMode, Operand};

    fn resolve_at(bus: &mut TestBus, regs: &mut Registers, mode: AddressingMode) -> Operand {
        let mut ctx = ExecContext::new(regs, bus);
        resolve(&mut ctx, mode)
    }

    #[test]
    fn test_zero_page_addressing() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        bus.write(0x42, 0xAB);

        // LDA $42
        bus.load_program(&[0xA5, 0x42], 0x8000);
        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cpu.regs.a, 0xAB);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn test_zero_page_x_addressing() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.x = 0x10;
        bus.write(0x52, 0xCD); // 0x42 + 0x10

        // LDA $42,X
        bus.load_program(&[0xB5, 0x42], 0x8000);
        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cpu.regs.a, 0xCD);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn test_zero_page_x_wraps_within_page_zero() {
        let mut bus = TestBus::new();
        let mut regs = Registers::new();
        regs.pc = 0x8001;
        regs.x = 0x01;
        bus.load_program(&[0xB5, 0xFF], 0x8000);

        let operand = resolve_at(&mut bus, &mut regs, AddressingMode::ZeroPageX);

        assert_eq!(
            operand,
            Operand::Address {
                addr: 0x0000,
                page_crossed: false
            }
        );
        assert_eq!(regs.pc, 0x8002);
    }

    #[test]
    fn test_zero_page_y_wraps() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.y = 0x20;
        bus.write(0x0010, 0x5A); // (0xF0 + 0x20) & 0xFF

        // LDX $F0,Y
        bus.load_program(&[0xB6, 0xF0], 0x8000);
        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cpu.regs.x, 0x5A);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn test_absolute_addressing() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        bus.write(0x1234, 0xEF);

        // LDA $1234
        bus.load_program(&[0xAD, 0x34, 0x12], 0x8000);
        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cpu.regs.a, 0xEF);
        assert_eq!(cpu.regs.pc, 0x8003);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn test_absolute_x_page_cross_penalty() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.x = 0x01;
        bus.write(0x1235, 0x11);
        bus.write(0x1300, 0x22);

        // LDA $1234,X ; LDA $12FF,X
        bus.load_program(&[0xBD, 0x34, 0x12, 0xBD, 0xFF, 0x12], 0x8000);

        assert_eq!(step(&mut cpu, &mut bus), 4);
        assert_eq!(cpu.regs.a, 0x11);

        assert_eq!(step(&mut cpu, &mut bus), 5);
        assert_eq!(cpu.regs.a, 0x22);
    }

    #[test]
    fn test_absolute_y_page_cross_penalty() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.y = 0x10;
        bus.write(0x2105, 0x33);

        // LDA $20F5,Y
        bus.load_program(&[0xB9, 0xF5, 0x20], 0x8000);

        assert_eq!(step(&mut cpu, &mut bus), 5);
        assert_eq!(cpu.regs.a, 0x33);
    }

    #[test]
    fn test_absolute_x_wraps_address_space() {
        let mut bus = TestBus::new();
        let mut regs = Registers::new();
        regs.pc = 0x8000;
        regs.x = 0x02;
        bus.load_program(&[0xFF, 0xFF], 0x8000);

        let operand = resolve_at(&mut bus, &mut regs, AddressingMode::AbsoluteX);

        assert_eq!(
            operand,
            Operand::Address {
                addr: 0x0001,
                page_crossed: true
            }
        );
    }

    #[test]
    fn test_indexed_indirect() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.x = 0x04;
        bus.write(0x0024, 0x74);
        bus.write(0x0025, 0x20);
        bus.write(0x2074, 0x99);

        // LDA ($20,X)
        bus.load_program(&[0xA1, 0x20], 0x8000);
        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cpu.regs.a, 0x99);
        assert_eq!(cycles, 6);
    }

    #[test]
    fn test_indexed_indirect_pointer_wraps() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        // Pointer at $FF takes its high byte from $00, not $0100
        cpu.regs.x = 0x00;
        bus.write(0x00FF, 0x34);
        bus.write(0x0000, 0x12);
        bus.write(0x0100, 0x56);
        bus.write(0x1234, 0x77);

        // LDA ($FF,X)
        bus.load_program(&[0xA1, 0xFF], 0x8000);
        step(&mut cpu, &mut bus);

        assert_eq!(cpu.regs.a, 0x77);
    }

    #[test]
    fn test_indirect_indexed() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.y = 0x10;
        bus.write(0x0086, 0x28);
        bus.write(0x0087, 0x40);
        bus.write(0x4038, 0x5C);

        // LDA ($86),Y
        bus.load_program(&[0xB1, 0x86], 0x8000);
        assert_eq!(step(&mut cpu, &mut bus), 5);
        assert_eq!(cpu.regs.a, 0x5C);
    }

    #[test]
    fn test_indirect_indexed_page_cross_penalty() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.y = 0x01;
        bus.write(0x0086, 0xFF);
        bus.write(0x0087, 0x40);
        bus.write(0x4100, 0x6D);

        // LDA ($86),Y
        bus.load_program(&[0xB1, 0x86], 0x8000);
        assert_eq!(step(&mut cpu, &mut bus), 6);
        assert_eq!(cpu.regs.a, 0x6D);
    }

    #[test]
    fn test_jmp_indirect_page_bug() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        bus.write(0x02FF, 0x00);
        bus.write(0x0200, 0x90);
        bus.write(0x0300, 0x40);

        // JMP ($02FF)
        bus.load_program(&[0x6C, 0xFF, 0x02], 0x8000);
        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cpu.regs.pc, 0x9000);
        assert_eq!(cycles, 5);
    }

    #[test]
    fn test_stores_take_no_page_cross_penalty() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.a = 0x42;
        cpu.regs.x = 0x01;
        cpu.regs.y = 0x01;
        bus.write(0x0010, 0xFF);
        bus.write(0x0011, 0x20);

        // STA $20FF,X ; STA $20FF,Y ; STA ($10),Y
        bus.load_program(
            &[0x9D, 0xFF, 0x20, 0x99, 0xFF, 0x20, 0x91, 0x10],
            0x8000,
        );

        assert_eq!(step(&mut cpu, &mut bus), 5);
        assert_eq!(bus.read(0x2100), 0x42);
        assert_eq!(step(&mut cpu, &mut bus), 5);
        assert_eq!(step(&mut cpu, &mut bus), 6);
    }

    #[test]
    fn test_read_modify_write_fixed_cost() {
        let (mut cpu, mut bus) = setup_cpu();
        cpu.reset(&mut bus);

        cpu.regs.x = 0x01;
        bus.write(0x2100, 0x40);

        // ASL $20FF,X ; INC $2000,X
        bus.load_program(&[0x1E, 0xFF, 0x20, 0xFE, 0x00, 0x20], 0x8000);

        assert_eq!(step(&mut cpu, &mut bus), 7);
        assert_eq!(bus.read(0x2100), 0x80);
        assert_eq!(step(&mut cpu, &mut bus), 7);
        assert_eq!(bus.read(0x2001), 0x01);
    }
}
