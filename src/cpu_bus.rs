//! Trait representing the minimal bus interface required by the 2A03 core.

pub trait CpuBus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);

    /// Little-endian word from two independently computed addresses.
    ///
    /// Callers wrap `hi` themselves, which is how the zero-page pointer
    /// fetches and the JMP indirect page bug are reproduced.
    fn read_u16(&mut self, lo: u16, hi: u16) -> u16 {
        let lo = self.read(lo) as u16;
        let hi = self.read(hi) as u16;
        (hi << 8) | lo
    }

    /// Edge-triggered NMI latch. Polling does not clear it.
    fn poll_nmi(&mut self) -> bool {
        false
    }
    fn acknowledge_nmi(&mut self) {}

    /// Level IRQ line, sampled fresh at every instruction boundary.
    fn poll_irq(&mut self) -> bool;

    /// Side-effect free read used by tracing. `None` when the address
    /// cannot be inspected without disturbing the device behind it.
    fn peek(&self, _addr: u16) -> Option<u8> {
        None
    }
}
