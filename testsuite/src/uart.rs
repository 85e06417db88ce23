//! LM3S6965 UART0 behind the `Registers` trait (QEMU testing only).
//!
//! The LM3S6965 has a PL011, which has no transmit-ready bit. Its "transmit
//! FIFO full" flag is inverted into the Status ready bit the driver polls.
//!
//! QEMU serial port mapping: the first `-serial` argument is UART0.

use core::ptr::{with_exposed_provenance, with_exposed_provenance_mut};

use polled_uart::{Registers, STATUS_TX_READY, Uart};

const UART0_BASE: usize = 0x4000_C000;

const UART_DR_OFFSET: usize = 0x000; // Data Register
const UART_FR_OFFSET: usize = 0x018; // Flag Register
const UART_FR_TXFF: u32 = 0x20; // Transmit FIFO Full

/// PL011 register block adapted to the polled-UART protocol.
pub struct Lm3sUart {
    base: usize,
}

impl Lm3sUart {
    /// UART0, captured by the xtask runner.
    pub const fn uart0() -> Self {
        Self { base: UART0_BASE }
    }
}

impl Registers for Lm3sUart {
    fn read_status(&mut self) -> u32 {
        let fr = with_exposed_provenance::<u32>(self.base + UART_FR_OFFSET);
        // SAFETY: Fixed, always mapped peripheral address on the LM3S6965.
        let flags = unsafe { fr.read_volatile() };
        if flags & UART_FR_TXFF == 0 {
            STATUS_TX_READY
        } else {
            0
        }
    }

    fn write_tx(&mut self, byte: u8) {
        let dr = with_exposed_provenance_mut::<u32>(self.base + UART_DR_OFFSET);
        // SAFETY: Fixed, always mapped peripheral address on the LM3S6965.
        unsafe { dr.write_volatile(u32::from(byte)) };
    }
}

/// Driver for UART0.
pub fn console() -> Uart<Lm3sUart> {
    Uart::new(Lm3sUart::uart0())
}
