//! The blocking transmit driver.

use core::ffi::CStr;
use core::fmt;

use crate::newline;
use crate::registers::Registers;

/// Error returned by the bounded writes when the transmitter stays busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct TransmitTimeout {
    /// Bytes that reached the Transmit-Data register before giving up,
    /// counted after newline translation.
    pub written: usize,
}

/// Polled transmitter for a UART reached through `R`.
///
/// Every write takes `&mut self`, so a `Uart` has exactly one writer. Share it
/// between contexts with [`SharedUart`](crate::SharedUart).
#[derive(Debug)]
pub struct Uart<R> {
    pub(crate) regs: R,
}

impl<R: Registers> Uart<R> {
    /// Wraps a register block. The hardware must already be configured.
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Gives the register block back.
    pub fn into_inner(self) -> R {
        self.regs
    }

    /// Transmits one byte.
    ///
    /// Spins on the Status register until the ready bit is set, then writes
    /// `byte` to Transmit-Data. Never returns if the transmitter never becomes
    /// ready; see [`Uart::try_write_byte`] for a bounded version.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        while !self.regs.tx_ready() {}
        self.regs.write_tx(byte);
    }

    /// Transmits one byte, reading Status at most `max_polls` times.
    ///
    /// With `max_polls == 0` nothing is read or written.
    pub fn try_write_byte(&mut self, byte: u8, max_polls: u32) -> Result<(), TransmitTimeout> {
        for _ in 0..max_polls {
            if self.regs.tx_ready() {
                self.regs.write_tx(byte);
                return Ok(());
            }
        }
        Err(TransmitTimeout { written: 0 })
    }

    /// Transmits `bytes` as is, without newline translation.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Transmits text, sending `\r\n` for every `\n`.
    pub fn write_string(&mut self, s: &[u8]) {
        for byte in newline::translate(s) {
            self.write_byte(byte);
        }
    }

    /// Transmits a null-terminated string, sending `\r\n` for every `\n`.
    pub fn write_cstr(&mut self, s: &CStr) {
        self.write_string(s.to_bytes());
    }

    /// Like [`Uart::write_string`], with a budget of `max_polls` Status reads per
    /// transmitted byte.
    pub fn try_write_string(&mut self, s: &[u8], max_polls: u32) -> Result<(), TransmitTimeout> {
        for (written, byte) in newline::translate(s).enumerate() {
            self.try_write_byte(byte, max_polls)
                .map_err(|_| TransmitTimeout { written })?;
        }
        Ok(())
    }
}

impl<R: Registers> fmt::Write for Uart<R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_string(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fake::FakeRegisters;
    use core::fmt::Write;

    #[test]
    fn byte_waits_for_ready() {
        let mut regs = FakeRegisters::busy_for(5);
        Uart::new(&mut regs).write_byte(b'x');

        assert_eq!(regs.tx(), b"x");
        assert_eq!(regs.status_reads, 6);
        assert_eq!(regs.unguarded_writes, 0);
    }

    #[test]
    fn every_byte_value_is_sent() {
        let mut regs = FakeRegisters::ready();
        let mut uart = Uart::new(&mut regs);
        for b in 0..=255u8 {
            uart.write_byte(b);
        }

        assert_eq!(regs.tx().len(), 256);
        assert!(regs.tx().iter().enumerate().all(|(i, &b)| b as usize == i));
        assert_eq!(regs.status_reads, 256);
        assert_eq!(regs.unguarded_writes, 0);
    }

    #[test]
    fn string_without_newline_is_byte_for_byte() {
        let mut regs = FakeRegisters::busy_for(2);
        Uart::new(&mut regs).write_string(b"polled\tuart\r");

        assert_eq!(regs.tx(), b"polled\tuart\r");
        assert_eq!(regs.status_reads, 3 * 12);
        assert_eq!(regs.unguarded_writes, 0);
    }

    #[test]
    fn newline_is_preceded_by_carriage_return() {
        let mut regs = FakeRegisters::ready();
        Uart::new(&mut regs).write_string(b"a\nb");

        assert_eq!(regs.tx(), b"a\r\nb");
    }

    #[test]
    fn empty_string_touches_nothing() {
        let mut regs = FakeRegisters::ready();
        Uart::new(&mut regs).write_string(b"");

        assert_eq!(regs.tx(), b"");
        assert_eq!(regs.status_reads, 0);
    }

    #[test]
    fn raw_bytes_skip_translation() {
        let mut regs = FakeRegisters::ready();
        Uart::new(&mut regs).write_bytes(b"\x00\n\x02");

        assert_eq!(regs.tx(), b"\x00\n\x02");
    }

    #[test]
    fn cstr_stops_at_terminator() {
        let mut regs = FakeRegisters::ready();
        Uart::new(&mut regs).write_cstr(c"hi\n");

        assert_eq!(regs.tx(), b"hi\r\n");
    }

    #[test]
    fn repeated_calls_accumulate_in_order() {
        let mut regs = FakeRegisters::busy_for(1);
        let mut uart = Uart::new(&mut regs);
        uart.write_string(b"ab");
        uart.write_byte(b'c');
        uart.write_string(b"\n");
        uart.write_string(b"ab");

        assert_eq!(regs.tx(), b"abc\r\nab");
        assert_eq!(regs.unguarded_writes, 0);
    }

    #[test]
    fn fmt_write_translates_newlines() {
        let mut regs = FakeRegisters::ready();
        let mut uart = Uart::new(&mut regs);
        writeln!(uart, "{}-{}", 4, "two").unwrap();

        assert_eq!(regs.tx(), b"4-two\r\n");
    }

    #[test]
    fn bounded_byte_succeeds_within_budget() {
        let mut regs = FakeRegisters::busy_for(3);
        assert_eq!(Uart::new(&mut regs).try_write_byte(b'z', 4), Ok(()));

        assert_eq!(regs.tx(), b"z");
        assert_eq!(regs.status_reads, 4);
    }

    #[test]
    fn bounded_byte_times_out_without_writing() {
        let mut regs = FakeRegisters::busy_for(3);
        assert_eq!(
            Uart::new(&mut regs).try_write_byte(b'z', 3),
            Err(TransmitTimeout { written: 0 })
        );

        assert_eq!(regs.tx(), b"");
        assert_eq!(regs.status_reads, 3);
    }

    #[test]
    fn zero_budget_reads_nothing() {
        let mut regs = FakeRegisters::ready();
        assert!(Uart::new(&mut regs).try_write_byte(b'z', 0).is_err());

        assert_eq!(regs.status_reads, 0);
    }

    #[test]
    fn stuck_transmitter_is_polled_until_budget_runs_out() {
        let mut regs = FakeRegisters::stuck();
        assert!(Uart::new(&mut regs).try_write_byte(b'z', 1000).is_err());

        assert_eq!(regs.status_reads, 1000);
        assert_eq!(regs.tx(), b"");
    }

    #[test]
    fn blocking_write_spins_until_ready_flips() {
        let mut regs = FakeRegisters::ready_after(10_000);
        let mut uart = Uart::new(&mut regs);
        uart.write_byte(b'!');
        uart.write_byte(b'?');

        // One call sat through every busy read; the next found the UART ready.
        assert_eq!(regs.status_reads, 10_002);
        assert_eq!(regs.tx(), b"!?");
        assert_eq!(regs.unguarded_writes, 0);
    }

    #[test]
    fn blocking_write_recovers_after_bounded_timeout() {
        let mut regs = FakeRegisters::stuck();
        let mut uart = Uart::new(&mut regs);
        assert!(uart.try_write_byte(b'!', 50).is_err());

        // The blocking write picks up as soon as the hardware reports ready.
        uart.regs.assert_ready_now();
        uart.write_byte(b'!');

        assert_eq!(regs.status_reads, 51);
        assert_eq!(regs.tx(), b"!");
        assert_eq!(regs.unguarded_writes, 0);
    }

    #[test]
    fn bounded_string_reports_progress() {
        let mut regs = FakeRegisters::ready();
        let mut uart = Uart::new(&mut regs);
        assert_eq!(uart.try_write_string(b"a\nb", 1), Ok(()));

        let mut regs = FakeRegisters::busy_for(2);
        let mut uart = Uart::new(&mut regs);
        assert_eq!(
            uart.try_write_string(b"a\nb", 2),
            Err(TransmitTimeout { written: 0 })
        );
        uart.regs.assert_ready_now();
        assert_eq!(
            uart.try_write_string(b"a\nb", 2),
            Err(TransmitTimeout { written: 1 })
        );
        assert_eq!(regs.tx(), b"a");
    }
}
