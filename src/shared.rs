//! A UART that several contexts may write to.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::registers::Registers;
use crate::uart::Uart;

/// A [`Uart`] behind a critical-section mutex.
///
/// Each call runs inside a critical section, so bytes from an interrupt
/// handler never land between the status read and transmit write of the
/// interrupted context, and whole strings are never interleaved.
///
/// Interrupts stay masked for the full length of a write, including the time
/// spent waiting for the transmitter.
pub struct SharedUart<R> {
    inner: Mutex<RefCell<Uart<R>>>,
}

impl<R: Registers> SharedUart<R> {
    /// Wraps `uart`. Usable in a `static` initializer.
    pub const fn new(uart: Uart<R>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(uart)),
        }
    }

    /// Runs `f` with exclusive access to the UART.
    ///
    /// # Panics
    ///
    /// Panics when called from inside another `with` on the same UART (for
    /// example from a panic handler that interrupted a write). Use
    /// [`SharedUart::try_with`] in such contexts.
    pub fn with<T>(&self, f: impl FnOnce(&mut Uart<R>) -> T) -> T {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Runs `f` with exclusive access to the UART, or returns `None` when the
    /// UART is already in use further up the stack.
    pub fn try_with<T>(&self, f: impl FnOnce(&mut Uart<R>) -> T) -> Option<T> {
        critical_section::with(|cs| {
            let mut uart = self.inner.borrow(cs).try_borrow_mut().ok()?;
            Some(f(&mut uart))
        })
    }

    /// Transmits one byte. See [`Uart::write_byte`].
    pub fn write_byte(&self, byte: u8) {
        self.with(|uart| uart.write_byte(byte));
    }

    /// Transmits text with `\r\n` line endings. See [`Uart::write_string`].
    pub fn write_string(&self, s: &[u8]) {
        self.with(|uart| uart.write_string(s));
    }

    /// Gives the UART back.
    pub fn into_inner(self) -> Uart<R> {
        self.inner.into_inner().into_inner()
    }
}
