#![no_std]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "global-logger")]
use core::sync::atomic::{AtomicBool, Ordering};

pub use registers::{
    DEFAULT_BASE, Mmio, RX_OFFSET, Registers, STATUS_OFFSET, STATUS_TX_READY, TX_OFFSET,
    UartConfig,
};
pub use shared::SharedUart;
pub use uart::{TransmitTimeout, Uart};

#[cfg(test)]
mod fake;
#[cfg(feature = "global-logger")]
pub(crate) mod logger;
pub mod newline;
#[cfg(feature = "async-await")]
mod nonblocking;
mod registers;
mod shared;
mod uart;

/// Error returned by [`init_logger`] when initialization fails.
#[cfg(feature = "global-logger")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum InitError {
    /// [`init_logger`] has already been called.
    AlreadyInitialized,
}

/// Route defmt output to the UART behind `regs`.
///
/// Frames are sent raw, without newline translation, in the encoding selected
/// on the `defmt` crate. Frames logged before this call are discarded.
///
/// Each frame is written inside a critical section and blocks until the last
/// byte is accepted by the transmitter, so keep log statements out of
/// latency-sensitive interrupt handlers.
///
/// # Errors
///
/// Returns [`InitError::AlreadyInitialized`] if called more than once. The
/// first registered UART stays in place.
///
/// # Example
///
/// ```no_run
/// use polled_uart::{Mmio, UartConfig};
///
/// static mut REGS: Option<Mmio> = None;
///
/// // SAFETY: The reference platform maps the UART at the default base, and
/// // nothing else drives it.
/// let regs = unsafe { (*&raw mut REGS).insert(Mmio::new(UartConfig::default())) };
/// polled_uart::init_logger(regs).unwrap();
/// ```
#[cfg(feature = "global-logger")]
pub fn init_logger(regs: &'static mut dyn Registers) -> Result<(), InitError> {
    static INITIALIZED: AtomicBool = AtomicBool::new(false);

    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(InitError::AlreadyInitialized);
    }

    // SAFETY: The atomic swap above guarantees this runs exactly once.
    unsafe { logger::LOGGER_STATE.initialize(Uart::new(regs)) };

    Ok(())
}
