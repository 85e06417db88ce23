//! Semihosting mirror of the logger output for QEMU testing.
//!
//! With the `qemu-test` feature, every byte sent to the UART is also written
//! to semihosting stdout, so the test harness can compare both streams.

use core::cell::RefCell;

use cortex_m_semihosting::hio::{self, HostStream};
use critical_section::{CriticalSection, Mutex};

static STDOUT: Mutex<RefCell<Option<HostStream>>> = Mutex::new(RefCell::new(None));

/// Writes bytes to semihosting stdout.
///
/// # Safety
///
/// Must be called from within a critical section.
pub(crate) unsafe fn write(bytes: &[u8]) {
    // SAFETY: Caller guarantees we're in a critical section.
    let cs = unsafe { CriticalSection::new() };
    let mut stdout = STDOUT.borrow_ref_mut(cs);

    // Opened once; reopening would truncate what was already written.
    if stdout.is_none() {
        *stdout = hio::hstdout().ok();
    }

    if let Some(stdout) = stdout.as_mut() {
        let _ = stdout.write_all(bytes);
    }
}
