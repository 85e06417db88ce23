//! defmt global logger that streams frames out of a UART.

use core::{
    cell::UnsafeCell,
    mem::MaybeUninit,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering, compiler_fence},
};
use critical_section::RestoreState;
use defmt::Encoder;

use crate::registers::Registers;
use crate::uart::Uart;

#[cfg(feature = "qemu-test")]
mod semihosting;

/// The UART frames are written to.
type Sink = Uart<&'static mut dyn Registers>;

#[defmt::global_logger]
struct Logger;

pub(crate) struct LoggerState {
    sink: UnsafeCell<MaybeUninit<Sink>>,
    cs_state: UnsafeCell<RestoreState>,
    encoder: UnsafeCell<Encoder>,
    initialized: AtomicBool,
    /// Reentrancy depth counter. 0 = not logging, 1 = logging (owner), 2+ = reentrant.
    /// Reentrant frames (from NMI, HardFault, or panic during logging) are dropped.
    depth: AtomicUsize,
}

impl LoggerState {
    /// # Safety
    ///
    /// Must only be called once per program execution.
    pub(crate) unsafe fn initialize(&self, sink: Sink) {
        // SAFETY: The caller guarantees a single call, so nothing else touches `sink`
        // until `initialized` is published below.
        unsafe { self.sink.get().write(MaybeUninit::new(sink)) };
        // Release: the sink must be visible before `initialized` reads true.
        self.initialized.store(true, Ordering::Release);
    }

    /// Frames logged before initialization are discarded, from the semihosting
    /// mirror as well.
    ///
    /// # Safety
    ///
    /// Must be called from within a critical section to prevent aliasing of `sink`.
    #[inline]
    unsafe fn write(&self, bytes: &[u8]) {
        // Acquire: pairs with the Release store in `initialize`.
        if self.initialized.load(Ordering::Acquire) {
            // SAFETY: `sink` is initialized, and the critical section upheld by the
            // caller makes this the only live reference.
            unsafe { &mut *self.sink.get().cast::<Sink>() }.write_bytes(bytes);
            #[cfg(feature = "qemu-test")]
            // SAFETY: Caller guarantees we're in a critical section.
            unsafe {
                semihosting::write(bytes)
            };
        }
    }
}

// SAFETY: `sink` is written once before `initialized` is published and afterwards
// only accessed inside critical sections, as are `cs_state` and `encoder`.
unsafe impl Sync for LoggerState {}

pub(crate) static LOGGER_STATE: LoggerState = LoggerState {
    sink: UnsafeCell::new(MaybeUninit::uninit()),
    cs_state: UnsafeCell::new(RestoreState::invalid()),
    encoder: UnsafeCell::new(Encoder::new()),
    initialized: AtomicBool::new(false),
    depth: AtomicUsize::new(0),
};

/// Writes encoded bytes to the registered UART.
///
/// # Safety
///
/// Must be called from within a critical section.
#[inline(always)]
unsafe fn write_all(data: &[u8]) {
    // SAFETY: Caller guarantees we're in a critical section.
    unsafe { LOGGER_STATE.write(data) };
}

// SAFETY: This impl upholds the `defmt::Logger` safety contract:
// - `acquire` enters a critical section before touching any state.
// - `release` leaves it once the frame is complete.
// - Reentrant calls are detected through `depth` and dropped.
unsafe impl defmt::Logger for Logger {
    fn acquire() {
        let was_depth = LOGGER_STATE.depth.fetch_add(1, Ordering::Acquire);
        if was_depth > 0 {
            return;
        }

        // SAFETY: defmt guarantees a matching `release`, which restores this state.
        let restore = unsafe { critical_section::acquire() };

        compiler_fence(Ordering::SeqCst);

        // SAFETY: We're in a critical section, so access to `cs_state` is exclusive.
        unsafe { LOGGER_STATE.cs_state.get().write(restore) };

        compiler_fence(Ordering::SeqCst);

        // SAFETY: We're in a critical section, so access to `encoder` is exclusive.
        unsafe { &mut *LOGGER_STATE.encoder.get() }.start_frame(|b| unsafe { write_all(b) });
    }

    unsafe fn flush() {
        // Every byte is on the wire once `write_byte` returns.
    }

    unsafe fn release() {
        let was_depth = LOGGER_STATE.depth.fetch_sub(1, Ordering::Release);
        if was_depth != 1 {
            return;
        }

        // SAFETY: Still inside the critical section entered by `acquire`.
        unsafe { &mut *LOGGER_STATE.encoder.get() }.end_frame(|b| unsafe { write_all(b) });

        compiler_fence(Ordering::SeqCst);

        // SAFETY: Restores the state saved by `acquire`; `cs_state` is exclusive
        // until the critical section ends.
        unsafe { critical_section::release(LOGGER_STATE.cs_state.get().read()) };

        compiler_fence(Ordering::SeqCst);
    }

    unsafe fn write(bytes: &[u8]) {
        if LOGGER_STATE.depth.load(Ordering::Relaxed) != 1 {
            return;
        }

        // SAFETY: defmt only calls this between `acquire` and `release`, so we're in
        // the critical section and `encoder` is exclusive.
        unsafe { &mut *LOGGER_STATE.encoder.get() }.write(bytes, |b| unsafe { write_all(b) });
    }
}
