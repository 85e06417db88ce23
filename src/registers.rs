//! Register map of the UART and the capability used to reach it.
//!
//! The peripheral exposes three 32-bit registers relative to its base address:
//!
//! | Offset | Name          | Access | Meaning                                   |
//! |--------|---------------|--------|-------------------------------------------|
//! | `0x00` | Transmit-Data | write  | byte to transmit (low 8 bits significant) |
//! | `0x04` | Receive-Data  | read   | received byte (not used by this driver)   |
//! | `0x08` | Status        | read   | bit 0 set while the transmitter is ready  |

use core::ptr::{with_exposed_provenance, with_exposed_provenance_mut};

/// Transmit-Data register offset.
pub const TX_OFFSET: usize = 0x00;
/// Receive-Data register offset.
pub const RX_OFFSET: usize = 0x04;
/// Status register offset.
pub const STATUS_OFFSET: usize = 0x08;

/// Status bit set while the transmitter can accept a new byte.
pub const STATUS_TX_READY: u32 = 0x01;

/// Base address of the UART on the reference platform.
pub const DEFAULT_BASE: usize = 0x8000_0000;

/// Access to the Status and Transmit-Data registers.
///
/// Implementations must perform every call as a real access: no caching of
/// status reads and no merging or dropping of transmit writes.
pub trait Registers {
    /// Reads the Status register.
    fn read_status(&mut self) -> u32;

    /// Writes `byte` to the Transmit-Data register.
    fn write_tx(&mut self, byte: u8);

    /// Reads the Status register once and tests the ready bit.
    #[inline]
    fn tx_ready(&mut self) -> bool {
        self.read_status() & STATUS_TX_READY != 0
    }
}

impl<R: Registers + ?Sized> Registers for &mut R {
    #[inline]
    fn read_status(&mut self) -> u32 {
        (**self).read_status()
    }

    #[inline]
    fn write_tx(&mut self, byte: u8) {
        (**self).write_tx(byte)
    }
}

/// Where a UART instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct UartConfig {
    /// Address of the Transmit-Data register; the other registers follow it.
    pub base: usize,
}

impl UartConfig {
    /// Configuration for a UART at `base`.
    pub const fn new(base: usize) -> Self {
        Self { base }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}

/// Volatile memory-mapped access to a UART register block.
#[derive(Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Binds to the register block described by `config`.
    ///
    /// # Safety
    ///
    /// - `config.base` must be the address of a UART register block matching the
    ///   map in this module, mapped and 4-byte aligned.
    /// - No other `Mmio` (or anything else) may write the Transmit-Data register of
    ///   the same block while this value is alive.
    pub const unsafe fn new(config: UartConfig) -> Self {
        Self { base: config.base }
    }
}

impl Registers for Mmio {
    #[inline]
    fn read_status(&mut self) -> u32 {
        let status = with_exposed_provenance::<u32>(self.base + STATUS_OFFSET);
        // SAFETY: `Mmio::new` requires `base` to address a mapped, aligned register block.
        unsafe { status.read_volatile() }
    }

    #[inline]
    fn write_tx(&mut self, byte: u8) {
        let tx = with_exposed_provenance_mut::<u32>(self.base + TX_OFFSET);
        // SAFETY: `Mmio::new` requires `base` to address a mapped, aligned register block,
        // and grants this value exclusive use of the transmit register.
        unsafe { tx.write_volatile(u32::from(byte)) }
    }
}
