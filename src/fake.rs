//! Software register block for host tests.

use crate::registers::{Registers, STATUS_TX_READY};

const CAPACITY: usize = 256;

/// Reports busy for a configurable number of Status reads before each byte,
/// records every transmitted byte and counts writes made without a preceding
/// ready observation.
pub(crate) struct FakeRegisters {
    /// Busy reads still to serve before the next ready.
    busy_left: u32,
    /// Busy reads served again after every transmit.
    busy_per_byte: u32,
    /// Whether the most recent Status read reported ready.
    last_ready: bool,
    pub status_reads: u32,
    pub unguarded_writes: u32,
    tx: [u8; CAPACITY],
    tx_len: usize,
}

impl FakeRegisters {
    /// Always ready.
    pub const fn ready() -> Self {
        Self::busy_for(0)
    }

    /// Busy for `polls` reads before every byte.
    pub const fn busy_for(polls: u32) -> Self {
        Self {
            busy_left: polls,
            busy_per_byte: polls,
            last_ready: false,
            status_reads: 0,
            unguarded_writes: 0,
            tx: [0; CAPACITY],
            tx_len: 0,
        }
    }

    /// Busy for the first `reads` Status reads, ready from then on.
    pub const fn ready_after(reads: u32) -> Self {
        let mut regs = Self::busy_for(0);
        regs.busy_left = reads;
        regs
    }

    /// Never ready.
    pub const fn stuck() -> Self {
        Self::busy_for(u32::MAX)
    }

    /// Makes the next Status read report ready, independent of the busy budget.
    pub fn assert_ready_now(&mut self) {
        self.busy_left = 0;
    }

    pub fn tx(&self) -> &[u8] {
        &self.tx[..self.tx_len]
    }
}

impl Registers for FakeRegisters {
    fn read_status(&mut self) -> u32 {
        self.status_reads += 1;
        if self.busy_left > 0 {
            self.busy_left -= 1;
            self.last_ready = false;
            // Unrelated bits must not be mistaken for readiness.
            0xFFFF_FFFE
        } else {
            self.last_ready = true;
            0x0000_0F00 | STATUS_TX_READY
        }
    }

    fn write_tx(&mut self, byte: u8) {
        if !self.last_ready {
            self.unguarded_writes += 1;
        }
        self.tx[self.tx_len] = byte;
        self.tx_len += 1;
        self.last_ready = false;
        self.busy_left = self.busy_per_byte;
    }
}
