//! Bounded writes: a healthy UART within budget, a stuck one reporting
//! `TransmitTimeout`.

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_semihosting as _;
use polled_uart::{Registers, TransmitTimeout, Uart};
use testsuite::{entry, exit_failure, exit_success, uart};

/// A transmitter that never becomes ready.
struct Stuck {
    polls: u32,
}

impl Registers for Stuck {
    fn read_status(&mut self) -> u32 {
        self.polls += 1;
        0
    }

    fn write_tx(&mut self, _byte: u8) {
        exit_failure();
    }
}

#[entry]
fn main() -> ! {
    let mut console = uart::console();

    let res = console.try_write_string(b"bounded: ok\n", 1_000);
    writeln!(console, "healthy: {res:?}").ok();

    let mut stuck = Stuck { polls: 0 };
    let res = Uart::new(&mut stuck).try_write_string(b"x\n", 25);
    writeln!(console, "stuck: {res:?} after {} polls", stuck.polls).ok();

    if res != Err(TransmitTimeout { written: 0 }) {
        exit_failure();
    }

    exit_success();
}
