//! `core::fmt::Write` goes through the newline translation.

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_semihosting as _;
use testsuite::{entry, exit_success, uart};

#[entry]
fn main() -> ! {
    let mut uart = uart::console();

    for i in 1..=3 {
        writeln!(uart, "line {i} of {}", 3).ok();
    }
    writeln!(uart, "hex {:#06x}", 0xbeef).ok();
    writeln!(uart, "{:?}", polled_uart::UartConfig::default()).ok();

    exit_success();
}
