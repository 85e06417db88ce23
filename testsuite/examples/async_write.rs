//! Async writes, interleaved with another task by a cooperative executor.

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_semihosting as _;
use testsuite::{block_on, entry, exit_success, join, uart, yield_once};

/// Task that keeps yielding, standing in for other work.
async fn ticker() -> u32 {
    let mut ticks = 0;
    for _ in 0..3 {
        yield_once().await;
        ticks += 1;
    }
    ticks
}

#[entry]
fn main() -> ! {
    let mut uart = uart::console();

    block_on(uart.write_string_async(b"async: hello\n"));

    let writer = async {
        uart.write_string_async(b"async: first\n").await;
        yield_once().await;
        uart.write_string_async(b"async: second\n").await;
    };
    let (((), ticks), _) = block_on(join(writer, ticker()));

    writeln!(uart, "async: ticker ran {ticks} times").ok();

    exit_success();
}
