//! @test-mode: defmt
//!
//! defmt frames streamed over UART0 through the global logger.

#![no_std]
#![no_main]

use panic_semihosting as _;
use polled_uart::{InitError, TransmitTimeout};
use testsuite::uart::Lm3sUart;
use testsuite::{entry, exit_failure, exit_success};

#[entry]
fn main() -> ! {
    defmt::info!("dropped: the logger is not initialized yet");

    let Some(regs) = cortex_m::singleton!(: Lm3sUart = Lm3sUart::uart0()) else {
        exit_failure();
    };
    polled_uart::init_logger(regs).unwrap();

    defmt::info!("Hello from polled-uart!");
    defmt::warn!("value = {}", 42u32);
    defmt::debug!("{}", TransmitTimeout { written: 3 });

    let Some(again) = cortex_m::singleton!(: Lm3sUart = Lm3sUart::uart0()) else {
        exit_failure();
    };
    let res = polled_uart::init_logger(again);
    defmt::info!("second init: {}", res);
    if res != Err(InitError::AlreadyInitialized) {
        exit_failure();
    }

    exit_success();
}
