//! `SharedUart` keeps an exception handler from writing in the middle of a
//! string: the PendSV raised inside `with` only runs once the closure is done.

#![no_std]
#![no_main]

use cortex_m::peripheral::SCB;
use cortex_m_rt::exception;
use panic_semihosting as _;
use polled_uart::SharedUart;
use testsuite::uart::Lm3sUart;
use testsuite::{entry, exit_success};

static CONSOLE: SharedUart<Lm3sUart> = SharedUart::new(polled_uart::Uart::new(Lm3sUart::uart0()));

#[entry]
fn main() -> ! {
    CONSOLE.write_string(b"main: before\n");

    CONSOLE.with(|uart| {
        uart.write_string(b"main: locked, ");
        SCB::set_pendsv();
        uart.write_string(b"still locked\n");
    });

    CONSOLE.write_string(b"main: after\n");

    exit_success();
}

#[exception]
fn PendSV() {
    CONSOLE.write_string(b"pendsv: ran after unlock\n");
}
