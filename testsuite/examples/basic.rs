//! Byte, string and C-string writes with newline translation.

#![no_std]
#![no_main]

use panic_semihosting as _;
use testsuite::{entry, exit_success, uart};

#[entry]
fn main() -> ! {
    let mut uart = uart::console();

    uart.write_byte(b'>');
    uart.write_byte(b' ');
    uart.write_string(b"Hello from polled-uart!\n");
    uart.write_string(b"two\nlines\n");
    uart.write_string(b"");
    uart.write_cstr(c"from a C string\n");
    uart.write_bytes(b"raw, untranslated\n");
    uart.write_string(b"done\n");

    exit_success();
}
