//! Test runner dispatch and common types.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::build::{build_example, example_source};
use crate::defmt;
use crate::qemu::run_qemu;
use crate::render::render_serial;
use crate::standard::check_output;

/// How the UART0 capture of an example is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// Plain text written by the driver, compared byte for byte.
    Text,
    /// defmt frames from the global logger, decoded before comparison.
    Defmt,
}

/// Options for running an example.
pub struct RunOptions {
    /// Print the output instead of comparing it (for `qemu` command).
    pub verbose: bool,
    /// Update expected files instead of comparing (for `test --bless`).
    pub bless: bool,
    /// Build in release mode.
    pub release: bool,
}

/// Detect test mode from file header.
///
/// Looks for `//! @test-mode: <mode>` in the first few lines.
fn detect_test_mode(example_path: &Path) -> TestMode {
    if let Ok(content) = fs::read_to_string(example_path) {
        for line in content.lines().take(10) {
            if let Some(mode) = line.strip_prefix("//! @test-mode:") {
                if mode.trim() == "defmt" {
                    return TestMode::Defmt;
                }
            }
        }
    }
    TestMode::Text
}

/// Run an example with the given options.
///
/// Returns `Ok(true)` if the test passed, `Ok(false)` if it failed.
pub fn run_example(example: &str, opts: &RunOptions) -> Result<bool> {
    let test_mode = detect_test_mode(&example_source(example));

    println!("Building '{example}'...");
    let elf_path = build_example(example, opts.release)?;

    println!("Running in QEMU...");
    let output = run_qemu(&elf_path)?;

    let uart0 = match test_mode {
        TestMode::Text => render_serial(&output.uart0),
        TestMode::Defmt => {
            let uart0 = defmt::decode_output(&elf_path, &output.uart0)?;
            let semihosting = defmt::decode_output(&elf_path, &output.semihosting)?;
            if uart0 != semihosting {
                println!("  FAIL: UART and semihosting output differ");
                println!("--- semihosting ---");
                print!("{semihosting}");
                println!("--- uart ---");
                print!("{uart0}");
                return Ok(false);
            }
            uart0
        }
    };

    check_output(example, &uart0, opts)
}
