//! Comparison of an example's output against its expected file.

use std::fs;

use anyhow::{Context, Result};

use crate::build::project_root;
use crate::runner::RunOptions;

/// Compare `actual` with `testsuite/expected/<example>.expected`.
///
/// With `verbose` the output is only printed, with `bless` the expected file
/// is rewritten.
pub fn check_output(example: &str, actual: &str, opts: &RunOptions) -> Result<bool> {
    if opts.verbose {
        print!("{actual}");
        println!("--- QEMU run end ---");
        return Ok(true);
    }

    let expected_path = project_root()
        .join("testsuite")
        .join("expected")
        .join(format!("{example}.expected"));
    let filename = format!("{example}.expected");

    if opts.bless {
        let status = match fs::read_to_string(&expected_path) {
            Ok(existing) if existing == actual => "No change",
            Ok(_) => {
                fs::write(&expected_path, actual)?;
                "Updated"
            }
            Err(_) => {
                if let Some(dir) = expected_path.parent() {
                    fs::create_dir_all(dir)?;
                }
                fs::write(&expected_path, actual)?;
                "Created"
            }
        };
        println!("  {filename}: {status}");
        Ok(true)
    } else if expected_path.exists() {
        let expected = fs::read_to_string(&expected_path)
            .with_context(|| format!("Failed to read {}", expected_path.display()))?;
        if actual == expected {
            println!("  PASS");
            Ok(true)
        } else {
            println!("  FAIL: output differs from expected");
            println!("--- expected ---");
            print!("{expected}");
            println!("--- actual ---");
            print!("{actual}");
            Ok(false)
        }
    } else {
        println!("  No expected output file, run with --bless to create");
        println!("--- output ---");
        print!("{actual}");
        Ok(false)
    }
}
