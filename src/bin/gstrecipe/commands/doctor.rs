//! `gstrecipe doctor` command

use anyhow::Result;

use gstrecipe::ops::{doctor, format_report};

pub fn execute(verbose: bool) -> Result<()> {
    let report = doctor();

    // Print the formatted report
    print!("{}", format_report(&report, verbose));

    // Exit with error code if any tool is missing
    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
