//! Shared output formatting for check results.

use anyhow::Result;
use modfence_core::CheckResult;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &CheckResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &CheckResult) {
    if result.violations.is_empty() {
        println!(
            "\x1b[32mNo violations found ({} packages checked)\x1b[0m",
            result.packages_checked
        );
        return;
    }

    println!("Found {} violation(s):", result.violations.len());
    println!();

    for violation in &result.violations {
        println!("  {}", violation.package);
        println!("    imports {}", violation.import);
        println!("    denied by group \"{}\"", violation.group);
        println!();
    }

    println!(
        "\x1b[31mFound {} violation(s) ({} packages checked)\x1b[0m",
        result.violations.len(),
        result.packages_checked
    );
}

fn print_json(result: &CheckResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &CheckResult) {
    for violation in &result.violations {
        println!(
            "{}: imports {} [denied by {}]",
            violation.package, violation.import, violation.group
        );
    }
}
