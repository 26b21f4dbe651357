//! Pure formatting functions for UI output.
//!
//! Status lines go to stderr so stdout carries only results (tags, versions)
//! that scripts may capture.

use crate::boundary::BoundaryWarning;
use crate::releases::ReleaseReport;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Announce each image about to be acted on (e.g. "tag", "push")
pub fn display_images(images: &[String], action: &str) {
    for image in images {
        display_status(&format!("Going to {} image \"{}\"", action, image));
    }
}

/// Summarize a `for-each-release` run.
///
/// # Arguments
/// * `report` - Outcome of the run
/// * `dry_run` - Whether commands were only rendered
pub fn display_release_report(report: &ReleaseReport, dry_run: bool) {
    for warning in &report.unmatched {
        display_boundary_warning(warning);
    }
    for release_tag in &report.skipped {
        display_status(&format!("Skipped {} (already published)", release_tag));
    }
    for planned in &report.built {
        if dry_run {
            display_status(&format!("Would run: {}", planned.command));
        } else {
            display_success(&format!("Built {} as {}", planned.git_tag, planned.release_tag));
        }
    }
    for planned in &report.failed {
        display_error(&format!("Command failed for {}: {}", planned.git_tag, planned.command));
    }
}

/// Print result lines to stdout, one per line
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_boundary_warning() {
        display_boundary_warning(&BoundaryWarning::NoVersionFound {
            tag: "latest".to_string(),
        });
    }

    #[test]
    fn test_display_release_report_empty() {
        display_release_report(&ReleaseReport::default(), true);
    }
}
