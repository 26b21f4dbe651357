//! User interface module - terminal formatting of statuses and results.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_images, display_release_report,
    display_status, display_success, print_lines,
};
