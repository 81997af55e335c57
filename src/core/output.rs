//! Unified output formatting utilities for consistent CLI presentation.
//!
//! Status messages go through these helpers so every command uses the same
//! prefixes and colors. Reports themselves are rendered by [`crate::core::report`].
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, yellow for warnings, green for success
//! - **Errors and warnings on stderr**: stdout stays parseable for `--json`

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a warning on stderr
///
/// # Format
/// ```text
/// ! Warning: <message>
/// ```
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "! Warning:".yellow(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
///
/// ```
///
/// # Colors
/// - Checkmark in green, message in white
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}
