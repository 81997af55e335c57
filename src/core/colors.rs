//! Unified color system for file category visualization.
//!
//! Every category uses the same color wherever it is printed, whether in a
//! section heading, a file line or a count.
//!
//! # Color Scheme
//! - **Unmodified**: Green
//! - **Modified**: Yellow, for both reference and other-version files
//! - **Moved/renamed**: Blue
//! - **Missing**: Red
//! - **Different version**: Magenta
//! - **Not from any version**: Cyan

use crate::core::classifier::FileCategory;
use colored::*;

/// Returns a closure that applies the category's color to any text
pub fn get_category_color_style(category: FileCategory) -> Box<dyn Fn(&str) -> ColoredString> {
    match category {
        FileCategory::Unmodified => Box::new(|text: &str| text.green()),
        FileCategory::Modified => Box::new(|text: &str| text.yellow()),
        FileCategory::MovedOrRenamed => Box::new(|text: &str| text.blue()),
        FileCategory::Missing => Box::new(|text: &str| text.red()),
        FileCategory::Different => Box::new(|text: &str| text.magenta()),
        FileCategory::DifferentModified => Box::new(|text: &str| text.yellow()),
        FileCategory::DifferentMovedOrRenamed => Box::new(|text: &str| text.blue()),
        FileCategory::NotFromAny => Box::new(|text: &str| text.cyan()),
    }
}

/// Get colored file path using the category color
pub fn get_colored_path(category: FileCategory, path: &str) -> ColoredString {
    let color_fn = get_category_color_style(category);
    color_fn(path)
}

/// Colored `<description>: <count>` heading for a category
pub fn get_category_heading(category: FileCategory, count: usize) -> String {
    let color_fn = get_category_color_style(category);
    format!("{}: {}", color_fn(category.description()), count)
}
