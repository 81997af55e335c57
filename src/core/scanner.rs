//! Recursive file tree scanning with content checksums.
//!
//! # Public API
//! - [`IgnoredComponents`]: Path-segment filter applied while walking
//! - [`scan_tree`]: Walk a tree and checksum every non-ignored file
//! - [`file_checksum`], [`bytes_checksum`]: SHA-256 helpers
//!
//! Paths are reported relative to the scanned root with `/` separators, in
//! lexicographic order regardless of the filesystem's enumeration order.

use crate::core::error::{AnalyzerError, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use walkdir::WalkDir;

/// Components every scan skips: VCS and CI metadata plus generated runtime artifacts.
pub const DEFAULT_IGNORED_PATH_COMPONENTS: [&str; 6] = [
    ".git/",
    ".gitignore",
    ".gitattributes",
    ".github/",
    "cf_promises_release_id",
    "cf_promises_validated",
];

/// Exact-segment path filter. A pattern with a trailing `/` only matches
/// directory segments; other patterns match any segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredComponents {
    patterns: Vec<String>,
}

impl Default for IgnoredComponents {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_PATH_COMPONENTS)
    }
}

impl IgnoredComponents {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Default components plus `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ignored = Self::default();
        for pattern in extra {
            let pattern = pattern.into();
            if !pattern.is_empty() && !ignored.patterns.contains(&pattern) {
                ignored.patterns.push(pattern);
            }
        }
        ignored
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a `/`-separated relative file path contains an ignored segment.
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        let segments: Vec<&str> = relative_path.split('/').collect();
        let last = segments.len().saturating_sub(1);
        segments.iter().enumerate().any(|(i, segment)| {
            self.patterns.iter().any(|pattern| match pattern.strip_suffix('/') {
                Some(dir) => i < last && *segment == dir,
                None => *segment == pattern,
            })
        })
    }
}

pub fn bytes_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub fn file_checksum(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| AnalyzerError::file_read(path, e))?;
    Ok(bytes_checksum(&bytes))
}

/// Walk `root` and return `(relative_path, checksum)` for every file that is
/// not ignored. Any unreadable entry aborts the scan.
pub fn scan_tree(root: &Path, ignored: &IgnoredComponents) -> Result<Vec<(String, String)>> {
    if !root.is_dir() {
        return Err(AnalyzerError::path_not_found(root));
    }

    log::debug!("Scanning {}", root.display());
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| AnalyzerError::walk(root, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        // Links are not followed, so a linked directory is skipped like a directory
        if entry.path_is_symlink() && entry.path().is_dir() {
            log::debug!("Skipping directory link {}", entry.path().display());
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = relative
            .to_str()
            .ok_or_else(|| AnalyzerError::invalid_utf8_path(entry.path()))?
            .replace('\\', "/");

        if ignored.is_ignored(&relative) {
            log::debug!("Ignoring {relative}");
            continue;
        }

        let checksum = file_checksum(entry.path())?;
        entries.push((relative, checksum));
    }

    entries.sort();
    log::debug!("Scanned {} files under {}", entries.len(), root.display());
    Ok(entries)
}
