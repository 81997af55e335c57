//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`AnalyzerError`] which covers every failure mode of the
//! analysis pipeline. It uses `thiserror` for ergonomic error definitions and
//! includes constructor helpers for the structured variants.
//!
//! # Public API
//! - [`AnalyzerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, AnalyzerError>`
//!
//! # Error Categories
//! - **User input**: Path is not a policy set, unknown or malformed versions
//! - **Release information**: Unavailable, malformed or corrupted corpus data
//! - **File operations**: Tree walking, I/O and UTF-8 issues

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for policy-analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    // User input errors
    #[error("{path} is not a valid policy set. Did you mean one of these?\n{}", format_candidates(.candidates))]
    NotAPolicySetWithCandidates {
        path: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error("{path} is not a valid policy set")]
    NotAPolicySet { path: PathBuf },

    #[error("Path does not exist or is not a directory: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Invalid UTF-8 path: {path}")]
    InvalidUtf8Path { path: PathBuf },

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Reference version {version} not found in release information")]
    UnknownReferenceVersion { version: String },

    // Release information errors
    #[error("Release information unavailable: {reason}")]
    CorpusUnavailable { reason: String },

    #[error("Malformed release information in '{document}': {reason}")]
    CorpusMalformed { document: String, reason: String },

    #[error("Checksum mismatch for '{file}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("Failed to download '{url}': {reason}")]
    Download { url: String, reason: String },

    // File operation errors
    #[error("Failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using AnalyzerError
pub type Result<T> = std::result::Result<T, AnalyzerError>;

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|c| format!("  {}", c.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl AnalyzerError {
    /// Create a not-a-policy-set error, listing candidate roots when any were found
    pub fn not_a_policy_set(path: impl Into<PathBuf>, candidates: Vec<PathBuf>) -> Self {
        let path = path.into();
        if candidates.is_empty() {
            Self::NotAPolicySet { path }
        } else {
            Self::NotAPolicySetWithCandidates { path, candidates }
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create an invalid UTF-8 path error
    pub fn invalid_utf8_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidUtf8Path { path: path.into() }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown reference version error
    pub fn unknown_reference_version(version: impl Into<String>) -> Self {
        Self::UnknownReferenceVersion {
            version: version.into(),
        }
    }

    /// Create a corpus unavailable error
    pub fn corpus_unavailable(reason: impl Into<String>) -> Self {
        Self::CorpusUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a corpus malformed error
    pub fn corpus_malformed(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorpusMalformed {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Create a checksum mismatch error
    pub fn checksum_mismatch(
        file: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ChecksumMismatch {
            file: file.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a tree walk error
    pub fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}
