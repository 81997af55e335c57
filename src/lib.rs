//! Policy Analyzer - compare a policy set on disk against released versions.
//!
//! Given a directory of policy files and release information (the files and
//! checksums of every released version), the analyzer detects which version the
//! policy set is based on and reports how each file relates to it.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Version parsing and ordering
//! - Release information indices, loading and generation
//! - Reference version detection and file classification
//! - Error handling and result types
//! - Text and JSON reports

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Analysis
    classify,
    detect_reference_version,
    // Versions
    compare_versions,
    highest_version,
    most_relevant_version,
    sort_versions,
    // Error handling
    AnalyzerError,
    AnalyzedFileSet,
    // Release information
    Corpus,
    CorpusBuilder,
    FileCategory,
    IgnoredComponents,
    PathNormalizer,
    Result,
    TreeIndex,
    Version,
    VersionsData,
};
