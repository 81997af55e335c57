//! Core functionality for the policy-analyzer tool.
//!
//! This module provides the building blocks of an analysis: version ordering,
//! tree scanning, release information indices, reference version detection,
//! file classification and report rendering.

pub mod classifier;
pub mod colors;
pub mod config;
pub mod corpus;
pub mod detector;
pub mod dirs;
pub mod error;
pub mod markers;
pub mod output;
pub mod paths;
pub mod relevance;
pub mod report;
pub mod scanner;
pub mod vcf;
pub mod version;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{AnalyzerError, Result};

// === Versions ===
// Parsing and ordering of release version identifiers
pub use version::{
    compare_versions, highest_version, is_at_least, is_lower, lowest_version, sort_versions,
    Version,
};

// === Trees and release information ===
// Scanning a directory into checksums and the three release indices
pub use paths::PathNormalizer;
pub use scanner::{IgnoredComponents, DEFAULT_IGNORED_PATH_COMPONENTS};
pub use vcf::{Corpus, CorpusBuilder, TreeIndex};

// === Release information sources ===
// Cache, download and directory loading of the release documents
pub use corpus::{load_corpus, load_corpus_from_dir, write_corpus, Fetch, HttpFetcher, ReleaseCache};

// === Analysis ===
// Reference version detection and per-file classification
pub use classifier::{classify, AnalyzedFileSet, FileCategory};
pub use detector::{detect_reference_version, VersionsData};
pub use relevance::most_relevant_version;

// === Configuration ===
pub use config::{AnalyzeContext, AnalyzerConfig};

// === Output formatting ===
// Report rendering and status messages
pub use output::{print_error, print_success, print_warning};
pub use report::{render_json, render_text};
