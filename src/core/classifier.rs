//! Classification of every analyzed file relative to a reference version.
//!
//! Each `(path, checksum)` pair of the analyzed tree lands in exactly one
//! category; a second pass reports the reference version's files that are
//! absent from the tree and not explained by a move.
//!
//! # Public API
//! - [`FileCategory`]: The eight outcome categories
//! - [`AnalyzedFileSet`]: Classification result
//! - [`classify`]: Run both passes

use crate::core::paths::PathNormalizer;
use crate::core::vcf::{Corpus, TreeIndex};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Unmodified,
    Missing,
    Modified,
    MovedOrRenamed,
    Different,
    DifferentModified,
    DifferentMovedOrRenamed,
    NotFromAny,
}

impl FileCategory {
    pub const ALL: [FileCategory; 8] = [
        FileCategory::Unmodified,
        FileCategory::Missing,
        FileCategory::Modified,
        FileCategory::MovedOrRenamed,
        FileCategory::Different,
        FileCategory::DifferentModified,
        FileCategory::DifferentMovedOrRenamed,
        FileCategory::NotFromAny,
    ];

    /// Key used in the JSON report.
    pub fn json_key(self) -> &'static str {
        match self {
            FileCategory::Unmodified => "unmodified",
            FileCategory::Missing => "missing",
            FileCategory::Modified => "modified",
            FileCategory::MovedOrRenamed => "moved_or_renamed",
            FileCategory::Different => "different_version",
            FileCategory::DifferentModified => "different_version_modified",
            FileCategory::DifferentMovedOrRenamed => "different_version_moved_or_renamed",
            FileCategory::NotFromAny => "not_from_any_version",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FileCategory::Unmodified => "Unmodified",
            FileCategory::Missing => "Missing",
            FileCategory::Modified => "Modified",
            FileCategory::MovedOrRenamed => "Moved or renamed",
            FileCategory::Different => "From a different version",
            FileCategory::DifferentModified => "Modified from a different version",
            FileCategory::DifferentMovedOrRenamed => "Moved or renamed from a different version",
            FileCategory::NotFromAny => "Not from any version",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.json_key())
    }
}

/// Result of classifying one tree. Built once by [`classify`]; only sorting
/// and denormalization happen afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedFileSet {
    pub reference_version: Option<String>,
    pub unmodified: Vec<String>,
    pub missing: Vec<String>,
    pub modified: Vec<String>,
    /// (path, origin paths)
    pub moved_or_renamed: Vec<(String, Vec<String>)>,
    /// (path, versions containing this exact path and content)
    pub different: Vec<(String, Vec<String>)>,
    /// (path, versions containing this path)
    pub different_modified: Vec<(String, Vec<String>)>,
    /// (path, origin path -> versions)
    pub different_moved_or_renamed: Vec<(String, BTreeMap<String, Vec<String>>)>,
    pub not_from_any: Vec<String>,
}

impl AnalyzedFileSet {
    fn new(reference_version: Option<&str>) -> Self {
        Self {
            reference_version: reference_version.map(str::to_string),
            ..Self::default()
        }
    }

    fn sort(&mut self) {
        self.unmodified.sort();
        self.missing.sort();
        self.modified.sort();
        self.moved_or_renamed.sort();
        self.different.sort();
        self.different_modified.sort();
        self.different_moved_or_renamed
            .sort_by(|(a, _), (b, _)| a.cmp(b));
        self.not_from_any.sort();
    }

    /// Rewrite every path into the user's on-disk convention.
    pub fn denormalize(mut self, normalizer: &PathNormalizer) -> Self {
        let paths = |paths: &mut Vec<String>| {
            for path in paths.iter_mut() {
                *path = normalizer.denormalize(path);
            }
        };

        paths(&mut self.unmodified);
        paths(&mut self.missing);
        paths(&mut self.modified);
        paths(&mut self.not_from_any);
        for (path, origins) in &mut self.moved_or_renamed {
            *path = normalizer.denormalize(path);
            paths(origins);
        }
        for (path, _) in self.different.iter_mut().chain(&mut self.different_modified) {
            *path = normalizer.denormalize(path);
        }
        for (path, origins) in &mut self.different_moved_or_renamed {
            *path = normalizer.denormalize(path);
            *origins = std::mem::take(origins)
                .into_iter()
                .map(|(origin, versions)| (normalizer.denormalize(&origin), versions))
                .collect();
        }

        self.sort();
        self
    }

    /// Number of entries in `category`.
    pub fn count(&self, category: FileCategory) -> usize {
        match category {
            FileCategory::Unmodified => self.unmodified.len(),
            FileCategory::Missing => self.missing.len(),
            FileCategory::Modified => self.modified.len(),
            FileCategory::MovedOrRenamed => self.moved_or_renamed.len(),
            FileCategory::Different => self.different.len(),
            FileCategory::DifferentModified => self.different_modified.len(),
            FileCategory::DifferentMovedOrRenamed => self.different_moved_or_renamed.len(),
            FileCategory::NotFromAny => self.not_from_any.len(),
        }
    }

    /// Paths in `category`, in report order.
    pub fn paths(&self, category: FileCategory) -> Vec<&str> {
        fn firsts<T>(entries: &[(String, T)]) -> Vec<&str> {
            entries.iter().map(|(path, _)| path.as_str()).collect()
        }
        fn plain(paths: &[String]) -> Vec<&str> {
            paths.iter().map(String::as_str).collect()
        }

        match category {
            FileCategory::Unmodified => plain(&self.unmodified),
            FileCategory::Missing => plain(&self.missing),
            FileCategory::Modified => plain(&self.modified),
            FileCategory::MovedOrRenamed => firsts(&self.moved_or_renamed),
            FileCategory::Different => firsts(&self.different),
            FileCategory::DifferentModified => firsts(&self.different_modified),
            FileCategory::DifferentMovedOrRenamed => firsts(&self.different_moved_or_renamed),
            FileCategory::NotFromAny => plain(&self.not_from_any),
        }
    }

    /// Category of an analyzed path, if it was classified.
    pub fn category_of(&self, path: &str) -> Option<FileCategory> {
        FileCategory::ALL
            .into_iter()
            .find(|category| self.paths(*category).contains(&path))
    }
}

/// Classify `analyzed` against `corpus` relative to `reference_version`.
///
/// Without a reference version every known file is reported as belonging to
/// another version and no missing files are computed. Paths stay in canonical
/// form; call [`AnalyzedFileSet::denormalize`] for display.
pub fn classify(
    analyzed: &TreeIndex,
    corpus: &Corpus,
    reference_version: Option<&str>,
) -> AnalyzedFileSet {
    let mut result = AnalyzedFileSet::new(reference_version);
    let reference_files = reference_version.and_then(|v| corpus.version_files(v));
    let in_reference = |path: &str| reference_files.is_some_and(|files| files.contains_key(path));

    for (checksum, paths) in analyzed.checksums() {
        match corpus.checksum_paths(checksum) {
            Some(known_paths) => {
                let in_reference_content = reference_version
                    .is_some_and(|v| corpus.version_has_checksum(v, checksum));

                for path in paths {
                    if let Some(versions) = known_paths.get(path) {
                        if reference_version.is_some_and(|v| versions.iter().any(|x| x == v)) {
                            result.unmodified.push(path.clone());
                        } else {
                            result.different.push((path.clone(), versions.clone()));
                        }
                    } else if in_reference_content {
                        result
                            .moved_or_renamed
                            .push((path.clone(), known_paths.keys().cloned().collect()));
                    } else {
                        result
                            .different_moved_or_renamed
                            .push((path.clone(), known_paths.clone()));
                    }
                }
            }
            None => {
                for path in paths {
                    if corpus.path_checksums(path).is_some() {
                        if in_reference(path) {
                            result.modified.push(path.clone());
                        } else {
                            result
                                .different_modified
                                .push((path.clone(), corpus.path_versions(path)));
                        }
                    } else {
                        result.not_from_any.push(path.clone());
                    }
                }
            }
        }
    }

    if let Some(reference_files) = reference_files {
        let moved_from: BTreeSet<&str> = result
            .moved_or_renamed
            .iter()
            .flat_map(|(_, origins)| origins.iter().map(String::as_str))
            .collect();

        for path in reference_files.keys() {
            if !analyzed.contains_path(path) && !moved_from.contains(path.as_str()) {
                result.missing.push(path.clone());
            }
        }
    }

    result.sort();
    log::debug!(
        "Classified {} files: {} unmodified, {} modified, {} missing, {} not from any version",
        analyzed.len(),
        result.unmodified.len(),
        result.modified.len(),
        result.missing.len(),
        result.not_from_any.len()
    );
    result
}
