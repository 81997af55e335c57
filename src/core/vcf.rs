//! Version / checksum / file cross-indices.
//!
//! Three mutually derivable views over the same set of `(version, path, checksum)`
//! facts:
//! - `versions[version][path] = checksum`
//! - `checksums[checksum][path] = versions`
//! - `files[path][checksum] = versions`
//!
//! # Public API
//! - [`TreeIndex`]: Index of a single, unversioned tree under analysis
//! - [`Corpus`]: Immutable historical release information
//! - [`CorpusBuilder`]: Incremental construction of a [`Corpus`] from release trees
//! - [`VersionsDocument`], [`ChecksumsDocument`], [`FilesDocument`]: On-disk JSON forms
//!
//! All maps are ordered and every version list is sorted newest first, so the
//! serialized documents are byte-stable for identical inputs.

use crate::core::error::{AnalyzerError, Result};
use crate::core::paths::PathNormalizer;
use crate::core::scanner::{scan_tree, IgnoredComponents};
use crate::core::version::{sort_versions, Version};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub type VersionsIndex = BTreeMap<String, BTreeMap<String, String>>;
pub type ChecksumsIndex = BTreeMap<String, BTreeMap<String, Vec<String>>>;
pub type FilesIndex = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Checksum and path index of the tree being analyzed, keyed by canonical path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeIndex {
    checksums: BTreeMap<String, BTreeSet<String>>,
    files: BTreeMap<String, String>,
}

impl TreeIndex {
    /// Scan `root`, normalizing every relative path into corpus form.
    pub fn scan(
        root: &Path,
        ignored: &IgnoredComponents,
        normalizer: &PathNormalizer,
    ) -> Result<Self> {
        let entries = scan_tree(root, ignored)?;
        Ok(Self::from_entries(
            entries
                .into_iter()
                .map(|(path, checksum)| (normalizer.normalize(&path), checksum)),
        ))
    }

    pub fn from_entries<I, P, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let mut index = Self::default();
        for (path, checksum) in entries {
            index.insert(path.into(), checksum.into());
        }
        index
    }

    fn insert(&mut self, path: String, checksum: String) {
        if let Some(previous) = self.files.insert(path.clone(), checksum.clone()) {
            if let Some(paths) = self.checksums.get_mut(&previous) {
                paths.remove(&path);
                if paths.is_empty() {
                    self.checksums.remove(&previous);
                }
            }
        }
        self.checksums.entry(checksum).or_default().insert(path);
    }

    pub fn checksums(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.checksums
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Historical release information. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    versions: VersionsIndex,
    checksums: ChecksumsIndex,
    files: FilesIndex,
}

impl Corpus {
    /// Build from already-parsed documents, verifying that every version
    /// identifier parses and that the three indices agree with each other.
    pub fn from_documents(
        versions: VersionsDocument,
        checksums: ChecksumsDocument,
        files: FilesDocument,
    ) -> Result<Self> {
        let corpus = Self {
            versions: versions.versions,
            checksums: checksums.checksums,
            files: files.files,
        };
        corpus.validate()?;
        Ok(corpus)
    }

    fn validate(&self) -> Result<()> {
        for version in self.versions.keys() {
            Version::parse(version)
                .map_err(|e| AnalyzerError::corpus_malformed("versions.json", e.to_string()))?;
        }

        let mut facts = 0usize;
        for (version, files) in &self.versions {
            for (path, checksum) in files {
                facts += 1;
                let in_checksums = self
                    .checksums
                    .get(checksum)
                    .and_then(|paths| paths.get(path))
                    .is_some_and(|versions| versions.contains(version));
                if !in_checksums {
                    return Err(AnalyzerError::corpus_malformed(
                        "checksums.json",
                        format!("missing {version} for {path} ({checksum})"),
                    ));
                }
                let in_files = self
                    .files
                    .get(path)
                    .and_then(|checksums| checksums.get(checksum))
                    .is_some_and(|versions| versions.contains(version));
                if !in_files {
                    return Err(AnalyzerError::corpus_malformed(
                        "files.json",
                        format!("missing {version} for {path} ({checksum})"),
                    ));
                }
            }
        }

        let count = |index: &BTreeMap<String, BTreeMap<String, Vec<String>>>| {
            index
                .values()
                .flat_map(|inner| inner.values())
                .map(Vec::len)
                .sum::<usize>()
        };
        if count(&self.checksums) != facts {
            return Err(AnalyzerError::corpus_malformed(
                "checksums.json",
                "entries not present in versions.json",
            ));
        }
        if count(&self.files) != facts {
            return Err(AnalyzerError::corpus_malformed(
                "files.json",
                "entries not present in versions.json",
            ));
        }
        Ok(())
    }

    pub fn versions(&self) -> &VersionsIndex {
        &self.versions
    }

    pub fn checksums(&self) -> &ChecksumsIndex {
        &self.checksums
    }

    pub fn files(&self) -> &FilesIndex {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Files of `version`, if the version is known.
    pub fn version_files(&self, version: &str) -> Option<&BTreeMap<String, String>> {
        self.versions.get(version)
    }

    pub fn checksum_paths(&self, checksum: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.checksums.get(checksum)
    }

    pub fn path_checksums(&self, path: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.files.get(path)
    }

    /// Versions in which `path` existed with exactly `checksum`.
    pub fn versions_of(&self, checksum: &str, path: &str) -> Option<&Vec<String>> {
        self.checksums.get(checksum).and_then(|paths| paths.get(path))
    }

    /// Every version in which `path` existed, under any checksum, newest first.
    pub fn path_versions(&self, path: &str) -> Vec<String> {
        let mut versions: Vec<String> = self
            .files
            .get(path)
            .map(|checksums| {
                checksums
                    .values()
                    .flatten()
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default();
        sort_versions(&mut versions, true);
        versions
    }

    /// Whether any file of `version` has content `checksum`.
    pub fn version_has_checksum(&self, version: &str, checksum: &str) -> bool {
        self.checksums
            .get(checksum)
            .is_some_and(|paths| paths.values().any(|versions| versions.iter().any(|v| v == version)))
    }

    pub fn to_documents(&self) -> (VersionsDocument, ChecksumsDocument, FilesDocument) {
        (
            VersionsDocument {
                versions: self.versions.clone(),
            },
            ChecksumsDocument {
                checksums: self.checksums.clone(),
            },
            FilesDocument {
                files: self.files.clone(),
            },
        )
    }
}

/// Accumulates release trees into a [`Corpus`].
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    versions: VersionsIndex,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a release tree (the masterfiles directory of `version`) and record
    /// its files under canonical paths.
    pub fn add_tree(
        &mut self,
        root: &Path,
        version: &str,
        ignored: &IgnoredComponents,
    ) -> Result<&mut Self> {
        Version::parse(version)?;
        let normalizer = PathNormalizer::new(false, "masterfiles");
        let entries = scan_tree(root, ignored)?;
        log::debug!("Recording {} files for version {version}", entries.len());
        for (path, checksum) in entries {
            self.add_file(version, &normalizer.normalize(&path), &checksum);
        }
        Ok(self)
    }

    pub fn add_file(&mut self, version: &str, path: &str, checksum: &str) -> &mut Self {
        self.versions
            .entry(version.to_string())
            .or_default()
            .insert(path.to_string(), checksum.to_string());
        self
    }

    /// Derive the checksum and file indices by grouping the versions index.
    pub fn build(self) -> Corpus {
        let mut checksums: ChecksumsIndex = BTreeMap::new();
        let mut files: FilesIndex = BTreeMap::new();

        for (version, tree) in &self.versions {
            for (path, checksum) in tree {
                checksums
                    .entry(checksum.clone())
                    .or_default()
                    .entry(path.clone())
                    .or_default()
                    .push(version.clone());
                files
                    .entry(path.clone())
                    .or_default()
                    .entry(checksum.clone())
                    .or_default()
                    .push(version.clone());
            }
        }

        for versions in checksums
            .values_mut()
            .chain(files.values_mut())
            .flat_map(|inner| inner.values_mut())
        {
            sort_versions(versions, true);
        }

        Corpus {
            versions: self.versions,
            checksums,
            files,
        }
    }
}

/// `versions.json`: `{"versions": {version: {path: checksum}}}`, newest version first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionsDocument {
    pub versions: VersionsIndex,
}

impl Serialize for VersionsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Newest<'a>(&'a VersionsIndex);

        impl Serialize for Newest<'_> {
            fn serialize<M: Serializer>(
                &self,
                serializer: M,
            ) -> std::result::Result<M::Ok, M::Error> {
                let mut keys: Vec<&String> = self.0.keys().collect();
                sort_versions(&mut keys, true);
                let mut map = serializer.serialize_map(Some(keys.len()))?;
                for key in keys {
                    map.serialize_entry(key, &self.0[key])?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("versions", &Newest(&self.versions))?;
        map.end()
    }
}

/// `checksums.json`: `{"checksums": {checksum: {path: [versions]}}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumsDocument {
    pub checksums: ChecksumsIndex,
}

/// `files.json`: `{"files": {path: {checksum: [versions]}}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesDocument {
    pub files: FilesIndex,
}
