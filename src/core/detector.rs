//! Reference version detection by weighted voting.
//!
//! Every `(checksum, path)` pair of the analyzed tree votes for the releases it
//! matches. Exact content-and-path matches decide the reference version; votes
//! for releases that only share the path are kept for diagnostics.
//!
//! # Public API
//! - [`VersionsData`]: The four vote tallies of one detection run
//! - [`detect_reference_version`]: Tally and pick the most common version
//! - [`most_common_version`]: Tie-breaking pick over one tally

use crate::core::vcf::{Corpus, TreeIndex};
use crate::core::version::{compare_versions, highest_version};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Version -> vote count.
pub type Tally = BTreeMap<String, usize>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionsData {
    /// One vote per release containing the same content at the same path
    pub same_filepath: Tally,
    /// One vote per matching pair, for the newest such release only
    pub same_filepath_highest: Tally,
    /// One vote per release in which the path existed with other content
    pub different_filepath: Tally,
    pub different_filepath_highest: Tally,
}

impl VersionsData {
    pub fn is_empty(&self) -> bool {
        self.same_filepath.is_empty() && self.different_filepath.is_empty()
    }
}

fn vote(tally: &mut Tally, version: &str) {
    *tally.entry(version.to_string()).or_default() += 1;
}

/// Count the votes of `analyzed` against `corpus`.
pub fn tally_versions(analyzed: &TreeIndex, corpus: &Corpus) -> VersionsData {
    let mut data = VersionsData::default();

    for (checksum, paths) in analyzed.checksums() {
        let Some(known_paths) = corpus.checksum_paths(checksum) else {
            continue;
        };

        for path in paths {
            if let Some(versions) = known_paths.get(path) {
                for version in versions {
                    vote(&mut data.same_filepath, version);
                }
                if let Some(highest) = highest_version(versions.iter().map(String::as_str)) {
                    vote(&mut data.same_filepath_highest, highest);
                }
            } else if corpus.path_checksums(path).is_some() {
                let versions = corpus.path_versions(path);
                for version in &versions {
                    vote(&mut data.different_filepath, version);
                }
                if let Some(highest) = versions.first() {
                    vote(&mut data.different_filepath_highest, highest);
                }
            }
        }
    }

    data
}

/// The version with the most votes; ties go to the highest version.
pub fn most_common_version(tally: &Tally) -> Option<&str> {
    tally
        .iter()
        .max_by(|(va, ca), (vb, cb)| match ca.cmp(cb) {
            Ordering::Equal => compare_versions(va, vb),
            other => other,
        })
        .map(|(version, _)| version.as_str())
}

/// Detect the reference version of `analyzed`, returning the tallies as well.
///
/// Only exact content-and-path matches count; `None` means no file of the
/// tree matched any release at its own path.
pub fn detect_reference_version(
    analyzed: &TreeIndex,
    corpus: &Corpus,
) -> (Option<String>, VersionsData) {
    let data = tally_versions(analyzed, corpus);
    let detected = most_common_version(&data.same_filepath).map(str::to_string);
    match &detected {
        Some(version) => log::debug!(
            "Detected reference version {version} ({} votes)",
            data.same_filepath[version]
        ),
        None => log::debug!("No reference version detected"),
    }
    (detected, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vcf::CorpusBuilder;

    fn corpus() -> Corpus {
        let mut builder = CorpusBuilder::new();
        builder
            .add_file("3.10.0", "masterfiles/promises.cf", "p1")
            .add_file("3.10.0", "masterfiles/update.cf", "u1")
            .add_file("3.10.0", "masterfiles/lib/a.cf", "a1")
            .add_file("3.12.0", "masterfiles/promises.cf", "p2")
            .add_file("3.12.0", "masterfiles/update.cf", "u1")
            .add_file("3.12.0", "masterfiles/lib/a.cf", "a2");
        builder.build()
    }

    #[test]
    fn test_most_common_version_prefers_count() {
        let tally: Tally = [("3.10.0".to_string(), 3), ("3.12.0".to_string(), 2)].into();
        assert_eq!(most_common_version(&tally), Some("3.10.0"));
    }

    #[test]
    fn test_most_common_version_tie_goes_to_highest() {
        let tally: Tally = [("3.10.0".to_string(), 2), ("3.12.0".to_string(), 2)].into();
        assert_eq!(most_common_version(&tally), Some("3.12.0"));

        // Lexicographic order would pick 3.9.0 here
        let tally: Tally = [("3.9.0".to_string(), 1), ("3.10.0".to_string(), 1)].into();
        assert_eq!(most_common_version(&tally), Some("3.10.0"));
    }

    #[test]
    fn test_most_common_version_empty() {
        assert_eq!(most_common_version(&Tally::new()), None);
    }

    #[test]
    fn test_detects_exact_release() {
        let analyzed = TreeIndex::from_entries([
            ("masterfiles/promises.cf", "p1"),
            ("masterfiles/update.cf", "u1"),
            ("masterfiles/lib/a.cf", "a1"),
        ]);
        let (detected, data) = detect_reference_version(&analyzed, &corpus());
        assert_eq!(detected.as_deref(), Some("3.10.0"));
        assert_eq!(data.same_filepath["3.10.0"], 3);
        assert_eq!(data.same_filepath["3.12.0"], 1);
        // update.cf is shared, its single "highest" vote goes to 3.12.0
        assert_eq!(data.same_filepath_highest["3.10.0"], 2);
        assert_eq!(data.same_filepath_highest["3.12.0"], 1);
    }

    #[test]
    fn test_different_filepath_votes() {
        // Content of a.cf from 3.12.0 placed at promises.cf
        let analyzed = TreeIndex::from_entries([("masterfiles/promises.cf", "a2")]);
        let (detected, data) = detect_reference_version(&analyzed, &corpus());
        assert_eq!(detected, None);
        assert_eq!(data.different_filepath["3.10.0"], 1);
        assert_eq!(data.different_filepath["3.12.0"], 1);
        assert_eq!(data.different_filepath_highest["3.12.0"], 1);
        assert!(!data.different_filepath_highest.contains_key("3.10.0"));
    }

    #[test]
    fn test_unknown_checksum_and_path_do_not_vote() {
        let analyzed = TreeIndex::from_entries([
            ("masterfiles/promises.cf", "edited"),
            ("masterfiles/custom.cf", "a1"),
        ]);
        let (detected, data) = detect_reference_version(&analyzed, &corpus());
        assert_eq!(detected, None);
        assert!(data.is_empty());
    }
}
