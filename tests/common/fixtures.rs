//! Test data generation utilities and predefined scenarios
//!
//! Provides two small releases, release information generated from them, and
//! helpers for creating policy sets derived from a release.

#![allow(dead_code)]

use super::tree::*;
use policy_analyzer::commands::generate_release_information;
use policy_analyzer::core::{corpus::write_corpus, error::Result, IgnoredComponents};
use std::path::{Path, PathBuf};

/// Release 3.21.0 of the framework.
pub const RELEASE_3_21: &[(&str, &str)] = &[
    ("promises.cf", "bundle common def 3.21\n"),
    ("update.cf", "bundle agent update\n"),
    ("lib/files.cf", "bundle agent files 3.21\n"),
    ("lib/old.cf", "bundle agent old_helper\n"),
];

/// Release 3.22.0: `lib/old.cf` was dropped and `lib/new.cf` added.
pub const RELEASE_3_22: &[(&str, &str)] = &[
    ("promises.cf", "bundle common def 3.22\n"),
    ("update.cf", "bundle agent update\n"),
    ("lib/files.cf", "bundle agent files 3.22\n"),
    ("lib/new.cf", "bundle agent new_helper\n"),
];

/// Releases on disk plus the release information generated from them.
pub struct Fixture {
    pub tree: TestTree,
    pub releases: PathBuf,
    pub release_info: PathBuf,
}

impl Fixture {
    pub fn home(&self) -> &Path {
        self.tree.path()
    }

    /// Directory for a policy set under test, not created yet.
    pub fn policy_dir(&self) -> PathBuf {
        self.tree.join("policy")
    }
}

pub fn write_releases(releases: &Path) -> std::io::Result<()> {
    write_files(&releases.join("3.21.0"), RELEASE_3_21)?;
    write_files(&releases.join("3.22.0"), RELEASE_3_22)
}

/// Scenario: two releases and their generated release information
pub fn setup_release_information() -> Result<Fixture> {
    let tree = TestTree::new()?;
    let releases = tree.join("releases");
    let release_info = tree.join("release-info");

    write_releases(&releases)?;
    let corpus = generate_release_information(&releases, &IgnoredComponents::default())?;
    write_corpus(&corpus, &release_info)?;

    Ok(Fixture {
        tree,
        releases,
        release_info,
    })
}

/// Copies a release into `dir` unchanged.
pub fn create_policy_set(dir: &Path, release: &[(&str, &str)]) -> Result<()> {
    write_files(dir, release)?;
    Ok(())
}

/// Scenario: policy set based on 3.22.0 with local changes
///
/// - `update.cf` modified
/// - `lib/new.cf` renamed to `lib/renamed.cf`
/// - `custom.cf` added
pub fn create_customized_policy_set(dir: &Path) -> Result<()> {
    write_files(
        dir,
        &[
            ("promises.cf", "bundle common def 3.22\n"),
            ("update.cf", "bundle agent update\n# local tweak\n"),
            ("lib/files.cf", "bundle agent files 3.22\n"),
            ("lib/renamed.cf", "bundle agent new_helper\n"),
            ("custom.cf", "bundle agent custom\n"),
        ],
    )?;
    Ok(())
}

/// Scenario: policy set based on 3.21.0 with one file taken from 3.22.0
pub fn create_mixed_policy_set(dir: &Path) -> Result<()> {
    write_files(
        dir,
        &[
            ("promises.cf", "bundle common def 3.21\n"),
            ("update.cf", "bundle agent update\n"),
            ("lib/files.cf", "bundle agent files 3.22\n"),
            ("lib/old.cf", "bundle agent old_helper\n"),
        ],
    )?;
    Ok(())
}
