//! Temporary directory trees and command setup
//!
//! Provides a [`TestTree`] wrapper that keeps its temporary directory alive and
//! a command builder that isolates the binary from the user's config and cache.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary directory holding test trees. The TempDir must be kept alive for
/// the duration of the test to prevent cleanup.
pub struct TestTree {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestTree {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self { temp_dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
    let file = root.join(relative);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file, content)
}

/// Writes every `(relative_path, content)` pair under `root`.
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
    for (relative, content) in files {
        write_file(root, relative, content)?;
    }
    Ok(())
}

/// `policy-analyzer` command with config, cache and colors isolated to `home`.
pub fn analyzer_command(home: &Path) -> Result<Command, assert_cmd::cargo::CargoError> {
    let mut cmd = Command::cargo_bin("policy-analyzer")?;
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env("HOME", home)
        .env("NO_COLOR", "1");
    Ok(cmd)
}
