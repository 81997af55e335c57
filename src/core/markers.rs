//! Heuristics for locating a policy set root on disk.
//!
//! Used only when no reference version could be detected, to tell a user who
//! pointed at the wrong directory where the policy set probably is.

use std::path::{Path, PathBuf};

/// Files whose presence marks a directory as a policy set root.
pub const MARKER_FILES: [&str; 2] = ["promises.cf", "update.cf"];

pub fn has_marker_files(dir: &Path) -> bool {
    MARKER_FILES.iter().any(|marker| dir.join(marker).is_file())
}

/// Directory holding the policy files for the given layout.
pub fn policy_root(path: &Path, is_parent_layout: bool, masterfiles_dirname: &str) -> PathBuf {
    if is_parent_layout {
        path.join(masterfiles_dirname)
    } else {
        path.to_path_buf()
    }
}

/// Directories near `path` that look like policy set roots: the path itself,
/// its masterfiles subdirectory and its parent, in that order.
pub fn candidate_roots(path: &Path, masterfiles_dirname: &str) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf(), path.join(masterfiles_dirname)];
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        candidates.push(parent.to_path_buf());
    }

    let mut found: Vec<PathBuf> = Vec::new();
    for candidate in candidates {
        if has_marker_files(&candidate) && !found.contains(&candidate) {
            found.push(candidate);
        }
    }
    found
}
