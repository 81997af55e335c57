//! Conversion between on-disk relative paths and canonical corpus paths.
//!
//! The release information always stores paths as if rooted one level above
//! the policy set, under a literal `masterfiles/` prefix. A user may point the
//! analyzer either at the masterfiles directory itself or at a parent directory
//! containing it (possibly under a different name).
//!
//! # Public API
//! - [`PathNormalizer`]: Bidirectional mapping for one analysis run

/// Literal prefix segment used by the release information.
pub const CANONICAL_ROOT: &str = "masterfiles";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    is_parent_layout: bool,
    masterfiles_dirname: String,
}

impl PathNormalizer {
    pub fn new(is_parent_layout: bool, masterfiles_dirname: impl Into<String>) -> Self {
        let masterfiles_dirname = to_forward_slashes(&masterfiles_dirname.into())
            .trim_matches('/')
            .to_string();
        Self {
            is_parent_layout,
            masterfiles_dirname,
        }
    }

    pub fn is_parent_layout(&self) -> bool {
        self.is_parent_layout
    }

    pub fn masterfiles_dirname(&self) -> &str {
        &self.masterfiles_dirname
    }

    /// Map a path relative to the analyzed root into corpus form.
    ///
    /// In the parent layout, paths outside the masterfiles subdirectory are
    /// returned unchanged (only separators are normalized).
    pub fn normalize(&self, path: &str) -> String {
        let path = to_forward_slashes(path);
        let path = path.trim_start_matches("./");

        if !self.is_parent_layout {
            return format!("{CANONICAL_ROOT}/{path}");
        }

        match strip_dir_prefix(path, &self.masterfiles_dirname) {
            Some(relative) => format!("{CANONICAL_ROOT}/{relative}"),
            None => path.to_string(),
        }
    }

    /// Exact inverse of [`normalize`](Self::normalize) for paths under the
    /// recognized root. Paths outside it are returned unchanged.
    pub fn denormalize(&self, path: &str) -> String {
        let Some(relative) = relative_to_canonical_root(path) else {
            return path.to_string();
        };

        if self.is_parent_layout {
            format!("{}/{}", self.masterfiles_dirname, relative)
        } else {
            relative.to_string()
        }
    }
}

fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

fn strip_dir_prefix<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    path.strip_prefix(dir)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
}

/// The part of `path` below the leading literal `masterfiles` segment.
fn relative_to_canonical_root(path: &str) -> Option<&str> {
    path.strip_prefix(CANONICAL_ROOT)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
}
