//! Total ordering over policy framework release identifiers.
//!
//! Release identifiers are a dotted numeric core with at most one suffix:
//! a pre-release marker (`3.24.0b1`) or a post-release marker (`3.24.0-1`).
//! The literal `master` and any `x` core segment stand for "newest within this
//! position" and sort above every concrete number.
//!
//! # Public API
//! - [`Version`]: Parsed, tagged representation of an identifier
//! - [`compare_versions`], [`sort_versions`]: Ordering over identifier strings
//! - [`highest_version`], [`lowest_version`], [`is_lower`], [`is_at_least`]
//!
//! # Ordering
//! `3.24.0b1 < 3.24.0 < 3.24.0-1 < 3.24.1 < 3.24.x < master`

use crate::core::error::{AnalyzerError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Numeric value substituted for a wildcard position.
pub const WILDCARD_VALUE: u64 = 99999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreSegment {
    Number(u64),
    Wildcard,
}

impl CoreSegment {
    fn value(self) -> u64 {
        match self {
            CoreSegment::Number(n) => n,
            CoreSegment::Wildcard => WILDCARD_VALUE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    None,
    PreRelease(u64),
    PostRelease(u64),
}

impl Suffix {
    fn key(self) -> (i64, u64) {
        match self {
            Suffix::PreRelease(n) => (-1, n),
            Suffix::None => (0, 0),
            Suffix::PostRelease(n) => (1, n),
        }
    }
}

/// A parsed release identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// `master` or a bare `x`
    Latest,
    Concrete {
        core: Vec<CoreSegment>,
        suffix: Suffix,
    },
}

impl Version {
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AnalyzerError::invalid_version(input, "empty version"));
        }
        if s == "master" || s == "x" {
            return Ok(Version::Latest);
        }

        let has_pre = s.contains('b');
        let has_post = s.contains('-');
        if has_pre && has_post {
            return Err(AnalyzerError::invalid_version(
                input,
                "both pre-release and post-release markers",
            ));
        }

        let (core_str, suffix) = if has_pre {
            let (core, n) = split_suffix(input, s, 'b')?;
            (core, Suffix::PreRelease(n))
        } else if has_post {
            let (core, n) = split_suffix(input, s, '-')?;
            (core, Suffix::PostRelease(n))
        } else {
            (s, Suffix::None)
        };

        let core = core_str
            .split('.')
            .map(|segment| match segment {
                "x" => Ok(CoreSegment::Wildcard),
                _ => segment.parse::<u64>().map(CoreSegment::Number).map_err(|_| {
                    AnalyzerError::invalid_version(
                        input,
                        format!("'{segment}' is not a number"),
                    )
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Version::Concrete { core, suffix })
    }

    /// Comparison key: core integers, then the signed suffix pair.
    pub fn sort_key(&self) -> (Vec<u64>, (i64, u64)) {
        match self {
            Version::Latest => (vec![WILDCARD_VALUE], Suffix::None.key()),
            Version::Concrete { core, suffix } => (
                core.iter().map(|segment| segment.value()).collect(),
                suffix.key(),
            ),
        }
    }
}

fn split_suffix<'a>(input: &str, s: &'a str, marker: char) -> Result<(&'a str, u64)> {
    let mut parts = s.splitn(2, marker);
    let core = parts.next().unwrap_or_default();
    let number = parts.next().unwrap_or_default();
    if number.contains(marker) {
        return Err(AnalyzerError::invalid_version(
            input,
            format!("more than one '{marker}' marker"),
        ));
    }
    let n = number.parse::<u64>().map_err(|_| {
        AnalyzerError::invalid_version(input, format!("'{marker}' must be followed by digits"))
    })?;
    Ok((core, n))
}

impl FromStr for Version {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Latest => write!(f, "master"),
            Version::Concrete { core, suffix } => {
                let core = core
                    .iter()
                    .map(|segment| match segment {
                        CoreSegment::Number(n) => n.to_string(),
                        CoreSegment::Wildcard => "x".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                match suffix {
                    Suffix::None => write!(f, "{core}"),
                    Suffix::PreRelease(n) => write!(f, "{core}b{n}"),
                    Suffix::PostRelease(n) => write!(f, "{core}-{n}"),
                }
            }
        }
    }
}

/// Compare two identifiers. Unparseable identifiers sort below parseable ones.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Ok(va), Ok(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

pub fn sort_versions<S: AsRef<str>>(versions: &mut [S], descending: bool) {
    versions.sort_by(|a, b| {
        let ordering = compare_versions(a.as_ref(), b.as_ref());
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

pub fn highest_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().max_by(|a, b| compare_versions(a, b))
}

pub fn lowest_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().min_by(|a, b| compare_versions(a, b))
}

pub fn is_lower(a: &str, b: &str) -> bool {
    compare_versions(a, b) == Ordering::Less
}

/// Always true when there is no minimum.
pub fn is_at_least(version: &str, min_version: Option<&str>) -> bool {
    match min_version {
        Some(min) => !is_lower(version, min),
        None => true,
    }
}
