//! Rendering of analysis results as a tree listing or as JSON.
//!
//! # Public API
//! - [`render_text`]: Human-readable report with `├──`/`└──` tree prefixes
//! - [`render_json`]: Structured report with fixed key names
//!
//! Files belonging to other versions are annotated with the single most
//! relevant version relative to the reference version.

use crate::core::classifier::{AnalyzedFileSet, FileCategory};
use crate::core::colors::{get_category_heading, get_colored_path};
use crate::core::detector::{Tally, VersionsData};
use crate::core::error::Result;
use crate::core::relevance::most_relevant_version;
use crate::core::version::{compare_versions, highest_version};
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

struct Entry {
    heading: String,
    lines: Vec<String>,
}

fn push_tree(out: &mut String, title: &str, entries: &[Entry]) {
    out.push_str(&format!("{}\n", title.white().bold()));
    for (i, entry) in entries.iter().enumerate() {
        let last = i + 1 == entries.len();
        let (branch, indent) = if last { (LAST_BRANCH, SPACE) } else { (BRANCH, PIPE) };
        out.push_str(&format!("{branch}{}\n", entry.heading));
        for (j, line) in entry.lines.iter().enumerate() {
            let child = if j + 1 == entry.lines.len() { LAST_BRANCH } else { BRANCH };
            out.push_str(&format!("{indent}{child}{line}\n"));
        }
    }
    out.push('\n');
}

fn relevant<'a>(versions: &'a [String], reference: Option<&str>) -> &'a str {
    let versions = versions.iter().map(String::as_str);
    match reference {
        Some(reference) => most_relevant_version(versions, reference),
        None => highest_version(versions),
    }
    .unwrap_or("unknown")
}

fn plain_lines(category: FileCategory, paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|path| get_colored_path(category, path).to_string())
        .collect()
}

fn category_entry(files: &AnalyzedFileSet, category: FileCategory, list: bool) -> Entry {
    let reference = files.reference_version.as_deref();
    let lines = if !list {
        Vec::new()
    } else {
        match category {
            FileCategory::Unmodified => plain_lines(category, &files.unmodified),
            FileCategory::Missing => plain_lines(category, &files.missing),
            FileCategory::Modified => plain_lines(category, &files.modified),
            FileCategory::NotFromAny => plain_lines(category, &files.not_from_any),
            FileCategory::MovedOrRenamed => files
                .moved_or_renamed
                .iter()
                .map(|(path, origins)| {
                    format!("{} <- {}", get_colored_path(category, path), origins.join(", "))
                })
                .collect(),
            FileCategory::Different => files
                .different
                .iter()
                .map(|(path, versions)| {
                    format!(
                        "{} ({})",
                        get_colored_path(category, path),
                        relevant(versions, reference)
                    )
                })
                .collect(),
            FileCategory::DifferentModified => files
                .different_modified
                .iter()
                .map(|(path, versions)| {
                    format!(
                        "{} ({})",
                        get_colored_path(category, path),
                        relevant(versions, reference)
                    )
                })
                .collect(),
            FileCategory::DifferentMovedOrRenamed => files
                .different_moved_or_renamed
                .iter()
                .map(|(path, origins)| {
                    let origins = origins
                        .iter()
                        .map(|(origin, versions)| {
                            format!("{origin} ({})", relevant(versions, reference))
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{} <- {}", get_colored_path(category, path), origins)
                })
                .collect(),
        }
    };

    Entry {
        heading: get_category_heading(category, files.count(category)),
        lines,
    }
}

fn tally_entry(title: &str, tally: &Tally) -> Entry {
    let mut votes: Vec<(&String, &usize)> = tally.iter().collect();
    votes.sort_by(|(va, ca), (vb, cb)| cb.cmp(ca).then_with(|| compare_versions(vb, va)));
    Entry {
        heading: title.to_string(),
        lines: votes
            .into_iter()
            .map(|(version, count)| format!("{version}: {count}"))
            .collect(),
    }
}

/// Human-readable report. Unmodified files and vote tallies are only listed
/// when `verbose` is set.
pub fn render_text(files: &AnalyzedFileSet, data: &VersionsData, verbose: bool) -> String {
    let mut out = String::new();
    match &files.reference_version {
        Some(version) => out.push_str(&format!("Reference version: {}\n\n", version.green().bold())),
        None => out.push_str(&format!("Reference version: {}\n\n", "none detected".yellow())),
    }

    if files.reference_version.is_some() {
        let entries = [
            category_entry(files, FileCategory::Unmodified, verbose),
            category_entry(files, FileCategory::Modified, true),
            category_entry(files, FileCategory::MovedOrRenamed, true),
            category_entry(files, FileCategory::Missing, true),
        ];
        push_tree(&mut out, "Files from reference version:", &entries);
    }

    let entries = [
        category_entry(files, FileCategory::Different, true),
        category_entry(files, FileCategory::DifferentModified, true),
        category_entry(files, FileCategory::DifferentMovedOrRenamed, true),
    ];
    push_tree(&mut out, "Files from other versions:", &entries);

    let entries = [category_entry(files, FileCategory::NotFromAny, true)];
    push_tree(&mut out, "Files not from any version:", &entries);

    if verbose {
        let entries = [
            tally_entry("Same filepath", &data.same_filepath),
            tally_entry("Same filepath, highest version", &data.same_filepath_highest),
            tally_entry("Different filepath", &data.different_filepath),
            tally_entry(
                "Different filepath, highest version",
                &data.different_filepath_highest,
            ),
        ];
        push_tree(&mut out, "Version votes:", &entries);
    }

    out
}

#[derive(Serialize)]
#[serde(untagged)]
enum Origin<'a> {
    One(&'a str),
    Many(&'a [String]),
}

impl<'a> Origin<'a> {
    fn new(origins: &'a [String]) -> Self {
        match origins {
            [single] => Origin::One(single),
            _ => Origin::Many(origins),
        }
    }
}

#[derive(Serialize)]
struct MovedEntry<'a> {
    path: &'a str,
    origin: Origin<'a>,
}

#[derive(Serialize)]
struct VersionsEntry<'a> {
    path: &'a str,
    versions: &'a [String],
}

#[derive(Serialize)]
struct DifferentMovedEntry<'a> {
    path: &'a str,
    origin: &'a BTreeMap<String, Vec<String>>,
}

#[derive(Serialize)]
struct JsonFiles<'a> {
    unmodified: &'a [String],
    missing: &'a [String],
    modified: &'a [String],
    moved_or_renamed: Vec<MovedEntry<'a>>,
    different_version: Vec<VersionsEntry<'a>>,
    different_version_modified: Vec<VersionsEntry<'a>>,
    different_version_moved_or_renamed: Vec<DifferentMovedEntry<'a>>,
    not_from_any_version: &'a [String],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    reference_version: Option<&'a str>,
    files: JsonFiles<'a>,
}

fn versions_entries(entries: &[(String, Vec<String>)]) -> Vec<VersionsEntry<'_>> {
    entries
        .iter()
        .map(|(path, versions)| VersionsEntry { path, versions })
        .collect()
}

/// Structured report keyed by the fixed category names.
pub fn render_json(files: &AnalyzedFileSet) -> Result<String> {
    let report = JsonReport {
        reference_version: files.reference_version.as_deref(),
        files: JsonFiles {
            unmodified: &files.unmodified,
            missing: &files.missing,
            modified: &files.modified,
            moved_or_renamed: files
                .moved_or_renamed
                .iter()
                .map(|(path, origins)| MovedEntry {
                    path,
                    origin: Origin::new(origins),
                })
                .collect(),
            different_version: versions_entries(&files.different),
            different_version_modified: versions_entries(&files.different_modified),
            different_version_moved_or_renamed: files
                .different_moved_or_renamed
                .iter()
                .map(|(path, origin)| DifferentMovedEntry { path, origin })
                .collect(),
            not_from_any_version: &files.not_from_any,
        },
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
