//! Selection of the most relevant related version for reporting.
//!
//! When a file belongs to versions other than the reference version, the report
//! names one of them. The closest older version wins, since that answers the
//! usual "what did I upgrade from" question.

use crate::core::version::{highest_version, is_lower, lowest_version};

/// Pick the version from `other_versions` most relevant to `reference`.
///
/// - all older than `reference`: the highest of them
/// - all newer than `reference`: the lowest of them
/// - mixed: the highest one still older than `reference`
///
/// `reference` itself is ignored if present. Returns `None` when nothing remains.
pub fn most_relevant_version<'a, I>(other_versions: I, reference: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let others: Vec<&str> = other_versions
        .into_iter()
        .filter(|v| *v != reference)
        .collect();

    let lower: Vec<&str> = others
        .iter()
        .copied()
        .filter(|v| is_lower(v, reference))
        .collect();

    if lower.is_empty() {
        lowest_version(others)
    } else {
        highest_version(lower)
    }
}
