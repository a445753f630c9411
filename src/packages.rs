use crate::error::Result;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// A single outdated package as reported by `pip list --outdated`.
///
/// The name is matched case-insensitively by filters but kept verbatim for
/// display and for the install invocation. Records are never mutated after
/// parsing; filtering produces new lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    /// Currently installed version.
    pub version: String,
    pub latest_version: String,
}

impl PackageRecord {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        latest_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            latest_version: latest_version.into(),
        }
    }
}

/// Apply a whitelist or blacklist name filter to the package list.
///
/// An empty pattern means no filtering. Otherwise the pattern is compiled
/// case-insensitively and searched (not full-matched) against each name; a
/// record is retained iff the match result equals `whitelist`.
pub fn apply_name_filter(
    packages: Vec<PackageRecord>,
    pattern: &str,
    whitelist: bool,
) -> Result<Vec<PackageRecord>> {
    if pattern.is_empty() {
        return Ok(packages);
    }

    let matcher = RegexBuilder::new(pattern).case_insensitive(true).build()?;
    Ok(packages
        .into_iter()
        .filter(|pkg| matcher.is_match(&pkg.name) == whitelist)
        .collect())
}
