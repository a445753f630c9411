//! Parsing of `pip list --outdated` output.
//!
//! pip newer than 9.0 can emit a JSON array; older releases only print a
//! free-form text table. Which one is in effect is decided once at startup
//! from the probed pip version and passed in as a [`ListInvocation`].

use crate::error::Result;
use crate::packages::PackageRecord;
use regex::{Regex, RegexBuilder};

/// Package-name token at the start of a legacy output line.
const NAME_PATTERN: &str = r"^[a-zA-Z0-9_-]+";

/// PEP 440 public version identifier: optional epoch, dotted release
/// segments, pre/post/dev qualifiers and an optional local segment.
const VERSION_PATTERN: &str = r"v?(?:(?:[0-9]+!)?[0-9]+(?:\.[0-9]+)*(?:[-_\.]?(?:alpha|a|beta|b|preview|pre|c|rc)[-_\.]?[0-9]*)?(?:(?:-[0-9]+)|(?:[-_\.]?(?:post|rev|r)[-_\.]?[0-9]*))?(?:[-_\.]?dev[-_\.]?[0-9]*)?)(?:\+[a-z0-9]+(?:[-_\.][a-z0-9]+)*)?";

/// Output format of the listing subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Json,
    Legacy,
}

/// Version-dependent shape of the `pip list --outdated` invocation,
/// derived once from the probed pip version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListInvocation {
    pub format: ListFormat,
    pub disable_version_check: bool,
}

impl ListInvocation {
    pub fn for_pip_version(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            // --format=json appeared after pip 9.0; 9.0.1 already has it
            format: if (major, minor, patch) > (9, 0, 0) {
                ListFormat::Json
            } else {
                ListFormat::Legacy
            },
            disable_version_check: major >= 6,
        }
    }

    /// Extra flags to append to the listing command.
    pub fn extra_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.disable_version_check {
            args.push("--disable-pip-version-check");
        }
        if self.format == ListFormat::Json {
            args.push("--format=json");
        }
        args
    }
}

/// Parse the raw listing output according to the selected format.
///
/// A malformed JSON document is fatal; it indicates an incompatible pip
/// version. Legacy text never fails, it just skips what it cannot read.
pub fn parse_outdated(output: &str, format: ListFormat) -> Result<Vec<PackageRecord>> {
    match format {
        ListFormat::Json => Ok(serde_json::from_str(output)?),
        ListFormat::Legacy => Ok(parse_legacy(output)),
    }
}

/// Parse the legacy text table, one candidate package per line.
///
/// A line yields a record only when it starts with a name token and contains
/// exactly two version literals (current, then latest). Anything else, such
/// as table headers or progress banners, is silently skipped. If a package
/// name itself contains a digit run that reads like a version the line is
/// skipped too; that heuristic comes with the legacy format.
fn parse_legacy(output: &str) -> Vec<PackageRecord> {
    let name_pattern = Regex::new(NAME_PATTERN).unwrap();
    let version_pattern = RegexBuilder::new(VERSION_PATTERN)
        .case_insensitive(true)
        .build()
        .unwrap();

    let mut packages = Vec::new();
    for line in output.lines() {
        let Some(name) = name_pattern.find(line) else {
            continue;
        };
        let versions: Vec<&str> = version_pattern
            .find_iter(line)
            .map(|m| m.as_str())
            .collect();
        if versions.len() == 2 {
            packages.push(PackageRecord::new(name.as_str(), versions[0], versions[1]));
        }
    }
    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_for_modern_pip_is_json() {
        let invocation = ListInvocation::for_pip_version(24, 0, 0);
        assert_eq!(invocation.format, ListFormat::Json);
        assert_eq!(
            invocation.extra_args(),
            vec!["--disable-pip-version-check", "--format=json"]
        );
    }

    #[test]
    fn invocation_for_pip_9_0_0_is_legacy_with_version_check_disabled() {
        let invocation = ListInvocation::for_pip_version(9, 0, 0);
        assert_eq!(invocation.format, ListFormat::Legacy);
        assert_eq!(invocation.extra_args(), vec!["--disable-pip-version-check"]);
    }

    #[test]
    fn invocation_for_pip_9_0_1_is_json() {
        // any patch release above 9.0 already supports --format=json
        let invocation = ListInvocation::for_pip_version(9, 0, 1);
        assert_eq!(invocation.format, ListFormat::Json);
        assert_eq!(
            invocation.extra_args(),
            vec!["--disable-pip-version-check", "--format=json"]
        );
    }

    #[test]
    fn invocation_for_ancient_pip_has_no_extra_args() {
        let invocation = ListInvocation::for_pip_version(1, 5, 0);
        assert_eq!(invocation.format, ListFormat::Legacy);
        assert!(invocation.extra_args().is_empty());
    }

    #[test]
    fn json_format_round_trips() {
        let records = vec![
            PackageRecord::new("foo", "1.0", "2.0"),
            PackageRecord::new("bar", "0.1", "0.2"),
        ];
        let encoded = serde_json::to_string(&records).unwrap();
        let parsed = parse_outdated(&encoded, ListFormat::Json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn json_format_ignores_latest_filetype() {
        let output = r#"[{"name": "requests", "version": "2.31.0", "latest_version": "2.32.0", "latest_filetype": "wheel"}]"#;
        let parsed = parse_outdated(output, ListFormat::Json).unwrap();
        assert_eq!(
            parsed,
            vec![PackageRecord::new("requests", "2.31.0", "2.32.0")]
        );
    }

    #[test]
    fn malformed_json_is_fatal() {
        assert!(parse_outdated("not json", ListFormat::Json).is_err());
    }

    #[test]
    fn legacy_line_with_two_versions_parses() {
        let output = "requests (2.31.0) - Latest: 2.32.0 [wheel]";
        let parsed = parse_outdated(output, ListFormat::Legacy).unwrap();
        assert_eq!(
            parsed,
            vec![PackageRecord::new("requests", "2.31.0", "2.32.0")]
        );
    }

    #[test]
    fn legacy_skips_lines_without_exactly_two_versions() {
        let output = "\
Package   Version   Latest    Type
--------- --------- --------- -----
foo       1.0       2.0       wheel
bar       0.1
baz       1.0       2.0       3.0";
        let parsed = parse_outdated(output, ListFormat::Legacy).unwrap();
        assert_eq!(parsed, vec![PackageRecord::new("foo", "1.0", "2.0")]);
    }

    #[test]
    fn legacy_skips_lines_without_a_name() {
        let output = "  1.0 2.0\n(1.0) 2.0";
        let parsed = parse_outdated(output, ListFormat::Legacy).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn legacy_handles_pep440_qualifiers() {
        let output = "django 4.2rc1 5.0.post1\ntwine 1!1.0 1!2.0.dev3\nnumpy 2.0.0alpha1 2.0.0";
        let parsed = parse_outdated(output, ListFormat::Legacy).unwrap();
        assert_eq!(
            parsed,
            vec![
                PackageRecord::new("django", "4.2rc1", "5.0.post1"),
                PackageRecord::new("twine", "1!1.0", "1!2.0.dev3"),
                PackageRecord::new("numpy", "2.0.0alpha1", "2.0.0"),
            ]
        );
    }

    #[test]
    fn legacy_handles_local_version_segments() {
        let output = "torch 2.1.0+cu118 2.2.0+cu121";
        let parsed = parse_outdated(output, ListFormat::Legacy).unwrap();
        assert_eq!(
            parsed,
            vec![PackageRecord::new("torch", "2.1.0+cu118", "2.2.0+cu121")]
        );
    }
}
