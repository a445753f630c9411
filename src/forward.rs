//! Splits the forwarded pip arguments between `pip list` and `pip install`.

/// Flags that `pip list` supports but `pip install` does not.
pub const LIST_ONLY: &[&str] = &[
    "l",
    "local",
    "path",
    "format",
    "not-required",
    "exclude-editable",
    "include-editable",
];

/// Flags that `pip install` supports but `pip list` does not.
pub const INSTALL_ONLY: &[&str] = &[
    "c",
    "constraint",
    "no-deps",
    "t",
    "target",
    "platform",
    "python-version",
    "implementation",
    "abi",
    "root",
    "prefix",
    "b",
    "build",
    "src",
    "U",
    "upgrade",
    "upgrade-strategy",
    "force-reinstall",
    "I",
    "ignore-installed",
    "ignore-requires-python",
    "no-build-isolation",
    "use-pep517",
    "install-option",
    "global-option",
    "compile",
    "no-compile",
    "no-warn-script-location",
    "no-warn-conflicts",
    "no-binary",
    "only-binary",
    "prefer-binary",
    "no-clean",
    "require-hashes",
    "progress-bar",
];

/// Return only the parts of `args` that do not appear in `exclude`.
///
/// A flag in the exclusion set is dropped together with any value token that
/// follows it. A bare value with no preceding admitted flag is dropped as
/// well, since it would just trip the downstream pip subcommand.
pub fn filter_forwards(args: &[String], exclude: &[&str]) -> Vec<String> {
    let mut result = Vec::new();
    let mut admitted = false;
    for arg in args {
        if !arg.starts_with('-') {
            if admitted {
                result.push(arg.clone());
            }
        } else if exclude.contains(&arg.trim_start_matches('-')) {
            admitted = false;
        } else {
            result.push(arg.clone());
            admitted = true;
        }
    }
    result
}
