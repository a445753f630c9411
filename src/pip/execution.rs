use crate::error::{PipReviewError, Result};
use crate::pip::outdated::ListInvocation;
use regex::Regex;
use std::process::{Command, Stdio};

/// Seam for the install invocation, so the orchestrator can be exercised
/// without spawning real pip processes.
pub trait PackageInstaller {
    /// Run `pip install -U` for the given packages. Returns whether the
    /// invocation exited successfully; a failing install is reported by the
    /// caller, never raised as an error here.
    fn install(&self, packages: &[&str], forwarded: &[String]) -> Result<bool>;
}

/// PipExecutionAgent runs pip subcommands through the Python interpreter.
pub struct PipExecutionAgent {
    python: String,
}

impl PipExecutionAgent {
    pub fn new() -> Self {
        Self::with_python(if cfg!(target_os = "windows") {
            "python"
        } else {
            "python3"
        })
    }

    /// Use a specific interpreter (or stand-in executable, in tests).
    pub fn with_python(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Probe the installed pip version by running `pip --version`.
    pub fn pip_version(&self) -> Result<(u32, u32, u32)> {
        let output = Command::new(&self.python)
            .args(["-m", "pip", "--version"])
            .output()
            .map_err(|e| {
                PipReviewError::PipExecution(format!("failed to run {}: {}", self.python, e))
            })?;

        if !output.status.success() {
            return Err(PipReviewError::PipExecution(format!(
                "pip --version exited with code {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_pip_version(&stdout).ok_or_else(|| {
            PipReviewError::PipExecution(format!(
                "could not determine pip version from: {}",
                stdout.trim()
            ))
        })
    }

    /// Run `pip list --outdated` with the forwarded list-safe arguments and
    /// capture its stdout. A non-zero exit is fatal; nothing downstream can
    /// work without the listing.
    pub fn list_outdated(&self, forwarded: &[String], invocation: ListInvocation) -> Result<String> {
        let mut command = Command::new(&self.python);
        command.args(["-m", "pip", "list", "--outdated"]);
        command.args(forwarded);
        command.args(invocation.extra_args());
        log_command(&command);

        let output = command.output().map_err(|e| {
            PipReviewError::PipExecution(format!("failed to run {}: {}", self.python, e))
        })?;

        if !output.status.success() {
            return Err(PipReviewError::PipExecution(format!(
                "pip list --outdated exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PackageInstaller for PipExecutionAgent {
    fn install(&self, packages: &[&str], forwarded: &[String]) -> Result<bool> {
        let mut command = Command::new(&self.python);
        command.args(["-m", "pip", "install", "-U"]);
        command.args(forwarded);
        command.args(packages);
        // pip's own output goes straight to the user
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        log_command(&command);

        let status = command.status().map_err(|e| {
            PipReviewError::PipExecution(format!("failed to run {}: {}", self.python, e))
        })?;

        Ok(status.success())
    }
}

impl Default for PipExecutionAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_pip_version(output: &str) -> Option<(u32, u32, u32)> {
    let pattern = Regex::new(r"pip (\d+)(?:\.(\d+))?(?:\.(\d+))?").unwrap();
    let captures = pattern.captures(output)?;
    let major = captures.get(1)?.as_str().parse().ok()?;
    let minor = captures
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let patch = captures
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some((major, minor, patch))
}

fn log_command(command: &Command) {
    if std::env::var("PIP_REVIEW_VERBOSE").is_ok() {
        let args: Vec<String> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        eprintln!(
            "Executing: {} {}",
            command.get_program().to_string_lossy(),
            args.join(" ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modern_pip_version_banner() {
        let output = "pip 24.0 from /usr/lib/python3.12/site-packages/pip (python 3.12)";
        assert_eq!(parse_pip_version(output), Some((24, 0, 0)));
    }

    #[test]
    fn keeps_the_patch_component() {
        assert_eq!(parse_pip_version("pip 9.0.1 from ..."), Some((9, 0, 1)));
        assert_eq!(parse_pip_version("pip 1.5 from ..."), Some((1, 5, 0)));
    }

    #[test]
    fn rejects_unrecognized_banner() {
        assert_eq!(parse_pip_version("no pip here"), None);
    }
}
