//! Drives the actual upgrade once a package subset has been selected.

use crate::error::Result;
use crate::packages::PackageRecord;
use crate::pip::PackageInstaller;
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Snapshot file for the pre-upgrade pins.
pub const FREEZE_FILE: &str = "requirements.txt";

#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeOptions {
    /// Run one install per package so a single failure does not block the
    /// rest, at the cost of atomicity.
    pub continue_on_fail: bool,
    /// Write the currently installed versions to the freeze file before
    /// upgrading, for rollback reference.
    pub freeze: bool,
}

/// Upgrade the selected packages.
///
/// A failing install is reported but never turned into an error here; pip
/// already printed the details on its own stderr.
pub fn update_packages(
    installer: &impl PackageInstaller,
    packages: &[PackageRecord],
    install_args: &[String],
    options: UpgradeOptions,
    freeze_path: &Path,
) -> Result<()> {
    if options.freeze {
        write_freeze_file(packages, freeze_path)?;
    }

    if !options.continue_on_fail {
        let names: Vec<&str> = packages.iter().map(|pkg| pkg.name.as_str()).collect();
        if !installer.install(&names, install_args)? {
            eprintln!("{}", "pip install exited with a non-zero status".yellow());
        }
        return Ok(());
    }

    for pkg in packages {
        if !installer.install(&[pkg.name.as_str()], install_args)? {
            eprintln!(
                "{}",
                format!("Upgrade of {} failed, continuing with the rest", pkg.name).yellow()
            );
        }
    }
    Ok(())
}

/// Write one `name==version` pin per package, overwriting any existing file.
fn write_freeze_file(packages: &[PackageRecord], path: &Path) -> Result<()> {
    let mut pins = String::new();
    for pkg in packages {
        pins.push_str(&format!("{}=={}\n", pkg.name, pkg.version));
    }
    fs::write(path, pins)?;
    Ok(())
}
