pub mod execution;
pub mod outdated;

pub use execution::{PackageInstaller, PipExecutionAgent};
pub use outdated::{ListInvocation, parse_outdated};
