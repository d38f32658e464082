pub mod diagnostics;
pub mod errors;
mod fs_util;
pub mod models;
pub mod packages;
pub mod parser;
pub mod runner;
pub mod validator;

// Re-export key types at crate root for convenience.
pub use diagnostics::Diagnostic;
pub use errors::{RepoToolsError, Result};
pub use models::{PublishTo, Pubspec};
pub use packages::{DirectoryPackages, PackageRef, PackageSource};
pub use parser::{find_pubspec, parse_pubspec};
pub use runner::{run_pubspec_check, BatchSummary, OutputSink, PackageReport, StdoutSink};
pub use validator::{validate, ValidationResult};
