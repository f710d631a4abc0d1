use std::path::PathBuf;

use schemadump_core::DumpSummary;

#[derive(Debug)]
pub struct DumpRequest {
    pub snapshot: PathBuf,
    pub output_dir: PathBuf,
    pub identifiers_file: Option<PathBuf>,
    pub prune: bool,
}

#[derive(Debug)]
pub struct DumpOutcome {
    pub schemas_dir: PathBuf,
    pub identifiers_file: PathBuf,
    /// `None` when the identifier list could not be written completely.
    pub identifiers_written: Option<usize>,
    pub summary: DumpSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeCounts {
    pub name: String,
    pub classes: usize,
    pub enums: usize,
    pub global: bool,
}
