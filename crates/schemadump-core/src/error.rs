//! Error types for a dump run.

use thiserror::Error;

/// Conditions that abort a dump run.
///
/// Artifacts written before the failure are left in place.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The schemas output root could not be created.
    #[error("failed to create output root {location}: {source}")]
    CreateRoot {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// A project directory could not be created.
    #[error("failed to create project directory '{project}': {source}")]
    CreateProject {
        project: String,
        #[source]
        source: std::io::Error,
    },

    /// The existing output tree could not be enumerated for synchronization.
    #[error("failed to list output root {location}: {source}")]
    ListOutput {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DumpError::CreateProject {
            project: "client".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to create project directory 'client': denied"
        );
    }
}
