//! Dump every class and enum of a schema registry into one text artifact per
//! type, grouped by project, and keep the output tree in step with the
//! registry across runs.
//!
//! # Example
//!
//! ```
//! use schemadump_core::{DumpOptions, MemoryStore, run_dump};
//! use schemadump_model::{ClassInfo, FieldInfo, InMemoryRegistry};
//!
//! let mut registry = InMemoryRegistry::new();
//! registry
//!     .add_scope("client.dll")
//!     .add_class(ClassInfo::new("Widget", "UI").with_field(FieldInfo::new("int32", "count")));
//!
//! let mut store = MemoryStore::new();
//! let mut identifiers: Vec<String> = Vec::new();
//! let summary = run_dump(&registry, &mut store, &mut identifiers, &DumpOptions::default()).unwrap();
//!
//! assert_eq!(summary.classes, 1);
//! assert_eq!(
//!     store.artifact("UI", "Widget"),
//!     Some("class Widget\n{\n\tint32 count;\n};\n")
//! );
//! assert_eq!(identifiers, vec!["Widget", "count"]);
//! ```

pub mod dump;
pub mod error;
pub mod metadata;
pub mod sink;
pub mod store;
pub mod sync;
pub mod writer;

pub use dump::{DiscoveredArtifacts, DumpOptions, DumpSummary, Dumper, WalkStats, run_dump};
pub use error::{DumpError, Result};
pub use metadata::{MetadataKind, classify, fnv1a_32, format_metadata_value};
pub use sink::{IdentifierSink, LineWriterSink};
pub use store::{
    ARTIFACT_EXTENSION, ArtifactStore, FsStore, MemoryStore, SCHEMAS_DIR, artifact_file_name,
    artifact_stem,
};
pub use sync::{SyncPlan, SyncReport, apply_sync, plan_sync};
pub use writer::{
    UNKNOWN_ALIGNMENT_TYPE, render_class, render_enum, sanitize_type_name, underlying_type_name,
    write_metadata_comment,
};
