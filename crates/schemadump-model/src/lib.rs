//! Data model for a live schema (type reflection) registry.
//!
//! The registry itself belongs to a host process. This crate describes the
//! records the dumper reads from it, the traversal contract it reads them
//! through, and an in-memory registry that can be filled directly or loaded
//! from a JSON snapshot exported by the host.

pub mod error;
pub mod ids;
pub mod registry;
pub mod snapshot;
pub mod types;

pub use error::{ModelError, Result};
pub use ids::{ClassHandle, EnumHandle};
pub use registry::{GLOBAL_SCOPE_NAME, InMemoryRegistry, InMemoryScope, SchemaRegistry, TypeScope};
pub use snapshot::{RegistrySnapshot, ScopeSnapshot, load_snapshot, parse_snapshot};
pub use types::{
    BaseClassInfo, ClassInfo, EnumInfo, EnumeratorInfo, FieldInfo, MetadataEntry,
    MetadataPayload, TypeInfo,
};
