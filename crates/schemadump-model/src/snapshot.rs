//! JSON snapshots of registry contents.
//!
//! A host adapter serializes the live registry into a [`RegistrySnapshot`];
//! the dumper turns it back into an [`InMemoryRegistry`] with the same scope,
//! class and enum order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::registry::{GLOBAL_SCOPE_NAME, InMemoryRegistry, InMemoryScope, SchemaRegistry, TypeScope};
use crate::types::{ClassInfo, EnumInfo};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub enums: Vec<EnumInfo>,
}

impl ScopeSnapshot {
    fn into_scope(self, fallback_name: &str) -> InMemoryScope {
        let name = if self.name.is_empty() {
            fallback_name.to_string()
        } else {
            self.name
        };
        let mut scope = InMemoryScope::new(name);
        for class in self.classes {
            scope.add_class(class);
        }
        for binding in self.enums {
            scope.add_enum(binding);
        }
        scope
    }

    fn from_scope(scope: &InMemoryScope) -> Self {
        Self {
            name: scope.name().to_string(),
            classes: scope.classes().cloned().collect(),
            enums: scope.enums().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub scopes: Vec<ScopeSnapshot>,
    #[serde(default)]
    pub global: ScopeSnapshot,
}

impl RegistrySnapshot {
    pub fn into_registry(self) -> InMemoryRegistry {
        let mut registry = InMemoryRegistry::new();
        for (index, scope) in self.scopes.into_iter().enumerate() {
            registry.push_scope(scope.into_scope(&format!("scope{index}")));
        }
        registry.set_global_scope(self.global.into_scope(GLOBAL_SCOPE_NAME));
        registry
    }

    pub fn from_registry(registry: &InMemoryRegistry) -> Self {
        Self {
            scopes: registry.scopes().map(ScopeSnapshot::from_scope).collect(),
            global: ScopeSnapshot::from_scope(registry.global_scope()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a snapshot from JSON text.
pub fn parse_snapshot(text: &str) -> Result<RegistrySnapshot> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<RegistrySnapshot> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
