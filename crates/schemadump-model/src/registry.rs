//! Traversal contract for the schema registry.
//!
//! Iteration order everywhere is whatever the registry reports. It is not
//! sorted and callers must not assume it is stable across runs.

use std::collections::HashMap;

use crate::ids::{ClassHandle, EnumHandle};
use crate::types::{ClassInfo, EnumInfo};

/// Name given to the implicit global scope.
pub const GLOBAL_SCOPE_NAME: &str = "!GlobalTypes";

/// One named grouping of type definitions.
pub trait TypeScope {
    fn name(&self) -> &str;

    /// Class handles in registry enumeration order.
    fn class_handles(&self) -> Vec<ClassHandle>;

    fn class(&self, handle: ClassHandle) -> Option<&ClassInfo>;

    /// Enum handles in registry enumeration order.
    fn enum_handles(&self) -> Vec<EnumHandle>;

    fn enum_binding(&self, handle: EnumHandle) -> Option<&EnumInfo>;
}

/// Read-only view of a registry: every named scope plus the global scope.
pub trait SchemaRegistry {
    type Scope: TypeScope;

    /// Named scopes in registry enumeration order (global scope excluded).
    fn scopes(&self) -> impl Iterator<Item = &Self::Scope>;

    fn global_scope(&self) -> &Self::Scope;
}

/// Insertion-ordered scope; insertion order is the enumeration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScope {
    name: String,
    classes: Vec<(ClassHandle, ClassInfo)>,
    class_index: HashMap<ClassHandle, usize>,
    enums: Vec<(EnumHandle, EnumInfo)>,
    enum_index: HashMap<EnumHandle, usize>,
    next_handle: u32,
}

impl InMemoryScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_class(&mut self, class: ClassInfo) -> ClassHandle {
        let handle = ClassHandle::new(self.allocate_handle());
        self.class_index.insert(handle, self.classes.len());
        self.classes.push((handle, class));
        handle
    }

    pub fn add_enum(&mut self, binding: EnumInfo) -> EnumHandle {
        let handle = EnumHandle::new(self.allocate_handle());
        self.enum_index.insert(handle, self.enums.len());
        self.enums.push((handle, binding));
        handle
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.iter().map(|(_, class)| class)
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumInfo> {
        self.enums.iter().map(|(_, binding)| binding)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    fn allocate_handle(&mut self) -> u32 {
        let raw = self.next_handle;
        self.next_handle += 1;
        raw
    }
}

impl TypeScope for InMemoryScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_handles(&self) -> Vec<ClassHandle> {
        self.classes.iter().map(|(handle, _)| *handle).collect()
    }

    fn class(&self, handle: ClassHandle) -> Option<&ClassInfo> {
        let index = *self.class_index.get(&handle)?;
        self.classes.get(index).map(|(_, class)| class)
    }

    fn enum_handles(&self) -> Vec<EnumHandle> {
        self.enums.iter().map(|(handle, _)| *handle).collect()
    }

    fn enum_binding(&self, handle: EnumHandle) -> Option<&EnumInfo> {
        let index = *self.enum_index.get(&handle)?;
        self.enums.get(index).map(|(_, binding)| binding)
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryRegistry {
    scopes: Vec<InMemoryScope>,
    global: InMemoryScope,
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            global: InMemoryScope::new(GLOBAL_SCOPE_NAME),
        }
    }

    /// Append a named scope and return it for filling.
    pub fn add_scope(&mut self, name: impl Into<String>) -> &mut InMemoryScope {
        self.scopes.push(InMemoryScope::new(name));
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Register an already-built scope.
    pub fn push_scope(&mut self, scope: InMemoryScope) {
        self.scopes.push(scope);
    }

    pub fn set_global_scope(&mut self, scope: InMemoryScope) {
        self.global = scope;
    }

    pub fn global_scope_mut(&mut self) -> &mut InMemoryScope {
        &mut self.global
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

impl SchemaRegistry for InMemoryRegistry {
    type Scope = InMemoryScope;

    fn scopes(&self) -> impl Iterator<Item = &InMemoryScope> {
        self.scopes.iter()
    }

    fn global_scope(&self) -> &InMemoryScope {
        &self.global
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_resolve_in_insertion_order() {
        let mut scope = InMemoryScope::new("client.dll");
        let zeta = scope.add_class(ClassInfo::new("Zeta", "client"));
        let alpha = scope.add_class(ClassInfo::new("Alpha", "client"));

        assert_eq!(scope.class_handles(), vec![zeta, alpha]);
        assert_eq!(scope.class(alpha).map(|c| c.name.as_str()), Some("Alpha"));
    }

    #[test]
    fn class_and_enum_handles_do_not_alias() {
        let mut scope = InMemoryScope::new("server.dll");
        let class = scope.add_class(ClassInfo::new("CEntity", "server"));
        let binding = scope.add_enum(EnumInfo::new("EFlags", "server", 4));

        assert_ne!(class.raw(), binding.raw());
        assert!(scope.enum_binding(EnumHandle::new(class.raw())).is_none());
        assert!(scope.class(ClassHandle::new(binding.raw())).is_none());
    }

    #[test]
    fn global_scope_is_not_enumerated() {
        let mut registry = InMemoryRegistry::new();
        registry.add_scope("client.dll");
        registry
            .global_scope_mut()
            .add_class(ClassInfo::new("Vector", "mathlib"));

        let names: Vec<&str> = registry.scopes().map(TypeScope::name).collect();
        assert_eq!(names, vec!["client.dll"]);
        assert_eq!(registry.global_scope().name(), GLOBAL_SCOPE_NAME);
        assert_eq!(registry.global_scope().class_count(), 1);
    }
}
