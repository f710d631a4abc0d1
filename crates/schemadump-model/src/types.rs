//! Records exposed by the schema registry.
//!
//! All records are read-only snapshots of registry state. The "static
//! metadata count" the host keeps next to each metadata array is simply the
//! length of the corresponding `metadata` vector here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Raw bytes behind a metadata entry's untyped payload pointer.
///
/// The payload carries no type tag; its meaning is decided by the entry
/// name. For string-valued entries the host adapter stores the bytes of the
/// pointed-to NUL-terminated string instead of the pointer itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MetadataPayload(Vec<u8>);

impl MetadataPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Payload holding a 32-bit integer in native byte order.
    pub fn from_i32(value: i32) -> Self {
        Self(value.to_ne_bytes().to_vec())
    }

    /// Payload holding an IEEE-754 single in native byte order.
    pub fn from_f32(value: f32) -> Self {
        Self(value.to_ne_bytes().to_vec())
    }

    /// Payload holding a NUL-terminated string.
    pub fn c_string(value: &str) -> Self {
        let mut bytes = Vec::with_capacity(value.len() + 1);
        bytes.extend_from_slice(value.as_bytes());
        bytes.push(0);
        Self(bytes)
    }

    pub fn from_hex(value: &str) -> Result<Self, ModelError> {
        hex::decode(value)
            .map(Self)
            .map_err(|err| ModelError::InvalidPayload {
                value: value.to_string(),
                reason: err.to_string(),
            })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for MetadataPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for MetadataPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for MetadataPayload {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A name + payload annotation attached to a class, field, enum or enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    #[serde(default)]
    pub payload: MetadataPayload,
}

impl MetadataEntry {
    pub fn new(name: impl Into<String>, payload: MetadataPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Entry whose payload is not inspected (marker metadata).
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, MetadataPayload::empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub type_name: String,
}

impl TypeInfo {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl FieldInfo {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_info: TypeInfo::new(type_name),
            metadata: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, entry: MetadataEntry) -> Self {
        self.metadata.push(entry);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseClassInfo {
    #[serde(default)]
    pub offset: u32,
    pub name: String,
}

impl BaseClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            offset: 0,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub project: String,
    #[serde(default)]
    pub base_classes: Vec<BaseClassInfo>,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            base_classes: Vec::new(),
            fields: Vec::new(),
            metadata: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, name: impl Into<String>) -> Self {
        self.base_classes.push(BaseClassInfo::new(name));
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, entry: MetadataEntry) -> Self {
        self.metadata.push(entry);
        self
    }

    /// The base class rendered in the text form; later bases are dropped.
    pub fn first_base(&self) -> Option<&BaseClassInfo> {
        self.base_classes.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratorInfo {
    pub name: String,
    pub value: i64,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl EnumeratorInfo {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            metadata: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, entry: MetadataEntry) -> Self {
        self.metadata.push(entry);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumInfo {
    pub name: String,
    pub project: String,
    /// Storage width in bytes (1, 2, 4 or 8 for well-formed enums).
    pub alignment: u8,
    #[serde(default)]
    pub enumerators: Vec<EnumeratorInfo>,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl EnumInfo {
    pub fn new(name: impl Into<String>, project: impl Into<String>, alignment: u8) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            alignment,
            enumerators: Vec::new(),
            metadata: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_enumerator(mut self, enumerator: EnumeratorInfo) -> Self {
        self.enumerators.push(enumerator);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, entry: MetadataEntry) -> Self {
        self.metadata.push(entry);
        self
    }
}
