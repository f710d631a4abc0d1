//! Metadata entry classification and value formatting.
//!
//! A metadata entry carries no type tag. Its payload is interpreted by
//! looking up the FNV-1a hash of the entry name in a static classification
//! table. Entries whose name is not in the table are rendered without a
//! value.
//!
//! | Kind          | Payload                              | Rendering            |
//! |---------------|--------------------------------------|----------------------|
//! | String        | NUL-terminated string                | `"text"`             |
//! | Integer       | 4 bytes, signed 32-bit               | `-12`                |
//! | Float         | 4 bytes, IEEE-754 single             | `1.500000`           |
//! | InlineString  | up to 8 raw bytes, optional NUL      | `"text"`             |

use schemadump_model::{MetadataEntry, MetadataPayload};
use tracing::debug;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Maximum length of an inline string payload.
pub const INLINE_STRING_LEN: usize = 8;

/// 32-bit FNV-1a hash.
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// How a metadata payload is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    String,
    Integer,
    Float,
    InlineString,
}

impl MetadataKind {
    /// Decode a payload as this kind.
    ///
    /// Returns `None` when the payload is too short to hold the value.
    pub fn decode(self, payload: &MetadataPayload) -> Option<String> {
        let bytes = payload.as_bytes();
        match self {
            Self::String => Some(quote(until_nul(bytes))),
            Self::Integer => read_word(bytes).map(|word| i32::from_ne_bytes(word).to_string()),
            Self::Float => read_word(bytes).map(|word| format_float(f32::from_ne_bytes(word))),
            Self::InlineString => {
                let window = &bytes[..bytes.len().min(INLINE_STRING_LEN)];
                Some(quote(until_nul(window)))
            }
        }
    }
}

const STRING_ENTRIES: &[&str] = &[
    "MCellForDomain",
    "MCustomFGDMetadata",
    "MFieldVerificationName",
    "MKV3TransferName",
    "MNetworkAlias",
    "MNetworkChangeCallback",
    "MNetworkEncoder",
    "MNetworkExcludeByName",
    "MNetworkExcludeByUserGroup",
    "MNetworkIncludeByName",
    "MNetworkIncludeByUserGroup",
    "MNetworkReplayCompatField",
    "MNetworkSerializer",
    "MNetworkTypeAlias",
    "MNetworkUserGroup",
    "MNetworkUserGroupProxy",
    "MNetworkVarTypeOverride",
    "MParticleReplacementOp",
    "MPropertyAttributeChoiceName",
    "MPropertyAttributeEditor",
    "MPropertyAttributeRange",
    "MPropertyAttributeSuggestionName",
    "MPropertyCustomEditor",
    "MPropertyCustomFGDType",
    "MPropertyDescription",
    "MPropertyExtendedEditor",
    "MPropertyFriendlyName",
    "MPropertyGroupName",
    "MPropertyIconName",
    "MPropertyStartGroup",
    "MPropertySuppressExpr",
    "MPropertySuppressField",
    "MScriptDescription",
    "MVDataOutlinerIcon",
    "MVDataUniqueMonotonicInt",
];

const INTEGER_ENTRIES: &[&str] = &[
    "MNetworkBitCount",
    "MNetworkEncodeFlags",
    "MNetworkPriority",
    "MNetworkVarEmbeddedFieldOffsetDelta",
    "MPropertySortPriority",
];

const FLOAT_ENTRIES: &[&str] = &["MNetworkMaxValue", "MNetworkMinValue"];

const INLINE_STRING_ENTRIES: &[&str] = &["MResourceBlockType", "MResourceTypeForInfoType"];

/// Lookup order; a hash present in two groups resolves to the earlier one.
const GROUPS: [(&[&str], MetadataKind); 4] = [
    (STRING_ENTRIES, MetadataKind::String),
    (INTEGER_ENTRIES, MetadataKind::Integer),
    (FLOAT_ENTRIES, MetadataKind::Float),
    (INLINE_STRING_ENTRIES, MetadataKind::InlineString),
];

const TABLE_LEN: usize =
    STRING_ENTRIES.len() + INTEGER_ENTRIES.len() + FLOAT_ENTRIES.len() + INLINE_STRING_ENTRIES.len();

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub name: &'static str,
    pub hash: u32,
    pub kind: MetadataKind,
}

/// Name-hash → kind table, in lookup order.
pub static CLASSIFICATIONS: [Classification; TABLE_LEN] = build_classifications();

const fn build_classifications() -> [Classification; TABLE_LEN] {
    let mut table = [Classification {
        name: "",
        hash: 0,
        kind: MetadataKind::String,
    }; TABLE_LEN];
    let mut slot = 0;
    let mut group = 0;
    while group < GROUPS.len() {
        let (names, kind) = GROUPS[group];
        let mut i = 0;
        while i < names.len() {
            table[slot] = Classification {
                name: names[i],
                hash: fnv1a_32(names[i].as_bytes()),
                kind,
            };
            slot += 1;
            i += 1;
        }
        group += 1;
    }
    table
}

/// Classify a metadata entry name.
pub fn classify(name: &str) -> Option<MetadataKind> {
    classify_hash(fnv1a_32(name.as_bytes()))
}

/// Classify a precomputed name hash.
pub fn classify_hash(hash: u32) -> Option<MetadataKind> {
    CLASSIFICATIONS
        .iter()
        .find(|row| row.hash == hash)
        .map(|row| row.kind)
}

/// Render the value of a metadata entry, or `None` when it has no
/// displayable value.
pub fn format_metadata_value(entry: &MetadataEntry) -> Option<String> {
    let kind = classify(&entry.name)?;
    let value = kind.decode(&entry.payload);
    if value.is_none() {
        debug!(
            entry = %entry.name,
            ?kind,
            payload_len = entry.payload.len(),
            "metadata payload too short"
        );
    }
    value
}

fn read_word(bytes: &[u8]) -> Option<[u8; 4]> {
    bytes.get(..4)?.try_into().ok()
}

/// Fixed notation with six decimals; non-finite values print as `nan`,
/// `-nan`, `inf` and `-inf`.
fn format_float(value: f32) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_nan() {
        format!("{sign}nan")
    } else if value.is_infinite() {
        format!("{sign}inf")
    } else {
        format!("{value:.6}")
    }
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

fn quote(bytes: &[u8]) -> String {
    format!("\"{}\"", String::from_utf8_lossy(bytes))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn entry(name: &str, payload: MetadataPayload) -> MetadataEntry {
        MetadataEntry::new(name, payload)
    }

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(fnv1a_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn table_hashes_are_unique() {
        let mut seen = HashSet::new();
        for row in &CLASSIFICATIONS {
            assert!(seen.insert(row.hash), "duplicate hash for {}", row.name);
        }
    }

    #[test]
    fn every_table_row_classifies_to_its_kind() {
        for row in &CLASSIFICATIONS {
            assert_eq!(classify(row.name), Some(row.kind), "{}", row.name);
        }
    }

    #[test]
    fn string_entry_is_quoted() {
        let value = format_metadata_value(&entry(
            "MNetworkChangeCallback",
            MetadataPayload::c_string("OnHealthChanged"),
        ));
        assert_eq!(value.as_deref(), Some("\"OnHealthChanged\""));
    }

    #[test]
    fn integer_entry_is_decimal() {
        let value = format_metadata_value(&entry("MNetworkBitCount", MetadataPayload::from_i32(-12)));
        assert_eq!(value.as_deref(), Some("-12"));
    }

    #[test]
    fn integer_reads_exactly_four_bytes() {
        let mut bytes = 7i32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, 0xff]);
        let value = format_metadata_value(&entry("MNetworkPriority", MetadataPayload::new(bytes)));
        assert_eq!(value.as_deref(), Some("7"));
    }

    #[test]
    fn float_entry_uses_six_decimals() {
        let value = format_metadata_value(&entry("MNetworkMinValue", MetadataPayload::from_f32(1.5)));
        assert_eq!(value.as_deref(), Some("1.500000"));
        let value = format_metadata_value(&entry("MNetworkMaxValue", MetadataPayload::from_f32(-0.25)));
        assert_eq!(value.as_deref(), Some("-0.250000"));
    }

    #[test]
    fn non_finite_floats_use_lowercase_names() {
        let render = |value: f32| {
            format_metadata_value(&entry("MNetworkMinValue", MetadataPayload::from_f32(value)))
        };
        assert_eq!(render(f32::NAN).as_deref(), Some("nan"));
        assert_eq!(render(-f32::NAN).as_deref(), Some("-nan"));
        assert_eq!(render(f32::INFINITY).as_deref(), Some("inf"));
        assert_eq!(render(f32::NEG_INFINITY).as_deref(), Some("-inf"));
    }

    #[test]
    fn inline_string_stops_at_terminator() {
        let value = format_metadata_value(&entry(
            "MResourceTypeForInfoType",
            MetadataPayload::new(b"AB\0garbage".to_vec()),
        ));
        assert_eq!(value.as_deref(), Some("\"AB\""));
    }

    #[test]
    fn inline_string_without_terminator_uses_eight_bytes() {
        let value = format_metadata_value(&entry(
            "MResourceTypeForInfoType",
            MetadataPayload::new(b"vmdl_c__extra".to_vec()),
        ));
        assert_eq!(value.as_deref(), Some("\"vmdl_c__\""));
    }

    #[test]
    fn unknown_entry_has_no_value() {
        let value = format_metadata_value(&entry("MNetworkEnable", MetadataPayload::from_i32(1)));
        assert_eq!(value, None);
    }

    #[test]
    fn short_numeric_payload_has_no_value() {
        let value = format_metadata_value(&entry("MNetworkBitCount", MetadataPayload::new(vec![1, 2])));
        assert_eq!(value, None);
    }
}
