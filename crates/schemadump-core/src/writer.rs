//! Text rendering of class and enum definitions.
//!
//! Class artifact:
//!
//! ```text
//! // <class metadata>
//! class Name : public Base
//! {
//! 	// <field metadata>
//! 	Type field;
//! };
//! ```
//!
//! Enum artifact:
//!
//! ```text
//! // <enum metadata>
//! enum Name : uint32_t
//! {
//! 	// <enumerator metadata>
//! 	VALUE = 1,
//! };
//! ```

use schemadump_model::{ClassInfo, EnumInfo, MetadataEntry};

use crate::metadata::format_metadata_value;
use crate::sink::IdentifierSink;

/// Underlying type text for an alignment outside 1/2/4/8.
pub const UNKNOWN_ALIGNMENT_TYPE: &str = "unknown alignment type";

/// Replace scope separators so the name fits in one path segment.
///
/// A `::` separator becomes a single `_`; any stray `:` becomes `_` as well.
/// `A::B` and `A:B` therefore share the stem `A_B`, and when both exist in
/// one project the later one overwrites the earlier artifact.
pub fn sanitize_type_name(name: &str) -> String {
    name.replace("::", "_").replace(':', "_")
}

/// Unsigned integer type matching an enum's storage width.
pub fn underlying_type_name(alignment: u8) -> &'static str {
    match alignment {
        1 => "uint8_t",
        2 => "uint16_t",
        4 => "uint32_t",
        8 => "uint64_t",
        _ => UNKNOWN_ALIGNMENT_TYPE,
    }
}

/// Append one `// name[ = value]` comment line.
pub fn write_metadata_comment(out: &mut String, entry: &MetadataEntry, indent: bool) {
    if indent {
        out.push('\t');
    }
    out.push_str("// ");
    out.push_str(&entry.name);
    if let Some(value) = format_metadata_value(entry) {
        out.push_str(" = ");
        out.push_str(&value);
    }
    out.push('\n');
}

/// Render a class definition. The class name and every field name are
/// appended to `identifiers` in emission order.
pub fn render_class(class: &ClassInfo, identifiers: &mut dyn IdentifierSink) -> String {
    let mut out = String::new();
    for entry in &class.metadata {
        write_metadata_comment(&mut out, entry, false);
    }

    out.push_str("class ");
    out.push_str(&class.name);
    identifiers.append_line(&class.name);

    if let Some(base) = class.first_base() {
        out.push_str(" : public ");
        out.push_str(&base.name);
    }
    out.push_str("\n{\n");

    for field in &class.fields {
        for entry in &field.metadata {
            write_metadata_comment(&mut out, entry, true);
        }
        out.push('\t');
        out.push_str(&field.type_info.type_name);
        out.push(' ');
        out.push_str(&field.name);
        out.push_str(";\n");
        identifiers.append_line(&field.name);
    }

    out.push_str("};\n");
    out
}

/// Render an enum definition. The enum name and every enumerator name are
/// appended to `identifiers` in emission order.
pub fn render_enum(binding: &EnumInfo, identifiers: &mut dyn IdentifierSink) -> String {
    let mut out = String::new();
    for entry in &binding.metadata {
        write_metadata_comment(&mut out, entry, false);
    }

    out.push_str("enum ");
    out.push_str(&binding.name);
    out.push_str(" : ");
    identifiers.append_line(&binding.name);
    out.push_str(underlying_type_name(binding.alignment));
    out.push_str("\n{\n");

    for enumerator in &binding.enumerators {
        for entry in &enumerator.metadata {
            write_metadata_comment(&mut out, entry, true);
        }
        out.push('\t');
        out.push_str(&enumerator.name);
        out.push_str(" = ");
        out.push_str(&enumerator.value.to_string());
        out.push_str(",\n");
        identifiers.append_line(&enumerator.name);
    }

    out.push_str("};\n");
    out
}
