//! Tests for loading registry snapshots from disk.

use std::fs;

use schemadump_model::{
    GLOBAL_SCOPE_NAME, MetadataPayload, ModelError, SchemaRegistry, TypeScope, load_snapshot,
};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "scopes": [
    {
      "name": "client.dll",
      "classes": [
        {
          "name": "C_BaseEntity",
          "project": "client",
          "base_classes": [{ "name": "CEntityInstance" }],
          "fields": [
            {
              "name": "m_iHealth",
              "type": { "type_name": "int32" },
              "metadata": [{ "name": "MNetworkEnable" }]
            }
          ],
          "metadata": [{ "name": "MNetworkPriority", "payload": "20000000" }]
        }
      ],
      "enums": [
        {
          "name": "MoveType_t",
          "project": "client",
          "alignment": 1,
          "enumerators": [{ "name": "MOVETYPE_NONE", "value": 0 }]
        }
      ]
    }
  ]
}"#;

#[test]
fn loads_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry.json");
    fs::write(&path, SNAPSHOT).unwrap();

    let registry = load_snapshot(&path).expect("load snapshot").into_registry();

    let scope = registry.scopes().next().expect("one scope");
    assert_eq!(scope.name(), "client.dll");
    let handle = scope.class_handles()[0];
    let class = scope.class(handle).expect("class");
    assert_eq!(class.name, "C_BaseEntity");
    assert_eq!(class.base_classes[0].name, "CEntityInstance");
    assert_eq!(class.fields[0].type_info.type_name, "int32");
    assert!(class.fields[0].metadata[0].payload.is_empty());
    assert_eq!(class.metadata[0].payload, MetadataPayload::new(vec![0x20, 0, 0, 0]));

    let binding = scope.enum_binding(scope.enum_handles()[0]).expect("enum");
    assert_eq!(binding.alignment, 1);
    assert_eq!(binding.enumerators[0].name, "MOVETYPE_NONE");

    assert_eq!(registry.global_scope().name(), GLOBAL_SCOPE_NAME);
}

#[test]
fn missing_snapshot_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, ModelError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_payload_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"scopes": [{"name": "s", "classes": [{"name": "A", "project": "p",
            "metadata": [{"name": "MNetworkPriority", "payload": "xyz"}]}]}]}"#,
    )
    .unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, ModelError::Parse { .. }));
}
