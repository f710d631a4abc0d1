//! End-to-end tests for dumping a registry to the filesystem.

use std::fs;
use std::path::Path;

use schemadump_core::{DumpOptions, FsStore, LineWriterSink, MemoryStore, run_dump};
use schemadump_model::{
    ClassInfo, EnumInfo, EnumeratorInfo, FieldInfo, InMemoryRegistry, MetadataEntry,
    MetadataPayload,
};
use tempfile::TempDir;

fn widget_registry() -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();
    registry
        .add_scope("ui.dll")
        .add_class(ClassInfo::new("Widget", "UI").with_field(FieldInfo::new("int32", "count")));
    registry
}

fn dump_to(output: &Path, registry: &InMemoryRegistry) -> Vec<String> {
    let mut store = FsStore::new(output);
    let mut identifiers: Vec<String> = Vec::new();
    run_dump(registry, &mut store, &mut identifiers, &DumpOptions::default()).expect("dump");
    identifiers
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("read artifact")
}

#[test]
fn widget_class_round_trip() {
    let dir = TempDir::new().unwrap();
    let identifiers = dump_to(dir.path(), &widget_registry());

    let text = read(dir.path().join("schemas/UI/Widget.h"));
    assert_eq!(text, "class Widget\n{\n\tint32 count;\n};\n");
    assert_eq!(identifiers, vec!["Widget", "count"]);
}

#[test]
fn rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let mut registry = InMemoryRegistry::new();
    registry.add_scope("server.dll").add_class(
        ClassInfo::new("Foo::Bar", "server")
            .with_base("CBaseEntity")
            .with_field(FieldInfo::new("float32", "m_flValue")),
    );

    dump_to(dir.path(), &registry);
    let path = dir.path().join("schemas/server/Foo_Bar.h");
    let first = fs::read(&path).unwrap();
    dump_to(dir.path(), &registry);
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn stale_artifacts_and_projects_are_removed() {
    let dir = TempDir::new().unwrap();
    let schemas = dir.path().join("schemas");
    fs::create_dir_all(schemas.join("P")).unwrap();
    fs::create_dir_all(schemas.join("Removed/nested")).unwrap();
    fs::write(schemas.join("P/A.h"), "old A").unwrap();
    fs::write(schemas.join("P/B.h"), "old B").unwrap();
    fs::write(schemas.join("Removed/nested/X.h"), "x").unwrap();
    fs::write(schemas.join("notes.txt"), "kept").unwrap();

    let mut registry = InMemoryRegistry::new();
    registry
        .add_scope("p.dll")
        .add_class(ClassInfo::new("A", "P"));
    let mut store = FsStore::new(dir.path());
    let mut identifiers: Vec<String> = Vec::new();
    let summary =
        run_dump(&registry, &mut store, &mut identifiers, &DumpOptions::default()).unwrap();

    assert_eq!(read(schemas.join("P/A.h")), "class A\n{\n};\n");
    assert!(!schemas.join("P/B.h").exists());
    assert!(!schemas.join("Removed").exists());
    assert!(schemas.join("notes.txt").exists());
    assert_eq!(summary.sync.removed_projects, 1);
    assert_eq!(summary.sync.removed_artifacts, 1);
}

#[test]
fn subdirectories_in_live_projects_survive_sync() {
    let dir = TempDir::new().unwrap();
    let schemas = dir.path().join("schemas");
    fs::create_dir_all(schemas.join("UI/sub")).unwrap();
    fs::write(schemas.join("UI/sub/Orphan.h"), "kept").unwrap();

    let mut store = FsStore::new(dir.path());
    let mut identifiers: Vec<String> = Vec::new();
    let summary =
        run_dump(&widget_registry(), &mut store, &mut identifiers, &DumpOptions::default())
            .unwrap();

    assert!(schemas.join("UI/Widget.h").exists());
    assert_eq!(read(schemas.join("UI/sub/Orphan.h")), "kept");
    assert!(summary.plan.is_empty());
}

#[test]
fn live_sibling_projects_are_untouched() {
    let dir = TempDir::new().unwrap();
    let mut registry = InMemoryRegistry::new();
    let scope = registry.add_scope("client.dll");
    scope.add_class(ClassInfo::new("Kept", "client"));
    scope.add_class(ClassInfo::new("Dropped", "client"));
    scope.add_class(ClassInfo::new("Neighbour", "shared"));
    dump_to(dir.path(), &registry);
    let neighbour = fs::read(dir.path().join("schemas/shared/Neighbour.h")).unwrap();

    let mut registry = InMemoryRegistry::new();
    let scope = registry.add_scope("client.dll");
    scope.add_class(ClassInfo::new("Kept", "client"));
    scope.add_class(ClassInfo::new("Neighbour", "shared"));
    dump_to(dir.path(), &registry);

    let schemas = dir.path().join("schemas");
    assert!(!schemas.join("client/Dropped.h").exists());
    assert_eq!(read(schemas.join("client/Kept.h")), "class Kept\n{\n};\n");
    assert_eq!(fs::read(schemas.join("shared/Neighbour.h")).unwrap(), neighbour);
}

#[test]
fn renamed_type_replaces_old_artifact() {
    let dir = TempDir::new().unwrap();
    let mut before = InMemoryRegistry::new();
    before
        .add_scope("client.dll")
        .add_class(ClassInfo::new("COldName", "client"));
    dump_to(dir.path(), &before);

    let mut after = InMemoryRegistry::new();
    after
        .add_scope("client.dll")
        .add_class(ClassInfo::new("CNewName", "client"));
    dump_to(dir.path(), &after);

    let project = dir.path().join("schemas/client");
    assert!(!project.join("COldName.h").exists());
    assert!(project.join("CNewName.h").exists());
}

#[test]
fn enum_artifact_snapshot() {
    let mut registry = InMemoryRegistry::new();
    registry.add_scope("client.dll").add_enum(
        EnumInfo::new("MoveType_t", "client", 1)
            .with_metadata(MetadataEntry::new(
                "MPropertyFriendlyName",
                MetadataPayload::c_string("Move Type"),
            ))
            .with_enumerator(EnumeratorInfo::new("MOVETYPE_NONE", 0))
            .with_enumerator(
                EnumeratorInfo::new("MOVETYPE_WALK", 2).with_metadata(MetadataEntry::new(
                    "MNetworkMaxValue",
                    MetadataPayload::from_f32(2.0),
                )),
            ),
    );

    let mut store = MemoryStore::new();
    let mut identifiers: Vec<String> = Vec::new();
    run_dump(&registry, &mut store, &mut identifiers, &DumpOptions::default()).unwrap();

    let text = store.artifact("client", "MoveType_t").expect("artifact").to_string();
    insta::assert_snapshot!(text, @r#"
// MPropertyFriendlyName = "Move Type"
enum MoveType_t : uint8_t
{
	MOVETYPE_NONE = 0,
	// MNetworkMaxValue = 2.000000
	MOVETYPE_WALK = 2,
};
"#);
    assert_eq!(identifiers, vec!["MoveType_t", "MOVETYPE_NONE", "MOVETYPE_WALK"]);
}

#[test]
fn class_artifact_snapshot() {
    let mut registry = InMemoryRegistry::new();
    registry.add_scope("server.dll").add_class(
        ClassInfo::new("CBaseModelEntity", "server")
            .with_base("CBaseEntity")
            .with_base("IModelOwner")
            .with_metadata(MetadataEntry::flag("MNetworkVarNames"))
            .with_metadata(MetadataEntry::new(
                "MNetworkPriority",
                MetadataPayload::from_i32(32),
            ))
            .with_field(
                FieldInfo::new("CRenderComponent*", "m_CRenderComponent").with_metadata(
                    MetadataEntry::new(
                        "MResourceTypeForInfoType",
                        MetadataPayload::new(b"vmdl\0\xff\xff\xff".to_vec()),
                    ),
                ),
            )
            .with_field(FieldInfo::new("Color", "m_clrRender")),
    );

    let mut store = MemoryStore::new();
    let mut identifiers: Vec<String> = Vec::new();
    run_dump(&registry, &mut store, &mut identifiers, &DumpOptions::default()).unwrap();

    let text = store
        .artifact("server", "CBaseModelEntity")
        .expect("artifact")
        .to_string();
    insta::assert_snapshot!(text, @r#"
// MNetworkVarNames
// MNetworkPriority = 32
class CBaseModelEntity : public CBaseEntity
{
	// MResourceTypeForInfoType = "vmdl"
	CRenderComponent* m_CRenderComponent;
	Color m_clrRender;
};
"#);
}

#[test]
fn identifiers_stream_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identifiers.txt");
    let mut sink = LineWriterSink::new(fs::File::create(&path).unwrap());
    let mut store = FsStore::new(dir.path());

    run_dump(&widget_registry(), &mut store, &mut sink, &DumpOptions::default()).unwrap();
    assert_eq!(sink.into_result().unwrap(), 2);

    assert_eq!(read(&path), "Widget\ncount\n");
}

#[test]
fn unwritable_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();

    let mut store = FsStore::new(&blocker);
    let mut identifiers: Vec<String> = Vec::new();
    let err = run_dump(
        &widget_registry(),
        &mut store,
        &mut identifiers,
        &DumpOptions::default(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("failed to create output root"));
    assert!(identifiers.is_empty());
}
