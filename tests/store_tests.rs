//! Filesystem store tests, with the in-memory store exercised through
//! the same trait for parity.

use tempfile::TempDir;
use xsdform::store::{ByteStore, EntryKind, FsStore, MemoryStore, Resource};

fn fs_store() -> (TempDir, FsStore) {
    let dir = TempDir::new().unwrap();
    let store = FsStore::new(dir.path());
    (dir, store)
}

#[test]
fn fs_store_put_and_get() {
    let (_dir, mut store) = fs_store();

    store.put("person.xsd", b"<schema/>").unwrap();
    match store.get("person.xsd").unwrap() {
        Resource::File(bytes) => assert_eq!(bytes, b"<schema/>"),
        other => panic!("expected a file, got {:?}", other),
    }
}

#[test]
fn fs_store_listing_orders_dirs_before_files() {
    let (_dir, mut store) = fs_store();

    store.put("zeta.xsd", b"z").unwrap();
    store.mkdir("drafts").unwrap();
    store.put("alpha.xsd", b"a").unwrap();
    store.mkdir("archive").unwrap();

    let Resource::Directory(entries) = store.get("").unwrap() else {
        panic!("expected a directory");
    };
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["archive", "drafts", "alpha.xsd", "zeta.xsd"]);
    assert_eq!(entries[0].kind, EntryKind::Directory);
    assert_eq!(entries[3].kind, EntryKind::File);
}

#[test]
fn fs_store_listing_paths_are_store_relative() {
    let (_dir, mut store) = fs_store();

    store.mkdir("schemas").unwrap();
    store.put("schemas/person.xsd", b"<schema/>").unwrap();

    let Resource::Directory(entries) = store.get("schemas").unwrap() else {
        panic!("expected a directory");
    };
    assert_eq!(entries[0].path, "schemas/person.xsd");
}

#[test]
fn fs_store_normalizes_dot_segments() {
    let (_dir, mut store) = fs_store();

    store.mkdir("schemas").unwrap();
    store.put("schemas/./sub/../person.xsd", b"<schema/>").unwrap();
    assert!(matches!(
        store.get("schemas/person.xsd").unwrap(),
        Resource::File(_)
    ));
}

#[test]
fn fs_store_rejects_escape_above_root() {
    let (_dir, mut store) = fs_store();

    assert!(store.get("../outside").is_err());
    assert!(store.put("../outside.xsd", b"x").is_err());
    assert!(store.mkdir("../outside").is_err());
    assert!(store.delete("../outside").is_err());
}

#[test]
fn fs_store_put_requires_parent_directory() {
    let (_dir, mut store) = fs_store();
    assert!(store.put("missing/person.xsd", b"x").is_err());
}

#[test]
fn fs_store_mkdir_requires_parent_directory() {
    let (_dir, mut store) = fs_store();
    assert!(store.mkdir("a/b").is_err());
    store.mkdir("a").unwrap();
    store.mkdir("a/b").unwrap();
}

#[test]
fn fs_store_missing_resource() {
    let (_dir, store) = fs_store();
    assert!(store.get("nowhere.xsd").is_err());
}

#[test]
fn fs_store_delete_file_and_directory() {
    let (_dir, mut store) = fs_store();

    store.mkdir("schemas").unwrap();
    store.put("schemas/person.xsd", b"<schema/>").unwrap();

    store.delete("schemas/person.xsd").unwrap();
    assert!(store.get("schemas/person.xsd").is_err());

    store.put("schemas/other.xsd", b"<schema/>").unwrap();
    store.delete("schemas").unwrap();
    assert!(store.get("schemas").is_err());
}

#[test]
fn fs_store_cannot_delete_root() {
    let (_dir, mut store) = fs_store();
    assert!(store.delete("").is_err());
    assert!(store.delete("/").is_err());
}

#[test]
fn memory_store_matches_fs_store_behavior() {
    let (_dir, mut fs) = fs_store();
    let mut mem = MemoryStore::new();

    for store in [&mut fs as &mut dyn ByteStore, &mut mem as &mut dyn ByteStore] {
        store.mkdir("schemas").unwrap();
        store.put("schemas/person.xsd", b"<schema/>").unwrap();

        let Resource::Directory(entries) = store.get("schemas").unwrap() else {
            panic!("expected a directory");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "person.xsd");

        store.delete("schemas").unwrap();
        assert!(store.get("schemas/person.xsd").is_err());
    }
}
