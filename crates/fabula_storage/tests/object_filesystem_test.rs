//! Tests for the filesystem object store.

use fabula_interface::ObjectStore;
use fabula_storage::FileSystemObjectStore;
use tempfile::TempDir;

#[tokio::test]
async fn put_writes_bytes_and_returns_public_url() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemObjectStore::new(temp_dir.path(), "https://cdn.example.com/").unwrap();

    let url = store
        .put("projects/p1/hero/ai-hero-1.png", b"png-bytes", "image/png")
        .await
        .unwrap();

    assert_eq!(url, "https://cdn.example.com/projects/p1/hero/ai-hero-1.png");

    let written = std::fs::read(temp_dir.path().join("projects/p1/hero/ai-hero-1.png")).unwrap();
    assert_eq!(written, b"png-bytes");
}

#[tokio::test]
async fn distinct_keys_never_collide() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemObjectStore::new(temp_dir.path(), "https://cdn.example.com").unwrap();

    store.put("a/one.png", b"one", "image/png").await.unwrap();
    store.put("a/two.png", b"two", "image/png").await.unwrap();

    assert_eq!(
        std::fs::read(temp_dir.path().join("a/one.png")).unwrap(),
        b"one"
    );
    assert_eq!(
        std::fs::read(temp_dir.path().join("a/two.png")).unwrap(),
        b"two"
    );
}

#[tokio::test]
async fn escaping_keys_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemObjectStore::new(temp_dir.path(), "https://cdn.example.com").unwrap();

    assert!(store.put("../outside.png", b"x", "image/png").await.is_err());
    assert!(store.put("/absolute.png", b"x", "image/png").await.is_err());
    assert!(store.put("", b"x", "image/png").await.is_err());
}
