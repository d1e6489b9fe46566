use chrono::{Duration, Utc};
use tempfile::TempDir;

use super::*;
use crate::canonical::canonicalize;
use crate::record::{AssessmentRecord, RecordStatus};

async fn exercise_backend<S: KvStore>(store: &S) {
    assert_eq!(store.get("missing").await.unwrap(), None);

    store.set("assessment:b", b"two".to_vec()).await.unwrap();
    store.set("assessment:a", b"one".to_vec()).await.unwrap();
    store.set("other:a", b"x".to_vec()).await.unwrap();

    assert_eq!(
        store.get("assessment:a").await.unwrap().as_deref(),
        Some(&b"one"[..])
    );

    let listed = store.get_by_prefix("assessment:").await.unwrap();
    let keys: Vec<_> = listed.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["assessment:a", "assessment:b"]);

    store.set("assessment:a", b"uno".to_vec()).await.unwrap();
    assert_eq!(
        store.get("assessment:a").await.unwrap().as_deref(),
        Some(&b"uno"[..])
    );

    assert!(store.del("assessment:a").await.unwrap());
    assert!(!store.del("assessment:a").await.unwrap());
    assert_eq!(store.get_by_prefix("assessment:").await.unwrap().len(), 1);
    assert_eq!(store.get_by_prefix("nothing:").await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_memory_store_contract() {
    exercise_backend(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_store_clones_share_state() {
    let store = MemoryStore::new();
    let clone = store.clone();
    clone.set("k", vec![1]).await.unwrap();
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_file_store_contract() {
    let dir = TempDir::new().unwrap();
    exercise_backend(&FileStore::new(dir.path())).await;
}

#[tokio::test]
async fn test_file_store_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested").join("records");
    let store = FileStore::new(&root);

    assert!(store.get_by_prefix("").await.unwrap().is_empty());
    store.set("k", vec![7]).await.unwrap();
    assert!(root.is_dir());
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    FileStore::new(dir.path())
        .set("assessment:x", b"payload".to_vec())
        .await
        .unwrap();

    let reopened = FileStore::new(dir.path());
    assert_eq!(
        reopened.get("assessment:x").await.unwrap().as_deref(),
        Some(&b"payload"[..])
    );
}

#[tokio::test]
async fn test_file_store_ignores_temp_and_foreign_files() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    store.set("k", vec![1]).await.unwrap();

    std::fs::write(dir.path().join("6b.json.tmp"), b"partial").unwrap();
    std::fs::write(dir.path().join("6b.0123abcd.tmp"), b"partial").unwrap();
    std::fs::write(dir.path().join("README"), b"notes").unwrap();
    std::fs::write(dir.path().join("zz.json"), b"bad name").unwrap();

    let listed = store.get_by_prefix("").await.unwrap();
    assert_eq!(listed, vec![("k".to_string(), vec![1])]);
}

#[tokio::test]
async fn test_file_store_concurrent_writes_to_one_key() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());

    let writers: Vec<_> = (0u8..16)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.set("shared", vec![i; 64]).await })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let value = store.get("shared").await.unwrap().unwrap();
    assert_eq!(value.len(), 64);
    assert!(value.iter().all(|b| *b == value[0]));
    assert!(value[0] < 16);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

fn record(filename: &str, content: &str) -> AssessmentRecord {
    AssessmentRecord::processing(filename, &canonicalize(content), None)
}

fn complete(mut record: AssessmentRecord, minutes_ago: i64) -> AssessmentRecord {
    record.status = RecordStatus::Complete;
    record.upload_timestamp = Utc::now() - Duration::minutes(minutes_ago);
    record
}

#[tokio::test]
async fn test_repository_round_trip_and_delete() {
    let repo = AssessmentRepository::new(MemoryStore::new());
    let rec = record("a.txt", "some content here");

    repo.put(&rec).await.unwrap();
    assert_eq!(repo.get(&rec.id).await.unwrap(), Some(rec.clone()));
    assert!(repo.store().get(&format!("assessment:{}", rec.id)).await.unwrap().is_some());

    assert!(repo.delete(&rec.id).await.unwrap());
    assert_eq!(repo.get(&rec.id).await.unwrap(), None);
    assert!(!repo.delete(&rec.id).await.unwrap());
}

#[tokio::test]
async fn test_repository_lists_complete_oldest_first() {
    let repo = AssessmentRepository::new(MemoryStore::new());
    let newer = complete(record("b.txt", "same words"), 1);
    let older = complete(record("a.txt", "same words"), 5);
    let pending = record("c.txt", "same words");

    for r in [&newer, &older, &pending] {
        repo.put(r).await.unwrap();
    }

    assert_eq!(repo.list().await.unwrap().len(), 3);

    let complete = repo.list_complete().await.unwrap();
    let ids: Vec<_> = complete.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, [older.id.as_str(), newer.id.as_str()]);

    let found = repo.find_complete_by_hash(older.content_hash()).await.unwrap();
    assert_eq!(found.map(|r| r.id), Some(older.id.clone()));
    assert!(repo.find_complete_by_hash("00000000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_repository_rejects_corrupt_entries() {
    let store = MemoryStore::new();
    store.set("assessment:bad", b"{not json".to_vec()).await.unwrap();
    let repo = AssessmentRepository::new(store);

    assert!(matches!(repo.get("bad").await, Err(StoreError::Serialization(_))));
    assert!(matches!(repo.list().await, Err(StoreError::Serialization(_))));
}
