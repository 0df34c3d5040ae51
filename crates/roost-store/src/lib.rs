pub mod document;

pub use document::Document;

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage read/write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored document is malformed: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Single-file document store.
///
/// One process-wide `RwLock` guards the whole load-mutate-persist span, so
/// every [`Store::update`] is atomic with respect to every other operation
/// and reads observe a prefix of completed writes. All writes serialize
/// behind the one lock; there is no per-collection locking.
pub struct Store {
    path: PathBuf,
    lock: RwLock<()>,
}

impl Store {
    /// Open the store, creating an empty backing file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => fs::write(&path, b"")?,
            Err(e) => return Err(e.into()),
        }
        info!("store opened at {}", path.display());
        Ok(Self {
            path,
            lock: RwLock::new(()),
        })
    }

    /// Run a pure read against the current document under the shared lock.
    pub fn read<T, E>(&self, op: impl FnOnce(&Document) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        let doc = self.load()?;
        op(&doc)
    }

    /// Run a read-modify-write under the exclusive lock.
    ///
    /// The mutated document is persisted only when `op` succeeds; on error
    /// the in-memory copy is discarded and disk keeps the last successful
    /// write, so a failed operation leaves no partial state behind.
    pub fn update<T, E>(&self, op: impl FnOnce(&mut Document) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        let mut doc = self.load()?;
        let out = op(&mut doc)?;
        self.persist(&doc)?;
        Ok(out)
    }

    fn load(&self) -> Result<Document, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            // First use: behave as if an empty document had been persisted.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(e.into()),
        };
        if data.is_empty() {
            return Ok(Document::default());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    fn persist(&self, doc: &Document) -> Result<(), StoreError> {
        let data = serde_json::to_vec(doc)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn open_in(dir: &tempfile::TempDir) -> Store {
        Store::open(dir.path().join("roost.json")).unwrap()
    }

    #[test]
    fn fresh_store_loads_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir);
        let count = store
            .read(|doc| Ok::<_, StoreError>(doc.chirps.len() + doc.users.len()))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn persisted_document_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir);

        let written = store
            .update(|doc| {
                doc.create_user("alice@example.com", "digest".into());
                doc.create_chirp(1, "first".into());
                doc.create_chirp(1, "second".into());
                doc.refresh_tokens.insert(
                    "aa".repeat(32),
                    roost_types::models::RefreshToken {
                        user_id: 1,
                        expires_at: 4_000_000_000,
                    },
                );
                Ok::<_, StoreError>(doc.clone())
            })
            .unwrap();

        // A second handle sees exactly what was persisted, counters included.
        let reopened = open_in(&dir);
        let loaded = reopened
            .read(|doc| Ok::<_, StoreError>(doc.clone()))
            .unwrap();
        assert_eq!(loaded, written);
        assert_eq!(loaded.chirp_id, 2);
        assert_eq!(loaded.user_id, 1);
    }

    #[test]
    fn malformed_backing_file_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roost.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = Store::open(&path).unwrap();
        let err = store
            .read(|doc| Ok::<_, StoreError>(doc.users.len()))
            .unwrap_err();
        assert!(matches!(err, StoreError::Encoding(_)));
    }

    #[test]
    fn failed_update_leaves_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir);
        store
            .update(|doc| {
                doc.create_chirp(1, "kept".into());
                Ok::<_, StoreError>(())
            })
            .unwrap();

        let err = store
            .update(|doc| {
                doc.create_chirp(1, "discarded".into());
                Err::<(), StoreError>(StoreError::Poisoned)
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Poisoned));

        let chirps = store
            .read(|doc| Ok::<_, StoreError>(doc.chirps_sorted()))
            .unwrap();
        assert_eq!(chirps.len(), 1);
        assert_eq!(chirps[0].body, "kept");
    }

    #[test]
    fn concurrent_creates_yield_distinct_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(open_in(&dir));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..5 {
                    store
                        .update(|doc| {
                            doc.create_chirp(1, "hi".into());
                            Ok::<_, StoreError>(())
                        })
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let chirps = store
            .read(|doc| Ok::<_, StoreError>(doc.chirps_sorted()))
            .unwrap();
        let ids: Vec<u64> = chirps.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=40).collect::<Vec<_>>());
    }
}
