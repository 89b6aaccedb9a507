//! Redirect store module
//!
//! Read adapter over an external LMDB key-value store: rows in a named
//! database are (path, url) string pairs. The serving path only ever reads;
//! the write path exists for provisioning and seeding. Every read happens
//! inside a read transaction scoped exactly to the call that needs it.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use lmdb_zero as lmdb;
use lmdb_zero::traits::CreateCursor;
use lmdb_zero::LmdbResultExt;
use thiserror::Error;

use super::map::PathEntry;

/// Room for a handful of named databases per environment.
const MAX_DBS: u32 = 8;

/// Store access failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened or read.
    #[error("redirect store unavailable: {0}")]
    Unavailable(String),
    /// The environment opened but the named collection does not exist in it.
    #[error("redirect store has no collection named '{0}'")]
    MissingCollection(String),
}

impl From<lmdb::error::Error> for StoreError {
    fn from(e: lmdb::error::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

/// Handle on one named collection of redirect rows.
///
/// An LMDB environment must only be opened once per process per directory;
/// construct a single store per configured source and share it.
pub struct RedirectStore {
    env: Arc<lmdb::Environment>,
    db: Arc<lmdb::Database<'static>>,
}

impl std::fmt::Debug for RedirectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectStore").finish_non_exhaustive()
    }
}

impl RedirectStore {
    /// Open an existing store for reading.
    ///
    /// Fails with [`StoreError::Unavailable`] when the environment cannot
    /// be opened and [`StoreError::MissingCollection`] when `collection`
    /// does not exist in it.
    pub fn open(root: &Path, collection: &str) -> Result<Self, StoreError> {
        let env = open_env(root)?;
        let db = match lmdb::Database::open(
            env.clone(),
            Some(collection),
            &lmdb::DatabaseOptions::defaults(),
        ) {
            Ok(db) => db,
            Err(lmdb::error::Error::Code(lmdb::error::NOTFOUND)) => {
                return Err(StoreError::MissingCollection(collection.to_owned()));
            }
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };
        Ok(Self {
            env,
            db: Arc::new(db),
        })
    }

    /// Open a store for provisioning, creating the environment directory
    /// and the named collection as needed.
    pub fn create(root: &Path, collection: &str) -> Result<Self, StoreError> {
        fs::create_dir_all(root)
            .map_err(|e| StoreError::Unavailable(format!("cannot create store directory: {e}")))?;
        let env = open_env(root)?;
        let db = lmdb::Database::open(
            env.clone(),
            Some(collection),
            &lmdb::DatabaseOptions::new(lmdb::db::CREATE),
        )?;
        Ok(Self {
            env,
            db: Arc::new(db),
        })
    }

    /// Write one (path, url) row, overwriting any existing row for the path.
    ///
    /// Provisioning and seeding only; nothing on the serving path calls
    /// this.
    pub fn put(&self, path: &str, url: &str) -> Result<(), StoreError> {
        let txn = lmdb::WriteTransaction::new(self.env.clone())?;
        txn.access().put(
            &self.db,
            path.as_bytes(),
            url.as_bytes(),
            lmdb::put::Flags::empty(),
        )?;
        txn.commit()?;
        Ok(())
    }

    /// Enumerate every row in one consistent read snapshot.
    ///
    /// The read transaction is scoped to this call and released on every
    /// exit path, error included. Enumeration order is whatever the store
    /// yields; callers must treat it as arbitrary. Keys are unique because
    /// the collection enforces key uniqueness and [`put`](Self::put)
    /// overwrites.
    pub fn read_all(&self) -> Result<Vec<PathEntry>, StoreError> {
        let txn = lmdb::ReadTransaction::new(self.env.clone())?;
        let access = txn.access();
        let mut cursor = txn.cursor(self.db.clone())?;

        let mut entries = Vec::new();
        let mut row = cursor.first::<[u8], [u8]>(&access).to_opt()?;
        while let Some((key, value)) = row {
            entries.push(PathEntry {
                path: String::from_utf8_lossy(key).into_owned(),
                url: String::from_utf8_lossy(value).into_owned(),
            });
            row = cursor.next::<[u8], [u8]>(&access).to_opt()?;
        }
        Ok(entries)
    }
}

fn open_env(root: &Path) -> Result<Arc<lmdb::Environment>, StoreError> {
    let path = root
        .to_str()
        .ok_or_else(|| StoreError::Unavailable("store path is not valid UTF-8".to_owned()))?;

    let mut builder = lmdb::EnvBuilder::new()?;
    builder.set_maxdbs(MAX_DBS)?;

    // lmdb requires the caller to guarantee the path outlives the
    // environment and is not opened twice within one process.
    let env = unsafe { builder.open(path, lmdb::open::NOTLS, 0o600) }
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    Ok(Arc::new(env))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_read_all() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedirectStore::create(dir.path(), "redirects").unwrap();
        store.put("/wiki", "https://www.wikipedia.org/").unwrap();

        let entries = store.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "/wiki");
        assert_eq!(entries[0].url, "https://www.wikipedia.org/");
    }

    #[test]
    fn test_put_overwrites_existing_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedirectStore::create(dir.path(), "redirects").unwrap();
        store.put("/wiki", "https://example.com/old").unwrap();
        store.put("/wiki", "https://example.com/new").unwrap();

        let entries = store.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://example.com/new");
    }

    #[test]
    fn test_fresh_collection_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedirectStore::create(dir.path(), "redirects").unwrap();
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_collection() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = RedirectStore::create(dir.path(), "redirects").unwrap();
            store.put("/wiki", "https://www.wikipedia.org/").unwrap();
        }

        let err = RedirectStore::open(dir.path(), "absent").unwrap_err();
        assert!(matches!(err, StoreError::MissingCollection(_)), "got {err:?}");
    }

    #[test]
    fn test_open_reads_rows_written_earlier() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = RedirectStore::create(dir.path(), "redirects").unwrap();
            store.put("/a", "https://example.com/a").unwrap();
            store.put("/b", "https://example.com/b").unwrap();
        }

        let store = RedirectStore::open(dir.path(), "redirects").unwrap();
        let mut paths: Vec<String> = store
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        paths.sort();
        assert_eq!(paths, vec!["/a".to_string(), "/b".to_string()]);
    }

    #[test]
    fn test_open_nonexistent_directory() {
        let err = RedirectStore::open(Path::new("/nonexistent/reroute-store"), "redirects")
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }
}
