//! Implements `KeyValueStore` with one file per key inside a directory.

use crate::storage::{KeyValueStore, StoreError};
use std::fmt::Write;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::trace;

/// Stores each key in its own file under `root`. Writes go to a temporary sibling first and are
/// renamed over the target, so a reader never observes a half-written value.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileStore {
    /// Creates a store rooted at `root`. The directory is created on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tmp_counter: AtomicU64::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(file_name(key))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(format!("{}.{}.{n}.tmp", file_name(key), std::process::id()))
    }
}

/// Maps a key to a file name. ASCII letters, digits and `-` are kept, every other byte becomes
/// `_xx` (lower-case hex). The mapping is injective and the result never contains `.` or a path
/// separator.
fn file_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            name.push(char::from(byte));
        } else {
            // Writing to a String cannot fail
            let _ = write!(name, "_{byte:02x}");
        }
    }
    name
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        trace!("get '{key}' from {}", path.display());
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        trace!("set '{key}' at {}", path.display());
        let write_err = |path: &Path, source| StoreError::Write {
            key: key.to_string(),
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| write_err(&self.root, e))?;

        let tmp = self.tmp_path_for(key);
        fs::write(&tmp, value)
            .await
            .map_err(|e| write_err(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(write_err(&path, e));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        trace!("remove '{key}' at {}", path.display());
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }
}
