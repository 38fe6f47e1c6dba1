//! Key-value persistence behind the credential store
//!
//! The browser build persists into `window.localStorage`; native builds use a
//! small JSON file. Both sit behind [`KeyValueStore`] so the auth layer can be
//! exercised against [`MemoryStore`] in tests.

use crate::{CoreError, CoreResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// String key-value persistence capability
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `Ok(None)` when the key is missing
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Insert or overwrite a value
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> CoreResult<()>;
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::storage("memory store lock poisoned")
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> CoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{KeyValueStore, poisoned};
    use crate::CoreResult;
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tracing::debug;

    /// Store backed by a single JSON object on disk.
    ///
    /// Every write rewrites the whole file through a sibling temp file and a
    /// rename, so readers never see a half-written document.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        lock: Mutex<()>,
    }

    impl FileStore {
        /// Open a store at `path`. The file is created on first write.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                lock: Mutex::new(()),
            }
        }

        fn load(&self) -> CoreResult<BTreeMap<String, String>> {
            match fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn persist(&self, entries: &BTreeMap<String, String>) -> CoreResult<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }

            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
            fs::rename(&tmp, &self.path)?;
            debug!(path = %self.path.display(), keys = entries.len(), "Persisted store");
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> CoreResult<Option<String>> {
            let _guard = self.lock.lock().map_err(poisoned)?;
            Ok(self.load()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> CoreResult<()> {
            let _guard = self.lock.lock().map_err(poisoned)?;
            let mut entries = self.load()?;
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries)
        }

        fn delete(&self, key: &str) -> CoreResult<()> {
            let _guard = self.lock.lock().map_err(poisoned)?;
            let mut entries = self.load()?;
            if entries.remove(key).is_some() {
                self.persist(&entries)?;
            }
            Ok(())
        }
    }
}
