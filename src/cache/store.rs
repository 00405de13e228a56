//! Persistent key-value stores backing the caches
//!
//! `FileStore` keeps each key in its own JSON file under an XDG-compliant cache
//! directory; `MemoryStore` keeps everything in process.

use directories::ProjectDirs;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A string-keyed store of serialized values
///
/// Implementations must be cheap to call from UI event handlers: a single
/// read, write, or delete of one key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, overwriting any previous value
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Deletes `key`. Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Stores each key as a JSON file on disk
///
/// Uses `~/.cache/shoresquad/` on Linux, or the equivalent XDG path on other
/// platforms.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where store files are kept
    dir: PathBuf,
}

impl FileStore {
    /// Creates a FileStore in the XDG cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "shoresquad")?;
        Some(Self::with_dir(project_dirs.cache_dir().to_path_buf()))
    }

    /// Creates a FileStore rooted at a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the store files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path to the file for the given key
    ///
    /// Keys such as `shoresquad:forecast` are namespaced with characters that are
    /// not portable in file names, so anything outside `[A-Za-z0-9_-]` becomes `_`.
    fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_stem))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-process store, used when no cache directory is available and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }
}
