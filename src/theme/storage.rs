//! durable client storage stuff
use {hashbrown::HashMap, thiserror::Error};

/// the default key the mode is stored under
pub const MODE_STORAGE_KEY: &str = "mj-theme-mode";
/// the default key the palette is stored under
pub const PALETTE_STORAGE_KEY: &str = "mj-theme-palette";

/// a storage failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// the storage area can't be reached at all
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    /// the storage refused the write (quota, private mode, ...)
    #[error("failed to write `{key}`: {reason}")]
    Write {
        /// the key being written
        key: String,
        /// why the write failed
        reason: String,
    },
}

/// the keys the theme is persisted under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// key for the mode
    pub mode: String,
    /// key for the palette
    pub palette: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            mode: MODE_STORAGE_KEY.to_string(),
            palette: PALETTE_STORAGE_KEY.to_string(),
        }
    }
}

/// a string key-value store that survives reloads
pub trait ThemeStorage {
    /// read a key, `Ok(None)` when it was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// write a key
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// an in-memory storage area
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    /// the stored entries
    entries: HashMap<String, String>,
    /// fail every access, to simulate blocked storage
    blocked: bool,
}

impl MemoryStorage {
    /// make an empty storage area
    pub fn new() -> Self {
        Self::default()
    }

    /// make a storage area that rejects every access
    pub fn blocked() -> Self {
        Self {
            entries: HashMap::new(),
            blocked: true,
        }
    }

    /// prefill an entry
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// peek at an entry without going through the trait
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.blocked {
            return Err(StorageError::Unavailable("access denied".to_string()));
        }

        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.blocked {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "access denied".to_string(),
            });
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: ThemeStorage + ?Sized> ThemeStorage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
