//=========================================================================
// Progress Persistence
//=========================================================================
//
// Typed port over the host's key/value store.
//
// Only two things are ever persisted:
// - the unlocked chapter index of each chaptered dialog, under the
//   dialog's own storage key
// - a single "finished" flag, set once the game has been won
//
// Failures never interrupt play. Reads fall back to a caller-chosen
// default and writes are dropped, both with a `warn!`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{PersistenceError, StoreError};
use crate::core::platform_bridge::KeyValueStore;

//=== ProgressStore =======================================================

/// Reads and writes game progress through a [`KeyValueStore`].
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
}

impl ProgressStore {
    /// Key of the "game finished" flag.
    pub const FINISHED_KEY: &'static str = "finish";

    pub fn new<S>(backend: S) -> Self
    where
        S: KeyValueStore + 'static,
    {
        Self {
            backend: Box::new(backend),
        }
    }

    /// A store that forgets everything on drop.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    //--- Chapters ---------------------------------------------------------

    /// Reads the chapter stored under `key`.
    ///
    /// `Ok(None)` means nothing was stored yet.
    pub fn try_load_chapter(&self, key: &str) -> Result<Option<usize>, PersistenceError> {
        let raw = self.backend.get(key).map_err(|source| PersistenceError::Read {
            key: key.to_string(),
            source,
        })?;

        match raw {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|_| PersistenceError::Malformed {
                    key: key.to_string(),
                    value,
                }),
        }
    }

    /// Reads the chapter stored under `key`, or `fallback` if it is
    /// missing or unreadable.
    pub fn load_chapter(&self, key: &str, fallback: usize) -> usize {
        match self.try_load_chapter(key) {
            Ok(Some(chapter)) => chapter,
            Ok(None) => fallback,
            Err(e) => {
                warn!("{}; starting at chapter {}", e, fallback);
                fallback
            }
        }
    }

    pub fn try_save_chapter(&mut self, key: &str, chapter: usize) -> Result<(), PersistenceError> {
        self.backend
            .set(key, &chapter.to_string())
            .map_err(|source| PersistenceError::Write {
                key: key.to_string(),
                source,
            })
    }

    /// Stores `chapter` under `key`, logging and dropping any failure.
    pub fn save_chapter(&mut self, key: &str, chapter: usize) {
        match self.try_save_chapter(key, chapter) {
            Ok(()) => debug!("Saved chapter {} under `{}`", chapter, key),
            Err(e) => warn!("{}; progress not saved", e),
        }
    }

    //--- Finished Flag ----------------------------------------------------

    pub fn mark_finished(&mut self) {
        if let Err(source) = self.backend.set(Self::FINISHED_KEY, "true") {
            let e = PersistenceError::Write {
                key: Self::FINISHED_KEY.to_string(),
                source,
            };
            warn!("{}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        match self.backend.get(Self::FINISHED_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(source) => {
                let e = PersistenceError::Read {
                    key: Self::FINISHED_KEY.to_string(),
                    source,
                };
                warn!("{}", e);
                false
            }
        }
    }
}

//=== MemoryStore =========================================================

/// In-process store, used by tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` with `value`.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

//=== FileStore ===========================================================

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are short identifiers; anything else is flattened.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

//=== Unit Tests ==========================================================
