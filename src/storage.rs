use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LogError, Result};

/// A string key-value store, the equivalent of a browser's `localStorage`.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: String) -> Result<()>;
}

/// Storage that lives as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        self.items.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Storage keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys are page paths, so every character outside `[A-Za-z0-9._-]` maps to `_`.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .trim_start_matches('/')
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(name)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LogError::Storage {
                key: key.to_owned(),
                source: e,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key);
        debug!(key, path = %path.display(), "writing cache entry");
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, value))
            .map_err(|e| LogError::Storage {
                key: key.to_owned(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "aoc-leaderboard-log-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("/a.json").unwrap(), None);

        storage.set_item("/a.json", "one".to_string()).unwrap();
        storage.set_item("/a.json", "two".to_string()).unwrap();

        assert_eq!(storage.get_item("/a.json").unwrap().as_deref(), Some("two"));
        assert_eq!(storage.get_item("/b.json").unwrap(), None);
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = scratch_dir("roundtrip");
        let mut storage = FileStorage::new(&dir);
        let key = "/2023/leaderboard/private/view/123.json";

        assert_eq!(storage.get_item(key).unwrap(), None);
        storage.set_item(key, "{}".to_string()).unwrap();

        assert_eq!(storage.get_item(key).unwrap().as_deref(), Some("{}"));
        assert!(dir
            .join("2023_leaderboard_private_view_123.json")
            .is_file());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_storage_keys_are_distinct() {
        let dir = scratch_dir("distinct");
        let mut storage = FileStorage::new(&dir);

        storage
            .set_item("/2022/leaderboard/private/view/1.json", "a".to_string())
            .unwrap();
        storage
            .set_item("/2023/leaderboard/private/view/1.json", "b".to_string())
            .unwrap();

        assert_eq!(
            storage
                .get_item("/2022/leaderboard/private/view/1.json")
                .unwrap()
                .as_deref(),
            Some("a")
        );
        assert_eq!(
            storage
                .get_item("/2023/leaderboard/private/view/1.json")
                .unwrap()
                .as_deref(),
            Some("b")
        );

        fs::remove_dir_all(&dir).unwrap();
    }
}
