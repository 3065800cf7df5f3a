use super::KeyValueStore;
use crate::error::{JokeboxError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed store: each key is a `<key>.json` file under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(JokeboxError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(JokeboxError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        // Write to a sibling temp file and rename so readers never see a partial value
        let path = self.key_path(key);
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value).map_err(JokeboxError::Io)?;
        fs::rename(&tmp, &path).map_err(JokeboxError::Io)?;

        log::debug!("Wrote {}", path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(JokeboxError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        assert_eq!(store.get("history").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let mut store = FileStore::new(root.clone());

        store.set("theme", "dark").unwrap();

        assert!(root.join("theme.json").exists());
        assert!(!root.join(".theme.json.tmp").exists());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn remove_deletes_file_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        store.set("favorites", "[]").unwrap();
        store.remove("favorites").unwrap();
        assert!(!dir.path().join("favorites.json").exists());

        store.remove("favorites").unwrap();
    }
}
