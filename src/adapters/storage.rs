use crate::domain::ports::ContentStore;
use crate::utils::error::Result;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const CACHE_EXTENSION: &str = "html";

/// Hex SHA-256 of the exact URL text. No normalisation.
pub fn cache_key(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

fn entry_path(root: &Path, url: &str) -> PathBuf {
    root.join(format!("{}.{}", cache_key(url), CACHE_EXTENSION))
}

/// Flat directory of `<digest>.html` files.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for FileStore {
    fn locate(&self, url: &str) -> PathBuf {
        entry_path(&self.root, url)
    }

    async fn read(&self, url: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.locate(url)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, url: &str, content: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.locate(url), content)?;
        Ok(())
    }

    async fn contains(&self, url: &str) -> Result<bool> {
        Ok(self.locate(url).is_file())
    }
}

/// In-process store with the same key layout as [`FileStore`]. Nothing
/// touches the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    root: PathBuf,
    entries: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl ContentStore for MemoryStore {
    fn locate(&self, url: &str) -> PathBuf {
        entry_path(&self.root, url)
    }

    async fn read(&self, url: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(&self.locate(url)).cloned())
    }

    async fn write(&self, url: &str, content: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(self.locate(url), content.to_string());
        Ok(())
    }

    async fn contains(&self, url: &str) -> Result<bool> {
        let entries = self.entries.lock().await;
        Ok(entries.contains_key(&self.locate(url)))
    }
}
