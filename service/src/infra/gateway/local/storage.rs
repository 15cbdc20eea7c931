//! [`Storage`] of whole-collection blobs.

use std::{collections::HashMap, future::Future, io, path::PathBuf, sync::Arc};

use tokio::{fs, sync::Mutex};
use tracing as log;

/// Keyed storage of whole-collection blobs.
pub trait Storage {
    /// Loads the blob stored under the provided `key`, if any.
    fn load(
        &self,
        key: &'static str,
    ) -> impl Future<Output = io::Result<Option<Vec<u8>>>>;

    /// Stores the `blob` under the provided `key`, replacing the previous one.
    fn store(
        &self,
        key: &'static str,
        blob: Vec<u8>,
    ) -> impl Future<Output = io::Result<()>>;
}

/// [`Storage`] keeping every blob as a JSON file in a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    /// Directory containing the files.
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a new [`FileStorage`] in the provided directory.
    ///
    /// The directory is created on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path of the file storing the provided `key`.
    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    async fn load(&self, key: &'static str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path(key)).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn store(&self, key: &'static str, blob: Vec<u8>) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await?;

        // Never leaves a partially written blob behind.
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob).await?;
        fs::rename(&tmp, &path).await?;

        log::debug!("stored `{key}` into `{}`", path.display());
        Ok(())
    }
}

/// [`Storage`] keeping every blob in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    /// Stored blobs.
    blobs: Arc<Mutex<HashMap<&'static str, Vec<u8>>>>,
}

impl Storage for MemoryStorage {
    async fn load(&self, key: &'static str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn store(&self, key: &'static str, blob: Vec<u8>) -> io::Result<()> {
        drop(self.blobs.lock().await.insert(key, blob));
        Ok(())
    }
}
