use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Generic JSON-array file store.
///
/// The file is the only copy of the collection: every call re-reads it, and
/// every mutation rewrites it whole. Mutations hold `write_lock` across the
/// read-modify-write cycle and replace the file with an atomic rename, so
/// concurrent readers see the old or the new array, never a torn one.
pub struct JsonArrayStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonArrayStore<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    /// Open the store at `path`, creating parent directories and an empty `[]` file if missing.
    /// An existing file that does not parse is an error, not an empty collection.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }

        let store = Self { file_path, write_lock: Mutex::new(()), _items: PhantomData };
        if fs::try_exists(&store.file_path).await.map_err(ServiceError::storage)? {
            store.load().await?;
        } else {
            store.save(&[]).await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path { &self.file_path }

    /// Read the whole collection in file order.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::storage(format!("read {}: {e}", self.file_path.display()))),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::storage(format!("parse {}: {e}", self.file_path.display())))
    }

    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        let file_name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".into());
        let tmp = self.file_path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));

        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::storage(format!("write {}: {e}", tmp.display())))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::storage(format!("replace {}: {e}", self.file_path.display())));
        }
        Ok(())
    }

    /// Apply `f` to the current collection and persist the result.
    /// If `f` fails nothing is written.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError> + Send,
        R: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.save(&items).await?;
        Ok(out)
    }

    /// Overwrite the collection.
    pub async fn replace_all(&self, items: Vec<T>) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.save(&items).await
    }
}
