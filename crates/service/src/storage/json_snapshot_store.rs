use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use models::Association;
use tokio::fs;

use crate::errors::ServiceError;
use crate::storage::SnapshotStore;

/// JSON file-backed snapshot store.
///
/// Persists each collection as `<data_dir>/<collection>.json`, pretty-printed
/// so operators can inspect and hand-edit the files. Intended for
/// lightweight state where a database is overkill.
pub struct JsonSnapshotStore {
    data_dir: PathBuf,
}

impl JsonSnapshotStore {
    /// Initialize the store under a data directory, creating it if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let data_dir = dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Arc::new(Self { data_dir }))
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self, collection: &str) -> Result<Vec<Association>, ServiceError> {
        match fs::read(self.path_for(collection)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("corrupt snapshot {collection}: {e}"))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    async fn save(&self, collection: &str, items: &[Association]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(self.path_for(collection), data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}
