use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::{Resource, ResourceStore};
use crate::external_api::site_api::models::record_id::RecordId;
use crate::external_api::ApiError;

/// Local-storage adapter: one JSON document per resource key.
///
/// Ids of new records are client-assigned placeholders taken from the clock.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for<R: Resource>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", R::STORAGE_KEY))
    }

    async fn read<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let path = self.path_for::<R>();
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(resource = R::NAME, path = %path.display(), "seeding local storage");
                let seed = R::seed();
                self.write(&seed).await?;
                Ok(seed)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write<R: Resource>(&self, records: &[R]) -> Result<(), ApiError> {
        fs::create_dir_all(&self.dir).await?;
        let content = serde_json::to_string_pretty(records)?;
        fs::write(self.path_for::<R>(), content).await?;
        Ok(())
    }
}

/// Millisecond timestamp, bumped until it is not taken
fn placeholder_id<R: Resource>(records: &[R]) -> RecordId {
    let mut candidate = chrono::Utc::now().timestamp_millis();
    loop {
        let id = RecordId::from(candidate);
        if records.iter().all(|record| record.id() != Some(&id)) {
            return id;
        }
        candidate += 1;
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for LocalStore {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.read().await
    }

    async fn upsert(&self, record: &R) -> Result<Option<RecordId>, ApiError> {
        if R::SINGLETON {
            self.write(std::slice::from_ref(record)).await?;
            return Ok(None);
        }

        let mut records: Vec<R> = self.read().await?;
        let id = match record.id() {
            Some(id) => {
                let slot = records
                    .iter_mut()
                    .find(|existing| existing.id() == Some(id))
                    .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
                *slot = record.clone();
                id.clone()
            }
            None => {
                let id = placeholder_id(&records);
                let mut created = record.clone();
                created.set_id(id.clone());
                records.push(created);
                id
            }
        };
        self.write(&records).await?;
        debug!(resource = R::NAME, %id, "stored locally");
        Ok(Some(id))
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        if R::SINGLETON {
            return Err(ApiError::Unsupported(R::NAME));
        }
        let mut records: Vec<R> = self.read().await?;
        let before = records.len();
        records.retain(|record| record.id() != Some(id));
        if records.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        self.write(&records).await
    }
}
