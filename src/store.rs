pub mod local;
pub mod remote;

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{Config, StorageBackend};
use crate::external_api::site_api::models::record_id::RecordId;
use crate::external_api::site_api::SiteApi;
use crate::external_api::ApiError;
use crate::sync::form_edit::Draft;
use local::LocalStore;
use remote::RemoteStore;

/// A server-managed collection of records
pub trait Resource: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Used in logs and error messages
    const NAME: &'static str;
    /// Key of the local-storage copy
    const STORAGE_KEY: &'static str;
    /// Exactly one row system-wide, replaced wholesale
    const SINGLETON: bool = false;

    fn id(&self) -> Option<&RecordId>;

    fn set_id(&mut self, id: RecordId);

    /// Contents of a local store that was never written
    fn seed() -> Vec<Self>;
}

/// Resource with a create/edit form
pub trait Editable: Resource {
    type Draft: Draft<Record = Self>;
}

/// Persistence for one resource. Callers never learn which adapter is behind it.
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, ApiError>;

    /// Creates when the record has no id, updates otherwise. Returns the id of
    /// the stored record when the store reports one.
    async fn upsert(&self, record: &R) -> Result<Option<RecordId>, ApiError>;

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError>;
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for Box<dyn ResourceStore<R>> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        (**self).list().await
    }

    async fn upsert(&self, record: &R) -> Result<Option<RecordId>, ApiError> {
        (**self).upsert(record).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}

/// Store selected by the `storage` setting
pub fn open<R: Resource>(config: &Config) -> Result<Box<dyn ResourceStore<R>>, ApiError>
where
    RemoteStore: ResourceStore<R>,
{
    Ok(match config.storage {
        StorageBackend::Remote => Box::new(RemoteStore::new(SiteApi::from_config(config)?)),
        StorageBackend::Local => Box::new(LocalStore::new(config.local_storage_dir()?)),
    })
}
