use async_trait::async_trait;

use super::ResourceStore;
use crate::external_api::site_api::models::project::Project;
use crate::external_api::site_api::models::record_id::RecordId;
use crate::external_api::site_api::SiteApi;
use crate::external_api::ApiError;
use crate::pricing::PricingTable;

/// Adapter over the PHP endpoints, the authoritative store
pub struct RemoteStore {
    api: SiteApi,
}

impl RemoteStore {
    pub fn new(api: SiteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceStore<Project> for RemoteStore {
    async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.api.list_projects().await
    }

    async fn upsert(&self, record: &Project) -> Result<Option<RecordId>, ApiError> {
        let response = self.api.save_project(record).await?;
        Ok(response.id.or_else(|| record.id.clone()))
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        self.api.delete_project(id).await.map(|_| ())
    }
}

#[async_trait]
impl ResourceStore<PricingTable> for RemoteStore {
    /// Always one row: the stored table, or the defaults when nothing is stored
    async fn list(&self) -> Result<Vec<PricingTable>, ApiError> {
        Ok(vec![self.api.get_pricing().await?.unwrap_or_default()])
    }

    async fn upsert(&self, record: &PricingTable) -> Result<Option<RecordId>, ApiError> {
        self.api.save_pricing(record).await?;
        Ok(None)
    }

    async fn delete(&self, _id: &RecordId) -> Result<(), ApiError> {
        Err(ApiError::Unsupported("pricing"))
    }
}
