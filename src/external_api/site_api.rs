pub mod models;

use std::time::Duration;

use serde_json::Value;
use tracing::info;

use super::{ApiError, BaseApiClient};
use crate::config::Config;
use crate::constants::{
    DELETE_PROJECT_ENDPOINT, GET_PRICING_ENDPOINT, GET_PROJECTS_ENDPOINT, SAVE_CONTACT_ENDPOINT,
    SAVE_PRICING_ENDPOINT, SAVE_PROJECT_ENDPOINT,
};
use crate::pricing::PricingTable;
use models::contact::ContactRequest;
use models::project::Project;
use models::record_id::RecordId;
use models::save_response::{Acknowledgement, ContactResponse, DeleteRequest, SaveResponse};

const GENERIC_CONTACT_ERROR: &str = "Error saving the message";

/// Client for the site's PHP endpoints.
///
/// Every call reports failures in the category of its operation, carrying the
/// server's own message.
pub struct SiteApi {
    pub client: BaseApiClient,
}

impl SiteApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: BaseApiClient::new(base_url, timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, Duration::from_secs(config.timeout_secs))
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.client
            .get::<Vec<Project>>(GET_PROJECTS_ENDPOINT)
            .await
            .map_err(|e| ApiError::RemoteFetch(e.message()))
    }

    pub async fn save_project(&self, project: &Project) -> Result<SaveResponse, ApiError> {
        let response = self
            .client
            .post_json::<SaveResponse, _>(SAVE_PROJECT_ENDPOINT, project)
            .await
            .map_err(|e| ApiError::RemoteSave(e.message()))?;
        info!(id = ?response.id, "project saved");
        Ok(response)
    }

    pub async fn delete_project(&self, id: &RecordId) -> Result<Acknowledgement, ApiError> {
        self.client
            .post_json::<Acknowledgement, _>(DELETE_PROJECT_ENDPOINT, &DeleteRequest { id })
            .await
            .map_err(|e| ApiError::RemoteDelete(e.message()))
    }

    /// `None` when no pricing row is stored yet
    pub async fn get_pricing(&self) -> Result<Option<PricingTable>, ApiError> {
        let value = self
            .client
            .get::<Value>(GET_PRICING_ENDPOINT)
            .await
            .map_err(|e| ApiError::RemoteFetch(e.message()))?;
        Ok(PricingTable::from_stored(&value))
    }

    pub async fn save_pricing(&self, pricing: &PricingTable) -> Result<Acknowledgement, ApiError> {
        self.client
            .post_json::<Acknowledgement, _>(SAVE_PRICING_ENDPOINT, pricing)
            .await
            .map_err(|e| ApiError::RemoteSave(e.message()))
    }

    pub async fn save_contact(&self, request: &ContactRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .post_json_unlabelled::<ContactResponse, _>(SAVE_CONTACT_ENDPOINT, request)
            .await
            .map_err(|e| ApiError::Contact(e.message()))?;
        if !response.success {
            return Err(ApiError::Contact(GENERIC_CONTACT_ERROR.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
impl SiteApi {
    pub fn mock(url: &str) -> Self {
        Self::new(url, Duration::from_secs(5)).unwrap()
    }

    pub async fn mock_list_projects(server: &mut mockito::ServerGuard, projects: &[Project]) -> mockito::Mock {
        server
            .mock("GET", GET_PROJECTS_ENDPOINT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(projects).unwrap())
            .create_async()
            .await
    }

    pub async fn mock_get_pricing(server: &mut mockito::ServerGuard, body: &str) -> mockito::Mock {
        server
            .mock("GET", GET_PRICING_ENDPOINT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    pub async fn mock_save_contact(server: &mut mockito::ServerGuard, status: usize, body: &str) -> mockito::Mock {
        server
            .mock("POST", SAVE_CONTACT_ENDPOINT)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
