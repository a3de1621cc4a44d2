//! Releases API client

use async_trait::async_trait;
use openapi_client::models::{ReleaseDto, ResourceDto};
use tracing::debug;

use crate::errors::DashboardError;
use crate::gateway::{ReleaseGateway, ResourceGateway};
use crate::http::client::HttpClient;
use crate::models::release::{records_from_snapshot, ReleaseRecord};
use crate::models::resource::Resource;
use crate::utils::is_valid_release_name;

impl HttpClient {
    /// Get every release
    pub async fn list_releases(&self) -> Result<Vec<ReleaseDto>, DashboardError> {
        self.get("/releases").await
    }

    /// Get a specific release by name
    pub async fn get_release(&self, name: &str) -> Result<ReleaseDto, DashboardError> {
        check_name(name)?;
        let path = format!("/releases/{}", name);
        self.get(&path).await
    }

    /// Get the orchestration resources of a release
    pub async fn get_release_resources(&self, name: &str) -> Result<Vec<ResourceDto>, DashboardError> {
        check_name(name)?;
        let path = format!("/releases/{}/resources", name);
        self.get(&path).await
    }
}

fn check_name(name: &str) -> Result<(), DashboardError> {
    if is_valid_release_name(name) {
        Ok(())
    } else {
        Err(DashboardError::ValidationError(format!(
            "invalid release name: {:?}",
            name
        )))
    }
}

#[async_trait]
impl ReleaseGateway for HttpClient {
    async fn fetch_releases(&self) -> Result<Vec<ReleaseRecord>, DashboardError> {
        let dtos = self
            .list_releases()
            .await
            .map_err(|e| DashboardError::FetchFailed(e.to_string()))?;
        debug!("Fetched {} releases", dtos.len());
        records_from_snapshot(dtos).map_err(|e| DashboardError::FetchFailed(e.to_string()))
    }

    async fn fetch_release(&self, name: &str) -> Result<ReleaseRecord, DashboardError> {
        match self.get_release(name).await {
            Ok(dto) => ReleaseRecord::try_from(dto),
            Err(DashboardError::StatusError { status: 404, .. }) => {
                Err(DashboardError::NotFound(format!("release {}", name)))
            }
            Err(e) => Err(DashboardError::FetchFailed(e.to_string())),
        }
    }
}

#[async_trait]
impl ResourceGateway for HttpClient {
    async fn fetch_resources(&self, name: &str) -> Result<Vec<Resource>, DashboardError> {
        let dtos = self
            .get_release_resources(name)
            .await
            .map_err(|e| DashboardError::ResourceFetchFailed {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(dtos.into_iter().map(Resource::from).collect())
    }
}
