//! Gateways the controller fetches through

use async_trait::async_trait;

use crate::errors::DashboardError;
use crate::models::release::ReleaseRecord;
use crate::models::resource::Resource;

/// Source of release records
#[async_trait]
pub trait ReleaseGateway: Send + Sync {
    /// Fetch every release, in backend order
    async fn fetch_releases(&self) -> Result<Vec<ReleaseRecord>, DashboardError>;

    /// Fetch a single release by name
    async fn fetch_release(&self, name: &str) -> Result<ReleaseRecord, DashboardError>;
}

/// Source of the orchestration resources behind a release
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    async fn fetch_resources(&self, name: &str) -> Result<Vec<Resource>, DashboardError>;
}

/// Both gateways, as one backend usually serves them
pub trait Gateway: ReleaseGateway + ResourceGateway {}

impl<T: ReleaseGateway + ResourceGateway + ?Sized> Gateway for T {}
