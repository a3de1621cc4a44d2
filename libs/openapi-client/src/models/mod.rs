//! API models

use serde::{Deserialize, Serialize};

/// A release as served by `GET /releases`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDto {
    #[serde(default)]
    pub name: String,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub created: Option<String>,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub last_deployed: Option<String>,

    #[serde(default)]
    pub owner: OwnerDto,

    #[serde(default)]
    pub auto_deploy: bool,

    #[serde(default)]
    pub code: SourceCodeDto,

    #[serde(default)]
    pub build: BuildDto,

    #[serde(default)]
    pub monitoring: MonitoringDto,

    #[serde(default)]
    pub artifacts: ArtifactsDto,

    /// Raw helm status, e.g. "deployed" or "PENDING_INSTALL"
    #[serde(default)]
    pub status: String,
}

/// Ownership and contact information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerDto {
    /// Older backends call this field `squad`
    #[serde(default, alias = "squad")]
    pub team: String,

    #[serde(default)]
    pub slack: String,
}

/// Repository and ref of the release's source code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceCodeDto {
    #[serde(default)]
    pub github: String,

    #[serde(default, rename = "ref")]
    pub git_ref: String,
}

/// CI build page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildDto {
    #[serde(default)]
    pub travis: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringDto {
    #[serde(default)]
    pub datadog: DatadogDto,

    #[serde(default)]
    pub sumologic: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatadogDto {
    #[serde(default)]
    pub dashboard: String,

    #[serde(default)]
    pub monitors: String,
}

/// Build artifacts of the release
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactsDto {
    #[serde(default)]
    pub docker: DockerArtifactDto,

    #[serde(default)]
    pub chart: ChartArtifactDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerArtifactDto {
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartArtifactDto {
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub version: String,
}

/// An orchestration object served by `GET /releases/{name}/resources`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceDto {
    pub kind: String,

    #[serde(default)]
    pub name: String,

    /// Any other fields the backend attaches (namespace, status, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}
