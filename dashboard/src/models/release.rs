//! Release record models

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use openapi_client::models::ReleaseDto;
use serde::Serialize;
use tracing::debug;

use crate::errors::DashboardError;
use crate::models::status::DeploymentStatus;

/// One deployable service's current known status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseRecord {
    /// Identity key, unique within a snapshot
    pub name: String,

    pub owner: Owner,

    pub auto_deploy_enabled: bool,

    pub source_ref: SourceRef,

    pub artifact: Artifact,

    pub monitoring: Monitoring,

    pub build: BuildInfo,

    pub deployment_status: DeploymentStatus,

    pub last_deployed_at: Option<DateTime<Utc>>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub team: String,
    pub slack_channel: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub repository_url: String,
    pub commit_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub image_uri: String,
    pub image_tag: String,
    pub chart_url: String,
    pub chart_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Monitoring {
    pub dashboard_url: String,
    pub monitor_url: String,
    pub logs_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub build_url: String,
}

impl ReleaseRecord {
    /// Minimal record, mostly useful for tests and fixtures
    pub fn new(name: impl Into<String>, team: impl Into<String>, status: DeploymentStatus) -> Self {
        Self {
            name: name.into(),
            owner: Owner {
                team: team.into(),
                slack_channel: String::new(),
            },
            auto_deploy_enabled: false,
            source_ref: SourceRef::default(),
            artifact: Artifact::default(),
            monitoring: Monitoring::default(),
            build: BuildInfo::default(),
            deployment_status: status,
            last_deployed_at: None,
            created_at: None,
        }
    }

    /// `image:tag`, or just the image when no tag is known
    pub fn image_ref(&self) -> String {
        if self.artifact.image_tag.is_empty() {
            self.artifact.image_uri.clone()
        } else {
            format!("{}:{}", self.artifact.image_uri, self.artifact.image_tag)
        }
    }

    /// Registry host of the docker image, the part before the first `/`.
    /// `None` for bare images such as `redis`.
    pub fn image_registry(&self) -> Option<&str> {
        self.artifact
            .image_uri
            .split_once('/')
            .map(|(registry, _)| registry)
    }

    /// Repository path of the docker image within its registry
    pub fn image_repository(&self) -> &str {
        match self.artifact.image_uri.split_once('/') {
            Some((_, repository)) => repository,
            None => &self.artifact.image_uri,
        }
    }

    /// `chart@version`, as shown in the detail header
    pub fn chart_ref(&self) -> String {
        if self.artifact.chart_version.is_empty() {
            self.artifact.chart_url.clone()
        } else {
            format!("{}@{}", self.artifact.chart_url, self.artifact.chart_version)
        }
    }
}

impl TryFrom<ReleaseDto> for ReleaseRecord {
    type Error = DashboardError;

    fn try_from(dto: ReleaseDto) -> Result<Self, Self::Error> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(DashboardError::ValidationError(
                "release name must not be empty".to_string(),
            ));
        }

        let deployment_status = DeploymentStatus::from_wire(&dto.status);
        if deployment_status == DeploymentStatus::Unknown && !dto.status.eq_ignore_ascii_case("unknown") {
            debug!("Unrecognized status {:?} for release {}", dto.status, name);
        }

        Ok(Self {
            owner: Owner {
                team: dto.owner.team,
                slack_channel: dto.owner.slack,
            },
            auto_deploy_enabled: dto.auto_deploy,
            source_ref: SourceRef {
                repository_url: dto.code.github,
                commit_ref: dto.code.git_ref,
            },
            artifact: Artifact {
                image_uri: dto.artifacts.docker.image,
                image_tag: dto.artifacts.docker.tag,
                chart_url: dto.artifacts.chart.path,
                chart_version: dto.artifacts.chart.version,
            },
            monitoring: Monitoring {
                dashboard_url: dto.monitoring.datadog.dashboard,
                monitor_url: dto.monitoring.datadog.monitors,
                logs_url: dto.monitoring.sumologic,
            },
            build: BuildInfo {
                build_url: dto.build.travis,
            },
            deployment_status,
            last_deployed_at: parse_timestamp(dto.last_deployed.as_deref()),
            created_at: parse_timestamp(dto.created.as_deref()),
            name,
        })
    }
}

/// Parse an RFC 3339 timestamp; the Go zero time counts as absent
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw?.trim()).ok()?;
    let parsed = parsed.with_timezone(&Utc);
    (parsed.year() > 1).then_some(parsed)
}

/// Convert a fetched snapshot, enforcing non-empty unique names
pub fn records_from_snapshot(dtos: Vec<ReleaseDto>) -> Result<Vec<ReleaseRecord>, DashboardError> {
    let records = dtos
        .into_iter()
        .map(ReleaseRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_names(&records)?;
    Ok(records)
}

/// Names are the identity key of a snapshot
pub fn ensure_unique_names(records: &[ReleaseRecord]) -> Result<(), DashboardError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.name.is_empty() {
            return Err(DashboardError::ValidationError(
                "release name must not be empty".to_string(),
            ));
        }
        if !seen.insert(record.name.as_str()) {
            return Err(DashboardError::ValidationError(format!(
                "duplicate release name: {}",
                record.name
            )));
        }
    }
    Ok(())
}
