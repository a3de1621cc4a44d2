//! Orchestration resources attached to a release

use openapi_client::models::ResourceDto;
use serde::{Deserialize, Serialize};

/// The kind that gets its own sub-panel
pub const POD_KIND: &str = "Pod";

/// One orchestration object tied to a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub kind: String,
    pub name: String,
}

impl Resource {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Exact, case-sensitive match on `Pod`
    pub fn is_pod(&self) -> bool {
        self.kind == POD_KIND
    }

    pub fn category(&self) -> ResourceCategory {
        if self.is_pod() {
            ResourceCategory::Pods
        } else {
            ResourceCategory::Other
        }
    }
}

impl From<ResourceDto> for Resource {
    fn from(dto: ResourceDto) -> Self {
        Self {
            kind: dto.kind,
            name: dto.name,
        }
    }
}

/// Resource sub-panel a toggle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Pods,
    Other,
}

/// Resources of one release, split into pods and everything else
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceSet {
    pub pods: Vec<Resource>,
    pub others: Vec<Resource>,
}

impl ResourceSet {
    /// Partition preserving the order the backend returned
    pub fn partition(resources: Vec<Resource>) -> Self {
        let (pods, others) = resources.into_iter().partition(Resource::is_pod);
        Self { pods, others }
    }

    pub fn get(&self, category: ResourceCategory) -> &[Resource] {
        match category {
            ResourceCategory::Pods => &self.pods,
            ResourceCategory::Other => &self.others,
        }
    }

    pub fn len(&self) -> usize {
        self.pods.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
