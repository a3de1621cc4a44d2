//! Resource sub-panel of an expanded card

use serde::Serialize;

use crate::models::resource::{Resource, ResourceCategory, ResourceSet};

/// Identifies one resource fetch; stale once the selection moves on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceTicket {
    pub name: String,
    pub generation: u64,
}

/// Lazy fetch state of the panel's resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ResourceFetch {
    NotRequested,
    Pending,
    Loaded(ResourceSet),
    Failed(String),
}

/// Toggles and resources for the expanded card
#[derive(Debug, Clone)]
pub struct ResourcePanel {
    ticket: ResourceTicket,
    pods_visible: bool,
    other_resources_visible: bool,
    fetch: ResourceFetch,
}

impl ResourcePanel {
    pub fn new(name: impl Into<String>, generation: u64) -> Self {
        Self {
            ticket: ResourceTicket {
                name: name.into(),
                generation,
            },
            pods_visible: false,
            other_resources_visible: false,
            fetch: ResourceFetch::NotRequested,
        }
    }

    pub fn name(&self) -> &str {
        &self.ticket.name
    }

    pub fn ticket(&self) -> &ResourceTicket {
        &self.ticket
    }

    pub fn fetch(&self) -> &ResourceFetch {
        &self.fetch
    }

    pub fn is_visible(&self, category: ResourceCategory) -> bool {
        match category {
            ResourceCategory::Pods => self.pods_visible,
            ResourceCategory::Other => self.other_resources_visible,
        }
    }

    /// Flip one category. Returns true when the flip needs a fetch: the
    /// category became visible and nothing is loaded or in flight.
    pub fn toggle(&mut self, category: ResourceCategory) -> bool {
        let visible = match category {
            ResourceCategory::Pods => &mut self.pods_visible,
            ResourceCategory::Other => &mut self.other_resources_visible,
        };
        *visible = !*visible;

        *visible
            && matches!(
                self.fetch,
                ResourceFetch::NotRequested | ResourceFetch::Failed(_)
            )
    }

    pub fn mark_pending(&mut self) {
        self.fetch = ResourceFetch::Pending;
    }

    pub fn set_loaded(&mut self, resources: ResourceSet) {
        self.fetch = ResourceFetch::Loaded(resources);
    }

    pub fn set_failed(&mut self, message: String) {
        self.fetch = ResourceFetch::Failed(message);
    }

    /// Loaded resources of a category, only while it is visible
    pub fn visible_resources(&self, category: ResourceCategory) -> Option<&[Resource]> {
        match &self.fetch {
            ResourceFetch::Loaded(set) if self.is_visible(category) => Some(set.get(category)),
            _ => None,
        }
    }
}
