//! View model handed to the presentation layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::controller::grid::GridController;
use crate::controller::load::LoadState;
use crate::controller::panel::ResourceFetch;
use crate::models::release::ReleaseRecord;
use crate::models::resource::{Resource, ResourceCategory};
use crate::models::status::StatusPresentation;
use crate::query::matcher;
use crate::utils::format_elapsed;

/// Everything a renderer needs, derived from controller state
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// The release list fetch is in flight
    pub loading: bool,

    /// Message of the last failed release list fetch
    pub error: Option<String>,

    pub query: String,

    /// Records matching the query, in fetch order
    pub visible_records: Vec<ReleaseRecord>,

    /// Number of records before filtering
    pub total_records: usize,

    /// The expanded record, whether or not it matches the query
    pub expanded_record: Option<ReleaseRecord>,

    /// Resource sub-panel of the expanded record
    pub detail: Option<DetailView>,

    pub last_loaded_at: Option<DateTime<Utc>>,
}

/// Resource sub-panel of the expanded card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub name: String,
    pub pods_visible: bool,
    pub other_resources_visible: bool,
    pub resources_loading: bool,
    pub resources_error: Option<String>,
    /// Empty unless loaded and visible
    pub pods: Vec<Resource>,
    /// Empty unless loaded and visible
    pub other_resources: Vec<Resource>,
}

/// One grid card, borrowed from a view model
#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub record: &'a ReleaseRecord,
    pub chip: StatusPresentation,
    pub expanded: bool,
}

impl CardView<'_> {
    /// e.g. "5 min ago"; `None` when the deploy time is unknown
    pub fn deployed_ago(&self, now: DateTime<Utc>) -> Option<String> {
        self.record
            .last_deployed_at
            .map(|at| format_elapsed(at, now))
    }
}

impl ViewModel {
    /// Pure projection of controller state
    pub fn project(controller: &GridController) -> Self {
        let load = controller.load();
        let records = controller.records();
        let query = controller.query();

        let visible_records = matcher::filter(records, query)
            .into_iter()
            .cloned()
            .collect();

        let expanded_record = controller
            .selection()
            .expanded_name()
            .and_then(|name| controller.record(name))
            .cloned();

        let detail = controller.panel().map(|panel| {
            let (resources_loading, resources_error) = match panel.fetch() {
                ResourceFetch::Pending => (true, None),
                ResourceFetch::Failed(message) => (false, Some(message.clone())),
                ResourceFetch::NotRequested | ResourceFetch::Loaded(_) => (false, None),
            };
            let visible = |category| {
                panel
                    .visible_resources(category)
                    .map(<[Resource]>::to_vec)
                    .unwrap_or_default()
            };

            DetailView {
                name: panel.name().to_string(),
                pods_visible: panel.is_visible(ResourceCategory::Pods),
                other_resources_visible: panel.is_visible(ResourceCategory::Other),
                resources_loading,
                resources_error,
                pods: visible(ResourceCategory::Pods),
                other_resources: visible(ResourceCategory::Other),
            }
        });

        Self {
            loading: load.is_loading(),
            error: match load.state() {
                LoadState::Failed => load.error().map(str::to_string),
                _ => None,
            },
            query: query.to_string(),
            visible_records,
            total_records: records.len(),
            expanded_record,
            detail,
            last_loaded_at: load.loaded_at(),
        }
    }

    pub fn expanded_name(&self) -> Option<&str> {
        self.expanded_record.as_ref().map(|r| r.name.as_str())
    }

    /// Cards in grid order
    pub fn cards(&self) -> Vec<CardView<'_>> {
        let expanded = self.expanded_name();
        self.visible_records
            .iter()
            .map(|record| CardView {
                record,
                chip: record.deployment_status.presentation(),
                expanded: expanded == Some(record.name.as_str()),
            })
            .collect()
    }
}
