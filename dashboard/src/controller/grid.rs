//! Grid/detail controller

use tracing::{debug, info, warn};

use crate::cache::resources::ResourceCache;
use crate::controller::load::{LoadEvent, LoadFsm};
use crate::controller::panel::{ResourcePanel, ResourceTicket};
use crate::controller::selection::{Selection, SelectionChange};
use crate::errors::DashboardError;
use crate::gateway::{ReleaseGateway, ResourceGateway};
use crate::models::release::{ensure_unique_names, ReleaseRecord};
use crate::models::resource::{Resource, ResourceCategory, ResourceSet};
use crate::view::ViewModel;

/// Identifies one release list fetch; stale once a newer one starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Identifies a single release refresh
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefreshTicket {
    pub name: String,
    load: LoadTicket,
}

/// Owns the release list, the query, the expanded card and its panel
#[derive(Debug, Default)]
pub struct GridController {
    records: Vec<ReleaseRecord>,
    query: String,
    selection: Selection,
    panel: Option<ResourcePanel>,
    load: LoadFsm,
    load_seq: u64,
    selection_seq: u64,
    resource_cache: Option<ResourceCache>,
}

impl GridController {
    /// Create a controller with no records, collapsed, idle
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep fetched resources per release for the session
    pub fn with_resource_cache(mut self, cache: ResourceCache) -> Self {
        self.resource_cache = Some(cache);
        self
    }

    pub fn records(&self) -> &[ReleaseRecord] {
        &self.records
    }

    pub fn record(&self, name: &str) -> Option<&ReleaseRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn panel(&self) -> Option<&ResourcePanel> {
        self.panel.as_ref()
    }

    pub fn load(&self) -> &LoadFsm {
        &self.load
    }

    pub fn resource_cache(&self) -> Option<&ResourceCache> {
        self.resource_cache.as_ref()
    }

    // ================================ RECORDS ===================================== //

    /// Mark a release list fetch as started
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.load.start();
        debug!("Release load #{} started", self.load_seq);
        LoadTicket(self.load_seq)
    }

    /// Apply a release list fetch result. Returns false if the ticket is stale.
    ///
    /// On failure the previous records are kept and stay queryable.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ReleaseRecord>, DashboardError>,
    ) -> bool {
        if ticket.0 != self.load_seq || !self.load.is_loading() {
            debug!("Dropping stale release load #{}", ticket.0);
            return false;
        }

        let outcome = match result.and_then(|records| ensure_unique_names(&records).map(|_| records)) {
            Ok(records) => {
                info!("Loaded {} releases", records.len());
                self.replace_records(records);
                self.load.process(LoadEvent::Succeeded)
            }
            Err(e) => {
                warn!("Release load failed: {}", e);
                self.load.process(LoadEvent::Failed(fetch_message(e)))
            }
        };
        // Guarded by `is_loading` above
        debug_assert!(outcome.is_ok(), "load completion outside Loading: {:?}", outcome);
        true
    }

    /// Fetch the release list once through `gateway`
    pub async fn initialize<G>(&mut self, gateway: &G)
    where
        G: ReleaseGateway + ?Sized,
    {
        let ticket = self.begin_load();
        let result = gateway.fetch_releases().await;
        self.apply_load(ticket, result);
    }

    fn replace_records(&mut self, records: Vec<ReleaseRecord>) {
        if let Some(cache) = self.resource_cache.as_mut() {
            cache.clear();
        }

        if let Some(expanded) = self.selection.expanded_name().map(str::to_string) {
            let before = self.record(&expanded).cloned();
            let after = records.iter().find(|r| r.name == expanded);
            match after {
                None => {
                    info!("Expanded release {} disappeared, collapsing", expanded);
                    self.selection.collapse();
                    self.panel = None;
                    self.selection_seq += 1;
                }
                Some(after) if before.as_ref() != Some(after) => {
                    debug!("Expanded release {} changed, resetting resources", expanded);
                    self.open_panel(&expanded);
                }
                Some(_) => {}
            }
        }

        self.records = records;
    }

    /// Start a refresh of a single release
    pub fn begin_refresh(&self, name: &str) -> Option<RefreshTicket> {
        if self.record(name).is_none() {
            warn!("Cannot refresh unknown release {}", name);
            return None;
        }
        Some(RefreshTicket {
            name: name.to_string(),
            load: LoadTicket(self.load_seq),
        })
    }

    /// Replace one release in place. Dropped if a list load started since.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<ReleaseRecord, DashboardError>,
    ) -> bool {
        if ticket.load.0 != self.load_seq {
            debug!("Dropping stale refresh of {}", ticket.name);
            return false;
        }

        let record = match result {
            Ok(record) if record.name == ticket.name => record,
            Ok(record) => {
                warn!("Refresh of {} returned {}", ticket.name, record.name);
                return false;
            }
            Err(e) => {
                warn!("Refresh of {} failed: {}", ticket.name, e);
                return false;
            }
        };

        let Some(index) = self.records.iter().position(|r| r.name == ticket.name) else {
            return false;
        };

        if self.records[index] != record && self.selection.is_expanded(&ticket.name) {
            self.open_panel(&ticket.name);
        }
        if let Some(cache) = self.resource_cache.as_mut() {
            cache.remove(&ticket.name);
        }
        self.records[index] = record;
        true
    }

    // ================================ QUERY ======================================= //

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        debug!("Query set to {:?}", self.query);
    }

    // ================================ SELECTION =================================== //

    /// Card click. Unknown names are ignored.
    pub fn select_card(&mut self, name: &str) -> Option<SelectionChange> {
        if self.record(name).is_none() {
            warn!("Ignoring selection of unknown release {}", name);
            return None;
        }

        let change = self.selection.select(name);
        match &change {
            SelectionChange::Opened(name) | SelectionChange::Switched { to: name, .. } => {
                let name = name.clone();
                self.open_panel(&name);
            }
            SelectionChange::Closed(_) => {
                self.panel = None;
                self.selection_seq += 1;
            }
        }
        debug!("Selection: {:?}", change);
        Some(change)
    }

    /// Close affordance
    pub fn close_detail(&mut self) -> Option<String> {
        let closed = self.selection.collapse();
        if closed.is_some() {
            self.panel = None;
            self.selection_seq += 1;
        }
        closed
    }

    fn open_panel(&mut self, name: &str) {
        self.selection_seq += 1;
        self.panel = Some(ResourcePanel::new(name, self.selection_seq));
    }

    // ================================ RESOURCES =================================== //

    /// Flip a resource category of the expanded card.
    ///
    /// Returns a ticket when the caller must fetch the card's resources.
    pub fn toggle_resources(&mut self, category: ResourceCategory) -> Option<ResourceTicket> {
        let Some(panel) = self.panel.as_mut() else {
            debug!("Resource toggle with no expanded card");
            return None;
        };

        if !panel.toggle(category) {
            return None;
        }

        if let Some(cached) = self
            .resource_cache
            .as_ref()
            .and_then(|cache| cache.get(panel.name()))
        {
            debug!("Resources of {} served from cache", panel.name());
            panel.set_loaded(cached.clone());
            return None;
        }

        panel.mark_pending();
        Some(panel.ticket().clone())
    }

    /// Apply a resource fetch result. Returns false if the ticket is stale.
    pub fn apply_resources(
        &mut self,
        ticket: &ResourceTicket,
        result: Result<Vec<Resource>, DashboardError>,
    ) -> bool {
        let Some(panel) = self.panel.as_mut() else {
            debug!("Dropping resources of {}: nothing expanded", ticket.name);
            return false;
        };

        if panel.ticket() != ticket {
            debug!(
                "Dropping stale resources of {} (expanded: {})",
                ticket.name,
                panel.name()
            );
            return false;
        }

        match result {
            Ok(resources) => {
                let set = ResourceSet::partition(resources);
                debug!(
                    "Resources of {}: {} pods, {} others",
                    ticket.name,
                    set.pods.len(),
                    set.others.len()
                );
                if let Some(cache) = self.resource_cache.as_mut() {
                    cache.insert(ticket.name.clone(), set.clone());
                }
                panel.set_loaded(set);
            }
            Err(e) => {
                warn!("Resource fetch for {} failed: {}", ticket.name, e);
                panel.set_failed(resource_message(e));
            }
        }
        true
    }

    /// Toggle and, if needed, fetch the expanded card's resources inline
    pub async fn toggle_resources_with<G>(&mut self, gateway: &G, category: ResourceCategory)
    where
        G: ResourceGateway + ?Sized,
    {
        if let Some(ticket) = self.toggle_resources(category) {
            let result = gateway.fetch_resources(&ticket.name).await;
            self.apply_resources(&ticket, result);
        }
    }

    // ================================ VIEW ======================================== //

    pub fn view_model(&self) -> ViewModel {
        ViewModel::project(self)
    }
}

fn fetch_message(err: DashboardError) -> String {
    match err {
        DashboardError::FetchFailed(message) => message,
        other => other.to_string(),
    }
}

fn resource_message(err: DashboardError) -> String {
    match err {
        DashboardError::ResourceFetchFailed { message, .. } => message,
        other => other.to_string(),
    }
}
