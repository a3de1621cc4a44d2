//! Dashboard session: UI events in, gateway completions back, one owner

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::resources::ResourceCache;
use crate::config::settings::Settings;
use crate::controller::grid::{GridController, LoadTicket, RefreshTicket};
use crate::controller::panel::ResourceTicket;
use crate::controller::selection::SelectionChange;
use crate::errors::DashboardError;
use crate::gateway::Gateway;
use crate::http::client::HttpClient;
use crate::models::release::ReleaseRecord;
use crate::models::resource::{Resource, ResourceCategory};
use crate::view::ViewModel;

/// Events the presentation layer sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    QueryChanged(String),
    CardSelected(String),
    DetailClosed,
    ResourceToggled(ResourceCategory),
    RetryLoad,
    RecordRefreshRequested(String),
}

/// A finished gateway call, waiting to be applied
#[derive(Debug)]
enum Completion {
    Releases(LoadTicket, Result<Vec<ReleaseRecord>, DashboardError>),
    Release(RefreshTicket, Result<ReleaseRecord, DashboardError>),
    Resources(ResourceTicket, Result<Vec<Resource>, DashboardError>),
}

/// Reports a task's completion, or `fallback` if the task ends without one
struct CompletionGuard {
    tx: mpsc::UnboundedSender<Completion>,
    fallback: Option<Completion>,
}

impl CompletionGuard {
    fn report(mut self, completion: Completion) {
        self.fallback = None;
        // The session may be gone; its results with it
        let _ = self.tx.send(completion);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(fallback) = self.fallback.take() {
            warn!("Gateway task ended without a result");
            let _ = self.tx.send(fallback);
        }
    }
}

/// Owns the controller; gateway calls run as tasks and report back over a
/// channel, so state is only ever touched through `&mut self`.
pub struct Session<G: Gateway + 'static> {
    controller: GridController,
    gateway: Arc<G>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl Session<HttpClient> {
    /// Session against the HTTP releases API described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, DashboardError> {
        settings.validate()?;
        let client = HttpClient::from_settings(&settings.api)?;

        let mut controller = GridController::new();
        if settings.cache_resources {
            controller = controller.with_resource_cache(ResourceCache::new(
                settings.resource_cache_capacity,
            ));
        }

        info!("Releases API at {}", client.base_url());
        Ok(Self::new(Arc::new(client), controller))
    }
}

impl<G: Gateway + 'static> Session<G> {
    pub fn new(gateway: Arc<G>, controller: GridController) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            gateway,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &GridController {
        &self.controller
    }

    pub fn view_model(&self) -> ViewModel {
        self.controller.view_model()
    }

    /// Gateway calls not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Kick off the release list fetch
    pub fn start(&mut self) {
        let ticket = self.controller.begin_load();
        let gateway = self.gateway.clone();
        let fallback = Completion::Releases(
            ticket,
            Err(DashboardError::FetchFailed("release fetch aborted".to_string())),
        );
        self.spawn(fallback, async move {
            let result = gateway.fetch_releases().await;
            Completion::Releases(ticket, result)
        });
    }

    /// Apply a UI event; any fetch it needs is started in the background
    pub fn dispatch(&mut self, event: UiEvent) {
        debug!("UI event: {:?}", event);
        match event {
            UiEvent::QueryChanged(text) => self.controller.set_query(text),
            UiEvent::CardSelected(name) => {
                if let Some(SelectionChange::Closed(name)) = self.controller.select_card(&name) {
                    debug!("Collapsed {}", name);
                }
            }
            UiEvent::DetailClosed => {
                self.controller.close_detail();
            }
            UiEvent::ResourceToggled(category) => {
                if let Some(ticket) = self.controller.toggle_resources(category) {
                    let gateway = self.gateway.clone();
                    let fallback = Completion::Resources(
                        ticket.clone(),
                        Err(DashboardError::ResourceFetchFailed {
                            name: ticket.name.clone(),
                            message: "resource fetch aborted".to_string(),
                        }),
                    );
                    self.spawn(fallback, async move {
                        let result = gateway.fetch_resources(&ticket.name).await;
                        Completion::Resources(ticket, result)
                    });
                }
            }
            UiEvent::RetryLoad => self.start(),
            UiEvent::RecordRefreshRequested(name) => {
                if let Some(ticket) = self.controller.begin_refresh(&name) {
                    let gateway = self.gateway.clone();
                    let fallback = Completion::Release(
                        ticket.clone(),
                        Err(DashboardError::FetchFailed("release refresh aborted".to_string())),
                    );
                    self.spawn(fallback, async move {
                        let result = gateway.fetch_release(&ticket.name).await;
                        Completion::Release(ticket, result)
                    });
                }
            }
        }
    }

    /// Wait for one gateway call and apply it. Returns false when nothing is
    /// in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.completions_rx.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Apply whatever already finished without waiting
    pub fn apply_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait until every gateway call has been applied
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    /// Every spawned task reports exactly once, even if the fetch panics
    fn spawn<F>(&mut self, fallback: Completion, fetch: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.in_flight += 1;
        let guard = CompletionGuard {
            tx: self.completions_tx.clone(),
            fallback: Some(fallback),
        };
        tokio::spawn(async move {
            let completion = fetch.await;
            guard.report(completion);
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let applied = match completion {
            Completion::Releases(ticket, result) => self.controller.apply_load(ticket, result),
            Completion::Release(ticket, result) => self.controller.apply_refresh(ticket, result),
            Completion::Resources(ticket, result) => {
                self.controller.apply_resources(&ticket, result)
            }
        };
        if !applied {
            debug!("Completion superseded, dropped");
        }
    }
}
