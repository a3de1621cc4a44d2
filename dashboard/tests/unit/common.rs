//! Shared fixtures

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use shipit_dashboard::errors::DashboardError;
use shipit_dashboard::gateway::{ReleaseGateway, ResourceGateway};
use shipit_dashboard::models::release::ReleaseRecord;
use shipit_dashboard::models::resource::Resource;
use shipit_dashboard::models::status::DeploymentStatus;

pub fn create_test_records() -> Vec<ReleaseRecord> {
    vec![
        ReleaseRecord::new("loki", "squad-cd", DeploymentStatus::Deployed),
        ReleaseRecord::new("hermes", "squad-x", DeploymentStatus::Failed),
        ReleaseRecord::new("zeus", "squad-cd", DeploymentStatus::PendingUpgrade),
    ]
}

pub fn create_test_resources(name: &str) -> Vec<Resource> {
    vec![
        Resource::new("Pod", format!("{}-0", name)),
        Resource::new("Service", name),
        Resource::new("Pod", format!("{}-1", name)),
    ]
}

/// In-memory gateway; resource fetches for gated names wait for a notify
#[derive(Default)]
pub struct FakeGateway {
    pub releases: Mutex<Vec<Result<Vec<ReleaseRecord>, String>>>,
    pub resources: Mutex<HashMap<String, Result<Vec<Resource>, String>>>,
    pub gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub crashes: Mutex<HashSet<String>>,
    pub release_calls: AtomicUsize,
    pub resource_calls: AtomicUsize,
}

impl FakeGateway {
    /// Successive release list answers; the last one repeats
    pub fn with_releases(answers: Vec<Result<Vec<ReleaseRecord>, String>>) -> Self {
        Self {
            releases: Mutex::new(answers),
            ..Default::default()
        }
    }

    pub fn set_resources(&self, name: &str, answer: Result<Vec<Resource>, String>) {
        self.resources.lock().unwrap().insert(name.to_string(), answer);
    }

    /// Hold resource fetches of `name` until the returned notify fires
    pub fn gate(&self, name: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(name.to_string(), notify.clone());
        notify
    }

    /// Make resource fetches of `name` panic
    pub fn crash_on(&self, name: &str) {
        self.crashes.lock().unwrap().insert(name.to_string());
    }

    pub fn release_calls(&self) -> usize {
        self.release_calls.load(Ordering::SeqCst)
    }

    pub fn resource_calls(&self) -> usize {
        self.resource_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseGateway for FakeGateway {
    async fn fetch_releases(&self) -> Result<Vec<ReleaseRecord>, DashboardError> {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        let answer = {
            let mut answers = self.releases.lock().unwrap();
            if answers.len() > 1 {
                answers.remove(0)
            } else {
                answers.first().cloned().unwrap_or_else(|| Ok(vec![]))
            }
        };
        answer.map_err(DashboardError::FetchFailed)
    }

    async fn fetch_release(&self, name: &str) -> Result<ReleaseRecord, DashboardError> {
        let answers = self.releases.lock().unwrap();
        answers
            .first()
            .and_then(|answer| answer.as_ref().ok())
            .and_then(|records| records.iter().find(|r| r.name == name).cloned())
            .ok_or_else(|| DashboardError::NotFound(format!("release {}", name)))
    }
}

#[async_trait]
impl ResourceGateway for FakeGateway {
    async fn fetch_resources(&self, name: &str) -> Result<Vec<Resource>, DashboardError> {
        self.resource_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().get(name).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let crash = self.crashes.lock().unwrap().contains(name);
        if crash {
            panic!("resource backend crashed for {}", name);
        }

        let answer = self
            .resources
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Ok(create_test_resources(name)));
        answer.map_err(|message| DashboardError::ResourceFetchFailed {
            name: name.to_string(),
            message,
        })
    }
}
