//! Request tracking with supersede semantics.
//!
//! Every submission gets a v4 id. The tracker keeps the set of in-flight
//! requests plus a single "current" slot that drives the display. A
//! resolution for a request that is no longer current is discarded silently
//! and never touches display state — last-resolved-wins is explicitly not
//! allowed when the resolver is older than the current request.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::client::response::Estimation;
use crate::models::FeatureCollection;

/// Terminal or pending outcome of one analysis request.
#[derive(Debug, Clone)]
pub enum Outcome {
    Pending,
    Succeeded(Estimation),
    Failed(String),
}

/// One submission: the region snapshot taken at submit time, the submission
/// timestamp, and the outcome.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub id: Uuid,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub snapshot: FeatureCollection,
    pub outcome: Outcome,
}

/// What the UI should show right now.
#[derive(Debug, Clone)]
pub enum DisplayState {
    Idle,
    Pending { request: Uuid },
    Ready { request: Uuid, estimation: Estimation },
    Failed { request: Uuid, message: String },
}

#[derive(Default)]
struct TrackerInner {
    requests: HashMap<Uuid, AnalysisRequest>,
    current: Option<Uuid>,
}

/// In-memory request tracker shared between the event thread and spawned
/// resolution tasks.
#[derive(Clone, Default)]
pub struct RequestTracker {
    inner: Arc<RwLock<TrackerInner>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending request and make it current. Any previously
    /// current request is superseded for display purposes; if it already
    /// reached a terminal outcome it is garbage-collected here.
    pub fn begin(&self, snapshot: FeatureCollection) -> Uuid {
        let id = Uuid::new_v4();
        let request = AnalysisRequest {
            id,
            submitted_at: chrono::Utc::now(),
            snapshot,
            outcome: Outcome::Pending,
        };

        let mut inner = self.inner.write();
        if let Some(previous) = inner.current {
            let terminal = inner
                .requests
                .get(&previous)
                .map(|r| !matches!(r.outcome, Outcome::Pending))
                .unwrap_or(true);
            if terminal {
                inner.requests.remove(&previous);
            } else {
                tracing::debug!(%previous, new = %id, "superseding pending analysis request");
            }
        }
        inner.requests.insert(id, request);
        inner.current = Some(id);
        id
    }

    /// Record a successful resolution. Returns `false` (and drops the
    /// result) when the request has been superseded.
    pub fn resolve_success(&self, id: Uuid, estimation: Estimation) -> bool {
        self.resolve(id, Outcome::Succeeded(estimation))
    }

    /// Record a failed resolution. Returns `false` when superseded.
    pub fn resolve_failure(&self, id: Uuid, message: impl Into<String>) -> bool {
        self.resolve(id, Outcome::Failed(message.into()))
    }

    fn resolve(&self, id: Uuid, outcome: Outcome) -> bool {
        let mut inner = self.inner.write();
        if inner.current == Some(id) {
            if let Some(request) = inner.requests.get_mut(&id) {
                request.outcome = outcome;
                return true;
            }
        }
        // Superseded: discard silently, drop the request record.
        inner.requests.remove(&id);
        tracing::debug!(%id, "discarding resolution for superseded request");
        false
    }

    /// Display state derived from the current request.
    pub fn display_state(&self) -> DisplayState {
        let inner = self.inner.read();
        let Some(id) = inner.current else {
            return DisplayState::Idle;
        };
        match inner.requests.get(&id).map(|r| &r.outcome) {
            Some(Outcome::Pending) => DisplayState::Pending { request: id },
            Some(Outcome::Succeeded(estimation)) => DisplayState::Ready {
                request: id,
                estimation: estimation.clone(),
            },
            Some(Outcome::Failed(message)) => DisplayState::Failed {
                request: id,
                message: message.clone(),
            },
            None => DisplayState::Idle,
        }
    }

    /// Acknowledge a terminal outcome: the request is discarded and the
    /// display returns to idle. A pending request cannot be acknowledged.
    pub fn acknowledge(&self) {
        let mut inner = self.inner.write();
        let Some(id) = inner.current else { return };
        let terminal = inner
            .requests
            .get(&id)
            .map(|r| !matches!(r.outcome, Outcome::Pending))
            .unwrap_or(true);
        if terminal {
            inner.requests.remove(&id);
            inner.current = None;
        }
    }

    /// Snapshot of the current request, if any.
    pub fn current_request(&self) -> Option<AnalysisRequest> {
        let inner = self.inner.read();
        inner.current.and_then(|id| inner.requests.get(&id).cloned())
    }
}
