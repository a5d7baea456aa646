//! Analysis request orchestration.
//!
//! Validates submit preconditions, snapshots and clears the region store,
//! and runs the network call as a spawned task whose resolution re-enters
//! through the tracker. Superseded requests are not cancelled at the
//! transport level; their results are simply discarded.

use std::sync::Arc;

use uuid::Uuid;

use crate::client::response::{decode_reply, Estimation};
use crate::client::tracker::RequestTracker;
use crate::client::transport::{AnalysisTransport, Credentials, Tier};
use crate::error::{AnalysisError, Result};
use crate::models::FeatureCollection;
use crate::store::RegionStore;

/// Orchestrates analysis submissions against a transport.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    transport: Arc<dyn AnalysisTransport>,
    tracker: RequestTracker,
}

impl AnalysisOrchestrator {
    pub fn new(transport: Arc<dyn AnalysisTransport>) -> Self {
        Self {
            transport,
            tracker: RequestTracker::new(),
        }
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Submit the store's contents for analysis.
    ///
    /// Preconditions are checked before anything is mutated: an empty store
    /// fails with [`AnalysisError::EmptySelection`], and a runtime-tier
    /// submit without credentials fails with
    /// [`AnalysisError::Unauthenticated`] — in both cases no network call is
    /// made and the store is left untouched.
    ///
    /// On a real submission the store is cleared immediately (the drawn
    /// features are consumed), the request becomes the current pending one,
    /// and the network call runs in a spawned task. A newer submission
    /// supersedes this one for display purposes only.
    pub fn submit(
        &self,
        store: &mut RegionStore,
        tier: Tier,
        credentials: Option<&Credentials>,
    ) -> Result<Uuid> {
        if store.is_empty() {
            return Err(AnalysisError::EmptySelection);
        }
        if tier == Tier::Runtime && credentials.is_none() {
            return Err(AnalysisError::Unauthenticated);
        }

        let snapshot = store.to_feature_collection();
        store.clear();

        let id = self.tracker.begin(snapshot.clone());
        tracing::info!(%id, tier = tier.path_segment(), features = snapshot.features.len(),
            "submitting analysis request");

        let transport = Arc::clone(&self.transport);
        let tracker = self.tracker.clone();
        let credentials = credentials.cloned();
        tokio::spawn(async move {
            let result = execute(transport.as_ref(), tier, &snapshot, credentials.as_ref()).await;
            match result {
                Ok(estimation) => {
                    if tracker.resolve_success(id, estimation) {
                        tracing::info!(%id, "analysis request succeeded");
                    }
                }
                Err(e) => {
                    if tracker.resolve_failure(id, e.to_string()) {
                        tracing::warn!(%id, error = %e, "analysis request failed");
                    }
                }
            }
        });

        Ok(id)
    }
}

/// Run one request to completion: transport call plus dual-channel decode.
/// Both channels are fully decoded before this returns, so the tracker only
/// ever leaves the pending state with a complete result.
pub async fn execute(
    transport: &dyn AnalysisTransport,
    tier: Tier,
    region: &FeatureCollection,
    credentials: Option<&Credentials>,
) -> Result<Estimation> {
    let reply = transport
        .submit(tier, region, credentials)
        .await
        .map_err(|e| AnalysisError::Transport(e.to_string()))?;
    decode_reply(reply)
}
