//! Shared test support: a scriptable transport double and fixture builders.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use carbonmap::models::{FeatureCollection, LatLng};
use carbonmap::{AnalysisTransport, Credentials, Geometry, RegionStore, ServiceReply, Tier};
use carbonmap::client::transport::TransportError;

/// One scripted transport interaction.
pub struct Scripted {
    /// Simulated network latency before the reply is produced.
    pub delay: Duration,
    pub result: Result<ServiceReply, TransportError>,
}

/// What the transport saw for one call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub tier: Tier,
    pub feature_count: usize,
    pub authenticated: bool,
}

/// Transport double that replays scripted replies in submission order and
/// records every call it receives.
#[derive(Default)]
pub struct MockTransport {
    scripted: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, scripted: Scripted) {
        self.scripted.lock().push_back(scripted);
    }

    pub fn push_reply(&self, reply: ServiceReply) {
        self.push(Scripted {
            delay: Duration::ZERO,
            result: Ok(reply),
        });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AnalysisTransport for MockTransport {
    async fn submit(
        &self,
        tier: Tier,
        region: &FeatureCollection,
        credentials: Option<&Credentials>,
    ) -> Result<ServiceReply, TransportError> {
        self.calls.lock().push(RecordedCall {
            tier,
            feature_count: region.features.len(),
            authenticated: credentials.is_some(),
        });

        let scripted = self
            .scripted
            .lock()
            .pop_front()
            .expect("MockTransport called with no scripted reply");

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}

/// 200 reply with raster bytes and an optional statistics header.
pub fn ok_reply(body: &[u8], statistics_header: Option<&str>) -> ServiceReply {
    ServiceReply {
        status: 200,
        statistics_header: statistics_header.map(str::to_string),
        body: body.to_vec(),
    }
}

/// 400 reply with a `{"detail": ...}` body.
pub fn validation_reply(detail: &str) -> ServiceReply {
    ServiceReply {
        status: 400,
        statistics_header: None,
        body: format!(r#"{{"detail": "{detail}"}}"#).into_bytes(),
    }
}

/// A triangle over Hanoi, good enough for any submission fixture.
pub fn triangle() -> Geometry {
    Geometry::polygon(vec![
        LatLng::new(21.0285, 105.8542),
        LatLng::new(21.0385, 105.8542),
        LatLng::new(21.0385, 105.8642),
    ])
    .expect("valid fixture polygon")
}

/// Store pre-loaded with one triangle.
pub fn store_with_triangle() -> RegionStore {
    let mut store = RegionStore::new();
    store.add(triangle());
    store
}

/// A single-polygon GeoJSON document.
pub fn polygon_document() -> String {
    r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[105.8, 21.0], [105.9, 21.0], [105.9, 21.1], [105.8, 21.0]]]
            },
            "properties": {}
        }]
    }"#
    .to_string()
}
