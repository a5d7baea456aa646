//! Event facade over the whole selection-and-analysis pipeline.
//!
//! [`MapController`] owns the region store, draw tool, orchestrator, and
//! overlay slot, and exposes one method per discrete UI event. All methods
//! run on the single event thread; only resolution tasks run elsewhere, and
//! those re-enter through the tracker.

use std::sync::Arc;

use uuid::Uuid;

use crate::client::orchestrator::AnalysisOrchestrator;
use crate::client::tracker::DisplayState;
use crate::client::transport::{AnalysisTransport, Credentials, Tier};
use crate::draw::{CompletedShape, DrawEvent, DrawMode, DrawTool, ToolKind};
use crate::error::Result;
use crate::import::{import_geojson, ImportError, ImportLimits};
use crate::models::{Bounds, StatisticsSet};
use crate::overlay::OverlayRenderer;
use crate::store::RegionStore;

/// The map controller: draw, import, submit, render.
pub struct MapController {
    store: RegionStore,
    draw: DrawTool,
    orchestrator: AnalysisOrchestrator,
    overlay: OverlayRenderer,
    limits: ImportLimits,
    rendered_request: Option<Uuid>,
}

impl MapController {
    pub fn new(transport: Arc<dyn AnalysisTransport>, limits: ImportLimits) -> Self {
        Self {
            store: RegionStore::new(),
            draw: DrawTool::new(),
            orchestrator: AnalysisOrchestrator::new(transport),
            overlay: OverlayRenderer::new(),
            limits,
            rendered_request: None,
        }
    }

    /// User picked a drawing tool.
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.draw.handle(DrawEvent::ToolSelected(kind));
    }

    /// User cancelled the active drawing session.
    pub fn cancel_draw(&mut self) {
        self.draw.handle(DrawEvent::Cancel);
    }

    /// Geolocation completed; the draw tool is disabled, the viewport jump
    /// itself is the map widget's business.
    pub fn locate_found(&mut self) {
        self.draw.handle(DrawEvent::LocationFound);
    }

    /// The map widget finalized a drawn shape.
    pub fn draw_completed(&mut self, shape: CompletedShape) {
        if let Some(geometry) = self.draw.handle(DrawEvent::DrawCompleted(shape)) {
            self.store.add(geometry);
        }
    }

    /// Import an uploaded `.geojson` file.
    ///
    /// The draw tool is reset to idle first (import and draw are mutually
    /// exclusive within one interaction). On success every parsed feature
    /// lands in the store and the returned bounds are what the viewport
    /// should refit to. On failure nothing changes.
    pub fn import_file(&mut self, bytes: &[u8]) -> std::result::Result<Bounds, ImportError> {
        self.draw.handle(DrawEvent::Cancel);
        let outcome = import_geojson(bytes, &self.limits)?;
        for geometry in outcome.geometries {
            self.store.add(geometry);
        }
        Ok(outcome.fit_bounds)
    }

    /// Clear everything visible: drawn features, the rendered overlay, and
    /// any displayed (terminal) analysis outcome.
    pub fn clear_features(&mut self) {
        self.store.clear();
        self.overlay.clear_all();
        self.rendered_request = None;
        self.orchestrator.tracker().acknowledge();
    }

    /// Submit the current selection for analysis.
    pub fn analyze(&mut self, tier: Tier, credentials: Option<&Credentials>) -> Result<Uuid> {
        self.orchestrator.submit(&mut self.store, tier, credentials)
    }

    /// Read the current display state, rendering a freshly resolved raster
    /// into the overlay slot exactly once per request.
    pub fn poll(&mut self) -> DisplayState {
        let state = self.orchestrator.tracker().display_state();
        if let DisplayState::Ready {
            request,
            estimation,
        } = &state
        {
            if self.rendered_request != Some(*request) {
                self.overlay.render(estimation.raster.clone());
                self.rendered_request = Some(*request);
            }
        }
        state
    }

    /// Acknowledge a displayed failure, returning the display to idle.
    pub fn acknowledge(&mut self) {
        self.orchestrator.tracker().acknowledge();
    }

    /// Statistics of the currently displayed result, if any.
    pub fn statistics(&self) -> Option<StatisticsSet> {
        match self.orchestrator.tracker().display_state() {
            DisplayState::Ready { estimation, .. } => Some(estimation.statistics),
            _ => None,
        }
    }

    /// Whether the analyze/clear controls should be shown.
    pub fn has_features(&self) -> bool {
        !self.store.is_empty() || self.overlay.is_visible()
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw.mode()
    }

    pub fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }

    pub fn tracker(&self) -> &crate::client::tracker::RequestTracker {
        self.orchestrator.tracker()
    }
}
