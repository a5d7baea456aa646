//! Draw-tool state machine.
//!
//! The interactive drawing modes are mutually exclusive: at any instant the
//! tool is idle or drawing exactly one shape kind. The machine is pure with
//! respect to the map widget — widget callbacks are translated into
//! [`DrawEvent`] values and fed through [`DrawTool::handle`], which returns
//! the completed geometry when a drawing session finishes.

use crate::models::{Geometry, LatLng};

/// Which drawing tool the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Rectangle,
    Polygon,
}

/// Current tool state. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Idle,
    DrawingRectangle,
    DrawingPolygon,
}

/// A finalized vertex sequence reported by the map widget.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletedShape {
    Rectangle {
        south_west: LatLng,
        north_east: LatLng,
    },
    Polygon {
        vertices: Vec<LatLng>,
    },
}

/// Discrete events dispatched into the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// User picked a tool. Selecting while drawing discards the previous
    /// session's uncommitted vertices.
    ToolSelected(ToolKind),
    /// The widget finalized a shape for the active tool.
    DrawCompleted(CompletedShape),
    /// Explicit cancel (escape, tool toggle off).
    Cancel,
    /// Geolocation jump; the original UI disables the draw tool here.
    LocationFound,
}

/// The draw-tool state machine.
#[derive(Debug, Clone, Default)]
pub struct DrawTool {
    mode: DrawMode,
}

impl DrawTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == DrawMode::Idle
    }

    /// Apply one event, returning a completed geometry when a drawing
    /// session finishes.
    ///
    /// Completions are only accepted while the matching mode is active;
    /// anything else (a stale widget callback, a degenerate shape) is
    /// discarded and never reaches the region store.
    pub fn handle(&mut self, event: DrawEvent) -> Option<Geometry> {
        match event {
            DrawEvent::ToolSelected(ToolKind::Rectangle) => {
                self.mode = DrawMode::DrawingRectangle;
                None
            }
            DrawEvent::ToolSelected(ToolKind::Polygon) => {
                self.mode = DrawMode::DrawingPolygon;
                None
            }
            DrawEvent::Cancel | DrawEvent::LocationFound => {
                self.mode = DrawMode::Idle;
                None
            }
            DrawEvent::DrawCompleted(shape) => self.complete(shape),
        }
    }

    fn complete(&mut self, shape: CompletedShape) -> Option<Geometry> {
        let geometry = match (self.mode, shape) {
            (
                DrawMode::DrawingRectangle,
                CompletedShape::Rectangle {
                    south_west,
                    north_east,
                },
            ) => Some(Geometry::rectangle(south_west, north_east)),
            (DrawMode::DrawingPolygon, CompletedShape::Polygon { vertices }) => {
                match Geometry::polygon(vertices) {
                    Ok(geometry) => Some(geometry),
                    Err(e) => {
                        tracing::debug!(error = %e, "discarding degenerate drawn polygon");
                        None
                    }
                }
            }
            (mode, shape) => {
                tracing::debug!(?mode, ?shape, "discarding completion for inactive tool");
                None
            }
        };
        self.mode = DrawMode::Idle;
        geometry
    }
}
