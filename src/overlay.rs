//! Raster overlay and statistics presentation.
//!
//! The renderer owns a single current-overlay slot. Installing a new
//! artifact replaces the old one in a single assignment, so there is never a
//! frame with both or neither overlay.

use uuid::Uuid;

use crate::models::StatisticsSet;

/// Binary raster result (GeoTIFF bytes) plus the parameters needed to build
/// a visual overlay from it.
#[derive(Debug, Clone)]
pub struct RasterArtifact {
    bytes: Vec<u8>,
    pub band: u16,
    pub display_min: f64,
    pub display_max: f64,
    pub color_scale: String,
    pub opacity: f64,
}

impl RasterArtifact {
    /// Artifact with the render parameters the map UI uses for biomass
    /// rasters: band 1, normalized display range, rainbow scale.
    pub fn geotiff(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            band: 1,
            display_min: -1.0,
            display_max: 1.0,
            color_scale: "rainbow".to_string(),
            opacity: 1.0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Opaque handle to a rendered overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayHandle(Uuid);

/// Single-slot overlay renderer.
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    current: Option<(OverlayHandle, RasterArtifact)>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an artifact as the current overlay, replacing any previous
    /// one atomically. The old payload is released here.
    pub fn render(&mut self, artifact: RasterArtifact) -> OverlayHandle {
        let handle = OverlayHandle(Uuid::new_v4());
        self.current = Some((handle, artifact));
        handle
    }

    /// Remove the overlay identified by `handle`, releasing its payload.
    /// A stale handle (already replaced) is a no-op.
    pub fn clear(&mut self, handle: OverlayHandle) -> bool {
        match self.current {
            Some((current, _)) if current == handle => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Remove whatever overlay is displayed.
    pub fn clear_all(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<(OverlayHandle, &RasterArtifact)> {
        self.current.as_ref().map(|(h, a)| (*h, a))
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }
}

/// One formatted line of the statistics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticRow {
    pub name: String,
    pub value: String,
    pub unit: String,
}

/// Format statistics for display. Locale-stable: `.` decimal separator, two
/// fractional digits, no digit grouping. Display-only — the numeric values
/// in the set are never altered.
pub fn format_statistics(statistics: &StatisticsSet) -> Vec<StatisticRow> {
    statistics
        .iter()
        .map(|s| StatisticRow {
            name: s.name.clone(),
            value: format!("{:.2}", s.value),
            unit: s.unit.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Statistic;

    #[test]
    fn test_render_replaces_previous_overlay() {
        let mut renderer = OverlayRenderer::new();
        let first = renderer.render(RasterArtifact::geotiff(b"one".to_vec()));
        let second = renderer.render(RasterArtifact::geotiff(b"two".to_vec()));

        assert_ne!(first, second);
        let (handle, artifact) = renderer.current().unwrap();
        assert_eq!(handle, second);
        assert_eq!(artifact.bytes(), b"two");
    }

    #[test]
    fn test_clear_with_current_handle() {
        let mut renderer = OverlayRenderer::new();
        let handle = renderer.render(RasterArtifact::geotiff(b"x".to_vec()));
        assert!(renderer.clear(handle));
        assert!(!renderer.is_visible());
    }

    #[test]
    fn test_clear_with_stale_handle_is_noop() {
        let mut renderer = OverlayRenderer::new();
        let stale = renderer.render(RasterArtifact::geotiff(b"x".to_vec()));
        let fresh = renderer.render(RasterArtifact::geotiff(b"y".to_vec()));
        assert!(!renderer.clear(stale));
        assert!(renderer.is_visible());
        assert!(renderer.clear(fresh));
    }

    #[test]
    fn test_geotiff_render_defaults() {
        let artifact = RasterArtifact::geotiff(vec![]);
        assert_eq!(artifact.band, 1);
        assert_eq!(artifact.display_min, -1.0);
        assert_eq!(artifact.display_max, 1.0);
        assert_eq!(artifact.color_scale, "rainbow");
        assert_eq!(artifact.opacity, 1.0);
    }

    #[test]
    fn test_statistics_formatting_is_locale_stable() {
        let statistics = StatisticsSet::new(vec![
            Statistic {
                name: "Area".into(),
                value: 1234.5,
                unit: "ha".into(),
            },
            Statistic {
                name: "Carbon stock".into(),
                value: 0.125,
                unit: "Mg".into(),
            },
        ]);
        let rows = format_statistics(&statistics);
        assert_eq!(rows[0].value, "1234.50");
        assert_eq!(rows[1].value, "0.13");
        assert_eq!(rows[1].unit, "Mg");
    }
}
