//! GeoJSON file import.
//!
//! Parses an uploaded `.geojson` document into region-store geometries.
//! Import is all-or-nothing: a document either yields one geometry per
//! feature or fails without touching the store.

use serde::Deserialize;

use crate::models::{Bounds, FeatureCollection, Geometry};

/// Caps applied to imported documents. The service enforces its own limits
/// server-side; these exist so an oversized upload fails fast with a clear
/// message instead of a slow round trip.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImportLimits {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_features() -> usize {
    500
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            max_features: default_max_features(),
        }
    }
}

/// Error type for file import. Shown inline to the user; no partial import
/// ever occurs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    /// Malformed GeoJSON. Carries the JSON path of the failing element.
    #[error("Could not parse GeoJSON: {0}")]
    ParseFailure(String),

    /// Well-formed document with zero features.
    #[error("The file contains no features")]
    EmptyCollection,

    /// File exceeds the configured byte cap.
    #[error("File is too large ({size} bytes, limit {limit})")]
    TooLarge { size: usize, limit: usize },

    /// Document exceeds the configured feature-count cap.
    #[error("Too many features ({count}, limit {limit})")]
    TooManyFeatures { count: usize, limit: usize },

    /// A feature carries a non-polygonal or empty geometry.
    #[error("Feature {index} is not a polygonal geometry")]
    InvalidGeometry { index: usize },
}

/// Result of a successful import: the parsed geometries plus the combined
/// bounding box the viewport should refit to.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub geometries: Vec<Geometry>,
    pub fit_bounds: Bounds,
}

/// Parse raw file bytes into geometries.
///
/// Fails with [`ImportError::ParseFailure`] on malformed syntax and
/// [`ImportError::EmptyCollection`] on a featureless document. Every feature
/// must carry a polygonal geometry; one bad feature fails the whole import.
pub fn import_geojson(
    bytes: &[u8],
    limits: &ImportLimits,
) -> Result<ImportOutcome, ImportError> {
    if bytes.len() > limits.max_bytes {
        return Err(ImportError::TooLarge {
            size: bytes.len(),
            limit: limits.max_bytes,
        });
    }

    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let document: FeatureCollection = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| ImportError::ParseFailure(e.to_string()))?;

    if document.features.is_empty() {
        return Err(ImportError::EmptyCollection);
    }
    if document.features.len() > limits.max_features {
        return Err(ImportError::TooManyFeatures {
            count: document.features.len(),
            limit: limits.max_features,
        });
    }

    let mut geometries = Vec::with_capacity(document.features.len());
    for (index, feature) in document.features.into_iter().enumerate() {
        let geometry = Geometry::imported(feature)
            .map_err(|_| ImportError::InvalidGeometry { index })?;
        geometries.push(geometry);
    }

    let mut boxes = geometries.iter().map(|g| g.bounds());
    let first = boxes.next().ok_or(ImportError::EmptyCollection)?;
    let fit_bounds = boxes.fold(first, Bounds::merge);

    tracing::info!(features = geometries.len(), "imported GeoJSON document");

    Ok(ImportOutcome {
        geometries,
        fit_bounds,
    })
}
