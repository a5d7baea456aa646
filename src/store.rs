//! In-memory region store.
//!
//! Holds the geometries awaiting submission, in insertion order. The store
//! performs no validation of its own; the draw tool and import adapter only
//! hand over structurally valid geometries.

use crate::models::{Bounds, FeatureCollection, Geometry};

/// Ordered collection of geometries awaiting analysis.
#[derive(Debug, Clone, Default)]
pub struct RegionStore {
    geometries: Vec<Geometry>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a geometry. Duplicates are allowed.
    pub fn add(&mut self, geometry: Geometry) {
        self.geometries.push(geometry);
    }

    /// Empty the store. Callers must treat any overlay tied to the previous
    /// geometries as stale.
    pub fn clear(&mut self) {
        self.geometries.clear();
    }

    /// An empty store disables submission and the clear control.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Serialize to the interchange document sent to the analysis service.
    /// Lossless: coordinate values pass through untouched.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection::new(self.geometries.iter().map(|g| g.to_feature()).collect())
    }

    /// Combined bounding box over all stored geometries, `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.geometries.iter().map(|g| g.bounds());
        let first = iter.next()?;
        Some(iter.fold(first, Bounds::merge))
    }
}
