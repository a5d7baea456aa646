//! Summary statistics accompanying an analysis result.

use serde::{Deserialize, Serialize};

/// One named measurement from the analysis service, e.g. total biomass or
/// carbon stock. The unit is an opaque display label (`ha`, `Mg`, `Mg/ha`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

/// Ordered set of statistics. Order is display order and carries no other
/// meaning. An empty set is a valid result (the service sent no
/// statistics header), not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsSet(Vec<Statistic>);

impl StatisticsSet {
    pub fn new(statistics: Vec<Statistic>) -> Self {
        Self(statistics)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statistic> {
        self.0.iter()
    }
}

impl From<Vec<Statistic>> for StatisticsSet {
    fn from(statistics: Vec<Statistic>) -> Self {
        Self(statistics)
    }
}

impl<'a> IntoIterator for &'a StatisticsSet {
    type Item = &'a Statistic;
    type IntoIter = std::slice::Iter<'a, Statistic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
