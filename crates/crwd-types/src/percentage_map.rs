use crate::CauseId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from cause identifier to a percentage in `0.0..=100.0`.
///
/// Iteration is in ascending cause-identifier order. The sum normalizer picks
/// its slack entry by scanning in this order, so the order is part of the
/// contract and must stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentageMap(BTreeMap<CauseId, f64>);

impl PercentageMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Number of causes in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no causes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Percentage held by `id`, if present.
    pub fn get(&self, id: CauseId) -> Option<f64> {
        self.0.get(&id).copied()
    }

    /// Whether `id` is part of the map.
    pub fn contains(&self, id: CauseId) -> bool {
        self.0.contains_key(&id)
    }

    /// Sets the percentage of `id`, returning the previous value.
    pub fn insert(&mut self, id: CauseId, percentage: f64) -> Option<f64> {
        self.0.insert(id, percentage)
    }

    /// Iterates `(id, percentage)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CauseId, f64)> + '_ {
        self.0.iter().map(|(id, p)| (*id, *p))
    }

    /// Mutable access to every percentage, in ascending id order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = (CauseId, &mut f64)> + '_ {
        self.0.iter_mut().map(|(id, p)| (*id, p))
    }

    /// Cause identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CauseId> + '_ {
        self.0.keys().copied()
    }

    /// Raw sum of all percentages.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(CauseId, f64)> for PercentageMap {
    fn from_iter<I: IntoIterator<Item = (CauseId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PercentageMap {
    type Item = (CauseId, f64);
    type IntoIter = std::collections::btree_map::IntoIter<CauseId, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
