use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::{AspectCatalog, AspectRatio};

/// Ordered list of aspect ratios, independent of any one catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AspectCollection(Vec<AspectRatio>);

impl AspectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `aspect` unless an entry with the same label exists.
    pub fn insert(&mut self, aspect: AspectRatio) -> bool {
        if self.0.iter().any(|a| a.label == aspect.label) {
            return false;
        }
        self.0.push(aspect);
        true
    }

    /// Appends `aspect` unless an entry with the same pixel dimensions exists.
    pub fn insert_unique_dimensions(&mut self, aspect: AspectRatio) -> bool {
        if self.0.iter().any(|a| a.dimensions() == aspect.dimensions()) {
            return false;
        }
        self.0.push(aspect);
        true
    }

    /// Stable sort by pixel area, smallest first.
    pub fn sort_by_resolution(&mut self) {
        self.0.sort_by_key(|a| a.dimensions().area());
    }

    pub fn iter(&self) -> impl Iterator<Item = &AspectRatio> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[AspectRatio] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<AspectRatio> {
        self.0
    }
}

impl FromIterator<AspectRatio> for AspectCollection {
    fn from_iter<I: IntoIterator<Item = AspectRatio>>(iter: I) -> Self {
        let mut collection = Self::new();
        for aspect in iter {
            collection.insert(aspect);
        }
        collection
    }
}

/// Sweeps pixel budgets from `min_pixels` to `max_pixels` in `step²`
/// increments and collects, per budget, the most extreme portrait and
/// landscape entries.
///
/// The ladder starts from the square entry of a 512×512 budget. Entries
/// whose area was already seen, or whose dimensions are already present, are
/// skipped. The result is sorted by resolution.
pub fn resolution_ladder(
    min_pixels: u64,
    max_pixels: u64,
    step: u32,
    min_dimension: u32,
    max_dimension: u32,
) -> AspectCollection {
    let step = step.max(1);
    let increment = step as u64 * step as u64;
    let mut ladder = AspectCollection::new();
    let mut seen_areas = HashSet::new();

    let seed = AspectCatalog::new(512 * 512, step, min_dimension.min(512), max_dimension.max(512));
    if let Ok(square) = seed.get("1:1") {
        seen_areas.insert(square.dimensions().area());
        ladder.insert_unique_dimensions(square.clone());
    }

    let mut budget = min_pixels;
    while budget <= max_pixels {
        let catalog = AspectCatalog::new(budget, step, min_dimension, max_dimension);
        let smallest = catalog.iter().min_by_key(|a| a.width.min(a.height));
        let largest = catalog.iter().max_by_key(|a| a.width.max(a.height));

        for aspect in [smallest, largest].into_iter().flatten() {
            let area = aspect.dimensions().area();
            if seen_areas.insert(area) && ladder.insert_unique_dimensions(aspect.clone()) {
                debug!(budget, label = %aspect.label, dims = %aspect.dimensions(), "ladder entry");
            }
        }
        let Some(next) = budget.checked_add(increment) else {
            break;
        };
        budget = next;
    }

    ladder.sort_by_resolution();
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AspectCatalog {
        AspectCatalog::new(1_048_576, 64, 256, 1536)
    }

    #[test]
    fn test_insert_rejects_duplicate_labels() {
        let catalog = catalog();
        let mut collection = AspectCollection::new();
        assert!(collection.insert(catalog.get("1:1").unwrap().clone()));
        assert!(!collection.insert(catalog.get("1:1").unwrap().clone()));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_dimensions() {
        let small = AspectCatalog::new(262_144, 64, 64, 2048);
        let large = catalog();
        let mut collection = AspectCollection::new();
        assert!(collection.insert_unique_dimensions(large.get("1:1").unwrap().clone()));
        assert!(collection.insert_unique_dimensions(small.get("1:1").unwrap().clone()));
        assert!(!collection.insert_unique_dimensions(large.get("1:1").unwrap().clone()));
    }

    #[test]
    fn test_sort_by_resolution() {
        let mut collection: AspectCollection = catalog().iter().cloned().collect();
        collection.sort_by_resolution();
        let areas: Vec<u64> = collection.iter().map(|a| a.dimensions().area()).collect();
        assert!(areas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_ladder_is_sorted_and_unique() {
        let ladder = resolution_ladder(768 * 768, 1024 * 1024, 64, 64, 2048);
        assert!(ladder.len() > 1);
        assert_eq!(ladder.as_slice()[0].dimensions().area(), 512 * 512);

        let areas: Vec<u64> = ladder.iter().map(|a| a.dimensions().area()).collect();
        assert!(areas.windows(2).all(|w| w[0] <= w[1]));
        let unique: HashSet<u64> = areas.iter().copied().collect();
        assert_eq!(unique.len(), areas.len());
    }

    #[test]
    fn test_empty_sweep_keeps_seed() {
        let ladder = resolution_ladder(2_000_000, 1_000_000, 64, 64, 2048);
        assert_eq!(ladder.len(), 1);
    }
}
