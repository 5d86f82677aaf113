//! Canonical aspect ratios resolved to step-aligned pixel dimensions.

pub mod collection;
pub mod outpaints;
pub mod resolver;

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::CatalogConfig,
    error::{OutpaintError, Result},
    types::Dimensions,
};

pub use collection::{resolution_ladder, AspectCollection};
pub use outpaints::AspectOutpaints;

/// Canonical ratios in catalog insertion order.
pub const CANONICAL_RATIOS: &[(&str, u32, u32)] = &[
    ("21:9", 21, 9),
    ("16:9", 16, 9),
    ("8:5", 8, 5),
    ("5:4", 5, 4),
    ("4:3", 4, 3),
    ("3:2", 3, 2),
    ("1:1", 1, 1),
    ("2:3", 2, 3),
    ("3:4", 3, 4),
    ("4:5", 4, 5),
    ("5:8", 5, 8),
    ("9:16", 9, 16),
    ("9:19", 9, 19),
    ("9:21", 9, 21),
];

/// Resolution parameters a catalog was built with.
///
/// Every [`AspectRatio`] carries a copy so it can be re-resolved under a
/// different budget without a reference back to its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogParams {
    pub max_pixels: u64,
    pub step: u32,
    pub min_dimension: u32,
    pub max_dimension: u32,
}

impl CatalogParams {
    pub fn new(max_pixels: u64, step: u32, min_dimension: u32, max_dimension: u32) -> Self {
        Self {
            max_pixels,
            step: step.max(1),
            min_dimension,
            max_dimension,
        }
    }

    /// Both sides within `[min_dimension, max_dimension]`
    pub fn within_bounds(&self, dims: Dimensions) -> bool {
        let range = self.min_dimension..=self.max_dimension;
        range.contains(&dims.width) && range.contains(&dims.height)
    }

    pub fn fits_budget(&self, dims: Dimensions) -> bool {
        dims.area() <= self.max_pixels
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AspectRatio {
    pub label: String,
    pub ratio_width: u32,
    pub ratio_height: u32,
    /// Resolved pixel width, a multiple of the catalog step
    pub width: u32,
    /// Resolved pixel height, a multiple of the catalog step
    pub height: u32,
    params: CatalogParams,
}

impl AspectRatio {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn params(&self) -> &CatalogParams {
        &self.params
    }

    pub fn ratio(&self) -> f64 {
        self.ratio_width as f64 / self.ratio_height as f64
    }

    /// Re-resolves this ratio under another pixel budget, keeping the
    /// catalog's alignment step.
    pub fn resolve_at(&self, budget: u64) -> Result<Dimensions> {
        resolve_ratio(self.ratio_width, self.ratio_height, budget, self.params.step)
            .ok_or_else(|| OutpaintError::Unresolvable {
                label: self.label.clone(),
                budget,
            })
    }

    pub fn distance_to(&self, point: Dimensions) -> f64 {
        self.dimensions().distance_to(point)
    }
}

fn resolve_ratio(ratio_width: u32, ratio_height: u32, budget: u64, step: u32) -> Option<Dimensions> {
    let (width, height) =
        resolver::resolve_within_budget(ratio_width as u64, ratio_height as u64, budget, step as u64)?;
    Some(Dimensions::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?))
}

/// Immutable table of aspect ratios for one (budget, step, bounds) tuple.
///
/// Forward (label) and reverse (exact pixel pair) lookups always agree: an
/// entry that violates the bounds, or resolves to a pixel pair already taken
/// by an earlier entry, is left out at construction.
#[derive(Debug, Clone)]
pub struct AspectCatalog {
    params: CatalogParams,
    entries: Vec<AspectRatio>,
    by_label: HashMap<String, usize>,
    by_pixels: HashMap<Dimensions, usize>,
}

impl AspectCatalog {
    /// Builds the catalog from the canonical ratios
    pub fn new(max_pixels: u64, step: u32, min_dimension: u32, max_dimension: u32) -> Self {
        Self::with_ratios(
            CatalogParams::new(max_pixels, step, min_dimension, max_dimension),
            CANONICAL_RATIOS.iter().map(|&(label, w, h)| (label, w, h)),
        )
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            config.max_pixels,
            config.dimension_step,
            config.min_dimension,
            config.max_dimension,
        )
    }

    /// Builds a catalog from an arbitrary list of `(label, width, height)`
    /// ratios. Later duplicates of a label or pixel pair are skipped.
    pub fn with_ratios<I, S>(params: CatalogParams, ratios: I) -> Self
    where
        I: IntoIterator<Item = (S, u32, u32)>,
        S: Into<String>,
    {
        let params = CatalogParams::new(params.max_pixels, params.step, params.min_dimension, params.max_dimension);
        let mut catalog = Self {
            params,
            entries: Vec::new(),
            by_label: HashMap::new(),
            by_pixels: HashMap::new(),
        };

        for (label, ratio_width, ratio_height) in ratios {
            let label = label.into();
            if catalog.by_label.contains_key(&label) {
                debug!(%label, "duplicate aspect label skipped");
                continue;
            }
            let Some(dims) = resolve_ratio(ratio_width, ratio_height, params.max_pixels, params.step) else {
                debug!(%label, "aspect ratio did not resolve within budget");
                continue;
            };
            if !params.within_bounds(dims) {
                debug!(%label, %dims, "aspect ratio outside dimension bounds");
                continue;
            }
            if catalog.by_pixels.contains_key(&dims) {
                debug!(%label, %dims, "aspect ratio resolves to an existing entry");
                continue;
            }

            let index = catalog.entries.len();
            catalog.by_label.insert(label.clone(), index);
            catalog.by_pixels.insert(dims, index);
            catalog.entries.push(AspectRatio {
                label,
                ratio_width,
                ratio_height,
                width: dims.width,
                height: dims.height,
                params,
            });
        }

        info!(
            max_pixels = params.max_pixels,
            step = params.step,
            entries = catalog.entries.len(),
            "built aspect catalog"
        );
        catalog
    }

    pub fn params(&self) -> &CatalogParams {
        &self.params
    }

    pub fn max_pixels(&self) -> u64 {
        self.params.max_pixels
    }

    pub fn step(&self) -> u32 {
        self.params.step
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &AspectRatio> {
        self.entries.iter()
    }

    pub fn get(&self, label: &str) -> Result<&AspectRatio> {
        self.by_label
            .get(label)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| OutpaintError::NotFound { label: label.to_string() })
    }

    /// Width and height of `label` under `budget` pixels.
    pub fn resolve_dimensions(&self, label: &str, budget: u64) -> Result<(u32, u32)> {
        let dims = self.get(label)?.resolve_at(budget)?;
        Ok((dims.width, dims.height))
    }

    /// Exact reverse lookup of a resolved pixel pair.
    pub fn lookup(&self, width: u32, height: u32) -> Option<&AspectRatio> {
        self.by_pixels
            .get(&Dimensions::new(width, height))
            .map(|&index| &self.entries[index])
    }

    /// Every entry ordered by pixel distance to `point`; ties keep catalog order.
    pub fn sorted_by_nearest(&self, point: Dimensions) -> Vec<&AspectRatio> {
        let mut sorted: Vec<&AspectRatio> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)));
        sorted
    }

    /// Step-aligned dimensions nearest to an arbitrary `width:height` shape
    /// under `budget`, without the budget-shrinking pass.
    pub fn nearest_aspect_dimensions(&self, width: u32, height: u32, budget: u64) -> Dimensions {
        let (w, h) = resolver::nearest_aspect_dimensions(width as u64, height as u64, budget, self.params.step as u64);
        Dimensions::new(
            u32::try_from(w).unwrap_or(u32::MAX),
            u32::try_from(h).unwrap_or(u32::MAX),
        )
    }
}

impl Default for AspectCatalog {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}
