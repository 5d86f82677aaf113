use std::{fs, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    direction::Direction,
    error::{OutpaintError, Result},
};

/// Default mask level for pixels taken unchanged from the source
pub const DEFAULT_MASK_BACKGROUND: u16 = 0x0000;
/// Default feather, in source pixels, that the mask gradient reaches into the image
pub const DEFAULT_EDGE_OFFSET: u32 = 32;
/// Default seed for pixel decorrelation
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Pixel budget and bounds used to build an [`AspectCatalog`](crate::AspectCatalog).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub max_pixels: u64,
    pub min_pixels: u64,
    pub max_dimension: u32,
    pub min_dimension: u32,
    pub default_dimension: u32,
    pub dimension_step: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_pixels: 960 * 1024,
            min_pixels: 768 * 768,
            max_dimension: 1536,
            min_dimension: 512,
            default_dimension: 768,
            dimension_step: 64,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `MAX_PIXELS`, `MIN_PIXELS`, `MAX_DIMENSION`,
    /// `MIN_DIMENSION`, `DEFAULT_DIMENSION` and `DIMENSION_STEP`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    /// Unparseable values are logged and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_pixels: parse_var(&lookup, "MAX_PIXELS", defaults.max_pixels),
            min_pixels: parse_var(&lookup, "MIN_PIXELS", defaults.min_pixels),
            max_dimension: parse_var(&lookup, "MAX_DIMENSION", defaults.max_dimension),
            min_dimension: parse_var(&lookup, "MIN_DIMENSION", defaults.min_dimension),
            default_dimension: parse_var(&lookup, "DEFAULT_DIMENSION", defaults.default_dimension),
            dimension_step: parse_var(&lookup, "DIMENSION_STEP", defaults.dimension_step),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads a `.toml` or `.json` file, picked by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(OutpaintError::UnsupportedFileFormat),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(err) => {
            warn!("error parsing {key}, using default of {default}: {err}");
            default
        }
    }
}

/// Per-call options for [`prepare_outpaint`](crate::prepare_outpaint).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct OutpaintOptions {
    /// Edge or center the source is pinned to
    pub anchor: Direction,
    /// 16-bit mask level for preserved source pixels
    pub mask_background: u16,
    /// Blur radius applied across the reflected seams, 0 disables blurring
    pub blur_radius: u32,
    /// Randomly permute pixels inside reflected strips
    pub decorrelate: bool,
    /// Source pixels the mask gradient extends past the seam
    pub edge_offset: u32,
    /// Seed for the decorrelation permutation
    pub seed: u64,
}

impl Default for OutpaintOptions {
    fn default() -> Self {
        Self {
            anchor: Direction::Center,
            mask_background: DEFAULT_MASK_BACKGROUND,
            blur_radius: 0,
            decorrelate: false,
            edge_offset: DEFAULT_EDGE_OFFSET,
            seed: DEFAULT_SEED,
        }
    }
}
