use std::fmt;
use std::str::FromStr;

use image::{ImageBuffer, ImageFormat, Luma, RgbaImage};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::OutpaintAction;

/// 16-bit grayscale soft mask
pub type MaskImage = ImageBuffer<Luma<u16>, Vec<u16>>;

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Width divided by height as a float
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Euclidean distance between two pixel pairs
    pub fn distance_to(&self, other: Dimensions) -> f64 {
        let dx = self.width as f64 - other.width as f64;
        let dy = self.height as f64 - other.height as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `768x512`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse::<u32>().map_err(|e| format!("invalid width '{w}': {e}"))?;
        let height = h.trim().parse::<u32>().map_err(|e| format!("invalid height '{h}': {e}"))?;
        Ok(Self { width, height })
    }
}

/// A decoded source image together with the format it was stored in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: RgbaImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.pixels.width(), self.pixels.height())
    }
}

/// Output of an outpaint preparation.
///
/// `mask` is `None` whenever one of the short-circuit paths was taken
/// (passthrough, re-encode only, or a resize that already fills the target).
#[derive(Debug, Clone)]
pub struct CompositeResult {
    pub canvas: Vec<u8>,
    pub mask: Option<Vec<u8>>,
    pub source: Dimensions,
    pub source_format: ImageFormat,
    pub scaled: Dimensions,
    pub action: OutpaintAction,
}

/// Output of coercing an image onto the nearest aligned aspect.
#[derive(Debug, Clone)]
pub struct CoercedImage {
    pub bytes: Vec<u8>,
    pub source: Dimensions,
    pub source_format: ImageFormat,
    pub scaled: Dimensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        let dims: Dimensions = "768x512".parse().unwrap();
        assert_eq!(dims, Dimensions::new(768, 512));
        assert_eq!(dims.to_string(), "768x512");
        assert!("768".parse::<Dimensions>().is_err());
        assert!("axb".parse::<Dimensions>().is_err());
    }

    #[test]
    fn test_area_and_distance() {
        let a = Dimensions::new(1024, 1024);
        assert_eq!(a.area(), 1_048_576);
        let b = Dimensions::new(1027, 1028);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-9);
    }
}
