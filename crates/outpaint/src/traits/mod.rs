use image::{ImageFormat, RgbaImage};
use crate::{error::Result, types::{DecodedImage, MaskImage}};

/// Trait for the raster decode/encode boundary
pub trait ImageCodec: Send + Sync {
    /// Decode bytes into RGBA pixels, detecting the stored format
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;

    /// Encode a canvas in the canonical format
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>>;

    /// Encode a 16-bit grayscale mask in the canonical format
    fn encode_mask(&self, mask: &MaskImage) -> Result<Vec<u8>>;

    /// Format that outputs are written in; inputs already in it may pass through
    fn canonical_format(&self) -> ImageFormat;
}

/// Trait for resampling algorithms
pub trait Resampler: Send + Sync {
    /// Resize to exactly `width` x `height`
    fn resize(&self, image: &RgbaImage, width: u32, height: u32) -> RgbaImage;
}

/// Trait for the blur applied across reflected seams
pub trait EdgeBlur: Send + Sync {
    /// Blur the whole image with the given radius; radius 0 returns a copy
    fn blur(&self, image: &RgbaImage, radius: u32) -> RgbaImage;
}
