//! # Outpaint Preparation Library
//!
//! Aspect-ratio resolution and outpaint compositing for diffusion pipelines.
//! Resolves step-aligned canvas sizes under a pixel budget, classifies how a
//! source image relates to a target canvas, and builds the reflected canvas
//! plus a soft 16-bit mask that a generative model inpaints against.
//!
//! ## Core Features
//!
//! - **Aspect Catalog**: canonical ratios resolved to aligned pixel sizes, with
//!   exact reverse lookup and nearest search
//! - **Classification**: source/target relationship reduced to a single action
//! - **Compositor**: trait-based resize, reflection, blur and mask pipeline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use outpaint::{prepare_outpaint, AspectCatalog, OutpaintOptions};
//!
//! let catalog = AspectCatalog::new(1_048_576, 64, 256, 1536);
//! let (width, height) = catalog.resolve_dimensions("16:9", catalog.max_pixels())?;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let result = prepare_outpaint(&bytes, width, height, &OutpaintOptions::default())?;
//! std::fs::write("canvas.png", &result.canvas)?;
//! if let Some(mask) = &result.mask {
//!     std::fs::write("mask.png", mask)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Compositor
//!
//! ```rust,no_run
//! use outpaint::{algorithms::*, Compositor, Direction};
//!
//! let compositor = Compositor::builder()
//!     .with_blur(ImageopsEdgeBlur)
//!     .anchor(Direction::Left)
//!     .blur_radius(8)
//!     .decorrelate(true)
//!     .build();
//! # let bytes: Vec<u8> = Vec::new();
//! let result = compositor.prepare(&bytes, 1344, 768)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod direction;
pub mod config;
pub mod aspect;
pub mod condition;
pub mod traits;
pub mod algorithms;
pub mod pipeline;

// Re-exports for convenience
pub use error::{OutpaintError, Result};
pub use types::{CoercedImage, CompositeResult, DecodedImage, Dimensions, MaskImage};
pub use direction::Direction;
pub use config::{CatalogConfig, OutpaintOptions};
pub use aspect::{resolution_ladder, AspectCatalog, AspectCollection, AspectOutpaints, AspectRatio, CatalogParams};
pub use condition::{classify_transform, Axis, OutpaintAction, OutpaintCondition, OutpaintDescription, SizeRelation};
pub use traits::*;
pub use pipeline::{builder::CompositorBuilder, coerce::coerce_image, Compositor};

/// Prepare `bytes` for outpainting onto a `width` x `height` canvas with the
/// default codec, resampler and blur.
pub fn prepare_outpaint(bytes: &[u8], width: u32, height: u32, options: &OutpaintOptions) -> Result<CompositeResult> {
    Compositor::default().prepare_with(bytes, width, height, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn source_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 251) as u8, (y % 241) as u8, ((x + y) % 199) as u8, 255])
        })
    }

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    fn decode(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    fn decode_mask(bytes: &[u8]) -> MaskImage {
        image::load_from_memory(bytes).unwrap().to_luma16()
    }

    fn options() -> OutpaintOptions {
        OutpaintOptions {
            edge_offset: 0,
            ..OutpaintOptions::default()
        }
    }

    #[test]
    fn test_catalog_contains_square_megapixel() {
        let catalog = AspectCatalog::new(1_048_576, 64, 256, 1536);
        assert_eq!(catalog.resolve_dimensions("1:1", 1_048_576).unwrap(), (1024, 1024));
        assert_eq!(catalog.lookup(1024, 1024).unwrap().label, "1:1");
    }

    #[test]
    fn test_centered_horizontal_outpaint() {
        let source = source_image(512, 512);
        let result = prepare_outpaint(&png_bytes(&source), 768, 512, &options()).unwrap();
        assert_eq!(result.action, OutpaintAction::CenterHorizontal);
        assert_eq!(result.scaled, Dimensions::new(512, 512));
        assert_eq!(result.source, Dimensions::new(512, 512));

        let canvas = decode(&result.canvas);
        assert_eq!(canvas.dimensions(), (768, 512));
        assert_eq!(canvas.get_pixel(128, 40), source.get_pixel(0, 40));
        assert_eq!(canvas.get_pixel(639, 40), source.get_pixel(511, 40));
        // mirrored strips on both sides
        assert_eq!(canvas.get_pixel(127, 40), source.get_pixel(0, 40));
        assert_eq!(canvas.get_pixel(0, 40), source.get_pixel(127, 40));
        assert_eq!(canvas.get_pixel(767, 40), source.get_pixel(384, 40));
        assert!(canvas.pixels().all(|p| p[3] == 255));

        let mask = decode_mask(result.mask.as_deref().unwrap());
        assert_eq!(mask.dimensions(), (768, 512));
        assert_eq!(mask.get_pixel(0, 10)[0], u16::MAX);
        assert_eq!(mask.get_pixel(767, 10)[0], u16::MAX);
        assert_eq!(mask.get_pixel(384, 10)[0], 0);
        assert_eq!(mask.get_pixel(128, 10)[0], 0);
        assert_eq!(mask.get_pixel(127, 10)[0], u16::MAX);
    }

    #[test]
    fn test_reflected_strip_fully_masked() {
        let result = prepare_outpaint(&png_bytes(&source_image(512, 512)), 768, 512, &OutpaintOptions::default()).unwrap();
        let mask = decode_mask(result.mask.as_deref().unwrap());
        // 32px edge offset scales to 48 on a 512 -> 768 extension
        assert_eq!(mask.get_pixel(64, 0)[0], u16::MAX);
        assert_eq!(mask.get_pixel(127, 0)[0], u16::MAX);
        assert_eq!(mask.get_pixel(640, 0)[0], u16::MAX);
        let feather = mask.get_pixel(150, 0)[0];
        assert!(feather > 0 && feather < u16::MAX);
        assert_eq!(mask.get_pixel(176, 0)[0], 0);
        assert_eq!(mask.get_pixel(384, 0)[0], 0);
    }

    #[test]
    fn test_odd_extension_masks_both_strips() {
        let result = prepare_outpaint(&png_bytes(&source_image(512, 512)), 769, 512, &options()).unwrap();
        let mask = decode_mask(result.mask.as_deref().unwrap());
        assert_eq!(mask.get_pixel(127, 0)[0], u16::MAX);
        assert_eq!(mask.get_pixel(128, 0)[0], 0);
        assert_eq!(mask.get_pixel(639, 0)[0], 0);
        assert_eq!(mask.get_pixel(640, 0)[0], u16::MAX);
        assert_eq!(mask.get_pixel(768, 0)[0], u16::MAX);
    }

    #[test]
    fn test_same_size_png_passes_through() {
        let bytes = png_bytes(&source_image(300, 300));
        let result = prepare_outpaint(&bytes, 300, 300, &OutpaintOptions::default()).unwrap();
        assert_eq!(result.canvas, bytes);
        assert!(result.mask.is_none());
        assert_eq!(result.action, OutpaintAction::None);
    }

    #[test]
    fn test_same_size_other_format_is_reencoded() {
        let mut bytes = Vec::new();
        source_image(300, 300)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)
            .unwrap();
        let result = prepare_outpaint(&bytes, 300, 300, &OutpaintOptions::default()).unwrap();
        assert_eq!(result.source_format, ImageFormat::Bmp);
        assert_eq!(image::guess_format(&result.canvas).unwrap(), ImageFormat::Png);
        assert!(result.mask.is_none());
    }

    #[test]
    fn test_cross_axis_anchor_centers() {
        let source = source_image(512, 512);
        let options = OutpaintOptions {
            anchor: Direction::Left,
            ..options()
        };
        let result = prepare_outpaint(&png_bytes(&source), 512, 768, &options).unwrap();
        assert_eq!(result.action, OutpaintAction::CenterVertical);

        let canvas = decode(&result.canvas);
        assert_eq!(canvas.get_pixel(10, 128), source.get_pixel(10, 0));
        let mask = decode_mask(result.mask.as_deref().unwrap());
        assert_eq!(mask.get_pixel(10, 0)[0], u16::MAX);
        assert_eq!(mask.get_pixel(10, 767)[0], u16::MAX);
    }

    #[test]
    fn test_anchored_outpaint_masks_one_edge() {
        let source = source_image(512, 512);
        let options = OutpaintOptions {
            anchor: Direction::Right,
            ..options()
        };
        let result = prepare_outpaint(&png_bytes(&source), 768, 512, &options).unwrap();
        assert_eq!(result.action, OutpaintAction::ToLeft);

        let canvas = decode(&result.canvas);
        assert_eq!(canvas.get_pixel(256, 7), source.get_pixel(0, 7));
        assert_eq!(canvas.get_pixel(767, 7), source.get_pixel(511, 7));
        let mask = decode_mask(result.mask.as_deref().unwrap());
        assert_eq!(mask.get_pixel(0, 0)[0], u16::MAX);
        assert_eq!(mask.get_pixel(767, 0)[0], 0);
        assert_eq!(mask.get_pixel(256, 0)[0], 0);
    }

    #[test]
    fn test_upscale_fills_target_without_mask() {
        let result = prepare_outpaint(&png_bytes(&source_image(256, 256)), 512, 512, &options()).unwrap();
        assert_eq!(result.action, OutpaintAction::ScaleUp);
        assert_eq!(result.scaled, Dimensions::new(512, 512));
        assert!(result.mask.is_none());
        assert_eq!(decode(&result.canvas).dimensions(), (512, 512));
    }

    #[test]
    fn test_tie_break_overflow_switches_axis() {
        let result = prepare_outpaint(&png_bytes(&source_image(200, 100)), 400, 300, &options()).unwrap();
        assert_eq!(result.scaled, Dimensions::new(400, 200));
        assert_eq!(result.action, OutpaintAction::CenterVertical);
        assert_eq!(decode(&result.canvas).dimensions(), (400, 300));
    }

    #[test]
    fn test_mask_background_level() {
        let options = OutpaintOptions {
            mask_background: 0xfff0,
            ..options()
        };
        let result = prepare_outpaint(&png_bytes(&source_image(512, 512)), 768, 512, &options).unwrap();
        let mask = decode_mask(result.mask.as_deref().unwrap());
        assert_eq!(mask.get_pixel(384, 0)[0], 0xfff0);
        assert_eq!(mask.get_pixel(0, 0)[0], u16::MAX);
    }

    #[test]
    fn test_blur_keeps_interior() {
        let source = source_image(512, 512);
        let options = OutpaintOptions {
            blur_radius: 8,
            edge_offset: 32,
            ..OutpaintOptions::default()
        };
        let result = prepare_outpaint(&png_bytes(&source), 768, 512, &options).unwrap();
        let canvas = decode(&result.canvas);
        // edge offset scales 32 -> 48 on a 512 -> 768 extension
        assert_eq!(canvas.get_pixel(128 + 48, 200), source.get_pixel(48, 200));
        assert_eq!(canvas.get_pixel(384, 200), source.get_pixel(256, 200));
        assert_eq!(canvas.get_pixel(639 - 48, 200), source.get_pixel(511 - 48, 200));
    }

    #[test]
    fn test_decorrelation_is_seeded() {
        let bytes = png_bytes(&source_image(256, 256));
        let with_seed = |seed| OutpaintOptions {
            decorrelate: true,
            seed,
            ..options()
        };
        let a = prepare_outpaint(&bytes, 384, 256, &with_seed(1)).unwrap();
        let b = prepare_outpaint(&bytes, 384, 256, &with_seed(1)).unwrap();
        let c = prepare_outpaint(&bytes, 384, 256, &with_seed(2)).unwrap();
        assert_eq!(a.canvas, b.canvas);
        assert_ne!(a.canvas, c.canvas);
        assert_eq!(a.mask, c.mask);
    }

    #[test]
    fn test_invalid_input() {
        let error = prepare_outpaint(b"not an image", 512, 512, &OutpaintOptions::default()).unwrap_err();
        assert!(matches!(error, OutpaintError::Decode(_)));

        let bytes = png_bytes(&source_image(8, 8));
        let error = prepare_outpaint(&bytes, 0, 512, &OutpaintOptions::default()).unwrap_err();
        assert!(matches!(error, OutpaintError::InvalidDimensions { width: 0, height: 512 }));
    }

    #[test]
    fn test_core_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AspectCatalog>();
        assert_send_sync::<Compositor>();
        assert_send_sync::<OutpaintCondition>();
    }
}
