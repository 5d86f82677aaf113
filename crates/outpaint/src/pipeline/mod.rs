pub mod builder;
pub mod coerce;

use image::{imageops, RgbaImage};
use tracing::{debug, warn};

use crate::{
    algorithms::{build_mask, place, placement_offset, reflect_edges, Extents},
    condition::{classify_transform, Axis},
    config::OutpaintOptions,
    error::{OutpaintError, Result},
    traits::{EdgeBlur, ImageCodec, Resampler},
    types::{CompositeResult, Dimensions},
};

/// Outpaint compositor: resize, place, reflect, blur and mask in one pass.
pub struct Compositor {
    codec: Box<dyn ImageCodec>,
    resampler: Box<dyn Resampler>,
    blur: Box<dyn EdgeBlur>,
    options: OutpaintOptions,
}

impl Compositor {
    /// Create a new compositor builder
    pub fn builder() -> builder::CompositorBuilder {
        builder::CompositorBuilder::new()
    }

    pub fn new(
        codec: Box<dyn ImageCodec>,
        resampler: Box<dyn Resampler>,
        blur: Box<dyn EdgeBlur>,
        options: OutpaintOptions,
    ) -> Self {
        Self {
            codec,
            resampler,
            blur,
            options,
        }
    }

    /// Options used by [`prepare`](Self::prepare)
    pub fn options(&self) -> &OutpaintOptions {
        &self.options
    }

    pub fn codec(&self) -> &dyn ImageCodec {
        self.codec.as_ref()
    }

    pub fn resampler(&self) -> &dyn Resampler {
        self.resampler.as_ref()
    }

    /// Prepare `bytes` for outpainting onto a `width` x `height` canvas
    pub fn prepare(&self, bytes: &[u8], width: u32, height: u32) -> Result<CompositeResult> {
        self.prepare_with(bytes, width, height, &self.options)
    }

    /// Like [`prepare`](Self::prepare) with per-call options
    pub fn prepare_with(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        options: &OutpaintOptions,
    ) -> Result<CompositeResult> {
        let target = Dimensions::new(width, height);
        if target.is_empty() {
            return Err(OutpaintError::InvalidDimensions { width, height });
        }

        // Step 1: decode, short-circuit when already at target size
        let decoded = self.codec.decode(bytes)?;
        let source = decoded.dimensions();
        let source_format = decoded.format;
        let mut condition = classify_transform(source, target, options.anchor);

        if source == target {
            let canvas = if source_format == self.codec.canonical_format() {
                debug!(%source, "passthrough, source already at target");
                bytes.to_vec()
            } else {
                debug!(%source, ?source_format, "re-encoding source at target size");
                self.codec.encode(&decoded.pixels)?
            };
            return Ok(CompositeResult {
                canvas,
                mask: None,
                source,
                source_format,
                scaled: source,
                action: condition.self_corrected().action(),
            });
        }

        // Step 2: resize so one axis matches the target exactly
        let axis = fit_axis(source, target, condition.effective_axis());
        if condition.scale_axis.is_some() && condition.scale_axis != Some(axis) {
            warn!(%source, %target, "classified axis overflows target, extending {axis} instead");
            condition.scale_axis = Some(axis);
        }
        let scaled = scaled_dimensions(source, target, axis);
        let resized = self.resampler.resize(&decoded.pixels, scaled.width, scaled.height);
        debug!(%source, %scaled, %target, %axis, "resized source");

        // Step 3: nothing left to extend
        let condition = condition.corrected_for(axis);
        let action = condition.action();
        if scaled == target {
            debug!(?action, "resize fills target");
            return Ok(CompositeResult {
                canvas: self.codec.encode(&resized)?,
                mask: None,
                source,
                source_format,
                scaled,
                action,
            });
        }

        // Step 4: scale edge and blur along the extended axis
        let (target_span, scaled_span) = span(target, scaled, axis);
        let extension = target_span - scaled_span;
        let edge = scale_by(options.edge_offset, target_span, scaled_span);
        let radius = scale_by(options.blur_radius, target_span, scaled_span);

        // Steps 5-6: place and reflect
        let offset = placement_offset(target, scaled, condition.anchor);
        let mut canvas = place(target, &resized, offset);
        reflect_edges(
            &mut canvas,
            &resized,
            offset,
            axis,
            options.decorrelate.then_some(options.seed),
        );
        debug!(anchor = %condition.anchor, ?offset, extension, edge, "reflected edges");

        // Step 7: blur, then restore the untouched interior
        if radius > 0 {
            canvas = self.blur.blur(&canvas, radius);
            overlay_interior(&mut canvas, &resized, offset, axis, edge);
            debug!(radius, "blurred seams");
        }

        // Steps 8-9: mask and encode
        let extents = Extents::from_placement(target, scaled, offset, axis);
        let mask = build_mask(target, axis, extents, edge, options.mask_background);
        let canvas = self.codec.encode(&canvas)?;
        let mask = self.codec.encode_mask(&mask)?;

        Ok(CompositeResult {
            canvas,
            mask: Some(mask),
            source,
            source_format,
            scaled,
            action,
        })
    }

    /// Get information about the compositor configuration
    pub fn info(&self) -> String {
        format!(
            "Compositor: anchor {}, edge offset {}, blur radius {}, decorrelate {}",
            self.options.anchor, self.options.edge_offset, self.options.blur_radius, self.options.decorrelate
        )
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Rounded `numerator * a / b`, at least 1
fn scale_rounded(a: u32, numerator: u32, b: u32) -> u32 {
    let b = b.max(1) as u64;
    let value = (a as u64 * numerator as u64 + b / 2) / b;
    u32::try_from(value).unwrap_or(u32::MAX).max(1)
}

/// Size of `source` resized to meet `target` exactly on the axis orthogonal
/// to `axis`, keeping its aspect.
pub fn scaled_dimensions(source: Dimensions, target: Dimensions, axis: Axis) -> Dimensions {
    match axis {
        Axis::X => Dimensions::new(scale_rounded(target.height, source.width, source.height), target.height),
        Axis::Y => Dimensions::new(target.width, scale_rounded(target.width, source.height, source.width)),
    }
}

/// `preferred` unless resizing against it would overflow the target.
pub fn fit_axis(source: Dimensions, target: Dimensions, preferred: Axis) -> Axis {
    let scaled = scaled_dimensions(source, target, preferred);
    if scaled.width > target.width || scaled.height > target.height {
        preferred.other()
    } else {
        preferred
    }
}

fn span(target: Dimensions, scaled: Dimensions, axis: Axis) -> (u32, u32) {
    match axis {
        Axis::X => (target.width, scaled.width),
        Axis::Y => (target.height, scaled.height),
    }
}

fn scale_by(value: u32, target_span: u32, scaled_span: u32) -> u32 {
    if value == 0 {
        return 0;
    }
    scale_rounded(value, target_span, scaled_span)
}

/// Copies `resized` back over a blurred canvas, inset by `edge` on each side
/// that borders an extension.
fn overlay_interior(canvas: &mut RgbaImage, resized: &RgbaImage, offset: (i64, i64), axis: Axis, edge: u32) {
    let (origin, length, canvas_span) = match axis {
        Axis::X => (offset.0, resized.width(), canvas.width()),
        Axis::Y => (offset.1, resized.height(), canvas.height()),
    };
    let lead = if origin > 0 { edge } else { 0 };
    let trail = if origin + (length as i64) < canvas_span as i64 { edge } else { 0 };
    if lead.saturating_add(trail) >= length {
        return;
    }
    let kept = length - lead - trail;

    let (crop, x, y) = match axis {
        Axis::X => (
            imageops::crop_imm(resized, lead, 0, kept, resized.height()).to_image(),
            offset.0 + lead as i64,
            offset.1,
        ),
        Axis::Y => (
            imageops::crop_imm(resized, 0, lead, resized.width(), kept).to_image(),
            offset.0,
            offset.1 + lead as i64,
        ),
    };
    imageops::replace(canvas, &crop, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_scaled_dimensions() {
        let source = Dimensions::new(300, 200);
        assert_eq!(scaled_dimensions(source, Dimensions::new(1024, 512), Axis::X), Dimensions::new(768, 512));
        assert_eq!(scaled_dimensions(source, Dimensions::new(600, 1024), Axis::Y), Dimensions::new(600, 400));
        assert_eq!(scaled_dimensions(Dimensions::new(1000, 1), Dimensions::new(10, 10), Axis::Y).height, 1);
    }

    #[test]
    fn test_fit_axis_avoids_overflow() {
        // equal deltas classify X, but X would be 600 wide on a 400 canvas
        let source = Dimensions::new(200, 100);
        let target = Dimensions::new(400, 300);
        assert_eq!(fit_axis(source, target, Axis::X), Axis::Y);
        assert_eq!(fit_axis(Dimensions::new(512, 512), Dimensions::new(768, 512), Axis::X), Axis::X);
    }

    #[test]
    fn test_scale_by() {
        assert_eq!(scale_by(32, 768, 512), 48);
        assert_eq!(scale_by(0, 768, 512), 0);
    }

    #[test]
    fn test_overlay_interior_insets_seams_only() {
        let resized = RgbaImage::from_pixel(8, 4, Rgba([200, 0, 0, 255]));
        let mut canvas = RgbaImage::from_pixel(16, 4, Rgba([0, 0, 0, 255]));
        overlay_interior(&mut canvas, &resized, (0, 0), Axis::X, 2);
        // flush to the left edge: no inset there
        assert_eq!(canvas.get_pixel(0, 0)[0], 200);
        assert_eq!(canvas.get_pixel(5, 0)[0], 200);
        assert_eq!(canvas.get_pixel(6, 0)[0], 0);
    }

    #[test]
    fn test_overlay_interior_skips_thin_source() {
        let resized = RgbaImage::from_pixel(4, 4, Rgba([200, 0, 0, 255]));
        let mut canvas = RgbaImage::from_pixel(12, 4, Rgba([0, 0, 0, 255]));
        overlay_interior(&mut canvas, &resized, (4, 0), Axis::X, 2);
        assert!(canvas.pixels().all(|p| p[0] == 0));
    }
}
