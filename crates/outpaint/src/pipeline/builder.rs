use crate::{
    algorithms::{FilterResampler, GaussianEdgeBlur, PngCodec},
    config::OutpaintOptions,
    direction::Direction,
    pipeline::Compositor,
    traits::{EdgeBlur, ImageCodec, Resampler},
};

/// Builder for creating compositors with a fluent API
pub struct CompositorBuilder {
    codec: Option<Box<dyn ImageCodec>>,
    resampler: Option<Box<dyn Resampler>>,
    blur: Option<Box<dyn EdgeBlur>>,
    options: OutpaintOptions,
}

impl CompositorBuilder {
    pub fn new() -> Self {
        Self {
            codec: None,
            resampler: None,
            blur: None,
            options: OutpaintOptions::default(),
        }
    }

    /// Set the codec (replaces any existing one)
    pub fn with_codec<C>(mut self, codec: C) -> Self
    where
        C: ImageCodec + 'static,
    {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Set the resampler (replaces any existing one)
    pub fn with_resampler<R>(mut self, resampler: R) -> Self
    where
        R: Resampler + 'static,
    {
        self.resampler = Some(Box::new(resampler));
        self
    }

    /// Set the seam blur (replaces any existing one)
    pub fn with_blur<B>(mut self, blur: B) -> Self
    where
        B: EdgeBlur + 'static,
    {
        self.blur = Some(Box::new(blur));
        self
    }

    /// Replace every option at once
    pub fn options(mut self, options: OutpaintOptions) -> Self {
        self.options = options;
        self
    }

    pub fn anchor(mut self, anchor: Direction) -> Self {
        self.options.anchor = anchor;
        self
    }

    pub fn mask_background(mut self, level: u16) -> Self {
        self.options.mask_background = level;
        self
    }

    pub fn blur_radius(mut self, radius: u32) -> Self {
        self.options.blur_radius = radius;
        self
    }

    pub fn decorrelate(mut self, enabled: bool) -> Self {
        self.options.decorrelate = enabled;
        self
    }

    pub fn edge_offset(mut self, offset: u32) -> Self {
        self.options.edge_offset = offset;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = seed;
        self
    }

    /// Build the compositor with default components if not specified
    pub fn build(self) -> Compositor {
        let codec = self.codec.unwrap_or_else(|| Box::new(PngCodec::default()));
        let resampler = self.resampler.unwrap_or_else(|| Box::new(FilterResampler::default()));
        let blur = self.blur.unwrap_or_else(|| Box::new(GaussianEdgeBlur::default()));

        Compositor::new(codec, resampler, blur, self.options)
    }
}

impl Default for CompositorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::ImageopsEdgeBlur;

    #[test]
    fn test_builder_sets_options() {
        let compositor = CompositorBuilder::new()
            .with_blur(ImageopsEdgeBlur)
            .anchor(Direction::Left)
            .blur_radius(6)
            .decorrelate(true)
            .edge_offset(8)
            .seed(99)
            .mask_background(0x1000)
            .build();
        let options = compositor.options();
        assert_eq!(options.anchor, Direction::Left);
        assert_eq!(options.blur_radius, 6);
        assert!(options.decorrelate);
        assert_eq!(options.edge_offset, 8);
        assert_eq!(options.seed, 99);
        assert_eq!(options.mask_background, 0x1000);
    }

    #[test]
    fn test_options_replaces_previous_setters() {
        let compositor = CompositorBuilder::new().blur_radius(6).options(OutpaintOptions::default()).build();
        assert_eq!(compositor.options(), &OutpaintOptions::default());
        assert!(compositor.info().contains("anchor center"));
    }
}
