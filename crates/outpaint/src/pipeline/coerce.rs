use tracing::debug;

use super::Compositor;
use crate::{
    aspect::AspectCatalog,
    error::{OutpaintError, Result},
    types::CoercedImage,
};

impl Compositor {
    /// Resizes `bytes` onto the step-aligned size nearest its own aspect
    /// under the catalog budget. Input already aligned and in the canonical
    /// format comes back unchanged.
    pub fn coerce(&self, catalog: &AspectCatalog, bytes: &[u8]) -> Result<CoercedImage> {
        let decoded = self.codec().decode(bytes)?;
        let source = decoded.dimensions();
        let scaled = catalog.nearest_aspect_dimensions(source.width, source.height, catalog.max_pixels());
        if scaled.is_empty() {
            return Err(OutpaintError::InvalidDimensions {
                width: scaled.width,
                height: scaled.height,
            });
        }

        let bytes = if scaled != source {
            debug!(%source, %scaled, "coercing to nearest aligned size");
            let resized = self.resampler().resize(&decoded.pixels, scaled.width, scaled.height);
            self.codec().encode(&resized)?
        } else if decoded.format != self.codec().canonical_format() {
            debug!(%source, format = ?decoded.format, "re-encoding aligned source");
            self.codec().encode(&decoded.pixels)?
        } else {
            bytes.to_vec()
        };

        Ok(CoercedImage {
            bytes,
            source,
            source_format: decoded.format,
            scaled,
        })
    }
}

/// [`Compositor::coerce`] with the default codec and resampler
pub fn coerce_image(catalog: &AspectCatalog, bytes: &[u8]) -> Result<CoercedImage> {
    Compositor::default().coerce(catalog, bytes)
}
