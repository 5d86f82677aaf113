//! Linear gradients and the soft outpaint mask built from them.

use image::Luma;

use crate::{
    condition::Axis,
    types::{Dimensions, MaskImage},
};

/// Piecewise-linear gradient over gray levels.
///
/// Stops are `(position, level)` pairs with non-decreasing positions.
/// Sampling outside the domain clamps to the first or last stop.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    stops: Vec<(f64, f64)>,
}

impl LinearGradient {
    /// Pairs `levels` with `domain` positions; `None` if the lengths differ,
    /// no stop is given, or positions decrease.
    pub fn new(levels: &[f64], domain: &[f64]) -> Option<Self> {
        if levels.is_empty() || levels.len() != domain.len() {
            return None;
        }
        if domain.windows(2).any(|w| w[1] < w[0]) {
            return None;
        }
        Some(Self {
            stops: domain.iter().copied().zip(levels.iter().copied()).collect(),
        })
    }

    /// `from` at 0.0 to `to` at 1.0
    pub fn two_stop(from: f64, to: f64) -> Self {
        Self {
            stops: vec![(0.0, from), (1.0, to)],
        }
    }

    pub fn at(&self, t: f64) -> f64 {
        let (first, last) = (self.stops[0], self.stops[self.stops.len() - 1]);
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.stops.windows(2) {
            let ((p0, l0), (p1, l1)) = (pair[0], pair[1]);
            if t <= p1 {
                if p1 == p0 {
                    return l1;
                }
                return l0 + (l1 - l0) * (t - p0) / (p1 - p0);
            }
        }
        last.1
    }
}

/// Extension left on each side of the source along the mask axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extents {
    /// Pixels between the canvas start and the source
    pub leading: u32,
    /// Pixels between the source end and the canvas end
    pub trailing: u32,
}

impl Extents {
    pub fn new(leading: u32, trailing: u32) -> Self {
        Self { leading, trailing }
    }

    /// Extents around a `scaled` image placed at `offset` on a `target` canvas.
    pub fn from_placement(target: Dimensions, scaled: Dimensions, offset: (i64, i64), axis: Axis) -> Self {
        let (span, length, origin) = match axis {
            Axis::X => (target.width as i64, scaled.width as i64, offset.0),
            Axis::Y => (target.height as i64, scaled.height as i64, offset.1),
        };
        Self {
            leading: origin.clamp(0, span) as u32,
            trailing: (span - origin - length).clamp(0, span) as u32,
        }
    }
}

/// Width of a mask band: the extension on that side plus the feather into
/// the source, clamped to the canvas. A side with no extension has no band.
pub fn band_width(extent: u32, edge_offset: u32, span: u32) -> u32 {
    if extent == 0 {
        return 0;
    }
    extent.saturating_add(edge_offset).min(span)
}

/// Levels across one band, sampled by distance from the outer canvas edge
/// over the band width: full white across the extension, then a linear fade
/// to `background` through the feather.
fn band_gradient(extent: u32, band: u32, background: u16) -> LinearGradient {
    let knee = extent.min(band) as f64 / band as f64;
    let white = u16::MAX as f64;
    LinearGradient {
        stops: vec![(0.0, white), (knee, white), (1.0, background as f64)],
    }
}

/// Soft mask for an outpaint along `axis`.
///
/// The canvas starts at `background`. Each side with an extension gets a
/// band that is full white over the extension and fades to `background`
/// across `edge_offset` pixels of the source. Zero-width bands are skipped.
pub fn build_mask(
    target: Dimensions,
    axis: Axis,
    extents: Extents,
    edge_offset: u32,
    background: u16,
) -> MaskImage {
    let mut mask = MaskImage::from_pixel(target.width, target.height, Luma([background]));
    let span = match axis {
        Axis::X => target.width,
        Axis::Y => target.height,
    };

    let bands: Vec<(u32, LinearGradient)> = [extents.leading, extents.trailing]
        .into_iter()
        .map(|extent| {
            let band = band_width(extent, edge_offset, span);
            (band, band_gradient(extent, band.max(1), background))
        })
        .collect();
    if bands.iter().all(|(band, _)| *band == 0) {
        return mask;
    }

    let level_at = |(band, gradient): &(u32, LinearGradient), distance: u32| -> Option<u16> {
        (distance < *band).then(|| gradient.at(distance as f64 / *band as f64).round() as u16)
    };
    let levels: Vec<u16> = (0..span)
        .map(|p| {
            let from_leading = level_at(&bands[0], p);
            let from_trailing = level_at(&bands[1], span - 1 - p);
            from_leading.max(from_trailing).unwrap_or(background)
        })
        .collect();

    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        let p = match axis {
            Axis::X => x,
            Axis::Y => y,
        };
        pixel[0] = levels[p as usize];
    }
    mask
}
