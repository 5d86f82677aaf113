//! Source placement and mirrored fill of the extension region.

use image::{
    imageops::{self, flip_horizontal, flip_vertical},
    Rgba, RgbaImage,
};

use super::shuffle::shuffle_pixels;
use crate::{condition::Axis, direction::Direction, types::Dimensions};

/// Top-left position of a `scaled` image on a `target` canvas for `anchor`.
pub fn placement_offset(target: Dimensions, scaled: Dimensions, anchor: Direction) -> (i64, i64) {
    let (tw, th) = (target.width as i64, target.height as i64);
    let (sw, sh) = (scaled.width as i64, scaled.height as i64);
    if anchor == Direction::Center {
        (tw / 2 - sw / 2, th / 2 - sh / 2)
    } else if anchor.is_upper_or_left() {
        (0, 0)
    } else {
        (tw - sw, th - sh)
    }
}

/// Transparent canvas of `target` size with `source` drawn at `offset`.
pub fn place(target: Dimensions, source: &RgbaImage, offset: (i64, i64)) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(target.width, target.height, Rgba([0, 0, 0, 0]));
    imageops::replace(&mut canvas, source, offset.0, offset.1);
    canvas
}

/// Fills the canvas on both sides of `source` along `axis` with alternating
/// mirrored and unmirrored copies until the canvas edge is reached.
///
/// The copy adjacent to the source is mirrored so the seam is continuous.
/// With `decorrelate` set, each copy is pixel-shuffled with that seed first.
pub fn reflect_edges(
    canvas: &mut RgbaImage,
    source: &RgbaImage,
    offset: (i64, i64),
    axis: Axis,
    decorrelate: Option<u64>,
) {
    let (span, step, origin) = match axis {
        Axis::X => (canvas.width() as i64, source.width() as i64, offset.0),
        Axis::Y => (canvas.height() as i64, source.height() as i64, offset.1),
    };
    if step == 0 {
        return;
    }

    let mirrored = match axis {
        Axis::X => flip_horizontal(source),
        Axis::Y => flip_vertical(source),
    };
    let (mirrored, plain) = match decorrelate {
        Some(seed) => (shuffle_pixels(&mirrored, seed), shuffle_pixels(source, seed.wrapping_add(1))),
        None => (mirrored, source.clone()),
    };
    let tile = |k: i64| if k % 2 == 1 { &mirrored } else { &plain };
    let draw = |canvas: &mut RgbaImage, k: i64, at: i64| {
        let (x, y) = match axis {
            Axis::X => (at, offset.1),
            Axis::Y => (offset.0, at),
        };
        imageops::replace(canvas, tile(k), x, y);
    };

    let mut k = 1;
    while origin - (k - 1) * step > 0 {
        draw(canvas, k, origin - k * step);
        k += 1;
    }
    let mut k = 1;
    while origin + k * step < span {
        draw(canvas, k, origin + k * step);
        k += 1;
    }
}
