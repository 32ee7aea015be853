//! CPU raster helpers shared by `make_frame` implementations and the animation renderer.

use image::{Rgb, RgbImage};

use crate::foundation::{
    core::{Affine, Point, ensure_square},
    error::{AnaviewError, AnaviewResult},
    math::lerp_u8,
};

/// Background of animation canvases.
pub const CANVAS_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
/// Fill for pixels rotated in from outside the source image.
pub const ROTATE_FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// Side of the square canvas a `side`-pixel image is presented on.
pub fn canvas_side_for(side: u32) -> u32 {
    side * 3 / 2
}

/// Centre `im` on a `canvas_side` square filled with `background`.
pub fn paste_centered(
    im: &RgbImage,
    canvas_side: u32,
    background: Rgb<u8>,
) -> AnaviewResult<RgbImage> {
    let (w, h) = im.dimensions();
    if w > canvas_side || h > canvas_side {
        return Err(AnaviewError::render(format!(
            "{w}x{h} image does not fit on a {canvas_side}x{canvas_side} canvas"
        )));
    }
    let mut canvas = RgbImage::from_pixel(canvas_side, canvas_side, background);
    let x = i64::from((canvas_side - w) / 2);
    let y = i64::from((canvas_side - h) / 2);
    image::imageops::replace(&mut canvas, im, x, y);
    Ok(canvas)
}

/// Present a square frame the way every view's `make_frame` returns it.
pub fn present(im: &RgbImage) -> AnaviewResult<RgbImage> {
    let side = ensure_square(im)?;
    paste_centered(im, canvas_side_for(side), CANVAS_BACKGROUND)
}

/// Inverse-mapped nearest-neighbour resampling.
///
/// `source_of(x, y)` returns the source position sampled for output pixel `(x, y)`, or
/// `None` to leave it as `fill`.
pub fn remap_nearest(
    im: &RgbImage,
    fill: Rgb<u8>,
    source_of: impl Fn(u32, u32) -> Option<Point>,
) -> RgbImage {
    let (w, h) = im.dimensions();
    RgbImage::from_fn(w, h, |x, y| {
        let Some(src) = source_of(x, y) else {
            return fill;
        };
        let (sx, sy) = ((src.x + 0.5).floor(), (src.y + 0.5).floor());
        if sx < 0.0 || sy < 0.0 || sx >= f64::from(w) || sy >= f64::from(h) {
            return fill;
        }
        *im.get_pixel(sx as u32, sy as u32)
    })
}

/// Rotate `im` clockwise by `degrees` about its centre pixel, nearest neighbour.
///
/// Multiples of 90 degrees reproduce exact quarter turns of the pixel grid.
pub fn rotate_nearest(im: &RgbImage, degrees: f64, fill: Rgb<u8>) -> RgbImage {
    let (w, h) = im.dimensions();
    let center = Point::new((f64::from(w) - 1.0) / 2.0, (f64::from(h) - 1.0) / 2.0);
    // kurbo rotates +x towards +y, which is clockwise in image coordinates.
    let inv = Affine::rotate_about(degrees.to_radians(), center).inverse();
    remap_nearest(im, fill, |x, y| {
        Some(inv * Point::new(f64::from(x), f64::from(y)))
    })
}

/// Take `overlay` where `mask` is set and `base` elsewhere.
pub fn composite_masked(
    base: &RgbImage,
    overlay: &RgbImage,
    mask: &[bool],
) -> AnaviewResult<RgbImage> {
    let (w, h) = base.dimensions();
    if overlay.dimensions() != (w, h) || mask.len() != (w * h) as usize {
        return Err(AnaviewError::render(
            "composite inputs must share dimensions with the mask",
        ));
    }
    Ok(RgbImage::from_fn(w, h, |x, y| {
        if mask[(y * w + x) as usize] {
            *overlay.get_pixel(x, y)
        } else {
            *base.get_pixel(x, y)
        }
    }))
}

/// Per-channel linear blend from `a` (t = 0) to `b` (t = 1).
pub fn blend(a: &RgbImage, b: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
    if a.dimensions() != b.dimensions() {
        return Err(AnaviewError::render("blend inputs must share dimensions"));
    }
    let (w, h) = a.dimensions();
    Ok(RgbImage::from_fn(w, h, |x, y| {
        let (pa, pb) = (a.get_pixel(x, y), b.get_pixel(x, y));
        Rgb([
            lerp_u8(pa[0], pb[0], t),
            lerp_u8(pa[1], pb[1], t),
            lerp_u8(pa[2], pb[2], t),
        ])
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
