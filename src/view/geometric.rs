//! Closed-form views: grid symmetries, value negation and column skew.

use image::{Rgb, RgbImage};

use crate::{
    foundation::{
        core::{Image, Point, ensure_square, rgb_from_pixels, rgb_pixels},
        error::{AnaviewError, AnaviewResult},
        math::lerp_u8,
    },
    render::raster::{self, CANVAS_BACKGROUND, ROTATE_FILL},
    view::{View, ViewSpec},
};

/// Lossless symmetries of the square pixel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridTransform {
    Identity,
    /// Mirror about the horizontal axis (upside down).
    Flip,
    Rotate90Cw,
    Rotate90Ccw,
    Rotate180,
}

impl GridTransform {
    pub fn inverse(self) -> Self {
        match self {
            Self::Rotate90Cw => Self::Rotate90Ccw,
            Self::Rotate90Ccw => Self::Rotate90Cw,
            other => other,
        }
    }

    /// Source pixel of output pixel `(x, y)` on a `side` grid.
    pub fn source_of(self, side: u32, x: u32, y: u32) -> (u32, u32) {
        let n = side - 1;
        match self {
            Self::Identity => (x, y),
            Self::Flip => (x, n - y),
            Self::Rotate90Cw => (y, n - x),
            Self::Rotate90Ccw => (n - y, x),
            Self::Rotate180 => (n - x, n - y),
        }
    }

    pub fn apply<P: Copy>(self, side: u32, src: &[P]) -> Vec<P> {
        let mut out = Vec::with_capacity(src.len());
        for y in 0..side {
            for x in 0..side {
                let (sx, sy) = self.source_of(side, x, y);
                out.push(src[(sy * side + sx) as usize]);
            }
        }
        out
    }

    fn spec(self) -> ViewSpec {
        match self {
            Self::Identity => ViewSpec::Identity,
            Self::Flip => ViewSpec::Flip,
            Self::Rotate90Cw => ViewSpec::Rotate90Cw,
            Self::Rotate90Ccw => ViewSpec::Rotate90Ccw,
            Self::Rotate180 => ViewSpec::Rotate180,
        }
    }
}

/// Identity, flip and rotation views.
#[derive(Clone, Copy, Debug)]
pub struct GridView {
    transform: GridTransform,
}

impl GridView {
    pub fn new(transform: GridTransform) -> Self {
        Self { transform }
    }

    pub fn transform(&self) -> GridTransform {
        self.transform
    }
}

impl View for GridView {
    fn spec(&self) -> ViewSpec {
        self.transform.spec()
    }

    fn view(&self, im: &Image) -> AnaviewResult<Image> {
        Ok(im.with_pixels(self.transform.apply(im.side(), im.pixels())))
    }

    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image> {
        Ok(im.with_pixels(self.transform.inverse().apply(im.side(), im.pixels())))
    }

    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        let side = ensure_square(im)?;
        let t = t.clamp(0.0, 1.0);
        let frame = match self.transform {
            GridTransform::Identity => im.clone(),
            GridTransform::Flip => {
                let c = (f64::from(side) - 1.0) / 2.0;
                let scale = (std::f64::consts::PI * t).cos();
                raster::remap_nearest(im, CANVAS_BACKGROUND, |x, y| {
                    // Edge-on: the image collapses to a line.
                    if scale.abs() < 1e-9 {
                        return None;
                    }
                    Some(Point::new(f64::from(x), c + (f64::from(y) - c) / scale))
                })
            }
            GridTransform::Rotate90Cw => raster::rotate_nearest(im, 90.0 * t, ROTATE_FILL),
            GridTransform::Rotate90Ccw => raster::rotate_nearest(im, -90.0 * t, ROTATE_FILL),
            GridTransform::Rotate180 => raster::rotate_nearest(im, 180.0 * t, ROTATE_FILL),
        };
        raster::present(&frame)
    }
}

/// Sign inversion about the middle of the value range.
#[derive(Clone, Copy, Debug, Default)]
pub struct NegateView;

impl View for NegateView {
    fn spec(&self) -> ViewSpec {
        ViewSpec::Negate
    }

    fn view(&self, im: &Image) -> AnaviewResult<Image> {
        Ok(im.with_pixels(im.pixels().iter().map(|p| p.map(|v| -v)).collect()))
    }

    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image> {
        self.view(im)
    }

    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        ensure_square(im)?;
        let mut negated = im.clone();
        image::imageops::invert(&mut negated);
        raster::present(&raster::blend(im, &negated, t.clamp(0.0, 1.0))?)
    }
}

/// Column-wise cyclic roll with displacement growing linearly from the centre column.
///
/// Column `x` moves down by `trunc(factor * (x - side / 2))` pixels, wrapping around. The
/// roll is a pixel permutation, so the round trip is exact (tolerance
/// [`SkewView::ROUND_TRIP_TOLERANCE`]).
#[derive(Clone, Copy, Debug)]
pub struct SkewView {
    factor: f64,
}

impl SkewView {
    /// Largest per-channel deviation of `inverse_view(view(x))` from `x`.
    pub const ROUND_TRIP_TOLERANCE: f32 = 0.0;

    pub fn new(factor: f64) -> AnaviewResult<Self> {
        if !factor.is_finite() {
            return Err(AnaviewError::construction(
                "skew factor must be finite",
            ));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    fn offset(&self, side: u32, x: u32) -> f64 {
        (self.factor * (f64::from(x) - f64::from(side / 2))).trunc()
    }

    /// Downward displacement of column `x`, saturating at the `i64` range.
    pub fn displacement(&self, side: u32, x: u32) -> i64 {
        self.offset(side, x) as i64
    }

    /// Displacement of column `x` reduced into `0..side`.
    ///
    /// A non-finite offset (factor near `f64::MAX`) reduces to no shift.
    fn wrapped_shift(&self, side: u32, x: u32) -> i64 {
        let r = self.offset(side, x).rem_euclid(f64::from(side));
        if r.is_finite() { r as i64 } else { 0 }
    }

    fn roll<P: Copy>(&self, side: u32, src: &[P], sign: i64) -> Vec<P> {
        let n = i64::from(side);
        let shifts: Vec<i64> = (0..side).map(|x| sign * self.wrapped_shift(side, x)).collect();
        let mut out = Vec::with_capacity(src.len());
        for y in 0..n {
            for x in 0..n {
                let sy = (y - shifts[x as usize]).rem_euclid(n);
                out.push(src[(sy * n + x) as usize]);
            }
        }
        out
    }
}

impl View for SkewView {
    fn spec(&self) -> ViewSpec {
        ViewSpec::Skew {
            factor: self.factor,
        }
    }

    fn view(&self, im: &Image) -> AnaviewResult<Image> {
        Ok(im.with_pixels(self.roll(im.side(), im.pixels(), 1)))
    }

    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image> {
        Ok(im.with_pixels(self.roll(im.side(), im.pixels(), -1)))
    }

    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        let side = ensure_square(im)?;
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return raster::present(im);
        }
        if t == 1.0 {
            let rolled = self.roll(side, &rgb_pixels(im), 1);
            return raster::present(&rgb_from_pixels(side, &rolled));
        }

        let n = f64::from(side);
        let frame = RgbImage::from_fn(side, side, |x, y| {
            let s = (f64::from(y) - self.offset(side, x) * t).rem_euclid(n);
            let y0 = s.floor();
            let frac = s - y0;
            let y0 = (y0 as u32) % side;
            let y1 = (y0 + 1) % side;
            let (a, b) = (im.get_pixel(x, y0), im.get_pixel(x, y1));
            Rgb([
                lerp_u8(a[0], b[0], frac),
                lerp_u8(a[1], b[1], frac),
                lerp_u8(a[2], b[2], frac),
            ])
        });
        raster::present(&frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/geometric.rs"]
mod tests;
