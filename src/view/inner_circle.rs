//! Inner-circle view: the centred disk turns half way round, the ring stays put.

use image::RgbImage;

use crate::{
    foundation::{
        core::{Image, Resolution, ensure_square},
        error::AnaviewResult,
    },
    permute::builder,
    render::raster::{self, ROTATE_FILL},
    view::{PermuteView, View, ViewSpec},
};

#[derive(Clone, Debug)]
pub struct InnerCircleView {
    radius: u32,
    inner: PermuteView,
}

impl InnerCircleView {
    /// `radius` is measured at the 64 stage and scales with resolution.
    pub fn new(radius: u32) -> AnaviewResult<Self> {
        let perms = builder::inner_circle_pair(radius)?;
        Ok(Self {
            radius,
            inner: PermuteView::from_pair(perms),
        })
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn radius_at(&self, res: Resolution) -> u32 {
        self.radius * res.scale()
    }

    /// Disk mask for a frame of any side, radius scaled proportionally.
    fn frame_mask(&self, side: u32) -> Vec<bool> {
        let base = f64::from(Resolution::Stage1.side());
        builder::inner_circle_mask(side, f64::from(self.radius) * f64::from(side) / base)
    }
}

impl View for InnerCircleView {
    fn spec(&self) -> ViewSpec {
        ViewSpec::InnerCircle {
            radius: self.radius,
        }
    }

    fn view(&self, im: &Image) -> AnaviewResult<Image> {
        self.inner.view(im)
    }

    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image> {
        self.inner.inverse_view(im)
    }

    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        let side = ensure_square(im)?;
        let t = t.clamp(0.0, 1.0);
        let turned = raster::rotate_nearest(im, 180.0 * t, ROTATE_FILL);
        let frame = raster::composite_masked(im, &turned, &self.frame_mask(side))?;
        raster::present(&frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/inner_circle.rs"]
mod tests;
