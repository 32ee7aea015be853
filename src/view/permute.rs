//! Views backed by pixel permutation tables.

use image::RgbImage;

use crate::{
    foundation::{
        core::{Affine, Image, Point, Resolution, ensure_square},
        error::AnaviewResult,
    },
    permute::{
        builder,
        jigsaw::JigsawPlan,
        perm::{Permutation, PermutationPair},
    },
    render::raster::{self, CANVAS_BACKGROUND},
    view::{View, ViewSpec},
};

/// Arbitrary pixel permutation with one table per stage.
///
/// Other permutation views own one of these and delegate `view`/`inverse_view` to it.
#[derive(Clone, Debug)]
pub struct PermuteView {
    perms: PermutationPair,
}

impl PermuteView {
    /// Both tables are validated here: lengths `64*64` and `256*256`, bijective.
    pub fn new(stage1: Vec<u32>, stage2: Vec<u32>) -> AnaviewResult<Self> {
        let perms = PermutationPair::new(Permutation::new(stage1)?, Permutation::new(stage2)?)?;
        Ok(Self { perms })
    }

    pub fn from_pair(perms: PermutationPair) -> Self {
        Self { perms }
    }

    pub fn permutation(&self, res: Resolution) -> &Permutation {
        self.perms.get(res)
    }

    /// Every pixel slides in a straight line from its source to its destination.
    ///
    /// Positions round with `floor(p + 0.5)`, so pixels sharing a block stay together.
    /// Positions nothing lands on show the canvas background.
    pub fn render_sliding(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        let side = ensure_square(im)?;
        let perm = self.perms.get(Resolution::from_side(side)?);
        let t = t.clamp(0.0, 1.0);

        let mut out = RgbImage::from_pixel(side, side, CANVAS_BACKGROUND);
        for (dst, &src) in perm.as_slice().iter().enumerate() {
            let dst = dst as u32;
            let (sx, sy) = (src % side, src / side);
            let (dx, dy) = (dst % side, dst / side);
            let x = lerp_pos(sx, dx, t);
            let y = lerp_pos(sy, dy, t);
            out.put_pixel(x, y, *im.get_pixel(sx, sy));
        }
        raster::present(&out)
    }
}

fn lerp_pos(from: u32, to: u32, t: f64) -> u32 {
    let p = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    (p + 0.5).floor() as u32
}

impl View for PermuteView {
    fn spec(&self) -> ViewSpec {
        ViewSpec::Permutation {
            stage1: self.perms.get(Resolution::Stage1).as_slice().to_vec(),
            stage2: self.perms.get(Resolution::Stage2).as_slice().to_vec(),
        }
    }

    fn view(&self, im: &Image) -> AnaviewResult<Image> {
        let perm = self.perms.get(im.resolution());
        Ok(im.with_pixels(perm.apply(im.pixels())?))
    }

    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image> {
        let perm = self.perms.get(im.resolution());
        Ok(im.with_pixels(perm.apply_inverse(im.pixels())?))
    }

    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        self.render_sliding(im, t)
    }
}

/// Shuffles square blocks; `block_size` is measured at the 64 stage.
///
/// Block size 1 shuffles individual pixels at the 64 stage (4x4 pixel groups at 256).
#[derive(Clone, Debug)]
pub struct PatchPermuteView {
    block_size: u32,
    seed: u64,
    inner: PermuteView,
}

impl PatchPermuteView {
    pub fn new(block_size: u32, seed: u64) -> AnaviewResult<Self> {
        let perms = builder::patch_permutation_pair(block_size, seed)?;
        Ok(Self {
            block_size,
            seed,
            inner: PermuteView::from_pair(perms),
        })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }
}

impl View for PatchPermuteView {
    fn spec(&self) -> ViewSpec {
        ViewSpec::PatchPermute {
            block_size: self.block_size,
            seed: self.seed,
        }
    }

    fn view(&self, im: &Image) -> AnaviewResult<Image> {
        self.inner.view(im)
    }

    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image> {
        self.inner.inverse_view(im)
    }

    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        self.inner.render_sliding(im, t)
    }
}

/// Interlocking 4x4 jigsaw whose pieces trade places by turning about the image centre.
#[derive(Clone, Debug)]
pub struct JigsawView {
    seed: u64,
    plan: JigsawPlan,
    inner: PermuteView,
}

impl JigsawView {
    pub fn new(seed: u64) -> AnaviewResult<Self> {
        let plan = JigsawPlan::from_seed(seed);
        let inner = PermuteView::from_pair(plan.permutation_pair()?);
        Ok(Self { seed, plan, inner })
    }

    pub fn plan(&self) -> &JigsawPlan {
        &self.plan
    }
}

impl View for JigsawView {
    fn spec(&self) -> ViewSpec {
        ViewSpec::Jigsaw { seed: self.seed }
    }

    fn view(&self, im: &Image) -> AnaviewResult<Image> {
        self.inner.view(im)
    }

    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image> {
        self.inner.inverse_view(im)
    }

    /// Each piece orbits the centre by `t` times its own quarter-turn count.
    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage> {
        let side = ensure_square(im)?;
        Resolution::from_side(side)?;
        let t = t.clamp(0.0, 1.0);

        let turns: Vec<u32> = (0..side * side)
            .map(|i| self.plan.turns_at(side, i % side, i / side))
            .collect();
        let center = Point::new((f64::from(side) - 1.0) / 2.0, (f64::from(side) - 1.0) / 2.0);
        let inverses: Vec<Affine> = (0..4)
            .map(|k| Affine::rotate_about((90.0 * f64::from(k) * t).to_radians(), center).inverse())
            .collect();

        let frame = RgbImage::from_fn(side, side, |x, y| {
            let out = Point::new(f64::from(x), f64::from(y));
            for (k, inv) in inverses.iter().enumerate() {
                let src = *inv * out;
                let (sx, sy) = ((src.x + 0.5).floor(), (src.y + 0.5).floor());
                if sx < 0.0 || sy < 0.0 || sx >= f64::from(side) || sy >= f64::from(side) {
                    continue;
                }
                let (sx, sy) = (sx as u32, sy as u32);
                if turns[(sy * side + sx) as usize] == k as u32 {
                    return *im.get_pixel(sx, sy);
                }
            }
            CANVAS_BACKGROUND
        });
        raster::present(&frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/permute.rs"]
mod tests;
