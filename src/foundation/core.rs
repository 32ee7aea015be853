use image::{Rgb, RgbImage};

use crate::foundation::error::{AnaviewError, AnaviewResult};

pub use kurbo::{Affine, Point};

/// One interleaved RGB sample in the signed normalized range `[-1, 1]`.
pub type Pixel = [f32; 3];

/// The two canonical sampling resolutions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Resolution {
    /// 64x64 base stage.
    Stage1,
    /// 256x256 upsampled stage.
    Stage2,
}

impl Resolution {
    pub const ALL: [Resolution; 2] = [Resolution::Stage1, Resolution::Stage2];

    pub fn from_side(side: u32) -> AnaviewResult<Self> {
        match side {
            64 => Ok(Self::Stage1),
            256 => Ok(Self::Stage2),
            other => Err(AnaviewError::resolution(format!(
                "image side {other} is not a canonical resolution (expected 64 or 256)"
            ))),
        }
    }

    pub fn side(self) -> u32 {
        match self {
            Self::Stage1 => 64,
            Self::Stage2 => 256,
        }
    }

    /// Linear upsampling factor relative to [`Resolution::Stage1`].
    pub fn scale(self) -> u32 {
        self.side() / Self::Stage1.side()
    }

    pub fn pixel_count(self) -> usize {
        let s = self.side() as usize;
        s * s
    }
}

/// Square 3-channel image at a canonical resolution, row-major, values in `[-1, 1]`.
///
/// This is the type exchanged with the sampler: `view`/`inverse_view` consume and produce
/// it. Rendered animation frames use [`image::RgbImage`] instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    resolution: Resolution,
    pixels: Vec<Pixel>,
}

impl Image {
    pub fn new(side: u32, pixels: Vec<Pixel>) -> AnaviewResult<Self> {
        let resolution = Resolution::from_side(side)?;
        if pixels.len() != resolution.pixel_count() {
            return Err(AnaviewError::resolution(format!(
                "expected {} pixels for side {side}, got {}",
                resolution.pixel_count(),
                pixels.len()
            )));
        }
        Ok(Self { resolution, pixels })
    }

    pub fn filled(side: u32, value: Pixel) -> AnaviewResult<Self> {
        let resolution = Resolution::from_side(side)?;
        Ok(Self {
            resolution,
            pixels: vec![value; resolution.pixel_count()],
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(side: u32, mut f: impl FnMut(u32, u32) -> Pixel) -> AnaviewResult<Self> {
        let resolution = Resolution::from_side(side)?;
        let mut pixels = Vec::with_capacity(resolution.pixel_count());
        for y in 0..side {
            for x in 0..side {
                pixels.push(f(x, y));
            }
        }
        Ok(Self { resolution, pixels })
    }

    pub fn side(&self) -> u32 {
        self.resolution.side()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[(y * self.side() + x) as usize]
    }

    /// Largest per-channel absolute difference; infinite when resolutions differ.
    pub fn max_abs_diff(&self, other: &Image) -> f32 {
        if self.resolution != other.resolution {
            return f32::INFINITY;
        }
        self.pixels
            .iter()
            .zip(&other.pixels)
            .flat_map(|(a, b)| (0..3).map(move |c| (a[c] - b[c]).abs()))
            .fold(0.0, f32::max)
    }

    /// Same resolution, new pixel data. Callers guarantee the length.
    pub(crate) fn with_pixels(&self, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), self.pixels.len());
        Self {
            resolution: self.resolution,
            pixels,
        }
    }

    pub fn from_rgb8(im: &RgbImage) -> AnaviewResult<Self> {
        let side = ensure_square(im)?;
        let pixels = im
            .pixels()
            .map(|p| [u8_to_signed(p[0]), u8_to_signed(p[1]), u8_to_signed(p[2])])
            .collect();
        Self::new(side, pixels)
    }

    pub fn to_rgb8(&self) -> RgbImage {
        let side = self.side();
        RgbImage::from_fn(side, side, |x, y| {
            let p = self.get(x, y);
            Rgb([signed_to_u8(p[0]), signed_to_u8(p[1]), signed_to_u8(p[2])])
        })
    }
}

pub(crate) fn u8_to_signed(v: u8) -> f32 {
    f32::from(v) / 127.5 - 1.0
}

pub(crate) fn signed_to_u8(v: f32) -> u8 {
    ((v / 2.0 + 0.5) * 255.0 + 0.5).clamp(0.0, 255.0).floor() as u8
}

/// Side length of a square frame; non-square input is rejected.
pub(crate) fn ensure_square(im: &RgbImage) -> AnaviewResult<u32> {
    let (w, h) = im.dimensions();
    if w != h || w == 0 {
        return Err(AnaviewError::resolution(format!(
            "expected a non-empty square image, got {w}x{h}"
        )));
    }
    Ok(w)
}

pub(crate) fn rgb_pixels(im: &RgbImage) -> Vec<Rgb<u8>> {
    im.pixels().copied().collect()
}

pub(crate) fn rgb_from_pixels(side: u32, pixels: &[Rgb<u8>]) -> RgbImage {
    RgbImage::from_fn(side, side, |x, y| pixels[(y * side + x) as usize])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
