//! Builds the looping display sequence for one view.

use std::sync::Arc;

use image::{Rgb, RgbImage, imageops::FilterType};
use rayon::prelude::*;

use crate::{
    animation::{
        caption::{CaptionMask, CaptionStyle, rasterize_caption},
        ease::Ease,
    },
    foundation::{
        core::{Resolution, ensure_square},
        error::{AnaviewError, AnaviewResult},
        math::{lerp_u8, linspace},
    },
    render::raster::{CANVAS_BACKGROUND, canvas_side_for},
    view::View,
};

#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Rest frames per loop, split evenly between the two ends.
    pub hold_frames: usize,
    /// Frames for each caption fade.
    pub fade_frames: usize,
    pub transition_frames: usize,
    /// Side the source image is resized to before animating.
    pub image_side: u32,
    pub canvas_side: u32,
    pub fps: u32,
    pub ease: Ease,
    pub caption: CaptionStyle,
    /// Worker threads for transition frames; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hold_frames: 120,
            fade_frames: 10,
            transition_frames: 45,
            image_side: 256,
            canvas_side: 384,
            fps: 30,
            ease: Ease::default(),
            caption: CaptionStyle::default(),
            threads: None,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> AnaviewResult<()> {
        Resolution::from_side(self.image_side)?;
        if self.canvas_side != canvas_side_for(self.image_side) {
            return Err(AnaviewError::construction(format!(
                "canvas side {} must be 3/2 of image side {}",
                self.canvas_side, self.image_side
            )));
        }
        if self.transition_frames == 0 {
            return Err(AnaviewError::construction(
                "transition_frames must be >= 1",
            ));
        }
        if self.fps == 0 {
            return Err(AnaviewError::construction("fps must be non-zero"));
        }
        self.caption.validate()?;
        if self.threads == Some(0) {
            return Err(AnaviewError::construction(
                "threads must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Frames in one full boomerang loop.
    pub fn frame_count(&self) -> usize {
        2 * self.half_pass_len()
    }

    fn half_pass_len(&self) -> usize {
        2 * (self.hold_frames / 2) + 2 * self.fade_frames + self.transition_frames
    }
}

/// Rendered loop. Repeated frames share one allocation.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    pub frames: Vec<Arc<RgbImage>>,
    pub fps: u32,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared frame dimensions, or `None` for an empty sequence.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| f.dimensions())
    }
}

fn lerp_rgb(a: Rgb<u8>, b: Rgb<u8>, t: f64) -> Rgb<u8> {
    Rgb([
        lerp_u8(a[0], b[0], t),
        lerp_u8(a[1], b[1], t),
        lerp_u8(a[2], b[2], t),
    ])
}

fn with_caption(
    base: &Arc<RgbImage>,
    caption: Option<&CaptionMask>,
    image_side: u32,
    fill: Rgb<u8>,
) -> Arc<RgbImage> {
    match caption {
        Some(mask) => {
            let mut frame = base.as_ref().clone();
            mask.draw_below_image(&mut frame, image_side, fill);
            Arc::new(frame)
        }
        None => Arc::clone(base),
    }
}

/// `fill` runs from the caption colour (0) to the canvas background (1).
fn fade_frames(
    base: &Arc<RgbImage>,
    caption: Option<&CaptionMask>,
    cfg: &AnimationConfig,
    ts: &[f64],
) -> Vec<Arc<RgbImage>> {
    ts.iter()
        .map(|&t| {
            let fill = lerp_rgb(cfg.caption.color, CANVAS_BACKGROUND, t);
            with_caption(base, caption, cfg.image_side, fill)
        })
        .collect()
}

fn build_pool(threads: Option<usize>) -> AnaviewResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AnaviewError::render(format!("failed to build rayon thread pool: {e}")))
}

/// Render the rest, fade, transition and hold frames for `view`, then loop them.
///
/// The result is one pass followed by its reverse, rotated right by half the hold (rounded up)
/// so the loop starts partway through the first rest.
#[tracing::instrument(skip_all, fields(view = view.spec().kind_name(), hold = cfg.hold_frames, transition = cfg.transition_frames))]
pub fn render_animation(
    im: &RgbImage,
    view: &dyn View,
    caption1: &str,
    caption2: &str,
    cfg: &AnimationConfig,
) -> AnaviewResult<FrameSequence> {
    cfg.validate()?;
    let side = ensure_square(im)?;
    let resized;
    let im = if side == cfg.image_side {
        im
    } else {
        tracing::debug!(from = side, to = cfg.image_side, "resizing source image");
        resized = image::imageops::resize(im, cfg.image_side, cfg.image_side, FilterType::Triangle);
        &resized
    };

    let rest = Arc::new(view.make_frame(im, 0.0)?);
    let done = Arc::new(view.make_frame(im, 1.0)?);
    for frame in [&rest, &done] {
        if frame.dimensions() != (cfg.canvas_side, cfg.canvas_side) {
            return Err(AnaviewError::render(format!(
                "view frame is {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.canvas_side,
                cfg.canvas_side
            )));
        }
    }

    let mask1 = rasterize_caption(caption1, &cfg.caption)?;
    let mask2 = rasterize_caption(caption2, &cfg.caption)?;
    let half_hold = cfg.hold_frames / 2;

    let mut frames = Vec::with_capacity(cfg.frame_count());

    let rest_captioned = with_caption(&rest, mask1.as_ref(), cfg.image_side, cfg.caption.color);
    frames.extend(std::iter::repeat_n(rest_captioned, half_hold));
    frames.extend(fade_frames(
        &rest,
        mask1.as_ref(),
        cfg,
        &linspace(0.0, 1.0, cfg.fade_frames),
    ));

    let pool = build_pool(cfg.threads)?;
    let ts = linspace(0.0, 1.0, cfg.transition_frames);
    let transition: Vec<AnaviewResult<RgbImage>> = pool.install(|| {
        ts.par_iter()
            .map(|&t| view.make_frame(im, cfg.ease.apply(t)))
            .collect()
    });
    for frame in transition {
        frames.push(Arc::new(frame?));
    }

    frames.extend(fade_frames(
        &done,
        mask2.as_ref(),
        cfg,
        &linspace(1.0, 0.0, cfg.fade_frames),
    ));
    let done_captioned = with_caption(&done, mask2.as_ref(), cfg.image_side, cfg.caption.color);
    frames.extend(std::iter::repeat_n(done_captioned, half_hold));

    let reversed: Vec<_> = frames.iter().rev().cloned().collect();
    frames.extend(reversed);
    if !frames.is_empty() {
        // Odd holds round the rotation up.
        let shift = cfg.hold_frames.div_ceil(2) % frames.len();
        frames.rotate_right(shift);
    }

    tracing::debug!(frames = frames.len(), "animation rendered");
    Ok(FrameSequence {
        frames,
        fps: cfg.fps,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;
