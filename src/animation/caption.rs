//! Caption text: shaped with parley, rasterized with vello_cpu into a coverage mask.
//!
//! A caption is rasterized once and then stamped onto any number of frames in any fill
//! colour, which is how the fades are drawn.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use image::{Rgb, RgbImage};

use crate::foundation::{
    error::{AnaviewError, AnaviewResult},
    math::lerp_u8,
};

pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;
pub const DEFAULT_CAPTION_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Font bytes plus the face index inside them.
#[derive(Clone, Debug)]
pub struct CaptionFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
}

impl CaptionFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index: 0,
        }
    }

    pub fn from_file(path: &Path) -> AnaviewResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font {}", path.display()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// First monospace face installed on the system, if any.
    pub fn system_monospace() -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        let query = usvg::fontdb::Query {
            families: &[usvg::fontdb::Family::Monospace],
            ..Default::default()
        };
        let id = db.query(&query)?;
        let font = db.with_face_data(id, |data, index| Self {
            bytes: Arc::new(data.to_vec()),
            index,
        })?;
        tracing::debug!(faces = db.len(), "resolved system monospace font");
        Some(font)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Clone, Debug)]
pub struct CaptionStyle {
    /// `None` disables captions.
    pub font: Option<CaptionFont>,
    pub size_px: f32,
    pub color: Rgb<u8>,
}

impl CaptionStyle {
    pub fn validate(&self) -> AnaviewResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(AnaviewError::construction(
                "caption size_px must be finite and > 0",
            ));
        }
        Ok(())
    }
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font: None,
            size_px: DEFAULT_FONT_SIZE_PX,
            color: DEFAULT_CAPTION_COLOR,
        }
    }
}

/// Rasterized caption block. Lines are centred within the block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionMask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl CaptionMask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }

    pub fn is_blank(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0)
    }

    /// Blend `fill` into `frame` by coverage with the block's top-left at `(left, top)`.
    /// Parts outside the frame are clipped.
    pub fn draw(&self, frame: &mut RgbImage, left: i64, top: i64, fill: Rgb<u8>) {
        let (fw, fh) = frame.dimensions();
        for y in 0..self.height {
            let fy = top + i64::from(y);
            if fy < 0 || fy >= i64::from(fh) {
                continue;
            }
            for x in 0..self.width {
                let fx = left + i64::from(x);
                if fx < 0 || fx >= i64::from(fw) {
                    continue;
                }
                let c = self.coverage(x, y);
                if c == 0 {
                    continue;
                }
                let t = f64::from(c) / 255.0;
                let px = frame.get_pixel_mut(fx as u32, fy as u32);
                for ch in 0..3 {
                    px[ch] = lerp_u8(px[ch], fill[ch], t);
                }
            }
        }
    }

    /// Draw centred horizontally on a square canvas, below the image.
    ///
    /// The block's vertical centre sits halfway between the image's bottom edge and the
    /// canvas bottom edge.
    pub fn draw_below_image(&self, frame: &mut RgbImage, image_side: u32, fill: Rgb<u8>) {
        let canvas = f64::from(frame.width());
        let left = ((canvas - f64::from(self.width)) / 2.0).floor() as i64;
        let top = (0.75 * canvas + 0.25 * f64::from(image_side) - f64::from(self.height) / 2.0)
            .floor() as i64;
        self.draw(frame, left, top, fill);
    }
}

/// Shapes and rasterizes caption text with one font face.
///
/// The font context holds only the caption font, so parley never falls back to a system
/// face, and glyphs are drawn from the face parley shaped them with.
pub struct CaptionRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    size_px: f32,
}

impl std::fmt::Debug for CaptionRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionRenderer")
            .field("family_name", &self.family_name)
            .field("size_px", &self.size_px)
            .finish_non_exhaustive()
    }
}

impl CaptionRenderer {
    pub fn new(font: &CaptionFont, size_px: f32) -> AnaviewResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AnaviewError::construction(
                "caption size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext {
            collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
            }),
            source_cache: parley::fontique::SourceCache::default(),
        };
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        if families.is_empty() {
            return Err(AnaviewError::construction(
                "no font families registered from font bytes",
            ));
        }
        let family_id = families
            .iter()
            .find(|(_, faces)| faces.iter().any(|f| f.index() == font.index))
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                AnaviewError::construction(format!("font has no face at index {}", font.index))
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AnaviewError::construction("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            size_px,
        })
    }

    fn layout_line(&mut self, text: &str) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Rasterize `text`; each `\n`-separated line is centred. Empty text gives `None`.
    pub fn rasterize(&mut self, text: &str) -> AnaviewResult<Option<CaptionMask>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let layouts: Vec<_> = text.lines().map(|line| self.layout_line(line)).collect();
        let block_w = layouts.iter().map(|l| l.width()).fold(0.0f32, f32::max);
        let block_h: f32 = layouts.iter().map(|l| l.height()).sum();

        let width = block_w.ceil().max(1.0);
        let height = block_h.ceil().max(1.0);
        if width > f32::from(u16::MAX) || height > f32::from(u16::MAX) {
            return Err(AnaviewError::render(format!(
                "caption block {width}x{height} exceeds rasterizer limits"
            )));
        }
        let (w16, h16) = (width as u16, height as u16);

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        let mut y_off = 0.0f64;
        for layout in &layouts {
            let x_off = f64::from((block_w - layout.width()) / 2.0);
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((x_off, y_off)));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(run.run().font())
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            y_off += f64::from(layout.height());
        }

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        // Premultiplied white: alpha is the coverage.
        let coverage = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        Ok(Some(CaptionMask {
            width: u32::from(w16),
            height: u32::from(h16),
            coverage,
        }))
    }
}

/// Rasterize `text` with `style`. Missing font or empty text yields `None`.
#[tracing::instrument(skip(style), fields(size_px = style.size_px))]
pub fn rasterize_caption(text: &str, style: &CaptionStyle) -> AnaviewResult<Option<CaptionMask>> {
    let Some(font) = style.font.as_ref() else {
        if !text.trim().is_empty() {
            tracing::warn!("no caption font available, skipping caption");
        }
        return Ok(None);
    };
    CaptionRenderer::new(font, style.size_px)?.rasterize(text)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/caption.rs"]
mod tests;
