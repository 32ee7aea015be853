//! Sample images: the generated image and the grid of its views.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbImage;

use crate::{
    foundation::{
        core::Image,
        error::{AnaviewError, AnaviewResult},
    },
    view::View,
};

/// Views per grid row.
pub const GRID_ROW_LEN: usize = 8;

/// Lay out equally sized square tiles row-major, at most `GRID_ROW_LEN` per row, no padding.
pub fn tile_grid(tiles: &[RgbImage]) -> AnaviewResult<RgbImage> {
    let first = tiles
        .first()
        .ok_or_else(|| AnaviewError::render("grid needs at least one tile"))?;
    let (tw, th) = first.dimensions();
    if tiles.iter().any(|t| t.dimensions() != (tw, th)) {
        return Err(AnaviewError::render("grid tiles must share dimensions"));
    }

    let cols = tiles.len().min(GRID_ROW_LEN) as u32;
    let rows = tiles.len().div_ceil(GRID_ROW_LEN) as u32;
    let mut grid = RgbImage::new(cols * tw, rows * th);
    for (i, tile) in tiles.iter().enumerate() {
        let (c, r) = ((i % GRID_ROW_LEN) as u32, (i / GRID_ROW_LEN) as u32);
        image::imageops::replace(&mut grid, tile, i64::from(c * tw), i64::from(r * th));
    }
    Ok(grid)
}

/// Every view's appearance of the canonical image `im`.
pub fn views_grid(im: &Image, views: &[Box<dyn View>]) -> AnaviewResult<RgbImage> {
    let tiles = views
        .iter()
        .map(|v| v.view(im).map(|x| x.to_rgb8()))
        .collect::<AnaviewResult<Vec<_>>>()?;
    tile_grid(&tiles)
}

/// Write `sample_{side}.png` and `sample_{side}.views.png` into `dir`.
#[tracing::instrument(skip(im, views), fields(side = im.side(), views = views.len()))]
pub fn save_illusion(
    im: &Image,
    views: &[Box<dyn View>],
    dir: &Path,
) -> AnaviewResult<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create sample directory '{}'", dir.display()))?;
    let side = im.side();

    let sample = dir.join(format!("sample_{side}.png"));
    im.to_rgb8()
        .save(&sample)
        .with_context(|| format!("failed to write '{}'", sample.display()))?;

    let grid_path = dir.join(format!("sample_{side}.views.png"));
    views_grid(im, views)?
        .save(&grid_path)
        .with_context(|| format!("failed to write '{}'", grid_path.display()))?;

    Ok((sample, grid_path))
}

#[cfg(test)]
#[path = "../../tests/unit/output/grid.rs"]
mod tests;
