//! Writing a rendered sequence to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    animation::sequence::FrameSequence,
    encode::ffmpeg::{self, EncodeConfig},
    foundation::error::AnaviewResult,
};

/// Write every frame as `frame_00000.png`, `frame_00001.png`, ... under `dir`.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn write_png_sequence(seq: &FrameSequence, dir: &Path) -> AnaviewResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create frame directory '{}'", dir.display()))?;
    let mut paths = Vec::with_capacity(seq.len());
    for (i, frame) in seq.frames.iter().enumerate() {
        let path = dir.join(format!("frame_{i:05}.png"));
        frame
            .save(&path)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        paths.push(path);
    }
    Ok(paths)
}

/// Encode the sequence to an MP4 with the system `ffmpeg`.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn write_mp4(seq: &FrameSequence, out_path: &Path) -> AnaviewResult<()> {
    let cfg = EncodeConfig::for_sequence(seq)?;
    ffmpeg::pipe_frames(&cfg, &seq.frames, out_path)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frames.rs"]
mod tests;
