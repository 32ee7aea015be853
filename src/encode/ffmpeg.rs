//! H.264 MP4 output through a system `ffmpeg` reading raw rgb24 frames on stdin.

use std::{
    ffi::OsString,
    io::Write as _,
    path::Path,
    process::{Command, Stdio},
    sync::Arc,
};

use anyhow::Context;
use image::RgbImage;

use crate::{
    animation::sequence::FrameSequence,
    foundation::error::{AnaviewError, AnaviewResult},
};

/// Frame geometry and rate of an MP4 encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl EncodeConfig {
    pub fn for_sequence(seq: &FrameSequence) -> AnaviewResult<Self> {
        let (width, height) = seq
            .dimensions()
            .ok_or_else(|| AnaviewError::render("cannot encode an empty frame sequence"))?;
        let cfg = Self {
            width,
            height,
            fps: seq.fps,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AnaviewResult<()> {
        if self.width == 0 || self.height == 0 || self.fps == 0 {
            return Err(AnaviewError::render(format!(
                "cannot encode {}x{} at {} fps",
                self.width, self.height, self.fps
            )));
        }
        // yuv420p subsamples chroma 2x2.
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(AnaviewError::render(format!(
                "mp4 frames must have even sides, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub(crate) fn ffmpeg_args(&self, out: &Path) -> Vec<OsString> {
        let size = format!("{}x{}", self.width, self.height);
        let rate = self.fps.to_string();
        let mut args: Vec<OsString> = [
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            size.as_str(),
            "-r",
            rate.as_str(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(out.as_os_str().to_owned());
        args
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Write `frames` to `out` through one `ffmpeg` process.
pub(crate) fn pipe_frames(
    cfg: &EncodeConfig,
    frames: &[Arc<RgbImage>],
    out: &Path,
) -> AnaviewResult<()> {
    if let Some(bad) = frames
        .iter()
        .find(|f| f.dimensions() != (cfg.width, cfg.height))
    {
        return Err(AnaviewError::render(format!(
            "frame is {}x{}, encoder expects {}x{}",
            bad.width(),
            bad.height(),
            cfg.width,
            cfg.height
        )));
    }
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }

    tracing::debug!(out = %out.display(), width = cfg.width, height = cfg.height, fps = cfg.fps, "spawning ffmpeg");
    let mut child = Command::new("ffmpeg")
        .args(cfg.ffmpeg_args(out))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AnaviewError::render(format!("failed to spawn ffmpeg: {e}")))?;

    let written = match child.stdin.take() {
        Some(mut stdin) => frames.iter().try_for_each(|f| stdin.write_all(f.as_raw())),
        None => Ok(()),
    };
    let output = child
        .wait_with_output()
        .context("failed to wait for ffmpeg")?;
    if !output.status.success() {
        return Err(AnaviewError::render(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    written.context("failed to stream frames to ffmpeg")?;

    tracing::info!(frames = frames.len(), out = %out.display(), "mp4 written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
