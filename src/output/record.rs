//! Reproducibility record written next to generated samples.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{AnaviewError, AnaviewResult},
    view::{View, ViewSpec, registry},
};

pub const RECORD_FILE_NAME: &str = "metadata.json";

/// How per-view noise estimates are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

/// Arguments of one generation run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub name: String,
    pub save_dir: PathBuf,
    pub prompts: Vec<String>,
    pub style: String,
    /// Registry names, one per prompt.
    pub views: Vec<String>,
    pub num_inference_steps: u32,
    pub num_samples: u32,
    pub reduction: Reduction,
    pub seed: u64,
    pub guidance_scale: f64,
    /// Noise level for the stage-2 upscaler.
    pub noise_level: u32,
    pub device: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            save_dir: PathBuf::from("results"),
            prompts: Vec::new(),
            style: String::new(),
            views: vec!["identity".to_owned(), "flip".to_owned()],
            num_inference_steps: 100,
            num_samples: 100,
            reduction: Reduction::Mean,
            seed: 0,
            guidance_scale: 7.0,
            noise_level: 50,
            device: "cuda".to_owned(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> AnaviewResult<()> {
        if self.prompts.len() != self.views.len() {
            return Err(AnaviewError::construction(format!(
                "{} prompts given for {} views",
                self.prompts.len(),
                self.views.len()
            )));
        }
        if self.num_inference_steps == 0 {
            return Err(AnaviewError::construction(
                "num_inference_steps must be >= 1",
            ));
        }
        if !self.guidance_scale.is_finite() {
            return Err(AnaviewError::construction("guidance_scale must be finite"));
        }
        Ok(())
    }

    /// Run directory: `save_dir/name`.
    pub fn run_dir(&self) -> PathBuf {
        self.save_dir.join(&self.name)
    }

    /// `"{style} {prompt}"` per prompt, trimmed.
    pub fn captions(&self) -> Vec<String> {
        self.prompts
            .iter()
            .map(|p| format!("{} {}", self.style, p).trim().to_owned())
            .collect()
    }
}

/// `{ "views": [...], "args": {...} }`
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunRecord {
    pub views: Vec<ViewSpec>,
    pub args: RunConfig,
}

impl RunRecord {
    /// Resolve the configured view names into specs.
    pub fn from_config(args: RunConfig) -> AnaviewResult<Self> {
        args.validate()?;
        let views = args
            .views
            .iter()
            .map(|n| registry::spec_for_name(n))
            .collect::<AnaviewResult<Vec<_>>>()?;
        Ok(Self { views, args })
    }

    pub fn build_views(&self) -> AnaviewResult<Vec<Box<dyn View>>> {
        self.views.iter().map(ViewSpec::build).collect()
    }

    /// The view animated against the identity, with both captions.
    pub fn animation_subject(&self) -> AnaviewResult<(Box<dyn View>, String, String)> {
        let spec = self.views.get(1).ok_or_else(|| {
            AnaviewError::construction("animation needs at least two views in the record")
        })?;
        let captions = self.args.captions();
        let caption = |i: usize| captions.get(i).cloned().unwrap_or_default();
        Ok((spec.build()?, caption(0), caption(1)))
    }

    pub fn to_json_pretty(&self) -> AnaviewResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> AnaviewResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Write `metadata.json` into `dir`, creating it if needed.
    #[tracing::instrument(skip(self))]
    pub fn save(&self, dir: &Path) -> AnaviewResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create run directory '{}'", dir.display()))?;
        let path = dir.join(RECORD_FILE_NAME);
        std::fs::write(&path, self.to_json_pretty()?)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        Ok(path)
    }

    /// Load a record from a `metadata.json` path or the directory holding it.
    pub fn load(path: &Path) -> AnaviewResult<Self> {
        let path = if path.is_dir() {
            path.join(RECORD_FILE_NAME)
        } else {
            path.to_path_buf()
        };
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        Self::from_json(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/record.rs"]
mod tests;
