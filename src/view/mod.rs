//! The view contract and its serializable description.

pub mod geometric;
pub mod inner_circle;
pub mod permute;
pub mod registry;

use image::RgbImage;

use crate::foundation::{core::Image, error::AnaviewResult};

pub use geometric::{GridTransform, GridView, NegateView, SkewView};
pub use inner_circle::InnerCircleView;
pub use permute::{JigsawView, PatchPermuteView, PermuteView};

/// An invertible transform between the canonical frame and one alternate appearance.
///
/// Implementations are immutable after construction: every method is a pure function of
/// its arguments and the tables built by the constructor.
pub trait View: std::fmt::Debug + Send + Sync {
    /// Constructor arguments that rebuild an identical view.
    fn spec(&self) -> ViewSpec;

    /// Map a canonical-frame image into this view's frame. Output has the input's side.
    fn view(&self, im: &Image) -> AnaviewResult<Image>;

    /// Exact two-sided inverse of [`View::view`] at the same resolution.
    fn inverse_view(&self, im: &Image) -> AnaviewResult<Image>;

    /// Render the rest-frame image `im` partway (`t` in `[0, 1]`) towards its transformed
    /// appearance, centred on a canvas 1.5 times the image side.
    fn make_frame(&self, im: &RgbImage, t: f64) -> AnaviewResult<RgbImage>;
}

/// Serializable view description: kind plus constructor arguments.
///
/// Permutation tables are regenerated by [`ViewSpec::build`]; only custom permutation
/// views carry their tables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewSpec {
    Identity,
    Flip,
    #[serde(rename = "rotate_cw")]
    Rotate90Cw,
    #[serde(rename = "rotate_ccw")]
    Rotate90Ccw,
    #[serde(rename = "rotate_180")]
    Rotate180,
    Negate,
    Skew {
        #[serde(default = "registry::default_skew_factor")]
        factor: f64,
    },
    PatchPermute {
        block_size: u32,
        #[serde(default)]
        seed: u64,
    },
    Jigsaw {
        #[serde(default)]
        seed: u64,
    },
    InnerCircle {
        #[serde(default = "registry::default_inner_radius")]
        radius: u32,
    },
    Permutation {
        stage1: Vec<u32>,
        stage2: Vec<u32>,
    },
}

impl ViewSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Flip => "flip",
            Self::Rotate90Cw => "rotate_cw",
            Self::Rotate90Ccw => "rotate_ccw",
            Self::Rotate180 => "rotate_180",
            Self::Negate => "negate",
            Self::Skew { .. } => "skew",
            Self::PatchPermute { .. } => "patch_permute",
            Self::Jigsaw { .. } => "jigsaw",
            Self::InnerCircle { .. } => "inner_circle",
            Self::Permutation { .. } => "permutation",
        }
    }

    /// Construct the view. Malformed arguments fail here, never on first use.
    pub fn build(&self) -> AnaviewResult<Box<dyn View>> {
        tracing::debug!(kind = self.kind_name(), "building view");
        Ok(match self {
            Self::Identity => Box::new(GridView::new(GridTransform::Identity)),
            Self::Flip => Box::new(GridView::new(GridTransform::Flip)),
            Self::Rotate90Cw => Box::new(GridView::new(GridTransform::Rotate90Cw)),
            Self::Rotate90Ccw => Box::new(GridView::new(GridTransform::Rotate90Ccw)),
            Self::Rotate180 => Box::new(GridView::new(GridTransform::Rotate180)),
            Self::Negate => Box::new(NegateView),
            Self::Skew { factor } => Box::new(SkewView::new(*factor)?),
            Self::PatchPermute { block_size, seed } => {
                Box::new(PatchPermuteView::new(*block_size, *seed)?)
            }
            Self::Jigsaw { seed } => Box::new(JigsawView::new(*seed)?),
            Self::InnerCircle { radius } => Box::new(InnerCircleView::new(*radius)?),
            Self::Permutation { stage1, stage2 } => {
                Box::new(PermuteView::new(stage1.clone(), stage2.clone())?)
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/spec.rs"]
mod tests;
