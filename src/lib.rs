#![forbid(unsafe_code)]
//! Invertible view transforms for visual anagram images, plus the transition animations
//! that reveal them.
//!
//! A [`View`] maps an image from the canonical frame into one alternate appearance and
//! back, exactly. Views are built by name through [`get_view`] or from a serialized
//! [`ViewSpec`], and animated with [`render_animation`].

pub mod animation;
pub mod encode;
pub mod foundation;
pub mod output;
pub mod permute;
pub mod render;
pub mod view;

pub use animation::caption::{CaptionFont, CaptionMask, CaptionRenderer, CaptionStyle};
pub use animation::ease::Ease;
pub use animation::sequence::{AnimationConfig, FrameSequence, render_animation};
pub use encode::ffmpeg::{EncodeConfig, is_ffmpeg_on_path};
pub use encode::frames::{write_mp4, write_png_sequence};
pub use foundation::core::{Image, Pixel, Resolution};
pub use foundation::error::{AnaviewError, AnaviewResult};
pub use foundation::math::Rng64;
pub use output::grid::{save_illusion, tile_grid, views_grid};
pub use output::record::{Reduction, RunConfig, RunRecord};
pub use permute::perm::{Permutation, PermutationPair};
pub use view::registry::{get_view, get_views, spec_for_name, view_names};
pub use view::{
    GridTransform, GridView, InnerCircleView, JigsawView, NegateView, PatchPermuteView,
    PermuteView, SkewView, View, ViewSpec,
};
