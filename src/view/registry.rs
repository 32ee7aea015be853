//! Name lookup for the built-in views.
//!
//! Names may carry one argument after a colon, e.g. `skew:2.0` or `patch_permute:4`.

use crate::{
    foundation::error::{AnaviewError, AnaviewResult},
    view::{View, ViewSpec},
};

pub const DEFAULT_SKEW_FACTOR: f64 = 1.5;
pub const DEFAULT_INNER_RADIUS: u32 = 24;
pub const PATCH_BLOCK_SIZE: u32 = 8;
pub const PIXEL_BLOCK_SIZE: u32 = 1;

pub fn default_skew_factor() -> f64 {
    DEFAULT_SKEW_FACTOR
}

pub fn default_inner_radius() -> u32 {
    DEFAULT_INNER_RADIUS
}

static VIEW_TABLE: [(&str, ViewSpec); 11] = [
    ("identity", ViewSpec::Identity),
    ("flip", ViewSpec::Flip),
    ("rotate_cw", ViewSpec::Rotate90Cw),
    ("rotate_ccw", ViewSpec::Rotate90Ccw),
    ("rotate_180", ViewSpec::Rotate180),
    ("negate", ViewSpec::Negate),
    (
        "skew",
        ViewSpec::Skew {
            factor: DEFAULT_SKEW_FACTOR,
        },
    ),
    (
        "patch_permute",
        ViewSpec::PatchPermute {
            block_size: PATCH_BLOCK_SIZE,
            seed: 0,
        },
    ),
    (
        "pixel_permute",
        ViewSpec::PatchPermute {
            block_size: PIXEL_BLOCK_SIZE,
            seed: 0,
        },
    ),
    ("jigsaw", ViewSpec::Jigsaw { seed: 0 }),
    (
        "inner_circle",
        ViewSpec::InnerCircle {
            radius: DEFAULT_INNER_RADIUS,
        },
    ),
];

/// Registered view names in table order.
pub fn view_names() -> impl Iterator<Item = &'static str> {
    VIEW_TABLE.iter().map(|(name, _)| *name)
}

/// Resolve `name` or `name:arg` to a view description without building it.
pub fn spec_for_name(name: &str) -> AnaviewResult<ViewSpec> {
    let (base, arg) = match name.split_once(':') {
        Some((base, arg)) => (base.trim(), Some(arg.trim())),
        None => (name.trim(), None),
    };
    let spec = VIEW_TABLE
        .iter()
        .find(|(n, _)| *n == base)
        .map(|(_, spec)| spec.clone())
        .ok_or_else(|| AnaviewError::construction(format!("unknown view \"{base}\"")))?;

    let Some(arg) = arg else {
        return Ok(spec);
    };
    Ok(match (base, spec) {
        ("skew", ViewSpec::Skew { .. }) => ViewSpec::Skew {
            factor: parse_arg(base, arg)?,
        },
        ("patch_permute", ViewSpec::PatchPermute { seed, .. }) => ViewSpec::PatchPermute {
            block_size: parse_arg(base, arg)?,
            seed,
        },
        ("jigsaw", ViewSpec::Jigsaw { .. }) => ViewSpec::Jigsaw {
            seed: parse_arg(base, arg)?,
        },
        ("inner_circle", ViewSpec::InnerCircle { .. }) => ViewSpec::InnerCircle {
            radius: parse_arg(base, arg)?,
        },
        _ => {
            return Err(AnaviewError::construction(format!(
                "view \"{base}\" takes no argument (got \"{arg}\")"
            )));
        }
    })
}

fn parse_arg<T: std::str::FromStr>(view: &str, arg: &str) -> AnaviewResult<T> {
    arg.parse().map_err(|_| {
        AnaviewError::construction(format!("invalid argument \"{arg}\" for view \"{view}\""))
    })
}

/// Build a fresh view by name.
pub fn get_view(name: &str) -> AnaviewResult<Box<dyn View>> {
    spec_for_name(name)?.build()
}

/// Build one fresh view per name, failing on the first bad name.
pub fn get_views<S: AsRef<str>>(names: &[S]) -> AnaviewResult<Vec<Box<dyn View>>> {
    names.iter().map(|n| get_view(n.as_ref())).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/view/registry.rs"]
mod tests;
