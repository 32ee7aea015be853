use super::*;
use crate::foundation::core::Image;

#[test]
fn every_registered_name_builds() {
    let names: Vec<_> = view_names().collect();
    assert_eq!(names.len(), 11);
    for name in names {
        let view = get_view(name).unwrap();
        assert_eq!(view.spec(), spec_for_name(name).unwrap());
    }
}

#[test]
fn pixel_permute_uses_unit_blocks() {
    assert_eq!(
        spec_for_name("pixel_permute").unwrap(),
        ViewSpec::PatchPermute {
            block_size: 1,
            seed: 0
        }
    );
}

#[test]
fn unknown_name_is_a_construction_error() {
    let err = get_view("nonexistent").unwrap_err();
    assert!(matches!(err, AnaviewError::Construction(_)));
    assert!(err.to_string().contains("unknown view"));
}

#[test]
fn arguments_override_defaults() {
    assert_eq!(
        spec_for_name("skew:2.5").unwrap(),
        ViewSpec::Skew { factor: 2.5 }
    );
    assert_eq!(
        spec_for_name("patch_permute:4").unwrap(),
        ViewSpec::PatchPermute {
            block_size: 4,
            seed: 0
        }
    );
    assert_eq!(
        spec_for_name("jigsaw:7").unwrap(),
        ViewSpec::Jigsaw { seed: 7 }
    );
    assert_eq!(
        spec_for_name("inner_circle:16").unwrap(),
        ViewSpec::InnerCircle { radius: 16 }
    );
}

#[test]
fn malformed_arguments_are_rejected() {
    for bad in ["skew:fast", "patch_permute:-1", "flip:1", "jigsaw:", "inner_circle:2.5"] {
        assert!(
            matches!(spec_for_name(bad), Err(AnaviewError::Construction(_))),
            "{bad} should fail"
        );
    }
    assert!(get_view("patch_permute:7").is_err());
}

#[test]
fn instances_are_independent() {
    let views = get_views(&["jigsaw", "jigsaw"]).unwrap();
    let x = Image::from_fn(64, |x, y| [x as f32 / 64.0, y as f32 / 64.0, 0.0]).unwrap();
    assert_eq!(views[0].view(&x).unwrap(), views[1].view(&x).unwrap());
    assert!(get_views(&["flip", "bogus"]).is_err());
}
