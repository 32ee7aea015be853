use super::*;
use crate::foundation::{error::AnaviewError, math::Rng64};
use image::Rgb;

fn random_rgb(side: u32, seed: u64) -> RgbImage {
    let mut rng = Rng64::new(seed);
    RgbImage::from_fn(side, side, |_, _| {
        Rgb([
            rng.next_below(256) as u8,
            rng.next_below(256) as u8,
            rng.next_below(256) as u8,
        ])
    })
}

#[test]
fn radius_scales_with_resolution() {
    let v = InnerCircleView::new(24).unwrap();
    assert_eq!(v.radius_at(Resolution::Stage1), 24);
    assert_eq!(v.radius_at(Resolution::Stage2), 96);
    let ratio = f64::from(v.radius_at(Resolution::Stage2)) / 256.0;
    assert!((ratio - 0.375).abs() < 1e-12);
}

#[test]
fn rejects_radius_outside_image() {
    assert!(matches!(
        InnerCircleView::new(0),
        Err(AnaviewError::Construction(_))
    ));
    assert!(matches!(
        InnerCircleView::new(33),
        Err(AnaviewError::Construction(_))
    ));
    assert!(InnerCircleView::new(32).is_ok());
}

#[test]
fn ring_is_fixed_and_disk_is_turned() {
    let v = InnerCircleView::new(24).unwrap();
    let x = Image::from_rgb8(&random_rgb(64, 1)).unwrap();
    let y = v.view(&x).unwrap();
    // Corner lies outside the disk.
    assert_eq!(y.get(0, 0), x.get(0, 0));
    assert_eq!(y.get(63, 0), x.get(63, 0));
    // Centre pixels swap with their half-turn partner.
    assert_eq!(y.get(31, 31), x.get(32, 32));
    assert_eq!(y.get(40, 30), x.get(23, 33));
    assert_eq!(v.inverse_view(&y).unwrap(), x);
}

#[test]
fn frame_at_one_matches_view_at_both_stages() {
    let v = InnerCircleView::new(24).unwrap();
    for side in [64, 256] {
        let rgb = random_rgb(side, u64::from(side));
        let moved = v.view(&Image::from_rgb8(&rgb).unwrap()).unwrap().to_rgb8();
        assert_eq!(v.make_frame(&rgb, 1.0).unwrap(), raster::present(&moved).unwrap());
        assert_eq!(v.make_frame(&rgb, 0.0).unwrap(), raster::present(&rgb).unwrap());
    }
}

#[test]
fn frame_midway_keeps_the_ring() {
    let v = InnerCircleView::new(24).unwrap();
    let rgb = random_rgb(64, 9);
    let frame = v.make_frame(&rgb, 0.5).unwrap();
    let offset = (raster::canvas_side_for(64) - 64) / 2;
    assert_eq!(frame.get_pixel(offset, offset), rgb.get_pixel(0, 0));
    assert_eq!(frame.get_pixel(offset + 63, offset + 5), rgb.get_pixel(63, 5));
}
