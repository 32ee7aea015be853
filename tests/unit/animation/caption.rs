use super::*;

fn solid_mask(width: u32, height: u32, c: u8) -> CaptionMask {
    CaptionMask {
        width,
        height,
        coverage: vec![c; (width * height) as usize],
    }
}

#[test]
fn draw_blends_by_coverage_and_clips() {
    let mut frame = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));
    let mask = solid_mask(4, 4, 255);
    mask.draw(&mut frame, 6, -2, Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(6, 0), Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(7, 1), Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(5, 0), Rgb([255, 255, 255]));
    assert_eq!(*frame.get_pixel(6, 2), Rgb([255, 255, 255]));
}

#[test]
fn partial_coverage_mixes_colours() {
    let mut frame = RgbImage::from_pixel(2, 2, Rgb([200, 200, 200]));
    solid_mask(1, 1, 0).draw(&mut frame, 0, 0, Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(0, 0), Rgb([200, 200, 200]));

    let half = CaptionMask {
        width: 1,
        height: 1,
        coverage: vec![51],
    };
    half.draw(&mut frame, 1, 1, Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(1, 1), Rgb([160, 160, 160]));
}

#[test]
fn placement_below_image() {
    let mut frame = RgbImage::from_pixel(384, 384, Rgb([255, 255, 255]));
    let mask = solid_mask(10, 20, 255);
    mask.draw_below_image(&mut frame, 256, Rgb([0, 0, 0]));
    // left = (384 - 10) / 2 = 187; top = 288 + 64 - 10 = 342.
    assert_eq!(*frame.get_pixel(187, 342), Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(196, 361), Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(186, 342), Rgb([255, 255, 255]));
    assert_eq!(*frame.get_pixel(187, 341), Rgb([255, 255, 255]));
    assert_eq!(*frame.get_pixel(187, 362), Rgb([255, 255, 255]));
}

#[test]
fn missing_font_skips_caption() {
    let style = CaptionStyle::default();
    assert!(rasterize_caption("a painting of a cat", &style).unwrap().is_none());
}

#[test]
fn invalid_font_bytes_are_rejected() {
    let font = CaptionFont::from_bytes(b"definitely not a font".to_vec());
    assert!(CaptionRenderer::new(&font, 16.0).is_err());
}

#[test]
fn invalid_size_is_rejected() {
    let font = CaptionFont::from_bytes(Vec::new());
    assert!(matches!(
        CaptionRenderer::new(&font, f32::NAN),
        Err(AnaviewError::Construction(_))
    ));
}

#[test]
fn system_font_rasterizes_text_when_available() {
    let Some(font) = CaptionFont::system_monospace() else {
        return;
    };
    let style = CaptionStyle {
        font: Some(font),
        ..CaptionStyle::default()
    };
    let mask = rasterize_caption("an oil painting\nof a dog", &style)
        .unwrap()
        .unwrap();
    assert!(mask.width() > 0 && mask.height() > 0);
    assert!(!mask.is_blank());
    assert!(rasterize_caption("   ", &style).unwrap().is_none());
}

#[test]
fn style_validation() {
    assert!(CaptionStyle::default().validate().is_ok());
    let bad = CaptionStyle {
        size_px: 0.0,
        ..CaptionStyle::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn renderer_requires_the_selected_face() {
    let Some(font) = CaptionFont::system_monospace() else {
        return;
    };
    assert!(CaptionRenderer::new(&font, 16.0).is_ok());
    let missing = CaptionFont {
        index: 999,
        ..font.clone()
    };
    let err = CaptionRenderer::new(&missing, 16.0).unwrap_err();
    assert!(matches!(err, AnaviewError::Construction(_)));
    assert!(err.to_string().contains("999"));
}

#[test]
fn renderer_collection_holds_only_the_caption_font() {
    let Some(font) = CaptionFont::system_monospace() else {
        return;
    };
    let mut renderer = CaptionRenderer::new(&font, 16.0).unwrap();
    let mut names: Vec<String> = renderer
        .font_ctx
        .collection
        .family_names()
        .map(str::to_owned)
        .collect();
    assert!(names.contains(&renderer.family_name));

    let mut own = parley::fontique::Collection::new(parley::fontique::CollectionOptions {
        shared: false,
        system_fonts: false,
    });
    let registered = own.register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
    let mut expected: Vec<String> = registered
        .iter()
        .filter_map(|(id, _)| own.family_name(*id).map(str::to_owned))
        .collect();
    names.sort();
    names.dedup();
    expected.sort();
    expected.dedup();
    assert_eq!(names, expected);
}
