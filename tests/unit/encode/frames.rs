use std::sync::Arc;

use image::{Rgb, RgbImage};

use super::*;
use crate::foundation::error::AnaviewError;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "anaview_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn png_sequence_is_numbered_and_readable() {
    let a = Arc::new(RgbImage::from_pixel(8, 8, Rgb([10, 20, 30])));
    let b = Arc::new(RgbImage::from_pixel(8, 8, Rgb([200, 100, 0])));
    let seq = FrameSequence {
        frames: vec![Arc::clone(&a), b, a],
        fps: 30,
    };
    let dir = temp_dir("png_seq");
    let paths = write_png_sequence(&seq, &dir).unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths[2].ends_with("frame_00002.png"));

    let back = image::open(&paths[1]).unwrap().to_rgb8();
    assert_eq!(*back.get_pixel(3, 3), Rgb([200, 100, 0]));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn empty_sequence_cannot_be_encoded() {
    let seq = FrameSequence {
        frames: Vec::new(),
        fps: 30,
    };
    assert!(matches!(
        write_mp4(&seq, Path::new("unused.mp4")),
        Err(AnaviewError::Render(_))
    ));
}
