use super::*;

fn assert_bijection(p: &Permutation) {
    let mut sorted = p.as_slice().to_vec();
    sorted.sort_unstable();
    assert!(sorted.iter().enumerate().all(|(i, &v)| v as usize == i));
}

#[test]
fn block_permutation_requires_divisible_block() {
    let blocks = Permutation::identity(4);
    assert!(matches!(
        block_permutation(64, 3, &blocks),
        Err(AnaviewError::Construction(_))
    ));
    assert!(matches!(
        block_permutation(64, 0, &blocks),
        Err(AnaviewError::Construction(_))
    ));
    assert!(matches!(
        block_permutation(64, 16, &blocks),
        Err(AnaviewError::Construction(_))
    ));
}

#[test]
fn block_permutation_moves_whole_blocks() {
    // Swap the two top blocks of a 2x2 block grid.
    let blocks = Permutation::new(vec![1, 0, 2, 3]).unwrap();
    let p = block_permutation(4, 2, &blocks).unwrap();
    assert_bijection(&p);
    #[rustfmt::skip]
    let expected = vec![
        2, 3, 0, 1,
        6, 7, 4, 5,
        8, 9, 10, 11,
        12, 13, 14, 15,
    ];
    assert_eq!(p.as_slice(), expected.as_slice());
}

#[test]
fn patch_pair_rejects_non_dividing_block_size() {
    for b in [0, 3, 5, 7, 12, 65] {
        assert!(matches!(
            patch_permutation_pair(b, 0),
            Err(AnaviewError::Construction(_))
        ));
    }
}

#[test]
fn patch_pair_is_bijective_and_consistent_across_stages() {
    let pair = patch_permutation_pair(8, 42).unwrap();
    let p1 = pair.get(Resolution::Stage1);
    let p2 = pair.get(Resolution::Stage2);
    assert_bijection(p1);
    assert_bijection(p2);
    assert!(p1.as_slice().iter().enumerate().any(|(i, &v)| v as usize != i));

    // The top-left pixel of each 64-stage block maps to the top-left pixel of the same
    // block at 256.
    for by in 0..8u32 {
        for bx in 0..8u32 {
            let src1 = p1.as_slice()[(by * 8 * 64 + bx * 8) as usize];
            let src2 = p2.as_slice()[(by * 32 * 256 + bx * 32) as usize];
            assert_eq!((src1 / 64 / 8, src1 % 64 / 8), (src2 / 256 / 32, src2 % 256 / 32));
        }
    }
}

#[test]
fn patch_pair_is_deterministic_per_seed() {
    let a = patch_permutation_pair(1, 5).unwrap();
    let b = patch_permutation_pair(1, 5).unwrap();
    let c = patch_permutation_pair(1, 6).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn inner_circle_mask_is_symmetric_and_sized() {
    let side = 64;
    let mask = inner_circle_mask(side, 24.0);
    let n = (side * side) as usize;
    for i in 0..n {
        assert_eq!(mask[i], mask[n - 1 - i]);
    }
    let area = mask.iter().filter(|&&m| m).count() as f64;
    let expected = std::f64::consts::PI * 24.0 * 24.0;
    assert!((area - expected).abs() / expected < 0.05);
    // Corners are never inside.
    assert!(!mask[0] && !mask[n - 1]);
}

#[test]
fn inner_circle_permutation_fixes_outside_and_rotates_inside() {
    let p = inner_circle_permutation(64, 24).unwrap();
    assert_bijection(&p);
    // Corner untouched.
    assert_eq!(p.as_slice()[0], 0);
    // Pixel right of centre comes from the pixel left of centre.
    let idx = |x: u32, y: u32| (y * 64 + x) as usize;
    assert_eq!(p.as_slice()[idx(40, 31)], idx(23, 32) as u32);
    // A half turn is its own inverse.
    assert_eq!(p.as_slice(), p.inverse_slice());
}

#[test]
fn inner_circle_rejects_bad_radius() {
    assert!(inner_circle_permutation(64, 0).is_err());
    assert!(inner_circle_permutation(64, 33).is_err());
    assert!(inner_circle_pair(24).is_ok());
}
