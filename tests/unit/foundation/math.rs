use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn next_below_stays_in_range() {
    let mut rng = Rng64::new(7);
    for bound in [1u64, 2, 3, 10, 4096] {
        for _ in 0..200 {
            assert!(rng.next_below(bound) < bound);
        }
    }
}

#[test]
fn shuffle_keeps_every_element() {
    let mut rng = Rng64::new(99);
    let mut v: Vec<u32> = (0..64).collect();
    rng.shuffle(&mut v);
    assert_ne!(v, (0..64).collect::<Vec<_>>());
    v.sort_unstable();
    assert_eq!(v, (0..64).collect::<Vec<_>>());
}

#[test]
fn linspace_matches_endpoints() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
    assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    assert_eq!(linspace(1.0, 0.0, 2), vec![1.0, 0.0]);
}

#[test]
fn lerp_u8_rounds_and_hits_ends() {
    assert_eq!(lerp_u8(0, 255, 0.0), 0);
    assert_eq!(lerp_u8(0, 255, 1.0), 255);
    assert_eq!(lerp_u8(0, 255, 0.5), 128);
    assert_eq!(lerp_u8(200, 100, 0.5), 150);
}
