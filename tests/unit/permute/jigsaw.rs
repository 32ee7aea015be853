use super::*;

fn assert_bijection(p: &Permutation) {
    let mut sorted = p.as_slice().to_vec();
    sorted.sort_unstable();
    assert!(sorted.iter().enumerate().all(|(i, &v)| v as usize == i));
}

fn piece(side: u32, x: u32, y: u32) -> u32 {
    index_of(owner(side, x, y))
}

fn index_of(c: Cell) -> u32 {
    c.row * GRID + c.col
}

#[test]
fn piece_ownership_is_quarter_turn_symmetric() {
    for side in [64u32, 256] {
        for y in (0..side).step_by(3) {
            for x in (0..side).step_by(5) {
                let here = owner(side, x, y);
                let (rx, ry) = rotate_px(side, (x, y), 1);
                assert_eq!(owner(side, rx, ry), here.rotated(1), "side {side} at ({x},{y})");
            }
        }
    }
}

#[test]
fn pieces_have_tabs_across_edges() {
    // Just right of the (0,0)|(0,1) edge, inside the tab of piece 0.
    assert_eq!(piece(64, 18, 7), 0);
    // Far from any tab, a pixel belongs to its own cell.
    assert_eq!(piece(64, 2, 2), 0);
    assert_eq!(piece(64, 60, 60), 15);
    assert!(JigsawPlan::from_seed(0).permutation(60).is_err());
}

#[test]
fn pieces_in_an_orbit_have_equal_area() {
    let side = 64;
    let mut area = [0usize; 16];
    for y in 0..side {
        for x in 0..side {
            area[piece(side, x, y) as usize] += 1;
        }
    }
    assert_eq!(area.iter().sum::<usize>(), (side * side) as usize);
    for rep in [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)] {
        let a = area[index_of(rep) as usize];
        for q in 1..4 {
            assert_eq!(area[index_of(rep.rotated(q)) as usize], a);
        }
    }
}

#[test]
fn plan_permutations_are_bijections() {
    for seed in [0u64, 1, 2, 17, 12345] {
        let plan = JigsawPlan::from_seed(seed);
        for side in [64u32, 256] {
            assert_bijection(&plan.permutation(side).unwrap());
        }
    }
}

#[test]
fn plan_is_deterministic_and_seed_dependent() {
    assert_eq!(JigsawPlan::from_seed(3), JigsawPlan::from_seed(3));
    let distinct = (0..8u64)
        .map(JigsawPlan::from_seed)
        .filter(|p| p.turns.iter().flatten().any(|&t| t != 0))
        .count();
    assert!(distinct > 0);
}

#[test]
fn same_piece_turns_at_both_stages() {
    let plan = JigsawPlan::from_seed(9);
    for row in 0..4u32 {
        for col in 0..4u32 {
            let t64 = plan.turns_at(64, col * 16 + 8, row * 16 + 8);
            let t256 = plan.turns_at(256, col * 64 + 32, row * 64 + 32);
            assert_eq!(t64, t256);
        }
    }
}

#[test]
fn moved_pixels_follow_whole_image_rotation() {
    let plan = JigsawPlan::from_seed(21);
    let side = 64;
    let perm = plan.permutation(side).unwrap();
    for y in (0..side).step_by(7) {
        for x in (0..side).step_by(7) {
            let k = plan.turns_at(side, x, y);
            let (dx, dy) = rotate_px(side, (x, y), k);
            assert_eq!(perm.as_slice()[(dy * side + dx) as usize], y * side + x);
        }
    }
}
