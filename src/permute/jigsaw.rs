//! Jigsaw layout: a 4x4 grid of interlocking pieces whose shapes are invariant under a
//! quarter turn about the image centre.
//!
//! Piece ownership is defined on the top-left quadrant only and extended to the other
//! three quadrants by rotation, so `owner(rot(p)) == rot(owner(p))` holds exactly. Moving
//! a piece to another slot of its rotation orbit is then a rigid rotation of its pixels,
//! and the moved pieces always tile the frame.

use crate::{
    foundation::{
        core::Resolution,
        error::{AnaviewError, AnaviewResult},
        math::Rng64,
    },
    permute::perm::{Permutation, PermutationPair},
};

const GRID: u32 = 4;
/// Tab disk centre offset from the edge midpoint, in cell units.
const TAB_OFFSET: f64 = 0.2;
/// Tab disk radius, in cell units.
const TAB_RADIUS: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    row: u32,
    col: u32,
}

impl Cell {
    const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Quarter turn clockwise about the grid centre.
    fn rotated(self, turns: u32) -> Self {
        let mut c = self;
        for _ in 0..turns % 4 {
            c = Cell::new(c.col, GRID - 1 - c.row);
        }
        c
    }

    fn quadrant(self) -> u32 {
        let h = GRID / 2;
        quadrant_of(self.col < h, self.row < h)
    }
}

/// A tab of `donor` protruding across the shared edge into `receiver`.
struct Tab {
    donor: Cell,
    receiver: Cell,
}

// Tabs received by top-left quadrant cells. Tabs crossing the vertical centre line are
// received here; those crossing the horizontal centre line are produced by the rotated
// copy of this table, which keeps one tab per edge.
const TABS: [Tab; 6] = [
    Tab { donor: Cell::new(0, 0), receiver: Cell::new(0, 1) },
    Tab { donor: Cell::new(1, 1), receiver: Cell::new(1, 0) },
    Tab { donor: Cell::new(1, 0), receiver: Cell::new(0, 0) },
    Tab { donor: Cell::new(0, 1), receiver: Cell::new(1, 1) },
    Tab { donor: Cell::new(0, 2), receiver: Cell::new(0, 1) },
    Tab { donor: Cell::new(1, 2), receiver: Cell::new(1, 1) },
];

fn quadrant_of(left: bool, top: bool) -> u32 {
    match (top, left) {
        (true, true) => 0,
        (true, false) => 1,
        (false, false) => 2,
        (false, true) => 3,
    }
}

/// Quarter turn clockwise of pixel `(x, y)` about the image centre.
fn rotate_px(side: u32, (x, y): (u32, u32), turns: u32) -> (u32, u32) {
    let (mut x, mut y) = (x, y);
    for _ in 0..turns % 4 {
        (x, y) = (side - 1 - y, x);
    }
    (x, y)
}

fn validate_side(side: u32) -> AnaviewResult<()> {
    if side < 2 * GRID || !side.is_multiple_of(2 * GRID) {
        return Err(AnaviewError::construction(format!(
            "jigsaw side {side} must be a positive multiple of {}",
            2 * GRID
        )));
    }
    Ok(())
}

/// Owner of a top-left quadrant pixel.
fn owner_top_left(side: u32, x: u32, y: u32) -> Cell {
    let s = f64::from(side / GRID);
    let cell = Cell::new(y / (side / GRID), x / (side / GRID));
    let u = (f64::from(x) + 0.5) / s;
    let v = (f64::from(y) + 0.5) / s;

    for tab in TABS.iter().filter(|t| t.receiver == cell) {
        let (dr, dc) = (
            f64::from(tab.receiver.row) - f64::from(tab.donor.row),
            f64::from(tab.receiver.col) - f64::from(tab.donor.col),
        );
        let mid_u = (f64::from(tab.receiver.col) + f64::from(tab.donor.col)) / 2.0 + 0.5;
        let mid_v = (f64::from(tab.receiver.row) + f64::from(tab.donor.row)) / 2.0 + 0.5;
        let cu = mid_u + TAB_OFFSET * dc;
        let cv = mid_v + TAB_OFFSET * dr;
        if (u - cu).powi(2) + (v - cv).powi(2) < TAB_RADIUS * TAB_RADIUS {
            return tab.donor;
        }
    }
    cell
}

fn owner(side: u32, x: u32, y: u32) -> Cell {
    let h = side / 2;
    let q = quadrant_of(x < h, y < h);
    let (x0, y0) = rotate_px(side, (x, y), 4 - q);
    owner_top_left(side, x0, y0).rotated(q)
}

/// Seeded assignment of every piece to a slot of its rotation orbit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JigsawPlan {
    // turns[orbit][quarter]: clockwise quarter turns applied to that piece.
    turns: [[u32; 4]; 4],
}

impl JigsawPlan {
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let mut turns = [[0u32; 4]; 4];
        for orbit in &mut turns {
            let mut slots = [0u32, 1, 2, 3];
            rng.shuffle(&mut slots);
            for (q, t) in orbit.iter_mut().enumerate() {
                *t = (slots[q] + 4 - q as u32) % 4;
            }
        }
        Self { turns }
    }

    fn turns_for(&self, piece: Cell) -> u32 {
        let q = piece.quadrant();
        let rep = piece.rotated(4 - q);
        self.turns[(rep.row * 2 + rep.col) as usize][q as usize]
    }

    /// Quarter turns applied to the piece that owns pixel `(x, y)`.
    pub fn turns_at(&self, side: u32, x: u32, y: u32) -> u32 {
        self.turns_for(owner(side, x, y))
    }

    /// Pixel permutation that moves every piece to its assigned slot.
    pub fn permutation(&self, side: u32) -> AnaviewResult<Permutation> {
        validate_side(side)?;
        let mut perm = vec![u32::MAX; (side * side) as usize];
        for y in 0..side {
            for x in 0..side {
                let k = self.turns_at(side, x, y);
                let (dx, dy) = rotate_px(side, (x, y), k);
                perm[(dy * side + dx) as usize] = y * side + x;
            }
        }
        Permutation::new(perm)
    }

    pub fn permutation_pair(&self) -> AnaviewResult<PermutationPair> {
        PermutationPair::from_rule(|res: Resolution| self.permutation(res.side()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/permute/jigsaw.rs"]
mod tests;
