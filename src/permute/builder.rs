use crate::{
    foundation::{
        core::Resolution,
        error::{AnaviewError, AnaviewResult},
        math::Rng64,
    },
    permute::perm::{Permutation, PermutationPair},
};

/// Uniformly random permutation of `0..len`.
pub fn random_permutation(len: usize, rng: &mut Rng64) -> AnaviewResult<Permutation> {
    let mut v: Vec<u32> = (0..len as u32).collect();
    rng.shuffle(&mut v);
    Permutation::new(v)
}

/// Expand a permutation over square blocks into a pixel permutation.
///
/// The `side x side` grid is cut into `block_side x block_side` blocks; block `k` of the
/// output takes the contents of block `blocks[k]`, with pixel offsets inside the block kept.
pub fn block_permutation(
    side: u32,
    block_side: u32,
    blocks: &Permutation,
) -> AnaviewResult<Permutation> {
    if block_side == 0 || !side.is_multiple_of(block_side) {
        return Err(AnaviewError::construction(format!(
            "block side {block_side} does not evenly divide grid side {side}"
        )));
    }
    let grid = side / block_side;
    if blocks.len() != (grid * grid) as usize {
        return Err(AnaviewError::construction(format!(
            "block permutation has {} entries, expected {grid}*{grid}",
            blocks.len()
        )));
    }

    let block_perm = blocks.as_slice();
    let mut perm = Vec::with_capacity((side * side) as usize);
    for y in 0..side {
        for x in 0..side {
            let dst_block = (y / block_side) * grid + x / block_side;
            let src_block = block_perm[dst_block as usize];
            let (sy, sx) = (src_block / grid, src_block % grid);
            let src_y = sy * block_side + y % block_side;
            let src_x = sx * block_side + x % block_side;
            perm.push(src_y * side + src_x);
        }
    }
    Permutation::new(perm)
}

/// Random block permutation at both stages.
///
/// `block_size` is measured at the 64 stage and scales with the resolution, so the same
/// blocks move at 256. A block size of 1 permutes individual 64-stage pixels.
pub fn patch_permutation_pair(block_size: u32, seed: u64) -> AnaviewResult<PermutationPair> {
    let base = Resolution::Stage1.side();
    if block_size == 0 || !base.is_multiple_of(block_size) {
        return Err(AnaviewError::construction(format!(
            "block size {block_size} must evenly divide {base}"
        )));
    }
    let grid = base / block_size;
    let mut rng = Rng64::new(seed);
    let blocks = random_permutation((grid * grid) as usize, &mut rng)?;

    PermutationPair::from_rule(|res| {
        block_permutation(res.side(), block_size * res.scale(), &blocks)
    })
}

/// Row-major mask of the centred disk `(x - c)^2 + (y - c)^2 < r^2`, `c = (side - 1) / 2`.
///
/// Evaluated on doubled integer coordinates so the mask is exactly symmetric.
pub fn inner_circle_mask(side: u32, radius: f64) -> Vec<bool> {
    let n = i64::from(side) - 1;
    let r2 = 4.0 * radius * radius;
    let mut mask = Vec::with_capacity((side * side) as usize);
    for y in 0..i64::from(side) {
        let dy = 2 * y - n;
        for x in 0..i64::from(side) {
            let dx = 2 * x - n;
            mask.push(((dx * dx + dy * dy) as f64) < r2);
        }
    }
    mask
}

/// Identity outside the centred disk, half turn inside it.
pub fn inner_circle_permutation(side: u32, radius: u32) -> AnaviewResult<Permutation> {
    if radius == 0 || 2 * radius > side {
        return Err(AnaviewError::construction(format!(
            "inner circle radius {radius} must be in 1..={} for side {side}",
            side / 2
        )));
    }
    let mask = inner_circle_mask(side, f64::from(radius));
    let perm = mask
        .iter()
        .enumerate()
        .map(|(i, &inside)| {
            let i = i as u32;
            if inside {
                let (y, x) = (i / side, i % side);
                (side - 1 - y) * side + (side - 1 - x)
            } else {
                i
            }
        })
        .collect();
    Permutation::new(perm)
}

/// Inner-circle permutation at both stages; `radius` is given at the 64 stage and scaled.
pub fn inner_circle_pair(radius: u32) -> AnaviewResult<PermutationPair> {
    PermutationPair::from_rule(|res| inner_circle_permutation(res.side(), radius * res.scale()))
}

#[cfg(test)]
#[path = "../../tests/unit/permute/builder.rs"]
mod tests;
