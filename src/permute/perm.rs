use crate::foundation::{
    core::Resolution,
    error::{AnaviewError, AnaviewResult},
};

/// A bijection on `0..len`, stored with its inverse.
///
/// `perm[i]` is the source index moved to position `i`, so applying it gathers
/// `out[i] = src[perm[i]]`. The inverse is computed once on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<u32>,
    inverse: Vec<u32>,
}

impl Permutation {
    /// Validate `perm` as a bijection and cache its inverse.
    pub fn new(perm: Vec<u32>) -> AnaviewResult<Self> {
        let n = perm.len();
        if u32::try_from(n).is_err() {
            return Err(AnaviewError::construction(
                "permutation length exceeds u32 index range",
            ));
        }

        // Scatter form of argsort: inverse[perm[i]] = i.
        let mut inverse = vec![u32::MAX; n];
        for (i, &src) in perm.iter().enumerate() {
            let slot = inverse.get_mut(src as usize).ok_or_else(|| {
                AnaviewError::construction(format!(
                    "permutation entry {src} at position {i} is out of range for length {n}"
                ))
            })?;
            if *slot != u32::MAX {
                return Err(AnaviewError::construction(format!(
                    "permutation entry {src} appears more than once"
                )));
            }
            *slot = i as u32;
        }

        Ok(Self {
            forward: perm,
            inverse,
        })
    }

    pub fn identity(len: usize) -> Self {
        let forward: Vec<u32> = (0..len as u32).collect();
        Self {
            inverse: forward.clone(),
            forward,
        }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.forward
    }

    pub fn inverse_slice(&self) -> &[u32] {
        &self.inverse
    }

    /// `out[i] = src[perm[i]]`.
    pub fn apply<P: Copy>(&self, src: &[P]) -> AnaviewResult<Vec<P>> {
        gather(&self.forward, src)
    }

    /// `out[i] = src[perm_inv[i]]`; undoes [`Permutation::apply`].
    pub fn apply_inverse<P: Copy>(&self, src: &[P]) -> AnaviewResult<Vec<P>> {
        gather(&self.inverse, src)
    }
}

fn gather<P: Copy>(indices: &[u32], src: &[P]) -> AnaviewResult<Vec<P>> {
    if src.len() != indices.len() {
        return Err(AnaviewError::resolution(format!(
            "permutation of length {} applied to {} elements",
            indices.len(),
            src.len()
        )));
    }
    Ok(indices.iter().map(|&i| src[i as usize]).collect())
}

/// Permutations for both sampling stages, generated from the same rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationPair {
    stage1: Permutation,
    stage2: Permutation,
}

impl PermutationPair {
    pub fn new(stage1: Permutation, stage2: Permutation) -> AnaviewResult<Self> {
        for (res, perm) in [(Resolution::Stage1, &stage1), (Resolution::Stage2, &stage2)] {
            if perm.len() != res.pixel_count() {
                let side = res.side();
                return Err(AnaviewError::construction(format!(
                    "stage permutation must have {side}*{side} = {} entries, got {}",
                    res.pixel_count(),
                    perm.len()
                )));
            }
        }
        Ok(Self { stage1, stage2 })
    }

    /// Build both stages by evaluating `build` at each canonical resolution.
    pub fn from_rule(
        mut build: impl FnMut(Resolution) -> AnaviewResult<Permutation>,
    ) -> AnaviewResult<Self> {
        let stage1 = build(Resolution::Stage1)?;
        let stage2 = build(Resolution::Stage2)?;
        Self::new(stage1, stage2)
    }

    pub fn get(&self, res: Resolution) -> &Permutation {
        match res {
            Resolution::Stage1 => &self.stage1,
            Resolution::Stage2 => &self.stage2,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/permute/perm.rs"]
mod tests;
