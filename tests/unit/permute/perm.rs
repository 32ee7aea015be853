use super::*;

#[test]
fn rejects_duplicates_and_out_of_range() {
    assert!(matches!(
        Permutation::new(vec![0, 1, 1]),
        Err(AnaviewError::Construction(_))
    ));
    assert!(matches!(
        Permutation::new(vec![0, 3, 1]),
        Err(AnaviewError::Construction(_))
    ));
    assert!(Permutation::new(vec![2, 0, 1]).is_ok());
}

#[test]
fn inverse_undoes_forward_both_ways() {
    let p = Permutation::new(vec![3, 0, 4, 1, 2]).unwrap();
    assert_eq!(p.inverse_slice(), &[1, 3, 4, 0, 2]);
    for (i, &src) in p.as_slice().iter().enumerate() {
        assert_eq!(p.inverse_slice()[src as usize] as usize, i);
    }

    let data = ['a', 'b', 'c', 'd', 'e'];
    let moved = p.apply(&data).unwrap();
    assert_eq!(moved, vec!['d', 'a', 'e', 'b', 'c']);
    assert_eq!(p.apply_inverse(&moved).unwrap(), data.to_vec());
    assert_eq!(p.apply(&p.apply_inverse(&data).unwrap()).unwrap(), data.to_vec());
}

#[test]
fn inverse_table_undoes_forward_table() {
    let p = Permutation::new(vec![1, 2, 0]).unwrap();
    assert_eq!(p.inverse_slice(), &[2, 0, 1]);
    for (i, &f) in p.as_slice().iter().enumerate() {
        assert_eq!(p.inverse_slice()[f as usize] as usize, i);
    }
}

#[test]
fn apply_checks_length() {
    let p = Permutation::identity(4);
    assert_eq!(p.as_slice(), &[0, 1, 2, 3]);
    assert!(matches!(
        p.apply(&[1u8, 2, 3]),
        Err(AnaviewError::Resolution(_))
    ));
}

#[test]
fn pair_validates_stage_lengths() {
    let ok = PermutationPair::new(Permutation::identity(64 * 64), Permutation::identity(256 * 256));
    assert!(ok.is_ok());

    let swapped =
        PermutationPair::new(Permutation::identity(256 * 256), Permutation::identity(64 * 64));
    assert!(matches!(swapped, Err(AnaviewError::Construction(_))));

    let pair = ok.unwrap();
    assert_eq!(pair.get(Resolution::Stage1).len(), 4096);
    assert_eq!(pair.get(Resolution::Stage2).len(), 65536);
}
