//! Mixed-slot reservation (§4.4 step 3): choosing which of a
//! subject's simple base slots receive dual-group students.

use std::collections::BTreeSet;

/// Selects `n_dual` indices out of `mixed_indices` with approximately
/// uniform stride, filling any shortfall by scanning the remaining
/// mixed indices in order.
pub fn reserve_mixed_indices(mixed_indices: &[usize], n_dual: usize) -> BTreeSet<usize> {
    let mut reserved = BTreeSet::new();
    if n_dual == 0 || mixed_indices.is_empty() {
        return reserved;
    }
    let step = std::cmp::max(1, mixed_indices.len() / n_dual);
    let mut i = 0;
    while reserved.len() < n_dual && i < mixed_indices.len() {
        reserved.insert(mixed_indices[i]);
        i += step;
    }
    if reserved.len() < n_dual {
        for &idx in mixed_indices {
            if reserved.len() >= n_dual {
                break;
            }
            reserved.insert(idx);
        }
    }
    reserved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_stride_when_divisible() {
        let mixed = vec![0, 2, 4, 6, 8, 10];
        let reserved = reserve_mixed_indices(&mixed, 3);
        assert_eq!(reserved, BTreeSet::from([0, 4, 8]));
    }

    #[test]
    fn fills_shortfall_from_remaining() {
        let mixed = vec![1, 2];
        let reserved = reserve_mixed_indices(&mixed, 2);
        assert_eq!(reserved, BTreeSet::from([1, 2]));
    }

    #[test]
    fn zero_dual_reserves_nothing() {
        let mixed = vec![0, 1, 2];
        assert!(reserve_mixed_indices(&mixed, 0).is_empty());
    }

    #[test]
    fn empty_mixed_reserves_nothing() {
        assert!(reserve_mixed_indices(&[], 3).is_empty());
    }

    #[test]
    fn uniform_stride_snapshot() {
        let mixed = vec![0, 2, 4, 6, 8, 10];
        let reserved = reserve_mixed_indices(&mixed, 3);
        insta::assert_debug_snapshot!(reserved, @r"
        {
            0,
            4,
            8,
        }
        ");
    }
}
