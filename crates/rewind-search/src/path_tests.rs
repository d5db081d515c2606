//! Tests for path arithmetic.

use super::*;
use proptest::prelude::*;

#[test]
fn test_next_path_single_choice_point() {
    assert_eq!(next_path(&[], &[3]).unwrap(), vec![1]);
    assert_eq!(next_path(&[1], &[3]).unwrap(), vec![2]);
    assert!(next_path(&[2], &[3]).is_none());
}

#[test]
fn test_next_path_carries_leftward() {
    assert_eq!(next_path(&[0, 1], &[2, 3]).unwrap(), vec![0, 2]);
    assert_eq!(next_path(&[0, 2], &[2, 3]).unwrap(), vec![1, 0]);
    assert!(next_path(&[1, 2], &[2, 3]).is_none());
}

#[test]
fn test_next_path_pads_unreached_positions() {
    // The run went past the end of its path and met two more choice points.
    assert_eq!(next_path(&[1], &[2, 3, 2]).unwrap(), vec![1, 0, 1]);
}

#[test]
fn test_next_path_drops_positions_past_counts() {
    // A failing run can stop before consuming its whole path.
    assert_eq!(next_path(&[0, 2, 1], &[3]).unwrap(), vec![1]);
}

#[test]
fn test_next_path_no_choice_points() {
    assert!(next_path(&[], &[]).is_none());
}

#[test]
fn test_next_path_carries_over_stale_index() {
    assert_eq!(next_path(&[0, 7], &[2, 3]).unwrap(), vec![1, 0]);
    assert!(next_path(&[usize::MAX], &[4]).is_none());
}

#[test]
fn test_choice_path_display() {
    assert_eq!(ChoicePath::from(vec![0, 2, 1]).to_string(), "[0, 2, 1]");
    assert_eq!(ChoiceCounts::new().to_string(), "[]");
}

#[test]
fn test_choice_path_conversions() {
    let path: ChoicePath = [1, 2, 3].into();

    assert_eq!(path.len(), 3);
    assert_eq!(path.as_slice(), &[1, 2, 3]);
    assert_eq!(path.to_vec(), vec![1, 2, 3]);
    assert_eq!(path, ChoicePath::from(&[1usize, 2, 3][..]));
    assert_eq!(path.iter().sum::<usize>(), 6);
}

#[test]
fn test_sequence_spills_past_inline_capacity() {
    let long: ChoiceCounts = (0..40).collect();
    assert_eq!(long.len(), 40);
    assert_eq!(long[39], 39);
}

fn counts_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..4, 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn next_path_stays_within_counts(counts in counts_strategy(), seed in any::<u64>()) {
        let path: Vec<usize> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (seed as usize).wrapping_add(i) % count)
            .collect();

        if let Some(next) = next_path(&path, &counts) {
            prop_assert_eq!(next.len(), counts.len());
            for (index, count) in next.iter().zip(&counts) {
                prop_assert!(index < count);
            }
            prop_assert!(next.as_slice() > path.as_slice());
        } else {
            for (index, count) in path.iter().zip(&counts) {
                prop_assert_eq!(*index, count - 1);
            }
        }
    }

    #[test]
    fn fixed_counts_enumerate_every_path_once(counts in counts_strategy()) {
        let mut seen = vec![ChoicePath::new()];
        let mut current = ChoicePath::new();
        while let Some(next) = next_path(&current, &counts) {
            seen.push(next.clone());
            current = next;
        }

        let expected: usize = counts.iter().product();
        prop_assert_eq!(seen.len(), expected.max(1));
        let mut sorted = seen.clone();
        sorted.sort_by(|a, b| a.as_slice().cmp(b.as_slice()));
        sorted.dedup();
        prop_assert_eq!(sorted.len(), seen.len());
    }
}
