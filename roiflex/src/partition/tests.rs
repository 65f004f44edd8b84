//! Tests for the group partitioner.

use super::*;
use crate::geometry::BoundingBox;

fn seeded(group_count: usize, seed: u64) -> PartitionConfig {
    PartitionConfig {
        group_count,
        seed: Some(seed),
    }
}

fn sizes<T>(groups: &[Vec<T>]) -> Vec<usize> {
    groups.iter().map(Vec::len).collect()
}

#[test]
fn test_ten_items_into_three_groups() {
    let groups = partition((1..=10).collect::<Vec<u32>>(), &seeded(3, 7)).unwrap();
    assert_eq!(sizes(&groups), vec![3, 3, 4]);
}

#[test]
fn test_group_sizes_and_item_conservation() {
    for n in 1..=25usize {
        for k in 1..=n {
            let groups = partition((0..n).collect::<Vec<_>>(), &seeded(k, 42)).unwrap();

            assert_eq!(groups.len(), k);
            let per = n / k;
            for group in &groups[..k - 1] {
                assert_eq!(group.len(), per);
            }
            assert_eq!(groups[k - 1].len(), n - per * (k - 1));

            let mut all: Vec<usize> = groups.into_iter().flatten().collect();
            all.sort_unstable();
            assert_eq!(all, (0..n).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_same_seed_same_groups() {
    let items: Vec<u32> = (0..50).collect();
    let a = partition(items.clone(), &seeded(5, 123)).unwrap();
    let b = partition(items, &seeded(5, 123)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_shuffle_differently() {
    let items: Vec<u32> = (0..50).collect();
    let first = partition(items.clone(), &seeded(2, 0)).unwrap();
    let any_different =
        (1..8).any(|seed| partition(items.clone(), &seeded(2, seed)).unwrap() != first);
    assert!(any_different);
}

#[test]
fn test_unseeded_partition_keeps_sizes() {
    let config = PartitionConfig {
        group_count: 4,
        seed: None,
    };
    let groups = partition((0..9).collect::<Vec<u8>>(), &config).unwrap();
    assert_eq!(sizes(&groups), vec![2, 2, 2, 3]);
}

#[test]
fn test_invalid_group_count_is_config_error() {
    let items: Vec<u32> = (0..3).collect();
    assert!(matches!(
        partition(items.clone(), &seeded(0, 1)),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        partition(items, &seeded(4, 1)),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        partition(Vec::<u32>::new(), &seeded(1, 1)),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_partition_with_caller_rng() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let groups = partition_with_rng((0..6).collect::<Vec<i32>>(), 2, &mut rng).unwrap();
    assert_eq!(sizes(&groups), vec![3, 3]);
}

#[test]
fn test_box_groups_are_sorted_by_y_and_reindexed() {
    let boxes: Vec<BoxRecord> = (0..12)
        .map(|i| BoxRecord::new(i, BoundingBox::from_rect(i as i32, 100 - 5 * i as i32, 2, 2)))
        .collect();

    let groups = partition_boxes(boxes, &seeded(3, 11)).unwrap();

    assert_eq!(sizes(&groups), vec![4, 4, 4]);
    for group in &groups {
        let indices: Vec<usize> = group.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(group.windows(2).all(|w| w[0].y1 <= w[1].y1));
    }
}

#[test]
fn test_default_config() {
    let config = PartitionConfig::default();
    assert_eq!(config.group_count, 4);
    assert_eq!(config.seed, None);
}
