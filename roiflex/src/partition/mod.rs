//! Random, near-equal partitioning of ROI sets into acquisition batches.
//!
//! Items are shuffled once, then cut into `group_count` consecutive runs of
//! `n / group_count` items. The last run absorbs the remainder, so group sizes
//! for 10 items into 3 groups are 3, 3 and 4.

#[cfg(test)]
mod tests;

use log::debug;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::contour::{sort_boxes_by_y, BoxRecord};
use crate::error::{Error, Result};

/// Partition configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Number of groups to produce.
    pub group_count: usize,
    /// Random seed for reproducibility (None for random).
    pub seed: Option<u64>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            group_count: 4,
            seed: None,
        }
    }
}

impl PartitionConfig {
    pub(crate) fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        }
    }
}

/// Shuffles `items` with a generator owned by this call and splits them.
pub fn partition<T>(items: Vec<T>, config: &PartitionConfig) -> Result<Vec<Vec<T>>> {
    let mut rng = config.rng();
    partition_with_rng(items, config.group_count, &mut rng)
}

pub fn partition_with_rng<T, R: Rng + ?Sized>(
    mut items: Vec<T>,
    group_count: usize,
    rng: &mut R,
) -> Result<Vec<Vec<T>>> {
    let n = items.len();
    if group_count < 1 || group_count > n {
        return Err(Error::Config(format!(
            "cannot split {} items into {} groups",
            n, group_count
        )));
    }

    items.shuffle(rng);

    let per_group = n / group_count;
    let mut rest = items.into_iter();
    let mut groups: Vec<Vec<T>> = (0..group_count - 1)
        .map(|_| rest.by_ref().take(per_group).collect())
        .collect();
    groups.push(rest.collect());

    debug!(
        "Partitioned {} items into {} groups of {} (last {})",
        n,
        group_count,
        per_group,
        groups.last().map_or(0, Vec::len)
    );

    Ok(groups)
}

/// Like [`partition`], with each group re-sorted by `y1` and re-indexed
/// from 0.
pub fn partition_boxes(
    boxes: Vec<BoxRecord>,
    config: &PartitionConfig,
) -> Result<Vec<Vec<BoxRecord>>> {
    let mut groups = partition(boxes, config)?;
    for group in &mut groups {
        sort_boxes_by_y(group);
    }
    Ok(groups)
}
