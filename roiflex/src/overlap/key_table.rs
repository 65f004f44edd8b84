use serde::{Deserialize, Serialize};

/// Coordinates joined onto an overlap record from the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCoords {
    pub x_original: i64,
    pub y_original: i64,
    pub x_minimized: i64,
    pub y_minimized: i64,
}

/// Index-grid value to acquisition coordinates, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    rows: Vec<(i64, KeyCoords)>,
}

impl KeyTable {
    /// Rows may arrive in any order; duplicate keys resolve to the first one
    /// given.
    pub fn new(mut rows: Vec<(i64, KeyCoords)>) -> Self {
        rows.sort_by_key(|&(key, _)| key);
        Self { rows }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact-match lookup.
    pub fn get(&self, key: i64) -> Option<&KeyCoords> {
        let pos = self.rows.partition_point(|&(k, _)| k < key);
        self.rows
            .get(pos)
            .filter(|(k, _)| *k == key)
            .map(|(_, coords)| coords)
    }

    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().map(|&(k, _)| k)
    }
}
