//! Cross-resolution overlap between ROIs and an index grid.
//!
//! The ROIs are rasterized onto the index grid's own pixel lattice, and every
//! ROI reports which index values it covers and by how much. Pixel counts are
//! converted to index-grid units through the ratio of the two pitches.


mod key_table;

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error::{Error, Result};
use crate::geometry::RoiCollection;
use crate::grid::Grid;
use crate::raster::{rasterize_with, RasterMode, RasterOptions};

pub use key_table::{KeyCoords, KeyTable};

/// What to do with a record whose index value has no key table row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KeyMissPolicy {
    /// Keep the record with empty coordinates and log a warning.
    #[default]
    Blank,
    /// Omit the record.
    Drop,
    /// Abort with [`Error::KeyMiss`].
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelateOptions {
    pub key_miss: KeyMissPolicy,
}

/// Coverage of one index value by one ROI.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapRecord {
    /// 1-based ROI label.
    pub roi_index: u32,
    pub grid_value: u32,
    /// Overlapping pixel count in index-grid pixel units.
    pub coverage: f64,
    /// Set only when a key table was joined and held the value.
    pub key: Option<KeyCoords>,
}

/// Overlap of `rois` with `index_grid`, using the default options.
///
/// `index_pitch` and `roi_pitch` are the physical pixel sizes of the index
/// grid and of the image the ROIs were drawn on.
pub fn correlate(
    rois: &RoiCollection,
    index_grid: &Grid<u32>,
    index_pitch: f64,
    roi_pitch: f64,
    key_table: Option<&KeyTable>,
) -> Result<Vec<OverlapRecord>> {
    correlate_with(
        rois,
        index_grid,
        index_pitch,
        roi_pitch,
        key_table,
        CorrelateOptions::default(),
    )
}

/// Records are ordered by `roi_index`, then `grid_value`. ROIs that cover no
/// pixel produce no records.
pub fn correlate_with(
    rois: &RoiCollection,
    index_grid: &Grid<u32>,
    index_pitch: f64,
    roi_pitch: f64,
    key_table: Option<&KeyTable>,
    options: CorrelateOptions,
) -> Result<Vec<OverlapRecord>> {
    if rois.is_empty() {
        return Err(Error::State(
            "polygon coordinates have not been loaded".to_string(),
        ));
    }
    let scale_factor = scale_factor(index_pitch, roi_pitch)?;

    let labels = rasterize_with(
        rois,
        index_grid.shape(),
        RasterOptions {
            mode: RasterMode::Labeled,
            flip_xy: true,
        },
    )?;

    let mut counts: BTreeMap<(u32, u32), usize> = BTreeMap::new();
    for (&label, &value) in labels.grid().iter().zip(index_grid.iter()) {
        if label != 0 {
            *counts.entry((label, value)).or_insert(0) += 1;
        }
    }

    let pixel_area = scale_factor * scale_factor;
    let mut records = Vec::with_capacity(counts.len());
    let mut misses = 0usize;

    for ((roi_index, grid_value), count) in counts {
        let key = match key_table {
            None => None,
            Some(table) => match table.get(grid_value as i64) {
                Some(coords) => Some(*coords),
                None => {
                    misses += 1;
                    match options.key_miss {
                        KeyMissPolicy::Blank => {
                            warn!(
                                "Index value {} (ROI {}) has no key table row",
                                grid_value, roi_index
                            );
                            None
                        }
                        KeyMissPolicy::Drop => continue,
                        KeyMissPolicy::Fail => return Err(Error::KeyMiss { grid_value }),
                    }
                }
            },
        };

        records.push(OverlapRecord {
            roi_index,
            grid_value,
            coverage: count as f64 / pixel_area,
            key,
        });
    }

    debug!(
        "Correlated {} ROIs against {}x{} index grid: {} records, scale factor {}, {} key misses",
        rois.len(),
        index_grid.width(),
        index_grid.height(),
        records.len(),
        scale_factor,
        misses
    );

    Ok(records)
}

/// Index-grid pixel size in units of ROI-image pixels.
fn scale_factor(index_pitch: f64, roi_pitch: f64) -> Result<f64> {
    for (name, pitch) in [("index", index_pitch), ("ROI", roi_pitch)] {
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(Error::Config(format!(
                "{} pitch must be a positive finite number, got {}",
                name, pitch
            )));
        }
    }
    Ok(index_pitch / roi_pitch)
}
