//! roiflex - regions of interest for imaging mass spectrometry runs.
//!
//! The crate covers the path from ROIs drawn on a reference image to the
//! acquisition instrument:
//! - **Raster**: ROI collections to binary or labeled masks.
//! - **Overlap**: per-ROI coverage of an index map captured at another pitch.
//! - **Contour**: masks back to polygons or bounding boxes.
//! - **Partition**: random, near-equal splits of an ROI set into batches.
//! - **FlexImaging**: `Area` XML documents for the instrument.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use roiflex::{rasterize, GridShape, RasterMode, Roi, RoiCollection, RowCol};
//!
//! let rois = RoiCollection::new(vec![
//!     Roi::rectangle(RowCol::new(0, 0), RowCol::new(10, 20)),
//!     Roi::rectangle(RowCol::new(40, 40), RowCol::new(60, 60)),
//! ])?;
//! let labels = rasterize(&rois, GridShape::new(100, 100), RasterMode::Labeled)?;
//! assert_eq!(labels.distinct_labels(), vec![1, 2]);
//! ```

mod batch;
mod config;
mod contour;
mod error;
mod fleximaging;
mod geometry;
mod grid;
mod overlap;
mod palette;
mod partition;
mod raster;
mod report;

pub use error::{Error, Result};
pub use grid::{Grid, GridShape};

// ============================================================================
// Geometry
// ============================================================================

pub use geometry::{to_raster, Area, BoundingBox, Point, Roi, RoiCollection, RowCol, Shape};

// ============================================================================
// Masks and contours
// ============================================================================

pub use contour::{
    extract_boxes, extract_boxes_with_threshold, extract_polygons,
    extract_polygons_with_threshold, find_external_contours, BoxRecord, DEFAULT_MASK_THRESHOLD,
};
pub use raster::{
    crop_rectangles, rasterize, rasterize_with, LabelGrid, RasterMode, RasterOptions,
    BINARY_FOREGROUND,
};

// ============================================================================
// Overlap accounting
// ============================================================================

pub use overlap::{
    correlate, correlate_with, CorrelateOptions, KeyCoords, KeyMissPolicy, KeyTable,
    OverlapRecord,
};

// ============================================================================
// Partitioning and export
// ============================================================================

pub use batch::{split_boxes, split_polygons, BatchOutput};
pub use config::{BatchConfig, ExportSettings};
pub use fleximaging::{serialize, AreaElement, AreaType, Document};
pub use palette::{spectral_palette, Rgb};
pub use partition::{partition, partition_boxes, partition_with_rng, PartitionConfig};
pub use report::{read_boxes_csv, read_key_table, write_boxes_csv, write_overlap_csv};
