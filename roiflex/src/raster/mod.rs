//! ROI rasterization into label grids.
//!
//! ROIs are drawn in collection order onto a fresh grid, so on overlap the
//! later ROI's label replaces the earlier one (painter's algorithm, no union).


use std::collections::BTreeMap;

use log::debug;
use strum_macros::Display;

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Point, Roi, RoiCollection, Shape};
use crate::grid::{Grid, GridShape};

/// Fill value for every ROI in [`RasterMode::Binary`].
pub const BINARY_FOREGROUND: u32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum RasterMode {
    /// Every ROI is filled with [`BINARY_FOREGROUND`].
    #[default]
    Binary,
    /// ROI `i` (1-based) is filled with `i`.
    Labeled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    pub mode: RasterMode,
    /// Swap polygon vertices from `(row, col)` to `(x, y)` before filling.
    /// Rectangles always go through the swap.
    pub flip_xy: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            mode: RasterMode::Binary,
            flip_xy: true,
        }
    }
}

/// Image-shaped grid where 0 is background and any other value names the
/// ROI covering the pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    labels: Grid<u32>,
}

impl LabelGrid {
    pub fn grid(&self) -> &Grid<u32> {
        &self.labels
    }

    pub fn into_grid(self) -> Grid<u32> {
        self.labels
    }

    pub fn shape(&self) -> GridShape {
        self.labels.shape()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        *self.labels.get(x, y)
    }

    /// Sorted nonzero labels present in the grid.
    pub fn distinct_labels(&self) -> Vec<u32> {
        self.label_areas().into_keys().collect()
    }

    /// Pixel count per nonzero label.
    pub fn label_areas(&self) -> BTreeMap<u32, usize> {
        let mut areas = BTreeMap::new();
        for &label in self.labels.iter().filter(|&&l| l != 0) {
            *areas.entry(label).or_insert(0) += 1;
        }
        areas
    }

    /// 255 where any ROI is present, 0 elsewhere.
    pub fn to_binary_mask(&self) -> Grid<u8> {
        self.labels.map(|&l| if l != 0 { u8::MAX } else { 0 })
    }
}

/// Rasterizes `rois` into a grid of `shape` with the default options for `mode`.
pub fn rasterize(rois: &RoiCollection, shape: GridShape, mode: RasterMode) -> Result<LabelGrid> {
    rasterize_with(
        rois,
        shape,
        RasterOptions {
            mode,
            ..Default::default()
        },
    )
}

pub fn rasterize_with(
    rois: &RoiCollection,
    shape: GridShape,
    options: RasterOptions,
) -> Result<LabelGrid> {
    if rois.is_empty() {
        return Err(Error::Precondition(
            "ROIs have not been loaded; nothing to rasterize".to_string(),
        ));
    }

    let mut labels = Grid::new_default(shape);
    for (label, roi) in rois.labeled() {
        let value = match options.mode {
            RasterMode::Binary => BINARY_FOREGROUND,
            RasterMode::Labeled => label,
        };
        roi.draw(&mut labels, value, options.flip_xy);
    }

    debug!(
        "Rasterized {} ROIs into {}x{} grid ({} mode)",
        rois.len(),
        shape.cols,
        shape.rows,
        options.mode
    );

    Ok(LabelGrid { labels })
}

impl Roi {
    /// Paints this ROI onto `grid` with `value`.
    pub fn draw(&self, grid: &mut Grid<u32>, value: u32, flip_xy: bool) {
        match self {
            Roi::Rectangle { .. } => {
                if let Some(bbox) = self.raster_box() {
                    fill_box(grid, bbox, value);
                }
            }
            Roi::Polygon { .. } => {
                fill_convex_polygon(grid, &self.raster_vertices(flip_xy), value);
            }
        }
    }
}

/// Slices `image` by every rectangle ROI.
pub fn crop_rectangles<T: Clone>(image: &Grid<T>, rois: &RoiCollection) -> Result<Vec<Grid<T>>> {
    if rois.is_empty() {
        return Err(Error::Precondition(
            "ROIs have not been loaded; nothing to crop".to_string(),
        ));
    }
    if rois.shape() != Some(Shape::Rectangle) {
        return Err(Error::Config(
            "only rectangle ROIs can be cropped from an image".to_string(),
        ));
    }

    Ok(rois
        .iter()
        .filter_map(Roi::raster_box)
        .map(|bbox| {
            let (x0, x1) = clip_span(bbox.x1 as i64, bbox.x2 as i64, image.width());
            let (y0, y1) = clip_span(bbox.y1 as i64, bbox.y2 as i64, image.height());
            image.crop(x0, y0, x1, y1)
        })
        .collect())
}

// ============================================================================
// Fill primitives
// ============================================================================

/// Clips the half-open span `[lo, hi)` to `[0, len)`.
#[inline]
fn clip_span(lo: i64, hi: i64, len: usize) -> (usize, usize) {
    let len = len as i64;
    let lo = lo.clamp(0, len) as usize;
    let hi = hi.clamp(0, len) as usize;
    (lo, hi.max(lo))
}

fn fill_box(grid: &mut Grid<u32>, bbox: BoundingBox, value: u32) {
    let (x0, x1) = clip_span(bbox.x1 as i64, bbox.x2 as i64, grid.width());
    let (y0, y1) = clip_span(bbox.y1 as i64, bbox.y2 as i64, grid.height());
    for y in y0..y1 {
        grid.row_mut(y)[x0..x1].fill(value);
    }
}

/// Scanline fill of a convex polygon, boundary pixels included.
///
/// Each row is filled between the leftmost and rightmost edge crossing, so a
/// concave input gets its row-wise hull filled.
fn fill_convex_polygon(grid: &mut Grid<u32>, points: &[Point], value: u32) {
    let Some(y_min) = points.iter().map(|p| p.y).min() else {
        return;
    };
    let y_max = points.iter().map(|p| p.y).max().unwrap_or(y_min);
    let (row_start, row_end) = clip_span(y_min as i64, y_max as i64 + 1, grid.height());

    for y in row_start..row_end {
        let Some((left, right)) = row_extent(points, y as f64) else {
            continue;
        };
        let (x0, x1) = clip_span(
            left.round() as i64,
            right.round() as i64 + 1,
            grid.width(),
        );
        grid.row_mut(y)[x0..x1].fill(value);
    }
}

/// Leftmost and rightmost x where the polygon outline crosses row `y`.
fn row_extent(points: &[Point], y: f64) -> Option<(f64, f64)> {
    let mut left = f64::INFINITY;
    let mut right = f64::NEG_INFINITY;

    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let (ay, by) = (a.y as f64, b.y as f64);

        if ay == by {
            if y == ay {
                left = left.min(a.x.min(b.x) as f64);
                right = right.max(a.x.max(b.x) as f64);
            }
            continue;
        }
        if y < ay.min(by) || y > ay.max(by) {
            continue;
        }

        let x = a.x as f64 + (y - ay) * (b.x as f64 - a.x as f64) / (by - ay);
        left = left.min(x);
        right = right.max(x);
    }

    (left <= right).then_some((left, right))
}
