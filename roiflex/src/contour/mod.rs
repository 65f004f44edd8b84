//! Recovering ROI geometry from masks.
//!
//! Masks are thresholded to foreground/background and handed to imageproc's
//! border follower. Only the outer borders of top-level 8-connected
//! components are kept: holes, and components sitting inside a hole of
//! another component, are ignored.
//!
//! Contours come in raster order (top-to-bottom, left-to-right) of each
//! component's first pixel.


use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Area, BoundingBox, Point};
use crate::grid::Grid;

/// Values strictly greater than this are foreground.
pub const DEFAULT_MASK_THRESHOLD: u8 = 1;

// ============================================================================
// Box records
// ============================================================================

/// One bounding box row as written to the box CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub index: usize,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    /// `"x1,y1"`
    pub p1: String,
    /// `"x2,y2"`
    pub p2: String,
}

impl BoxRecord {
    pub fn new(index: usize, bbox: BoundingBox) -> Self {
        Self {
            index,
            x1: bbox.x1,
            y1: bbox.y1,
            x2: bbox.x2,
            y2: bbox.y2,
            p1: bbox.p1().to_string(),
            p2: bbox.p2().to_string(),
        }
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.x1, self.y1, self.x2, self.y2)
    }

    pub fn to_area(&self) -> Area {
        Area::Box(self.bbox())
    }
}

/// Stable sort by `y1` ascending, then renumber from 0.
pub(crate) fn sort_boxes_by_y(boxes: &mut [BoxRecord]) {
    boxes.sort_by_key(|b| b.y1);
    for (i, b) in boxes.iter_mut().enumerate() {
        b.index = i;
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Simplified outer contours of `mask` with the default threshold.
///
/// `tolerance_fraction` scales each contour's closed perimeter into the
/// simplification tolerance.
pub fn extract_polygons<T>(mask: &Grid<T>, tolerance_fraction: f64) -> Result<Vec<Vec<Point>>>
where
    T: Copy + PartialOrd + From<u8>,
{
    extract_polygons_with_threshold(mask, T::from(DEFAULT_MASK_THRESHOLD), tolerance_fraction)
}

pub fn extract_polygons_with_threshold<T>(
    mask: &Grid<T>,
    threshold: T,
    tolerance_fraction: f64,
) -> Result<Vec<Vec<Point>>>
where
    T: Copy + PartialOrd,
{
    if !tolerance_fraction.is_finite() || tolerance_fraction < 0.0 {
        return Err(Error::Config(format!(
            "tolerance fraction must be a finite non-negative number, got {}",
            tolerance_fraction
        )));
    }

    let contours = find_external_contours(&binarize(mask, threshold));
    let polygons: Vec<Vec<Point>> = contours
        .iter()
        .map(|contour| simplify_closed(contour, tolerance_fraction))
        .collect();

    debug!(
        "Extracted {} polygons ({} vertices total)",
        polygons.len(),
        polygons.iter().map(Vec::len).sum::<usize>()
    );

    Ok(polygons)
}

/// Bounding boxes of the outer contours of `mask`, sorted by `y1` and
/// indexed from 0.
pub fn extract_boxes<T>(mask: &Grid<T>) -> Vec<BoxRecord>
where
    T: Copy + PartialOrd + From<u8>,
{
    extract_boxes_with_threshold(mask, T::from(DEFAULT_MASK_THRESHOLD))
}

pub fn extract_boxes_with_threshold<T>(mask: &Grid<T>, threshold: T) -> Vec<BoxRecord>
where
    T: Copy + PartialOrd,
{
    let mut boxes: Vec<BoxRecord> = find_external_contours(&binarize(mask, threshold))
        .iter()
        .filter_map(|contour| BoundingBox::enclosing(contour))
        .enumerate()
        .map(|(i, bbox)| BoxRecord::new(i, bbox))
        .collect();
    sort_boxes_by_y(&mut boxes);

    debug!("Extracted {} boxes", boxes.len());

    boxes
}

fn binarize<T: Copy + PartialOrd>(mask: &Grid<T>, threshold: T) -> Grid<bool> {
    mask.map(|&v| v > threshold)
}

// ============================================================================
// Contour tracing
// ============================================================================

/// Outer borders of all top-level 8-connected components of `mask`.
pub fn find_external_contours(mask: &Grid<bool>) -> Vec<Vec<Point>> {
    if mask.is_empty() {
        return Vec::new();
    }
    let image = GrayImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        Luma([if mask[(x as usize, y as usize)] { 255 } else { 0 }])
    });

    let contours: Vec<Contour<i32>> = find_contours(&image);
    contours
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .map(|contour| {
            contour
                .points
                .iter()
                .map(|p| Point::new(p.x, p.y))
                .collect()
        })
        .collect()
}

/// Douglas-Peucker on a closed contour with
/// `epsilon = tolerance_fraction * perimeter`.
fn simplify_closed(contour: &[Point], tolerance_fraction: f64) -> Vec<Point> {
    if contour.len() < 3 {
        return contour.to_vec();
    }

    let curve: Vec<imageproc::point::Point<i32>> = contour
        .iter()
        .map(|p| imageproc::point::Point::new(p.x, p.y))
        .collect();
    let epsilon = tolerance_fraction * arc_length(&curve, true);

    approximate_polygon_dp(&curve, epsilon, true)
        .into_iter()
        .map(|p| Point::new(p.x, p.y))
        .collect()
}
