//! ROI geometry and the row/col to x/y coordinate boundary.
//!
//! ROIs arrive from the loader in `(row, col)` order. Everything that touches
//! pixels or the instrument document works in `(x, y)` = `(col, row)` order.
//! [`to_raster`] is the only place that swaps the two.

#[cfg(test)]
mod tests;

use std::fmt;

use strum_macros::Display;

use crate::error::{Error, Result};

/// A vertex as produced by the ROI loader: `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowCol {
    pub row: i32,
    pub col: i32,
}

impl RowCol {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// A vertex in raster order: `(x, y)` = `(col, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Formats as `"x,y"`, the instrument's point notation.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Converts a loader vertex into raster order.
#[inline]
pub const fn to_raster(rc: RowCol) -> Point {
    Point::new(rc.col, rc.row)
}

/// Reads the stored pair as `(x, y)` as-is, for vertices that are already in
/// raster order.
#[inline]
pub(crate) const fn as_raster_verbatim(rc: RowCol) -> Point {
    Point::new(rc.row, rc.col)
}

// ============================================================================
// Bounding box
// ============================================================================

/// Axis-aligned box with a half-open far edge: pixels with
/// `x1 <= x < x2` and `y1 <= y < y2` are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// From a bounding rect `(x, y, width, height)`.
    /// Far edges saturate at the `i32` range.
    pub const fn from_rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Box spanned by two opposite corners in any order.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Smallest box containing every point, each point covering one pixel.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::new(
            first.x,
            first.y,
            first.x.saturating_add(1),
            first.y.saturating_add(1),
        );
        for p in &points[1..] {
            bbox.x1 = bbox.x1.min(p.x);
            bbox.y1 = bbox.y1.min(p.y);
            bbox.x2 = bbox.x2.max(p.x.saturating_add(1));
            bbox.y2 = bbox.y2.max(p.y.saturating_add(1));
        }
        Some(bbox)
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    #[inline]
    pub const fn p1(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub const fn p2(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

// ============================================================================
// ROI
// ============================================================================

/// ROI shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Shape {
    #[strum(to_string = "rectangle")]
    Rectangle,
    #[strum(to_string = "polygon")]
    Polygon,
}

/// A region of interest in loader `(row, col)` coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Roi {
    /// Full 4-corner form: top-left, top-right, bottom-right, bottom-left.
    /// Corners 0 and 2 are the opposite pair used for drawing.
    Rectangle { corners: [RowCol; 4] },
    Polygon { vertices: Vec<RowCol> },
}

impl Roi {
    /// Rectangle from two opposite corners, in any order.
    pub fn rectangle(a: RowCol, b: RowCol) -> Self {
        let (r0, r1) = (a.row.min(b.row), a.row.max(b.row));
        let (c0, c1) = (a.col.min(b.col), a.col.max(b.col));
        Roi::Rectangle {
            corners: [
                RowCol::new(r0, c0),
                RowCol::new(r0, c1),
                RowCol::new(r1, c1),
                RowCol::new(r1, c0),
            ],
        }
    }

    /// Rectangle exactly as the loader reported its four corners.
    pub fn rectangle_from_corners(corners: [RowCol; 4]) -> Self {
        Roi::Rectangle { corners }
    }

    pub fn polygon(vertices: Vec<RowCol>) -> Self {
        Roi::Polygon { vertices }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Roi::Rectangle { .. } => Shape::Rectangle,
            Roi::Polygon { .. } => Shape::Polygon,
        }
    }

    pub fn vertices(&self) -> &[RowCol] {
        match self {
            Roi::Rectangle { corners } => corners,
            Roi::Polygon { vertices } => vertices,
        }
    }

    /// The two opposite corners of a rectangle; `None` for polygons.
    pub fn opposite_corners(&self) -> Option<(RowCol, RowCol)> {
        match self {
            Roi::Rectangle { corners } => Some((corners[0], corners[2])),
            Roi::Polygon { .. } => None,
        }
    }

    /// Raster-order extent of a rectangle; `None` for polygons.
    pub fn raster_box(&self) -> Option<BoundingBox> {
        self.opposite_corners()
            .map(|(a, b)| BoundingBox::spanning(to_raster(a), to_raster(b)))
    }

    /// Raster-order vertices, optionally skipping the row/col swap.
    pub fn raster_vertices(&self, flip_xy: bool) -> Vec<Point> {
        self.vertices()
            .iter()
            .map(|&rc| {
                if flip_xy {
                    to_raster(rc)
                } else {
                    as_raster_verbatim(rc)
                }
            })
            .collect()
    }

    /// The serializer's view of this ROI.
    pub fn to_area(&self) -> Area {
        match self {
            Roi::Rectangle { corners } => Area::Box(BoundingBox::spanning(
                to_raster(corners[0]),
                to_raster(corners[2]),
            )),
            Roi::Polygon { .. } => Area::Polygon(self.raster_vertices(true)),
        }
    }
}

/// Ordered ROIs in load order; position `i` (0-based) carries label `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoiCollection {
    rois: Vec<Roi>,
}

impl RoiCollection {
    /// Fails with [`Error::Config`] if the ROIs mix rectangles and polygons.
    pub fn new(rois: Vec<Roi>) -> Result<Self> {
        if let Some(first) = rois.first() {
            let expected = first.shape();
            if let Some((i, roi)) = rois
                .iter()
                .enumerate()
                .find(|(_, roi)| roi.shape() != expected)
            {
                return Err(Error::Config(format!(
                    "ROI {} is a {} but the collection holds {}s",
                    i + 1,
                    roi.shape(),
                    expected
                )));
            }
        }
        Ok(Self { rois })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rois.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rois.is_empty()
    }

    pub fn shape(&self) -> Option<Shape> {
        self.rois.first().map(Roi::shape)
    }

    pub fn rois(&self) -> &[Roi] {
        &self.rois
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Roi> {
        self.rois.iter()
    }

    /// ROI by its 1-based label.
    pub fn by_label(&self, label: u32) -> Option<&Roi> {
        (label as usize)
            .checked_sub(1)
            .and_then(|i| self.rois.get(i))
    }

    /// `(label, roi)` pairs in collection order.
    pub fn labeled(&self) -> impl Iterator<Item = (u32, &Roi)> {
        self.rois.iter().enumerate().map(|(i, roi)| (i as u32 + 1, roi))
    }

    pub fn to_areas(&self) -> Vec<Area> {
        self.rois.iter().map(Roi::to_area).collect()
    }
}

impl<'a> IntoIterator for &'a RoiCollection {
    type Item = &'a Roi;
    type IntoIter = std::slice::Iter<'a, Roi>;

    fn into_iter(self) -> Self::IntoIter {
        self.rois.iter()
    }
}

// ============================================================================
// Area
// ============================================================================

/// Serializer input in raster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Area {
    /// Emitted as its two opposite corners.
    Box(BoundingBox),
    Polygon(Vec<Point>),
}

impl Area {
    pub fn shape(&self) -> Shape {
        match self {
            Area::Box(_) => Shape::Rectangle,
            Area::Polygon(_) => Shape::Polygon,
        }
    }

    /// Points as written to the document.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Area::Box(bbox) => vec![bbox.p1(), bbox.p2()],
            Area::Polygon(points) => points.clone(),
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            Area::Box(_) => 2,
            Area::Polygon(points) => points.len(),
        }
    }

    pub fn min_x(&self) -> Option<i32> {
        match self {
            Area::Box(bbox) => Some(bbox.x1),
            Area::Polygon(points) => points.iter().map(|p| p.x).min(),
        }
    }
}

impl From<BoundingBox> for Area {
    fn from(bbox: BoundingBox) -> Self {
        Area::Box(bbox)
    }
}

impl From<Vec<Point>> for Area {
    fn from(points: Vec<Point>) -> Self {
        Area::Polygon(points)
    }
}
