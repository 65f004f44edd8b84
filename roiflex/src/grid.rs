use std::ops::{Index, IndexMut};
use std::slice;

/// Extent of a grid as `(rows, cols)`, the order image shapes are usually
/// quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row-major 2D grid addressed by `(x, y)` = `(col, row)`.
///
/// Used for label grids, index grids and input masks alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "cells length must equal width * height"
        );
        Self {
            cells,
            width,
            height,
        }
    }

    /// Builds a grid from row slices; all rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self
    where
        T: Clone,
    {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), width, "ragged rows");
            cells.extend_from_slice(row);
        }
        Self::new(width, rows.len(), cells)
    }

    pub fn from_fn(shape: GridShape, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(shape.len());
        for y in 0..shape.rows {
            for x in 0..shape.cols {
                cells.push(f(x, y));
            }
        }
        Self::new(shape.cols, shape.rows, cells)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(x < self.width && y < self.height);
        &self.cells[y * self.width + x]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        debug_assert!(x < self.width && y < self.height);
        &mut self.cells[y * self.width + x]
    }

    /// Bounds-checked access with signed coordinates; `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<&T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(&self.cells[y as usize * self.width + x as usize])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.height, self.width)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        &mut self.cells[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.cells.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    /// Maps every cell, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Copies the half-open window `[x0, x1) x [y0, y1)`, clipped to the grid.
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Grid<T>
    where
        T: Clone,
    {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);

        let mut cells = Vec::with_capacity((x1 - x0) * (y1 - y0));
        for y in y0..y1 {
            cells.extend_from_slice(&self.row(y)[x0..x1]);
        }
        Grid::new(x1 - x0, y1 - y0, cells)
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_filled(shape: GridShape, value: T) -> Self {
        Self {
            cells: vec![value; shape.len()],
            width: shape.cols,
            height: shape.rows,
        }
    }
}

impl<T: Default + Clone> Grid<T> {
    pub fn new_default(shape: GridShape) -> Self {
        Self::new_filled(shape, T::default())
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.cells[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[y * self.width + x]
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
