use log::debug;
use rayon::prelude::*;

use crate::error::{MapError, Result};
use crate::map::prepared::PreparedGeometry;
use crate::map::projection::{Point, ProjectionWindow};

/// Margin around the grid, as a multiple of the dot radius
const MARGIN_FACTOR: f64 = 1.25;

/// How grid cells are arranged
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridLayout {
    /// Columns line up from row to row
    #[default]
    Vertical,
    /// Every odd row is shifted right by half a column (honeycomb)
    Diagonal,
}

/// Canvas size, grid resolution and dot radius for one sampling run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub width: f64,
    pub height: f64,
    pub rows: usize,
    pub columns: usize,
    pub radius: f64,
    pub layout: GridLayout,
}

impl GridSpec {
    /// Reject grids that would divide by zero or leave no room between the margins
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 || self.columns < 2 {
            return Err(MapError::DegenerateGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(MapError::InvalidOption(format!("radius {} must be finite and >= 0", self.radius)));
        }
        if !(self.usable_width() > 0.0 && self.usable_height() > 0.0) {
            return Err(MapError::DegenerateCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Keeps every dot of `radius` fully on the canvas
    #[inline(always)]
    pub fn margin(&self) -> f64 {
        self.radius * MARGIN_FACTOR
    }

    #[inline(always)]
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin()
    }

    #[inline(always)]
    pub fn usable_height(&self) -> f64 {
        self.height - 2.0 * self.margin()
    }

    /// Horizontal distance between neighbouring columns
    #[inline(always)]
    pub fn column_spacing(&self) -> f64 {
        self.usable_width() / (self.columns - 1) as f64
    }

    /// Vertical distance between neighbouring rows
    #[inline(always)]
    pub fn row_spacing(&self) -> f64 {
        self.usable_height() / (self.rows - 1) as f64
    }

    /// Pixel position of a cell, or `None` when the diagonal shift pushes it past the right margin
    #[inline]
    pub fn cell(&self, row: usize, column: usize) -> Option<Point> {
        let margin = self.margin();
        let mut x = margin + (column as f64 / (self.columns - 1) as f64) * self.usable_width();
        let y = margin + (row as f64 / (self.rows - 1) as f64) * self.usable_height();

        if self.layout == GridLayout::Diagonal && row % 2 == 1 {
            x += self.column_spacing() / 2.0;
            if x - margin > self.usable_width() {
                return None;
            }
        }

        Some(Point { x, y })
    }

    /// The grid cell closest to an arbitrary pixel. Off-grid pixels snap to the nearest edge cell.
    pub fn nearest_cell(&self, p: Point) -> Point {
        let margin = self.margin();
        let last_row = (self.rows - 1) as f64;
        let last_col = (self.columns - 1) as f64;

        let row = ((p.y - margin) / self.row_spacing()).round().clamp(0.0, last_row) as usize;

        let mut offset = 0.0;
        if self.layout == GridLayout::Diagonal && row % 2 == 1 {
            offset = self.column_spacing() / 2.0;
        }
        let column = ((p.x - margin - offset) / self.column_spacing())
            .round()
            .clamp(0.0, last_col) as usize;

        // a shifted row loses its last column, so step back one
        self.cell(row, column)
            .or_else(|| self.cell(row, column.saturating_sub(1)))
            .unwrap_or(Point {
                x: margin,
                y: margin + (row as f64 / last_row) * self.usable_height(),
            })
    }
}

/// Walk every grid cell in row-major order and keep the ones whose Mercator
/// position falls inside `geometry`.
///
/// Rows are sampled in parallel and concatenated in order, so the output is
/// identical to a sequential walk.
pub fn sample(spec: &GridSpec, window: &ProjectionWindow, geometry: &PreparedGeometry) -> Result<Vec<Point>> {
    spec.validate()?;

    if geometry.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<Vec<Point>> = (0..spec.rows)
        .into_par_iter()
        .map(|row| {
            (0..spec.columns)
                .filter_map(|column| spec.cell(row, column))
                .filter(|&cell| geometry.contains(window.to_mercator(cell, spec.width, spec.height)))
                .collect()
        })
        .collect();

    let points: Vec<Point> = rows.concat();
    debug!(
        "sampled {}x{} grid ({:?}), kept {} points",
        spec.rows,
        spec.columns,
        spec.layout,
        points.len()
    );
    Ok(points)
}
