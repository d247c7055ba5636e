//! Desktop icon grid geometry.
//!
//! Pointer coordinates relative to the icon container map to 1-based `(row, col)` cells and back.

use serde::{Deserialize, Serialize};

/// Column count of the default viewport-fraction grid.
pub const DEFAULT_GRID_COLUMNS: u32 = 12;
/// Row count of the default viewport-fraction grid.
pub const DEFAULT_GRID_ROWS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// 1-based desktop grid cell.
pub struct GridPosition {
    pub row: u32,
    pub col: u32,
}

impl GridPosition {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// How the icon container is divided into cells.
pub enum GridLayout {
    /// Fixed pixel pitch, optionally bounded.
    Fixed {
        cell_width: f64,
        cell_height: f64,
        max_cols: Option<u32>,
        max_rows: Option<u32>,
    },
    /// The container is split into `columns` x `rows` equal cells.
    ViewportFraction { columns: u32, rows: u32 },
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::viewport_fraction(DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS)
    }
}

impl GridLayout {
    pub const fn fixed(cell_width: f64, cell_height: f64) -> Self {
        Self::Fixed {
            cell_width,
            cell_height,
            max_cols: None,
            max_rows: None,
        }
    }

    pub const fn viewport_fraction(columns: u32, rows: u32) -> Self {
        Self::ViewportFraction { columns, rows }
    }

    /// Bounds a fixed-pitch layout.
    pub const fn bounded(self, cols: u32, rows: u32) -> Self {
        match self {
            Self::Fixed {
                cell_width,
                cell_height,
                ..
            } => Self::Fixed {
                cell_width,
                cell_height,
                max_cols: Some(cols),
                max_rows: Some(rows),
            },
            Self::ViewportFraction { .. } => Self::ViewportFraction {
                columns: cols,
                rows,
            },
        }
    }

    /// Pixel size of one cell inside a container of the given size.
    pub fn cell_size(&self, container_width: f64, container_height: f64) -> (f64, f64) {
        match *self {
            Self::Fixed {
                cell_width,
                cell_height,
                ..
            } => (cell_width, cell_height),
            Self::ViewportFraction { columns, rows } => (
                container_width / f64::from(columns.max(1)),
                container_height / f64::from(rows.max(1)),
            ),
        }
    }

    /// Column and row bounds, `None` where the layout is unbounded.
    pub fn bounds(&self) -> (Option<u32>, Option<u32>) {
        match *self {
            Self::Fixed {
                max_cols, max_rows, ..
            } => (max_cols, max_rows),
            Self::ViewportFraction { columns, rows } => (Some(columns.max(1)), Some(rows.max(1))),
        }
    }

    /// Maps a pointer position (relative to the container) to the cell under it, clamped to the
    /// layout bounds.
    pub fn position_at(
        &self,
        x: f64,
        y: f64,
        container_width: f64,
        container_height: f64,
    ) -> GridPosition {
        let (cell_width, cell_height) = self.cell_size(container_width, container_height);
        let (max_cols, max_rows) = self.bounds();
        GridPosition {
            row: axis_cell(y, cell_height, max_rows),
            col: axis_cell(x, cell_width, max_cols),
        }
    }

    /// Clamps `position` into the layout bounds.
    pub fn clamp(&self, position: GridPosition) -> GridPosition {
        let (max_cols, max_rows) = self.bounds();
        let clamp_axis = |value: u32, max: Option<u32>| match max {
            Some(max) => value.clamp(1, max.max(1)),
            None => value.max(1),
        };
        GridPosition {
            row: clamp_axis(position.row, max_rows),
            col: clamp_axis(position.col, max_cols),
        }
    }

    /// Top-left pixel corner of `position` inside the container. Cells outside the bounds are
    /// drawn at the nearest cell inside them.
    pub fn cell_origin(
        &self,
        position: GridPosition,
        container_width: f64,
        container_height: f64,
    ) -> (f64, f64) {
        let (cell_width, cell_height) = self.cell_size(container_width, container_height);
        let position = self.clamp(position);
        (
            f64::from(position.col - 1) * cell_width,
            f64::from(position.row - 1) * cell_height,
        )
    }
}

fn axis_cell(offset: f64, pitch: f64, max: Option<u32>) -> u32 {
    if pitch.is_nan() || pitch <= 0.0 || !offset.is_finite() {
        return 1;
    }
    let index = (offset.max(0.0) / pitch).floor();
    let cell = if index >= f64::from(u32::MAX - 1) {
        u32::MAX
    } else {
        index as u32 + 1
    };
    match max {
        Some(max) => cell.clamp(1, max.max(1)),
        None => cell,
    }
}
