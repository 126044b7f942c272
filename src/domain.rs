pub mod bolt;
pub mod field;
pub mod flash;
pub mod weather;

use std::time::Duration;

/// Virtual pixels covered by one terminal column.
pub const CELL_WIDTH_PX: f32 = 8.0;
/// Virtual pixels covered by one terminal row.
pub const CELL_HEIGHT_PX: f32 = 16.0;

const MIN_FRAME_STEP: f32 = 0.1;
const MAX_FRAME_STEP: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drawable area measured in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn from_cells(columns: u16, rows: u16) -> Self {
        Self {
            width: f32::from(columns) * CELL_WIDTH_PX,
            height: f32::from(rows) * CELL_HEIGHT_PX,
        }
    }

    /// Center of the cell at `(column, row)`, used for pointer positions.
    #[must_use]
    pub fn cell_center(column: u16, row: u16) -> Point {
        Point::new(
            (f32::from(column) + 0.5) * CELL_WIDTH_PX,
            (f32::from(row) + 0.5) * CELL_HEIGHT_PX,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Number of 60 Hz reference frames covered by `dt`.
///
/// Per-frame quantities (drop speed, puddle growth, bolt life) are tuned for a
/// 60 Hz display; terminals tick slower, so every update is scaled by this.
#[must_use]
pub fn frame_steps(dt: Duration) -> f32 {
    (dt.as_secs_f32() * 60.0).clamp(MIN_FRAME_STEP, MAX_FRAME_STEP)
}
