use serde::{Deserialize, Serialize};

/// Index of a cell in the per-pass cell arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct CellId(pub usize);

/// Index of a lane within its axis' registry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct LaneId(pub usize);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum Axis {
    Column,
    Row,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Axis::Column => Axis::Row,
            Axis::Row => Axis::Column,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Bounds of a UI node in screen pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn center_y(&self) -> i32 {
        ((i64::from(self.top) + i64::from(self.bottom)) / 2) as i32
    }
}

/// Inclusive rectangle in output-cell coordinates.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CellRect {
    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub north: Option<CellId>,
    pub east: Option<CellId>,
    pub south: Option<CellId>,
    pub west: Option<CellId>,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub column: LaneId,
    pub row: LaneId,
    pub element: usize,
    pub width: i32,
    pub height: i32,
    pub neighbors: Neighbors,
}

impl Cell {
    pub fn lane(&self, axis: Axis) -> LaneId {
        match axis {
            Axis::Column => self.column,
            Axis::Row => self.row,
        }
    }
}

/// Final position of one element, as produced by [`crate::layout::Grid::placements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub element: usize,
    pub rect: CellRect,
}
