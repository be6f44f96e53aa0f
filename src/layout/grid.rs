use crate::config::GridConfig;

use super::anchor::{LayoutElement, resolve_anchor};
use super::lanes::Lanes;
use super::text::cell_size;
use super::types::{Axis, Cell, CellId, CellRect, Placement, Point};

/// Collects cells for one layout pass.
///
/// Lane membership must be complete before any linking happens, so linking
/// and offset assignment only run in [`GridBuilder::finish`].
#[derive(Debug, Clone)]
pub struct GridBuilder {
    fuzz: i32,
    columns: Lanes,
    rows: Lanes,
    cells: Vec<Cell>,
}

impl GridBuilder {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            fuzz: config.fuzz.max(0),
            columns: Lanes::columns(config.column_spacing.max(0)),
            rows: Lanes::rows(),
            cells: Vec::new(),
        }
    }

    /// Places the element at `index` if it has text and a resolvable anchor.
    pub fn add_element<E: LayoutElement>(&mut self, index: usize, element: &E) -> Option<CellId> {
        let lines = element.text_lines();
        if lines.is_empty() {
            tracing::trace!(element = index, "skipping element without text");
            return None;
        }
        let Some(point) = resolve_anchor(element) else {
            tracing::trace!(element = index, "skipping element without anchor");
            return None;
        };
        let (width, height) = cell_size(lines);
        Some(self.add_cell(index, point, width, height))
    }

    /// Registers a cell of the given size anchored at `point`.
    pub fn add_cell(&mut self, element: usize, point: Point, width: i32, height: i32) -> CellId {
        let column = self.columns.find_or_create(point.x, self.fuzz);
        let row = self.rows.find_or_create(point.y, self.fuzz);
        let id = CellId(self.cells.len());
        self.cells.push(Cell {
            column,
            row,
            element,
            width,
            height,
            neighbors: Default::default(),
        });
        self.columns.add_cell(column, id);
        self.rows.add_cell(row, id);
        id
    }

    pub fn finish(self) -> Grid {
        let GridBuilder {
            columns: mut column_lanes,
            rows: mut row_lanes,
            mut cells,
            ..
        } = self;

        column_lanes.link_cells(&mut cells, &row_lanes);
        row_lanes.link_cells(&mut cells, &column_lanes);

        column_lanes.set_offsets(&cells);
        row_lanes.set_offsets(&cells);

        tracing::debug!(
            cells = cells.len(),
            columns = column_lanes.len(),
            rows = row_lanes.len(),
            "grid finished"
        );

        Grid {
            columns: column_lanes,
            rows: row_lanes,
            cells,
        }
    }
}

/// A linked grid with final lane offsets.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: Lanes,
    rows: Lanes,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn columns(&self) -> &Lanes {
        &self.columns
    }

    pub fn rows(&self) -> &Lanes {
        &self.rows
    }

    pub fn lanes(&self, axis: Axis) -> &Lanes {
        match axis {
            Axis::Column => &self.columns,
            Axis::Row => &self.rows,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn rect(&self, id: CellId) -> CellRect {
        let cell = &self.cells[id.0];
        let left = self.columns.lane(cell.column).offset();
        let top = self.rows.lane(cell.row).offset();
        CellRect {
            left,
            top,
            right: left + cell.width - 1,
            bottom: top + cell.height - 1,
        }
    }

    /// Rectangles for every placed element, row by row from the top.
    pub fn placements(&self) -> Vec<Placement> {
        self.rows
            .iter()
            .flat_map(|(_, row)| row.cells().iter())
            .map(|&id| Placement {
                element: self.cells[id.0].element,
                rect: self.rect(id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(fuzz: i32, column_spacing: i32) -> GridConfig {
        GridConfig {
            fuzz,
            column_spacing,
        }
    }

    #[test]
    fn three_element_scenario() {
        let mut builder = GridBuilder::new(&config(5, 2));
        let a = builder.add_cell(0, Point::new(0, 0), 1, 1);
        let b = builder.add_cell(1, Point::new(50, 0), 2, 1);
        let c = builder.add_cell(2, Point::new(0, 10), 1, 1);
        let grid = builder.finish();

        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.columns().len(), 2);
        assert_eq!(grid.cell(a).row, grid.cell(b).row);
        assert_ne!(grid.cell(a).row, grid.cell(c).row);

        assert_eq!(grid.rect(a).top, 0);
        assert_eq!(grid.rect(b).top, 0);
        assert_eq!(grid.rect(c).top, 1);
        assert_eq!(grid.rect(a).left, 0);
        assert!(grid.rect(b).left >= 3);
        assert_eq!(grid.rect(b), CellRect { left: 3, top: 0, right: 4, bottom: 0 });
    }

    #[test]
    fn links_are_symmetric() {
        let mut builder = GridBuilder::new(&config(5, 2));
        for (index, (x, y)) in [(0, 0), (40, 0), (80, 0), (0, 30), (40, 30), (80, 60)]
            .into_iter()
            .enumerate()
        {
            builder.add_cell(index, Point::new(x, y), 3, 1);
        }
        let grid = builder.finish();

        for (index, cell) in grid.cells().iter().enumerate() {
            let id = CellId(index);
            if let Some(east) = cell.neighbors.east {
                assert_eq!(grid.cell(east).neighbors.west, Some(id));
            }
            if let Some(west) = cell.neighbors.west {
                assert_eq!(grid.cell(west).neighbors.east, Some(id));
            }
            if let Some(south) = cell.neighbors.south {
                assert_eq!(grid.cell(south).neighbors.north, Some(id));
            }
            if let Some(north) = cell.neighbors.north {
                assert_eq!(grid.cell(north).neighbors.south, Some(id));
            }
        }

        let first = grid.cell(CellId(0));
        assert_eq!(first.neighbors.east, Some(CellId(1)));
        assert_eq!(first.neighbors.south, Some(CellId(3)));
        assert_eq!(first.neighbors.north, None);
        assert_eq!(first.neighbors.west, None);
    }

    #[test]
    fn cells_link_in_coordinate_order_not_insertion_order() {
        let mut builder = GridBuilder::new(&config(5, 2));
        let right = builder.add_cell(0, Point::new(100, 0), 1, 1);
        let left = builder.add_cell(1, Point::new(0, 0), 1, 1);
        let middle = builder.add_cell(2, Point::new(50, 0), 1, 1);
        let grid = builder.finish();

        assert_eq!(grid.cell(left).neighbors.east, Some(middle));
        assert_eq!(grid.cell(middle).neighbors.east, Some(right));
        assert_eq!(grid.cell(right).neighbors.east, None);
    }

    #[test]
    fn wide_cell_pushes_next_column() {
        let mut builder = GridBuilder::new(&config(5, 2));
        let label = builder.add_cell(0, Point::new(0, 0), 10, 1);
        let value = builder.add_cell(1, Point::new(200, 0), 4, 1);
        let grid = builder.finish();

        assert_eq!(grid.rect(label).left, 0);
        assert_eq!(grid.rect(value).left, 12);
        assert_eq!(grid.rect(value).right, 15);
    }

    #[test]
    fn tall_cell_pushes_next_row() {
        let mut builder = GridBuilder::new(&config(5, 2));
        let paragraph = builder.add_cell(0, Point::new(0, 0), 20, 3);
        let footer = builder.add_cell(1, Point::new(0, 100), 6, 1);
        let grid = builder.finish();

        assert_eq!(grid.rect(paragraph).bottom, 2);
        assert_eq!(grid.rect(footer).top, 3);
    }

    #[test]
    fn counter_applies_when_lanes_are_not_linked() {
        // Two cells in different rows and columns never link, so only the
        // running counter separates their lanes.
        let mut builder = GridBuilder::new(&config(5, 2));
        let top_left = builder.add_cell(0, Point::new(0, 0), 8, 2);
        let bottom_right = builder.add_cell(1, Point::new(300, 100), 1, 1);
        let grid = builder.finish();

        assert_eq!(grid.rect(top_left).top, 0);
        assert_eq!(grid.rect(bottom_right).top, 1);
        assert_eq!(grid.rect(bottom_right).left, 2);
    }

    #[test]
    fn offsets_never_decrease_in_a_full_table() {
        let mut builder = GridBuilder::new(&config(3, 1));
        let widths = [[4, 1, 7], [2, 9, 1], [6, 3, 3]];
        let mut index = 0;
        for (row, y) in [0, 20, 40].into_iter().enumerate() {
            for (column, x) in [0, 100, 200].into_iter().enumerate() {
                builder.add_cell(index, Point::new(x, y), widths[row][column], 1);
                index += 1;
            }
        }
        let grid = builder.finish();

        for axis in [Axis::Column, Axis::Row] {
            let lanes: Vec<_> = grid.lanes(axis).iter().map(|(_, lane)| lane).collect();
            for pair in lanes.windows(2) {
                assert!(pair[0].value() < pair[1].value());
                assert!(pair[0].offset() <= pair[1].offset());
            }
        }
        let columns: Vec<i32> = grid.columns().iter().map(|(_, lane)| lane.offset()).collect();
        assert_eq!(columns, vec![0, 7, 17]);
    }

    #[test]
    fn unlinked_lane_keeps_counter_offset() {
        // The wide cell only pushes its own east neighbor's column; a later
        // column reached by no link stays at the running counter.
        let mut builder = GridBuilder::new(&config(5, 2));
        let wide = builder.add_cell(0, Point::new(0, 0), 50, 1);
        let pushed = builder.add_cell(1, Point::new(60, 0), 1, 1);
        let alone = builder.add_cell(2, Point::new(100, 30), 1, 1);
        let grid = builder.finish();

        assert_eq!(grid.rect(wide).left, 0);
        assert_eq!(grid.rect(pushed).left, 52);
        assert_eq!(grid.rect(alone).left, 4);
    }

    #[test]
    fn lanes_stay_outside_each_others_fuzz() {
        let fuzz = 4;
        let mut builder = GridBuilder::new(&config(fuzz, 2));
        for (index, value) in [0, 3, 7, 12, 13, 25, 21, 4, 30].into_iter().enumerate() {
            builder.add_cell(index, Point::new(value, value), 1, 1);
        }
        let grid = builder.finish();

        for axis in [Axis::Column, Axis::Row] {
            let values: Vec<i32> = grid.lanes(axis).iter().map(|(_, lane)| lane.value()).collect();
            for (i, a) in values.iter().enumerate() {
                for b in &values[i + 1..] {
                    assert!((a - b).abs() > fuzz, "lanes {a} and {b} within fuzz");
                }
            }
        }
    }

    #[test]
    fn empty_grid_has_no_placements() {
        let grid = GridBuilder::new(&GridConfig::default()).finish();
        assert!(grid.placements().is_empty());
        assert!(grid.rows().is_empty());
        assert!(grid.columns().is_empty());
    }
}
