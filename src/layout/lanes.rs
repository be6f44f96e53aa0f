use super::types::{Axis, Cell, CellId, LaneId};

/// A row or column of cells sharing an approximately equal coordinate.
#[derive(Debug, Clone)]
pub struct Lane {
    value: i32,
    cells: Vec<CellId>,
    offset: i32,
}

impl Lane {
    fn new(value: i32) -> Self {
        Self {
            value,
            cells: Vec::new(),
            offset: 0,
        }
    }

    /// Screen coordinate of the element that created this lane.
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Output-cell offset of the lane (left edge for columns, top line for rows).
    pub fn offset(&self) -> i32 {
        self.offset
    }

    fn raise_offset(&mut self, offset: i32) {
        if offset > self.offset {
            self.offset = offset;
        }
    }
}

/// Lane registry for one axis.
///
/// Lanes are stored in creation order so a [`LaneId`] stays valid while new
/// lanes are inserted; `order` holds the ids sorted by ascending value.
#[derive(Debug, Clone)]
pub struct Lanes {
    axis: Axis,
    increment: i32,
    gap: i32,
    lanes: Vec<Lane>,
    order: Vec<LaneId>,
}

impl Lanes {
    pub fn columns(column_spacing: i32) -> Self {
        Self::new(Axis::Column, column_spacing, column_spacing)
    }

    pub fn rows() -> Self {
        Self::new(Axis::Row, 1, 0)
    }

    fn new(axis: Axis, increment: i32, gap: i32) -> Self {
        Self {
            axis,
            increment,
            gap,
            lanes: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn lane(&self, id: LaneId) -> &Lane {
        &self.lanes[id.0]
    }

    /// Lanes in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (LaneId, &Lane)> + '_ {
        self.order.iter().map(|&id| (id, &self.lanes[id.0]))
    }

    /// Position of a lane in ascending value order.
    pub fn position(&self, id: LaneId) -> Option<usize> {
        self.order.iter().position(|&candidate| candidate == id)
    }

    /// Returns the first lane (in ascending order) within `fuzz` of `value`,
    /// creating one in order if the scan passes `value` without a match.
    ///
    /// Tolerance windows of neighboring lanes can overlap, so the result is
    /// the first match in scan order rather than the nearest lane.
    pub fn find_or_create(&mut self, value: i32, fuzz: i32) -> LaneId {
        let mut insert_at = self.order.len();
        for (position, &id) in self.order.iter().enumerate() {
            let current = self.lanes[id.0].value;
            if current.abs_diff(value) <= fuzz.max(0) as u32 {
                return id;
            }
            if current > value {
                insert_at = position;
                break;
            }
        }

        let id = LaneId(self.lanes.len());
        self.lanes.push(Lane::new(value));
        self.order.insert(insert_at, id);
        tracing::trace!(axis = ?self.axis, value, position = insert_at, "created lane");
        id
    }

    pub(crate) fn add_cell(&mut self, lane: LaneId, cell: CellId) {
        self.lanes[lane.0].cells.push(cell);
    }

    /// Sorts each lane's cells along the lane and links consecutive cells.
    pub(crate) fn link_cells(&mut self, cells: &mut [Cell], across: &Lanes) {
        let orthogonal = self.axis.other();
        for &id in &self.order {
            let lane = &mut self.lanes[id.0];
            lane.cells
                .sort_by_key(|&cell| across.lane(cells[cell.0].lane(orthogonal)).value);

            for pair in lane.cells.windows(2) {
                let (previous, next) = (pair[0], pair[1]);
                match self.axis {
                    Axis::Column => {
                        cells[previous.0].neighbors.south = Some(next);
                        cells[next.0].neighbors.north = Some(previous);
                    }
                    Axis::Row => {
                        cells[previous.0].neighbors.east = Some(next);
                        cells[next.0].neighbors.west = Some(previous);
                    }
                }
            }
        }
    }

    /// Assigns cumulative offsets in ascending lane order.
    ///
    /// Each lane takes the larger of the running counter and whatever its
    /// neighbors already proposed, then proposes `offset + extent + gap` to
    /// the lane of every cell that follows one of its cells across the axis
    /// (east for columns, south for rows).
    pub(crate) fn set_offsets(&mut self, cells: &[Cell]) {
        let mut offset = 0;

        for position in 0..self.order.len() {
            let id = self.order[position];
            self.lanes[id.0].raise_offset(offset);
            offset += self.increment;

            for index in 0..self.lanes[id.0].cells.len() {
                let cell = &cells[self.lanes[id.0].cells[index].0];
                let next = match self.axis {
                    Axis::Column => cell.neighbors.east,
                    Axis::Row => cell.neighbors.south,
                };
                let Some(next) = next else {
                    continue;
                };
                let extent = match self.axis {
                    Axis::Column => cell.width,
                    Axis::Row => cell.height,
                };
                let proposed = self.lanes[id.0].offset + extent + self.gap;
                let target = cells[next.0].lane(self.axis);
                self.lanes[target.0].raise_offset(proposed);
            }
        }
    }
}
