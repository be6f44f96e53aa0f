use crate::ir::Scene;
use crate::layout::{CellId, CellRect, Grid, Lanes, Neighbors};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct GridDump {
    pub columns: Vec<LaneDump>,
    pub rows: Vec<LaneDump>,
    pub cells: Vec<CellDump>,
}

#[derive(Debug, Serialize)]
pub struct LaneDump {
    pub value: i32,
    pub offset: i32,
    pub cells: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub element: String,
    pub column: usize,
    pub row: usize,
    pub width: i32,
    pub height: i32,
    pub neighbors: NeighborDump,
    pub rect: CellRect,
}

#[derive(Debug, Serialize)]
pub struct NeighborDump {
    pub north: Option<usize>,
    pub east: Option<usize>,
    pub south: Option<usize>,
    pub west: Option<usize>,
}

impl From<Neighbors> for NeighborDump {
    fn from(neighbors: Neighbors) -> Self {
        Self {
            north: neighbors.north.map(|id| id.0),
            east: neighbors.east.map(|id| id.0),
            south: neighbors.south.map(|id| id.0),
            west: neighbors.west.map(|id| id.0),
        }
    }
}

impl GridDump {
    /// Lanes are listed in ascending order; cells refer to lanes by that position.
    pub fn from_grid(grid: &Grid, scene: &Scene) -> Self {
        let cells = grid
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| CellDump {
                element: scene
                    .elements
                    .get(cell.element)
                    .map(|element| element.id.clone())
                    .unwrap_or_else(|| cell.element.to_string()),
                column: grid.columns().position(cell.column).unwrap_or_default(),
                row: grid.rows().position(cell.row).unwrap_or_default(),
                width: cell.width,
                height: cell.height,
                neighbors: cell.neighbors.into(),
                rect: grid.rect(CellId(index)),
            })
            .collect();

        GridDump {
            columns: dump_lanes(grid.columns()),
            rows: dump_lanes(grid.rows()),
            cells,
        }
    }
}

fn dump_lanes(lanes: &Lanes) -> Vec<LaneDump> {
    lanes
        .iter()
        .map(|(_, lane)| LaneDump {
            value: lane.value(),
            offset: lane.offset(),
            cells: lane.cells().iter().map(|id| id.0).collect(),
        })
        .collect()
}

pub fn write_layout_dump(path: &Path, grid: &Grid, scene: &Scene) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = GridDump::from_grid(grid, scene);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
