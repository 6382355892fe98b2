//! Structural checks on a maze: is it perfect, do the walls agree, is a path really a path.
//!
//! None of these are needed to generate or solve a maze. They exist to diagnose a grid that
//! misbehaves, e.g. after a solve reports that there is no path.

use error_chain::bail;
use itertools::Itertools;
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{EdgesCount, NodesCount};
use crate::utils;

/// Summary of a maze that passed `verify_perfect`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MazeReport {
    pub cells: usize,
    pub passages: usize,
    pub dead_ends: usize,
}

impl fmt::Display for MazeReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "perfect maze: {} cells, {} passages, {} dead ends",
               self.cells,
               self.passages,
               self.dead_ends)
    }
}

/// The carved passages as an undirected graph. Node `i` is the cell with row major index `i`.
pub fn passage_graph(grid: &Grid) -> UnGraph<GridCoordinate, ()> {
    let (NodesCount(nodes), EdgesCount(edges)) = grid.graph_size();
    let mut graph = UnGraph::with_capacity(nodes, edges);
    for coord in grid.iter() {
        let _ = graph.add_node(coord);
    }

    for (a, b) in grid.iter_links() {
        if let (Some(a_index), Some(b_index)) = (grid.grid_coordinate_to_index(a),
                                                 grid.grid_coordinate_to_index(b)) {
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
    }
    graph
}

/// Check that the passages form a spanning tree over the grid: one fewer passage than cells,
/// everything connected and no loops.
pub fn verify_perfect(grid: &Grid) -> Result<MazeReport> {
    check_wall_symmetry(grid)?;

    let graph = passage_graph(grid);
    let cells = graph.node_count();
    let passages = graph.edge_count();

    let components = connected_components(&graph);
    if components != 1 {
        bail!(ErrorKind::NotPerfect(format!("{} disconnected regions", components)));
    }
    if is_cyclic_undirected(&graph) {
        bail!(ErrorKind::NotPerfect(String::from("passages form a loop")));
    }
    if passages + 1 != cells {
        bail!(ErrorKind::NotPerfect(format!("{} passages for {} cells", passages, cells)));
    }

    Ok(MazeReport {
        cells,
        passages,
        dead_ends: grid.dead_ends(),
    })
}

/// Every wall between two cells must be seen the same way from both sides, and the outer boundary
/// must be closed.
pub fn check_wall_symmetry(grid: &Grid) -> Result<()> {
    for coord in grid.iter() {
        for &dir in CompassPrimary::ALL.iter() {
            match grid.neighbour_at_direction(coord, dir) {
                Some(neighbour) => {
                    if grid.has_wall(coord, dir) != grid.has_wall(neighbour, dir.opposite()) {
                        bail!(ErrorKind::NotPerfect(format!("cells {} and {} disagree about \
                                                             their shared wall",
                                                            coord,
                                                            neighbour)));
                    }
                }
                None => {
                    if !grid.has_wall(coord, dir) {
                        bail!(ErrorKind::NotPerfect(format!("outer {:?} wall of {} is open",
                                                            dir,
                                                            coord)));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Check that `path` runs from `entrance` to `exit`, stepping only between linked neighbours and
/// never visiting a cell twice.
pub fn check_path(grid: &Grid,
                  path: &[GridCoordinate],
                  entrance: GridCoordinate,
                  exit: GridCoordinate)
                  -> Result<()> {

    match (path.first(), path.last()) {
        (Some(&first), Some(&last)) => {
            if first != entrance {
                bail!(format!("path starts at {} instead of {}", first, entrance));
            }
            if last != exit {
                bail!(format!("path ends at {} instead of {}", last, exit));
            }
        }
        _ => bail!("path is empty"),
    }

    if let Some(&coord) = path.iter().find(|coord| !grid.is_valid_coordinate(**coord)) {
        bail!(ErrorKind::OutOfBounds(coord));
    }

    if let Some((a, b)) = path.iter().tuple_windows().find(|&(a, b)| !grid.is_linked(*a, *b)) {
        bail!(format!("path steps from {} to {} without a passage", a, b));
    }

    let mut seen = utils::fnv_hashset(path.len());
    if let Some(coord) = path.iter().find(|coord| !seen.insert(**coord)) {
        bail!(format!("path visits {} more than once", coord));
    }

    Ok(())
}
