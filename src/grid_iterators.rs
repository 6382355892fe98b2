use std::fmt;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Grid;
use crate::units::{Height, Width};

/// Every coordinate of a grid in row major order.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    width: Width,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(width: Width, cells_count: usize) -> CellIter {
        CellIter {
            width,
            current_cell_number: 0,
            cells_count,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// The coordinates of a grid one row at a time, north to south.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    width: Width,
    height: Height,
    current_row: usize,
}

impl RowIter {
    pub(crate) fn new(width: Width, height: Height) -> RowIter {
        RowIter {
            width,
            height,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.height.0 {
            let y = self.current_row as u32;
            let coords = (0..self.width.0)
                .map(|x| GridCoordinate::new(x as u32, y))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.height.0 - self.current_row;
        (lower_bound, Some(lower_bound))
    }
}

/// Carved passages, each reported once from its west or north end.
pub struct LinksIter<'a> {
    grid: &'a Grid,
    cells: CellIter,
    pending_south: Option<GridCoordinate>,
}

impl<'a> LinksIter<'a> {
    pub(crate) fn new(grid: &'a Grid) -> LinksIter<'a> {
        LinksIter {
            grid,
            cells: grid.iter(),
            pending_south: None,
        }
    }
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(coord) = self.pending_south.take() {
            if let Some(south) = self.linked_neighbour(coord, CompassPrimary::South) {
                return Some((coord, south));
            }
        }

        while let Some(coord) = self.cells.next() {
            self.pending_south = Some(coord);
            if let Some(east) = self.linked_neighbour(coord, CompassPrimary::East) {
                return Some((coord, east));
            }
            self.pending_south = None;
            if let Some(south) = self.linked_neighbour(coord, CompassPrimary::South) {
                return Some((coord, south));
            }
        }
        None
    }
}

impl<'a> LinksIter<'a> {
    fn linked_neighbour(&self, coord: GridCoordinate, dir: CompassPrimary) -> Option<GridCoordinate> {
        if self.grid.is_neighbour_linked(coord, dir) {
            self.grid.neighbour_at_direction(coord, dir)
        } else {
            None
        }
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: cells iter : {:?}", self.cells)
    }
}
