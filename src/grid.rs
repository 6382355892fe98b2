use error_chain::bail;
use log::trace;

use crate::cells::{Cell, CompassPrimary, CoordinateOptionSmallVec, CoordinateSmallVec,
                   GridCoordinate, Visitation};
use crate::errors::*;
use crate::grid_iterators::{CellIter, LinksIter, RowIter};
use crate::units::{EdgesCount, Height, NodesCount, Width};


/// A rectangular grid of cells, stored row major in one flat vector.
///
/// Nothing outside the grid holds on to a `Cell`; neighbours, stack entries and paths all refer to
/// cells by `GridCoordinate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: Width,
    height: Height,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        let cells_count = w.checked_mul(h)
            .ok_or_else(|| Error::from(ErrorKind::InvalidDimensions(w, h)))?;

        let cells = (0..cells_count)
            .map(|index| Cell::new(GridCoordinate::from_row_major_index(index, width)))
            .collect();

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Node and edge counts of the grid seen as a graph: every cell plus every pair of orthogonally
    /// adjacent cells, carved or not.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (Width(w), Height(h)) = (self.width, self.height);
        let horizontal = (w - 1) * h;
        let vertical = w * (h - 1);
        (NodesCount(self.size()), EdgesCount(horizontal + vertical))
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut Cell> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        coord.offset(direction)
            .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    /// Cells to the North, East, South or West of a cell (in that order), but not necessarily
    /// linked by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.neighbours_where(coord, |_, _| true)
    }

    /// Neighbours, in North, East, South, West order, that nothing has visited yet.
    pub fn neighbours_unvisited(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.neighbours_where(coord, |_, neighbour| neighbour.is_unvisited())
    }

    /// Unvisited neighbours, in North, East, South, West order, reachable without crossing a wall.
    pub fn passage_neighbours_unvisited(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.neighbours_where(coord, |dir, neighbour| {
            neighbour.is_unvisited() && !neighbour.has_wall(dir.opposite())
        })
    }

    fn neighbours_where<F>(&self, coord: GridCoordinate, keep: F) -> CoordinateSmallVec
        where F: Fn(CompassPrimary, &Cell) -> bool
    {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }

        CompassPrimary::ALL.iter()
            .filter_map(|&dir| {
                self.neighbour_at_direction(coord, dir)
                    .and_then(|neighbour_coord| self.cell(neighbour_coord))
                    .filter(|neighbour| keep(dir, *neighbour))
                    .map(|neighbour| neighbour.coordinate())
            })
            .collect()
    }

    /// Is there a wall on the `direction` side of the cell?
    /// The outer boundary is always walled, and an invalid coordinate is treated as solid.
    pub fn has_wall(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.cell(coord).map_or(true, |cell| cell.has_wall(direction))
    }

    /// Carve a passage between two adjacent cells, removing the wall pair between them.
    ///
    /// Both sides of the wall go in the same call, so the cells always agree about it.
    /// Returns the direction from `a` to `b`.
    pub fn carve(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<CompassPrimary> {
        if !self.is_valid_coordinate(a) {
            bail!(ErrorKind::InvalidCoordinate(a));
        }
        if !self.is_valid_coordinate(b) {
            bail!(ErrorKind::InvalidCoordinate(b));
        }
        if a == b {
            bail!(ErrorKind::SelfLink(a));
        }
        let direction = a.direction_to(b)
            .ok_or_else(|| Error::from(ErrorKind::NotAdjacent(a, b)))?;

        if let Some(cell) = self.cell_mut(a) {
            cell.walls_mut().remove(direction);
        }
        if let Some(cell) = self.cell_mut(b) {
            cell.walls_mut().remove(direction.opposite());
        }
        trace!("carved {:?} from {} to {}", direction, a, b);

        Ok(direction)
    }

    /// Are two cells in the grid linked by a passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        a.direction_to(b).map_or(false, |dir| !self.has_wall(a, dir))
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked_cells = CompassPrimary::ALL.iter()
            .filter(|&&dir| self.is_neighbour_linked(coord, dir))
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect();
        Some(linked_cells)
    }

    /// Number of removed wall pairs.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Cells with exactly one way in or out.
    pub fn dead_ends(&self) -> usize {
        self.iter()
            .filter(|coord| self.links(*coord).map_or(false, |links| links.len() == 1))
            .count()
    }

    #[inline]
    pub fn visitation(&self, coord: GridCoordinate) -> Option<Visitation> {
        self.cell(coord).map(|cell| cell.visitation())
    }

    #[inline]
    pub fn is_on_path(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_on_path())
    }

    /// All the cells currently marked as on the path, in row major order.
    pub fn path_cells(&self) -> Vec<GridCoordinate> {
        self.cells
            .iter()
            .filter(|cell| cell.is_on_path())
            .map(|cell| cell.coordinate())
            .collect()
    }

    pub(crate) fn set_visitation(&mut self, coord: GridCoordinate, visitation: Visitation) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.set_visitation(visitation);
        }
    }

    pub(crate) fn set_on_path(&mut self, coord: GridCoordinate) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.set_on_path(true);
        }
    }

    /// Clear the visitation state and path membership of every cell.
    /// Walls are left alone. Calling it again changes nothing.
    pub fn reset_visitation(&mut self) {
        for cell in &mut self.cells {
            cell.set_visitation(Visitation::Unvisited);
            cell.set_on_path(false);
        }
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.size())
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.width, self.height)
    }

    /// Every carved passage once, as (west or north cell, east or south cell).
    pub fn iter_links(&self) -> LinksIter {
        LinksIter::new(self)
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
