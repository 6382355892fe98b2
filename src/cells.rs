use smallvec::SmallVec;
use std::fmt;

use crate::units::Width;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> GridCoordinate {
        let Width(w) = width;
        GridCoordinate::new((index % w) as u32, (index / w) as u32)
    }

    /// The coordinate one step away in `dir`, or None when that would leave the positive quadrant.
    /// Whether the result lies inside a particular grid is for the grid to decide.
    pub fn offset(self, dir: CompassPrimary) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| GridCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(1).map(|x| GridCoordinate { x, y }),
            CompassPrimary::South => y.checked_add(1).map(|y| GridCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(1).map(|x| GridCoordinate { x, y }),
        }
    }

    /// Which direction `other` lies in, if it is orthogonally adjacent to this coordinate.
    ///
    /// Same column means a north/south relationship, same row means east/west.
    pub fn direction_to(self, other: GridCoordinate) -> Option<CompassPrimary> {
        if self.x == other.x {
            if other.y.checked_add(1) == Some(self.y) {
                Some(CompassPrimary::North)
            } else if self.y.checked_add(1) == Some(other.y) {
                Some(CompassPrimary::South)
            } else {
                None
            }
        } else if self.y == other.y {
            if self.x.checked_add(1) == Some(other.x) {
                Some(CompassPrimary::East)
            } else if other.x.checked_add(1) == Some(self.x) {
                Some(CompassPrimary::West)
            } else {
                None
            }
        } else {
            None
        }
    }

    pub fn manhattan_distance(self, other: GridCoordinate) -> u32 {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx + dy
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Neighbour priority order. Generation and solving both walk neighbours in this order, which
    /// is what makes a seeded maze and its solution reproducible.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// "Wall present" flags for the four sides of a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Walls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Walls {
    pub fn intact() -> Walls {
        Walls {
            north: true,
            east: true,
            south: true,
            west: true,
        }
    }

    #[inline]
    pub fn is_present(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.north,
            CompassPrimary::East => self.east,
            CompassPrimary::South => self.south,
            CompassPrimary::West => self.west,
        }
    }

    pub fn intact_count(&self) -> usize {
        CompassPrimary::ALL.iter().filter(|&&dir| self.is_present(dir)).count()
    }

    // Only `Grid::carve` removes walls, always as a pair.
    pub(crate) fn remove(&mut self, dir: CompassPrimary) {
        match dir {
            CompassPrimary::North => self.north = false,
            CompassPrimary::East => self.east = false,
            CompassPrimary::South => self.south = false,
            CompassPrimary::West => self.west = false,
        }
    }
}

/// Which phase, if any, has claimed a cell.
///
/// Generation and solving each track their own visits; `Grid::reset_visitation` is the hand over
/// point between the two.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Visitation {
    Unvisited,
    CarveVisited,
    SearchVisited,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    coord: GridCoordinate,
    walls: Walls,
    visitation: Visitation,
    on_path: bool,
}

impl Cell {
    pub fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            walls: Walls::intact(),
            visitation: Visitation::Unvisited,
            on_path: false,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls.is_present(dir)
    }

    #[inline]
    pub fn visitation(&self) -> Visitation {
        self.visitation
    }

    #[inline]
    pub fn is_unvisited(&self) -> bool {
        self.visitation == Visitation::Unvisited
    }

    #[inline]
    pub fn is_on_path(&self) -> bool {
        self.on_path
    }

    pub(crate) fn walls_mut(&mut self) -> &mut Walls {
        &mut self.walls
    }

    pub(crate) fn set_visitation(&mut self, visitation: Visitation) {
        self.visitation = visitation;
    }

    pub(crate) fn set_on_path(&mut self, on_path: bool) {
        self.on_path = on_path;
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets_stop_at_the_origin_edges() {
        let origin = GridCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(origin.offset(CompassPrimary::East), Some(GridCoordinate::new(1, 0)));
        assert_eq!(origin.offset(CompassPrimary::South), Some(GridCoordinate::new(0, 1)));
    }

    #[test]
    fn direction_between_adjacent_coordinates() {
        let gc = |x, y| GridCoordinate::new(x, y);
        assert_eq!(gc(1, 1).direction_to(gc(1, 0)), Some(CompassPrimary::North));
        assert_eq!(gc(1, 1).direction_to(gc(2, 1)), Some(CompassPrimary::East));
        assert_eq!(gc(1, 1).direction_to(gc(1, 2)), Some(CompassPrimary::South));
        assert_eq!(gc(1, 1).direction_to(gc(0, 1)), Some(CompassPrimary::West));

        assert_eq!(gc(1, 1).direction_to(gc(1, 1)), None);
        assert_eq!(gc(1, 1).direction_to(gc(2, 2)), None);
        assert_eq!(gc(1, 1).direction_to(gc(1, 3)), None);
        assert_eq!(gc(0, 0).direction_to(gc(3, 0)), None);
    }

    #[test]
    fn opposite_is_an_involution() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn row_major_index_conversion() {
        assert_eq!(GridCoordinate::from_row_major_index(0, Width(3)), GridCoordinate::new(0, 0));
        assert_eq!(GridCoordinate::from_row_major_index(4, Width(3)), GridCoordinate::new(1, 1));
        assert_eq!(GridCoordinate::from_row_major_index(8, Width(3)), GridCoordinate::new(2, 2));
    }

    #[test]
    fn new_cells_are_closed_and_clear() {
        let cell = Cell::new(GridCoordinate::new(2, 3));
        assert_eq!(cell.coordinate(), GridCoordinate::new(2, 3));
        assert_eq!(cell.walls(), Walls::intact());
        assert_eq!(cell.walls().intact_count(), 4);
        assert!(cell.is_unvisited());
        assert!(!cell.is_on_path());
    }

    #[test]
    fn manhattan() {
        assert_eq!(GridCoordinate::new(0, 0).manhattan_distance(GridCoordinate::new(4, 4)), 8);
        assert_eq!(GridCoordinate::new(3, 1).manhattan_distance(GridCoordinate::new(1, 2)), 3);
    }
}
