use std::fmt;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Grid;

/// Chooses what is drawn inside each cell of a text rendering.
pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 2 glyphs long, padded if required.
    fn render_cell_body(&self, _: &Grid, _: GridCoordinate) -> String {
        String::from("  ")
    }
}

/// Empty cell bodies, walls only.
#[derive(Debug, Copy, Clone, Default)]
pub struct WallsOnlyDisplay;
impl GridDisplay for WallsOnlyDisplay {}

/// Marks the cells the grid has flagged as on the path.
#[derive(Debug, Copy, Clone, Default)]
pub struct PathDisplay;
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: GridCoordinate) -> String {
        if grid.is_on_path(coord) {
            String::from("* ")
        } else {
            String::from("  ")
        }
    }
}

/// Marks a start and an end cell with 'S' and 'E', and optionally the path between them.
#[derive(Debug, Copy, Clone)]
pub struct StartEndPointsDisplay {
    start: GridCoordinate,
    end: GridCoordinate,
    show_path: bool,
}
impl StartEndPointsDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate, show_path: bool) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start,
            end,
            show_path,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: GridCoordinate) -> String {
        if coord == self.start {
            String::from("S ")
        } else if coord == self.end {
            String::from("E ")
        } else if self.show_path {
            PathDisplay.render_cell_body(grid, coord)
        } else {
            String::from("  ")
        }
    }
}

/// Draw a grid as ASCII art.
///
/// Each row is a line of north walls (`+---` or `+   `) followed by a line of west walls (`| ` or
/// `  `) and cell bodies; the east and south edges of the grid close it off. The `entrance`, if
/// given, has its outer wall drawn open: the west side when it sits in the first column, otherwise
/// the north side when it sits in the first row.
pub fn render_grid(grid: &Grid, display: &dyn GridDisplay, entrance: Option<GridCoordinate>) -> String {

    let opening = entrance.and_then(|coord| {
        if coord.x == 0 {
            Some((coord, CompassPrimary::West))
        } else if coord.y == 0 {
            Some((coord, CompassPrimary::North))
        } else {
            None
        }
    });
    let is_opening = |coord, dir| opening == Some((coord, dir));

    let mut output = String::new();
    let mut last_row = Vec::new();

    for row in grid.iter_row() {

        for &coord in &row {
            let open = !grid.has_wall(coord, CompassPrimary::North) ||
                       is_opening(coord, CompassPrimary::North);
            output.push_str(if open { "+   " } else { "+---" });
        }
        output.push_str("+\n");

        for &coord in &row {
            let open = !grid.has_wall(coord, CompassPrimary::West) ||
                       is_opening(coord, CompassPrimary::West);
            output.push_str(if open { "  " } else { "| " });
            output.push_str(&display.render_cell_body(grid, coord));
        }
        let east_edge_closed = row.last()
            .map_or(true, |coord| grid.has_wall(*coord, CompassPrimary::East));
        output.push_str(if east_edge_closed { "|\n" } else { " \n" });

        last_row = row;
    }

    // The south most boundary
    for &coord in &last_row {
        let closed = grid.has_wall(coord, CompassPrimary::South);
        output.push_str(if closed { "+---" } else { "+   " });
    }
    output.push_str("+\n");

    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_grid(self, &PathDisplay, None))
    }
}
