use crate::cells::GridCoordinate;
use crate::grid::Grid;
use crate::grid_displays::{render_grid, GridDisplay, PathDisplay, StartEndPointsDisplay,
                           WallsOnlyDisplay};

#[derive(Debug, Copy, Clone)]
pub struct RenderOptions {
    show_path: bool,
    mark_start_end: bool,
    open_entrance: bool,
    start: Option<GridCoordinate>,
    end: Option<GridCoordinate>,
}

#[derive(Debug, Copy, Clone)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                show_path: true,
                mark_start_end: false,
                open_entrance: true,
                start: None,
                end: None,
            },
        }
    }
    pub fn show_path(mut self, on: bool) -> Self {
        self.options.show_path = on;
        self
    }
    pub fn mark_start_end(mut self, on: bool) -> Self {
        self.options.mark_start_end = on;
        self
    }
    pub fn open_entrance(mut self, on: bool) -> Self {
        self.options.open_entrance = on;
        self
    }
    pub fn start(mut self, coord: Option<GridCoordinate>) -> Self {
        self.options.start = coord;
        self
    }
    pub fn end(mut self, coord: Option<GridCoordinate>) -> Self {
        self.options.end = coord;
        self
    }
    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Render a maze as text according to the options.
///
/// Start and end markers need both points; without them the cells show the path or nothing.
pub fn render_text(grid: &Grid, options: &RenderOptions) -> String {

    let entrance = if options.open_entrance { options.start } else { None };

    match (options.mark_start_end, options.start, options.end) {
        (true, Some(start), Some(end)) => {
            let display = StartEndPointsDisplay::new(start, end, options.show_path);
            render_grid(grid, &display, entrance)
        }
        _ => {
            let display: &dyn GridDisplay = if options.show_path {
                &PathDisplay
            } else {
                &WallsOnlyDisplay
            };
            render_grid(grid, display, entrance)
        }
    }
}
