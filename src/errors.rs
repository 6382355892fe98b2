// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to reach them; the driver links this error into its own chain.
use error_chain::error_chain;

use crate::cells::GridCoordinate;

error_chain! {

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: width and height must both be positive", width, height)
        }

        OutOfBounds(coord: GridCoordinate) {
            description("coordinate outside of the grid")
            display("coordinate {} is outside of the grid", coord)
        }

        InvalidCoordinate(coord: GridCoordinate) {
            description("invalid grid coordinate")
            display("invalid grid coordinate {}", coord)
        }

        SelfLink(coord: GridCoordinate) {
            description("cannot carve a passage from a cell to itself")
            display("cannot carve a passage from {} to itself", coord)
        }

        NotAdjacent(a: GridCoordinate, b: GridCoordinate) {
            description("cells are not adjacent")
            display("cells {} and {} are not adjacent", a, b)
        }

        NoPathFound(entrance: GridCoordinate, exit: GridCoordinate) {
            description("no path between entrance and exit")
            display("no path found from {} to {}", entrance, exit)
        }

        NotPerfect(reason: String) {
            description("maze is not perfect")
            display("maze is not perfect: {}", reason)
        }
    }
}
