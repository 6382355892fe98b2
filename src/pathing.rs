use error_chain::bail;
use log::{debug, trace, warn};

use crate::analysis;
use crate::cells::{CoordinateSmallVec, GridCoordinate, Visitation};
use crate::errors::*;
use crate::grid::Grid;

// One level of the depth first search: the cell being explored, the passage neighbours it had
// when it was entered, and the next of those to try.
#[derive(Debug)]
struct SearchFrame {
    coord: GridCoordinate,
    candidates: CoordinateSmallVec,
    next_candidate: usize,
}

/// Find a path from `entrance` to `exit` through the carved passages and mark its cells as on the
/// path.
///
/// Depth first search trying neighbours in North, East, South, West order; the first path found is
/// the one returned, which on a perfect maze is the only one. Any earlier visitation and path
/// marks are cleared before the search starts. The search keeps its own frame stack, so its depth is
/// not limited by the call stack.
///
/// Returns the path ordered from `entrance` to `exit`, both included.
pub fn find_path(grid: &mut Grid,
                 entrance: GridCoordinate,
                 exit: GridCoordinate)
                 -> Result<Vec<GridCoordinate>> {

    for &coord in &[entrance, exit] {
        if !grid.is_valid_coordinate(coord) {
            bail!(ErrorKind::OutOfBounds(coord));
        }
    }

    grid.reset_visitation();

    let mut stack: Vec<SearchFrame> = Vec::new();
    let mut found = enter(grid, &mut stack, entrance, exit);
    let mut explored = 1usize;

    while !found {
        let next = match stack.last_mut() {
            Some(frame) => {
                let candidate = frame.candidates.get(frame.next_candidate).cloned();
                frame.next_candidate += 1;
                candidate
            }
            None => break,
        };

        match next {
            Some(coord) => {
                explored += 1;
                found = enter(grid, &mut stack, coord, exit);
            }
            None => {
                // dead end
                if let Some(frame) = stack.pop() {
                    trace!("backtracking from {}", frame.coord);
                }
            }
        }
    }

    if !found {
        warn!("no path from {} to {} after exploring {} cells", entrance, exit, explored);
        if let Err(e) = analysis::verify_perfect(grid) {
            warn!("{}", e);
        }
        bail!(ErrorKind::NoPathFound(entrance, exit));
    }

    let mut path: Vec<GridCoordinate> = stack.iter().map(|frame| frame.coord).collect();
    path.push(exit);
    for &coord in &path {
        grid.set_on_path(coord);
    }

    debug!("path from {} to {}: {} cells, {} explored", entrance, exit, path.len(), explored);
    Ok(path)
}

// Step into `coord`. Reaching the exit ends the search and leaves the frame stack holding the
// path so far; any other cell is marked explored and pushed with its passage neighbours.
fn enter(grid: &mut Grid,
         stack: &mut Vec<SearchFrame>,
         coord: GridCoordinate,
         exit: GridCoordinate)
         -> bool {
    if coord == exit {
        return true;
    }

    grid.set_visitation(coord, Visitation::SearchVisited);
    let candidates = grid.passage_neighbours_unvisited(coord);
    stack.push(SearchFrame {
        coord,
        candidates,
        next_candidate: 0,
    });
    false
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::generators::{recursive_backtracker, seeded_rng};
    use crate::units::{Height, Width};

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).unwrap()
    }

    fn generated(w: usize, h: usize, seed: u64) -> Grid {
        let mut g = grid(w, h);
        recursive_backtracker(&mut g, &mut seeded_rng(seed));
        g
    }

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn single_cell_path() {
        let mut g = generated(1, 1, 0);
        let path = find_path(&mut g, gc(0, 0), gc(0, 0)).unwrap();
        assert_eq!(path, vec![gc(0, 0)]);
        assert!(g.is_on_path(gc(0, 0)));
    }

    #[test]
    fn two_cell_path() {
        let mut g = generated(2, 1, 9);
        let path = find_path(&mut g, gc(0, 0), gc(1, 0)).unwrap();
        assert_eq!(path, vec![gc(0, 0), gc(1, 0)]);
        assert_eq!(g.path_cells(), vec![gc(0, 0), gc(1, 0)]);
    }

    #[test]
    fn five_by_five_with_fixed_seed() {
        let mut g = generated(5, 5, 2024);
        assert_eq!(g.links_count(), 24);

        let path = find_path(&mut g, gc(0, 0), gc(4, 4)).unwrap();
        assert!(path.len() >= 5);
        assert!(path.len() <= 25);
        assert_eq!(path.first(), Some(&gc(0, 0)));
        assert_eq!(path.last(), Some(&gc(4, 4)));
        analysis::check_path(&g, &path, gc(0, 0), gc(4, 4)).unwrap();
    }

    #[test]
    fn marks_match_the_returned_path() {
        let mut g = generated(8, 6, 77);
        let mut path = find_path(&mut g, gc(0, 0), gc(7, 5)).unwrap();
        path.sort_by_key(|c| (c.y, c.x));
        assert_eq!(g.path_cells(), path);
    }

    #[test]
    fn solving_again_clears_the_previous_path() {
        let mut g = generated(6, 6, 8);
        let _ = find_path(&mut g, gc(0, 0), gc(5, 5)).unwrap();
        let second = find_path(&mut g, gc(5, 0), gc(5, 0)).unwrap();
        assert_eq!(second, vec![gc(5, 0)]);
        assert_eq!(g.path_cells(), vec![gc(5, 0)]);
    }

    #[test]
    fn reverse_path_is_the_same_cells_backwards() {
        let mut g = generated(9, 7, 31);
        let forward = find_path(&mut g, gc(2, 1), gc(8, 6)).unwrap();
        let mut backward = find_path(&mut g, gc(8, 6), gc(2, 1)).unwrap();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn depth_first_order_on_an_open_square() {
        // Two routes round a 2x2 loop; north comes before east comes before south, so the search
        // heads east first from the top left.
        let mut g = grid(2, 2);
        g.carve(gc(0, 0), gc(1, 0)).unwrap();
        g.carve(gc(0, 0), gc(0, 1)).unwrap();
        g.carve(gc(1, 0), gc(1, 1)).unwrap();
        g.carve(gc(0, 1), gc(1, 1)).unwrap();
        let path = find_path(&mut g, gc(0, 0), gc(1, 1)).unwrap();
        assert_eq!(path, vec![gc(0, 0), gc(1, 0), gc(1, 1)]);
    }

    #[test]
    fn backtracks_out_of_dead_ends() {
        // (0,0) - (1,0) - (2,0)
        //   |
        // (0,1) - (1,1) - (2,1)
        let mut g = grid(3, 2);
        g.carve(gc(0, 0), gc(1, 0)).unwrap();
        g.carve(gc(1, 0), gc(2, 0)).unwrap();
        g.carve(gc(0, 0), gc(0, 1)).unwrap();
        g.carve(gc(0, 1), gc(1, 1)).unwrap();
        g.carve(gc(1, 1), gc(2, 1)).unwrap();
        let path = find_path(&mut g, gc(0, 0), gc(2, 1)).unwrap();
        assert_eq!(path, vec![gc(0, 0), gc(0, 1), gc(1, 1), gc(2, 1)]);
        assert!(!g.is_on_path(gc(1, 0)));
        assert_eq!(g.visitation(gc(2, 0)), Some(Visitation::SearchVisited));
    }

    #[test]
    fn out_of_bounds_entrance_or_exit() {
        let mut g = generated(3, 3, 1);
        match *find_path(&mut g, gc(3, 0), gc(2, 2)).unwrap_err().kind() {
            ErrorKind::OutOfBounds(c) => assert_eq!(c, gc(3, 0)),
            ref other => panic!("expected OutOfBounds, got {:?}", other),
        }
        match *find_path(&mut g, gc(0, 0), gc(2, 9)).unwrap_err().kind() {
            ErrorKind::OutOfBounds(c) => assert_eq!(c, gc(2, 9)),
            ref other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn disconnected_cells_report_no_path() {
        let mut g = grid(3, 1);
        g.carve(gc(0, 0), gc(1, 0)).unwrap();
        match *find_path(&mut g, gc(0, 0), gc(2, 0)).unwrap_err().kind() {
            ErrorKind::NoPathFound(a, b) => assert_eq!((a, b), (gc(0, 0), gc(2, 0))),
            ref other => panic!("expected NoPathFound, got {:?}", other),
        }
        assert!(g.path_cells().is_empty());
    }

    #[test]
    fn quickcheck_paths_are_valid() {
        fn p(w: u8, h: u8, seed: u64, points: (u8, u8, u8, u8)) -> TestResult {
            let (w, h) = (w as u32 % 14 + 1, h as u32 % 14 + 1);
            let entrance = gc(points.0 as u32 % w, points.1 as u32 % h);
            let exit = gc(points.2 as u32 % w, points.3 as u32 % h);
            let mut g = generated(w as usize, h as usize, seed);
            match find_path(&mut g, entrance, exit) {
                Ok(path) => TestResult::from_bool(
                    analysis::check_path(&g, &path, entrance, exit).is_ok() &&
                    path.len() > entrance.manhattan_distance(exit) as usize),
                Err(_) => TestResult::failed(),
            }
        }
        quickcheck(p as fn(u8, u8, u64, (u8, u8, u8, u8)) -> TestResult);
    }
}
