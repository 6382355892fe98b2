use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{GridCoordinate, Visitation};
use crate::grid::Grid;

/// A fast, seedable random source. The same seed always carves the same maze.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A random walk from the north west corner that avoids already visited cells. When the walk hits
/// a dead end it backtracks along its own stack until it finds a cell with an unvisited neighbour
/// and carries on from there. Every carve joins a visited cell to a fresh one, so the passages
/// form a spanning tree: a perfect maze.
///
/// The grid should be freshly created (or reset); cells already visited are never carved into.
/// Only carve visits are recorded, search state from an earlier solve is not touched.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {

    let start = GridCoordinate::new(0, 0);
    grid.set_visitation(start, Visitation::CarveVisited);
    let mut stack = vec![start];
    let mut carved = 0usize;
    let mut deepest = 1usize;

    while let Some(&current) = stack.last() {

        let unvisited = grid.neighbours_unvisited(current);
        if unvisited.is_empty() {
            stack.pop();
            continue;
        }

        let next = unvisited[rng.gen_range(0..unvisited.len())];
        grid.set_visitation(next, Visitation::CarveVisited);
        grid.carve(current, next)
            .expect("neighbours_unvisited only yields adjacent in-grid cells");
        stack.push(next);

        carved += 1;
        deepest = deepest.max(stack.len());
    }

    debug!("recursive backtracker carved {} passages over {} cells, deepest stack {}",
           carved,
           grid.size(),
           deepest);
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use std::collections::VecDeque;

    use super::*;
    use crate::cells::CompassPrimary;
    use crate::units::{Height, Width};

    fn generated(w: usize, h: usize, seed: u64) -> Grid {
        let mut g = Grid::new(Width(w), Height(h)).unwrap();
        recursive_backtracker(&mut g, &mut seeded_rng(seed));
        g
    }

    fn reachable_count(g: &Grid) -> usize {
        let mut seen = vec![false; g.size()];
        let mut queue = VecDeque::new();
        queue.push_back(GridCoordinate::new(0, 0));
        seen[0] = true;
        let mut count = 0;
        while let Some(coord) = queue.pop_front() {
            count += 1;
            for link in g.links(coord).unwrap().iter() {
                let index = g.grid_coordinate_to_index(*link).unwrap();
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back(*link);
                }
            }
        }
        count
    }

    fn walls_agree(g: &Grid) -> bool {
        g.iter().all(|coord| {
            CompassPrimary::ALL.iter().all(|&dir| {
                match g.neighbour_at_direction(coord, dir) {
                    Some(neighbour) => g.has_wall(coord, dir) == g.has_wall(neighbour, dir.opposite()),
                    None => g.has_wall(coord, dir),
                }
            })
        })
    }

    #[test]
    fn single_cell_grid_carves_nothing() {
        let g = generated(1, 1, 7);
        assert_eq!(g.links_count(), 0);
        assert_eq!(g.cells()[0].walls().intact_count(), 4);
        assert_eq!(g.visitation(GridCoordinate::new(0, 0)), Some(Visitation::CarveVisited));
    }

    #[test]
    fn two_cell_grid_carves_the_shared_wall() {
        let g = generated(2, 1, 3);
        assert_eq!(g.links_count(), 1);
        assert!(g.is_linked(GridCoordinate::new(0, 0), GridCoordinate::new(1, 0)));
        assert!(!g.has_wall(GridCoordinate::new(0, 0), CompassPrimary::East));
        assert!(!g.has_wall(GridCoordinate::new(1, 0), CompassPrimary::West));
        assert!(g.has_wall(GridCoordinate::new(0, 0), CompassPrimary::West));
        assert!(g.has_wall(GridCoordinate::new(1, 0), CompassPrimary::East));
    }

    #[test]
    fn five_by_five_is_a_spanning_tree() {
        let g = generated(5, 5, 42);
        assert_eq!(g.links_count(), 24);
        assert_eq!(reachable_count(&g), 25);
        assert!(walls_agree(&g));
    }

    #[test]
    fn every_cell_is_carve_visited() {
        let g = generated(6, 4, 11);
        assert!(g.cells().iter().all(|cell| cell.visitation() == Visitation::CarveVisited));
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generated(12, 9, 1234), generated(12, 9, 1234));
    }

    #[test]
    fn different_seeds_usually_differ() {
        let first = generated(10, 10, 1);
        let differing = (2..10).filter(|&seed| generated(10, 10, seed) != first).count();
        assert!(differing > 0);
    }

    #[test]
    fn single_row_and_column_are_corridors() {
        let row = generated(7, 1, 5);
        assert_eq!(row.links_count(), 6);
        assert_eq!(row.dead_ends(), 2);

        let column = generated(1, 7, 5);
        assert_eq!(column.links_count(), 6);
        assert_eq!(column.dead_ends(), 2);
    }

    #[test]
    fn quickcheck_spanning_tree() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            let g = generated(w, h, seed);
            TestResult::from_bool(g.links_count() == w * h - 1 &&
                                  reachable_count(&g) == w * h &&
                                  walls_agree(&g))
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_seed_determinism() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 12 + 1, h as usize % 12 + 1);
            generated(w, h, seed) == generated(w, h, seed)
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }
}
