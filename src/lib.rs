//! **labyrinth** generates perfect mazes on a rectangular grid, finds a way through them and
//! renders the result as text.

pub mod analysis;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;
