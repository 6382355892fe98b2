use docopt::Docopt;
use error_chain::bail;
use log::{info, warn};
use rand::Rng;
use serde_derive::Deserialize;
use labyrinth::{
    analysis,
    cells::GridCoordinate,
    errors::ErrorKind as MazeErrorKind,
    generators,
    grid::Grid,
    pathing,
    renderers::{self, RenderOptionsBuilder},
    units::{Height, Width},
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Labyrinth

Usage:
    labyrinth_driver -h | --help
    labyrinth_driver [--grid-size=<n> | --grid-width=<w> --grid-height=<h>] [--seed=<s>] [--start-point-x=<x> --start-point-y=<y>] [--end-point-x=<e1> --end-point-y=<e2>] [--text-out=<path>] [--hide-path] [--mark-start-end] [--verify]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid. Asked for on stdin if not given.
    --grid-height=<h>      The grid height in a w*h grid. Asked for on stdin if not given.
    --seed=<s>             Seed for the maze generator. A random seed is used (and logged) if not given.
    --start-point-x=<x>    x coordinate of the entrance [default: 0].
    --start-point-y=<y>    y coordinate of the entrance [default: 0].
    --end-point-x=<e1>     x coordinate of the exit. Defaults to the east most column.
    --end-point-y=<e2>     y coordinate of the exit. Defaults to the south most row.
    --text-out=<path>      Output file path for the textual rendering of the maze.
    --hide-path            Do not mark the path from the entrance to the exit.
    --mark-start-end       Draw an 'S' (start) and 'E' (end) to show the entrance and exit.
    --verify               Check the maze is perfect and the path valid, and print a summary.

Set LABYRINTH_LOG (e.g. LABYRINTH_LOG=debug) to enable logging.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: Option<usize>,
    flag_grid_height: Option<usize>,
    flag_seed: Option<u64>,
    flag_start_point_x: u32,
    flag_start_point_y: u32,
    flag_end_point_x: Option<u32>,
    flag_end_point_y: Option<u32>,
    flag_text_out: String,
    flag_hide_path: bool,
    flag_mark_start_end: bool,
    flag_verify: bool,
}

// Driver errors chain on to the library's own errors.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::labyrinth::errors::Error, ::labyrinth::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
            ParseInt(::std::num::ParseIntError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    init_logging();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let (width, height) = grid_dimensions(&args)?;
    let mut maze_grid = Grid::new(Width(width), Height(height))?;

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("generating a {}x{} maze with seed {}", width, height, seed);
    generators::recursive_backtracker(&mut maze_grid, &mut generators::seeded_rng(seed));

    let entrance = GridCoordinate::new(args.flag_start_point_x, args.flag_start_point_y);
    let exit = GridCoordinate::new(args.flag_end_point_x.unwrap_or(width as u32 - 1),
                                   args.flag_end_point_y.unwrap_or(height as u32 - 1));

    let path = match pathing::find_path(&mut maze_grid, entrance, exit) {
        Ok(path) => Some(path),
        Err(e) => {
            if let MazeErrorKind::NoPathFound(..) = *e.kind() {
                // Not fatal, the maze is still worth drawing.
                warn!("{}", e);
                None
            } else {
                return Err(e.into());
            }
        }
    };

    let render_options = RenderOptionsBuilder::new()
        .show_path(!args.flag_hide_path)
        .mark_start_end(args.flag_mark_start_end)
        .start(Some(entrance))
        .end(Some(exit))
        .build();
    let text = renderers::render_text(&maze_grid, &render_options);

    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if args.flag_verify {
        let report = analysis::verify_perfect(&maze_grid)?;
        println!("{}", report);
        match path {
            Some(ref path) => {
                analysis::check_path(&maze_grid, path, entrance, exit)?;
                println!("path: {} cells from {} to {}", path.len(), entrance, exit);
            }
            None => println!("path: none from {} to {}", entrance, exit),
        }
    }

    Ok(())
}

fn init_logging() {
    if std::env::var("LABYRINTH_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("LABYRINTH_LOG")
            .write_style("LABYRINTH_LOG_STYLE");
        env_logger::init_from_env(e);
    }
}

/// Width and height from the command line, asking on stdin for whatever is missing.
fn grid_dimensions(args: &MazeArgs) -> Result<(usize, usize)> {
    if let Some(square_grid_size) = args.flag_grid_size {
        return Ok((square_grid_size, square_grid_size));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let width = match args.flag_grid_width {
        Some(w) => w,
        None => prompt_dimension("Maze width: ", &mut input, &mut output)?,
    };
    let height = match args.flag_grid_height {
        Some(h) => h,
        None => prompt_dimension("Maze height: ", &mut input, &mut output)?,
    };
    Ok((width, height))
}

fn prompt_dimension<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<usize> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("expected a maze dimension on stdin but the input ended");
    }

    let value: i64 = line.trim().parse()?;
    if value <= 0 {
        bail!(format!("maze dimensions must be positive integers, got {}", value));
    }
    Ok(value as usize)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
