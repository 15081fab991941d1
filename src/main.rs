use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::error;

use gridlife::draw::Renderer;
use gridlife::error::{Error, Result};
use gridlife::grid::Grid;
use gridlife::repl::Repl;
use gridlife::template;

/// Create, view and manage grids in Conway's Game of Life.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells
    width: usize,

    /// Grid height in cells
    height: usize,

    /// Load the starting grid from a template file
    #[arg(long)]
    template: Option<PathBuf>,

    /// Run this many generations non-interactively
    #[arg(long)]
    gen: Option<usize>,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay: u64,

    /// Start the interactive command loop
    #[arg(long)]
    repl: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Anything smaller is unusable on screen; the engine itself does
    // not care.
    if cli.width < 1 || cli.height < 1 {
        return Err(Error::Construction {
            width: cli.width,
            height: cli.height,
        });
    }
    let delay = Duration::from_millis(cli.delay);
    let mut rng = rand::thread_rng();

    if cli.repl {
        let grid = match &cli.template {
            Some(path) => template::load(path)?,
            None => Grid::new(cli.width, cli.height)?,
        };
        Repl::new(stdin().lock(), stdout()).run(grid, &mut rng)?;
        return Ok(());
    }

    let mut grid = match &cli.template {
        Some(path) => template::load(path)?,
        None => {
            println!("No template specified, assuming random population");
            let mut grid = Grid::new(cli.width, cli.height)?;
            grid.populate(&mut rng);
            grid
        }
    };

    let mut renderer = Renderer::new(stdout());
    match cli.gen {
        Some(generations) => {
            renderer.notice(&format!("Showing {generations} generations..."))?;
            renderer.animate(&mut grid, generations, delay)?;
        }
        None => renderer.grid(&grid)?,
    }
    Ok(())
}
