//! Interactive command loop. The grid is owned by the loop and handed
//! to each command handler as an exclusive reference; `reset` is the
//! only command that replaces it wholesale.

use std::io::{BufRead, Write};
use std::time::Duration;

use log::warn;
use rand::Rng;

use crate::draw::Renderer;
use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::template;

const DEFAULT_DELAY_SECS: f64 = 1.0;
const DEFAULT_GENERATIONS: usize = 50;

pub struct Repl<R: BufRead, W: Write> {
    input: R,
    renderer: Renderer<W>,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Repl {
            input,
            renderer: Renderer::new(out),
        }
    }

    /// Runs until `exit` (or end of input) and hands the final grid
    /// back to the caller. Command failures are reported and the loop
    /// keeps going.
    pub fn run(mut self, mut grid: Grid, rng: &mut impl Rng) -> Result<Grid> {
        self.renderer.grid(&grid)?;
        loop {
            self.renderer.notice(
                "\nnext  - show next generation\n\r\
                 run   - iterate generations\n\r\
                 alter - change cell state\n\r\
                 reset - create new grid\n\r\
                 save  - create template file\n\r\
                 exit\n\r\
                 ---------",
            )?;
            let command = match self.read_line()? {
                Some(line) => line,
                None => break,
            };

            let outcome = match command.as_str() {
                "next" => self.cmd_next(&mut grid),
                "run" => self.cmd_run(&mut grid),
                "alter" => self.cmd_alter(&mut grid),
                "reset" => self.cmd_reset(&mut grid, rng),
                "save" => self.cmd_save(&grid),
                "exit" => {
                    self.renderer.notice("Exiting...")?;
                    break;
                }
                "" => Ok(()),
                other => {
                    self.renderer
                        .notice(&format!("Unknown command: {other}"))?;
                    Ok(())
                }
            };
            if let Err(err) = outcome {
                warn!("command {command:?} failed: {err}");
                self.renderer.notice(&format!("{err}"))?;
            }
        }
        Ok(grid)
    }

    fn cmd_next(&mut self, grid: &mut Grid) -> Result<()> {
        let stats = grid.next();
        self.renderer.clear_frame()?;
        self.renderer.grid(grid)?;
        self.renderer.stats(&stats)
    }

    fn cmd_run(&mut self, grid: &mut Grid) -> Result<()> {
        let mut delay_secs = DEFAULT_DELAY_SECS;
        let mut generations = DEFAULT_GENERATIONS;
        loop {
            self.renderer.notice(&format!(
                "\n\tenter variable name to modify\n\r\
                 \t[frame_delay: {delay_secs}]\n\r\
                 \t[generations: {generations}]\n\r\n\r\
                 \tbegin\n\r\
                 \t----------"
            ))?;
            let choice = match self.read_line()? {
                Some(line) => line,
                None => return Ok(()),
            };
            match choice.as_str() {
                "frame_delay" => {
                    self.renderer.notice("\t(float)frame_delay:")?;
                    delay_secs = match self.read_line()?.and_then(|l| l.parse().ok()) {
                        Some(d) if d >= 0.0 => d,
                        _ => {
                            self.renderer
                                .notice("\tDelay must not be negative, defaulting to 1")?;
                            DEFAULT_DELAY_SECS
                        }
                    };
                }
                "generations" => {
                    self.renderer.notice("\t(int)generations:")?;
                    generations = match self.read_line()?.and_then(|l| l.parse().ok()) {
                        Some(n) if n >= 1 => n,
                        _ => {
                            self.renderer.notice("\tMinimum count is 1")?;
                            1
                        }
                    };
                }
                "begin" => break,
                _ => {
                    self.renderer.notice("\tUnknown command: cancelling")?;
                    return Ok(());
                }
            }
        }
        self.renderer
            .animate(grid, generations, Duration::from_secs_f64(delay_secs))?;
        Ok(())
    }

    fn cmd_alter(&mut self, grid: &mut Grid) -> Result<()> {
        let (x, y) = loop {
            self.renderer.notice("\tCell position (x,y):")?;
            let pair = self.read_line()?.and_then(|l| parse_pair(&l));
            match pair {
                Some((x, y)) if x < grid.width() && y < grid.height() => break (x, y),
                Some(_) => self.renderer.notice("\tPosition is out of bounds")?,
                None => return Ok(()),
            }
        };
        self.renderer.notice("\t1 = alive, 0 = dead:")?;
        let cell = match self.read_line()?.as_deref() {
            Some("1") => Cell::Alive,
            Some("0") => Cell::Dead,
            _ => {
                self.renderer.notice("\tUnknown state: cancelling")?;
                return Ok(());
            }
        };
        grid.set(x, y, cell)?;
        self.renderer.clear_frame()?;
        self.renderer.grid(grid)
    }

    fn cmd_reset(&mut self, grid: &mut Grid, rng: &mut impl Rng) -> Result<()> {
        self.renderer.notice(
            "\n\tload   - load template file\n\r\
             \trandom - randomly populate\n\r\
             \tclean  - empty grid\n\r\
             \t----------",
        )?;
        let choice = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };
        match choice.as_str() {
            "load" => {
                self.renderer.notice("\tEnter template file name:")?;
                if let Some(path) = self.read_line()? {
                    *grid = template::load(path)?;
                }
            }
            "random" | "clean" => {
                self.renderer.notice("\tWidth,Height:")?;
                let dims = self.read_line()?.and_then(|l| parse_pair(&l));
                let (w, h) = match dims {
                    Some(dims) => dims,
                    None => {
                        self.renderer.notice("\tUnknown dimensions: cancelling")?;
                        return Ok(());
                    }
                };
                *grid = Grid::new(w, h)?;
                if choice == "random" {
                    grid.populate(rng);
                }
            }
            _ => {
                self.renderer.notice("\tUnknown command: cancelling")?;
                return Ok(());
            }
        }
        self.renderer.clear_frame()?;
        self.renderer.grid(grid)
    }

    fn cmd_save(&mut self, grid: &Grid) -> Result<()> {
        self.renderer.notice("\tEnter output filename:")?;
        if let Some(path) = self.read_line()? {
            template::save(grid, path)?;
            self.renderer.notice("\tSaved")?;
        }
        Ok(())
    }

    /// One trimmed line of input; `None` once the input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_owned()))
        }
    }
}

fn parse_pair(line: &str) -> Option<(usize, usize)> {
    let (a, b) = line.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}
