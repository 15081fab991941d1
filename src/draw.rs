//! Terminal rendering: generation labels, the grid drawing with its
//! colored coordinate rulers, and the per-step statistics block.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::error::Result;
use crate::grid::{GenerationStats, Grid};

const ALIVE_GLYPH: char = '□';
const DEAD_GLYPH: char = '_';

pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    #[inline]
    pub fn new(out: W) -> Self {
        Renderer { out }
    }

    /// Wipes the screen before the next frame.
    pub fn clear_frame(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    pub fn generation_label(&mut self, current: usize, total: usize) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Yellow),
            Print(format!("generation {current}/{total}\n\r")),
            ResetColor,
        )?;
        Ok(())
    }

    /// Draws the grid with a cyan column ruler across the top and a red
    /// row ruler down the left edge, one glyph per cell.
    pub fn grid(&mut self, grid: &Grid) -> Result<()> {
        queue!(self.out, SetForegroundColor(Color::Cyan), Print(" "))?;
        for x in 0..grid.width() {
            queue!(self.out, Print(x % 10))?;
        }
        queue!(self.out, ResetColor, Print("\n\r"))?;

        for y in 0..grid.height() {
            queue!(
                self.out,
                SetForegroundColor(Color::Red),
                Print(y % 10),
                ResetColor,
            )?;
            for x in 0..grid.width() {
                let glyph = if grid.get(x, y)?.is_alive() {
                    ALIVE_GLYPH
                } else {
                    DEAD_GLYPH
                };
                queue!(self.out, Print(glyph))?;
            }
            queue!(self.out, Print("\n\r"))?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn stats(&mut self, stats: &GenerationStats) -> Result<()> {
        queue!(
            self.out,
            Print(format!(
                "living: {}  born: {}  died: {}  survivors: {}\n\r",
                stats.living, stats.born, stats.died, stats.survivors
            )),
        )?;
        self.out.flush()?;
        Ok(())
    }

    pub fn notice(&mut self, message: &str) -> Result<()> {
        queue!(self.out, Print(format!("{message}\n\r")))?;
        self.out.flush()?;
        Ok(())
    }

    /// Steps the grid up to `generations` times, drawing each new
    /// generation with its stats and pausing `frame_delay` between
    /// frames. Stops early once a step changes nothing; the delay is
    /// display pacing only and never touches the step itself.
    pub fn animate(
        &mut self,
        grid: &mut Grid,
        generations: usize,
        frame_delay: Duration,
    ) -> Result<Vec<GenerationStats>> {
        let mut history = Vec::new();
        for current in 1..=generations {
            let stats = grid.step();
            history.push(stats);

            self.clear_frame()?;
            self.generation_label(current, generations)?;
            self.grid(grid)?;
            self.stats(&stats)?;

            if stats.is_stale() {
                self.notice("grid has stabilized")?;
                break;
            }
            if current < generations {
                thread::sleep(frame_delay);
            }
        }
        Ok(history)
    }
}
