//! Template files: a saved grid as digit text.
//!
//! The first line is a `width,height` header; then `height` rows of
//! `width` characters, `1` for a live cell and `0` for a dead one, top
//! row first. The header is always written and always required.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{FormatError, Result};
use crate::grid::{Cell, Grid};

/// Builds a grid from template text.
pub fn parse(text: &str) -> Result<Grid> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or("");
    let (width, height) = parse_header(header)?;

    let mut grid = Grid::new(width, height)?;
    let mut rows = 0;
    for (y, line) in lines.enumerate() {
        if y >= height {
            return Err(FormatError::RowCount {
                expected: height,
                found: y + 1,
            }
            .into());
        }
        if line.chars().count() != width {
            return Err(FormatError::RowLength {
                row: y,
                expected: width,
                found: line.chars().count(),
            }
            .into());
        }
        for (x, c) in line.chars().enumerate() {
            let cell = match c {
                '0' => Cell::Dead,
                '1' => Cell::Alive,
                _ => {
                    return Err(FormatError::BadDigit {
                        row: y,
                        col: x,
                        found: c,
                    }
                    .into())
                }
            };
            grid.set(x, y, cell)?;
        }
        rows += 1;
    }
    if rows != height {
        return Err(FormatError::RowCount {
            expected: height,
            found: rows,
        }
        .into());
    }
    Ok(grid)
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let bad = || FormatError::Header {
        found: line.to_owned(),
    };
    let (w, h) = line.split_once(',').ok_or_else(bad)?;
    let width = w.trim().parse().map_err(|_| bad())?;
    let height = h.trim().parse().map_err(|_| bad())?;
    Ok((width, height))
}

/// Serializes a grid to template text, header included.
pub fn encode(grid: &Grid) -> String {
    let mut out = format!("{},{}\n", grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            // In-range by construction of the loops.
            let alive = grid.get(x, y).map(Cell::is_alive).unwrap_or(false);
            out.push(if alive { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

pub fn load(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let grid = parse(&fs::read_to_string(path)?)?;
    debug!(
        "loaded {}x{} template from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(grid)
}

pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(grid))?;
    debug!(
        "saved {}x{} template to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}
