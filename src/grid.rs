//! The world space and its transition rules.
//!
//! Cell rules:
//!  1. Cells are either alive or dead
//!  2. Cells have 8 neighbors (N,E,S,W and diagonals)
//!  3. Neighbors outside the bounds of the grid are assumed dead
//!
//! Grid rules:
//!  1. Any live cell with fewer than two live neighbors dies
//!  2. Any live cell with 2-3 live neighbors lives on to the next generation
//!  3. Any live cell with more than 3 live neighbors dies
//!  4. Any dead cell with 3 live neighbors becomes alive

use log::debug;
use rand::Rng;

use crate::error::{Error, Result};

/// One grid position's binary life state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

/// Tally of a single generation advance. `living` is the population
/// before the step; the population after it is `survivors + born`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GenerationStats {
    pub living: usize,
    pub born: usize,
    pub died: usize,
    pub survivors: usize,
}

impl GenerationStats {
    /// A stale step changed nothing: the grid is a static fixed point.
    /// Oscillators with period >= 2 are not stale on any single step.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.born == 0 && self.died == 0
    }
}

/// A `width x height` rectangle of cells, row-major, indexed by
/// `(x, y)` with row = y and column = x. Dimensions are fixed at
/// construction; replacing them means constructing a new grid.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-dead grid. Zero-area grids are legal and every
    /// operation on them is a no-op; the only construction failure is a
    /// cell count that does not fit in memory addressing.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let area = width
            .checked_mul(height)
            .ok_or(Error::Construction { width, height })?;
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::Dead; area],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            Err(Error::Bounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        } else {
            Ok(())
        }
    }

    /// Reads one cell. Unlike neighbor counting, direct access to an
    /// out-of-range coordinate is an error.
    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        self.check_bounds(x, y)?;
        Ok(self.cells[self.index(x, y)])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        self.check_bounds(x, y)?;
        let i = self.index(x, y);
        self.cells[i] = cell;
        Ok(())
    }

    /// Flips one cell between alive and dead.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<Cell> {
        let flipped = match self.get(x, y)? {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        };
        let i = self.index(x, y);
        self.cells[i] = flipped;
        Ok(flipped)
    }

    /// Signed lookup used by neighbor counting: anything outside the
    /// grid is dead, never an error.
    #[inline]
    fn at(&self, x: isize, y: isize) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            Cell::Dead
        } else {
            self.cells[y as usize * self.width + x as usize]
        }
    }

    /// Counts live cells among the 8 Moore neighbors of `(x, y)`,
    /// against the grid's current state only.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) == (0, 0) {
                    continue;
                }
                if self.at(x + dx, y + dy).is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Total live-cell count.
    pub fn census(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Re-randomizes every cell, alive with probability one half.
    pub fn populate(&mut self, rng: &mut impl Rng) {
        for cell in &mut self.cells {
            *cell = if rng.gen_bool(0.5) {
                Cell::Alive
            } else {
                Cell::Dead
            };
        }
    }

    /// Advances the whole grid one generation. Every transition is
    /// computed against the pre-step snapshot: new states go into a
    /// fresh buffer that replaces the old one only once complete.
    pub fn step(&mut self) -> GenerationStats {
        let mut stats = GenerationStats {
            living: self.census(),
            ..GenerationStats::default()
        };
        let mut next = vec![Cell::Dead; self.cells.len()];

        for y in 0..self.height {
            for x in 0..self.width {
                let n = self.count_live_neighbors(x, y);
                let current = self.cells[self.index(x, y)];
                let outcome = match (current, n) {
                    (Cell::Alive, 2 | 3) => Cell::Alive,
                    (Cell::Dead, 3) => Cell::Alive,
                    _ => Cell::Dead,
                };
                match (current, outcome) {
                    (Cell::Alive, Cell::Alive) => stats.survivors += 1,
                    (Cell::Alive, Cell::Dead) => stats.died += 1,
                    (Cell::Dead, Cell::Alive) => stats.born += 1,
                    (Cell::Dead, Cell::Dead) => {}
                }
                next[self.index(x, y)] = outcome;
            }
        }

        self.cells = next;
        stats
    }

    /// Single-generation advance, for interactive use.
    #[inline]
    pub fn next(&mut self) -> GenerationStats {
        self.step()
    }

    /// Steps up to `max_generations` times, stopping early after the
    /// first stale step. Only static fixed points stop the run;
    /// period-2 oscillators such as blinkers run to the limit.
    pub fn run(&mut self, max_generations: usize) -> Vec<GenerationStats> {
        let mut history = Vec::new();
        for generation in 0..max_generations {
            let stats = self.step();
            history.push(stats);
            if stats.is_stale() {
                debug!(
                    "grid stabilized after {} of {} generations",
                    generation + 1,
                    max_generations
                );
                break;
            }
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid {
        let mut g = Grid::new(width, height).unwrap();
        for &(x, y) in alive {
            g.set(x, y, Cell::Alive).unwrap();
        }
        g
    }

    fn live_cells(g: &Grid) -> Vec<(usize, usize)> {
        let mut alive = vec![];
        for y in 0..g.height() {
            for x in 0..g.width() {
                if g.get(x, y).unwrap().is_alive() {
                    alive.push((x, y));
                }
            }
        }
        alive
    }

    #[test]
    fn new_grid_is_all_dead() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.census(), 0);
        assert_eq!(g.get(3, 2).unwrap(), Cell::Dead);
    }

    #[test]
    fn get_and_set_reject_out_of_range() {
        let mut g = Grid::new(3, 3).unwrap();
        assert!(matches!(g.get(3, 0), Err(Error::Bounds { .. })));
        assert!(matches!(g.get(0, 3), Err(Error::Bounds { .. })));
        assert!(matches!(
            g.set(5, 5, Cell::Alive),
            Err(Error::Bounds { .. })
        ));
    }

    #[test]
    fn toggle_flips_state() {
        let mut g = Grid::new(2, 2).unwrap();
        assert_eq!(g.toggle(1, 1).unwrap(), Cell::Alive);
        assert_eq!(g.toggle(1, 1).unwrap(), Cell::Dead);
        assert!(g.toggle(2, 0).is_err());
    }

    #[test]
    fn neighbor_count_covers_full_moore_neighborhood() {
        let all = [
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ];
        let g = grid_with(3, 3, &all);
        assert_eq!(g.count_live_neighbors(1, 1), 8);
    }

    #[test]
    fn neighbors_outside_bounds_count_as_dead() {
        let g = grid_with(5, 5, &[(0, 0)]);
        assert_eq!(g.count_live_neighbors(0, 0), 0);
        assert_eq!(g.count_live_neighbors(1, 1), 1);
    }

    #[test]
    fn lone_corner_cell_dies_of_underpopulation() {
        let mut g = grid_with(5, 5, &[(0, 0)]);
        let stats = g.step();
        assert_eq!(stats.living, 1);
        assert_eq!(stats.died, 1);
        assert_eq!(stats.born, 0);
        assert_eq!(g.census(), 0);
    }

    #[test]
    fn live_cell_survives_with_two_or_three_neighbors() {
        for neighbors in [2, 3] {
            let mut alive = vec![(2, 2)];
            alive.extend_from_slice(&[(1, 1), (3, 3), (1, 3)][..neighbors]);
            let mut g = grid_with(5, 5, &alive);
            g.step();
            assert!(
                g.get(2, 2).unwrap().is_alive(),
                "cell with {neighbors} neighbors should survive"
            );
        }
    }

    #[test]
    fn live_cell_dies_outside_two_to_three_neighbors() {
        // Neighbor positions filled one at a time around a live center.
        let ring = [
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ];
        for neighbors in [0, 1, 4, 5, 6, 7, 8] {
            let mut alive = vec![(2, 2)];
            alive.extend_from_slice(&ring[..neighbors]);
            let mut g = grid_with(5, 5, &alive);
            g.step();
            assert!(
                !g.get(2, 2).unwrap().is_alive(),
                "cell with {neighbors} neighbors should die"
            );
        }
    }

    #[test]
    fn dead_cell_births_only_on_exactly_three_neighbors() {
        let ring = [
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ];
        for neighbors in 0..=8 {
            let mut g = grid_with(5, 5, &ring[..neighbors]);
            g.step();
            assert_eq!(
                g.get(2, 2).unwrap().is_alive(),
                neighbors == 3,
                "dead cell with {neighbors} neighbors"
            );
        }
    }

    #[test]
    fn census_after_step_equals_survivors_plus_born() {
        let mut g = Grid::new(16, 16).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        g.populate(&mut rng);
        for _ in 0..10 {
            let before = g.census();
            let stats = g.step();
            assert_eq!(stats.living, before);
            assert_eq!(g.census(), stats.survivors + stats.born);
            assert_eq!(stats.living, stats.survivors + stats.died);
        }
    }

    #[test]
    fn populate_is_deterministic_under_a_seeded_rng() {
        let mut a = Grid::new(8, 8).unwrap();
        let mut b = Grid::new(8, 8).unwrap();
        a.populate(&mut StdRng::seed_from_u64(7));
        b.populate(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.census() > 0 && a.census() < 64);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let vertical = vec![(1, 0), (1, 1), (1, 2)];
        let mut g = grid_with(3, 3, &vertical);

        let first = g.step();
        assert_eq!(live_cells(&g), vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(first.born, 2);
        assert_eq!(first.died, 2);
        assert_eq!(first.survivors, 1);

        g.step();
        assert_eq!(live_cells(&g), vertical);
    }

    #[test]
    fn blinker_run_never_stops_early() {
        let mut g = grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        let history = g.run(10);
        assert_eq!(history.len(), 10);
        assert!(history.iter().all(|s| !s.is_stale()));
    }

    #[test]
    fn block_is_stale_on_the_very_next_step() {
        let mut g = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let stats = g.step();
        assert!(stats.is_stale());
        assert_eq!(stats.survivors, 4);
        assert_eq!(g.census(), 4);
    }

    #[test]
    fn empty_grid_run_stops_after_exactly_one_step() {
        let mut g = Grid::new(7, 5).unwrap();
        let history = g.run(100);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], GenerationStats::default());
    }

    #[test]
    fn degenerate_grid_is_a_no_op() {
        let mut g = Grid::new(0, 0).unwrap();
        let stats = g.step();
        assert_eq!(stats, GenerationStats::default());
        assert_eq!(g.census(), 0);

        let mut wide = Grid::new(9, 0).unwrap();
        assert!(wide.step().is_stale());
    }
}
