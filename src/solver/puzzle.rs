//! The immutable crossword model.
//!
//! A [`Puzzle`] is built once from a parsed [`Grid`] and read-only
//! thereafter. Construction derives the variables (every maximal run of at
//! least two open cells, across and down), the overlap map (which cell two
//! crossing variables share, as an offset into each word), and a sorted
//! neighbor list per variable. Everything downstream, from propagation to
//! search tie-breaking, relies on those lists being in the fixed variable
//! order.

use crate::grid::Grid;
use crate::solver::variable::{Direction, Variable};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// The shared cell of two crossing variables, as the cell's index within
/// each word: `(offset_in_first, offset_in_second)`.
pub type Overlap = (usize, usize);

/// A crossword puzzle: the grid plus everything derived from it.
#[derive(Debug, Clone)]
pub struct Puzzle {
    grid: Grid,
    variables: Vec<Variable>,
    overlaps: FxHashMap<(Variable, Variable), Overlap>,
    neighbors: FxHashMap<Variable, Vec<Variable>>,
}

impl Puzzle {
    /// Derives the variable set and the overlap/neighbor relations from
    /// `grid`.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let variables = find_variables(&grid);

        // A cell is covered by at most one across and one down run.
        let mut occupancy: FxHashMap<(usize, usize), SmallVec<[Variable; 2]>> =
            FxHashMap::default();
        for v in &variables {
            for cell in v.cells() {
                occupancy.entry(cell).or_default().push(*v);
            }
        }

        let mut overlaps = FxHashMap::default();
        let mut neighbors: FxHashMap<Variable, Vec<Variable>> =
            variables.iter().map(|v| (*v, Vec::new())).collect();

        for (cell, covering) in &occupancy {
            for (i, &a) in covering.iter().enumerate() {
                for &b in &covering[i + 1..] {
                    let offset_a = offset_within(a, *cell);
                    let offset_b = offset_within(b, *cell);
                    overlaps.insert((a, b), (offset_a, offset_b));
                    overlaps.insert((b, a), (offset_b, offset_a));
                    neighbors.entry(a).or_default().push(b);
                    neighbors.entry(b).or_default().push(a);
                }
            }
        }

        for list in neighbors.values_mut() {
            list.sort_unstable();
        }

        Self {
            grid,
            variables,
            overlaps,
            neighbors,
        }
    }

    /// Every variable, in the fixed total order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The overlap between `a` and `b`, or `None` when they share no cell.
    #[must_use]
    pub fn overlap(&self, a: Variable, b: Variable) -> Option<Overlap> {
        self.overlaps.get(&(a, b)).copied()
    }

    /// Every variable sharing a cell with `v`, sorted.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not belong to this puzzle.
    #[must_use]
    pub fn neighbors(&self, v: Variable) -> &[Variable] {
        self.neighbors
            .get(&v)
            .unwrap_or_else(|| panic!("unknown variable {v}"))
    }

    /// Number of neighbors of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not belong to this puzzle.
    #[must_use]
    pub fn degree(&self, v: Variable) -> usize {
        self.neighbors(v).len()
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.grid.width()
    }

    /// Whether the cell at (`row`, `col`) is open.
    #[must_use]
    pub fn is_cell_active(&self, row: usize, col: usize) -> bool {
        self.grid.is_open(row, col)
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }
}

/// Scans the grid for maximal runs of at least two open cells.
fn find_variables(grid: &Grid) -> Vec<Variable> {
    let mut variables = Vec::new();

    for row in 0..grid.height() {
        let mut col = 0;
        while col < grid.width() {
            let length = run_length(grid, row, col, Direction::Across);
            if length >= 2 {
                variables.push(Variable::across(row, col, length));
            }
            col += length.max(1);
        }
    }

    for col in 0..grid.width() {
        let mut row = 0;
        while row < grid.height() {
            let length = run_length(grid, row, col, Direction::Down);
            if length >= 2 {
                variables.push(Variable::down(row, col, length));
            }
            row += length.max(1);
        }
    }

    variables.sort_unstable();
    variables
}

fn run_length(grid: &Grid, row: usize, col: usize, direction: Direction) -> usize {
    let (dr, dc) = direction.delta();
    let mut length = 0;
    let (mut r, mut c) = (row, col);
    while r < grid.height() && c < grid.width() && grid.is_open(r, c) {
        length += 1;
        r += dr;
        c += dc;
    }
    length
}

fn offset_within(v: Variable, cell: (usize, usize)) -> usize {
    match v.direction {
        Direction::Across => cell.1 - v.col,
        Direction::Down => cell.0 - v.row,
    }
}
