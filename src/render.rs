//! Rendering of filled grids.
//!
//! The solver hands back an assignment of words to variables; this module
//! turns it back into a per-cell letter grid and a printable rendering,
//! with `█` for blocked cells and a space for any open cell left blank.

use crate::solver::assignment::Assignment;
use crate::solver::puzzle::Puzzle;
use crate::words::WordList;
use std::io;
use std::path::Path;

/// The character rendered for a blocked cell.
pub const BLOCKED_CELL: char = '█';

/// The assigned letter of every cell; `None` for blocked or unfilled
/// cells.
#[must_use]
pub fn letter_grid(
    puzzle: &Puzzle,
    words: &WordList,
    assignment: &Assignment,
) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; puzzle.width()]; puzzle.height()];

    for (v, id) in assignment.iter() {
        let word = words.get(id);
        for (index, (row, col)) in v.cells().enumerate() {
            letters[row][col] = Some(word.letter(index));
        }
    }

    letters
}

/// Renders the filled grid as text, one line per row.
#[must_use]
pub fn render(puzzle: &Puzzle, words: &WordList, assignment: &Assignment) -> String {
    let letters = letter_grid(puzzle, words, assignment);
    let mut out = String::new();

    for row in 0..puzzle.height() {
        for col in 0..puzzle.width() {
            let c = if puzzle.is_cell_active(row, col) {
                letters[row][col].unwrap_or(' ')
            } else {
                BLOCKED_CELL
            };
            out.push(c);
        }
        out.push('\n');
    }

    out
}

/// Writes the rendered grid to the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_solution<P: AsRef<Path>>(
    path: P,
    puzzle: &Puzzle,
    words: &WordList,
    assignment: &Assignment,
) -> io::Result<()> {
    std::fs::write(path, render(puzzle, words, assignment))
}
