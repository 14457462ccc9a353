#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for textual crossword structure descriptions.
//!
//! A structure file is a rectangular block of characters, one line per grid
//! row. An underscore (`_`) marks an open cell to be filled with a letter;
//! any other character marks a blocked cell. Lines shorter than the widest
//! line are padded with blocked cells, so ragged input is accepted.
//!
//! The parser produces a [`Grid`]: the dimensions plus a bit mask of open
//! cells. Deriving slots and overlaps from a `Grid` is the job of
//! [`Puzzle::new`](crate::solver::puzzle::Puzzle::new).

use bit_vec::BitVec;
use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, Cursor};
use std::path::Path;

/// The character marking an open cell in a structure file.
pub const OPEN_CELL: char = '_';

/// Errors produced when reading a structure description.
#[derive(Debug)]
pub enum GridError {
    /// The underlying reader failed.
    Io(io::Error),
    /// The input contained no rows, or no row had any characters.
    Empty,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read structure: {e}"),
            Self::Empty => write!(f, "structure is empty"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Empty => None,
        }
    }
}

impl From<io::Error> for GridError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// A crossword grid: dimensions plus the open-cell mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: BitVec,
}

impl Grid {
    /// Parses a structure description from a `BufRead` source.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] if a line cannot be read and
    /// [`GridError::Empty`] if the input holds no cells at all.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<bool>> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let row = line
                .trim_end_matches('\r')
                .chars()
                .map(|c| c == OPEN_CELL)
                .collect();
            rows.push(row);
        }

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = BitVec::from_elem(height * width, false);
        for (row, line) in rows.iter().enumerate() {
            for (col, &open) in line.iter().enumerate() {
                if open {
                    cells.set(row * width + col, true);
                }
            }
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Parses a structure description held in a string.
    ///
    /// # Errors
    ///
    /// See [`Grid::parse`].
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        Self::parse(Cursor::new(text))
    }

    /// Parses the structure file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] if the file cannot be opened or read, plus
    /// everything [`Grid::parse`] reports.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let file = std::fs::File::open(path)?;
        Self::parse(io::BufReader::new(file))
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at (`row`, `col`) is open.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the grid.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) is outside the {}x{} grid",
            self.height,
            self.width
        );
        self.cells[row * self.width + col]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if self.is_open(row, col) {
                    OPEN_CELL
                } else {
                    '█'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
