#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This crate fills crossword grids with words from a vocabulary, using
//! constraint propagation (node and arc consistency) and heuristic
//! backtracking search.

/// The `grid` module parses textual structure descriptions into a grid of
/// open and blocked cells.
pub mod grid;

/// The `render` module turns a solved assignment back into a printable
/// letter grid.
pub mod render;

/// The `solver` module implements the constraint engine: the puzzle
/// model, domain store, AC-3 propagation, and backtracking search.
pub mod solver;

/// The `words` module loads and interns the candidate vocabulary.
pub mod words;
