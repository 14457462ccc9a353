use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reading direction of a slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Per-step (row, column) increment when walking a slot's cells.
    #[must_use]
    pub const fn delta(self) -> (usize, usize) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Across => write!(f, "across"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// A slot to be filled with one word: a maximal run of open cells in one
/// direction.
///
/// Identity is the (row, column, direction) triple. `length` is derived from
/// the grid and excluded from equality, hashing and ordering: runs are
/// maximal, so two distinct slots can never share a starting cell and
/// direction. The derived total order doubles as the deterministic tie-break
/// order used by search.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    #[must_use]
    pub const fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    #[must_use]
    pub const fn across(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Across, length)
    }

    #[must_use]
    pub const fn down(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Down, length)
    }

    /// Grid position of the slot's `index`-th cell.
    #[must_use]
    pub const fn cell(&self, index: usize) -> (usize, usize) {
        let (dr, dc) = self.direction.delta();
        (self.row + dr * index, self.col + dc * index)
    }

    /// All cells covered by the slot, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|index| self.cell(index))
    }

    const fn key(&self) -> (usize, usize, Direction) {
        (self.row, self.col, self.direction)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.row, self.col, self.direction, self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_length() {
        let a = Variable::across(2, 0, 3);
        let b = Variable::new(2, 0, Direction::Across, 5);
        assert_eq!(a, b);

        let c = Variable::down(2, 0, 3);
        assert_ne!(a, c);
    }

    #[test]
    fn test_ordering_is_row_col_direction() {
        let mut vars = vec![
            Variable::down(1, 4, 4),
            Variable::across(4, 1, 4),
            Variable::down(0, 1, 5),
            Variable::across(0, 1, 3),
        ];
        vars.sort_unstable();
        assert_eq!(
            vars,
            vec![
                Variable::across(0, 1, 3),
                Variable::down(0, 1, 5),
                Variable::down(1, 4, 4),
                Variable::across(4, 1, 4),
            ]
        );
    }

    #[test]
    fn test_cells_across() {
        let v = Variable::across(1, 2, 3);
        let cells: Vec<_> = v.cells().collect();
        assert_eq!(cells, vec![(1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_cells_down() {
        let v = Variable::down(0, 1, 4);
        let cells: Vec<_> = v.cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(v.cell(2), (2, 1));
    }

    #[test]
    fn test_display() {
        let v = Variable::across(0, 1, 3);
        assert_eq!(v.to_string(), "(0, 1, across, 3)");
    }
}
