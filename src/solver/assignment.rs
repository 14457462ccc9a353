//! Partial assignments and the consistency checks over them.

use crate::solver::puzzle::Puzzle;
use crate::solver::variable::Variable;
use crate::words::{WordId, WordList};
use rustc_hash::{FxHashMap, FxHashSet};

/// A partial mapping from variables to assigned word ids.
///
/// Grows by one entry per search step and shrinks by one on backtrack;
/// the domain store is never touched during exploration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    assigned: FxHashMap<Variable, WordId>,
}

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, v: Variable, word: WordId) {
        self.assigned.insert(v, word);
    }

    pub fn unassign(&mut self, v: Variable) {
        self.assigned.remove(&v);
    }

    #[must_use]
    pub fn get(&self, v: Variable) -> Option<WordId> {
        self.assigned.get(&v).copied()
    }

    #[must_use]
    pub fn contains(&self, v: Variable) -> bool {
        self.assigned.contains_key(&v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, WordId)> + '_ {
        self.assigned.iter().map(|(&v, &word)| (v, word))
    }

    /// Whether every variable of `puzzle` has been assigned a word.
    #[must_use]
    pub fn is_complete(&self, puzzle: &Puzzle) -> bool {
        puzzle
            .variables()
            .iter()
            .all(|v| self.assigned.contains_key(v))
    }

    /// Whether the assigned words respect every constraint: pairwise
    /// distinct, matching their variable's length, and agreeing at each
    /// overlap. Cost scales with the number of assigned variables, not
    /// with the puzzle.
    ///
    /// # Panics
    ///
    /// Panics if an assigned variable does not belong to `puzzle`.
    #[must_use]
    pub fn is_consistent(&self, puzzle: &Puzzle, words: &WordList) -> bool {
        let mut seen = FxHashSet::default();

        for (&v, &id) in &self.assigned {
            if !seen.insert(id) {
                return false;
            }

            if words.get(id).len() != v.length {
                return false;
            }

            for &n in puzzle.neighbors(v) {
                // Each assigned pair is checked once, from its lesser end.
                if n < v {
                    continue;
                }
                if let Some(&other) = self.assigned.get(&n) {
                    let (offset_v, offset_n) = puzzle
                        .overlap(v, n)
                        .expect("neighboring variables share a cell");
                    if words.get(id).letter(offset_v) != words.get(other).letter(offset_n) {
                        return false;
                    }
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn fixture() -> (Puzzle, WordList) {
        // Across (1, 0, 3) crossing down (0, 1, 3) at offsets (1, 1).
        let puzzle = Puzzle::new(Grid::from_text("#_#\n___\n#_#\n").unwrap());
        let words = WordList::new(["cat", "mat", "arm", "stone"]);
        (puzzle, words)
    }

    #[test]
    fn test_assign_and_unassign() {
        let (puzzle, words) = fixture();
        let v = puzzle.variables()[0];
        let mut assignment = Assignment::new();
        assert!(assignment.is_empty());

        assignment.assign(v, words.id_of("cat").unwrap());
        assert_eq!(assignment.get(v), words.id_of("cat"));
        assert!(assignment.contains(v));
        assert_eq!(assignment.len(), 1);

        assignment.unassign(v);
        assert!(!assignment.contains(v));
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_is_complete_requires_every_variable() {
        let (puzzle, words) = fixture();
        let mut assignment = Assignment::new();
        assert!(!assignment.is_complete(&puzzle));

        assignment.assign(puzzle.variables()[0], words.id_of("cat").unwrap());
        assert!(!assignment.is_complete(&puzzle));

        assignment.assign(puzzle.variables()[1], words.id_of("mat").unwrap());
        assert!(assignment.is_complete(&puzzle));
    }

    #[test]
    fn test_partial_assignment_can_be_consistent() {
        let (puzzle, words) = fixture();
        let mut assignment = Assignment::new();
        assignment.assign(puzzle.variables()[0], words.id_of("cat").unwrap());
        assert!(assignment.is_consistent(&puzzle, &words));
    }

    #[test]
    fn test_duplicate_words_are_inconsistent() {
        let (puzzle, words) = fixture();
        let cat = words.id_of("cat").unwrap();
        let mut assignment = Assignment::new();
        assignment.assign(puzzle.variables()[0], cat);
        assignment.assign(puzzle.variables()[1], cat);
        assert!(!assignment.is_consistent(&puzzle, &words));
    }

    #[test]
    fn test_wrong_length_is_inconsistent() {
        let (puzzle, words) = fixture();
        let mut assignment = Assignment::new();
        assignment.assign(puzzle.variables()[0], words.id_of("stone").unwrap());
        assert!(!assignment.is_consistent(&puzzle, &words));
    }

    #[test]
    fn test_overlap_mismatch_is_inconsistent() {
        let (puzzle, words) = fixture();
        let mut assignment = Assignment::new();
        // CAT and ARM disagree at the shared cell ('A' vs 'R').
        assignment.assign(puzzle.variables()[0], words.id_of("cat").unwrap());
        assignment.assign(puzzle.variables()[1], words.id_of("arm").unwrap());
        assert!(!assignment.is_consistent(&puzzle, &words));
    }

    #[test]
    fn test_matching_overlap_is_consistent() {
        let (puzzle, words) = fixture();
        let mut assignment = Assignment::new();
        // CAT and MAT share 'A' at the crossing.
        assignment.assign(puzzle.variables()[0], words.id_of("cat").unwrap());
        assignment.assign(puzzle.variables()[1], words.id_of("mat").unwrap());
        assert!(assignment.is_consistent(&puzzle, &words));
        assert!(assignment.is_complete(&puzzle));
    }
}
