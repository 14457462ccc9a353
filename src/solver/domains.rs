//! The mutable domain store: each variable's remaining candidate words.
//!
//! Domains start as the full vocabulary and only ever shrink, first under
//! node consistency (length) and then under arc consistency. Search reads
//! them but never writes; the assignment is tracked separately.

use crate::solver::puzzle::Puzzle;
use crate::solver::variable::Variable;
use crate::words::{WordId, WordList};
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

/// Per-variable candidate sets, keyed by word id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    domains: FxHashMap<Variable, FxHashSet<WordId>>,
}

impl Domains {
    /// Initializes every variable's domain to the full vocabulary.
    #[must_use]
    pub fn new(puzzle: &Puzzle, words: &WordList) -> Self {
        let full: FxHashSet<WordId> = words.ids().collect();
        let domains = puzzle
            .variables()
            .iter()
            .map(|&v| (v, full.clone()))
            .collect();
        Self { domains }
    }

    /// Removes every candidate whose length differs from its variable's
    /// length. Returns the number of candidates removed.
    pub fn enforce_node_consistency(&mut self, words: &WordList) -> usize {
        let mut removed = 0;
        for (v, domain) in &mut self.domains {
            let before = domain.len();
            domain.retain(|&id| words.get(id).len() == v.length);
            removed += before - domain.len();
        }
        removed
    }

    /// The remaining candidates of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not belong to this store.
    #[must_use]
    pub fn domain_of(&self, v: Variable) -> &FxHashSet<WordId> {
        self.domains
            .get(&v)
            .unwrap_or_else(|| panic!("unknown variable {v}"))
    }

    /// Removes `word` from `v`'s domain; returns whether it was present.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not belong to this store.
    pub fn remove(&mut self, v: Variable, word: WordId) -> bool {
        self.domains
            .get_mut(&v)
            .unwrap_or_else(|| panic!("unknown variable {v}"))
            .remove(&word)
    }

    /// Number of candidates left for `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not belong to this store.
    #[must_use]
    pub fn len(&self, v: Variable) -> usize {
        self.domain_of(v).len()
    }

    /// Whether `v` has no candidate left.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not belong to this store.
    #[must_use]
    pub fn is_empty(&self, v: Variable) -> bool {
        self.domain_of(v).is_empty()
    }

    /// Total candidate count across all variables.
    #[must_use]
    pub fn total_candidates(&self) -> usize {
        self.domains.values().map(FxHashSet::len).sum()
    }

    /// `v`'s candidates as a sorted snapshot, for deterministic iteration.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not belong to this store.
    #[must_use]
    pub fn sorted(&self, v: Variable) -> Vec<WordId> {
        self.domain_of(v).iter().copied().sorted().collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn fixture() -> (Puzzle, WordList) {
        // Across (1, 0, 3) crossing down (0, 1, 3) at (1, 1).
        let puzzle = Puzzle::new(Grid::from_text("#_#\n___\n#_#\n").unwrap());
        let words = WordList::new(["cat", "mat", "stone", "hi"]);
        (puzzle, words)
    }

    #[test]
    fn test_domains_start_with_full_vocabulary() {
        let (puzzle, words) = fixture();
        let domains = Domains::new(&puzzle, &words);
        for &v in puzzle.variables() {
            assert_eq!(domains.len(v), words.len());
        }
    }

    #[test]
    fn test_node_consistency_keeps_only_matching_lengths() {
        let (puzzle, words) = fixture();
        let mut domains = Domains::new(&puzzle, &words);

        // STONE and HI are the wrong length for both 3-cell slots.
        let removed = domains.enforce_node_consistency(&words);
        assert_eq!(removed, 4);

        for &v in puzzle.variables() {
            for &id in domains.domain_of(v) {
                assert_eq!(words.get(id).len(), v.length);
            }
            assert_eq!(domains.len(v), 2);
        }
    }

    #[test]
    fn test_remove_reports_presence() {
        let (puzzle, words) = fixture();
        let mut domains = Domains::new(&puzzle, &words);
        let v = puzzle.variables()[0];
        let cat = words.id_of("cat").unwrap();

        assert!(domains.remove(v, cat));
        assert!(!domains.remove(v, cat));
        assert_eq!(domains.len(v), words.len() - 1);
        assert!(!domains.is_empty(v));
    }

    #[test]
    fn test_sorted_snapshot_is_ascending() {
        let (puzzle, words) = fixture();
        let domains = Domains::new(&puzzle, &words);
        let snapshot = domains.sorted(puzzle.variables()[0]);
        assert_eq!(snapshot, words.ids().collect::<Vec<_>>());
    }

    #[test]
    fn test_total_candidates_sums_all_domains() {
        let (puzzle, words) = fixture();
        let domains = Domains::new(&puzzle, &words);
        assert_eq!(
            domains.total_candidates(),
            words.len() * puzzle.variables().len()
        );
    }

    #[test]
    #[should_panic(expected = "unknown variable")]
    fn test_unknown_variable_panics() {
        let (puzzle, words) = fixture();
        let domains = Domains::new(&puzzle, &words);
        let _ = domains.domain_of(Variable::across(9, 9, 3));
    }
}
