//! The backtracking search and the solve entry point.
//!
//! [`CrosswordSolver`] runs the full pipeline over a puzzle and a word
//! list:
//!
//! 1. **Node consistency:** every candidate of the wrong length is dropped
//!    from its variable's domain.
//! 2. **Arc consistency:** [`ac3`] prunes the domains to a fixpoint; if any
//!    domain empties, the puzzle is unsatisfiable and search never starts.
//! 3. **Backtracking:** depth-first search over partial assignments,
//!    choosing variables by MRV with a degree tie-break and values in
//!    least-constraining order. Each tentative extension is checked for
//!    consistency before recursing; a failed branch undoes exactly its own
//!    entry. The first complete assignment short-circuits upward.
//!
//! Exhaustion is a normal outcome, not an error: `None` means no complete
//! assignment exists, whether propagation proved it upfront or search
//! tried every branch. The domain store is pruned once before search and
//! only read afterwards, so no snapshot or undo log is needed beyond the
//! single assignment entry per frame.

use crate::solver::assignment::Assignment;
use crate::solver::domains::Domains;
use crate::solver::heuristics::{order_domain_values, select_unassigned_variable};
use crate::solver::propagation::ac3;
use crate::solver::puzzle::Puzzle;
use crate::words::WordList;

/// Counters describing one solve run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Values tried across all search frames.
    pub decisions: usize,
    /// Tentative extensions rejected by the consistency check.
    pub conflicts: usize,
    /// Frames that exhausted every value without success.
    pub backtracks: usize,
    /// Candidates removed by node consistency.
    pub node_eliminations: usize,
    /// Candidates removed by arc consistency.
    pub arc_eliminations: usize,
}

/// A solver instance owning the pruned domain store for one run.
#[derive(Debug, Clone)]
pub struct CrosswordSolver<'a> {
    puzzle: &'a Puzzle,
    words: &'a WordList,
    domains: Domains,
    stats: SolveStats,
}

impl<'a> CrosswordSolver<'a> {
    #[must_use]
    pub fn new(puzzle: &'a Puzzle, words: &'a WordList) -> Self {
        Self {
            puzzle,
            words,
            domains: Domains::new(puzzle, words),
            stats: SolveStats::default(),
        }
    }

    /// Runs propagation and search; `None` means no solution exists.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.stats.node_eliminations = self.domains.enforce_node_consistency(self.words);

        let before = self.domains.total_candidates();
        if !ac3(self.puzzle, &mut self.domains, self.words, None) {
            return None;
        }
        self.stats.arc_eliminations = before - self.domains.total_candidates();

        let mut assignment = Assignment::new();
        self.backtrack(&mut assignment).then_some(assignment)
    }

    /// Statistics from the most recent [`solve`](Self::solve) call.
    #[must_use]
    pub const fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// The domain store after pruning, for diagnostics.
    #[must_use]
    pub const fn domains(&self) -> &Domains {
        &self.domains
    }

    fn backtrack(&mut self, assignment: &mut Assignment) -> bool {
        if assignment.is_complete(self.puzzle) {
            return true;
        }

        let var = select_unassigned_variable(self.puzzle, &self.domains, assignment);

        for candidate in order_domain_values(self.puzzle, &self.domains, self.words, var, assignment)
        {
            self.stats.decisions += 1;
            assignment.assign(var, candidate);

            if assignment.is_consistent(self.puzzle, self.words) {
                if self.backtrack(assignment) {
                    return true;
                }
            } else {
                self.stats.conflicts += 1;
            }

            assignment.unassign(var);
        }

        self.stats.backtracks += 1;
        false
    }
}

/// Fills `puzzle` with words from `words`.
///
/// Returns a complete, conflict-free assignment, or `None` when
/// propagation proves the puzzle infeasible or search exhausts every
/// branch.
#[must_use]
pub fn solve(puzzle: &Puzzle, words: &WordList) -> Option<Assignment> {
    let mut solver = CrosswordSolver::new(puzzle, words);
    solver.solve()
}
