//! Arc-consistency propagation (AC-3) over the domain store.
//!
//! An arc `(x, y)` is consistent when every candidate of `x` has a support
//! in `y`'s domain: a *different* word whose letter at the shared cell
//! matches. [`revise`] restores consistency for one arc by pruning `x`;
//! [`ac3`] drives revision to a fixpoint through a FIFO worklist,
//! re-enqueueing the arcs into a variable whenever its domain shrinks.
//!
//! The worklist discipline is swappable: [`ArcQueue`] is the FIFO used by
//! `ac3`, [`ArcStack`] a LIFO alternative. Pop order only changes how much
//! work is done on the way; the fixpoint is the same.

use crate::solver::domains::Domains;
use crate::solver::puzzle::Puzzle;
use crate::solver::variable::Variable;
use crate::words::{WordId, WordList};
use std::collections::VecDeque;

/// A directed constraint between two neighboring variables.
pub type Arc = (Variable, Variable);

pub trait Worklist {
    fn from_arcs<I: IntoIterator<Item = Arc>>(arcs: I) -> Self;
    fn push(&mut self, arc: Arc);
    fn pop(&mut self) -> Option<Arc>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArcQueue(VecDeque<Arc>);

impl Worklist for ArcQueue {
    fn from_arcs<I: IntoIterator<Item = Arc>>(arcs: I) -> Self {
        Self(arcs.into_iter().collect())
    }

    fn push(&mut self, arc: Arc) {
        self.0.push_back(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        self.0.pop_front()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArcStack(Vec<Arc>);

impl Worklist for ArcStack {
    fn from_arcs<I: IntoIterator<Item = Arc>>(arcs: I) -> Self {
        Self(arcs.into_iter().collect())
    }

    fn push(&mut self, arc: Arc) {
        self.0.push(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        self.0.pop()
    }
}

/// Removes from `x`'s domain every candidate without a support in `y`'s.
///
/// A word never supports itself: assigned words must be pairwise distinct,
/// so a shared candidate cannot fill both slots. Returns whether anything
/// was removed; an arc with no overlap is a no-op.
pub fn revise(
    puzzle: &Puzzle,
    domains: &mut Domains,
    words: &WordList,
    x: Variable,
    y: Variable,
) -> bool {
    let Some((offset_x, offset_y)) = puzzle.overlap(x, y) else {
        return false;
    };

    let candidates: Vec<WordId> = domains.domain_of(x).iter().copied().collect();
    let mut revised = false;

    for wx in candidates {
        let letter = words.get(wx).letter(offset_x);
        let supported = domains
            .domain_of(y)
            .iter()
            .any(|&wy| wy != wx && words.get(wy).letter(offset_y) == letter);

        if !supported {
            domains.remove(x, wx);
            revised = true;
        }
    }

    revised
}

/// Runs AC-3 to a fixpoint with a FIFO worklist.
///
/// Seeds the queue with every directed neighbor pair in the fixed variable
/// order unless `initial_arcs` is supplied. Returns `false` as soon as any
/// domain becomes empty, in which case the puzzle is unsatisfiable and
/// search must not be attempted; `true` means every remaining candidate
/// has a support in every neighbor's domain.
pub fn ac3(
    puzzle: &Puzzle,
    domains: &mut Domains,
    words: &WordList,
    initial_arcs: Option<VecDeque<Arc>>,
) -> bool {
    let worklist = initial_arcs.map_or_else(
        || ArcQueue::from_arcs(all_arcs(puzzle)),
        ArcQueue::from_arcs,
    );
    propagate(puzzle, domains, words, worklist)
}

/// [`ac3`] under an arbitrary worklist discipline, seeded with every arc.
pub fn ac3_with<W: Worklist>(puzzle: &Puzzle, domains: &mut Domains, words: &WordList) -> bool {
    propagate(puzzle, domains, words, W::from_arcs(all_arcs(puzzle)))
}

fn all_arcs(puzzle: &Puzzle) -> Vec<Arc> {
    let mut arcs = Vec::new();
    for &v in puzzle.variables() {
        for &n in puzzle.neighbors(v) {
            arcs.push((v, n));
        }
    }
    arcs
}

fn propagate<W: Worklist>(
    puzzle: &Puzzle,
    domains: &mut Domains,
    words: &WordList,
    mut worklist: W,
) -> bool {
    // A variable with no neighbors never appears on an arc, so an already
    // empty domain has to be caught before the loop.
    if puzzle.variables().iter().any(|&v| domains.is_empty(v)) {
        return false;
    }

    while let Some((x, y)) = worklist.pop() {
        if revise(puzzle, domains, words, x, y) {
            if domains.is_empty(x) {
                return false;
            }

            // Shrinking x's domain can only break support for the arcs
            // into x; the arc (x, y) itself is consistent again.
            for &n in puzzle.neighbors(x) {
                if n != y {
                    worklist.push((n, x));
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn cross(words: &[&str]) -> (Puzzle, Domains, WordList) {
        // Across (1, 0, 3) crossing down (0, 1, 3) at offsets (1, 1).
        let puzzle = Puzzle::new(Grid::from_text("#_#\n___\n#_#\n").unwrap());
        let words = WordList::new(words);
        let mut domains = Domains::new(&puzzle, &words);
        domains.enforce_node_consistency(&words);
        (puzzle, domains, words)
    }

    fn arc(puzzle: &Puzzle) -> (Variable, Variable) {
        (puzzle.variables()[1], puzzle.variables()[0])
    }

    #[test]
    fn test_arc_queue_pops_fifo() {
        let a = Variable::across(0, 0, 3);
        let b = Variable::down(0, 0, 3);
        let c = Variable::down(0, 2, 3);

        let mut q = ArcQueue::from_arcs([(a, b), (b, c), (c, a)]);

        assert_eq!(q.pop(), Some((a, b)));
        assert_eq!(q.pop(), Some((b, c)));
        assert_eq!(q.pop(), Some((c, a)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_arc_stack_pops_lifo() {
        let a = Variable::across(0, 0, 3);
        let b = Variable::down(0, 0, 3);
        let c = Variable::down(0, 2, 3);

        let mut q = ArcStack::from_arcs([(a, b), (b, c), (c, a)]);

        assert_eq!(q.pop(), Some((c, a)));
        assert_eq!(q.pop(), Some((b, c)));
        assert_eq!(q.pop(), Some((a, b)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_revise_removes_unsupported_candidates() {
        // Crossing letters are at index 1: ARM has no partner with 'R'.
        let (puzzle, mut domains, words) = cross(&["arm", "cat", "mat"]);
        let (across, down) = arc(&puzzle);

        assert!(revise(&puzzle, &mut domains, &words, across, down));
        assert_eq!(
            domains.sorted(across),
            vec![words.id_of("cat").unwrap(), words.id_of("mat").unwrap()]
        );

        // CAT and MAT support each other; nothing more to remove.
        assert!(!revise(&puzzle, &mut domains, &words, across, down));
    }

    #[test]
    fn test_revise_without_overlap_is_a_no_op() {
        let puzzle = Puzzle::new(Grid::from_text("___\n###\n___\n").unwrap());
        let words = WordList::new(["cat", "mat"]);
        let mut domains = Domains::new(&puzzle, &words);
        let top = puzzle.variables()[0];
        let bottom = puzzle.variables()[1];

        assert!(!revise(&puzzle, &mut domains, &words, top, bottom));
        assert_eq!(domains.len(top), 2);
    }

    #[test]
    fn test_a_word_cannot_support_itself() {
        // Both slots want the only 3-letter word; it cannot fill both.
        let (puzzle, mut domains, words) = cross(&["ana"]);
        assert!(!ac3(&puzzle, &mut domains, &words, None));
    }

    #[test]
    fn test_ac3_prunes_to_a_consistent_fixpoint() {
        let (puzzle, mut domains, words) = cross(&["arm", "ant", "cat", "mat", "tan"]);
        assert!(ac3(&puzzle, &mut domains, &words, None));

        // Fixpoint property: every survivor has a distinct-word support in
        // every neighbor's domain.
        for &v in puzzle.variables() {
            for &n in puzzle.neighbors(v) {
                let (offset_v, offset_n) = puzzle.overlap(v, n).unwrap();
                for &id in domains.domain_of(v) {
                    let letter = words.get(id).letter(offset_v);
                    assert!(domains
                        .domain_of(n)
                        .iter()
                        .any(|&other| other != id
                            && words.get(other).letter(offset_n) == letter));
                }
            }
        }

        // ARM ('R') and ANT ('N') have no partner at the crossing.
        let across = puzzle.variables()[1];
        assert_eq!(
            domains.sorted(across),
            vec![
                words.id_of("cat").unwrap(),
                words.id_of("mat").unwrap(),
                words.id_of("tan").unwrap()
            ]
        );
    }

    #[test]
    fn test_ac3_is_idempotent() {
        let (puzzle, mut domains, words) = cross(&["arm", "ant", "cat", "mat", "tan"]);
        assert!(ac3(&puzzle, &mut domains, &words, None));

        let fixpoint = domains.clone();
        assert!(ac3(&puzzle, &mut domains, &words, None));
        assert_eq!(domains, fixpoint);
    }

    #[test]
    fn test_ac3_reports_empty_domain_upfront() {
        // No word fits a 3-cell slot, so node consistency empties both
        // domains before any arc is processed.
        let (puzzle, mut domains, words) = cross(&["stone", "moss"]);
        assert!(!ac3(&puzzle, &mut domains, &words, None));
    }

    #[test]
    fn test_ac3_with_initial_arcs_revises_only_reachable_arcs() {
        let (puzzle, mut domains, words) = cross(&["arm", "cat", "mat"]);
        let (across, down) = arc(&puzzle);

        let arcs: VecDeque<Arc> = VecDeque::from(vec![(across, down)]);
        assert!(ac3(&puzzle, &mut domains, &words, Some(arcs)));

        // Only the supplied arc was revised; the reverse arc never ran.
        assert_eq!(domains.len(across), 2);
        assert_eq!(domains.len(down), 3);
    }

    #[test]
    fn test_stack_worklist_reaches_the_same_fixpoint() {
        let (puzzle, mut fifo, words) = cross(&["arm", "ant", "cat", "mat", "tan"]);
        let mut lifo = fifo.clone();

        assert!(ac3(&puzzle, &mut fifo, &words, None));
        assert!(ac3_with::<ArcStack>(&puzzle, &mut lifo, &words));
        assert_eq!(fifo, lifo);
    }
}
