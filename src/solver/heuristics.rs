//! Variable and value ordering for the backtracking search.
//!
//! Variable choice is minimum remaining values, with ties broken by
//! highest degree and then by the fixed variable order. Value choice is
//! least constraining value: candidates are tried in ascending order of
//! how many neighbor candidates they would rule out, with ties broken by
//! word id. Both orders are total, so search is deterministic.

use crate::solver::assignment::Assignment;
use crate::solver::domains::Domains;
use crate::solver::puzzle::Puzzle;
use crate::solver::variable::Variable;
use crate::words::{WordId, WordList};
use itertools::Itertools;
use std::cmp::Reverse;

/// Picks the unassigned variable to branch on next.
///
/// # Panics
///
/// Panics if every variable is already assigned.
#[must_use]
pub fn select_unassigned_variable(
    puzzle: &Puzzle,
    domains: &Domains,
    assignment: &Assignment,
) -> Variable {
    puzzle
        .variables()
        .iter()
        .copied()
        .filter(|&v| !assignment.contains(v))
        .min_by_key(|&v| (domains.len(v), Reverse(puzzle.degree(v)), v))
        .expect("select_unassigned_variable called with every variable assigned")
}

/// Orders `v`'s candidates by how many candidates they would eliminate
/// from the domains of unassigned neighbors, fewest first. Assigned
/// neighbors are excluded from the count.
#[must_use]
pub fn order_domain_values(
    puzzle: &Puzzle,
    domains: &Domains,
    words: &WordList,
    v: Variable,
    assignment: &Assignment,
) -> Vec<WordId> {
    let unassigned: Vec<(Variable, usize, usize)> = puzzle
        .neighbors(v)
        .iter()
        .copied()
        .filter(|&n| !assignment.contains(n))
        .map(|n| {
            let (offset_v, offset_n) = puzzle
                .overlap(v, n)
                .expect("neighboring variables share a cell");
            (n, offset_v, offset_n)
        })
        .collect();

    domains
        .sorted(v)
        .into_iter()
        .map(|candidate| {
            let eliminated: usize = unassigned
                .iter()
                .map(|&(n, offset_v, offset_n)| {
                    let letter = words.get(candidate).letter(offset_v);
                    domains
                        .domain_of(n)
                        .iter()
                        .filter(|&&other| words.get(other).letter(offset_n) != letter)
                        .count()
                })
                .sum();
            (candidate, eliminated)
        })
        .sorted_by_key(|&(candidate, eliminated)| (eliminated, candidate))
        .map(|(candidate, _)| candidate)
        .collect_vec()
}
