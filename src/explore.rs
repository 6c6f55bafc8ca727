//! Breadth-first exploration of the reachable board configurations.
//!
//! The explorer drains a FIFO queue of (parent state, move) work items,
//! recording each genuinely new configuration and discarding the ones
//! already seen. "Seen" means equivalent under the deja-vu check below, not
//! just identical: boards that differ only by which same-colored,
//! same-shaped piece sits in which slot describe the same physical puzzle
//! state, and without collapsing them the state count explodes with
//! permutations.

use std::collections::VecDeque;

use crate::board::Board;
use crate::moves::Move;

/// How often the exploration loop emits a progress line.
const PROGRESS_INTERVAL: usize = 1000;

/// A recorded configuration: a board snapshot plus the moves that produced
/// it from the starting layout.
///
/// States are immutable once recorded; the explorer only ever clones their
/// boards to branch from them.
#[derive(Clone, Debug)]
pub struct State {
    pub board: Board,
    pub moves: Vec<Move>,
}

/// The result of an exploration run.
#[derive(Clone, Debug)]
pub struct Census {
    /// Work items processed.
    pub steps: usize,
    /// Branches that ended in an already-seen configuration.
    pub duplicates: usize,
    /// Every distinct state reached, in discovery order; index 0 is the
    /// starting state.
    pub reached: Vec<State>,
}

/// Tests whether `candidate` is equivalent to any recorded state.
///
/// Three stages, cheapest first:
/// 1. exact cell-for-cell grid match;
/// 2. the empty-cell sets must coincide (occupied area is constant during
///    exploration, so differing empties rule equivalence out);
/// 3. every interchangeable-class piece of the recorded state must find some
///    candidate piece of the same color at the exact same location. Exempt
///    classes (the 2x2 green, the horizontal purple) are skipped here; their
///    placement is constrained through the empty-cell comparison alone.
///
/// Stage 3 is a cover test, not a one-to-one permutation check. With the
/// fixed piece set the two coincide (equal counts, distinct locations), and
/// the looser reading is kept deliberately; see DESIGN.md.
pub fn deja_vu(candidate: &Board, reached: &[State]) -> bool {
    if reached.iter().any(|s| s.board.cells() == candidate.cells()) {
        return true;
    }

    let empties = candidate.empty_cells();
    reached
        .iter()
        .filter(|s| s.board.empty_cells() == empties)
        .any(|s| covered_by(candidate, &s.board))
}

/// Whether every interchangeable piece of `recorded` has a same-color piece
/// of `candidate` on the exact same location.
fn covered_by(candidate: &Board, recorded: &Board) -> bool {
    recorded
        .pieces()
        .iter()
        .filter(|p| p.name.color.interchangeable())
        .all(|p| {
            candidate
                .pieces()
                .iter()
                .any(|q| q.name.color == p.name.color && q.location() == p.location())
        })
}

/// Enumerates configurations reachable from `initial`, breadth first.
///
/// Processes at most `step_budget` work items; the queue may also drain
/// naturally. There is no goal condition, this is a census of the state
/// space, not a path search.
///
/// The reached-state list grows monotonically and is never pruned, so long
/// runs are bounded by memory; pick the budget accordingly.
pub fn explore(initial: Board, step_budget: usize) -> Census {
    let mut reached = vec![State {
        moves: Vec::new(),
        board: initial,
    }];
    let mut pending: VecDeque<(usize, Move)> = reached[0]
        .board
        .legal_moves()
        .into_iter()
        .map(|mv| (0, mv))
        .collect();

    let mut steps = 0;
    let mut duplicates = 0;

    while steps < step_budget {
        let Some((parent, mv)) = pending.pop_front() else {
            break;
        };
        steps += 1;

        let mut board = reached[parent].board.clone();
        if let Err(err) = board.apply_move(mv) {
            // the move came from legal_moves() on this exact board
            panic!("legal move {mv} failed to apply: {err}");
        }

        if deja_vu(&board, &reached) {
            duplicates += 1;
            continue;
        }

        let mut moves = reached[parent].moves.clone();
        moves.push(mv);
        let fanout = board.legal_moves();
        let idx = reached.len();
        reached.push(State { board, moves });
        pending.extend(fanout.into_iter().map(|mv| (idx, mv)));

        if steps % PROGRESS_INTERVAL == 0 {
            log::debug!(
                "step {steps}: {} states, {duplicates} duplicates, {} pending",
                reached.len(),
                pending.len()
            );
        }
    }

    log::info!(
        "exploration finished: {steps} steps, {} states, {duplicates} duplicates",
        reached.len()
    );
    Census {
        steps,
        duplicates,
        reached,
    }
}
