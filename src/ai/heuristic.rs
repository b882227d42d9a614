//! Greedy move scoring.
//!
//! `score_move` rates one legal move by looking only at the position it
//! produces. It is pure: no RNG, no mutation. Jitter is added by the
//! selector on top of this score.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{GameState, PlayerId, Position};
use crate::rules::{LegalMove, MoveTarget};

/// Heuristic weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Bringing a token out of base.
    pub entry: f64,
    /// Subtracted from `entry` per token already on the board.
    pub entry_crowding: f64,
    /// Reaching home.
    pub home: f64,
    /// Landing on an opposing token outside safe zones and home.
    pub capture: f64,
    /// Extra for a capture while the seat has no cuts yet.
    pub first_cut: f64,
    /// Landing on a safe zone.
    pub safe_landing: f64,
    /// Crossing into the inner path with the gate open.
    pub inner_entry: f64,
    /// Per position of the target.
    pub progress: f64,
    /// Per pip of the roll used.
    pub roll_pip: f64,
    /// Leaving a safe zone without capturing or reaching home.
    pub leave_safe: f64,
    /// Landing on an exposed cell next to an own token.
    pub stacking: f64,
    /// Urgency starts when fewer than this many steps remain.
    pub rush_window: Position,
    /// Urgency is `(rush_base - steps_to_home) * rush_scale`.
    pub rush_base: f64,
    pub rush_scale: f64,
    /// Any exposed landing.
    pub exposed: f64,
    /// Upper bound of the uniform jitter added per candidate.
    pub jitter: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            entry: 50.0,
            entry_crowding: 5.0,
            home: 500.0,
            capture: 200.0,
            first_cut: 100.0,
            safe_landing: 40.0,
            inner_entry: 60.0,
            progress: 0.5,
            roll_pip: 2.0,
            leave_safe: 25.0,
            stacking: 15.0,
            rush_window: 10,
            rush_base: 20.0,
            rush_scale: 5.0,
            exposed: 5.0,
            jitter: 10.0,
        }
    }
}

impl HeuristicWeights {
    /// Default weights without jitter, for reproducible scoring.
    #[must_use]
    pub fn deterministic() -> Self {
        Self::default().with_jitter(0.0)
    }

    /// Set the jitter bound.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Score a legal move for `player`, jitter excluded.
///
/// ```
/// use thayam::ai::{score_move, HeuristicWeights};
/// use thayam::board::Board;
/// use thayam::core::{GameState, PlayerId, TokenSlot};
/// use thayam::rules::{validate, LegalMove};
///
/// let board = Board::standard();
/// let state = GameState::new();
/// let slot = TokenSlot::new(0);
/// let target = validate(&board, &state, PlayerId::P3, slot, 1).unwrap();
/// let mv = LegalMove { roll_index: 0, roll: 1, slot, target };
///
/// // entry 50, progress 0.5, roll 2, exposed entry cell -5
/// let score = score_move(&board, &state, PlayerId::P3, &mv, &HeuristicWeights::default());
/// assert_eq!(score, 47.5);
/// ```
#[must_use]
pub fn score_move(
    board: &Board,
    state: &GameState,
    player: PlayerId,
    mv: &LegalMove,
    weights: &HeuristicWeights,
) -> f64 {
    let MoveTarget { from, to, cell } = mv.target;
    let has_cut = state.stats(player).has_cut();
    let home = board.path_len(player);
    let threshold = board.inner_path_threshold(player);
    let reaches_home = board.is_home(cell);
    let exposed = board.is_exposed(cell);
    let occupancy = state.occupancy();

    let mut score = 0.0;

    if mv.target.is_entry() {
        let on_board = state.positions_of(player).iter().filter(|p| **p > 0).count();
        score += weights.entry - weights.entry_crowding * on_board as f64;
    }

    if reaches_home {
        score += weights.home;
    }

    let is_capture = exposed && occupancy.has_opponent_of(cell, player);
    if is_capture {
        score += weights.capture;
        if !has_cut {
            score += weights.first_cut;
        }
    }

    if board.is_safe_zone(cell) {
        score += weights.safe_landing;
    }

    if to > threshold && from <= threshold && has_cut {
        score += weights.inner_entry;
    }

    score += weights.progress * f64::from(to);

    if let Some(current) = board.cell_at(player, from) {
        if board.is_safe_zone(current) && !is_capture && !reaches_home {
            score -= weights.leave_safe;
        }
    }

    if exposed && occupancy.own_count(cell, player) > 0 {
        score -= weights.stacking;
    }

    if to > threshold && has_cut {
        let steps_to_home = home - to;
        if steps_to_home < weights.rush_window {
            score += (weights.rush_base - f64::from(steps_to_home)) * weights.rush_scale;
        }
    }

    if exposed {
        score -= weights.exposed;
    }

    score + weights.roll_pip * f64::from(mv.roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TokenId, TokenSlot};
    use crate::rules::validate;

    fn legal(board: &Board, state: &GameState, player: PlayerId, slot: u8, roll: u8) -> LegalMove {
        let slot = TokenSlot::new(slot);
        let target = validate(board, state, player, slot, roll).unwrap();
        LegalMove {
            roll_index: 0,
            roll,
            slot,
            target,
        }
    }

    fn place(board: &Board, state: &mut GameState, player: PlayerId, slot: u8, pos: Position) {
        state.set_position(board, TokenId::new(player, TokenSlot::new(slot)), pos);
    }

    #[test]
    fn test_entry_crowding() {
        let board = Board::standard();
        let mut state = GameState::new();
        let weights = HeuristicWeights::default();

        let empty = score_move(&board, &state, PlayerId::P1, &legal(&board, &state, PlayerId::P1, 0, 1), &weights);
        place(&board, &mut state, PlayerId::P1, 1, 3);
        place(&board, &mut state, PlayerId::P1, 2, 4);
        let crowded = score_move(&board, &state, PlayerId::P1, &legal(&board, &state, PlayerId::P1, 0, 1), &weights);

        assert_eq!(empty - crowded, 10.0);
    }

    #[test]
    fn test_capture_and_first_cut_bonus() {
        let board = Board::standard();
        let mut state = GameState::new();
        let weights = HeuristicWeights::default();
        place(&board, &mut state, PlayerId::P1, 0, 10);
        place(&board, &mut state, PlayerId::P2, 0, 50);

        let capture = legal(&board, &state, PlayerId::P2, 0, 2);
        // progress 26, roll 4, capture 200, first cut 100, exposed -5
        assert_eq!(score_move(&board, &state, PlayerId::P2, &capture, &weights), 325.0);

        state.record_cut(PlayerId::P2);
        assert_eq!(score_move(&board, &state, PlayerId::P2, &capture, &weights), 225.0);
    }

    #[test]
    fn test_capture_of_two_scores_once() {
        let board = Board::standard();
        let mut state = GameState::new();
        let weights = HeuristicWeights::default();
        place(&board, &mut state, PlayerId::P2, 0, 50);
        place(&board, &mut state, PlayerId::P1, 0, 10);
        let single = score_move(&board, &state, PlayerId::P2, &legal(&board, &state, PlayerId::P2, 0, 2), &weights);
        place(&board, &mut state, PlayerId::P1, 1, 10);
        let double = score_move(&board, &state, PlayerId::P2, &legal(&board, &state, PlayerId::P2, 0, 2), &weights);
        assert_eq!(single, double);
    }

    #[test]
    fn test_safe_landing_and_leaving() {
        let board = Board::standard();
        let mut state = GameState::new();
        let weights = HeuristicWeights::default();
        place(&board, &mut state, PlayerId::P1, 0, 11);

        // 11 -> 13 lands on the corner: safe 40, progress 6.5, roll 4
        let onto = legal(&board, &state, PlayerId::P1, 0, 2);
        assert_eq!(score_move(&board, &state, PlayerId::P1, &onto, &weights), 50.5);

        place(&board, &mut state, PlayerId::P1, 0, 13);
        // 13 -> 16: progress 8, roll 6, leave safe -25, exposed -5
        let off = legal(&board, &state, PlayerId::P1, 0, 3);
        assert_eq!(score_move(&board, &state, PlayerId::P1, &off, &weights), -16.0);
    }

    #[test]
    fn test_stacking_penalty() {
        let board = Board::standard();
        let mut state = GameState::new();
        let weights = HeuristicWeights::default();
        place(&board, &mut state, PlayerId::P1, 0, 4);
        place(&board, &mut state, PlayerId::P1, 1, 2);

        let alone = score_move(&board, &state, PlayerId::P1, &legal(&board, &state, PlayerId::P1, 0, 3), &weights);
        let stack = score_move(&board, &state, PlayerId::P1, &legal(&board, &state, PlayerId::P1, 1, 2), &weights);
        // 4 -> 7 (3.5 + 6 - 5) versus 2 -> 4 onto own token (2 + 4 - 15 - 5)
        assert_eq!(alone, 4.5);
        assert_eq!(stack, -14.0);
    }

    #[test]
    fn test_inner_entry_and_rush() {
        let board = Board::standard();
        let mut state = GameState::new();
        let weights = HeuristicWeights::default();
        state.record_cut(PlayerId::P3);
        place(&board, &mut state, PlayerId::P3, 0, 60);

        // 60 -> 63: inner entry 60, progress 31.5, roll 6, rush (20 - 5) * 5, exposed -5
        let mv = legal(&board, &state, PlayerId::P3, 0, 3);
        assert_eq!(score_move(&board, &state, PlayerId::P3, &mv, &weights), 167.5);
    }

    #[test]
    fn test_home_entry() {
        let board = Board::standard();
        let mut state = GameState::new();
        let weights = HeuristicWeights::default();
        state.record_cut(PlayerId::P4);
        place(&board, &mut state, PlayerId::P4, 0, 66);

        // home 500, progress 34, roll 4, rush 20 * 5
        let mv = legal(&board, &state, PlayerId::P4, 0, 2);
        assert_eq!(score_move(&board, &state, PlayerId::P4, &mv, &weights), 638.0);
    }
}
