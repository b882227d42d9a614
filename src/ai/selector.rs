//! Move selection policies for the computer player.
//!
//! A `MoveSelector` picks one of the legal moves on offer:
//! - `GreedyHeuristic`: highest heuristic score plus uniform jitter
//! - `UniformRandom`: any legal move, uniformly

use crate::board::Board;
use crate::core::{GameRng, GameState, PlayerId};
use crate::rules::LegalMove;

use super::heuristic::{score_move, HeuristicWeights};

/// Policy for choosing among legal moves.
pub trait MoveSelector: std::fmt::Debug + Send {
    /// Pick the index of a move in `moves`.
    ///
    /// Returns `None` if `moves` is empty.
    fn select(
        &self,
        board: &Board,
        state: &GameState,
        player: PlayerId,
        moves: &[LegalMove],
        rng: &mut GameRng,
    ) -> Option<usize>;

    /// Name for logs.
    fn name(&self) -> &'static str;
}

/// Single-ply greedy evaluator.
///
/// Each candidate gets `score_move` plus a uniform draw in `[0, jitter)`.
/// The first candidate with the highest total wins.
#[derive(Clone, Debug, Default)]
pub struct GreedyHeuristic {
    weights: HeuristicWeights,
}

impl GreedyHeuristic {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl MoveSelector for GreedyHeuristic {
    fn select(
        &self,
        board: &Board,
        state: &GameState,
        player: PlayerId,
        moves: &[LegalMove],
        rng: &mut GameRng,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, mv) in moves.iter().enumerate() {
            let mut score = score_move(board, state, player, mv, &self.weights);
            if self.weights.jitter > 0.0 {
                score += rng.gen_unit() * self.weights.jitter;
            }
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Uniform random selection.
#[derive(Clone, Debug, Default)]
pub struct UniformRandom;

impl MoveSelector for UniformRandom {
    fn select(
        &self,
        _board: &Board,
        _state: &GameState,
        _player: PlayerId,
        moves: &[LegalMove],
        rng: &mut GameRng,
    ) -> Option<usize> {
        if moves.is_empty() {
            return None;
        }
        Some(rng.gen_range_usize(0..moves.len()))
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TokenId, TokenSlot, TurnState};
    use crate::rules::legal_moves;

    fn setup() -> (Board, GameState, TurnState) {
        let board = Board::standard();
        let mut state = GameState::new();
        state.set_position(&board, TokenId::new(PlayerId::P1, TokenSlot::new(0)), 10);
        state.set_position(&board, TokenId::new(PlayerId::P2, TokenSlot::new(0)), 50);
        let mut turn = TurnState::new();
        turn.push_roll(2, false);
        (board, state, turn)
    }

    #[test]
    fn test_greedy_prefers_capture() {
        let (board, state, turn) = setup();
        let moves = legal_moves(&board, &state, &turn, PlayerId::P2);
        assert_eq!(moves.len(), 1);

        let selector = GreedyHeuristic::default();
        let mut rng = GameRng::new(1);
        assert_eq!(selector.select(&board, &state, PlayerId::P2, &moves, &mut rng), Some(0));
    }

    #[test]
    fn test_greedy_beats_jitter() {
        let board = Board::standard();
        let mut state = GameState::new();
        state.set_position(&board, TokenId::new(PlayerId::P1, TokenSlot::new(0)), 10);
        state.set_position(&board, TokenId::new(PlayerId::P2, TokenSlot::new(0)), 50);
        state.set_position(&board, TokenId::new(PlayerId::P2, TokenSlot::new(1)), 20);
        let mut turn = TurnState::new();
        turn.push_roll(2, false);

        let moves = legal_moves(&board, &state, &turn, PlayerId::P2);
        let capture = moves
            .iter()
            .position(|m| m.slot == TokenSlot::new(0))
            .unwrap();

        let selector = GreedyHeuristic::default();
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            assert_eq!(
                selector.select(&board, &state, PlayerId::P2, &moves, &mut rng),
                Some(capture)
            );
        }
    }

    #[test]
    fn test_first_of_equal_scores_wins() {
        let board = Board::standard();
        let state = GameState::new();
        let mut turn = TurnState::new();
        turn.push_roll(1, true);

        // Four identical entries.
        let moves = legal_moves(&board, &state, &turn, PlayerId::P4);
        assert_eq!(moves.len(), 4);
        let selector = GreedyHeuristic::new(HeuristicWeights::deterministic());
        let mut rng = GameRng::new(0);
        assert_eq!(selector.select(&board, &state, PlayerId::P4, &moves, &mut rng), Some(0));
    }

    #[test]
    fn test_empty_candidates() {
        let board = Board::standard();
        let state = GameState::new();
        let mut rng = GameRng::new(0);
        assert_eq!(GreedyHeuristic::default().select(&board, &state, PlayerId::P1, &[], &mut rng), None);
        assert_eq!(UniformRandom.select(&board, &state, PlayerId::P1, &[], &mut rng), None);
    }

    #[test]
    fn test_uniform_in_range() {
        let (board, mut state, turn) = setup();
        state.set_position(&board, TokenId::new(PlayerId::P2, TokenSlot::new(1)), 20);
        let moves = legal_moves(&board, &state, &turn, PlayerId::P2);
        let mut rng = GameRng::new(4);
        for _ in 0..20 {
            let pick = UniformRandom.select(&board, &state, PlayerId::P2, &moves, &mut rng).unwrap();
            assert!(pick < moves.len());
        }
    }
}
