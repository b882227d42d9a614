//! The computer player's decision cycle.
//!
//! `play_turn` drives one seat through its turn using the same commands a
//! human would issue:
//!
//! 1. Roll until rolling closes.
//! 2. While legal moves remain, pick one with the selector, arm its roll,
//!    and move.
//!
//! Each move is fully committed before the next decision is made. When no
//! legal move is left the cycle stops and the match's own turn completion
//! takes over.

use tracing::{debug, warn};

use crate::core::{GameRng, PlayerId};
use crate::rules::LegalMove;
use crate::turn::Match;

use super::heuristic::HeuristicWeights;
use super::selector::{GreedyHeuristic, MoveSelector};

/// An engine-driven seat.
#[derive(Debug)]
pub struct ComputerPlayer {
    seat: PlayerId,
    selector: Box<dyn MoveSelector>,
    rng: GameRng,
}

impl ComputerPlayer {
    pub fn new(seat: PlayerId, selector: Box<dyn MoveSelector>, rng: GameRng) -> Self {
        Self { seat, selector, rng }
    }

    /// Greedy heuristic player.
    pub fn greedy(seat: PlayerId, weights: HeuristicWeights, rng: GameRng) -> Self {
        Self::new(seat, Box::new(GreedyHeuristic::new(weights)), rng)
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    #[must_use]
    pub fn selector_name(&self) -> &'static str {
        self.selector.name()
    }

    /// Pick a move for the current position, or `None` if nothing is legal.
    pub fn choose(&mut self, game: &Match) -> Option<LegalMove> {
        let moves = game.legal_moves();
        let index = self
            .selector
            .select(game.board(), game.state(), self.seat, &moves, &mut self.rng)?;
        let choice = moves.get(index).copied()?;
        debug!(
            seat = %self.seat,
            candidates = moves.len(),
            roll = choice.roll,
            slot = choice.slot.index(),
            to = choice.target.to,
            "computer chose move"
        );
        Some(choice)
    }

    /// Play this seat's turn. Returns the number of moves made.
    ///
    /// Stops when the turn passes on, a stuck-turn skip is pending, or the
    /// match ends.
    pub fn play_turn(&mut self, game: &mut Match) -> usize {
        let mut moves = 0;
        loop {
            if !game.is_started()
                || game.is_over()
                || game.active_player() != self.seat
                || game.pending_turn_end().is_some()
            {
                break;
            }

            if game.turn().can_roll() {
                if let Err(err) = game.request_roll(self.seat) {
                    warn!(seat = %self.seat, %err, "computer roll rejected");
                    break;
                }
                continue;
            }

            let Some(choice) = self.choose(game) else {
                break;
            };
            if game.turn().selected_index() != Some(choice.roll_index) {
                if let Err(err) = game.select_pending_roll(choice.roll_index) {
                    warn!(seat = %self.seat, %err, "computer selection rejected");
                    break;
                }
            }
            match game.attempt_move(choice.slot) {
                Ok(_) => moves += 1,
                Err(err) => {
                    warn!(seat = %self.seat, %err, "computer move rejected");
                    break;
                }
            }
        }
        moves
    }
}
