//! The match: session state plus the turn state machine.
//!
//! ## Turn flow
//!
//! ```text
//! Idle -> Rolling -> AwaitingApplication -> TurnComplete -> next seat
//!            ^  |
//!            +--+  extra roll (1, 5, 6, 12), at most five throws
//! ```
//!
//! - `request_roll` throws the dice for the active seat.
//! - `select_pending_roll` arms (or disarms) an unused roll.
//! - `begin_move` validates the armed roll against a token and opens the
//!   in-flight gate; `finalize_move` commits it. `attempt_move` does both.
//!
//! After every throw and every move the match checks whether the turn is
//! over. Once rolling is closed, a turn with every roll used ends at once.
//! A turn with unused rolls but no legal (roll, token) pair ends after the
//! configured grace period: `pending_turn_end` reports it and
//! `complete_pending_turn` commits it. A zero grace ends the turn inside
//! the call that found it stuck.
//!
//! ## Computer seat
//!
//! In a vs-computer match the computer player is driven synchronously as
//! soon as its seat becomes active. Its moves go through the same commands
//! and gates as a human's.
//!
//! ## Events
//!
//! Every command queues [`GameEvent`]s for the presentation layer. Rejected
//! commands change nothing except queueing a `Notice`.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::ai::ComputerPlayer;
use crate::board::{Board, Transit};
use crate::core::{
    Command, GameRng, GameState, MatchConfig, MoveRecord, PlayerId, Position, TokenId, TokenSlot,
    TurnState,
};
use crate::dice::{DiceRoll, DiceSource, RandomDice};
use crate::error::{ConfigError, MoveRejection, Rejection};
use crate::rules::{self, LegalMoves, MatchOutcome, MoveResult, MoveTarget};

use super::event::{GameEvent, SoundCue};

/// A move between `begin_move` and `finalize_move`.
#[derive(Clone, Copy, Debug)]
struct InFlight {
    slot: TokenSlot,
    roll_index: usize,
    roll: u8,
    target: MoveTarget,
}

/// What a successful [`Command`] produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum CommandOutput {
    Rolled { roll: DiceRoll },
    Armed { index: Option<usize> },
    Moved { result: MoveResult },
}

/// One game session.
///
/// ## Example
///
/// ```
/// use thayam::core::{MatchConfig, PlayerId, TokenSlot};
/// use thayam::dice::ScriptedDice;
/// use thayam::turn::Match;
///
/// let config = MatchConfig::new(4);
/// let mut game = Match::start_with_dice(config, ScriptedDice::from_faces([(1, 0)])).unwrap();
///
/// let roll = game.request_roll(PlayerId::P1).unwrap();
/// assert_eq!(roll.total, 1);
/// assert!(game.turn().can_roll());
///
/// game.select_pending_roll(0).unwrap();
/// game.attempt_move(TokenSlot::new(0)).unwrap();
/// assert_eq!(game.state().positions_of(PlayerId::P1)[0], 1);
/// ```
#[derive(Debug)]
pub struct Match {
    config: MatchConfig,
    board: Board,
    players: Vec<PlayerId>,
    active_index: usize,
    started: bool,
    state: GameState,
    turn: TurnState,
    turn_number: u32,
    in_flight: Option<InFlight>,
    pending_end: Option<Duration>,
    outcome: Option<MatchOutcome>,
    dice: Box<dyn DiceSource>,
    computer: Option<ComputerPlayer>,
    events: Vec<GameEvent>,
}

impl Match {
    /// Create an idle session. Nothing can be played until
    /// [`start_match`](Self::start_match).
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::new(config.seed);
        let computer = config.vs_computer.then(|| {
            ComputerPlayer::greedy(
                config.computer_seat,
                config.weights.clone(),
                rng.for_context("computer"),
            )
        });
        Ok(Self {
            players: config.active_players(),
            board: Board::standard(),
            active_index: 0,
            started: false,
            state: GameState::new(),
            turn: TurnState::new(),
            turn_number: 0,
            in_flight: None,
            pending_end: None,
            outcome: None,
            dice: Box::new(RandomDice::new(rng.for_context("dice"))),
            computer,
            events: Vec::new(),
            config,
        })
    }

    /// Create and start a session.
    pub fn start(config: MatchConfig) -> Result<Self, ConfigError> {
        let mut game = Self::new(config)?;
        game.start_match();
        Ok(game)
    }

    /// Create and start a session throwing from `dice`.
    pub fn start_with_dice(
        config: MatchConfig,
        dice: impl DiceSource + 'static,
    ) -> Result<Self, ConfigError> {
        let mut game = Self::new(config)?.with_dice(dice);
        game.start_match();
        Ok(game)
    }

    /// Replace the dice source.
    #[must_use]
    pub fn with_dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    /// Replace the computer player (its seat must be active).
    #[must_use]
    pub fn with_computer(mut self, computer: ComputerPlayer) -> Self {
        assert!(
            self.players.contains(&computer.seat()),
            "Computer seat {} is not active",
            computer.seat()
        );
        self.computer = Some(computer);
        self
    }

    // === Lifecycle ===

    /// Reset all session data and begin with the first active seat.
    pub fn start_match(&mut self) {
        self.state = GameState::new();
        self.turn = TurnState::new();
        self.active_index = 0;
        self.turn_number = 1;
        self.in_flight = None;
        self.pending_end = None;
        self.outcome = None;
        self.started = true;

        info!(
            players = ?self.players,
            vs_computer = self.config.vs_computer,
            seed = self.config.seed,
            "match started"
        );
        self.events.push(GameEvent::MatchStarted {
            players: self.players.clone(),
        });
        self.events.push(GameEvent::Sound { cue: SoundCue::Start });

        self.drive_computer();
    }

    /// Throw away the current match and start again.
    pub fn restart_match(&mut self) {
        info!(turn = self.turn_number, "match restarted");
        self.start_match();
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The turn in progress.
    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Seats in play, in turn order.
    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// The seat to act.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.players[self.active_index]
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.map(|o| o.winner())
    }

    /// The engine-driven seat, if any.
    #[must_use]
    pub fn computer_seat(&self) -> Option<PlayerId> {
        self.computer.as_ref().map(ComputerPlayer::seat)
    }

    /// Position of a token.
    #[must_use]
    pub fn position(&self, token: TokenId) -> Position {
        self.state.position(token)
    }

    /// A seat's cut counter.
    #[must_use]
    pub fn cuts(&self, player: PlayerId) -> u32 {
        self.state.cuts(player)
    }

    /// Whether a move is between `begin_move` and `finalize_move`.
    #[must_use]
    pub fn move_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Remaining delay before a stuck turn ends, if one is pending.
    #[must_use]
    pub fn pending_turn_end(&self) -> Option<Duration> {
        self.pending_end
    }

    /// Legality of moving the active seat's token in `slot` by `roll`.
    pub fn legality(&self, slot: TokenSlot, roll: u8) -> Result<MoveTarget, MoveRejection> {
        rules::validate(&self.board, &self.state, self.active_player(), slot, roll)
    }

    /// Legal (unused roll, token) pairs for the active seat.
    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        rules::legal_moves(&self.board, &self.state, &self.turn, self.active_player())
    }

    /// Queued events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Apply a command for whoever it names (or the active seat).
    pub fn apply(&mut self, command: Command) -> Result<CommandOutput, Rejection> {
        debug!(command = command.name(), "apply");
        match command {
            Command::Roll { player } => self
                .request_roll(player)
                .map(|roll| CommandOutput::Rolled { roll }),
            Command::SelectRoll { index } => self
                .select_pending_roll(index)
                .map(|index| CommandOutput::Armed { index }),
            Command::SelectNextRoll => self
                .select_next_roll()
                .map(|index| CommandOutput::Armed { index: Some(index) }),
            Command::SelectPreviousRoll => self
                .select_previous_roll()
                .map(|index| CommandOutput::Armed { index: Some(index) }),
            Command::Move { slot } => self
                .attempt_move(slot)
                .map(|result| CommandOutput::Moved { result }),
        }
    }

    /// Throw the dice for `player`.
    pub fn request_roll(&mut self, player: PlayerId) -> Result<DiceRoll, Rejection> {
        let result = self.try_roll(player);
        result.map_err(|err| self.rejected(Some(player), err))
    }

    /// Arm the unused roll at `index`, or disarm it if it is already armed.
    ///
    /// Returns the armed index afterwards.
    pub fn select_pending_roll(&mut self, index: usize) -> Result<Option<usize>, Rejection> {
        let result = self.try_select(index);
        result.map_err(|err| self.rejected(None, err))
    }

    /// Arm the next unused roll after the armed one, wrapping around.
    pub fn select_next_roll(&mut self) -> Result<usize, Rejection> {
        let result = self.try_cycle(true);
        result.map_err(|err| self.rejected(None, err))
    }

    /// Arm the previous unused roll before the armed one, wrapping around.
    pub fn select_previous_roll(&mut self) -> Result<usize, Rejection> {
        let result = self.try_cycle(false);
        result.map_err(|err| self.rejected(None, err))
    }

    /// Validate the armed roll against `slot` and open the in-flight gate.
    ///
    /// Returns the transit script for the renderer. Nothing is committed
    /// until [`finalize_move`](Self::finalize_move).
    pub fn begin_move(&mut self, slot: TokenSlot) -> Result<Transit, Rejection> {
        let result = self.try_begin(slot);
        result.map_err(|err| self.rejected(None, err))
    }

    /// Commit the in-flight move.
    pub fn finalize_move(&mut self) -> Result<MoveResult, Rejection> {
        let result = self.try_finalize();
        result.map_err(|err| self.rejected(None, err))
    }

    /// Apply the armed roll to `slot`: `begin_move` then `finalize_move`.
    pub fn attempt_move(&mut self, slot: TokenSlot) -> Result<MoveResult, Rejection> {
        self.begin_move(slot)?;
        self.finalize_move()
    }

    /// End a stuck turn whose grace period has elapsed.
    ///
    /// Returns the seat now to act. If that is the computer seat, its turn
    /// is played before this returns.
    pub fn complete_pending_turn(&mut self) -> Result<PlayerId, Rejection> {
        if self.pending_end.take().is_none() {
            return Err(self.rejected(None, Rejection::NoTurnEnding));
        }
        self.end_turn();
        Ok(self.active_player())
    }

    // === Puzzle / test setup ===

    /// Place a token directly. Does not touch the turn.
    pub fn set_token_position(&mut self, token: TokenId, position: Position) {
        self.state.set_position(&self.board, token, position);
    }

    /// Credit `player` with a cut, opening the inner path.
    pub fn grant_cut(&mut self, player: PlayerId) {
        self.state.record_cut(player);
    }

    // === Internals ===

    fn ensure_can_act(&self) -> Result<(), Rejection> {
        if !self.started {
            return Err(Rejection::MatchNotStarted);
        }
        if self.outcome.is_some() {
            return Err(Rejection::MatchOver);
        }
        if self.in_flight.is_some() {
            return Err(Rejection::MoveInFlight);
        }
        if self.pending_end.is_some() {
            return Err(Rejection::TurnEnding);
        }
        Ok(())
    }

    fn rejected(&mut self, player: Option<PlayerId>, rejection: Rejection) -> Rejection {
        debug!(player = ?player, %rejection, "command rejected");
        self.events.push(GameEvent::Notice {
            player,
            message: rejection.to_string(),
        });
        rejection
    }

    fn try_roll(&mut self, player: PlayerId) -> Result<DiceRoll, Rejection> {
        self.ensure_can_act()?;
        let active = self.active_player();
        if player != active {
            return Err(Rejection::NotYourTurn {
                active,
                requested: player,
            });
        }
        if !self.turn.can_roll() {
            return Err(Rejection::RollNotAllowed);
        }

        let roll = self.dice.roll_pair();
        self.turn.push_roll(roll.total, roll.grants_extra_roll());
        debug!(
            player = %player,
            %roll,
            throws = self.turn.rolls().len(),
            can_roll = self.turn.can_roll(),
            "dice rolled"
        );
        self.events.push(GameEvent::RollResolved {
            player,
            roll,
            extra_roll: self.turn.can_roll(),
        });
        self.events.push(GameEvent::Sound { cue: SoundCue::Roll });

        self.check_turn_completion();
        Ok(roll)
    }

    fn try_select(&mut self, index: usize) -> Result<Option<usize>, Rejection> {
        self.ensure_can_act()?;
        if index >= self.turn.rolls().len() {
            return Err(Rejection::InvalidRollIndex { index });
        }
        if self.turn.is_used(index) {
            return Err(Rejection::RollAlreadyUsed { index });
        }
        let armed = if self.turn.selected_index() == Some(index) {
            None
        } else {
            Some(index)
        };
        self.arm(armed);
        Ok(armed)
    }

    fn try_cycle(&mut self, forward: bool) -> Result<usize, Rejection> {
        self.ensure_can_act()?;
        let unused: Vec<usize> = self.turn.unused_indices().collect();
        let (Some(&first), Some(&last)) = (unused.first(), unused.last()) else {
            return Err(Rejection::NothingToSelect);
        };
        let next = match (self.turn.selected_index(), forward) {
            (None, true) => first,
            (None, false) => last,
            (Some(current), true) => unused.iter().copied().find(|i| *i > current).unwrap_or(first),
            (Some(current), false) => unused
                .iter()
                .rev()
                .copied()
                .find(|i| *i < current)
                .unwrap_or(last),
        };
        self.arm(Some(next));
        Ok(next)
    }

    fn arm(&mut self, index: Option<usize>) {
        let player = self.active_player();
        self.turn.set_selected(index);
        debug!(player = %player, index = ?index, "roll armed");
        self.events.push(GameEvent::RollArmed { player, index });
        self.events.push(GameEvent::Sound { cue: SoundCue::Select });
    }

    fn try_begin(&mut self, slot: TokenSlot) -> Result<Transit, Rejection> {
        self.ensure_can_act()?;
        let Some(roll_index) = self.turn.selected_index() else {
            return Err(Rejection::NoArmedRoll);
        };
        let player = self.active_player();
        let roll = self.turn.rolls()[roll_index];
        let target = rules::validate(&self.board, &self.state, player, slot, roll)?;

        let cells = self.board.transit(player, target.from, target.to);
        self.in_flight = Some(InFlight {
            slot,
            roll_index,
            roll,
            target,
        });
        self.events.push(GameEvent::MoveTransit {
            token: TokenId::new(player, slot),
            from: target.from,
            to: target.to,
            cells: cells.clone(),
        });
        Ok(cells)
    }

    fn try_finalize(&mut self) -> Result<MoveResult, Rejection> {
        if !self.started {
            return Err(Rejection::MatchNotStarted);
        }
        let Some(flight) = self.in_flight.take() else {
            return Err(Rejection::NoMoveInFlight);
        };
        let player = self.active_player();
        let result = rules::apply(&self.board, &mut self.state, player, flight.slot, flight.roll);
        debug_assert_eq!(result.to, flight.target.to);
        self.turn.mark_used(flight.roll_index);

        self.state.record_move(MoveRecord {
            turn: self.turn_number,
            sequence: self.state.history().len() as u32 + 1,
            token: result.token,
            roll: result.roll,
            from: result.from,
            to: result.to,
            captured: result.captures.iter().map(|c| c.token).collect(),
        });
        debug!(
            token = %result.token,
            roll = result.roll,
            from = result.from,
            to = result.to,
            cell = %result.cell,
            "move committed"
        );

        for capture in &result.captures {
            info!(by = %player, token = %capture.token, from = capture.from, "token cut");
            self.events.push(GameEvent::Capture {
                by: player,
                token: capture.token,
                retreat: capture.retreat.clone(),
            });
        }
        if result.reached_home {
            self.events.push(GameEvent::TokenHome { token: result.token });
        }
        let cue = if result.is_capture() {
            SoundCue::Kill
        } else if result.reached_home {
            SoundCue::Home
        } else if self.board.is_safe_zone(result.cell) {
            SoundCue::Safe
        } else {
            SoundCue::Move
        };
        self.events.push(GameEvent::Sound { cue });

        if result.won {
            info!(winner = %player, turn = self.turn_number, "match won");
            self.outcome = Some(MatchOutcome::Winner(player));
            self.events.push(GameEvent::MatchWon { winner: player });
        } else {
            self.check_turn_completion();
        }
        Ok(result)
    }

    fn check_turn_completion(&mut self) {
        if self.outcome.is_some() || self.turn.can_roll() {
            return;
        }
        if self.turn.all_used() {
            self.end_turn();
            return;
        }
        let player = self.active_player();
        if rules::has_legal_move(&self.board, &self.state, &self.turn, player) {
            return;
        }

        let grace = self.config.turn_end_grace();
        debug!(player = %player, rolls = ?self.turn.rolls(), "no legal moves");
        self.events.push(GameEvent::NoLegalMoves {
            player,
            grace_ms: self.config.turn_end_grace_ms,
        });
        self.events.push(GameEvent::Notice {
            player: Some(player),
            message: "no valid moves, turn skipped".to_string(),
        });
        if grace.is_zero() {
            self.end_turn();
        } else {
            self.pending_end = Some(grace);
        }
    }

    fn end_turn(&mut self) {
        let previous = self.active_player();
        self.turn = TurnState::new();
        self.pending_end = None;
        self.active_index = (self.active_index + 1) % self.players.len();
        self.turn_number += 1;

        let next = self.active_player();
        info!(previous = %previous, next = %next, turn = self.turn_number, "turn passed");
        self.events.push(GameEvent::TurnEnded { previous, next });

        self.drive_computer();
    }

    /// Play the computer seat's turn if it is active.
    ///
    /// The computer is taken out while it plays, so turn ends inside its
    /// own moves do not re-enter here.
    fn drive_computer(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let Some(mut computer) = self.computer.take() else {
            return;
        };
        if computer.seat() == self.active_player() {
            computer.play_turn(self);
        }
        self.computer = Some(computer);
    }
}
