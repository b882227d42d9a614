//! Property-based tests for dice, move validation and captures.
//!
//! Run with: cargo test --release property_tests

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use proptest::prelude::*;

use thayam::board::Board;
use thayam::core::{GameState, MatchConfig, PlayerId, TokenId, TokenSlot};
use thayam::dice::{is_extra_roll, DiceRoll, ScriptedDice, FACES, MAX_ROLLS_PER_TURN};
use thayam::error::MoveRejection;
use thayam::rules::{apply, validate};
use thayam::turn::Match;

fn face() -> impl Strategy<Value = u8> {
    prop::sample::select(FACES.to_vec())
}

fn token(player: PlayerId, slot: u8) -> TokenId {
    TokenId::new(player, TokenSlot::new(slot))
}

fn state_with(board: &Board, placements: &[(TokenId, u8)], cut: bool) -> GameState {
    let mut state = GameState::new();
    for (token, position) in placements {
        state.set_position(board, *token, *position);
    }
    if cut {
        state.record_cut(PlayerId::P1);
    }
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Totals are the face sum, except double blank which is 12.
    #[test]
    fn prop_dice_total(d1 in face(), d2 in face()) {
        let roll = DiceRoll::from_faces(d1, d2);
        if d1 == 0 && d2 == 0 {
            prop_assert_eq!(roll.total, 12);
        } else {
            prop_assert_eq!(roll.total, d1 + d2);
        }
        prop_assert!((1..=12).contains(&roll.total));
        prop_assert_eq!(roll.grants_extra_roll(), [1, 5, 6, 12].contains(&roll.total));
    }

    /// Rolling continues exactly while throws grant extras, up to five.
    #[test]
    fn prop_rolls_stop_on_plain_throw_or_cap(
        faces in prop::collection::vec((face(), face()), 6)
    ) {
        let config = MatchConfig::new(4).with_turn_end_grace(Duration::ZERO);
        let mut game = Match::start_with_dice(config, ScriptedDice::from_faces(faces.clone())).unwrap();
        // A token mid-track always has somewhere to go, so the turn is never skipped.
        game.set_token_position(token(PlayerId::P1, 0), 20);

        while game.turn().can_roll() {
            game.request_roll(PlayerId::P1).unwrap();
        }

        let totals: Vec<u8> = faces.iter().map(|(a, b)| DiceRoll::from_faces(*a, *b).total).collect();
        let expected = totals
            .iter()
            .position(|t| !is_extra_roll(*t))
            .map_or(MAX_ROLLS_PER_TURN, |i| (i + 1).min(MAX_ROLLS_PER_TURN));

        prop_assert_eq!(game.turn().rolls(), &totals[..expected]);
        prop_assert_eq!(game.active_player(), PlayerId::P1);
    }

    /// A token in base enters exactly on a 1.
    #[test]
    fn prop_entry_only_on_one(roll in 1u8..=12, cut in any::<bool>()) {
        let board = Board::standard();
        let state = state_with(&board, &[], cut);
        let result = validate(&board, &state, PlayerId::P1, TokenSlot::new(0), roll);
        if roll == 1 {
            let target = result.unwrap();
            prop_assert!(target.is_entry());
            prop_assert_eq!(target.cell, board.path_of(PlayerId::P1)[0]);
        } else {
            prop_assert_eq!(result, Err(MoveRejection::MustRollOneToEnter));
        }
    }

    /// Targets never leave the path; home tokens never move.
    #[test]
    fn prop_target_within_path(from in 1u8..=68, roll in 1u8..=12) {
        let board = Board::standard();
        let home = board.path_len(PlayerId::P1);
        let state = state_with(&board, &[(token(PlayerId::P1, 0), from)], true);

        match validate(&board, &state, PlayerId::P1, TokenSlot::new(0), roll) {
            Ok(target) => {
                prop_assert_eq!(target.to, from + roll);
                prop_assert!(target.to <= home);
            }
            Err(MoveRejection::TokenHome) => prop_assert_eq!(from, home),
            Err(MoveRejection::Overshoot) => prop_assert!(from as u16 + roll as u16 > home as u16),
            Err(other) => prop_assert!(false, "unexpected rejection {other:?}"),
        }
    }

    /// Entering the inner path depends only on having cut.
    #[test]
    fn prop_inner_path_gate(to in 62u8..=68, roll in 1u8..=12) {
        let board = Board::standard();
        prop_assume!(to > roll);
        let from = to - roll;
        let slot = TokenSlot::new(0);

        let uncut = state_with(&board, &[(token(PlayerId::P1, 0), from)], false);
        let cut = state_with(&board, &[(token(PlayerId::P1, 0), from)], true);

        prop_assert_eq!(
            validate(&board, &uncut, PlayerId::P1, slot, roll),
            Err(MoveRejection::InnerPathLocked)
        );
        prop_assert_eq!(validate(&board, &cut, PlayerId::P1, slot, roll).unwrap().to, to);
    }

    /// An opponent on a safe cell blocks it; the seat's own token does not.
    #[test]
    fn prop_safe_zone_exclusive(
        pick in 0usize..8,
        roll in 1u8..=12,
        seat in prop::sample::select(vec![PlayerId::P2, PlayerId::P3, PlayerId::P4]),
    ) {
        let board = Board::standard();
        let safe: Vec<u8> = (1..=board.inner_path_threshold(PlayerId::P1))
            .filter(|p| board.cell_at(PlayerId::P1, *p).is_some_and(|c| board.is_safe_zone(c)))
            .collect();
        prop_assume!(!safe.is_empty());
        let landing = safe[pick % safe.len()];
        prop_assume!(landing > roll);
        let cell = board.cell_at(PlayerId::P1, landing).unwrap();
        let Some(theirs) = board.position_of(seat, cell) else {
            return Ok(());
        };

        let mover = (token(PlayerId::P1, 0), landing - roll);
        let blocked = state_with(&board, &[mover, (token(seat, 0), theirs)], false);
        let shared = state_with(&board, &[mover, (token(PlayerId::P1, 1), landing)], false);

        prop_assert_eq!(
            validate(&board, &blocked, PlayerId::P1, TokenSlot::new(0), roll),
            Err(MoveRejection::SafeZoneOccupied { owner: seat })
        );
        prop_assert_eq!(
            validate(&board, &shared, PlayerId::P1, TokenSlot::new(0), roll).unwrap().cell,
            cell
        );
    }

    /// Landing on any number of exposed opponents scores one cut and bases them all.
    #[test]
    fn prop_capture_counts_once(mask in 1u8..8, roll in 1u8..=9) {
        let board = Board::standard();
        // P1 position 10 is a shared exposed cell.
        let cell = board.cell_at(PlayerId::P1, 10).unwrap();
        prop_assert!(board.is_exposed(cell));

        let mut placements = vec![(token(PlayerId::P1, 0), 10 - roll)];
        let mut victims = Vec::new();
        for (bit, seat) in [PlayerId::P2, PlayerId::P3, PlayerId::P4].into_iter().enumerate() {
            if mask & (1 << bit) != 0 {
                let victim = token(seat, 0);
                placements.push((victim, board.position_of(seat, cell).unwrap()));
                victims.push(victim);
            }
        }
        let mut state = state_with(&board, &placements, false);

        let result = apply(&board, &mut state, PlayerId::P1, TokenSlot::new(0), roll);

        prop_assert_eq!(result.captures.len(), victims.len());
        prop_assert_eq!(state.cuts(PlayerId::P1), 1);
        for victim in victims {
            prop_assert_eq!(state.position(victim), 0);
            prop_assert_eq!(state.occupancy().location(victim), None);
        }
        prop_assert_eq!(state.occupancy().occupants(cell), &[token(PlayerId::P1, 0)]);
    }
}
