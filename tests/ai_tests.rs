//! Computer player tests.
//!
//! Seeded computer-vs-computer matches are checked for match invariants
//! after every turn and for replay determinism.

use std::time::Duration;

use thayam::ai::{ComputerPlayer, HeuristicWeights, UniformRandom};
use thayam::core::{GameRng, MatchConfig, PlayerId, PlayerMap, TokenId, TokenSlot};
use thayam::dice::ScriptedDice;
use thayam::error::Rejection;
use thayam::turn::Match;

fn seats(seed: u64, random: bool) -> PlayerMap<ComputerPlayer> {
    let rng = GameRng::new(seed);
    PlayerMap::new(|seat| {
        let rng = rng.for_context(&format!("seat-{seat}"));
        if random {
            ComputerPlayer::new(seat, Box::new(UniformRandom), rng)
        } else {
            ComputerPlayer::greedy(seat, HeuristicWeights::default(), rng)
        }
    })
}

/// Play until the match ends or `max_turns` pass, checking invariants each turn.
fn play(players: usize, seed: u64, random: bool, max_turns: u32) -> Match {
    let config = MatchConfig::new(players)
        .with_seed(seed)
        .with_turn_end_grace(Duration::ZERO);
    let mut game = Match::start(config).unwrap();
    let mut seats = seats(seed, random);
    let mut cuts = PlayerMap::with_value(0u32);

    while !game.is_over() && game.turn_number() <= max_turns {
        let seat = game.active_player();
        let turn = game.turn_number();
        seats[seat].play_turn(&mut game);
        assert!(
            game.is_over() || game.turn_number() > turn,
            "turn {turn} for {seat} did not finish"
        );
        check_invariants(&game, &mut cuts);
    }
    game
}

fn check_invariants(game: &Match, cuts: &mut PlayerMap<u32>) {
    let board = game.board();
    let state = game.state();
    let mut on_cells = 0;
    for player in PlayerId::ALL {
        let home = board.path_len(player);
        for slot in TokenSlot::ALL {
            let token = TokenId::new(player, slot);
            let position = state.position(token);
            assert!(position <= home);
            assert_eq!(state.occupancy().location(token), board.cell_at(player, position));
            if position > 0 {
                on_cells += 1;
            }
        }
        let now = state.cuts(player);
        assert!(now >= cuts[player], "cuts went down for {player}");
        cuts[player] = now;

        // Nobody reaches the inner path without a cut.
        if now == 0 {
            assert!(state
                .positions_of(player)
                .iter()
                .all(|p| !board.is_inner(player, *p)));
        }
    }
    assert_eq!(state.occupancy().len(), on_cells);
    assert!(game.turn().rolls().len() <= 5);
}

#[test]
fn test_greedy_matches_hold_invariants() {
    for players in [2, 3, 4] {
        for seed in 0..4 {
            play(players, seed, false, 300);
        }
    }
}

#[test]
fn test_random_matches_hold_invariants() {
    for seed in 10..14 {
        play(4, seed, true, 300);
    }
}

#[test]
fn test_same_seed_same_match() {
    let a = play(4, 77, false, 150);
    let b = play(4, 77, false, 150);
    assert_eq!(a.turn_number(), b.turn_number());
    assert_eq!(a.state().history(), b.state().history());
    assert_eq!(a.winner(), b.winner());
}

#[test]
fn test_finished_match_accepts_nothing() {
    for seed in 0..20 {
        let mut game = play(2, seed, false, 2000);
        let Some(winner) = game.winner() else {
            continue;
        };
        assert!(game.state().has_won(game.board(), winner));
        for player in game.players().to_vec() {
            assert_eq!(game.request_roll(player), Err(Rejection::MatchOver));
        }
        assert_eq!(game.attempt_move(TokenSlot::new(0)).unwrap_err(), Rejection::MatchOver);
        return;
    }
    panic!("no seeded two-seat match finished");
}

#[test]
fn test_vs_computer_alternates_with_human() {
    let config = MatchConfig::new(2)
        .vs_computer()
        .with_seed(3)
        .with_turn_end_grace(Duration::ZERO);
    let mut game = Match::start(config).unwrap();
    let mut human = ComputerPlayer::greedy(PlayerId::P1, HeuristicWeights::default(), GameRng::new(9));

    for _ in 0..50 {
        if game.is_over() {
            break;
        }
        assert_eq!(game.active_player(), PlayerId::P1);
        human.play_turn(&mut game);
    }
    assert!(game.turn_number() > 50 || game.is_over());
}

#[test]
fn test_computer_prefers_home_over_progress() {
    let config = MatchConfig::new(4).with_turn_end_grace(Duration::ZERO);
    let mut game = Match::start_with_dice(config, ScriptedDice::from_faces([(2, 0)])).unwrap();
    game.grant_cut(PlayerId::P1);
    game.set_token_position(TokenId::new(PlayerId::P1, TokenSlot::new(0)), 20);
    game.set_token_position(TokenId::new(PlayerId::P1, TokenSlot::new(1)), 66);

    let mut computer = ComputerPlayer::greedy(PlayerId::P1, HeuristicWeights::default(), GameRng::new(2));
    assert_eq!(computer.play_turn(&mut game), 1);
    assert_eq!(game.position(TokenId::new(PlayerId::P1, TokenSlot::new(1))), 68);
}
