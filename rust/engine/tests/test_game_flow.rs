use std::collections::BTreeSet;

use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::game::{Game, GameConfig};
use holdem_engine::history::HandPhase;
use holdem_engine::player::{ActionType as A, PlayerState};

fn config(players: usize, buy_in: u32) -> GameConfig {
    GameConfig {
        buy_in,
        small_blind: 5,
        big_blind: 10,
        max_players: players,
        ..GameConfig::default()
    }
}

fn stacked(board: &str, holes: &str) -> Deck {
    Deck::with_board_and_holes(&parse_cards(board).unwrap(), &parse_cards(holes).unwrap()).unwrap()
}

#[test]
fn heads_up_limp_and_check_reaches_the_flop() {
    let mut game = Game::new(config(2, 100)).unwrap();
    game.start_hand().unwrap();
    assert_eq!(game.hand_phase(), HandPhase::Preflop);
    assert_eq!(game.btn_loc(), 0);
    assert_eq!(game.sb_loc(), 0);
    assert_eq!(game.board().len(), 0);

    game.take_action(A::Call, None).unwrap();
    game.take_action(A::Check, None).unwrap();

    assert_eq!(game.hand_phase(), HandPhase::Flop);
    assert_eq!(game.board().len(), 3);
    assert_eq!(game.pots().len(), 1);
    assert_eq!(game.pots()[0].amount(), 20);
    assert_eq!(game.current_player(), Some(1));
    assert_eq!(game.total_chips(), 200);
}

#[test]
fn short_all_in_gets_a_capped_main_pot() {
    let mut game = Game::with_stacks(config(3, 200), &[50, 200, 200]).unwrap();
    game.start_hand().unwrap();
    assert_eq!((game.btn_loc(), game.sb_loc(), game.bb_loc()), (0, 1, 2));
    assert_eq!(game.current_player(), Some(0));

    game.take_action(A::AllIn, None).unwrap();
    game.take_action(A::Raise, Some(100)).unwrap();
    game.take_action(A::Raise, Some(150)).unwrap();
    game.take_action(A::Call, None).unwrap();
    assert_eq!(game.hand_phase(), HandPhase::Flop);

    let pots = game.pots();
    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].total(), 150);
    assert_eq!(pots[0].eligible(), &BTreeSet::from([0, 1, 2]));
    assert_eq!(pots[1].total(), 200);
    assert_eq!(pots[1].eligible(), &BTreeSet::from([1, 2]));
    assert_eq!(game.players()[0].state(), PlayerState::AllIn);
    assert_eq!(game.players()[0].last_pot(), 0);
    assert_eq!(game.total_chips(), 450);

    // the big stacks keep betting into the side pot only
    game.take_action(A::Raise, Some(20)).unwrap();
    game.take_action(A::Call, None).unwrap();
    assert_eq!(game.pots()[0].total(), 150);
    assert_eq!(game.pots()[1].total(), 240);
    assert_eq!(game.total_chips(), 450);
}

#[test]
fn tied_board_splits_with_odd_chip_left_of_button() {
    let mut game = Game::new(config(3, 100)).unwrap();
    game.start_hand_with_deck(stacked("As Ks Qs Js Ts", "2c 3d 4c 5d 2h 3h"))
        .unwrap();
    // button 0 limps, small blind folds, big blind checks
    game.take_action(A::Call, None).unwrap();
    game.take_action(A::Fold, None).unwrap();
    game.take_action(A::Check, None).unwrap();
    assert_eq!(game.pots()[0].amount(), 25);
    while game.is_hand_running() {
        game.take_action(A::Check, None).unwrap();
    }

    assert_eq!(game.hand_phase(), HandPhase::Settle);
    let settle = game.hand_history().settle().unwrap();
    assert_eq!(settle.pot_winners[&0].winners, vec![2, 0]);
    let chips: Vec<u32> = game.players().iter().map(|p| p.chips()).collect();
    assert_eq!(chips, vec![102, 95, 103]);
    assert_eq!(game.total_chips(), 300);
}

#[test]
fn best_hand_takes_the_pot_at_showdown() {
    let mut game = Game::new(config(2, 100)).unwrap();
    // dealing starts left of the button: seat 1 then seat 0
    game.start_hand_with_deck(stacked("Kc 9s 8h 4d 3c", "7c 2d Ah Ad"))
        .unwrap();
    game.take_action(A::AllIn, None).unwrap();
    game.take_action(A::Call, None).unwrap();

    assert_eq!(game.hand_phase(), HandPhase::Settle);
    assert_eq!(game.board().len(), 5);
    assert_eq!(game.players()[0].chips(), 200);
    assert_eq!(game.players()[1].chips(), 0);
    let settle = game.hand_history().settle().unwrap();
    assert_eq!(settle.new_cards.len(), 5);
    assert!(settle.pot_winners[&0].rank.is_some());
}

#[test]
fn everyone_folding_ends_the_hand_without_a_showdown() {
    let mut game = Game::new(config(4, 100)).unwrap();
    game.start_hand().unwrap();
    // button 0, blinds 1 and 2, seat 3 first to act
    assert_eq!(game.current_player(), Some(3));
    for _ in 0..3 {
        game.take_action(A::Fold, None).unwrap();
    }
    assert_eq!(game.hand_phase(), HandPhase::Settle);
    let award = &game.hand_history().settle().unwrap().pot_winners[&0];
    assert_eq!(award.winners, vec![2]);
    assert_eq!(award.rank, None);
    assert_eq!(game.players()[2].chips(), 105);
}

#[test]
fn phases_only_move_forward() {
    let mut game = Game::new(config(3, 100)).unwrap();
    game.start_hand().unwrap();
    let mut seen = vec![game.hand_phase()];
    while let Some(seat) = game.current_player() {
        let action = if game.validate_move(seat, A::Check, None) {
            A::Check
        } else {
            A::Call
        };
        game.take_action(action, None).unwrap();
        if seen.last() != Some(&game.hand_phase()) {
            seen.push(game.hand_phase());
        }
    }
    assert_eq!(
        seen,
        vec![
            HandPhase::Preflop,
            HandPhase::Flop,
            HandPhase::Turn,
            HandPhase::River,
            HandPhase::Settle
        ]
    );
    let recorded: Vec<HandPhase> = game.hand_history().phases().collect();
    assert_eq!(recorded.first(), Some(&HandPhase::Prehand));
    assert_eq!(recorded.last(), Some(&HandPhase::Settle));
    assert_eq!(game.total_chips(), 300);
}

#[test]
fn busted_seat_is_skipped_next_hand() {
    let mut game = Game::new(config(3, 100)).unwrap();
    game.start_hand_with_deck(stacked("Kc 9s 8h 4d 3c", "7c 2d Ah Ad 5h 6h"))
        .unwrap();
    // seat 0 first to act (after big blind 2), seat 1 small blind, seat 2 big blind
    game.take_action(A::Fold, None).unwrap();
    game.take_action(A::AllIn, None).unwrap();
    game.take_action(A::Call, None).unwrap();
    assert_eq!(game.hand_phase(), HandPhase::Settle);
    assert_eq!(game.players()[1].chips(), 0);
    assert_eq!(game.players()[2].chips(), 200);

    game.start_hand().unwrap();
    assert_eq!(game.players()[1].state(), PlayerState::Skip);
    assert!(!game.hands().contains_key(&1));
    // heads-up between seats 2 and 0 now
    assert_eq!(game.btn_loc(), 2);
    assert_eq!(game.sb_loc(), 2);
    assert_eq!(game.bb_loc(), 0);
}
