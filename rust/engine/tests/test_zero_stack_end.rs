use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Game, GameConfig};
use holdem_engine::player::ActionType as A;

fn stacked(board: &str, holes: &str) -> Deck {
    Deck::with_board_and_holes(&parse_cards(board).unwrap(), &parse_cards(holes).unwrap()).unwrap()
}

fn game(buyin_limit: u32) -> Game {
    Game::new(GameConfig {
        buy_in: 100,
        max_players: 2,
        buyin_limit,
        ..GameConfig::default()
    })
    .unwrap()
}

/// Button shoves and the other seat calls; `holes` are in dealing order.
fn shove_and_call(game: &mut Game, holes: &str) {
    game.start_hand_with_deck(stacked("Kc 9s 8h 4d 3c", holes))
        .unwrap();
    game.take_action(A::AllIn, None).unwrap();
    game.take_action(A::Call, None).unwrap();
    assert!(!game.is_hand_running());
}

#[test]
fn busted_table_cannot_start_a_hand() {
    let mut game = game(1);
    shove_and_call(&mut game, "7c 2d Ah Ad");
    assert_eq!(game.players()[1].chips(), 0);
    assert!(!game.is_game_running());
    assert_eq!(game.start_hand(), Err(GameError::NotEnoughPlayers));
}

#[test]
fn busted_seat_rebuys_until_the_limit_then_table_restarts() {
    let mut game = game(1);
    shove_and_call(&mut game, "7c 2d Ah Ad");
    assert_eq!(game.players()[0].chips(), 200);

    game.reset_game().unwrap();
    assert_eq!(game.players()[1].chips(), 100);
    assert_eq!(game.buyin_history(), &[0, 1]);
    assert_eq!(game.game_restarts(), 0);

    // button moved to seat 1, so seat 0 is dealt first this time
    shove_and_call(&mut game, "Ah Ad 7c 2d");
    assert_eq!(game.btn_loc(), 1);
    assert_eq!(game.players()[1].chips(), 0);
    assert_eq!(game.players()[0].chips(), 300);

    game.reset_game().unwrap();
    assert_eq!(game.game_restarts(), 1);
    assert_eq!(game.buyin_history(), &[0, 0]);
    assert!(game.players().iter().all(|p| p.chips() == 100));
    assert!(game.is_game_running());
}

#[test]
fn reset_leaves_a_running_table_alone() {
    let mut game = game(3);
    game.reset_game().unwrap();
    assert_eq!(game.buyin_history(), &[0, 0]);
    assert_eq!(game.game_restarts(), 0);
    assert!(game.players().iter().all(|p| p.chips() == 100));
}
