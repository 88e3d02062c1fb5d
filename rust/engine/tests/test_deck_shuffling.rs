use std::collections::HashSet;

use holdem_engine::cards::{full_deck, parse_cards, Card};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

fn drain(deck: &mut Deck) -> Vec<Card> {
    let mut all = deck.draw(deck.community_remaining(), true).unwrap();
    all.extend(deck.draw(deck.remaining(), false).unwrap());
    all
}

#[test]
fn deck_holds_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    let cards = drain(&mut deck);
    assert_eq!(cards.len(), 52);
    let set: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(set.len(), 52);
    assert_eq!(deck.remaining(), 0);
    assert_eq!(deck.community_remaining(), 0);
}

#[test]
fn draws_never_repeat_a_card() {
    let mut deck = Deck::new_with_seed(7);
    let mut seen = HashSet::new();
    for _ in 0..23 {
        for c in deck.draw(2, false).unwrap() {
            assert!(seen.insert(c), "card {c} dealt twice");
        }
    }
    for c in deck.draw(5, true).unwrap() {
        assert!(seen.insert(c), "board card {c} was also a hole card");
    }
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    assert_eq!(drain(&mut d1), drain(&mut d2), "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    assert_ne!(drain(&mut d1), drain(&mut d2));
}

#[test]
fn overdraw_is_an_error() {
    let mut deck = Deck::new_with_seed(3);
    assert_eq!(
        deck.draw(6, true),
        Err(GameError::DeckUnderflow {
            requested: 6,
            remaining: 5
        })
    );
    deck.draw(40, false).unwrap();
    assert!(matches!(
        deck.draw(8, false),
        Err(GameError::DeckUnderflow { remaining: 7, .. })
    ));
    assert_eq!(deck.remaining(), 7, "failed draws take nothing");
}

#[test]
fn stacked_deck_deals_in_given_order() {
    let board = parse_cards("2c 3c 4c 5c 6c").unwrap();
    let holes = parse_cards("As Ah Ks Kh").unwrap();
    let mut deck = Deck::with_board_and_holes(&board, &holes).unwrap();
    assert_eq!(deck.draw(2, false).unwrap(), holes[..2]);
    assert_eq!(deck.draw(2, false).unwrap(), holes[2..]);
    assert_eq!(deck.draw(3, true).unwrap(), board[..3]);
    assert_eq!(deck.remaining(), 52 - 5 - 4);
}

#[test]
fn stacked_deck_must_be_complete() {
    let mut cards = full_deck();
    cards.pop();
    assert!(Deck::stacked(cards).is_err());
    let board = parse_cards("2c 3c 4c").unwrap();
    assert!(Deck::with_board_and_holes(&board, &[]).is_err());
}
