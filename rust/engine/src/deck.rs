use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Number of cards reserved for the board before any hole cards are dealt.
pub const COMMUNITY_SIZE: usize = 5;

/// One hand's worth of cards: a shuffled draw pile and a community reserve
/// fixed at construction, so the board is settled before play starts.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    community: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        let community = cards.drain(..COMMUNITY_SIZE).collect();
        Self {
            cards,
            community,
            rng,
        }
    }

    /// Builds a deck in a fixed order: the first five cards become the
    /// community reserve, the rest are drawn front to back.
    pub fn stacked(order: Vec<Card>) -> Result<Self, GameError> {
        if order.len() != 52 {
            return Err(GameError::InvalidDeck(format!(
                "expected 52 cards, got {}",
                order.len()
            )));
        }
        let unique: HashSet<Card> = order.iter().copied().collect();
        if unique.len() != order.len() {
            return Err(GameError::InvalidDeck("duplicate cards".to_string()));
        }
        let mut cards = order;
        let community = cards.drain(..COMMUNITY_SIZE).collect();
        Ok(Self {
            cards,
            community,
            rng: ChaCha20Rng::seed_from_u64(0),
        })
    }

    /// Stacked deck from a board and hole cards given in dealing order; every
    /// other card follows in canonical order.
    pub fn with_board_and_holes(board: &[Card], holes: &[Card]) -> Result<Self, GameError> {
        if board.len() != COMMUNITY_SIZE {
            return Err(GameError::InvalidDeck(format!(
                "board must have {} cards, got {}",
                COMMUNITY_SIZE,
                board.len()
            )));
        }
        let mut order: Vec<Card> = board.iter().chain(holes).copied().collect();
        let rest: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| !order.contains(c))
            .collect();
        order.extend(rest);
        Self::stacked(order)
    }

    /// Reshuffles what is left of the draw pile. The community reserve stays put.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self, n: usize, from_community: bool) -> Result<Vec<Card>, GameError> {
        let pool = if from_community {
            &mut self.community
        } else {
            &mut self.cards
        };
        if n > pool.len() {
            return Err(GameError::DeckUnderflow {
                requested: n,
                remaining: pool.len(),
            });
        }
        Ok(pool.drain(..n).collect())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn community_remaining(&self) -> usize {
        self.community.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }
}
