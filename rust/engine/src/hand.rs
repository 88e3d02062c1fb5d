use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{prime_product_from_hand, prime_product_from_rankbits, Card};
use crate::errors::GameError;
use crate::lookup::{self, MAX_HIGH_CARD};
use crate::preflop;

/// Hand category, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Upper rank bound of each category, strongest category first.
const CLASS_BOUNDS: [(u16, Category); 9] = [
    (lookup::MAX_STRAIGHT_FLUSH, Category::StraightFlush),
    (lookup::MAX_FOUR_OF_A_KIND, Category::FourOfAKind),
    (lookup::MAX_FULL_HOUSE, Category::FullHouse),
    (lookup::MAX_FLUSH, Category::Flush),
    (lookup::MAX_STRAIGHT, Category::Straight),
    (lookup::MAX_THREE_OF_A_KIND, Category::ThreeOfAKind),
    (lookup::MAX_TWO_PAIR, Category::TwoPair),
    (lookup::MAX_PAIR, Category::OnePair),
    (lookup::MAX_HIGH_CARD, Category::HighCard),
];

impl Category {
    /// 1 for a straight flush through 9 for high card.
    pub fn class_number(self) -> u8 {
        9 - self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::StraightFlush => "Straight Flush",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::TwoPair => "Two Pair",
            Category::OnePair => "Pair",
            Category::HighCard => "High Card",
        }
    }

    /// Inclusive rank range covered by this category.
    pub fn bounds(self) -> (u16, u16) {
        let idx = CLASS_BOUNDS
            .iter()
            .position(|&(_, c)| c == self)
            .unwrap_or(CLASS_BOUNDS.len() - 1);
        let low = if idx == 0 { 1 } else { CLASS_BOUNDS[idx - 1].0 + 1 };
        (low, CLASS_BOUNDS[idx].0)
    }
}

/// Evaluator rank in `[1, 7462]`; lower is stronger, 1 is a royal flush.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct HandRank(u16);

impl HandRank {
    pub const BEST: HandRank = HandRank(1);
    pub const WORST: HandRank = HandRank(MAX_HIGH_CARD);

    pub fn new(value: u16) -> Option<HandRank> {
        (1..=MAX_HIGH_CARD).contains(&value).then_some(HandRank(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn class(self) -> Category {
        rank_class(self)
    }

    pub fn percentile(self) -> f64 {
        percentile(self)
    }
}

impl TryFrom<u16> for HandRank {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        HandRank::new(value).ok_or_else(|| format!("hand rank {value} out of range"))
    }
}

impl From<HandRank> for u16 {
    fn from(rank: HandRank) -> u16 {
        rank.0
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ranks exactly five cards with one table lookup.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let table = lookup::table();
    let suited = cards.iter().fold(0xF, |acc, c| acc & c.suit_bits());
    let rank = if suited != 0 {
        let bits = cards.iter().fold(0, |acc, c| acc | c.rank_bits());
        table.flush_rank(prime_product_from_rankbits(bits))
    } else {
        table.unsuited_rank(prime_product_from_hand(cards))
    };
    // Every prime product of five real cards is in one of the tables, except
    // five cards of one rank, which no deck can produce.
    HandRank(rank.unwrap_or(MAX_HIGH_CARD))
}

/// Ranks hole cards against a board.
///
/// With no board the two hole cards are scored from the pre-flop table and
/// mapped onto the 5-card scale. Otherwise the best 5-card subset of
/// `hand + board` wins, which needs 5 to 7 cards in total.
///
/// # Errors
///
/// [`GameError::InvalidHandSize`] for any other card count.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{evaluate, rank_to_string};
///
/// let hole = parse_cards("As Ks").unwrap();
/// let board = parse_cards("Qs Js Ts 2d 3c").unwrap();
/// let rank = evaluate(&hole, &board).unwrap();
/// assert_eq!(rank.get(), 1);
/// assert_eq!(rank_to_string(rank), "Straight Flush");
/// ```
pub fn evaluate(hand: &[Card], board: &[Card]) -> Result<HandRank, GameError> {
    let size_error = || GameError::InvalidHandSize {
        hole: hand.len(),
        board: board.len(),
    };
    if board.is_empty() {
        let [a, b] = hand else {
            return Err(size_error());
        };
        let pct = preflop::table().percentile(*a, *b);
        let mapped = MAX_HIGH_CARD as f64 - (pct * MAX_HIGH_CARD as f64).round();
        return Ok(HandRank(mapped.clamp(1.0, MAX_HIGH_CARD as f64) as u16));
    }
    let total = hand.len() + board.len();
    if !(5..=7).contains(&total) {
        return Err(size_error());
    }
    let cards: Vec<Card> = hand.iter().chain(board).copied().collect();
    Ok(best_of(&cards))
}

/// Best rank over every 5-card subset; `cards` must hold 5 to 7 cards.
pub(crate) fn best_of(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank::WORST;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.min(evaluate_five(&five));
                    }
                }
            }
        }
    }
    best
}

/// Category whose upper bound is the smallest one still at or above `rank`.
pub fn rank_class(rank: HandRank) -> Category {
    CLASS_BOUNDS
        .iter()
        .find(|&&(max, _)| rank.0 <= max)
        .map(|&(_, category)| category)
        .unwrap_or(Category::HighCard)
}

pub fn rank_to_string(rank: HandRank) -> &'static str {
    rank_class(rank).name()
}

/// `1 - rank / 7462`: 0 for the weakest high card, close to 1 for a royal flush.
pub fn percentile(rank: HandRank) -> f64 {
    1.0 - rank.0 as f64 / MAX_HIGH_CARD as f64
}
