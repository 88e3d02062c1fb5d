use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// One prime per rank, Two through Ace. The product of five of them identifies
/// a rank multiset uniquely.
pub const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// One-hot suit bit stored in bits 12..16 of the card encoding.
    pub fn bit(self) -> u32 {
        match self {
            Suit::Spades => 0x1,
            Suit::Hearts => 0x2,
            Suit::Diamonds => 0x4,
            Suit::Clubs => 0x8,
        }
    }

    fn from_bit(bit: u32) -> Option<Suit> {
        match bit {
            0x1 => Some(Suit::Spades),
            0x2 => Some(Suit::Hearts),
            0x4 => Some(Suit::Diamonds),
            0x8 => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        match v {
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Zero-based index, Two = 0 through Ace = 12.
    pub fn index(self) -> usize {
        self as usize - 2
    }

    pub fn prime(self) -> u32 {
        PRIMES[self.index()]
    }

    pub fn from_char(c: char) -> Option<Rank> {
        RANK_CHARS
            .iter()
            .position(|&r| r == c.to_ascii_uppercase())
            .and_then(|i| Rank::from_u8(i as u8 + 2))
    }

    pub fn to_char(self) -> char {
        RANK_CHARS[self.index()]
    }
}

/// A playing card packed into one integer:
///
/// ```text
/// +--------+--------+--------+--------+
/// |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
/// +--------+--------+--------+--------+
/// ```
///
/// `b` is the one-hot rank bit, `cdhs` the one-hot suit bit, `r` the rank
/// index and `p` the rank prime. Flushes are found by AND-ing suit bits and
/// rank sets by OR-ing rank bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card(u32);

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        let r = rank.index() as u32;
        Card((1 << (16 + r)) | (suit.bit() << 12) | (r << 8) | rank.prime())
    }

    pub fn encoding(self) -> u32 {
        self.0
    }

    pub fn rank(self) -> Rank {
        let index = ((self.0 >> 8) & 0xF) as u8;
        Rank::from_u8(index + 2).unwrap_or(Rank::Ace)
    }

    pub fn suit(self) -> Suit {
        Suit::from_bit((self.0 >> 12) & 0xF).unwrap_or(Suit::Spades)
    }

    pub fn prime(self) -> u32 {
        self.0 & 0x3F
    }

    /// 13-bit rank mask with exactly one bit set.
    pub fn rank_bits(self) -> u32 {
        self.0 >> 16
    }

    pub fn suit_bits(self) -> u32 {
        (self.0 >> 12) & 0xF
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(c), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(GameError::InvalidCard(s.to_string()));
        };
        match (Rank::from_char(r), Suit::from_char(c)) {
            (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
            _ => Err(GameError::InvalidCard(s.to_string())),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().to_char(), self.suit().to_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self)
    }
}

/// Parses a whitespace or comma separated list such as `"As Kd, 7h"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn prime_product_from_hand(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.prime()).product()
}

/// Product of the primes of every rank set in a 13-bit mask.
pub fn prime_product_from_rankbits(bits: u32) -> u32 {
    (0..13)
        .filter(|i| bits & (1 << i) != 0)
        .map(|i| PRIMES[i])
        .product()
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(r, s));
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_ace_of_spades() {
        let c = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(c.encoding(), (1 << 28) | (0x1 << 12) | (12 << 8) | 41);
        assert_eq!(c.rank(), Rank::Ace);
        assert_eq!(c.suit(), Suit::Spades);
        assert_eq!(c.prime(), 41);
        assert_eq!(c.rank_bits(), 1 << 12);
    }

    #[test]
    fn parses_and_formats_tokens() {
        for token in ["2c", "Td", "Jh", "As"] {
            let card: Card = token.parse().unwrap();
            assert_eq!(card.to_string(), token);
        }
        assert_eq!("aS".parse::<Card>().unwrap().to_string(), "As");
    }

    #[test]
    fn rejects_bad_tokens() {
        for token in ["", "A", "1s", "Ax", "Asd", "10s"] {
            assert!(
                matches!(token.parse::<Card>(), Err(GameError::InvalidCard(_))),
                "{token:?} should not parse"
            );
        }
    }

    #[test]
    fn rankbits_product_matches_card_product() {
        let cards = parse_cards("As Kd Qh 7c 2s").unwrap();
        let bits = cards.iter().fold(0, |acc, c| acc | c.rank_bits());
        assert_eq!(
            prime_product_from_rankbits(bits),
            prime_product_from_hand(&cards)
        );
    }

    #[test]
    fn serializes_as_token() {
        let c: Card = "Th".parse().unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"Th\"");
        let back: Card = serde_json::from_str("\"Th\"").unwrap();
        assert_eq!(back, c);
    }
}
