//! Perfect-hash lookup tables for 5-card hands.
//!
//! Every 5-card hand reduces to a multiset of ranks (plus a flag for whether it
//! is a flush). The product of one prime per rank is injective over those
//! multisets, so it is used directly as the key. Flush hands and non-flush
//! hands with the same ranks score differently, hence two tables.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::cards::{prime_product_from_rankbits, PRIMES};

pub const MAX_STRAIGHT_FLUSH: u16 = 10;
pub const MAX_FOUR_OF_A_KIND: u16 = 166;
pub const MAX_FULL_HOUSE: u16 = 322;
pub const MAX_FLUSH: u16 = 1599;
pub const MAX_STRAIGHT: u16 = 1609;
pub const MAX_THREE_OF_A_KIND: u16 = 2467;
pub const MAX_TWO_PAIR: u16 = 3325;
pub const MAX_PAIR: u16 = 6185;
pub const MAX_HIGH_CARD: u16 = 7462;

/// Rank masks of the ten straights, best first. The last one is the wheel (5-4-3-2-A).
const STRAIGHTS: [u32; 10] = [
    0b1_1111_0000_0000,
    0b0_1111_1000_0000,
    0b0_0111_1100_0000,
    0b0_0011_1110_0000,
    0b0_0001_1111_0000,
    0b0_0000_1111_1000,
    0b0_0000_0111_1100,
    0b0_0000_0011_1110,
    0b0_0000_0001_1111,
    0b1_0000_0000_1111,
];

#[derive(Debug)]
pub struct LookupTable {
    pub(crate) flush: HashMap<u32, u16>,
    pub(crate) unsuited: HashMap<u32, u16>,
}

static TABLE: OnceLock<LookupTable> = OnceLock::new();

/// Shared tables, built on first use.
pub fn table() -> &'static LookupTable {
    TABLE.get_or_init(LookupTable::build)
}

impl LookupTable {
    fn build() -> Self {
        let mut table = Self {
            flush: HashMap::with_capacity(1287),
            unsuited: HashMap::with_capacity(6175),
        };
        table.flushes();
        table.multiples();
        tracing::debug!(
            flush = table.flush.len(),
            unsuited = table.unsuited.len(),
            "built hand lookup tables"
        );
        table
    }

    pub fn flush_rank(&self, prime_product: u32) -> Option<u16> {
        self.flush.get(&prime_product).copied()
    }

    pub fn unsuited_rank(&self, prime_product: u32) -> Option<u16> {
        self.unsuited.get(&prime_product).copied()
    }

    /// Straight flushes, flushes, straights and high-card hands: every set of
    /// five distinct ranks appears once with and once without a flush.
    fn flushes(&mut self) {
        // Numeric order of the 13-bit masks is high-card order.
        let distinct: Vec<u32> = (0u32..1 << 13)
            .rev()
            .filter(|bits| bits.count_ones() == 5 && !STRAIGHTS.contains(bits))
            .collect();

        for (i, &bits) in STRAIGHTS.iter().enumerate() {
            let key = prime_product_from_rankbits(bits);
            self.flush.insert(key, 1 + i as u16);
            self.unsuited.insert(key, MAX_FLUSH + 1 + i as u16);
        }
        for (i, &bits) in distinct.iter().enumerate() {
            let key = prime_product_from_rankbits(bits);
            self.flush.insert(key, MAX_FULL_HOUSE + 1 + i as u16);
            self.unsuited.insert(key, MAX_PAIR + 1 + i as u16);
        }
    }

    /// Hands with at least one repeated rank; these can never be flushes.
    fn multiples(&mut self) {
        let desc: Vec<usize> = (0..13).rev().collect();
        let p = |i: usize| PRIMES[i];

        let mut rank = MAX_STRAIGHT_FLUSH + 1;
        for &quad in &desc {
            for &kicker in desc.iter().filter(|&&k| k != quad) {
                self.unsuited.insert(p(quad).pow(4) * p(kicker), rank);
                rank += 1;
            }
        }

        let mut rank = MAX_FOUR_OF_A_KIND + 1;
        for &trips in &desc {
            for &pair in desc.iter().filter(|&&k| k != trips) {
                self.unsuited.insert(p(trips).pow(3) * p(pair).pow(2), rank);
                rank += 1;
            }
        }

        let mut rank = MAX_STRAIGHT + 1;
        for &trips in &desc {
            let kickers: Vec<usize> = desc.iter().copied().filter(|&k| k != trips).collect();
            for (a, b) in pairs(&kickers) {
                self.unsuited.insert(p(trips).pow(3) * p(a) * p(b), rank);
                rank += 1;
            }
        }

        let mut rank = MAX_THREE_OF_A_KIND + 1;
        for (high, low) in pairs(&desc) {
            for &kicker in desc.iter().filter(|&&k| k != high && k != low) {
                self.unsuited
                    .insert(p(high).pow(2) * p(low).pow(2) * p(kicker), rank);
                rank += 1;
            }
        }

        let mut rank = MAX_TWO_PAIR + 1;
        for &pair in &desc {
            let kickers: Vec<usize> = desc.iter().copied().filter(|&k| k != pair).collect();
            for (a, b, c) in triples(&kickers) {
                self.unsuited
                    .insert(p(pair).pow(2) * p(a) * p(b) * p(c), rank);
                rank += 1;
            }
        }
    }
}

/// 2-combinations in lexicographic order of the input.
fn pairs(items: &[usize]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for i in 0..items.len() {
        for j in i + 1..items.len() {
            out.push((items[i], items[j]));
        }
    }
    out
}

fn triples(items: &[usize]) -> Vec<(usize, usize, usize)> {
    let mut out = Vec::new();
    for i in 0..items.len() {
        for j in i + 1..items.len() {
            for k in j + 1..items.len() {
                out.push((items[i], items[j], items[k]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        let t = table();
        assert_eq!(t.flush.len(), 1287);
        assert_eq!(t.unsuited.len(), 6175);
    }

    #[test]
    fn ranks_cover_the_full_range_once() {
        let t = table();
        let mut seen = vec![false; MAX_HIGH_CARD as usize + 1];
        for &r in t.flush.values().chain(t.unsuited.values()) {
            assert!(!seen[r as usize], "rank {r} assigned twice");
            seen[r as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }
}
