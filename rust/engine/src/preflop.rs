//! Two-card strength table used before the flop.
//!
//! Boards are sampled at random and shared by every starting hand. On each
//! board every hole-card combo is scored exactly against every opponent
//! combo left in the deck, so the only noise comes from the boards, and it
//! is common to all classes. Classes are then ordered by equity and each
//! gets the fraction of all 1326 starting combos it beats. The simulation
//! runs once per process from a fixed seed, so the table is identical every
//! time.

use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cards::{full_deck, Card};
use crate::hand::evaluate_five;

const BOARDS: usize = 2000;
const SEED: u64 = 0x2C4D_7A11;
const COMBOS: f64 = 1326.0;

/// Cards left after a board is dealt.
const LEFT: usize = 47;
/// Opponent combos for one hero combo on one board: C(45, 2).
const OPPONENTS: f64 = 990.0;

/// Percentiles in a 13x13 grid: `[high][low]` suited, `[low][high]` offsuit,
/// pairs on the diagonal.
#[derive(Debug)]
pub struct PreflopTable {
    grid: [[f64; 13]; 13],
}

static TABLE: OnceLock<PreflopTable> = OnceLock::new();

pub fn table() -> &'static PreflopTable {
    TABLE.get_or_init(PreflopTable::simulate)
}

/// Grid cell of a starting hand.
fn cell(a: Card, b: Card) -> (usize, usize) {
    let (x, y) = (a.rank().index(), b.rank().index());
    let (high, low) = if x >= y { (x, y) } else { (y, x) };
    if a.suit() == b.suit() {
        (high, low)
    } else {
        (low, high)
    }
}

/// Starting combos that fall in a cell.
fn combos_in(row: usize, col: usize) -> f64 {
    match row.cmp(&col) {
        std::cmp::Ordering::Equal => 6.0,
        std::cmp::Ordering::Greater => 4.0,
        std::cmp::Ordering::Less => 12.0,
    }
}

impl PreflopTable {
    /// Fraction of starting hands this one beats, in `[0, 1]`.
    pub fn percentile(&self, a: Card, b: Card) -> f64 {
        let (row, col) = cell(a, b);
        self.grid[row][col]
    }

    fn simulate() -> Self {
        let deck = full_deck();
        let mut rng = ChaCha8Rng::seed_from_u64(SEED);
        let mut order: Vec<usize> = (0..deck.len()).collect();
        let mut won = [[0.0; 13]; 13];
        let mut played = [[0.0; 13]; 13];

        for _ in 0..BOARDS {
            order.shuffle(&mut rng);
            let board = [
                deck[order[0]],
                deck[order[1]],
                deck[order[2]],
                deck[order[3]],
                deck[order[4]],
            ];
            let left: Vec<Card> = order[5..].iter().map(|&i| deck[i]).collect();
            let showdown = Showdown::new(&board, &left);
            for i in 0..LEFT {
                for j in i + 1..LEFT {
                    let (row, col) = cell(left[i], left[j]);
                    won[row][col] += showdown.score(i, j);
                    played[row][col] += OPPONENTS;
                }
            }
        }

        let mut equity = [[0.0; 13]; 13];
        for row in 0..13 {
            for col in 0..13 {
                equity[row][col] = if played[row][col] > 0.0 {
                    won[row][col] / played[row][col]
                } else {
                    0.5
                };
            }
        }

        let mut grid = [[0.0; 13]; 13];
        for row in 0..13 {
            for col in 0..13 {
                let mine = equity[row][col];
                let (mut weaker, mut level) = (0.0, 0.0);
                for (r, line) in equity.iter().enumerate() {
                    for (c, &theirs) in line.iter().enumerate() {
                        if theirs < mine {
                            weaker += combos_in(r, c);
                        } else if theirs == mine {
                            level += combos_in(r, c);
                        }
                    }
                }
                grid[row][col] = (weaker + level / 2.0) / COMBOS;
            }
        }
        tracing::debug!(boards = BOARDS, "built preflop table");
        Self { grid }
    }
}

/// Seven-card ranks of every two-card combo on one fixed board.
struct Showdown {
    /// `rank[i * LEFT + j]`, symmetric, for the cards left after the board
    rank: Vec<u16>,
    /// Every combo's rank, ascending
    sorted: Vec<u16>,
}

impl Showdown {
    fn new(board: &[Card; 5], left: &[Card]) -> Self {
        let on_board = evaluate_five(board).get();
        // Best hand using the board and one extra card.
        let best_six: Vec<u16> = left
            .iter()
            .map(|&x| {
                (0..5)
                    .map(|skip| {
                        let mut five = *board;
                        five[skip] = x;
                        evaluate_five(&five).get()
                    })
                    .fold(on_board, u16::min)
            })
            .collect();

        let mut triples = Vec::with_capacity(10);
        for a in 0..5 {
            for b in a + 1..5 {
                for c in b + 1..5 {
                    triples.push([board[a], board[b], board[c]]);
                }
            }
        }

        let mut rank = vec![0u16; LEFT * LEFT];
        let mut sorted = Vec::with_capacity(LEFT * (LEFT - 1) / 2);
        for i in 0..LEFT {
            for j in i + 1..LEFT {
                let both = triples
                    .iter()
                    .map(|t| evaluate_five(&[t[0], t[1], t[2], left[i], left[j]]).get())
                    .fold(best_six[i].min(best_six[j]), u16::min);
                rank[i * LEFT + j] = both;
                rank[j * LEFT + i] = both;
                sorted.push(both);
            }
        }
        sorted.sort_unstable();
        Self { rank, sorted }
    }

    fn rank(&self, i: usize, j: usize) -> u16 {
        self.rank[i * LEFT + j]
    }

    /// Wins plus half the ties of combo `(i, j)` against every opponent
    /// combo that shares no card with it.
    fn score(&self, i: usize, j: usize) -> f64 {
        let mine = self.rank(i, j);
        let mut better = self.sorted.partition_point(|&r| r < mine);
        let mut tied = self.sorted.partition_point(|&r| r <= mine) - better;
        // Drop the combos holding one of our cards, ourselves included.
        for x in 0..LEFT {
            for (held, other) in [(i, x != i), (j, x != i && x != j)] {
                if !other {
                    continue;
                }
                let theirs = self.rank(held, x);
                if theirs < mine {
                    better -= 1;
                } else if theirs == mine {
                    tied -= 1;
                }
            }
        }
        let beaten = OPPONENTS - (better + tied) as f64;
        beaten + tied as f64 / 2.0
    }
}
