//! Deal command handler for single hand dealing and display.
//!
//! Shuffles one deck, deals two hole cards per seat and shows the full
//! board together with the hand each seat would hold at showdown. The same
//! seed always produces the same deal.

use crate::error::CliError;
use holdem_engine::cards::format_cards;
use holdem_engine::deck::{Deck, COMMUNITY_SIZE};
use holdem_engine::game::GameConfig;
use holdem_engine::hand::{evaluate, rank_to_string};
use std::io::Write;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Deck seed; a random one is drawn and printed when absent
/// * `players` - Number of seats to deal, 2 to 23
/// * `out` - Output stream for command results
pub fn handle_deal_command(
    seed: Option<u64>,
    players: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    GameConfig {
        max_players: players,
        ..GameConfig::default()
    }
    .validate()?;

    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    let board = deck.draw(COMMUNITY_SIZE, true)?;
    let holes = (0..players)
        .map(|_| deck.draw(2, false))
        .collect::<Result<Vec<_>, _>>()?;

    writeln!(out, "Seed: {}", seed)?;
    for (seat, hole) in holes.iter().enumerate() {
        let rank = evaluate(hole, &board)?;
        writeln!(
            out,
            "Seat {}: {} ({}, rank {})",
            seat,
            format_cards(hole),
            rank_to_string(rank),
            rank
        )?;
    }
    writeln!(out, "Board: {}", format_cards(&board))?;
    Ok(())
}
