//! Hand ranking command.
//!
//! With a board the best five-card hand is ranked exactly. Without one the
//! hole cards are placed on the same 1..=7462 scale through the preflop
//! table, so only the rank and percentile are shown.

use crate::error::CliError;
use crate::ui;
use holdem_engine::cards::{format_cards, parse_cards, Card};
use holdem_engine::hand::{evaluate, percentile, rank_to_string};
use std::io::Write;

/// Handle the eval command.
///
/// # Errors
///
/// `CliError::InvalidInput` for unparsable cards or a card given twice,
/// `CliError::Engine` when the card counts cannot be ranked.
pub fn handle_eval_command(
    hand: &str,
    board: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let hole = parse_list("hand", hand)?;
    let board = match board {
        Some(b) => parse_list("board", b)?,
        None => Vec::new(),
    };
    if let Some(dup) = first_duplicate(hole.iter().chain(&board)) {
        return Err(CliError::InvalidInput(format!("{} appears twice", dup)));
    }

    let rank = evaluate(&hole, &board)?;
    writeln!(out, "Hand: {}", format_cards(&hole))?;
    writeln!(out, "Board: {}", ui::cards_or_dash(&board))?;
    writeln!(out, "Rank: {}", rank)?;
    if !board.is_empty() {
        writeln!(out, "Class: {}", rank_to_string(rank))?;
    }
    writeln!(out, "Percentile: {:.4}", percentile(rank))?;
    Ok(())
}

fn parse_list(what: &str, text: &str) -> Result<Vec<Card>, CliError> {
    parse_cards(text).map_err(|e| CliError::InvalidInput(format!("{}: {}", what, e)))
}

fn first_duplicate<'a>(cards: impl Iterator<Item = &'a Card>) -> Option<Card> {
    let mut seen = std::collections::HashSet::new();
    cards.copied().find(|c| !seen.insert(*c))
}
