//! Simulation command handler.
//!
//! Seats the configured agents at one table and plays a number of hands
//! through the engine driver. Prints a per-seat summary, or one JSON object
//! per hand with `--json`.

use crate::config;
use crate::error::CliError;
use crate::ui;
use holdem_ai::create_agent;
use holdem_engine::agent::Agent;
use holdem_engine::engine::{Engine, HandOutcome};
use std::io::Write;
use tracing::info;

/// Handle the sim command.
///
/// # Arguments
///
/// * `hands` - Number of hands to play, at least 1
/// * `seed` - Overrides the configured seed; a random seed is used when
///   neither is set
/// * `json` - Write each `HandOutcome` as a JSON line instead of a summary
/// * `out` - Output stream for results
/// * `err` - Output stream for warnings
pub fn handle_sim_command(
    hands: usize,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    simulate(&resolved.config, hands, seed, json, out, err)
}

fn simulate(
    cfg: &config::Config,
    hands: usize,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let agents = cfg
        .agents
        .iter()
        .enumerate()
        .map(|(seat, kind)| {
            create_agent(kind, seed.wrapping_add(seat as u64))
                .ok_or_else(|| CliError::Config(format!("unknown agent {:?}", kind)))
        })
        .collect::<Result<Vec<Box<dyn Agent>>, _>>()?;
    let mut engine = Engine::new(cfg.game_config(seed), agents)?;

    let mut totals = SeatTotals::new(cfg.players);
    for _ in 0..hands {
        let outcome = engine.play_hand()?;
        if json {
            let line = serde_json::to_string(&outcome).map_err(std::io::Error::other)?;
            writeln!(out, "{}", line)?;
        }
        totals.add(&outcome);
    }

    let game = engine.game();
    info!(
        hands,
        seed,
        corrections = totals.corrections,
        restarts = game.game_restarts(),
        "simulation finished"
    );
    if totals.corrections > 0 {
        ui::display_warning(
            err,
            &format!("{} illegal proposals were replaced", totals.corrections),
        )?;
    }
    if json {
        return Ok(());
    }

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Hands: {}", hands)?;
    for (seat, name) in engine.agent_names().iter().enumerate() {
        writeln!(
            out,
            "Seat {} ({}): net {:+}, pots won {}, stack {}",
            seat,
            name,
            totals.net[seat],
            totals.pots_won[seat],
            game.players()[seat].chips()
        )?;
    }
    writeln!(out, "Restarts: {}", game.game_restarts())?;
    writeln!(out, "Corrections: {}", totals.corrections)?;
    Ok(())
}

struct SeatTotals {
    net: Vec<i64>,
    pots_won: Vec<u32>,
    corrections: u32,
}

impl SeatTotals {
    fn new(seats: usize) -> Self {
        Self {
            net: vec![0; seats],
            pots_won: vec![0; seats],
            corrections: 0,
        }
    }

    fn add(&mut self, outcome: &HandOutcome) {
        for (total, delta) in self.net.iter_mut().zip(&outcome.chip_deltas) {
            *total += delta;
        }
        for award in outcome.pot_winners.values() {
            for &seat in &award.winners {
                self.pots_won[seat] += 1;
            }
        }
        self.corrections += outcome.corrections;
    }
}
