//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, pairing each value with
//! the layer it came from (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "buy_in": {
//!     "value": 1000,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "buy_in": {
            "value": config.buy_in,
            "source": sources.buy_in,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "buyin_limit": {
            "value": config.buyin_limit,
            "source": sources.buyin_limit,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "agents": {
            "value": config.agents,
            "source": sources.agents,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
