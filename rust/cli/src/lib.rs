//! # holdem CLI Library
//!
//! Command-line front end for the Hold'em engine. The binary is a thin
//! wrapper around [`run`], which parses arguments, dispatches to a command
//! handler and returns the process exit code.
//!
//! ## Example Usage
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = holdem_cli::run(["holdem", "eval", "--hand", "As Ks"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Rank:"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal one hand for inspection
//! - `eval`: Rank hole cards with or without a board
//! - `sim`: Play hands between the configured agents
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{COMMANDS, Commands, HoldemCli};
use commands::{handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command};

pub use error::CliError;

/// Main CLI entry point.
///
/// Help and version go to `out` with exit code 0. Parse failures print the
/// clap message and a command list to `err` and return 2. Command failures
/// print `Error: ...` to `err` and return 2.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string());
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        Commands::Eval { hand, board } => handle_eval_command(&hand, board.as_deref(), out),
        Commands::Sim { hands, seed, json } => handle_sim_command(hands, seed, json, out, err),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "{}", message)?;
    writeln!(err)?;
    writeln!(err, "Hold'em CLI")?;
    writeln!(err, "Usage: holdem <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem --help")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, err) = run_args(&["holdem", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(err.is_empty());
        for cmd in COMMANDS {
            assert!(out.contains(cmd), "help should list `{}`", cmd);
        }
    }

    #[test]
    fn unknown_command_prints_usage() {
        let (code, out, err) = run_args(&["holdem", "shuffle"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert!(err.contains("Usage: holdem <command> [options]"));
        assert!(err.contains("  sim"));
    }

    #[test]
    fn command_errors_are_reported() {
        let (code, _, err) = run_args(&["holdem", "eval", "--hand", "Zz"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.starts_with("Error: "), "{err}");
    }
}
