//! Error types for the CLI application.
//!
//! Command handlers return [`CliError`]; [`crate::run`] prints it and maps
//! every variant to [`crate::exit_code::ERROR`].

use std::fmt;

use holdem_engine::errors::GameError;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// Failure writing to an output stream or reading a file
    Io(std::io::Error),

    /// Bad command arguments, such as an unparsable card list
    InvalidInput(String),

    /// Configuration could not be loaded or failed validation
    Config(String),

    /// The engine rejected an operation
    Engine(GameError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn engine_errors_keep_their_source() {
        let error = CliError::from(GameError::NotEnoughPlayers);
        assert_eq!(
            error.to_string(),
            "Engine error: Not enough players with chips to start a hand"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn config_errors_are_flattened_to_text() {
        let error = CliError::from(ConfigError::Invalid("players must be >= 2".into()));
        assert!(matches!(error, CliError::Config(ref m) if m.contains("players must be >= 2")));
    }
}
