//! Small helpers for consistent terminal output.

use std::io::Write;

use holdem_engine::cards::{format_cards, Card};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// `"-"` for an empty list, otherwise space separated cards.
pub fn cards_or_dash(cards: &[Card]) -> String {
    if cards.is_empty() {
        "-".to_string()
    } else {
        format_cards(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    #[test]
    fn prefixes_messages() {
        let mut err = Vec::new();
        write_error(&mut err, "boom").unwrap();
        display_warning(&mut err, "careful").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "Error: boom\nWARNING: careful\n");
    }

    #[test]
    fn formats_card_lists() {
        assert_eq!(cards_or_dash(&[]), "-");
        assert_eq!(cards_or_dash(&parse_cards("As Td").unwrap()), "As Td");
    }
}
