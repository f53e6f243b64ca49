//! Lexical validation shared by the first and second passes: label
//! names and signed integer literals.

use lazy_static::lazy_static;
use regex::Regex;

use crate::instruction;

lazy_static! {
    static ref LABEL_NAME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9]{0,30}$").unwrap();
    static ref INTEGER_LITERAL: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
}

/// A label name must start with a letter, contain only letters and
/// digits, be shorter than 32 characters, and not be a reserved word.
pub fn is_valid_label_name(name: &str) -> bool {
    LABEL_NAME.is_match(name) && !instruction::is_reserved_word(name)
}

pub fn is_integer_literal(token: &str) -> bool {
    INTEGER_LITERAL.is_match(token)
}

pub fn parse_integer_literal(token: &str) -> Option<i64> {
    if is_integer_literal(token) {
        token.parse::<i64>().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(is_valid_label_name("LOOP"));
        assert!(is_valid_label_name("a1"));
    }

    #[test]
    fn rejects_names_starting_with_digit_or_reserved() {
        assert!(!is_valid_label_name("1abc"));
        assert!(!is_valid_label_name("mov"));
        assert!(!is_valid_label_name(".data"));
    }

    #[test]
    fn rejects_names_32_chars_or_longer() {
        let name: String = std::iter::repeat('a').take(32).collect();
        assert!(!is_valid_label_name(&name));
        let name: String = std::iter::repeat('a').take(31).collect();
        assert!(is_valid_label_name(&name));
    }

    #[test]
    fn integer_literal_parsing() {
        assert_eq!(parse_integer_literal("-4"), Some(-4));
        assert_eq!(parse_integer_literal("+5"), Some(5));
        assert_eq!(parse_integer_literal("12"), Some(12));
        assert_eq!(parse_integer_literal("abc"), None);
        assert_eq!(parse_integer_literal("1a"), None);
    }
}
