//! Parsing for `.data`, `.string`, `.extern`, `.entry` operand lists.
//! These operate on the raw remainder of the line rather than the
//! five-slot tokenizer, since a `.data` list is not bounded to five
//! values and a `.string` literal must keep its internal whitespace.

use crate::error::{DiagnosticKind, DiagnosticsBus};
use crate::validate;

/// Returns the line text that follows the label (if any) and the
/// directive/instruction keyword, with leading whitespace trimmed and
/// everything else preserved verbatim.
pub fn remainder_after_keyword(raw_line: &str, had_label: bool) -> String {
    let mut rest = raw_line.trim_start();
    if had_label {
        rest = match rest.find(char::is_whitespace) {
            Some(idx) => rest[idx..].trim_start(),
            None => "",
        };
    }
    match rest.find(char::is_whitespace) {
        Some(idx) => rest[idx..].trim_start().to_string(),
        None => String::new(),
    }
}

/// Walks a comma-separated list, reporting `InvalidCommaPosition` for a
/// leading/double/trailing comma and `CommaRequiredBetweenValues` for
/// two adjacent values with no comma between them. Processing continues
/// past each local error so independent mistakes are all reported.
fn parse_comma_list<T>(
    remainder: &str,
    diagnostics: &mut DiagnosticsBus,
    line_number: usize,
    empty_kind: DiagnosticKind,
    invalid_item_kind: DiagnosticKind,
    mut validate_item: impl FnMut(&str) -> Option<T>,
) -> Vec<T> {
    let normalised = remainder.replace(',', " , ");
    let tokens: Vec<&str> = normalised.split_whitespace().collect();
    let mut items = Vec::new();

    if tokens.is_empty() {
        diagnostics.report(empty_kind, line_number);
        return items;
    }

    for (i, tok) in tokens.iter().enumerate() {
        if *tok == "," {
            if i == 0 || tokens[i - 1] == "," {
                diagnostics.report(DiagnosticKind::InvalidCommaPosition, line_number);
            }
        } else {
            if i > 0 && tokens[i - 1] != "," {
                diagnostics.report(DiagnosticKind::CommaRequiredBetweenValues, line_number);
            }
            match validate_item(tok) {
                Some(v) => items.push(v),
                None => diagnostics.report(invalid_item_kind, line_number),
            }
        }
    }

    if tokens.last() == Some(&",") {
        diagnostics.report(DiagnosticKind::InvalidCommaPosition, line_number);
    }

    items
}

/// `.data` operand list: signed integers separated by commas.
pub fn parse_data(remainder: &str, diagnostics: &mut DiagnosticsBus, line_number: usize) -> Vec<i64> {
    parse_comma_list(
        remainder,
        diagnostics,
        line_number,
        DiagnosticKind::MustProvideValuesToData,
        DiagnosticKind::DataNeedNumValue,
        validate::parse_integer_literal,
    )
}

/// `.extern`/`.entry` operand list: label names separated by commas.
pub fn parse_label_list(
    remainder: &str,
    diagnostics: &mut DiagnosticsBus,
    line_number: usize,
    empty_kind: DiagnosticKind,
) -> Vec<String> {
    parse_comma_list(
        remainder,
        diagnostics,
        line_number,
        empty_kind,
        DiagnosticKind::InvalidLabelName,
        |tok| {
            if validate::is_valid_label_name(tok) {
                Some(tok.to_string())
            } else {
                None
            }
        },
    )
}

/// `.string` operand: a double-quoted literal followed by only
/// whitespace. Returns the byte value of each character plus a
/// terminating zero word.
pub fn parse_string(remainder: &str, diagnostics: &mut DiagnosticsBus, line_number: usize) -> Option<Vec<i64>> {
    if !remainder.starts_with('"') {
        diagnostics.report(DiagnosticKind::StringStructureNotValid, line_number);
        return None;
    }
    let rest = &remainder[1..];
    let close_idx = match rest.find('"') {
        Some(idx) => idx,
        None => {
            diagnostics.report(DiagnosticKind::StringMustEndInQuotes, line_number);
            return None;
        }
    };
    let content = &rest[..close_idx];
    let trailing = &rest[close_idx + 1..];
    if !trailing.chars().all(char::is_whitespace) {
        diagnostics.report(DiagnosticKind::StringDirectiveAcceptsOneParameter, line_number);
        return None;
    }

    let mut words: Vec<i64> = content.bytes().map(|b| b as i64).collect();
    words.push(0);
    Some(words)
}
