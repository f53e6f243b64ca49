//! Macro expander: a streaming transducer that flattens `mcro`/`endmcro`
//! bodies into a single expanded line stream. Non-recursive: a macro body
//! is copied verbatim and is never re-scanned for further invocations.

use std::collections::HashMap;

use crate::error::{DiagnosticKind, DiagnosticsBus};
use crate::instruction;

#[derive(Debug, Clone)]
pub struct MacroRecord {
    pub name: String,
    pub body: Vec<String>,
}

enum State {
    Outside,
    InsideBody(String),
}

/// Consumes raw source lines and returns the expanded line stream. Every
/// solitary occurrence of a defined macro name (the first whitespace
/// token on a line) is replaced by that macro's body; definition lines
/// are suppressed.
pub fn expand(lines: &[String], diagnostics: &mut DiagnosticsBus) -> Vec<String> {
    let mut macros: HashMap<String, MacroRecord> = HashMap::new();
    let mut expanded = Vec::with_capacity(lines.len());
    let mut state = State::Outside;
    let mut pending_body: Vec<String> = Vec::new();

    for (index, raw_line) in lines.iter().enumerate() {
        let line_number = index + 1;
        let first_token = raw_line.split_whitespace().next().unwrap_or("");

        match &state {
            State::Outside => {
                if first_token == "mcro" {
                    let name = raw_line
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("")
                        .to_string();
                    state = State::InsideBody(name);
                    pending_body.clear();
                } else if let Some(record) = macros.get(first_token) {
                    expanded.extend(record.body.iter().cloned());
                } else {
                    expanded.push(raw_line.clone());
                }
            }
            State::InsideBody(name) => {
                if first_token == "mcro" {
                    diagnostics.report(DiagnosticKind::NestedMacroDefinition, line_number);
                } else if first_token == "endmcro" {
                    let name = name.clone();
                    if instruction::is_reserved_word(&name) {
                        diagnostics.report(
                            DiagnosticKind::MacroNameIsInstructionOrDirective,
                            line_number,
                        );
                    } else if macros.contains_key(&name) {
                        diagnostics.report(DiagnosticKind::MacroAlreadyExists, line_number);
                    } else {
                        macros.insert(
                            name.clone(),
                            MacroRecord {
                                name,
                                body: std::mem::take(&mut pending_body),
                            },
                        );
                    }
                    pending_body.clear();
                    state = State::Outside;
                } else {
                    pending_body.push(raw_line.clone());
                }
            }
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn expansion_is_identity_without_macros() {
        let mut bus = DiagnosticsBus::new();
        let src = lines("mov @r1,@r2\nstop\n");
        let out = expand(&src, &mut bus);
        assert_eq!(out, src);
        assert!(!bus.has_errors());
    }

    #[test]
    fn defined_macro_is_flattened_at_each_invocation() {
        let mut bus = DiagnosticsBus::new();
        let src = lines("mcro m\ninc @r1\ndec @r1\nendmcro\nm\nstop\nm\n");
        let out = expand(&src, &mut bus);
        assert_eq!(
            out,
            lines("inc @r1\ndec @r1\nstop\ninc @r1\ndec @r1\n")
        );
        assert!(!bus.has_errors());
    }

    #[test]
    fn nested_macro_definition_is_a_diagnostic() {
        let mut bus = DiagnosticsBus::new();
        let src = lines("mcro m\nmcro n\nendmcro\nendmcro\n");
        expand(&src, &mut bus);
        assert!(bus.has_errors());
    }

    #[test]
    fn duplicate_macro_name_is_a_diagnostic() {
        let mut bus = DiagnosticsBus::new();
        let src = lines("mcro m\ninc @r1\nendmcro\nmcro m\ndec @r1\nendmcro\n");
        expand(&src, &mut bus);
        assert!(bus.has_errors());
    }

    #[test]
    fn reserved_word_as_macro_name_is_a_diagnostic() {
        let mut bus = DiagnosticsBus::new();
        let src = lines("mcro mov\ninc @r1\nendmcro\n");
        expand(&src, &mut bus);
        assert!(bus.has_errors());
    }
}
