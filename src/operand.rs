//! Operand parsing shared, byte for byte, between the first and second
//! passes: the parse is deterministic, so both passes call the same
//! function and always agree on addressing methods.

use crate::error::{DiagnosticKind, DiagnosticsBus};
use crate::instruction::{self, AddressingMethod, Opcode, OperandGroup};
use crate::line::{TokenCount, TokenizedLine};
use crate::registers;
use crate::validate;

#[derive(Debug, Clone)]
pub struct OperandRef {
    pub token: String,
    pub method: AddressingMethod,
}

#[derive(Debug, Clone)]
pub struct ParsedInstruction {
    pub opcode: Opcode,
    pub source: Option<OperandRef>,
    pub destination: Option<OperandRef>,
}

/// Classifies a single operand token by inspection: a register name, a
/// signed integer literal, or (by elimination) a label reference.
pub fn classify_operand(token: &str) -> AddressingMethod {
    if registers::is_register_name(token) {
        AddressingMethod::Register
    } else if validate::is_integer_literal(token) {
        AddressingMethod::Immediate
    } else {
        AddressingMethod::Direct
    }
}

fn token_count(count: TokenCount) -> usize {
    match count {
        TokenCount::Zero => 0,
        TokenCount::One => 1,
        TokenCount::Two => 2,
        TokenCount::Three => 3,
        TokenCount::Four => 4,
        TokenCount::Five => 5,
        TokenCount::TooMany => 6,
    }
}

#[derive(Default)]
struct ParseOutcome {
    parsed: Option<ParsedInstruction>,
    diagnostics: Vec<DiagnosticKind>,
}

/// The pure parsing core: no side effects, so the second pass can
/// re-derive the exact same addressing methods without re-reporting
/// diagnostics the first pass already raised for this line.
fn try_parse_instruction(line: &TokenizedLine) -> ParseOutcome {
    let mut out = ParseOutcome::default();

    let mnemonic = line.w(1);
    let opcode = match Opcode::from_mnemonic(mnemonic) {
        Some(op) => op,
        None => {
            out.diagnostics.push(DiagnosticKind::InstructionNameNotExist);
            return out;
        }
    };

    let count = token_count(line.count);
    let too_many = matches!(line.count, TokenCount::Five | TokenCount::TooMany);

    let parsed = match opcode.operand_group() {
        OperandGroup::Two => {
            if count != 4 {
                out.diagnostics
                    .push(DiagnosticKind::InstructionShouldReceiveTwoOperands);
                None
            } else if line.w(3) != "," {
                out.diagnostics
                    .push(DiagnosticKind::CommaRequiredBetweenOperands);
                None
            } else {
                Some(ParsedInstruction {
                    opcode,
                    source: Some(make_operand(line.w(2))),
                    destination: Some(make_operand(line.w(4))),
                })
            }
        }
        OperandGroup::One => {
            if count != 2 {
                out.diagnostics
                    .push(DiagnosticKind::InstructionShouldReceiveOneOperand);
                None
            } else {
                Some(ParsedInstruction {
                    opcode,
                    source: None,
                    destination: Some(make_operand(line.w(2))),
                })
            }
        }
        OperandGroup::Zero => {
            if count != 1 {
                out.diagnostics
                    .push(DiagnosticKind::InstructionShouldNotReceiveOperands);
                None
            } else {
                Some(ParsedInstruction {
                    opcode,
                    source: None,
                    destination: None,
                })
            }
        }
    };

    if too_many {
        out.diagnostics.push(DiagnosticKind::TooMuchWordsForInstruction);
        return out;
    }

    let parsed = match parsed {
        Some(p) => p,
        None => return out,
    };

    let source_method = parsed.source.as_ref().map(|o| o.method);
    let destination_method = parsed.destination.as_ref().map(|o| o.method);
    if !instruction::validate_operand_methods(opcode, source_method, destination_method) {
        out.diagnostics
            .push(DiagnosticKind::InvalidAddressMethodForInstruction);
        return out;
    }

    out.parsed = Some(parsed);
    out
}

/// Parses an instruction line (label already stripped, `w1` is the
/// mnemonic), reporting any diagnostics into `diagnostics`. Returns
/// `None` if any diagnostic was raised; the caller should then skip
/// word emission for this line but keep processing later lines.
pub fn parse_instruction(
    line: &TokenizedLine,
    diagnostics: &mut DiagnosticsBus,
    line_number: usize,
) -> Option<ParsedInstruction> {
    let outcome = try_parse_instruction(line);
    for kind in outcome.diagnostics {
        diagnostics.report(kind, line_number);
    }
    outcome.parsed
}

/// Re-derives the same parse as [`parse_instruction`] without
/// reporting diagnostics again. Used by the second pass, which only
/// needs the addressing methods it already validated in the first pass.
pub fn parse_instruction_quiet(line: &TokenizedLine) -> Option<ParsedInstruction> {
    try_parse_instruction(line).parsed
}

fn make_operand(token: &str) -> OperandRef {
    OperandRef {
        token: token.to_string(),
        method: classify_operand(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::tokenize;

    #[test]
    fn two_operand_register_pair() {
        let mut bus = DiagnosticsBus::new();
        let line = tokenize("mov @r1,@r2");
        let parsed = parse_instruction(&line, &mut bus, 1).unwrap();
        assert!(!bus.has_errors());
        assert_eq!(parsed.source.unwrap().method, AddressingMethod::Register);
        assert_eq!(parsed.destination.unwrap().method, AddressingMethod::Register);
    }

    #[test]
    fn wrong_operand_count_for_two_operand_group() {
        let mut bus = DiagnosticsBus::new();
        let line = tokenize("mov @r1 @r2");
        assert!(parse_instruction(&line, &mut bus, 1).is_none());
        assert!(bus.has_errors());
    }

    #[test]
    fn missing_comma_between_operands() {
        let mut bus = DiagnosticsBus::new();
        let line = tokenize("mov @r1 @r2 @r3");
        assert!(parse_instruction(&line, &mut bus, 1).is_none());
        assert_eq!(bus.iter().next().unwrap().kind, DiagnosticKind::CommaRequiredBetweenOperands);
    }

    #[test]
    fn one_operand_instruction() {
        let mut bus = DiagnosticsBus::new();
        let line = tokenize("inc @r1");
        let parsed = parse_instruction(&line, &mut bus, 1).unwrap();
        assert!(parsed.source.is_none());
        assert_eq!(parsed.destination.unwrap().method, AddressingMethod::Register);
    }

    #[test]
    fn zero_operand_instruction_rejects_operands() {
        let mut bus = DiagnosticsBus::new();
        let line = tokenize("stop @r1");
        assert!(parse_instruction(&line, &mut bus, 1).is_none());
        assert!(bus.has_errors());
    }

    #[test]
    fn unknown_opcode_is_a_diagnostic() {
        let mut bus = DiagnosticsBus::new();
        let line = tokenize("frobnicate @r1");
        assert!(parse_instruction(&line, &mut bus, 1).is_none());
        assert!(bus.has_errors());
    }

    #[test]
    fn too_many_tokens_still_reports_specific_arity_error_too() {
        let mut bus = DiagnosticsBus::new();
        let line = tokenize("mov @r1,@r2,@r3,@r4");
        assert!(parse_instruction(&line, &mut bus, 1).is_none());
        assert_eq!(bus.count(), 2);
    }
}
