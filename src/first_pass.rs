//! First pass: walks the expanded line stream, classifies each line,
//! allocates addresses in `ic`/`dc`, lays down the first word of every
//! instruction plus operand placeholders, and populates the symbol
//! table. Direct operands are left as zero words; the second pass
//! resolves them once every label is known.

use crate::context::FileContext;
use crate::directive;
use crate::error::DiagnosticKind;
use crate::instruction::{self, AddressingMethod, EncodingType};
use crate::line::{self, TokenCount};
use crate::operand::{self, OperandRef, ParsedInstruction};
use crate::registers;
use crate::symbol_table::LabelKind;
use crate::validate;

pub fn run(lines: &[String], ctx: &mut FileContext) {
    for (index, raw_line) in lines.iter().enumerate() {
        let line_number = index + 1;
        run_line(raw_line, line_number, ctx);
    }

    if !ctx.diagnostics.has_errors() {
        ctx.symbols.rebase_data(ctx.ic);
    }
}

fn run_line(raw_line: &str, line_number: usize, ctx: &mut FileContext) {
    let mut tokenized = line::tokenize(raw_line);
    if tokenized.count == TokenCount::Zero {
        return;
    }

    let had_label = tokenized.had_label;
    let mut label_name: Option<String> = None;

    if had_label {
        match tokenized.w(2) {
            ".entry" => {
                ctx.diagnostics.report(DiagnosticKind::CantDefineLabelBeforeEntry, line_number);
                return;
            }
            ".extern" => {
                ctx.diagnostics.report(DiagnosticKind::CantDefineLabelBeforeExtern, line_number);
                return;
            }
            _ => {}
        }
        let name = tokenized.w(1).to_string();
        if validate::is_valid_label_name(&name) {
            label_name = Some(name);
        } else {
            ctx.diagnostics.report(DiagnosticKind::InvalidLabelName, line_number);
        }
        tokenized.delete_label();
    }

    let keyword = tokenized.w(1).to_string();
    match keyword.as_str() {
        ".data" => {
            if let Some(name) = &label_name {
                ctx.insert_label(name, ctx.dc, LabelKind::Data, line_number);
            }
            let remainder = directive::remainder_after_keyword(raw_line, had_label);
            let values = directive::parse_data(&remainder, &mut ctx.diagnostics, line_number);
            for value in values {
                ctx.push_data_word((value as u16) & instruction::WORD_MASK, line_number);
            }
        }
        ".string" => {
            if let Some(name) = &label_name {
                ctx.insert_label(name, ctx.dc, LabelKind::Data, line_number);
            }
            let remainder = directive::remainder_after_keyword(raw_line, had_label);
            if let Some(values) = directive::parse_string(&remainder, &mut ctx.diagnostics, line_number) {
                for value in values {
                    ctx.push_data_word((value as u16) & instruction::WORD_MASK, line_number);
                }
            }
        }
        ".extern" => {
            let remainder = directive::remainder_after_keyword(raw_line, had_label);
            let names = directive::parse_label_list(
                &remainder,
                &mut ctx.diagnostics,
                line_number,
                DiagnosticKind::MustProvideLabelsToExtern,
            );
            if !names.is_empty() {
                ctx.has_externs = true;
            }
            for name in names {
                ctx.insert_label(&name, 0, LabelKind::Extern, line_number);
            }
        }
        ".entry" => {
            // No-op in the first pass: entry promotion needs every label to
            // already be known, which only holds once the second pass runs.
        }
        _ => {
            if let Some(name) = &label_name {
                ctx.insert_label(name, ctx.ic, LabelKind::Code, line_number);
            }
            if let Some(parsed) = operand::parse_instruction(&tokenized, &mut ctx.diagnostics, line_number) {
                lay_down_instruction(&parsed, line_number, ctx);
            }
        }
    }
}

fn lay_down_instruction(parsed: &ParsedInstruction, line_number: usize, ctx: &mut FileContext) {
    let source_method = parsed.source.as_ref().map(|o| o.method).unwrap_or(AddressingMethod::NotPresent);
    let destination_method = parsed
        .destination
        .as_ref()
        .map(|o| o.method)
        .unwrap_or(AddressingMethod::NotPresent);

    let first_word = instruction::pack_first_word(
        EncodingType::Absolute,
        destination_method,
        parsed.opcode,
        source_method,
    );
    ctx.push_code_word(first_word, line_number);

    if source_method == AddressingMethod::Register && destination_method == AddressingMethod::Register {
        let source_digit = register_digit(parsed.source.as_ref().unwrap());
        let destination_digit = register_digit(parsed.destination.as_ref().unwrap());
        let word = instruction::pack_register_word(EncodingType::Absolute, destination_digit, source_digit);
        ctx.push_code_word(word, line_number);
        return;
    }

    if let Some(source) = &parsed.source {
        if let Some(word) = operand_placeholder_word(source, Role::Source) {
            ctx.push_code_word(word, line_number);
        }
    }
    if let Some(destination) = &parsed.destination {
        if let Some(word) = operand_placeholder_word(destination, Role::Destination) {
            ctx.push_code_word(word, line_number);
        }
    }
}

enum Role {
    Source,
    Destination,
}

/// The word laid down for a single (non register-pair) operand in the
/// first pass: registers and immediates are already final; a direct
/// (label) operand is a zero placeholder until the second pass.
fn operand_placeholder_word(operand: &OperandRef, role: Role) -> Option<instruction::Word> {
    match operand.method {
        AddressingMethod::Register => {
            let digit = register_digit(operand);
            Some(match role {
                Role::Source => instruction::pack_register_word(EncodingType::Absolute, 0, digit),
                Role::Destination => instruction::pack_register_word(EncodingType::Absolute, digit, 0),
            })
        }
        AddressingMethod::Immediate => {
            let value = validate::parse_integer_literal(&operand.token).unwrap_or(0);
            Some(instruction::pack_immediate_word(EncodingType::Absolute, value))
        }
        AddressingMethod::Direct => Some(0),
        AddressingMethod::NotPresent => None,
    }
}

fn register_digit(operand: &OperandRef) -> u8 {
    registers::parse_register(&operand.token)
        .map(|r| r.digit())
        .unwrap_or(0)
}
