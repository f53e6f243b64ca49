//! Second pass: re-walks the expanded line stream with `ic` reset to
//! base, processes `.entry` directives now that every label is known,
//! and fills in direct-operand words with either relocatable or
//! external encoding.

use crate::context::FileContext;
use crate::directive;
use crate::error::DiagnosticKind;
use crate::instruction::{self, AddressingMethod, EncodingType, BASE};
use crate::line::{self, TokenCount};
use crate::operand::{self, OperandRef};
use crate::symbol_table::LabelKind;

pub fn run(lines: &[String], ctx: &mut FileContext) {
    ctx.ic = BASE;
    for (index, raw_line) in lines.iter().enumerate() {
        let line_number = index + 1;
        run_line(raw_line, line_number, ctx);
    }
}

fn run_line(raw_line: &str, line_number: usize, ctx: &mut FileContext) {
    let mut tokenized = line::tokenize(raw_line);
    if tokenized.count == TokenCount::Zero {
        return;
    }

    let had_label = tokenized.had_label;
    if had_label {
        tokenized.delete_label();
    }

    let keyword = tokenized.w(1).to_string();
    match keyword.as_str() {
        ".data" | ".string" | ".extern" => {}
        ".entry" => {
            let remainder = directive::remainder_after_keyword(raw_line, had_label);
            let names = directive::parse_label_list(
                &remainder,
                &mut ctx.diagnostics,
                line_number,
                DiagnosticKind::MustProvideLabelsToEntry,
            );
            for name in names {
                if ctx.symbols.promote_to_entry(&name).is_err() {
                    ctx.diagnostics.report(DiagnosticKind::CantFindLabelToEntry, line_number);
                }
            }
        }
        _ => {
            if let Some(parsed) = operand::parse_instruction_quiet(&tokenized) {
                resolve_instruction(&parsed.source, &parsed.destination, line_number, ctx);
            }
        }
    }
}

fn resolve_instruction(
    source: &Option<OperandRef>,
    destination: &Option<OperandRef>,
    line_number: usize,
    ctx: &mut FileContext,
) {
    ctx.ic += 1; // first word, already finalised in the first pass

    let source_method = source.as_ref().map(|o| o.method);
    let destination_method = destination.as_ref().map(|o| o.method);

    if source_method == Some(AddressingMethod::Register) && destination_method == Some(AddressingMethod::Register) {
        ctx.ic += 1; // one combined register word, not two
        return;
    }

    for operand in [source.as_ref(), destination.as_ref()].into_iter().flatten() {
        match operand.method {
            AddressingMethod::Register | AddressingMethod::Immediate => {
                ctx.ic += 1;
            }
            AddressingMethod::Direct => {
                resolve_direct_operand(operand, line_number, ctx);
            }
            AddressingMethod::NotPresent => {}
        }
    }
}

fn resolve_direct_operand(operand: &OperandRef, line_number: usize, ctx: &mut FileContext) {
    let index = ctx.ic - BASE;
    match ctx.symbols.lookup(&operand.token) {
        None => {
            ctx.diagnostics.report(DiagnosticKind::LabelNotFound, line_number);
        }
        Some(record) => {
            let encoding = if matches!(record.kind, LabelKind::Extern) {
                EncodingType::External
            } else {
                EncodingType::Relocatable
            };
            let word = instruction::pack_relocation_word(encoding, record.address);
            if let Some(slot) = ctx.code.get_mut(index) {
                *slot = word;
            }
            if matches!(record.kind, LabelKind::Extern) {
                ctx.extern_uses.push((operand.token.clone(), ctx.ic));
            }
        }
    }
    ctx.ic += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_pass;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn entry_promotes_label_kind() {
        let src = lines(".entry M\nM: add @r1,@r2\n");
        let mut ctx = FileContext::new();
        first_pass::run(&src, &mut ctx);
        run(&src, &mut ctx);
        assert!(!ctx.diagnostics.has_errors());
        let record = ctx.symbols.lookup("M").unwrap();
        assert!(matches!(record.kind, LabelKind::Entry));
        assert_eq!(record.address, instruction::BASE);
    }

    #[test]
    fn extern_use_site_recorded_with_ic_at_use() {
        let src = lines(".extern K\njmp K\n");
        let mut ctx = FileContext::new();
        first_pass::run(&src, &mut ctx);
        run(&src, &mut ctx);
        assert!(!ctx.diagnostics.has_errors());
        assert_eq!(ctx.extern_uses, vec![("K".to_string(), instruction::BASE + 1)]);
    }

    #[test]
    fn missing_label_on_direct_operand_is_reported() {
        let src = lines("jmp NOWHERE\n");
        let mut ctx = FileContext::new();
        first_pass::run(&src, &mut ctx);
        run(&src, &mut ctx);
        assert!(ctx.diagnostics.has_errors());
    }

    #[test]
    fn entry_naming_unknown_label_is_reported() {
        let src = lines(".entry GHOST\nstop\n");
        let mut ctx = FileContext::new();
        first_pass::run(&src, &mut ctx);
        run(&src, &mut ctx);
        assert!(ctx
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::CantFindLabelToEntry));
    }
}
