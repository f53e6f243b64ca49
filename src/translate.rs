//! Ties the macro expander and the two passes into the translation
//! core's public contract: raw source lines in, translated artefacts
//! (or a diagnostic count) out. One call per input file; no state
//! survives past the returned [`TranslationResult`].

use crate::context::FileContext;
use crate::error::DiagnosticsBus;
use crate::first_pass;
use crate::macro_table;
use crate::object;
use crate::second_pass;

pub struct TranslationResult {
    pub expanded_lines: Vec<String>,
    pub error_count: usize,
    pub object: Option<String>,
    pub entries: Option<String>,
    pub externs: Option<String>,
    pub diagnostics: DiagnosticsBus,
}

impl TranslationResult {
    pub fn succeeded(&self) -> bool {
        self.error_count == 0
    }
}

/// Runs the full translation core over one file's raw source lines:
/// macro expansion, first pass, second pass, and (only if no diagnostic
/// fired anywhere along the way) artefact rendering.
pub fn translate(raw_lines: &[String]) -> TranslationResult {
    let mut ctx = FileContext::new();

    let expanded_lines = macro_table::expand(raw_lines, &mut ctx.diagnostics);

    first_pass::run(&expanded_lines, &mut ctx);
    // The second pass still runs even after a first-pass failure, so that
    // independent diagnostics later in the file are also reported; only
    // artefact emission is suppressed.
    second_pass::run(&expanded_lines, &mut ctx);

    let error_count = ctx.diagnostics.count();

    if error_count > 0 {
        return TranslationResult {
            expanded_lines,
            error_count,
            object: None,
            entries: None,
            externs: None,
            diagnostics: ctx.diagnostics,
        };
    }

    let object_text = object::render_object(&ctx);
    let entries = if ctx.symbols.has_any_entries() {
        Some(ctx.symbols.entry_listing())
    } else {
        None
    };
    let externs = if ctx.has_externs && !ctx.extern_uses.is_empty() {
        Some(object::render_extern_listing(&ctx))
    } else {
        None
    };

    TranslationResult {
        expanded_lines,
        error_count,
        object: Some(object_text),
        entries,
        externs,
        diagnostics: ctx.diagnostics,
    }
}
