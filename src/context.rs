//! The per-file aggregate threaded through every stage: the two word
//! arrays, both counters, the symbol table, and the diagnostics bus.
//! Created fresh for each `<base>` the driver translates, dropped at the
//! end of that file's translation. There is no state shared between files.

use crate::error::{DiagnosticKind, DiagnosticsBus};
use crate::instruction::{Word, BASE, CAPACITY};
use crate::symbol_table::{LabelKind, SymbolTable};

pub struct FileContext {
    pub code: Vec<Word>,
    pub data: Vec<Word>,
    pub ic: usize,
    pub dc: usize,
    pub symbols: SymbolTable,
    pub diagnostics: DiagnosticsBus,
    pub has_externs: bool,
    /// `(label name, ic at use site)` in encounter order, appended only
    /// during the second pass.
    pub extern_uses: Vec<(String, usize)>,
}

impl FileContext {
    pub fn new() -> Self {
        Self {
            code: Vec::new(),
            data: Vec::new(),
            ic: BASE,
            dc: 0,
            symbols: SymbolTable::new(),
            diagnostics: DiagnosticsBus::new(),
            has_externs: false,
            extern_uses: Vec::new(),
        }
    }

    /// Appends one word to the code array, advancing `ic`. Code and data
    /// share one combined capacity (`ic + dc <= base + capacity`, per the
    /// architecture's single memory image with code and data laid out
    /// back to back), so this checks the combined length of both arrays,
    /// not just the code array's own. Reports `OutOfMemory` and leaves
    /// `ic`/the array untouched if that combined capacity is reached.
    pub fn push_code_word(&mut self, word: Word, line_number: usize) {
        if self.code.len() + self.data.len() >= CAPACITY {
            self.diagnostics.report(DiagnosticKind::OutOfMemory, line_number);
            return;
        }
        self.code.push(word);
        self.ic += 1;
    }

    /// Appends one word to the data array, advancing `dc`. Same combined
    /// overflow behaviour as [`push_code_word`](Self::push_code_word).
    pub fn push_data_word(&mut self, word: Word, line_number: usize) {
        if self.code.len() + self.data.len() >= CAPACITY {
            self.diagnostics.report(DiagnosticKind::OutOfMemory, line_number);
            return;
        }
        self.data.push(word);
        self.dc += 1;
    }

    /// Inserts a label at the given address/kind, reporting
    /// `LabelAlreadyExists` on collision.
    pub fn insert_label(&mut self, name: &str, address: usize, kind: LabelKind, line_number: usize) {
        if self.symbols.insert(name, address, kind).is_err() {
            self.diagnostics.report(DiagnosticKind::LabelAlreadyExists, line_number);
        }
    }
}

impl Default for FileContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_and_data_share_one_combined_capacity() {
        let mut ctx = FileContext::new();
        for _ in 0..CAPACITY {
            ctx.push_code_word(0, 1);
        }
        assert!(!ctx.diagnostics.has_errors());
        assert_eq!(ctx.code.len(), CAPACITY);

        // The code array alone is already at capacity, so a single further
        // data word must also be rejected even though `data` itself is empty.
        ctx.push_data_word(0, 2);
        assert!(ctx.diagnostics.has_errors());
        assert_eq!(ctx.data.len(), 0);
    }

    #[test]
    fn a_mix_of_code_and_data_can_fill_the_shared_capacity() {
        let mut ctx = FileContext::new();
        for _ in 0..(CAPACITY / 2) {
            ctx.push_code_word(0, 1);
        }
        for _ in 0..(CAPACITY / 2) {
            ctx.push_data_word(0, 1);
        }
        assert!(!ctx.diagnostics.has_errors());
        assert_eq!(ctx.code.len() + ctx.data.len(), CAPACITY);

        ctx.push_code_word(0, 2);
        assert!(ctx.diagnostics.has_errors());
    }
}
