//! Diagnostics bus: accumulates per-line errors without aborting translation.

use colored::Colorize;

/// Every way a single source line can be rejected by the translation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    LabelAlreadyExists,
    MacroAlreadyExists,
    CommaRequiredBetweenValues,
    DataNeedNumValue,
    CantDefineLabelBeforeEntry,
    CantDefineLabelBeforeExtern,
    StringStructureNotValid,
    StringMustEndInQuotes,
    StringDirectiveAcceptsOneParameter,
    TooMuchWordsForInstruction,
    CantFindLabelToEntry,
    InvalidLabelName,
    InstructionNameNotExist,
    InstructionShouldReceiveTwoOperands,
    CommaRequiredBetweenOperands,
    InstructionShouldReceiveOneOperand,
    InstructionShouldNotReceiveOperands,
    InvalidAddressMethodForInstruction,
    MustProvideLabelsToExtern,
    MustProvideLabelsToEntry,
    MustProvideValuesToData,
    InvalidCommaPosition,
    LabelNotFound,
    NestedMacroDefinition,
    MacroNameIsInstructionOrDirective,
    OutOfMemory,
}

impl DiagnosticKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::LabelAlreadyExists => "A label cannot be declared more than once.",
            Self::MacroAlreadyExists => "A macro cannot be declared more than once.",
            Self::CommaRequiredBetweenValues => "A comma is required between operands.",
            Self::DataNeedNumValue => "The data directive accepts only numbers.",
            Self::CantDefineLabelBeforeEntry => "It is not possible to define a label before an entry directive.",
            Self::CantDefineLabelBeforeExtern => "It is not possible to define a label before an extern directive.",
            Self::StringStructureNotValid => "String should start with quotes.",
            Self::StringMustEndInQuotes => "String should end with quotes.",
            Self::StringDirectiveAcceptsOneParameter => "The string directive takes one argument.",
            Self::TooMuchWordsForInstruction => "Too many words for instruction.",
            Self::CantFindLabelToEntry => "The entry label was not found.",
            Self::InvalidLabelName => "The label name is invalid.",
            Self::InstructionNameNotExist => "Instruction does not exist.",
            Self::InstructionShouldReceiveTwoOperands => "The instruction should receive two operands.",
            Self::CommaRequiredBetweenOperands => "A comma is required between two operands.",
            Self::InstructionShouldReceiveOneOperand => "The instruction should receive one operand.",
            Self::InstructionShouldNotReceiveOperands => "The instruction should not accept operands.",
            Self::InvalidAddressMethodForInstruction => "The instruction cannot receive this operand.",
            Self::MustProvideLabelsToExtern => "Must provide labels to extern directive.",
            Self::MustProvideLabelsToEntry => "Must provide labels to entry directive.",
            Self::MustProvideValuesToData => "Must provide values to data directive.",
            Self::InvalidCommaPosition => "Invalid comma position.",
            Self::LabelNotFound => "The label does not found.",
            Self::NestedMacroDefinition => "You cannot define a nested macro.",
            Self::MacroNameIsInstructionOrDirective => "The macro name is a reserved instruction or directive.",
            Self::OutOfMemory => "Not enough space left in memory for this word.",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
}

/// Accumulates diagnostics for a single file. Never aborts translation:
/// every stage keeps reporting into the same bus, per line, all the way
/// to the end of the second pass.
#[derive(Default)]
pub struct DiagnosticsBus {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, line: usize) {
        self.diagnostics.push(Diagnostic { kind, line });
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Prints every accumulated diagnostic to stderr, in the order reported.
    pub fn print_all(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!(
                "{} - {}",
                format!("Error in line {}", diagnostic.line).red(),
                diagnostic.kind.message()
            );
        }
    }
}

/// Prints a driver-level error that has no associated source line (a
/// usage error, a failed file open, a base name that is too long).
pub fn print_driver_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

/// Prints a non-fatal driver warning (e.g. input extension mismatch).
pub fn print_warning(message: &str) {
    println!("{}", format!("Warning: {message}").yellow());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_accumulates_without_aborting() {
        let mut bus = DiagnosticsBus::new();
        assert!(!bus.has_errors());
        bus.report(DiagnosticKind::LabelAlreadyExists, 3);
        bus.report(DiagnosticKind::LabelNotFound, 7);
        assert!(bus.has_errors());
        assert_eq!(bus.count(), 2);
        let lines: Vec<usize> = bus.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![3, 7]);
    }

    #[test]
    fn messages_match_original_wording() {
        assert_eq!(
            DiagnosticKind::LabelNotFound.message(),
            "The label does not found."
        );
    }
}
