//! Label table: name -> address/kind, append-only, with bulk data
//! rebasing and entry promotion at the end of each pass.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Data,
    Code,
    Extern,
    Entry,
}

#[derive(Debug, Clone)]
pub struct LabelRecord {
    pub address: usize,
    pub kind: LabelKind,
}

/// A sequential append-only table. Iteration order for `entry_listing`
/// follows insertion order, which a plain `HashMap` does not guarantee;
/// insertion order is tracked separately.
#[derive(Default)]
pub struct SymbolTable {
    records: HashMap<String, LabelRecord>,
    insertion_order: Vec<String>,
}

pub enum InsertError {
    LabelAlreadyExists,
}

pub enum EntryError {
    CantFindLabelToEntry,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, address: usize, kind: LabelKind) -> Result<(), InsertError> {
        if self.records.contains_key(name) {
            return Err(InsertError::LabelAlreadyExists);
        }
        self.records
            .insert(name.to_string(), LabelRecord { address, kind });
        self.insertion_order.push(name.to_string());
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&LabelRecord> {
        self.records.get(name)
    }

    pub fn promote_to_entry(&mut self, name: &str) -> Result<(), EntryError> {
        match self.records.get_mut(name) {
            Some(record) => {
                record.kind = LabelKind::Entry;
                Ok(())
            }
            None => Err(EntryError::CantFindLabelToEntry),
        }
    }

    /// Rebases every `Data` label's address by `offset`. Invoked once at
    /// the end of the first pass with `offset = ic_final`.
    pub fn rebase_data(&mut self, offset: usize) {
        for record in self.records.values_mut() {
            if record.kind == LabelKind::Data {
                record.address += offset;
            }
        }
    }

    /// Lines `<name>\t<address>\n` for every `Entry` label, in insertion
    /// order.
    pub fn entry_listing(&self) -> String {
        let mut out = String::new();
        for name in &self.insertion_order {
            let record = &self.records[name];
            if record.kind == LabelKind::Entry {
                out.push_str(name);
                out.push('\t');
                out.push_str(&record.address.to_string());
                out.push('\n');
            }
        }
        out
    }

    pub fn has_any_entries(&self) -> bool {
        self.records.values().any(|r| r.kind == LabelKind::Entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut table = SymbolTable::new();
        assert!(table.insert("X", 100, LabelKind::Code).is_ok());
        assert!(matches!(
            table.insert("X", 101, LabelKind::Code),
            Err(InsertError::LabelAlreadyExists)
        ));
    }

    #[test]
    fn rebase_data_only_touches_data_labels() {
        let mut table = SymbolTable::new();
        table.insert("D", 0, LabelKind::Data).unwrap();
        table.insert("C", 100, LabelKind::Code).unwrap();
        table.rebase_data(102);
        assert_eq!(table.lookup("D").unwrap().address, 102);
        assert_eq!(table.lookup("C").unwrap().address, 100);
    }

    #[test]
    fn entry_listing_preserves_insertion_order() {
        let mut table = SymbolTable::new();
        table.insert("B", 100, LabelKind::Code).unwrap();
        table.insert("A", 101, LabelKind::Code).unwrap();
        table.promote_to_entry("B").unwrap();
        table.promote_to_entry("A").unwrap();
        assert_eq!(table.entry_listing(), "B\t100\nA\t101\n");
    }

    #[test]
    fn promoting_unknown_label_is_an_error() {
        let mut table = SymbolTable::new();
        assert!(matches!(
            table.promote_to_entry("missing"),
            Err(EntryError::CantFindLabelToEntry)
        ));
    }
}
