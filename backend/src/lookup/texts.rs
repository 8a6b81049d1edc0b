//! Localization table: one row per text id, one column per locale.
//!
//! ```text
//! TID,EN,FR
//! String,String,String          <- legend row, skipped
//! TID_CHEST_WOODEN,Wooden Chest,Coffre en bois
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CsvError, LookupResult};
use crate::parser::{parse_bytes_auto, parse_csv_file_auto, ParseResult};

use super::TextLookup;

const ID_COLUMN: &str = "TID";

#[derive(Debug, Clone, Default)]
pub struct TextTable {
    /// tid -> locale -> text
    texts: HashMap<String, HashMap<String, String>>,
}

impl TextTable {
    pub fn load(path: impl AsRef<Path>) -> LookupResult<Self> {
        let parsed = parse_csv_file_auto(path)?;
        Ok(Self::from_parsed(parsed)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> LookupResult<Self> {
        let parsed = parse_bytes_auto(bytes)?;
        Ok(Self::from_parsed(parsed)?)
    }

    fn from_parsed(parsed: ParseResult) -> Result<Self, CsvError> {
        let id_column = if parsed.has_column(ID_COLUMN) {
            ID_COLUMN.to_string()
        } else {
            parsed
                .headers
                .first()
                .cloned()
                .ok_or_else(|| CsvError::MissingColumn(ID_COLUMN.to_string()))?
        };

        let mut texts = HashMap::new();
        for row in parsed.rows.into_iter().filter(|r| r.index > 0) {
            let Some(tid) = row.get(&id_column).filter(|t| !t.is_empty()) else {
                continue;
            };
            let tid = tid.to_string();

            let locales: HashMap<String, String> = row
                .fields
                .into_iter()
                .filter(|(column, value)| *column != id_column && !value.is_empty())
                .collect();
            texts.insert(tid, locales);
        }

        Ok(Self { texts })
    }

    pub fn insert(&mut self, tid: &str, locale: &str, text: &str) {
        self.texts
            .entry(tid.to_string())
            .or_default()
            .insert(locale.to_string(), text.to_string());
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl TextLookup for TextTable {
    fn text(&self, tid: &str, locale: &str) -> Option<String> {
        self.texts.get(tid)?.get(locale).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXTS: &str = "TID,EN,FR\n\
        String,String,String\n\
        TID_WOODEN,Wooden Chest,Coffre en bois\n\
        TID_EMPTY,,Vide\n";

    #[test]
    fn test_lookup_by_locale() {
        let table = TextTable::from_bytes(TEXTS.as_bytes()).unwrap();
        assert_eq!(table.text("TID_WOODEN", "EN").as_deref(), Some("Wooden Chest"));
        assert_eq!(table.text("TID_WOODEN", "FR").as_deref(), Some("Coffre en bois"));
    }

    #[test]
    fn test_legend_row_is_skipped() {
        let table = TextTable::from_bytes(TEXTS.as_bytes()).unwrap();
        assert!(table.text("String", "EN").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_translation_is_missing() {
        let table = TextTable::from_bytes(TEXTS.as_bytes()).unwrap();
        assert!(table.text("TID_EMPTY", "EN").is_none());
        assert!(table.text("TID_UNKNOWN", "EN").is_none());
    }

    #[test]
    fn test_first_column_used_without_tid_header() {
        let csv = "Key,EN\nlegend,legend\nTID_X,Hello\n";
        let table = TextTable::from_bytes(csv.as_bytes()).unwrap();
        assert_eq!(table.text("TID_X", "EN").as_deref(), Some("Hello"));
    }

    #[test]
    fn test_insert() {
        let mut table = TextTable::default();
        table.insert("TID_A", "EN", "A");
        assert_eq!(table.text("TID_A", "EN").as_deref(), Some("A"));
    }
}
