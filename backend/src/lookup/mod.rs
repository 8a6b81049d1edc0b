//! Reference data the chest transformer consults.
//!
//! The transformer only sees the [`ArenaLookup`] and [`TextLookup`] traits;
//! [`ArenaTable`] and [`TextTable`] are the file-backed implementations used
//! by the CLI.

pub mod arenas;
pub mod texts;

pub use arenas::ArenaTable;
pub use texts::TextTable;

use crate::models::ArenaInfo;

/// Resolve an arena identifier from the chest export.
pub trait ArenaLookup {
    fn arena(&self, id: &str) -> Option<ArenaInfo>;
}

/// Resolve a localized string by text id and locale code.
pub trait TextLookup {
    fn text(&self, tid: &str, locale: &str) -> Option<String>;
}

/// Lookup that never resolves anything.
///
/// Used when no localization table is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTexts;

impl TextLookup for NoTexts {
    fn text(&self, _tid: &str, _locale: &str) -> Option<String> {
        None
    }
}
