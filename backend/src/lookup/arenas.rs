//! Arena table loaded from the arena generator's JSON output.

use std::fs;
use std::path::Path;

use crate::error::{LookupError, LookupResult};
use crate::models::ArenaInfo;

use super::ArenaLookup;

/// In-memory list of arenas, in file order.
#[derive(Debug, Clone, Default)]
pub struct ArenaTable {
    arenas: Vec<ArenaInfo>,
}

impl ArenaTable {
    pub fn new(arenas: Vec<ArenaInfo>) -> Self {
        Self { arenas }
    }

    /// Load a JSON array of arena objects. Extra fields are ignored.
    pub fn load(path: impl AsRef<Path>) -> LookupResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LookupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| LookupError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let arenas: Vec<ArenaInfo> = serde_json::from_str(content)?;
        Ok(Self::new(arenas))
    }

    pub fn len(&self) -> usize {
        self.arenas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arenas.is_empty()
    }
}

impl ArenaLookup for ArenaTable {
    /// First arena whose internal name or key equals `id`.
    fn arena(&self, id: &str) -> Option<ArenaInfo> {
        self.arenas
            .iter()
            .find(|a| a.name == id || a.key.as_deref() == Some(id))
            .cloned()
    }
}
