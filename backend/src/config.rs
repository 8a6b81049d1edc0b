//! Generator configuration.
//!
//! Values come from the environment (a `.env` file is loaded if present) and
//! can be overridden from the command line.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CHESTGEN_CSV` | `csv_path` |
//! | `CHESTGEN_ARENAS` | `arenas_path` |
//! | `CHESTGEN_TEXTS` | `texts_path` |
//! | `CHESTGEN_OUTPUT` | `output_path` |
//! | `CHESTGEN_LOCALE` | `locale` |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCALE: &str = "EN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Chest export CSV
    pub csv_path: Option<PathBuf>,
    /// Arena JSON produced by the arena generator
    pub arenas_path: Option<PathBuf>,
    /// Localization CSV
    pub texts_path: Option<PathBuf>,
    /// Output JSON (stdout when absent)
    pub output_path: Option<PathBuf>,
    pub locale: String,
    /// Check records against the embedded schema
    pub validate: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            arenas_path: None,
            texts_path: None,
            output_path: None,
            locale: DEFAULT_LOCALE.to_string(),
            validate: true,
        }
    }
}

impl GeneratorConfig {
    /// Build a configuration from `CHESTGEN_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| var(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            csv_path: path("CHESTGEN_CSV"),
            arenas_path: path("CHESTGEN_ARENAS"),
            texts_path: path("CHESTGEN_TEXTS"),
            output_path: path("CHESTGEN_OUTPUT"),
            locale: var("CHESTGEN_LOCALE")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            validate: true,
        }
    }

    pub fn with_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = Some(path.into());
        self
    }

    pub fn with_arenas(mut self, path: impl Into<PathBuf>) -> Self {
        self.arenas_path = Some(path.into());
        self
    }

    pub fn with_texts(mut self, path: impl Into<PathBuf>) -> Self {
        self.texts_path = Some(path.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.locale, "EN");
        assert!(config.validate);
        assert!(config.csv_path.is_none());
    }

    #[test]
    fn test_from_vars() {
        let vars: HashMap<&str, &str> = [
            ("CHESTGEN_CSV", "csv/logic/treasure_chests.csv"),
            ("CHESTGEN_ARENAS", "json/arenas.json"),
            ("CHESTGEN_LOCALE", "FR"),
            ("CHESTGEN_TEXTS", ""),
        ]
        .into_iter()
        .collect();

        let config = GeneratorConfig::from_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.csv_path, Some(PathBuf::from("csv/logic/treasure_chests.csv")));
        assert_eq!(config.arenas_path, Some(PathBuf::from("json/arenas.json")));
        assert!(config.texts_path.is_none());
        assert_eq!(config.locale, "FR");
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::default()
            .with_csv("a.csv")
            .with_arenas("arenas.json")
            .with_texts("texts.csv")
            .with_output("out.json")
            .with_locale("DE");
        assert_eq!(config.output_path, Some(PathBuf::from("out.json")));
        assert_eq!(config.texts_path, Some(PathBuf::from("texts.csv")));
        assert_eq!(config.locale, "DE");
    }
}
