//! JSON Schema validation for emitted chest records.
//!
//! The schema is embedded at compile time from
//! `schemas/treasure-chest.json` (Draft 7).
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use chestgen::validation::validate_chest;
//!
//! let chest = json!({
//!     "name": "Wooden",
//!     "arena": "Arena1",
//!     "card_count": 3,
//!     "card_count_by_arena": 3,
//!     "min_gold": 15,
//!     "max_gold": 30
//! });
//! assert!(validate_chest(&chest).is_ok());
//! ```

use serde_json::Value;

use crate::error::ValidationError;
use crate::models::ChestRecord;

const CHEST_SCHEMA: &str = include_str!("../../schemas/treasure-chest.json");

/// Validate a JSON value against a JSON schema.
///
/// Returns every error message when invalid.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator.iter_errors(data).map(|e| e.to_string()).collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn chest_schema() -> Result<Value, ValidationError> {
    serde_json::from_str(CHEST_SCHEMA).map_err(|e| ValidationError::Schema(e.to_string()))
}

/// Validate one chest (already serialized) against the chest schema.
pub fn validate_chest(data: &Value) -> Result<(), Vec<String>> {
    let schema = chest_schema().map_err(|e| vec![e.to_string()])?;
    validate(&schema, data)
}

/// Validate a JSON document that should be a list of chests.
pub fn validate_document(document: &Value) -> Result<(), ValidationError> {
    let schema = chest_schema()?;
    let validator =
        jsonschema::draft7::new(&schema).map_err(|e| ValidationError::Schema(e.to_string()))?;

    let items = match document.as_array() {
        Some(items) => items,
        None => {
            return Err(ValidationError::Invalid {
                count: 1,
                errors: vec![(0, vec!["document is not an array".to_string()])],
            })
        }
    };

    let errors: Vec<(usize, Vec<String>)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let errs: Vec<String> = validator.iter_errors(item).map(|e| e.to_string()).collect();
            (!errs.is_empty()).then_some((i, errs))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            count: errors.len(),
            errors,
        })
    }
}

/// Validate generated records.
pub fn validate_chests(records: &[ChestRecord]) -> Result<(), ValidationError> {
    let document =
        serde_json::to_value(records).map_err(|e| ValidationError::Schema(e.to_string()))?;
    validate_document(&document)
}
