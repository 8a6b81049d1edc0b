//! # chestgen - Treasure chest data generator
//!
//! Turns the treasure chest CSV export into a normalized JSON document,
//! enriched with arena scaling, derived card and gold counts and localized
//! descriptions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐     ┌─────────────┐
//! │  Chest CSV  │────▶│   Parser    │────▶│    Transform     │────▶│ Chest JSON  │
//! │   export    │     │ (auto-enc)  │     │ filter/map/enrich│     │  (sorted)   │
//! └─────────────┘     └─────────────┘     └──────────────────┘     └─────────────┘
//!                                           ▲              ▲
//!                                     arenas.json     texts.csv
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chestgen::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::default()
//!     .with_csv("csv/logic/treasure_chests.csv")
//!     .with_arenas("json/arenas.json")
//!     .with_output("json/treasure_chests.json");
//! let result = generate(&config)?;
//! println!("Generated {} chests", result.records.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error hierarchy
//! - [`models`] - Chest records and arena references
//! - [`parser`] - CSV reading with auto-detection
//! - [`lookup`] - Arena and localization tables
//! - [`transform`] - Filtering, mapping, enrichment and the pipeline
//! - [`validation`] - Output schema validation
//! - [`config`] - Generator configuration
//! - [`logs`] - Progress logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Input
pub mod lookup;
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::GeneratorConfig;

pub use error::{CsvError, LookupError, PipelineError, TransformError, ValidationError};

pub use models::{ArenaInfo, ArenaRef, BaseChestStats, ChestRecord};

pub use parser::{parse_bytes_auto, parse_csv_file_auto, ParseResult, RawRow};

pub use lookup::{ArenaLookup, ArenaTable, NoTexts, TextLookup, TextTable};

pub use transform::pipeline::{
    generate, run, sort_records, write_json, ChestRun, CsvInfo, SkippedRow, TransformOptions,
};

pub use validation::{validate_chest, validate_chests, validate_document};
