//! High-level pipeline: chest export CSV to ordered chest records.
//!
//! # Example
//!
//! ```rust,ignore
//! use chestgen::config::GeneratorConfig;
//! use chestgen::transform::pipeline::generate;
//!
//! let config = GeneratorConfig::from_env();
//! let result = generate(&config)?;
//! println!("Generated {} chests", result.records.len());
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::Serialize;

use super::arena::{apply_reward_fields, enrich_arena};
use super::base_chest::resolve_base_chest;
use super::fields::{map_row, TEXT_COLUMNS};
use super::filter::include_name;
use crate::config::{GeneratorConfig, DEFAULT_LOCALE};
use crate::error::{CsvError, PipelineError, PipelineResult, TransformError};
use crate::logs::{log_error, log_info, log_success, log_warning, log_warning_indent};
use crate::lookup::{ArenaLookup, ArenaTable, NoTexts, TextLookup, TextTable};
use crate::models::ChestRecord;
use crate::parser::{parse_csv_file_auto, ParseResult, RawRow};
use crate::validation::validate_chests;

/// The first data row of a chest export describes column types, not a chest.
const LEGEND_ROWS: usize = 1;

/// Column every chest export must have.
const NAME_COLUMN: &str = "Name";

/// Options for a transformation run
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Locale code for localized columns
    pub locale: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// A row that was dropped because its values did not fit a chest record
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub name: Option<String>,
    pub reason: String,
}

impl SkippedRow {
    fn new(row: &RawRow, name: Option<&str>, error: TransformError) -> Self {
        Self {
            row: row.index,
            name: name.map(String::from),
            reason: error.to_string(),
        }
    }
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Result of a transformation run
#[derive(Debug, Clone, Serialize)]
pub struct ChestRun {
    /// Ordered chest records
    pub records: Vec<ChestRecord>,
    /// Rows dropped with a reason
    pub skipped: Vec<SkippedRow>,
    /// Rows excluded by name
    pub excluded: usize,
    /// Chests whose arena could not be resolved
    pub unresolved_arenas: Vec<String>,
    /// Chests whose base chest was not found
    pub missing_base_chests: Vec<String>,
    pub csv_info: CsvInfo,
}

/// Transform parsed export rows into ordered chest records.
pub fn run(
    parsed: &ParseResult,
    arenas: &dyn ArenaLookup,
    texts: &dyn TextLookup,
    options: &TransformOptions,
) -> PipelineResult<ChestRun> {
    if !parsed.has_column(NAME_COLUMN) {
        return Err(CsvError::MissingColumn(NAME_COLUMN.to_string()).into());
    }

    let mut records: Vec<ChestRecord> = Vec::new();
    let mut skipped = Vec::new();
    let mut excluded = 0;
    let mut unresolved_arenas = Vec::new();
    let mut missing_base_chests = Vec::new();

    for row in parsed.rows.iter().filter(|r| r.index >= LEGEND_ROWS) {
        let name = row.get(NAME_COLUMN);
        if !include_name(name) {
            excluded += 1;
            continue;
        }

        let mut record = match map_row(row) {
            Ok(record) => record,
            Err(e) => {
                skipped.push(SkippedRow::new(row, name, e));
                continue;
            }
        };

        let found_base = resolve_base_chest(&mut record, &records);

        localize(&mut record, row, texts, &options.locale);
        if let Err(e) = apply_reward_fields(&mut record) {
            skipped.push(SkippedRow::new(row, name, e));
            continue;
        }

        if !found_base {
            missing_base_chests.push(record.name.clone());
        }

        if !enrich_arena(&mut record, arenas) {
            unresolved_arenas.push(record.name.clone());
        }

        records.push(record);
    }

    sort_records(&mut records);

    let csv_info = CsvInfo {
        encoding: parsed.encoding.clone(),
        delimiter: parsed.delimiter,
        headers: parsed.headers.clone(),
        row_count: parsed.rows.len(),
    };

    Ok(ChestRun {
        records,
        skipped,
        excluded,
        unresolved_arenas,
        missing_base_chests,
        csv_info,
    })
}

/// Fill `description` and `notification` from the localization table.
fn localize(record: &mut ChestRecord, row: &RawRow, texts: &dyn TextLookup, locale: &str) {
    for text in TEXT_COLUMNS.iter() {
        let Some(tid) = row.get(text.column).map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        *(text.slot)(record) = texts.text(tid, locale);
    }
}

/// Order by (arena id, sort value); unresolved arenas go last.
///
/// `sort_by` is stable, so ties keep file order.
pub fn sort_records(records: &mut [ChestRecord]) {
    records.sort_by(|a, b| match (a.arena.arena_id(), b.arena.arena_id()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.sort_value.cmp(&b.sort_value)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.sort_value.cmp(&b.sort_value),
    });
}

/// Write records as a pretty-printed JSON array.
pub fn write_json(records: &[ChestRecord], path: &Path) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load tables, transform the export, validate and write the output.
pub fn generate(config: &GeneratorConfig) -> PipelineResult<ChestRun> {
    let csv_path = config
        .csv_path
        .as_deref()
        .ok_or_else(|| PipelineError::Config("chest CSV path".to_string()))?;
    let arenas_path = config
        .arenas_path
        .as_deref()
        .ok_or_else(|| PipelineError::Config("arenas JSON path".to_string()))?;

    log_info(format!("📖 Reading {}", csv_path.display()));
    let parsed = parse_csv_file_auto(csv_path)?;
    log_success(format!("Encoding: {}", parsed.encoding));
    log_success(format!("Read {} rows", parsed.rows.len()));

    let arenas = ArenaTable::load(arenas_path)?;
    log_success(format!("Loaded {} arenas", arenas.len()));

    let texts = match config.texts_path.as_deref() {
        Some(path) => {
            let table = TextTable::load(path)?;
            log_success(format!("Loaded {} texts", table.len()));
            Some(table)
        }
        None => {
            log_warning("No text table configured, descriptions left empty");
            None
        }
    };

    let options = TransformOptions {
        locale: config.locale.clone(),
    };
    let result = match texts {
        Some(ref table) => run(&parsed, &arenas, table, &options)?,
        None => run(&parsed, &arenas, &NoTexts, &options)?,
    };
    report(&result);

    if config.validate {
        log_info("✔️  Validating records...");
        match validate_chests(&result.records) {
            Ok(()) => log_success(format!("All {} records valid", result.records.len())),
            Err(e) => log_warning(e.to_string()),
        }
    }

    if let Some(ref output) = config.output_path {
        write_json(&result.records, output)?;
        log_success(format!("💾 Output written to: {}", output.display()));
    }

    Ok(result)
}

fn report(result: &ChestRun) {
    log_success(format!("Generated {} chests", result.records.len()));
    log_info(format!("{} rows excluded by name", result.excluded));

    if !result.skipped.is_empty() {
        log_error(format!("{} rows skipped", result.skipped.len()));
        for skip in result.skipped.iter().take(5) {
            log_warning_indent(skip.reason.clone(), 1);
        }
    }
    if !result.unresolved_arenas.is_empty() {
        log_warning(format!(
            "Arena not found for: {}",
            result.unresolved_arenas.join(", ")
        ));
    }
    if !result.missing_base_chests.is_empty() {
        log_warning(format!(
            "Base chest not found for: {}",
            result.missing_base_chests.join(", ")
        ));
    }
}
