//! Column table and row mapping.
//!
//! Maps the allow-listed export columns to the snake_case keys of a
//! [`ChestRecord`], normalizing each value on the way.

use serde_json::{Map, Number, Value};

use crate::error::{TransformError, TransformResult};
use crate::models::ChestRecord;
use crate::parser::RawRow;

/// How a column value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Kept as the trimmed source string
    Text,
    /// Whole number
    Integer,
    /// Integer or decimal
    Number,
    /// TRUE/FALSE (or 0/1)
    Flag,
    /// Whatever [`normalize_value`] produces
    Raw,
}

/// One allow-listed export column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMapping {
    pub column: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
}

const fn col(column: &'static str, key: &'static str, kind: FieldKind) -> ColumnMapping {
    ColumnMapping { column, key, kind }
}

/// Export columns carried into chest records.
pub const COLUMNS: [ColumnMapping; 29] = [
    col("Name", "name", FieldKind::Text),
    col("BaseChest", "base_chest", FieldKind::Text),
    col("Arena", "arena", FieldKind::Raw),
    col("InShop", "in_shop", FieldKind::Flag),
    col("InArenaInfo", "in_arena_info", FieldKind::Flag),
    col("TournamentChest", "tournament_chest", FieldKind::Flag),
    col("SurvivalChest", "survival_chest", FieldKind::Flag),
    col("ShopPriceWithoutSpeedUp", "shop_price_without_speed_up", FieldKind::Integer),
    col("TimeTakenDays", "time_taken_days", FieldKind::Integer),
    col("TimeTakenHours", "time_taken_hours", FieldKind::Integer),
    col("TimeTakenMinutes", "time_taken_minutes", FieldKind::Integer),
    col("TimeTakenSeconds", "time_taken_seconds", FieldKind::Integer),
    col("RandomSpells", "random_spells", FieldKind::Number),
    col("DifferentSpells", "different_spells", FieldKind::Integer),
    col("ChestCountInChestCycle", "chest_count_in_chest_cycle", FieldKind::Integer),
    col("RareChance", "rare_chance", FieldKind::Number),
    col("EpicChance", "epic_chance", FieldKind::Number),
    col("LegendaryChance", "legendary_chance", FieldKind::Number),
    col("SkinChance", "skin_chance", FieldKind::Number),
    col("GuaranteedSpells", "guaranteed_spells", FieldKind::Text),
    col("MinGoldPerCard", "min_gold_per_card", FieldKind::Number),
    col("MaxGoldPerCard", "max_gold_per_card", FieldKind::Number),
    col("SpellSet", "spell_set", FieldKind::Text),
    col("Exp", "exp", FieldKind::Integer),
    col("SortValue", "sort_value", FieldKind::Integer),
    col("SpecialOffer", "special_offer", FieldKind::Flag),
    col("DraftChest", "draft_chest", FieldKind::Flag),
    col("BoostedChest", "boosted_chest", FieldKind::Flag),
    col("LegendaryOverrideChance", "legendary_override_chance", FieldKind::Number),
];

/// A localized column: its text id is resolved into a record field.
#[derive(Clone, Copy)]
pub struct TextColumn {
    pub column: &'static str,
    pub key: &'static str,
    pub slot: fn(&mut ChestRecord) -> &mut Option<String>,
}

fn description(record: &mut ChestRecord) -> &mut Option<String> {
    &mut record.description
}

fn notification(record: &mut ChestRecord) -> &mut Option<String> {
    &mut record.notification
}

/// Localized text columns.
pub const TEXT_COLUMNS: [TextColumn; 2] = [
    TextColumn {
        column: "TID",
        key: "description",
        slot: description,
    },
    TextColumn {
        column: "NotificationTID",
        key: "notification",
        slot: notification,
    },
];

/// Convert a CamelCase column name to a snake_case key.
///
/// Acronyms stay together: `NotificationTID` becomes `notification_tid`.
pub fn snake_key(column: &str) -> String {
    let chars: Vec<char> = column.chars().collect();
    let mut out = String::with_capacity(column.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Generic cell normalization.
///
/// Empty cells vanish, `TRUE`/`FALSE` become booleans, numeric text becomes
/// a number, everything else stays a trimmed string.
pub fn normalize_value(raw: &str) -> Option<Value> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s.eq_ignore_ascii_case("true") {
        return Some(Value::Bool(true));
    }
    if s.eq_ignore_ascii_case("false") {
        return Some(Value::Bool(false));
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    if let Some(n) = s.parse::<f64>().ok().and_then(Number::from_f64) {
        return Some(Value::Number(n));
    }
    Some(Value::String(s.to_string()))
}

fn coerce(kind: FieldKind, raw: &str) -> Result<Option<Value>, String> {
    if kind == FieldKind::Text {
        let s = raw.trim();
        return Ok((!s.is_empty()).then(|| Value::String(s.to_string())));
    }

    let Some(value) = normalize_value(raw) else {
        return Ok(None);
    };

    match kind {
        FieldKind::Integer if value.is_i64() => Ok(Some(value)),
        FieldKind::Integer => Err(format!("expected an integer, got '{}'", raw.trim())),
        FieldKind::Number if value.is_number() => Ok(Some(value)),
        FieldKind::Number => Err(format!("expected a number, got '{}'", raw.trim())),
        FieldKind::Flag => {
            let flag = value.as_bool().or(match value.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            });
            flag.map(|b| Some(Value::Bool(b)))
                .ok_or_else(|| format!("expected TRUE or FALSE, got '{}'", raw.trim()))
        }
        FieldKind::Text | FieldKind::Raw => Ok(Some(value)),
    }
}

/// Map an export row to a chest record with only source fields filled in.
pub fn map_row(row: &RawRow) -> TransformResult<ChestRecord> {
    let mut obj = Map::new();

    for mapping in COLUMNS.iter() {
        let Some(raw) = row.get(mapping.column) else {
            continue;
        };
        let value = coerce(mapping.kind, raw).map_err(|message| TransformError::InvalidValue {
            row: row.index,
            field: mapping.key.to_string(),
            message,
        })?;
        if let Some(value) = value {
            obj.insert(mapping.key.to_string(), value);
        }
    }

    serde_json::from_value(Value::Object(obj)).map_err(|e| TransformError::InvalidValue {
        row: row.index,
        field: "record".to_string(),
        message: e.to_string(),
    })
}

/// Human-readable column table for the CLI.
pub fn fields_description() -> String {
    let mut out = String::from("Export columns carried into chest records:\n\n");
    out.push_str("| Column | Key | Kind |\n|--------|-----|------|\n");
    for m in COLUMNS.iter() {
        out.push_str(&format!("| {} | {} | {:?} |\n", m.column, m.key, m.kind));
    }
    out.push_str("\nLocalized columns:\n\n");
    for text in TEXT_COLUMNS.iter() {
        out.push_str(&format!("| {} | {} | text id |\n", text.column, text.key));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        RawRow {
            index: 3,
            fields: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn test_table_keys_are_snake_case_of_columns() {
        for m in COLUMNS.iter() {
            assert_eq!(snake_key(m.column), m.key, "column {}", m.column);
        }
    }

    #[test]
    fn test_snake_key_acronyms() {
        assert_eq!(snake_key("NotificationTID"), "notification_tid");
        assert_eq!(snake_key("TID"), "tid");
        assert_eq!(snake_key("HTTPServer"), "http_server");
        assert_eq!(snake_key("Arena1Chest"), "arena1_chest");
    }

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("  "), None);
        assert_eq!(normalize_value("TRUE"), Some(json!(true)));
        assert_eq!(normalize_value("False"), Some(json!(false)));
        assert_eq!(normalize_value("42"), Some(json!(42)));
        assert_eq!(normalize_value("-3"), Some(json!(-3)));
        assert_eq!(normalize_value("2.5"), Some(json!(2.5)));
        assert_eq!(normalize_value(" Arena1 "), Some(json!("Arena1")));
    }

    #[test]
    fn test_map_row_keeps_allow_listed_columns() {
        let r = row(&[
            ("Name", "Wooden"),
            ("Arena", "Arena1"),
            ("InShop", "TRUE"),
            ("RandomSpells", "3"),
            ("RareChance", "10"),
            ("SortValue", "1"),
            ("IconFile", "chest_wooden.png"),
            ("TimeTakenHours", ""),
        ]);
        let record = map_row(&r).unwrap();

        assert_eq!(record.name, "Wooden");
        assert_eq!(record.arena.lookup_key().as_deref(), Some("Arena1"));
        assert_eq!(record.in_shop, Some(true));
        assert_eq!(record.random_spells, Some(3.0));
        assert_eq!(record.rare_chance, Some(10.0));
        assert_eq!(record.time_taken_hours, None);

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("icon_file").is_none());
    }

    #[test]
    fn test_text_columns_are_not_converted() {
        let r = row(&[("Name", "1000"), ("SpellSet", "42")]);
        let record = map_row(&r).unwrap();
        assert_eq!(record.name, "1000");
        assert_eq!(record.spell_set.as_deref(), Some("42"));
    }

    #[test]
    fn test_flag_accepts_digits() {
        let r = row(&[("Name", "Wooden"), ("DraftChest", "1"), ("BoostedChest", "0")]);
        let record = map_row(&r).unwrap();
        assert_eq!(record.draft_chest, Some(true));
        assert_eq!(record.boosted_chest, Some(false));
    }

    #[test]
    fn test_invalid_integer_reports_field() {
        let r = row(&[("Name", "Wooden"), ("RandomSpells", "lots")]);
        match map_row(&r).unwrap_err() {
            TransformError::InvalidValue { row, field, .. } => {
                assert_eq!(row, 3);
                assert_eq!(field, "random_spells");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_decimal_in_integer_column_rejected() {
        let r = row(&[("Name", "Wooden"), ("SortValue", "2.5")]);
        assert!(map_row(&r).is_err());
    }

    #[test]
    fn test_fractional_spells_and_gold_are_kept() {
        let r = row(&[("Name", "Wooden"), ("RandomSpells", "2.5"), ("MinGoldPerCard", "1.5")]);
        let record = map_row(&r).unwrap();
        assert_eq!(record.random_spells, Some(2.5));
        assert_eq!(record.min_gold_per_card, Some(1.5));
    }

    #[test]
    fn test_text_column_slots_match_keys() {
        for text in TEXT_COLUMNS.iter() {
            let mut record = ChestRecord::new("Wooden", json!("Arena1"));
            *(text.slot)(&mut record) = Some("x".to_string());
            let value = serde_json::to_value(&record).unwrap();
            assert_eq!(value[text.key], "x", "column {}", text.column);
        }
    }

    #[test]
    fn test_description_mentions_every_column() {
        let text = fields_description();
        for m in COLUMNS.iter() {
            assert!(text.contains(m.column));
        }
        assert!(text.contains("NotificationTID"));
    }
}
