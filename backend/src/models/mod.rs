//! Domain models for the chest generator.
//!
//! - [`ChestRecord`] - One emitted treasure chest
//! - [`ArenaRef`] - Raw arena identifier or resolved arena projection
//! - [`ArenaInfo`] - Arena fields carried into a chest record
//! - [`BaseChestStats`] - Stats inherited from a template chest

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Arena
// =============================================================================

/// Projection of an arena definition.
///
/// Arena files carry many more fields; only these survive into chest records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArenaInfo {
    /// Internal name, e.g. `Arena1`.
    pub name: String,
    /// Numeric arena id used for ordering.
    pub arena: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Percentage applied to chest card counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest_reward_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_chest_reward_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Arena field of a chest: the CSV value until a lookup succeeds.
///
/// Serialized untagged, so an unresolved arena keeps its raw scalar form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ArenaRef {
    Resolved(ArenaInfo),
    Unresolved(Value),
}

impl ArenaRef {
    /// Numeric arena id, only known once resolved.
    pub fn arena_id(&self) -> Option<i64> {
        match self {
            ArenaRef::Resolved(info) => Some(info.arena),
            ArenaRef::Unresolved(_) => None,
        }
    }

    /// Identifier used to query the arena lookup.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            ArenaRef::Resolved(info) => Some(info.name.clone()),
            ArenaRef::Unresolved(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            ArenaRef::Unresolved(Value::Number(n)) => Some(n.to_string()),
            ArenaRef::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ArenaRef::Resolved(_))
    }
}

impl Default for ArenaRef {
    fn default() -> Self {
        ArenaRef::Unresolved(Value::Null)
    }
}

// =============================================================================
// Chest Record
// =============================================================================

/// Write whole floats as JSON integers, so a count of `10.0` reads `10`.
mod whole_number {
    use serde::Serializer;

    /// 2^63, the first float outside the i64 range.
    const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() < I64_LIMIT {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn option<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// A treasure chest as emitted in the output document.
///
/// Field names match the snake_case keys produced by the column table in
/// [`crate::transform::fields`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChestRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_chest: Option<String>,
    #[serde(default)]
    pub arena: ArenaRef,

    // Flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_shop: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_arena_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament_chest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survival_chest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_offer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_chest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boosted_chest: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_price_without_speed_up: Option<i64>,

    // Timing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken_seconds: Option<i64>,

    // Spells
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "whole_number::option"
    )]
    pub random_spells: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub different_spells: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest_count_in_chest_cycle: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guaranteed_spells: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell_set: Option<String>,

    // Chances ("1 in N")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rare_chance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_chance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendary_chance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_chance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendary_override_chance: Option<f64>,

    // Rewards
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "whole_number::option"
    )]
    pub min_gold_per_card: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "whole_number::option"
    )]
    pub max_gold_per_card: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_value: Option<i64>,

    // Localized text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,

    // Derived
    #[serde(default, serialize_with = "whole_number::serialize")]
    pub card_count: f64,
    #[serde(default)]
    pub card_count_by_arena: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_count_rare: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_count_epic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_count_legendary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_count_common: Option<f64>,
    #[serde(default, serialize_with = "whole_number::serialize")]
    pub min_gold: f64,
    #[serde(default, serialize_with = "whole_number::serialize")]
    pub max_gold: f64,
}

impl ChestRecord {
    /// Create a record with only a name and a raw arena value.
    pub fn new(name: impl Into<String>, arena: Value) -> Self {
        Self {
            name: name.into(),
            arena: ArenaRef::Unresolved(arena),
            ..Default::default()
        }
    }

    /// Stats a dependent chest inherits from this one.
    pub fn base_stats(&self) -> BaseChestStats {
        BaseChestStats {
            time_taken_hours: self.time_taken_hours,
            time_taken_minutes: self.time_taken_minutes,
            time_taken_seconds: self.time_taken_seconds,
            random_spells: self.random_spells,
            different_spells: self.different_spells,
            chest_count_in_chest_cycle: self.chest_count_in_chest_cycle,
            rare_chance: self.rare_chance,
            epic_chance: self.epic_chance,
            legendary_chance: self.legendary_chance,
            skin_chance: self.skin_chance,
            min_gold_per_card: self.min_gold_per_card,
            max_gold_per_card: self.max_gold_per_card,
            sort_value: self.sort_value,
        }
    }

    /// Overwrite stats with every value the base chest carries.
    pub fn apply_base_stats(&mut self, base: &BaseChestStats) {
        fn inherit<T: Copy>(target: &mut Option<T>, base: Option<T>) {
            if base.is_some() {
                *target = base;
            }
        }

        inherit(&mut self.time_taken_hours, base.time_taken_hours);
        inherit(&mut self.time_taken_minutes, base.time_taken_minutes);
        inherit(&mut self.time_taken_seconds, base.time_taken_seconds);
        inherit(&mut self.random_spells, base.random_spells);
        inherit(&mut self.different_spells, base.different_spells);
        inherit(&mut self.chest_count_in_chest_cycle, base.chest_count_in_chest_cycle);
        inherit(&mut self.rare_chance, base.rare_chance);
        inherit(&mut self.epic_chance, base.epic_chance);
        inherit(&mut self.legendary_chance, base.legendary_chance);
        inherit(&mut self.skin_chance, base.skin_chance);
        inherit(&mut self.min_gold_per_card, base.min_gold_per_card);
        inherit(&mut self.max_gold_per_card, base.max_gold_per_card);
        inherit(&mut self.sort_value, base.sort_value);
    }
}

// =============================================================================
// Base Chest Stats
// =============================================================================

/// Subset of a chest's fields that a dependent chest inherits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseChestStats {
    pub time_taken_hours: Option<i64>,
    pub time_taken_minutes: Option<i64>,
    pub time_taken_seconds: Option<i64>,
    pub random_spells: Option<f64>,
    pub different_spells: Option<i64>,
    pub chest_count_in_chest_cycle: Option<i64>,
    pub rare_chance: Option<f64>,
    pub epic_chance: Option<f64>,
    pub legendary_chance: Option<f64>,
    pub skin_chance: Option<f64>,
    pub min_gold_per_card: Option<f64>,
    pub max_gold_per_card: Option<f64>,
    pub sort_value: Option<i64>,
}

// =============================================================================
// Tests
// =============================================================================
