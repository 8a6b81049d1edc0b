//! Reward derivation and arena scaling.
//!
//! Chances are "1 in N" values: a rare chance of 10 means one card in ten is
//! rare, so the expected rare count is `count / 10`.

use crate::error::{TransformError, TransformResult};
use crate::lookup::ArenaLookup;
use crate::models::{ArenaRef, ChestRecord};

/// Chest families whose card count ignores the arena multiplier.
const UNSCALED_PREFIXES: [&str; 4] = ["Legendary", "Epic", "Draft", "SeasonReward"];

/// Card count of a chest opened in a given arena.
///
/// `chest_reward_multiplier` is a percentage. The arena id is accepted for
/// symmetry with the arena data but does not change the result. Counts are
/// truncated toward zero and saturate at the i64 bounds.
pub fn card_count_by_arena(
    name: &str,
    _arena_id: i64,
    random_spells: f64,
    chest_reward_multiplier: Option<f64>,
) -> i64 {
    if UNSCALED_PREFIXES.iter().any(|p| name.starts_with(p)) {
        return random_spells.trunc() as i64;
    }

    match chest_reward_multiplier {
        Some(m) if m != 0.0 => (m / 100.0 * random_spells).trunc() as i64,
        _ => 0,
    }
}

/// Expected number of cards of one rarity.
pub fn card_count_by_type(card_count_by_arena: i64, chance: f64) -> f64 {
    if chance == 0.0 {
        return 0.0;
    }
    1.0 / chance * card_count_by_arena as f64
}

/// Fill `card_count`, `card_count_by_arena`, `min_gold` and `max_gold`.
///
/// Gold uses the unscaled card count and is never revisited by arena scaling.
/// Fails when a gold product overflows to infinity.
pub fn apply_reward_fields(record: &mut ChestRecord) -> TransformResult<()> {
    record.card_count = record.random_spells.unwrap_or(0.0);
    record.card_count_by_arena = record.card_count.trunc() as i64;
    record.min_gold = finite("min_gold", record.card_count * record.min_gold_per_card.unwrap_or(0.0))?;
    record.max_gold = finite("max_gold", record.card_count * record.max_gold_per_card.unwrap_or(0.0))?;
    Ok(())
}

fn finite(field: &str, value: f64) -> TransformResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TransformError::OutOfRange {
            field: field.to_string(),
        })
    }
}

/// Resolve the record's arena and derive the arena-scaled counts.
///
/// Returns false when the arena is unknown; the record then keeps its raw
/// arena value and unscaled counts.
pub fn enrich_arena(record: &mut ChestRecord, arenas: &dyn ArenaLookup) -> bool {
    let Some(info) = record.arena.lookup_key().and_then(|key| arenas.arena(&key)) else {
        return false;
    };

    let by_arena = card_count_by_arena(
        &record.name,
        info.arena,
        record.card_count,
        info.chest_reward_multiplier,
    );
    record.arena = ArenaRef::Resolved(info);
    record.card_count_by_arena = by_arena;

    let rare = card_count_by_type(by_arena, record.rare_chance.unwrap_or(0.0));
    let epic = card_count_by_type(by_arena, record.epic_chance.unwrap_or(0.0));
    let legendary = card_count_by_type(by_arena, record.legendary_chance.unwrap_or(0.0));

    record.card_count_rare = Some(rare);
    record.card_count_epic = Some(epic);
    record.card_count_legendary = Some(legendary);
    record.card_count_common = Some(by_arena as f64 - rare - epic - legendary);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::ArenaTable;
    use crate::models::ArenaInfo;
    use serde_json::json;

    fn arena(name: &str, id: i64, multiplier: Option<f64>) -> ArenaInfo {
        ArenaInfo {
            name: name.into(),
            arena: id,
            key: None,
            chest_reward_multiplier: multiplier,
            shop_chest_reward_multiplier: Some(100.0),
            title: None,
            subtitle: None,
        }
    }

    #[test]
    fn test_multiplier_scales_count() {
        assert_eq!(card_count_by_arena("Wooden", 1, 10.0, Some(200.0)), 20);
        assert_eq!(card_count_by_arena("Wooden", 1, 10.0, Some(110.0)), 11);
        // truncated, not rounded
        assert_eq!(card_count_by_arena("Wooden", 1, 3.0, Some(150.0)), 4);
        assert_eq!(card_count_by_arena("Wooden", 1, 5.0, Some(130.0)), 6);
    }

    #[test]
    fn test_unscaled_chest_families() {
        for name in ["LegendaryChest", "EpicChest", "DraftChest", "SeasonReward3"] {
            assert_eq!(card_count_by_arena(name, 5, 7.0, Some(300.0)), 7);
            assert_eq!(card_count_by_arena(name, 5, 7.0, None), 7);
        }
    }

    #[test]
    fn test_fractional_spells_truncate() {
        assert_eq!(card_count_by_arena("LegendaryChest", 1, 2.5, None), 2);
        assert_eq!(card_count_by_arena("Wooden", 1, 2.5, Some(300.0)), 7);
    }

    #[test]
    fn test_missing_or_zero_multiplier() {
        assert_eq!(card_count_by_arena("Wooden", 1, 10.0, None), 0);
        assert_eq!(card_count_by_arena("Wooden", 1, 10.0, Some(0.0)), 0);
    }

    #[test]
    fn test_card_count_by_type() {
        assert_eq!(card_count_by_type(20, 0.0), 0.0);
        assert_eq!(card_count_by_type(20, 10.0), 2.0);
        assert_eq!(card_count_by_type(20, 40.0), 0.5);
    }

    #[test]
    fn test_gold_uses_unscaled_count() {
        let mut record = ChestRecord::new("Wooden", json!("Arena1"));
        record.random_spells = Some(8.0);
        record.min_gold_per_card = Some(5.0);
        record.max_gold_per_card = Some(9.0);
        apply_reward_fields(&mut record).unwrap();

        let table = ArenaTable::new(vec![arena("Arena1", 1, Some(200.0))]);
        assert!(enrich_arena(&mut record, &table));

        assert_eq!(record.card_count, 8.0);
        assert_eq!(record.card_count_by_arena, 16);
        assert_eq!(record.min_gold, 40.0);
        assert_eq!(record.max_gold, 72.0);
    }

    #[test]
    fn test_missing_inputs_default_to_zero() {
        let mut record = ChestRecord::new("Orphan", json!("Arena1"));
        apply_reward_fields(&mut record).unwrap();
        assert_eq!(record.card_count, 0.0);
        assert_eq!(record.min_gold, 0.0);
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        let mut record = ChestRecord::new("Wooden", json!("Arena1"));
        record.random_spells = Some(i64::MAX as f64);
        record.min_gold_per_card = Some(2.0);
        apply_reward_fields(&mut record).unwrap();

        assert_eq!(record.min_gold, 18_446_744_073_709_551_616.0);
        assert_eq!(record.card_count_by_arena, i64::MAX);
    }

    #[test]
    fn test_infinite_gold_is_rejected() {
        let mut record = ChestRecord::new("Wooden", json!("Arena1"));
        record.random_spells = Some(1e300);
        record.max_gold_per_card = Some(1e300);
        let err = apply_reward_fields(&mut record).unwrap_err();
        assert!(matches!(err, TransformError::OutOfRange { ref field } if field == "max_gold"));
    }

    #[test]
    fn test_enrich_computes_rarity_split() {
        let mut record = ChestRecord::new("Giant", json!("Arena1"));
        record.random_spells = Some(10.0);
        record.rare_chance = Some(10.0);
        record.epic_chance = Some(0.0);
        record.legendary_chance = Some(40.0);
        apply_reward_fields(&mut record).unwrap();

        let table = ArenaTable::new(vec![arena("Arena1", 1, Some(200.0))]);
        assert!(enrich_arena(&mut record, &table));

        assert_eq!(record.arena.arena_id(), Some(1));
        assert_eq!(record.card_count_rare, Some(2.0));
        assert_eq!(record.card_count_epic, Some(0.0));
        assert_eq!(record.card_count_legendary, Some(0.5));
        assert_eq!(record.card_count_common, Some(17.5));
    }

    #[test]
    fn test_common_count_can_go_negative() {
        let mut record = ChestRecord::new("Weird", json!("Arena1"));
        record.random_spells = Some(1.0);
        record.rare_chance = Some(0.5);
        apply_reward_fields(&mut record).unwrap();

        let table = ArenaTable::new(vec![arena("Arena1", 1, Some(100.0))]);
        enrich_arena(&mut record, &table);
        assert_eq!(record.card_count_common, Some(-1.0));
    }

    #[test]
    fn test_unknown_arena_keeps_raw_value() {
        let mut record = ChestRecord::new("Wooden", json!("Arena42"));
        record.random_spells = Some(4.0);
        apply_reward_fields(&mut record).unwrap();

        let table = ArenaTable::new(vec![arena("Arena1", 1, Some(200.0))]);
        assert!(!enrich_arena(&mut record, &table));

        assert_eq!(record.arena, ArenaRef::Unresolved(json!("Arena42")));
        assert_eq!(record.card_count_by_arena, 4);
        assert!(record.card_count_rare.is_none());
    }
}
