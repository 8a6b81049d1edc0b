//! Template chest resolution.
//!
//! A chest naming a `base_chest` inherits stats from an already generated
//! chest of that name. Only chests accumulated before the dependent one are
//! visible, so a reference to a chest later in the file resolves to nothing.

use crate::models::{BaseChestStats, ChestRecord};

/// Stats of the first accumulated chest named `name`, or `None` when no
/// such chest has been generated yet.
pub fn get_base_chest_stats(name: &str, accumulated: &[ChestRecord]) -> Option<BaseChestStats> {
    accumulated
        .iter()
        .find(|record| record.name == name)
        .map(ChestRecord::base_stats)
}

/// Merge base chest stats into `record` when it declares a base chest.
///
/// Returns false when a base chest is declared but not found.
pub fn resolve_base_chest(record: &mut ChestRecord, accumulated: &[ChestRecord]) -> bool {
    let Some(base_name) = record.base_chest.as_deref().filter(|n| !n.is_empty()) else {
        return true;
    };

    match get_base_chest_stats(base_name, accumulated) {
        Some(stats) => {
            record.apply_base_stats(&stats);
            true
        }
        None => false,
    }
}
