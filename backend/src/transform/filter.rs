//! Which chest rows make it into the output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Retired chests keep their row with an `_old` suffix.
static OLD_CHEST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+_old").expect("valid regex"));

/// Chest families that are never listed.
const EXCLUDED_PREFIXES: [&str; 3] = ["ClanCrownChest", "Tournament", "Survival"];

/// Return true if a chest with this name should be included.
pub fn include_name(name: Option<&str>) -> bool {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return false,
    };

    if OLD_CHEST.is_match(name) {
        return false;
    }

    !EXCLUDED_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}
