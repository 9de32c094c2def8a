//! Static definition catalogs: elements, weathers, hexes, spells, abilities,
//! artifacts, and combatant templates.
//!
//! All lookups are by normalized string key and fall back to a neutral
//! default (or `None`) on miss instead of failing.

pub mod abilities;
pub mod artifacts;
pub mod elements;
pub mod hexes;
pub mod spells;
pub mod templates;

/// Normalize a catalog key: lowercase, ascii alphanumerics only.
pub fn normalize_key(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
