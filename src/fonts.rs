//! Host font enumeration.

use crate::editor::DEFAULT_FONT_FAMILY;

/// Families offered when the host reports no fonts at all.
const FALLBACK_FAMILIES: &[&str] = &[DEFAULT_FONT_FAMILY, "Monospace", "Sans Serif", "Serif"];

/// Font family names installed on this machine, sorted and deduplicated.
///
/// Loading system fonts walks the font directories, so callers should cache
/// the result.
pub fn system_font_families() -> Vec<String> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let families = collect_families(
        db.faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str())),
    );
    tracing::debug!(count = families.len(), "loaded system font families");
    families
}

fn collect_families<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut families: Vec<String> = names
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .chain(FALLBACK_FAMILIES.iter().map(|name| (*name).to_string()))
        .collect();
    families.sort_by_key(|name| name.to_lowercase());
    families.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    families
}
