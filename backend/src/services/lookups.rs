//! Static country-name correction tables.
//!
//! Upstream spellings drift over time, so these are kept as plain data and
//! bumped together with `CORRECTIONS_VERSION` whenever an entry changes.

use std::collections::BTreeMap;

pub const CORRECTIONS_VERSION: &str = "2020-12-13";

/// Source-file spellings that the ISO lookup does not know. Applied before
/// the lookup file, so the file wins on conflicts.
pub const ISO_OVERRIDES: &[(&str, &str)] = &[
    ("US", "USA"),
    ("IRAN", "IRN"),
    ("Congo (Brazzaville)", "COG"),
    ("Congo (Kinshasa)", "COD"),
    ("Cote d'Ivoire", "CIV"),
    ("Czechia", "CZE"),
    ("Holy See", "VAT"),
    ("Iran", "IRN"),
    ("Korea, South", "KOR"),
    ("Moldova", "MDA"),
    ("North Macedonia", "MKD"),
    ("Taiwan*", "TWN"),
    ("Tanzania", "TZA"),
    ("Syria", "SYR"),
    ("Laos", "LAO"),
];

/// Continent-file spellings rewritten to match the series files.
pub const CONTINENT_RENAMES: &[(&str, &str)] = &[
    ("Burkina", "Burkina Faso"),
    ("Burma (Myanmar)", "Burma"),
    ("Congo", "Congo (Brazzaville)"),
    ("Congo, Democratic Republic of", "Congo (Kinshasa)"),
    ("Russian Federation", "Russia"),
];

/// `(continent, country)` rows missing from the continent file.
pub const CONTINENT_ADDITIONS: &[(&str, &str)] = &[
    ("Africa", "Congo (Brazzaville)"),
    ("Africa", "Congo (Kinshasa)"),
    ("Europe", "Czechia"),
    ("Asia", "Taiwan*"),
    ("Africa", "Western Sahara"),
];

/// Countries whose recovered series stopped being reported; the side table
/// shows `-` for their Recovered and Active columns.
pub const UNREPORTED_RECOVERIES: &[&str] = &["US"];

/// Display names used in chart titles.
pub const TITLE_NAMES: &[(&str, &str)] = &[("US", "the United States")];

/// Merge the overrides with the parsed ISO file.
pub fn iso_codes(from_file: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut codes: BTreeMap<String, String> = ISO_OVERRIDES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    codes.extend(from_file.iter().map(|(k, v)| (k.clone(), v.clone())));
    codes
}

/// Apply renames to the parsed continent rows and append the additions.
pub fn continent_rows(from_file: &[(String, String)]) -> Vec<(String, String)> {
    let renames: BTreeMap<&str, &str> = CONTINENT_RENAMES.iter().copied().collect();
    from_file
        .iter()
        .map(|(continent, country)| {
            let country = renames
                .get(country.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| country.clone());
            (continent.clone(), country)
        })
        .chain(
            CONTINENT_ADDITIONS
                .iter()
                .map(|(c, n)| (c.to_string(), n.to_string())),
        )
        .collect()
}

pub fn reports_recoveries(country: &str) -> bool {
    !UNREPORTED_RECOVERIES.contains(&country)
}

pub fn title_name(country: &str) -> &str {
    TITLE_NAMES
        .iter()
        .find(|(k, _)| *k == country)
        .map(|(_, v)| *v)
        .unwrap_or(country)
}
