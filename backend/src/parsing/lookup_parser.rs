//! Parsers for the two lookup files: country → ISO alpha-3 code and
//! country → continent.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::source::error::{ErrorContext, SourceError, SourceResult};

pub const ISO_COUNTRY_COLUMN: &str = "Country";
pub const ISO_ALPHA3_COLUMN: &str = "Alpha-3 code";
pub const CONTINENT_COLUMN: &str = "Continent";
pub const CONTINENT_COUNTRY_COLUMN: &str = "Country";

/// Strip the padding and stray quotes the ISO file wraps its codes in (` "AFG"`).
fn clean_cell(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}

fn column_index(headers: &csv::StringRecord, name: &str, operation: &str) -> SourceResult<usize> {
    headers
        .iter()
        .position(|h| clean_cell(h) == name)
        .ok_or_else(|| {
            SourceError::schema_with_context(
                format!("missing '{}' column", name),
                ErrorContext::new(operation),
            )
        })
}

fn read_pairs<R: Read>(
    reader: R,
    key_column: &str,
    value_column: &str,
    operation: &str,
) -> SourceResult<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let key_idx = column_index(&headers, key_column, operation)?;
    let value_idx = column_index(&headers, value_column, operation)?;

    let mut pairs = Vec::new();
    for result in reader.records() {
        let record = result?;
        let key = record.get(key_idx).map(clean_cell).unwrap_or("");
        let value = record.get(value_idx).map(clean_cell).unwrap_or("");
        if key.is_empty() || value.is_empty() {
            continue;
        }
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}

/// Parse the country → ISO alpha-3 table. Later rows win on duplicates.
pub fn parse_iso_codes<R: Read>(reader: R) -> SourceResult<BTreeMap<String, String>> {
    Ok(read_pairs(reader, ISO_COUNTRY_COLUMN, ISO_ALPHA3_COLUMN, "parse_iso_codes")?
        .into_iter()
        .collect())
}

/// Parse the continent table into `(continent, country)` rows, file order kept.
pub fn parse_continents<R: Read>(reader: R) -> SourceResult<Vec<(String, String)>> {
    read_pairs(
        reader,
        CONTINENT_COLUMN,
        CONTINENT_COUNTRY_COLUMN,
        "parse_continents",
    )
}

fn open(path: &Path, operation: &str) -> SourceResult<std::io::BufReader<std::fs::File>> {
    std::fs::File::open(path)
        .map(std::io::BufReader::new)
        .map_err(|e| {
            SourceError::io(
                e,
                ErrorContext::new(operation).with_resource(path.display().to_string()),
            )
        })
}

pub fn parse_iso_codes_file(path: &Path) -> SourceResult<BTreeMap<String, String>> {
    parse_iso_codes(open(path, "open_iso_codes")?)
        .map_err(|e| e.with_resource(path.display().to_string()))
}

pub fn parse_continents_file(path: &Path) -> SourceResult<Vec<(String, String)>> {
    parse_continents(open(path, "open_continents")?)
        .map_err(|e| e.with_resource(path.display().to_string()))
}
