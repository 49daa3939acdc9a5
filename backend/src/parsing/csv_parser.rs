use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::models::{parse_source_date, RegionRow, WideTable};
use crate::source::error::{ErrorContext, SourceError, SourceResult};

pub const COUNTRY_COLUMN: &str = "Country/Region";
pub const PROVINCE_COLUMN: &str = "Province/State";
pub const LAT_COLUMN: &str = "Lat";
/// Some revisions of the upstream files spell it `Long_`.
pub const LONG_COLUMNS: [&str; 2] = ["Long", "Long_"];

/// Column layout of a series file, resolved from its header.
#[derive(Debug)]
struct SeriesHeader {
    country: usize,
    province: Option<usize>,
    lat: Option<usize>,
    long: Option<usize>,
    /// (column index, date) in file order
    dates: Vec<(usize, NaiveDate)>,
}

fn resolve_header(headers: &csv::StringRecord) -> SourceResult<SeriesHeader> {
    let mut country = None;
    let mut province = None;
    let mut lat = None;
    let mut long = None;
    let mut dates = Vec::new();

    for (idx, name) in headers.iter().enumerate() {
        let name = name.trim();
        if name == COUNTRY_COLUMN {
            country = Some(idx);
        } else if name == PROVINCE_COLUMN {
            province = Some(idx);
        } else if name == LAT_COLUMN {
            lat = Some(idx);
        } else if LONG_COLUMNS.contains(&name) {
            long = Some(idx);
        } else if let Some(date) = parse_source_date(name) {
            dates.push((idx, date));
        } else {
            return Err(SourceError::schema_with_context(
                format!("unexpected column '{}'", name),
                ErrorContext::new("parse_series_header").with_details(format!("column={}", idx)),
            ));
        }
    }

    let country = country.ok_or_else(|| {
        SourceError::schema_with_context(
            format!("missing '{}' column", COUNTRY_COLUMN),
            ErrorContext::new("parse_series_header"),
        )
    })?;

    if dates.is_empty() {
        return Err(SourceError::schema_with_context(
            "no date columns",
            ErrorContext::new("parse_series_header"),
        ));
    }

    if let Some(pair) = dates.windows(2).find(|w| w[0].1 >= w[1].1) {
        return Err(SourceError::schema_with_context(
            format!("date columns out of order: {} then {}", pair[0].1, pair[1].1),
            ErrorContext::new("parse_series_header"),
        ));
    }

    Ok(SeriesHeader {
        country,
        province,
        lat,
        long,
        dates,
    })
}

/// Parse one count cell. Blank cells count as zero.
fn parse_count(raw: &str, line: u64, date: NaiveDate) -> SourceResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v.round() as i64),
        _ => Err(SourceError::schema_with_context(
            format!("non-numeric count '{}'", raw),
            ErrorContext::new("parse_series_row").with_details(format!("line={}, date={}", line, date)),
        )),
    }
}

fn optional_text(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn optional_float(record: &csv::StringRecord, idx: Option<usize>) -> Option<f64> {
    idx.and_then(|i| record.get(i))
        .and_then(|s| s.trim().parse::<f64>().ok())
}

/// Parse a wide series CSV (`Province/State, Country/Region, Lat, Long, <M/D/YY>...`).
pub fn parse_series_csv<R: Read>(reader: R) -> SourceResult<WideTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header = resolve_header(reader.headers()?)?;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let country = record
            .get(header.country)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SourceError::schema_with_context(
                    "row without country",
                    ErrorContext::new("parse_series_row").with_details(format!("line={}", line)),
                )
            })?
            .to_string();

        let values = header
            .dates
            .iter()
            .map(|(idx, date)| parse_count(record.get(*idx).unwrap_or(""), line, *date))
            .collect::<SourceResult<Vec<i64>>>()?;

        rows.push(RegionRow {
            country,
            province: optional_text(&record, header.province),
            lat: optional_float(&record, header.lat),
            long: optional_float(&record, header.long),
            values,
        });
    }

    Ok(WideTable {
        dates: header.dates.into_iter().map(|(_, d)| d).collect(),
        rows,
    })
}

/// Parse a series CSV from disk.
pub fn parse_series_file(path: &Path) -> SourceResult<WideTable> {
    let file = std::fs::File::open(path).map_err(|e| {
        SourceError::io(
            e,
            ErrorContext::new("open_series").with_resource(path.display().to_string()),
        )
    })?;
    parse_series_csv(std::io::BufReader::new(file))
        .map_err(|e| e.with_resource(path.display().to_string()))
}
