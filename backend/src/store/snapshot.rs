//! Everything derived from one refresh cycle, built in one go.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

use crate::api::{
    CaseFigures, ChartSet, CountryList, DerivedMetrics, Figure, SnapshotRow, SummaryData,
    TableData,
};
use crate::models::{CountryTable, Metric, Series, ViewFilters, WideTable};
use crate::parsing::{parse_continents_file, parse_iso_codes_file, parse_series_file};
use crate::services::{aggregation, charts, dashboard, lookups, metrics, reshape, tables};
use crate::source::{DataPaths, SourceFile, SourceResult};

/// The four aggregated per-country tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseTables {
    pub confirmed: CountryTable,
    pub recovered: CountryTable,
    pub deaths: CountryTable,
    pub active: CountryTable,
}

impl CaseTables {
    pub fn get(&self, metric: Metric) -> &CountryTable {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Recovered => &self.recovered,
            Metric::Deaths => &self.deaths,
            Metric::Active => &self.active,
        }
    }
}

/// World series for each case category.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSeries {
    pub confirmed: Series,
    pub recovered: Series,
    pub deaths: Series,
    pub active: Series,
}

impl CaseSeries {
    pub fn from_tables(tables: &CaseTables) -> Self {
        Self {
            confirmed: reshape::global_series(&tables.confirmed),
            recovered: reshape::global_series(&tables.recovered),
            deaths: reshape::global_series(&tables.deaths),
            active: reshape::global_series(&tables.active),
        }
    }

    pub fn get(&self, metric: Metric) -> &Series {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Recovered => &self.recovered,
            Metric::Deaths => &self.deaths,
            Metric::Active => &self.active,
        }
    }
}

/// What chart recomputation reads: tables, world series and the latest rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseData {
    pub tables: CaseTables,
    pub global: CaseSeries,
    pub rows: Vec<SnapshotRow>,
}

impl CaseData {
    /// Aggregate the three raw series and derive the active table.
    pub fn from_wide(
        confirmed: &WideTable,
        recovered: &WideTable,
        deaths: &WideTable,
    ) -> SourceResult<Self> {
        let confirmed = aggregation::merge_countries(confirmed);
        let recovered = aggregation::merge_countries(recovered);
        let deaths = aggregation::merge_countries(deaths);
        let active = aggregation::derive_active(&confirmed, &recovered, &deaths)?;

        let rows = tables::snapshot_table(&confirmed, &recovered, &deaths, &active);
        let case_tables = CaseTables {
            confirmed,
            recovered,
            deaths,
            active,
        };
        Ok(Self {
            global: CaseSeries::from_tables(&case_tables),
            tables: case_tables,
            rows,
        })
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.tables.confirmed.latest_date()
    }

    pub fn metrics(&self) -> DerivedMetrics {
        metrics::compute_metrics(
            &self.global.confirmed,
            &self.global.recovered,
            &self.global.deaths,
            &self.global.active,
        )
    }
}

/// Parsed contents of the data directory.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub confirmed: WideTable,
    pub recovered: WideTable,
    pub deaths: WideTable,
    pub iso_codes: BTreeMap<String, String>,
    pub continents: Vec<(String, String)>,
}

impl RawDataset {
    pub fn read(paths: &DataPaths) -> SourceResult<Self> {
        Self::read_with_series(paths, &paths.series_paths())
    }

    /// Series from `series` (confirmed, recovered, deaths), lookups from
    /// their usual place in `paths`.
    pub fn read_with_series(paths: &DataPaths, series: &[PathBuf; 3]) -> SourceResult<Self> {
        let [confirmed, recovered, deaths] = series;
        Ok(Self {
            confirmed: parse_series_file(confirmed)?,
            recovered: parse_series_file(recovered)?,
            deaths: parse_series_file(deaths)?,
            iso_codes: parse_iso_codes_file(&paths.path(SourceFile::IsoCodes))?,
            continents: parse_continents_file(&paths.path(SourceFile::Continents))?,
        })
    }
}

/// Settings that shape the precomputed parts of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotOptions {
    pub default_country: String,
    pub default_filters: ViewFilters,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            default_country: "India".to_string(),
            default_filters: ViewFilters::default(),
        }
    }
}

/// Immutable bundle served until the next successful refresh.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    /// Assigned by the store on install.
    pub version: u64,
    /// Assigned by the store on install.
    pub refreshed_at: DateTime<Utc>,
    /// SHA-256 over the three series files.
    pub checksum: String,
    pub data: CaseData,
    pub summary: SummaryData,
    pub table: TableData,
    pub countries: CountryList,
    pub map: Figure,
    pub sunbursts: CaseFigures,
    pub default_filters: ViewFilters,
    pub default_charts: ChartSet,
}

impl DatasetSnapshot {
    /// Derive every view from parsed files.
    pub fn build(
        raw: &RawDataset,
        checksum: impl Into<String>,
        options: &SnapshotOptions,
    ) -> SourceResult<Self> {
        let data = CaseData::from_wide(&raw.confirmed, &raw.recovered, &raw.deaths)?;
        let as_of = data.as_of();

        let summary = metrics::summary_data(data.metrics());
        let table = tables::display_table(&data.rows, as_of);
        let countries = tables::country_list(&data.rows, &options.default_country);

        let iso_codes = lookups::iso_codes(&raw.iso_codes);
        let map = charts::world_map(&tables::map_rows(&data.rows, &iso_codes));

        let continents = lookups::continent_rows(&raw.continents);
        let breakdown = tables::continent_breakdown(&data.rows, &continents);
        let sunbursts = CaseFigures {
            confirmed: charts::sunburst_chart(&breakdown, Metric::Confirmed),
            recovered: charts::sunburst_chart(&breakdown, Metric::Recovered),
            deceased: charts::sunburst_chart(&breakdown, Metric::Deaths),
            active: charts::sunburst_chart(&breakdown, Metric::Active),
        };

        let default_charts = dashboard::compute_chart_set(&data, &options.default_filters);

        info!(
            countries = data.rows.len(),
            dates = data.tables.confirmed.dates.len(),
            as_of = ?as_of,
            corrections = lookups::CORRECTIONS_VERSION,
            "Built dataset snapshot"
        );

        Ok(Self {
            version: 0,
            refreshed_at: Utc::now(),
            checksum: checksum.into(),
            data,
            summary,
            table,
            countries,
            map,
            sunbursts,
            default_filters: options.default_filters.clone(),
            default_charts,
        })
    }

    /// Read the data directory and build.
    pub fn load(
        paths: &DataPaths,
        checksum: impl Into<String>,
        options: &SnapshotOptions,
    ) -> SourceResult<Self> {
        let raw = RawDataset::read(paths)?;
        Self::build(&raw, checksum, options)
    }

    /// Build from freshly downloaded series that are not in place yet.
    pub fn load_with_series(
        paths: &DataPaths,
        series: &[PathBuf; 3],
        checksum: impl Into<String>,
        options: &SnapshotOptions,
    ) -> SourceResult<Self> {
        let raw = RawDataset::read_with_series(paths, series)?;
        Self::build(&raw, checksum, options)
    }

    pub fn sunburst(&self, metric: Metric) -> &Figure {
        self.sunbursts.get(metric)
    }

    /// Whole hours since the refresh, for the "last updated" line.
    pub fn hours_since_refresh(&self, now: DateTime<Utc>) -> i64 {
        (now - self.refreshed_at).num_hours().max(0)
    }
}
