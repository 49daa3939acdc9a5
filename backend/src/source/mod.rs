//! Upstream CSV acquisition.
//!
//! - [`fetcher`]: the [`Fetcher`] seam and its HTTP implementation
//! - [`loader`]: startup download, periodic refresh and snapshot installs
//! - [`error`]: error types shared with the parsers

pub mod error;
pub mod fetcher;
pub mod loader;

use std::path::{Path, PathBuf};

use crate::config::SourceSettings;

pub use error::{ErrorContext, SourceError, SourceResult};
pub use fetcher::{Fetcher, HttpFetcher};
pub use loader::{run_refresh_loop, DatasetLoader, RefreshOutcome};

/// The five files the dashboard is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFile {
    Confirmed,
    Recovered,
    Deaths,
    IsoCodes,
    Continents,
}

impl SourceFile {
    /// The series re-fetched on every refresh.
    pub const SERIES: [SourceFile; 3] = [
        SourceFile::Confirmed,
        SourceFile::Recovered,
        SourceFile::Deaths,
    ];

    pub const ALL: [SourceFile; 5] = [
        SourceFile::Confirmed,
        SourceFile::Recovered,
        SourceFile::Deaths,
        SourceFile::IsoCodes,
        SourceFile::Continents,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SourceFile::Confirmed => "time_series_covid19_confirmed_global.csv",
            SourceFile::Recovered => "time_series_covid19_recovered_global.csv",
            SourceFile::Deaths => "time_series_covid19_deaths_global.csv",
            SourceFile::IsoCodes => "country_to_iso.csv",
            SourceFile::Continents => "countries_continents.csv",
        }
    }

    pub fn url(self, settings: &SourceSettings) -> &str {
        match self {
            SourceFile::Confirmed => &settings.confirmed_url,
            SourceFile::Recovered => &settings.recovered_url,
            SourceFile::Deaths => &settings.deaths_url,
            SourceFile::IsoCodes => &settings.iso_codes_url,
            SourceFile::Continents => &settings.continents_url,
        }
    }
}

/// Layout of the local data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    dir: PathBuf,
}

impl DataPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final location of a file.
    pub fn path(&self, file: SourceFile) -> PathBuf {
        self.dir.join(file.file_name())
    }

    /// Download target; renamed onto [`DataPaths::path`] once complete.
    pub fn part_path(&self, file: SourceFile) -> PathBuf {
        self.dir.join(format!("{}.part", file.file_name()))
    }

    pub fn series_paths(&self) -> [PathBuf; 3] {
        SourceFile::SERIES.map(|f| self.path(f))
    }

    pub fn series_part_paths(&self) -> [PathBuf; 3] {
        SourceFile::SERIES.map(|f| self.part_path(f))
    }
}
