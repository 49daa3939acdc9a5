//! Shared fixtures for the integration tests: small upstream CSVs and a
//! scripted in-memory fetcher.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use covid_dashboard::config::SourceSettings;
use covid_dashboard::source::{DatasetLoader, ErrorContext, Fetcher, SourceError, SourceResult};
use covid_dashboard::store::SnapshotOptions;

pub const HEADER: &str = "Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20";

pub const CONFIRMED_URL: &str = "https://fixtures.test/confirmed.csv";
pub const RECOVERED_URL: &str = "https://fixtures.test/recovered.csv";
pub const DEATHS_URL: &str = "https://fixtures.test/deaths.csv";
pub const ISO_URL: &str = "https://fixtures.test/iso.csv";
pub const CONTINENTS_URL: &str = "https://fixtures.test/continents.csv";

/// Confirmed series. Canada arrives as two provinces; the latest India value
/// is `40 + india_bump` so tests can produce a changed file.
pub fn confirmed_csv(india_bump: i64) -> String {
    format!(
        "{}\n\
         ,India,20.6,78.9,10,20,{}\n\
         Alberta,Canada,53.9,-116.6,1,2,3\n\
         Ontario,Canada,51.3,-85.3,2,3,5\n\
         ,Chad,15.5,18.7,0,1,1\n\
         ,US,40.0,-100.0,50,80,120\n",
        HEADER,
        40 + india_bump
    )
}

pub fn recovered_csv() -> String {
    format!(
        "{}\n\
         ,India,20.6,78.9,1,5,10\n\
         ,Canada,56.1,-106.3,0,1,2\n\
         ,Chad,15.5,18.7,0,0,0\n\
         ,US,40.0,-100.0,0,0,0\n",
        HEADER
    )
}

pub fn deaths_csv() -> String {
    format!(
        "{}\n\
         ,India,20.6,78.9,0,1,2\n\
         ,Canada,56.1,-106.3,0,0,1\n\
         ,Chad,15.5,18.7,0,0,0\n\
         ,US,40.0,-100.0,1,2,4\n",
        HEADER
    )
}

pub fn iso_csv() -> String {
    "Country,Alpha-2 code,Alpha-3 code\n\
     India, \"IN\", \"IND\"\n\
     Canada, \"CA\", \"CAN\"\n\
     Chad, \"TD\", \"TCD\"\n"
        .to_string()
}

pub fn continents_csv() -> String {
    "Continent,Country\n\
     Asia,India\n\
     North America,Canada\n\
     Africa,Chad\n\
     North America,US\n"
        .to_string()
}

enum Scripted {
    Transient,
    Status(u16),
}

/// Serves fixed bodies per URL. Failures can be queued per URL and are
/// consumed one per call before the body is served.
#[derive(Default)]
pub struct FakeFetcher {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    failures: Mutex<HashMap<String, Vec<Scripted>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeFetcher {
    pub fn with_fixtures() -> Self {
        let fetcher = Self::default();
        fetcher.serve(CONFIRMED_URL, confirmed_csv(0));
        fetcher.serve(RECOVERED_URL, recovered_csv());
        fetcher.serve(DEATHS_URL, deaths_csv());
        fetcher.serve(ISO_URL, iso_csv());
        fetcher.serve(CONTINENTS_URL, continents_csv());
        fetcher
    }

    pub fn serve(&self, url: &str, body: impl Into<String>) {
        self.bodies
            .lock()
            .insert(url.to_string(), body.into().into_bytes());
    }

    /// Fail the next `count` calls for `url` with a retryable transport error.
    pub fn fail_transient(&self, url: &str, count: usize) {
        let mut failures = self.failures.lock();
        let queue = failures.entry(url.to_string()).or_default();
        queue.extend((0..count).map(|_| Scripted::Transient));
    }

    /// Fail the next call for `url` with an HTTP status.
    pub fn fail_status(&self, url: &str, status: u16) {
        self.failures
            .lock()
            .entry(url.to_string())
            .or_default()
            .push(Scripted::Status(status));
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> SourceResult<Vec<u8>> {
        *self.calls.lock().entry(url.to_string()).or_default() += 1;

        let scripted = {
            let mut failures = self.failures.lock();
            failures
                .get_mut(url)
                .filter(|q| !q.is_empty())
                .map(|q| q.remove(0))
        };
        let context = || ErrorContext::new("fetch").with_resource(url.to_string());
        match scripted {
            Some(Scripted::Transient) => {
                return Err(SourceError::transport("connection reset", context()))
            }
            Some(Scripted::Status(status)) => {
                return Err(SourceError::http_status(status, "scripted", context()))
            }
            None => {}
        }

        self.bodies
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::http_status(404, "Not Found", context()))
    }
}

/// Settings pointing at the fixture URLs, with no retry delay.
pub fn settings(data_dir: &std::path::Path) -> SourceSettings {
    SourceSettings {
        data_dir: data_dir.to_path_buf(),
        max_retries: 2,
        retry_delay_ms: 0,
        confirmed_url: CONFIRMED_URL.to_string(),
        recovered_url: RECOVERED_URL.to_string(),
        deaths_url: DEATHS_URL.to_string(),
        iso_codes_url: ISO_URL.to_string(),
        continents_url: CONTINENTS_URL.to_string(),
        ..SourceSettings::default()
    }
}

pub fn loader(fetcher: Arc<FakeFetcher>, data_dir: &std::path::Path) -> DatasetLoader {
    DatasetLoader::new(fetcher, settings(data_dir), SnapshotOptions::default())
}
