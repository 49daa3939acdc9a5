//! Typed dashboard controls.
//!
//! The page submits free-form strings; these types are what the computation
//! layer sees after the controller has validated them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved country token meaning "whole world".
pub const GLOBAL_SENTINEL: &str = "Global";

/// The four case categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Confirmed,
    Recovered,
    Deaths,
    Active,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Confirmed,
        Metric::Recovered,
        Metric::Deaths,
        Metric::Active,
    ];

    /// Column label used in tables and control values.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Confirmed => "Confirmed",
            Metric::Recovered => "Recovered",
            Metric::Deaths => "Deaths",
            Metric::Active => "Active",
        }
    }

    /// Wording used in chart titles.
    pub fn case_name(self) -> &'static str {
        match self {
            Metric::Confirmed => "confirmed",
            Metric::Recovered => "recovered",
            Metric::Deaths => "deceased",
            Metric::Active => "active",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(Metric::Confirmed),
            "recovered" => Ok(Metric::Recovered),
            "deaths" | "deceased" => Ok(Metric::Deaths),
            "active" => Ok(Metric::Active),
            other => Err(format!("unknown metric '{}'", other)),
        }
    }
}

/// Ranking direction. `Highest` sorts descending before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Highest,
    Lowest,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Highest => "highest",
            SortOrder::Lowest => "lowest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highest" => Ok(SortOrder::Highest),
            "lowest" => Ok(SortOrder::Lowest),
            other => Err(format!("unknown order '{}'", other)),
        }
    }
}

/// Number of countries shown in the ranked bar chart, always in `1..=180`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopN(usize);

impl TopN {
    pub const MIN: usize = 1;
    pub const MAX: usize = 180;

    /// Clamp any integer into the accepted range.
    pub fn clamped(value: i64) -> Self {
        TopN(value.clamp(Self::MIN as i64, Self::MAX as i64) as usize)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        TopN(10)
    }
}

/// Whether charts show the world aggregate or a single country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "scope", content = "country", rename_all = "lowercase")]
pub enum CountryScope {
    #[default]
    Global,
    Country(String),
}

impl CountryScope {
    pub fn country(&self) -> Option<&str> {
        match self {
            CountryScope::Global => None,
            CountryScope::Country(name) => Some(name.as_str()),
        }
    }

    /// Place phrase used in chart titles.
    pub fn place(&self) -> &str {
        match self {
            CountryScope::Global => "the world",
            CountryScope::Country(name) => name.as_str(),
        }
    }
}

/// Which tab of the control card is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Global,
    Country,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" | "tab-1" => Ok(Tab::Global),
            "country" | "tab-2" => Ok(Tab::Country),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// Validated control values for one chart recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ViewFilters {
    pub top: TopN,
    pub order: SortOrder,
    pub metric: Metric,
    pub scope: CountryScope,
}
