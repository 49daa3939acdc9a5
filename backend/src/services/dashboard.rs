//! View controller: validates submitted controls and produces chart sets.
//!
//! Before the first submission the snapshot's precomputed chart set is
//! served as-is. After it, every request recomputes the thirteen charts with
//! the latest submitted filters against whatever snapshot is installed.

use parking_lot::RwLock;
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, warn};

use crate::api::{CaseFigures, ChartRequest, ChartSet, ChartsResponse, Figure};
use crate::models::{
    CountryScope, Metric, Series, SortOrder, Tab, TopN, ViewFilters, GLOBAL_SENTINEL,
};
use crate::services::charts::{cumulative_chart, daily_chart, ranked_bar_chart, rate_chart};
use crate::services::reshape::select_series;
use crate::store::{CaseData, DatasetSnapshot};

/// Whether the page has submitted controls yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Default,
    Filtered(ViewFilters),
}

/// Holds the view state across requests.
#[derive(Debug, Default)]
pub struct ViewController {
    state: RwLock<ViewState>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state.read().clone()
    }

    /// Record a submission. Default moves to Filtered; Filtered stays there
    /// with the new filters. Returns the state this call installed, which a
    /// later submission may already have replaced.
    pub fn submit(&self, filters: ViewFilters) -> ViewState {
        let view = ViewState::Filtered(filters);
        *self.state.write() = view.clone();
        view
    }
}

/// Chart set for `state` against `snapshot`.
pub fn respond(state: &ViewState, snapshot: &DatasetSnapshot) -> ChartsResponse {
    match state {
        ViewState::Default => ChartsResponse {
            filtered: false,
            filters: snapshot.default_filters.clone(),
            snapshot_version: snapshot.version,
            charts: snapshot.default_charts.clone(),
        },
        ViewState::Filtered(filters) => ChartsResponse {
            filtered: true,
            filters: filters.clone(),
            snapshot_version: snapshot.version,
            charts: compute_chart_set(&snapshot.data, filters),
        },
    }
}

fn scoped_series<'a>(data: &'a CaseData, metric: Metric, scope: &CountryScope) -> Cow<'a, Series> {
    match scope {
        CountryScope::Global => Cow::Borrowed(data.global.get(metric)),
        CountryScope::Country(_) => match select_series(data.tables.get(metric), scope) {
            Some(series) => Cow::Owned(series),
            None => Cow::Borrowed(data.global.get(metric)),
        },
    }
}

fn per_case<F>(data: &CaseData, scope: &CountryScope, build: F) -> CaseFigures
where
    F: Fn(&Series, Metric, &CountryScope) -> Figure,
{
    let figure = |metric| build(&*scoped_series(data, metric, scope), metric, scope);
    CaseFigures {
        confirmed: figure(Metric::Confirmed),
        recovered: figure(Metric::Recovered),
        deceased: figure(Metric::Deaths),
        active: figure(Metric::Active),
    }
}

/// Build all thirteen charts with one set of filters.
pub fn compute_chart_set(data: &CaseData, filters: &ViewFilters) -> ChartSet {
    let scope = &filters.scope;
    ChartSet {
        bar: ranked_bar_chart(&data.rows, filters),
        cumulative: per_case(data, scope, |s, m, c| cumulative_chart(s, m, c)),
        daily: per_case(data, scope, |s, m, c| daily_chart(s, m, c)),
        rate: per_case(data, scope, |s, m, c| rate_chart(s, m, c)),
    }
}

fn parse_top(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.round() as i64),
        _ => None,
    }
}

fn resolve_top(raw: Option<&Value>, default: TopN) -> TopN {
    match raw {
        None | Some(Value::Null) => default,
        Some(value) => match parse_top(value) {
            Some(n) => {
                let top = TopN::clamped(n);
                if top.get() as i64 != n {
                    warn!(requested = n, used = top.get(), "Top-N clamped");
                }
                top
            }
            None => {
                warn!(value = %value, "Unreadable top-N, using default");
                default
            }
        },
    }
}

fn resolve_parsed<T>(raw: Option<&str>, default: T, what: &str) -> T
where
    T: std::str::FromStr<Err = String> + Copy,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => default,
        Some(s) => s.parse().unwrap_or_else(|e| {
            warn!(control = what, error = %e, "Falling back to default");
            default
        }),
    }
}

fn resolve_scope(
    tab: Option<&str>,
    country: Option<&str>,
    snapshot: &DatasetSnapshot,
) -> CountryScope {
    let country = country.map(str::trim).filter(|s| !s.is_empty());
    let tab = match tab {
        Some(t) => resolve_parsed(Some(t), Tab::Global, "tab"),
        None if country.is_some() => Tab::Country,
        None => Tab::Global,
    };

    match (tab, country) {
        (Tab::Global, _) => CountryScope::Global,
        (Tab::Country, None) => {
            warn!("Country tab submitted without a country, using global data");
            CountryScope::Global
        }
        (Tab::Country, Some(name)) if name.eq_ignore_ascii_case(GLOBAL_SENTINEL) => {
            debug!("Global sentinel selected");
            CountryScope::Global
        }
        (Tab::Country, Some(name)) if snapshot.data.tables.confirmed.contains(name) => {
            CountryScope::Country(name.to_string())
        }
        (Tab::Country, Some(name)) => {
            warn!(country = name, "Unknown country, using global data");
            CountryScope::Global
        }
    }
}

/// Turn raw control values into typed filters. Never fails: bad values
/// clamp or fall back to the snapshot defaults.
pub fn resolve_filters(request: &ChartRequest, snapshot: &DatasetSnapshot) -> ViewFilters {
    let defaults = &snapshot.default_filters;
    ViewFilters {
        top: resolve_top(request.top.as_ref(), defaults.top),
        order: resolve_parsed::<SortOrder>(request.order.as_deref(), defaults.order, "order"),
        metric: resolve_parsed::<Metric>(request.metric.as_deref(), defaults.metric, "metric"),
        scope: resolve_scope(request.tab.as_deref(), request.country.as_deref(), snapshot),
    }
}
