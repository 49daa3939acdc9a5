//! Headline statistics for the summary cards.

use crate::api::{DerivedMetrics, SummaryCard, SummaryData};
use crate::models::DateValue;
use num_format::{Locale, ToFormattedString};

/// World population used for the per-million figure.
pub const WORLD_POPULATION: f64 = 7_796_127_694.0;

fn latest(series: &[DateValue]) -> i64 {
    series.last().map(|p| p.value).unwrap_or(0)
}

/// Latest minus second latest; 0 when there is only one day.
fn change(series: &[DateValue]) -> i64 {
    match series {
        [.., prev, last] => last.value - prev.value,
        _ => 0,
    }
}

fn percent_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Compute totals, deltas and rates from the four global series.
pub fn compute_metrics(
    confirmed: &[DateValue],
    recovered: &[DateValue],
    deaths: &[DateValue],
    active: &[DateValue],
) -> DerivedMetrics {
    let total_confirmed = latest(confirmed);
    let total_recovered = latest(recovered);
    let total_deaths = latest(deaths);
    let total_active = latest(active);

    let change_confirmed = change(confirmed);
    let change_recovered = change(recovered);
    let change_deaths = change(deaths);
    let change_active = change_confirmed - change_recovered + change_deaths;

    DerivedMetrics {
        total_confirmed,
        total_recovered,
        total_deaths,
        total_active,
        change_confirmed,
        change_recovered,
        change_deaths,
        change_active,
        active_rate: percent_of(total_active, total_confirmed),
        recovery_rate: percent_of(total_recovered, total_confirmed),
        mortality_rate: percent_of(total_deaths, total_confirmed),
        cases_per_million: 1e6 * total_confirmed as f64 / WORLD_POPULATION,
    }
}

/// `1234567` → `1,234,567`, `-1234` → `-1,234`.
pub fn format_thousands(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Always-signed display: `+50`, `-1,234`, `+0`.
pub fn format_signed(value: i64) -> String {
    if value >= 0 {
        format!("+{}", format_thousands(value))
    } else {
        format_thousands(value)
    }
}

/// Build the four headline cards in display order.
pub fn summary_cards(metrics: &DerivedMetrics) -> Vec<SummaryCard> {
    let card = |title: &str, change: i64, total: i64| SummaryCard {
        title: title.to_string(),
        change: format_signed(change),
        total: format_thousands(total),
    };
    vec![
        card("Confirmed", metrics.change_confirmed, metrics.total_confirmed),
        card("Recovered", metrics.change_recovered, metrics.total_recovered),
        card("Deceased", metrics.change_deaths, metrics.total_deaths),
        card("Active", metrics.change_active, metrics.total_active),
    ]
}

pub fn summary_data(metrics: DerivedMetrics) -> SummaryData {
    SummaryData {
        cards: summary_cards(&metrics),
        metrics,
    }
}
