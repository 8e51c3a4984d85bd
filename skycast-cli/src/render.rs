//! Human-friendly card rendering for lookup results.
//!
//! Display temperatures are rounded to whole degrees here; the snapshot
//! keeps the provider's precision.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use skycast_core::{ConditionCategory, ForecastEntry, WeatherSnapshot};

pub fn render_snapshot(snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}, {}  {}",
        snapshot.location.name,
        snapshot.location.country,
        clock(snapshot.location.local_time)
    );
    let _ = writeln!(
        out,
        "{}C {}  {}",
        degrees(snapshot.current.temperature_c),
        glyph(snapshot.current.category),
        snapshot.current.condition_text
    );

    if !snapshot.forecast.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Forecast");
        for entry in &snapshot.forecast {
            let _ = writeln!(out, "{}", forecast_line(entry));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Feels like {}C   Humidity {}%   Wind {} km/h",
        degrees(snapshot.current.feels_like_c),
        snapshot.current.humidity_pct,
        snapshot.current.wind_kph
    );

    if let Some(last_updated) = snapshot.current.last_updated {
        let _ = writeln!(out, "Last updated: {}", last_updated.format("%-d/%m/%Y, %H:%M"));
    }

    out
}

/// The error banner: shown instead of, never alongside, a card.
pub fn render_error(message: &str) -> String {
    format!("! {message}")
}

fn forecast_line(entry: &ForecastEntry) -> String {
    let temps = match (entry.max_temp_c, entry.min_temp_c) {
        (Some(max), Some(min)) => format!("{} / {}", degrees(max), degrees(min)),
        (Some(max), None) => degrees(max),
        _ => "--".to_string(),
    };

    let rain = match entry.chance_of_rain_pct {
        Some(pct) => format!("  {pct}% rain"),
        None => String::new(),
    };

    format!(
        "  {:<10} {} {:<16} {}{}",
        entry.label,
        glyph(entry.category),
        entry.condition_text,
        temps,
        rain
    )
}

fn clock(timestamp: Option<NaiveDateTime>) -> String {
    timestamp.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

fn degrees(value: f64) -> String {
    format!("{}\u{b0}", value.round() as i64)
}

fn glyph(category: ConditionCategory) -> &'static str {
    match category {
        ConditionCategory::Sunny => "\u{2600}",
        ConditionCategory::Rainy => "\u{2602}",
        ConditionCategory::Cloudy => "\u{2601}",
    }
}
