use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Normalized result of one successful lookup.
///
/// Produced once per lookup by [`crate::normalize::normalize`] and replaced
/// wholesale on the next one; nothing mutates it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub country: String,
    /// Wall-clock time at the location, when the provider supplied one.
    pub local_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Kept at the provider's precision; rounding happens at render time.
    pub temperature_c: f64,
    /// Rounded to the nearest whole degree during normalization.
    pub feels_like_c: f64,
    pub wind_kph: f64,
    pub humidity_pct: u8,
    pub condition_text: String,
    pub condition_icon: Option<String>,
    pub category: ConditionCategory,
    pub last_updated: Option<NaiveDateTime>,
}

/// One cell of the forecast grid: a day in daily mode, an hour slot in
/// hourly mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Weekday name ("Sunday") or hour-of-day label ("6:00 AM").
    pub label: String,
    pub max_temp_c: Option<f64>,
    /// Hourly entries carry no minimum.
    pub min_temp_c: Option<f64>,
    pub condition_text: String,
    pub condition_icon: Option<String>,
    pub category: ConditionCategory,
    pub chance_of_rain_pct: Option<u8>,
}

impl ForecastEntry {
    /// Condition text used for hour slots the provider had no data for.
    pub const NO_DATA: &'static str = "No data";

    /// Placeholder entry for a requested slot with no matching payload data.
    /// The slot list drives the grid, so the entry exists either way.
    pub fn no_data(label: String) -> Self {
        Self {
            label,
            max_temp_c: None,
            min_temp_c: None,
            condition_text: Self::NO_DATA.to_string(),
            condition_icon: None,
            category: ConditionCategory::Cloudy,
            chance_of_rain_pct: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.max_temp_c.is_none() && self.condition_text == Self::NO_DATA
    }

    /// Rain chance for display; absent data reads as 0%.
    pub fn chance_of_rain(&self) -> u8 {
        self.chance_of_rain_pct.unwrap_or(0)
    }
}

/// Coarse classification of a free-text condition description, used to pick
/// iconography and backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    Sunny,
    Rainy,
    Cloudy,
}

impl ConditionCategory {
    /// Case-insensitive substring match against a fixed keyword table.
    /// Anything unrecognized counts as cloudy.
    pub fn classify(condition_text: &str) -> Self {
        const SUNNY: &[&str] = &["sun", "clear"];
        const RAINY: &[&str] = &["rain", "drizzle", "shower", "thunder"];

        let lower = condition_text.to_lowercase();
        if SUNNY.iter().any(|keyword| lower.contains(keyword)) {
            ConditionCategory::Sunny
        } else if RAINY.iter().any(|keyword| lower.contains(keyword)) {
            ConditionCategory::Rainy
        } else {
            ConditionCategory::Cloudy
        }
    }
}

/// Forecast granularity. The near-identical daily and hourly presentation
/// variants differ only in this selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastMode {
    Daily,
    Hourly,
}

impl ForecastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMode::Daily => "daily",
            ForecastMode::Hourly => "hourly",
        }
    }

    pub const fn all() -> &'static [ForecastMode] {
        &[ForecastMode::Daily, ForecastMode::Hourly]
    }
}

impl std::fmt::Display for ForecastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ForecastMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "daily" => Ok(ForecastMode::Daily),
            "hourly" => Ok(ForecastMode::Hourly),
            _ => Err(anyhow::anyhow!(
                "Unknown forecast mode '{value}'. Supported modes: daily, hourly."
            )),
        }
    }
}

/// Knobs of the single upstream request.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Forecast window; the provider accepts 1 through 7.
    pub days: u8,
    pub include_air_quality: bool,
    pub include_alerts: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { days: 7, include_air_quality: false, include_alerts: false }
    }
}

impl FetchOptions {
    pub fn clamped_days(&self) -> u8 {
        self.days.clamp(1, 7)
    }
}
