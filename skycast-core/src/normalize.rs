//! Parse-and-validate boundary between the provider's loose JSON and the
//! strict [`WeatherSnapshot`] the rest of the system renders.
//!
//! `normalize` is a pure function: the same payload always yields an equal
//! snapshot, and nothing loosely-typed leaks past it.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::LookupError;
use crate::model::{
    ConditionCategory, CurrentConditions, ForecastEntry, ForecastMode, LocationInfo,
    WeatherSnapshot,
};
use crate::payload::{RawCondition, RawForecastDay, RawHour, RawPayload};

/// Indexed by `Weekday::num_days_from_sunday`.
pub const WEEKDAY_LABELS: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

/// The hour slots the hourly grid always shows. Slots with no matching hour
/// in the payload become [`ForecastEntry::no_data`] placeholders.
pub const HOUR_SLOTS: [&str; 6] =
    ["6:00 AM", "9:00 AM", "12:00 PM", "3:00 PM", "6:00 PM", "9:00 PM"];

const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M";
const HOUR_LABEL_FORMAT: &str = "%-I:%M %p";

/// Map a raw payload into a snapshot, or fail with `MalformedPayload` naming
/// the first required field that is missing.
///
/// Required fields are exactly `location.name`, `current.temp_c` and
/// `current.condition.text`; everything else degrades to defaults so a
/// sparse but identified payload still renders.
pub fn normalize(
    payload: &RawPayload,
    mode: ForecastMode,
) -> Result<WeatherSnapshot, LookupError> {
    let location = payload.location.as_ref().ok_or_else(|| missing("location"))?;
    let name = location.name.clone().ok_or_else(|| missing("location.name"))?;

    let current = payload.current.as_ref().ok_or_else(|| missing("current"))?;
    let temperature_c = current.temp_c.ok_or_else(|| missing("current.temp_c"))?;
    let condition = current.condition.as_ref().ok_or_else(|| missing("current.condition"))?;
    let condition_text =
        condition.text.clone().ok_or_else(|| missing("current.condition.text"))?;

    let forecast_days =
        payload.forecast.as_ref().map(|f| f.forecastday.as_slice()).unwrap_or(&[]);
    let forecast = match mode {
        ForecastMode::Daily => daily_entries(forecast_days),
        ForecastMode::Hourly => hourly_entries(forecast_days.first()),
    };

    Ok(WeatherSnapshot {
        location: LocationInfo {
            name,
            country: location.country.clone().unwrap_or_default(),
            local_time: local_timestamp(location.localtime.as_deref(), location.localtime_epoch),
        },
        current: CurrentConditions {
            temperature_c,
            // Derived once; the UI only ever shows the rounded value.
            feels_like_c: current.feelslike_c.unwrap_or(temperature_c).round(),
            wind_kph: current.wind_kph.unwrap_or_default(),
            humidity_pct: round_pct(current.humidity.unwrap_or_default()),
            category: ConditionCategory::classify(&condition_text),
            condition_text,
            condition_icon: condition.icon.clone(),
            last_updated: local_timestamp(
                current.last_updated.as_deref(),
                current.last_updated_epoch,
            ),
        },
        forecast,
    })
}

/// Weekday name for a "%Y-%m-%d" date string, or `None` when it does not
/// parse. Calendar arithmetic is chrono's job.
pub fn weekday_label(date: &str) -> Option<&'static str> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(WEEKDAY_LABELS[parsed.weekday().num_days_from_sunday() as usize])
}

fn daily_entries(days: &[RawForecastDay]) -> Vec<ForecastEntry> {
    days.iter()
        .map(|forecast_day| {
            let label = match forecast_day.date.as_deref() {
                Some(date) => {
                    weekday_label(date).map_or_else(|| date.to_string(), str::to_string)
                }
                None => String::new(),
            };

            let day = forecast_day.day.as_ref();
            let (condition_text, condition_icon) =
                condition_parts(day.and_then(|d| d.condition.as_ref()));

            ForecastEntry {
                label,
                max_temp_c: day.and_then(|d| d.maxtemp_c),
                min_temp_c: day.and_then(|d| d.mintemp_c),
                category: ConditionCategory::classify(&condition_text),
                condition_text,
                condition_icon,
                chance_of_rain_pct: day.and_then(|d| d.daily_chance_of_rain).map(round_pct),
            }
        })
        .collect()
}

/// One entry per requested slot, matched by formatted hour-of-day label.
/// The slot table, not the payload, decides how many entries exist.
fn hourly_entries(first_day: Option<&RawForecastDay>) -> Vec<ForecastEntry> {
    let hours: &[RawHour] = first_day.map(|d| d.hour.as_slice()).unwrap_or(&[]);

    HOUR_SLOTS
        .iter()
        .copied()
        .map(|slot| {
            match hours.iter().find(|h| hour_label(h).as_deref() == Some(slot)) {
                Some(hour) => {
                    let (condition_text, condition_icon) =
                        condition_parts(hour.condition.as_ref());
                    ForecastEntry {
                        label: slot.to_string(),
                        max_temp_c: hour.temp_c,
                        min_temp_c: None,
                        category: ConditionCategory::classify(&condition_text),
                        condition_text,
                        condition_icon,
                        chance_of_rain_pct: hour.chance_of_rain.map(round_pct),
                    }
                }
                None => ForecastEntry::no_data(slot.to_string()),
            }
        })
        .collect()
}

fn hour_label(hour: &RawHour) -> Option<String> {
    local_timestamp(hour.time.as_deref(), hour.time_epoch)
        .map(|dt| dt.format(HOUR_LABEL_FORMAT).to_string())
}

/// Canonical local timestamp: the wall-clock string form wins, the epoch
/// form is the fallback. Providers disagree on which one they send.
fn local_timestamp(wall_clock: Option<&str>, epoch: Option<i64>) -> Option<NaiveDateTime> {
    if let Some(s) = wall_clock {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(s, WALL_CLOCK_FORMAT) {
            return Some(parsed);
        }
    }

    epoch.and_then(|ts| DateTime::from_timestamp(ts, 0)).map(|dt| dt.naive_utc())
}

fn condition_parts(condition: Option<&RawCondition>) -> (String, Option<String>) {
    (
        condition.and_then(|c| c.text.clone()).unwrap_or_default(),
        condition.and_then(|c| c.icon.clone()),
    )
}

fn round_pct(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn missing(field: &'static str) -> LookupError {
    LookupError::MalformedPayload { field }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> RawPayload {
        serde_json::from_value(value).expect("test payload should decode")
    }

    fn seven_day_payload() -> RawPayload {
        let days: Vec<serde_json::Value> = (10..17)
            .map(|day| {
                json!({
                    "date": format!("2024-03-{day}"),
                    "day": {
                        "maxtemp_c": 19.2,
                        "mintemp_c": 9.6,
                        "daily_chance_of_rain": 40,
                        "condition": { "text": "Partly cloudy", "icon": "//cdn/116.png" }
                    }
                })
            })
            .collect();

        payload(json!({
            "location": {
                "name": "Paris",
                "country": "France",
                "localtime": "2024-03-10 14:05"
            },
            "current": {
                "temp_c": 18.4,
                "feelslike_c": 17.6,
                "wind_kph": 11.2,
                "humidity": 63,
                "last_updated": "2024-03-10 14:00",
                "condition": { "text": "Partly cloudy", "icon": "//cdn/116.png" }
            },
            "forecast": { "forecastday": days }
        }))
    }

    fn hourly_payload(hours: &[(&str, f64)]) -> RawPayload {
        let hour_entries: Vec<serde_json::Value> = hours
            .iter()
            .map(|(time, temp)| {
                json!({
                    "time": time,
                    "temp_c": temp,
                    "chance_of_rain": 20,
                    "condition": { "text": "Light rain", "icon": "//cdn/296.png" }
                })
            })
            .collect();

        payload(json!({
            "location": { "name": "London", "country": "UK" },
            "current": {
                "temp_c": 12.0,
                "condition": { "text": "Overcast" }
            },
            "forecast": { "forecastday": [ { "date": "2024-03-10", "hour": hour_entries } ] }
        }))
    }

    #[test]
    fn seven_daily_entries_in_input_order_with_weekday_labels() {
        let snapshot = normalize(&seven_day_payload(), ForecastMode::Daily).unwrap();

        assert_eq!(snapshot.forecast.len(), 7);
        let labels: Vec<&str> = snapshot.forecast.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        );
        assert_eq!(snapshot.forecast[0].max_temp_c, Some(19.2));
        assert_eq!(snapshot.forecast[0].min_temp_c, Some(9.6));
        assert_eq!(snapshot.forecast[0].chance_of_rain(), 40);
    }

    #[test]
    fn weekday_labels_cross_month_and_year_boundaries() {
        assert_eq!(weekday_label("2023-12-31"), Some("Sunday"));
        assert_eq!(weekday_label("2024-01-01"), Some("Monday"));
        assert_eq!(weekday_label("2024-02-29"), Some("Thursday"));
        assert_eq!(weekday_label("2024-03-01"), Some("Friday"));
        assert_eq!(weekday_label("not a date"), None);
    }

    #[test]
    fn current_temperature_keeps_raw_precision_and_classifies_condition() {
        let snapshot = normalize(&seven_day_payload(), ForecastMode::Daily).unwrap();

        assert_eq!(snapshot.current.temperature_c, 18.4);
        assert_eq!(snapshot.current.category, ConditionCategory::Cloudy);
        assert_eq!(snapshot.location.name, "Paris");
        assert_eq!(snapshot.location.country, "France");
    }

    #[test]
    fn feels_like_is_rounded_during_normalization() {
        let snapshot = normalize(&seven_day_payload(), ForecastMode::Daily).unwrap();
        assert_eq!(snapshot.current.feels_like_c, 18.0);
    }

    #[test]
    fn hourly_grid_is_driven_by_the_slot_table() {
        // 12:00 PM intentionally absent.
        let raw = hourly_payload(&[
            ("2024-03-10 06:00", 8.0),
            ("2024-03-10 09:00", 10.5),
            ("2024-03-10 15:00", 13.0),
            ("2024-03-10 18:00", 11.0),
            ("2024-03-10 21:00", 9.0),
        ]);

        let snapshot = normalize(&raw, ForecastMode::Hourly).unwrap();

        assert_eq!(snapshot.forecast.len(), HOUR_SLOTS.len());
        let noon = &snapshot.forecast[2];
        assert_eq!(noon.label, "12:00 PM");
        assert!(noon.is_placeholder());
        assert_eq!(noon.chance_of_rain(), 0);

        let morning = &snapshot.forecast[0];
        assert_eq!(morning.label, "6:00 AM");
        assert_eq!(morning.max_temp_c, Some(8.0));
        assert_eq!(morning.min_temp_c, None);
        assert_eq!(morning.chance_of_rain(), 20);
        assert_eq!(morning.category, ConditionCategory::Rainy);
    }

    #[test]
    fn hourly_mode_with_no_forecast_yields_all_placeholders() {
        let raw = payload(json!({
            "location": { "name": "London" },
            "current": { "temp_c": 12.0, "condition": { "text": "Overcast" } }
        }));

        let snapshot = normalize(&raw, ForecastMode::Hourly).unwrap();

        assert_eq!(snapshot.forecast.len(), HOUR_SLOTS.len());
        assert!(snapshot.forecast.iter().all(ForecastEntry::is_placeholder));
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        let no_name = payload(json!({
            "location": { "country": "France" },
            "current": { "temp_c": 18.4, "condition": { "text": "Sunny" } }
        }));
        let err = normalize(&no_name, ForecastMode::Daily).unwrap_err();
        assert!(matches!(err, LookupError::MalformedPayload { field: "location.name" }));

        let no_temp = payload(json!({
            "location": { "name": "Paris" },
            "current": { "condition": { "text": "Sunny" } }
        }));
        let err = normalize(&no_temp, ForecastMode::Daily).unwrap_err();
        assert!(matches!(err, LookupError::MalformedPayload { field: "current.temp_c" }));

        let no_condition_text = payload(json!({
            "location": { "name": "Paris" },
            "current": { "temp_c": 18.4, "condition": { "icon": "//cdn/116.png" } }
        }));
        let err = normalize(&no_condition_text, ForecastMode::Daily).unwrap_err();
        assert!(matches!(
            err,
            LookupError::MalformedPayload { field: "current.condition.text" }
        ));
    }

    #[test]
    fn optional_fields_degrade_to_defaults() {
        let raw = payload(json!({
            "location": { "name": "Paris" },
            "current": { "temp_c": 18.4, "condition": { "text": "Sunny" } }
        }));

        let snapshot = normalize(&raw, ForecastMode::Daily).unwrap();

        assert_eq!(snapshot.location.country, "");
        assert_eq!(snapshot.location.local_time, None);
        // No feels-like in the payload: fall back to the actual temperature.
        assert_eq!(snapshot.current.feels_like_c, 18.0);
        assert_eq!(snapshot.current.wind_kph, 0.0);
        assert_eq!(snapshot.current.humidity_pct, 0);
        assert_eq!(snapshot.current.condition_icon, None);
        assert!(snapshot.forecast.is_empty());
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = seven_day_payload();

        let first = normalize(&raw, ForecastMode::Daily).unwrap();
        let second = normalize(&raw, ForecastMode::Daily).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn wall_clock_string_wins_over_epoch() {
        let raw = payload(json!({
            "location": {
                "name": "Paris",
                "localtime": "2024-03-10 14:05",
                "localtime_epoch": 0
            },
            "current": { "temp_c": 18.4, "condition": { "text": "Sunny" } }
        }));

        let snapshot = normalize(&raw, ForecastMode::Daily).unwrap();
        let local_time = snapshot.location.local_time.unwrap();
        assert_eq!(local_time.format("%Y-%m-%d %H:%M").to_string(), "2024-03-10 14:05");
    }

    #[test]
    fn epoch_is_the_fallback_timestamp() {
        let raw = payload(json!({
            "location": { "name": "Paris" },
            "current": {
                "temp_c": 18.4,
                "condition": { "text": "Sunny" },
                // 2024-03-10 13:00:00 UTC
                "last_updated_epoch": 1710075600
            }
        }));

        let snapshot = normalize(&raw, ForecastMode::Daily).unwrap();
        let last_updated = snapshot.current.last_updated.unwrap();
        assert_eq!(last_updated.format("%Y-%m-%d %H:%M").to_string(), "2024-03-10 13:00");
    }
}
