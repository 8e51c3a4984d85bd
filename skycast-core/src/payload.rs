//! Loose wire shape of the provider's forecast response.
//!
//! Every field is optional: upstream JSON is only trusted after
//! [`crate::normalize::normalize`] has checked the required subset. Nothing
//! outside that boundary should consume these types.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    pub location: Option<RawLocation>,
    pub current: Option<RawCurrent>,
    pub forecast: Option<RawForecast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    pub name: Option<String>,
    pub country: Option<String>,
    /// Wall-clock form, "2024-03-10 14:05".
    pub localtime: Option<String>,
    pub localtime_epoch: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCondition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCurrent {
    pub temp_c: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub wind_kph: Option<f64>,
    pub humidity: Option<f64>,
    pub last_updated: Option<String>,
    pub last_updated_epoch: Option<i64>,
    pub condition: Option<RawCondition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub forecastday: Vec<RawForecastDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastDay {
    /// "2024-03-10"
    pub date: Option<String>,
    pub day: Option<RawDay>,
    #[serde(default)]
    pub hour: Vec<RawHour>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDay {
    pub maxtemp_c: Option<f64>,
    pub mintemp_c: Option<f64>,
    pub daily_chance_of_rain: Option<f64>,
    pub condition: Option<RawCondition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHour {
    /// "2024-03-10 06:00"
    pub time: Option<String>,
    pub time_epoch: Option<i64>,
    pub temp_c: Option<f64>,
    pub chance_of_rain: Option<f64>,
    pub condition: Option<RawCondition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_sparse_payload() {
        let payload: RawPayload = serde_json::from_value(json!({
            "location": { "name": "Paris" }
        }))
        .expect("sparse payload should decode");

        assert_eq!(payload.location.unwrap().name.as_deref(), Some("Paris"));
        assert!(payload.current.is_none());
        assert!(payload.forecast.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let payload: RawPayload = serde_json::from_value(json!({
            "location": { "name": "Paris", "tz_id": "Europe/Paris", "lat": 48.87 },
            "current": { "temp_c": 18.4, "uv": 4.0 },
            "alerts": { "alert": [] }
        }))
        .expect("unknown fields should be ignored");

        assert_eq!(payload.current.unwrap().temp_c, Some(18.4));
    }

    #[test]
    fn decodes_forecast_days_and_hours() {
        let payload: RawPayload = serde_json::from_value(json!({
            "forecast": { "forecastday": [
                {
                    "date": "2024-03-10",
                    "day": { "maxtemp_c": 19.2, "mintemp_c": 9.1, "daily_chance_of_rain": 40 },
                    "hour": [ { "time": "2024-03-10 06:00", "temp_c": 10.0 } ]
                }
            ] }
        }))
        .expect("forecast payload should decode");

        let days = payload.forecast.unwrap().forecastday;
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day.as_ref().unwrap().daily_chance_of_rain, Some(40.0));
        assert_eq!(days[0].hour.len(), 1);
    }

    #[test]
    fn missing_hour_array_defaults_to_empty() {
        let payload: RawPayload = serde_json::from_value(json!({
            "forecast": { "forecastday": [ { "date": "2024-03-10" } ] }
        }))
        .expect("day without hours should decode");

        assert!(payload.forecast.unwrap().forecastday[0].hour.is_empty());
    }
}
