//! Weather classification.
//!
//! Upstream forecasts arrive either as a single period object ([`RawForecastPeriod`])
//! or as a columnar series of periods ([`RawForecastSeries`]). Both are reduced to a
//! [`ConditionSummary`] with the same keyword rules, implemented once in this module.

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{ConditionSummary, ForecastCondition},
};

pub mod period;
pub mod series;

pub use period::{ForecastDocument, RawForecastPeriod};
pub use series::RawForecastSeries;

/// Sustained wind speed at which a forecast counts as windy regardless of wording.
pub const WINDY_SPEED_MPH: u64 = 15;

const RAIN_WORDS: &[&str] = &["rain", "showers", "thunderstorm"];
const SUNNY_WORDS: &[&str] = &["sunny", "clear", "partly sunny"];
const CLOUDY_WORDS: &[&str] = &["cloudy", "overcast", "mostly cloudy"];
const WIND_WORDS: &[&str] = &["windy", "breezy"];

lazy_static! {
    static ref WIND_SPEED_RE: Regex = Regex::new(r"([0-9]+)\s+mph").unwrap();
}

/// Either upstream forecast shape.
///
/// Deserializes untagged: anything with `time` and `data` objects is a series,
/// everything else is treated as a single period. Prefer [`RawForecast::from_value`],
/// which reports errors against the shape the input actually has.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawForecast {
    Series(RawForecastSeries),
    Period(RawForecastPeriod),
}

/// Upstream temperature, given either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTemperature {
    Number(f64),
    Text(String),
    /// Any other JSON value; never convertible.
    Other(serde_json::Value),
}

impl RawForecast {
    /// Pick the shape from the keys present, then deserialize into it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let is_series = value.get("time").is_some() || value.get("data").is_some();
        if is_series {
            serde_json::from_value(value).map(RawForecast::Series)
        } else {
            serde_json::from_value(value).map(RawForecast::Period)
        }
    }
}

impl RawTemperature {
    /// Whole degrees, truncating any fractional part.
    pub fn to_degrees(&self) -> Result<i64, WeatherError> {
        match self {
            RawTemperature::Number(value) => truncate(*value, &value.to_string()),
            RawTemperature::Text(text) => {
                let trimmed = text.trim();
                if let Ok(value) = trimmed.parse::<i64>() {
                    return Ok(value);
                }
                let value = trimmed
                    .parse::<f64>()
                    .map_err(|_| WeatherError::InvalidTemperature(text.clone()))?;
                truncate(value, text)
            }
            RawTemperature::Other(value) => Err(WeatherError::InvalidTemperature(value.to_string())),
        }
    }
}

fn truncate(value: f64, original: &str) -> Result<i64, WeatherError> {
    if value.is_finite() {
        Ok(value.trunc() as i64)
    } else {
        Err(WeatherError::InvalidTemperature(original.to_string()))
    }
}

/// Classify either forecast shape.
///
/// `reference_time` (RFC 3339) picks the current period of a series; a single
/// period does not use it.
pub fn classify(
    forecast: &RawForecast,
    reference_time: &str,
) -> Result<ConditionSummary, WeatherError> {
    match forecast {
        RawForecast::Period(period) => period.classify(),
        RawForecast::Series(series) => series.classify(reference_time),
    }
}

/// Like [`classify`], but a failure is logged and reported as `None`.
pub fn classify_or_none(forecast: &RawForecast, reference_time: &str) -> Option<ConditionSummary> {
    match classify(forecast, reference_time) {
        Ok(summary) => {
            debug!(?summary, "classified forecast");
            Some(summary)
        }
        Err(err) => {
            warn!(error = %err, "could not process weather data");
            None
        }
    }
}

/// First-match keyword classification of a lower-cased short description.
pub fn condition_from_keywords(short_lower: &str) -> ForecastCondition {
    let has_any = |words: &[&str]| words.iter().any(|w| short_lower.contains(w));

    if short_lower.contains("snow") {
        ForecastCondition::Snow
    } else if has_any(RAIN_WORDS) {
        ForecastCondition::Rain
    } else if has_any(SUNNY_WORDS) {
        ForecastCondition::Sunny
    } else if has_any(CLOUDY_WORDS) {
        ForecastCondition::Cloudy
    } else if has_any(WIND_WORDS) {
        ForecastCondition::Wind
    } else {
        ForecastCondition::Cloudy
    }
}

/// First "<digits> mph" value in a lower-cased text.
pub fn wind_speed_mph(text_lower: &str) -> Option<u64> {
    let caps = WIND_SPEED_RE.captures(text_lower)?;
    // Only digits can overflow here; anything that large is certainly windy.
    Some(caps[1].parse::<u64>().unwrap_or(u64::MAX))
}

/// Condition and windiness shared by both forecast shapes.
///
/// All inputs must already be lower-cased.
pub(crate) fn assess(
    short_lower: &str,
    long_lower: &str,
    speed_text_lower: &str,
) -> (ForecastCondition, bool) {
    let mut condition = condition_from_keywords(short_lower);
    let mut is_windy = long_lower.contains("wind") || long_lower.contains("gust");

    if let Some(speed) = wind_speed_mph(speed_text_lower) {
        if speed >= WINDY_SPEED_MPH {
            is_windy = true;
            if !matches!(condition, ForecastCondition::Snow | ForecastCondition::Rain) {
                condition = ForecastCondition::Wind;
            }
        }
    }

    (condition, is_windy)
}

pub(crate) fn summary(
    period_name: String,
    temperature: i64,
    forecast_condition: ForecastCondition,
    is_windy: bool,
) -> ConditionSummary {
    ConditionSummary {
        period_name,
        temperature,
        forecast_condition,
        is_rainy: forecast_condition == ForecastCondition::Rain,
        is_windy,
    }
}

pub(crate) fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, WeatherError> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|_| WeatherError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

/// Index of the last period that has started by `reference`.
///
/// Scans in order and stops at the first period starting after `reference`;
/// falls back to 0 when none has started yet.
pub(crate) fn latest_started<'a, I>(
    starts: I,
    field: &'static str,
    reference: DateTime<FixedOffset>,
) -> Result<usize, WeatherError>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut selected = 0;
    for (index, start) in starts.into_iter().enumerate() {
        let start = parse_timestamp(field, start.ok_or(WeatherError::MissingField(field))?)?;
        if reference >= start {
            selected = index;
        } else {
            break;
        }
    }
    Ok(selected)
}
