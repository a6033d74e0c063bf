use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::{
    error::WeatherError,
    model::{ConditionSummary, DayPeriod},
};

use super::{RawTemperature, assess, latest_started, parse_timestamp, summary};

/// One forecast period in the gridpoint-forecast shape.
///
/// Fields are optional at the serde level so that a missing value surfaces as a
/// classification failure instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecastPeriod {
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub temperature: Option<RawTemperature>,
    pub short_forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<String>,
}

impl RawForecastPeriod {
    pub fn classify(&self) -> Result<ConditionSummary, WeatherError> {
        let start_time = self
            .start_time
            .as_deref()
            .ok_or(WeatherError::MissingField("startTime"))?;
        let start = parse_timestamp("startTime", start_time)?;
        let period_name = DayPeriod::from_hour(start.hour());

        let temperature = self
            .temperature
            .as_ref()
            .ok_or(WeatherError::MissingField("temperature"))?
            .to_degrees()?;

        let short = self
            .short_forecast
            .as_deref()
            .ok_or(WeatherError::MissingField("shortForecast"))?
            .to_lowercase();
        let long = self
            .detailed_forecast
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| short.clone());
        let speed = self.wind_speed.as_deref().unwrap_or_default().to_lowercase();

        let (condition, mut is_windy) = assess(&short, &long, &speed);

        // The short description has the last word on windiness.
        if short.contains("wind") || short.contains("breezy") {
            is_windy = true;
        }

        Ok(summary(period_name.to_string(), temperature, condition, is_windy))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<RawForecastPeriod>,
}

/// Full gridpoint forecast response: `{"properties": {"periods": [...]}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastDocument {
    pub properties: ForecastProperties,
}

impl ForecastDocument {
    /// The last period that has started by `reference_time`, or the first one.
    pub fn current_period(&self, reference_time: &str) -> Result<&RawForecastPeriod, WeatherError> {
        let periods = &self.properties.periods;
        if periods.is_empty() {
            return Err(WeatherError::EmptySeries);
        }

        let reference = parse_timestamp("reference_time", reference_time)?;
        let index = latest_started(
            periods.iter().map(|p| p.start_time.as_deref()),
            "startTime",
            reference,
        )?;

        Ok(&periods[index])
    }
}
