use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::WeatherError, model::ConditionSummary};

use super::{RawTemperature, assess, latest_started, parse_timestamp, summary};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesTime {
    #[serde(default)]
    pub start_valid_time: Vec<String>,
    #[serde(default)]
    pub start_period_name: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesData {
    #[serde(default)]
    pub temperature: Vec<RawTemperature>,
    #[serde(default)]
    pub weather: Vec<String>,
    #[serde(default)]
    pub text: Vec<String>,
}

/// Columnar forecast: parallel sequences indexed by period position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawForecastSeries {
    pub time: SeriesTime,
    pub data: SeriesData,
}

impl RawForecastSeries {
    /// Classify the period in effect at `reference_time`.
    ///
    /// The upstream period label is used as is and the wind-speed pattern is read
    /// from the long description.
    pub fn classify(&self, reference_time: &str) -> Result<ConditionSummary, WeatherError> {
        let starts = &self.time.start_valid_time;
        if starts.is_empty() {
            return Err(WeatherError::EmptySeries);
        }

        let reference = parse_timestamp("reference_time", reference_time)?;
        let index = latest_started(
            starts.iter().map(|s| Some(s.as_str())),
            "time.startValidTime",
            reference,
        )?;
        debug!(index, "selected forecast period");

        let period_name = self
            .time
            .start_period_name
            .get(index)
            .ok_or(WeatherError::MissingField("time.startPeriodName"))?
            .clone();

        let temperature = self
            .data
            .temperature
            .get(index)
            .ok_or(WeatherError::MissingField("data.temperature"))?
            .to_degrees()?;

        let short = self
            .data
            .weather
            .get(index)
            .ok_or(WeatherError::MissingField("data.weather"))?
            .to_lowercase();
        let long = self
            .data
            .text
            .get(index)
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| short.clone());

        let (condition, is_windy) = assess(&short, &long, &long);

        Ok(summary(period_name, temperature, condition, is_windy))
    }
}
