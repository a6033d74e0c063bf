use thiserror::Error;

/// Failure turning an upstream forecast into a [`crate::ConditionSummary`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("temperature is not numeric: {0:?}")]
    InvalidTemperature(String),

    #[error("forecast series contains no periods")]
    EmptySeries,
}

/// Failure reshaping a raw outfit catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no `outfits` list")]
    MissingOutfits,

    #[error("outfit {name:?} has no `temperature_range`")]
    MissingTemperatureRange { name: String },

    #[error("outfit {name:?} has temperature range {min}..{max} with min above max")]
    InvertedTemperatureRange { name: String, min: i64, max: i64 },
}

/// Terminal results of the recommendation engine that are not an outfit.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Could not generate recommendation.")]
    MissingInput,

    #[error("No suitable outfit items found for these conditions and genres.")]
    NoCandidates,
}

impl RecommendError {
    /// Key of the single-entry object this result is reported as.
    pub fn sentinel_key(&self) -> &'static str {
        match self {
            RecommendError::MissingInput => "Error",
            RecommendError::NoCandidates => "Message",
        }
    }

    /// `{"Error": ...}` or `{"Message": ...}`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert(self.sentinel_key().to_string(), self.to_string().into());
        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinel_objects() {
        assert_eq!(
            RecommendError::MissingInput.to_json(),
            json!({"Error": "Could not generate recommendation."})
        );
        assert_eq!(
            RecommendError::NoCandidates.to_json(),
            json!({"Message": "No suitable outfit items found for these conditions and genres."})
        );
    }

    #[test]
    fn weather_error_messages_name_the_field() {
        let err = WeatherError::InvalidTimestamp { field: "startTime", value: "nope".into() };
        assert!(err.to_string().contains("startTime"));
        assert!(WeatherError::MissingField("temperature").to_string().contains("temperature"));
    }
}
