use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Coarse weather bucket used to match catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastCondition {
    Snow,
    Rain,
    Sunny,
    Cloudy,
    Wind,
}

impl ForecastCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastCondition::Snow => "snow",
            ForecastCondition::Rain => "rain",
            ForecastCondition::Sunny => "sunny",
            ForecastCondition::Cloudy => "cloudy",
            ForecastCondition::Wind => "wind",
        }
    }

    pub const fn all() -> &'static [ForecastCondition] {
        &[
            ForecastCondition::Snow,
            ForecastCondition::Rain,
            ForecastCondition::Sunny,
            ForecastCondition::Cloudy,
            ForecastCondition::Wind,
        ]
    }
}

impl std::fmt::Display for ForecastCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part of the day a single-period forecast starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    /// Buckets a local hour (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=20 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        }
    }
}

impl std::fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized weather snapshot consumed by the recommendation engine.
///
/// `is_rainy` is always `forecast_condition == Rain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub period_name: String,
    pub temperature: i64,
    pub forecast_condition: ForecastCondition,
    pub is_rainy: bool,
    pub is_windy: bool,
}

/// Clothing slot. At most one item per category ends up in an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    FullBody,
    Top,
    Bottom,
    Shoes,
    Layer,
    Accessories,
    WeatherSpecific,
    /// Any label the catalog uses that is not a known slot. Never selected.
    #[serde(other)]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FullBody => "full-body",
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Layer => "layer",
            Category::Accessories => "accessories",
            Category::WeatherSpecific => "weather-specific",
            Category::Other => "other",
        }
    }

    /// Slots filled independently of the full-body / top+bottom choice.
    pub const fn extras() -> &'static [Category] {
        &[
            Category::Shoes,
            Category::Layer,
            Category::Accessories,
            Category::WeatherSpecific,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rain/wind tolerance of a catalog item: either one accepted value or a set of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tolerance {
    Scalar(bool),
    Set(BTreeSet<bool>),
}

impl Tolerance {
    pub fn matches(&self, value: bool) -> bool {
        match self {
            Tolerance::Scalar(accepted) => *accepted == value,
            Tolerance::Set(accepted) => accepted.contains(&value),
        }
    }
}

/// Catalog entry after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub name: String,
    pub category: Category,
    pub temp_min: i64,
    pub temp_max: i64,
    pub suitable_forecasts: BTreeSet<String>,
    pub rain: Tolerance,
    pub wind: Tolerance,
    #[serde(default)]
    pub genre: BTreeSet<String>,

    /// Upstream fields this crate does not interpret, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Chosen item name per category.
pub type OutfitSelection = BTreeMap<Category, String>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn day_period_bucket_edges() {
        assert_eq!(DayPeriod::from_hour(4), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(11), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(16), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(20), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(21), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Night);
    }

    #[test]
    fn tolerance_scalar_and_set() {
        let scalar: Tolerance = serde_json::from_value(json!(true)).unwrap();
        assert!(scalar.matches(true));
        assert!(!scalar.matches(false));

        let set: Tolerance = serde_json::from_value(json!([true, false])).unwrap();
        assert!(set.matches(true));
        assert!(set.matches(false));

        let only_dry: Tolerance = serde_json::from_value(json!([false])).unwrap();
        assert!(!only_dry.matches(true));
    }

    #[test]
    fn category_serde_names() {
        let cat: Category = serde_json::from_value(json!("weather-specific")).unwrap();
        assert_eq!(cat, Category::WeatherSpecific);

        let unknown: Category = serde_json::from_value(json!("hat-rack")).unwrap();
        assert_eq!(unknown, Category::Other);

        assert_eq!(serde_json::to_value(Category::FullBody).unwrap(), json!("full-body"));
    }

    #[test]
    fn forecast_condition_as_str_matches_serde() {
        for cond in ForecastCondition::all() {
            assert_eq!(serde_json::to_value(cond).unwrap(), json!(cond.as_str()));
        }
    }
}
