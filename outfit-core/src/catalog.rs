use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::CatalogError,
    model::{Category, OutfitItem, Tolerance},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: i64,
    pub max: i64,
}

/// Catalog entry as authored, with the nested temperature range.
///
/// Already-normalized entries (flat `temp_min`/`temp_max`, no range) are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOutfitItem {
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_range: Option<TemperatureRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<i64>,
    pub suitable_forecasts: BTreeSet<String>,
    pub rain: Tolerance,
    pub wind: Tolerance,
    #[serde(default)]
    pub genre: BTreeSet<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `{"outfits": [...]}` as read from a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub outfits: Option<Vec<RawOutfitItem>>,
}

impl RawOutfitItem {
    /// Flatten the temperature range into `temp_min`/`temp_max`.
    pub fn normalize(self) -> Result<OutfitItem, CatalogError> {
        let (temp_min, temp_max) = match (self.temperature_range, self.temp_min, self.temp_max) {
            (Some(range), _, _) => (range.min, range.max),
            (None, Some(min), Some(max)) => (min, max),
            _ => return Err(CatalogError::MissingTemperatureRange { name: self.name }),
        };
        if temp_min > temp_max {
            return Err(CatalogError::InvertedTemperatureRange {
                name: self.name,
                min: temp_min,
                max: temp_max,
            });
        }

        Ok(OutfitItem {
            name: self.name,
            category: self.category,
            temp_min,
            temp_max,
            suitable_forecasts: self.suitable_forecasts,
            rain: self.rain,
            wind: self.wind,
            genre: self.genre,
            extra: self.extra,
        })
    }
}

impl From<OutfitItem> for RawOutfitItem {
    fn from(item: OutfitItem) -> Self {
        Self {
            name: item.name,
            category: item.category,
            temperature_range: None,
            temp_min: Some(item.temp_min),
            temp_max: Some(item.temp_max),
            suitable_forecasts: item.suitable_forecasts,
            rain: item.rain,
            wind: item.wind,
            genre: item.genre,
            extra: item.extra,
        }
    }
}

/// Normalize every item, in catalog order. One bad item fails the whole catalog.
pub fn normalize(raw: RawCatalog) -> Result<Vec<OutfitItem>, CatalogError> {
    let outfits = raw.outfits.ok_or(CatalogError::MissingOutfits)?;
    outfits.into_iter().map(RawOutfitItem::normalize).collect()
}

/// Like [`normalize`], but a failure is logged and yields an empty catalog.
pub fn normalize_or_empty(raw: RawCatalog) -> Vec<OutfitItem> {
    match normalize(raw) {
        Ok(items) => {
            debug!(items = items.len(), "normalized catalog");
            items
        }
        Err(err) => {
            warn!(error = %err, "could not process outfits data");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawCatalog {
        serde_json::from_value(value).expect("valid catalog JSON")
    }

    fn sample() -> RawCatalog {
        raw(json!({
            "outfits": [
                {
                    "name": "Rain Jacket",
                    "category": "layer",
                    "temperature_range": {"min": 40, "max": 65},
                    "suitable_forecasts": ["rain", "cloudy"],
                    "rain": true,
                    "wind": [true, false],
                    "genre": ["casual", "sporty"],
                    "color": "yellow"
                },
                {
                    "name": "Linen Shirt",
                    "category": "top",
                    "temperature_range": {"min": 70, "max": 95},
                    "suitable_forecasts": ["sunny"],
                    "rain": false,
                    "wind": false,
                    "genre": ["casual"]
                }
            ]
        }))
    }

    #[test]
    fn flattens_temperature_range_and_keeps_other_fields() {
        let items = normalize(sample()).unwrap();
        assert_eq!(items.len(), 2);

        let jacket = &items[0];
        assert_eq!(jacket.name, "Rain Jacket");
        assert_eq!(jacket.category, Category::Layer);
        assert_eq!((jacket.temp_min, jacket.temp_max), (40, 65));
        assert_eq!(jacket.rain, Tolerance::Scalar(true));
        assert_eq!(jacket.wind, Tolerance::Set([true, false].into_iter().collect()));
        assert_eq!(jacket.extra.get("color"), Some(&json!("yellow")));

        let value = serde_json::to_value(jacket).unwrap();
        assert!(value.get("temperature_range").is_none());
        assert_eq!(value["temp_min"], json!(40));
        assert_eq!(value["color"], json!("yellow"));

        assert_eq!(items[1].name, "Linen Shirt");
    }

    #[test]
    fn renormalizing_keeps_flat_fields() {
        let once = normalize(sample()).unwrap();
        let again = normalize(RawCatalog {
            outfits: Some(once.iter().cloned().map(RawOutfitItem::from).collect()),
        })
        .unwrap();
        assert_eq!(once, again);

        let from_json = normalize(raw(json!({
            "outfits": [serde_json::to_value(&once[0]).unwrap()]
        })))
        .unwrap();
        assert_eq!(from_json[0], once[0]);
    }

    #[test]
    fn missing_outfits_key() {
        assert_eq!(normalize(raw(json!({}))), Err(CatalogError::MissingOutfits));
        assert!(normalize_or_empty(raw(json!({"items": []}))).is_empty());
    }

    #[test]
    fn missing_temperature_range_fails_whole_catalog() {
        let catalog = raw(json!({
            "outfits": [
                {
                    "name": "Sandals",
                    "category": "shoes",
                    "temperature_range": {"min": 70, "max": 100},
                    "suitable_forecasts": ["sunny"],
                    "rain": false,
                    "wind": false
                },
                {
                    "name": "Mystery Scarf",
                    "category": "accessories",
                    "suitable_forecasts": ["wind"],
                    "rain": false,
                    "wind": true
                }
            ]
        }));

        assert_eq!(
            normalize(catalog.clone()),
            Err(CatalogError::MissingTemperatureRange { name: "Mystery Scarf".into() })
        );
        assert!(normalize_or_empty(catalog).is_empty());
    }

    #[test]
    fn inverted_temperature_range_is_rejected() {
        let catalog = raw(json!({
            "outfits": [{
                "name": "Backwards Parka",
                "category": "layer",
                "temperature_range": {"min": 50, "max": 20},
                "suitable_forecasts": ["snow"],
                "rain": false,
                "wind": true
            }]
        }));

        assert_eq!(
            normalize(catalog.clone()),
            Err(CatalogError::InvertedTemperatureRange {
                name: "Backwards Parka".into(),
                min: 50,
                max: 20
            })
        );
        assert!(normalize_or_empty(catalog).is_empty());
    }

    #[test]
    fn single_degree_range_is_accepted() {
        let catalog = raw(json!({
            "outfits": [{
                "name": "Exact Tee",
                "category": "top",
                "temp_min": 72,
                "temp_max": 72,
                "suitable_forecasts": ["sunny"],
                "rain": false,
                "wind": false
            }]
        }));

        let items = normalize(catalog).unwrap();
        assert_eq!((items[0].temp_min, items[0].temp_max), (72, 72));
    }

    #[test]
    fn empty_outfit_list_is_empty_catalog() {
        assert_eq!(normalize(raw(json!({"outfits": []}))), Ok(Vec::new()));
    }
}
