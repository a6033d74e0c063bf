//! Outfit selection.
//!
//! Items are filtered against the weather summary (temperature range, forecast,
//! rain, wind) and the caller's genres, then one candidate per category is drawn
//! at random. A full-body candidate takes the place of both top and bottom.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::{
    error::RecommendError,
    model::{Category, ConditionSummary, OutfitItem, OutfitSelection},
};

/// Lower-cased genre preferences. An empty filter accepts every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreFilter {
    genres: HashSet<String>,
}

impl GenreFilter {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { genres: genres.into_iter().map(|g| g.as_ref().to_lowercase()).collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn accepts(&self, item: &OutfitItem) -> bool {
        self.is_empty() || item.genre.iter().any(|g| self.genres.contains(g))
    }
}

/// Whether `item` passes every weather predicate and the genre filter.
pub fn is_candidate(item: &OutfitItem, condition: &ConditionSummary, genres: &GenreFilter) -> bool {
    let temp = condition.temperature;

    item.temp_min <= temp
        && temp <= item.temp_max
        && item.suitable_forecasts.contains(condition.forecast_condition.as_str())
        && item.rain.matches(condition.is_rainy)
        && item.wind.matches(condition.is_windy)
        && genres.accepts(item)
}

/// Every candidate for the given conditions, in catalog order.
pub fn candidates<'a>(
    catalog: &'a [OutfitItem],
    condition: &ConditionSummary,
    genres: &GenreFilter,
) -> Vec<&'a OutfitItem> {
    catalog.iter().filter(|item| is_candidate(item, condition, genres)).collect()
}

/// Build an outfit.
///
/// `condition` is `None` when the weather could not be classified; together with
/// an empty catalog this yields [`RecommendError::MissingInput`]. `genres` of
/// `None` or an empty slice disables genre filtering.
pub fn recommend<R, S>(
    condition: Option<&ConditionSummary>,
    catalog: &[OutfitItem],
    genres: Option<&[S]>,
    rng: &mut R,
) -> Result<OutfitSelection, RecommendError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let Some(condition) = condition else {
        return Err(RecommendError::MissingInput);
    };
    if catalog.is_empty() {
        return Err(RecommendError::MissingInput);
    }

    let genres = GenreFilter::new(genres.unwrap_or_default());
    let candidates = candidates(catalog, condition, &genres);
    debug!(candidates = candidates.len(), "filtered catalog");

    let selection = select(&candidates, rng);
    if selection.is_empty() {
        return Err(RecommendError::NoCandidates);
    }

    Ok(selection)
}

/// One random pick per category from already-filtered candidates.
pub fn select<R>(candidates: &[&OutfitItem], rng: &mut R) -> OutfitSelection
where
    R: Rng + ?Sized,
{
    let mut outfit = OutfitSelection::new();

    let mut pick = |category: Category, outfit: &mut OutfitSelection| -> bool {
        let pool: Vec<&OutfitItem> =
            candidates.iter().copied().filter(|item| item.category == category).collect();
        match pool.choose(rng) {
            Some(item) => {
                outfit.insert(category, item.name.clone());
                true
            }
            None => false,
        }
    };

    if !pick(Category::FullBody, &mut outfit) {
        pick(Category::Top, &mut outfit);
        pick(Category::Bottom, &mut outfit);
    }

    for category in Category::extras() {
        pick(*category, &mut outfit);
    }

    outfit
}
