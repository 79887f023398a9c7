use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::primitives::round_to_places;
use crate::core::{Baseline, EnrichedPriceRecord};
use crate::error::{PricingError, PricingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Cheapest reference price first.
    #[default]
    ByReferencePrice,
    /// Localized region name, ascending.
    ByRegionName,
    /// Largest savings first.
    BySavings,
}

impl SortKey {
    /// Maps a sort selector value (`price`, `region`, `savings`) to a key.
    ///
    /// Unknown values sort by price.
    #[must_use]
    pub fn from_selector(value: &str) -> Self {
        match value.trim() {
            "region" | "by_region_name" => Self::ByRegionName,
            "savings" | "by_savings" => Self::BySavings,
            _ => Self::ByReferencePrice,
        }
    }
}

/// Anything the ranking functions can order.
pub trait RankedEntry {
    fn reference_price(&self) -> f64;

    fn savings(&self) -> f64;

    /// Already-localized name used by [`SortKey::ByRegionName`].
    fn sort_name(&self) -> &str;
}

impl RankedEntry for EnrichedPriceRecord {
    fn reference_price(&self) -> f64 {
        EnrichedPriceRecord::reference_price(self)
    }

    fn savings(&self) -> f64 {
        EnrichedPriceRecord::savings(self)
    }

    fn sort_name(&self) -> &str {
        self.region_name().unwrap_or_else(|| self.region())
    }
}

/// Returns a new ordering of `records` by `key`.
///
/// The sort is stable: entries with equal keys keep their source order.
#[must_use]
pub fn rank<T: RankedEntry + Clone>(records: &[T], key: SortKey) -> Vec<T> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| compare(a, b, key));
    ranked
}

fn compare<T: RankedEntry>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::ByReferencePrice => {
            OrderedFloat(a.reference_price()).cmp(&OrderedFloat(b.reference_price()))
        }
        SortKey::ByRegionName => a.sort_name().cmp(b.sort_name()),
        SortKey::BySavings => OrderedFloat(b.savings()).cmp(&OrderedFloat(a.savings())),
    }
}

/// Cheapest entry by reference price, independent of any display ordering.
///
/// Equivalent to `rank(records, SortKey::ByReferencePrice)[0]`: on ties the
/// earliest entry in source order wins.
pub fn best_deal<T: RankedEntry + Clone>(records: &[T]) -> PricingResult<T> {
    records
        .iter()
        .min_by(|a, b| compare(*a, *b, SortKey::ByReferencePrice))
        .cloned()
        .ok_or(PricingError::EmptyInput)
}

/// Savings as a percentage of the baseline, rounded to one decimal place.
#[must_use]
pub fn savings_percent(savings: f64, baseline: Baseline) -> f64 {
    round_to_places(savings / baseline.value() * 100.0, 1)
}
