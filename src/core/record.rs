use serde::{Deserialize, Serialize};

use crate::core::CanonicalCurrency;

/// Storefront whose regional price table is being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storefront {
    #[default]
    Steam,
    Eshop,
}

impl Storefront {
    /// Name of the nested price object in source documents.
    #[must_use]
    pub fn price_field(self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::Eshop => "eshop",
        }
    }
}

/// One regional price as it appears in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRecord {
    pub region: String,
    pub currency: Option<String>,
    pub price: f64,
    pub url: String,
    pub region_name: Option<String>,
    pub flag: Option<String>,
}

impl RawPriceRecord {
    /// Builds a record; an empty currency token is stored as absent.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        currency: impl Into<String>,
        price: f64,
        url: impl Into<String>,
    ) -> Self {
        let currency = currency.into();
        Self {
            region: region.into(),
            currency: (!currency.trim().is_empty()).then_some(currency),
            price,
            url: url.into(),
            region_name: None,
            flag: None,
        }
    }

    #[must_use]
    pub fn with_region_name(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = Some(region_name.into());
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Currency token as written in the source, or `""` when absent.
    #[must_use]
    pub fn currency_token(&self) -> &str {
        self.currency.as_deref().unwrap_or("")
    }

    /// Only records with a finite positive price take part in comparison.
    #[must_use]
    pub fn has_usable_price(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// A raw record after currency resolution and normalization.
///
/// Only produced by [`crate::core::enrich`], so a value of this type has been
/// enriched exactly once. It deliberately has no `Deserialize` impl.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPriceRecord {
    raw: RawPriceRecord,
    currency: CanonicalCurrency,
    reference_price: f64,
    savings: f64,
}

impl EnrichedPriceRecord {
    pub(crate) fn from_parts(
        raw: RawPriceRecord,
        currency: CanonicalCurrency,
        reference_price: f64,
        savings: f64,
    ) -> Self {
        Self {
            raw,
            currency,
            reference_price,
            savings,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &RawPriceRecord {
        &self.raw
    }

    #[must_use]
    pub fn into_raw(self) -> RawPriceRecord {
        self.raw
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.raw.region
    }

    #[must_use]
    pub fn raw_price(&self) -> f64 {
        self.raw.price
    }

    #[must_use]
    pub fn currency_token(&self) -> &str {
        self.raw.currency_token()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.raw.url
    }

    #[must_use]
    pub fn region_name(&self) -> Option<&str> {
        self.raw.region_name.as_deref()
    }

    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        self.raw.flag.as_deref()
    }

    #[must_use]
    pub fn currency(&self) -> CanonicalCurrency {
        self.currency
    }

    /// Price in the reference currency (USD).
    #[must_use]
    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    /// Amount saved against the baseline, in USD. Never negative.
    #[must_use]
    pub fn savings(&self) -> f64 {
        self.savings
    }
}
