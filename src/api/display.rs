use serde::{Deserialize, Serialize};

use crate::core::primitives::{format_fixed, format_local_amount, round_to_places};
use crate::core::{CanonicalCurrency, EnrichedPriceRecord};

use super::DisplayLanguage;

/// Which price column the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Original local price and currency token.
    #[default]
    Local,
    /// Reference-currency (USD) equivalent.
    Reference,
}

impl DisplayMode {
    /// The other mode; backs the currency toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Local => Self::Reference,
            Self::Reference => Self::Local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayProjection {
    pub display_amount: f64,
    pub display_currency_label: String,
}

/// Selects the amount and currency label shown for `record`.
///
/// `Local` returns the raw price untouched. `Reference` returns the USD price
/// rounded to two decimals.
#[must_use]
pub fn project(record: &EnrichedPriceRecord, mode: DisplayMode) -> DisplayProjection {
    match mode {
        DisplayMode::Local => DisplayProjection {
            display_amount: record.raw_price(),
            display_currency_label: record.currency_token().to_owned(),
        },
        DisplayMode::Reference => DisplayProjection {
            display_amount: round_to_places(record.reference_price(), 2),
            display_currency_label: CanonicalCurrency::REFERENCE.code().to_owned(),
        },
    }
}

/// Price cell text, e.g. `¥2,300` or `$15.58`.
#[must_use]
pub fn display_text(record: &EnrichedPriceRecord, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Local => format!(
            "{}{}",
            record.currency_token(),
            format_local_amount(record.raw_price())
        ),
        DisplayMode::Reference => reference_text(record.reference_price()),
    }
}

#[must_use]
pub fn reference_text(reference_price: f64) -> String {
    format!("${}", format_fixed(reference_price, 2))
}

#[must_use]
pub fn savings_text(savings: f64, language: DisplayLanguage) -> String {
    if savings > 0.0 {
        let amount = format_fixed(savings, 2);
        match language {
            DisplayLanguage::English => format!("Save ${amount}"),
            DisplayLanguage::SimplifiedChinese => format!("节省 ${amount}"),
        }
    } else {
        match language {
            DisplayLanguage::English => "No savings".to_owned(),
            DisplayLanguage::SimplifiedChinese => "无节省".to_owned(),
        }
    }
}

/// One fully formatted price-table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRow {
    pub region: String,
    pub region_name: String,
    pub flag: Option<String>,
    pub projection: DisplayProjection,
    pub display_text: String,
    pub reference_price: f64,
    pub reference_text: String,
    pub savings: f64,
    pub savings_text: String,
    pub url: String,
    /// Set on the best-deal row whatever the active sort.
    pub is_lowest: bool,
}

impl ProjectedRow {
    #[must_use]
    pub fn build(
        record: &EnrichedPriceRecord,
        region_name: String,
        mode: DisplayMode,
        language: DisplayLanguage,
        is_lowest: bool,
    ) -> Self {
        Self {
            region: record.region().to_owned(),
            region_name,
            flag: record.flag().map(str::to_owned),
            projection: project(record, mode),
            display_text: display_text(record, mode),
            reference_price: record.reference_price(),
            reference_text: reference_text(record.reference_price()),
            savings: record.savings(),
            savings_text: savings_text(record.savings(), language),
            url: record.url().to_owned(),
            is_lowest,
        }
    }
}
