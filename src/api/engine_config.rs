use serde::{Deserialize, Serialize};

use crate::core::{Baseline, RateTable, Storefront};
use crate::error::{PricingError, PricingResult};

use super::DisplayLanguage;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can keep the storefront,
/// baseline and rate snapshot in a config file instead of in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingEngineConfig {
    #[serde(default)]
    pub storefront: Storefront,
    #[serde(default)]
    pub baseline: Baseline,
    /// Overrides the storefront's built-in rate snapshot when set.
    #[serde(default)]
    pub rates: Option<RateTable>,
    #[serde(default)]
    pub language: DisplayLanguage,
}

impl PricingEngineConfig {
    /// Creates a config with the default baseline and the storefront's rates.
    #[must_use]
    pub fn new(storefront: Storefront) -> Self {
        Self {
            storefront,
            baseline: Baseline::default(),
            rates: None,
            language: DisplayLanguage::default(),
        }
    }

    #[must_use]
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    #[must_use]
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = Some(rates);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: DisplayLanguage) -> Self {
        self.language = language;
        self
    }

    /// Rate table the engine will use.
    #[must_use]
    pub fn resolved_rates(&self) -> RateTable {
        self.rates
            .clone()
            .unwrap_or_else(|| RateTable::for_storefront(self.storefront))
    }

    pub fn to_json_pretty(&self) -> PricingResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PricingError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }

    /// Parses a config document. Baseline and rates are validated while
    /// deserializing, so an accepted config is always usable.
    pub fn from_json_str(input: &str) -> PricingResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            PricingError::InvalidData(format!("failed to parse engine config json: {e}"))
        })
    }
}

impl Default for PricingEngineConfig {
    fn default() -> Self {
        Self::new(Storefront::default())
    }
}
