use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    Baseline, EnrichedPriceRecord, RankedEntry, RateTable, RawPriceRecord, SortKey, Storefront,
    best_deal, enrich_as, rank, resolve_detailed, savings_percent,
};
use crate::error::{PricingError, PricingResult};

use super::{
    DisplayLanguage, DisplayMode, PriceSheet, PricingEngineConfig, ProjectedRow,
    region_display_name,
};

/// Counts collected while loading raw records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDiagnostics {
    /// Entries handed to the engine, including ones dropped upstream.
    pub total: usize,
    /// Entries without a usable storefront price.
    pub missing_price: usize,
    /// Entries whose currency has no rate in the active table.
    pub unknown_currency: usize,
    /// Enriched entries whose currency token was unrecognized and read as USD.
    pub fallback_currency: usize,
    pub enriched: usize,
}

impl LoadDiagnostics {
    #[must_use]
    pub fn skipped(self) -> usize {
        self.missing_price + self.unknown_currency
    }
}

/// Enriched record paired with its region name in the active language.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedPriceRecord {
    pub record: EnrichedPriceRecord,
    pub region_name: String,
    pub source_index: usize,
}

impl RankedEntry for LocalizedPriceRecord {
    fn reference_price(&self) -> f64 {
        self.record.reference_price()
    }

    fn savings(&self) -> f64 {
        self.record.savings()
    }

    fn sort_name(&self) -> &str {
        &self.region_name
    }
}

/// Summary of the cheapest region, as shown in the best-deal banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestDeal {
    pub region: String,
    pub region_name: String,
    #[serde(default)]
    pub flag: Option<String>,
    /// Local price as listed.
    pub price: f64,
    /// Currency token as listed.
    pub currency: String,
    pub reference_price: f64,
    pub savings: f64,
    /// Savings relative to the baseline, one decimal place.
    pub savings_percent: f64,
    pub url: String,
}

/// Regional price comparison for one storefront.
///
/// Records are enriched once at construction. Every query recomputes its
/// ordering from them, so sort-key, display-mode and language changes never
/// touch stored state beyond the language setting itself.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingEngineConfig,
    rates: RateTable,
    records: Vec<EnrichedPriceRecord>,
    diagnostics: LoadDiagnostics,
}

impl PricingEngine {
    /// Enriches `raw_records` with the configured rates and baseline.
    ///
    /// Records that cannot be enriched are skipped and counted in
    /// [`LoadDiagnostics`]; construction itself never fails.
    #[must_use]
    pub fn new(config: PricingEngineConfig, raw_records: Vec<RawPriceRecord>) -> Self {
        Self::build(config, raw_records, 0)
    }

    /// Loads the records of the configured storefront from a parsed sheet.
    #[must_use]
    pub fn from_price_sheet(config: PricingEngineConfig, sheet: &PriceSheet) -> Self {
        let (raw_records, dropped) = sheet.raw_records(config.storefront);
        Self::build(config, raw_records, dropped)
    }

    pub fn from_json_str(config: PricingEngineConfig, input: &str) -> PricingResult<Self> {
        let sheet = PriceSheet::from_json_str(input)?;
        Ok(Self::from_price_sheet(config, &sheet))
    }

    fn build(
        config: PricingEngineConfig,
        raw_records: Vec<RawPriceRecord>,
        dropped_upstream: usize,
    ) -> Self {
        let rates = config.resolved_rates();
        let mut diagnostics = LoadDiagnostics {
            total: raw_records.len() + dropped_upstream,
            missing_price: dropped_upstream,
            ..LoadDiagnostics::default()
        };
        let mut records = Vec::with_capacity(raw_records.len());

        for raw in raw_records {
            if !raw.has_usable_price() {
                diagnostics.missing_price += 1;
                trace!(region = %raw.region, price = raw.price, "skipping record without usable price");
                continue;
            }

            let resolution = resolve_detailed(raw.currency_token(), &raw.region, raw.price);
            let region = raw.region.clone();
            match enrich_as(raw, resolution.currency, &rates, config.baseline) {
                Ok(record) => {
                    if resolution.is_fallback() {
                        diagnostics.fallback_currency += 1;
                        debug!(
                            region = %region,
                            token = record.currency_token(),
                            "unrecognized currency token read as USD"
                        );
                    }
                    records.push(record);
                }
                Err(PricingError::UnknownCurrency { currency }) => {
                    diagnostics.unknown_currency += 1;
                    warn!(
                        region = %region,
                        currency = %currency,
                        storefront = ?config.storefront,
                        "skipping record with no exchange rate"
                    );
                }
                Err(err) => {
                    diagnostics.missing_price += 1;
                    warn!(region = %region, error = %err, "skipping record that failed enrichment");
                }
            }
        }

        diagnostics.enriched = records.len();
        debug!(
            storefront = ?config.storefront,
            total = diagnostics.total,
            enriched = diagnostics.enriched,
            skipped = diagnostics.skipped(),
            "loaded regional prices"
        );

        Self {
            config,
            rates,
            records,
            diagnostics,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PricingEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    #[must_use]
    pub fn baseline(&self) -> Baseline {
        self.config.baseline
    }

    #[must_use]
    pub fn storefront(&self) -> Storefront {
        self.config.storefront
    }

    #[must_use]
    pub fn language(&self) -> DisplayLanguage {
        self.config.language
    }

    pub fn set_language(&mut self, language: DisplayLanguage) {
        debug!(language = language.tag(), "switch display language");
        self.config.language = language;
    }

    /// Enriched records in source order.
    #[must_use]
    pub fn records(&self) -> &[EnrichedPriceRecord] {
        &self.records
    }

    #[must_use]
    pub fn diagnostics(&self) -> LoadDiagnostics {
        self.diagnostics
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn region_display_name(&self, record: &EnrichedPriceRecord) -> String {
        region_display_name(record.region(), record.region_name(), self.config.language)
    }

    #[must_use]
    pub fn localized_records(&self) -> Vec<LocalizedPriceRecord> {
        self.records
            .iter()
            .enumerate()
            .map(|(source_index, record)| LocalizedPriceRecord {
                record: record.clone(),
                region_name: self.region_display_name(record),
                source_index,
            })
            .collect()
    }

    /// Records ordered by `key`, region names compared in the active language.
    #[must_use]
    pub fn rank(&self, key: SortKey) -> Vec<EnrichedPriceRecord> {
        rank(&self.localized_records(), key)
            .into_iter()
            .map(|entry| entry.record)
            .collect()
    }

    /// Formatted table rows ordered by `key`.
    ///
    /// The best-deal row is flagged `is_lowest` whatever the ordering.
    #[must_use]
    pub fn ranked_view(&self, key: SortKey, mode: DisplayMode) -> Vec<ProjectedRow> {
        let entries = self.localized_records();
        let lowest = best_deal(&entries).ok().map(|entry| entry.source_index);
        let language = self.config.language;
        trace!(count = entries.len(), ?key, ?mode, "project ranked view");

        rank(&entries, key)
            .into_iter()
            .map(|entry| {
                let is_lowest = Some(entry.source_index) == lowest;
                ProjectedRow::build(&entry.record, entry.region_name, mode, language, is_lowest)
            })
            .collect()
    }

    /// Cheapest region by reference price.
    pub fn best_deal(&self) -> PricingResult<BestDeal> {
        let record = best_deal(&self.records)?;
        Ok(BestDeal {
            region: record.region().to_owned(),
            region_name: self.region_display_name(&record),
            flag: record.flag().map(str::to_owned),
            price: record.raw_price(),
            currency: record.currency_token().to_owned(),
            reference_price: record.reference_price(),
            savings: record.savings(),
            savings_percent: savings_percent(record.savings(), self.config.baseline),
            url: record.url().to_owned(),
        })
    }
}
