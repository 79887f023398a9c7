use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::{RawPriceRecord, Storefront};
use crate::error::{PricingError, PricingResult};

/// Nested per-storefront price object (`steam` / `eshop`).
///
/// A non-numeric price such as `"TBA"` reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontPrice {
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One region entry as produced by the data-collection scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub region: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub steam: Option<StorefrontPrice>,
    #[serde(default)]
    pub eshop: Option<StorefrontPrice>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
}

impl SourceRecord {
    #[must_use]
    pub fn storefront_price(&self, storefront: Storefront) -> Option<&StorefrontPrice> {
        match storefront {
            Storefront::Steam => self.steam.as_ref(),
            Storefront::Eshop => self.eshop.as_ref(),
        }
    }

    /// Converts to a raw record for `storefront`.
    ///
    /// Returns `None` when the storefront price is missing, zero, negative or
    /// non-finite; such records do not take part in comparison.
    #[must_use]
    pub fn to_raw(&self, storefront: Storefront) -> Option<RawPriceRecord> {
        let entry = self.storefront_price(storefront)?;
        let price = entry.price.filter(|p| p.is_finite() && *p > 0.0)?;
        Some(RawPriceRecord {
            region: self.region.clone(),
            currency: self.currency.clone().filter(|c| !c.trim().is_empty()),
            price,
            url: entry.url.clone().unwrap_or_default(),
            region_name: self.region_name.clone(),
            flag: self.flag.clone(),
        })
    }
}

/// Document-level fields of the wrapped sheet format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMetadata {
    /// RFC 3339 timestamp or bare `YYYY-MM-DD` date; anything else reads as
    /// absent.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data_version: Option<String>,
    #[serde(default)]
    pub game_status: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A parsed price data file: either a bare array of region entries or an
/// object with metadata and a `regions` array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSheet {
    metadata: Option<SheetMetadata>,
    records: Vec<SourceRecord>,
    rejected: usize,
}

impl PriceSheet {
    #[must_use]
    pub fn new(records: Vec<SourceRecord>) -> Self {
        Self {
            metadata: None,
            records,
            rejected: 0,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: SheetMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Parses a sheet document.
    ///
    /// Only a document that is not JSON, or whose top level is neither a
    /// region array nor an object with a `regions` array, is an error.
    /// Region entries that do not match the expected shape are skipped and
    /// counted in [`PriceSheet::rejected_entries`].
    pub fn from_json_str(input: &str) -> PricingResult<Self> {
        let document: Value = serde_json::from_str(input).map_err(|e| {
            PricingError::InvalidData(format!("failed to parse price sheet json: {e}"))
        })?;

        let (metadata, entries) = match document {
            Value::Array(entries) => (None, entries),
            Value::Object(mut fields) => {
                let Some(Value::Array(entries)) = fields.remove("regions") else {
                    return Err(not_a_sheet());
                };
                let metadata = serde_json::from_value(Value::Object(fields)).unwrap_or_else(|e| {
                    warn!(error = %e, "ignoring malformed price sheet metadata");
                    SheetMetadata::default()
                });
                (Some(metadata), entries)
            }
            _ => return Err(not_a_sheet()),
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut rejected = 0;
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<SourceRecord>(entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    rejected += 1;
                    warn!(index, error = %e, "skipping malformed price sheet entry");
                }
            }
        }

        Ok(Self {
            metadata,
            records,
            rejected,
        })
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&SheetMetadata> {
        self.metadata.as_ref()
    }

    #[must_use]
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    /// Region entries skipped while parsing because they were malformed.
    #[must_use]
    pub fn rejected_entries(&self) -> usize {
        self.rejected
    }

    /// Raw records carrying a usable price for `storefront`, in source order,
    /// plus the number of entries dropped: malformed ones and ones lacking a
    /// price.
    #[must_use]
    pub fn raw_records(&self, storefront: Storefront) -> (Vec<RawPriceRecord>, usize) {
        let mut raw = Vec::with_capacity(self.records.len());
        for record in &self.records {
            match record.to_raw(storefront) {
                Some(entry) => raw.push(entry),
                None => trace!(
                    region = %record.region,
                    field = storefront.price_field(),
                    "no usable storefront price"
                ),
            }
        }
        let dropped = self.rejected + self.records.len() - raw.len();
        (raw, dropped)
    }
}

fn not_a_sheet() -> PricingError {
    PricingError::InvalidData(
        "failed to parse price sheet json: expected a region array or an object with a `regions` array"
            .to_owned(),
    )
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::String(text)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed = parse_timestamp(&text);
    if parsed.is_none() {
        debug!(value = %text, "unreadable lastUpdated timestamp");
    }
    Ok(parsed)
}

/// Reads an RFC 3339 timestamp, or a `YYYY-MM-DD` date as midnight UTC.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
