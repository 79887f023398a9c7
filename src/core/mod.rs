pub mod currency;
pub mod normalizer;
pub mod primitives;
pub mod ranking;
pub mod rate_table;
pub mod record;

pub use currency::{
    CanonicalCurrency, CurrencyResolution, ResolutionSource, YEN_MAGNITUDE_THRESHOLD,
    dollar_region_currency, resolve, resolve_detailed,
};
pub use normalizer::{Baseline, enrich, enrich_as, savings_against, to_reference};
pub use ranking::{RankedEntry, SortKey, best_deal, rank, savings_percent};
pub use rate_table::RateTable;
pub use record::{EnrichedPriceRecord, RawPriceRecord, Storefront};
