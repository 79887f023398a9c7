mod display;
mod engine;
mod engine_config;
mod json_contract;
mod price_sheet;
mod region_names;

pub use display::{
    DisplayMode, DisplayProjection, ProjectedRow, display_text, project, reference_text,
    savings_text,
};
pub use engine::{BestDeal, LoadDiagnostics, LocalizedPriceRecord, PricingEngine};
pub use engine_config::PricingEngineConfig;
pub use json_contract::{BEST_DEAL_JSON_SCHEMA_V1, BestDealJsonContractV1};
pub use price_sheet::{PriceSheet, SheetMetadata, SourceRecord, StorefrontPrice, parse_timestamp};
pub use region_names::{DisplayLanguage, known_region_name, region_display_name};
