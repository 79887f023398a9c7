//! regional-pricing: regional storefront price comparison engine.
//!
//! Resolves ambiguous currency tokens, normalizes every regional price to
//! USD with a static rate snapshot, measures savings against a baseline
//! region and ranks the result. `core` holds the pure domain functions, `api`
//! the engine facade and the JSON boundaries around it.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{PricingEngine, PricingEngineConfig};
pub use error::{PricingError, PricingResult};
