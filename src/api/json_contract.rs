use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

use super::{BestDeal, PricingEngine};

pub const BEST_DEAL_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestDealJsonContractV1 {
    pub schema_version: u32,
    pub best_deal: BestDeal,
}

impl BestDeal {
    pub fn to_json_contract_v1_pretty(&self) -> PricingResult<String> {
        let payload = BestDealJsonContractV1 {
            schema_version: BEST_DEAL_JSON_SCHEMA_V1,
            best_deal: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PricingError::InvalidData(format!("failed to serialize best deal contract v1: {e}"))
        })
    }

    /// Accepts either a bare best-deal object or the versioned contract.
    pub fn from_json_compat_str(input: &str) -> PricingResult<Self> {
        if let Ok(best_deal) = serde_json::from_str::<BestDeal>(input) {
            return Ok(best_deal);
        }
        let payload: BestDealJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PricingError::InvalidData(format!("failed to parse best deal json payload: {e}"))
        })?;
        if payload.schema_version != BEST_DEAL_JSON_SCHEMA_V1 {
            return Err(PricingError::InvalidData(format!(
                "unsupported best deal schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.best_deal)
    }
}

impl PricingEngine {
    pub fn best_deal_json_contract_v1_pretty(&self) -> PricingResult<String> {
        self.best_deal()?.to_json_contract_v1_pretty()
    }
}
