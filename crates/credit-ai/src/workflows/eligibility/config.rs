use serde::{Deserialize, Serialize};

/// Decision gates for the eligibility verdict. The scoring weights and band
/// tables are fixed policy and live next to the scoring functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingConfig {
    pub eligibility_threshold: f64,
    pub minimum_credit_score: u16,
    pub minimum_dscr: f64,
    pub annual_interest_rate: f64,
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            eligibility_threshold: 60.0,
            minimum_credit_score: 600,
            minimum_dscr: 0.8,
            annual_interest_rate: 0.12,
        }
    }
}
