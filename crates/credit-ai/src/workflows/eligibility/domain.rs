use serde::{Deserialize, Serialize};

use crate::workflows::documents::ExtractedDocument;

/// Applicant-declared financials plus whatever documents were processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub business_type: String,
    pub annual_revenue: f64,
    pub loan_amount: f64,
    #[serde(default)]
    pub existing_loan_amount: f64,
    pub loan_term_months: u32,
    pub credit_score: u16,
    #[serde(default)]
    pub documents: Vec<ExtractedDocument>,
}

/// Raw ratio values backing the banded scores. Ratios that could not be
/// derived stay `None` and score as neutral downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialMetrics {
    pub dscr: f64,
    pub annual_debt_service: f64,
    pub monthly_payment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<f64>,
    pub credit_score_normalized: f64,
}

/// Per-metric band scores, each already on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub dscr: f64,
    pub current_ratio: f64,
    pub revenue_growth: f64,
    pub gst_compliance: f64,
    pub banking_relationship: f64,
    pub industry_risk: f64,
    pub credit_score: f64,
}

/// Deterministic verdict for one eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    pub overall_score: f64,
    pub is_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub breakdown: ScoreBreakdown,
    pub metrics: FinancialMetrics,
}
