use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application snapshot the risk engine scores. Document-derived facts
/// (overdues, bounces, cash flow) come from the extracted documents, not
/// from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub application_id: String,
    pub business_name: String,
    pub business_type: String,
    pub loan_amount: f64,
    pub credit_score: u16,
    pub submitted_at: DateTime<Utc>,
}

/// Overall risk bands on the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Urgency of one flagged condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Critical => 2,
            Self::Warning => 1,
            Self::Info => 0,
        }
    }
}

/// Which sub-score a check feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Credit,
    Financial,
    Operational,
    Industry,
}

/// One human-readable risk flag with its point impact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAlert {
    pub severity: AlertSeverity,
    pub category: RiskCategory,
    pub message: String,
    pub impact: f64,
    pub raised_at: DateTime<Utc>,
}

/// Independent category sub-scores accumulated from the same checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryScores {
    pub credit: f64,
    pub financial: f64,
    pub operational: f64,
    pub industry: f64,
}

impl CategoryScores {
    pub(crate) fn average(&self) -> f64 {
        (self.credit + self.financial + self.operational + self.industry) / 4.0
    }
}

/// Derived, read-only risk view over one application; recomputed per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskScore {
    pub application_id: String,
    pub overall_score: f64,
    pub severity: RiskSeverity,
    pub base_risk: f64,
    pub total_impact: f64,
    pub categories: CategoryScores,
    pub alerts: Vec<RiskAlert>,
    pub assessed_at: DateTime<Utc>,
}

/// Alert surfaced at portfolio level, tagged with its application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioAlert {
    pub application_id: String,
    pub severity: AlertSeverity,
    pub category: RiskCategory,
    pub message: String,
    pub impact: f64,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

/// Share of the portfolio concentrated in one business type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessConcentration {
    pub business_type: String,
    pub applications: usize,
    pub share_pct: f64,
}

/// Aggregate view over a batch of scored applications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRiskSummary {
    pub total_applications: usize,
    pub severity_distribution: SeverityDistribution,
    pub average_score: f64,
    pub concentration: Vec<BusinessConcentration>,
    pub top_alerts: Vec<PortfolioAlert>,
}
