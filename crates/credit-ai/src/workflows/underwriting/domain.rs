use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::documents::{CibilReportData, NOT_AVAILABLE};

/// Severity scale shared by anomalies and quality flags. Wire values are the
/// uppercase strings consumed by every caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }
}

/// Classification of a detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    LogicalInconsistency,
    StatisticalOutlier,
    SuspiciousPattern,
}

/// Blocking validation failure with a stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

/// Advisory validation finding; never blocks processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Outcome of validating one raw field value. Stateless and recomputed on
/// demand; `confidence` is forced to zero whenever an error is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_value: Option<String>,
}

impl ValidationResult {
    pub(crate) fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            confidence: 1.0,
            corrected_value: None,
        }
    }
}

/// One flagged anomaly, purely derived from a single bureau snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyFlag {
    pub field: &'static str,
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_fields: Vec<&'static str>,
}

/// Result of one anomaly detection run. `risk_score` saturates at 100 and
/// is a monotonic indicator, not a calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub has_anomalies: bool,
    pub anomalies: Vec<AnomalyFlag>,
    pub risk_score: f64,
    pub recommendations: Vec<String>,
}

/// Bureau-report field snapshot handed to validation, anomaly detection,
/// and quality assessment. All fields are optional raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CibilDataContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cibil_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_loans: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_loan_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_overdue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_and_written_off: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit_filed_status: Option<String>,
}

fn amount_or_none(value: &str) -> Option<String> {
    (value != NOT_AVAILABLE).then(|| value.to_string())
}

impl From<&CibilReportData> for CibilDataContext {
    fn from(data: &CibilReportData) -> Self {
        let suit = data.suit_filed_status.trim();
        Self {
            cibil_score: (data.cibil_score > 0).then(|| data.cibil_score.to_string()),
            number_of_loans: Some(data.number_of_loans.to_string()),
            total_loan_amount: amount_or_none(&data.total_loan_amount),
            amount_overdue: amount_or_none(&data.amount_overdue),
            settled_and_written_off: amount_or_none(&data.settled_and_written_off),
            suit_filed_status: (!suit.is_empty() && !suit.eq_ignore_ascii_case("unknown"))
                .then(|| suit.to_string()),
        }
    }
}

/// Overall data quality bands on the 0-100 quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl QualityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
            Self::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationCategory {
    Validation,
    Anomaly,
    Completeness,
}

/// Prioritized advisory produced by the quality aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityRecommendation {
    pub priority: RecommendationPriority,
    pub category: RecommendationCategory,
    pub message: String,
}

/// Validation outcome for one named field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidation {
    pub field: &'static str,
    pub result: ValidationResult,
}

/// Flat severity-ranked flag list for rendering layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityFlag {
    pub field: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Aggregate quality verdict over one bureau snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityAssessment {
    pub quality_score: f64,
    pub quality_level: QualityLevel,
    pub completeness: f64,
    pub overall_confidence: f64,
    pub field_validations: Vec<FieldValidation>,
    pub anomaly: AnomalyReport,
    pub recommendations: Vec<QualityRecommendation>,
    pub flags: Vec<QualityFlag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub processing_methods: Vec<String>,
    pub processed_at: DateTime<Utc>,
}

/// Cross-field rollup of the per-field validation results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallValidation {
    pub is_valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub critical_fields: Vec<&'static str>,
}
