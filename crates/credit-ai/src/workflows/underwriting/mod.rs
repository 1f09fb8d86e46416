//! Underwriting data quality: per-field validation, cross-field anomaly
//! detection, and the aggregated quality assessment.

pub mod anomaly;
pub mod domain;
pub mod quality;
pub mod validation;

#[cfg(test)]
mod tests;

pub use anomaly::detect_anomalies;
pub use domain::{
    AnomalyFlag, AnomalyReport, AnomalyType, CibilDataContext, FieldValidation, OverallValidation,
    QualityAssessment, QualityFlag, QualityLevel, QualityRecommendation, RecommendationCategory,
    RecommendationPriority, Severity, ValidationError, ValidationResult, ValidationWarning,
};
pub use quality::{assess_quality, auto_correct_data};
pub use validation::{
    overall_validation, validate_amount, validate_cibil_score, validate_loan_count, AmountField,
};
