//! Per-field validation rules for bureau report data.
//!
//! Every validator is a pure function over one raw string value. Errors are
//! blocking and force confidence to zero; warnings are advisory and only
//! lower confidence.

use crate::workflows::documents::parse_amount;

use super::domain::{
    CibilDataContext, OverallValidation, ValidationError, ValidationResult, ValidationWarning,
};

/// Stable error and warning codes; part of the external contract.
pub mod codes {
    pub const SCORE_REQUIRED: &str = "SCORE_REQUIRED";
    pub const SCORE_FORMAT_INVALID: &str = "SCORE_FORMAT_INVALID";
    pub const SCORE_TOO_LOW: &str = "SCORE_TOO_LOW";
    pub const SCORE_TOO_HIGH: &str = "SCORE_TOO_HIGH";
    pub const SCORE_VERY_LOW: &str = "SCORE_VERY_LOW";
    pub const SCORE_EXCEPTIONALLY_HIGH: &str = "SCORE_EXCEPTIONALLY_HIGH";

    pub const COUNT_FORMAT_INVALID: &str = "COUNT_FORMAT_INVALID";
    pub const COUNT_NEGATIVE: &str = "COUNT_NEGATIVE";
    pub const COUNT_TOO_HIGH: &str = "COUNT_TOO_HIGH";
    pub const COUNT_UNUSUALLY_HIGH: &str = "COUNT_UNUSUALLY_HIGH";
    pub const COUNT_ZERO: &str = "COUNT_ZERO";

    pub const AMOUNT_FORMAT_INVALID: &str = "AMOUNT_FORMAT_INVALID";
    pub const AMOUNT_NEGATIVE: &str = "AMOUNT_NEGATIVE";
    pub const AMOUNT_TOO_HIGH: &str = "AMOUNT_TOO_HIGH";
    pub const AMOUNT_SUSPICIOUSLY_HIGH: &str = "AMOUNT_SUSPICIOUSLY_HIGH";
    pub const AMOUNT_ROUND_FIGURE: &str = "AMOUNT_ROUND_FIGURE";
}

const SCORE_MIN: i64 = 300;
const SCORE_MAX: i64 = 900;
const LOAN_COUNT_MAX: i64 = 50;
const LOAN_COUNT_HIGH: i64 = 20;
const AMOUNT_MAX: f64 = 100_000_000_000.0;
const AMOUNT_SUSPICIOUS: f64 = 10_000_000_000.0;

/// The amount fields the validator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    TotalLoanAmount,
    AmountOverdue,
    SettledAndWrittenOff,
}

impl AmountField {
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::TotalLoanAmount => "total_loan_amount",
            Self::AmountOverdue => "amount_overdue",
            Self::SettledAndWrittenOff => "settled_and_written_off",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalLoanAmount => "total loan amount",
            Self::AmountOverdue => "amount overdue",
            Self::SettledAndWrittenOff => "settled and written off amount",
        }
    }
}

fn invalid(code: &'static str, message: String) -> ValidationResult {
    ValidationResult {
        is_valid: false,
        errors: vec![ValidationError { code, message }],
        warnings: Vec::new(),
        confidence: 0.0,
        corrected_value: None,
    }
}

fn warn(
    result: &mut ValidationResult,
    code: &'static str,
    message: String,
    suggestion: Option<String>,
    confidence: f64,
) {
    result.warnings.push(ValidationWarning {
        code,
        message,
        suggestion,
    });
    result.confidence = result.confidence.min(confidence);
}

/// Validate a raw CIBIL score. Required; exactly three digits in [300, 900].
pub fn validate_cibil_score(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return invalid(codes::SCORE_REQUIRED, "CIBIL score is required".to_string());
    }

    if trimmed.len() != 3 || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return invalid(
            codes::SCORE_FORMAT_INVALID,
            format!("CIBIL score '{trimmed}' must be a 3-digit number"),
        );
    }

    let score: i64 = match trimmed.parse() {
        Ok(value) => value,
        Err(_) => {
            return invalid(
                codes::SCORE_FORMAT_INVALID,
                format!("CIBIL score '{trimmed}' must be a 3-digit number"),
            )
        }
    };

    if score < SCORE_MIN {
        return invalid(
            codes::SCORE_TOO_LOW,
            format!("CIBIL score {score} is below the minimum of {SCORE_MIN}"),
        );
    }
    if score > SCORE_MAX {
        return invalid(
            codes::SCORE_TOO_HIGH,
            format!("CIBIL score {score} exceeds the maximum of {SCORE_MAX}"),
        );
    }

    let mut result = ValidationResult::valid();
    if score <= 350 {
        warn(
            &mut result,
            codes::SCORE_VERY_LOW,
            format!("CIBIL score {score} is very low"),
            Some("Confirm the score against the original bureau report".to_string()),
            0.7,
        );
    } else if score >= 850 {
        warn(
            &mut result,
            codes::SCORE_EXCEPTIONALLY_HIGH,
            format!("CIBIL score {score} is exceptionally high"),
            Some("Scores above 850 are rare; cross-check the source document".to_string()),
            0.9,
        );
    }

    result
}

/// Validate the number of loans. Optional; empty defaults to `"0"`.
pub fn validate_loan_count(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let mut result = ValidationResult::valid();
        result.corrected_value = Some("0".to_string());
        return result;
    }

    let count: i64 = match trimmed.parse() {
        Ok(value) => value,
        Err(_) => {
            return invalid(
                codes::COUNT_FORMAT_INVALID,
                format!("loan count '{trimmed}' must be a whole number"),
            )
        }
    };

    if count < 0 {
        return invalid(
            codes::COUNT_NEGATIVE,
            format!("loan count {count} cannot be negative"),
        );
    }
    if count > LOAN_COUNT_MAX {
        return invalid(
            codes::COUNT_TOO_HIGH,
            format!("loan count {count} exceeds the plausible maximum of {LOAN_COUNT_MAX}"),
        );
    }

    let mut result = ValidationResult::valid();
    if count > LOAN_COUNT_HIGH {
        warn(
            &mut result,
            codes::COUNT_UNUSUALLY_HIGH,
            format!("{count} loan accounts is unusually high"),
            Some("Verify the account count against the bureau report".to_string()),
            0.8,
        );
    } else if count == 0 {
        warn(
            &mut result,
            codes::COUNT_ZERO,
            "zero loan accounts may indicate a new credit profile or a data entry miss".to_string(),
            None,
            0.9,
        );
    }

    result
}

/// Validate a rupee amount field. Optional; empty defaults to `"₹0.00"`.
pub fn validate_amount(field: AmountField, raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let mut result = ValidationResult::valid();
        result.corrected_value = Some("₹0.00".to_string());
        return result;
    }

    let value = match parse_amount(trimmed) {
        Some(value) => value,
        None => {
            return invalid(
                codes::AMOUNT_FORMAT_INVALID,
                format!("{} '{trimmed}' is not a recognizable amount", field.label()),
            )
        }
    };

    if value < 0.0 {
        return invalid(
            codes::AMOUNT_NEGATIVE,
            format!("{} cannot be negative", field.label()),
        );
    }
    if value > AMOUNT_MAX {
        return invalid(
            codes::AMOUNT_TOO_HIGH,
            format!("{} exceeds the supported ceiling", field.label()),
        );
    }

    let mut result = ValidationResult::valid();
    if value > AMOUNT_SUSPICIOUS {
        warn(
            &mut result,
            codes::AMOUNT_SUSPICIOUSLY_HIGH,
            format!("{} above ₹1,000 crore is suspicious for an MSME profile", field.label()),
            Some("Confirm the figure with supporting documents".to_string()),
            0.8,
        );
    }
    if value > 0.0 && value % 100_000.0 == 0.0 {
        warn(
            &mut result,
            codes::AMOUNT_ROUND_FIGURE,
            format!("{} is an exact multiple of ₹1,00,000", field.label()),
            Some("Round figures are often estimates; verify the exact amount".to_string()),
            0.9,
        );
    }

    result
}

/// Validate the full bureau snapshot and roll the per-field outcomes up.
pub fn overall_validation(context: &CibilDataContext) -> OverallValidation {
    let results = [
        validate_cibil_score(context.cibil_score.as_deref().unwrap_or("")),
        validate_loan_count(context.number_of_loans.as_deref().unwrap_or("")),
        validate_amount(
            AmountField::TotalLoanAmount,
            context.total_loan_amount.as_deref().unwrap_or(""),
        ),
        validate_amount(
            AmountField::AmountOverdue,
            context.amount_overdue.as_deref().unwrap_or(""),
        ),
        validate_amount(
            AmountField::SettledAndWrittenOff,
            context.settled_and_written_off.as_deref().unwrap_or(""),
        ),
    ];

    let error_count: usize = results.iter().map(|result| result.errors.len()).sum();
    let warning_count: usize = results.iter().map(|result| result.warnings.len()).sum();
    let confidence =
        results.iter().map(|result| result.confidence).sum::<f64>() / results.len() as f64;

    // The bureau score is the only required field; its failure is critical.
    let critical_fields = if results[0].is_valid {
        Vec::new()
    } else {
        vec!["cibil_score"]
    };

    OverallValidation {
        is_valid: error_count == 0,
        error_count,
        warning_count,
        confidence,
        critical_fields,
    }
}
