//! Quality assurance over one bureau snapshot: validation, anomaly
//! detection, and completeness folded into a single scored verdict.

use chrono::Utc;

use super::anomaly::detect_anomalies;
use super::domain::{
    AnomalyReport, CibilDataContext, FieldValidation, QualityAssessment, QualityFlag,
    QualityLevel, QualityRecommendation, RecommendationCategory, RecommendationPriority, Severity,
};
use super::validation::{codes, validate_amount, validate_cibil_score, validate_loan_count, AmountField};

/// Completeness tiers: required fields weigh 3, important 2, optional 1.
const COMPLETENESS_TIERS: &[(&str, u32)] = &[
    ("cibil_score", 3),
    ("number_of_loans", 2),
    ("total_loan_amount", 2),
    ("amount_overdue", 1),
    ("settled_and_written_off", 1),
    ("suit_filed_status", 1),
];

const VALIDATION_WEIGHT: f64 = 0.4;
const ANOMALY_WEIGHT: f64 = 0.3;
const COMPLETENESS_WEIGHT: f64 = 0.3;
const ERROR_PENALTY: f64 = 25.0;
const WARNING_PENALTY: f64 = 10.0;
const COMPLETENESS_FLOOR: f64 = 0.7;

/// Assess the snapshot end to end and stamp the result.
pub fn assess_quality(
    context: &CibilDataContext,
    processing_methods: &[String],
) -> QualityAssessment {
    let field_validations = run_validations(context);
    let anomaly = detect_anomalies(context);
    let completeness = completeness_of(context);

    let error_count: usize = field_validations
        .iter()
        .map(|entry| entry.result.errors.len())
        .sum();
    let warning_count: usize = field_validations
        .iter()
        .map(|entry| entry.result.warnings.len())
        .sum();

    let validation_score =
        (100.0 - ERROR_PENALTY * error_count as f64 - WARNING_PENALTY * warning_count as f64)
            .max(0.0);
    let anomaly_score = 100.0 - anomaly.risk_score;
    let quality_score = VALIDATION_WEIGHT * validation_score
        + ANOMALY_WEIGHT * anomaly_score
        + COMPLETENESS_WEIGHT * completeness * 100.0;

    let average_confidence = field_validations
        .iter()
        .map(|entry| entry.result.confidence)
        .sum::<f64>()
        / field_validations.len() as f64;
    let overall_confidence = (average_confidence - anomaly.risk_score / 100.0 * 0.3).max(0.0);

    let recommendations =
        build_recommendations(&field_validations, &anomaly, completeness, context);
    let flags = build_flags(&field_validations, &anomaly);

    QualityAssessment {
        quality_level: quality_level(quality_score),
        quality_score,
        completeness,
        overall_confidence,
        field_validations,
        anomaly,
        recommendations,
        flags,
        processing_methods: processing_methods.to_vec(),
        processed_at: Utc::now(),
    }
}

fn run_validations(context: &CibilDataContext) -> Vec<FieldValidation> {
    vec![
        FieldValidation {
            field: "cibil_score",
            result: validate_cibil_score(context.cibil_score.as_deref().unwrap_or("")),
        },
        FieldValidation {
            field: "number_of_loans",
            result: validate_loan_count(context.number_of_loans.as_deref().unwrap_or("")),
        },
        FieldValidation {
            field: "total_loan_amount",
            result: validate_amount(
                AmountField::TotalLoanAmount,
                context.total_loan_amount.as_deref().unwrap_or(""),
            ),
        },
        FieldValidation {
            field: "amount_overdue",
            result: validate_amount(
                AmountField::AmountOverdue,
                context.amount_overdue.as_deref().unwrap_or(""),
            ),
        },
        FieldValidation {
            field: "settled_and_written_off",
            result: validate_amount(
                AmountField::SettledAndWrittenOff,
                context.settled_and_written_off.as_deref().unwrap_or(""),
            ),
        },
    ]
}

fn field_value<'a>(context: &'a CibilDataContext, field: &str) -> Option<&'a str> {
    let value = match field {
        "cibil_score" => context.cibil_score.as_deref(),
        "number_of_loans" => context.number_of_loans.as_deref(),
        "total_loan_amount" => context.total_loan_amount.as_deref(),
        "amount_overdue" => context.amount_overdue.as_deref(),
        "settled_and_written_off" => context.settled_and_written_off.as_deref(),
        "suit_filed_status" => context.suit_filed_status.as_deref(),
        _ => None,
    };
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Weighted coverage over the declared tier list.
pub fn completeness_of(context: &CibilDataContext) -> f64 {
    let total: u32 = COMPLETENESS_TIERS.iter().map(|(_, weight)| weight).sum();
    let present: u32 = COMPLETENESS_TIERS
        .iter()
        .filter(|(field, _)| field_value(context, field).is_some())
        .map(|(_, weight)| weight)
        .sum();

    present as f64 / total as f64
}

fn quality_level(score: f64) -> QualityLevel {
    if score >= 90.0 {
        QualityLevel::Excellent
    } else if score >= 75.0 {
        QualityLevel::Good
    } else if score >= 60.0 {
        QualityLevel::Fair
    } else if score >= 40.0 {
        QualityLevel::Poor
    } else {
        QualityLevel::Critical
    }
}

fn build_recommendations(
    field_validations: &[FieldValidation],
    anomaly: &AnomalyReport,
    completeness: f64,
    context: &CibilDataContext,
) -> Vec<QualityRecommendation> {
    let mut recommendations = Vec::new();

    for entry in field_validations {
        if let Some(error) = entry.result.errors.first() {
            recommendations.push(QualityRecommendation {
                priority: RecommendationPriority::Critical,
                category: RecommendationCategory::Validation,
                message: format!("Fix {}: {}", entry.field, error.message),
            });
        }
    }

    let severe = anomaly
        .anomalies
        .iter()
        .filter(|flag| flag.severity >= Severity::High)
        .count();
    if severe > 0 {
        recommendations.push(QualityRecommendation {
            priority: RecommendationPriority::High,
            category: RecommendationCategory::Anomaly,
            message: format!("Investigate {severe} high-severity anomaly finding(s) before approval"),
        });
    }

    if completeness < COMPLETENESS_FLOOR {
        let missing: Vec<&str> = COMPLETENESS_TIERS
            .iter()
            .filter(|(field, _)| field_value(context, field).is_none())
            .map(|(field, _)| *field)
            .collect();
        recommendations.push(QualityRecommendation {
            priority: RecommendationPriority::Medium,
            category: RecommendationCategory::Completeness,
            message: format!("Provide missing fields: {}", missing.join(", ")),
        });
    }

    for advisory in &anomaly.recommendations {
        let priority = if advisory.contains("CRITICAL") {
            RecommendationPriority::Critical
        } else if advisory.contains("HIGH") {
            RecommendationPriority::High
        } else {
            RecommendationPriority::Low
        };
        recommendations.push(QualityRecommendation {
            priority,
            category: RecommendationCategory::Anomaly,
            message: advisory.clone(),
        });
    }

    recommendations
}

/// Hard rule breaches keep HIGH severity; shape problems rank MEDIUM.
fn error_severity(code: &str) -> Severity {
    match code {
        codes::SCORE_FORMAT_INVALID | codes::COUNT_FORMAT_INVALID | codes::AMOUNT_FORMAT_INVALID => {
            Severity::Medium
        }
        _ => Severity::High,
    }
}

fn build_flags(field_validations: &[FieldValidation], anomaly: &AnomalyReport) -> Vec<QualityFlag> {
    let mut flags = Vec::new();

    for entry in field_validations {
        for error in &entry.result.errors {
            flags.push(QualityFlag {
                field: entry.field,
                severity: error_severity(error.code),
                message: error.message.clone(),
            });
        }
        for warning in &entry.result.warnings {
            flags.push(QualityFlag {
                field: entry.field,
                severity: Severity::Low,
                message: warning.message.clone(),
            });
        }
    }

    for flag in &anomaly.anomalies {
        flags.push(QualityFlag {
            field: flag.field,
            severity: flag.severity,
            message: flag.message.clone(),
        });
    }

    flags.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));
    flags
}

/// Best-effort formatting cleanup. Never rejects; fields that cannot be
/// corrected are passed through untouched.
pub fn auto_correct_data(context: &CibilDataContext) -> CibilDataContext {
    let mut corrected = context.clone();

    for field in [
        &mut corrected.total_loan_amount,
        &mut corrected.amount_overdue,
        &mut corrected.settled_and_written_off,
    ] {
        if let Some(value) = field.take() {
            *field = Some(normalize_currency_symbol(&value));
        }
    }

    if let Some(raw) = corrected.number_of_loans.as_deref() {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if !digits.is_empty() && digits.parse::<u64>().is_ok() {
            corrected.number_of_loans = Some(digits);
        }
    }

    corrected
}

fn normalize_currency_symbol(value: &str) -> String {
    let trimmed = value.trim();

    let remainder = trimmed
        .strip_prefix("Rs.")
        .or_else(|| trimmed.strip_prefix("Rs"))
        .map(str::trim_start);

    if let Some(rest) = remainder {
        return format!("₹ {rest}");
    }

    if let Some(rest) = trimmed.strip_prefix('₹') {
        if !rest.starts_with(' ') {
            return format!("₹ {}", rest.trim_start());
        }
    }

    trimmed.to_string()
}
