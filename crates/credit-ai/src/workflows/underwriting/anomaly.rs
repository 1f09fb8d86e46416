//! Cross-field consistency and outlier checks over one bureau snapshot.
//!
//! All six detection passes run unconditionally and their flags are
//! concatenated; no pass short-circuits another. A field that fails to
//! parse makes the rules that need it unevaluable, never zero.

use super::domain::{AnomalyFlag, AnomalyReport, AnomalyType, CibilDataContext, Severity};
use crate::workflows::documents::parse_amount;

/// Base risk weight per severity; each flag contributes `weight × confidence`.
const fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 10.0,
        Severity::Medium => 25.0,
        Severity::High => 50.0,
        Severity::Critical => 100.0,
    }
}

const RISK_CEILING: f64 = 100.0;

/// Scores forming a strictly increasing digit run; flagged as fabricated.
const SEQUENTIAL_SCORES: [i64; 7] = [123, 234, 345, 456, 567, 678, 789];

/// Run every detection pass and aggregate the saturating risk score.
pub fn detect_anomalies(context: &CibilDataContext) -> AnomalyReport {
    let mut anomalies = Vec::new();

    score_anomalies(context, &mut anomalies);
    loan_count_anomalies(context, &mut anomalies);
    amount_anomalies(context, &mut anomalies);
    cross_field_anomalies(context, &mut anomalies);
    pattern_anomalies(context, &mut anomalies);
    statistical_outliers(context, &mut anomalies);

    let risk_score = anomalies
        .iter()
        .map(|flag| severity_weight(flag.severity) * flag.confidence)
        .sum::<f64>()
        .min(RISK_CEILING);

    let recommendations = recommendations_for(&anomalies);

    AnomalyReport {
        has_anomalies: !anomalies.is_empty(),
        anomalies,
        risk_score,
        recommendations,
    }
}

fn score_of(context: &CibilDataContext) -> Option<i64> {
    context
        .cibil_score
        .as_deref()
        .and_then(|raw| raw.trim().parse().ok())
}

fn loan_count_of(context: &CibilDataContext) -> Option<i64> {
    context
        .number_of_loans
        .as_deref()
        .and_then(|raw| raw.trim().parse().ok())
}

fn amount_of(value: &Option<String>) -> Option<f64> {
    value.as_deref().and_then(parse_amount)
}

/// A suit-filed flag counts as present unless it reads as an explicit "no".
fn suit_filed(context: &CibilDataContext) -> bool {
    context
        .suit_filed_status
        .as_deref()
        .map(|raw| {
            let normalized = raw.trim().to_ascii_lowercase();
            !matches!(normalized.as_str(), "" | "no" | "none" | "0" | "n/a" | "unknown")
        })
        .unwrap_or(false)
}

fn score_anomalies(context: &CibilDataContext, anomalies: &mut Vec<AnomalyFlag>) {
    let Some(score) = score_of(context) else {
        return;
    };

    if score < 400 {
        if let Some(total) = amount_of(&context.total_loan_amount) {
            if total > 1_000_000.0 {
                anomalies.push(AnomalyFlag {
                    field: "cibil_score",
                    anomaly_type: AnomalyType::LogicalInconsistency,
                    severity: Severity::High,
                    message: format!(
                        "score {score} is implausibly low for ₹10L+ of sanctioned credit"
                    ),
                    suggestion: "Re-pull the bureau report; the score and exposure disagree"
                        .to_string(),
                    confidence: 0.85,
                    related_fields: vec!["total_loan_amount"],
                });
            }
        }
    }

    if score == 900 {
        anomalies.push(AnomalyFlag {
            field: "cibil_score",
            anomaly_type: AnomalyType::StatisticalOutlier,
            severity: Severity::Medium,
            message: "a perfect score of 900 is extremely rare".to_string(),
            suggestion: "Confirm the score was not a data entry placeholder".to_string(),
            confidence: 0.7,
            related_fields: Vec::new(),
        });
    }

    if score % 100 == 0 && score != 300 && score != 900 {
        anomalies.push(AnomalyFlag {
            field: "cibil_score",
            anomaly_type: AnomalyType::SuspiciousPattern,
            severity: Severity::Low,
            message: format!("score {score} is an exact multiple of 100"),
            suggestion: "Round scores are often estimates; verify against the report".to_string(),
            confidence: 0.6,
            related_fields: Vec::new(),
        });
    }
}

fn loan_count_anomalies(context: &CibilDataContext, anomalies: &mut Vec<AnomalyFlag>) {
    let Some(count) = loan_count_of(context) else {
        return;
    };
    let total = amount_of(&context.total_loan_amount);
    let overdue = amount_of(&context.amount_overdue);

    if count > 10 {
        if let Some(total) = total {
            if total / (count as f64) < 50_000.0 {
                anomalies.push(AnomalyFlag {
                    field: "number_of_loans",
                    anomaly_type: AnomalyType::LogicalInconsistency,
                    severity: Severity::Medium,
                    message: format!(
                        "{count} loans imply an average below ₹50,000 per account"
                    ),
                    suggestion: "Check whether the loan count includes closed accounts".to_string(),
                    confidence: 0.75,
                    related_fields: vec!["total_loan_amount"],
                });
            }
        }
    }

    if count == 0 {
        if let Some(overdue) = overdue {
            if overdue > 0.0 {
                anomalies.push(AnomalyFlag {
                    field: "number_of_loans",
                    anomaly_type: AnomalyType::LogicalInconsistency,
                    severity: Severity::High,
                    message: "overdue amount reported with zero loan accounts".to_string(),
                    suggestion: "One of the two fields is wrong; re-extract the report".to_string(),
                    confidence: 0.9,
                    related_fields: vec!["amount_overdue"],
                });
            }
        }
    }
}

fn amount_anomalies(context: &CibilDataContext, anomalies: &mut Vec<AnomalyFlag>) {
    let total = amount_of(&context.total_loan_amount);
    let overdue = amount_of(&context.amount_overdue);
    let settled = amount_of(&context.settled_and_written_off);

    if let (Some(total), Some(overdue)) = (total, overdue) {
        if overdue > total {
            anomalies.push(AnomalyFlag {
                field: "amount_overdue",
                anomaly_type: AnomalyType::LogicalInconsistency,
                severity: Severity::High,
                message: "overdue amount exceeds the total loan amount".to_string(),
                suggestion: "Overdue can never exceed total exposure; verify both fields"
                    .to_string(),
                confidence: 0.95,
                related_fields: vec!["total_loan_amount"],
            });
        }
    }

    if let (Some(total), Some(settled)) = (total, settled) {
        if settled > total * 1.5 {
            anomalies.push(AnomalyFlag {
                field: "settled_and_written_off",
                anomaly_type: AnomalyType::LogicalInconsistency,
                severity: Severity::Medium,
                message: "written-off amount is far above the total loan amount".to_string(),
                suggestion: "Confirm whether interest and penalties explain the gap".to_string(),
                confidence: 0.8,
                related_fields: vec!["total_loan_amount"],
            });
        }
    }

    if let (Some(total), Some(overdue), Some(settled)) = (total, overdue, settled) {
        if total > 0.0 && total == overdue && overdue == settled {
            anomalies.push(AnomalyFlag {
                field: "total_loan_amount",
                anomaly_type: AnomalyType::SuspiciousPattern,
                severity: Severity::High,
                message: "all three amount fields carry the same value".to_string(),
                suggestion: "Identical amounts suggest a copy-paste or extraction fault"
                    .to_string(),
                confidence: 0.85,
                related_fields: vec!["amount_overdue", "settled_and_written_off"],
            });
        }
    }
}

fn cross_field_anomalies(context: &CibilDataContext, anomalies: &mut Vec<AnomalyFlag>) {
    if !suit_filed(context) {
        return;
    }

    if let Some(score) = score_of(context) {
        if score > 750 {
            anomalies.push(AnomalyFlag {
                field: "suit_filed_status",
                anomaly_type: AnomalyType::LogicalInconsistency,
                severity: Severity::High,
                message: "a suit-filed flag contradicts a score above 750".to_string(),
                suggestion: "Litigation normally collapses the score; re-verify both".to_string(),
                confidence: 0.85,
                related_fields: vec!["cibil_score"],
            });
        }
    }

    if let Some(overdue) = amount_of(&context.amount_overdue) {
        if overdue == 0.0 {
            anomalies.push(AnomalyFlag {
                field: "suit_filed_status",
                anomaly_type: AnomalyType::LogicalInconsistency,
                severity: Severity::Medium,
                message: "suit filed while no amount is overdue".to_string(),
                suggestion: "Check whether the suit relates to a settled account".to_string(),
                confidence: 0.7,
                related_fields: vec!["amount_overdue"],
            });
        }
    }
}

fn pattern_anomalies(context: &CibilDataContext, anomalies: &mut Vec<AnomalyFlag>) {
    let Some(raw) = context.cibil_score.as_deref().map(str::trim) else {
        return;
    };

    if raw.len() == 3 && raw.chars().all(|ch| ch.is_ascii_digit()) {
        let mut chars = raw.chars();
        let first = chars.next();
        if chars.all(|ch| Some(ch) == first) {
            anomalies.push(AnomalyFlag {
                field: "cibil_score",
                anomaly_type: AnomalyType::SuspiciousPattern,
                severity: Severity::Medium,
                message: format!("score {raw} repeats a single digit"),
                suggestion: "Repeated-digit scores are a common fabrication tell".to_string(),
                confidence: 0.65,
                related_fields: Vec::new(),
            });
        }
    }

    if let Some(score) = score_of(context) {
        if SEQUENTIAL_SCORES.contains(&score) {
            anomalies.push(AnomalyFlag {
                field: "cibil_score",
                anomaly_type: AnomalyType::SuspiciousPattern,
                severity: Severity::Medium,
                message: format!("score {score} is a sequential digit run"),
                suggestion: "Sequential scores are a common fabrication tell".to_string(),
                confidence: 0.65,
                related_fields: Vec::new(),
            });
        }
    }
}

fn statistical_outliers(context: &CibilDataContext, anomalies: &mut Vec<AnomalyFlag>) {
    let Some(score) = score_of(context) else {
        return;
    };

    if score < 350 {
        anomalies.push(AnomalyFlag {
            field: "cibil_score",
            anomaly_type: AnomalyType::StatisticalOutlier,
            severity: Severity::High,
            message: format!("score {score} sits in the bottom 5% of the population"),
            suggestion: "Scores this low usually accompany severe delinquency; verify".to_string(),
            confidence: 0.8,
            related_fields: Vec::new(),
        });
    } else if score > 850 {
        anomalies.push(AnomalyFlag {
            field: "cibil_score",
            anomaly_type: AnomalyType::StatisticalOutlier,
            severity: Severity::Low,
            message: format!("score {score} sits in the top 5% of the population"),
            suggestion: "Exceptional scores warrant a second look at the source".to_string(),
            confidence: 0.6,
            related_fields: Vec::new(),
        });
    }
}

fn recommendations_for(anomalies: &[AnomalyFlag]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let severe_inconsistency = anomalies.iter().any(|flag| {
        flag.anomaly_type == AnomalyType::LogicalInconsistency
            && flag.severity >= Severity::High
    });
    if severe_inconsistency {
        recommendations.push(
            "CRITICAL: Re-verify the bureau report with the issuing agency before underwriting"
                .to_string(),
        );
    }

    if anomalies
        .iter()
        .any(|flag| flag.anomaly_type == AnomalyType::SuspiciousPattern)
    {
        recommendations.push(
            "HIGH: Request the original bureau document; extracted values show suspicious patterns"
                .to_string(),
        );
    }

    if anomalies
        .iter()
        .any(|flag| flag.anomaly_type == AnomalyType::StatisticalOutlier)
    {
        recommendations.push(
            "Corroborate the bureau score against banking and repayment history".to_string(),
        );
    }

    recommendations
}
