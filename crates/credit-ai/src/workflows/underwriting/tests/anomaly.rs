use super::common::{context_with_score, healthy_context};
use crate::workflows::underwriting::anomaly::detect_anomalies;
use crate::workflows::underwriting::domain::{AnomalyType, CibilDataContext, Severity};

#[test]
fn healthy_snapshot_has_no_anomalies() {
    let report = detect_anomalies(&healthy_context());

    assert!(!report.has_anomalies);
    assert!(report.anomalies.is_empty());
    assert_eq!(report.risk_score, 0.0);
    assert!(report.recommendations.is_empty());
}

#[test]
fn low_score_with_large_exposure_is_inconsistent() {
    let mut context = context_with_score("380");
    context.total_loan_amount = Some("₹15,00,000".to_string());

    let report = detect_anomalies(&context);

    let flag = report
        .anomalies
        .iter()
        .find(|flag| {
            flag.field == "cibil_score"
                && flag.anomaly_type == AnomalyType::LogicalInconsistency
        })
        .expect("inconsistency flag");
    assert_eq!(flag.severity, Severity::High);
    assert_eq!(flag.related_fields, vec!["total_loan_amount"]);
}

#[test]
fn zero_loans_with_overdue_amount_is_flagged_high() {
    let context = CibilDataContext {
        cibil_score: Some("720".to_string()),
        number_of_loans: Some("0".to_string()),
        amount_overdue: Some("₹15.00 L".to_string()),
        ..CibilDataContext::default()
    };

    let report = detect_anomalies(&context);

    let flag = report
        .anomalies
        .iter()
        .find(|flag| flag.field == "number_of_loans")
        .expect("loan count flag");
    assert_eq!(flag.anomaly_type, AnomalyType::LogicalInconsistency);
    assert_eq!(flag.severity, Severity::High);
}

#[test]
fn overdue_above_total_is_flagged_high() {
    let mut context = healthy_context();
    context.total_loan_amount = Some("₹1,00,000".to_string());
    context.amount_overdue = Some("₹2,00,000".to_string());

    let report = detect_anomalies(&context);

    assert!(report
        .anomalies
        .iter()
        .any(|flag| flag.field == "amount_overdue" && flag.severity == Severity::High));
}

#[test]
fn identical_amounts_look_fabricated() {
    let mut context = healthy_context();
    context.total_loan_amount = Some("₹5,00,000".to_string());
    context.amount_overdue = Some("₹5,00,000".to_string());
    context.settled_and_written_off = Some("₹5,00,000".to_string());

    let report = detect_anomalies(&context);

    assert!(report
        .anomalies
        .iter()
        .any(|flag| flag.anomaly_type == AnomalyType::SuspiciousPattern
            && flag.field == "total_loan_amount"));
}

#[test]
fn suit_filed_contradicts_a_clean_profile() {
    let mut context = context_with_score("780");
    context.amount_overdue = Some("₹0".to_string());
    context.suit_filed_status = Some("Yes".to_string());

    let report = detect_anomalies(&context);

    let severities: Vec<Severity> = report
        .anomalies
        .iter()
        .filter(|flag| flag.field == "suit_filed_status")
        .map(|flag| flag.severity)
        .collect();
    assert!(severities.contains(&Severity::High));
    assert!(severities.contains(&Severity::Medium));
}

#[test]
fn suit_filed_negations_are_ignored() {
    let mut context = context_with_score("780");
    context.suit_filed_status = Some("No".to_string());

    let report = detect_anomalies(&context);

    assert!(report
        .anomalies
        .iter()
        .all(|flag| flag.field != "suit_filed_status"));
}

#[test]
fn repeated_and_sequential_scores_are_suspicious() {
    let repeated = detect_anomalies(&context_with_score("777"));
    assert!(repeated
        .anomalies
        .iter()
        .any(|flag| flag.anomaly_type == AnomalyType::SuspiciousPattern));

    let sequential = detect_anomalies(&context_with_score("567"));
    assert!(sequential
        .anomalies
        .iter()
        .any(|flag| flag.anomaly_type == AnomalyType::SuspiciousPattern));
}

#[test]
fn extreme_scores_are_statistical_outliers() {
    let bottom = detect_anomalies(&context_with_score("340"));
    assert!(bottom.anomalies.iter().any(|flag| {
        flag.anomaly_type == AnomalyType::StatisticalOutlier && flag.severity == Severity::High
    }));

    let top = detect_anomalies(&context_with_score("880"));
    assert!(top.anomalies.iter().any(|flag| {
        flag.anomaly_type == AnomalyType::StatisticalOutlier && flag.severity == Severity::Low
    }));
}

#[test]
fn perfect_score_is_an_outlier_and_not_a_round_pattern() {
    let report = detect_anomalies(&context_with_score("900"));

    assert!(report
        .anomalies
        .iter()
        .any(|flag| flag.anomaly_type == AnomalyType::StatisticalOutlier
            && flag.severity == Severity::Medium));
    // 900 is excluded from the multiple-of-100 pattern rule.
    assert!(report
        .anomalies
        .iter()
        .all(|flag| flag.anomaly_type != AnomalyType::SuspiciousPattern));
}

#[test]
fn risk_score_accumulates_and_saturates() {
    let single = detect_anomalies(&context_with_score("880"));
    let double = {
        let mut context = context_with_score("880");
        context.suit_filed_status = Some("Yes".to_string());
        detect_anomalies(&context)
    };
    // Adding a flag never lowers the aggregate.
    assert!(double.risk_score >= single.risk_score);
    assert!(double.anomalies.len() > single.anomalies.len());

    // A thoroughly broken snapshot pins the score at the ceiling.
    let saturated = detect_anomalies(&CibilDataContext {
        cibil_score: Some("380".to_string()),
        number_of_loans: Some("0".to_string()),
        total_loan_amount: Some("₹15,00,000".to_string()),
        amount_overdue: Some("₹20,00,000".to_string()),
        settled_and_written_off: Some("₹40,00,000".to_string()),
        suit_filed_status: Some("Yes".to_string()),
    });
    assert_eq!(saturated.risk_score, 100.0);
}

#[test]
fn unparseable_amounts_disable_rules_instead_of_zeroing() {
    let mut context = context_with_score("380");
    context.total_loan_amount = Some("garbled".to_string());

    let report = detect_anomalies(&context);

    // The low-score/high-exposure rule needs the amount; with an
    // unparseable value it must stay silent rather than assume zero.
    assert!(report
        .anomalies
        .iter()
        .all(|flag| flag.anomaly_type != AnomalyType::LogicalInconsistency));
}

#[test]
fn recommendations_follow_flag_buckets() {
    let mut context = context_with_score("380");
    context.total_loan_amount = Some("₹15,00,000".to_string());

    let report = detect_anomalies(&context);

    assert!(report
        .recommendations
        .iter()
        .any(|advisory| advisory.starts_with("CRITICAL")));
}
