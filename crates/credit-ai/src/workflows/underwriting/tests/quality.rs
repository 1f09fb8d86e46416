use super::common::healthy_context;
use crate::workflows::underwriting::domain::{
    CibilDataContext, QualityLevel, RecommendationCategory, RecommendationPriority, Severity,
};
use crate::workflows::underwriting::quality::{assess_quality, auto_correct_data, completeness_of};

#[test]
fn complete_clean_snapshot_scores_high() {
    let mut context = healthy_context();
    context.suit_filed_status = Some("No".to_string());

    let assessment = assess_quality(&context, &[]);

    assert!(assessment.quality_score >= 75.0, "{}", assessment.quality_score);
    assert!(matches!(
        assessment.quality_level,
        QualityLevel::Excellent | QualityLevel::Good
    ));
    assert_eq!(assessment.completeness, 1.0);
    assert_eq!(assessment.field_validations.len(), 5);
    assert!(!assessment.anomaly.has_anomalies);
}

#[test]
fn missing_fields_lower_completeness_by_weight() {
    let context = CibilDataContext {
        cibil_score: Some("720".to_string()),
        ..CibilDataContext::default()
    };

    // Only the weight-3 required field of the 10 total weight is present.
    assert_eq!(completeness_of(&context), 0.3);
}

#[test]
fn incomplete_snapshot_generates_completeness_recommendation() {
    let context = CibilDataContext {
        cibil_score: Some("720".to_string()),
        number_of_loans: Some("3".to_string()),
        ..CibilDataContext::default()
    };

    let assessment = assess_quality(&context, &[]);

    let completeness = assessment
        .recommendations
        .iter()
        .find(|entry| entry.category == RecommendationCategory::Completeness)
        .expect("completeness recommendation");
    assert_eq!(completeness.priority, RecommendationPriority::Medium);
    assert!(completeness.message.contains("total_loan_amount"));
}

#[test]
fn validation_errors_dominate_the_recommendation_list() {
    let mut context = healthy_context();
    context.cibil_score = Some("abc".to_string());

    let assessment = assess_quality(&context, &[]);

    let first = &assessment.recommendations[0];
    assert_eq!(first.priority, RecommendationPriority::Critical);
    assert_eq!(first.category, RecommendationCategory::Validation);
    assert!(first.message.contains("cibil_score"));
}

#[test]
fn quality_score_combines_the_three_components() {
    let mut context = healthy_context();
    // Guarantee one warning (round figure) and nothing else.
    context.total_loan_amount = Some("₹25,00,000".to_string());
    context.suit_filed_status = Some("No".to_string());

    let assessment = assess_quality(&context, &[]);

    let warnings: usize = assessment
        .field_validations
        .iter()
        .map(|entry| entry.result.warnings.len())
        .sum();
    let expected_validation = 100.0 - 10.0 * warnings as f64;
    let expected = 0.4 * expected_validation
        + 0.3 * (100.0 - assessment.anomaly.risk_score)
        + 0.3 * assessment.completeness * 100.0;
    assert!((assessment.quality_score - expected).abs() < 1e-9);
}

#[test]
fn high_risk_snapshot_drops_to_critical_level() {
    let context = CibilDataContext {
        cibil_score: Some("380".to_string()),
        number_of_loans: Some("0".to_string()),
        total_loan_amount: Some("₹15,00,000".to_string()),
        amount_overdue: Some("₹20,00,000".to_string()),
        settled_and_written_off: Some("₹40,00,000".to_string()),
        suit_filed_status: Some("Yes".to_string()),
    };

    let assessment = assess_quality(&context, &[]);

    assert_eq!(assessment.anomaly.risk_score, 100.0);
    assert!(matches!(
        assessment.quality_level,
        QualityLevel::Poor | QualityLevel::Critical
    ));
    assert!(assessment
        .recommendations
        .iter()
        .any(|entry| entry.category == RecommendationCategory::Anomaly));
}

#[test]
fn overall_confidence_is_discounted_by_risk() {
    let clean = assess_quality(&healthy_context(), &[]);
    let risky = assess_quality(
        &CibilDataContext {
            amount_overdue: Some("₹20,00,000".to_string()),
            total_loan_amount: Some("₹15,00,000".to_string()),
            ..healthy_context()
        },
        &[],
    );

    assert!(risky.overall_confidence < clean.overall_confidence);
    assert!(risky.overall_confidence >= 0.0);
}

#[test]
fn flags_are_sorted_most_severe_first() {
    let mut context = healthy_context();
    context.cibil_score = Some("250".to_string());
    context.amount_overdue = Some("₹30,00,000".to_string());
    context.total_loan_amount = Some("₹15,00,000".to_string());

    let assessment = assess_quality(&context, &[]);

    let ranks: Vec<u8> = assessment
        .flags
        .iter()
        .map(|flag| match flag.severity {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        })
        .collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ranks, sorted);
    assert!(!ranks.is_empty());
}

#[test]
fn auto_correct_normalizes_currency_symbols() {
    let context = CibilDataContext {
        total_loan_amount: Some("Rs. 25,00,000".to_string()),
        amount_overdue: Some("Rs50000".to_string()),
        settled_and_written_off: Some("₹10,000".to_string()),
        number_of_loans: Some("5 loans".to_string()),
        ..CibilDataContext::default()
    };

    let corrected = auto_correct_data(&context);

    assert_eq!(corrected.total_loan_amount.as_deref(), Some("₹ 25,00,000"));
    assert_eq!(corrected.amount_overdue.as_deref(), Some("₹ 50000"));
    assert_eq!(
        corrected.settled_and_written_off.as_deref(),
        Some("₹ 10,000")
    );
    assert_eq!(corrected.number_of_loans.as_deref(), Some("5"));
}

#[test]
fn auto_correct_leaves_unfixable_fields_alone() {
    let context = CibilDataContext {
        number_of_loans: Some("unknown".to_string()),
        total_loan_amount: Some("N/A".to_string()),
        ..CibilDataContext::default()
    };

    let corrected = auto_correct_data(&context);

    assert_eq!(corrected.number_of_loans.as_deref(), Some("unknown"));
    assert_eq!(corrected.total_loan_amount.as_deref(), Some("N/A"));
}

#[test]
fn processing_methods_are_echoed_in_the_assessment() {
    let assessment = assess_quality(
        &healthy_context(),
        &["pattern_extraction".to_string(), "manual_entry".to_string()],
    );

    assert_eq!(assessment.processing_methods.len(), 2);
}
