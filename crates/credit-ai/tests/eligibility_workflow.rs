//! Integration specifications for the eligibility and risk stages,
//! including the domain sweeps the band tables must survive.

use chrono::{TimeZone, Utc};
use credit_ai::workflows::documents::{
    extract, format_currency, parse_amount, DocumentType,
};
use credit_ai::workflows::eligibility::{EligibilityEngine, EligibilityInput};
use credit_ai::workflows::risk::{calculate_risk_score, LoanApplication, RiskSeverity};
use credit_ai::workflows::underwriting::{validate_cibil_score, validate_amount, AmountField};

fn baseline_input() -> EligibilityInput {
    EligibilityInput {
        business_type: "Manufacturing".to_string(),
        annual_revenue: 12_000_000.0,
        loan_amount: 1_500_000.0,
        existing_loan_amount: 500_000.0,
        loan_term_months: 36,
        credit_score: 740,
        documents: Vec::new(),
    }
}

#[test]
fn documents_enrich_the_composite_score() {
    let engine = EligibilityEngine::default();
    let bare = engine.calculate(&baseline_input());

    let documents = vec![
        extract(
            DocumentType::BalanceSheet,
            "Total Assets: ₹80,00,000\nTotal Liabilities: ₹30,00,000",
            "balance.txt",
        ),
        extract(
            DocumentType::GstReturns,
            "GSTIN: 27AAPFU0939F1ZV\nMonthly Turnover: ₹8,00,000\nTax Paid: ₹65,000\nFiling Status: Regular",
            "gst.txt",
        ),
        extract(
            DocumentType::BankStatement,
            "Total Credits: ₹95,00,000\nTotal Debits: ₹70,00,000\nAverage Balance: ₹3,00,000",
            "bank.txt",
        ),
    ];
    let enriched = engine.calculate(&EligibilityInput {
        documents,
        ..baseline_input()
    });

    assert!(enriched.overall_score > bare.overall_score);
    assert_eq!(enriched.breakdown.gst_compliance, 100.0);
    assert_eq!(enriched.breakdown.banking_relationship, 90.0);
    assert_eq!(enriched.metrics.current_ratio, Some(8.0 / 3.0));
    // Annualized GST turnover (₹96L) against declared ₹1.2Cr revenue.
    assert_eq!(enriched.breakdown.revenue_growth, 100.0);
}

#[test]
fn rejection_reasons_follow_fixed_precedence() {
    let engine = EligibilityEngine::default();

    // Both the credit gate and the DSCR gate fail; credit wins.
    let both = engine.calculate(&EligibilityInput {
        credit_score: 550,
        annual_revenue: 500_000.0,
        loan_amount: 10_000_000.0,
        loan_term_months: 12,
        ..baseline_input()
    });
    assert!(both
        .rejection_reason
        .as_deref()
        .expect("reason")
        .contains("Credit score"));

    // Credit passes, DSCR fails.
    let dscr_only = engine.calculate(&EligibilityInput {
        credit_score: 750,
        annual_revenue: 500_000.0,
        existing_loan_amount: 1_000_000.0,
        loan_amount: 1_000_000.0,
        loan_term_months: 12,
        ..baseline_input()
    });
    assert!(dscr_only
        .rejection_reason
        .as_deref()
        .expect("reason")
        .contains("debt service coverage"));
}

#[test]
fn score_bands_partition_the_bureau_range() {
    // Reference piecewise definition of the soft warning bands.
    for score in 300..=900u16 {
        let raw = score.to_string();
        let result = validate_cibil_score(&raw);
        assert!(result.is_valid, "score {score} must validate");

        let expected_warnings = usize::from(score <= 350 || score >= 850);
        assert_eq!(
            result.warnings.len(),
            expected_warnings,
            "score {score} warning band mismatch"
        );
    }

    assert!(!validate_cibil_score("299").is_valid);
    assert!(!validate_cibil_score("901").is_valid);
}

#[test]
fn normalized_credit_scores_cover_the_unit_range() {
    let engine = EligibilityEngine::default();
    for score in (300..=900u16).step_by(50) {
        let result = engine.calculate(&EligibilityInput {
            credit_score: score,
            ..baseline_input()
        });
        let expected = (score as f64 - 300.0) / 600.0 * 100.0;
        assert!(
            (result.metrics.credit_score_normalized - expected).abs() < 1e-9,
            "score {score}"
        );
    }
}

#[test]
fn currency_round_trip_holds_across_magnitudes() {
    let mut value: u64 = 1_000;
    while value <= 100_000_000 {
        for offset in [0, 1, 499, 77_777] {
            let amount = value + offset;
            let formatted = format_currency(amount as f64);
            assert_eq!(
                parse_amount(&formatted),
                Some(amount as f64),
                "round trip failed for {formatted}"
            );
            assert!(
                validate_amount(AmountField::TotalLoanAmount, &formatted).is_valid,
                "{formatted} must validate"
            );
        }
        value *= 10;
    }
}

#[test]
fn risk_and_eligibility_agree_on_the_same_applicant() {
    let engine = EligibilityEngine::default();
    let input = EligibilityInput {
        credit_score: 580,
        ..baseline_input()
    };
    let eligibility = engine.calculate(&input);
    assert!(!eligibility.is_eligible);

    let application = LoanApplication {
        application_id: "app-000042".to_string(),
        business_name: "Verma Textiles".to_string(),
        business_type: input.business_type.clone(),
        loan_amount: input.loan_amount,
        credit_score: input.credit_score,
        submitted_at: Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap(),
    };
    let risk = calculate_risk_score(&application, &[], Some(&eligibility));

    assert_eq!(risk.base_risk, 100.0 - eligibility.overall_score);
    assert!(risk.alerts.iter().any(|alert| alert.impact == 25.0));
    assert!(matches!(
        risk.severity,
        RiskSeverity::Medium | RiskSeverity::High
    ));
}
