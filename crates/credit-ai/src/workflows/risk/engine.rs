//! Application-level risk scoring from declared data, extracted documents,
//! and an optional eligibility verdict.

use chrono::Utc;

use crate::workflows::documents::{parse_amount, CashFlowPattern, ExtractedDocument};
use crate::workflows::eligibility::{industry_risk_for, EligibilityResult};

use super::domain::{
    AlertSeverity, CategoryScores, LoanApplication, RiskAlert, RiskCategory, RiskScore,
    RiskSeverity,
};

/// Risk assumed when no eligibility verdict is supplied.
const NEUTRAL_BASE_RISK: f64 = 50.0;

/// Loan sizes above ₹50L draw a concentration note.
const LARGE_LOAN_THRESHOLD: f64 = 5_000_000.0;

fn severity_for(score: f64) -> RiskSeverity {
    if score >= 75.0 {
        RiskSeverity::Critical
    } else if score >= 50.0 {
        RiskSeverity::High
    } else if score >= 25.0 {
        RiskSeverity::Medium
    } else {
        RiskSeverity::Low
    }
}

/// Score one application. Pure over its inputs apart from the timestamps
/// stamped on the alerts and the result.
pub fn calculate_risk_score(
    application: &LoanApplication,
    documents: &[ExtractedDocument],
    eligibility: Option<&EligibilityResult>,
) -> RiskScore {
    let assessed_at = Utc::now();
    let base_risk = eligibility
        .map(|result| 100.0 - result.overall_score)
        .unwrap_or(NEUTRAL_BASE_RISK);

    let mut alerts: Vec<RiskAlert> = Vec::new();
    let mut categories = CategoryScores::default();

    let raise =
        |alerts: &mut Vec<RiskAlert>,
         categories: &mut CategoryScores,
         severity: AlertSeverity,
         category: RiskCategory,
         impact: f64,
         message: String| {
            match category {
                RiskCategory::Credit => categories.credit += impact,
                RiskCategory::Financial => categories.financial += impact,
                RiskCategory::Operational => categories.operational += impact,
                RiskCategory::Industry => categories.industry += impact,
            }
            alerts.push(RiskAlert {
                severity,
                category,
                message,
                impact,
                raised_at: assessed_at,
            });
        };

    if application.credit_score < 600 {
        raise(
            &mut alerts,
            &mut categories,
            AlertSeverity::Critical,
            RiskCategory::Credit,
            25.0,
            format!(
                "Credit score {} is below the lending floor of 600",
                application.credit_score
            ),
        );
    } else if application.credit_score < 650 {
        raise(
            &mut alerts,
            &mut categories,
            AlertSeverity::Warning,
            RiskCategory::Credit,
            15.0,
            format!("Credit score {} is marginal", application.credit_score),
        );
    }

    let cibil = documents
        .iter()
        .find_map(|document| document.cibil_report());
    if let Some(report) = cibil {
        if parse_amount(&report.settled_and_written_off).is_some_and(|value| value > 0.0) {
            raise(
                &mut alerts,
                &mut categories,
                AlertSeverity::Critical,
                RiskCategory::Credit,
                20.0,
                "Settled or written-off accounts on the bureau record".to_string(),
            );
        }
        if parse_amount(&report.amount_overdue).is_some_and(|value| value > 0.0) {
            raise(
                &mut alerts,
                &mut categories,
                AlertSeverity::Warning,
                RiskCategory::Financial,
                15.0,
                format!("Outstanding overdue amount of {}", report.amount_overdue),
            );
        }
    }

    let bank = documents
        .iter()
        .find_map(|document| document.bank_statement());
    if let Some(statement) = bank {
        if statement.cheque_bounces > 0 {
            let severity = if statement.cheque_bounces > 3 {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            raise(
                &mut alerts,
                &mut categories,
                severity,
                RiskCategory::Operational,
                statement.cheque_bounces as f64 * 5.0,
                format!("{} cheque bounce(s) in the statement period", statement.cheque_bounces),
            );
        }
        if statement.cash_flow_pattern == CashFlowPattern::Negative {
            raise(
                &mut alerts,
                &mut categories,
                AlertSeverity::Warning,
                RiskCategory::Operational,
                15.0,
                "Net cash outflow over the statement period".to_string(),
            );
        }
    }

    if let Some(result) = eligibility {
        if result.overall_score < 60.0 {
            raise(
                &mut alerts,
                &mut categories,
                AlertSeverity::Warning,
                RiskCategory::Financial,
                10.0,
                format!(
                    "Eligibility score {:.1} is below the approval threshold",
                    result.overall_score
                ),
            );
        }
    }

    if application.loan_amount > LARGE_LOAN_THRESHOLD {
        raise(
            &mut alerts,
            &mut categories,
            AlertSeverity::Info,
            RiskCategory::Financial,
            10.0,
            "Requested amount exceeds ₹50L; large-exposure review applies".to_string(),
        );
    }

    // Sector risk feeds the industry sub-score directly; riskier sectors
    // score lower on the eligibility side, so invert that scale here.
    categories.industry += 100.0 - industry_risk_for(&application.business_type);

    let total_impact: f64 = alerts.iter().map(|alert| alert.impact).sum();
    let overall_score =
        ((base_risk + total_impact + categories.average()) / 2.0).clamp(0.0, 100.0);

    tracing::debug!(
        application_id = %application.application_id,
        overall_score,
        base_risk,
        total_impact,
        alerts = alerts.len(),
        "risk scored"
    );

    RiskScore {
        application_id: application.application_id.clone(),
        severity: severity_for(overall_score),
        overall_score,
        base_risk,
        total_impact,
        categories,
        alerts,
        assessed_at,
    }
}
