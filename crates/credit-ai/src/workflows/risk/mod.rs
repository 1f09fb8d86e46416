//! Application and portfolio risk views derived from the same extracted
//! data the eligibility calculator consumes.

mod domain;
mod engine;
mod portfolio;

pub use domain::{
    AlertSeverity, BusinessConcentration, CategoryScores, LoanApplication, PortfolioAlert,
    PortfolioRiskSummary, RiskAlert, RiskCategory, RiskScore, RiskSeverity, SeverityDistribution,
};
pub use engine::calculate_risk_score;
pub use portfolio::{portfolio_summary, ApplicationRiskAssessment};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::documents::{extract, DocumentType};
    use crate::workflows::eligibility::{EligibilityEngine, EligibilityInput};
    use chrono::{Duration, TimeZone, Utc};

    fn application(credit_score: u16, loan_amount: f64) -> LoanApplication {
        LoanApplication {
            application_id: "app-000001".to_string(),
            business_name: "Sharma Fabrication Works".to_string(),
            business_type: "Manufacturing".to_string(),
            loan_amount,
            credit_score,
            submitted_at: Utc.with_ymd_and_hms(2025, 11, 4, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn neutral_base_risk_without_eligibility() {
        let score = calculate_risk_score(&application(720, 1_000_000.0), &[], None);

        assert_eq!(score.base_risk, 50.0);
        assert!(score.alerts.is_empty());
        // (50 + 0 + 25/4) / 2 with only the industry category populated.
        assert!(score.overall_score > 25.0 && score.overall_score < 30.0);
        assert_eq!(score.severity, RiskSeverity::Medium);
    }

    #[test]
    fn low_credit_score_raises_a_critical_alert() {
        let score = calculate_risk_score(&application(580, 1_000_000.0), &[], None);

        let alert = score
            .alerts
            .iter()
            .find(|alert| alert.category == RiskCategory::Credit)
            .expect("credit alert");
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.impact, 25.0);
        assert_eq!(score.categories.credit, 25.0);
    }

    #[test]
    fn marginal_credit_score_raises_a_warning() {
        let score = calculate_risk_score(&application(640, 1_000_000.0), &[], None);

        let alert = score
            .alerts
            .iter()
            .find(|alert| alert.category == RiskCategory::Credit)
            .expect("credit alert");
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.impact, 15.0);
    }

    #[test]
    fn bureau_and_bank_documents_feed_the_checks() {
        let cibil = extract(
            DocumentType::CibilReport,
            "CIBIL Score: 640\nNumber of Loans: 4\nTotal Loan Amount: ₹20,00,000\n\
             Amount Overdue: ₹1,50,000\nWritten Off: ₹2,00,000",
            "cibil.txt",
        );
        let bank = extract(
            DocumentType::BankStatement,
            "Total Credits: ₹4,00,000\nTotal Debits: ₹9,00,000\nCheque Bounces: 5",
            "bank.txt",
        );

        let score = calculate_risk_score(&application(640, 1_000_000.0), &[cibil, bank], None);

        let messages: Vec<&str> = score
            .alerts
            .iter()
            .map(|alert| alert.message.as_str())
            .collect();
        assert!(messages.iter().any(|msg| msg.contains("written-off")));
        assert!(messages.iter().any(|msg| msg.contains("overdue")));
        assert!(messages.iter().any(|msg| msg.contains("cheque bounce")));
        assert!(messages.iter().any(|msg| msg.contains("cash outflow")));

        // Five bounces: impact 25 at critical severity.
        let bounce = score
            .alerts
            .iter()
            .find(|alert| alert.message.contains("cheque bounce"))
            .expect("bounce alert");
        assert_eq!(bounce.severity, AlertSeverity::Critical);
        assert_eq!(bounce.impact, 25.0);

        assert!(score.categories.operational >= 40.0);
        // Compounding document findings push the application to the top band.
        assert_eq!(score.severity, RiskSeverity::Critical);
    }

    #[test]
    fn weak_eligibility_raises_base_risk_and_an_alert() {
        let engine = EligibilityEngine::default();
        let eligibility = engine.calculate(&EligibilityInput {
            business_type: "Construction".to_string(),
            annual_revenue: 500_000.0,
            loan_amount: 6_000_000.0,
            existing_loan_amount: 0.0,
            loan_term_months: 12,
            credit_score: 700,
            documents: Vec::new(),
        });
        assert!(!eligibility.is_eligible);

        let score = calculate_risk_score(
            &application(700, 6_000_000.0),
            &[],
            Some(&eligibility),
        );

        assert_eq!(score.base_risk, 100.0 - eligibility.overall_score);
        assert!(score
            .alerts
            .iter()
            .any(|alert| alert.message.contains("Eligibility score")));
        assert!(score
            .alerts
            .iter()
            .any(|alert| alert.severity == AlertSeverity::Info
                && alert.message.contains("₹50L")));
    }

    #[test]
    fn portfolio_summary_aggregates_distribution_and_concentration() {
        let assessments: Vec<ApplicationRiskAssessment> = [(720, "Technology"), (580, "Technology"), (640, "Retail")]
            .into_iter()
            .enumerate()
            .map(|(index, (credit_score, business_type))| {
                let mut application = application(credit_score, 1_000_000.0);
                application.application_id = format!("app-{index:06}");
                application.business_type = business_type.to_string();
                application.submitted_at = application.submitted_at + Duration::days(index as i64);
                let score = calculate_risk_score(&application, &[], None);
                ApplicationRiskAssessment { application, score }
            })
            .collect();

        let summary = portfolio_summary(&assessments);

        assert_eq!(summary.total_applications, 3);
        assert_eq!(
            summary.severity_distribution.low
                + summary.severity_distribution.medium
                + summary.severity_distribution.high
                + summary.severity_distribution.critical,
            3
        );
        assert_eq!(summary.concentration[0].business_type, "Technology");
        assert_eq!(summary.concentration[0].applications, 2);
        assert!((summary.concentration[0].share_pct - 66.666).abs() < 0.01);
        assert!(summary.top_alerts.len() <= 5);
        assert!(summary.average_score > 0.0);
    }

    #[test]
    fn empty_portfolio_summarizes_to_zeroes() {
        let summary = portfolio_summary(&[]);

        assert_eq!(summary.total_applications, 0);
        assert_eq!(summary.average_score, 0.0);
        assert!(summary.concentration.is_empty());
        assert!(summary.top_alerts.is_empty());
    }

    #[test]
    fn top_alerts_rank_critical_before_warning() {
        let critical_app = application(550, 1_000_000.0);
        let warning_app = {
            let mut app = application(640, 1_000_000.0);
            app.application_id = "app-000002".to_string();
            app
        };

        let assessments = vec![
            ApplicationRiskAssessment {
                score: calculate_risk_score(&warning_app, &[], None),
                application: warning_app,
            },
            ApplicationRiskAssessment {
                score: calculate_risk_score(&critical_app, &[], None),
                application: critical_app,
            },
        ];

        let summary = portfolio_summary(&assessments);

        assert_eq!(summary.top_alerts[0].severity, AlertSeverity::Critical);
    }
}
