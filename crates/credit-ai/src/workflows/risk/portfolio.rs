//! Portfolio-level aggregation over a batch of scored applications.

use std::collections::BTreeMap;

use super::domain::{
    BusinessConcentration, LoanApplication, PortfolioAlert, PortfolioRiskSummary, RiskScore,
    RiskSeverity, SeverityDistribution,
};

/// Number of alerts surfaced at portfolio level.
const TOP_ALERT_LIMIT: usize = 5;

/// One scored application inside a portfolio batch.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ApplicationRiskAssessment {
    pub application: LoanApplication,
    pub score: RiskScore,
}

/// Fold a batch of assessments into the portfolio summary view.
pub fn portfolio_summary(assessments: &[ApplicationRiskAssessment]) -> PortfolioRiskSummary {
    let mut distribution = SeverityDistribution::default();
    let mut by_business_type: BTreeMap<&str, usize> = BTreeMap::new();
    let mut score_sum = 0.0;

    for assessment in assessments {
        match assessment.score.severity {
            RiskSeverity::Low => distribution.low += 1,
            RiskSeverity::Medium => distribution.medium += 1,
            RiskSeverity::High => distribution.high += 1,
            RiskSeverity::Critical => distribution.critical += 1,
        }
        *by_business_type
            .entry(assessment.application.business_type.as_str())
            .or_default() += 1;
        score_sum += assessment.score.overall_score;
    }

    let total_applications = assessments.len();
    let average_score = if total_applications > 0 {
        score_sum / total_applications as f64
    } else {
        0.0
    };

    let mut concentration: Vec<BusinessConcentration> = by_business_type
        .into_iter()
        .map(|(business_type, applications)| BusinessConcentration {
            business_type: business_type.to_string(),
            applications,
            share_pct: applications as f64 / total_applications as f64 * 100.0,
        })
        .collect();
    concentration.sort_by(|a, b| b.applications.cmp(&a.applications));

    let mut top_alerts: Vec<PortfolioAlert> = assessments
        .iter()
        .flat_map(|assessment| {
            assessment.score.alerts.iter().map(|alert| PortfolioAlert {
                application_id: assessment.application.application_id.clone(),
                severity: alert.severity,
                category: alert.category,
                message: alert.message.clone(),
                impact: alert.impact,
                raised_at: alert.raised_at,
            })
        })
        .collect();
    top_alerts.sort_by(|a, b| {
        b.severity
            .rank()
            .cmp(&a.severity.rank())
            .then(b.raised_at.cmp(&a.raised_at))
    });
    top_alerts.truncate(TOP_ALERT_LIMIT);

    PortfolioRiskSummary {
        total_applications,
        severity_distribution: distribution,
        average_score,
        concentration,
        top_alerts,
    }
}
