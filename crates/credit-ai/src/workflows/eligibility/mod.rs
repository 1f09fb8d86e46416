//! Multi-factor loan eligibility: derived ratios, banded sub-scores, and
//! the weighted composite decision.

mod config;
mod domain;
mod metrics;
mod scoring;

pub use config::UnderwritingConfig;
pub use domain::{EligibilityInput, EligibilityResult, FinancialMetrics, ScoreBreakdown};

/// Sector risk lookup, shared with the risk engine's industry sub-score.
pub fn industry_risk_for(business_type: &str) -> f64 {
    metrics::industry_risk_score(business_type)
}

/// Stateless calculator applying the decision gates to one input.
pub struct EligibilityEngine {
    config: UnderwritingConfig,
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(UnderwritingConfig::default())
    }
}

impl EligibilityEngine {
    pub fn new(config: UnderwritingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnderwritingConfig {
        &self.config
    }

    /// Pure function of the input: identical inputs produce identical
    /// results, with every edge case expressed as a sentinel, never a NaN.
    pub fn calculate(&self, input: &EligibilityInput) -> EligibilityResult {
        let total_debt = input.existing_loan_amount + input.loan_amount;
        let (dscr, annual_debt_service, monthly_payment) = metrics::debt_service_coverage(
            input.annual_revenue,
            total_debt,
            self.config.annual_interest_rate,
            input.loan_term_months,
        );

        let current_ratio = metrics::current_ratio(&input.documents);
        let revenue_growth = metrics::revenue_growth(input.annual_revenue, &input.documents);
        let credit_score_normalized = metrics::credit_score_normalized(input.credit_score);

        let breakdown = ScoreBreakdown {
            dscr: scoring::score_dscr(dscr),
            current_ratio: scoring::score_current_ratio(current_ratio),
            revenue_growth: scoring::score_revenue_growth(revenue_growth),
            gst_compliance: metrics::gst_compliance_score(&input.documents),
            banking_relationship: metrics::banking_score(&input.documents),
            industry_risk: metrics::industry_risk_score(&input.business_type),
            credit_score: credit_score_normalized,
        };

        let overall_score = scoring::DSCR_WEIGHT * breakdown.dscr
            + scoring::CURRENT_RATIO_WEIGHT * breakdown.current_ratio
            + scoring::REVENUE_GROWTH_WEIGHT * breakdown.revenue_growth
            + scoring::GST_WEIGHT * breakdown.gst_compliance
            + scoring::BANKING_WEIGHT * breakdown.banking_relationship
            + scoring::INDUSTRY_WEIGHT * breakdown.industry_risk
            + scoring::CREDIT_WEIGHT * breakdown.credit_score;

        let rejection_reason = self.rejection_reason(overall_score, dscr, input.credit_score);

        tracing::debug!(
            overall_score,
            dscr,
            credit_score = input.credit_score,
            eligible = rejection_reason.is_none(),
            "eligibility calculated"
        );

        EligibilityResult {
            overall_score,
            is_eligible: rejection_reason.is_none(),
            rejection_reason,
            breakdown,
            metrics: FinancialMetrics {
                dscr,
                annual_debt_service,
                monthly_payment,
                current_ratio,
                revenue_growth,
                credit_score_normalized,
            },
        }
    }

    /// Only one reason is reported, in fixed precedence: credit score,
    /// then debt coverage, then the composite threshold.
    fn rejection_reason(&self, overall_score: f64, dscr: f64, credit_score: u16) -> Option<String> {
        if credit_score < self.config.minimum_credit_score {
            return Some(format!(
                "Credit score {credit_score} is below the minimum requirement of {}",
                self.config.minimum_credit_score
            ));
        }
        if dscr < self.config.minimum_dscr {
            return Some(format!(
                "Insufficient debt service coverage ratio ({dscr:.2} < {:.2})",
                self.config.minimum_dscr
            ));
        }
        if overall_score < self.config.eligibility_threshold {
            return Some(format!(
                "Overall score {overall_score:.1} is below the eligibility threshold of {:.0}",
                self.config.eligibility_threshold
            ));
        }
        None
    }
}
