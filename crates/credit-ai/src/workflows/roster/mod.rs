//! Roster ingestion: batch-import loan applications from a CSV export and
//! fold them into the portfolio risk summary.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::risk::{
    calculate_risk_score, portfolio_summary, ApplicationRiskAssessment, LoanApplication,
    PortfolioRiskSummary,
};

/// Errors raised while importing an application roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LoanApplication>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LoanApplication>, RosterImportError> {
        Ok(parser::parse_applications(reader)?)
    }
}

/// Import a roster and risk-score every application. Roster rows carry no
/// documents or eligibility verdicts, so each score starts from the
/// neutral base.
pub fn portfolio_from_reader<R: Read>(reader: R) -> Result<PortfolioRiskSummary, RosterImportError> {
    let applications = RosterImporter::from_reader(reader)?;
    let assessments: Vec<ApplicationRiskAssessment> = applications
        .into_iter()
        .map(|application| ApplicationRiskAssessment {
            score: calculate_risk_score(&application, &[], None),
            application,
        })
        .collect();

    Ok(portfolio_summary(&assessments))
}

pub fn portfolio_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<PortfolioRiskSummary, RosterImportError> {
    let file = std::fs::File::open(path)?;
    portfolio_from_reader(file)
}
